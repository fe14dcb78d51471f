use axum::{Router, routing::get};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_notes).post(handler::create_note))
        .route("/new", get(handler::new_note))
        .route("/:id", get(handler::show_note))
        .route(
            "/:id/edit",
            get(handler::edit_note)
                .put(handler::update_note)
                .delete(handler::delete_note),
        )
}
