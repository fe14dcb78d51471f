//! Notes Module
//!
//! REST access to the notes collection, mounted under `/notes`:
//!
//! | Method | Path            | HTML                  | JSON               |
//! |--------|-----------------|-----------------------|--------------------|
//! | GET    | `/`             | list page             | array of notes     |
//! | POST   | `/`             | redirect to `/notes`  | created note       |
//! | GET    | `/new`          | empty form            | 406                |
//! | GET    | `/:id`          | detail page           | note               |
//! | GET    | `/:id/edit`     | edit form             | note               |
//! | PUT    | `/:id/edit`     | redirect to the note  | updated note       |
//! | DELETE | `/:id/edit`     | redirect to `/notes`  | `{message, item}`  |
//!
//! # Usage
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .nest("/notes", notes::routes())
//!     .with_state(app_state);
//! ```

mod extract;
mod handler;
mod routes;
pub mod views;

pub use extract::{NoteBody, NoteParam};
pub use routes::routes;
