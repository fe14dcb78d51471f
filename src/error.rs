use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::negotiate::Format;
use crate::notes::views;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Not Found")]
    NotFound,
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
    #[error("There was a problem adding the information to the database.")]
    CreateFailed(anyhow::Error),
    #[error("There was a problem updating the information to the database: {0}")]
    UpdateFailed(anyhow::Error),
    #[error("There was a problem retrieving the information from the database.")]
    ReadFailed(anyhow::Error),
    #[error("There was a problem removing the information from the database.")]
    DeleteFailed(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl NoteError {
    pub fn status(&self) -> StatusCode {
        use NoteError::*;
        match self {
            NotFound => StatusCode::NOT_FOUND,
            InvalidId(_) => StatusCode::BAD_REQUEST,
            CreateFailed(_) | UpdateFailed(_) | ReadFailed(_) | DeleteFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn store_error(&self) -> Option<&anyhow::Error> {
        use NoteError::*;
        match self {
            CreateFailed(e) | UpdateFailed(e) | ReadFailed(e) | DeleteFailed(e) => Some(e),
            NotFound | InvalidId(_) => None,
        }
    }

    /// Message in the `"<status> Error: <reason>"` form used by JSON error bodies.
    pub fn message(&self) -> String {
        format!("{} Error: {}", self.status().as_u16(), self)
    }

    /// Renders the error in the representation picked for the request.
    /// Write failures always answer in plain text.
    pub fn into_response_for(self, format: Format) -> Response {
        let status = self.status();
        if let Some(e) = self.store_error() {
            tracing::error!(status = status.as_u16(), "store error: {:#}", e);
        }

        match (&self, format) {
            (NoteError::CreateFailed(_) | NoteError::UpdateFailed(_), _) => {
                (status, self.to_string()).into_response()
            }
            (_, Format::Json) => (status, Json(MessageResponse { message: self.message() })).into_response(),
            (_, Format::Html) => (status, Html(views::error_page(status, &self.to_string()))).into_response(),
        }
    }
}

pub fn not_acceptable() -> Response {
    (StatusCode::NOT_ACCEPTABLE, "Not Acceptable").into_response()
}

pub fn payload_too_large() -> Response {
    (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large").into_response()
}
