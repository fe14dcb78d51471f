//! HTTP handlers for the notes collection.
//!
//! Every handler answers in HTML or JSON depending on the negotiated [`Format`].

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::extract::{NoteBody, NoteParam};
use super::views;
use crate::error::{NoteError, not_acceptable};
use crate::handler::AppState;
use crate::model::Deleted;
use crate::negotiate::Format;

pub async fn list_notes(State(state): State<AppState>, format: Format) -> Response {
    let notes = match state.store.find().await {
        Ok(notes) => notes,
        Err(e) => return NoteError::ReadFailed(e).into_response_for(format),
    };

    tracing::info!(count = notes.len(), "GET listing notes");
    match format {
        Format::Html => Html(views::index("All my Notes", &notes)).into_response(),
        Format::Json => Json(notes).into_response(),
    }
}

pub async fn create_note(State(state): State<AppState>, format: Format, NoteBody(input): NoteBody) -> Response {
    let note = match state.store.create(input).await {
        Ok(note) => note,
        Err(e) => return NoteError::CreateFailed(e).into_response_for(format),
    };

    tracing::info!(id = %note.id, "POST creating new note");
    match format {
        Format::Html => Redirect::to("/notes").into_response(),
        Format::Json => Json(note).into_response(),
    }
}

/// The empty form only exists as HTML.
pub async fn new_note(headers: HeaderMap) -> Response {
    match Format::from_headers(&headers, &[Format::Html]) {
        Some(_) => Html(views::new_form("Add New Note")).into_response(),
        None => not_acceptable(),
    }
}

pub async fn show_note(format: Format, NoteParam(note): NoteParam) -> Response {
    tracing::info!(id = %note.id, "GET retrieving note");
    match format {
        Format::Html => Html(views::show(&note)).into_response(),
        Format::Json => Json(note).into_response(),
    }
}

pub async fn edit_note(format: Format, NoteParam(note): NoteParam) -> Response {
    tracing::info!(id = %note.id, "GET retrieving note for edit");
    match format {
        Format::Html => Html(views::edit_form(&format!("Note {}", note.id), &note)).into_response(),
        Format::Json => Json(note).into_response(),
    }
}

pub async fn update_note(
    State(state): State<AppState>,
    format: Format,
    NoteParam(note): NoteParam,
    NoteBody(input): NoteBody,
) -> Response {
    let updated = match state.store.update(&note.id, input).await {
        Ok(Some(updated)) => updated,
        Ok(None) => return NoteError::NotFound.into_response_for(format),
        Err(e) => return NoteError::UpdateFailed(e).into_response_for(format),
    };

    tracing::info!(id = %updated.id, "PUT updating note");
    match format {
        Format::Html => Redirect::to(&format!("/notes/{}", updated.id)).into_response(),
        Format::Json => Json(updated).into_response(),
    }
}

pub async fn delete_note(State(state): State<AppState>, format: Format, NoteParam(note): NoteParam) -> Response {
    let removed = match state.store.remove(&note.id).await {
        Ok(Some(removed)) => removed,
        Ok(None) => return NoteError::NotFound.into_response_for(format),
        Err(e) => return NoteError::DeleteFailed(e).into_response_for(format),
    };

    tracing::info!(id = %removed.id, "DELETE removing note");
    match format {
        Format::Html => Redirect::to("/notes").into_response(),
        Format::Json => Json(Deleted::new(removed)).into_response(),
    }
}
