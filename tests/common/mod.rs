#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use notesvc::db::Database;
use notesvc::handler::AppState;
use notesvc::model::{Note, NoteId, NoteInput};
use notesvc::store::NoteStore;
use serde_json::Value;
use tower::ServiceExt;

pub const JSON: &str = "application/json";
pub const HTML: &str = "text/html";
pub const FORM: &str = "application/x-www-form-urlencoded";

pub async fn notes_app() -> Router {
    let db = Database::in_memory().await.unwrap();
    notesvc::app(AppState::new(Arc::new(db)))
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub fn get(uri: &str, accept: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::ACCEPT, accept)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ACCEPT, JSON)
        .header(header::CONTENT_TYPE, JSON)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_post(uri: &str, body: &str, accept: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::ACCEPT, accept)
        .header(header::CONTENT_TYPE, FORM)
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn delete(uri: &str, accept: &str) -> Request<Body> {
    Request::delete(uri)
        .header(header::ACCEPT, accept)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response<Body>) -> Value {
    serde_json::from_str(&body_string(res).await).unwrap()
}

pub fn content_type(res: &Response<Body>) -> String {
    res.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

pub fn location(res: &Response<Body>) -> String {
    res.headers()[header::LOCATION].to_str().unwrap().to_owned()
}

/// Creates a note through the JSON API and returns its identifier.
pub async fn create(app: &Router, title: &str, note: &str) -> String {
    let res = send(app, json_request("POST", "/notes", serde_json::json!({"title": title, "note": note}))).await;
    assert_eq!(res.status(), axum::http::StatusCode::OK);
    body_json(res).await["_id"].as_str().unwrap().to_owned()
}

pub const KNOWN_ID: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";

/// Store whose lookups of [`KNOWN_ID`] succeed and whose every other call fails.
pub struct FailingStore;

fn known_note() -> Note {
    Note {
        id: NoteId::parse(KNOWN_ID).unwrap(),
        title: Some("kept".into()),
        note_text: Some("kept".into()),
    }
}

#[async_trait]
impl NoteStore for FailingStore {
    async fn find(&self) -> Result<Vec<Note>> {
        anyhow::bail!("connection refused")
    }

    async fn create(&self, _input: NoteInput) -> Result<Note> {
        anyhow::bail!("connection refused")
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>> {
        if id.as_str() == KNOWN_ID {
            Ok(Some(known_note()))
        } else {
            anyhow::bail!("connection refused")
        }
    }

    async fn update(&self, _id: &NoteId, _input: NoteInput) -> Result<Option<Note>> {
        anyhow::bail!("write conflict")
    }

    async fn remove(&self, _id: &NoteId) -> Result<Option<Note>> {
        anyhow::bail!("connection refused")
    }
}

pub fn failing_app() -> Router {
    notesvc::app(AppState::new(Arc::new(FailingStore)))
}
