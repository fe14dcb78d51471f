use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::error::NoteError;
use crate::handler::AppState;
use crate::model::{Note, NoteId, NoteInput};
use crate::negotiate::Format;

/// The note named by the `:id` path segment, looked up before the handler runs.
///
/// Malformed identifiers are rejected with 400 without a store call, identifiers with no
/// note behind them with 404. Rejections use the representation the client asked for.
#[derive(Debug)]
pub struct NoteParam(pub Note);

#[async_trait]
impl FromRequestParts<AppState> for NoteParam {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let format = Format::from_headers(&parts.headers, &Format::ALL).unwrap_or(Format::Html);
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let id = NoteId::parse(&raw).map_err(|e| {
            tracing::info!(id = %raw, "rejecting malformed note id");
            e.into_response_for(format)
        })?;

        match state.store.find_by_id(&id).await {
            Ok(Some(note)) => Ok(NoteParam(note)),
            Ok(None) => {
                tracing::info!(%id, "note was not found");
                Err(NoteError::NotFound.into_response_for(format))
            }
            Err(e) => Err(NoteError::ReadFailed(e).into_response_for(format)),
        }
    }
}

/// `title` and `note` fields from either an urlencoded form or a JSON body.
#[derive(Debug)]
pub struct NoteBody(pub NoteInput);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

#[async_trait]
impl<S> FromRequest<S> for NoteBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(input) = Json::<NoteInput>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(NoteBody(input))
        } else {
            let Form(input) = Form::<NoteInput>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(NoteBody(input))
        }
    }
}
