//! Lets HTML forms reach PUT and DELETE routes.
//!
//! A urlencoded `POST` carrying `_method=<VERB>` is re-dispatched as `<VERB>` with the
//! `_method` pair removed from the body. The layer has to wrap the router that does the
//! route matching, otherwise the original method is already resolved.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::Response,
};

use crate::error::payload_too_large;

pub const METHOD_FIELD: &str = "_method";
const MAX_FORM_BYTES: usize = 1024 * 1024;

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn decode(component: &str) -> Option<String> {
    urlencoding::decode(&component.replace('+', " "))
        .ok()
        .map(|s| s.into_owned())
}

fn parse_method(value: &str) -> Option<Method> {
    let method = Method::from_bytes(value.trim().to_ascii_uppercase().as_bytes()).ok()?;
    match method {
        Method::GET | Method::HEAD | Method::POST | Method::PUT | Method::PATCH | Method::DELETE | Method::OPTIONS => {
            Some(method)
        }
        _ => None,
    }
}

/// Splits the override out of a urlencoded body. Returns the verb and the body without
/// the `_method` pair, or `None` when the body names no usable verb.
pub fn take_method(body: &str) -> Option<(Method, String)> {
    let mut method = None;
    let mut rest = Vec::new();

    for pair in body.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if method.is_none() && decode(key).as_deref() == Some(METHOD_FIELD) {
            method = Some(parse_method(&decode(value)?)?);
        } else {
            rest.push(pair);
        }
    }

    method.map(|m| (m, rest.join("&")))
}

pub async fn method_override(req: Request, next: Next) -> Response {
    if req.method() != Method::POST || !is_form(req.headers()) {
        return next.run(req).await;
    }

    let (mut parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read form body");
            return payload_too_large();
        }
    };

    let overridden = std::str::from_utf8(&bytes).ok().and_then(take_method);
    let body = match overridden {
        Some((method, rest)) => {
            tracing::debug!(%method, uri = %parts.uri, "method override");
            parts.method = method;
            parts.headers.remove(header::CONTENT_LENGTH);
            Body::from(rest)
        }
        None => Body::from(bytes),
    };

    next.run(Request::from_parts(parts, body)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_method_and_strips_field() {
        let (method, rest) = take_method("_method=PUT&title=A+title&note=B").unwrap();
        assert_eq!(method, Method::PUT);
        assert_eq!(rest, "title=A+title&note=B");

        let (method, rest) = take_method("title=A&_method=delete").unwrap();
        assert_eq!(method, Method::DELETE);
        assert_eq!(rest, "title=A");
    }

    #[test]
    fn encoded_field_name_is_recognised() {
        let (method, _) = take_method("%5Fmethod=patch").unwrap();
        assert_eq!(method, Method::PATCH);
    }

    #[test]
    fn no_override_without_usable_verb() {
        assert_eq!(take_method("title=A&note=B"), None);
        assert_eq!(take_method("_method=BREW&title=A"), None);
        assert_eq!(take_method(""), None);
    }

    #[test]
    fn recognises_form_content_type() {
        let mut headers = HeaderMap::new();
        assert!(!is_form(&headers));
        headers.insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=UTF-8".parse().unwrap(),
        );
        assert!(is_form(&headers));
    }
}
