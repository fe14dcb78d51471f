//! `Accept` header negotiation between the HTML and JSON representations.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::Response,
};

use crate::error::not_acceptable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

impl Format {
    /// Representations offered by routes that have both, in preference order.
    pub const ALL: [Format; 2] = [Format::Html, Format::Json];

    fn media_type(self) -> (&'static str, &'static str) {
        match self {
            Format::Html => ("text", "html"),
            Format::Json => ("application", "json"),
        }
    }

    /// Picks the best offered format for the request's `Accept` header.
    /// A request without the header gets the first offer.
    pub fn from_headers(headers: &HeaderMap, offered: &[Format]) -> Option<Format> {
        match headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) {
            Some(accept) if !accept.trim().is_empty() => negotiate(accept, offered),
            _ => offered.first().copied(),
        }
    }
}

#[derive(Debug, PartialEq)]
struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    q: f32,
}

impl MediaRange<'_> {
    /// 2 for an exact match, 1 for `type/*`, 0 for `*/*`.
    fn specificity(&self, kind: &str, subtype: &str) -> Option<u8> {
        if self.kind == "*" && self.subtype == "*" {
            Some(0)
        } else if self.kind.eq_ignore_ascii_case(kind) && self.subtype == "*" {
            Some(1)
        } else if self.kind.eq_ignore_ascii_case(kind) && self.subtype.eq_ignore_ascii_case(subtype) {
            Some(2)
        } else {
            None
        }
    }
}

fn parse_q(param: &str) -> Option<f32> {
    let (name, value) = param.split_once('=')?;
    if name.trim().eq_ignore_ascii_case("q") {
        value.trim().parse::<f32>().ok()
    } else {
        None
    }
}

fn parse_accept(accept: &str) -> Vec<MediaRange<'_>> {
    accept
        .split(',')
        .filter_map(|entry| {
            let mut params = entry.split(';');
            let (kind, subtype) = params.next()?.trim().split_once('/')?;
            let q = params.find_map(parse_q).unwrap_or(1.0);
            Some(MediaRange {
                kind: kind.trim(),
                subtype: subtype.trim(),
                q,
            })
        })
        .collect()
}

/// How a client's `Accept` list rates one offered format.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Match {
    q: f32,
    specificity: u8,
    /// Position of the matching range in the `Accept` list.
    index: usize,
}

/// The most specific range matching `format`; among equally specific ones the highest q,
/// then the earliest listed.
fn quality(ranges: &[MediaRange<'_>], format: Format) -> Option<Match> {
    let (kind, subtype) = format.media_type();
    ranges
        .iter()
        .enumerate()
        .filter_map(|(index, r)| {
            r.specificity(kind, subtype).map(|specificity| Match {
                q: r.q,
                specificity,
                index,
            })
        })
        .min_by(|a, b| {
            b.specificity
                .cmp(&a.specificity)
                .then(b.q.total_cmp(&a.q))
                .then(a.index.cmp(&b.index))
        })
}

/// Ranks offers by q, then specificity, then the client's order, then the server's order.
pub fn negotiate(accept: &str, offered: &[Format]) -> Option<Format> {
    let ranges = parse_accept(accept);
    offered
        .iter()
        .enumerate()
        .filter_map(|(order, &format)| {
            quality(&ranges, format)
                .filter(|m| m.q > 0.0)
                .map(|m| (m, order, format))
        })
        .min_by(|(a, a_order, _), (b, b_order, _)| {
            b.q.total_cmp(&a.q)
                .then(b.specificity.cmp(&a.specificity))
                .then(a.index.cmp(&b.index))
                .then(a_order.cmp(b_order))
        })
        .map(|(_, _, format)| format)
}

#[async_trait]
impl<S> FromRequestParts<S> for Format
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Format::from_headers(&parts.headers, &Format::ALL).ok_or_else(not_acceptable)
    }
}
