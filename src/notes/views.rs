//! Server-rendered pages for the notes routes.

use axum::http::StatusCode;

use crate::model::Note;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn field(value: &Option<String>) -> String {
    value.as_deref().map(escape).unwrap_or_default()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
    <head>
        <meta charset="utf-8">
        <title>{title}</title>
        <link rel="stylesheet" href="/stylesheets/style.css">
    </head>
    <body>
        <h1>{title}</h1>
{body}
    </body>
</html>
"#,
        title = escape(title),
    )
}

pub fn index(title: &str, notes: &[Note]) -> String {
    let mut body = String::from("        <p><a href=\"/notes/new\">Add New Note</a></p>\n        <ul class=\"notes\">\n");
    for note in notes {
        body.push_str(&format!(
            "            <li><a href=\"/notes/{id}\">{title}</a> {text}</li>\n",
            id = note.id,
            title = field(&note.title),
            text = field(&note.note_text),
        ));
    }
    body.push_str("        </ul>");
    layout(title, &body)
}

pub fn show(note: &Note) -> String {
    let body = format!(
        r#"        <h2>{title}</h2>
        <p class="note-text">{text}</p>
        <p><a href="/notes/{id}/edit">Edit</a> | <a href="/notes">All notes</a></p>"#,
        title = field(&note.title),
        text = field(&note.note_text),
        id = note.id,
    );
    layout("Note", &body)
}

fn note_fields(title: &str, text: &str) -> String {
    format!(
        r#"            <label>Title <input type="text" name="title" value="{title}"></label>
            <label>Note <textarea name="note">{text}</textarea></label>"#
    )
}

pub fn new_form(title: &str) -> String {
    let body = format!(
        r#"        <form action="/notes" method="post">
{fields}
            <button type="submit">Save</button>
        </form>"#,
        fields = note_fields("", ""),
    );
    layout(title, &body)
}

/// Edit page. The forms tunnel PUT and DELETE through POST with a `_method` field.
pub fn edit_form(title: &str, note: &Note) -> String {
    let body = format!(
        r#"        <form action="/notes/{id}/edit" method="post">
            <input type="hidden" name="_method" value="PUT">
{fields}
            <button type="submit">Update</button>
        </form>
        <form action="/notes/{id}/edit" method="post">
            <input type="hidden" name="_method" value="DELETE">
            <button type="submit">Delete</button>
        </form>"#,
        id = note.id,
        fields = note_fields(&field(&note.title), &field(&note.note_text)),
    );
    layout(title, &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "        <h2>{} {}</h2>",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or_default())
    );
    layout(message, &body)
}
