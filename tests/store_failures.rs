//! Error paths when the backing store fails.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::*;

#[tokio::test]
async fn create_failure_is_plain_text() {
    let app = failing_app();

    for accept in [JSON, HTML] {
        let res = send(&app, form_post("/notes", "title=A&note=B", accept)).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(content_type(&res).starts_with("text/plain"));
        assert_eq!(
            body_string(res).await,
            "There was a problem adding the information to the database."
        );
    }
}

#[tokio::test]
async fn update_failure_reports_store_error() {
    let app = failing_app();
    let res = send(
        &app,
        json_request("PUT", &format!("/notes/{KNOWN_ID}/edit"), json!({"title": "x"})),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type(&res).starts_with("text/plain"));
    assert_eq!(
        body_string(res).await,
        "There was a problem updating the information to the database: write conflict"
    );
}

#[tokio::test]
async fn list_failure_answers_instead_of_hanging() {
    let app = failing_app();

    let res = send(&app, get("/notes", JSON)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(res).await,
        json!({"message": "500 Error: There was a problem retrieving the information from the database."})
    );

    let res = send(&app, get("/notes", HTML)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type(&res).starts_with(HTML));
}

#[tokio::test]
async fn lookup_failure_is_not_reported_as_missing() {
    let app = failing_app();
    let res = send(&app, get("/notes/bbbbbbbbbbbbbbbbbbbbbbbb", JSON)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_failure_is_server_error() {
    let app = failing_app();
    let res = send(&app, delete(&format!("/notes/{KNOWN_ID}/edit"), JSON)).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(res).await,
        json!({"message": "500 Error: There was a problem removing the information from the database."})
    );
}
