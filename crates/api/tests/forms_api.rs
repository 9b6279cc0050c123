//! Integration tests for the generic `/api/forms` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_raw};
use serde_json::json;

#[tokio::test]
async fn submit_records_and_lists() {
    let app = common::build_test_app();

    let response = post_json(
        app.app(),
        "/api/forms/submit",
        json!({ "formType": "contact", "formData": { "name": "Ada", "topic": "events" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Form submitted successfully!");
    assert_eq!(json["submissionId"], 1);

    let second = body_json(
        post_json(
            app.app(),
            "/api/forms/submit",
            json!({ "formType": "donate", "formData": { "amount": 25 } }),
        )
        .await,
    )
    .await;
    assert_eq!(second["submissionId"], 2);

    let listed = body_json(get_auth(app.app(), "/api/forms/list", &app.admin_token()).await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["formType"], "contact");
    assert_eq!(listed[0]["data"], json!({ "name": "Ada", "topic": "events" }));
    assert_eq!(listed[0]["status"], "new");
    assert!(listed[0]["timestamp"].is_string());
}

#[tokio::test]
async fn submit_without_type_or_data_returns_400() {
    let app = common::build_test_app();
    for body in [
        json!({ "formData": { "a": 1 } }),
        json!({ "formType": "contact" }),
        json!({ "formType": "contact", "formData": "" }),
    ] {
        let response = post_json(app.app(), "/api/forms/submit", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Form type and data are required"
        );
    }
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let app = common::build_test_app();
    let response = post_raw(app.app(), "/api/forms/submit", "{\"formType\":").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unwritable_store_still_succeeds_with_note() {
    let app = common::build_test_app();
    // The atomic rewrite goes through this temp path; a directory there
    // makes the write fail.
    std::fs::create_dir_all(app.data_path("submissions.json.tmp").join("blocked")).unwrap();

    let response = post_json(
        app.app(),
        "/api/forms/submit",
        json!({ "formType": "contact", "formData": { "name": "Ada" } }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["submission"]["formType"], "contact");
    assert!(json["note"].is_string());
}

#[tokio::test]
async fn corrupt_submissions_file_lists_empty() {
    let app = common::build_test_app();
    std::fs::write(app.data_path("submissions.json"), "not json").unwrap();

    let response = get_auth(app.app(), "/api/forms/list", &app.admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn corrupt_submissions_file_rejects_submit_and_is_kept() {
    let app = common::build_test_app();
    let corrupt = r#"[{"id":1,"formType":"contact","data":{},"timestamp":"2025-01-01T00:00:00Z","status":"new"},]"#;
    std::fs::write(app.data_path("submissions.json"), corrupt).unwrap();

    let response = post_json(
        app.app(),
        "/api/forms/submit",
        json!({ "formType": "donate", "formData": { "amount": 10 } }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "DEPENDENCY_ERROR");
    assert_eq!(
        std::fs::read_to_string(app.data_path("submissions.json")).unwrap(),
        corrupt
    );
}
