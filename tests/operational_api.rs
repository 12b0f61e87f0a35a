mod common;

use axum::http::StatusCode;
use common::{build_test_app, get};

#[tokio::test]
async fn health_and_ready() {
    let app = build_test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "ok");
}

#[tokio::test]
async fn version_reports_crate() {
    let app = build_test_app();
    let (_, body) = get(&app, "/version").await;
    assert_eq!(body["name"], "quakezone-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn openapi_document_lists_every_route() {
    let app = build_test_app();
    let (status, doc) = get(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    for plural in ["quakes", "tsunami-sources", "tsunami-runups"] {
        let base = format!("/{}", plural);
        for path in [base.clone(), format!("{}/count", base), format!("{}/{{id}}", base)] {
            assert!(doc["paths"][&path].is_object(), "missing {}", path);
        }
    }
    assert!(doc["components"]["schemas"]["TsunamiSourcePartial"].is_object());
}
