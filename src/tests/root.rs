use axum::http::Method;
use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;

#[sqlx::test]
async fn test_root(pool: sqlx::SqlitePool) {
    let mut app = helper::setup_test_app(pool).await;

    let (status_code, body) = helper::root(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(json!({ "message": "Healthy" }), body);
}

#[sqlx::test]
async fn test_unknown_route(pool: sqlx::SqlitePool) {
    let mut app = helper::setup_test_app(pool).await;

    let (status_code, error) = helper::failing_request(&mut app, Method::GET, "/unknown").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Not found".to_string(), error.unwrap().error);

    let (status_code, _) = helper::failing_request(&mut app, Method::GET, "/notes/1/extra").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
}

#[sqlx::test]
async fn test_method_not_allowed(pool: sqlx::SqlitePool) {
    let mut app = helper::setup_test_app(pool).await;

    for (method, uri) in [
        (Method::PATCH, "/notes/1"),
        (Method::DELETE, "/notes"),
        (Method::POST, "/"),
    ] {
        let (status_code, error) = helper::failing_request(&mut app, method, uri).await;
        assert_eq!(StatusCode::METHOD_NOT_ALLOWED, status_code);
        assert_eq!("Method not allowed".to_string(), error.unwrap().error);
    }
}
