use axum::http::Method;
use axum::http::StatusCode;

use crate::tests::helper;

#[sqlx::test]
async fn test_created_note_not_read_back(pool: sqlx::SqlitePool) {
    let mut app = helper::setup_test_app(pool.clone()).await;

    // rows disappear right after they are written
    sqlx::query(
        r"
        CREATE TRIGGER notes_vanish AFTER INSERT ON notes
        BEGIN
            DELETE FROM notes WHERE id = NEW.id;
        END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (status_code, note, error) = helper::maybe_create_note(&mut app, "Ghost", None).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert!(note.is_none());
    let error = error.unwrap();
    assert_eq!("Internal server error".to_string(), error.error);
    assert_eq!(
        Some("Note 1 could not be read back after writing".to_string()),
        error.description
    );
}

#[sqlx::test]
async fn test_storage_unreachable(pool: sqlx::SqlitePool) {
    let mut app = helper::setup_test_app(pool.clone()).await;

    pool.close().await;

    let (status_code, error) = helper::failing_request(&mut app, Method::GET, "/notes").await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!("Internal server error".to_string(), error.unwrap().error);

    let (status_code, _, error) = helper::single_note(&mut app, 1).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status_code);
    assert_eq!("Internal server error".to_string(), error.unwrap().error);

    // the health check never touches the storage
    let (status_code, _) = helper::root(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
}
