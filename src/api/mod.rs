//! All API endpoint setup

use axum::Router;
use axum::routing::get;

pub use request::Form;
pub use request::PathParameters;
pub use request::parse_note_id;
pub use response::Error;
pub use response::Success;

mod notes;
mod request;
mod response;

/// Get the Axum router for all note routes
pub fn router() -> Router {
    Router::new()
        .route("/", get(notes::list).post(notes::create))
        .route(
            "/{note}",
            get(notes::single).put(notes::update).delete(notes::delete),
        )
        .method_not_allowed_fallback(method_not_allowed)
}

/// Any route that does not exist
pub async fn fallback() -> Error {
    Error::not_found("Not found")
}

/// Route exists, method does not
pub async fn method_not_allowed() -> Error {
    Error::method_not_allowed("Method not allowed")
}
