//! The root!
//!
//! Liveness probe, answers without touching the storage

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
    message: &'static str,
}

/// The root!
pub async fn root() -> Json<Health> {
    Json(Health { message: "Healthy" })
}
