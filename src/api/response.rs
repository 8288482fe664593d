//! API response helpers

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::notes::FieldViolation;

/// Hold data for a successful API interaction
pub struct Success<V>
where
    V: Serialize,
{
    status_code: StatusCode,
    data: Option<V>,
}

impl<V> Success<V>
where
    V: Serialize,
{
    pub fn ok(data: V) -> Self {
        Self {
            status_code: StatusCode::OK,
            data: Some(data),
        }
    }

    pub fn created(data: V) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            data: Some(data),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status_code: StatusCode::NO_CONTENT,
            data: None,
        }
    }
}

impl<V> IntoResponse for Success<V>
where
    V: Serialize,
{
    fn into_response(self) -> Response {
        if let Some(data) = self.data {
            (self.status_code, Json(data)).into_response()
        } else {
            self.status_code.into_response()
        }
    }
}

/// Field level detail of a validation error
#[derive(Debug, Serialize)]
struct FieldError {
    field: &'static str,
    message: String,
}

/// Hold data for a failed API interaction
pub struct Error {
    status_code: StatusCode,
    message: String,
    description: Option<String>,
    fields: Vec<FieldError>,
}

impl Error {
    fn new<M>(status_code: StatusCode, message: M) -> Self
    where
        M: ToString,
    {
        Self {
            status_code,
            message: message.to_string(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn unprocessable_entity<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn method_not_allowed<M>(message: M) -> Self
    where
        M: ToString,
    {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message)
    }

    /// Any storage failure ends up here, the cause goes in the description
    pub fn internal_server_error<M>(cause: M) -> Self
    where
        M: ToString,
    {
        let cause = cause.to_string();

        tracing::error!("Internal server error: {cause}");

        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            .with_description(cause)
    }

    /// Validation failed, list every violated constraint
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        let description = violations
            .iter()
            .map(|violation| format!("{}: {}", violation.field, violation.message))
            .collect::<Vec<_>>()
            .join(", ");

        let fields = violations
            .into_iter()
            .map(|violation| FieldError {
                field: violation.field,
                message: violation.message,
            })
            .collect();

        Self {
            fields,
            ..Self::unprocessable_entity("Validation error").with_description(description)
        }
    }

    pub fn with_description<M>(self, description: M) -> Self
    where
        M: ToString,
    {
        Self {
            description: Some(description.to_string()),
            ..self
        }
    }
}

#[derive(Serialize)]
struct ErrorWrapper {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (
            self.status_code,
            Json(ErrorWrapper {
                error: self.message,
                description: self.description,
                fields: self.fields,
            }),
        )
            .into_response()
    }
}
