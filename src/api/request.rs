//! API request helpers

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::notes::FieldViolation;

use super::Error;

/// Validate a note ID from the path
///
/// Only positive integers can ever be assigned by the storage, so anything
/// else is rejected before the storage is asked
///
/// ```ignore
/// assert!(parse_note_id(1).is_ok());
/// assert!(parse_note_id(0).is_err());
/// ```
pub fn parse_note_id(id: i64) -> Result<i64, Error> {
    if id < 1 {
        return Err(Error::validation(vec![FieldViolation::new(
            "id",
            "Must be a positive integer",
        )]));
    }

    Ok(id)
}

/// Most specific message of a rejection, the source when there is one
fn rejection_detail<E>(err: &E) -> String
where
    E: std::error::Error,
{
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => Err(Error::unprocessable_entity("Data error")
                .with_description(rejection_detail(&err))),
            JsonRejection::JsonSyntaxError(err) => Err(Error::unprocessable_entity(
                "JSON syntax error",
            )
            .with_description(rejection_detail(&err))),
            JsonRejection::MissingJsonContentType(_err) => Err(Error::unprocessable_entity(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::unprocessable_entity("Invalid characters in JSON")
                    .with_description(err))
            }
            err => Err(Error::unprocessable_entity("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = Json::<F>::from_request(req, state).await;

        parse_json(json).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::unprocessable_entity("Invalid path parameter").with_description(err))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::unprocessable_entity("Missing path parameter").with_description(err))
            }
            err => Err(Error::unprocessable_entity("Unknown path error").with_description(err)),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = Path::<P>::from_request_parts(parts, state).await;

        parse_path(path).map(PathParameters)
    }
}
