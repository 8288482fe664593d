use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::database::CreateNoteValues;
use crate::database::Database;
use crate::database::UpdateNoteValues;
use crate::notes::Note;
use crate::notes::ValidNote;
use crate::notes::format_timestamp;
use crate::notes::validate_note;

use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;
use super::parse_note_id;

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteResponse {
    fn from_note(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: format_timestamp(&note.created_at),
            updated_at: format_timestamp(&note.updated_at),
        }
    }

    fn from_note_multiple(notes: Vec<Note>) -> Vec<Self> {
        notes.into_iter().map(Self::from_note).collect::<Vec<Self>>()
    }
}

/// Payload for both create and update
///
/// A missing title ends up as a validation error, a missing content is empty.
/// An explicit `null` content is a data error.
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    title: Option<String>,
    #[serde(default)]
    content: String,
}

impl NoteForm {
    fn validate(&self) -> Result<ValidNote, Error> {
        validate_note(self.title.as_deref(), &self.content).map_err(Error::validation)
    }
}

/// List all notes, most recently updated first
///
/// Request:
/// ```sh
/// curl -v http://localhost:8000/notes
/// ```
///
/// Response:
/// ```json
/// [ { "id": 1, "title": "Groceries", "content": "milk" ... } ]
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    let notes = database
        .find_all_notes()
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Listing {} notes", notes.len());

    Ok(Success::ok(NoteResponse::from_note_multiple(notes)))
}

/// Get a single note
///
/// Request:
/// ```sh
/// curl -v http://localhost:8000/notes/<id>
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "title": "Groceries", "content": "milk" ... }
/// ```
pub async fn single(
    Extension(database): Extension<Database>,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<NoteResponse>, Error> {
    let note_id = parse_note_id(note_id)?;

    get_note(&database, note_id)
        .await
        .map(|note| Success::ok(NoteResponse::from_note(note)))
}

/// Create a note
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "title": "Groceries", "content": "milk" }' \
///     http://localhost:8000/notes
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "title": "Groceries", "content": "milk" ... }
/// ```
pub async fn create(
    Extension(database): Extension<Database>,
    Form(form): Form<NoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let valid = form.validate()?;

    let values = CreateNoteValues {
        title: &valid.title,
        content: &valid.content,
    };

    let note = database
        .create_note(&values)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Created note {}", note.id);

    Ok(Success::created(NoteResponse::from_note(note)))
}

/// Replace the title and content of a note
///
/// Request:
/// ```sh
/// curl -v -XPUT -H 'Content-Type: application/json' \
///     -d '{ "title": "Groceries", "content": "milk, eggs" }' \
///     http://localhost:8000/notes/<id>
/// ```
///
/// Response:
/// ```json
/// { "id": 1, "title": "Groceries", "content": "milk, eggs" ... }
/// ```
pub async fn update(
    Extension(database): Extension<Database>,
    PathParameters(note_id): PathParameters<i64>,
    Form(form): Form<NoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    let note_id = parse_note_id(note_id)?;
    let valid = form.validate()?;

    let note = get_note(&database, note_id).await?;

    let values = UpdateNoteValues {
        title: &valid.title,
        content: &valid.content,
    };

    // gone between the lookup and the write, same answer as the lookup
    let note = database
        .update_note(&note, &values)
        .await
        .map_err(Error::internal_server_error)?
        .ok_or_else(|| Error::not_found("Note not found"))?;

    tracing::debug!("Updated note {}", note.id);

    Ok(Success::ok(NoteResponse::from_note(note)))
}

/// Delete a note
///
/// Request:
/// ```sh
/// curl -v -XDELETE http://localhost:8000/notes/<id>
/// ```
pub async fn delete(
    Extension(database): Extension<Database>,
    PathParameters(note_id): PathParameters<i64>,
) -> Result<Success<&'static str>, Error> {
    let note_id = parse_note_id(note_id)?;

    let deleted = database
        .delete_note(note_id)
        .await
        .map_err(Error::internal_server_error)?;

    if !deleted {
        return Err(Error::not_found("Note not found"));
    }

    tracing::debug!("Deleted note {note_id}");

    Ok(Success::<&'static str>::no_content())
}

async fn get_note(database: &Database, note_id: i64) -> Result<Note, Error> {
    database
        .find_single_note_by_id(note_id)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(|| Err(Error::not_found("Note not found")), Ok)
}
