//! Notes, the only thing this service knows about

use chrono::DateTime;
use chrono::SecondsFormat;
use chrono::Utc;

/// Maximum length of a title, in characters
pub const TITLE_MAX_LENGTH: usize = 200;

/// Maximum length of the content, in characters
pub const CONTENT_MAX_LENGTH: usize = 10_000;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single violated constraint of a note payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: &'static str,

    /// Human readable explanation
    pub message: String,
}

impl FieldViolation {
    pub fn new<M>(field: &'static str, message: M) -> Self
    where
        M: ToString,
    {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Title and content that passed validation
///
/// The title is trimmed
#[derive(Debug, PartialEq, Eq)]
pub struct ValidNote {
    pub title: String,
    pub content: String,
}

/// Validate the title and content of a note
///
/// Both create and update share these rules. Every violated constraint is
/// collected, nothing is short-circuited.
///
/// ```ignore
/// let note = validate_note(Some("  Groceries "), "").unwrap();
/// assert_eq!(note.title, "Groceries");
/// assert_eq!(note.content, "");
/// ```
pub fn validate_note(
    title: Option<&str>,
    content: &str,
) -> Result<ValidNote, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let title = match title {
        None => {
            violations.push(FieldViolation::new("title", "Field is required"));
            None
        }
        Some(title) => {
            if title.chars().count() > TITLE_MAX_LENGTH {
                violations.push(FieldViolation::new(
                    "title",
                    format!("Must be at most {TITLE_MAX_LENGTH} characters"),
                ));
            }

            let trimmed = title.trim();
            if trimmed.is_empty() {
                violations.push(FieldViolation::new("title", "Must not be empty"));
            }

            Some(trimmed.to_string())
        }
    };

    if content.chars().count() > CONTENT_MAX_LENGTH {
        violations.push(FieldViolation::new(
            "content",
            format!("Must be at most {CONTENT_MAX_LENGTH} characters"),
        ));
    }

    match title {
        Some(title) if violations.is_empty() => Ok(ValidNote {
            title,
            content: content.to_string(),
        }),
        _ => Err(violations),
    }
}

/// Format a timestamp the way it is stored and returned
///
/// Fixed microsecond precision with an explicit `+00:00` offset, so the text
/// sorts the same as the instant it represents.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_validate_note_trims_title() {
        let note = validate_note(Some("  Groceries \n"), "milk").unwrap();

        assert_eq!("Groceries", note.title);
        assert_eq!("milk", note.content);
    }

    #[test]
    fn test_validate_note_whitespace_title() {
        let violations = validate_note(Some("   "), "").unwrap_err();

        assert_eq!(
            vec![FieldViolation::new("title", "Must not be empty")],
            violations
        );
    }

    #[test]
    fn test_validate_note_missing_title() {
        let violations = validate_note(None, "").unwrap_err();

        assert_eq!(1, violations.len());
        assert_eq!("title", violations[0].field);
    }

    #[test]
    fn test_validate_note_lengths() {
        let title = "t".repeat(TITLE_MAX_LENGTH);
        let content = "c".repeat(CONTENT_MAX_LENGTH);
        assert!(validate_note(Some(&title), &content).is_ok());

        // characters, not bytes
        let title = "ü".repeat(TITLE_MAX_LENGTH);
        assert!(validate_note(Some(&title), "").is_ok());

        let title = "t".repeat(TITLE_MAX_LENGTH + 1);
        let content = "c".repeat(CONTENT_MAX_LENGTH + 1);
        let violations = validate_note(Some(&title), &content).unwrap_err();

        let fields = violations.iter().map(|v| v.field).collect::<Vec<_>>();
        assert_eq!(vec!["title", "content"], fields);
    }

    #[test]
    fn test_format_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 12).unwrap();

        assert_eq!(
            "2026-10-16T09:30:12.000000+00:00",
            format_timestamp(&timestamp)
        );
    }
}
