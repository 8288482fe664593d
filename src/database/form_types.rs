//! Form types

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// Title of the note, already trimmed
    pub title: &'a str,

    /// Content of the note
    ///
    /// Can be empty
    pub content: &'a str,
}

/// Values to update a Note
///
/// Both fields are replaced, there is no partial update
pub struct UpdateNoteValues<'a> {
    /// New title of the note, already trimmed
    pub title: &'a str,

    /// New content of the note
    pub content: &'a str,
}
