use thiserror::Error;

/// Failures coming out of a [`NoteStore`](crate::store::NoteStore).
///
/// These are recoverable: the app turns them into an editor error or a status
/// message instead of leaving the event loop.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn note_not_found(id: &str) -> StoreError {
        StoreError::NotFound {
            kind: "note",
            id: id.to_string(),
        }
    }

    pub fn folder_not_found(id: &str) -> StoreError {
        StoreError::NotFound {
            kind: "folder",
            id: id.to_string(),
        }
    }
}
