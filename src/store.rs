use crate::{
    error::StoreError,
    models::{Folder, Note},
};

/// Where folders and notes live.
///
/// The app only talks to storage through this trait, so the UI can be driven
/// against any backend (tests plug in failing stores).
pub trait NoteStore {
    fn list_folders(&self) -> Result<Vec<Folder>, StoreError>;

    /// Notes owned by `folder_id`. `None`, or a catch-all folder, lists every note.
    fn list_notes(&self, folder_id: Option<&str>) -> Result<Vec<Note>, StoreError>;

    fn load_note(&self, note_id: &str) -> Result<Note, StoreError>;

    /// Writes title and body and bumps `last_modified`.
    fn save_note(&self, note_id: &str, title: &str, body: &str) -> Result<Note, StoreError>;

    fn create_note(&self, folder_id: &str, title: &str) -> Result<Note, StoreError>;

    fn delete_note(&self, note_id: &str) -> Result<(), StoreError>;
}
