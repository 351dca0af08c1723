use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{
    Connection, OptionalExtension, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use tracing::{debug, info};

use crate::{
    error::StoreError,
    models::{Folder, FolderSection, Note},
    store::NoteStore,
};

const SEED_FOLDERS: [(&str, &str, FolderSection); 5] = [
    ("iCloud", "iCloud 全部备忘录", FolderSection::ICloud),
    ("备忘录", "备忘录", FolderSection::Folders),
    ("57Blocks", "57Blocks", FolderSection::Folders),
    ("读书笔记", "读书笔记", FolderSection::Folders),
    ("今日头条", "今日头条", FolderSection::Folders),
];
const SEED_NOTE_COUNT: usize = 10;

pub struct Database {
    connection: Connection,
}

impl Database {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Database, StoreError> {
        let path = db_path.as_ref();
        info!(path = %path.display(), "opening note database");
        Database::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Database, StoreError> {
        info!("opening in-memory note database");
        Database::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Database, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS folders (
                id TEXT PRIMARY KEY,
                display_name TEXT NOT NULL,
                section TEXT NOT NULL,
                position INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS notes (
                id TEXT PRIMARY KEY,
                folder_id TEXT NOT NULL REFERENCES folders(id),
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                last_modified TEXT NOT NULL
            );",
        )?;

        let folder_count: i64 = conn.query_row("SELECT COUNT(*) FROM folders", [], |row| row.get(0))?;
        if folder_count == 0 {
            seed(&mut conn)?;
        }

        Ok(Database { connection: conn })
    }
}

fn seed(conn: &mut Connection) -> rusqlite::Result<()> {
    info!("seeding empty database with placeholder folders and notes");
    let tx = conn.transaction()?;

    for (position, (id, name, section)) in SEED_FOLDERS.iter().enumerate() {
        tx.execute(
            "INSERT INTO folders (id, display_name, section, position) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, section, position as i64],
        )?;
    }

    let regular: Vec<&str> = SEED_FOLDERS
        .iter()
        .filter(|(_, _, section)| *section == FolderSection::Folders)
        .map(|(id, _, _)| *id)
        .collect();
    let seeded_at = seed_timestamp();
    for index in 1..=SEED_NOTE_COUNT {
        let title = format!("Note {index}");
        tx.execute(
            "INSERT INTO notes (id, folder_id, title, body, last_modified) VALUES (?1, ?2, ?3, '', ?4)",
            params![title, regular[(index - 1) % regular.len()], title, seeded_at],
        )?;
    }

    tx.commit()
}

fn seed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 12, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        folder_id: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        last_modified: row.get(4)?,
    })
}

impl NoteStore for Database {
    fn list_folders(&self) -> Result<Vec<Folder>, StoreError> {
        let mut query = self
            .connection
            .prepare("SELECT id, display_name, section FROM folders ORDER BY position")?;

        let folders = query
            .query_map([], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    display_name: row.get(1)?,
                    section: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<Folder>>>()?;

        Ok(folders)
    }

    fn list_notes(&self, folder_id: Option<&str>) -> Result<Vec<Note>, StoreError> {
        let mut query = self.connection.prepare(
            "SELECT id, folder_id, title, body, last_modified FROM notes
             WHERE ?1 IS NULL
                OR EXISTS (SELECT 1 FROM folders WHERE id = ?1 AND section = ?2)
                OR folder_id = ?1
             ORDER BY rowid",
        )?;

        let notes = query
            .query_map(params![folder_id, FolderSection::ICloud], note_from_row)?
            .collect::<rusqlite::Result<Vec<Note>>>()?;

        debug!(?folder_id, count = notes.len(), "listed notes");
        Ok(notes)
    }

    fn load_note(&self, note_id: &str) -> Result<Note, StoreError> {
        self.connection
            .query_row(
                "SELECT id, folder_id, title, body, last_modified FROM notes WHERE id = ?1",
                params![note_id],
                note_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::note_not_found(note_id))
    }

    fn save_note(&self, note_id: &str, title: &str, body: &str) -> Result<Note, StoreError> {
        let changed = self.connection.execute(
            "UPDATE notes SET title = ?1, body = ?2, last_modified = ?3 WHERE id = ?4",
            params![title, body, Utc::now(), note_id],
        )?;
        if changed == 0 {
            return Err(StoreError::note_not_found(note_id));
        }

        info!(note_id, "saved note");
        self.load_note(note_id)
    }

    fn create_note(&self, folder_id: &str, title: &str) -> Result<Note, StoreError> {
        let folder_exists = self
            .connection
            .query_row("SELECT 1 FROM folders WHERE id = ?1", params![folder_id], |_| Ok(()))
            .optional()?
            .is_some();
        if !folder_exists {
            return Err(StoreError::folder_not_found(folder_id));
        }

        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            folder_id: folder_id.to_string(),
            title: title.to_string(),
            last_modified: Utc::now(),
            body: String::new(),
        };
        self.connection.execute(
            "INSERT INTO notes (id, folder_id, title, body, last_modified) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![note.id, note.folder_id, note.title, note.body, note.last_modified],
        )?;

        info!(note_id = %note.id, folder_id, "created note");
        Ok(note)
    }

    fn delete_note(&self, note_id: &str) -> Result<(), StoreError> {
        let changed = self
            .connection
            .execute("DELETE FROM notes WHERE id = ?1", params![note_id])?;
        if changed == 0 {
            return Err(StoreError::note_not_found(note_id));
        }

        info!(note_id, "deleted note");
        Ok(())
    }
}

impl ToSql for FolderSection {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for FolderSection {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        FolderSection::parse(raw)
            .ok_or_else(|| FromSqlError::Other(format!("unknown folder section: {raw}").into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn seeds_placeholder_folders_in_order() {
        let folders = db().list_folders().unwrap();
        let ids: Vec<&str> = folders.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["iCloud", "备忘录", "57Blocks", "读书笔记", "今日头条"]);
        assert_eq!(folders[0].display_name, "iCloud 全部备忘录");
        assert!(folders[0].is_catch_all());
        assert!(folders[1..].iter().all(|f| f.section == FolderSection::Folders));
    }

    #[test]
    fn seeds_ten_notes_with_fixed_date() {
        let notes = db().list_notes(None).unwrap();
        assert_eq!(notes.len(), 10);
        assert_eq!(notes[0].id, "Note 1");
        assert_eq!(notes[9].title, "Note 10");
        assert!(notes.iter().all(|n| n.body.is_empty()));
        assert!(
            notes
                .iter()
                .all(|n| n.last_modified_label() == "Last modified: 2024-12-12")
        );
    }

    #[test]
    fn seeding_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.db");

        {
            let db = Database::new(&path).unwrap();
            db.delete_note("Note 1").unwrap();
        }
        let reopened = Database::new(&path).unwrap();
        assert_eq!(reopened.list_folders().unwrap().len(), 5);
        assert_eq!(reopened.list_notes(None).unwrap().len(), 9);
    }

    #[test]
    fn list_notes_filters_by_folder() {
        let db = db();
        let notes = db.list_notes(Some("57Blocks")).unwrap();
        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["Note 2", "Note 6", "Note 10"]);
        assert!(notes.iter().all(|n| n.folder_id == "57Blocks"));
    }

    #[test]
    fn catch_all_folder_lists_everything() {
        assert_eq!(db().list_notes(Some("iCloud")).unwrap().len(), 10);
    }

    #[test]
    fn unknown_folder_lists_nothing() {
        assert!(db().list_notes(Some("nope")).unwrap().is_empty());
    }

    #[test]
    fn load_missing_note_is_not_found() {
        let err = db().load_note("Note 42").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "note", .. }));
        assert_eq!(err.to_string(), "note not found: Note 42");
    }

    #[test]
    fn save_updates_content_and_timestamp() {
        let db = db();
        let before = db.load_note("Note 3").unwrap();

        let saved = db.save_note("Note 3", "Groceries", "milk, eggs").unwrap();
        assert_eq!(saved.id, "Note 3");
        assert_eq!(saved.title, "Groceries");
        assert_eq!(saved.body, "milk, eggs");
        assert!(saved.last_modified > before.last_modified);
        assert_eq!(db.load_note("Note 3").unwrap(), saved);
    }

    #[test]
    fn save_missing_note_is_not_found() {
        assert!(matches!(
            db().save_note("ghost", "t", "b"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn create_appends_to_folder() {
        let db = db();
        let note = db.create_note("读书笔记", "New Note").unwrap();

        let notes = db.list_notes(Some("读书笔记")).unwrap();
        assert_eq!(notes.last(), Some(&note));
        assert_eq!(db.list_notes(None).unwrap().len(), 11);
    }

    #[test]
    fn create_in_unknown_folder_fails() {
        let err = db().create_note("nope", "New Note").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "folder", .. }));
    }

    #[test]
    fn delete_removes_note() {
        let db = db();
        db.delete_note("Note 5").unwrap();
        assert!(db.load_note("Note 5").is_err());
        assert!(matches!(
            db.delete_note("Note 5"),
            Err(StoreError::NotFound { .. })
        ));
    }
}
