use chrono::{DateTime, Utc};

pub type FolderId = String;
pub type NoteId = String;

/// Sidebar header a folder is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderSection {
    /// Catch-all folders: listing their notes yields every note.
    ICloud,
    Folders,
}

impl FolderSection {
    pub const ALL: [FolderSection; 2] = [FolderSection::ICloud, FolderSection::Folders];

    pub fn title(self) -> &'static str {
        match self {
            FolderSection::ICloud => "iCloud",
            FolderSection::Folders => "Folders",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FolderSection::ICloud => "icloud",
            FolderSection::Folders => "folders",
        }
    }

    pub fn parse(value: &str) -> Option<FolderSection> {
        match value {
            "icloud" => Some(FolderSection::ICloud),
            "folders" => Some(FolderSection::Folders),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Folder {
    pub id: FolderId,
    pub display_name: String,
    pub section: FolderSection,
}

impl Folder {
    pub fn is_catch_all(&self) -> bool {
        self.section == FolderSection::ICloud
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub folder_id: FolderId,
    pub title: String,
    pub last_modified: DateTime<Utc>,
    pub body: String,
}

impl Note {
    pub fn last_modified_label(&self) -> String {
        format!("Last modified: {}", self.last_modified.format("%Y-%m-%d"))
    }
}
