use crate::models::{FolderId, NoteId};

/// Which folder and which note are active.
///
/// Owned by the app shell. Panes never write it directly; they emit an
/// [`Action`](crate::app::Action) and the shell calls the setters below.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    folder: Option<FolderId>,
    note: Option<NoteId>,
}

impl SelectionState {
    pub fn new() -> SelectionState {
        SelectionState::default()
    }

    /// Leaves the note selection untouched.
    pub fn select_folder(&mut self, id: impl Into<FolderId>) {
        self.folder = Some(id.into());
    }

    pub fn select_note(&mut self, id: impl Into<NoteId>) {
        self.note = Some(id.into());
    }

    pub fn clear_note(&mut self) {
        self.note = None;
    }

    pub fn clear(&mut self) {
        self.folder = None;
        self.note = None;
    }

    pub fn selected_folder_id(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    pub fn selected_note_id(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLDERS: [&str; 5] = ["iCloud", "备忘录", "57Blocks", "读书笔记", "今日头条"];

    fn note_ids() -> Vec<String> {
        (1..=10).map(|i| format!("Note {i}")).collect()
    }

    #[test]
    fn starts_empty() {
        let state = SelectionState::new();
        assert_eq!(state.selected_folder_id(), None);
        assert_eq!(state.selected_note_id(), None);
    }

    #[test]
    fn select_folder_sets_every_folder() {
        let mut state = SelectionState::new();
        for folder in FOLDERS {
            state.select_folder(folder);
            assert_eq!(state.selected_folder_id(), Some(folder));
        }
    }

    #[test]
    fn select_note_sets_every_note() {
        let mut state = SelectionState::new();
        for note in note_ids() {
            state.select_note(note.clone());
            assert_eq!(state.selected_note_id(), Some(note.as_str()));
        }
    }

    #[test]
    fn selecting_a_folder_keeps_the_note() {
        let mut state = SelectionState::new();
        state.select_note("Note 7");
        for folder in FOLDERS {
            state.select_folder(folder);
            assert_eq!(state.selected_note_id(), Some("Note 7"));
        }
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = SelectionState::new();
        state.clear();
        assert_eq!(state, SelectionState::default());

        state.select_folder("57Blocks");
        state.clear();
        assert_eq!(state, SelectionState::default());

        state.select_folder("读书笔记");
        state.select_note("Note 2");
        state.clear();
        assert_eq!(state.selected_folder_id(), None);
        assert_eq!(state.selected_note_id(), None);
    }

    #[test]
    fn clear_note_keeps_the_folder() {
        let mut state = SelectionState::new();
        state.select_folder("今日头条");
        state.select_note("Note 4");
        state.clear_note();
        assert_eq!(state.selected_folder_id(), Some("今日头条"));
        assert_eq!(state.selected_note_id(), None);
    }

    #[test]
    fn folder_then_note_scenario() {
        let mut state = SelectionState::new();

        state.select_folder("备忘录");
        assert_eq!(state.selected_folder_id(), Some("备忘录"));
        assert_eq!(state.selected_note_id(), None);

        state.select_note("Note 3");
        assert_eq!(state.selected_note_id(), Some("Note 3"));
        assert_eq!(state.selected_folder_id(), Some("备忘录"));
    }
}
