use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, Wrap},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    app::{Action, Pane},
    error::StoreError,
    models::{Note, NoteId},
};

use super::pane_block;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusedInput {
    Title,
    Body,
}

/// Unsaved edits of the selected note.
pub struct Draft {
    note_id: NoteId,
    title: Input,
    body: Input,
    focused_input: FocusedInput,
    dirty: bool,
}

impl Draft {
    pub fn note_id(&self) -> &str {
        &self.note_id
    }

    pub fn title(&self) -> &str {
        self.title.value()
    }

    pub fn body(&self) -> &str {
        self.body.value()
    }

    #[cfg(test)]
    pub fn focused_input(&self) -> FocusedInput {
        self.focused_input
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

pub enum EditorState {
    /// No note selected.
    Empty,
    Editing(Draft),
    /// Loading the selected note failed.
    Failed { note_id: NoteId, message: String },
}

pub struct Editor {
    state: EditorState,
}

impl Default for Editor {
    fn default() -> Editor {
        Editor::new()
    }
}

impl Editor {
    pub fn new() -> Editor {
        Editor {
            state: EditorState::Empty,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EditorState::Editing(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn open(&mut self, note: &Note) {
        self.state = EditorState::Editing(Draft {
            note_id: note.id.clone(),
            title: Input::new(note.title.clone()),
            body: Input::new(note.body.clone()),
            focused_input: FocusedInput::Body,
            dirty: false,
        });
    }

    pub fn fail(&mut self, note_id: &str, err: &StoreError) {
        self.state = EditorState::Failed {
            note_id: note_id.to_string(),
            message: err.to_string(),
        };
    }

    pub fn clear(&mut self) {
        self.state = EditorState::Empty;
    }

    /// Keeps the typed text and cursor, drops the dirty mark.
    pub fn mark_saved(&mut self, note: &Note) {
        if let EditorState::Editing(draft) = &mut self.state
            && draft.note_id == note.id
        {
            draft.dirty = false;
        }
    }

    pub fn handle_event(&mut self, event: &Event, key: KeyEvent) -> Action {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => Action::SaveNote,
            (_, KeyCode::Esc) => Action::Focus(Pane::Notes),
            (_, KeyCode::Tab) => {
                if let EditorState::Editing(draft) = &mut self.state {
                    draft.focused_input = match draft.focused_input {
                        FocusedInput::Title => FocusedInput::Body,
                        FocusedInput::Body => FocusedInput::Title,
                    };
                }
                Action::Noop
            }
            _ => {
                if let EditorState::Editing(draft) = &mut self.state {
                    let input = match draft.focused_input {
                        FocusedInput::Title => &mut draft.title,
                        FocusedInput::Body => &mut draft.body,
                    };
                    if input.handle_event(event).is_some_and(|changed| changed.value) {
                        draft.dirty = true;
                    }
                }
                Action::Noop
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        match &self.state {
            EditorState::Empty => {
                let placeholder = Paragraph::new("Select a note to start editing")
                    .dark_gray()
                    .centered()
                    .block(pane_block("Editor", focused));
                frame.render_widget(placeholder, area);
            }
            EditorState::Failed { note_id, message } => {
                let error = Paragraph::new(vec![
                    Line::from(format!("Could not load note {note_id}")).bold().red(),
                    Line::from(message.as_str()).red(),
                ])
                .wrap(Wrap { trim: true })
                .block(pane_block("Editor", focused).border_style(Style::new().red()));
                frame.render_widget(error, area);
            }
            EditorState::Editing(draft) => render_draft(frame, area, draft, focused),
        }
    }
}

fn render_draft(frame: &mut Frame, area: Rect, draft: &Draft, focused: bool) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let title_label = if draft.dirty { "Title *" } else { "Title" };
    render_input(
        frame,
        &draft.title,
        Block::bordered().title(title_label),
        layout[0],
        focused && draft.focused_input == FocusedInput::Title,
        true,
    );
    render_input(
        frame,
        &draft.body,
        Block::bordered().title("Body"),
        layout[1],
        focused && draft.focused_input == FocusedInput::Body,
        false,
    );
}

fn render_input(
    frame: &mut Frame,
    input: &Input,
    block: Block,
    area: Rect,
    focused: bool,
    bold: bool,
) {
    let mut paragraph = Paragraph::new(input.value());
    if bold {
        paragraph = paragraph.style(Style::default().bold());
    }

    let block = if focused {
        let width = area.width.max(3) - 3;
        let scroll = input.visual_scroll(width as usize);
        paragraph = paragraph.scroll((0, scroll as u16));

        let x = input.visual_cursor().max(scroll) - scroll + 1;
        frame.set_cursor_position((area.x + x as u16, area.y + 1));
        block.border_style(Style::new().yellow())
    } else {
        block
    };

    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note() -> Note {
        Note {
            id: "Note 1".into(),
            folder_id: "备忘录".into(),
            title: "Note 1".into(),
            last_modified: Utc::now(),
            body: "hello".into(),
        }
    }

    fn key(editor: &mut Editor, code: KeyCode, modifiers: KeyModifiers) -> Action {
        let key = KeyEvent::new(code, modifiers);
        editor.handle_event(&Event::Key(key), key)
    }

    #[test]
    fn opening_binds_note_content() {
        let mut editor = Editor::new();
        assert!(editor.draft().is_none());

        editor.open(&note());
        let draft = editor.draft().unwrap();
        assert_eq!(draft.note_id(), "Note 1");
        assert_eq!(draft.title(), "Note 1");
        assert_eq!(draft.body(), "hello");
        assert!(!draft.is_dirty());
    }

    #[test]
    fn typing_edits_focused_input_and_marks_dirty() {
        let mut editor = Editor::new();
        editor.open(&note());

        key(&mut editor, KeyCode::Char('!'), KeyModifiers::NONE);
        assert_eq!(editor.draft().unwrap().body(), "hello!");
        assert!(editor.draft().unwrap().is_dirty());

        key(&mut editor, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(editor.draft().unwrap().focused_input(), FocusedInput::Title);
        key(&mut editor, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(editor.draft().unwrap().title(), "Note ");
    }

    #[test]
    fn cursor_moves_do_not_mark_dirty() {
        let mut editor = Editor::new();
        editor.open(&note());
        key(&mut editor, KeyCode::Left, KeyModifiers::NONE);
        assert!(!editor.draft().unwrap().is_dirty());
    }

    #[test]
    fn ctrl_s_and_esc_become_actions() {
        let mut editor = Editor::new();
        editor.open(&note());
        assert_eq!(
            key(&mut editor, KeyCode::Char('s'), KeyModifiers::CONTROL),
            Action::SaveNote
        );
        assert_eq!(
            key(&mut editor, KeyCode::Esc, KeyModifiers::NONE),
            Action::Focus(Pane::Notes)
        );
        assert_eq!(editor.draft().unwrap().body(), "hello");
    }

    #[test]
    fn mark_saved_only_touches_matching_draft() {
        let mut editor = Editor::new();
        editor.open(&note());
        key(&mut editor, KeyCode::Char('x'), KeyModifiers::NONE);

        let mut other = note();
        other.id = "Note 2".into();
        editor.mark_saved(&other);
        assert!(editor.draft().unwrap().is_dirty());

        editor.mark_saved(&note());
        assert!(!editor.draft().unwrap().is_dirty());
        assert_eq!(editor.draft().unwrap().body(), "hellox");
    }

    #[test]
    fn default_editor_is_empty() {
        let editor = Editor::default();
        assert!(matches!(editor.state(), EditorState::Empty));
        assert!(editor.draft().is_none());
    }

    #[test]
    fn failure_and_clear_replace_draft() {
        let mut editor = Editor::new();
        editor.open(&note());
        editor.fail("Note 1", &StoreError::note_not_found("Note 1"));
        assert!(matches!(
            editor.state(),
            EditorState::Failed { message, .. } if message == "note not found: Note 1"
        ));

        editor.clear();
        assert!(matches!(editor.state(), EditorState::Empty));
    }
}
