use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{app::Action, app::Pane, models::Note};

use super::{pane_block, step};

pub struct NoteList {
    notes: Vec<Note>,
    state: ListState,
}

impl NoteList {
    pub fn new(notes: Vec<Note>) -> NoteList {
        NoteList {
            notes,
            state: ListState::default(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Swaps in a freshly saved copy of a listed note.
    pub fn replace(&mut self, note: Note) {
        if let Some(slot) = self.notes.iter_mut().find(|n| n.id == note.id) {
            *slot = note;
        }
    }

    pub fn sync(&mut self, selected: Option<&str>) {
        let index = selected.and_then(|id| self.notes.iter().position(|n| n.id == id));
        self.state.select(index);
    }

    /// `has_selection` is whether any note is selected, listed here or not;
    /// opening and deleting act on the selection rather than the highlight.
    pub fn handle_key(&self, code: KeyCode, has_selection: bool) -> Action {
        let current = self.state.selected();
        let note_at = |index: Option<usize>| index.map(|i| self.notes[i].id.clone());

        match code {
            KeyCode::Char('j') | KeyCode::Down => note_at(step(current, self.notes.len(), true))
                .map(Action::SelectNote)
                .unwrap_or_default(),
            KeyCode::Char('k') | KeyCode::Up => note_at(step(current, self.notes.len(), false))
                .map(Action::SelectNote)
                .unwrap_or_default(),
            KeyCode::Enter | KeyCode::Char('e') if has_selection => Action::Focus(Pane::Editor),
            KeyCode::Char('d') if has_selection => Action::DeleteNote,
            _ => Action::Noop,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = pane_block("Notes", focused);

        if self.notes.is_empty() {
            let empty = Paragraph::new("No notes in this folder")
                .dark_gray()
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items = self.notes.iter().map(|note| {
            ListItem::new(Text::from(vec![
                Line::from(note.title.as_str()).bold(),
                Line::from(note.last_modified_label()).gray(),
                Line::default(),
            ]))
        });

        let highlight = if focused {
            Style::new().black().on_white()
        } else {
            Style::new().reversed()
        };
        let list = List::new(items).block(block).highlight_style(highlight);

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
