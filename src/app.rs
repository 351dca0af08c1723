use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
    style::Stylize,
    text::{Line, ToSpan},
};
use tracing::{debug, info, warn};

use crate::{
    error::StoreError,
    models::{FolderId, NoteId},
    panes::{Editor, FolderList, NoteList},
    selection::SelectionState,
    store::NoteStore,
};

const NEW_NOTE_TITLE: &str = "New Note";
const DISCARDED_MESSAGE: &str = "Unsaved changes discarded";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Folders,
    Notes,
    Editor,
}

impl Pane {
    fn next(self) -> Pane {
        match self {
            Pane::Folders => Pane::Notes,
            Pane::Notes => Pane::Editor,
            Pane::Editor => Pane::Folders,
        }
    }

    fn prev(self) -> Pane {
        match self {
            Pane::Folders => Pane::Editor,
            Pane::Notes => Pane::Folders,
            Pane::Editor => Pane::Notes,
        }
    }
}

/// What a pane asks the shell to do. Only the shell mutates selection.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Action {
    SelectFolder(FolderId),
    /// Select the folder and move focus to its notes.
    OpenFolder(FolderId),
    SelectNote(NoteId),
    ClearSelection,
    Focus(Pane),
    FocusNext,
    FocusPrev,
    NewNote,
    DeleteNote,
    SaveNote,
    Quit,
    #[default]
    Noop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App<S> {
    store: S,
    selection: SelectionState,
    folders: FolderList,
    notes: NoteList,
    editor: Editor,
    focus: Pane,
    status: Option<Status>,
    running: bool,
}

impl<S: NoteStore> App<S> {
    pub fn new(store: S) -> Result<App<S>, StoreError> {
        let folders = FolderList::new(store.list_folders()?);
        let notes = NoteList::new(store.list_notes(None)?);
        info!(
            folders = folders.folders().len(),
            notes = notes.notes().len(),
            "loaded store"
        );

        Ok(App {
            store,
            selection: SelectionState::new(),
            folders,
            notes,
            editor: Editor::new(),
            focus: Pane::Folders,
            status: None,
            running: true,
        })
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        while self.is_running() {
            terminal.draw(|f| self.draw(f))?;
            let event = crossterm::event::read()?;
            self.handle_event(&event);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[cfg(test)]
    pub fn focus(&self) -> Pane {
        self.focus
    }

    #[cfg(test)]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[cfg(test)]
    pub fn notes(&self) -> &NoteList {
        &self.notes
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        self.status = None;
        let action = self.map_key(event, *key);
        self.dispatch(action);
    }

    fn map_key(&mut self, event: &Event, key: KeyEvent) -> Action {
        if self.focus == Pane::Editor {
            return self.editor.handle_event(event, key);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Action::FocusNext,
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Action::FocusPrev,
            KeyCode::Char('c') => Action::ClearSelection,
            KeyCode::Char('n') => Action::NewNote,
            code => match self.focus {
                Pane::Folders => self.folders.handle_key(code),
                Pane::Notes => self
                    .notes
                    .handle_key(code, self.selection.selected_note_id().is_some()),
                Pane::Editor => Action::Noop,
            },
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        if action != Action::Noop {
            debug!(?action, "dispatch");
        }

        match action {
            Action::SelectFolder(id) => {
                self.selection.select_folder(id);
                self.folders.sync(self.selection.selected_folder_id());
                self.refresh_notes();
            }
            Action::OpenFolder(id) => {
                self.dispatch(Action::SelectFolder(id));
                self.focus = Pane::Notes;
            }
            Action::SelectNote(id) => {
                if self.editor.draft().is_some_and(|d| d.note_id() == id) {
                    return;
                }
                self.warn_if_discarding();
                self.selection.select_note(id);
                self.notes.sync(self.selection.selected_note_id());
                self.load_editor();
            }
            Action::ClearSelection => {
                self.warn_if_discarding();
                self.selection.clear();
                self.folders.sync(None);
                self.refresh_notes();
                self.load_editor();
            }
            Action::Focus(pane) => self.focus = pane,
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::NewNote => self.new_note(),
            Action::DeleteNote => self.delete_note(),
            Action::SaveNote => self.save_note(),
            Action::Quit => {
                info!("quit requested");
                self.running = false;
            }
            Action::Noop => {}
        }
    }

    fn warn_if_discarding(&mut self) {
        if self.editor.draft().is_some_and(|d| d.is_dirty()) {
            info!("discarding unsaved draft");
            self.status = Some(Status::Info(DISCARDED_MESSAGE.into()));
        }
    }

    fn refresh_notes(&mut self) {
        match self.store.list_notes(self.selection.selected_folder_id()) {
            Ok(notes) => self.notes.set_notes(notes),
            Err(err) => {
                warn!(%err, "failed to list notes");
                self.status = Some(Status::Error(err.to_string()));
            }
        }
        self.notes.sync(self.selection.selected_note_id());
    }

    fn load_editor(&mut self) {
        let Some(note_id) = self.selection.selected_note_id() else {
            self.editor.clear();
            return;
        };

        match self.store.load_note(note_id) {
            Ok(note) => self.editor.open(&note),
            Err(err) => {
                warn!(note_id, %err, "failed to load note");
                self.editor.fail(note_id, &err);
            }
        }
    }

    fn save_note(&mut self) {
        let result = match self.editor.draft() {
            Some(draft) => self
                .store
                .save_note(draft.note_id(), draft.title(), draft.body()),
            None => return,
        };

        match result {
            Ok(note) => {
                self.editor.mark_saved(&note);
                self.status = Some(Status::Info(format!("Saved \"{}\"", note.title)));
                self.notes.replace(note);
            }
            Err(err) => {
                warn!(%err, "failed to save note");
                self.status = Some(Status::Error(format!("Save failed: {err}")));
            }
        }
    }

    /// New notes go to the selected folder, or to the first regular folder
    /// when nothing or a catch-all is selected.
    fn new_note(&mut self) {
        let folders = self.folders.folders();
        let selected = self
            .selection
            .selected_folder_id()
            .and_then(|id| folders.iter().find(|f| f.id == id))
            .filter(|f| !f.is_catch_all());
        let Some(folder_id) = selected
            .or_else(|| folders.iter().find(|f| !f.is_catch_all()))
            .map(|f| f.id.clone())
        else {
            self.status = Some(Status::Error("No folder to put the note in".into()));
            return;
        };

        match self.store.create_note(&folder_id, NEW_NOTE_TITLE) {
            Ok(note) => {
                self.refresh_notes();
                self.status = None;
                self.dispatch(Action::SelectNote(note.id));
                self.focus = Pane::Editor;
                let created = format!("Created note in {folder_id}");
                self.status = Some(Status::Info(match self.status.take() {
                    Some(Status::Info(discarded)) => format!("{created}. {discarded}"),
                    _ => created,
                }));
            }
            Err(err) => {
                warn!(%err, "failed to create note");
                self.status = Some(Status::Error(err.to_string()));
            }
        }
    }

    fn delete_note(&mut self) {
        let Some(note_id) = self.selection.selected_note_id().map(str::to_string) else {
            return;
        };

        match self.store.delete_note(&note_id) {
            Ok(()) => {
                self.selection.clear_note();
                self.refresh_notes();
                self.load_editor();
                self.status = Some(Status::Info(format!("Deleted {note_id}")));
            }
            Err(err) => {
                warn!(%err, "failed to delete note");
                self.status = Some(Status::Error(err.to_string()));
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Percentage(22),
                Constraint::Percentage(28),
                Constraint::Min(1),
            ])
            .split(layout[0]);

        self.folders
            .render(frame, panes[0], self.focus == Pane::Folders);
        self.notes.render(frame, panes[1], self.focus == Pane::Notes);
        self.editor.render(frame, panes[2], self.focus == Pane::Editor);

        let status_line = match &self.status {
            Some(Status::Info(text)) => Line::from(text.as_str()).green().centered(),
            Some(Status::Error(text)) => Line::from(text.as_str()).red().bold().centered(),
            None => self.help_message(),
        };
        frame.render_widget(status_line, layout[1]);
    }

    fn help_message(&self) -> Line<'static> {
        let hints = match self.focus {
            Pane::Editor => vec![
                "Esc".bold().yellow(),
                " back, ".to_span(),
                "Ctrl+S".bold().yellow(),
                " save, ".to_span(),
                "Tab".bold().yellow(),
                " switch input focus.".to_span(),
            ],
            Pane::Folders | Pane::Notes => vec![
                "Esc/q".bold().yellow(),
                " exit, ".to_span(),
                "Tab".bold().yellow(),
                " next pane, ".to_span(),
                "Enter".bold().yellow(),
                " open, ".to_span(),
                "n".bold().yellow(),
                " new, ".to_span(),
                "d".bold().red(),
                " delete, ".to_span(),
                "c".bold().yellow(),
                " clear".to_span(),
            ],
        };
        Line::from_iter(hints).centered()
    }
}
