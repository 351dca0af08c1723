use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{List, ListItem, ListState},
};

use crate::{
    app::Action,
    models::{Folder, FolderSection},
};

use super::{pane_block, step};

enum Row {
    Header(FolderSection),
    Folder(usize),
}

/// Sidebar listing folders under their section headers.
///
/// Holds presentation state only: the highlighted row mirrors the selected
/// folder and is refreshed through [`FolderList::sync`].
pub struct FolderList {
    folders: Vec<Folder>,
    rows: Vec<Row>,
    state: ListState,
}

impl FolderList {
    pub fn new(folders: Vec<Folder>) -> FolderList {
        let mut rows = Vec::new();
        for section in FolderSection::ALL {
            rows.push(Row::Header(section));
            rows.extend(
                folders
                    .iter()
                    .enumerate()
                    .filter(|(_, folder)| folder.section == section)
                    .map(|(i, _)| Row::Folder(i)),
            );
        }

        FolderList {
            folders,
            rows,
            state: ListState::default(),
        }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn sync(&mut self, selected: Option<&str>) {
        let row = selected.and_then(|id| {
            self.rows.iter().position(
                |row| matches!(row, Row::Folder(i) if self.folders[*i].id == id),
            )
        });
        self.state.select(row);
    }

    /// Folders in display order, which groups them by section.
    fn display_order(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Folder(i) => Some(*i),
                Row::Header(_) => None,
            })
            .collect()
    }

    fn highlighted(&self) -> Option<usize> {
        match self.rows.get(self.state.selected()?)? {
            Row::Folder(i) => Some(*i),
            Row::Header(_) => None,
        }
    }

    pub fn handle_key(&self, code: KeyCode) -> Action {
        let order = self.display_order();
        let position = self
            .highlighted()
            .and_then(|i| order.iter().position(|&o| o == i));
        let folder_at = |pos: Option<usize>| pos.map(|p| self.folders[order[p]].id.clone());

        match code {
            KeyCode::Char('j') | KeyCode::Down => folder_at(step(position, order.len(), true))
                .map(Action::SelectFolder)
                .unwrap_or_default(),
            KeyCode::Char('k') | KeyCode::Up => folder_at(step(position, order.len(), false))
                .map(Action::SelectFolder)
                .unwrap_or_default(),
            KeyCode::Enter => folder_at(position.or(step(None, order.len(), true)))
                .map(Action::OpenFolder)
                .unwrap_or_default(),
            _ => Action::Noop,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let items = self.rows.iter().map(|row| match row {
            Row::Header(section) => ListItem::new(Line::from(section.title()).bold().dark_gray()),
            Row::Folder(i) => ListItem::new(Line::from(format!("  {}", self.folders[*i].display_name))),
        });

        let highlight = if focused {
            Style::new().black().on_white()
        } else {
            Style::new().bold()
        };
        let list = List::new(items)
            .block(pane_block("Sidebar", focused))
            .highlight_style(highlight);

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
