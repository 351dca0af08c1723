mod editor;
mod folder_list;
mod note_list;

pub use editor::Editor;
#[cfg(test)]
pub use editor::EditorState;
pub use folder_list::FolderList;
pub use note_list::NoteList;

use ratatui::{
    style::{Style, Stylize},
    symbols::border,
    widgets::Block,
};

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::bordered().title(title);
    if focused {
        block
            .border_set(border::THICK)
            .border_style(Style::new().yellow())
    } else {
        block
    }
}

/// Index reached by stepping once from `current` in a list of `len` items.
/// Wraps at both ends; with nothing selected the first item is picked.
fn step(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        None => 0,
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(0) => len - 1,
        Some(i) => i - 1,
    })
}
