use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::selector::Selector;

mod details;
mod form;
mod home;
mod list;
mod records;

pub(in crate::tui_shell) use details::WordDetailsView;
pub(in crate::tui_shell) use form::FormView;
pub(in crate::tui_shell) use home::{HomeView, ListSettings};
pub(in crate::tui_shell) use list::ListView;
pub(in crate::tui_shell) use records::CatalogRecord;

/// Result of feeding a key to an open dropdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropdownKey {
    Consumed,
    /// Enter: the owner commits the highlighted row.
    Choose,
}

/// Keys of an open dropdown: typing filters, arrows move, Enter chooses,
/// Esc dismisses.
fn dropdown_key(sel: &mut Selector, key: KeyEvent) -> DropdownKey {
    match key.code {
        KeyCode::Enter => return DropdownKey::Choose,
        KeyCode::Esc => sel.dismiss(),
        KeyCode::Up => sel.move_highlight(-1),
        KeyCode::Down => sel.move_highlight(1),
        KeyCode::PageUp => sel.move_highlight(-10),
        KeyCode::PageDown => sel.move_highlight(10),
        KeyCode::Backspace => sel.pop_filter_char(),
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            sel.push_filter_char(c)
        }
        _ => {}
    }
    DropdownKey::Consumed
}

fn is_plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
