//! Cell sanitizing for spreadsheet output.

use std::borrow::Cow;

/// True for control characters spreadsheet cells cannot hold. Tab, line
/// feed and carriage return are kept.
pub fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Strip forbidden control characters, borrowing when nothing changes.
pub fn sanitize_cell(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_forbidden) {
        Cow::Owned(text.chars().filter(|c| !is_forbidden(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}
