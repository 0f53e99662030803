//! Single-line text editing.

use crate::input::{Key, Modifiers};

/// Outcome of applying one key to a [`TextEdit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// The text changed.
    Edited,
    /// Only the cursor moved.
    CursorMoved,
    /// Enter was pressed.
    Submitted,
    /// Nothing happened.
    Ignored,
}

/// Single-line edit buffer with a column limit and a cursor in `0..=len`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEdit {
    text: String,
    cursor: usize,
    cols: usize,
}

impl TextEdit {
    /// Creates an empty buffer holding at most `cols` characters.
    #[must_use]
    pub const fn new(cols: usize) -> Self {
        Self { text: String::new(), cursor: 0, cols }
    }

    /// Creates a buffer with initial text, truncated to `cols`, cursor at the end.
    #[must_use]
    pub fn with_text(cols: usize, text: &str) -> Self {
        let text: String = text.chars().take(cols).collect();
        let cursor = text.chars().count();
        Self { text, cursor, cols }
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Column limit.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Moves the cursor, clamped to the text.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Applies one key.
    pub fn apply(&mut self, key: Key, modifiers: Modifiers) -> EditAction {
        match key {
            Key::Backspace => {
                if self.cursor == 0 {
                    return EditAction::Ignored;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                EditAction::Edited
            }
            Key::Left => {
                if self.cursor == 0 {
                    return EditAction::Ignored;
                }
                self.cursor -= 1;
                EditAction::CursorMoved
            }
            Key::Right => {
                if self.cursor >= self.len() {
                    return EditAction::Ignored;
                }
                self.cursor += 1;
                EditAction::CursorMoved
            }
            Key::Enter => EditAction::Submitted,
            Key::Char(glyph) => match typed_char(glyph, modifiers.shift) {
                Some(c) if self.len() < self.cols => {
                    let at = self.byte_index(self.cursor);
                    self.text.insert(at, c);
                    self.cursor += 1;
                    EditAction::Edited
                }
                _ => EditAction::Ignored,
            },
            _ => EditAction::Ignored,
        }
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(index, _)| index)
    }
}

/// Character produced by an unshifted key glyph, or `None` if not printable.
fn typed_char(glyph: char, shift: bool) -> Option<char> {
    if !(' '..='~').contains(&glyph) {
        return None;
    }
    if glyph.is_ascii_alphabetic() {
        return Some(if shift { glyph.to_ascii_uppercase() } else { glyph.to_ascii_lowercase() });
    }
    if !shift {
        return Some(glyph);
    }
    Some(match glyph {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        '0' => ')',
        '-' => '_',
        '=' => '+',
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '`' => '~',
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, super_key: false };
    const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false, super_key: false };

    #[test]
    fn test_column_limit_and_backspace() {
        let mut edit = TextEdit::with_text(5, "abcde");
        assert_eq!(edit.apply(Key::Char('F'), PLAIN), EditAction::Ignored);
        assert_eq!(edit.text(), "abcde");

        assert_eq!(edit.apply(Key::Backspace, PLAIN), EditAction::Edited);
        assert_eq!(edit.text(), "abcd");
        assert_eq!(edit.cursor(), 4);
    }

    #[test]
    fn test_case_and_shift_map() {
        let mut edit = TextEdit::new(10);
        for (key, mods) in [
            (Key::Char('H'), SHIFT),
            (Key::Char('I'), PLAIN),
            (Key::Char('1'), SHIFT),
            (Key::Char('/'), SHIFT),
            (Key::Char(' '), PLAIN),
            (Key::Char('-'), PLAIN),
        ] {
            edit.apply(key, mods);
        }
        assert_eq!(edit.text(), "Hi!? -");
    }

    #[test]
    fn test_cursor_moves_are_clamped() {
        let mut edit = TextEdit::with_text(10, "ab");
        assert_eq!(edit.apply(Key::Right, PLAIN), EditAction::Ignored);
        edit.apply(Key::Left, PLAIN);
        edit.apply(Key::Left, PLAIN);
        assert_eq!(edit.apply(Key::Left, PLAIN), EditAction::Ignored);
        assert_eq!(edit.cursor(), 0);

        edit.apply(Key::Char('X'), PLAIN);
        assert_eq!(edit.text(), "xab");
        assert_eq!(edit.apply(Key::Backspace, PLAIN), EditAction::Edited);
        assert_eq!(edit.apply(Key::Backspace, PLAIN), EditAction::Ignored);
        assert_eq!(edit.text(), "ab");
    }

    #[test]
    fn test_enter_submits_without_editing() {
        let mut edit = TextEdit::with_text(4, "ok");
        assert_eq!(edit.apply(Key::Enter, PLAIN), EditAction::Submitted);
        assert_eq!(edit.text(), "ok");
        assert_eq!(edit.apply(Key::Tab, PLAIN), EditAction::Ignored);
    }
}
