//! Single-line text field for form input.
//!
//! Cursor positions are in char units; byte offsets are derived on edit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Cursor position in char units.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display width of the text before the cursor.
    pub fn cursor_width(&self) -> usize {
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value[..byte_idx].width()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, ch: char) {
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_idx, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(ch);
        }
    }

    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.remove(byte_idx);
    }

    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let byte_idx = char_to_byte_index(&self.value, self.cursor);
        self.value.remove(byte_idx);
    }

    /// Deletes from the cursor back to the start of the previous word.
    pub fn delete_word_left(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut idx = self.cursor;
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        while idx > 0 && !chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        let start = char_to_byte_index(&self.value, idx);
        let end = char_to_byte_index(&self.value, self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor = idx;
    }

    /// Applies an editing key. Returns true if the key was consumed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_left(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.chars().count(),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_cursor_moves() {
        let mut field = TextField::default();
        field.insert_str("héllo");
        assert_eq!(field.cursor(), 5);

        field.input(key(KeyCode::Left));
        field.input(key(KeyCode::Left));
        field.input(key(KeyCode::Char('X')));
        assert_eq!(field.value(), "hélXlo");

        field.input(key(KeyCode::Home));
        field.input(key(KeyCode::Delete));
        assert_eq!(field.value(), "élXlo");

        field.input(key(KeyCode::End));
        field.input(key(KeyCode::Backspace));
        assert_eq!(field.value(), "élXl");
    }

    #[test]
    fn test_delete_word_left() {
        let mut field = TextField::default();
        field.set("pay the bills  ");
        field.delete_word_left();
        assert_eq!(field.value(), "pay the ");
        assert_eq!(field.cursor(), 8);
    }

    #[test]
    fn test_control_chords_are_not_inserted() {
        let mut field = TextField::default();
        let consumed = field.input(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(!consumed);
        assert_eq!(field.value(), "");
        assert!(field.is_blank());
    }

    #[test]
    fn test_cursor_width_counts_wide_chars() {
        let mut field = TextField::default();
        field.set("日本");
        assert_eq!(field.cursor_width(), 4);
    }
}
