//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so multi-byte input edits cleanly.
#[derive(Clone, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Move cursor one position to the left.
    pub fn move_cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor one position to the right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// First visible character when the field shows `width` characters,
    /// chosen so the cursor stays on screen.
    pub fn scroll_offset(&self, width: usize) -> usize {
        self.cursor.saturating_sub(width.saturating_sub(1))
    }

    /// The characters visible from `offset` onwards.
    pub fn visible(&self, offset: usize) -> &str {
        &self.value[self.byte_index(offset)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_at_cursor() {
        let mut field = InputField::new();
        for c in "Pay bils".chars() {
            field.handle_char(c);
        }
        field.move_cursor_left();
        field.move_cursor_left();
        field.handle_char('l');
        assert_eq!(field.value, "Pay bills");

        field.move_cursor_end();
        field.handle_backspace();
        assert_eq!(field.value, "Pay bill");

        field.move_cursor_home();
        field.handle_delete();
        assert_eq!(field.value, "ay bill");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = InputField::new();
        for c in "café".chars() {
            field.handle_char(c);
        }
        field.handle_backspace();
        field.handle_char('é');
        field.move_cursor_left();
        field.handle_char('x');
        assert_eq!(field.value, "cafxé");

        field.clear();
        assert!(field.value.is_empty());
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let mut field = InputField::new();
        for c in "abcdefghij".chars() {
            field.handle_char(c);
        }
        assert_eq!(field.scroll_offset(20), 0);
        assert_eq!(field.scroll_offset(4), 7);
        assert_eq!(field.visible(field.scroll_offset(4)), "hij");

        field.move_cursor_home();
        assert_eq!(field.scroll_offset(4), 0);
        assert_eq!(field.scroll_offset(0), 0);
    }
}
