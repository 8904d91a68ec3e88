use crate::keymap::Action;
use crossterm::event::KeyCode;

/// A single-line text input with a character-based cursor.
///
/// # Example
/// ```
/// use podclip::utils::TextInput;
///
/// let mut input = TextInput::new();
/// input.insert_char('a');
/// input.insert_char('b');
/// input.move_left();
/// input.insert_char('/');
/// assert_eq!(input.text(), "a/b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text input with initial text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the text is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Handle a raw key code. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Handle an editing action from the keymap. Returns true if consumed.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::GoToTop => self.move_home(),
            Action::GoToEnd => self.move_end(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = TextInput::new();
        for c in "abc".chars() {
            input.insert_char(c);
        }
        input.backspace();
        assert_eq!(input.text(), "ab");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_unicode_editing() {
        let mut input = TextInput::with_text("épisode.mp4");
        input.move_home();
        input.delete();
        input.insert_char('e');
        assert_eq!(input.text(), "episode.mp4");
    }

    #[test]
    fn test_control_chars_are_ignored() {
        let mut input = TextInput::new();
        input.insert_char('\n');
        assert!(input.is_empty());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::with_text("ab");
        input.move_right();
        assert_eq!(input.cursor(), 2);
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor(), 0);
        input.backspace();
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn test_handle_key() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyCode::Char('x')));
        assert!(input.handle_key(KeyCode::Left));
        assert!(!input.handle_key(KeyCode::Enter));
        assert_eq!(input.text(), "x");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_handle_action() {
        let mut input = TextInput::with_text("abc");
        assert!(input.handle_action(Action::Backspace));
        assert!(input.handle_action(Action::GoToTop));
        assert!(input.handle_action(Action::DeleteChar));
        assert!(!input.handle_action(Action::Save));
        assert_eq!(input.text(), "b");
    }
}
