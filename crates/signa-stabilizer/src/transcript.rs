//! Transcript - accumulated committed text
//!
//! The text-output collaborator on the commit surface. Edits arrive as
//! [`TextEdit`] values from the stabilizer (or from a manual commit) and are
//! irreversible once applied.

use crate::TextEdit;

/// Accumulated text produced by committed gestures
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript::default()
    }

    /// Apply one committed edit
    pub fn apply(&mut self, edit: &TextEdit) {
        match edit {
            TextEdit::Append(s) => self.text.push_str(s),
            TextEdit::AppendSpace => self.text.push(' '),
            TextEdit::DeleteLast => {
                self.text.pop();
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_space() {
        let mut t = Transcript::new();
        t.apply(&TextEdit::Append("HI".to_string()));
        t.apply(&TextEdit::AppendSpace);
        t.apply(&TextEdit::Append("A".to_string()));

        assert_eq!(t.text(), "HI A");
    }

    #[test]
    fn test_delete_last_character() {
        let mut t = Transcript::new();
        t.apply(&TextEdit::Append("AB".to_string()));
        t.apply(&TextEdit::DeleteLast);

        assert_eq!(t.text(), "A");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let mut t = Transcript::new();
        t.apply(&TextEdit::DeleteLast);

        assert!(t.is_empty());
    }

    #[test]
    fn test_delete_removes_whole_multibyte_char() {
        let mut t = Transcript::new();
        t.apply(&TextEdit::Append("né".to_string()));
        t.apply(&TextEdit::DeleteLast);

        assert_eq!(t.text(), "n");
    }

    #[test]
    fn test_clear() {
        let mut t = Transcript::new();
        t.apply(&TextEdit::Append("ABC".to_string()));
        t.clear();

        assert!(t.is_empty());
    }
}
