//! Shared code buffer held by the client.

/// Full text of the room's buffer.
///
/// Remote updates overwrite it unconditionally, so concurrent edits resolve to
/// whichever full buffer arrived last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    text: String,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append `line` as a new last line
    pub fn append_line(&mut self, line: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}
