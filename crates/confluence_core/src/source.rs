//! Editable markdown source with a caret selection.

/// Caret selection measured in characters, `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Collapsed selection, i.e. a plain caret.
    pub fn caret(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Selection between two positions given in any order.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self {
            start: anchor.min(head),
            end: anchor.max(head),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The markdown being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    text: String,
    selection: Selection,
}

impl SourceBuffer {
    /// Create a buffer with the caret at the end of `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let mut buffer = Self::default();
        buffer.set_text(text);
        buffer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the whole text, the caret moves to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selection = Selection::caret(self.char_len());
    }

    /// Set the caret selection, clamped to the text bounds.
    pub fn select(&mut self, selection: Selection) {
        let len = self.char_len();
        self.selection = Selection::new(selection.start.min(len), selection.end.min(len));
    }

    /// Replace the selected range with `insert`, or insert it at the caret.
    ///
    /// The caret ends up right after the inserted text.
    pub fn splice(&mut self, insert: &str) {
        let Selection { start, end } = self.selection;
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);

        self.text.replace_range(start_byte..end_byte, insert);
        self.selection = Selection::caret(start + insert.chars().count());
    }

    /// Append text at the end of the buffer, used for line-oriented input.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
        self.selection = Selection::caret(self.char_len());
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte_idx, _)| byte_idx)
    }
}
