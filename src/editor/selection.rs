/// A selection in character offsets. `start == end` is a bare caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(position: usize) -> Self {
        Self::new(position, position)
    }

    /// Orders the endpoints and clamps them to `len` characters.
    pub fn normalized(&self, len: usize) -> Self {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self::new(start.min(len), end.min(len))
    }

    /// Parses `S` or `S:E`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.split_once(':') {
            Some((start, end)) => Some(Self::new(
                start.trim().parse().ok()?,
                end.trim().parse().ok()?,
            )),
            None => value.trim().parse().ok().map(Self::caret),
        }
    }
}

/// The editor state an insertion is spliced into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionTarget {
    pub content: String,
    pub selection: Selection,
}

impl InsertionTarget {
    pub fn new(content: impl Into<String>, selection: Selection) -> Self {
        Self {
            content: content.into(),
            selection,
        }
    }

    /// Replaces the selected range with `text`, returning the new document
    /// and the caret just after the inserted text.
    pub fn splice(&self, text: &str) -> (String, Selection) {
        let len = self.content.chars().count();
        let selection = self.selection.normalized(len);
        let start = byte_offset(&self.content, selection.start);
        let end = byte_offset(&self.content, selection.end);

        let mut spliced = String::with_capacity(self.content.len() + text.len());
        spliced.push_str(&self.content[..start]);
        spliced.push_str(text);
        spliced.push_str(&self.content[end..]);

        let caret = Selection::caret(selection.start + text.chars().count());
        (spliced, caret)
    }
}

fn byte_offset(content: &str, chars: usize) -> usize {
    content
        .char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(content.len())
}
