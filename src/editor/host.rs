use super::selection::{InsertionTarget, Selection};

/// The editing surface paste results are inserted into.
///
/// `insertion_target` is read when an insertion is applied, not when the
/// paste started, so text typed while an upload was in flight is kept.
pub trait EditorHost {
    fn insertion_target(&self) -> Option<InsertionTarget>;

    fn set_document(&mut self, content: String, selection: Selection);
}

/// An in-memory editor buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    content: String,
    selection: Option<Selection>,
}

impl Document {
    /// A document without focus: there is no caret until one is placed.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Caret at the end of the content.
    pub fn with_caret_at_end(self) -> Self {
        let end = self.content.chars().count();
        self.with_selection(Selection::caret(end))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    /// Types `text` at the current selection, as a user would.
    pub fn type_text(&mut self, text: &str) {
        if let Some(target) = self.insertion_target() {
            let (content, caret) = target.splice(text);
            self.set_document(content, caret);
        }
    }
}

impl EditorHost for Document {
    fn insertion_target(&self) -> Option<InsertionTarget> {
        self.selection
            .map(|selection| InsertionTarget::new(self.content.clone(), selection))
    }

    fn set_document(&mut self, content: String, selection: Selection) {
        self.content = content;
        self.selection = Some(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfocused_document_has_no_target() {
        let doc = Document::new("abc");

        assert_eq!(doc.insertion_target(), None);
    }

    #[test]
    fn test_type_text_moves_caret() {
        let mut doc = Document::new("ac").with_selection(Selection::caret(1));

        doc.type_text("b");
        doc.type_text("!");

        assert_eq!(doc.content(), "ab!c");
        assert_eq!(doc.selection(), Some(Selection::caret(3)));
    }

    #[test]
    fn test_caret_at_end_counts_characters() {
        let doc = Document::new("añb").with_caret_at_end();

        assert_eq!(doc.selection(), Some(Selection::caret(3)));
    }
}
