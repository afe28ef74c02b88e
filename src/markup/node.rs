/// A parsed HTML fragment, reduced to the element kinds the converter knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Text(String),
    Element {
        kind: NodeKind,
        children: Vec<MarkupNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `h1`..`h6`
    Heading(u8),
    Paragraph,
    Strong,
    Emphasis,
    Strikethrough,
    /// `code` outside a `pre`
    InlineCode,
    /// `pre`, or `code` directly inside `pre`
    CodeBlock,
    Link {
        href: String,
    },
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    Image {
        src: String,
        alt: String,
    },
    Table,
    TableRow,
    TableCell,
    LineBreak,
    Rule,
    /// Elements whose content is never shown (`script`, `style`, ...).
    Skipped,
    /// Any other element; its children are converted with no added markup.
    Container(String),
}

impl MarkupNode {
    pub fn text(text: impl Into<String>) -> Self {
        MarkupNode::Text(text.into())
    }

    pub fn element(kind: NodeKind, children: Vec<MarkupNode>) -> Self {
        MarkupNode::Element { kind, children }
    }

    pub fn kind(&self) -> Option<&NodeKind> {
        match self {
            MarkupNode::Element { kind, .. } => Some(kind),
            MarkupNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } => children,
            MarkupNode::Text(_) => &[],
        }
    }

    /// Concatenated raw text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element { kind: NodeKind::Skipped, .. } => {}
            MarkupNode::Element { kind: NodeKind::LineBreak, .. } => out.push('\n'),
            MarkupNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Pre-order visit of every image node.
    pub fn for_each_image_mut(&mut self, f: &mut impl FnMut(&mut String, &mut String)) {
        if let MarkupNode::Element { kind, children } = self {
            if let NodeKind::Image { src, alt } = kind {
                f(src, alt);
            }
            for child in children {
                child.for_each_image_mut(f);
            }
        }
    }

    pub fn for_each_image(&self, f: &mut impl FnMut(&str, &str)) {
        if let MarkupNode::Element { kind, children } = self {
            if let NodeKind::Image { src, alt } = kind {
                f(src, alt);
            }
            for child in children {
                child.for_each_image(f);
            }
        }
    }
}
