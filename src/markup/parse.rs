use scraper::{ElementRef, Html, Node};

use super::node::{MarkupNode, NodeKind};

/// Parses an HTML fragment leniently. Malformed markup is repaired by the
/// HTML5 tree builder, so this never fails.
pub fn parse_fragment(html: &str) -> Vec<MarkupNode> {
    let fragment = Html::parse_fragment(html);
    normalize_children(fragment.root_element())
}

fn normalize_children(element: ElementRef<'_>) -> Vec<MarkupNode> {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(MarkupNode::Text(text.to_string())),
            Node::Element(_) => ElementRef::wrap(child).map(normalize_element),
            _ => None,
        })
        .collect()
}

fn normalize_element(element: ElementRef<'_>) -> MarkupNode {
    let kind = node_kind(element);
    let children = match kind {
        NodeKind::Skipped => Vec::new(),
        _ => normalize_children(element),
    };
    MarkupNode::Element { kind, children }
}

fn node_kind(element: ElementRef<'_>) -> NodeKind {
    let value = element.value();
    let attr = |name: &str| value.attr(name).unwrap_or("").to_string();

    match value.name() {
        "h1" => NodeKind::Heading(1),
        "h2" => NodeKind::Heading(2),
        "h3" => NodeKind::Heading(3),
        "h4" => NodeKind::Heading(4),
        "h5" => NodeKind::Heading(5),
        "h6" => NodeKind::Heading(6),
        "p" => NodeKind::Paragraph,
        "strong" | "b" => NodeKind::Strong,
        "em" | "i" => NodeKind::Emphasis,
        "del" | "s" | "strike" => NodeKind::Strikethrough,
        "pre" => NodeKind::CodeBlock,
        "code" if parent_is_pre(element) => NodeKind::CodeBlock,
        "code" => NodeKind::InlineCode,
        "a" => NodeKind::Link { href: attr("href") },
        "ul" => NodeKind::UnorderedList,
        "ol" => NodeKind::OrderedList,
        "li" => NodeKind::ListItem,
        "blockquote" => NodeKind::Blockquote,
        "img" => NodeKind::Image {
            src: attr("src"),
            alt: attr("alt"),
        },
        "table" => NodeKind::Table,
        "tr" => NodeKind::TableRow,
        "td" | "th" => NodeKind::TableCell,
        "br" => NodeKind::LineBreak,
        "hr" => NodeKind::Rule,
        "script" | "style" | "template" | "head" | "noscript" => NodeKind::Skipped,
        other => NodeKind::Container(other.to_string()),
    }
}

fn parent_is_pre(element: ElementRef<'_>) -> bool {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|parent| parent.value().name() == "pre")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(nodes: &[MarkupNode]) -> Vec<Option<&NodeKind>> {
        nodes.iter().map(MarkupNode::kind).collect()
    }

    #[test]
    fn test_parse_maps_known_tags() {
        let nodes = parse_fragment("<h2>a</h2><p>b</p><hr>");

        assert_eq!(
            kinds(&nodes),
            vec![
                Some(&NodeKind::Heading(2)),
                Some(&NodeKind::Paragraph),
                Some(&NodeKind::Rule)
            ]
        );
    }

    #[test]
    fn test_parse_reads_attributes() {
        let nodes = parse_fragment(r#"<a href="/x">l</a><img src="a.png" alt="A">"#);

        assert_eq!(
            nodes[0].kind(),
            Some(&NodeKind::Link {
                href: "/x".to_string()
            })
        );
        assert_eq!(
            nodes[1].kind(),
            Some(&NodeKind::Image {
                src: "a.png".to_string(),
                alt: "A".to_string()
            })
        );
    }

    #[test]
    fn test_parse_missing_attributes_default_to_empty() {
        let nodes = parse_fragment("<a>l</a><img>");

        assert_eq!(
            nodes[0].kind(),
            Some(&NodeKind::Link {
                href: String::new()
            })
        );
        assert_eq!(
            nodes[1].kind(),
            Some(&NodeKind::Image {
                src: String::new(),
                alt: String::new()
            })
        );
    }

    #[test]
    fn test_parse_distinguishes_code_contexts() {
        let nodes = parse_fragment("<pre><code>x</code></pre><code>y</code>");

        assert_eq!(nodes[0].kind(), Some(&NodeKind::CodeBlock));
        assert_eq!(nodes[0].children()[0].kind(), Some(&NodeKind::CodeBlock));
        assert_eq!(nodes[1].kind(), Some(&NodeKind::InlineCode));
    }

    #[test]
    fn test_parse_unknown_tags_become_containers() {
        let nodes = parse_fragment("<div><span>hi</span></div>");

        assert_eq!(
            nodes[0].kind(),
            Some(&NodeKind::Container("div".to_string()))
        );
        assert_eq!(nodes[0].text_content(), "hi");
    }

    #[test]
    fn test_parse_drops_script_content() {
        let nodes = parse_fragment("<p>a</p><script>alert(1)</script>");

        assert_eq!(nodes[1].kind(), Some(&NodeKind::Skipped));
        assert!(nodes[1].children().is_empty());
    }

    #[test]
    fn test_parse_repairs_unclosed_tags() {
        let nodes = parse_fragment("<p>open <b>bold");

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "open bold");
    }
}
