pub mod converter;
pub mod node;
pub mod parse;

pub use converter::{collapse_whitespace, convert};
pub use node::{MarkupNode, NodeKind};
pub use parse::parse_fragment;

use std::collections::HashMap;

use crate::clipboard::is_image_url;

/// Parse an HTML fragment and convert it to Markdown.
pub fn html_to_markup(html: &str) -> String {
    convert(&parse_fragment(html))
}

/// Distinct `<img>` sources that point at remote image files, in document order.
pub fn remote_image_sources(nodes: &[MarkupNode]) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();
    for node in nodes {
        node.for_each_image(&mut |src: &str, _alt: &str| {
            if is_image_url(src) && !sources.iter().any(|s| s == src) {
                sources.push(src.to_string());
            }
        });
    }
    sources
}

/// Replace image sources found in `replacements`; others are left alone.
pub fn rewrite_image_sources(nodes: &mut [MarkupNode], replacements: &HashMap<String, String>) {
    for node in nodes {
        node.for_each_image_mut(&mut |src: &mut String, _alt: &mut String| {
            if let Some(url) = replacements.get(src.as_str()) {
                *src = url.clone();
            }
        });
    }
}
