//! Depth-first conversion of a [`MarkupNode`] tree into Markdown.
//!
//! Block elements (headings, paragraphs, lists, quotes, tables, code blocks,
//! images) start on a fresh blank line and end with their own trailing
//! newlines. Inline elements wrap their converted children. Text outside
//! code collapses whitespace runs to one space; text inside code is kept
//! verbatim. Unknown elements add no markup.

use super::node::{MarkupNode, NodeKind};

/// State threaded through the recursive descent.
#[derive(Debug, Default)]
struct ConversionContext {
    /// Nesting depth of lists being rendered.
    list_depth: usize,
}

pub fn convert(nodes: &[MarkupNode]) -> String {
    let mut output = String::new();
    let mut ctx = ConversionContext::default();
    convert_nodes(&mut output, nodes, &mut ctx);
    output.trim_start().to_string()
}

fn convert_nodes(output: &mut String, nodes: &[MarkupNode], ctx: &mut ConversionContext) {
    for node in nodes {
        convert_node(output, node, ctx);
    }
}

fn convert_node(output: &mut String, node: &MarkupNode, ctx: &mut ConversionContext) {
    match node {
        MarkupNode::Text(text) => push_text(output, text),
        MarkupNode::Element { kind, children } => convert_element(output, kind, children, ctx),
    }
}

fn convert_element(
    output: &mut String,
    kind: &NodeKind,
    children: &[MarkupNode],
    ctx: &mut ConversionContext,
) {
    match kind {
        NodeKind::Heading(level) => convert_heading(output, *level, children, ctx),
        NodeKind::Paragraph => convert_paragraph(output, children, ctx),
        NodeKind::Strong => wrap_inline(output, "**", &inline_content(children, ctx)),
        NodeKind::Emphasis => wrap_inline(output, "*", &inline_content(children, ctx)),
        NodeKind::Strikethrough => wrap_inline(output, "~~", &inline_content(children, ctx)),
        NodeKind::InlineCode => convert_inline_code(output, children),
        NodeKind::CodeBlock => convert_code_block(output, children),
        NodeKind::Link { href } => convert_link(output, href, children, ctx),
        NodeKind::UnorderedList => convert_list(output, children, ctx, false),
        NodeKind::OrderedList => convert_list(output, children, ctx, true),
        NodeKind::Blockquote => convert_blockquote(output, children, ctx),
        NodeKind::Image { src, alt } => {
            output.push_str("![");
            output.push_str(alt);
            output.push_str("](");
            output.push_str(src);
            output.push_str(")\n\n");
        }
        NodeKind::Table => convert_table(output, children, ctx),
        NodeKind::LineBreak => {
            trim_trailing_spaces(output);
            output.push('\n');
        }
        NodeKind::Rule => {
            ensure_blank_line(output);
            output.push_str("---\n\n");
        }
        NodeKind::Skipped => {}
        // List items, rows and cells outside their parents, and unknown tags.
        NodeKind::ListItem
        | NodeKind::TableRow
        | NodeKind::TableCell
        | NodeKind::Container(_) => convert_nodes(output, children, ctx),
    }
}

fn convert_heading(
    output: &mut String,
    level: u8,
    children: &[MarkupNode],
    ctx: &mut ConversionContext,
) {
    ensure_blank_line(output);
    for _ in 0..level.clamp(1, 6) {
        output.push('#');
    }
    output.push(' ');
    output.push_str(inline_content(children, ctx).trim());
    output.push_str("\n\n");
}

fn convert_paragraph(output: &mut String, children: &[MarkupNode], ctx: &mut ConversionContext) {
    let content = inline_content(children, ctx);
    let content = content.trim();
    if content.is_empty() {
        return;
    }
    ensure_blank_line(output);
    output.push_str(content);
    output.push_str("\n\n");
}

fn convert_link(
    output: &mut String,
    href: &str,
    children: &[MarkupNode],
    ctx: &mut ConversionContext,
) {
    let text = inline_content(children, ctx);
    if text.starts_with(char::is_whitespace) {
        push_text(output, " ");
    }
    output.push('[');
    output.push_str(text.trim());
    output.push_str("](");
    output.push_str(href);
    output.push(')');
    if text.ends_with(char::is_whitespace) {
        output.push(' ');
    }
}

fn convert_inline_code(output: &mut String, children: &[MarkupNode]) {
    let code = text_of(children);
    let fence = if code.contains('`') { "``" } else { "`" };
    output.push_str(fence);
    if fence.len() > 1 {
        output.push(' ');
        output.push_str(&code);
        output.push(' ');
    } else {
        output.push_str(&code);
    }
    output.push_str(fence);
}

fn convert_code_block(output: &mut String, children: &[MarkupNode]) {
    ensure_blank_line(output);
    let code = text_of(children);
    let code = code.strip_prefix('\n').unwrap_or(&code);
    let code = code.trim_end_matches('\n');

    output.push_str("```\n");
    output.push_str(code);
    output.push_str("\n```\n\n");
}

fn convert_list(
    output: &mut String,
    children: &[MarkupNode],
    ctx: &mut ConversionContext,
    ordered: bool,
) {
    if ctx.list_depth == 0 {
        ensure_blank_line(output);
    }

    ctx.list_depth += 1;
    let mut number = 0;
    let mut indent = String::new();
    for child in children {
        if child.kind() == Some(&NodeKind::ListItem) {
            number += 1;
            let marker = if ordered {
                format!("{}. ", number)
            } else {
                "- ".to_string()
            };
            let content = list_item_content(child.children(), ctx);
            indent = " ".repeat(marker.len());

            output.push_str(&marker);
            push_indented_lines(output, &content, &indent);
            output.push('\n');
            continue;
        }

        // Lists nested directly in a list, or stray content between items,
        // continue the previous item.
        let mut content = String::new();
        convert_node(&mut content, child, ctx);
        let content = content.trim();
        if content.is_empty() {
            continue;
        }
        output.push_str(&indent);
        push_indented_lines(output, content, &indent);
        output.push('\n');
    }
    ctx.list_depth -= 1;

    if ctx.list_depth == 0 {
        output.push('\n');
    }
}

/// Pushes `content`, indenting every non-empty line after the first.
fn push_indented_lines(output: &mut String, content: &str, indent: &str) {
    for (line_no, line) in content.lines().enumerate() {
        if line_no > 0 {
            output.push('\n');
            if !line.is_empty() {
                output.push_str(indent);
            }
        }
        output.push_str(line);
    }
}

/// Item text with any nested list moved onto its own lines.
fn list_item_content(children: &[MarkupNode], ctx: &mut ConversionContext) -> String {
    let mut content = String::new();
    for child in children {
        let is_list = matches!(
            child.kind(),
            Some(NodeKind::UnorderedList | NodeKind::OrderedList)
        );
        if is_list && !content.is_empty() && !content.ends_with('\n') {
            trim_trailing_spaces(&mut content);
            content.push('\n');
        }
        convert_node(&mut content, child, ctx);
    }
    content.trim().to_string()
}

fn convert_blockquote(output: &mut String, children: &[MarkupNode], ctx: &mut ConversionContext) {
    let mut content = String::new();
    convert_nodes(&mut content, children, ctx);
    let content = content.trim();
    if content.is_empty() {
        return;
    }

    ensure_blank_line(output);
    output.push_str("> ");
    output.push_str(&content.replace('\n', "\n> "));
    output.push_str("\n\n");
}

fn convert_table(output: &mut String, children: &[MarkupNode], ctx: &mut ConversionContext) {
    let mut rows = Vec::new();
    collect_rows(children, &mut rows);

    let mut cell_rows: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut cells = Vec::new();
        for cell in row.children() {
            if cell.kind() == Some(&NodeKind::TableCell) {
                cells.push(table_cell_content(cell.children(), ctx));
            }
        }
        if !cells.is_empty() {
            cell_rows.push(cells);
        }
    }

    let Some(columns) = cell_rows.iter().map(Vec::len).max() else {
        return;
    };

    ensure_blank_line(output);
    for (index, mut cells) in cell_rows.into_iter().enumerate() {
        cells.resize(columns, String::new());
        output.push('|');
        output.push_str(&cells.join("|"));
        output.push_str("|\n");

        if index == 0 {
            output.push('|');
            output.push_str(&"---|".repeat(columns));
            output.push('\n');
        }
    }
    output.push('\n');
}

/// Rows in document order, looking through `thead`/`tbody`/`tfoot` but not into nested tables.
fn collect_rows<'a>(nodes: &'a [MarkupNode], rows: &mut Vec<&'a MarkupNode>) {
    for node in nodes {
        match node.kind() {
            Some(NodeKind::TableRow) => rows.push(node),
            Some(NodeKind::Table) | None => {}
            Some(_) => collect_rows(node.children(), rows),
        }
    }
}

fn table_cell_content(children: &[MarkupNode], ctx: &mut ConversionContext) -> String {
    let content = inline_content(children, ctx);
    content
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// Converts children into a fresh buffer.
fn inline_content(children: &[MarkupNode], ctx: &mut ConversionContext) -> String {
    let mut content = String::new();
    convert_nodes(&mut content, children, ctx);
    content
}

fn text_of(children: &[MarkupNode]) -> String {
    children.iter().map(MarkupNode::text_content).collect()
}

/// Wraps `content` in `marker`, keeping surrounding whitespace outside the markers.
fn wrap_inline(output: &mut String, marker: &str, content: &str) {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        push_text(output, content);
        return;
    }
    if content.starts_with(char::is_whitespace) {
        push_text(output, " ");
    }
    output.push_str(marker);
    output.push_str(trimmed);
    output.push_str(marker);
    if content.ends_with(char::is_whitespace) {
        output.push(' ');
    }
}

fn push_text(output: &mut String, text: &str) {
    let collapsed = collapse_whitespace(text);
    let collapsed = if output.ends_with('\n') {
        collapsed.trim_start()
    } else {
        collapsed.as_str()
    };
    output.push_str(collapsed);
}

/// Collapses every run of HTML whitespace (including newlines) to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(ch);
            in_whitespace = false;
        }
    }
    collapsed
}

fn trim_trailing_spaces(output: &mut String) {
    while output.ends_with(' ') {
        output.pop();
    }
}

/// Ensure output ends with a blank line (for block elements).
fn ensure_blank_line(output: &mut String) {
    trim_trailing_spaces(output);
    if output.is_empty() {
        return;
    }

    let trailing_newlines = output.chars().rev().take_while(|&c| c == '\n').count();
    if trailing_newlines == 0 {
        output.push_str("\n\n");
    } else if trailing_newlines == 1 {
        output.push('\n');
    }
}

#[cfg(test)]
#[path = "converter_tests.rs"]
mod tests;
