//! Renders a parsed document tree as HTML.
//!
//! Text nodes pass through `html_escape::encode_text`, attribute values
//! through `html_escape::encode_double_quoted_attribute`. Only the body
//! of a `notextile.` block skips escaping.

use crate::error::Error;
use crate::options::Options;
use crate::parser::{Attributes, Element, Node, Tag};
use html_escape::encode_double_quoted_attribute;
use html_escape::encode_text;

fn tag_name(tag: Tag) -> &'static str {
    match tag {
        Tag::Paragraph | Tag::Footnote => "p",
        Tag::H1 => "h1",
        Tag::H2 => "h2",
        Tag::H3 => "h3",
        Tag::H4 => "h4",
        Tag::H5 => "h5",
        Tag::H6 => "h6",
        Tag::Blockquote => "blockquote",
        Tag::Pre => "pre",
        Tag::Strong => "strong",
        Tag::Bold => "b",
        Tag::Emphasis => "em",
        Tag::Italic => "i",
        Tag::Span => "span",
        Tag::Anchor => "a",
        Tag::FootnoteId | Tag::FootnoteRef => "sup",
        // Handled in `render_element` before the generic path.
        Tag::Doc | Tag::NoTextile | Tag::BlockCode => unreachable!(),
    }
}

fn push_attribute(buffer: &mut String, name: &str, value: &str) {
    buffer.push(' ');
    buffer.push_str(name);
    buffer.push_str("=\"");
    buffer.push_str(&encode_double_quoted_attribute(value));
    buffer.push('"');
}

fn open_tag(buffer: &mut String, name: &str, attrs: &Attributes) {
    buffer.push('<');
    buffer.push_str(name);
    if let Some(href) = &attrs.href {
        push_attribute(buffer, "href", href);
    }
    if !attrs.classes.is_empty() {
        push_attribute(buffer, "class", &attrs.classes.join(" "));
    }
    if let Some(id) = &attrs.id {
        push_attribute(buffer, "id", id);
    }
    if let Some(style) = &attrs.style {
        push_attribute(buffer, "style", style);
    }
    if let Some(lang) = &attrs.lang {
        push_attribute(buffer, "lang", lang);
    }
    buffer.push('>');
}

fn render_element(buffer: &mut String, options: &Options, element: &Element) {
    match element.tag {
        Tag::Doc => render_nodes(buffer, options, &element.nodes, false),
        Tag::NoTextile => render_nodes(buffer, options, &element.nodes, true),
        Tag::BlockCode => {
            open_tag(buffer, "pre", &element.attrs);
            buffer.push_str("<code>");
            render_nodes(buffer, options, &element.nodes, false);
            buffer.push_str("</code></pre>");
        }
        _ => {
            let name = tag_name(element.tag);
            open_tag(buffer, name, &element.attrs);
            render_nodes(buffer, options, &element.nodes, false);
            buffer.push_str("</");
            buffer.push_str(name);
            buffer.push('>');
        }
    }
}

fn render_node(buffer: &mut String, options: &Options, node: &Node, verbatim: bool) {
    match node {
        Node::Element(element) => render_element(buffer, options, element),
        Node::Plain(text) => {
            if verbatim {
                buffer.push_str(text);
            } else {
                buffer.push_str(&encode_text(text));
            }
        }
        Node::Newline => buffer.push('\n'),
        Node::LineBreak => {
            if options.line_wrap {
                buffer.push_str("<br />\n");
            } else {
                buffer.push('\n');
            }
        }
        Node::Symbol(symbol) => {
            // A symbol without a replacement renders as nothing.
            if let Some(replacement) = options.symbols.get(symbol) {
                buffer.push_str(replacement);
            }
        }
    }
}

fn render_nodes(buffer: &mut String, options: &Options, nodes: &[Node], verbatim: bool) {
    for node in nodes {
        render_node(buffer, options, node, verbatim);
    }
}

/// Renders a document tree, as returned by [`crate::parser::parse`].
pub fn render(document: &Node, options: &Options) -> Result<String, Error> {
    let mut buffer = String::new();
    render_node(&mut buffer, options, document, false);
    Ok(buffer)
}
