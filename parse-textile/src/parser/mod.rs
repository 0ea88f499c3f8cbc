//! This module implements the block level grammar: a document is cut into
//! blocks at blank lines, and each block is classified by the signature
//! carried on its first line (`p.`, `h1.` … `h6.`, `bq.`, `bc.`, `pre.`,
//! `notextile.`, `fnN.`). Blocks without a signature are implicit
//! paragraphs. The text inside a block is handed to the phrase grammar in
//! [`inline`], except for the preformatted and pass-through kinds.

pub mod attributes;
pub mod inline;

use crate::error::Error;
use crate::options::Symbol;
use crate::parser::attributes::attributes;
use crate::parser::inline::phrases;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::char;
use nom::combinator::{fail, opt, value};
use nom::multi::many0;
use nom::IResult;

/// The element kinds a parsed document can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Root of a parsed document.
    Doc,
    Paragraph,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Blockquote,
    /// A `pre.` block. Its body is escaped but not phrase parsed.
    Pre,
    /// A `bc.` block, rendered as `<pre><code>`.
    BlockCode,
    /// A `notextile.` block. Its body is emitted untouched.
    NoTextile,
    Strong,
    Bold,
    Emphasis,
    Italic,
    Span,
    Anchor,
    /// A `fnN.` footnote paragraph.
    Footnote,
    /// The `<sup>` label opening a footnote paragraph.
    FootnoteId,
    /// An inline `[N]` footnote reference.
    FootnoteRef,
}

/// The attributes an element can carry, either from explicit modifiers
/// (`(class #id)`, `{style}`, `[lang]`) or set by the grammar itself
/// (`href` on links, `class`/`id` on footnotes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub href: Option<String>,
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub style: Option<String>,
    pub lang: Option<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn href(destination: impl Into<String>) -> Self {
        Self {
            href: Some(destination.into()),
            ..Self::default()
        }
    }

    pub fn classes(classes: Vec<String>) -> Self {
        Self {
            classes,
            ..Self::default()
        }
    }

    pub fn classes_id(classes: Vec<String>, id: impl Into<String>) -> Self {
        Self {
            classes,
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// One element: a tag, its attributes and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Attributes,
    pub nodes: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag, nodes: Vec<Node>) -> Self {
        Self {
            tag,
            attrs: Attributes::new(),
            nodes,
        }
    }

    pub fn with_attrs(tag: Tag, attrs: Attributes, nodes: Vec<Node>) -> Self {
        Self { tag, attrs, nodes }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A node of the parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A newline between blocks, reproduced verbatim in the output.
    Newline,
    /// A newline inside a block, subject to the line wrap option.
    LineBreak,
    Element(Element),
    Plain(String),
    Symbol(Symbol),
}

/// Consumes the body of one block: everything up to the next blank line,
/// or up to a trailing final newline, or the rest of the input. Fails on
/// empty input.
fn block_body(i: &str) -> IResult<&str, &str> {
    if i.is_empty() {
        return fail(i);
    }
    if let Some(position) = i.find("\n\n") {
        return Ok((&i[position..], &i[..position]));
    }
    if let Some(position) = i.rfind('\n') {
        if &i[position..] == "\n" {
            return Ok((&i[position..], &i[..position]));
        }
    }
    Ok(("", i))
}

fn block_signature(i: &str) -> IResult<&str, Tag> {
    alt((
        value(Tag::H1, tag("h1")),
        value(Tag::H2, tag("h2")),
        value(Tag::H3, tag("h3")),
        value(Tag::H4, tag("h4")),
        value(Tag::H5, tag("h5")),
        value(Tag::H6, tag("h6")),
        value(Tag::Paragraph, tag("p")),
    ))(i)
}

fn newline(i: &str) -> IResult<&str, Node> {
    value(Node::Newline, char('\n'))(i)
}

/// A block opened by one of the plain signatures: `p.`, `h1.` … `h6.`.
fn explicit_block(i: &str) -> IResult<&str, Node> {
    let (i, block_tag) = block_signature(i)?;
    let (i, attrs) = attributes(i)?;
    let (i, _) = tag(". ")(i)?;
    let (i, body) = block_body(i)?;
    let (_, nodes) = phrases(body)?;
    Ok((i, Element::with_attrs(block_tag, attrs, nodes).into()))
}

/// `bq.` wraps its content in a paragraph inside the quote.
fn blockquote(i: &str) -> IResult<&str, Node> {
    let (i, _) = tag("bq")(i)?;
    let (i, attrs) = attributes(i)?;
    let (i, _) = tag(". ")(i)?;
    let (i, body) = block_body(i)?;
    let (_, nodes) = phrases(body)?;
    let paragraph = Element::new(Tag::Paragraph, nodes);
    let quote = Element::with_attrs(Tag::Blockquote, attrs, vec![paragraph.into()]);
    Ok((i, quote.into()))
}

/// `bc.` and `pre.` keep their body as plain text; no phrase markup is
/// recognized inside.
fn preformatted_block(i: &str) -> IResult<&str, Node> {
    let (i, block_tag) = alt((
        value(Tag::BlockCode, tag("bc")),
        value(Tag::Pre, tag("pre")),
    ))(i)?;
    let (i, attrs) = attributes(i)?;
    let (i, _) = tag(". ")(i)?;
    let (i, body) = block_body(i)?;
    let element = Element::with_attrs(block_tag, attrs, vec![Node::Plain(body.to_string())]);
    Ok((i, element.into()))
}

/// `notextile.` emits its body without any processing. Attribute
/// modifiers are consumed but dropped, since no tag is emitted to carry
/// them.
fn notextile_block(i: &str) -> IResult<&str, Node> {
    let (i, _) = tag("notextile")(i)?;
    let (i, _) = attributes(i)?;
    let (i, _) = tag(". ")(i)?;
    let (i, body) = block_body(i)?;
    let element = Element::new(Tag::NoTextile, vec![Node::Plain(body.to_string())]);
    Ok((i, element.into()))
}

/// `fnN. text` becomes a footnote paragraph. `fnN^. text` additionally
/// links the label back to the `[N]` reference site.
fn footnote_block(i: &str) -> IResult<&str, Node> {
    let (i, _) = tag("fn")(i)?;
    let (i, number) = take_while1(|c: char| c.is_ascii_digit())(i)?;
    let (i, backlink) = opt(char('^'))(i)?;
    let (i, mut attrs) = attributes(i)?;
    let (i, _) = tag(". ")(i)?;
    let (i, body) = block_body(i)?;
    let (_, mut nodes) = phrases(body)?;

    if attrs.classes.is_empty() {
        attrs.classes.push("footnote".to_string());
    }
    if attrs.id.is_none() {
        attrs.id = Some(format!("fn{}", number));
    }
    let label: Node = if backlink.is_some() {
        Element::with_attrs(
            Tag::Anchor,
            Attributes::href(format!("#fnrev{}", number)),
            vec![Node::Plain(number.to_string())],
        )
        .into()
    } else {
        Node::Plain(number.to_string())
    };
    let sup = Element::new(Tag::FootnoteId, vec![label]);
    let mut element = Element::with_attrs(
        Tag::Footnote,
        attrs,
        vec![sup.into(), Node::Plain(" ".to_string())],
    );
    element.nodes.append(&mut nodes);
    Ok((i, element.into()))
}

/// A block without a recognized signature is an implicit paragraph.
fn implicit_block(i: &str) -> IResult<&str, Node> {
    let (i, body) = block_body(i)?;
    let (_, nodes) = phrases(body)?;
    Ok((i, Element::new(Tag::Paragraph, nodes).into()))
}

fn doc_fragment(i: &str) -> IResult<&str, Node> {
    alt((
        newline,
        blockquote,
        footnote_block,
        notextile_block,
        // `pre` must come before the `p` signature in `explicit_block`.
        preformatted_block,
        explicit_block,
        implicit_block,
    ))(i)
}

fn snippet(i: &str) -> String {
    i.chars().take(40).collect()
}

/// Parses a whole Textile document into its tree representation.
///
/// ```
/// use parse_textile::parser::{parse, Element, Node, Tag};
///
/// let doc = parse("yay").unwrap();
/// assert_eq!(
///     doc,
///     Node::Element(Element::new(
///         Tag::Doc,
///         vec![Node::Element(Element::new(
///             Tag::Paragraph,
///             vec![Node::Plain("yay".to_string())]
///         ))]
///     ))
/// );
/// ```
pub fn parse(i: &str) -> Result<Node, Error> {
    match many0(doc_fragment)(i) {
        Ok((rest, nodes)) if rest.is_empty() => Ok(Node::Element(Element::new(Tag::Doc, nodes))),
        Ok((rest, _)) => Err(Error::Trailing(snippet(rest))),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(Error::Malformed(snippet(e.input)))
        }
        // Complete parsers never request more input.
        Err(nom::Err::Incomplete(_)) => Err(Error::Malformed(String::new())),
    }
}
