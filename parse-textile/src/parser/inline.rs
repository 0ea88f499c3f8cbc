//! The phrase level grammar: markup recognized inside a block's text.
//! Every parser here returns a [`Node`]; the final `fallback` accepts any
//! single character, so [`phrases`] succeeds on all non-empty input and
//! unmatched markers degrade to literal text.

use crate::options::Symbol;
use crate::parser::{Attributes, Element, Node, Tag};
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while1};
use nom::character::complete::{anychar, char};
use nom::combinator::{all_consuming, fail, value};
use nom::multi::many1;
use nom::sequence::delimited;
use nom::IResult;

/// A run of three or more capitals is wrapped in a `caps` span, so a
/// style sheet can letterspace acronyms.
fn caps(i: &str) -> IResult<&str, Node> {
    let (rest, matched) = take_while1(|c: char| c.is_uppercase())(i)?;
    if matched.chars().count() <= 2 {
        return fail(i);
    }
    let element = Element::with_attrs(
        Tag::Span,
        Attributes::classes(vec!["caps".to_string()]),
        vec![Node::Plain(matched.to_string())],
    );
    Ok((rest, element.into()))
}

fn letters(i: &str) -> IResult<&str, Node> {
    let (i, matched) = take_while1(|c: char| c.is_alphabetic())(i)?;
    Ok((i, Node::Plain(matched.to_string())))
}

fn word(i: &str) -> IResult<&str, Node> {
    alt((caps, letters))(i)
}

fn whitespace(i: &str) -> IResult<&str, Node> {
    let (i, matched) = take_while1(|c: char| c == ' ')(i)?;
    Ok((i, Node::Plain(matched.to_string())))
}

fn newline(i: &str) -> IResult<&str, Node> {
    value(Node::LineBreak, char('\n'))(i)
}

fn bold(i: &str) -> IResult<&str, Node> {
    let (i, inner) = delimited(tag("**"), take_until("**"), tag("**"))(i)?;
    let (_, nodes) = phrases(inner)?;
    Ok((i, Element::new(Tag::Bold, nodes).into()))
}

fn strong(i: &str) -> IResult<&str, Node> {
    let (i, inner) = delimited(char('*'), take_until("*"), char('*'))(i)?;
    let (_, nodes) = phrases(inner)?;
    Ok((i, Element::new(Tag::Strong, nodes).into()))
}

fn italic(i: &str) -> IResult<&str, Node> {
    let (i, inner) = delimited(tag("__"), take_until("__"), tag("__"))(i)?;
    let (_, nodes) = phrases(inner)?;
    Ok((i, Element::new(Tag::Italic, nodes).into()))
}

fn emphasized(i: &str) -> IResult<&str, Node> {
    let (i, inner) = delimited(char('_'), take_until("_"), char('_'))(i)?;
    let (_, nodes) = phrases(inner)?;
    Ok((i, Element::new(Tag::Emphasis, nodes).into()))
}

fn is_url_char(c: char) -> bool {
    matches!(c,
        'a'..='z'
        | 'A'..='Z'
        | '0'..='9'
        | ':' | '/' | '.' | '?' | '&' | '%' | '#' | '_' | '-' | '=' | '~' | '+')
}

/// An inline link: `"display text":destination`. The destination runs to
/// the first character that cannot appear in a URL.
fn link(i: &str) -> IResult<&str, Node> {
    let (i, display) = delimited(char('"'), take_until("\""), tag("\":"))(i)?;
    let (i, destination) = take_while1(is_url_char)(i)?;
    let anchor = Element::with_attrs(
        Tag::Anchor,
        Attributes::href(destination),
        vec![Node::Plain(display.to_string())],
    );
    Ok((i, anchor.into()))
}

fn apostrophe(i: &str) -> IResult<&str, Node> {
    value(Node::Symbol(Symbol::Apostrophe), char('\''))(i)
}

fn ellipsis(i: &str) -> IResult<&str, Node> {
    value(Node::Symbol(Symbol::Ellipsis), tag("..."))(i)
}

fn emdash(i: &str) -> IResult<&str, Node> {
    value(Node::Symbol(Symbol::Emdash), tag("--"))(i)
}

/// Must be tried before `whitespace`, which would otherwise eat the
/// surrounding spaces.
fn endash(i: &str) -> IResult<&str, Node> {
    value(Node::Symbol(Symbol::Endash), tag(" - "))(i)
}

fn symbol_word(i: &str) -> IResult<&str, Symbol> {
    alt((
        value(
            Symbol::Trademark,
            alt((tag("tm"), tag("TM"), tag("tM"), tag("Tm"))),
        ),
        value(Symbol::Registered, alt((tag("r"), tag("R")))),
        value(Symbol::Copyright, alt((tag("c"), tag("C")))),
        value(Symbol::Half, tag("1/2")),
        value(Symbol::Quarter, tag("1/4")),
        value(Symbol::ThreeQuarters, tag("3/4")),
        value(Symbol::Degrees, alt((tag("o"), tag("O")))),
        value(Symbol::PlusMinus, tag("+/-")),
    ))(i)
}

/// `(tm)`, `[r]` and friends. The closing bracket must follow the symbol
/// immediately, so ordinary parenthesized prose falls through to the
/// fallback.
fn bracketed_symbol(i: &str) -> IResult<&str, Node> {
    let parenthesized = delimited(char('('), symbol_word, char(')'));
    let squared = delimited(char('['), symbol_word, char(']'));
    let (i, symbol) = alt((parenthesized, squared))(i)?;
    Ok((i, Node::Symbol(symbol)))
}

/// `[N]` links down to the matching `fnN.` block; `[N!]` shows the
/// number without a link.
fn footnote_ref(i: &str) -> IResult<&str, Node> {
    let (i, _) = char('[')(i)?;
    let (i, number) = take_while1(|c: char| c.is_ascii_digit())(i)?;
    let (i, label) = if let Some(rest) = i.strip_prefix("!]") {
        (rest, Node::Plain(number.to_string()))
    } else if let Some(rest) = i.strip_prefix(']') {
        let link_down = Element::with_attrs(
            Tag::Anchor,
            Attributes::href(format!("#fn{}", number)),
            vec![Node::Plain(number.to_string())],
        );
        (rest, link_down.into())
    } else {
        return fail(i);
    };
    let reference = Element::with_attrs(
        Tag::FootnoteRef,
        Attributes::classes_id(vec!["footnote".to_string()], format!("fnrev{}", number)),
        vec![label],
    );
    Ok((i, reference.into()))
}

fn fallback(i: &str) -> IResult<&str, Node> {
    let (i, c) = anychar(i)?;
    Ok((i, Node::Plain(c.to_string())))
}

fn phrase(i: &str) -> IResult<&str, Node> {
    alt((
        word,
        bold,
        strong,
        italic,
        emphasized,
        endash,
        whitespace,
        footnote_ref,
        apostrophe,
        ellipsis,
        emdash,
        bracketed_symbol,
        link,
        newline,
        fallback,
    ))(i)
}

/// Parses the complete phrase content of a block. Fails only on empty
/// input.
pub fn phrases(i: &str) -> IResult<&str, Vec<Node>> {
    all_consuming(many1(phrase))(i)
}
