//! Module for parsing a subset of the [Textile markup language] and
//! rendering it as HTML.
//!
//! The parser builds a small document tree (see [`parser::Node`]), the
//! renderer walks that tree and prints HTML. Both are driven either
//! through the [`Textile`] transformer type, which carries its options,
//! or through the [`textile_to_html`] convenience function:
//!
//! ```
//! use parse_textile::textile_to_html;
//!
//! assert_eq!(
//!     textile_to_html("h1. orange\n\nmocha").unwrap(),
//!     "<h1>orange</h1>\n\n<p>mocha</p>"
//! );
//! ```
//!
//! [Textile markup language]: https://textile-lang.com

pub mod error;
pub mod options;
pub mod parser;
pub mod renderer;

pub use crate::error::Error;
pub use crate::options::Options;

use nom::error::ErrorKind;
use nom::error::ParseError;
use nom::Err;
use nom::IResult;

/// A parser designed to work inside the `nom::sequence::delimited` parser,
/// e.g.:
/// ```
/// use nom::character::complete::char;
/// use parse_textile::take_until_unbalanced;
/// let i = "(orange (mocha) #frap)p. abc";
/// let mut parser = nom::sequence::delimited(char('('), take_until_unbalanced('(', ')'), char(')'));
/// assert_eq!(parser(i), Ok(("p. abc", "orange (mocha) #frap")));
/// ```
/// It consumes nested brackets until it finds the unbalanced closing
/// bracket, which is not consumed. Escaped brackets like `\(` and `\)`
/// are not counted. The attribute modifier parsers use this instead of
/// `nom::bytes::complete::take_until` so that a class list or style
/// declaration may itself contain bracket pairs.
pub fn take_until_unbalanced(
    opening_bracket: char,
    closing_bracket: char,
) -> impl Fn(&str) -> IResult<&str, &str> {
    move |i: &str| {
        let mut depth = 0;
        let mut chars = i.char_indices();
        while let Some((index, c)) = chars.next() {
            if c == '\\' {
                // The escaped character is not a bracket, whatever it is.
                chars.next();
            } else if c == opening_bracket {
                depth += 1;
            } else if c == closing_bracket {
                if depth == 0 {
                    return Ok((&i[index..], &i[..index]));
                }
                depth -= 1;
            }
        }
        if depth == 0 {
            Ok(("", i))
        } else {
            Err(Err::Error(nom::error::Error::from_error_kind(
                i,
                ErrorKind::TakeUntil,
            )))
        }
    }
}

/// The Textile transformer. Construct one, adjust its options, then feed
/// it documents:
///
/// ```
/// use parse_textile::Textile;
///
/// let mut textile = Textile::new();
/// assert_eq!(
///     textile.to_html("orange\nmocha").unwrap(),
///     "<p>orange<br />\nmocha</p>"
/// );
///
/// textile.set_line_wrap(false);
/// assert_eq!(
///     textile.to_html("orange\nmocha").unwrap(),
///     "<p>orange\nmocha</p>"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Textile {
    options: Options,
}

impl Textile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a transformer with the given options.
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Enables or disables the conversion of single newlines into
    /// `<br />`. Enabled by default.
    pub fn set_line_wrap(&mut self, enabled: bool) {
        self.options.line_wrap = enabled;
    }

    /// Converts one Textile document into HTML.
    pub fn to_html(&self, source: &str) -> Result<String, Error> {
        let document = parser::parse(source)?;
        renderer::render(&document, &self.options)
    }
}

/// Converts one Textile document into HTML with the default options.
pub fn textile_to_html(source: impl AsRef<str>) -> Result<String, Error> {
    Textile::new().to_html(source.as_ref())
}

/// Converts one Textile document into HTML with the given options.
pub fn textile_to_html_with_options(
    source: impl AsRef<str>,
    options: Options,
) -> Result<String, Error> {
    Textile::with_options(options).to_html(source.as_ref())
}
