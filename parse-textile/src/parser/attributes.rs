//! Parsers for the attribute modifiers that may follow a block signature:
//! `(class1 class2 #id)`, `{style}` and `[lang]`, in any order.

use crate::parser::Attributes;
use crate::take_until_unbalanced;
use nom::branch::alt;
use nom::character::complete::char;
use nom::combinator::verify;
use nom::multi::many0;
use nom::sequence::delimited;
use nom::IResult;

#[derive(Debug)]
enum AttrField {
    ClassesId(Vec<String>, Option<String>),
    Style(String),
    Lang(String),
}

/// `(orange mocha #frap)`: whitespace separated class names, `#` starts
/// the element id. A `#` glued to a class name splits it, so
/// `(orange#frap)` gives one class and the id.
fn classes_id(i: &str) -> IResult<&str, AttrField> {
    let (i, body) = verify(
        delimited(char('('), take_until_unbalanced('(', ')'), char(')')),
        |s: &str| !s.is_empty(),
    )(i)?;
    let mut classes = Vec::new();
    let mut id = None;
    for word in body.split_whitespace() {
        match word.split_once('#') {
            Some((class, rest)) => {
                if !class.is_empty() {
                    classes.push(class.to_string());
                }
                if !rest.is_empty() {
                    id = Some(rest.to_string());
                }
            }
            None => classes.push(word.to_string()),
        }
    }
    Ok((i, AttrField::ClassesId(classes, id)))
}

/// `{color: orange}`: the braces' content becomes the `style` attribute.
fn style(i: &str) -> IResult<&str, AttrField> {
    let (i, body) = verify(
        delimited(char('{'), take_until_unbalanced('{', '}'), char('}')),
        |s: &str| !s.is_empty(),
    )(i)?;
    Ok((i, AttrField::Style(body.to_string())))
}

/// `[en]`: the brackets' content becomes the `lang` attribute.
fn lang(i: &str) -> IResult<&str, AttrField> {
    let (i, body) = verify(
        delimited(char('['), take_until_unbalanced('[', ']'), char(']')),
        |s: &str| !s.is_empty(),
    )(i)?;
    Ok((i, AttrField::Lang(body.to_string())))
}

/// Collects any run of attribute modifiers. Later occurrences of the
/// same modifier kind overwrite earlier ones.
pub fn attributes(i: &str) -> IResult<&str, Attributes> {
    let (i, fields) = many0(alt((classes_id, style, lang)))(i)?;
    let mut attrs = Attributes::new();
    for field in fields {
        match field {
            AttrField::ClassesId(classes, id) => {
                attrs.classes = classes;
                attrs.id = id;
            }
            AttrField::Style(declaration) => attrs.style = Some(declaration),
            AttrField::Lang(code) => attrs.lang = Some(code),
        }
    }
    Ok((i, attrs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_only() {
        let (_, attrs) = attributes("(orange mocha)").unwrap();
        assert_eq!(attrs.classes, vec!["orange", "mocha"]);
        assert_eq!(attrs.id, None);
        assert_eq!(attrs.style, None);
    }

    #[test]
    fn id_only() {
        let (_, attrs) = attributes("(#frap)").unwrap();
        assert!(attrs.classes.is_empty());
        assert_eq!(attrs.id, Some("frap".to_string()));
        assert_eq!(attrs.style, None);
    }

    #[test]
    fn classes_and_id() {
        let (_, attrs) = attributes("(orange mocha #frap)").unwrap();
        assert_eq!(attrs.classes, vec!["orange", "mocha"]);
        assert_eq!(attrs.id, Some("frap".to_string()));
        assert_eq!(attrs.style, None);
    }

    #[test]
    fn glued_class_and_id() {
        let (_, attrs) = attributes("(orange#frap)").unwrap();
        assert_eq!(attrs.classes, vec!["orange"]);
        assert_eq!(attrs.id, Some("frap".to_string()));
    }

    #[test]
    fn style_only() {
        let (_, attrs) = attributes("{color: orange}").unwrap();
        assert!(attrs.classes.is_empty());
        assert_eq!(attrs.id, None);
        assert_eq!(attrs.style, Some("color: orange".to_string()));
    }

    #[test]
    fn style_then_classes() {
        let (_, attrs) = attributes("{color: orange}(mocha)").unwrap();
        assert_eq!(attrs.classes, vec!["mocha"]);
        assert_eq!(attrs.id, None);
        assert_eq!(attrs.style, Some("color: orange".to_string()));
    }

    #[test]
    fn classes_then_style() {
        let (_, attrs) = attributes("(mocha){color: orange}").unwrap();
        assert_eq!(attrs.classes, vec!["mocha"]);
        assert_eq!(attrs.id, None);
        assert_eq!(attrs.style, Some("color: orange".to_string()));
    }

    #[test]
    fn lang_modifier() {
        let (_, attrs) = attributes("[fi]").unwrap();
        assert_eq!(attrs.lang, Some("fi".to_string()));
    }

    #[test]
    fn all_three_kinds() {
        let (rest, attrs) = attributes("(mocha #frap){color: orange}[fi]. tail").unwrap();
        assert_eq!(rest, ". tail");
        assert_eq!(attrs.classes, vec!["mocha"]);
        assert_eq!(attrs.id, Some("frap".to_string()));
        assert_eq!(attrs.style, Some("color: orange".to_string()));
        assert_eq!(attrs.lang, Some("fi".to_string()));
    }

    #[test]
    fn no_modifiers_is_fine() {
        let (rest, attrs) = attributes(". tail").unwrap();
        assert_eq!(rest, ". tail");
        assert_eq!(attrs, Attributes::new());
    }

    #[test]
    fn empty_pair_is_not_a_modifier() {
        let (rest, attrs) = attributes("()").unwrap();
        assert_eq!(rest, "()");
        assert_eq!(attrs, Attributes::new());
    }
}
