// stylegate-core/src/parser.rs
//! Tokenizes the text of a `style` attribute into an ordered list of declarations.
//!
//! The parser is declaration-only: anything else inside the attribute (at-rules,
//! nested blocks, a property without a colon) rejects the whole input. So do
//! values holding a broken string or `url(` token, a string cut off by the end of
//! input, or a dangling backslash. The sanitizer treats that rejection as "emit
//! nothing".
//!
//! Property names and values are returned as slices of the source text, never as
//! cssparser's unescaped form.
//!
//! License: MIT OR Apache-2.0

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, Parser,
    ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, Token,
};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::StyleParseError;

static IMPORTANT_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*!\s*important\s*$").expect("important pattern is a valid regex")
});

/// A single `property: value` pair as written in the style attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name exactly as written, escapes included.
    pub property: String,
    /// Raw value text, trimmed, without a trailing `!important`.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

/// Splits a trailing `!important` off a raw value.
fn split_important_tail(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    match IMPORTANT_TAIL.find(trimmed) {
        Some(found) => (trimmed[..found.start()].trim_end().to_owned(), true),
        None => (trimmed.to_owned(), false),
    }
}

/// Whether a raw quoted-string token is closed by its opening quote.
fn is_terminated_string(raw: &str) -> bool {
    let Some(quote) = raw.chars().next() else {
        return false;
    };
    let Some(body) = raw[quote.len_utf8()..].strip_suffix(quote) else {
        return false;
    };
    body.chars().rev().take_while(|c| *c == '\\').count() % 2 == 0
}

/// An odd run of backslashes at the end escapes nothing.
fn ends_with_dangling_escape(raw: &str) -> bool {
    raw.trim_end().chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Walks a value, descending into blocks, and rejects tokens that were recovered
/// from malformed input.
fn check_value_tokens<'i>(input: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    loop {
        let token_start = input.position();
        let (malformed, quoted, nested) = match input.next_including_whitespace_and_comments() {
            Ok(token) => (
                matches!(token, Token::BadString(_) | Token::BadUrl(_)),
                matches!(token, Token::QuotedString(_)),
                matches!(
                    token,
                    Token::Function(_)
                        | Token::ParenthesisBlock
                        | Token::SquareBracketBlock
                        | Token::CurlyBracketBlock
                ),
            ),
            Err(_) => return Ok(()),
        };
        if malformed || (quoted && !is_terminated_string(input.slice_from(token_start))) {
            return Err(input.new_custom_error(()));
        }
        if nested {
            input.parse_nested_block(check_value_tokens)?;
        }
    }
}

/// Item parser that only ever produces declarations.
struct StyleAttributeParser;

impl<'i> DeclarationParser<'i> for StyleAttributeParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        // Everything between the declaration start and the value is `name :`.
        let head = input.slice(declaration_start.position()..start);
        let property = head.strip_suffix(':').unwrap_or(head).trim_end().to_owned();

        check_value_tokens(input)?;
        let raw = input.slice_from(start);
        if ends_with_dangling_escape(raw) {
            return Err(input.new_custom_error(()));
        }
        let (value, important) = split_important_tail(raw);
        Ok(Declaration {
            property,
            value,
            important,
        })
    }
}

impl<'i> AtRuleParser<'i> for StyleAttributeParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name)))
    }
}

impl<'i> QualifiedRuleParser<'i> for StyleAttributeParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for StyleAttributeParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parses the declarations of a style attribute, in source order.
///
/// Trailing semicolons, whitespace and comments are accepted. Empty input yields
/// an empty list.
///
/// # Errors
///
/// Returns [`StyleParseError::InvalidDeclaration`] for the first item that is not
/// a well-formed declaration. No partial result is returned.
pub fn parse_declarations(style: &str) -> Result<Vec<Declaration>, StyleParseError> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut item_parser = StyleAttributeParser;

    let mut declarations = Vec::new();
    for item in RuleBodyParser::new(&mut parser, &mut item_parser) {
        match item {
            Ok(declaration) => declarations.push(declaration),
            Err((error, snippet)) => {
                debug!(
                    target: "stylegate_core::parser",
                    "Rejecting style attribute at {}:{}.",
                    error.location.line, error.location.column
                );
                return Err(StyleParseError::InvalidDeclaration {
                    line: error.location.line,
                    column: error.location.column,
                    snippet: snippet.to_string(),
                });
            }
        }
    }
    Ok(declarations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(property: &str, value: &str) -> Declaration {
        Declaration {
            property: property.to_string(),
            value: value.to_string(),
            important: false,
        }
    }

    #[test]
    fn test_parses_declarations_in_order() {
        let parsed = parse_declarations("color: red; text-align: center;").unwrap();
        assert_eq!(parsed, vec![decl("color", "red"), decl("text-align", "center")]);
    }

    #[test]
    fn test_keeps_original_casing_and_inner_spacing() {
        let parsed = parse_declarations("aLiGn-cOntEnt:  cEntEr ;").unwrap();
        assert_eq!(parsed, vec![decl("aLiGn-cOntEnt", "cEntEr")]);

        let parsed = parse_declarations("animation: mymove 5s  infinite;").unwrap();
        assert_eq!(parsed, vec![decl("animation", "mymove 5s  infinite")]);
    }

    #[test]
    fn test_important_is_split_off() {
        let parsed = parse_declarations("color: red !IMPORTANT;").unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].value, "red");
        assert!(parsed[0].important);
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(parse_declarations("").unwrap().is_empty());
        assert!(parse_declarations(" ; ;").unwrap().is_empty());
    }

    #[test]
    fn test_functions_stay_inside_the_value() {
        let parsed =
            parse_declarations("background: url('https://img_tree.gif') no-repeat; z-index: 1;")
                .unwrap();
        assert_eq!(parsed[0].value, "url('https://img_tree.gif') no-repeat");
        assert_eq!(parsed[1], decl("z-index", "1"));
    }

    #[test]
    fn test_missing_colon_fails_the_whole_input() {
        let err = parse_declarations("color: red; garbage; width: 1px;").unwrap_err();
        assert!(matches!(err, StyleParseError::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_escaped_property_name_is_kept_raw() {
        let parsed = parse_declarations(r"c\6flor: red; text-align : left").unwrap();
        assert_eq!(
            parsed,
            vec![decl(r"c\6flor", "red"), decl("text-align", "left")]
        );
    }

    #[test]
    fn test_unterminated_string_fails_the_whole_input() {
        assert!(parse_declarations("color: \"unterminated").is_err());
        assert!(parse_declarations("color: 'a\\'").is_err());
        assert!(parse_declarations("content: 'a\nb'; color: red").is_err());
        assert!(parse_declarations("background: url(\"https://a.png)").is_err());
        assert!(parse_declarations("content: 'a\\'b'; color: red").is_ok());
    }

    #[test]
    fn test_bad_url_fails_the_whole_input() {
        assert!(parse_declarations("background: url(https://a b.png); color: red").is_err());
    }

    #[test]
    fn test_dangling_backslash_fails_the_whole_input() {
        assert!(parse_declarations("color: \\").is_err());
        assert!(parse_declarations("color: red\\\\").is_ok());
    }

    #[test]
    fn test_at_rule_fails_the_whole_input() {
        assert!(parse_declarations("@import url(evil.css); color: red;").is_err());
    }
}
