//! Minimal stylesheet reader.
//!
//! Only plain style rules survive. Declaration values are kept as raw source
//! text so that string quoting and backslash escapes can be decoded by
//! [`crate::code`] rather than by the tokenizer.

use cssparser::{BasicParseError, Delimiter, ParseError, Parser, ParserInput, ToCss, Token};
use log::{debug, warn};

/// One `property: value` pair of a rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name exactly as written, e.g. `--fa`.
    pub property: String,
    /// Raw value text, without the terminating `;` or `!important`.
    pub value: String,
    /// Whether the declaration was marked `!important`.
    pub important: bool,
}

/// A selector list together with its declarations, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleRule {
    /// Comma-separated selectors, each trimmed, e.g. `.fa-gear`.
    pub selectors: Vec<String>,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl StyleRule {
    /// Whether any selector is exactly `selector`.
    pub fn selects(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }

    /// First declaration named exactly `property`.
    pub fn declaration(&self, property: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.property == property)
    }
}

type RuleResult<'i, T> = Result<T, ParseError<'i, ()>>;

/// Parse stylesheet text into its top-level style rules.
///
/// At-rules are skipped along with their blocks. Malformed rules are
/// dropped; this never fails.
pub fn parse_stylesheet(css: &str) -> Vec<StyleRule> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = Vec::new();

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        let start = parser.position();
        match parse_rule(&mut parser) {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err(err) => {
                warn!("skipping malformed rule at {:?}: {:?}", start, err.kind);
                skip_past_block(&mut parser);
            }
        }
    }

    debug!("parsed {} style rules", rules.len());
    rules
}

fn skip_past_block(parser: &mut Parser<'_, '_>) {
    while let Ok(token) = parser.next() {
        if let Token::CurlyBracketBlock = token {
            let _: RuleResult<'_, ()> = parser.parse_nested_block(|_| Ok(()));
            break;
        }
    }
}

fn parse_rule<'i>(parser: &mut Parser<'i, '_>) -> RuleResult<'i, Option<StyleRule>> {
    let at_rule = parser
        .try_parse(|p| match p.next_including_whitespace()? {
            Token::AtKeyword(kw) => Ok(kw.to_string()),
            _ => Err(p.new_error_for_next_token::<()>()),
        })
        .ok();

    if let Some(keyword) = at_rule {
        debug!("skipping @{keyword} rule");
        loop {
            match parser.next() {
                Ok(Token::CurlyBracketBlock) => {
                    let _: RuleResult<'_, ()> = parser.parse_nested_block(|_| Ok(()));
                    break;
                }
                Ok(Token::Semicolon) | Err(_) => break,
                Ok(_) => continue,
            }
        }
        return Ok(None);
    }

    let selectors = parser.parse_until_before(Delimiter::CurlyBracketBlock, |p| {
        let mut selectors = Vec::new();
        let mut current = String::new();
        write_selector_tokens(p, &mut current, Some(&mut selectors));
        selectors.push(current);
        Ok::<_, ParseError<'i, ()>>(selectors)
    })?;

    let selectors = selectors
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    parser.expect_curly_bracket_block()?;
    let declarations =
        parser.parse_nested_block(|p| Ok::<_, ParseError<'i, ()>>(parse_declaration_list(p)))?;

    Ok(Some(StyleRule {
        selectors,
        declarations,
    }))
}

/// Re-serialize prelude tokens into `current`, dropping comments and
/// collapsing whitespace. With `split` set, top-level commas end the current
/// selector and move it there.
fn write_selector_tokens(
    parser: &mut Parser<'_, '_>,
    current: &mut String,
    mut split: Option<&mut Vec<String>>,
) {
    while let Ok(token) = parser.next_including_whitespace().cloned() {
        match token {
            Token::Comma => match split.as_deref_mut() {
                Some(selectors) => selectors.push(std::mem::take(current)),
                None => current.push(','),
            },
            Token::WhiteSpace(_) => {
                if !current.is_empty() && !current.ends_with(' ') {
                    current.push(' ');
                }
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let close = if token == Token::SquareBracketBlock { ']' } else { ')' };
                current.push_str(&token.to_css_string());
                let _: RuleResult<'_, ()> = parser.parse_nested_block(|p| {
                    write_selector_tokens(p, current, None);
                    Ok(())
                });
                current.push(close);
            }
            _ => current.push_str(&token.to_css_string()),
        }
    }
}

/// Parse the body of a rule. Malformed declarations are skipped up to the
/// next `;`.
fn parse_declaration_list(parser: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }

        match parse_declaration(parser) {
            Ok(declaration) => declarations.push(declaration),
            Err(err) => {
                debug!("skipping malformed declaration: {:?}", err.kind);
                while !matches!(parser.next(), Ok(Token::Semicolon) | Err(_)) {}
            }
        }
    }

    declarations
}

fn parse_declaration<'i>(parser: &mut Parser<'i, '_>) -> Result<Declaration, BasicParseError<'i>> {
    let property = parser.expect_ident()?.to_string();
    parser.expect_colon()?;

    let value_start = parser.position();
    let mut important = false;

    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => break,
            Ok(Token::Delim('!')) => {
                if parser.try_parse(|p| p.expect_ident_matching("important")).is_ok() {
                    important = true;
                }
            }
            Ok(Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock) => {
                let _: RuleResult<'_, ()> = parser.parse_nested_block(|p| {
                    while p.next().is_ok() {}
                    Ok(())
                });
            }
            Ok(_) => {}
        }
    }

    let mut value = parser.slice_from(value_start).trim();
    value = value.strip_suffix(';').unwrap_or(value).trim_end();
    if important {
        value = value.strip_suffix("important").unwrap_or(value).trim_end();
        value = value.strip_suffix('!').unwrap_or(value).trim_end();
    }

    Ok(Declaration {
        property,
        value: value.to_owned(),
        important,
    })
}
