//! Selector text to steps.
//!
//! A selector is a whitespace separated list of steps. Each step combines an
//! optional tag name, an optional `#id`, any number of `.class` requirements
//! and any number of `[attr]`, `[attr=value]`, `[attr~=word]` or
//! `[attr|=prefix]` predicates, in that order of appearance:
//!
//! ```text
//! selector := step (WS step)*
//! step     := tag? ('#' ident)? ('.' ident)* attr*
//! attr     := '[' name (('=' | '~=' | '|=') value)? ']'
//! ```
//!
//! Lexing is done by `cssparser`; this module turns its tokens into a flat
//! stream of typed `Token`s and then groups them into `Step`s.

use crate::error::{Error, Result};
use cssparser::{
    BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, SourceLocation,
    Token as CssToken,
};
use std::fmt;
use std::mem;
use std::str::FromStr;

/// One unit of selector syntax.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A lowercased tag name, or `*`.
    Tag(String),
    Id(String),
    Class(String),
    Attr(AttrPredicate),
    /// Whitespace between two steps.
    StepBoundary,
}

/// How an attribute value is compared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrMatch {
    /// `[name]`: the attribute only has to exist.
    Present,
    /// `[name=value]`
    Exact(String),
    /// `[name~=value]`: value is one of the whitespace separated words.
    Word(String),
    /// `[name|=value]`: value equals the attribute or is followed by `-` in it.
    Prefix(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrPredicate {
    pub name: String,
    pub matcher: AttrMatch,
}

/// A single descendant step. An empty tag means any element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrPredicate>,
}

/// A parsed selector: the steps to apply left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// Parses selector text. Empty or blank text gives a selector with no steps.
    pub fn parse(selector: &str) -> Result<Selector> {
        let mut steps = vec![];
        let mut step = Step::default();
        let mut open = false;

        for token in tokenize(selector)? {
            match token {
                Token::StepBoundary => {
                    if open {
                        steps.push(mem::take(&mut step));
                        open = false;
                    }
                    continue;
                }
                Token::Tag(tag) => step.tag = Some(tag).filter(|tag| tag != "*"),
                Token::Id(id) => step.id = Some(id),
                Token::Class(class) => step.classes.push(class),
                Token::Attr(attr) => step.attrs.push(attr),
            }
            open = true;
        }

        if open {
            steps.push(step);
        }

        Ok(Selector { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Selector> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tag, &self.id, self.classes.is_empty() && self.attrs.is_empty()) {
            (Some(tag), _, _) => f.write_str(tag)?,
            (None, None, true) => f.write_str("*")?,
            _ => {}
        }
        if let Some(ref id) = self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for attr in &self.attrs {
            match attr.matcher {
                AttrMatch::Present => write!(f, "[{}]", attr.name)?,
                AttrMatch::Exact(ref value) => write!(f, "[{}={:?}]", attr.name, value)?,
                AttrMatch::Word(ref value) => write!(f, "[{}~={:?}]", attr.name, value)?,
                AttrMatch::Prefix(ref value) => write!(f, "[{}|={:?}]", attr.name, value)?,
            }
        }
        Ok(())
    }
}

/// Splits selector text into typed tokens.
pub fn tokenize(selector: &str) -> Result<Vec<Token>> {
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);
    let mut tokens = vec![];

    // What the current step already holds.
    let mut in_step = false;
    let mut has_id = false;

    loop {
        let location = parser.current_source_location();
        let start = parser.position();
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let source = parser.slice_from(start);

        let token = match token {
            CssToken::WhiteSpace(_) => {
                if in_step {
                    tokens.push(Token::StepBoundary);
                }
                in_step = false;
                has_id = false;
                continue;
            }

            CssToken::Ident(ref name) if !in_step => Token::Tag(name.to_ascii_lowercase()),
            CssToken::Delim('*') if !in_step => Token::Tag("*".to_string()),

            CssToken::IDHash(ref id) | CssToken::Hash(ref id) => {
                if has_id {
                    return Err(error(selector, location, "a step can hold only one id"));
                }
                has_id = true;
                Token::Id(id.to_string())
            }

            // `.2col` lexes as one number token.
            CssToken::Number { .. } | CssToken::Dimension { .. } if source.starts_with('.') => {
                Token::Class(source[1..].to_string())
            }

            CssToken::Delim('.') => {
                let start = parser.position();
                match parser.next_including_whitespace().map(|token| token.clone()) {
                    Ok(CssToken::Ident(class)) => Token::Class(class.to_string()),
                    Ok(CssToken::Number { .. }) | Ok(CssToken::Dimension { .. }) => {
                        Token::Class(parser.slice_from(start).to_string())
                    }
                    _ => return Err(error(selector, location, "expected a class name after '.'")),
                }
            }

            CssToken::SquareBracketBlock => {
                let attr = parser
                    .parse_nested_block(parse_attribute)
                    .map_err(|err| parse_error(selector, err))?;
                Token::Attr(attr)
            }

            other => {
                return Err(error(
                    selector,
                    location,
                    &format!("unsupported selector syntax {:?}", other),
                ))
            }
        };

        in_step = true;
        tokens.push(token);
    }

    if tokens.last() == Some(&Token::StepBoundary) {
        tokens.pop();
    }

    Ok(tokens)
}

fn parse_attribute<'i, 't>(
    parser: &mut Parser<'i, 't>,
) -> std::result::Result<AttrPredicate, ParseError<'i, String>> {
    let name = match parser.next()?.clone() {
        CssToken::Ident(name) => name.to_ascii_lowercase(),
        other => return Err(parser.new_unexpected_token_error(other)),
    };

    if parser.is_exhausted() {
        return Ok(AttrPredicate {
            name,
            matcher: AttrMatch::Present,
        });
    }

    let matcher: fn(String) -> AttrMatch = match parser.next()?.clone() {
        CssToken::Delim('=') => AttrMatch::Exact,
        CssToken::IncludeMatch => AttrMatch::Word,
        CssToken::DashMatch => AttrMatch::Prefix,
        other => return Err(parser.new_unexpected_token_error(other)),
    };

    // A quoted value is taken as written. Anything else up to `]` is the raw
    // source text, so `#top` or `/more` need no quotes.
    let start = parser.position();
    let value = match parser.next()?.clone() {
        CssToken::QuotedString(value) => {
            parser.expect_exhausted()?;
            value.to_string()
        }
        CssToken::Ident(ref value) if parser.is_exhausted() => value.to_string(),
        _ => {
            while parser.next().is_ok() {}
            parser.slice_from(start).trim().to_string()
        }
    };

    Ok(AttrPredicate {
        name,
        matcher: matcher(value),
    })
}

fn error(selector: &str, location: SourceLocation, reason: &str) -> Error {
    Error::Selector {
        selector: selector.to_string(),
        column: location.column,
        reason: reason.to_string(),
    }
}

fn parse_error(selector: &str, err: ParseError<'_, String>) -> Error {
    let reason = match err.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(ref token)) => {
            format!("unexpected {:?} in attribute selector", token)
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unterminated attribute selector".to_string()
        }
        ParseErrorKind::Basic(ref other) => format!("{:?}", other),
        ParseErrorKind::Custom(ref reason) => reason.clone(),
    };

    error(selector, err.location, &reason)
}
