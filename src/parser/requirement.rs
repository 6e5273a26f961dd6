//! Requirement specifier grammar
//!
//! Handles the PEP 508 forms found in pin files:
//! - `name`
//! - `name[extra1,extra2]`
//! - `name==1.0`, `name>=1.0,<2`, `name (==1.0)`
//! - `name @ https://...`
//! - any of the above followed by `; <marker>`

use super::cursor::Cursor;
use super::marker::validate_marker;
use crate::error::ParseError;
use crate::version::Version;
use std::fmt;

/// Version comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `~=`
    Compatible,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `===`
    Arbitrary,
}

impl Operator {
    /// Longest spellings first so `===` wins over `==`
    const ALL: [(&'static str, Operator); 8] = [
        ("===", Operator::Arbitrary),
        ("==", Operator::Equal),
        ("~=", Operator::Compatible),
        ("!=", Operator::NotEqual),
        ("<=", Operator::LessEqual),
        (">=", Operator::GreaterEqual),
        ("<", Operator::Less),
        (">", Operator::Greater),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Compatible => "~=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::Arbitrary => "===",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single version constraint such as `>=1.2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub op: Operator,
    pub version: String,
}

impl Specifier {
    fn validate(&self, offset: usize) -> Result<(), ParseError> {
        let invalid = || {
            ParseError::new(
                format!("invalid version '{}' for '{}'", self.version, self.op),
                offset,
            )
        };
        match self.op {
            Operator::Arbitrary => {
                if self.version.is_empty() {
                    return Err(invalid());
                }
            }
            Operator::Equal | Operator::NotEqual => {
                // `==1.4.*` prefix matching; the prefix itself takes no local label
                if let Some(prefix) = self.version.strip_suffix(".*") {
                    let prefix = Version::parse(prefix).map_err(|_| invalid())?;
                    if !prefix.local.is_empty() {
                        return Err(invalid());
                    }
                } else {
                    Version::parse(&self.version).map_err(|_| invalid())?;
                }
            }
            Operator::Compatible => {
                let version = Version::parse(&self.version).map_err(|_| invalid())?;
                if version.release.len() < 2 || !version.local.is_empty() {
                    return Err(invalid());
                }
            }
            Operator::LessEqual | Operator::GreaterEqual | Operator::Less | Operator::Greater => {
                let version = Version::parse(&self.version).map_err(|_| invalid())?;
                if !version.local.is_empty() {
                    return Err(invalid());
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// A successfully parsed requirement specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSpecifier {
    /// Name as written
    pub name: String,
    /// Extras in the order written
    pub extras: Vec<String>,
    /// Direct reference for `name @ url`
    pub url: Option<String>,
    pub specifiers: Vec<Specifier>,
    /// Marker text, trimmed
    pub marker: Option<String>,
}

impl ParsedSpecifier {
    /// The pinned version, when this is exactly one `==` on a concrete version
    pub fn exact_pin(&self) -> Option<Version> {
        if self.url.is_some() {
            return None;
        }
        match self.specifiers.as_slice() {
            [spec] if spec.op == Operator::Equal => Version::parse(&spec.version).ok(),
            _ => None,
        }
    }
}

/// Parse a trimmed requirement expression
pub fn parse_requirement(input: &str) -> Result<ParsedSpecifier, ParseError> {
    let mut cursor = Cursor::new(input);
    cursor.skip_ws();

    let name = parse_identifier(&mut cursor, "package name")?.to_string();
    cursor.skip_ws();
    let extras = parse_extras(&mut cursor)?;
    cursor.skip_ws();

    let mut url = None;
    let mut specifiers = Vec::new();

    if cursor.eat("@") {
        cursor.skip_ws();
        let reference = cursor.take_while(|c| !c.is_whitespace());
        if reference.is_empty() {
            return Err(cursor.error("expected URL after '@'"));
        }
        url = Some(reference.to_string());
        // `name @ url;marker` is ambiguous with URLs containing ';'
        let had_ws = cursor.skip_ws();
        if !cursor.is_eof() && !had_ws {
            return Err(cursor.error("expected whitespace after URL"));
        }
    } else {
        specifiers = parse_version_spec(&mut cursor)?;
        cursor.skip_ws();
    }

    let mut marker = None;
    if cursor.eat(";") {
        let text = cursor.rest().trim();
        validate_marker(text).map_err(|e| ParseError::new(e.message, cursor.pos() + e.offset))?;
        marker = Some(text.to_string());
        cursor.reset(input.len());
    }

    cursor.skip_ws();
    if !cursor.is_eof() {
        return Err(cursor.error("unexpected text in requirement"));
    }

    Ok(ParsedSpecifier {
        name,
        extras,
        url,
        specifiers,
        marker,
    })
}

/// `[A-Za-z0-9]` optionally followed by `[A-Za-z0-9._-]*[A-Za-z0-9]`
fn parse_identifier<'a>(cursor: &mut Cursor<'a>, what: &str) -> Result<&'a str, ParseError> {
    let start = cursor.pos();
    let ident = cursor.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    let valid = ident.starts_with(|c: char| c.is_ascii_alphanumeric())
        && ident.ends_with(|c: char| c.is_ascii_alphanumeric());
    if valid {
        Ok(ident)
    } else {
        cursor.reset(start);
        Err(cursor.error(format!("expected {}", what)))
    }
}

fn parse_extras(cursor: &mut Cursor<'_>) -> Result<Vec<String>, ParseError> {
    let mut extras = Vec::new();
    if !cursor.eat("[") {
        return Ok(extras);
    }
    cursor.skip_ws();
    if cursor.eat("]") {
        return Ok(extras);
    }
    loop {
        extras.push(parse_identifier(cursor, "extra name")?.to_string());
        cursor.skip_ws();
        if cursor.eat("]") {
            return Ok(extras);
        }
        if !cursor.eat(",") {
            return Err(cursor.error("expected ',' or ']' in extras"));
        }
        cursor.skip_ws();
    }
}

fn parse_version_spec(cursor: &mut Cursor<'_>) -> Result<Vec<Specifier>, ParseError> {
    if cursor.eat("(") {
        cursor.skip_ws();
        let specifiers = parse_specifier_list(cursor)?;
        cursor.skip_ws();
        if !cursor.eat(")") {
            return Err(cursor.error("expected ')' after version specifier"));
        }
        return Ok(specifiers);
    }
    parse_specifier_list(cursor)
}

fn parse_specifier_list(cursor: &mut Cursor<'_>) -> Result<Vec<Specifier>, ParseError> {
    let mut specifiers = Vec::new();
    while let Some(op) = parse_operator(cursor) {
        cursor.skip_ws();
        let offset = cursor.pos();
        let version = cursor.take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ';' | ')'));
        let specifier = Specifier {
            op,
            version: version.to_string(),
        };
        specifier.validate(offset)?;
        specifiers.push(specifier);

        cursor.skip_ws();
        if !cursor.eat(",") {
            break;
        }
        cursor.skip_ws();
    }
    Ok(specifiers)
}

fn parse_operator(cursor: &mut Cursor<'_>) -> Option<Operator> {
    Operator::ALL
        .iter()
        .find(|(token, _)| cursor.eat(token))
        .map(|&(_, op)| op)
}
