//! PEP 508 environment marker validation
//!
//! Markers are never evaluated. A marker only has to be well formed for
//! its line to stay a candidate; its text is then carried through verbatim.

use super::cursor::{is_identifier_char, Cursor};
use crate::error::ParseError;

const MARKER_VARIABLES: &[&str] = &[
    "implementation_name",
    "implementation_version",
    "os_name",
    "platform_machine",
    "platform_release",
    "platform_system",
    "platform_version",
    "python_full_version",
    "platform_python_implementation",
    "python_version",
    "sys_platform",
    "extra",
    "dependency_groups",
    // Legacy dotted spellings still accepted by pip
    "os.name",
    "sys.platform",
    "platform.version",
    "platform.machine",
    "platform.python_implementation",
    "python_implementation",
];

/// Comparison operators, longest first
const MARKER_OPS: &[&str] = &["===", "==", "~=", "!=", "<=", ">=", "<", ">"];

/// Validate a complete marker expression
pub fn validate_marker(marker: &str) -> Result<(), ParseError> {
    let mut cursor = Cursor::new(marker);
    cursor.skip_ws();
    parse_or(&mut cursor)?;
    cursor.skip_ws();
    if cursor.is_eof() {
        Ok(())
    } else {
        Err(cursor.error("unexpected text after marker"))
    }
}

fn parse_or(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    parse_and(cursor)?;
    loop {
        let save = cursor.pos();
        cursor.skip_ws();
        if cursor.eat_keyword("or") {
            cursor.skip_ws();
            parse_and(cursor)?;
        } else {
            cursor.reset(save);
            return Ok(());
        }
    }
}

fn parse_and(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    parse_atom(cursor)?;
    loop {
        let save = cursor.pos();
        cursor.skip_ws();
        if cursor.eat_keyword("and") {
            cursor.skip_ws();
            parse_atom(cursor)?;
        } else {
            cursor.reset(save);
            return Ok(());
        }
    }
}

fn parse_atom(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    if cursor.eat("(") {
        cursor.skip_ws();
        parse_or(cursor)?;
        cursor.skip_ws();
        if !cursor.eat(")") {
            return Err(cursor.error("expected ')' to close marker group"));
        }
        return Ok(());
    }
    parse_value(cursor)?;
    cursor.skip_ws();
    parse_op(cursor)?;
    cursor.skip_ws();
    parse_value(cursor)
}

fn parse_value(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    match cursor.peek() {
        Some(quote @ ('\'' | '"')) => {
            cursor.bump();
            cursor.take_while(|c| c != quote);
            if cursor.bump() != Some(quote) {
                return Err(cursor.error("unterminated string in marker"));
            }
            Ok(())
        }
        _ => {
            let start = cursor.pos();
            let word = cursor.take_while(is_identifier_char);
            if MARKER_VARIABLES.contains(&word) {
                Ok(())
            } else {
                cursor.reset(start);
                Err(cursor.error(format!("unknown marker variable '{}'", word)))
            }
        }
    }
}

fn parse_op(cursor: &mut Cursor<'_>) -> Result<(), ParseError> {
    if MARKER_OPS.iter().any(|op| cursor.eat(op)) || cursor.eat_keyword("in") {
        return Ok(());
    }
    let save = cursor.pos();
    if cursor.eat_keyword("not") && cursor.skip_ws() && cursor.eat_keyword("in") {
        return Ok(());
    }
    cursor.reset(save);
    Err(cursor.error("expected marker operator"))
}
