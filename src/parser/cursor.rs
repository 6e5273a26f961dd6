//! Character cursor shared by the requirement and marker parsers

use crate::error::ParseError;

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `token` if the input continues with it
    pub(crate) fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Consume a bare word such as `and` only when it is not the prefix of a longer identifier
    pub(crate) fn eat_keyword(&mut self, word: &str) -> bool {
        let rest = self.rest();
        if !rest.starts_with(word) {
            return false;
        }
        match rest[word.len()..].chars().next() {
            Some(c) if is_identifier_char(c) => false,
            _ => {
                self.pos += word.len();
                true
            }
        }
    }

    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    /// Skip whitespace, returning whether any was skipped
    pub(crate) fn skip_ws(&mut self) -> bool {
        !self.take_while(char::is_whitespace).is_empty()
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.pos)
    }
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_and_rest() {
        let mut cursor = Cursor::new("==1.0");
        assert!(!cursor.eat("!="));
        assert!(cursor.eat("=="));
        assert_eq!(cursor.rest(), "1.0");
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn test_eat_keyword_respects_boundaries() {
        let mut cursor = Cursor::new("android");
        assert!(!cursor.eat_keyword("and"));
        let mut cursor = Cursor::new("and x");
        assert!(cursor.eat_keyword("and"));
        assert_eq!(cursor.rest(), " x");
        let mut cursor = Cursor::new("in'x'");
        assert!(cursor.eat_keyword("in"));
    }

    #[test]
    fn test_take_while_and_skip_ws() {
        let mut cursor = Cursor::new("abc  def");
        assert_eq!(cursor.take_while(|c| c.is_ascii_alphabetic()), "abc");
        assert!(cursor.skip_ws());
        assert!(!cursor.skip_ws());
        assert_eq!(cursor.bump(), Some('d'));
        cursor.reset(0);
        assert_eq!(cursor.peek(), Some('a'));
    }

    #[test]
    fn test_eof() {
        let mut cursor = Cursor::new("x");
        assert!(!cursor.is_eof());
        cursor.bump();
        assert!(cursor.is_eof());
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn test_error_carries_offset() {
        let mut cursor = Cursor::new("abc");
        cursor.bump();
        assert_eq!(cursor.error("boom").offset, 1);
    }
}
