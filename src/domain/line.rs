//! Raw lines of a pin file and their classification

use super::CandidatePin;
use serde::{Deserialize, Serialize};

/// End-of-line terminator of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// Final line without a terminator
    #[default]
    None,
}

impl LineEnding {
    /// The terminator bytes
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::None => "",
        }
    }

    /// Split a line (as produced by `split_inclusive('\n')`) into content and terminator
    pub fn split(line: &str) -> (&str, LineEnding) {
        if let Some(content) = line.strip_suffix("\r\n") {
            (content, LineEnding::CrLf)
        } else if let Some(content) = line.strip_suffix('\n') {
            (content, LineEnding::Lf)
        } else {
            (line, LineEnding::None)
        }
    }
}

/// One line of the input file, split into content and terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number
    pub number: usize,
    /// Line text without its terminator
    pub content: String,
    /// Terminator style
    pub ending: LineEnding,
}

impl RawLine {
    /// Build from a line that may still carry its terminator
    pub fn new(number: usize, line: &str) -> Self {
        let (content, ending) = LineEnding::split(line);
        Self {
            number,
            content: content.to_string(),
            ending,
        }
    }

    /// The exact bytes of the line, terminator included
    pub fn to_text(&self) -> String {
        format!("{}{}", self.content, self.ending.as_str())
    }
}

/// Classification of a single line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Blank, comment, option, unparsable, or not a single `==` pin
    PassThrough,
    /// A pinned requirement eligible for update
    Candidate(CandidatePin),
}

impl LineKind {
    /// Returns true for candidate lines
    pub fn is_candidate(&self) -> bool {
        matches!(self, LineKind::Candidate(_))
    }

    /// The pin, for candidate lines
    pub fn as_candidate(&self) -> Option<&CandidatePin> {
        match self {
            LineKind::Candidate(pin) => Some(pin),
            LineKind::PassThrough => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_endings() {
        assert_eq!(LineEnding::split("a\n"), ("a", LineEnding::Lf));
        assert_eq!(LineEnding::split("a\r\n"), ("a", LineEnding::CrLf));
        assert_eq!(LineEnding::split("a"), ("a", LineEnding::None));
        assert_eq!(LineEnding::split("\n"), ("", LineEnding::Lf));
    }

    #[test]
    fn test_lone_carriage_return_stays_in_content() {
        let line = RawLine::new(1, "a\r");
        assert_eq!(line.content, "a\r");
        assert_eq!(line.ending, LineEnding::None);
        assert_eq!(line.to_text(), "a\r");
    }

    #[test]
    fn test_raw_line_round_trip() {
        for text in ["flask==1.0\n", "  # note\r\n", "", "last"] {
            assert_eq!(RawLine::new(3, text).to_text(), text);
        }
    }

    #[test]
    fn test_line_kind_pass_through() {
        let kind = LineKind::PassThrough;
        assert!(!kind.is_candidate());
        assert!(kind.as_candidate().is_none());
    }
}
