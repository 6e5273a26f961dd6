//! Line classification and pin extraction
//!
//! A line is a candidate only when its requirement part parses and carries
//! exactly one `==` constraint on a concrete version. Everything else,
//! including lines that fail to parse, passes through untouched.

use super::requirement::{parse_requirement, ParsedSpecifier};
use crate::domain::{CandidatePin, LineKind, RawLine};
use crate::version::Version;
use log::debug;

/// Split line content at the first `#` into requirement part and comment text
pub fn split_comment(content: &str) -> (&str, Option<&str>) {
    match content.split_once('#') {
        Some((spec, comment)) => (spec, Some(comment)),
        None => (content, None),
    }
}

/// Classify a single line
pub fn classify(line: &RawLine) -> LineKind {
    let (spec_part, comment) = split_comment(&line.content);
    let requirement = spec_part.trim();

    // Blank, comment-only, and option lines (`-r`, `--index-url`, `-e`)
    if requirement.is_empty() || requirement.starts_with('-') {
        return LineKind::PassThrough;
    }

    let parsed = match parse_requirement(requirement) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("line {}: not a requirement ({})", line.number, e);
            return LineKind::PassThrough;
        }
    };

    match parsed.exact_pin() {
        Some(current) => LineKind::Candidate(extract(&parsed, current, spec_part, comment, line)),
        None => LineKind::PassThrough,
    }
}

/// Decompose a candidate line into the fields needed to rewrite it
pub fn extract(
    parsed: &ParsedSpecifier,
    current_version: Version,
    spec_part: &str,
    comment: Option<&str>,
    line: &RawLine,
) -> CandidatePin {
    let after_leading = spec_part.trim_start();
    let leading = &spec_part[..spec_part.len() - after_leading.len()];
    let requirement = after_leading.trim_end();
    let trailing = &after_leading[requirement.len()..];

    CandidatePin {
        line_number: line.number,
        name: parsed.name.clone(),
        extras: parsed.extras.iter().cloned().collect(),
        marker: parsed.marker.clone(),
        current_version,
        requirement: requirement.to_string(),
        leading_whitespace: leading.to_string(),
        trailing_whitespace: trailing.to_string(),
        comment: comment.map(str::to_string),
        ending: line.ending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineEnding;

    fn candidate(text: &str) -> CandidatePin {
        match classify(&RawLine::new(1, text)) {
            LineKind::Candidate(pin) => pin,
            LineKind::PassThrough => panic!("expected candidate: {:?}", text),
        }
    }

    fn is_pass_through(text: &str) -> bool {
        classify(&RawLine::new(1, text)) == LineKind::PassThrough
    }

    #[test]
    fn test_split_comment() {
        assert_eq!(split_comment("a==1  # c # d"), ("a==1  ", Some(" c # d")));
        assert_eq!(split_comment("a==1"), ("a==1", None));
        assert_eq!(split_comment("#"), ("", Some("")));
    }

    #[test]
    fn test_pass_through_lines() {
        for text in [
            "\n",
            "   \n",
            "# comment\n",
            "  # indented comment",
            "-r other.txt\n",
            "--index-url https://example.com/simple\n",
            "-e git+https://github.com/org/repo.git#egg=repo\n",
            "numpy>=1.20\n",
            "numpy\n",
            "numpy==1.20.*\n",
            "numpy>=1.0,==1.5\n",
            "numpy===1.0\n",
            "pkg @ https://example.com/pkg.whl\n",
            "this is not a requirement\n",
            "flask==\n",
        ] {
            assert!(is_pass_through(text), "{:?}", text);
        }
    }

    #[test]
    fn test_simple_candidate() {
        let pin = candidate("flask==1.0.0  # web framework\n");
        assert_eq!(pin.name, "flask");
        assert_eq!(pin.current_version.as_str(), "1.0.0");
        assert_eq!(pin.requirement, "flask==1.0.0");
        assert_eq!(pin.leading_whitespace, "");
        assert_eq!(pin.trailing_whitespace, "  ");
        assert_eq!(pin.comment.as_deref(), Some(" web framework"));
        assert_eq!(pin.ending, LineEnding::Lf);
    }

    #[test]
    fn test_oversized_release_number_is_candidate() {
        let pin = candidate("pkg==18446744073709551616\n");
        assert_eq!(pin.current_version.as_str(), "18446744073709551616");
    }

    #[test]
    fn test_candidate_with_extras_and_marker() {
        let pin = candidate("requests[socks,security]==2.25.0; python_version>'3.6'\n");
        let extras: Vec<&str> = pin.extras.iter().map(String::as_str).collect();
        assert_eq!(extras, vec!["security", "socks"]);
        assert_eq!(pin.marker.as_deref(), Some("python_version>'3.6'"));
        assert!(pin.comment.is_none());
    }

    #[test]
    fn test_whitespace_capture() {
        let pin = candidate("\t  Django == 4.2.1 \t#pinned\r\n");
        assert_eq!(pin.leading_whitespace, "\t  ");
        assert_eq!(pin.requirement, "Django == 4.2.1");
        assert_eq!(pin.trailing_whitespace, " \t");
        assert_eq!(pin.comment.as_deref(), Some("pinned"));
        assert_eq!(pin.ending, LineEnding::CrLf);
    }

    #[test]
    fn test_original_is_recoverable() {
        for text in [
            "flask==1.0.0  # web framework\n",
            "  requests[b,a]==2.0 ; os_name == 'nt'   #x\r\n",
            "attrs (==23.1.0)",
            "torch==2.1.0+cu118\n",
        ] {
            assert_eq!(candidate(text).original_line(), text);
        }
    }

    #[test]
    fn test_line_number_carried() {
        match classify(&RawLine::new(42, "six==1.16.0\n")) {
            LineKind::Candidate(pin) => assert_eq!(pin.line_number, 42),
            LineKind::PassThrough => panic!("expected candidate"),
        }
    }
}
