//! Update decision and line rewriting
//!
//! This module provides:
//! - The decision whether a pin moves to the index's latest version
//! - Reconstruction of the rewritten line around the original formatting
//!
//! Only a strictly newer, well-formed latest version triggers a rewrite.

use crate::domain::{CandidatePin, ChangeRecord, RawLine};
use crate::error::VersionError;
use crate::version::Version;
use std::fmt;

/// Why a candidate line was left as it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// No latest version known for the package
    Unresolved,
    /// The index reported something that is not a version
    InvalidLatest(VersionError),
    /// Already at the latest version
    UpToDate,
    /// Pinned to a version newer than the index's latest
    AheadOfIndex,
}

impl fmt::Display for KeepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeepReason::Unresolved => write!(f, "latest version unknown"),
            KeepReason::InvalidLatest(e) => write!(f, "{}", e),
            KeepReason::UpToDate => write!(f, "already at latest"),
            KeepReason::AheadOfIndex => write!(f, "pinned version is newer than latest"),
        }
    }
}

/// A rewritten line and the change it represents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub line: RawLine,
    pub change: ChangeRecord,
}

/// Outcome of deciding one candidate line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Keep(KeepReason),
    Rewrite(Rewrite),
}

impl Decision {
    /// Returns true if the line is rewritten
    pub fn is_rewrite(&self) -> bool {
        matches!(self, Decision::Rewrite(_))
    }

    /// The line to emit: the rewrite, or the pin's original line
    pub fn into_line(self, pin: &CandidatePin) -> RawLine {
        match self {
            Decision::Rewrite(rewrite) => rewrite.line,
            Decision::Keep(_) => RawLine {
                number: pin.line_number,
                content: pin.original_content(),
                ending: pin.ending,
            },
        }
    }
}

/// Decide whether `pin` moves to `latest`
pub fn decide(pin: &CandidatePin, latest: Option<&str>) -> Decision {
    let Some(latest) = latest else {
        return Decision::Keep(KeepReason::Unresolved);
    };

    let latest_version = match Version::parse(latest) {
        Ok(version) => version,
        Err(e) => return Decision::Keep(KeepReason::InvalidLatest(e)),
    };

    if latest_version == pin.current_version {
        return Decision::Keep(KeepReason::UpToDate);
    }
    if latest_version < pin.current_version {
        return Decision::Keep(KeepReason::AheadOfIndex);
    }

    let new_version = latest_version.as_str();
    let old = pin.original_content();
    let new = pin.render_content(new_version);
    let line = RawLine {
        number: pin.line_number,
        content: new.clone(),
        ending: pin.ending,
    };
    let change = ChangeRecord::new(
        pin.line_number,
        pin.name.as_str(),
        pin.current_version.as_str(),
        new_version,
        old,
        new,
    );

    Decision::Rewrite(Rewrite { line, change })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineKind;
    use crate::parser::classify;

    fn pin(text: &str) -> CandidatePin {
        match classify(&RawLine::new(1, text)) {
            LineKind::Candidate(pin) => pin,
            LineKind::PassThrough => panic!("expected candidate: {:?}", text),
        }
    }

    fn rewritten(text: &str, latest: &str) -> String {
        let pin = pin(text);
        decide(&pin, Some(latest)).into_line(&pin).to_text()
    }

    #[test]
    fn test_rewrite_keeps_comment_and_spacing() {
        assert_eq!(
            rewritten("flask==1.0.0  # web framework\n", "2.0.0"),
            "flask==2.0.0  # web framework\n"
        );
    }

    #[test]
    fn test_rewrite_with_extras_and_marker() {
        assert_eq!(
            rewritten(
                "requests[security]==2.25.0; python_version>'3.6'\n",
                "2.31.0"
            ),
            "requests[security]==2.31.0; python_version>'3.6'\n"
        );
    }

    #[test]
    fn test_rewrite_normalizes_requirement_expression() {
        assert_eq!(
            rewritten("  Django == 4.2 ;python_version>='3.8'\t# lts\r\n", "5.0"),
            "  Django==5.0; python_version>='3.8'\t# lts\r\n"
        );
        assert_eq!(rewritten("pkg[b,a]==1.0", "1.1"), "pkg[a,b]==1.1");
    }

    #[test]
    fn test_unresolved_keeps_line() {
        let pin = pin("foo==1.0.0\n");
        let decision = decide(&pin, None);
        assert_eq!(decision, Decision::Keep(KeepReason::Unresolved));
        assert_eq!(decision.into_line(&pin).to_text(), "foo==1.0.0\n");
    }

    #[test]
    fn test_invalid_latest_keeps_line() {
        let pin = pin("foo==1.0.0\n");
        assert!(matches!(
            decide(&pin, Some("not a version")),
            Decision::Keep(KeepReason::InvalidLatest(_))
        ));
    }

    #[test]
    fn test_never_downgrades() {
        let pin = pin("foo==2.0.0\n");
        assert_eq!(
            decide(&pin, Some("1.9.9")),
            Decision::Keep(KeepReason::AheadOfIndex)
        );
        assert_eq!(
            decide(&pin, Some("2.0.0rc1")),
            Decision::Keep(KeepReason::AheadOfIndex)
        );
    }

    #[test]
    fn test_equal_versions_are_up_to_date() {
        let pin = pin("foo==2.0\n");
        assert_eq!(decide(&pin, Some("2.0")), Decision::Keep(KeepReason::UpToDate));
        // Same version spelled differently is still not an update
        assert_eq!(
            decide(&pin, Some("2.0.0")),
            Decision::Keep(KeepReason::UpToDate)
        );
    }

    #[test]
    fn test_uses_version_ordering_not_string_ordering() {
        let pin = pin("foo==1.9.0\n");
        assert!(decide(&pin, Some("1.10.0")).is_rewrite());
    }

    #[test]
    fn test_change_record_contents() {
        let pin = pin("flask==1.0.0  # web\n");
        match decide(&pin, Some("2.0.0")) {
            Decision::Rewrite(rewrite) => {
                assert_eq!(rewrite.change.line, 1);
                assert_eq!(rewrite.change.package, "flask");
                assert_eq!(rewrite.change.old_version, "1.0.0");
                assert_eq!(rewrite.change.new_version, "2.0.0");
                assert_eq!(rewrite.change.old, "flask==1.0.0  # web");
                assert_eq!(rewrite.change.new, "flask==2.0.0  # web");
            }
            Decision::Keep(reason) => panic!("unexpected keep: {}", reason),
        }
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let first = rewritten("flask==1.0.0 # x\n", "2.0.0");
        let pin = pin(&first);
        assert_eq!(
            decide(&pin, Some("2.0.0")),
            Decision::Keep(KeepReason::UpToDate)
        );
    }

    #[test]
    fn test_versions_beyond_u64_are_compared() {
        assert_eq!(
            rewritten("pkg==18446744073709551616\n", "18446744073709551617"),
            "pkg==18446744073709551617\n"
        );
        let pin = pin("pkg==18446744073709551616\n");
        assert_eq!(
            decide(&pin, Some("18446744073709551615")),
            Decision::Keep(KeepReason::AheadOfIndex)
        );
    }

    #[test]
    fn test_final_line_without_newline() {
        assert_eq!(rewritten("six==1.15.0", "1.16.0"), "six==1.16.0");
    }
}
