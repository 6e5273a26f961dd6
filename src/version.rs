//! PEP 440 version tokens
//!
//! Parses the version strings found after `==` and in the index's
//! `info.version` field, and orders them the way pip does:
//! - epoch first, then the release segments with trailing zeros ignored
//! - dev < pre (a < b < rc) < final < post
//! - a local segment (`+ubuntu1`) sorts after the same public version
//!
//! Numeric components have no size limit.

use crate::error::VersionError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^\s*v?
        (?:(?P<epoch>[0-9]+)!)?
        (?P<release>[0-9]+(?:\.[0-9]+)*)
        (?P<pre>
            [-_.]?
            (?P<pre_l>alpha|a|beta|b|preview|pre|c|rc)
            [-_.]?
            (?P<pre_n>[0-9]+)?
        )?
        (?P<post>
            (?:-(?P<post_n1>[0-9]+))
            |
            (?:
                [-_.]?
                (?P<post_l>post|rev|r)
                [-_.]?
                (?P<post_n2>[0-9]+)?
            )
        )?
        (?P<dev>
            [-_.]?
            dev
            [-_.]?
            (?P<dev_n>[0-9]+)?
        )?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .unwrap()
});

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha,
    Beta,
    Candidate,
}

/// A non-negative integer component of any length, stored without leading zeros
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Build from a string of ASCII digits
    fn from_digits(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }

    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number(n.to_string())
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dot-separated piece of a local version label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSegment {
    Number(Number),
    Text(String),
}

impl Ord for LocalSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        // Numeric segments sort after alphanumeric ones
        match (self, other) {
            (LocalSegment::Number(a), LocalSegment::Number(b)) => a.cmp(b),
            (LocalSegment::Text(a), LocalSegment::Text(b)) => a.cmp(b),
            (LocalSegment::Number(_), LocalSegment::Text(_)) => Ordering::Greater,
            (LocalSegment::Text(_), LocalSegment::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A parsed PEP 440 version
///
/// Equality and ordering follow version semantics, so `1.0 == 1.0.0`.
/// The string the version was parsed from is kept for display.
#[derive(Debug, Clone)]
pub struct Version {
    pub epoch: Number,
    pub release: Vec<Number>,
    pub pre: Option<(PreRelease, Number)>,
    pub post: Option<Number>,
    pub dev: Option<Number>,
    pub local: Vec<LocalSegment>,
    original: String,
}

impl Version {
    /// Parse a version string
    pub fn parse(s: &str) -> Result<Self, VersionError> {
        s.parse()
    }

    /// The text this version was parsed from, trimmed
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Release segments with trailing zeros removed
    fn trimmed_release(&self) -> &[Number] {
        let end = self
            .release
            .iter()
            .rposition(|n| !n.is_zero())
            .map_or(0, |i| i + 1);
        &self.release[..end]
    }

    /// Sort key for the pre-release slot: dev-only releases sort before any
    /// pre-release, plain finals after all of them
    fn pre_key(&self) -> (u8, Option<&(PreRelease, Number)>) {
        match (&self.pre, &self.post, &self.dev) {
            (None, None, Some(_)) => (0, None),
            (Some(pre), _, _) => (1, Some(pre)),
            (None, _, _) => (2, None),
        }
    }

    /// `None` post sorts first
    fn post_key(&self) -> Option<&Number> {
        self.post.as_ref()
    }

    /// `None` dev sorts last
    fn dev_key(&self) -> (u8, Option<&Number>) {
        self.dev.as_ref().map_or((1, None), |n| (0, Some(n)))
    }
}

fn number(m: Option<regex::Match<'_>>) -> Number {
    m.map_or_else(|| Number::from(0), |m| Number::from_digits(m.as_str()))
}

fn parse_pre_label(label: &str) -> PreRelease {
    match label.to_ascii_lowercase().as_str() {
        "a" | "alpha" => PreRelease::Alpha,
        "b" | "beta" => PreRelease::Beta,
        _ => PreRelease::Candidate,
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_RE
            .captures(s)
            .ok_or_else(|| VersionError::Invalid(s.to_string()))?;

        let epoch = number(caps.name("epoch"));

        let release = caps
            .name("release")
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split('.')
            .map(Number::from_digits)
            .collect();

        let pre = caps
            .name("pre_l")
            .map(|label| (parse_pre_label(label.as_str()), number(caps.name("pre_n"))));

        let post = if caps.name("post_n1").is_some() {
            Some(number(caps.name("post_n1")))
        } else if caps.name("post_l").is_some() {
            Some(number(caps.name("post_n2")))
        } else {
            None
        };

        let dev = caps.name("dev").map(|_| number(caps.name("dev_n")));

        let local = caps
            .name("local")
            .map(|m| {
                m.as_str()
                    .split(['.', '-', '_'])
                    .map(|seg| {
                        if seg.bytes().all(|b| b.is_ascii_digit()) {
                            LocalSegment::Number(Number::from_digits(seg))
                        } else {
                            LocalSegment::Text(seg.to_ascii_lowercase())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Version {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
            original: s.trim().to_string(),
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.trimmed_release().cmp(other.trimmed_release()))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post_key().cmp(&other.post_key()))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            // An absent local label sorts before any present one; `Vec`
            // ordering gives exactly that since the empty vec is smallest.
            .then_with(|| self.local.cmp(&other.local))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
