//! Maven version parsing, comparison, and range matching.
//!
//! Maven versions use a custom ordering that differs from semver:
//! - Segments are split on `.`, `-`, and on digit/letter transitions
//! - Numeric segments compare as numbers
//! - String qualifiers have a special ordering:
//!   `alpha` < `beta` < `milestone` < `rc` < `snapshot` < `""` (release) < `sp`
//! - SNAPSHOT versions sort before their release equivalent

use std::cmp::Ordering;
use std::fmt;

/// A parsed Maven version with comparable segments.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Qualifier(QualifierKind),
    Text(String),
}

/// Well-known Maven qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum QualifierKind {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let original = version.trim().to_string();
        let segments = tokenize(&original).into_iter().map(classify).collect();
        Self { original, segments }
    }

    /// The version exactly as written.
    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| compare_segments(self.segments.get(i), other.segments.get(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => against_missing(s),
        (None, Some(s)) => against_missing(s).reverse(),
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

/// A missing segment behaves like `0` or like the release qualifier.
fn against_missing(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(n) => n.cmp(&0),
        Segment::Qualifier(q) => q.cmp(&QualifierKind::Release),
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_present(a: &Segment, b: &Segment) -> Ordering {
    use Segment::{Numeric, Qualifier, Text};
    match (a, b) {
        (Numeric(a), Numeric(b)) => a.cmp(b),
        (Qualifier(a), Qualifier(b)) => a.cmp(b),
        (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Numeric(_), _) => Ordering::Greater,
        (_, Numeric(_)) => Ordering::Less,
        (Qualifier(q), Text(_)) if *q >= QualifierKind::Release => Ordering::Greater,
        (Qualifier(_), Text(_)) => Ordering::Less,
        (Text(_), Qualifier(q)) if *q >= QualifierKind::Release => Ordering::Less,
        (Text(_), Qualifier(_)) => Ordering::Greater,
    }
}

fn tokenize(version: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev_digit: Option<bool> = None;

    for ch in version.chars() {
        if ch == '.' || ch == '-' || ch == '_' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev_digit = None;
            continue;
        }
        let is_digit = ch.is_ascii_digit();
        if prev_digit.is_some_and(|p| p != is_digit) && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(ch);
        prev_digit = Some(is_digit);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn classify(token: String) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    match token.to_lowercase().as_str() {
        "alpha" | "a" => Segment::Qualifier(QualifierKind::Alpha),
        "beta" | "b" => Segment::Qualifier(QualifierKind::Beta),
        "milestone" | "m" => Segment::Qualifier(QualifierKind::Milestone),
        "rc" | "cr" => Segment::Qualifier(QualifierKind::Rc),
        "snapshot" => Segment::Qualifier(QualifierKind::Snapshot),
        "ga" | "final" | "release" => Segment::Qualifier(QualifierKind::Release),
        "sp" => Segment::Qualifier(QualifierKind::Sp),
        _ => Segment::Text(token),
    }
}

/// One end of a [`VersionRange`].
#[derive(Debug, Clone)]
pub struct Bound {
    pub version: MavenVersion,
    pub inclusive: bool,
}

/// A single interval such as `[1.0,2.0)`.
///
/// Both the Maven `(`/`)` and the Gradle `]1.0,2.0[` spellings of an
/// exclusive bound are accepted.
#[derive(Debug, Clone)]
pub struct VersionRange {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

impl VersionRange {
    fn parse_interval(spec: &str) -> Option<Self> {
        let s = spec.trim();
        let mut chars = s.chars();
        let open = chars.next()?;
        let close = chars.next_back()?;
        let lower_inclusive = match open {
            '[' => true,
            '(' | ']' => false,
            _ => return None,
        };
        let upper_inclusive = match close {
            ']' => true,
            ')' | '[' => false,
            _ => return None,
        };
        let inner = &s[1..s.len() - 1];

        let bound = |text: &str, inclusive: bool| {
            let text = text.trim();
            (!text.is_empty()).then(|| Bound {
                version: MavenVersion::parse(text),
                inclusive,
            })
        };

        match inner.split_once(',') {
            Some((lower, upper)) => Some(Self {
                lower: bound(lower, lower_inclusive),
                upper: bound(upper, upper_inclusive),
            }),
            // `[1.0]` pins exactly 1.0
            None if lower_inclusive && upper_inclusive => {
                let exact = bound(inner, true)?;
                Some(Self {
                    lower: Some(exact.clone()),
                    upper: Some(exact),
                })
            }
            None => None,
        }
    }

    /// Check if a version satisfies this interval.
    pub fn contains(&self, version: &MavenVersion) -> bool {
        let above_lower = self.lower.as_ref().map_or(true, |b| match version.cmp(&b.version) {
            Ordering::Greater => true,
            Ordering::Equal => b.inclusive,
            Ordering::Less => false,
        });
        let below_upper = self.upper.as_ref().map_or(true, |b| match version.cmp(&b.version) {
            Ordering::Less => true,
            Ordering::Equal => b.inclusive,
            Ordering::Greater => false,
        });
        above_lower && below_upper
    }
}

/// A requested version: either one exact version or a union of ranges.
#[derive(Debug, Clone)]
pub enum VersionRequirement {
    Exact(MavenVersion),
    Ranges(Vec<VersionRange>),
}

impl VersionRequirement {
    /// Classify a requested version string.
    ///
    /// Anything that does not start with a range bracket is exact. A
    /// malformed range is also treated as an exact (opaque) version so that
    /// it can still be compared for equality.
    pub fn parse(spec: &str) -> Self {
        let s = spec.trim();
        if !s.starts_with(|c: char| matches!(c, '[' | '(' | ']')) {
            return Self::Exact(MavenVersion::parse(s));
        }
        match split_union(s)
            .iter()
            .map(|part| VersionRange::parse_interval(part))
            .collect::<Option<Vec<_>>>()
        {
            Some(ranges) if !ranges.is_empty() => Self::Ranges(ranges),
            _ => Self::Exact(MavenVersion::parse(s)),
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Ranges(_))
    }

    /// Whether `version` satisfies this requirement.
    pub fn allows(&self, version: &MavenVersion) -> bool {
        match self {
            Self::Exact(exact) => exact == version,
            Self::Ranges(ranges) => ranges.iter().any(|r| r.contains(version)),
        }
    }
}

/// Split `[1,2),[3,4)` into its intervals.
fn split_union(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut inside = false;
    for (i, ch) in s.char_indices() {
        match ch {
            '[' | '(' | ']' | ')' if !inside => {
                inside = true;
                start = i;
            }
            ']' | ')' | '[' if inside && i > start => {
                parts.push(&s[start..=i]);
                inside = false;
            }
            _ => {}
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> MavenVersion {
        MavenVersion::parse(s)
    }

    #[test]
    fn numeric_ordering() {
        assert!(v("1.0") < v("2.0"));
        assert!(v("1.0.0") < v("1.0.1"));
        assert!(v("1.0.1") < v("1.1.0"));
        assert!(v("1.7") < v("1.8"));
    }

    #[test]
    fn qualifier_ordering() {
        assert!(v("1.0-alpha") < v("1.0-beta"));
        assert!(v("1.0-beta") < v("1.0-rc"));
        assert!(v("1.0-rc") < v("1.0"));
        assert!(v("1.0") < v("1.0-sp"));
        assert!(v("1.8.0-alpha2") < v("1.8.0"));
    }

    #[test]
    fn snapshot_before_release() {
        assert!(v("1.0-SNAPSHOT") < v("1.0"));
    }

    #[test]
    fn trailing_zeros_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
    }

    #[test]
    fn digit_letter_transition_splits() {
        assert!(v("1.0alpha1") < v("1.0alpha2"));
        assert!(v("1.0alpha2") < v("1.0beta1"));
    }

    #[test]
    fn guava_style_versions() {
        assert!(v("25.0-jre") < v("31.0-jre"));
        assert!(v("1.0.0-jre") < v("1.0.0"));
    }

    #[test]
    fn range_inclusive() {
        let req = VersionRequirement::parse("[1.0,2.0]");
        assert!(req.allows(&v("1.0")));
        assert!(req.allows(&v("2.0")));
        assert!(!req.allows(&v("2.1")));
    }

    #[test]
    fn range_exclusive_upper() {
        let req = VersionRequirement::parse("[1.2.70, 1.3.0)");
        assert!(req.allows(&v("1.2.70")));
        assert!(req.allows(&v("1.2.71")));
        assert!(!req.allows(&v("1.3.0")));
        assert!(!req.allows(&v("1.4.10")));
    }

    #[test]
    fn range_gradle_exclusive_brackets() {
        let req = VersionRequirement::parse("]1.0,2.0[");
        assert!(!req.allows(&v("1.0")));
        assert!(req.allows(&v("1.5")));
        assert!(!req.allows(&v("2.0")));
    }

    #[test]
    fn range_open_ends() {
        assert!(VersionRequirement::parse("(,2.0)").allows(&v("0.1")));
        assert!(VersionRequirement::parse("[4.0.0,]").allows(&v("99")));
    }

    #[test]
    fn range_exact_pin() {
        let req = VersionRequirement::parse("[1.5]");
        assert!(req.allows(&v("1.5")));
        assert!(!req.allows(&v("1.6")));
    }

    #[test]
    fn range_union() {
        let req = VersionRequirement::parse("[1.0,2.0),[3.0,4.0)");
        assert!(req.allows(&v("1.5")));
        assert!(!req.allows(&v("2.5")));
        assert!(req.allows(&v("3.5")));
    }

    #[test]
    fn bare_version_is_exact() {
        let req = VersionRequirement::parse("1.0");
        assert!(!req.is_range());
        assert!(req.allows(&v("1.0.0")));
        assert!(!req.allows(&v("1.1")));
    }

    #[test]
    fn malformed_range_is_opaque_exact() {
        assert!(!VersionRequirement::parse("[1.0").is_range());
    }
}
