//! Comparison of the pinned version against an upstream candidate

use std::cmp::Ordering;
use std::fmt;

use crate::bump::semver::compare;

/// Outcome of comparing a pinned version with a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Candidate is newer than the pinned version
    Bump,
    /// Candidate equals the pinned version
    UpToDate,
    /// Pinned version is newer than anything found upstream
    Ahead,
}

impl Decision {
    /// Decide between the pinned version and the (untrimmed) candidate
    pub fn between(pinned: &str, candidate: &str) -> Self {
        match compare(pinned, candidate) {
            Ordering::Less => Decision::Bump,
            Ordering::Equal => Decision::UpToDate,
            Ordering::Greater => Decision::Ahead,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Bump => "bump",
            Decision::UpToDate => "up-to-date",
            Decision::Ahead => "ahead",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0.0", "v1.2.0", Decision::Bump)]
    #[case("1.2.0", "v1.2.0", Decision::UpToDate)]
    #[case("1.3.0", "v1.2.0", Decision::Ahead)]
    #[case("1.0.0", "", Decision::Ahead)] // nothing found upstream
    #[case("", "v0.1.0", Decision::Bump)] // unpinned package
    #[case("20240101", "0123abc", Decision::Ahead)]
    fn between_returns_expected(
        #[case] pinned: &str,
        #[case] candidate: &str,
        #[case] expected: Decision,
    ) {
        assert_eq!(Decision::between(pinned, candidate), expected);
    }
}
