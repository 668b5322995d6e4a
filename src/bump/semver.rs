use std::cmp::Ordering;

use semver::Version;

/// Parse a tag or version string into a semver::Version.
///
/// Strips one leading 'v' and pads partial versions with zeros.
///
/// Examples:
/// - "v1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "v1.2.3-rc1" -> Version(1, 2, 3, pre: rc1)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Total ordering over arbitrary version strings
///
/// Parseable versions compare by semver precedence, ignoring build metadata.
/// Anything unparseable sorts before every valid version, and two unparseable
/// strings are equal.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(a), Some(b)) => a.cmp_precedence(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
