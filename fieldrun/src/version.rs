//! Version ordering for schema and package versions.
//!
//! Versions in command documents are not guaranteed to be semantic
//! versions ("2.2", "1.0.0.0" and friends all occur in the wild), so the
//! comparator tries semver first and falls back to component-wise
//! ordering.

use std::cmp::Ordering;

use semver::Version;

/// Compare two version strings.
///
/// If both strings are valid semantic versions (`MAJOR.MINOR.PATCH` with
/// optional pre-release/build metadata), semver ordering applies.
/// Otherwise the versions are split on `.` and compared component by
/// component: numerically when both components are non-negative
/// integers, lexicographically otherwise. When every aligned component
/// is equal, the version with fewer components orders first.
///
/// With `strict == false`, trailing components that are numerically zero
/// are ignored (`"1.0.0.0"` equals `"1"`) and alphabetic comparison is
/// case-insensitive.
pub fn compare(this: &str, other: &str, strict: bool) -> Ordering {
    if let (Ok(this_semver), Ok(other_semver)) = (Version::parse(this), Version::parse(other)) {
        return this_semver.cmp(&other_semver);
    }

    let (this_version, other_version) = if strict {
        (this.to_string(), other.to_string())
    } else {
        (normalize_for_compare(this), normalize_for_compare(other))
    };

    let this_components: Vec<&str> = this_version.split('.').collect();
    let other_components: Vec<&str> = other_version.split('.').collect();

    for (a, b) in this_components.iter().zip(other_components.iter()) {
        let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            _ if strict => a.cmp(b),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    this_components.len().cmp(&other_components.len())
}

/// Sort version strings ascending using strict component ordering.
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| compare(a, b, true));
}

/// Remove trailing components that are numerically equal to zero.
fn normalize_for_compare(version: &str) -> String {
    let mut significant = version.len();
    for (i, b) in version.bytes().enumerate().rev() {
        if b != b'0' && b != b'.' {
            break;
        }
        if b == b'.' {
            significant = i;
        }
        if i == 0 {
            significant = 0;
        }
    }
    version[..significant].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semver_ordering() {
        assert_eq!(compare("2.0.1", "2.0.2", false), Ordering::Less);
        assert_eq!(compare("2.0.2", "2.0.1", false), Ordering::Greater);
        assert_eq!(compare("1.2.3", "1.2.3", false), Ordering::Equal);
    }

    #[test]
    fn test_semver_prerelease_orders_before_release() {
        assert_eq!(compare("1.2.3-beta", "1.2.3", false), Ordering::Less);
        assert_eq!(compare("1.2.3", "1.2.3-beta", false), Ordering::Greater);
    }

    #[test]
    fn test_non_strict_trims_trailing_zero_components() {
        assert_eq!(compare("1.0.0.0", "1", false), Ordering::Equal);
        assert_eq!(compare("1", "1.0.0.0", false), Ordering::Equal);
        assert_eq!(compare("2.2.0", "2.2", false), Ordering::Equal);
    }

    #[test]
    fn test_strict_keeps_trailing_zero_components() {
        assert_eq!(compare("1.0.0.0", "1", true), Ordering::Greater);
        assert_eq!(compare("1", "1.0.0.0", true), Ordering::Less);
    }

    #[test]
    fn test_inner_zero_components_are_kept() {
        // Only *trailing* zero components are insignificant.
        assert_eq!(compare("1.0.1", "1", false), Ordering::Greater);
        assert_eq!(compare("1.10", "1.1", false), Ordering::Greater);
    }

    #[test]
    fn test_component_numeric_comparison() {
        assert_eq!(compare("2.2", "2.10", false), Ordering::Less);
        assert_eq!(compare("10", "9", false), Ordering::Greater);
    }

    #[test]
    fn test_component_alpha_comparison() {
        assert_eq!(compare("1.alpha", "1.beta", true), Ordering::Less);
        // Case-insensitive when not strict.
        assert_eq!(compare("1.Beta", "1.beta", false), Ordering::Equal);
    }

    #[test]
    fn test_shorter_version_orders_first_on_tie() {
        assert_eq!(compare("2.2", "2.2.1", false), Ordering::Less);
        assert_eq!(compare("2.2.1", "2.2", false), Ordering::Greater);
    }

    #[test]
    fn test_antisymmetry_and_reflexivity() {
        let versions = ["1.0.0.0", "1", "2.0.1", "2.2", "1.2.3-beta", "1.alpha"];
        for a in &versions {
            for b in &versions {
                for strict in [false, true] {
                    assert_eq!(
                        compare(a, b, strict),
                        compare(b, a, strict).reverse(),
                        "antisymmetry violated for {a} vs {b} (strict={strict})"
                    );
                }
            }
            assert_eq!(compare(a, a, true), Ordering::Equal);
            assert_eq!(compare(a, a, false), Ordering::Equal);
        }
    }

    #[test]
    fn test_sort_versions() {
        let mut versions = vec![
            "2.0.2".to_string(),
            "1.0".to_string(),
            "2.0.1".to_string(),
            "2.2".to_string(),
        ];
        sort_versions(&mut versions);
        assert_eq!(versions, vec!["1.0", "2.0.1", "2.0.2", "2.2"]);
    }
}
