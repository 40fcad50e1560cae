//! Path composition helpers.
//!
//! Orchestration directories live on the host filesystem and use the
//! platform separator; S3 key prefixes always use `/` regardless of
//! platform. Both joins skip empty segments so callers can pass optional
//! prefixes straight through.

use std::path::{Path, PathBuf};

/// Join components onto a base path using the platform separator.
///
/// Empty components are skipped.
pub fn build_path(base: &Path, components: &[&str]) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in components {
        if !component.is_empty() {
            path.push(component);
        }
    }
    path
}

/// Join S3 key components with `/`, skipping empty segments.
pub fn build_s3_path(components: &[&str]) -> String {
    components
        .iter()
        .filter(|c| !c.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}
