//! Path keys: nesting positions flattened into a single string.
//!
//! A path key is the ordered list of segments from the implicit root to a
//! region, joined with [`SEPARATOR`].
//!
//! Example: `root␞drive␞odometry` is the `odometry` region nested in `drive`.

use crate::utils::config::SEPARATOR;
use crate::utils::error::ProfilerError;

/// Reject segments that would corrupt path-key parsing at export time
pub fn validate_segment(segment: &str) -> Result<(), ProfilerError> {
    if segment.contains(SEPARATOR) {
        return Err(ProfilerError::MalformedSegment {
            segment: segment.to_string(),
        });
    }
    Ok(())
}

/// Extend `parent` by one segment. An empty parent yields the segment alone.
pub fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        return segment.to_string();
    }
    let mut key = String::with_capacity(parent.len() + SEPARATOR.len_utf8() + segment.len());
    key.push_str(parent);
    key.push(SEPARATOR);
    key.push_str(segment);
    key
}

/// Build a key from its segments
pub fn from_segments(segments: &[&str]) -> String {
    let mut buf = [0u8; 4];
    let separator: &str = SEPARATOR.encode_utf8(&mut buf);
    segments.join(separator)
}

/// Split a key into its parent key and leaf segment.
///
/// Returns `None` for single-segment keys (the root).
pub fn parent_and_leaf(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once(SEPARATOR)
}

/// Iterate the segments of a key
pub fn segments(key: &str) -> impl Iterator<Item = &str> {
    key.split(SEPARATOR)
}

/// Number of segments in a key
pub fn depth(key: &str) -> usize {
    key.matches(SEPARATOR).count() + 1
}

/// Render a key with a readable separator, for logs and error messages
pub fn display(key: &str) -> String {
    segments(key).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_split() {
        let key = join(&join("root", "drive"), "odometry");
        assert_eq!(key, from_segments(&["root", "drive", "odometry"]));
        assert_eq!(depth(&key), 3);

        let (parent, leaf) = parent_and_leaf(&key).unwrap();
        assert_eq!(parent, from_segments(&["root", "drive"]));
        assert_eq!(leaf, "odometry");
    }

    #[test]
    fn test_join_empty_parent() {
        assert_eq!(join("", "root"), "root");
    }

    #[test]
    fn test_root_has_no_parent() {
        assert!(parent_and_leaf("root").is_none());
        assert_eq!(depth("root"), 1);
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("drive").is_ok());
        assert!(validate_segment("").is_ok());
        assert!(validate_segment("a\u{1e}b").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(display(&from_segments(&["root", "a", "b"])), "root/a/b");
    }
}
