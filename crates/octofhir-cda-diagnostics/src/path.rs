//! Document path tracking for validation reporting
//!
//! Validation runs once, at the end of composition, over the fully built
//! tree. Issues therefore point into the document with a structural path
//! (section / entry / relationship indices) instead of a source location.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural path into the assembled document tree
///
/// Rendered as slash-separated segments, e.g.
/// `section[medications]/entry[2]/relationship[0]/code`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Create an empty path (the document root)
    pub fn root() -> Self {
        Self::default()
    }

    /// Create a path from segments
    pub fn from_segments(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a named segment, returning the extended path
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append an indexed segment such as `entry[3]`
    pub fn indexed(&self, name: &str, index: usize) -> Self {
        self.child(format!("{name}[{index}]"))
    }

    /// Check if this is the document root
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over the segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = DocumentPath::root()
            .child("section[medications]")
            .indexed("entry", 2)
            .child("code");
        assert_eq!(path.to_string(), "/section[medications]/entry[2]/code");
    }

    #[test]
    fn test_root_path() {
        let root = DocumentPath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "/");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_child_does_not_mutate() {
        let base = DocumentPath::root().child("section[results]");
        let extended = base.indexed("entry", 0);
        assert_eq!(base.depth(), 1);
        assert_eq!(extended.depth(), 2);
    }
}
