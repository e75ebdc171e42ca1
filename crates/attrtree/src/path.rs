//! Dotted attribute paths
//!
//! Provides [`AttrPath`] for addressing nested attributes in one call,
//! e.g. `"database.primary.host"`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path from a node down to one of its descendants
///
/// Each segment names one attribute. A path always has at least one segment.
///
/// # Examples
/// - `["server", "port"]` → `server.port`
/// - `["attr3", "subattr2", "subsubattr1"]` → `attr3.subattr2.subsubattr1`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrPath(Vec<String>);

impl AttrPath {
    /// Create path from segments
    ///
    /// # Errors
    /// Returns error if there are no segments or one of them is empty
    pub fn new(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// Create path from a single attribute name
    ///
    /// The name is taken verbatim, so it may contain dots.
    ///
    /// # Errors
    /// Returns error if the name is empty
    pub fn single(segment: impl Into<String>) -> Result<Self, PathError> {
        Self::new(vec![segment.into()])
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a path has at least one segment
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split into the parent segments and the final attribute name
    #[inline]
    #[must_use]
    pub fn split_last(&self) -> (&[String], &str) {
        match self.0.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&[], ""),
        }
    }

    /// Append a segment, returning new path
    ///
    /// # Errors
    /// Returns error if the segment is empty
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(PathError::EmptySegment);
        }
        let mut new = self.clone();
        new.0.push(segment);
        Ok(new)
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for AttrPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for AttrPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        Self::new(s.split('.').map(str::to_string).collect())
    }
}

impl From<&AttrPath> for AttrPath {
    fn from(path: &AttrPath) -> Self {
        path.clone()
    }
}

impl TryFrom<&str> for AttrPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Errors related to attribute paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path with no segments
    #[error("path is empty")]
    Empty,

    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_from_str_valid() {
        let path: AttrPath = "a.b.c".parse().unwrap();
        assert_eq!(path.segments(), &["a", "b", "c"]);
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
    }

    #[test]
    fn path_allows_non_identifier_keys() {
        let path: AttrPath = "server.max-connections".parse().unwrap();
        assert_eq!(path.segments(), &["server", "max-connections"]);
    }

    #[test]
    fn path_from_str_empty() {
        let result: Result<AttrPath, _> = "".parse();
        assert_eq!(result, Err(PathError::Empty));
    }

    #[test]
    fn path_from_str_empty_segment() {
        let result: Result<AttrPath, _> = "a..b".parse();
        assert_eq!(result, Err(PathError::EmptySegment));

        let trailing: Result<AttrPath, _> = "a.".parse();
        assert_eq!(trailing, Err(PathError::EmptySegment));
    }

    #[test]
    fn path_single_keeps_dots() {
        let path = AttrPath::single("file.name").unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.split_last().1, "file.name");
    }

    #[test]
    fn path_split_last() {
        let path: AttrPath = "a.b.c".parse().unwrap();
        let (parents, last) = path.split_last();
        assert_eq!(parents, &["a", "b"]);
        assert_eq!(last, "c");
    }

    #[test]
    fn path_child() {
        let parent: AttrPath = "parent".parse().unwrap();
        let child = parent.child("child").unwrap();
        assert_eq!(child.segments(), &["parent", "child"]);
        assert_eq!(parent.child(""), Err(PathError::EmptySegment));
    }

    #[test]
    fn path_display_and_iter() {
        let path = AttrPath::new(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(path.to_string(), "a.b");
        assert_eq!(path.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
