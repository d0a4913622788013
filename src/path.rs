//! Field path representation for locating errors in nested input.
//!
//! This module provides [`FieldPath`] and [`PathSegment`], used when an
//! [`ErrorTree`](crate::ErrorTree) is flattened into `(path, message)` pairs
//! for display or logging.

use std::fmt::{self, Display};

/// A segment of a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `profile`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

/// A path to a field in a nested JSON-like structure.
///
/// `FieldPath` represents locations like `titles[0].name` and provides
/// methods for building paths incrementally. Pushing returns a new path,
/// leaving the original untouched, so sibling paths can share a base.
///
/// # Example
///
/// ```rust
/// use shapecheck::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("titles")
///     .push_index(0)
///     .push_field("name");
///
/// assert_eq!(path.to_string(), "titles[0].name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path extended with an error-tree key.
    ///
    /// Keys that parse as an unsigned integer are treated as array indices,
    /// since the matcher keys array elements by stringified index.
    pub fn push_key(&self, key: &str) -> Self {
        match key.parse::<usize>() {
            Ok(idx) => self.push_index(idx),
            Err(_) => self.push_field(key),
        }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
