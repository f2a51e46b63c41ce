use std::fmt;

use serde::{Serialize, Serializer};

use crate::Node;

/// Represents a single element within a change path.
///
/// ```
/// # use jdl_core::diff::PathSegment;
/// let key = PathSegment::key("name");
/// let index = PathSegment::index(2);
/// assert!(matches!(key, PathSegment::Key(_)));
/// assert!(matches!(index, PathSegment::Index(2)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    /// Object field lookup.
    Key(String),
    /// Array position lookup.
    Index(usize),
    /// Array element identified by the value of one of its fields.
    Match {
        /// Field that identifies the element.
        field: String,
        /// Value of that field on the matched element.
        value: Node,
        /// Render a string value in JSON quotes, set when a value of another
        /// kind in the same arrays has the same bare text.
        quoted: bool,
    },
}

impl PathSegment {
    /// Creates a key segment.
    #[must_use]
    pub fn key<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Key(value.into())
    }

    /// Creates an index segment.
    #[must_use]
    pub fn index(value: usize) -> Self {
        Self::Index(value)
    }

    /// Creates a key-match segment.
    #[must_use]
    pub fn matched<S>(field: S, value: Node) -> Self
    where
        S: Into<String>,
    {
        Self::Match { field: field.into(), value, quoted: false }
    }

    /// Creates a key-match segment whose string value renders quoted.
    ///
    /// ```
    /// # use jdl_core::{diff::{Path, PathSegment}, Node};
    /// let id = Node::String("1".into());
    /// assert_eq!(Path::from(PathSegment::matched("id", id.clone())).to_string(), "[id=1]");
    /// assert_eq!(Path::from(PathSegment::matched_quoted("id", id)).to_string(), "[id=\"1\"]");
    /// ```
    #[must_use]
    pub fn matched_quoted<S>(field: S, value: Node) -> Self
    where
        S: Into<String>,
    {
        Self::Match { field: field.into(), value, quoted: true }
    }
}

/// Represents the location of a change within a document.
///
/// Renders as `address.street`, `items[2]` or `items[id=7].name`; the root
/// renders as the empty string.
///
/// ```
/// # use jdl_core::diff::{Path, PathSegment};
/// let path = Path::new()
///     .with_segment(PathSegment::key("items"))
///     .with_segment(PathSegment::index(0))
///     .with_segment(PathSegment::key("name"));
/// assert_eq!(path.to_string(), "items[0].name");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new segment, returning the extended path.
    #[must_use]
    pub fn with_segment(mut self, segment: PathSegment) -> Self {
        self.0.push(segment);
        self
    }

    /// Returns a copy of this path extended by `segment`.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        self.clone().with_segment(segment)
    }

    /// Returns the underlying segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when `self` is a strict prefix of `other`.
    ///
    /// ```
    /// # use jdl_core::diff::{Path, PathSegment};
    /// let parent = Path::from(PathSegment::key("data"));
    /// let child = parent.child(PathSegment::key("a"));
    /// assert!(parent.is_strict_prefix_of(&child));
    /// assert!(!child.is_strict_prefix_of(&parent));
    /// assert!(!parent.is_strict_prefix_of(&parent));
    /// ```
    #[must_use]
    pub fn is_strict_prefix_of(&self, other: &Self) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(value: Vec<PathSegment>) -> Self {
        Self(value)
    }
}

impl From<PathSegment> for Path {
    fn from(value: PathSegment) -> Self {
        Self(vec![value])
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if idx == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Match { field, value, quoted: true } => {
                    write!(f, "[{field}={value}]")?;
                }
                PathSegment::Match { field, value, quoted: false } => {
                    write!(f, "[{field}={}]", value.key_repr())?;
                }
            }
        }
        Ok(())
    }
}

/// Paths serialize as their rendered text.
impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds a path from an iterator of segments.
///
/// ```
/// # use jdl_core::diff::{path_from_segments, PathSegment};
/// let path = path_from_segments([PathSegment::key("a"), PathSegment::index(1)]);
/// assert_eq!(path.to_string(), "a[1]");
/// ```
#[must_use]
pub fn path_from_segments<I>(segments: I) -> Path
where
    I: IntoIterator<Item = PathSegment>,
{
    Path(segments.into_iter().collect())
}
