//! Change records and the structural comparison algorithm.
//!
//! [`compare_nodes`] walks two [`Node`] trees and produces a [`Diff`]: a flat,
//! ordered list of [`Change`] records. Objects are walked key by key in
//! lexicographic order, arrays either by position or, when a key hint
//! applies, by the identity field of their elements. A change of kind
//! (object to array, string to number, ...) is always reported as a single
//! modification of the whole value.

mod list;
mod object;
mod path;
mod primitives;

pub use path::{path_from_segments, Path, PathSegment};

use std::fmt;

use serde::Serialize;

use crate::{CompareOptions, Node, RenderError};

/// One labeled difference between two documents.
///
/// ```
/// # use jdl_core::diff::{Change, PathSegment};
/// # use jdl_core::Node;
/// let change = Change::Addition {
///     path: PathSegment::key("age").into(),
///     value: Node::from_json_str("31").unwrap(),
/// };
/// assert_eq!(change.to_string(), "+ age: 31");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op")]
pub enum Change {
    /// The value exists only in the new document.
    #[serde(rename = "add")]
    Addition {
        /// Location of the added value.
        path: Path,
        /// The added value.
        value: Node,
    },
    /// The value exists only in the original document.
    #[serde(rename = "remove")]
    Removal {
        /// Location of the removed value.
        path: Path,
        /// The removed value.
        value: Node,
    },
    /// The value exists in both documents but differs.
    #[serde(rename = "modify")]
    Modification {
        /// Location of the modified value.
        path: Path,
        /// Value in the original document.
        old: Node,
        /// Value in the new document.
        new: Node,
    },
}

impl Change {
    /// Returns the location of the change.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Addition { path, .. }
            | Self::Removal { path, .. }
            | Self::Modification { path, .. } => path,
        }
    }

    /// Returns the leading marker: `+`, `-` or `~`.
    #[must_use]
    pub fn marker(&self) -> char {
        match self {
            Self::Addition { .. } => '+',
            Self::Removal { .. } => '-',
            Self::Modification { .. } => '~',
        }
    }

    /// Returns the same change as seen from the other document: additions
    /// become removals and the old and new values of a modification swap.
    ///
    /// ```
    /// # use jdl_core::diff::{Change, PathSegment};
    /// # use jdl_core::Node;
    /// let change = Change::Removal {
    ///     path: PathSegment::key("city").into(),
    ///     value: Node::String("SP".into()),
    /// };
    /// assert_eq!(change.reversed().to_string(), "+ city: \"SP\"");
    /// ```
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self.clone() {
            Self::Addition { path, value } => Self::Removal { path, value },
            Self::Removal { path, value } => Self::Addition { path, value },
            Self::Modification { path, old, new } => Self::Modification { path, old: new, new: old },
        }
    }

    /// Renders the change as one line, without a trailing newline.
    ///
    /// ```
    /// # use jdl_core::{CompareOptions, Node, RenderConfig};
    /// let lhs = Node::from_json_str("{\"age\":30}")?;
    /// let rhs = Node::from_json_str("{\"age\":31}")?;
    /// let diff = lhs.compare(&rhs, &CompareOptions::default());
    /// let change = diff.iter().next().unwrap();
    /// assert_eq!(change.render(&RenderConfig::default()), "~ age: 30 -> 31");
    /// assert_eq!(
    ///     change.render(&RenderConfig::color(true)),
    ///     "\u{1b}[33m~ age: 30 -> 31\u{1b}[0m"
    /// );
    /// # Ok::<(), jdl_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn render(&self, config: &RenderConfig) -> String {
        let line = self.to_string();
        if !config.color_enabled() {
            return line;
        }
        let color = match self {
            Self::Addition { .. } => COLOR_GREEN,
            Self::Removal { .. } => COLOR_RED,
            Self::Modification { .. } => COLOR_YELLOW,
        };
        format!("{color}{line}{COLOR_RESET}")
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Addition { path, value } | Self::Removal { path, value } => {
                write!(f, "{} {path}: {value}", self.marker())
            }
            Self::Modification { path, old, new } => {
                write!(f, "{} {path}: {old} -> {new}", self.marker())
            }
        }
    }
}

/// Ordered collection of change records produced by one comparison.
///
/// ```
/// # use jdl_core::diff::Diff;
/// let diff = Diff::empty();
/// assert!(diff.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diff {
    changes: Vec<Change>,
}

/// Configuration toggles for diff rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderConfig {
    color: bool,
}

impl RenderConfig {
    /// Constructs a configuration with default settings (no ANSI color).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn color_enabled(self) -> bool {
        self.color
    }

    /// Convenience constructor enabling color output.
    #[must_use]
    pub fn color(enabled: bool) -> Self {
        Self::new().with_color(enabled)
    }
}

impl Diff {
    /// Constructs an empty diff.
    #[must_use]
    pub fn empty() -> Self {
        Self { changes: Vec::new() }
    }

    /// Builds a diff from the provided changes.
    #[must_use]
    pub fn from_changes(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    /// Returns the number of changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Indicates whether the diff is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns an iterator over the changes.
    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    pub(super) fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Consumes the diff and returns the changes.
    #[must_use]
    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }

    /// Renders every change on its own line.
    ///
    /// ```
    /// # use jdl_core::{CompareOptions, Node, RenderConfig};
    /// let lhs = Node::from_json_str("{\"name\":\"Ana\",\"city\":\"SP\"}")?;
    /// let rhs = Node::from_json_str("{\"name\":\"Ana Maria\"}")?;
    /// let diff = lhs.compare(&rhs, &CompareOptions::default());
    /// assert_eq!(
    ///     diff.render(&RenderConfig::default()),
    ///     "- city: \"SP\"\n~ name: \"Ana\" -> \"Ana Maria\"\n"
    /// );
    /// # Ok::<(), jdl_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn render(&self, config: &RenderConfig) -> String {
        let mut output = String::new();
        for change in &self.changes {
            output.push_str(&change.render(config));
            output.push('\n');
        }
        output
    }

    /// Serializes the changes as a JSON array.
    ///
    /// ```
    /// # use jdl_core::{CompareOptions, Node};
    /// let lhs = Node::from_json_str("{\"age\":30}")?;
    /// let rhs = Node::from_json_str("{\"age\":31}")?;
    /// let diff = lhs.compare(&rhs, &CompareOptions::default());
    /// assert_eq!(
    ///     diff.render_json()?,
    ///     "[{\"op\":\"modify\",\"path\":\"age\",\"old\":30,\"new\":31}]"
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn render_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(&self.changes)?)
    }

    /// Returns the diff as seen from the other document, i.e. the result of
    /// comparing the two inputs in the opposite order.
    ///
    /// ```
    /// # use jdl_core::{CompareOptions, Node};
    /// let lhs = Node::from_json_str("{\"name\":\"Ana\"}")?;
    /// let rhs = Node::from_json_str("{\"name\":\"Ana\",\"age\":31}")?;
    /// let opts = CompareOptions::default();
    /// assert_eq!(lhs.compare(&rhs, &opts).reverse(), rhs.compare(&lhs, &opts));
    /// # Ok::<(), jdl_core::ParseError>(())
    /// ```
    #[must_use]
    pub fn reverse(&self) -> Diff {
        Diff::from_changes(self.changes.iter().map(Change::reversed).collect())
    }
}

impl IntoIterator for Diff {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl From<Vec<Change>> for Diff {
    fn from(value: Vec<Change>) -> Self {
        Self::from_changes(value)
    }
}

impl Extend<Change> for Diff {
    fn extend<T: IntoIterator<Item = Change>>(&mut self, iter: T) {
        self.changes.extend(iter);
    }
}

const COLOR_RESET: &str = "\u{1b}[0m";
const COLOR_RED: &str = "\u{1b}[31m";
const COLOR_GREEN: &str = "\u{1b}[32m";
const COLOR_YELLOW: &str = "\u{1b}[33m";

/// Computes the structural diff between two nodes.
#[must_use]
pub fn compare_nodes(lhs: &Node, rhs: &Node, options: &CompareOptions) -> Diff {
    compare_impl(lhs, rhs, &Path::new(), options)
}

pub(super) fn compare_impl(lhs: &Node, rhs: &Node, path: &Path, options: &CompareOptions) -> Diff {
    if lhs == rhs {
        return Diff::empty();
    }

    match (lhs, rhs) {
        (Node::Object(left), Node::Object(right)) => {
            object::compare_objects(left, right, path, options)
        }
        (Node::Array(left), Node::Array(right)) => list::compare_lists(left, right, path, options),
        // Unequal primitives and any change of kind.
        _ => primitives::replacement(lhs, rhs, path),
    }
}
