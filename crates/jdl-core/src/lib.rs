//! Core library of `json-diff-lite`, a structural JSON comparison tool.
//!
//! `jdl-core` parses documents into a [`Node`] tree, compares two trees and
//! reports the result as a flat, ordered list of human-readable change
//! records: additions (`+`), removals (`-`) and modifications (`~`), each
//! labeled with a path such as `address.street`, `items[2]` or
//! `items[id=7].name`.
//!
//! ```
//! use jdl_core::{CompareOptions, Node, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = Node::from_json_str("{\"name\":\"Ana\",\"age\":30}")?;
//!     let target = Node::from_json_str("{\"name\":\"Ana\",\"age\":31}")?;
//!     let diff = base.compare(&target, &CompareOptions::default());
//!     assert_eq!(diff.render(&RenderConfig::default()), "~ age: 30 -> 31\n");
//!
//!     let options = CompareOptions::default().with_list_keys(["id"])?;
//!     let lhs = Node::from_json_str("[{\"id\":1,\"v\":\"x\"},{\"id\":2,\"v\":\"y\"}]")?;
//!     let rhs = Node::from_json_str("[{\"id\":2,\"v\":\"y\"},{\"id\":1,\"v\":\"x\"}]")?;
//!     assert!(lhs.compare(&rhs, &options).is_empty());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod error;
mod node;
mod number;
mod options;

pub use diff::{Change, Diff, Path, PathSegment, RenderConfig};
pub use error::{OptionsError, ParseError, RenderError};
pub use node::Node;
pub use number::Number;
pub use options::CompareOptions;

/// Returns the semantic version of the `jdl-core` crate.
///
/// ```
/// assert!(!jdl_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
