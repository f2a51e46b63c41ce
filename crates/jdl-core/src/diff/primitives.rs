use super::{Change, Diff, Path};
use crate::Node;

/// Reports `lhs` replaced by `rhs` as one opaque modification.
pub(super) fn replacement(lhs: &Node, rhs: &Node, path: &Path) -> Diff {
    Diff::from_changes(vec![Change::Modification {
        path: path.clone(),
        old: lhs.clone(),
        new: rhs.clone(),
    }])
}
