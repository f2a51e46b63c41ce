use std::collections::{BTreeMap, BTreeSet};

use super::{compare_impl, Change, Diff, Path, PathSegment};
use crate::{CompareOptions, Node};

/// Sort key for a key-match value: kind name first, then its text form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct MatchKey {
    kind: &'static str,
    repr: String,
}

impl MatchKey {
    fn of(value: &Node) -> Self {
        Self { kind: value.kind_name(), repr: value.key_repr() }
    }
}

/// Elements of one array indexed by the value of an identity field.
type KeyedElements<'a> = BTreeMap<MatchKey, (&'a Node, &'a Node)>;

pub(super) fn compare_lists(
    lhs: &[Node],
    rhs: &[Node],
    path: &Path,
    options: &CompareOptions,
) -> Diff {
    if let Some((field, left, right)) = match_by_key(lhs, rhs, options.list_keys()) {
        tracing::debug!(%path, field, "matching list elements by key");
        return compare_keyed(field, &left, &right, path, options);
    }
    tracing::trace!(%path, "matching list elements by position");
    compare_positional(lhs, rhs, path, options)
}

/// Returns the first hint field that identifies elements on both sides.
fn match_by_key<'a, 'k>(
    lhs: &'a [Node],
    rhs: &'a [Node],
    fields: &'k [String],
) -> Option<(&'k str, KeyedElements<'a>, KeyedElements<'a>)> {
    fields.iter().find_map(|field| {
        let left = index_by_field(lhs, field)?;
        let right = index_by_field(rhs, field)?;
        Some((field.as_str(), left, right))
    })
}

/// Indexes `items` by `field`, or returns `None` when some element is not an
/// object holding the field or two elements share a field value.
fn index_by_field<'a>(items: &'a [Node], field: &str) -> Option<KeyedElements<'a>> {
    let mut index = BTreeMap::new();
    for item in items {
        let Node::Object(map) = item else {
            return None;
        };
        let value = map.get(field)?;
        if index.insert(MatchKey::of(value), (value, item)).is_some() {
            return None;
        }
    }
    Some(index)
}

fn compare_keyed(
    field: &str,
    lhs: &KeyedElements<'_>,
    rhs: &KeyedElements<'_>,
    path: &Path,
    options: &CompareOptions,
) -> Diff {
    let keys: BTreeSet<&MatchKey> = lhs.keys().chain(rhs.keys()).collect();
    let quote_strings = has_shared_text(&keys);
    let segment = |id: &Node| {
        if quote_strings && matches!(id, Node::String(_)) {
            PathSegment::matched_quoted(field, id.clone())
        } else {
            PathSegment::matched(field, id.clone())
        }
    };
    let mut diff = Diff::empty();

    for key in keys {
        match (lhs.get(key), rhs.get(key)) {
            (Some((id, left)), Some((_, right))) => {
                let sub_path = path.child(segment(*id));
                diff.extend(compare_impl(left, right, &sub_path, options));
            }
            (Some((id, left)), None) => {
                let sub_path = path.child(segment(*id));
                diff.push(Change::Removal { path: sub_path, value: (*left).clone() });
            }
            (None, Some((id, right))) => {
                let sub_path = path.child(segment(*id));
                diff.push(Change::Addition { path: sub_path, value: (*right).clone() });
            }
            (None, None) => {}
        }
    }

    diff
}

/// Returns `true` when two key values of different kinds have the same bare
/// text, e.g. the string `"1"` and the number `1`. All string keys are then
/// quoted so every rendered segment stays unique.
fn has_shared_text(keys: &BTreeSet<&MatchKey>) -> bool {
    let mut seen = BTreeSet::new();
    keys.iter().any(|key| !seen.insert(key.repr.as_str()))
}

fn compare_positional(lhs: &[Node], rhs: &[Node], path: &Path, options: &CompareOptions) -> Diff {
    let mut diff = Diff::empty();

    for index in 0..lhs.len().max(rhs.len()) {
        let sub_path = path.child(PathSegment::index(index));
        match (lhs.get(index), rhs.get(index)) {
            (Some(left), Some(right)) => diff.extend(compare_impl(left, right, &sub_path, options)),
            (Some(left), None) => diff.push(Change::Removal { path: sub_path, value: left.clone() }),
            (None, Some(right)) => diff.push(Change::Addition { path: sub_path, value: right.clone() }),
            (None, None) => {}
        }
    }

    diff
}
