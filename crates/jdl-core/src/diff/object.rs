use std::collections::{BTreeMap, BTreeSet};

use super::{compare_impl, Change, Diff, Path, PathSegment};
use crate::{CompareOptions, Node};

pub(super) fn compare_objects(
    lhs: &BTreeMap<String, Node>,
    rhs: &BTreeMap<String, Node>,
    path: &Path,
    options: &CompareOptions,
) -> Diff {
    let keys: BTreeSet<&String> = lhs.keys().chain(rhs.keys()).collect();
    let mut diff = Diff::empty();

    for key in keys {
        let sub_path = path.child(PathSegment::key(key.as_str()));
        match (lhs.get(key), rhs.get(key)) {
            (Some(left), Some(right)) => diff.extend(compare_impl(left, right, &sub_path, options)),
            (Some(left), None) => diff.push(Change::Removal { path: sub_path, value: left.clone() }),
            (None, Some(right)) => diff.push(Change::Addition { path: sub_path, value: right.clone() }),
            (None, None) => {}
        }
    }

    diff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(json: &str) -> BTreeMap<String, Node> {
        match Node::from_json_str(json).unwrap() {
            Node::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn nested_paths_are_dotted() {
        let lhs = object("{\"level1\":{\"level2\":{\"level3\":\"old\"}}}");
        let rhs = object("{\"level1\":{\"level2\":{\"level3\":\"new\"}}}");
        let diff = compare_objects(&lhs, &rhs, &Path::new(), &CompareOptions::default());
        let rendered: Vec<_> = diff.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["~ level1.level2.level3: \"old\" -> \"new\""]);
    }

    #[test]
    fn keys_follow_lexicographic_order_not_input_order() {
        let lhs = object("{\"zeta\":1,\"alpha\":1,\"Mid\":1}");
        let rhs = object("{\"alpha\":2,\"Mid\":2,\"zeta\":2}");
        let diff = compare_objects(&lhs, &rhs, &Path::new(), &CompareOptions::default());
        let paths: Vec<_> = diff.iter().map(|change| change.path().to_string()).collect();
        assert_eq!(paths, ["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn child_paths_extend_the_parent() {
        let lhs = object("{\"street\":\"A\"}");
        let rhs = object("{\"street\":\"A\",\"city\":\"SP\"}");
        let parent = Path::from(PathSegment::key("address"));
        let diff = compare_objects(&lhs, &rhs, &parent, &CompareOptions::default());
        let rendered: Vec<_> = diff.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["+ address.city: \"SP\""]);
    }
}
