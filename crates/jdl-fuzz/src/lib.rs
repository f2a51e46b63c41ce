//! Fuzzing harnesses for `json-diff-lite`.
//!
//! Each public function accepts raw bytes so it can be driven from the
//! `cargo fuzz` targets under `fuzz/` as well as from ordinary tests. Decoding
//! failures are ignored; violated comparison properties panic.
//!
//! ```
//! jdl_fuzz::fuzz_parse(b"{\"a\":1}");
//! jdl_fuzz::fuzz_compare(&[1, 2, 3, 4]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use jdl_core::{CompareOptions, Node, RenderConfig};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 5;
const MAX_STRING_LEN: u8 = 8;

/// Small key alphabet so that objects on both sides share fields and list
/// elements regularly qualify for key matching.
const KEYS: [&str; 5] = ["id", "name", "sku", "v", "w"];

/// Feeds arbitrary bytes through the JSON and YAML parsers.
///
/// Any document that parses must render back to JSON that parses to an equal
/// node.
///
/// ```
/// jdl_fuzz::fuzz_parse(b"{\"key\":[1,2.5,null]}");
/// ```
pub fn fuzz_parse(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for node in [Node::from_json_str(text), Node::from_yaml_str(text)].into_iter().flatten() {
        let reparsed = Node::from_json_str(&node.to_string())
            .unwrap_or_else(|err| panic!("rendered node {node} does not parse: {err}"));
        assert_eq!(reparsed, node);
    }
}

/// Compares randomly generated documents and checks the comparison laws.
///
/// ```
/// jdl_fuzz::fuzz_compare(b"compare seed");
/// ```
pub fn fuzz_compare(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Ok(options) = random_options(&mut unstructured) else {
        return;
    };
    let Some(lhs) = random_node(&mut unstructured) else {
        return;
    };
    let Some(rhs) = random_node(&mut unstructured) else {
        return;
    };
    check_compare_laws(&lhs, &rhs, &options);
}

/// Panics unless comparing `lhs` with `rhs` obeys these laws:
///
/// * comparing a document with itself yields no changes;
/// * swapping the inputs yields the reversed change list;
/// * without key hints, an empty result means the documents are equal;
/// * every change renders to exactly one line.
///
/// Key matching ignores element order, so equal-by-key arrays may produce
/// an empty result for unequal documents.
///
/// ```
/// use jdl_core::{CompareOptions, Node};
///
/// let lhs = Node::from_json_str("[{\"id\":1},{\"id\":2}]")?;
/// let rhs = Node::from_json_str("[{\"id\":2},{\"id\":1}]")?;
/// let options = CompareOptions::default().with_list_keys(["id"])?;
/// jdl_fuzz::check_compare_laws(&lhs, &rhs, &options);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn check_compare_laws(lhs: &Node, rhs: &Node, options: &CompareOptions) {
    assert!(lhs.compare(lhs, options).is_empty(), "self comparison of {lhs} is not empty");

    let forward = lhs.compare(rhs, options);
    let backward = rhs.compare(lhs, options);
    assert_eq!(backward, forward.reverse(), "comparing {lhs} and {rhs} is not antisymmetric");

    let positional = lhs.compare(rhs, &CompareOptions::default());
    assert_eq!(positional.is_empty(), lhs == rhs, "positional comparison of {lhs} and {rhs}");
    if options.list_keys().is_empty() {
        assert_eq!(forward, positional);
    }

    let rendered = forward.render(&RenderConfig::default());
    assert_eq!(rendered.lines().count(), forward.len());
}

fn random_options(unstructured: &mut Unstructured<'_>) -> Result<CompareOptions, arbitrary::Error> {
    let count = unstructured.int_in_range::<u8>(0..=2)?;
    let mut keys = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        keys.push(*unstructured.choose(&KEYS)?);
    }
    CompareOptions::default().with_list_keys(keys).map_err(|_| arbitrary::Error::IncorrectFormat)
}

fn random_node(unstructured: &mut Unstructured<'_>) -> Option<Node> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Node::from_json_value(value).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    match unstructured.int_in_range::<u8>(0..=5)? {
        0..=3 => json_leaf(unstructured),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                let key = (*unstructured.choose(&KEYS)?).to_owned();
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    match unstructured.int_in_range::<u8>(0..=3)? {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        Ok(JsonNumber::from(unstructured.int_in_range::<i32>(-16..=16)?))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_harness_handles_utf8_and_garbage() {
        fuzz_parse(br"{}");
        fuzz_parse(b"[1, {\"a\": null}]");
        fuzz_parse(&[0xff, 0xfe, 0x00]);
    }

    #[test]
    fn compare_harness_runs_on_fixed_seeds() {
        for seed in [&b"compare"[..], &[0; 64], &[0xff; 64], b"\x05\x01\x02\x03\x04\x05\x06\x07"] {
            fuzz_compare(seed);
        }
    }

    #[test]
    fn reordered_keyed_elements_satisfy_the_laws() {
        let lhs = Node::from_json_str("{\"a\":[{\"id\":1,\"v\":\"x\"},{\"id\":2}]}").unwrap();
        let rhs = Node::from_json_str("{\"a\":[{\"id\":2},{\"id\":1,\"v\":\"x\"}]}").unwrap();
        let options = CompareOptions::default().with_list_keys(["id"]).unwrap();
        assert!(lhs.compare(&rhs, &options).is_empty());
        assert_ne!(lhs, rhs);
        check_compare_laws(&lhs, &rhs, &options);
    }

    #[test]
    fn compare_harness_runs_on_many_byte_patterns() {
        for step in 1u8..=32 {
            let data: Vec<u8> = (0..256u16).map(|i| (i as u8).wrapping_mul(step)).collect();
            fuzz_compare(&data);
        }
    }
}
