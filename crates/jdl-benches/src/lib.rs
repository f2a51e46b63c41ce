//! Benchmark corpora for `json-diff-lite`.
//!
//! Each [`Corpus`] synthesizes a pair of documents shaped like a common
//! comparison workload: wide objects, long record lists that shift by one
//! element, and the same lists matched by an identity field.
//!
//! # Examples
//!
//! ```
//! let corpus = jdl_benches::available_corpora()
//!     .iter()
//!     .find(|c| c.name() == "records-keyed")
//!     .expect("registered corpus");
//! let dataset = corpus.load()?;
//! assert_eq!(dataset.compare().len(), 2);
//! # Ok::<(), jdl_benches::LoadError>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use jdl_core::{CompareOptions, Diff, Node, OptionsError, ParseError, RenderConfig};
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use thiserror::Error;

const WIDE_OBJECT_KEYS: usize = 2_000;
const RECORD_COUNT: usize = 1_000;

/// Errors raised while building a corpus.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A generated document is not a valid [`Node`].
    #[error("invalid corpus document: {0}")]
    Document(#[from] ParseError),
    /// The corpus key hints were rejected.
    #[error("invalid corpus options: {0}")]
    Options(#[from] OptionsError),
}

/// A named pair of documents together with the options to compare them.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    list_keys: &'static [&'static str],
    build: fn() -> (JsonValue, JsonValue),
}

impl Corpus {
    /// Returns the corpus name used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the size of both documents serialized as compact JSON.
    #[must_use]
    pub fn fixture_bytes(&self) -> usize {
        let (before, after) = (self.build)();
        before.to_string().len() + after.to_string().len()
    }

    /// Builds both documents and the comparison options.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        let (before, after) = (self.build)();
        let options = CompareOptions::default().with_list_keys(self.list_keys.iter().copied())?;
        Ok(Dataset {
            before: Node::from_json_value(before)?,
            after: Node::from_json_value(after)?,
            options,
        })
    }
}

/// Parsed documents ready to be compared.
#[derive(Clone, Debug)]
pub struct Dataset {
    before: Node,
    after: Node,
    options: CompareOptions,
}

impl Dataset {
    /// Returns the original document.
    #[must_use]
    pub fn before(&self) -> &Node {
        &self.before
    }

    /// Returns the new document.
    #[must_use]
    pub fn after(&self) -> &Node {
        &self.after
    }

    /// Compares the original document with the new one.
    #[must_use]
    pub fn compare(&self) -> Diff {
        self.before.compare(&self.after, &self.options)
    }

    /// Renders `diff` as text lines.
    #[must_use]
    pub fn render_text(&self, diff: &Diff, config: &RenderConfig) -> String {
        diff.render(config)
    }
}

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

static CORPORA: [Corpus; 4] = [
    Corpus { name: "wide-object", list_keys: &[], build: wide_object },
    Corpus { name: "records-positional", list_keys: &[], build: shifted_records },
    Corpus { name: "records-keyed", list_keys: &["id"], build: shifted_records },
    Corpus { name: "nested-config", list_keys: &["name"], build: nested_config },
];

fn wide_object() -> (JsonValue, JsonValue) {
    let mut before = JsonMap::new();
    let mut after = JsonMap::new();
    for i in 0..WIDE_OBJECT_KEYS {
        let key = format!("key-{i:05}");
        before.insert(key.clone(), json!(i));
        if i % 10 != 0 {
            after.insert(key, json!(if i % 7 == 0 { i + 1 } else { i }));
        }
    }
    (JsonValue::Object(before), JsonValue::Object(after))
}

fn record(id: usize) -> JsonValue {
    json!({
        "id": id,
        "name": format!("user-{id}"),
        "active": id % 3 != 0,
        "tags": ["a", "b", id % 5],
    })
}

/// Prepends one record and drops the last, so every position shifts.
fn shifted_records() -> (JsonValue, JsonValue) {
    let before: Vec<JsonValue> = (0..RECORD_COUNT).map(record).collect();
    let mut after = Vec::with_capacity(RECORD_COUNT);
    after.push(record(RECORD_COUNT));
    after.extend(before.iter().take(RECORD_COUNT - 1).cloned());
    (json!({ "records": before }), json!({ "records": after }))
}

fn nested_config() -> (JsonValue, JsonValue) {
    let service = |i: usize, replicas: usize| {
        json!({
            "name": format!("svc-{i}"),
            "replicas": replicas,
            "ports": [{ "port": 8000 + i, "protocol": "tcp" }],
            "env": { "LOG_LEVEL": "info", "REGION": "eu" },
        })
    };
    let before: Vec<JsonValue> = (0..200).map(|i| service(i, 2)).collect();
    let after: Vec<JsonValue> =
        (0..200).rev().map(|i| service(i, if i % 20 == 0 { 3 } else { 2 })).collect();
    (json!({ "services": before }), json!({ "services": after }))
}
