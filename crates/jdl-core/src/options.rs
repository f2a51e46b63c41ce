use serde::{Deserialize, Serialize};

use crate::OptionsError;

/// Configuration passed to [`Node::compare`](crate::Node::compare).
///
/// The only knob is the ordered list of key hints used to match array
/// elements by identity instead of by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompareOptions {
    #[serde(rename = "list_key")]
    list_keys: Vec<String>,
}

/// On-disk shape of the configuration object. `list_key` accepts a single
/// field name or an array of names.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    #[serde(default)]
    list_key: Option<ListKeys>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListKeys {
    One(String),
    Many(Vec<String>),
}

impl CompareOptions {
    /// Returns the key hints in the order they are tried.
    ///
    /// ```
    /// # use jdl_core::CompareOptions;
    /// let opts = CompareOptions::default().with_list_keys(["id", "name"])?;
    /// assert_eq!(opts.list_keys(), ["id", "name"]);
    /// # Ok::<(), jdl_core::OptionsError>(())
    /// ```
    #[must_use]
    pub fn list_keys(&self) -> &[String] {
        &self.list_keys
    }

    /// Sets the key hints. Order is preserved; repeated names after the first
    /// occurrence are dropped.
    ///
    /// ```
    /// # use jdl_core::CompareOptions;
    /// let opts = CompareOptions::default().with_list_keys(["sku", "id", "sku"])?;
    /// assert_eq!(opts.list_keys(), ["sku", "id"]);
    /// # Ok::<(), jdl_core::OptionsError>(())
    /// ```
    pub fn with_list_keys<I, S>(mut self, keys: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if key.trim().is_empty() {
                return Err(OptionsError::EmptyListKey);
            }
            if !collected.contains(&key) {
                collected.push(key);
            }
        }
        self.list_keys = collected;
        Ok(self)
    }

    /// Reads options from a JSON configuration object such as
    /// `{"list_key": ["id", "name"]}`.
    ///
    /// ```
    /// # use jdl_core::CompareOptions;
    /// let opts = CompareOptions::from_json_str("{\"list_key\": \"id\"}")?;
    /// assert_eq!(opts.list_keys(), ["id"]);
    /// # Ok::<(), jdl_core::OptionsError>(())
    /// ```
    pub fn from_json_str(input: &str) -> Result<Self, OptionsError> {
        let raw: RawOptions = serde_json::from_str(input)?;
        let keys = match raw.list_key {
            None => Vec::new(),
            Some(ListKeys::One(key)) => vec![key],
            Some(ListKeys::Many(keys)) => keys,
        };
        Self::default().with_list_keys(keys)
    }
}
