//! Case-insensitive, multi-value header map.
//!
//! # Design
//! Values are keyed by the lower-cased header name. A second map remembers
//! the first spelling ever seen for each lower-cased name; that spelling is
//! what `keys()`, `for_each()` and `to_json()` report. Every mutation goes
//! through `store`, `remember_name` and `forget`, which keep the two maps
//! holding exactly the same set of keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{HttpError, Result};

/// A header value given to `set` or to a mapping constructor.
///
/// `Many` is joined with `,` by `set`, but appended one by one when used in
/// a mapping constructor. Deserializes from a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HeaderValues {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<Vec<&str>> for HeaderValues {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderValues {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Request or response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    headers: IndexMap<String, Vec<String>>,
    normalized_names: IndexMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a name → value(s) mapping.
    ///
    /// Each name is cleared first, then every value is appended, so names
    /// that collide case-insensitively keep only the last entry's values.
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<HeaderValues>,
    {
        let mut headers = Self::new();
        for (name, value) in entries {
            let name = name.as_ref();
            headers.delete(name);
            match value.into() {
                HeaderValues::One(value) => headers.append(name, &value),
                HeaderValues::Many(values) => {
                    for value in values {
                        headers.append(name, &value);
                    }
                }
            }
        }
        headers
    }

    /// Deep copy of `other`, appending each value under its display name.
    pub fn copy_from(other: &Headers) -> Self {
        let mut headers = Self::new();
        other.for_each(|values, name, _| {
            for value in values {
                headers.append(name, value);
            }
        });
        headers
    }

    /// Parse a raw header block, one `Name: value` per line.
    ///
    /// Lines without a colon, or starting with one, are skipped. A repeated
    /// name overwrites the earlier value.
    pub fn from_response_header_string(block: &str) -> Self {
        let mut headers = Self::new();
        for line in block.split('\n') {
            match line.find(':') {
                Some(index) if index > 0 => {
                    headers.set(&line[..index], line[index + 1..].trim());
                }
                _ => tracing::trace!(line = %line, "skipping malformed header line"),
            }
        }
        headers
    }

    /// Overwrite all values for `name`. A list is joined with `,`.
    ///
    /// The display spelling is only recorded the first time a name is seen.
    /// An empty list leaves the headers untouched.
    pub fn set(&mut self, name: &str, value: impl Into<HeaderValues>) {
        let value = match value.into() {
            HeaderValues::One(value) => value,
            HeaderValues::Many(values) if values.is_empty() => return,
            HeaderValues::Many(values) => values.join(","),
        };
        self.store(name, vec![value]);
        self.remember_name(name);
    }

    /// Add a value, or `set` it when the name has no values yet.
    pub fn append(&mut self, name: &str, value: &str) {
        match self.headers.get_mut(&name.to_lowercase()) {
            Some(values) => values.push(value.to_string()),
            None => self.set(name, value),
        }
    }

    pub fn delete(&mut self, name: &str) {
        self.forget(&name.to_lowercase());
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value for `name`, or `None` when the name is absent.
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
    }

    pub fn has(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_lowercase())
    }

    /// Display names in order of first appearance.
    pub fn keys(&self) -> Vec<String> {
        self.normalized_names.values().cloned().collect()
    }

    pub fn values(&self) -> Vec<Vec<String>> {
        self.headers.values().cloned().collect()
    }

    /// Visit `(values, display name, all values keyed by lower-cased name)`.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&[String], &str, &IndexMap<String, Vec<String>>),
    {
        for (lc_name, values) in &self.headers {
            let name = self
                .normalized_names
                .get(lc_name)
                .map_or(lc_name.as_str(), String::as_str);
            visitor(values, name, &self.headers);
        }
    }

    /// Display name → values, each stored value split on `,`.
    ///
    /// Values that legitimately contain commas come back split.
    pub fn to_json(&self) -> IndexMap<String, Vec<String>> {
        let mut serialized = IndexMap::new();
        self.for_each(|values, name, _| {
            let split = values
                .iter()
                .flat_map(|value| value.split(','))
                .map(str::to_string)
                .collect();
            serialized.insert(name.to_string(), split);
        });
        serialized
    }

    /// Not supported; use `for_each`, `keys` or `values`.
    pub fn entries(&self) -> Result<Vec<(String, Vec<String>)>> {
        Err(HttpError::Unimplemented("entries"))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    fn store(&mut self, name: &str, values: Vec<String>) {
        self.headers.insert(name.to_lowercase(), values);
    }

    fn remember_name(&mut self, name: &str) {
        let lc_name = name.to_lowercase();
        if !self.normalized_names.contains_key(&lc_name) {
            self.normalized_names.insert(lc_name, name.to_string());
        }
    }

    fn forget(&mut self, lc_name: &str) {
        self.normalized_names.shift_remove(lc_name);
        self.headers.shift_remove(lc_name);
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_ignore_case() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "text/plain");
        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
        assert!(headers.has("cOnTeNt-TyPe"));
    }

    #[test]
    fn append_collects_values_in_order() {
        let mut headers = Headers::new();
        headers.append("Accept", "text/html");
        headers.append("accept", "application/json");
        assert_eq!(
            headers.get_all("ACCEPT").unwrap(),
            ["text/html", "application/json"]
        );
        assert_eq!(headers.get("accept"), Some("text/html"));
    }

    #[test]
    fn first_append_behaves_like_set() {
        let mut appended = Headers::new();
        appended.append("X-Id", "1");
        let mut set = Headers::new();
        set.set("X-Id", "1");
        assert_eq!(appended, set);
    }

    #[test]
    fn set_joins_lists() {
        let mut headers = Headers::new();
        headers.set("Accept", ["a", "b"]);
        assert_eq!(headers.get_all("accept").unwrap(), ["a,b"]);
    }

    #[test]
    fn set_with_empty_list_changes_nothing() {
        let mut headers = Headers::new();
        headers.set("Accept", Vec::<String>::new());
        assert!(!headers.has("accept"));
        assert!(headers.keys().is_empty());
    }

    #[test]
    fn first_seen_spelling_wins() {
        let mut headers = Headers::new();
        headers.set("x-trace", "1");
        headers.set("X-Trace", "2");
        assert_eq!(headers.keys(), vec!["x-trace"]);
        assert_eq!(headers.get("x-trace"), Some("2"));
    }

    #[test]
    fn delete_drops_spelling_too() {
        let mut headers = Headers::new();
        headers.set("x-trace", "1");
        headers.delete("X-TRACE");
        assert!(!headers.has("x-trace"));
        assert!(headers.keys().is_empty());
        headers.set("X-Trace", "2");
        assert_eq!(headers.keys(), vec!["X-Trace"]);
    }

    #[test]
    fn delete_absent_is_a_no_op() {
        let mut headers = Headers::new();
        headers.delete("missing");
        assert!(headers.is_empty());
    }

    #[test]
    fn missing_name_is_none() {
        let headers = Headers::new();
        assert_eq!(headers.get("nope"), None);
        assert_eq!(headers.get_all("nope"), None);
    }

    #[test]
    fn from_map_accepts_scalars_and_lists() {
        let headers = Headers::from_map([
            ("Accept", HeaderValues::from(vec!["a", "b"])),
            ("X-One", HeaderValues::from("1")),
        ]);
        assert_eq!(headers.get_all("accept").unwrap(), ["a", "b"]);
        assert_eq!(headers.get("x-one"), Some("1"));
        assert_eq!(headers.keys(), vec!["Accept", "X-One"]);
    }

    #[test]
    fn copy_is_independent() {
        let mut original = Headers::new();
        original.append("Accept", "a");
        original.append("Accept", "b");
        let mut copy = Headers::copy_from(&original);
        assert_eq!(copy, original);
        copy.append("accept", "c");
        copy.set("X-New", "1");
        assert_eq!(original.get_all("accept").unwrap(), ["a", "b"]);
        assert!(!original.has("x-new"));
    }

    #[test]
    fn parses_response_header_block() {
        let headers = Headers::from_response_header_string("A: 1\nB:2\nmalformed\n:novalue");
        assert_eq!(headers.keys(), vec!["A", "B"]);
        assert_eq!(headers.get("a"), Some("1"));
        assert_eq!(headers.get("b"), Some("2"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn parses_crlf_block_and_splits_on_first_colon() {
        let headers =
            Headers::from_response_header_string("Date: Fri, 20 Nov 2015 01:45:26 GMT\r\nX-Empty:\r\n");
        assert_eq!(headers.get("date"), Some("Fri, 20 Nov 2015 01:45:26 GMT"));
        assert_eq!(headers.get("x-empty"), Some(""));
    }

    #[test]
    fn keys_and_values_line_up() {
        let mut headers = Headers::new();
        headers.set("A", "1");
        headers.append("b", "2");
        headers.append("B", "3");
        assert_eq!(headers.keys(), vec!["A", "b"]);
        assert_eq!(headers.values(), vec![vec!["1"], vec!["2", "3"]]);
    }

    #[test]
    fn for_each_reports_display_names_and_full_map() {
        let mut headers = Headers::new();
        headers.set("Content-Type", "text/plain");
        let mut seen = Vec::new();
        headers.for_each(|values, name, all| {
            seen.push((name.to_string(), values.to_vec(), all.len()));
        });
        assert_eq!(seen, vec![("Content-Type".to_string(), vec!["text/plain".to_string()], 1)]);
    }

    // Known quirk: comma-bearing values are split when serialized.
    #[test]
    fn to_json_splits_values_on_commas() {
        let mut headers = Headers::new();
        headers.set("Accept", ["a", "b"]);
        headers.append("Date", "Fri, 20 Nov 2015");
        let json = headers.to_json();
        assert_eq!(json["Accept"], vec!["a", "b"]);
        assert_eq!(json["Date"], vec!["Fri", " 20 Nov 2015"]);
        let value = serde_json::to_value(&headers).unwrap();
        assert_eq!(value["Accept"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn entries_is_unimplemented() {
        let headers = Headers::new();
        assert!(matches!(headers.entries(), Err(HttpError::Unimplemented("entries"))));
    }
}
