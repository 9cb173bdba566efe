//! Ordered multi-value query-string model.
//!
//! # Design
//! Names map to an ordered list of values; names iterate in first-insertion
//! order (a deleted name goes to the back when re-added). Rendering emits one
//! `key=value` fragment per value, each half run through the shared
//! `QueryEncoder`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::encoding::{QueryEncoder, StandardEncoder};

/// A parsed, mutable query string.
pub struct UrlSearchParams {
    raw_params: String,
    encoder: Arc<dyn QueryEncoder>,
    params: IndexMap<String, Vec<String>>,
}

impl UrlSearchParams {
    /// Parse `raw` with the standard encoder.
    pub fn new(raw: &str) -> Self {
        Self::with_encoder(raw, Arc::new(StandardEncoder))
    }

    pub fn with_encoder(raw: &str, encoder: Arc<dyn QueryEncoder>) -> Self {
        Self {
            raw_params: raw.to_string(),
            encoder,
            params: parse_params(raw),
        }
    }

    /// Build from name/values pairs, appending every value in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let mut params = Self::default();
        for (name, values) in pairs {
            for value in values {
                params.append(name.as_ref(), Some(value.as_ref()));
            }
        }
        params
    }

    /// The string this instance was parsed from.
    pub fn raw_params(&self) -> &str {
        &self.raw_params
    }

    pub fn encoder(&self) -> &Arc<dyn QueryEncoder> {
        &self.encoder
    }

    pub fn has(&self, param: &str) -> bool {
        self.params.contains_key(param)
    }

    /// First value stored for `param`.
    pub fn get(&self, param: &str) -> Option<&str> {
        self.params
            .get(param)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `param`; empty when absent.
    pub fn get_all(&self, param: &str) -> Vec<String> {
        self.params.get(param).cloned().unwrap_or_default()
    }

    /// Replace every value of `param` with `value`. `None` deletes the name.
    pub fn set(&mut self, param: &str, value: Option<&str>) {
        let Some(value) = value else {
            self.delete(param);
            return;
        };
        let list = self.params.entry(param.to_string()).or_default();
        list.clear();
        list.push(value.to_string());
    }

    /// Add one value to `param`. `None` is ignored.
    pub fn append(&mut self, param: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.params
                .entry(param.to_string())
                .or_default()
                .push(value.to_string());
        }
    }

    pub fn delete(&mut self, param: &str) {
        self.params.shift_remove(param);
    }

    /// For every name in `other`, keep only `other`'s first value.
    ///
    /// Names that exist only in `self` are left alone.
    pub fn set_all(&mut self, other: &UrlSearchParams) {
        for (param, values) in &other.params {
            let list = self.params.entry(param.clone()).or_default();
            list.clear();
            list.extend(values.first().cloned());
        }
    }

    /// For every name in `other`, push all of its values after ours.
    pub fn append_all(&mut self, other: &UrlSearchParams) {
        for (param, values) in &other.params {
            self.params
                .entry(param.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
    }

    /// For every name in `other`, replace our values with all of its values.
    pub fn replace_all(&mut self, other: &UrlSearchParams) {
        for (param, values) in &other.params {
            let list = self.params.entry(param.clone()).or_default();
            list.clear();
            list.extend(values.iter().cloned());
        }
    }

    /// Iterate names and their values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Split on `&`, then each fragment on its first `=`.
fn parse_params(raw: &str) -> IndexMap<String, Vec<String>> {
    let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
    if raw.is_empty() {
        return map;
    }
    for fragment in raw.split('&') {
        let (key, value) = fragment.split_once('=').unwrap_or((fragment, ""));
        map.entry(key.to_string()).or_default().push(value.to_string());
    }
    map
}

impl Default for UrlSearchParams {
    fn default() -> Self {
        Self::new("")
    }
}

/// Independent copy sharing the encoder.
impl Clone for UrlSearchParams {
    fn clone(&self) -> Self {
        let mut clone = Self::with_encoder("", Arc::clone(&self.encoder));
        clone.append_all(self);
        clone
    }
}

impl PartialEq for UrlSearchParams {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
    }
}

impl fmt::Debug for UrlSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlSearchParams")
            .field("raw_params", &self.raw_params)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, values) in &self.params {
            for value in values {
                if !first {
                    f.write_str("&")?;
                }
                first = false;
                write!(
                    f,
                    "{}={}",
                    self.encoder.encode_key(key),
                    self.encoder.encode_value(value)
                )?;
            }
        }
        Ok(())
    }
}
