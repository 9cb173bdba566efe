//! Percent-encoding of query-string keys and values.
//!
//! `standard_encoding` escapes everything `encodeURIComponent` would, then
//! leaves `@ : $ , ; + = ? /` readable again.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped by `standard_encoding`.
///
/// Starts from every non-alphanumeric byte and exempts the URI-component
/// unreserved marks plus the re-allowed query delimiters.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    // unreserved marks
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    // re-allowed delimiters
    .remove(b'@')
    .remove(b':')
    .remove(b'$')
    .remove(b',')
    .remove(b';')
    .remove(b'+')
    .remove(b'=')
    .remove(b'?')
    .remove(b'/');

/// Percent-encode `value` for use as a query key or value.
pub fn standard_encoding(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// Encodes the key and value halves of each `key=value` query fragment.
///
/// Implementations are shared between a `UrlSearchParams` and its clones, so
/// they must be stateless or internally synchronized.
pub trait QueryEncoder: Send + Sync {
    fn encode_key(&self, key: &str) -> String {
        standard_encoding(key)
    }

    fn encode_value(&self, value: &str) -> String {
        standard_encoding(value)
    }
}

/// The default encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEncoder;

impl QueryEncoder for StandardEncoder {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reallowed_characters_stay_readable() {
        assert_eq!(standard_encoding("@:$,;+=?/"), "@:$,;+=?/");
    }

    #[test]
    fn other_reserved_characters_are_escaped() {
        assert_eq!(standard_encoding("a b"), "a%20b");
        assert_eq!(standard_encoding("#&"), "%23%26");
        assert_eq!(standard_encoding("[]"), "%5B%5D");
    }

    #[test]
    fn unreserved_marks_are_untouched() {
        assert_eq!(standard_encoding("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
    }

    #[test]
    fn non_ascii_is_utf8_escaped() {
        assert_eq!(standard_encoding("é"), "%C3%A9");
    }

    #[test]
    fn custom_encoder_overrides_one_half() {
        struct KeepValues;
        impl QueryEncoder for KeepValues {
            fn encode_value(&self, value: &str) -> String {
                value.to_string()
            }
        }
        let encoder = KeepValues;
        assert_eq!(encoder.encode_key("a b"), "a%20b");
        assert_eq!(encoder.encode_value("a b"), "a b");
    }
}
