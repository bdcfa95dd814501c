//! Tolerant decoding of lsblk scalar values.
//!
//! Depending on its version and flags, lsblk writes the same column as a JSON
//! string, number, boolean or `null`. [`RawToken`] accepts all of them and
//! keeps the textual form; the `decode_*` functions then normalize a token for
//! one specific field and report failures against that field's external key.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Unexpected};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{DecodeError, Result};
use crate::units::{format_iec, format_si};

const EXPECTED_SCALAR: &str = "a string, number or boolean";

/// Textual form of a scalar JSON value as lsblk wrote it.
///
/// `null` is not a token; fields hold `Option<RawToken>` so that a missing
/// key and an explicit `null` both decode to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken(String);

impl RawToken {
    pub fn new(text: impl Into<String>) -> Self {
        RawToken(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Builds a token from the verbatim JSON text of one value. Numbers keep
    /// their exact spelling (`2048.0`, `1e3`, integers past `u64`).
    fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        let unexpected = match text.as_bytes().first() {
            Some(b'"') => return serde_json::from_str::<String>(text).map(RawToken),
            Some(b'{') => Unexpected::Map,
            Some(b'[') => Unexpected::Seq,
            Some(b'n') => Unexpected::Unit,
            _ => return Ok(RawToken(text.to_string())),
        };
        Err(de::Error::invalid_type(unexpected, &EXPECTED_SCALAR))
    }
}

impl<'de> Deserialize<'de> for RawToken {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        RawToken::from_json(raw.get()).map_err(de::Error::custom)
    }
}

/// A byte count that lsblk may leave empty.
///
/// Only [`decode_quantity`] builds a present value, which keeps
/// `human_readable` equal to `format_si(exact_value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    exact_value: i64,
    raw_text: String,
    human_readable: String,
}

impl Quantity {
    pub fn zero() -> Self {
        Self {
            exact_value: 0,
            raw_text: String::new(),
            human_readable: format_si(0),
        }
    }

    #[inline]
    pub fn exact_value(&self) -> i64 {
        self.exact_value
    }

    /// The token exactly as received; empty when the field was absent.
    #[inline]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    #[inline]
    pub fn human_readable(&self) -> &str {
        &self.human_readable
    }

    /// True when the source carried a value, even if that value was `0`.
    pub fn is_present(&self) -> bool {
        !self.raw_text.is_empty()
    }

    pub fn human_readable_iec(&self) -> String {
        format_iec(self.exact_value)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.human_readable)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Canonical integers go out as numbers, anything else as the
        // original text, so decoding the output yields the same raw_text.
        if !self.is_present() {
            serializer.serialize_none()
        } else if self.exact_value.to_string() == self.raw_text {
            serializer.serialize_i64(self.exact_value)
        } else {
            serializer.serialize_str(&self.raw_text)
        }
    }
}

/// Boolean written as `true`/`false` in any case, or as an integer that is
/// truthy when positive.
pub fn decode_tri_bool(key: &str, raw: &str) -> Result<bool> {
    let token = raw.trim_matches('"').to_lowercase();
    match token.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => other
            .parse::<i64>()
            .map(|n| n > 0)
            .map_err(|_| DecodeError::scalar(key, raw, "a boolean or integer")),
    }
}

/// Absent flags are false.
pub(crate) fn decode_flag(key: &str, raw: Option<&RawToken>) -> Result<bool> {
    match raw {
        Some(token) => decode_tri_bool(key, token.as_str()),
        None => Ok(false),
    }
}

pub fn decode_quantity(key: &str, raw: Option<&str>) -> Result<Quantity> {
    let token = match raw {
        Some(token) if !token.is_empty() => token,
        _ => return Ok(Quantity::zero()),
    };

    let exact_value = token
        .parse::<i64>()
        .map_err(|_| DecodeError::scalar(key, token, "an integer byte count"))?;

    Ok(Quantity {
        exact_value,
        raw_text: token.to_string(),
        human_readable: format_si(exact_value),
    })
}

/// Integer attribute such as read-ahead or a sector size. Empty means unknown.
pub fn decode_integer(key: &str, raw: Option<&str>) -> Result<Option<i64>> {
    match raw {
        Some(token) if !token.is_empty() => token
            .parse::<i64>()
            .map(Some)
            .map_err(|_| DecodeError::scalar(key, token, "an integer")),
        _ => Ok(None),
    }
}

pub(crate) fn decode_text(raw: Option<RawToken>) -> String {
    raw.map(RawToken::into_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(json: &str) -> Option<RawToken> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_token_from_every_scalar_kind() {
        assert_eq!(token("\"sda\""), Some(RawToken::new("sda")));
        assert_eq!(token("512"), Some(RawToken::new("512")));
        assert_eq!(token("-1"), Some(RawToken::new("-1")));
        assert_eq!(token("true"), Some(RawToken::new("true")));
        assert_eq!(token("null"), None);
    }

    #[test]
    fn test_number_tokens_keep_their_spelling() {
        assert_eq!(token("2048.0"), Some(RawToken::new("2048.0")));
        assert_eq!(token("1e3"), Some(RawToken::new("1e3")));
        assert_eq!(
            token("18446744073709551616"),
            Some(RawToken::new("18446744073709551616"))
        );
        assert_eq!(token(" \"a\\u00e9\" "), Some(RawToken::new("a\u{e9}")));
    }

    #[test]
    fn test_token_rejects_containers() {
        assert!(serde_json::from_str::<RawToken>("[1]").is_err());
        assert!(serde_json::from_str::<RawToken>("{}").is_err());
    }

    #[test]
    fn test_fractional_number_is_not_a_quantity() {
        let raw = token("1.5").unwrap();
        let err = decode_quantity("size", Some(raw.as_str())).unwrap_err();
        assert_eq!(err.key(), Some("size"));
    }

    #[test]
    fn test_tri_bool_strips_embedded_quotes() {
        assert!(decode_tri_bool("rm", "\"1\"").unwrap());
        assert!(!decode_tri_bool("rm", "\"False\"").unwrap());
    }

    #[test]
    fn test_absent_flag_is_false() {
        assert!(!decode_flag("dax", None).unwrap());
    }

    #[test]
    fn test_quantity_serializes_as_number_or_null() {
        let q = decode_quantity("size", Some("2048")).unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "2048");
        assert_eq!(serde_json::to_string(&Quantity::zero()).unwrap(), "null");
    }

    #[test]
    fn test_non_canonical_quantity_serializes_as_text() {
        let q = decode_quantity("size", Some("0042")).unwrap();
        assert_eq!(q.exact_value(), 42);
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"0042\"");
        let q = decode_quantity("size", Some("+7")).unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"+7\"");
    }
}
