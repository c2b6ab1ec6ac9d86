//! Primitive & enum decoders
//!
//! Fixed tag → variant tables. The tables are generated by `wire_enum!` next
//! to each enum declaration; this module holds the trait they implement and
//! the decode entry points. There is no fallback: a tag that is not in the
//! table is always an error naming both the tag and the enum.

use super::json;
use crate::{Error, Result};
use serde_json::Value;

/// A fieldless enum with a one-to-one wire tag table
pub trait WireEnum: Sized + Copy + 'static {
    /// Human-readable enum name used in errors
    const NAME: &'static str;

    /// Variant for a wire tag
    fn from_tag(tag: &str) -> Option<Self>;

    /// Wire tag of a variant
    fn tag(self) -> &'static str;

    /// Variant for a wire tag, or an unknown-variant error
    fn parse_tag(tag: &str) -> Result<Self> {
        Self::from_tag(tag).ok_or_else(|| Error::unknown_variant(Self::NAME, tag))
    }
}

/// Decode a JSON string into a wire enum
pub fn decode_enum<E: WireEnum>(value: &Value) -> Result<E> {
    E::parse_tag(json::as_str(value, E::NAME)?)
}

pub(crate) fn enum_field<E: WireEnum>(value: &Value, key: &'static str, context: &'static str) -> Result<E> {
    decode_enum(json::field(value, key, context)?)
}
