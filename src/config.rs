//! Decoder configuration

use crate::{Error, Result};
use serde::Deserialize;

/// Options controlling how wire documents are decoded
///
/// Every field has a default matching the capture tool's conventions, so a
/// partial JSON object is a valid configuration:
///
/// ```
/// use silload::DecodeOptions;
///
/// let opts = DecodeOptions::from_json(r#"{"max_depth": 16}"#).unwrap();
/// assert_eq!(opts.max_depth, 16);
/// assert_eq!(opts.constructor_name, ".ctor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Maximum nesting of types and expressions before decoding is aborted.
    ///
    /// The default sits above `serde_json`'s own 128-level parse limit, so
    /// any document parsed from text is within it.
    pub max_depth: usize,
    /// Method name that marks a constructor (constructors carry no return type)
    pub constructor_name: String,
    /// Method name that denotes the shared built-in allocation procedure
    pub builtin_new_name: String,
    /// Separator between namespace components of a qualified type name
    pub namespace_separator: char,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            constructor_name: ".ctor".to_string(),
            builtin_new_name: "__new".to_string(),
            namespace_separator: '.',
        }
    }
}

impl DecodeOptions {
    /// Parse options from a JSON object; absent keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let opts: DecodeOptions = serde_json::from_str(json)?;
        if opts.max_depth == 0 {
            return Err(Error::ShapeMismatch {
                expected: "positive integer",
                context: "max_depth option",
                got: "0".to_string(),
            });
        }
        Ok(opts)
    }
}
