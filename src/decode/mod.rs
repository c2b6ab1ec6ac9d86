//! # Wire Decoders
//!
//! Turn the capture tool's JSON documents into the [`crate::ir`] model.
//!
//! ```text
//! decode/
//! ├── mod.rs     # Decoder (options + nesting guard), re-exports
//! ├── json.rs    # typed field access on serde_json::Value
//! ├── enums.rs   # WireEnum trait: tag → variant tables
//! ├── names.rs   # type/procedure/field names, idents, pvars, locations, int literals
//! ├── value.rs   # types, constants, expressions
//! ├── instr.rs   # instructions, annotations, procedure attributes
//! ├── graph.rs   # two-phase CFG construction
//! └── tenv.rs    # type environment builder
//! ```
//!
//! All decoding happens on an already parsed document; nothing here does I/O.
//! Every entry point either returns a complete value or the first error.

mod enums;
mod graph;
mod instr;
mod json;
mod names;
mod tenv;
mod value;

pub use enums::{decode_enum, WireEnum};

use crate::config::DecodeOptions;
use crate::{Error, Result};
use std::cell::Cell;

/// Stateless-per-document decoder
///
/// Holds the options and a nesting counter for the recursive parts of the
/// wire language. A `Decoder` is cheap to create; use one per thread.
#[derive(Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
    depth: Cell<usize>,
}

/// Restores the nesting counter when a recursive decode returns
pub(crate) struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}

impl Decoder {
    /// Create a decoder with the given options
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            depth: Cell::new(0),
        }
    }

    /// Options in effect
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Enter one level of type/expression nesting
    pub(crate) fn descend(&self, context: &'static str) -> Result<DepthGuard<'_>> {
        let next = self.depth.get() + 1;
        if next > self.options.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.options.max_depth,
                context,
            });
        }
        self.depth.set(next);
        Ok(DepthGuard { depth: &self.depth })
    }
}
