//! # silload - IR loader for a static-analysis engine
//!
//! Rebuilds the program model an analysis engine works on from the JSON
//! documents emitted by an external capture tool:
//!
//! - a **type environment** document becomes a [`TypeTable`] mapping
//!   qualified type names to struct definitions;
//! - a **CFG** document becomes a [`ControlFlowGraph`] holding every
//!   procedure with its attributes and every node with its instructions and
//!   resolved edges.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use silload::{decode_cfg, NodeKind};
//!
//! # fn main() -> silload::Result<()> {
//! let doc = json!({
//!     "procs": [{
//!         "pd_id": 0,
//!         "pd_start_node": 1,
//!         "pd_exit_node": 1,
//!         "pd_attributes": {
//!             "access": "Public",
//!             "captured": [], "exceptions": [], "formals": [], "locals": [],
//!             "is_abstract": false, "is_bridge_method": false,
//!             "is_defined": true, "is_synthetic_method": false,
//!             "loc": {"line": 1, "col": 1},
//!             "method_annotations": {"return": [], "params": []},
//!             "proc_name": {"method_name": "Main", "class_name": "App.Program",
//!                           "parameters": [], "return_type": {"type_kind": "Tvoid"},
//!                           "is_static": true},
//!             "ret_type": {"type_kind": "Tvoid"}
//!         }
//!     }],
//!     "nodes": [{
//!         "nd_id": 1, "nd_proc_id": 0, "nd_kind": {"kind": "StartNode"},
//!         "nd_loc": {"line": 1, "col": 1}, "nd_instrs": [], "nd_temps": [],
//!         "nd_dead_pvars_before": [], "nd_dead_pvars_after": [],
//!         "nd_succ_ids": [], "nd_pred_ids": [], "nd_exn_ids": []
//!     }]
//! });
//!
//! let cfg = decode_cfg(&doc)?;
//! let main = cfg.procedures().next().unwrap();
//! assert_eq!(main.start(), main.exit());
//! assert_eq!(cfg[main.start()].kind(), &NodeKind::Start);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! JSON text → serde_json::Value → Decoder ─┬─ type_environment → TypeTable
//!                                          └─ cfg (register, link) → ControlFlowGraph
//! ```
//!
//! - [`decode`] - wire decoders, leaf first: enums, names, values,
//!   instructions, graph construction, type environment
//! - [`ir`] - the resolved model
//! - [`loader`] - text/file front door, [`TranslationUnit`]
//! - [`config`] - [`DecodeOptions`]
//! - [`error`] - [`Error`] and its structural/reference classification
//!
//! Decoding is all-or-nothing: the first malformed construct or dangling id
//! aborts the document and nothing partial is returned.

#[macro_use]
mod macros;

pub mod config;
pub mod decode;
pub mod error;
pub mod ir;
pub mod loader;

pub use config::DecodeOptions;
pub use decode::{Decoder, WireEnum};
pub use error::{Entity, Error, ErrorKind, Result};
pub use ir::{
    ControlFlowGraph, Expr, Instr, Node, NodeId, NodeKind, ProcId, ProcName, Procedure, Typ,
    TypeName, TypeTable,
};
pub use loader::{Loader, TranslationUnit};

/// Version of the loader
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decode a type-environment document with default options
pub fn decode_type_environment(document: &serde_json::Value) -> Result<TypeTable> {
    Decoder::default().type_environment(document)
}

/// Decode a CFG document with default options
pub fn decode_cfg(document: &serde_json::Value) -> Result<ControlFlowGraph> {
    Decoder::default().cfg(document)
}

/// Decode a type-environment document into an existing table.
///
/// On error the table is left untouched.
pub fn extend_type_environment(table: &mut TypeTable, document: &serde_json::Value) -> Result<()> {
    Decoder::default().extend_type_environment(table, document)
}
