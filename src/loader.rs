//! # Document Loader
//!
//! Text-level front door: parses whole documents with `serde_json` and hands
//! the trees to a fresh [`Decoder`]. A `Loader` only holds options, so one
//! instance can be shared by any number of worker threads.

use crate::config::DecodeOptions;
use crate::decode::Decoder;
use crate::ir::{ControlFlowGraph, TypeTable};
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// The model of one translation unit
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    /// Struct definitions declared by the unit
    pub types: TypeTable,
    /// Procedures and their control-flow graphs
    pub cfg: ControlFlowGraph,
}

/// Loads type-environment and CFG documents
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: DecodeOptions,
}

impl Loader {
    /// Create a loader with options
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    fn decoder(&self) -> Decoder {
        Decoder::new(self.options.clone())
    }

    /// Decode a type-environment document from JSON text
    pub fn type_environment_from_str(&self, json: &str) -> Result<TypeTable> {
        let document: Value = serde_json::from_str(json)?;
        self.decoder().type_environment(&document)
    }

    /// Decode a CFG document from JSON text
    pub fn cfg_from_str(&self, json: &str) -> Result<ControlFlowGraph> {
        let document: Value = serde_json::from_str(json)?;
        self.decoder().cfg(&document)
    }

    /// Decode both documents of a translation unit; fails if either does
    pub fn load_unit(&self, tenv_json: &str, cfg_json: &str) -> Result<TranslationUnit> {
        Ok(TranslationUnit {
            types: self.type_environment_from_str(tenv_json)?,
            cfg: self.cfg_from_str(cfg_json)?,
        })
    }

    /// Read and decode both documents of a translation unit
    pub fn load_unit_from_paths(
        &self,
        tenv_path: impl AsRef<Path>,
        cfg_path: impl AsRef<Path>,
    ) -> Result<TranslationUnit> {
        let tenv_path = tenv_path.as_ref();
        let cfg_path = cfg_path.as_ref();
        debug!(tenv = %tenv_path.display(), cfg = %cfg_path.display(), "loading translation unit");

        let tenv_json = read_document(tenv_path)?;
        let cfg_json = read_document(cfg_path)?;
        self.load_unit(&tenv_json, &cfg_json)
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
