//! Type environment builder

use super::json::{self, field, list_field};
use super::Decoder;
use crate::ir::{StructDef, StructField, TypeTable};
use crate::Result;
use serde_json::Value;
use tracing::debug;

impl Decoder {
    /// Decode a type-environment document into a fresh table.
    ///
    /// Later entries for a name replace earlier ones entirely.
    pub fn type_environment(&self, document: &Value) -> Result<TypeTable> {
        let entries = json::as_array(document, "type environment document")?;
        debug!(entries = entries.len(), "decoding type environment");

        let mut table = TypeTable::new();
        for entry in entries {
            const CTX: &str = "type environment entry";
            let name = self.type_name(field(entry, "type_name", CTX)?)?;
            let def = self.struct_def(field(entry, "type_struct", CTX)?)?;
            if table.insert(name.clone(), def).is_some() {
                debug!(type_name = %name, "type redefined; keeping the later definition");
            }
        }
        Ok(table)
    }

    /// Decode a document and merge it into a caller-owned table.
    ///
    /// The table is only touched once the whole document has decoded.
    pub fn extend_type_environment(&self, table: &mut TypeTable, document: &Value) -> Result<()> {
        let decoded = self.type_environment(document)?;
        table.merge(decoded);
        Ok(())
    }

    /// Decode a struct body
    pub fn struct_def(&self, value: &Value) -> Result<StructDef> {
        const CTX: &str = "struct definition";
        Ok(StructDef {
            fields: list_field(value, "instance_fields", CTX, |f| self.struct_field(f))?,
            statics: list_field(value, "static_fields", CTX, |f| self.struct_field(f))?,
            supers: list_field(value, "supers", CTX, |s| self.type_name(s))?,
            methods: list_field(value, "methods", CTX, |m| self.proc_name(m))?,
            annotations: self.item_annotation(field(value, "annots", CTX)?)?,
        })
    }

    fn struct_field(&self, value: &Value) -> Result<StructField> {
        const CTX: &str = "struct field";
        Ok(StructField {
            name: self.field_name(field(value, "field_name", CTX)?)?,
            typ: self.typ(field(value, "type", CTX)?)?,
            annotation: self.item_annotation(field(value, "annotation", CTX)?)?,
        })
    }
}
