//! Type table: qualified type name → struct definition

use super::names::{FieldName, ProcName};
use super::types::{ItemAnnotation, Typ, TypeName};
use std::collections::{HashMap, HashSet};

/// A field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Qualified field name
    pub name: FieldName,
    /// Field type
    pub typ: Typ,
    /// Field annotations
    pub annotation: ItemAnnotation,
}

/// Structural definition of a class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructDef {
    /// Instance fields in declaration order
    pub fields: Vec<StructField>,
    /// Static fields in declaration order
    pub statics: Vec<StructField>,
    /// Direct supertypes
    pub supers: Vec<TypeName>,
    /// Declared methods
    pub methods: Vec<ProcName>,
    /// Class annotations
    pub annotations: ItemAnnotation,
}

impl StructDef {
    /// Instance or static field declared directly on this struct
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields
            .iter()
            .chain(self.statics.iter())
            .find(|f| f.name.field_name == name)
    }
}

/// Registry of struct definitions
///
/// Owned by the caller; inserting an existing name replaces the previous
/// definition wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    structs: HashMap<TypeName, StructDef>,
}

impl TypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, returning the one it replaced
    pub fn insert(&mut self, name: TypeName, def: StructDef) -> Option<StructDef> {
        self.structs.insert(name, def)
    }

    /// Definition of a type
    pub fn get(&self, name: &TypeName) -> Option<&StructDef> {
        self.structs.get(name)
    }

    /// Whether a type is defined
    pub fn contains(&self, name: &TypeName) -> bool {
        self.structs.contains_key(name)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Iterate over all definitions in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&TypeName, &StructDef)> {
        self.structs.iter()
    }

    /// Move every definition of `other` into this table; `other` wins on conflicts
    pub fn merge(&mut self, other: TypeTable) {
        self.structs.extend(other.structs);
    }

    /// Find a field on `name` or the nearest supertype declaring it.
    ///
    /// Supertypes are searched breadth-first; cyclic hierarchies terminate.
    pub fn resolve_field(&self, name: &TypeName, field: &str) -> Option<&StructField> {
        self.ancestors(name)
            .into_iter()
            .filter_map(|t| self.structs.get(t))
            .find_map(|def| def.field(field))
    }

    /// Whether `sub` is `sup` or transitively extends it
    pub fn is_subtype(&self, sub: &TypeName, sup: &TypeName) -> bool {
        self.ancestors(sub).into_iter().any(|t| t == sup)
    }

    /// `name` followed by its known supertypes, breadth-first, each once
    fn ancestors<'a>(&'a self, name: &'a TypeName) -> Vec<&'a TypeName> {
        let mut seen: HashSet<&TypeName> = HashSet::new();
        let mut order = vec![name];
        seen.insert(name);
        let mut i = 0;
        while i < order.len() {
            if let Some(def) = self.structs.get(order[i]) {
                for sup in &def.supers {
                    if seen.insert(sup) {
                        order.push(sup);
                    }
                }
            }
            i += 1;
        }
        order
    }
}
