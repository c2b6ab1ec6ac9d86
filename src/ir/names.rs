//! Names and references: procedures, fields, identifiers, program variables, locations

use super::types::{Typ, TypeName};
use crate::config::DecodeOptions;
use std::fmt;

/// Whether a method takes a receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MethodKind {
    /// Instance method (implicit `this`)
    Instance,
    /// Static method
    Static,
}

/// A method signature in a managed-language program
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodName {
    /// Declaring type
    pub class_name: TypeName,
    /// Simple method name
    pub method_name: String,
    /// Ordered parameter types
    pub parameters: Vec<Typ>,
    /// Return type; `None` for constructors
    pub return_type: Option<Typ>,
    /// Static or instance
    pub kind: MethodKind,
}

/// Procedure name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcName {
    /// The shared built-in allocation procedure
    BuiltinNew,
    /// A user or library method
    Method(MethodName),
}

impl ProcName {
    /// Canonical name of the built-in allocation procedure
    pub const BUILTIN_NEW: &'static str = "__new";

    /// Simple method name ([`ProcName::BUILTIN_NEW`] for the built-in)
    pub fn method_name(&self) -> &str {
        match self {
            ProcName::BuiltinNew => Self::BUILTIN_NEW,
            ProcName::Method(m) => &m.method_name,
        }
    }

    /// Method name as the producer spelled it, given the options the name
    /// was decoded with
    pub fn wire_method_name<'a>(&'a self, options: &'a DecodeOptions) -> &'a str {
        match self {
            ProcName::BuiltinNew => &options.builtin_new_name,
            ProcName::Method(m) => &m.method_name,
        }
    }

    /// Declaring type, if any
    pub fn class_name(&self) -> Option<&TypeName> {
        match self {
            ProcName::BuiltinNew => None,
            ProcName::Method(m) => Some(&m.class_name),
        }
    }

    /// Whether this is the built-in allocation procedure
    pub fn is_builtin_new(&self) -> bool {
        matches!(self, ProcName::BuiltinNew)
    }

    /// Whether this is a static method
    pub fn is_static(&self) -> bool {
        matches!(self, ProcName::Method(m) if m.kind == MethodKind::Static)
    }
}

impl fmt::Display for ProcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcName::BuiltinNew => f.write_str(Self::BUILTIN_NEW),
            ProcName::Method(m) => {
                if let Some(ret) = &m.return_type {
                    write!(f, "{} ", ret)?;
                }
                write!(f, "{}::{}(", m.class_name, m.method_name)?;
                for (i, param) in m.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Field of a class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName {
    /// Declaring class
    pub class_name: TypeName,
    /// Field name
    pub field_name: String,
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.field_name)
    }
}

wire_enum! {
    /// Identifier kinds
    pub enum IdentKind as "identifier kind" {
        /// Ordinary temporary
        Normal = "Normal",
        /// Primed temporary
        Primed = "Primed",
        /// Footprint temporary
        Footprint = "Footprint",
        /// Placeholder with no binding
        None = "None",
    }
}

/// Compiler-introduced temporary; identity is (kind, name, stamp)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident {
    /// Kind of the temporary
    pub kind: IdentKind,
    /// Base name
    pub name: String,
    /// Disambiguating stamp
    pub stamp: i64,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            IdentKind::Normal => "n$",
            IdentKind::Primed => "#",
            IdentKind::Footprint => "@",
            IdentKind::None => "_",
        };
        if self.name.is_empty() {
            write!(f, "{}{}", prefix, self.stamp)
        } else {
            write!(f, "{}{}{}", prefix, self.name, self.stamp)
        }
    }
}

/// Storage class of a program variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PvarKind {
    /// Local of the given procedure
    Local(ProcName),
    /// Callee-side variable of the given procedure
    Called(ProcName),
    /// Global
    Global,
}

/// Named storage location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pvar {
    /// Variable name
    pub name: String,
    /// Storage class
    pub kind: PvarKind,
}

impl Pvar {
    /// Procedure owning this variable, for locals and called variables
    pub fn owner(&self) -> Option<&ProcName> {
        match &self.kind {
            PvarKind::Local(p) | PvarKind::Called(p) => Some(p),
            PvarKind::Global => None,
        }
    }

    /// Whether this is a global
    pub fn is_global(&self) -> bool {
        matches!(self.kind, PvarKind::Global)
    }
}

impl fmt::Display for Pvar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PvarKind::Global => write!(f, "#GB${}", self.name),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Source position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Line, -1 when unknown
    pub line: i32,
    /// Column, -1 when unknown
    pub col: i32,
    /// Source file, when the producer records one
    pub file: Option<String>,
}

impl Location {
    /// Location with no file
    pub fn new(line: i32, col: i32) -> Self {
        Self {
            line,
            col,
            file: None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file)?;
        }
        write!(f, "{}:{}", self.line, self.col)
    }
}
