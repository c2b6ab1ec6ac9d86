//! Per-procedure attributes

use super::names::{Location, ProcName};
use super::types::{MethodAnnotation, Typ};

wire_enum! {
    /// Declared accessibility of a method
    pub enum AccessModifier as "access modifier" {
        /// No explicit modifier
        Default = "Default",
        /// `public`
        Public = "Public",
        /// `private`
        Private = "Private",
        /// `protected`
        Protected = "Protected",
    }
}

/// Variable captured by a closure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedVar {
    /// Variable name
    pub name: String,
    /// Variable type
    pub typ: Typ,
}

/// Formal parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formal {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub typ: Typ,
}

/// Local variable declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVar {
    /// Variable name
    pub name: String,
    /// Variable type
    pub typ: Typ,
    /// Modified inside a block/closure
    pub modify_in_block: bool,
    /// Compile-time constant
    pub is_constexpr: bool,
}

/// Everything the producer records about a procedure besides its body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcAttributes {
    /// Declared accessibility
    pub access: AccessModifier,
    /// Captured variables
    pub captured: Vec<CapturedVar>,
    /// Names of checked exceptions
    pub exceptions: Vec<String>,
    /// Formal parameters in order
    pub formals: Vec<Formal>,
    /// Declared locals
    pub locals: Vec<LocalVar>,
    /// Abstract method
    pub is_abstract: bool,
    /// Compiler-generated bridge method
    pub is_bridge_method: bool,
    /// Has a body in this unit
    pub is_defined: bool,
    /// Synthetic method
    pub is_synthetic_method: bool,
    /// Declaration position
    pub loc: Location,
    /// Return and parameter annotations
    pub method_annotation: MethodAnnotation,
    /// Procedure name
    pub proc_name: ProcName,
    /// Return type
    pub ret_type: Typ,
}

impl ProcAttributes {
    /// Look up a formal by name
    pub fn formal(&self, name: &str) -> Option<&Formal> {
        self.formals.iter().find(|f| f.name == name)
    }

    /// Look up a local by name
    pub fn local(&self, name: &str) -> Option<&LocalVar> {
        self.locals.iter().find(|l| l.name == name)
    }
}
