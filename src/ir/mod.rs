//! # Program Model
//!
//! The fully resolved model that every analysis pass consumes.
//!
//! ## Module Structure
//!
//! ```text
//! ir/
//! ├── mod.rs         # This file - module definition and re-exports
//! ├── types.rs       # TypeName, Typ, primitive kinds, annotations
//! ├── names.rs       # ProcName, FieldName, Ident, Pvar, Location
//! ├── expr.rs        # IntLit, Const, UnOp, BinOp, Expr
//! ├── instr.rs       # Instr (Load/Store/Prune/Call), IfKind, CallFlags
//! ├── attributes.rs  # ProcAttributes and its parts
//! ├── cfg.rs         # ControlFlowGraph arena, Procedure, Node, NodeKind
//! └── tenv.rs        # TypeTable, StructDef
//! ```
//!
//! Every type here is a plain owned value (`Send + Sync`), so models decoded
//! on different threads can be handed to any store the caller chooses.

mod attributes;
mod cfg;
mod expr;
mod instr;
mod names;
mod tenv;
mod types;

pub use attributes::{AccessModifier, CapturedVar, Formal, LocalVar, ProcAttributes};
pub use cfg::{ControlFlowGraph, Node, NodeId, NodeKind, ProcId, Procedure, PruneKind, StmtKind};
pub use expr::{BinOp, Const, Expr, IntLit, SizeofKind, UnOp};
pub use instr::{CallFlags, IfKind, Instr};
pub use names::{FieldName, Ident, IdentKind, Location, MethodKind, MethodName, ProcName, Pvar, PvarKind};
pub use tenv::{StructDef, StructField, TypeTable};
pub use types::{
    Annotation, AnnotationParam, FloatKind, IntKind, ItemAnnotation, MethodAnnotation, PtrKind,
    Typ, TypeName,
};
