//! Instructions

use super::expr::Expr;
use super::names::{Ident, Location};
use super::types::Typ;
use std::fmt;

wire_enum! {
    /// Syntactic origin of a branch
    pub enum IfKind as "branch kind" {
        /// Boolean expression (conditional operator)
        Bexp = "Ik_bexp",
        /// `do ... while`
        DoWhile = "Ik_dowhile",
        /// `for`
        For = "Ik_for",
        /// `if`
        If = "Ik_if",
        /// Short-circuit `&&` / `||`
        LandLor = "Ik_land_lor",
        /// `while`
        While = "Ik_while",
        /// `switch`
        Switch = "Ik_switch",
    }
}

impl IfKind {
    /// Whether the branch belongs to a loop
    pub fn is_loop(self) -> bool {
        matches!(self, IfKind::DoWhile | IfKind::For | IfKind::While)
    }
}

/// Call-site flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CallFlags {
    /// Dispatched virtually
    pub is_virtual: bool,
    /// Callee never returns
    pub is_noreturn: bool,
    /// Call of a block/closure
    pub is_block: bool,
}

/// Instructions
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// `id = *expr`
    Load {
        /// Temporary receiving the value
        id: Ident,
        /// Address read from
        expr: Expr,
        /// Type of the loaded value
        typ: Typ,
        /// Source position
        loc: Location,
    },
    /// `*lhs = rhs`
    Store {
        /// Address written to
        lhs: Expr,
        /// Type of the stored value
        typ: Typ,
        /// Value written
        rhs: Expr,
        /// Source position
        loc: Location,
    },
    /// Assume `cond` (or its negation) holds on this path
    Prune {
        /// Condition
        cond: Expr,
        /// Whether this is the true branch
        true_branch: bool,
        /// Syntactic origin
        if_kind: IfKind,
        /// Source position
        loc: Location,
    },
    /// `ret = callee(args)`
    Call {
        /// Temporary and type receiving the result
        ret: (Ident, Typ),
        /// Called expression (usually a function constant)
        callee: Expr,
        /// Ordered actuals
        args: Vec<(Expr, Typ)>,
        /// Call-site flags
        flags: CallFlags,
        /// Source position
        loc: Location,
    },
}

impl Instr {
    /// Source position of the instruction
    pub fn loc(&self) -> &Location {
        match self {
            Instr::Load { loc, .. }
            | Instr::Store { loc, .. }
            | Instr::Prune { loc, .. }
            | Instr::Call { loc, .. } => loc,
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Load { id, expr, typ, .. } => write!(f, "{}=*{}:{}", id, expr, typ),
            Instr::Store { lhs, typ, rhs, .. } => write!(f, "*{}:{}={}", lhs, typ, rhs),
            Instr::Prune {
                cond, true_branch, ..
            } => write!(f, "PRUNE({}, {})", cond, true_branch),
            Instr::Call {
                ret, callee, args, ..
            } => {
                write!(f, "{}:{}={}(", ret.0, ret.1, callee)?;
                for (i, (arg, typ)) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", arg, typ)?;
                }
                write!(f, ")")
            }
        }
    }
}
