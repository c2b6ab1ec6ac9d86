//! Constants, operators and expressions

use super::names::{FieldName, Ident, ProcName, Pvar};
use super::types::Typ;
use std::fmt;

wire_enum! {
    /// Unary operators
    pub enum UnOp as "unary operator" {
        /// Arithmetic negation
        Neg = "Neg",
        /// Bitwise complement
        BNot = "BNot",
        /// Logical not
        LNot = "LNot",
    }
}

impl UnOp {
    /// Source-level symbol
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::BNot => "~",
            UnOp::LNot => "!",
        }
    }
}

wire_enum! {
    /// Binary operators
    pub enum BinOp as "binary operator" {
        /// Arithmetic addition
        PlusA = "PlusA",
        /// Pointer plus integer
        PlusPI = "PlusPI",
        /// Arithmetic subtraction
        MinusA = "MinusA",
        /// Pointer minus integer
        MinusPI = "MinusPI",
        /// Pointer minus pointer
        MinusPP = "MinusPP",
        /// Multiplication
        Mult = "Mult",
        /// Integer division
        DivI = "DivI",
        /// Float division
        DivF = "DivF",
        /// Remainder
        Mod = "Mod",
        /// Shift left
        Shiftlt = "Shiftlt",
        /// Shift right
        Shiftrt = "Shiftrt",
        /// `<`
        Lt = "Lt",
        /// `>`
        Gt = "Gt",
        /// `<=`
        Le = "Le",
        /// `>=`
        Ge = "Ge",
        /// `==`
        Eq = "Eq",
        /// `!=`
        Ne = "Ne",
        /// Bitwise and
        BAnd = "BAnd",
        /// Bitwise xor
        BXor = "BXor",
        /// Bitwise or
        BOr = "BOr",
        /// Logical and
        LAnd = "LAnd",
        /// Logical or
        LOr = "LOr",
    }
}

impl BinOp {
    /// Source-level symbol
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::PlusA => "+",
            BinOp::PlusPI => "+pi",
            BinOp::MinusA => "-",
            BinOp::MinusPI => "-pi",
            BinOp::MinusPP => "-pp",
            BinOp::Mult => "*",
            BinOp::DivI => "/",
            BinOp::DivF => "/.",
            BinOp::Mod => "%",
            BinOp::Shiftlt => "<<",
            BinOp::Shiftrt => ">>",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::BAnd => "&",
            BinOp::BXor => "^",
            BinOp::BOr => "|",
            BinOp::LAnd => "&&",
            BinOp::LOr => "||",
        }
    }

    /// Whether the operator yields a boolean
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge | BinOp::Eq | BinOp::Ne
        )
    }
}

/// Integer literal
///
/// Values wider than `i64` are kept exactly; the producer may transmit
/// unsigned 64-bit quantities. The range is bounded by `i128`: an unsigned
/// 128-bit literal above `i128::MAX` is rejected when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntLit {
    /// Numeric value
    pub value: i128,
    /// Producer marked the literal unsigned
    pub unsigned: bool,
    /// Literal denotes a pointer (only ever set for the null constant)
    pub pointer: bool,
}

impl IntLit {
    /// The canonical null pointer
    pub const NULL: IntLit = IntLit {
        value: 0,
        unsigned: false,
        pointer: true,
    };

    /// Plain signed literal
    pub fn of_i64(value: i64) -> Self {
        Self {
            value: value as i128,
            unsigned: false,
            pointer: false,
        }
    }

    /// Whether this is the null pointer
    pub fn is_null(&self) -> bool {
        self.pointer && self.value == 0
    }
}

impl fmt::Display for IntLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else if self.unsigned {
            write!(f, "{}u", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Literal constants
#[derive(Debug, Clone, PartialEq)]
pub enum Const {
    /// Integer literal
    Int(IntLit),
    /// Reference to a procedure
    Fun(ProcName),
    /// String literal
    Str(String),
    /// Float literal (NaN when the producer sent a non-number)
    Float(f64),
    /// Class literal
    Class(String),
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Int(lit) => write!(f, "{}", lit),
            Const::Fun(name) => write!(f, "_fun_{}", name.method_name()),
            Const::Str(s) => write!(f, "{:?}", s),
            Const::Float(v) => write!(f, "{}", v),
            Const::Class(name) => write!(f, "{}.class", name),
        }
    }
}

wire_enum! {
    /// Subtype qualifier of a `sizeof` expression
    pub enum SizeofKind as "sizeof subtype" {
        /// The exact type, no subtypes
        Exact = "exact",
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Value of a temporary
    Var(Ident),
    /// Unary operation with optional result type
    UnOp(UnOp, Box<Expr>, Option<Typ>),
    /// Binary operation
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    /// Constant
    Const(Const),
    /// Type cast
    Cast(Typ, Box<Expr>),
    /// Address of a program variable
    Lvar(Pvar),
    /// Address of a field of the base expression
    Lfield(Box<Expr>, FieldName, Typ),
    /// Address of an array element
    Lindex(Box<Expr>, Box<Expr>),
    /// Size of a type
    Sizeof {
        /// Measured type
        typ: Typ,
        /// Subtype qualifier
        kind: SizeofKind,
        /// Length expression for dynamically sized arrays
        dynamic_length: Option<Box<Expr>>,
    },
}

impl Expr {
    /// Null pointer constant
    pub fn null() -> Self {
        Expr::Const(Const::Int(IntLit::NULL))
    }

    /// Integer constant
    pub fn int(value: i64) -> Self {
        Expr::Const(Const::Int(IntLit::of_i64(value)))
    }

    /// Whether this is the null pointer constant
    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Const(Const::Int(lit)) if lit.is_null())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(id) => write!(f, "{}", id),
            Expr::UnOp(op, e, _) => write!(f, "{}{}", op.symbol(), e),
            Expr::BinOp(op, l, r) => write!(f, "({} {} {})", l, op.symbol(), r),
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Cast(t, e) => write!(f, "({}){}", t, e),
            Expr::Lvar(pv) => write!(f, "&{}", pv),
            Expr::Lfield(e, fld, _) => write!(f, "{}.{}", e, fld.field_name),
            Expr::Lindex(a, i) => write!(f, "{}[{}]", a, i),
            Expr::Sizeof { typ, .. } => write!(f, "sizeof({})", typ),
        }
    }
}
