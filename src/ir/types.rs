//! Type vocabulary: qualified names, primitive kinds, types and annotations

use std::fmt;

/// Qualified name of a class/struct type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    /// Namespace part (may be empty)
    pub namespace: String,
    /// Simple name
    pub name: String,
}

impl TypeName {
    /// Create a type name from its two parts
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Split a qualified name at the right-most `separator`.
    ///
    /// A name without separator gets an empty namespace.
    pub fn qualified(full: &str, separator: char) -> Self {
        match full.rfind(separator) {
            Some(pos) => Self::new(&full[..pos], &full[pos + separator.len_utf8()..]),
            None => Self::new("", full),
        }
    }

    /// Qualified name joined with `separator`; inverse of [`TypeName::qualified`]
    pub fn join(&self, separator: char) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}{}{}", self.namespace, separator, self.name)
        }
    }
}

/// Always joins with `.`; use [`TypeName::join`] for the producer's separator
impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join('.'))
    }
}

wire_enum! {
    /// Integer machine kinds
    pub enum IntKind as "int kind" {
        /// `char`
        Char = "IChar",
        /// `signed char`
        SChar = "ISChar",
        /// `unsigned char`
        UChar = "IUChar",
        /// `bool`
        Bool = "IBool",
        /// `int`
        Int = "IInt",
        /// `unsigned int`
        UInt = "IUInt",
        /// `short`
        Short = "IShort",
        /// `unsigned short`
        UShort = "IUShort",
        /// `long`
        Long = "ILong",
        /// `unsigned long`
        ULong = "IULong",
        /// `long long`
        LongLong = "ILongLong",
        /// `unsigned long long`
        ULongLong = "IULongLong",
        /// 128-bit signed
        I128 = "I128",
        /// 128-bit unsigned
        U128 = "IU128",
    }
}

impl IntKind {
    /// Whether values of this kind are unsigned
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            IntKind::UChar
                | IntKind::Bool
                | IntKind::UInt
                | IntKind::UShort
                | IntKind::ULong
                | IntKind::ULongLong
                | IntKind::U128
        )
    }
}

wire_enum! {
    /// Floating-point kinds
    pub enum FloatKind as "float kind" {
        /// `float`
        Float = "FFloat",
        /// `double`
        Double = "FDouble",
        /// `long double`
        LongDouble = "FLongDouble",
    }
}

wire_enum! {
    /// Pointer flavours
    pub enum PtrKind as "pointer kind" {
        /// Plain pointer (managed object references decode to this)
        Pointer = "Pk_pointer",
        /// By-reference parameter
        Reference = "Pk_reference",
        /// Weak reference
        ObjcWeak = "Pk_objc_weak",
        /// Unsafe unretained reference
        ObjcUnsafeUnretained = "Pk_objc_unsafe_unretained",
        /// Autoreleasing reference
        ObjcAutoreleasing = "Pk_objc_autoreleasing",
    }
}

/// Program types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Typ {
    /// `void`
    Void,
    /// Integer of the given kind
    Int(IntKind),
    /// Float of the given kind
    Float(FloatKind),
    /// Pointer to the inner type
    Ptr(Box<Typ>, PtrKind),
    /// Array of the element type
    Array {
        /// Element type
        elem: Box<Typ>,
        /// Static length, when known
        length: Option<u64>,
        /// Element stride in bytes, when known
        stride: Option<u64>,
    },
    /// Named class/struct
    Struct(TypeName),
    /// Generic type variable
    TypeVar(String),
}

impl Typ {
    /// Pointer to `inner` with the plain pointer kind
    pub fn ptr(inner: Typ) -> Self {
        Typ::Ptr(Box::new(inner), PtrKind::Pointer)
    }

    /// Name of the struct this type denotes, looking through one pointer
    pub fn struct_name(&self) -> Option<&TypeName> {
        match self {
            Typ::Struct(name) => Some(name),
            Typ::Ptr(inner, _) => match inner.as_ref() {
                Typ::Struct(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Whether this is a pointer type
    pub fn is_pointer(&self) -> bool {
        matches!(self, Typ::Ptr(..))
    }
}

impl fmt::Display for Typ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::decode::WireEnum;
        match self {
            Typ::Void => write!(f, "void"),
            Typ::Int(kind) => write!(f, "{}", kind.tag()),
            Typ::Float(kind) => write!(f, "{}", kind.tag()),
            Typ::Ptr(inner, PtrKind::Pointer) => write!(f, "{}*", inner),
            Typ::Ptr(inner, _) => write!(f, "{}&", inner),
            Typ::Array { elem, length, .. } => match length {
                Some(n) => write!(f, "{}[{}]", elem, n),
                None => write!(f, "{}[_]", elem),
            },
            Typ::Struct(name) => write!(f, "{}", name),
            Typ::TypeVar(name) => write!(f, "'{}", name),
        }
    }
}

/// One `name = value` argument of an annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationParam {
    /// Parameter name; positional parameters have none
    pub name: Option<String>,
    /// Parameter value as written by the producer
    pub value: String,
}

/// An attribute/annotation applied to a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Class of the annotation
    pub class_name: String,
    /// Ordered arguments
    pub params: Vec<AnnotationParam>,
}

/// Annotations on one item, each with its runtime-visibility flag
pub type ItemAnnotation = Vec<(Annotation, bool)>;

/// Annotations of a method: its return value and each parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodAnnotation {
    /// Annotations on the return value
    pub return_value: ItemAnnotation,
    /// Annotations per formal parameter
    pub params: Vec<ItemAnnotation>,
}
