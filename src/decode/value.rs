//! Types, constants and expressions
//!
//! Both types and expressions are recursive on the wire; each level goes
//! through [`Decoder::descend`] so hostile nesting fails cleanly instead of
//! exhausting the stack.

use super::enums::enum_field;
use super::json::{self, field, opt_field, str_field};
use super::Decoder;
use crate::ir::{Const, Expr, Typ};
use crate::{Error, Result};
use serde_json::Value;

impl Decoder {
    /// Decode a type
    pub fn typ(&self, value: &Value) -> Result<Typ> {
        let _guard = self.descend("type")?;
        let typ = match str_field(value, "type_kind", "type")? {
            "Tvoid" => Typ::Void,
            "Tint" => Typ::Int(enum_field(value, "kind", "Tint type")?),
            "Tfloat" => Typ::Float(enum_field(value, "kind", "Tfloat type")?),
            "Tptr" => {
                let inner = self.typ(field(value, "type", "Tptr type")?)?;
                Typ::Ptr(Box::new(inner), enum_field(value, "kind", "Tptr type")?)
            }
            "Tarray" => {
                const CTX: &str = "Tarray type";
                let elem = self.typ(field(value, "content_type", CTX)?)?;
                let length = opt_field(value, "length", CTX)?
                    .map(|v| json::as_u64(v, CTX))
                    .transpose()?;
                let stride = opt_field(value, "stride", CTX)?
                    .map(|v| json::as_u64(v, CTX))
                    .transpose()?;
                Typ::Array {
                    elem: Box::new(elem),
                    length,
                    stride,
                }
            }
            "Tstruct" => Typ::Struct(self.type_name(field(value, "struct_name", "Tstruct type")?)?),
            "Tvar" => Typ::TypeVar(str_field(value, "type_name", "Tvar type")?.to_string()),
            // Enum types have no downstream interpretation
            "Tenum" => return Err(Error::unsupported("type kind", "Tenum")),
            other => return Err(Error::unknown_variant("type kind", other)),
        };
        Ok(typ)
    }

    /// Decode a constant
    pub fn constant(&self, value: &Value) -> Result<Const> {
        const CTX: &str = "constant";
        let constant = match str_field(value, "kind", CTX)? {
            "Int" => Const::Int(self.int_lit(field(value, "intval", CTX)?)?),
            "Fun" => Const::Fun(self.proc_name(field(value, "function_name", CTX)?)?),
            "Str" => Const::Str(str_field(value, "string_value", CTX)?.to_string()),
            "Float" => Const::Float(float_value(field(value, "float_value", CTX)?)),
            "Class" => Const::Class(str_field(value, "class_name", CTX)?.to_string()),
            other => return Err(Error::unknown_variant("constant kind", other)),
        };
        Ok(constant)
    }

    /// Decode an expression
    pub fn expr(&self, value: &Value) -> Result<Expr> {
        let _guard = self.descend("expression")?;
        let expr = match str_field(value, "expr_kind", "expression")? {
            "VarExpression" => Expr::Var(self.ident(field(value, "identifier", "var expression")?)?),
            "UnopExpression" => {
                const CTX: &str = "unop expression";
                let op = enum_field(value, "operator", CTX)?;
                let operand = self.expr(field(value, "expression", CTX)?)?;
                let typ = opt_field(value, "type", CTX)?
                    .map(|t| self.typ(t))
                    .transpose()?;
                Expr::UnOp(op, Box::new(operand), typ)
            }
            "BinopExpression" => {
                const CTX: &str = "binop expression";
                let op = enum_field(value, "operator", CTX)?;
                let left = self.expr(field(value, "left", CTX)?)?;
                let right = self.expr(field(value, "right", CTX)?)?;
                Expr::BinOp(op, Box::new(left), Box::new(right))
            }
            "ConstExpression" => Expr::Const(self.constant(field(value, "constant", "const expression")?)?),
            "CastExpression" => {
                const CTX: &str = "cast expression";
                let typ = self.typ(field(value, "type", CTX)?)?;
                let operand = self.expr(field(value, "expression", CTX)?)?;
                Expr::Cast(typ, Box::new(operand))
            }
            "LvarExpression" => Expr::Lvar(self.pvar(field(value, "pvar", "lvar expression")?)?),
            "LfieldExpression" => {
                const CTX: &str = "lfield expression";
                let base = self.expr(field(value, "expression", CTX)?)?;
                let fld = self.field_name(field(value, "field", CTX)?)?;
                let typ = self.typ(field(value, "type", CTX)?)?;
                Expr::Lfield(Box::new(base), fld, typ)
            }
            "LindexExpression" => {
                const CTX: &str = "lindex expression";
                let array = self.expr(field(value, "array", CTX)?)?;
                let index = self.expr(field(value, "index", CTX)?)?;
                Expr::Lindex(Box::new(array), Box::new(index))
            }
            "SizeofExpression" => {
                const CTX: &str = "sizeof expression";
                let typ = self.typ(field(value, "type", CTX)?)?;
                let kind = enum_field(value, "kind", CTX)?;
                let dynamic_length = opt_field(value, "dynamic_length", CTX)?
                    .map(|e| self.expr(e).map(Box::new))
                    .transpose()?;
                Expr::Sizeof {
                    typ,
                    kind,
                    dynamic_length,
                }
            }
            other => return Err(Error::unknown_variant("expression kind", other)),
        };
        Ok(expr)
    }
}

/// Float payloads that are not JSON numbers decode to NaN
fn float_value(value: &Value) -> f64 {
    value.as_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeOptions;
    use crate::ir::{BinOp, IntKind, PtrKind, SizeofKind, TypeName};
    use serde_json::json;

    fn int_type() -> Value {
        json!({"type_kind": "Tint", "kind": "IInt"})
    }

    #[test]
    fn test_pointer_to_struct() {
        let d = Decoder::default();
        let t = d
            .typ(&json!({
                "type_kind": "Tptr",
                "kind": "Pk_pointer",
                "type": {"type_kind": "Tstruct", "struct_name": "System.String"}
            }))
            .unwrap();
        assert_eq!(
            t,
            Typ::Ptr(
                Box::new(Typ::Struct(TypeName::new("System", "String"))),
                PtrKind::Pointer
            )
        );
    }

    #[test]
    fn test_enum_type_is_unsupported() {
        let d = Decoder::default();
        assert!(matches!(
            d.typ(&json!({"type_kind": "Tenum"})),
            Err(Error::Unsupported { what: "type kind", .. })
        ));
        assert!(matches!(
            d.typ(&json!({"type_kind": "Tfun"})),
            Err(Error::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_float_leniency() {
        let d = Decoder::default();
        let c = d.constant(&json!({"kind": "Float", "float_value": "NaN"})).unwrap();
        assert!(matches!(c, Const::Float(v) if v.is_nan()));
        let c = d.constant(&json!({"kind": "Float", "float_value": 2.5})).unwrap();
        assert_eq!(c, Const::Float(2.5));
        // the key itself is still required
        assert!(d.constant(&json!({"kind": "Float"})).is_err());
    }

    #[test]
    fn test_sizeof_only_exact() {
        let d = Decoder::default();
        let e = d
            .expr(&json!({"expr_kind": "SizeofExpression", "type": int_type(), "kind": "exact"}))
            .unwrap();
        assert_eq!(
            e,
            Expr::Sizeof {
                typ: Typ::Int(IntKind::Int),
                kind: SizeofKind::Exact,
                dynamic_length: None
            }
        );
        assert!(matches!(
            d.expr(&json!({"expr_kind": "SizeofExpression", "type": int_type(), "kind": "subtypes"})),
            Err(Error::UnknownVariant { enum_name: "sizeof subtype", .. })
        ));
    }

    #[test]
    fn test_binop_depth_first() {
        let d = Decoder::default();
        let one = json!({"expr_kind": "ConstExpression",
                         "constant": {"kind": "Int", "intval": {"unsigned": false, "value": 1, "is_pointer": false}}});
        let e = d
            .expr(&json!({"expr_kind": "BinopExpression", "operator": "Lt", "left": one, "right": one}))
            .unwrap();
        assert_eq!(e, Expr::BinOp(BinOp::Lt, Box::new(Expr::int(1)), Box::new(Expr::int(1))));
    }

    #[test]
    fn test_depth_limit() {
        let d = Decoder::new(DecodeOptions {
            max_depth: 4,
            ..Default::default()
        });
        let mut t = int_type();
        for _ in 0..3 {
            t = json!({"type_kind": "Tptr", "kind": "Pk_pointer", "type": t});
        }
        // four levels fit exactly
        assert!(d.typ(&t).is_ok());
        let t = json!({"type_kind": "Tptr", "kind": "Pk_pointer", "type": t});
        assert!(matches!(d.typ(&t), Err(Error::DepthExceeded { limit: 4, .. })));
        // the counter unwinds after an error
        assert!(d.typ(&int_type()).is_ok());
    }
}
