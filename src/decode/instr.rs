//! Instructions, annotations and procedure attributes

use super::enums::enum_field;
use super::json::{self, bool_field, field, list_field, opt_field, str_field};
use super::Decoder;
use crate::ir::{
    Annotation, AnnotationParam, CallFlags, CapturedVar, Formal, Instr, ItemAnnotation, LocalVar,
    MethodAnnotation, ProcAttributes,
};
use crate::{Error, Result};
use serde_json::Value;

impl Decoder {
    /// Decode an instruction
    pub fn instr(&self, value: &Value) -> Result<Instr> {
        let kind = str_field(value, "instruction_kind", "instruction")?;
        let instr = match kind {
            "Load" => {
                const CTX: &str = "load instruction";
                Instr::Load {
                    id: self.ident(field(value, "identifier", CTX)?)?,
                    expr: self.expr(field(value, "expression", CTX)?)?,
                    typ: self.typ(field(value, "type", CTX)?)?,
                    loc: self.location(field(value, "location", CTX)?)?,
                }
            }
            "Store" => {
                const CTX: &str = "store instruction";
                Instr::Store {
                    lhs: self.expr(field(value, "lvalue", CTX)?)?,
                    typ: self.typ(field(value, "type", CTX)?)?,
                    rhs: self.expr(field(value, "rvalue", CTX)?)?,
                    loc: self.location(field(value, "location", CTX)?)?,
                }
            }
            "Prune" => {
                const CTX: &str = "prune instruction";
                Instr::Prune {
                    cond: self.expr(field(value, "condition", CTX)?)?,
                    true_branch: bool_field(value, "true_branch", CTX)?,
                    if_kind: enum_field(value, "if_kind", CTX)?,
                    loc: self.location(field(value, "location", CTX)?)?,
                }
            }
            "Call" => {
                const CTX: &str = "call instruction";
                let ret = (
                    self.ident(field(value, "return_var", CTX)?)?,
                    self.typ(field(value, "return_type", CTX)?)?,
                );
                let callee = self.expr(field(value, "function_expression", CTX)?)?;
                let args = list_field(value, "args", CTX, |arg| {
                    Ok((
                        self.expr(field(arg, "expression", "call argument")?)?,
                        self.typ(field(arg, "type", "call argument")?)?,
                    ))
                })?;
                let flags = self.call_flags(field(value, "flags", CTX)?)?;
                Instr::Call {
                    ret,
                    callee,
                    args,
                    flags,
                    loc: self.location(field(value, "location", CTX)?)?,
                }
            }
            other => return Err(Error::unknown_variant("instruction kind", other)),
        };
        Ok(instr)
    }

    fn call_flags(&self, value: &Value) -> Result<CallFlags> {
        const CTX: &str = "call flags";
        Ok(CallFlags {
            is_virtual: bool_field(value, "is_virtual", CTX)?,
            is_noreturn: bool_field(value, "is_noreturn", CTX)?,
            is_block: bool_field(value, "is_block", CTX)?,
        })
    }

    /// Decode the annotations of one item
    pub fn item_annotation(&self, value: &Value) -> Result<ItemAnnotation> {
        json::as_array(value, "item annotation")?
            .iter()
            .map(|entry| -> Result<(Annotation, bool)> {
                const CTX: &str = "annotation";
                let annot = field(entry, "annotation", CTX)?;
                let params = list_field(annot, "params", CTX, |p| {
                    Ok(AnnotationParam {
                        name: opt_field(p, "name", "annotation parameter")?
                            .map(|n| json::as_str(n, "annotation parameter").map(str::to_string))
                            .transpose()?,
                        value: str_field(p, "value", "annotation parameter")?.to_string(),
                    })
                })?;
                let annotation = Annotation {
                    class_name: str_field(annot, "class_name", CTX)?.to_string(),
                    params,
                };
                Ok((annotation, bool_field(entry, "visible", CTX)?))
            })
            .collect()
    }

    /// Decode method annotations
    pub fn method_annotation(&self, value: &Value) -> Result<MethodAnnotation> {
        const CTX: &str = "method annotation";
        Ok(MethodAnnotation {
            return_value: self.item_annotation(field(value, "return", CTX)?)?,
            params: list_field(value, "params", CTX, |p| self.item_annotation(p))?,
        })
    }

    /// Decode procedure attributes
    pub fn proc_attributes(&self, value: &Value) -> Result<ProcAttributes> {
        const CTX: &str = "procedure attributes";
        let captured = list_field(value, "captured", CTX, |c| {
            Ok(CapturedVar {
                name: str_field(c, "name", "captured variable")?.to_string(),
                typ: self.typ(field(c, "type", "captured variable")?)?,
            })
        })?;
        let exceptions = list_field(value, "exceptions", CTX, |e| {
            json::as_str(e, "exception name").map(str::to_string)
        })?;
        let formals = list_field(value, "formals", CTX, |f| {
            Ok(Formal {
                name: str_field(f, "name", "formal")?.to_string(),
                typ: self.typ(field(f, "type", "formal")?)?,
            })
        })?;
        let locals = list_field(value, "locals", CTX, |l| {
            const LCTX: &str = "local variable";
            Ok(LocalVar {
                name: str_field(l, "name", LCTX)?.to_string(),
                typ: self.typ(field(l, "type", LCTX)?)?,
                modify_in_block: bool_field(l, "modify_in_block", LCTX)?,
                is_constexpr: bool_field(l, "is_constexpr", LCTX)?,
            })
        })?;

        Ok(ProcAttributes {
            access: enum_field(value, "access", CTX)?,
            captured,
            exceptions,
            formals,
            locals,
            is_abstract: bool_field(value, "is_abstract", CTX)?,
            is_bridge_method: bool_field(value, "is_bridge_method", CTX)?,
            is_defined: bool_field(value, "is_defined", CTX)?,
            is_synthetic_method: bool_field(value, "is_synthetic_method", CTX)?,
            loc: self.location(field(value, "loc", CTX)?)?,
            method_annotation: self.method_annotation(field(value, "method_annotations", CTX)?)?,
            proc_name: self.proc_name(field(value, "proc_name", CTX)?)?,
            ret_type: self.typ(field(value, "ret_type", CTX)?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{AccessModifier, Expr, IfKind, Typ};
    use serde_json::json;

    fn loc() -> Value {
        json!({"line": 3, "col": 9})
    }

    #[test]
    fn test_prune_instruction() {
        let d = Decoder::default();
        let i = d
            .instr(&json!({
                "instruction_kind": "Prune",
                "condition": {"expr_kind": "VarExpression",
                              "identifier": {"kind": "Normal", "name": "n", "stamp": 1}},
                "true_branch": false,
                "if_kind": "Ik_if",
                "location": loc()
            }))
            .unwrap();
        match i {
            Instr::Prune {
                true_branch,
                if_kind,
                ..
            } => {
                assert!(!true_branch);
                assert_eq!(if_kind, IfKind::If);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_call_instruction_args_in_order() {
        let d = Decoder::default();
        let int_t = json!({"type_kind": "Tint", "kind": "IInt"});
        let arg = |v: i64| {
            json!({"expression": {"expr_kind": "ConstExpression",
                                  "constant": {"kind": "Int", "intval": {"unsigned": false, "value": v, "is_pointer": false}}},
                   "type": int_t})
        };
        let i = d
            .instr(&json!({
                "instruction_kind": "Call",
                "return_var": {"kind": "Normal", "name": "n", "stamp": 2},
                "return_type": {"type_kind": "Tvoid"},
                "function_expression": {"expr_kind": "ConstExpression",
                                        "constant": {"kind": "Fun", "function_name": {"method_name": "__new"}}},
                "args": [arg(1), arg(2)],
                "flags": {"is_virtual": true, "is_noreturn": false, "is_block": false},
                "location": loc()
            }))
            .unwrap();
        let Instr::Call { args, flags, ret, .. } = i else {
            panic!("expected call");
        };
        assert_eq!(ret.1, Typ::Void);
        assert!(flags.is_virtual);
        let values: Vec<Expr> = args.into_iter().map(|(e, _)| e).collect();
        assert_eq!(values, vec![Expr::int(1), Expr::int(2)]);
    }

    #[test]
    fn test_unknown_instruction() {
        let d = Decoder::default();
        assert!(matches!(
            d.instr(&json!({"instruction_kind": "Metadata"})),
            Err(Error::UnknownVariant { enum_name: "instruction kind", .. })
        ));
    }

    #[test]
    fn test_attributes_access_rejected() {
        let d = Decoder::default();
        let attrs = json!({
            "access": "Internal",
            "captured": [], "exceptions": [], "formals": [], "locals": [],
            "is_abstract": false, "is_bridge_method": false, "is_defined": true,
            "is_synthetic_method": false, "loc": loc(),
            "method_annotations": {"return": [], "params": []},
            "proc_name": {"method_name": "__new"},
            "ret_type": {"type_kind": "Tvoid"}
        });
        assert!(matches!(
            d.proc_attributes(&attrs),
            Err(Error::UnknownVariant { enum_name: "access modifier", .. })
        ));

        let mut ok = attrs.clone();
        ok["access"] = json!("Private");
        ok["locals"] = json!([{"name": "i", "type": {"type_kind": "Tint", "kind": "IInt"},
                               "modify_in_block": true, "is_constexpr": false}]);
        ok["method_annotations"] = json!({
            "return": [{"annotation": {"class_name": "NotNull", "params": []}, "visible": true}],
            "params": [[]]
        });
        let decoded = d.proc_attributes(&ok).unwrap();
        assert_eq!(decoded.access, AccessModifier::Private);
        assert!(decoded.local("i").unwrap().modify_in_block);
        assert_eq!(decoded.method_annotation.return_value[0].0.class_name, "NotNull");
        assert_eq!(decoded.method_annotation.params.len(), 1);
    }
}
