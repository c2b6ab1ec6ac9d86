//! Name & reference decoders

use super::enums::enum_field;
use super::json::{self, field, opt_field, str_field};
use super::Decoder;
use crate::ir::{FieldName, Ident, IntLit, Location, MethodKind, MethodName, ProcName, Pvar, PvarKind, TypeName};
use crate::{Error, Result};
use serde_json::Value;

impl Decoder {
    /// Decode a qualified type name.
    ///
    /// Accepts a plain string or a `{"csu_kind": "Class", "name": ...}`
    /// descriptor; other descriptor kinds are unsupported.
    pub fn type_name(&self, value: &Value) -> Result<TypeName> {
        let full = match value {
            Value::String(s) => s.as_str(),
            Value::Object(_) => {
                let csu = str_field(value, "csu_kind", "type name")?;
                if csu != "Class" {
                    return Err(Error::unsupported("struct descriptor kind", csu));
                }
                str_field(value, "name", "type name")?
            }
            other => {
                return Err(Error::ShapeMismatch {
                    expected: "string or class descriptor",
                    context: "type name",
                    got: json::describe(other),
                })
            }
        };
        Ok(TypeName::qualified(full, self.options.namespace_separator))
    }

    /// Decode a procedure name
    pub fn proc_name(&self, value: &Value) -> Result<ProcName> {
        const CTX: &str = "procedure name";
        let method_name = str_field(value, "method_name", CTX)?;
        if method_name == self.options.builtin_new_name {
            return Ok(ProcName::BuiltinNew);
        }

        let class_name = self.type_name(field(value, "class_name", CTX)?)?;
        let parameters = json::list_field(value, "parameters", CTX, |t| self.typ(t))?;
        let return_type = if method_name == self.options.constructor_name {
            None
        } else {
            Some(self.typ(field(value, "return_type", CTX)?)?)
        };
        let kind = if json::bool_field(value, "is_static", CTX)? {
            MethodKind::Static
        } else {
            MethodKind::Instance
        };

        Ok(ProcName::Method(MethodName {
            class_name,
            method_name: method_name.to_string(),
            parameters,
            return_type,
            kind,
        }))
    }

    /// Decode a field name
    pub fn field_name(&self, value: &Value) -> Result<FieldName> {
        Ok(FieldName {
            class_name: self.type_name(field(value, "class_name", "field name")?)?,
            field_name: str_field(value, "field_name", "field name")?.to_string(),
        })
    }

    /// Decode a temporary identifier
    pub fn ident(&self, value: &Value) -> Result<Ident> {
        Ok(Ident {
            kind: enum_field(value, "kind", "identifier")?,
            name: str_field(value, "name", "identifier")?.to_string(),
            stamp: json::int_field(value, "stamp", "identifier")?,
        })
    }

    /// Decode a program variable
    pub fn pvar(&self, value: &Value) -> Result<Pvar> {
        const CTX: &str = "program variable";
        let name = str_field(value, "pv_name", CTX)?.to_string();
        let kind = match str_field(value, "pv_kind", CTX)? {
            "Local" => PvarKind::Local(self.proc_name(field(value, "proc_name", CTX)?)?),
            "Called" => PvarKind::Called(self.proc_name(field(value, "proc_name", CTX)?)?),
            "Global" => PvarKind::Global,
            other => return Err(Error::unknown_variant("program variable kind", other)),
        };
        Ok(Pvar { name, kind })
    }

    /// Decode a source location
    pub fn location(&self, value: &Value) -> Result<Location> {
        const CTX: &str = "location";
        let file = match opt_field(value, "file", CTX)? {
            Some(f) => Some(json::as_str(f, CTX)?.to_string()),
            None => None,
        };
        Ok(Location {
            line: json::as_i32(field(value, "line", CTX)?, CTX)?,
            col: json::as_i32(field(value, "col", CTX)?, CTX)?,
            file,
        })
    }

    /// Decode an integer literal.
    ///
    /// A zero pointer literal becomes [`IntLit::NULL`]; any other value keeps
    /// its number and unsigned flag and drops the pointer flag.
    pub fn int_lit(&self, value: &Value) -> Result<IntLit> {
        const CTX: &str = "integer literal";
        let unsigned = json::bool_field(value, "unsigned", CTX)?;
        let number = json::as_wide_int(field(value, "value", CTX)?, CTX)?;
        let is_pointer = json::bool_field(value, "is_pointer", CTX)?;

        if is_pointer && number == 0 {
            return Ok(IntLit::NULL);
        }
        Ok(IntLit {
            value: number,
            unsigned,
            pointer: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeOptions;
    use crate::ir::{IdentKind, Typ};
    use serde_json::json;

    #[test]
    fn test_type_name_forms() {
        let d = Decoder::default();
        assert_eq!(
            d.type_name(&json!("Foo.Bar.Baz")).unwrap(),
            TypeName::new("Foo.Bar", "Baz")
        );
        assert_eq!(d.type_name(&json!("Baz")).unwrap(), TypeName::new("", "Baz"));
        assert_eq!(
            d.type_name(&json!({"csu_kind": "Class", "name": "System.Object"})).unwrap(),
            TypeName::new("System", "Object")
        );
        assert!(matches!(
            d.type_name(&json!({"csu_kind": "Struct", "name": "Point"})),
            Err(Error::Unsupported { .. })
        ));
    }

    #[test]
    fn test_builtin_new_ignores_other_keys() {
        let d = Decoder::default();
        assert_eq!(d.proc_name(&json!({"method_name": "__new"})).unwrap(), ProcName::BuiltinNew);
    }

    #[test]
    fn test_custom_builtin_new_name() {
        let d = Decoder::new(DecodeOptions {
            builtin_new_name: "alloc".to_string(),
            ..DecodeOptions::default()
        });
        let name = d.proc_name(&json!({"method_name": "alloc"})).unwrap();
        assert!(name.is_builtin_new());
        assert_eq!(name.wire_method_name(d.options()), "alloc");
        assert_eq!(name.method_name(), ProcName::BUILTIN_NEW);
        assert_eq!(name.to_string(), "__new");

        // the default name is an ordinary method under these options
        assert!(d.proc_name(&json!({"method_name": "__new"})).is_err());
    }

    #[test]
    fn test_constructor_has_no_return_type() {
        let d = Decoder::default();
        let ctor = d
            .proc_name(&json!({
                "method_name": ".ctor",
                "class_name": "App.Widget",
                "parameters": [{"type_kind": "Tint", "kind": "IInt"}],
                "is_static": false
            }))
            .unwrap();
        match ctor {
            ProcName::Method(m) => {
                assert_eq!(m.return_type, None);
                assert_eq!(m.parameters, vec![Typ::Int(crate::ir::IntKind::Int)]);
                assert_eq!(m.kind, MethodKind::Instance);
            }
            other => panic!("unexpected {:?}", other),
        }

        // A regular method must carry one
        let err = d
            .proc_name(&json!({
                "method_name": "Run",
                "class_name": "App.Widget",
                "parameters": [],
                "is_static": true
            }))
            .unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "return_type", .. }));
    }

    #[test]
    fn test_pvar_kinds() {
        let d = Decoder::default();
        let global = d.pvar(&json!({"pv_name": "Counter", "pv_kind": "Global"})).unwrap();
        assert!(global.is_global());

        let local = d
            .pvar(&json!({"pv_name": "x", "pv_kind": "Local", "proc_name": {"method_name": "__new"}}))
            .unwrap();
        assert_eq!(local.owner(), Some(&ProcName::BuiltinNew));

        assert!(d.pvar(&json!({"pv_name": "x", "pv_kind": "Local"})).is_err());
        assert!(matches!(
            d.pvar(&json!({"pv_name": "x", "pv_kind": "Heap"})),
            Err(Error::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_int_lit_null_and_values() {
        let d = Decoder::default();
        let null = d
            .int_lit(&json!({"unsigned": false, "value": 0, "is_pointer": true}))
            .unwrap();
        assert_eq!(null, IntLit::NULL);

        let five = d
            .int_lit(&json!({"unsigned": false, "value": 5, "is_pointer": true}))
            .unwrap();
        assert_eq!(five.value, 5);
        assert!(!five.is_null());

        let max = d
            .int_lit(&json!({"unsigned": true, "value": u64::MAX, "is_pointer": false}))
            .unwrap();
        assert_eq!(max.value, u64::MAX as i128);
        assert!(max.unsigned);
    }

    #[test]
    fn test_ident_and_location() {
        let d = Decoder::default();
        let id = d
            .ident(&json!({"kind": "Normal", "name": "n", "stamp": 4}))
            .unwrap();
        assert_eq!(id.kind, IdentKind::Normal);
        assert_eq!(id.stamp, 4);

        let loc = d.location(&json!({"line": 12, "col": -1})).unwrap();
        assert_eq!(loc, Location::new(12, -1));
        assert!(d.location(&json!({"line": 1u64 << 40, "col": 0})).is_err());
    }
}
