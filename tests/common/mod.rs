//! JSON builders shared by the integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn loc(line: i64) -> Value {
    json!({"line": line, "col": 1})
}

pub fn int_type() -> Value {
    json!({"type_kind": "Tint", "kind": "IInt"})
}

pub fn void_type() -> Value {
    json!({"type_kind": "Tvoid"})
}

pub fn struct_type(name: &str) -> Value {
    json!({"type_kind": "Tstruct", "struct_name": name})
}

pub fn method(class: &str, name: &str) -> Value {
    json!({
        "method_name": name,
        "class_name": class,
        "parameters": [],
        "return_type": void_type(),
        "is_static": false
    })
}

pub fn attributes(class: &str, name: &str) -> Value {
    json!({
        "access": "Public",
        "captured": [],
        "exceptions": [],
        "formals": [{"name": "this", "type": {"type_kind": "Tptr", "kind": "Pk_pointer", "type": struct_type(class)}}],
        "locals": [],
        "is_abstract": false,
        "is_bridge_method": false,
        "is_defined": true,
        "is_synthetic_method": false,
        "loc": loc(1),
        "method_annotations": {"return": [], "params": []},
        "proc_name": method(class, name),
        "ret_type": void_type()
    })
}

pub fn proc_record(id: i64, name: &str, start: i64, exit: i64) -> Value {
    json!({
        "pd_id": id,
        "pd_attributes": attributes("App.Program", name),
        "pd_start_node": start,
        "pd_exit_node": exit
    })
}

pub fn int_const(value: i64) -> Value {
    json!({
        "expr_kind": "ConstExpression",
        "constant": {"kind": "Int", "intval": {"unsigned": false, "value": value, "is_pointer": false}}
    })
}

pub fn store_local(var: &str, value: i64) -> Value {
    json!({
        "instruction_kind": "Store",
        "lvalue": {"expr_kind": "LvarExpression",
                   "pvar": {"pv_name": var, "pv_kind": "Local", "proc_name": method("App.Program", "Run")}},
        "type": int_type(),
        "rvalue": int_const(value),
        "location": loc(2)
    })
}

/// A node record; `kind` is the `nd_kind` object
pub fn node_record(
    id: i64,
    proc: i64,
    kind: Value,
    succs: &[i64],
    preds: &[i64],
    instrs: Vec<Value>,
) -> Value {
    json!({
        "nd_id": id,
        "nd_kind": kind,
        "nd_loc": loc(id),
        "nd_instrs": instrs,
        "nd_temps": [],
        "nd_dead_pvars_before": [],
        "nd_dead_pvars_after": [],
        "nd_proc_id": proc,
        "nd_succ_ids": succs,
        "nd_pred_ids": preds,
        "nd_exn_ids": []
    })
}

pub fn start() -> Value {
    json!({"kind": "StartNode"})
}

pub fn exit() -> Value {
    json!({"kind": "ExitNode"})
}

pub fn stmt() -> Value {
    json!({"kind": "StmtNode", "stmt_kind": "MethodBody"})
}

pub fn cfg_doc(procs: Vec<Value>, nodes: Vec<Value>) -> Value {
    json!({"procs": procs, "nodes": nodes})
}

/// One procedure: start(1) -> body(2) -> exit(3)
pub fn straight_line() -> Value {
    cfg_doc(
        vec![proc_record(10, "Run", 1, 3)],
        vec![
            node_record(1, 10, start(), &[2], &[], vec![]),
            node_record(2, 10, stmt(), &[3], &[1], vec![store_local("x", 5)]),
            node_record(3, 10, exit(), &[], &[2], vec![]),
        ],
    )
}

pub fn tenv_entry(name: &str, fields: &[(&str, Value)], supers: &[&str]) -> Value {
    let fields: Vec<Value> = fields
        .iter()
        .map(|(f, t)| {
            json!({
                "field_name": {"class_name": name, "field_name": f},
                "type": t,
                "annotation": []
            })
        })
        .collect();
    json!({
        "type_name": name,
        "type_struct": {
            "instance_fields": fields,
            "static_fields": [],
            "supers": supers,
            "methods": [method(name, "ToString")],
            "annots": []
        }
    })
}
