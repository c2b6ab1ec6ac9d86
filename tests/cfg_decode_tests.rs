//! Tests for CFG document decoding and linking

mod common;

use common::*;
use serde_json::json;
use silload::ir::{Const, IntLit, StmtKind};
use silload::{decode_cfg, Decoder, Entity, Error, ErrorKind, Expr, Instr, NodeKind, ProcName};

// ====================
// Linking
// ====================

#[test]
fn test_straight_line_procedure() {
    let cfg = decode_cfg(&straight_line()).unwrap();
    assert_eq!(cfg.procedure_count(), 1);
    assert_eq!(cfg.node_count(), 3);

    let proc = cfg.procedure_by_wire_id(10).unwrap();
    assert_eq!(proc.name().method_name(), "Run");
    assert_eq!(proc.nodes().len(), 3);

    let start = &cfg[proc.start()];
    assert_eq!(start.kind(), &NodeKind::Start);
    let body: Vec<_> = cfg.successors(start.id()).collect();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].kind(), &NodeKind::Stmt(StmtKind::MethodBody));
    assert_eq!(body[0].succs(), &[proc.exit()]);
    assert_eq!(body[0].preds(), &[proc.start()]);
    assert!(matches!(body[0].instrs()[0], Instr::Store { .. }));
}

#[test]
fn test_start_equals_exit() {
    let doc = cfg_doc(
        vec![proc_record(0, "Noop", 7, 7)],
        vec![node_record(7, 0, start(), &[], &[], vec![])],
    );
    let cfg = decode_cfg(&doc).unwrap();
    let proc = cfg.procedure_by_wire_id(0).unwrap();
    assert_eq!(proc.start(), proc.exit());
    assert_eq!(cfg[proc.start()].wire_id(), 7);
}

#[test]
fn test_forward_references_any_order() {
    let forward = straight_line();

    let mut reversed = forward.clone();
    reversed["nodes"]
        .as_array_mut()
        .unwrap()
        .reverse();

    let a = decode_cfg(&forward).unwrap();
    let b = decode_cfg(&reversed).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_procedure_declaration_order_irrelevant() {
    let forward = cfg_doc(
        vec![proc_record(1, "A", 10, 11), proc_record(2, "B", 20, 20)],
        vec![
            node_record(10, 1, start(), &[11], &[], vec![]),
            node_record(11, 1, exit(), &[], &[10], vec![]),
            node_record(20, 2, start(), &[], &[], vec![]),
        ],
    );

    let mut procs_reversed = forward.clone();
    procs_reversed["procs"].as_array_mut().unwrap().reverse();

    let mut both_reversed = procs_reversed.clone();
    both_reversed["nodes"].as_array_mut().unwrap().reverse();

    let expected = decode_cfg(&forward).unwrap();
    assert_eq!(decode_cfg(&procs_reversed).unwrap(), expected);
    assert_eq!(decode_cfg(&both_reversed).unwrap(), expected);

    let a = expected.procedure_by_wire_id(1).unwrap();
    assert_eq!(expected[a.start()].proc(), a.id());
}

#[test]
fn test_two_node_cycle() {
    let doc = cfg_doc(
        vec![proc_record(1, "Spin", 100, 200)],
        vec![
            node_record(100, 1, start(), &[200], &[200], vec![]),
            node_record(200, 1, json!({"kind": "JoinNode"}), &[100], &[100], vec![]),
        ],
    );
    let cfg = decode_cfg(&doc).unwrap();
    let a = cfg.node_by_wire_id(100).unwrap();
    let b = cfg.node_by_wire_id(200).unwrap();

    assert_eq!(a.succs(), &[b.id()]);
    assert_eq!(b.succs(), &[a.id()]);
    assert_eq!(a.preds(), &[b.id()]);
    assert_eq!(b.preds(), &[a.id()]);
    assert_eq!(cfg[a.succs()[0]].succs()[0], a.id());
    assert!(cfg.is_loop_head(a.id()));
}

#[test]
fn test_procedures_share_document() {
    let doc = cfg_doc(
        vec![proc_record(2, "B", 20, 20), proc_record(1, "A", 10, 11)],
        vec![
            node_record(20, 2, start(), &[], &[], vec![]),
            node_record(11, 1, exit(), &[], &[10], vec![]),
            node_record(10, 1, start(), &[11], &[], vec![]),
        ],
    );
    let cfg = decode_cfg(&doc).unwrap();
    let a = cfg.procedure_by_wire_id(1).unwrap();
    let b = cfg.procedure_by_wire_id(2).unwrap();

    let a_nodes: Vec<i64> = cfg.nodes_of(a).map(|n| n.wire_id()).collect();
    let b_nodes: Vec<i64> = cfg.nodes_of(b).map(|n| n.wire_id()).collect();
    assert_eq!(a_nodes, vec![10, 11]);
    assert_eq!(b_nodes, vec![20]);
    assert_eq!(cfg[b.start()].proc(), b.id());
    assert_eq!(cfg.reverse_postorder(a.id()), vec![a.start(), a.exit()]);
}

#[test]
fn test_procedure_by_name() {
    let cfg = decode_cfg(&straight_line()).unwrap();
    let name = cfg.procedure_by_wire_id(10).unwrap().name().clone();
    assert_eq!(cfg.procedure_by_name(&name).unwrap().wire_id(), 10);
    assert!(cfg.procedure_by_name(&ProcName::BuiltinNew).is_none());
}

// ====================
// Reference errors
// ====================

#[test]
fn test_unknown_successor() {
    let doc = cfg_doc(
        vec![proc_record(0, "Run", 1, 1)],
        vec![node_record(1, 0, start(), &[99], &[], vec![])],
    );
    let err = decode_cfg(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Reference);
    assert!(matches!(
        err,
        Error::UnresolvedReference {
            entity: Entity::Node,
            id: 99,
            ..
        }
    ));
}

#[test]
fn test_unknown_exit_node() {
    let doc = cfg_doc(
        vec![proc_record(0, "Run", 1, 2)],
        vec![node_record(1, 0, start(), &[], &[], vec![])],
    );
    let err = decode_cfg(&doc).unwrap_err();
    assert!(err.is_reference());
}

#[test]
fn test_unknown_owner() {
    let doc = cfg_doc(
        vec![proc_record(0, "Run", 1, 1)],
        vec![node_record(1, 5, start(), &[], &[], vec![])],
    );
    let err = decode_cfg(&doc).unwrap_err();
    assert!(matches!(
        err,
        Error::UnresolvedReference {
            entity: Entity::Procedure,
            id: 5,
            ..
        }
    ));
}

#[test]
fn test_duplicate_node_id() {
    let doc = cfg_doc(
        vec![proc_record(0, "Run", 1, 1)],
        vec![
            node_record(1, 0, start(), &[], &[], vec![]),
            node_record(1, 0, exit(), &[], &[], vec![]),
        ],
    );
    let err = decode_cfg(&doc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(matches!(
        err,
        Error::DuplicateId {
            entity: Entity::Node,
            id: 1
        }
    ));
}

// ====================
// Structural errors inside nodes
// ====================

#[test]
fn test_enum_type_in_temporary_rejected() {
    let mut node = node_record(1, 0, start(), &[], &[], vec![]);
    node["nd_temps"] = json!([{
        "id": {"kind": "Normal", "name": "n", "stamp": 0},
        "type": {"type_kind": "Tenum"}
    }]);
    let doc = cfg_doc(vec![proc_record(0, "Run", 1, 1)], vec![node]);
    assert!(matches!(
        decode_cfg(&doc),
        Err(Error::Unsupported { .. })
    ));
}

#[test]
fn test_unknown_instruction_rejects_document() {
    let doc = cfg_doc(
        vec![proc_record(0, "Run", 1, 1)],
        vec![node_record(
            1,
            0,
            start(),
            &[],
            &[],
            vec![json!({"instruction_kind": "Nullify"})],
        )],
    );
    assert!(matches!(
        decode_cfg(&doc),
        Err(Error::UnknownVariant { .. })
    ));
}

// ====================
// Literals and names
// ====================

#[test]
fn test_int_literals() {
    let d = Decoder::default();
    let null = d
        .int_lit(&json!({"unsigned": false, "value": 0, "is_pointer": true}))
        .unwrap();
    assert_eq!(null, IntLit::NULL);

    let five = d
        .int_lit(&json!({"unsigned": false, "value": 5, "is_pointer": true}))
        .unwrap();
    assert_eq!(five.value, 5);
    assert!(!five.pointer);

    let big = d
        .int_lit(&json!({"unsigned": true, "value": "170141183460469231731687303715884105727", "is_pointer": false}))
        .unwrap();
    assert_eq!(big.value, i128::MAX);
    assert!(big.unsigned);
}

#[test]
fn test_null_store_decodes_to_null_constant() {
    let mut store = store_local("p", 0);
    store["rvalue"]["constant"]["intval"]["is_pointer"] = json!(true);
    match Decoder::default().instr(&store).unwrap() {
        Instr::Store { rhs, .. } => {
            assert!(rhs.is_null());
            assert_eq!(rhs, Expr::null());
            assert_eq!(rhs, Expr::Const(Const::Int(IntLit::NULL)));
        }
        other => panic!("unexpected {:?}", other),
    }
}

// ====================
// Concurrency
// ====================

#[test]
fn test_parallel_decodes_are_independent() {
    let doc = straight_line();
    let expected = decode_cfg(&doc).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| Decoder::default().cfg(&doc)))
            .collect();
        for handle in handles {
            let cfg = handle.join().unwrap().unwrap();
            assert_eq!(cfg, expected);
        }
    });
}
