//! # Graph Construction
//!
//! Procedures and nodes arrive as two flat lists that reference each other
//! by wire id in any order, with forward references and cycles. A single
//! recursive pass can't materialize a link to a node that hasn't been
//! decoded yet, so construction runs in two phases:
//!
//! 1. **Registration** - decode every procedure, then every node, keyed by
//!    wire id. A node's owner is resolved right away (all procedures are
//!    known by then); start/exit ids and edge id lists are kept verbatim.
//! 2. **Linking** - hand out arena handles in ascending wire-id order and
//!    resolve every recorded id against them. An id with no record is a
//!    reference error.

use super::json::{self, array_field, field, int_field, list_field};
use super::Decoder;
use crate::error::Entity;
use crate::ir::{
    ControlFlowGraph, Ident, Instr, Location, Node, NodeId, NodeKind, ProcAttributes, ProcId,
    Procedure, Pvar, Typ,
};
use crate::{Error, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// A procedure whose start/exit are still wire ids
struct PendingProc {
    attributes: ProcAttributes,
    start: i64,
    exit: i64,
}

/// A node whose edges are still wire ids
struct PendingNode {
    kind: NodeKind,
    loc: Location,
    instrs: Vec<Instr>,
    temps: Vec<(Ident, Typ)>,
    dead_pvars_before: Vec<Pvar>,
    dead_pvars_after: Vec<Pvar>,
    proc: ProcId,
    succs: Vec<i64>,
    preds: Vec<i64>,
    exn: Vec<i64>,
}

/// Phase 1 output
struct Registry {
    procs: BTreeMap<i64, PendingProc>,
    nodes: BTreeMap<i64, PendingNode>,
}

impl Decoder {
    /// Decode a CFG document into a fully linked graph
    pub fn cfg(&self, document: &Value) -> Result<ControlFlowGraph> {
        let procs = array_field(document, "procs", "CFG document")?;
        let nodes = array_field(document, "nodes", "CFG document")?;
        debug!(procs = procs.len(), nodes = nodes.len(), "decoding CFG document");

        let registry = self.register(procs, nodes)?;
        let cfg = registry.link()?;

        debug!(
            procs = cfg.procedure_count(),
            nodes = cfg.node_count(),
            "CFG document linked"
        );
        Ok(cfg)
    }

    /// Decode a structural node kind
    pub fn node_kind(&self, value: &Value) -> Result<NodeKind> {
        const CTX: &str = "node kind";
        let kind = match json::str_field(value, "kind", CTX)? {
            "StartNode" => NodeKind::Start,
            "ExitNode" => NodeKind::Exit,
            "JoinNode" => NodeKind::Join,
            "StmtNode" => NodeKind::Stmt(super::enums::enum_field(value, "stmt_kind", CTX)?),
            "PruneNode" => NodeKind::Prune {
                true_branch: json::bool_field(value, "true_branch", CTX)?,
                if_kind: super::enums::enum_field(value, "if_kind", CTX)?,
                kind: super::enums::enum_field(value, "prune_kind", CTX)?,
            },
            "SkipNode" => NodeKind::Skip(json::str_field(value, "comment", CTX)?.to_string()),
            other => return Err(Error::unknown_variant("node kind", other)),
        };
        Ok(kind)
    }

    // Phase 1

    fn register(&self, procs: &[Value], nodes: &[Value]) -> Result<Registry> {
        let mut pending_procs = BTreeMap::new();
        for value in procs {
            let (id, proc) = self.pending_proc(value)?;
            trace!(id, name = %proc.attributes.proc_name, "registered procedure");
            if pending_procs.insert(id, proc).is_some() {
                return Err(Error::DuplicateId {
                    entity: Entity::Procedure,
                    id,
                });
            }
        }

        // Handles follow wire-id order, so they are known before any node
        let proc_handles: HashMap<i64, ProcId> = pending_procs
            .keys()
            .enumerate()
            .map(|(index, &id)| (id, ProcId(index as u32)))
            .collect();

        let mut pending_nodes = BTreeMap::new();
        for value in nodes {
            let (id, node) = self.pending_node(value, &proc_handles)?;
            trace!(id, succs = node.succs.len(), "registered node");
            if pending_nodes.insert(id, node).is_some() {
                return Err(Error::DuplicateId {
                    entity: Entity::Node,
                    id,
                });
            }
        }

        Ok(Registry {
            procs: pending_procs,
            nodes: pending_nodes,
        })
    }

    fn pending_proc(&self, value: &Value) -> Result<(i64, PendingProc)> {
        const CTX: &str = "procedure record";
        let id = int_field(value, "pd_id", CTX)?;
        let proc = PendingProc {
            attributes: self.proc_attributes(field(value, "pd_attributes", CTX)?)?,
            start: int_field(value, "pd_start_node", CTX)?,
            exit: int_field(value, "pd_exit_node", CTX)?,
        };
        Ok((id, proc))
    }

    fn pending_node(
        &self,
        value: &Value,
        proc_handles: &HashMap<i64, ProcId>,
    ) -> Result<(i64, PendingNode)> {
        const CTX: &str = "node record";
        let id = int_field(value, "nd_id", CTX)?;
        let owner = int_field(value, "nd_proc_id", CTX)?;
        let proc = proc_handles
            .get(&owner)
            .copied()
            .ok_or_else(|| Error::UnresolvedReference {
                entity: Entity::Procedure,
                id: owner,
                referrer: format!("owner of node {}", id),
            })?;

        let ids = |key: &'static str| list_field(value, key, CTX, |v| json::as_i64(v, "node id"));
        let temps = list_field(value, "nd_temps", CTX, |t| {
            Ok((
                self.ident(field(t, "id", "node temporary")?)?,
                self.typ(field(t, "type", "node temporary")?)?,
            ))
        })?;

        let node = PendingNode {
            kind: self.node_kind(field(value, "nd_kind", CTX)?)?,
            loc: self.location(field(value, "nd_loc", CTX)?)?,
            instrs: list_field(value, "nd_instrs", CTX, |i| self.instr(i))?,
            temps,
            dead_pvars_before: list_field(value, "nd_dead_pvars_before", CTX, |p| self.pvar(p))?,
            dead_pvars_after: list_field(value, "nd_dead_pvars_after", CTX, |p| self.pvar(p))?,
            proc,
            succs: ids("nd_succ_ids")?,
            preds: ids("nd_pred_ids")?,
            exn: ids("nd_exn_ids")?,
        };
        Ok((id, node))
    }
}

impl Registry {
    // Phase 2

    fn link(self) -> Result<ControlFlowGraph> {
        let node_handles: HashMap<i64, NodeId> = self
            .nodes
            .keys()
            .enumerate()
            .map(|(index, &id)| (id, NodeId(index as u32)))
            .collect();

        let resolve = |ids: &[i64], referrer: &dyn Fn() -> String| -> Result<Vec<NodeId>> {
            ids.iter()
                .map(|id| {
                    node_handles
                        .get(id)
                        .copied()
                        .ok_or_else(|| Error::UnresolvedReference {
                            entity: Entity::Node,
                            id: *id,
                            referrer: referrer(),
                        })
                })
                .collect()
        };

        let mut procs = Vec::with_capacity(self.procs.len());
        for (index, (wire_id, pending)) in self.procs.into_iter().enumerate() {
            let start = resolve(&[pending.start], &|| format!("start node of procedure {}", wire_id))?[0];
            let exit = resolve(&[pending.exit], &|| format!("exit node of procedure {}", wire_id))?[0];
            procs.push(Procedure {
                handle: ProcId(index as u32),
                wire_id,
                attributes: pending.attributes,
                start,
                exit,
                nodes: Vec::new(),
            });
        }

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (index, (wire_id, pending)) in self.nodes.into_iter().enumerate() {
            let handle = NodeId(index as u32);
            let succs = resolve(&pending.succs, &|| format!("successors of node {}", wire_id))?;
            let preds = resolve(&pending.preds, &|| format!("predecessors of node {}", wire_id))?;
            let exn = resolve(&pending.exn, &|| format!("exception successors of node {}", wire_id))?;
            procs[pending.proc.index()].nodes.push(handle);
            nodes.push(Node {
                handle,
                wire_id,
                kind: pending.kind,
                loc: pending.loc,
                instrs: pending.instrs,
                temps: pending.temps,
                dead_pvars_before: pending.dead_pvars_before,
                dead_pvars_after: pending.dead_pvars_after,
                proc: pending.proc,
                succs,
                preds,
                exn,
            });
        }

        Ok(ControlFlowGraph::from_parts(procs, nodes))
    }
}
