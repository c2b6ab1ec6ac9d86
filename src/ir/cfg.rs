//! # Control Flow Graph
//!
//! The graph owns every procedure and every node in two index-stable arenas.
//! Procedures and nodes refer to each other through [`ProcId`] / [`NodeId`]
//! handles, so cyclic links (loop back-edges, self-successors) need no
//! shared ownership.
//!
//! Arenas are laid out in ascending wire-id order. Two documents that differ
//! only in declaration order therefore decode to equal graphs.

use super::attributes::ProcAttributes;
use super::instr::{IfKind, Instr};
use super::names::{Ident, Location, ProcName, Pvar};
use super::types::Typ;
use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

/// Handle of a node inside its [`ControlFlowGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a procedure inside its [`ControlFlowGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcId(pub(crate) u32);

impl ProcId {
    /// Arena index
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

wire_enum! {
    /// What a statement node was generated for
    pub enum StmtKind as "statement node kind" {
        /// Failed assertion
        AssertionFailure = "AssertionFailure",
        /// Between the last join and the exit node
        BetweenJoinAndExit = "BetweenJoinAndExit",
        /// Call
        Call = "Call",
        /// Class cast check
        ClassCastException = "ClassCastException",
        /// Constructor field initialisation
        ConstructorInit = "ConstructorInit",
        /// Local declaration
        DeclStmt = "DeclStmt",
        /// Exception handler entry
        ExceptionHandler = "ExceptionHandler",
        /// Node collecting exceptional exits
        ExceptionsSink = "ExceptionsSink",
        /// `finally` block
        FinallyBranch = "FinallyBranch",
        /// Ordinary method body statement
        MethodBody = "MethodBody",
        /// Lock acquisition
        MonitorEnter = "MonitorEnter",
        /// Lock release
        MonitorExit = "MonitorExit",
        /// Out-of-bounds check
        OutOfBound = "OutOfBound",
        /// `return`
        ReturnStmt = "ReturnStmt",
        /// No-op
        Skip = "Skip",
        /// `switch`
        SwitchStmt = "SwitchStmt",
        /// `this` is non-null
        ThisNotNull = "ThisNotNull",
        /// `throw`
        Throw = "Throw",
        /// Null dereference exception
        ThrowNPE = "ThrowNPE",
    }
}

wire_enum! {
    /// Why a prune node exists
    pub enum PruneKind as "prune node kind" {
        /// Exception handler dispatch
        ExceptionHandler = "ExceptionHandler",
        /// False branch of a condition
        FalseBranch = "FalseBranch",
        /// Array bounds check
        InBound = "InBound",
        /// Type test
        IsInstance = "IsInstance",
        /// Other method body branch
        MethodBody = "MethodBody",
        /// Null check
        NotNull = "NotNull",
        /// True branch of a condition
        TrueBranch = "TrueBranch",
    }
}

/// Structural classification of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Procedure entry
    Start,
    /// Procedure exit
    Exit,
    /// Statement
    Stmt(StmtKind),
    /// Control-flow merge
    Join,
    /// One side of a conditional
    Prune {
        /// Branch polarity
        true_branch: bool,
        /// Syntactic origin
        if_kind: IfKind,
        /// Reason for the prune
        kind: PruneKind,
    },
    /// Placeholder with a comment
    Skip(String),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::decode::WireEnum;
        match self {
            NodeKind::Start => write!(f, "Start"),
            NodeKind::Exit => write!(f, "Exit"),
            NodeKind::Stmt(kind) => write!(f, "Stmt_{}", kind.tag()),
            NodeKind::Join => write!(f, "Join"),
            NodeKind::Prune {
                true_branch, kind, ..
            } => write!(f, "Prune ({} branch, {})", true_branch, kind.tag()),
            NodeKind::Skip(comment) => write!(f, "Skip ({})", comment),
        }
    }
}

/// A program point
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) handle: NodeId,
    pub(crate) wire_id: i64,
    pub(crate) kind: NodeKind,
    pub(crate) loc: Location,
    pub(crate) instrs: Vec<Instr>,
    pub(crate) temps: Vec<(Ident, Typ)>,
    pub(crate) dead_pvars_before: Vec<Pvar>,
    pub(crate) dead_pvars_after: Vec<Pvar>,
    pub(crate) proc: ProcId,
    pub(crate) succs: Vec<NodeId>,
    pub(crate) preds: Vec<NodeId>,
    pub(crate) exn: Vec<NodeId>,
}

impl Node {
    /// Handle of this node
    pub fn id(&self) -> NodeId {
        self.handle
    }

    /// Id the node had in its source document
    pub fn wire_id(&self) -> i64 {
        self.wire_id
    }

    /// Structural kind
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Source position
    pub fn loc(&self) -> &Location {
        &self.loc
    }

    /// Instructions in execution order
    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// Temporaries introduced by this node
    pub fn temps(&self) -> &[(Ident, Typ)] {
        &self.temps
    }

    /// Program variables dead before this node
    pub fn dead_pvars_before(&self) -> &[Pvar] {
        &self.dead_pvars_before
    }

    /// Program variables dead after this node
    pub fn dead_pvars_after(&self) -> &[Pvar] {
        &self.dead_pvars_after
    }

    /// Owning procedure
    pub fn proc(&self) -> ProcId {
        self.proc
    }

    /// Normal successors
    pub fn succs(&self) -> &[NodeId] {
        &self.succs
    }

    /// Normal predecessors
    pub fn preds(&self) -> &[NodeId] {
        &self.preds
    }

    /// Exceptional successors
    pub fn exn_succs(&self) -> &[NodeId] {
        &self.exn
    }
}

/// A procedure and the entry/exit of its body
#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub(crate) handle: ProcId,
    pub(crate) wire_id: i64,
    pub(crate) attributes: ProcAttributes,
    pub(crate) start: NodeId,
    pub(crate) exit: NodeId,
    pub(crate) nodes: Vec<NodeId>,
}

impl Procedure {
    /// Handle of this procedure
    pub fn id(&self) -> ProcId {
        self.handle
    }

    /// Id the procedure had in its source document
    pub fn wire_id(&self) -> i64 {
        self.wire_id
    }

    /// Declared attributes
    pub fn attributes(&self) -> &ProcAttributes {
        &self.attributes
    }

    /// Procedure name
    pub fn name(&self) -> &ProcName {
        &self.attributes.proc_name
    }

    /// Entry node
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Exit node
    pub fn exit(&self) -> NodeId {
        self.exit
    }

    /// Nodes owned by this procedure, in wire-id order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

/// All procedures and nodes of one decoded document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlFlowGraph {
    procs: Vec<Procedure>,
    nodes: Vec<Node>,
}

impl ControlFlowGraph {
    /// Assemble a graph from fully linked arenas sorted by wire id
    pub(crate) fn from_parts(procs: Vec<Procedure>, nodes: Vec<Node>) -> Self {
        debug_assert!(procs.windows(2).all(|w| w[0].wire_id < w[1].wire_id));
        debug_assert!(nodes.windows(2).all(|w| w[0].wire_id < w[1].wire_id));
        Self { procs, nodes }
    }

    /// Number of procedures
    pub fn procedure_count(&self) -> usize {
        self.procs.len()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no procedures
    pub fn is_empty(&self) -> bool {
        self.procs.is_empty()
    }

    /// All procedures in wire-id order
    pub fn procedures(&self) -> impl Iterator<Item = &Procedure> {
        self.procs.iter()
    }

    /// All nodes in wire-id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Procedure by handle
    pub fn procedure(&self, id: ProcId) -> &Procedure {
        &self.procs[id.index()]
    }

    /// Node by handle
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Procedure by its document id
    pub fn procedure_by_wire_id(&self, wire_id: i64) -> Option<&Procedure> {
        self.procs
            .binary_search_by_key(&wire_id, |p| p.wire_id)
            .ok()
            .map(|i| &self.procs[i])
    }

    /// Node by its document id
    pub fn node_by_wire_id(&self, wire_id: i64) -> Option<&Node> {
        self.nodes
            .binary_search_by_key(&wire_id, |n| n.wire_id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// First procedure with the given name
    pub fn procedure_by_name(&self, name: &ProcName) -> Option<&Procedure> {
        self.procs.iter().find(|p| p.name() == name)
    }

    /// Nodes owned by a procedure
    pub fn nodes_of<'a>(&'a self, proc: &'a Procedure) -> impl Iterator<Item = &'a Node> + 'a {
        proc.nodes.iter().map(move |&id| self.node(id))
    }

    /// Normal successors of a node
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).succs.iter().map(move |&s| self.node(s))
    }

    /// Normal predecessors of a node
    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.node(id).preds.iter().map(move |&p| self.node(p))
    }

    /// Nodes reachable from the procedure's start node in reverse postorder,
    /// following normal and exceptional successors
    pub fn reverse_postorder(&self, proc: ProcId) -> Vec<NodeId> {
        let start = self.procedure(proc).start;
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut order: Vec<NodeId> = Vec::new();
        // (node, index of the next successor to visit)
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
        visited.insert(start);

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            top.1 += 1;
            let n = self.node(node);
            match n.succs.iter().chain(n.exn.iter()).nth(next).copied() {
                Some(s) => {
                    if visited.insert(s) {
                        stack.push((s, 0));
                    }
                }
                None => {
                    order.push(node);
                    stack.pop();
                }
            }
        }

        order.reverse();
        order
    }

    /// Whether some predecessor of the node is reached after it in reverse
    /// postorder (the target of a back edge)
    pub fn is_loop_head(&self, id: NodeId) -> bool {
        let rpo = self.reverse_postorder(self.node(id).proc);
        let Some(pos) = rpo.iter().position(|&n| n == id) else {
            return false;
        };
        self.node(id)
            .preds
            .iter()
            .any(|p| rpo.iter().position(|n| n == p).is_some_and(|pp| pp >= pos))
    }
}

impl Index<NodeId> for ControlFlowGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

impl Index<ProcId> for ControlFlowGraph {
    type Output = Procedure;

    fn index(&self, id: ProcId) -> &Procedure {
        self.procedure(id)
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, cfg: &ControlFlowGraph, ids: &[NodeId]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", cfg.node(*id).wire_id)?;
    }
    Ok(())
}

/// Textual dump, one procedure after another
impl fmt::Display for ControlFlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for proc in &self.procs {
            writeln!(f, "procedure {} [{}]", proc.name(), proc.attributes.loc)?;
            for node in self.nodes_of(proc) {
                write!(f, "  #{} {}  succs: ", node.wire_id, node.kind)?;
                write_ids(f, self, &node.succs)?;
                write!(f, "  preds: ")?;
                write_ids(f, self, &node.preds)?;
                if !node.exn.is_empty() {
                    write!(f, "  exn: ")?;
                    write_ids(f, self, &node.exn)?;
                }
                writeln!(f)?;
                for instr in &node.instrs {
                    writeln!(f, "      {};", instr)?;
                }
            }
        }
        Ok(())
    }
}
