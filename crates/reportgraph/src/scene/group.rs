//! Groups: the visual container of one report.

use std::{fmt, rc::Rc};

use reportgraph_core::{
    geometry::Point,
    position::{Position, Report},
};

use super::node::NodeId;

/// Handle of a group inside a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(super) usize);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// One report currently visualized.
///
/// `nodes` always starts with the header node. `parent` and `spawned` form
/// the explicit parent→children index between a group and the descendant
/// groups materialized from its extended columns.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    report: Rc<Report>,
    anchor: Point,
    nodes: Vec<NodeId>,
    expanded: bool,
    source: Option<Rc<Position>>,
    parent: Option<GroupId>,
    spawned: Vec<GroupId>,
}

impl Group {
    pub(super) fn new(id: GroupId, report: Rc<Report>, anchor: Point, header: NodeId) -> Self {
        Self {
            id,
            report,
            anchor,
            nodes: vec![header],
            expanded: false,
            source: None,
            parent: None,
            spawned: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn report(&self) -> &Rc<Report> {
        &self.report
    }

    /// Position of the header node; every other node is placed relative to it.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    pub fn header(&self) -> NodeId {
        self.nodes[0]
    }

    /// All nodes, header first.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Column and placeholder nodes, in insertion order.
    pub fn items(&self) -> &[NodeId] {
        &self.nodes[1..]
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub(super) fn push_node(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    pub(super) fn remove_node(&mut self, node: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|id| *id != node);
        before != self.nodes.len()
    }

    /// Whether the placeholder of this group has been replaced by columns.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Extended position this group was expanded from, while expanded.
    pub fn source(&self) -> Option<&Rc<Position>> {
        self.source.as_ref()
    }

    pub(crate) fn mark_expanded(&mut self, source: Option<Rc<Position>>) {
        self.expanded = true;
        self.source = source;
    }

    /// Resets the expansion flag and hands back the recorded source.
    pub(crate) fn mark_collapsed(&mut self) -> Option<Rc<Position>> {
        self.expanded = false;
        self.source.take()
    }

    /// Group whose extended column materialized this one.
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    pub(super) fn set_parent(&mut self, parent: Option<GroupId>) {
        self.parent = parent;
    }

    /// Descendant groups materialized directly from this group's columns.
    pub fn spawned(&self) -> &[GroupId] {
        &self.spawned
    }

    pub(super) fn push_spawned(&mut self, child: GroupId) {
        self.spawned.push(child);
    }

    pub(super) fn remove_spawned(&mut self, child: GroupId) {
        self.spawned.retain(|id| *id != child);
    }
}
