//! The mutable diagram state: groups, nodes, links and the selection.
//!
//! # Architecture
//!
//! - [`Group`] owns an ordered list of [`NodeId`]s, header first.
//! - [`Node`]s live in one flat table; each belongs to exactly one group.
//! - [`Link`]s connect a column's attachment point to a group header.
//!
//! Every public mutation leaves the scene structurally valid: removing a node
//! removes the links touching it, removing a group removes its nodes. The
//! [`Scene::check_invariants`] helper verifies the full set of structural
//! rules and is used by the test suites.
//!
//! Lookups that the contract describes as scans ([`Scene::find_group_containing`],
//! [`Scene::groups_where_report_id`]) are linear; diagrams hold tens of groups.

mod group;
mod node;

pub use group::{Group, GroupId};
pub use node::{ColumnNode, HeaderNode, Node, NodeId, NodeKind, PlaceholderNode};

use std::{collections::HashSet, fmt, rc::Rc};

use indexmap::IndexMap;
use log::trace;

use reportgraph_core::{
    geometry::Point,
    identifier::Id,
    position::{Position, Report},
};

/// Handle of a link inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// A connection from a column's attachment point to a group header.
///
/// Only endpoints are stored; the routed path is derived from the live node
/// positions, see [`crate::routing::route`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    id: LinkId,
    source: NodeId,
    target: NodeId,
    target_group: GroupId,
}

impl Link {
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// The column the link starts at.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// The header the link ends at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn target_group(&self) -> GroupId {
        self.target_group
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Anything a pointer can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selectable {
    Group(GroupId),
    Node(NodeId),
    Link(LinkId),
}

/// The live diagram.
#[derive(Debug, Default)]
pub struct Scene {
    groups: IndexMap<GroupId, Group>,
    nodes: IndexMap<NodeId, Node>,
    links: IndexMap<LinkId, Link>,
    selected: Vec<Selectable>,
    next_id: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub(crate) fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Groups in creation order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finds the group owning `node` by scanning every group.
    pub fn find_group_containing(&self, node: NodeId) -> Option<GroupId> {
        self.groups
            .values()
            .find(|group| group.contains(node))
            .map(Group::id)
    }

    /// All groups visualizing a report with the given id.
    pub fn groups_where_report_id(&self, id: Id) -> impl Iterator<Item = &Group> {
        self.groups
            .values()
            .filter(move |group| group.report().id() == id)
    }

    /// The link leaving `column`, if any.
    pub fn outgoing_link(&self, column: NodeId) -> Option<&Link> {
        self.links.values().find(|link| link.source == column)
    }

    /// Links ending at the header of `group`.
    pub fn incoming_links(&self, group: GroupId) -> impl Iterator<Item = &Link> {
        self.links
            .values()
            .filter(move |link| link.target_group == group)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a group for `report` with its header placed at `anchor`.
    pub fn add_group(&mut self, report: Rc<Report>, anchor: Point) -> GroupId {
        let group_id = GroupId(self.allocate());
        let header_id = NodeId(self.allocate());

        let header = Node::new(
            header_id,
            NodeKind::Header(HeaderNode::new(&report)),
            anchor,
        );
        self.nodes.insert(header_id, header);
        self.groups
            .insert(group_id, Group::new(group_id, report, anchor, header_id));

        trace!(group:% = group_id, header:% = header_id; "Group added");
        group_id
    }

    /// Removes `group` with all its nodes and every link touching them.
    ///
    /// Descendant groups are not removed; their parent reference is cleared.
    /// Returns `false` when the group does not exist.
    pub fn remove_group(&mut self, id: GroupId) -> bool {
        let Some(group) = self.groups.shift_remove(&id) else {
            return false;
        };

        for node in group.nodes() {
            self.detach_node(*node);
        }
        if let Some(parent) = group.parent().and_then(|p| self.groups.get_mut(&p)) {
            parent.remove_spawned(id);
        }
        for child in group.spawned() {
            if let Some(child) = self.groups.get_mut(child) {
                child.set_parent(None);
            }
        }
        self.selected.retain(|item| *item != Selectable::Group(id));

        trace!(group:% = id, nodes = group.nodes().len(); "Group removed");
        true
    }

    /// Appends an item node to `group`. Returns `None` for an unknown group.
    ///
    /// # Panics
    ///
    /// Panics when `kind` is a header: a group has exactly one, created with it.
    pub fn add_node(&mut self, group: GroupId, kind: NodeKind, position: Point) -> Option<NodeId> {
        assert!(
            !matches!(kind, NodeKind::Header(_)),
            "Headers are created together with their group"
        );
        if !self.groups.contains_key(&group) {
            return None;
        }

        let id = NodeId(self.allocate());
        self.nodes.insert(id, Node::new(id, kind, position));
        self.groups
            .get_mut(&group)
            .expect("group checked above")
            .push_node(id);
        Some(id)
    }

    /// Removes an item node and the links touching it.
    ///
    /// # Panics
    ///
    /// Panics when `id` is a header node; remove the group instead.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get(&id)?;
        assert!(!node.is_header(), "Header {id} can only go with its group");

        if let Some(group) = self.find_group_containing(id) {
            self.groups
                .get_mut(&group)
                .expect("group found above")
                .remove_node(id);
        }
        self.detach_node(id)
    }

    fn detach_node(&mut self, id: NodeId) -> Option<Node> {
        let touching: Vec<LinkId> = self
            .links
            .values()
            .filter(|link| link.touches(id))
            .map(Link::id)
            .collect();
        for link in touching {
            self.remove_link(link);
        }
        self.selected.retain(|item| *item != Selectable::Node(id));
        self.nodes.shift_remove(&id)
    }

    /// Adds a link from `source` to the header of `target_group`.
    ///
    /// Returns `None` when either end does not exist.
    ///
    /// # Panics
    ///
    /// Panics when `source` is not a column with an attachment point or when
    /// it already has an outgoing link.
    pub fn add_link(&mut self, source: NodeId, target_group: GroupId) -> Option<LinkId> {
        let node = self.nodes.get(&source)?;
        let target = self.groups.get(&target_group)?.header();

        assert!(
            node.as_column().is_some_and(ColumnNode::has_port),
            "Link source {source} has no attachment point"
        );
        assert!(
            self.outgoing_link(source).is_none(),
            "Column {source} already has an outgoing link"
        );

        let id = LinkId(self.allocate());
        self.links.insert(
            id,
            Link {
                id,
                source,
                target,
                target_group,
            },
        );
        Some(id)
    }

    pub fn remove_link(&mut self, id: LinkId) -> Option<Link> {
        self.selected.retain(|item| *item != Selectable::Link(id));
        self.links.shift_remove(&id)
    }

    /// Records `child` as materialized from `parent` in the parent→children index.
    pub(crate) fn attach_child(&mut self, parent: GroupId, child: GroupId) {
        if let Some(group) = self.groups.get_mut(&child) {
            group.set_parent(Some(parent));
        }
        if let Some(group) = self.groups.get_mut(&parent) {
            group.push_spawned(child);
        }
    }

    /// Drops every group, node, link and the selection.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.nodes.clear();
        self.links.clear();
        self.selected.clear();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Currently selected items.
    pub fn selected(&self) -> &[Selectable] {
        &self.selected
    }

    pub fn is_selected(&self, item: Selectable) -> bool {
        self.selected.contains(&item)
    }

    /// Adds `item` to the selection. Returns `false` when it is already
    /// selected or no longer exists.
    pub fn select(&mut self, item: Selectable) -> bool {
        let exists = match item {
            Selectable::Group(id) => self.groups.contains_key(&id),
            Selectable::Node(id) => self.nodes.contains_key(&id),
            Selectable::Link(id) => self.links.contains_key(&id),
        };
        if !exists || self.is_selected(item) {
            return false;
        }
        self.selected.push(item);
        true
    }

    /// Clears the selection. Returns `true` if anything was selected.
    pub fn unselect_all(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Verifies the structural invariants of the scene.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated rule.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut owned = HashSet::new();
        let mut expanded_sources: Vec<&Rc<Position>> = Vec::new();

        for group in self.groups.values() {
            let id = group.id();
            let header = self
                .nodes
                .get(&group.header())
                .ok_or_else(|| format!("{id}: header node is missing"))?;
            if !header.is_header() {
                return Err(format!("{id}: first node is not a header"));
            }

            let mut inline_expanded = 0;
            for node_id in group.items() {
                let node = self
                    .nodes
                    .get(node_id)
                    .ok_or_else(|| format!("{id}: node {node_id} is missing"))?;
                if node.is_header() {
                    return Err(format!("{id}: second header {node_id}"));
                }
                if node.as_column().is_some_and(ColumnNode::is_expanded) {
                    inline_expanded += 1;
                }
            }
            if inline_expanded > 1 {
                return Err(format!("{id}: {inline_expanded} columns expanded inline"));
            }

            for node_id in group.nodes() {
                if !owned.insert(*node_id) {
                    return Err(format!("{node_id} belongs to more than one group"));
                }
            }

            if let Some(parent) = group.parent() {
                let parent_group = self
                    .groups
                    .get(&parent)
                    .ok_or_else(|| format!("{id}: parent {parent} is missing"))?;
                if !parent_group.spawned().contains(&id) {
                    return Err(format!("{id}: not indexed by parent {parent}"));
                }
            }
            for child in group.spawned() {
                if self.groups.get(child).and_then(Group::parent) != Some(id) {
                    return Err(format!("{id}: spawned {child} does not point back"));
                }
            }

            if let Some(source) = group.source() {
                if expanded_sources.iter().any(|other| Rc::ptr_eq(other, source)) {
                    return Err(format!("{id}: source position expanded twice"));
                }
                expanded_sources.push(source);
            }
        }

        if owned.len() != self.nodes.len() {
            return Err("a node is not owned by any group".to_string());
        }

        let mut sources = HashSet::new();
        for link in self.links.values() {
            let lid = link.id();
            let source = self
                .nodes
                .get(&link.source)
                .ok_or_else(|| format!("{lid}: source is missing"))?;
            if !source.as_column().is_some_and(ColumnNode::has_port) {
                return Err(format!("{lid}: source has no attachment point"));
            }
            let group = self
                .groups
                .get(&link.target_group)
                .ok_or_else(|| format!("{lid}: target group is missing"))?;
            if group.header() != link.target {
                return Err(format!("{lid}: target is not the group header"));
            }
            if !sources.insert(link.source) {
                return Err(format!("{lid}: column has two outgoing links"));
            }
        }

        Ok(())
    }
}
