//! Node types living inside a group.
//!
//! A group always holds exactly one [`HeaderNode`] followed by any number of
//! [`ColumnNode`]s and [`PlaceholderNode`]s. The render hints exposed here
//! ([`Node::label`], [`Node::identifier`], [`Node::detail`]) are what the
//! rendering collaborator paints.

use std::{fmt, rc::Rc};

use reportgraph_core::{
    geometry::{Point, Size},
    identifier::Id,
    position::{Position, Report},
};

use crate::config::LayoutConfig;

/// Handle of a node inside a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Title node of a group. Dragging it moves the whole group.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderNode {
    title: String,
}

impl HeaderNode {
    pub fn new(report: &Report) -> Self {
        Self {
            title: report.name().to_owned(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// One position shown as an item of a group.
#[derive(Debug, Clone)]
pub struct ColumnNode {
    position: Rc<Position>,
    original_index: usize,
    is_expanded: bool,
}

impl ColumnNode {
    /// Creates a collapsed column. `original_index` is the position's index
    /// in its source list and never changes afterwards.
    pub fn new(position: Rc<Position>, original_index: usize) -> Self {
        Self {
            position,
            original_index,
            is_expanded: false,
        }
    }

    pub fn position(&self) -> &Rc<Position> {
        &self.position
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }

    /// Whether the inline detail of this column is shown.
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.is_expanded = expanded;
    }

    /// Whether this column exposes an outgoing attachment point.
    pub fn has_port(&self) -> bool {
        self.position.is_extended()
    }
}

/// Collapsed summary standing in for the children of an extended position.
#[derive(Debug, Clone)]
pub struct PlaceholderNode {
    source: Rc<Position>,
    child_count: usize,
}

impl PlaceholderNode {
    pub fn new(source: Rc<Position>) -> Self {
        let child_count = source.children().len();
        Self {
            source,
            child_count,
        }
    }

    pub fn source(&self) -> &Rc<Position> {
        &self.source
    }

    pub fn child_count(&self) -> usize {
        self.child_count
    }

    /// Summary text: `"no positions"` or `"{n} positions"`.
    pub fn summary(&self) -> String {
        match self.child_count {
            0 => "no positions".to_string(),
            n => format!("{n} positions"),
        }
    }
}

/// The variant-specific part of a [`Node`].
#[derive(Debug, Clone)]
pub enum NodeKind {
    Header(HeaderNode),
    Column(ColumnNode),
    Placeholder(PlaceholderNode),
}

/// A node of the diagram together with its laid-out center.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    position: Point,
}

impl Node {
    pub(super) fn new(id: NodeId, kind: NodeKind, position: Point) -> Self {
        Self { id, kind, position }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Center of the node in diagram coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn is_header(&self) -> bool {
        matches!(self.kind, NodeKind::Header(_))
    }

    pub fn as_column(&self) -> Option<&ColumnNode> {
        match &self.kind {
            NodeKind::Column(column) => Some(column),
            _ => None,
        }
    }

    pub(crate) fn as_column_mut(&mut self) -> Option<&mut ColumnNode> {
        match &mut self.kind {
            NodeKind::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&PlaceholderNode> {
        match &self.kind {
            NodeKind::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        }
    }

    /// Main text of the node.
    pub fn label(&self) -> String {
        match &self.kind {
            NodeKind::Header(header) => header.title().to_owned(),
            NodeKind::Column(column) => column.position().name().to_owned(),
            NodeKind::Placeholder(placeholder) => placeholder.summary(),
        }
    }

    /// Identifier shown next to a column's label.
    pub fn identifier(&self) -> Option<Id> {
        self.as_column().map(|column| column.position().id())
    }

    /// Further information of an inline-expanded column.
    pub fn detail(&self) -> Option<&str> {
        self.as_column()
            .filter(|column| column.is_expanded())
            .map(|column| column.position().info().info())
    }

    /// Locked nodes cannot be moved on their own. Only headers move, and
    /// they take their group along.
    pub fn is_locked(&self) -> bool {
        !self.is_header()
    }

    /// Rendered size of the node.
    pub fn size(&self, layout: &LayoutConfig) -> Size {
        match self.kind {
            NodeKind::Header(_) => layout.header_size(),
            NodeKind::Column(_) | NodeKind::Placeholder(_) => layout.column_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(position: Rc<Position>) -> Node {
        Node::new(
            NodeId(1),
            NodeKind::Column(ColumnNode::new(position, 0)),
            Point::default(),
        )
    }

    #[test]
    fn test_placeholder_summary() {
        let empty = PlaceholderNode::new(Position::extended("E", "Empty", "", vec![]));
        assert_eq!(empty.child_count(), 0);
        assert_eq!(empty.summary(), "no positions");

        let full = PlaceholderNode::new(Position::extended(
            "F",
            "Full",
            "",
            vec![
                Position::simple("a", "A", ""),
                Position::simple("b", "B", ""),
                Position::simple("c", "C", ""),
            ],
        ));
        assert_eq!(full.child_count(), 3);
        assert_eq!(full.summary(), "3 positions");
    }

    #[test]
    fn test_column_port_follows_variant() {
        let simple = ColumnNode::new(Position::simple("s", "S", ""), 0);
        let extended = ColumnNode::new(Position::extended("e", "E", "", vec![]), 1);
        assert!(!simple.has_port());
        assert!(extended.has_port());
        assert_eq!(extended.original_index(), 1);
    }

    #[test]
    fn test_column_render_hints() {
        let mut node = column(Position::simple("PK001", "Personnel costs", "Wages and salaries"));

        assert_eq!(node.label(), "Personnel costs");
        assert_eq!(node.identifier(), Some(Id::new("PK001")));
        assert_eq!(node.detail(), None);
        assert!(node.is_locked());

        node.as_column_mut().expect("column").set_expanded(true);
        assert_eq!(node.detail(), Some("Wages and salaries"));
    }

    #[test]
    fn test_header_render_hints() {
        let report = Report::new("GUV001", "Income statement", vec![]);
        let node = Node::new(
            NodeId(0),
            NodeKind::Header(HeaderNode::new(&report)),
            Point::default(),
        );

        assert_eq!(node.label(), "Income statement");
        assert_eq!(node.identifier(), None);
        assert!(!node.is_locked());
        assert_eq!(node.size(&LayoutConfig::default()), Size::new(200.0, 40.0));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "n7");
    }
}
