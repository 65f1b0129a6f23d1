//! Expansion state machine.
//!
//! Every group is in one of two states:
//!
//! - **Collapsed**: it holds a single [`PlaceholderNode`] summarizing the
//!   children of an extended position, and no descendant groups.
//! - **Expanded**: the placeholder has been replaced by one [`ColumnNode`]
//!   per child. Each extended child spawned a collapsed descendant group,
//!   linked from its column to the descendant's header.
//!
//! [`activate`] moves a group from collapsed to expanded, [`collapse`]
//! reverses it, tearing down every descendant group transitively. Both are
//! mutual inverses on the visible structure. The group built for a selected
//! report ([`build_report`]) starts expanded without a source position and
//! therefore cannot be collapsed.
//!
//! Inline detail ([`toggle_inline`]) is a separate, per-column state: at most
//! one column of a group is inline-expanded at any time.
//!
//! Requests that reference nothing (unknown nodes, wrong node kinds) or that
//! have nothing to do (placeholders without children) resolve to
//! [`Transition::Unchanged`].

use std::rc::Rc;

use log::{debug, warn};

use reportgraph_core::{
    geometry::Point,
    position::{Position, Report},
};

use crate::{
    config::LayoutConfig,
    layout,
    routing,
    scene::{ColumnNode, GroupId, NodeId, NodeKind, PlaceholderNode, Scene},
};

/// Outcome of a state machine request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A report was laid out as a new root group.
    Built { group: GroupId, spawned: usize },
    /// A placeholder was replaced by `columns` columns, spawning `spawned` groups.
    Activated {
        group: GroupId,
        columns: usize,
        spawned: usize,
    },
    /// An expanded group went back to its placeholder, removing `removed` descendant groups.
    Collapsed { group: GroupId, removed: usize },
    /// A column's inline detail was switched.
    InlineToggled {
        group: GroupId,
        column: NodeId,
        expanded: bool,
    },
    /// Nothing applied.
    Unchanged,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Builds the root group for `report` at the configured origin.
///
/// Extended positions of the report spawn collapsed descendant groups.
pub fn build_report(scene: &mut Scene, layout: &LayoutConfig, report: Rc<Report>) -> Transition {
    let duplicates = report.duplicate_position_ids();
    if !duplicates.is_empty() {
        warn!(
            report:% = report.id(),
            duplicates:? = duplicates;
            "Report has duplicate position ids"
        );
    }

    let positions = report.positions().to_vec();
    let group = scene.add_group(report, layout.origin());
    if let Some(root) = scene.group_mut(group) {
        root.mark_expanded(None);
    }
    let (columns, spawned) = materialize(scene, layout, group, &positions);

    debug!(group:% = group, columns = columns, spawned = spawned; "Report built");
    Transition::Built { group, spawned }
}

/// Replaces the `placeholder` node by the children of its source position.
pub fn activate(scene: &mut Scene, layout: &LayoutConfig, placeholder: NodeId) -> Transition {
    let Some(source) = scene
        .node(placeholder)
        .and_then(|node| node.as_placeholder())
        .map(|node| Rc::clone(node.source()))
    else {
        debug!(node:% = placeholder; "Activate ignored, not a placeholder");
        return Transition::Unchanged;
    };
    if source.children().is_empty() {
        debug!(node:% = placeholder; "Activate ignored, placeholder has no positions");
        return Transition::Unchanged;
    }
    let Some(group) = scene.find_group_containing(placeholder) else {
        debug!(node:% = placeholder; "Activate ignored, placeholder has no group");
        return Transition::Unchanged;
    };

    assert!(
        !scene
            .groups()
            .any(|g| g.source().is_some_and(|other| Rc::ptr_eq(other, &source))),
        "Position {} is already expanded in another group",
        source.id()
    );

    scene.remove_node(placeholder);
    let (columns, spawned) = materialize(scene, layout, group, source.children());
    if let Some(target) = scene.group_mut(group) {
        target.mark_expanded(Some(source));
    }

    debug!(group:% = group, columns = columns, spawned = spawned; "Group activated");
    Transition::Activated {
        group,
        columns,
        spawned,
    }
}

/// Collapses the group whose header is `header`.
pub fn collapse(scene: &mut Scene, layout: &LayoutConfig, header: NodeId) -> Transition {
    let group = scene
        .find_group_containing(header)
        .filter(|id| scene.group(*id).is_some_and(|g| g.header() == header));
    match group {
        Some(group) => collapse_group(scene, layout, group),
        None => {
            debug!(node:% = header; "Collapse ignored, not a managed header");
            Transition::Unchanged
        }
    }
}

/// Collapses `group` back to a single placeholder for its recorded source.
pub fn collapse_group(scene: &mut Scene, layout: &LayoutConfig, group: GroupId) -> Transition {
    let Some(target) = scene.group(group) else {
        return Transition::Unchanged;
    };
    if !target.is_expanded() || target.source().is_none() {
        debug!(group:% = group; "Collapse ignored, nothing to collapse");
        return Transition::Unchanged;
    }

    let descendants = descendants(scene, group);
    for descendant in &descendants {
        scene.remove_group(*descendant);
    }

    let items = scene
        .group(group)
        .map(|g| g.items().to_vec())
        .unwrap_or_default();
    for item in items {
        scene.remove_node(item);
    }

    let Some(source) = scene.group_mut(group).and_then(|g| g.mark_collapsed()) else {
        return Transition::Unchanged;
    };
    debug_assert!(
        scene.group(group).is_some_and(|g| g.spawned().is_empty()),
        "Collapsed group still indexes descendants"
    );

    let anchor = scene.group(group).map(|g| g.anchor()).unwrap_or_default();
    scene.add_node(
        group,
        NodeKind::Placeholder(PlaceholderNode::new(source)),
        anchor,
    );
    layout::stack_group(scene, group, layout);

    debug!(group:% = group, removed = descendants.len(); "Group collapsed");
    Transition::Collapsed {
        group,
        removed: descendants.len(),
    }
}

/// Switches the inline detail of `column`, collapsing its siblings first.
pub fn toggle_inline(scene: &mut Scene, layout: &LayoutConfig, column: NodeId) -> Transition {
    let Some(was_expanded) = scene
        .node(column)
        .and_then(|node| node.as_column())
        .map(ColumnNode::is_expanded)
    else {
        return Transition::Unchanged;
    };
    let Some(group) = scene.find_group_containing(column) else {
        return Transition::Unchanged;
    };

    let siblings = scene
        .group(group)
        .map(|g| g.items().to_vec())
        .unwrap_or_default();
    for sibling in siblings {
        if let Some(other) = scene.node_mut(sibling).and_then(|n| n.as_column_mut()) {
            other.set_expanded(false);
        }
    }

    let expanded = !was_expanded;
    if let Some(target) = scene.node_mut(column).and_then(|n| n.as_column_mut()) {
        target.set_expanded(expanded);
    }
    layout::stack_group(scene, group, layout);

    debug!(group:% = group, column:% = column, expanded = expanded; "Inline detail toggled");
    Transition::InlineToggled {
        group,
        column,
        expanded,
    }
}

/// Every group materialized below `group`, at any depth, parents first.
pub fn descendants(scene: &Scene, group: GroupId) -> Vec<GroupId> {
    let mut found = Vec::new();
    let mut stack: Vec<GroupId> = scene
        .group(group)
        .map(|g| g.spawned().iter().rev().copied().collect())
        .unwrap_or_default();

    while let Some(current) = stack.pop() {
        found.push(current);
        if let Some(g) = scene.group(current) {
            stack.extend(g.spawned().iter().rev().copied());
        }
    }

    found
}

/// Adds one column per position to `group` and spawns a collapsed, linked
/// group for every extended one. Returns `(columns, spawned)`.
fn materialize(
    scene: &mut Scene,
    layout: &LayoutConfig,
    group: GroupId,
    positions: &[Rc<Position>],
) -> (usize, usize) {
    let Some(parent_anchor) = scene.group(group).map(|g| g.anchor()) else {
        return (0, 0);
    };

    let mut extended = Vec::new();
    for (index, position) in positions.iter().enumerate() {
        let kind = NodeKind::Column(ColumnNode::new(Rc::clone(position), index));
        let Some(column) = scene.add_node(group, kind, parent_anchor) else {
            continue;
        };
        if position.is_extended() {
            extended.push((column, position));
        }
    }

    let count = extended.len();
    for (index, (column, position)) in extended.into_iter().enumerate() {
        let anchor = layout::sibling_anchor(parent_anchor, index, count, layout);
        let child = spawn_collapsed(scene, layout, position, anchor);
        scene.attach_child(group, child);
        routing::connect(scene, column, child);
    }

    layout::stack_group(scene, group, layout);
    (positions.len(), count)
}

/// Creates a collapsed group for an extended position at `anchor`.
fn spawn_collapsed(
    scene: &mut Scene,
    layout: &LayoutConfig,
    source: &Rc<Position>,
    anchor: Point,
) -> GroupId {
    let report = Rc::new(Report::for_extended(source));
    let group = scene.add_group(report, anchor);
    scene.add_node(
        group,
        NodeKind::Placeholder(PlaceholderNode::new(Rc::clone(source))),
        anchor,
    );
    layout::stack_group(scene, group, layout);
    group
}


#[cfg(test)]
mod proptest_tests {
    use proptest::{prelude::*, sample::Index};

    use super::*;

    // ===================
    // Strategies
    // ===================

    #[derive(Debug, Clone)]
    enum Shape {
        Leaf,
        Branch(Vec<Shape>),
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Activate(Index),
        Collapse(Index),
        Toggle(Index),
    }

    fn shapes_strategy() -> impl Strategy<Value = Vec<Shape>> {
        let tree = Just(Shape::Leaf).prop_recursive(3, 32, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(Shape::Branch)
        });
        prop::collection::vec(tree, 1..5)
    }

    fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
        let op = prop_oneof![
            any::<Index>().prop_map(Op::Activate),
            any::<Index>().prop_map(Op::Collapse),
            any::<Index>().prop_map(Op::Toggle),
        ];
        prop::collection::vec(op, 0..40)
    }

    fn positions(shapes: &[Shape], prefix: &str) -> Vec<Rc<Position>> {
        shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| {
                let id = format!("{prefix}.{i}");
                match shape {
                    Shape::Leaf => Position::simple(&id, id.clone(), ""),
                    Shape::Branch(children) => {
                        let children = positions(children, &id);
                        Position::extended(&id, id.clone(), "", children)
                    }
                }
            })
            .collect()
    }

    fn build(shapes: &[Shape]) -> (Scene, LayoutConfig, GroupId) {
        let report = Rc::new(Report::new("root", "Root", positions(shapes, "p")));
        let mut scene = Scene::new();
        let layout = LayoutConfig::default();
        let Transition::Built { group, .. } = build_report(&mut scene, &layout, report) else {
            unreachable!("build always succeeds");
        };
        (scene, layout, group)
    }

    fn nodes_where(scene: &Scene, filter: impl Fn(&crate::scene::Node) -> bool) -> Vec<NodeId> {
        scene
            .nodes()
            .filter(|node| filter(node))
            .map(|node| node.id())
            .collect()
    }

    fn apply(scene: &mut Scene, layout: &LayoutConfig, op: Op) -> Result<(), TestCaseError> {
        match op {
            Op::Activate(pick) => {
                let placeholders = nodes_where(scene, |n| n.as_placeholder().is_some());
                if !placeholders.is_empty() {
                    activate(scene, layout, placeholders[pick.index(placeholders.len())]);
                }
            }
            Op::Collapse(pick) => {
                let expanded: Vec<GroupId> = scene
                    .groups()
                    .filter(|g| g.source().is_some())
                    .map(|g| g.id())
                    .collect();
                if !expanded.is_empty() {
                    let group = expanded[pick.index(expanded.len())];
                    let removed = descendants(scene, group);
                    let before = scene.group_count();
                    collapse_group(scene, layout, group);
                    prop_assert_eq!(scene.group_count(), before - removed.len());
                    for id in &removed {
                        prop_assert!(scene.group(*id).is_none());
                        prop_assert!(scene.incoming_links(*id).next().is_none());
                    }
                }
            }
            Op::Toggle(pick) => {
                let columns = nodes_where(scene, |n| n.as_column().is_some());
                if !columns.is_empty() {
                    toggle_inline(scene, layout, columns[pick.index(columns.len())]);
                }
            }
        }
        Ok(())
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Structural rules, exclusive inline expansion and recursive cleanup hold
    /// after every operation.
    fn check_operations_keep_scene_valid(shapes: &[Shape], ops: &[Op]) -> Result<(), TestCaseError> {
        let (mut scene, layout, _) = build(shapes);
        for op in ops {
            apply(&mut scene, &layout, *op)?;
            if let Err(violation) = scene.check_invariants() {
                return Err(TestCaseError::fail(violation));
            }
        }
        Ok(())
    }

    /// Columns sorted by original index reproduce the source list.
    fn check_stable_ordering(shapes: &[Shape], ops: &[Op]) -> Result<(), TestCaseError> {
        let (mut scene, layout, root) = build(shapes);
        for op in ops {
            apply(&mut scene, &layout, *op)?;
        }

        for group in scene.groups() {
            let expected: Vec<Rc<Position>> = match group.source() {
                Some(source) => source.children().to_vec(),
                None if group.id() == root => group.report().positions().to_vec(),
                None => Vec::new(),
            };
            let mut columns: Vec<&ColumnNode> = group
                .items()
                .iter()
                .filter_map(|id| scene.node(*id).and_then(|n| n.as_column()))
                .collect();
            columns.sort_by_key(|c| c.original_index());

            prop_assert_eq!(columns.len(), expected.len());
            for (column, position) in columns.iter().zip(&expected) {
                prop_assert!(Rc::ptr_eq(column.position(), position));
            }
        }
        Ok(())
    }

    /// Activate followed by collapse leaves the group as it was and other groups untouched.
    fn check_activate_collapse_inverse(shapes: &[Shape], ops: &[Op]) -> Result<(), TestCaseError> {
        let (mut scene, layout, _) = build(shapes);
        for op in ops {
            apply(&mut scene, &layout, *op)?;
        }

        let candidate = scene.nodes().find_map(|n| {
            n.as_placeholder()
                .filter(|p| p.child_count() > 0)
                .map(|p| (n.id(), Rc::clone(p.source())))
        });
        let Some((placeholder, source)) = candidate else {
            return Ok(());
        };
        let Some(group) = scene.find_group_containing(placeholder) else {
            return Err(TestCaseError::fail("placeholder without group"));
        };
        let node_count = scene.group(group).map(|g| g.nodes().len());
        let others: Vec<(GroupId, Vec<NodeId>, Point)> = scene
            .groups()
            .filter(|g| g.id() != group)
            .map(|g| (g.id(), g.nodes().to_vec(), g.anchor()))
            .collect();

        prop_assert!(activate(&mut scene, &layout, placeholder).is_change());
        prop_assert!(collapse_group(&mut scene, &layout, group).is_change());

        let restored = scene.group(group).map(|g| g.items().to_vec()).unwrap_or_default();
        prop_assert_eq!(restored.len(), 1);
        let restored_source = scene
            .node(restored[0])
            .and_then(|n| n.as_placeholder())
            .map(|p| Rc::clone(p.source()));
        prop_assert!(restored_source.is_some_and(|s| Rc::ptr_eq(&s, &source)));
        prop_assert_eq!(scene.group(group).map(|g| g.nodes().len()), node_count);

        for (id, nodes, anchor) in others {
            let other = scene.group(id);
            prop_assert!(other.is_some_and(|g| g.nodes() == &nodes[..] && g.anchor() == anchor));
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn operations_keep_scene_valid(shapes in shapes_strategy(), ops in ops_strategy()) {
            check_operations_keep_scene_valid(&shapes, &ops)?;
        }

        #[test]
        fn stable_ordering(shapes in shapes_strategy(), ops in ops_strategy()) {
            check_stable_ordering(&shapes, &ops)?;
        }

        #[test]
        fn activate_collapse_inverse(shapes in shapes_strategy(), ops in ops_strategy()) {
            check_activate_collapse_inverse(&shapes, &ops)?;
        }
    }
}
