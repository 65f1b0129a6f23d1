//! Layout engine: pure placement rules for nodes and groups.
//!
//! Two independent algorithms are provided:
//!
//! - **Column stacking** places the items of one group in a vertical stack
//!   below the header anchor `(hx, hy)`. Column `i` (ordered by
//!   `original_index`) sits at `(hx, y_i)` with
//!
//!   ```text
//!   y_0     = hy + spacing
//!   y_{i+1} = y_i + spacing                    (column i collapsed)
//!   y_{i+1} = y_i + spacing + expanded_extra   (column i inline-expanded)
//!   ```
//!
//!   Placeholders follow the columns and never take extra room.
//!
//! - **Sibling placement** puts the `k` descendant groups spawned from one
//!   parent at `level_width` to the right of the parent header, centered on
//!   its y and spread by `node_height`:
//!   `y_i = parent_y + i * node_height - (k - 1) * node_height / 2`.
//!   Sibling subtrees from different branches may overlap; placement only
//!   depends on sibling count and index.
//!
//! Stacking is anchor-relative, so moving a group only requires updating its
//! anchor and restacking.

use log::trace;

use reportgraph_core::geometry::{Bounds, Point};

use crate::{
    config::LayoutConfig,
    scene::{GroupId, NodeId, Scene},
};

/// Vertical positions of a stack of items below a header at `header_y`.
///
/// `expanded` lists, in stacking order, whether each item is inline-expanded.
pub fn stack_offsets(header_y: f32, expanded: &[bool], layout: &LayoutConfig) -> Vec<f32> {
    let mut positions = Vec::with_capacity(expanded.len());
    let mut y = header_y + layout.spacing();

    for is_expanded in expanded {
        positions.push(y);
        y += layout.spacing();
        if *is_expanded {
            y += layout.expanded_extra();
        }
    }

    positions
}

/// Anchor of sibling `index` out of `count` descendants of a group anchored at `parent`.
pub fn sibling_anchor(parent: Point, index: usize, count: usize, layout: &LayoutConfig) -> Point {
    let step = layout.node_height();
    let spread = count.saturating_sub(1) as f32 * step / 2.0;

    Point::new(
        parent.x() + layout.level_width(),
        parent.y() + index as f32 * step - spread,
    )
}

/// Items of `group` in stacking order: columns by `original_index`, then placeholders.
pub fn stacking_order(scene: &Scene, group: GroupId) -> Vec<NodeId> {
    let Some(group) = scene.group(group) else {
        return Vec::new();
    };

    let mut columns = Vec::new();
    let mut placeholders = Vec::new();
    for id in group.items() {
        match scene.node(*id).and_then(|node| node.as_column()) {
            Some(column) => columns.push((column.original_index(), *id)),
            None => placeholders.push(*id),
        }
    }
    columns.sort_by_key(|(index, _)| *index);

    columns
        .into_iter()
        .map(|(_, id)| id)
        .chain(placeholders)
        .collect()
}

/// Recomputes the header and item positions of `group` from its anchor.
///
/// Returns `false` if the group does not exist.
pub fn stack_group(scene: &mut Scene, group: GroupId, layout: &LayoutConfig) -> bool {
    let Some(anchor) = scene.group(group).map(|g| g.anchor()) else {
        return false;
    };
    let header = scene.group(group).map(|g| g.header());

    let order = stacking_order(scene, group);
    let expanded: Vec<bool> = order
        .iter()
        .map(|id| {
            scene
                .node(*id)
                .and_then(|node| node.as_column())
                .is_some_and(|column| column.is_expanded())
        })
        .collect();
    let offsets = stack_offsets(anchor.y(), &expanded, layout);

    if let Some(node) = header.and_then(|id| scene.node_mut(id)) {
        node.set_position(anchor);
    }
    for (id, y) in order.into_iter().zip(offsets) {
        if let Some(node) = scene.node_mut(id) {
            let position = anchor.with_y(y);
            trace!(group:% = group, node:% = id, y = y; "Item stacked");
            node.set_position(position);
        }
    }

    true
}

/// Moves the anchor of `group` by `delta` and restacks its nodes.
///
/// Other groups, including descendants, keep their anchors.
pub fn translate_group(
    scene: &mut Scene,
    group: GroupId,
    delta: Point,
    layout: &LayoutConfig,
) -> bool {
    let Some(target) = scene.group_mut(group) else {
        return false;
    };
    let anchor = target.anchor().add_point(delta);
    target.set_anchor(anchor);
    stack_group(scene, group, layout)
}

/// Padded bounding box around every node of `group`.
pub fn group_bounds(scene: &Scene, group: GroupId, layout: &LayoutConfig) -> Option<Bounds> {
    let group = scene.group(group)?;

    group
        .nodes()
        .iter()
        .filter_map(|id| scene.node(*id))
        .map(|node| node.position().to_bounds(node.size(layout)))
        .reduce(|acc, bounds| acc.merge(&bounds))
        .map(|bounds| bounds.add_padding(layout.group_padding()))
}
