//! Link router.
//!
//! Links store only their endpoints. The drawn path is computed from the live
//! node positions every time it is requested, so moving a group (or
//! restacking its columns) redraws every link touching it without any
//! bookkeeping.
//!
//! Paths are orthogonal: they leave the column's right-side attachment point
//! horizontally, turn once at the midpoint x and enter the header's left-side
//! attachment point horizontally.

use log::debug;

use reportgraph_core::geometry::Point;

use crate::{
    config::LayoutConfig,
    scene::{GroupId, LinkId, NodeId, Scene},
};

/// The routed polyline of one link, source first.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPath {
    points: Vec<Point>,
}

impl LinkPath {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }
}

/// Right-side attachment point of a column exposing a port.
pub fn source_port(scene: &Scene, column: NodeId, layout: &LayoutConfig) -> Option<Point> {
    let node = scene.node(column)?;
    if !node.as_column()?.has_port() {
        return None;
    }
    let half_width = node.size(layout).width() / 2.0;
    Some(node.position().add_point(Point::new(half_width, 0.0)))
}

/// Left-side attachment point of a header.
pub fn target_port(scene: &Scene, header: NodeId, layout: &LayoutConfig) -> Option<Point> {
    let node = scene.node(header).filter(|node| node.is_header())?;
    let half_width = node.size(layout).width() / 2.0;
    Some(node.position().sub_point(Point::new(half_width, 0.0)))
}

/// Connects `column` to the header of `target`.
///
/// Returns `None` when either end no longer exists.
pub fn connect(scene: &mut Scene, column: NodeId, target: GroupId) -> Option<LinkId> {
    let link = scene.add_link(column, target)?;
    debug!(link:% = link, column:% = column, group:% = target; "Link connected");
    Some(link)
}

/// Removes a link. Returns `false` when it did not exist.
pub fn disconnect(scene: &mut Scene, link: LinkId) -> bool {
    let removed = scene.remove_link(link).is_some();
    if removed {
        debug!(link:% = link; "Link disconnected");
    }
    removed
}

/// Routes `link` between the current positions of its endpoints.
pub fn route(scene: &Scene, link: LinkId, layout: &LayoutConfig) -> Option<LinkPath> {
    let link = scene.link(link)?;
    let start = source_port(scene, link.source(), layout)?;
    let end = target_port(scene, link.target(), layout)?;

    if start.y() == end.y() {
        return Some(LinkPath {
            points: vec![start, end],
        });
    }

    let mid_x = start.midpoint(end).x();
    Some(LinkPath {
        points: vec![start, start.with_x(mid_x), end.with_x(mid_x), end],
    })
}
