//! Plain-text outline of a diagram.
//!
//! The outline lists every group with its nodes, every link with its routed
//! endpoints, and the selection. Coordinates are node centers.
//!
//! ```text
//! group g0 GUV001 "GuV Report" at (200, 200) expanded
//!   header n1 "GuV Report" (200, 200)
//!   column n2 UE001 "Umsatzerlöse" (200, 250)
//!   column n3 MA001 "Materialaufwand" (200, 300) port
//! group g4 MA001 "Materialaufwand" at (520, 200) collapsed
//!   header n5 "Materialaufwand" (520, 200)
//!   placeholder n6 "3 positions" (520, 250)
//! link l7 n3 -> g4 (300, 300) -> (420, 200) via 4 points
//! selected n3
//! ```

use std::fmt::{self, Write};

use reportgraph::{
    Diagram,
    geometry::Point,
    scene::{Node, NodeKind, Selectable},
};

struct Coords(Point);

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x(), self.0.y())
    }
}

/// Renders the outline of `diagram`.
pub fn render(diagram: &Diagram) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_outline(&mut out, diagram);
    out
}

fn write_outline(out: &mut String, diagram: &Diagram) -> fmt::Result {
    let scene = diagram.scene();

    for group in scene.groups() {
        let state = if group.is_expanded() {
            "expanded"
        } else {
            "collapsed"
        };
        writeln!(
            out,
            "group {} {} {:?} at {} {state}",
            group.id(),
            group.report().id(),
            group.report().name(),
            Coords(group.anchor()),
        )?;
        for node in group.nodes().iter().filter_map(|id| scene.node(*id)) {
            write_node(out, node)?;
        }
    }

    for link in scene.links() {
        write!(out, "link {} {} -> {}", link.id(), link.source(), link.target_group())?;
        match diagram.route(link.id()) {
            Some(path) => writeln!(
                out,
                " {} -> {} via {} points",
                Coords(path.start()),
                Coords(path.end()),
                path.points().len()
            )?,
            None => writeln!(out, " unrouted")?,
        }
    }

    for item in scene.selected() {
        match item {
            Selectable::Group(id) => writeln!(out, "selected {id}")?,
            Selectable::Node(id) => writeln!(out, "selected {id}")?,
            Selectable::Link(id) => writeln!(out, "selected {id}")?,
        }
    }
    Ok(())
}

fn write_node(out: &mut String, node: &Node) -> fmt::Result {
    let at = Coords(node.position());
    match node.kind() {
        NodeKind::Header(_) => writeln!(out, "  header {} {:?} {at}", node.id(), node.label()),
        NodeKind::Column(column) => {
            write!(
                out,
                "  column {} {} {:?} {at}",
                node.id(),
                column.position().id(),
                node.label()
            )?;
            if column.has_port() {
                write!(out, " port")?;
            }
            if let Some(detail) = node.detail() {
                write!(out, " detail={detail:?}")?;
            }
            writeln!(out)
        }
        NodeKind::Placeholder(_) => {
            writeln!(out, "  placeholder {} {:?} {at}", node.id(), node.label())
        }
    }
}
