//! Scripted interactions.
//!
//! An [`Action`] names an element by report or position id. Replaying it
//! resolves the id against the live scene and dispatches the pointer events a
//! user would produce, so scripted runs go through the same behaviors as a UI.

use std::fmt;

use log::debug;

use reportgraph::{
    Diagram, ReportGraphError,
    geometry::Point,
    interaction::{PointerEvent, Target},
    scene::{NodeId, Scene},
};

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Click the placeholder standing in for the children of a position.
    Activate(String),
    /// Double-click the header of the group showing a report.
    Collapse(String),
    /// Click the column of a position.
    Toggle(String),
    /// Drag the header of the group showing a report by `(dx, dy)`.
    Drag { report: String, dx: f32, dy: f32 },
    /// Click the group showing a report.
    Select(String),
    /// Click the empty canvas.
    Deselect,
}

impl Action {
    /// Parses `kind[:arg...]`, e.g. `activate:MA001` or `drag:GUV001:30:-10`.
    ///
    /// # Errors
    ///
    /// Returns a message describing the malformed action.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut parts = text.split(':');
        let kind = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let id = |args: &[&str]| match args {
            [id] if !id.is_empty() => Ok((*id).to_string()),
            _ => Err(format!("`{kind}` expects exactly one id, got `{text}`")),
        };

        match kind {
            "activate" => id(args.as_slice()).map(Self::Activate),
            "collapse" => id(args.as_slice()).map(Self::Collapse),
            "toggle" => id(args.as_slice()).map(Self::Toggle),
            "select" => id(args.as_slice()).map(Self::Select),
            "deselect" if args.is_empty() => Ok(Self::Deselect),
            "drag" => match args[..] {
                [report, dx, dy] if !report.is_empty() => {
                    let offset = |value: &str| {
                        value
                            .parse::<f32>()
                            .map_err(|err| format!("invalid drag offset `{value}`: {err}"))
                    };
                    Ok(Self::Drag {
                        report: report.to_string(),
                        dx: offset(dx)?,
                        dy: offset(dy)?,
                    })
                }
                _ => Err(format!("`drag` expects `drag:<report>:<dx>:<dy>`, got `{text}`")),
            },
            _ => Err(format!("unknown action `{text}`")),
        }
    }

    /// Dispatches the pointer events of this action to `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportGraphError::UnknownTarget`] when the named element is
    /// not in the diagram.
    pub fn replay(&self, diagram: &mut Diagram) -> Result<(), ReportGraphError> {
        let events = self.events(diagram.scene())?;
        debug!(action:% = self, events = events.len(); "Replaying action");

        for event in &events {
            diagram.dispatch(event);
        }
        Ok(())
    }

    fn events(&self, scene: &Scene) -> Result<Vec<PointerEvent>, ReportGraphError> {
        let unknown = || ReportGraphError::UnknownTarget(self.to_string());

        let events = match self {
            Self::Activate(id) => {
                let node = placeholder(scene, id).ok_or_else(unknown)?;
                vec![click(scene, Target::Node(node))]
            }
            Self::Collapse(id) => {
                let header = header(scene, id).ok_or_else(unknown)?;
                vec![PointerEvent::DoubleClick {
                    target: Some(Target::Node(header)),
                    point: node_point(scene, header),
                }]
            }
            Self::Toggle(id) => {
                let node = column(scene, id).ok_or_else(unknown)?;
                vec![click(scene, Target::Node(node))]
            }
            Self::Drag { report, dx, dy } => {
                let header = header(scene, report).ok_or_else(unknown)?;
                let start = node_point(scene, header);
                let end = start.add_point(Point::new(*dx, *dy));
                let target = Some(Target::Node(header));
                vec![
                    PointerEvent::Down {
                        target,
                        point: start,
                    },
                    PointerEvent::Move { target, point: end },
                    PointerEvent::Up { target, point: end },
                ]
            }
            Self::Select(id) => {
                let group = scene
                    .groups()
                    .find(|g| g.report().id() == id.as_str())
                    .map(|g| g.id())
                    .ok_or_else(unknown)?;
                vec![click(scene, Target::Group(group))]
            }
            Self::Deselect => vec![PointerEvent::Click {
                target: None,
                point: Point::default(),
            }],
        };
        Ok(events)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activate(id) => write!(f, "activate:{id}"),
            Self::Collapse(id) => write!(f, "collapse:{id}"),
            Self::Toggle(id) => write!(f, "toggle:{id}"),
            Self::Drag { report, dx, dy } => write!(f, "drag:{report}:{dx}:{dy}"),
            Self::Select(id) => write!(f, "select:{id}"),
            Self::Deselect => f.write_str("deselect"),
        }
    }
}

fn click(scene: &Scene, target: Target) -> PointerEvent {
    let point = match target {
        Target::Node(node) => node_point(scene, node),
        Target::Group(group) => scene.group(group).map(|g| g.anchor()).unwrap_or_default(),
        Target::Link(_) => Point::default(),
    };
    PointerEvent::Click {
        target: Some(target),
        point,
    }
}

fn node_point(scene: &Scene, node: NodeId) -> Point {
    scene.node(node).map(|n| n.position()).unwrap_or_default()
}

fn placeholder(scene: &Scene, position: &str) -> Option<NodeId> {
    scene
        .nodes()
        .find(|n| n.as_placeholder().is_some_and(|p| p.source().id() == position))
        .map(|n| n.id())
}

fn column(scene: &Scene, position: &str) -> Option<NodeId> {
    scene
        .nodes()
        .find(|n| n.as_column().is_some_and(|c| c.position().id() == position))
        .map(|n| n.id())
}

fn header(scene: &Scene, report: &str) -> Option<NodeId> {
    scene
        .groups()
        .find(|g| g.report().id() == report)
        .map(|g| g.header())
}
