//! Pointer events and the context behaviors run in.

use std::ops::{BitOr, BitOrAssign};

use reportgraph_core::geometry::Point;

use crate::{
    config::LayoutConfig,
    scene::{GroupId, LinkId, NodeId, Scene, Selectable},
};

/// The model element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Link(LinkId),
    Group(GroupId),
}

impl From<Target> for Selectable {
    fn from(target: Target) -> Self {
        match target {
            Target::Node(id) => Selectable::Node(id),
            Target::Link(id) => Selectable::Link(id),
            Target::Group(id) => Selectable::Group(id),
        }
    }
}

/// Input delivered by the host, in client coordinates.
///
/// `target` is `None` when the pointer is over the empty canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { target: Option<Target>, point: Point },
    Move { target: Option<Target>, point: Point },
    Up { target: Option<Target>, point: Point },
    Click { target: Option<Target>, point: Point },
    DoubleClick { target: Option<Target>, point: Point },
}

impl PointerEvent {
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::Down { target, .. }
            | Self::Move { target, .. }
            | Self::Up { target, .. }
            | Self::Click { target, .. }
            | Self::DoubleClick { target, .. } => *target,
        }
    }

    pub fn point(&self) -> Point {
        match self {
            Self::Down { point, .. }
            | Self::Move { point, .. }
            | Self::Up { point, .. }
            | Self::Click { point, .. }
            | Self::DoubleClick { point, .. } => *point,
        }
    }

    /// The node under the pointer, if the target is one.
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target() {
            Some(Target::Node(id)) => Some(id),
            _ => None,
        }
    }
}

/// What a dispatched event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    /// Groups, nodes or links were added or removed.
    pub structure: bool,
    /// Something moved or changed its rendered extent.
    pub geometry: bool,
    pub selection: bool,
}

impl Changes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn structure() -> Self {
        Self {
            structure: true,
            geometry: true,
            selection: false,
        }
    }

    pub fn geometry() -> Self {
        Self {
            geometry: true,
            ..Self::default()
        }
    }

    pub fn selection() -> Self {
        Self {
            selection: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.structure || self.geometry || self.selection)
    }
}

impl BitOr for Changes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            structure: self.structure || rhs.structure,
            geometry: self.geometry || rhs.geometry,
            selection: self.selection || rhs.selection,
        }
    }
}

impl BitOrAssign for Changes {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Scene access handed to a [`super::Behavior`] for one event.
#[derive(Debug)]
pub struct Context<'a> {
    scene: &'a mut Scene,
    layout: &'a LayoutConfig,
}

impl<'a> Context<'a> {
    pub fn new(scene: &'a mut Scene, layout: &'a LayoutConfig) -> Self {
        Self { scene, layout }
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut *self.scene
    }

    pub fn layout(&self) -> &LayoutConfig {
        self.layout
    }

    /// Mutable scene and layout at once, for the free functions of
    /// [`crate::expansion`] and [`crate::layout`].
    pub fn parts(&mut self) -> (&mut Scene, &LayoutConfig) {
        (&mut *self.scene, self.layout)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use reportgraph_core::position::Report;

    use super::*;

    #[test]
    fn test_event_accessors() {
        let mut scene = Scene::new();
        let group = scene.add_group(Rc::new(Report::new("r", "R", vec![])), Point::default());
        let header = scene.group(group).unwrap().header();

        let event = PointerEvent::Click {
            target: Some(Target::Node(header)),
            point: Point::new(1.0, 2.0),
        };
        assert_eq!(event.target(), Some(Target::Node(header)));
        assert_eq!(event.target_node(), Some(header));
        assert_eq!(Selectable::from(Target::Group(group)), Selectable::Group(group));
        assert_eq!(event.point(), Point::new(1.0, 2.0));

        let canvas = PointerEvent::Up {
            target: None,
            point: Point::default(),
        };
        assert_eq!(canvas.target_node(), None);
    }

    #[test]
    fn test_changes_merge() {
        let mut changes = Changes::none();
        assert!(changes.is_empty());

        changes |= Changes::selection();
        changes |= Changes::geometry();
        assert_eq!(
            changes,
            Changes {
                structure: false,
                geometry: true,
                selection: true
            }
        );
        assert!((Changes::none() | Changes::structure()).structure);
    }
}
