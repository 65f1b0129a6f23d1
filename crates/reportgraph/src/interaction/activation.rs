use super::{Behavior, Changes, Context, PointerEvent};
use crate::{
    expansion::{self, Transition},
    scene::NodeKind,
};

/// Maps clicks on nodes to the expansion state machine.
///
/// | gesture | node | transition |
/// |---|---|---|
/// | click | placeholder | [`expansion::activate`] |
/// | click | column | [`expansion::toggle_inline`] |
/// | double click | header | [`expansion::collapse`] |
#[derive(Debug, Default)]
pub struct ExpansionBehavior;

impl ExpansionBehavior {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Activate,
    ToggleInline,
    Collapse,
}

impl Behavior for ExpansionBehavior {
    fn handle(&mut self, ctx: &mut Context<'_>, event: &PointerEvent) -> Changes {
        let Some(node) = event.target_node() else {
            return Changes::none();
        };
        let gesture = ctx
            .scene()
            .node(node)
            .and_then(|n| match (event, n.kind()) {
                (PointerEvent::Click { .. }, NodeKind::Placeholder(_)) => Some(Gesture::Activate),
                (PointerEvent::Click { .. }, NodeKind::Column(_)) => Some(Gesture::ToggleInline),
                (PointerEvent::DoubleClick { .. }, NodeKind::Header(_)) => Some(Gesture::Collapse),
                _ => None,
            });
        let Some(gesture) = gesture else {
            return Changes::none();
        };

        let (scene, layout) = ctx.parts();
        let transition = match gesture {
            Gesture::Activate => expansion::activate(scene, layout, node),
            Gesture::ToggleInline => expansion::toggle_inline(scene, layout, node),
            Gesture::Collapse => expansion::collapse(scene, layout, node),
        };

        match transition {
            Transition::Built { .. }
            | Transition::Activated { .. }
            | Transition::Collapsed { .. } => Changes::structure(),
            Transition::InlineToggled { .. } => Changes::geometry(),
            Transition::Unchanged => Changes::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use reportgraph_core::{
        geometry::Point,
        position::{Position, Report},
    };

    use super::*;
    use crate::{
        config::LayoutConfig,
        interaction::Target,
        scene::{GroupId, NodeId, Scene},
    };

    fn scene() -> (Scene, GroupId) {
        let report = Rc::new(Report::new(
            "KO001",
            "Costs",
            vec![
                Position::simple("KO010", "Rent", "Office and storage"),
                Position::extended(
                    "KO020",
                    "Travel",
                    "",
                    vec![
                        Position::simple("KO021", "Flights", ""),
                        Position::simple("KO022", "Hotels", ""),
                    ],
                ),
            ],
        ));
        let mut scene = Scene::new();
        expansion::build_report(&mut scene, &LayoutConfig::default(), report);
        let child = scene.groups().nth(1).map(|g| g.id()).unwrap();
        (scene, child)
    }

    fn click(node: NodeId) -> PointerEvent {
        PointerEvent::Click {
            target: Some(Target::Node(node)),
            point: Point::default(),
        }
    }

    fn double_click(node: NodeId) -> PointerEvent {
        PointerEvent::DoubleClick {
            target: Some(Target::Node(node)),
            point: Point::default(),
        }
    }

    #[test]
    fn test_click_placeholder_activates() {
        let (mut scene, child) = scene();
        let layout = LayoutConfig::default();
        let placeholder = scene.group(child).unwrap().items()[0];

        let mut behavior = ExpansionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);
        let changes = behavior.handle(&mut ctx, &click(placeholder));

        assert!(changes.structure);
        assert!(ctx.scene().group(child).unwrap().is_expanded());
        assert_eq!(ctx.scene().group(child).unwrap().items().len(), 2);
    }

    #[test]
    fn test_double_click_header_collapses() {
        let (mut scene, child) = scene();
        let layout = LayoutConfig::default();
        let placeholder = scene.group(child).unwrap().items()[0];
        let header = scene.group(child).unwrap().header();

        let mut behavior = ExpansionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);
        behavior.handle(&mut ctx, &click(placeholder));
        assert!(behavior.handle(&mut ctx, &double_click(header)).structure);
        assert!(!ctx.scene().group(child).unwrap().is_expanded());

        // Single click on a header does nothing here.
        assert!(behavior.handle(&mut ctx, &click(header)).is_empty());
    }

    #[test]
    fn test_click_column_toggles_detail() {
        let (mut scene, child) = scene();
        let layout = LayoutConfig::default();
        let root = scene.group(child).unwrap().parent().unwrap();
        let column = scene.group(root).unwrap().items()[0];

        let mut behavior = ExpansionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);
        let changes = behavior.handle(&mut ctx, &click(column));

        assert_eq!(changes, Changes::geometry());
        assert_eq!(
            ctx.scene().node(column).unwrap().detail(),
            Some("Office and storage")
        );
    }

    #[test]
    fn test_canvas_and_double_click_placeholder_ignored() {
        let (mut scene, child) = scene();
        let layout = LayoutConfig::default();
        let placeholder = scene.group(child).unwrap().items()[0];

        let mut behavior = ExpansionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);
        let canvas = PointerEvent::Click {
            target: None,
            point: Point::default(),
        };
        assert!(behavior.handle(&mut ctx, &canvas).is_empty());
        assert!(behavior.handle(&mut ctx, &double_click(placeholder)).is_empty());
        assert!(!ctx.scene().group(child).unwrap().is_expanded());
    }
}
