use log::debug;

use super::{Behavior, Changes, Context, PointerEvent};

/// Keeps the selection at zero or one item.
///
/// Every click first clears the selection and then selects the clicked item,
/// if any. Clicking the empty canvas leaves nothing selected.
#[derive(Debug, Default)]
pub struct SingleSelectionBehavior;

impl SingleSelectionBehavior {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for SingleSelectionBehavior {
    fn handle(&mut self, ctx: &mut Context<'_>, event: &PointerEvent) -> Changes {
        let PointerEvent::Click { target, .. } = event else {
            return Changes::none();
        };

        let scene = ctx.scene_mut();
        let cleared = scene.unselect_all();
        let selected = target.is_some_and(|item| scene.select(item.into()));

        if selected {
            debug!(item:? = target; "Selected");
        } else if cleared {
            debug!("Selection cleared");
        }

        if cleared || selected {
            Changes::selection()
        } else {
            Changes::none()
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
        expansion,
        interaction::Target,
        scene::{NodeId, Scene, Selectable},
    };

    fn scene() -> (Scene, Vec<NodeId>) {
        let report = Rc::new(Report::new(
            "VB001",
            "Liabilities",
            vec![
                Position::simple("VB010", "Banks", ""),
                Position::simple("VB020", "Suppliers", ""),
            ],
        ));
        let mut scene = Scene::new();
        expansion::build_report(&mut scene, &LayoutConfig::default(), report);
        let nodes = scene.nodes().map(|n| n.id()).collect();
        (scene, nodes)
    }

    fn click(target: Option<Target>) -> PointerEvent {
        PointerEvent::Click {
            target,
            point: Point::default(),
        }
    }

    #[test]
    fn test_click_replaces_selection() {
        let (mut scene, nodes) = scene();
        let layout = LayoutConfig::default();
        let mut behavior = SingleSelectionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);

        let changes = behavior.handle(&mut ctx, &click(Some(Target::Node(nodes[1]))));
        assert!(changes.selection);
        behavior.handle(&mut ctx, &click(Some(Target::Node(nodes[2]))));
        assert_eq!(ctx.scene().selected(), &[Selectable::Node(nodes[2])]);

        behavior.handle(&mut ctx, &click(None));
        assert!(ctx.scene().selected().is_empty());
    }

    #[test]
    fn test_canvas_click_without_selection_changes_nothing() {
        let (mut scene, _) = scene();
        let layout = LayoutConfig::default();
        let mut behavior = SingleSelectionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);

        assert!(behavior.handle(&mut ctx, &click(None)).is_empty());
    }

    #[test]
    fn test_other_events_ignored() {
        let (mut scene, nodes) = scene();
        let layout = LayoutConfig::default();
        let mut behavior = SingleSelectionBehavior::new();
        let mut ctx = Context::new(&mut scene, &layout);

        let down = PointerEvent::Down {
            target: Some(Target::Node(nodes[1])),
            point: Point::default(),
        };
        assert!(behavior.handle(&mut ctx, &down).is_empty());
        assert!(ctx.scene().selected().is_empty());
    }
}
