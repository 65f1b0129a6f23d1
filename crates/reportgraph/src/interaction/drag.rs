use log::debug;

use reportgraph_core::geometry::Point;

use super::{Behavior, Changes, Context, PointerEvent};
use crate::{layout, scene::GroupId};

#[derive(Debug, Clone, Copy)]
struct Capture {
    group: GroupId,
    last: Point,
}

/// Moves a whole group while its header is dragged.
///
/// A drag starts with `Down` over a header node. Each following `Move`
/// translates the owning group's anchor by the pointer delta since the
/// previous sample, and `Up` ends the drag. Dragging any other node, or the
/// canvas, moves nothing.
#[derive(Debug, Default)]
pub struct HeaderDragBehavior {
    capture: Option<Capture>,
}

impl HeaderDragBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// The group being dragged, if any.
    pub fn dragged_group(&self) -> Option<GroupId> {
        self.capture.map(|capture| capture.group)
    }
}

impl Behavior for HeaderDragBehavior {
    fn handle(&mut self, ctx: &mut Context<'_>, event: &PointerEvent) -> Changes {
        match event {
            PointerEvent::Down { .. } => {
                let scene = ctx.scene();
                self.capture = event
                    .target_node()
                    .filter(|id| scene.node(*id).is_some_and(|node| node.is_header()))
                    .and_then(|id| scene.find_group_containing(id))
                    .map(|group| Capture {
                        group,
                        last: event.point(),
                    });
                if let Some(capture) = self.capture {
                    debug!(group:% = capture.group; "Header drag started");
                }
                Changes::none()
            }
            PointerEvent::Move { point, .. } => {
                let Some(capture) = self.capture.as_mut() else {
                    return Changes::none();
                };
                let delta = point.sub_point(capture.last);
                capture.last = *point;
                if delta.is_zero() {
                    return Changes::none();
                }

                let group = capture.group;
                let (scene, layout) = ctx.parts();
                if layout::translate_group(scene, group, delta, layout) {
                    Changes::geometry()
                } else {
                    // The group went away mid-drag.
                    self.capture = None;
                    Changes::none()
                }
            }
            PointerEvent::Up { .. } => {
                if let Some(capture) = self.capture.take() {
                    debug!(group:% = capture.group; "Header drag ended");
                }
                Changes::none()
            }
            PointerEvent::Click { .. } | PointerEvent::DoubleClick { .. } => Changes::none(),
        }
    }
}
