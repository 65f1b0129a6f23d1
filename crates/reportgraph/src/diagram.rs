//! The diagram controller.
//!
//! [`Diagram`] owns the single [`Scene`] of a view together with the behaviors
//! reacting to pointer input and the observers rendering the scene. It is the
//! only writer of the scene: every mutation goes through [`Diagram::dispatch`],
//! [`Diagram::select_report`] or [`Diagram::clear`], and observers are told
//! about it once the mutation has fully completed.
//!
//! Behaviors are registered when the diagram is created and observers are
//! stored inside it, so neither outlives the scene they are attached to.

use std::{fmt, rc::Rc};

use log::{debug, info};

use reportgraph_core::position::Report;

use crate::{
    config::{AppConfig, LayoutConfig},
    expansion::{self, Transition},
    interaction::{
        Behavior, Changes, Context, ExpansionBehavior, HeaderDragBehavior, PointerEvent,
        SingleSelectionBehavior,
    },
    routing::{self, LinkPath},
    scene::{LinkId, Scene},
};

/// Receives the scene after every change.
pub trait SceneObserver {
    /// Called once per mutating event, after all behaviors completed.
    fn scene_changed(&mut self, scene: &Scene, changes: Changes);
}

impl<F> SceneObserver for F
where
    F: FnMut(&Scene, Changes),
{
    fn scene_changed(&mut self, scene: &Scene, changes: Changes) {
        self(scene, changes)
    }
}

/// Handle returned by [`Diagram::subscribe`], consumed by [`Diagram::unsubscribe`].
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(usize);

/// An interactive report diagram.
pub struct Diagram {
    scene: Scene,
    layout: LayoutConfig,
    behaviors: Vec<Box<dyn Behavior>>,
    observers: Vec<(usize, Box<dyn SceneObserver>)>,
    next_subscription: usize,
}

impl Diagram {
    /// Creates an empty diagram with the selection, header drag and
    /// expansion behaviors registered, in that order.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            scene: Scene::new(),
            layout: config.layout().clone(),
            behaviors: vec![
                Box::new(SingleSelectionBehavior::new()),
                Box::new(HeaderDragBehavior::new()),
                Box::new(ExpansionBehavior::new()),
            ],
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Replaces the diagram content with `report`, laid out from the
    /// configured origin.
    pub fn select_report(&mut self, report: Rc<Report>) -> Transition {
        info!(report:% = report.id(), positions = report.positions().len(); "Selecting report");

        let had_selection = !self.scene.selected().is_empty();
        self.scene.clear();
        let transition = expansion::build_report(&mut self.scene, &self.layout, report);

        let mut changes = Changes::structure();
        changes.selection = had_selection;
        self.notify(changes);
        transition
    }

    /// Removes every group, node and link.
    pub fn clear(&mut self) {
        if self.scene.is_empty() {
            return;
        }
        info!(groups = self.scene.group_count(); "Clearing diagram");

        let had_selection = !self.scene.selected().is_empty();
        self.scene.clear();
        let mut changes = Changes::structure();
        changes.selection = had_selection;
        self.notify(changes);
    }

    /// Runs `event` through every behavior and notifies observers once if
    /// anything changed.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Changes {
        let mut changes = Changes::none();
        {
            let mut ctx = Context::new(&mut self.scene, &self.layout);
            for behavior in &mut self.behaviors {
                changes |= behavior.handle(&mut ctx, event);
            }
        }

        if changes.is_empty() {
            debug!(event:? = event; "Event changed nothing");
        } else {
            self.notify(changes);
        }
        changes
    }

    /// Routes a link against the current node positions.
    pub fn route(&self, link: LinkId) -> Option<LinkPath> {
        routing::route(&self.scene, link, &self.layout)
    }

    /// Registers an observer, called after every change until unsubscribed
    /// or until the diagram is dropped.
    pub fn subscribe(&mut self, observer: impl SceneObserver + 'static) -> Subscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        debug!(subscription = id; "Observer subscribed");
        Subscription(id)
    }

    /// Removes an observer. Returns `false` when it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription.0);
        debug!(subscription = subscription.0; "Observer unsubscribed");
        before != self.observers.len()
    }

    fn notify(&mut self, changes: Changes) {
        for (_, observer) in &mut self.observers {
            observer.scene_changed(&self.scene, changes);
        }
    }
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("scene", &self.scene)
            .field("layout", &self.layout)
            .field("behaviors", &self.behaviors)
            .field("observers", &self.observers.len())
            .finish()
    }
}
