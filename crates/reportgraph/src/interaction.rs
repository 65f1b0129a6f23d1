//! Pointer interaction for reportgraph diagrams.
//!
//! This module provides the [`Behavior`] trait that turns pointer events into
//! scene mutations, plus the three behaviors every diagram carries.
//!
//! # Event Flow
//!
//! ```text
//! Host input
//!     ↓ PointerEvent (tagged with the Target under the pointer)
//! Diagram::dispatch
//!     ↓ Behavior::handle, in registration order
//! Scene mutations
//!     ↓ Changes (merged)
//! SceneObserver::scene_changed, once
//! ```
//!
//! # Available Behaviors
//!
//! - [`SingleSelectionBehavior`] - Keeps at most one item selected.
//! - [`HeaderDragBehavior`] - Moves a group while its header is dragged.
//! - [`ExpansionBehavior`] - Maps clicks to the expansion state machine.
//!
//! Every behavior runs to completion inside [`Behavior::handle`]; none of them
//! keeps references into the scene between events.

mod activation;
mod drag;
mod event;
mod selection;

pub use activation::ExpansionBehavior;
pub use drag::HeaderDragBehavior;
pub use event::{Changes, Context, PointerEvent, Target};
pub use selection::SingleSelectionBehavior;

/// A handler reacting to pointer events.
pub trait Behavior: std::fmt::Debug {
    /// Reacts to `event`, mutating the scene reachable through `ctx`.
    ///
    /// Returns what the event changed. Events the behavior does not care
    /// about return [`Changes::none`].
    fn handle(&mut self, ctx: &mut Context<'_>, event: &PointerEvent) -> Changes;
}
