//! Reportgraph - Interactive visualization of hierarchical financial reports.
//!
//! A report is an ordered tree of positions. Reportgraph lays a selected
//! report out as a group of nodes, lets users expand nested positions into
//! descendant groups connected by links, and keeps the layout consistent
//! while groups are expanded, collapsed and dragged around.
//!
//! # Pipeline
//!
//! ```text
//! Catalog (reportgraph_core)
//!     ↓ Diagram::select_report
//! Scene (groups, nodes, links)
//!     ↑↓ PointerEvent → Behavior → expansion / layout
//! SceneObserver (rendering host)
//! ```
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use reportgraph::{Diagram, config::AppConfig, position::{Position, Report}};
//!
//! let report = Rc::new(Report::new(
//!     "GUV001",
//!     "Income statement",
//!     vec![Position::simple("UE001", "Revenue", "Net sales")],
//! ));
//!
//! let mut diagram = Diagram::new(&AppConfig::default());
//! diagram.select_report(report);
//! assert_eq!(diagram.scene().group_count(), 1);
//! ```

pub mod config;
pub mod diagram;
pub mod expansion;
pub mod interaction;
pub mod layout;
pub mod routing;
pub mod scene;

mod error;

pub use reportgraph_core::{catalog, geometry, identifier, position};

pub use diagram::{Diagram, SceneObserver, Subscription};
pub use error::ReportGraphError;
