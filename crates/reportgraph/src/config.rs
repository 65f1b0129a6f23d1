//! Configuration types for reportgraph diagrams.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! external sources; every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - The fixed constants used by the layout engine.
//!
//! # Example
//!
//! ```
//! # use reportgraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().spacing(), 50.0);
//! ```

use serde::Deserialize;

use reportgraph_core::geometry::{Insets, Point, Size};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Constants driving column stacking and sibling group placement.
///
/// See [`crate::layout`] for how each value is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical step between the header and consecutive columns.
    spacing: f32,
    /// Additional vertical room below an inline-expanded column.
    expanded_extra: f32,
    /// Horizontal distance from a parent header to its descendant groups.
    level_width: f32,
    /// Vertical step between sibling descendant groups.
    node_height: f32,
    /// Size of column and placeholder nodes.
    column_size: Size,
    /// Size of header nodes.
    header_size: Size,
    /// Padding between a group's nodes and its outline.
    group_padding: f32,
    /// Anchor of the group built for a newly selected report.
    origin: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 50.0,
            expanded_extra: 100.0,
            level_width: 320.0,
            node_height: 160.0,
            column_size: Size::new(200.0, 40.0),
            header_size: Size::new(200.0, 40.0),
            group_padding: 30.0,
            origin: Point::new(200.0, 200.0),
        }
    }
}

impl LayoutConfig {
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_expanded_extra(mut self, expanded_extra: f32) -> Self {
        self.expanded_extra = expanded_extra;
        self
    }

    pub fn with_level_width(mut self, level_width: f32) -> Self {
        self.level_width = level_width;
        self
    }

    pub fn with_node_height(mut self, node_height: f32) -> Self {
        self.node_height = node_height;
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn expanded_extra(&self) -> f32 {
        self.expanded_extra
    }

    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn column_size(&self) -> Size {
        self.column_size
    }

    pub fn header_size(&self) -> Size {
        self.header_size
    }

    /// Returns the group padding as uniform [`Insets`].
    pub fn group_padding(&self) -> Insets {
        Insets::uniform(self.group_padding)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_constants() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.spacing(), 50.0);
        assert_eq!(layout.expanded_extra(), 100.0);
        assert_eq!(layout.origin(), Point::new(200.0, 200.0));
        assert_eq!(layout.group_padding(), Insets::uniform(30.0));
    }

    #[test]
    fn test_builder_overrides() {
        let layout = LayoutConfig::default()
            .with_spacing(20.0)
            .with_expanded_extra(40.0)
            .with_level_width(100.0)
            .with_node_height(80.0)
            .with_origin(Point::new(0.0, 0.0));

        assert_eq!(layout.spacing(), 20.0);
        assert_eq!(layout.expanded_extra(), 40.0);
        assert_eq!(layout.level_width(), 100.0);
        assert_eq!(layout.node_height(), 80.0);
        assert!(layout.origin().is_zero());
    }
}
