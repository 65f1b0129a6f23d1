//! Reportgraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the reportgraph
//! crates:
//!
//! - **Identifiers**: String-interned report and position ids ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Positions**: The immutable report/position tree ([`position`] module)
//! - **Catalog**: The report catalog supplied by a data source ([`catalog`] module)

pub mod catalog;
pub mod geometry;
pub mod identifier;
pub mod position;
