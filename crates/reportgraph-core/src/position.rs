//! The position tree: reports and their nested line items.
//!
//! A [`Report`] owns an ordered list of [`Position`]s. A position is either a
//! terminal value ([`Position::Simple`]) or a container of further positions
//! ([`Position::Extended`]). Trees are shared through [`Rc`] and never copied:
//! the scene model keeps references into the same tree the catalog owns.
//!
//! Everything in this module is immutable once constructed.

use std::{collections::HashSet, rc::Rc};

use crate::identifier::Id;

/// Descriptive fields shared by both position variants.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionInfo {
    id: Id,
    name: String,
    info: String,
}

impl PositionInfo {
    pub fn new(id: Id, name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            info: info.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form further information shown when a column is expanded inline.
    pub fn info(&self) -> &str {
        &self.info
    }
}

/// One line item of a report.
#[derive(Debug, Clone, PartialEq)]
pub enum Position {
    /// A terminal value.
    Simple(PositionInfo),
    /// A container whose children can be materialized as their own group.
    Extended {
        info: PositionInfo,
        children: Vec<Rc<Position>>,
    },
}

impl Position {
    /// Creates a terminal position.
    pub fn simple(id: &str, name: impl Into<String>, info: impl Into<String>) -> Rc<Self> {
        Rc::new(Self::Simple(PositionInfo::new(Id::new(id), name, info)))
    }

    /// Creates a container position owning `children` in order.
    pub fn extended(
        id: &str,
        name: impl Into<String>,
        info: impl Into<String>,
        children: Vec<Rc<Position>>,
    ) -> Rc<Self> {
        Rc::new(Self::Extended {
            info: PositionInfo::new(Id::new(id), name, info),
            children,
        })
    }

    pub fn info(&self) -> &PositionInfo {
        match self {
            Self::Simple(info) | Self::Extended { info, .. } => info,
        }
    }

    pub fn id(&self) -> Id {
        self.info().id()
    }

    pub fn name(&self) -> &str {
        self.info().name()
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended { .. })
    }

    /// Ordered children of an extended position; empty for simple ones.
    pub fn children(&self) -> &[Rc<Position>] {
        match self {
            Self::Simple(_) => &[],
            Self::Extended { children, .. } => children,
        }
    }
}

/// The root of a diagram: an ordered list of positions with a title.
///
/// Reports are also synthesized for an extended position whose children get a
/// group of their own, see [`Report::for_extended`].
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    id: Id,
    name: String,
    positions: Vec<Rc<Position>>,
}

impl Report {
    pub fn new(id: &str, name: impl Into<String>, positions: Vec<Rc<Position>>) -> Self {
        Self::with_id(Id::new(id), name, positions)
    }

    pub fn with_id(id: Id, name: impl Into<String>, positions: Vec<Rc<Position>>) -> Self {
        Self {
            id,
            name: name.into(),
            positions,
        }
    }

    /// Synthesizes the title report of a materialized extended position.
    ///
    /// The report takes over the position's id and name and shares its
    /// children.
    pub fn for_extended(position: &Position) -> Self {
        Self {
            id: position.id(),
            name: position.name().to_owned(),
            positions: position.children().to_vec(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Rc<Position>] {
        &self.positions
    }

    /// Position ids that occur more than once anywhere in this report's tree.
    ///
    /// Returned in first-duplicate order. The walk uses an explicit stack so
    /// deeply nested reports cannot exhaust the call stack.
    pub fn duplicate_position_ids(&self) -> Vec<Id> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        let mut stack: Vec<&Rc<Position>> = self.positions.iter().rev().collect();
        while let Some(position) = stack.pop() {
            let id = position.id();
            if !seen.insert(id) && reported.insert(id) {
                duplicates.push(id);
            }
            stack.extend(position.children().iter().rev());
        }

        duplicates
    }
}
