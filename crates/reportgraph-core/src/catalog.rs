//! The report catalog supplied by the data source.
//!
//! [`CatalogSpec`] mirrors the external representation and is what serde
//! deserializes into. [`Catalog::from_spec`] validates it and converts it into
//! shared [`Report`] trees.
//!
//! A position spec carrying a `children` list (even an empty one) becomes a
//! [`Position::Extended`]; without it the position is [`Position::Simple`].

use std::{collections::HashSet, rc::Rc};

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    identifier::Id,
    position::{Position, PositionInfo, Report},
};

/// Errors raised while building or querying a [`Catalog`].
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("report or position with name `{name}` has an empty id")]
    EmptyId { name: String },

    #[error("report id `{0}` is used more than once")]
    DuplicateReport(String),

    #[error("unknown report `{0}`")]
    UnknownReport(String),
}

/// Serialized form of a whole catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSpec {
    #[serde(default)]
    pub reports: Vec<ReportSpec>,
}

/// Serialized form of one report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub positions: Vec<PositionSpec>,
}

/// Serialized form of one position.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub info: String,
    /// Present for extended positions.
    #[serde(default)]
    pub children: Option<Vec<PositionSpec>>,
}

impl PositionSpec {
    /// Builds the position tree with an explicit work-stack.
    fn into_position(self) -> Result<Rc<Position>, CatalogError> {
        let mut root = match Pending::open(self)? {
            Opened::Leaf(position) => return Ok(position),
            Opened::Extended(pending) => pending,
        };
        let mut stack: Vec<Pending> = Vec::new();

        loop {
            let top = stack.last_mut().unwrap_or(&mut root);
            if let Some(child) = top.children.next() {
                match Pending::open(child)? {
                    Opened::Leaf(position) => top.built.push(position),
                    Opened::Extended(pending) => stack.push(pending),
                }
            } else if let Some(done) = stack.pop() {
                let position = done.close();
                stack.last_mut().unwrap_or(&mut root).built.push(position);
            } else {
                return Ok(root.close());
            }
        }
    }
}

enum Opened {
    Leaf(Rc<Position>),
    Extended(Pending),
}

/// An extended position whose children are still being built.
struct Pending {
    info: PositionInfo,
    children: std::vec::IntoIter<PositionSpec>,
    built: Vec<Rc<Position>>,
}

impl Pending {
    fn open(spec: PositionSpec) -> Result<Opened, CatalogError> {
        let id = Id::new(&spec.id);
        if id.is_blank() {
            return Err(CatalogError::EmptyId { name: spec.name });
        }

        let info = PositionInfo::new(id, spec.name, spec.info);
        Ok(match spec.children {
            None => Opened::Leaf(Rc::new(Position::Simple(info))),
            Some(children) => Opened::Extended(Self {
                info,
                built: Vec::with_capacity(children.len()),
                children: children.into_iter(),
            }),
        })
    }

    fn close(self) -> Rc<Position> {
        Rc::new(Position::Extended {
            info: self.info,
            children: self.built,
        })
    }
}

/// An immutable, ordered collection of reports.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    reports: Vec<Rc<Report>>,
}

impl Catalog {
    /// Validates `spec` and builds the shared report trees.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyId`] for a blank report or position id
    /// and [`CatalogError::DuplicateReport`] when two reports share an id.
    /// Duplicate position ids inside a report are only logged; see
    /// [`Report::duplicate_position_ids`].
    pub fn from_spec(spec: CatalogSpec) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut reports = Vec::with_capacity(spec.reports.len());

        for report in spec.reports {
            let id = Id::new(&report.id);
            if id.is_blank() {
                return Err(CatalogError::EmptyId { name: report.name });
            }
            if !seen.insert(report.id.clone()) {
                return Err(CatalogError::DuplicateReport(report.id));
            }

            let positions = report
                .positions
                .into_iter()
                .map(PositionSpec::into_position)
                .collect::<Result<Vec<_>, _>>()?;
            let report = Report::with_id(id, report.name, positions);

            let duplicates = report.duplicate_position_ids();
            if !duplicates.is_empty() {
                warn!(
                    report = report.id().to_string(),
                    duplicates:? = duplicates;
                    "Report contains duplicate position ids"
                );
            }

            reports.push(Rc::new(report));
        }

        debug!(reports = reports.len(); "Catalog built");
        Ok(Self { reports })
    }

    /// Wraps already constructed reports, keeping their order.
    pub fn new(reports: Vec<Rc<Report>>) -> Self {
        Self { reports }
    }

    pub fn reports(&self) -> &[Rc<Report>] {
        &self.reports
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Looks up a report by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownReport`] when no report has that id.
    pub fn report(&self, id: &str) -> Result<Rc<Report>, CatalogError> {
        let id = Id::new(id);
        self.reports
            .iter()
            .find(|report| report.id() == id)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownReport(id.to_string()))
    }
}
