//! Reportgraph CLI library
//!
//! This module contains the core CLI logic: it loads a report catalog, lays
//! out one report, replays scripted interactions and prints the resulting
//! diagram as a plain-text outline.

pub mod error_adapter;
pub mod outline;
pub mod script;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::info;

use reportgraph::{
    Diagram, ReportGraphError,
    catalog::{Catalog, CatalogSpec},
};

/// Run the reportgraph CLI application
///
/// This function loads the catalog, selects the requested report, replays
/// every action in order and writes the outline to the output file or stdout.
///
/// # Errors
///
/// Returns `ReportGraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Catalog syntax errors
/// - Invalid catalogs and unknown report ids
/// - Actions naming elements that are not in the diagram
pub fn run(args: &Args) -> Result<(), ReportGraphError> {
    info!(
        input_path = args.input,
        report = args.report,
        actions = args.actions.len();
        "Processing catalog"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let catalog = load_catalog(&args.input)?;
    let report = catalog.report(&args.report)?;

    let mut diagram = Diagram::new(&app_config);
    diagram.select_report(report);
    for action in &args.actions {
        action.replay(&mut diagram)?;
    }

    let outline = outline::render(&diagram);
    match &args.output {
        Some(path) => {
            fs::write(path, outline)?;
            info!(output_file = path; "Outline written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(outline.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Reads and validates a TOML report catalog.
///
/// # Errors
///
/// Returns `ReportGraphError::Parse` with the offending span for TOML errors
/// and `ReportGraphError::Catalog` for catalogs with empty or duplicate ids.
pub fn load_catalog(path: &str) -> Result<Catalog, ReportGraphError> {
    let source = fs::read_to_string(path)?;
    let spec: CatalogSpec = toml::from_str(&source).map_err(|err| {
        ReportGraphError::new_parse_error(err.message(), err.span(), source.as_str())
    })?;

    Ok(Catalog::from_spec(spec)?)
}
