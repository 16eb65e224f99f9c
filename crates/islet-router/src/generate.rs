// File: src/generate.rs
// Purpose: One full generation run per convention: scan, check, emit

use crate::collision::{detect, Collision};
use crate::config::{ApiRouterConfig, PageRouterConfig};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::route::resolve::{ApiConvention, Convention, PageConvention};
use crate::scan::scan;
use crate::table::RouteTable;
use std::path::Path;
use tracing::{info, warn};

/// Everything a generation run produced
#[derive(Debug, Clone)]
pub struct Generation {
    pub table: RouteTable,
    pub collisions: Vec<Collision>,
    pub diagnostics: Diagnostics,
}

impl Generation {
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Builds the page route table
///
/// Only configuration problems (bad regex, bad glob) are errors; everything
/// found while scanning ends up in [`Generation::diagnostics`].
pub fn generate_pages(config: &PageRouterConfig) -> Result<Generation> {
    let convention = PageConvention::new(config)?;
    Ok(run(&convention, &config.root_dir))
}

/// Builds the API route table; every path carries the `/api` prefix
pub fn generate_api(config: &ApiRouterConfig) -> Result<Generation> {
    let convention = ApiConvention::new(config)?;
    Ok(run(&convention, &config.root_dir))
}

fn run<C: Convention>(convention: &C, root_dir: &str) -> Generation {
    info!("Generating {} routes from {}", convention.label(), root_dir);

    let outcome = scan(convention);
    let mut diagnostics = outcome.diagnostics;

    let collisions = detect(&outcome.records);
    for collision in &collisions {
        diagnostics.push(collision.to_diagnostic());
    }
    if !collisions.is_empty() {
        warn!(
            "{} path(s) claimed by more than one file; the last one scanned wins",
            collisions.len()
        );
    }

    let table = RouteTable::emit(outcome.records, root_dir);
    info!(
        "Generated {} {} route(s) ({} warning(s))",
        table.len(),
        convention.label(),
        diagnostics.warning_count()
    );

    Generation {
        table,
        collisions,
        diagnostics,
    }
}

/// Writes a table artifact; failure aborts the run
pub fn write_table(table: &RouteTable, path: impl AsRef<Path>) -> Result<()> {
    table.write(path)
}
