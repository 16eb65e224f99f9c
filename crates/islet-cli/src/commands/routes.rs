use anyhow::{Context, Result};
use colored::Colorize;
use islet_router::{generate_api, generate_pages, Config, RouteTable};
use std::path::Path;

use super::print_route;
use crate::TableTarget;

/// Prints the written artifact, or a fresh in-memory table when none exists yet
pub fn execute(config: &Config, target: TableTarget) -> Result<()> {
    let output = match target {
        TableTarget::Pages => &config.routes.output,
        TableTarget::Api => &config.api.output,
    };

    let table = if Path::new(output).exists() {
        RouteTable::read(output).with_context(|| format!("Failed to read {}", output))?
    } else {
        println!("{} {} not found, scanning instead", "⚠".yellow(), output);
        let generation = match target {
            TableTarget::Pages => generate_pages(&config.routes)?,
            TableTarget::Api => generate_api(&config.api)?,
        };
        generation.table
    };

    println!(
        "{} ({} route(s), root {}, generated {})",
        "Routes".green().bold(),
        table.len(),
        table.config.root_dir.cyan(),
        table.config.generated_at.to_rfc3339()
    );
    println!();
    for record in &table.routes {
        print_route(record);
    }

    Ok(())
}
