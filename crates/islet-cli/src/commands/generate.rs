use anyhow::{bail, Context, Result};
use colored::Colorize;
use islet_router::{generate_api, generate_pages, scan_islands, write_table, Config, Generation};
use tracing::debug;

use super::print_diagnostics;
use crate::Target;

pub fn execute(config: &Config, target: Target, dry_run: bool, deny_collisions: bool) -> Result<()> {
    println!("{}", "Generating routes...".green().bold());
    println!();

    let mut collisions = 0;

    if matches!(target, Target::Pages | Target::All) {
        let generation = generate_pages(&config.routes).context("Page route generation failed")?;
        report("Pages", &generation);
        collisions += generation.collisions.len();
        if !dry_run {
            write_table(&generation.table, &config.routes.output)
                .with_context(|| format!("Failed to write {}", config.routes.output))?;
            println!("  {} {}", "✓".green(), config.routes.output);
        }
        println!();
    }

    if matches!(target, Target::Api | Target::All) {
        let generation = generate_api(&config.api).context("API route generation failed")?;
        report("API", &generation);
        collisions += generation.collisions.len();
        if !dry_run {
            write_table(&generation.table, &config.api.output)
                .with_context(|| format!("Failed to write {}", config.api.output))?;
            println!("  {} {}", "✓".green(), config.api.output);
        }
        println!();
    }

    if matches!(target, Target::Islands | Target::All) {
        let scan = scan_islands(&config.islands);
        println!("Islands: {}", scan.registry.len().to_string().cyan());
        print_diagnostics(&scan.diagnostics);
        if !dry_run {
            scan.registry
                .write(&config.islands.output)
                .with_context(|| format!("Failed to write {}", config.islands.output))?;
            println!("  {} {}", "✓".green(), config.islands.output);
        }
        println!();
    }

    if dry_run {
        debug!("Dry run requested; skipped artifact writes");
        println!("{}", "Dry run: nothing written".yellow());
    }

    debug!("{} collision(s) across all targets", collisions);
    if deny_collisions && collisions > 0 {
        bail!("{} route collision(s) found", collisions);
    }

    println!("{}", "Generation complete!".green().bold());
    Ok(())
}

fn report(label: &str, generation: &Generation) {
    println!(
        "{}: {} route(s), {} collision(s), {} warning(s)",
        label,
        generation.table.len().to_string().cyan(),
        generation.collisions.len(),
        generation.diagnostics.warning_count()
    );
    print_diagnostics(&generation.diagnostics);
}
