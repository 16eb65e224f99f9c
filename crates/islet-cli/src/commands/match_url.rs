use anyhow::{Context, Result};
use colored::Colorize;
use islet_router::{generate_api, generate_pages, Config};

use super::print_route;

pub fn execute(config: &Config, url: &str, api: bool) -> Result<()> {
    let generation = if api {
        generate_api(&config.api).context("API route generation failed")?
    } else {
        generate_pages(&config.routes).context("Page route generation failed")?
    };

    let Some(found) = generation.table.find(url) else {
        println!("{} No route matches {}", "✗".red(), url.cyan());
        return Ok(());
    };

    println!("{} {}", "✓".green(), url.cyan());
    print_route(found.record);

    if !found.params.is_empty() {
        println!();
        println!("Params:");
        for (name, value) in &found.params {
            println!("  {} = {}", name.cyan(), value);
        }
    }

    if let Some(page) = found.record.page() {
        if !page.layout_components.is_empty() {
            println!();
            println!("Layouts:");
            for layout in &page.layout_components {
                println!("  {}", layout);
            }
        }
        if let Some(metadata) = &page.metadata {
            println!();
            println!("Metadata:");
            println!("{}", serde_json::to_string_pretty(metadata)?);
        }
    }

    Ok(())
}
