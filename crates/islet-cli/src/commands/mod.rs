pub mod generate;
pub mod match_url;
pub mod routes;

use colored::Colorize;
use islet_router::{Diagnostics, RouteRecord};

/// One summary line per diagnostic, warnings in yellow
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        if diagnostic.is_warning() {
            println!("  {} {}", "⚠".yellow(), diagnostic);
        } else {
            println!("  {} {}", "·".dimmed(), diagnostic);
        }
    }
}

/// `/users/:id   page   [id]   src/app/users/[id]/page.tsx`
pub fn print_route(record: &RouteRecord) {
    let params = if record.params.is_empty() {
        String::new()
    } else {
        format!("[{}]", record.params.join(", "))
    };
    let extra = match record.api() {
        Some(api) => api
            .supported_methods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(","),
        None => String::new(),
    };
    println!(
        "  {:<32} {:<5} {:<16} {:<24} {}",
        record.path.cyan(),
        record.kind_name(),
        params,
        extra,
        record.file_path.dimmed()
    );
}
