//! # Islet Router
//!
//! Compiles a file-system tree of route modules into static route tables
//! for an islands-architecture web app:
//! - Pages: `app/users/[id]/page.tsx` → `/users/:id`, with the layout chain,
//!   sibling loading/error boundaries and exported `metadata`
//! - API handlers: `app/api/posts/route.ts` → `/api/posts`, with the HTTP
//!   verbs it exports
//! - Islands: `islands/DarkModeToggle.tsx` → `dark-mode-toggle`
//!
//! ## Directory Grammar
//!
//! | Directory      | URL segment | Matches                       |
//! |----------------|-------------|-------------------------------|
//! | `about`        | `about`     | exactly `about`               |
//! | `[id]`         | `:id`       | one segment                   |
//! | `[...slug]`    | `*`         | one or more trailing segments |
//! | `[[...slug]]`  | `*`         | zero or more trailing segments|
//!
//! ## Pipeline
//!
//! Segment parser → exclusion filter → tree scanner → route resolver →
//! collision detector → route table emitter. Only configuration and
//! artifact writing can fail; everything else is reported as a
//! [`Diagnostic`] and logged through `tracing`.
//!
//! ## Example
//!
//! ```no_run
//! use islet_router::{generate_pages, Config};
//!
//! let config = Config::load_default()?;
//! let generation = generate_pages(&config.routes)?;
//! generation.table.write(&config.routes.output)?;
//!
//! if let Some(found) = generation.table.find("/users/42") {
//!     println!("{} -> {:?}", found.record.path, found.params);
//! }
//! # Ok::<(), islet_router::RouterError>(())
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod exclude;
pub mod generate;
pub mod handle;
pub mod islands;
pub mod matcher;
pub mod path;
pub mod route;
pub mod scan;
pub mod table;

pub use collision::Collision;
pub use config::{ApiRouterConfig, Config, IslandsConfig, LogLevel, PageRouterConfig};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{Result, RouterError};
pub use exclude::ExclusionFilter;
pub use generate::{generate_api, generate_pages, write_table, Generation};
pub use handle::{ComponentRegistry, ModuleLoader, RouteTableHandle};
pub use islands::{scan_islands, Island, IslandRegistry};
pub use matcher::{RouteMatch, RouteMatcher};
pub use route::{
    parse_segment, ApiRoute, HttpMethod, PageRoute, RouteKind, RouteRecord, SegmentKind,
    SegmentParser, SegmentToken,
};
pub use table::{RouteNode, RouteTable, TableMeta};
