// File: src/handle.rs
// Purpose: Shared route table snapshot and lazily loaded component modules

use crate::route::RouteRecord;
use crate::table::RouteTable;
use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Cheap-to-clone handle on the current route table
///
/// Readers take a snapshot with [`load`](Self::load) and keep using it even
/// if a new table is swapped in meanwhile. A table is never mutated in
/// place; regeneration produces a new one.
///
/// # Examples
///
/// ```
/// use islet_router::{RouteTable, RouteTableHandle};
///
/// let handle = RouteTableHandle::new(RouteTable::emit(Vec::new(), "src/app"));
/// let before = handle.load();
/// handle.swap(RouteTable::emit(Vec::new(), "web/app"));
/// assert_eq!(before.config.root_dir, "src/app");
/// assert_eq!(handle.load().config.root_dir, "web/app");
/// ```
#[derive(Debug, Clone)]
pub struct RouteTableHandle {
    current: Arc<ArcSwap<RouteTable>>,
}

impl RouteTableHandle {
    pub fn new(table: RouteTable) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Current snapshot
    pub fn load(&self) -> Arc<RouteTable> {
        self.current.load_full()
    }

    /// Replaces the whole table, returning the previous snapshot
    pub fn swap(&self, table: RouteTable) -> Arc<RouteTable> {
        let previous = self.current.swap(Arc::new(table));
        debug!(
            "Route table replaced: {} -> {} route(s)",
            previous.len(),
            self.current.load().len()
        );
        previous
    }
}

/// Loads a component module given its import path
///
/// The route compiler only stores path strings; turning them into runnable
/// modules belongs to whatever hosts the dispatcher.
pub trait ModuleLoader {
    type Module: Clone;
    type Error;

    fn load(&self, import_path: &str) -> Result<Self::Module, Self::Error>;
}

impl<F, M, E> ModuleLoader for F
where
    F: Fn(&str) -> Result<M, E>,
    M: Clone,
{
    type Module = M;
    type Error = E;

    fn load(&self, import_path: &str) -> Result<M, E> {
        self(import_path)
    }
}

/// Import path → loaded module, resolved on first use and cached
///
/// Layouts shared by many routes are loaded once.
pub struct ComponentRegistry<L: ModuleLoader> {
    loader: L,
    modules: DashMap<String, L::Module>,
}

impl<L: ModuleLoader> ComponentRegistry<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            modules: DashMap::new(),
        }
    }

    /// Module for one import path
    pub fn component(&self, import_path: &str) -> Result<L::Module, L::Error> {
        if let Some(module) = self.modules.get(import_path) {
            return Ok(module.value().clone());
        }

        let module = self.loader.load(import_path)?;
        self.modules
            .insert(import_path.to_string(), module.clone());
        Ok(module)
    }

    /// Page component or API handler module of a route
    pub fn route_module(&self, record: &RouteRecord) -> Result<L::Module, L::Error> {
        self.component(record.module_path())
    }

    /// Layout modules of a page route, outermost first; empty for API routes
    pub fn layouts(&self, record: &RouteRecord) -> Result<Vec<L::Module>, L::Error> {
        record
            .page()
            .map(|page| page.layout_components.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|layout| self.component(layout))
            .collect()
    }

    pub fn is_loaded(&self, import_path: &str) -> bool {
        self.modules.contains_key(import_path)
    }

    pub fn loaded_count(&self) -> usize {
        self.modules.len()
    }

    /// Drops cached modules, e.g. after the table was swapped
    pub fn clear(&self) {
        self.modules.clear();
    }
}
