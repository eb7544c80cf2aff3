use super::error::TableError;
use super::source::TableSource;
use super::{Tables, Variant};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};
use tracing::info;

static GLOBAL: LazyLock<TableRegistry> = LazyLock::new(TableRegistry::bundled);

/// Loads each parameter variant at most once and shares it read-only afterwards.
///
/// The first request for a variant loads it while holding the registry lock, so two
/// threads asking for the same variant concurrently never both construct it. Later
/// requests clone the shared [`Arc`].
#[derive(Debug)]
pub struct TableRegistry {
    source: TableSource,
    loaded: Mutex<HashMap<Variant, Arc<Tables>>>,
}

impl TableRegistry {
    pub fn new(source: TableSource) -> Self {
        Self {
            source,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn bundled() -> Self {
        Self::new(TableSource::Bundled)
    }

    /// Process-wide registry backed by the bundled parameter files.
    pub fn global() -> &'static TableRegistry {
        &GLOBAL
    }

    /// Resolves a variant by name, e.g. `"MMFF94"`, `"MMFF94s"` or `"MMFF94s+"`.
    pub fn get(&self, name: &str) -> Result<Arc<Tables>, TableError> {
        self.get_variant(name.parse()?)
    }

    pub fn get_variant(&self, variant: Variant) -> Result<Arc<Tables>, TableError> {
        // A panic while loading leaves no half-built entry behind, so a poisoned
        // lock still guards a consistent map.
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(tables) = loaded.get(&variant) {
            return Ok(Arc::clone(tables));
        }
        let tables = Arc::new(Tables::load(&self.source, variant)?);
        info!(variant = variant.name(), "Registered parameter tables");
        loaded.insert(variant, Arc::clone(&tables));
        Ok(tables)
    }

    pub fn is_loaded(&self, variant: Variant) -> bool {
        self.loaded
            .lock()
            .map(|loaded| loaded.contains_key(&variant))
            .unwrap_or(false)
    }
}
