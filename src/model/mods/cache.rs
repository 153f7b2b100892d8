use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ModTable;

/// Process-wide lazily initialized [`ModTable`].
///
/// At most one fetch is in flight at any time: concurrent callers of
/// [`ModTableCache::get_or_fetch`] wait for the same initialization. A failed
/// fetch is not cached so the next caller retries.
///
/// ```
/// use inspector_pp::model::mods::{ModTable, ModTableCache};
///
/// static MOD_TABLE: ModTableCache = ModTableCache::new();
///
/// let table = MOD_TABLE
///     .get_or_fetch(|| ModTable::from_json("[]"))
///     .unwrap();
///
/// assert!(MOD_TABLE.get().is_some_and(|cached| std::sync::Arc::ptr_eq(&cached, &table)));
/// ```
#[derive(Debug, Default)]
pub struct ModTableCache {
    table: Mutex<Option<Arc<ModTable>>>,
}

impl ModTableCache {
    /// An empty cache.
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(None),
        }
    }

    /// The cached table, if it has been fetched already.
    pub fn get(&self) -> Option<Arc<ModTable>> {
        self.lock().clone()
    }

    /// Return the cached table or initialize it through `fetch`.
    ///
    /// The lock is held while fetching.
    pub fn get_or_fetch<F, E>(&self, fetch: F) -> Result<Arc<ModTable>, E>
    where
        F: FnOnce() -> Result<ModTable, E>,
    {
        let mut guard = self.lock();

        if let Some(ref table) = *guard {
            tracing::trace!("Using cached mod table");

            return Ok(Arc::clone(table));
        }

        tracing::debug!("Fetching mod table");
        let table = Arc::new(fetch()?);
        *guard = Some(Arc::clone(&table));

        Ok(table)
    }

    /// Replace the cached table.
    pub fn insert(&self, table: ModTable) -> Arc<ModTable> {
        let table = Arc::new(table);
        *self.lock() = Some(Arc::clone(&table));

        table
    }

    /// Drop the cached table so that the next access fetches again.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<ModTable>>> {
        // A panicking fetch never stores a table so the content stays valid
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
