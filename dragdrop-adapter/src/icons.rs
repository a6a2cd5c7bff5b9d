use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;

/// A memoizing icon loader.
///
/// The loader closure fetches icon markup by id (file read, embedded
/// asset table, network). Each id is fetched at most once; failures are
/// cached too, so a missing icon does not re-hit the loader every frame.
#[derive(Clone)]
pub struct IconCache {
    loader: Arc<dyn Fn(&str) -> Option<String> + Send + Sync>,
    cache: BTreeMap<String, Option<String>>,
}

impl core::fmt::Debug for IconCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IconCache")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl IconCache {
    pub fn new(loader: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            loader: Arc::new(loader),
            cache: BTreeMap::new(),
        }
    }

    /// The icon markup for `id`, loading it on first use.
    pub fn get(&mut self, id: &str) -> Option<&str> {
        if !self.cache.contains_key(id) {
            let loaded = (self.loader)(id);
            if loaded.is_none() {
                adwarn!(icon = id, "icon failed to load");
            }
            self.cache.insert(String::from(id), loaded);
        }
        self.cache.get(id).and_then(|v| v.as_deref())
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.cache.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
