//! Pass-through cache of loaded assets keyed by path.
//!
//! Entries are inserted once when a fetch completes and never evicted, so a
//! handle obtained from the cache stays valid for the life of the page.

use crate::registry::ModelRegistry;
use fnv::FnvHashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct ModelCache<A> {
    by_path: FnvHashMap<String, Rc<A>>,
}

impl<A> Default for ModelCache<A> {
    fn default() -> Self {
        Self {
            by_path: FnvHashMap::default(),
        }
    }
}

impl<A> ModelCache<A> {
    /// Store `asset` under `path`. An existing entry wins and is returned.
    pub fn insert(&mut self, path: &str, asset: A) -> Rc<A> {
        self.by_path
            .entry(path.to_string())
            .or_insert_with(|| Rc::new(asset))
            .clone()
    }

    pub fn get(&self, path: &str) -> Option<Rc<A>> {
        self.by_path.get(path).cloned()
    }

    pub fn get_by_name(&self, registry: &ModelRegistry, name: &str) -> Option<Rc<A>> {
        registry.get(name).and_then(|m| self.get(&m.path))
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
