//! Name to live node side table.
//!
//! Nodes register themselves on mount and unregister on unmount. The table
//! only stores handles; the scene owns the nodes.

use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub usize);

#[derive(Clone, Debug, Default)]
pub struct RenderedObjectRegistry {
    entries: FnvHashMap<String, NodeHandle>,
}

impl RenderedObjectRegistry {
    pub fn register(&mut self, name: &str, handle: NodeHandle) {
        self.entries.insert(name.to_string(), handle);
    }

    /// Remove `name`. With `Some(handle)`, the entry is only removed while it
    /// still points at that handle.
    pub fn unregister(&mut self, name: &str, handle: Option<NodeHandle>) -> bool {
        match (self.entries.get(name), handle) {
            (Some(current), Some(h)) if *current != h => false,
            (Some(_), _) => {
                self.entries.remove(name);
                true
            }
            (None, _) => false,
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<NodeHandle> {
        self.entries.get(name).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
