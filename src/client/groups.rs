//! Client-wide group registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::entities::Group;
use crate::ids::ChannelId;

/// Group entities the client currently tracks, keyed by channel id.
///
/// Insertion and eviction run through
/// [`ClientContext`](crate::client::ClientContext); everyone else gets
/// lookups and snapshots.
#[derive(Default)]
pub struct GroupRegistry {
    inner: RwLock<HashMap<ChannelId, Arc<Group>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        GroupRegistry {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Get the tracked entity for `id`, or create and track it under the
    /// registry lock.
    pub(crate) fn get_or_insert_with<F>(&self, id: ChannelId, create: F) -> Arc<Group>
    where
        F: FnOnce() -> Arc<Group>,
    {
        let mut map = self.inner.write().unwrap();
        Arc::clone(map.entry(id).or_insert_with(create))
    }

    pub(crate) fn remove(&self, id: ChannelId) -> Option<Arc<Group>> {
        self.inner.write().unwrap().remove(&id)
    }

    /// Empty the registry, handing back everything it held.
    pub(crate) fn drain(&self) -> Vec<Arc<Group>> {
        let mut map = self.inner.write().unwrap();
        map.drain().map(|(_, group)| group).collect()
    }

    pub fn get(&self, id: ChannelId) -> Option<Arc<Group>> {
        self.inner.read().unwrap().get(&id).cloned()
    }

    pub fn contains(&self, id: ChannelId) -> bool {
        self.inner.read().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }

    /// Point-in-time copy of every tracked group. Order is unspecified.
    pub fn snapshot(&self) -> Vec<Arc<Group>> {
        self.inner.read().unwrap().values().cloned().collect()
    }
}

impl fmt::Debug for GroupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupRegistry(len={})", self.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ContextHandle;

    fn group(id: u64) -> Arc<Group> {
        Arc::new(Group::new(ChannelId::new(id), ContextHandle::detached()))
    }

    #[test]
    fn test_get_or_insert_creates_once() {
        let registry = GroupRegistry::new();
        let first = registry.get_or_insert_with(ChannelId::new(1), || group(1));
        let second = registry.get_or_insert_with(ChannelId::new(1), || group(1));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ChannelId::new(1)));
    }

    #[test]
    fn test_remove() {
        let registry = GroupRegistry::new();
        registry.get_or_insert_with(ChannelId::new(1), || group(1));

        assert!(registry.remove(ChannelId::new(1)).is_some());
        assert!(registry.remove(ChannelId::new(1)).is_none());
        assert!(registry.get(ChannelId::new(1)).is_none());
    }

    #[test]
    fn test_drain_empties_the_registry() {
        let registry = GroupRegistry::new();
        registry.get_or_insert_with(ChannelId::new(1), || group(1));
        registry.get_or_insert_with(ChannelId::new(2), || group(2));

        let drained = registry.drain();
        assert_eq!(drained.len(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_is_decoupled() {
        let registry = GroupRegistry::new();
        registry.get_or_insert_with(ChannelId::new(1), || group(1));

        let snapshot = registry.snapshot();
        registry.get_or_insert_with(ChannelId::new(2), || group(2));

        assert_eq!(snapshot.len(), 1);
    }
}
