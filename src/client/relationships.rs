//! Relationship cache and the lookup contract group queries run against.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::entities::{Friend, Relationship};
use crate::ids::UserId;

// ---------------------------------------------------------------------------
// Lookup contract
// ---------------------------------------------------------------------------

/// Read-side contract for resolving a user's relationship classification.
///
/// Group queries take this as an explicit capability, so they can run
/// against the live cache, a fixture, or nothing at all.
/// [`NoRelationships`] is the nothing-at-all implementation used once the
/// owning context is gone.
pub trait RelationshipLookup {
    /// The relationship for `user`, or `None` when none is known.
    fn relationship(&self, user: UserId) -> Option<Relationship>;

    /// True when `user` is classified as a friend.
    fn is_friend(&self, user: UserId) -> bool {
        self.relationship(user).is_some_and(|rel| rel.is_friend())
    }
}

// ---------------------------------------------------------------------------
// RelationshipCache
// ---------------------------------------------------------------------------

/// Every relationship known to the client, keyed by the far-side user id.
///
/// The sync layer overwrites entries as relationship events arrive; one
/// entry per user, whatever the classification.
#[derive(Default)]
pub struct RelationshipCache {
    inner: RwLock<HashMap<UserId, Relationship>>,
}

impl RelationshipCache {
    pub fn new() -> Self {
        RelationshipCache {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the relationship for its user. Returns the
    /// previous classification, if any.
    pub fn insert(&self, relationship: Relationship) -> Option<Relationship> {
        self.inner
            .write()
            .unwrap()
            .insert(relationship.user_id(), relationship)
    }

    pub fn remove(&self, user: UserId) -> Option<Relationship> {
        self.inner.write().unwrap().remove(&user)
    }

    pub fn get(&self, user: UserId) -> Option<Relationship> {
        self.inner.read().unwrap().get(&user).cloned()
    }

    /// The friend view for `user`, when classified as a friend.
    pub fn friend(&self, user: UserId) -> Option<Friend> {
        self.get(user).and_then(|rel| rel.as_friend().cloned())
    }

    /// Every friend relationship, as a point-in-time copy.
    pub fn friends(&self) -> Vec<Friend> {
        self.inner
            .read()
            .unwrap()
            .values()
            .filter_map(|rel| rel.as_friend().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().unwrap().clear();
    }
}

impl RelationshipLookup for RelationshipCache {
    fn relationship(&self, user: UserId) -> Option<Relationship> {
        self.get(user)
    }
}

impl fmt::Debug for RelationshipCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationshipCache(len={})", self.len())
    }
}

// ---------------------------------------------------------------------------
// NoRelationships
// ---------------------------------------------------------------------------

/// Lookup that resolves nothing. Stands in for the cache when the owning
/// context has been dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRelationships;

impl RelationshipLookup for NoRelationships {
    fn relationship(&self, _user: UserId) -> Option<Relationship> {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RelationshipKind, User, UserProfile};
    use std::sync::Arc;

    fn user(id: u64, name: &str) -> Arc<User> {
        Arc::new(User::new(
            UserId::new(id),
            UserProfile {
                username: name.to_string(),
                discriminator: 1,
                avatar_id: None,
            },
            false,
        ))
    }

    fn rel(kind: RelationshipKind, id: u64, name: &str) -> Relationship {
        Relationship::new(kind, user(id, name))
    }

    #[test]
    fn test_insert_keys_by_user_id() {
        let cache = RelationshipCache::new();
        assert!(cache.insert(rel(RelationshipKind::Friend, 1, "ada")).is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(UserId::new(1)).unwrap().user_id(), UserId::new(1));
    }

    #[test]
    fn test_insert_replaces_classification() {
        let cache = RelationshipCache::new();
        cache.insert(rel(RelationshipKind::OutgoingRequest, 1, "ada"));
        let previous = cache.insert(rel(RelationshipKind::Friend, 1, "ada")).unwrap();

        assert_eq!(previous.kind(), RelationshipKind::OutgoingRequest);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(UserId::new(1)).unwrap().is_friend());
    }

    #[test]
    fn test_friend_queries() {
        let cache = RelationshipCache::new();
        cache.insert(rel(RelationshipKind::Friend, 1, "ada"));
        cache.insert(rel(RelationshipKind::Blocked, 2, "bob"));
        cache.insert(rel(RelationshipKind::Friend, 3, "cyd"));

        assert!(cache.friend(UserId::new(1)).is_some());
        assert!(cache.friend(UserId::new(2)).is_none());
        assert!(cache.friend(UserId::new(9)).is_none());

        let mut friend_ids: Vec<UserId> =
            cache.friends().iter().map(|f| f.user_id()).collect();
        friend_ids.sort();
        assert_eq!(friend_ids, vec![UserId::new(1), UserId::new(3)]);
    }

    #[test]
    fn test_lookup_contract() {
        let cache = RelationshipCache::new();
        cache.insert(rel(RelationshipKind::Friend, 1, "ada"));
        cache.insert(rel(RelationshipKind::Blocked, 2, "bob"));

        let lookup: &dyn RelationshipLookup = &cache;
        assert!(lookup.is_friend(UserId::new(1)));
        assert!(!lookup.is_friend(UserId::new(2)));
        assert!(!lookup.is_friend(UserId::new(9)));
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = RelationshipCache::new();
        cache.insert(rel(RelationshipKind::Friend, 1, "ada"));
        cache.insert(rel(RelationshipKind::Friend, 2, "bob"));

        assert!(cache.remove(UserId::new(1)).is_some());
        assert!(cache.remove(UserId::new(1)).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_no_relationships_resolves_nothing() {
        let lookup = NoRelationships;
        assert!(lookup.relationship(UserId::new(1)).is_none());
        assert!(!lookup.is_friend(UserId::new(1)));
    }
}
