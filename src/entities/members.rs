//! Per-group membership index.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::entities::User;
use crate::ids::UserId;

/// The set of users currently in one group, keyed by user id.
///
/// The sync layer inserts and removes on membership events; readers only
/// ever see point-in-time copies. Keying by id keeps entries unique, so a
/// replayed member event is a plain overwrite.
#[derive(Default)]
pub struct MembershipIndex {
    inner: RwLock<HashMap<UserId, Arc<User>>>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        MembershipIndex {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace a member. Returns the previous entity under that
    /// id, if any.
    pub fn insert(&self, user: Arc<User>) -> Option<Arc<User>> {
        self.inner.write().unwrap().insert(user.id(), user)
    }

    /// Remove a member by id.
    pub fn remove(&self, id: UserId) -> Option<Arc<User>> {
        self.inner.write().unwrap().remove(&id)
    }

    pub fn get(&self, id: UserId) -> Option<Arc<User>> {
        self.inner.read().unwrap().get(&id).cloned()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.inner.read().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }

    /// Point-in-time copy of the member entities. Order is unspecified.
    pub fn snapshot(&self) -> Vec<Arc<User>> {
        self.inner.read().unwrap().values().cloned().collect()
    }

    /// Point-in-time copy of the member ids. Order is unspecified.
    pub fn ids(&self) -> Vec<UserId> {
        self.inner.read().unwrap().keys().copied().collect()
    }
}

impl fmt::Debug for MembershipIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MembershipIndex(len={})", self.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
