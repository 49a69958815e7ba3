//! Client-wide user registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::entities::{User, UserProfile};
use crate::ids::UserId;

/// Interning registry for user entities.
///
/// One `Arc<User>` per id, shared by every membership, relationship, and
/// owner slot that references the user, so a profile update lands
/// everywhere at once. [`upsert`](UserRegistry::upsert) is the sync
/// layer's single entry point.
#[derive(Default)]
pub struct UserRegistry {
    inner: RwLock<HashMap<UserId, Arc<User>>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        UserRegistry {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the entity for `id`, overwriting its profile with the
    /// freshly synced one. `bot` only applies on first sight; it is
    /// identity, not profile.
    pub fn upsert(&self, id: UserId, profile: UserProfile, bot: bool) -> Arc<User> {
        let mut map = self.inner.write().unwrap();
        match map.get(&id) {
            Some(existing) => {
                existing.update_profile(profile);
                Arc::clone(existing)
            }
            None => {
                let user = Arc::new(User::new(id, profile, bot));
                map.insert(id, Arc::clone(&user));
                user
            }
        }
    }

    pub fn get(&self, id: UserId) -> Option<Arc<User>> {
        self.inner.read().unwrap().get(&id).cloned()
    }

    pub fn remove(&self, id: UserId) -> Option<Arc<User>> {
        self.inner.write().unwrap().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }

    /// Point-in-time copy of every tracked user. Order is unspecified.
    pub fn snapshot(&self) -> Vec<Arc<User>> {
        self.inner.read().unwrap().values().cloned().collect()
    }

    pub fn clear(&self) {
        self.inner.write().unwrap().clear();
    }
}

impl fmt::Debug for UserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserRegistry(len={})", self.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
