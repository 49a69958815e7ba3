//! Client context: owns the caches and wires entities together.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::actions::{ActionIssuer, UnwiredIssuer};
use crate::client::{GroupRegistry, RelationshipCache, UserRegistry};
use crate::entities::{Disposable, Group};
use crate::ids::ChannelId;

// ---------------------------------------------------------------------------
// ClientContext
// ---------------------------------------------------------------------------

/// Shared client state: the user and group registries, the relationship
/// cache, and the action issuer entities go through for remote operations.
///
/// Entities hold a [`ContextHandle`] rather than the context itself, so a
/// stray entity kept alive past session end cannot keep the whole client
/// alive with it.
pub struct ClientContext {
    users: UserRegistry,
    groups: GroupRegistry,
    relationships: RelationshipCache,
    issuer: Arc<dyn ActionIssuer>,
}

impl ClientContext {
    /// A context with no request layer wired; every action reports
    /// unavailable.
    pub fn new() -> Arc<Self> {
        Self::with_issuer(Arc::new(UnwiredIssuer))
    }

    /// A context whose remote operations are carried out by `issuer`.
    pub fn with_issuer(issuer: Arc<dyn ActionIssuer>) -> Arc<Self> {
        Arc::new(ClientContext {
            users: UserRegistry::new(),
            groups: GroupRegistry::new(),
            relationships: RelationshipCache::new(),
            issuer,
        })
    }

    /// Non-owning handle for entities to keep.
    pub fn handle(self: &Arc<Self>) -> ContextHandle {
        ContextHandle {
            inner: Arc::downgrade(self),
        }
    }

    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    pub fn relationships(&self) -> &RelationshipCache {
        &self.relationships
    }

    pub fn action_issuer(&self) -> &Arc<dyn ActionIssuer> {
        &self.issuer
    }

    /// Get or create the group entity for `id` and track it.
    pub fn create_group(self: &Arc<Self>, id: ChannelId) -> Arc<Group> {
        let handle = self.handle();
        self.groups.get_or_insert_with(id, || {
            log::debug!("Registered group {}", id);
            Arc::new(Group::new(id, handle))
        })
    }

    /// Dispose the group for `id` and evict it from the registry.
    ///
    /// This is the channel-delete path: the entity stays readable for
    /// anyone still holding it, but reports disposed and is no longer
    /// reachable through the registry.
    pub fn drop_group(&self, id: ChannelId) -> Option<Arc<Group>> {
        let group = self.groups.remove(id)?;
        group.dispose();
        log::debug!("Dropped group {}", id);
        Some(group)
    }

    /// Session teardown: dispose every tracked group, cascading into their
    /// calls, then clear the caches.
    pub fn shutdown(&self) {
        let groups = self.groups.drain();
        for group in &groups {
            group.dispose();
        }
        self.relationships.clear();
        self.users.clear();
        log::info!("Context shut down, {} group(s) disposed", groups.len());
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClientContext(users={}, groups={}, relationships={})",
            self.users.len(),
            self.groups.len(),
            self.relationships.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// ContextHandle
// ---------------------------------------------------------------------------

/// Weak reference to the [`ClientContext`].
///
/// Entities resolve it per operation with [`get`](ContextHandle::get);
/// `None` after teardown is a normal outcome callers degrade on, never a
/// panic.
#[derive(Clone)]
pub struct ContextHandle {
    inner: Weak<ClientContext>,
}

impl ContextHandle {
    /// A handle that never resolves. Lets entities exist without a client,
    /// chiefly in tests.
    pub fn detached() -> Self {
        ContextHandle { inner: Weak::new() }
    }

    /// Upgrade to the context while it is still alive.
    pub fn get(&self) -> Option<Arc<ClientContext>> {
        self.inner.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ContextHandle({})",
            if self.is_alive() { "alive" } else { "dropped" },
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
