//! Client-side entity types.
//!
//! Entities hold authoritative local state pushed in by the sync layer and
//! expose derived, read-only views on top of it. Every externally returned
//! collection is a point-in-time copy; internal storage never leaks.
//!
//! # Module structure
//! - `user`: user accounts with sync-updated profiles
//! - `relationship`: friend/blocked/request classification of known users
//! - `call`: active group calls
//! - `members`: per-group membership index
//! - `group`: the group DM aggregate

pub mod call;
pub mod group;
pub mod members;
pub mod relationship;
pub mod user;

// Re-export core types for convenience
pub use call::Call;
pub use group::{Group, GroupError};
pub use members::MembershipIndex;
pub use relationship::{Friend, Relationship, RelationshipKind};
pub use user::{User, UserProfile};

// ---------------------------------------------------------------------------
// Disposal contract
// ---------------------------------------------------------------------------

/// One-way teardown for entities that own releasable sub-resources.
///
/// Disposal is monotonic and idempotent: once an entity reports disposed it
/// never reports otherwise, and repeat calls are harmless. `dispose` returns
/// whether teardown is complete once the call returns, not whether this
/// particular call performed it; every implementor here completes
/// synchronously, so the answer is always `true`.
pub trait Disposable {
    /// Tear down owned sub-resources, children first.
    fn dispose(&self) -> bool;

    /// True once `dispose` has run at least once.
    fn is_disposed(&self) -> bool;
}
