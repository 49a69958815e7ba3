//! Client-side wiring: context, registries, relationship cache.
//!
//! # Module structure
//! - `context`: `ClientContext` and the weak `ContextHandle` entities keep
//! - `relationships`: `RelationshipCache` and the `RelationshipLookup` contract
//! - `users`: interning `UserRegistry`
//! - `groups`: `GroupRegistry` of tracked group entities

pub mod context;
pub mod groups;
pub mod relationships;
pub mod users;

// Re-export core types for convenience
pub use context::{ClientContext, ContextHandle};
pub use groups::GroupRegistry;
pub use relationships::{NoRelationships, RelationshipCache, RelationshipLookup};
pub use users::UserRegistry;
