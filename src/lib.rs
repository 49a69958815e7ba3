//! # Cordial client core
//!
//! **Client-side entity and state layer for Discord group DMs.**
//!
//! Cordial keeps an in-memory mirror of the service state a logged-in
//! client cares about (group DM channels, their members, the account's
//! relationships, and active calls) and derives read-only views from it.
//! The sync layer owns all writes; everything else reads snapshots. Network
//! transport, wire formats, and UI live outside this crate: remote
//! operations only ever produce [`PendingAction`] descriptions for the
//! embedding client's request layer to execute.
//!
//! ## Quick Start
//!
//! ```rust
//! use cordial_client::{ClientContext, Relationship, RelationshipKind, UserProfile};
//! use cordial_client::ids::{ChannelId, UserId};
//!
//! let context = ClientContext::new();
//! let group = context.create_group(ChannelId::new(86699011792191488));
//!
//! // The sync layer pushes state in; views derive from it.
//! group.set_name(Some("book club".to_string()));
//! let ada = context.users().upsert(
//!     UserId::new(1),
//!     UserProfile { username: "ada".into(), discriminator: 1, avatar_id: None },
//!     false,
//! );
//! group.members().insert(ada.clone());
//! context.relationships().insert(Relationship::new(RelationshipKind::Friend, ada));
//!
//! assert_eq!(group.friends().len(), 1);
//! assert!(group.icon_url().is_none());
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ids`] | Snowflake id newtypes with embedded creation timestamps |
//! | [`cdn`] | Asset CDN URL formats for icons and avatars |
//! | [`entities`] | Group, user, relationship, and call entities |
//! | [`client`] | Client context, registries, and the relationship cache |
//! | [`actions`] | Deferred actions and the request-layer contract |

// ── Public modules ──────────────────────────────────────────────────────────

/// Deferred actions and the request-layer contract.
pub mod actions;

/// Asset CDN URL formats.
pub mod cdn;

/// Client context, registries, and the relationship cache.
pub mod client;

/// Group, user, relationship, and call entities.
pub mod entities;

/// Snowflake identifier types.
pub mod ids;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use actions::{
    ActionError, ActionFuture, ActionIssuer, IssueResult, PendingAction, UnwiredIssuer,
};

pub use client::{
    ClientContext, ContextHandle, GroupRegistry, NoRelationships, RelationshipCache,
    RelationshipLookup, UserRegistry,
};

pub use entities::{
    Call, Disposable, Friend, Group, GroupError, MembershipIndex, Relationship,
    RelationshipKind, User, UserProfile,
};

pub use ids::{ChannelId, MessageId, UserId};

// ── Library metadata ────────────────────────────────────────────────────────

/// Cordial client core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────
