//! Relationships: how the logged-in account classifies other users.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::ids::UserId;

// ---------------------------------------------------------------------------
// RelationshipKind
// ---------------------------------------------------------------------------

/// Relationship classification, with the service-side type codes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RelationshipKind {
    Friend = 1,
    Blocked = 2,
    IncomingRequest = 3,
    OutgoingRequest = 4,
}

impl RelationshipKind {
    /// Map a service-side type code. Unknown codes are `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(RelationshipKind::Friend),
            2 => Some(RelationshipKind::Blocked),
            3 => Some(RelationshipKind::IncomingRequest),
            4 => Some(RelationshipKind::OutgoingRequest),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// A classified link between the logged-in account and another user.
///
/// One variant per classification; consumers branch by pattern matching
/// instead of reading a kind field and downcasting.
#[derive(Clone, Debug, PartialEq)]
pub enum Relationship {
    Friend(Friend),
    Blocked(Arc<User>),
    IncomingRequest(Arc<User>),
    OutgoingRequest(Arc<User>),
}

impl Relationship {
    /// Build the variant matching `kind` around `user`.
    pub fn new(kind: RelationshipKind, user: Arc<User>) -> Self {
        match kind {
            RelationshipKind::Friend => Relationship::Friend(Friend::new(user)),
            RelationshipKind::Blocked => Relationship::Blocked(user),
            RelationshipKind::IncomingRequest => Relationship::IncomingRequest(user),
            RelationshipKind::OutgoingRequest => Relationship::OutgoingRequest(user),
        }
    }

    pub fn kind(&self) -> RelationshipKind {
        match self {
            Relationship::Friend(_) => RelationshipKind::Friend,
            Relationship::Blocked(_) => RelationshipKind::Blocked,
            Relationship::IncomingRequest(_) => RelationshipKind::IncomingRequest,
            Relationship::OutgoingRequest(_) => RelationshipKind::OutgoingRequest,
        }
    }

    /// The user on the far side, whatever the classification.
    pub fn user(&self) -> &Arc<User> {
        match self {
            Relationship::Friend(friend) => friend.user(),
            Relationship::Blocked(user)
            | Relationship::IncomingRequest(user)
            | Relationship::OutgoingRequest(user) => user,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user().id()
    }

    pub fn is_friend(&self) -> bool {
        matches!(self, Relationship::Friend(_))
    }

    pub fn as_friend(&self) -> Option<&Friend> {
        match self {
            Relationship::Friend(friend) => Some(friend),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Friend
// ---------------------------------------------------------------------------

/// The friend-side view of a relationship.
#[derive(Clone, Debug, PartialEq)]
pub struct Friend {
    user: Arc<User>,
}

impl Friend {
    pub fn new(user: Arc<User>) -> Self {
        Friend { user }
    }

    pub fn user(&self) -> &Arc<User> {
        &self.user
    }

    pub fn user_id(&self) -> UserId {
        self.user.id()
    }
}

impl fmt::Display for Friend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F:{}({})", self.user.username(), self.user.id())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::UserProfile;

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

    #[test]
    fn test_kind_codes_roundtrip() {
        for kind in [
            RelationshipKind::Friend,
            RelationshipKind::Blocked,
            RelationshipKind::IncomingRequest,
            RelationshipKind::OutgoingRequest,
        ] {
            assert_eq!(RelationshipKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(RelationshipKind::Friend.code(), 1);
        assert_eq!(RelationshipKind::from_code(0), None);
        assert_eq!(RelationshipKind::from_code(5), None);
    }

    #[test]
    fn test_new_builds_matching_variant() {
        for kind in [
            RelationshipKind::Friend,
            RelationshipKind::Blocked,
            RelationshipKind::IncomingRequest,
            RelationshipKind::OutgoingRequest,
        ] {
            let rel = Relationship::new(kind, user(3, "pat"));
            assert_eq!(rel.kind(), kind);
            assert_eq!(rel.user_id(), UserId::new(3));
        }
    }

    #[test]
    fn test_friend_classification_queries() {
        let friend = Relationship::new(RelationshipKind::Friend, user(1, "ada"));
        assert!(friend.is_friend());
        assert_eq!(friend.as_friend().unwrap().user_id(), UserId::new(1));

        let blocked = Relationship::new(RelationshipKind::Blocked, user(2, "bob"));
        assert!(!blocked.is_friend());
        assert!(blocked.as_friend().is_none());
    }

    #[test]
    fn test_user_reaches_through_every_variant() {
        let incoming = Relationship::IncomingRequest(user(8, "ivy"));
        assert_eq!(incoming.user().id(), UserId::new(8));

        let outgoing = Relationship::OutgoingRequest(user(9, "oz"));
        assert_eq!(outgoing.user().id(), UserId::new(9));
    }

    #[test]
    fn test_friend_display_format() {
        let friend = Friend::new(user(44, "nell"));
        assert_eq!(friend.to_string(), "F:nell(44)");
    }
}
