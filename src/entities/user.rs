//! User accounts.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::cdn;
use crate::ids::UserId;

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// Mutable profile fields, replaced wholesale by the sync layer when the
/// service pushes a user update. Last writer wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub discriminator: u16,
    pub avatar_id: Option<String>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A user account.
///
/// Identity (`id`, `bot`) is fixed at construction; the profile is interior
/// mutable so a single shared `Arc<User>` can be updated in place everywhere
/// it is referenced. Equality and hashing depend solely on the id.
pub struct User {
    id: UserId,
    bot: bool,
    profile: RwLock<UserProfile>,
}

impl User {
    pub fn new(id: UserId, profile: UserProfile, bot: bool) -> Self {
        User {
            id,
            bot,
            profile: RwLock::new(profile),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn is_bot(&self) -> bool {
        self.bot
    }

    pub fn username(&self) -> String {
        self.profile.read().unwrap().username.clone()
    }

    pub fn discriminator(&self) -> u16 {
        self.profile.read().unwrap().discriminator
    }

    /// `username#discriminator`, zero-padded to four digits.
    pub fn tag(&self) -> String {
        let p = self.profile.read().unwrap();
        format!("{}#{:04}", p.username, p.discriminator)
    }

    /// Chat-format mention for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    pub fn avatar_id(&self) -> Option<String> {
        self.profile.read().unwrap().avatar_id.clone()
    }

    /// CDN URL of the uploaded avatar, absent when the user never set one.
    pub fn avatar_url(&self) -> Option<String> {
        let p = self.profile.read().unwrap();
        p.avatar_id
            .as_deref()
            .map(|avatar| cdn::user_avatar_url(self.id, avatar))
    }

    /// CDN URL of the stock avatar assigned by discriminator.
    pub fn default_avatar_url(&self) -> String {
        cdn::default_avatar_url(self.discriminator())
    }

    /// Uploaded avatar when present, stock avatar otherwise.
    pub fn effective_avatar_url(&self) -> String {
        self.avatar_url()
            .unwrap_or_else(|| self.default_avatar_url())
    }

    /// Snapshot of the current profile.
    pub fn profile(&self) -> UserProfile {
        self.profile.read().unwrap().clone()
    }

    /// Overwrite the whole profile. No field-level merging.
    pub fn update_profile(&self, profile: UserProfile) -> &Self {
        *self.profile.write().unwrap() = profile;
        self
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(id={}, tag={}, bot={})", self.id, self.tag(), self.bot)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U:{}({})", self.username(), self.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::sync::Arc;

    fn profile(name: &str, discriminator: u16) -> UserProfile {
        UserProfile {
            username: name.to_string(),
            discriminator,
            avatar_id: None,
        }
    }

    fn hash_of(user: &User) -> u64 {
        let mut hasher = DefaultHasher::new();
        user.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_accessors() {
        let user = User::new(UserId::new(42), profile("maple", 7), false);
        assert_eq!(user.id(), UserId::new(42));
        assert!(!user.is_bot());
        assert_eq!(user.username(), "maple");
        assert_eq!(user.discriminator(), 7);
        assert_eq!(user.tag(), "maple#0007");
        assert_eq!(user.mention(), "<@42>");
    }

    #[test]
    fn test_equality_and_hash_by_id_only() {
        let a = User::new(UserId::new(5), profile("old-name", 1), false);
        let b = User::new(UserId::new(5), profile("new-name", 2), true);
        let c = User::new(UserId::new(6), profile("old-name", 1), false);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn test_update_profile_is_wholesale_overwrite() {
        let user = Arc::new(User::new(UserId::new(9), profile("before", 1), false));
        let alias = Arc::clone(&user);

        user.update_profile(UserProfile {
            username: "after".to_string(),
            discriminator: 2,
            avatar_id: Some("abc".to_string()),
        });

        // Every holder of the Arc observes the overwrite.
        assert_eq!(alias.username(), "after");
        assert_eq!(alias.discriminator(), 2);
        assert_eq!(alias.avatar_id(), Some("abc".to_string()));
    }

    #[test]
    fn test_avatar_urls() {
        let user = User::new(UserId::new(100), profile("pic", 3), false);
        assert_eq!(user.avatar_url(), None);
        assert_eq!(
            user.default_avatar_url(),
            "https://cdn.discordapp.com/embed/avatars/3.png",
        );
        assert_eq!(user.effective_avatar_url(), user.default_avatar_url());

        user.update_profile(UserProfile {
            username: "pic".to_string(),
            discriminator: 3,
            avatar_id: Some("a_feed".to_string()),
        });
        assert_eq!(
            user.avatar_url().unwrap(),
            "https://cdn.discordapp.com/avatars/100/a_feed.gif",
        );
        assert_eq!(user.effective_avatar_url(), user.avatar_url().unwrap());
    }

    #[test]
    fn test_display_format() {
        let user = User::new(UserId::new(86699011792191488), profile("minn", 1), false);
        assert_eq!(user.to_string(), "U:minn(86699011792191488)");
    }
}
