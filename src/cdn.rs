//! Asset CDN URL formats.
//!
//! Derived URLs for icons and avatars, assembled from ids and asset hashes
//! the sync layer stores on entities. Pure string work; nothing here
//! performs requests.

use crate::ids::{ChannelId, UserId};

/// Base URL of the platform asset CDN.
pub const CDN_BASE_URL: &str = "https://cdn.discordapp.com";

/// Icon URL for a group DM channel.
pub fn group_icon_url(channel: ChannelId, icon_id: &str) -> String {
    format!("{}/channel-icons/{}/{}.jpg", CDN_BASE_URL, channel, icon_id)
}

/// Avatar URL for a user-uploaded avatar.
///
/// Animated avatar hashes carry an `a_` prefix and resolve to GIF;
/// everything else resolves to PNG.
pub fn user_avatar_url(user: UserId, avatar_id: &str) -> String {
    let ext = if avatar_id.starts_with("a_") { "gif" } else { "png" };
    format!("{}/avatars/{}/{}.{}", CDN_BASE_URL, user, avatar_id, ext)
}

/// Default avatar URL for users without an uploaded avatar, keyed by
/// discriminator modulo the five stock avatars.
pub fn default_avatar_url(discriminator: u16) -> String {
    format!("{}/embed/avatars/{}.png", CDN_BASE_URL, discriminator % 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_icon_url_format() {
        let url = group_icon_url(ChannelId::new(86699011792191488), "7d2abf7e");
        assert_eq!(
            url,
            "https://cdn.discordapp.com/channel-icons/86699011792191488/7d2abf7e.jpg",
        );
    }

    #[test]
    fn test_user_avatar_url_static() {
        let url = user_avatar_url(UserId::new(107562777690728448), "b3c724a1");
        assert_eq!(
            url,
            "https://cdn.discordapp.com/avatars/107562777690728448/b3c724a1.png",
        );
    }

    #[test]
    fn test_user_avatar_url_animated() {
        let url = user_avatar_url(UserId::new(107562777690728448), "a_b3c724a1");
        assert_eq!(
            url,
            "https://cdn.discordapp.com/avatars/107562777690728448/a_b3c724a1.gif",
        );
    }

    #[test]
    fn test_default_avatar_cycles_through_stock_set() {
        assert_eq!(
            default_avatar_url(0),
            "https://cdn.discordapp.com/embed/avatars/0.png",
        );
        assert_eq!(
            default_avatar_url(1337),
            "https://cdn.discordapp.com/embed/avatars/2.png",
        );
        assert_eq!(
            default_avatar_url(9999),
            "https://cdn.discordapp.com/embed/avatars/4.png",
        );
    }
}
