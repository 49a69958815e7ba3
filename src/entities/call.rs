//! Group voice calls.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::entities::Disposable;
use crate::ids::{ChannelId, UserId};

/// An active call inside a group DM channel.
///
/// State mirrors what the sync layer pushes: the voice region and the set
/// of members still being rung. The owning group disposes the call when it
/// ends or when the group itself is torn down.
pub struct Call {
    channel: ChannelId,
    region: RwLock<Option<String>>,
    ringing: RwLock<HashSet<UserId>>,
    disposed: AtomicBool,
}

impl Call {
    pub fn new(channel: ChannelId) -> Self {
        Call {
            channel,
            region: RwLock::new(None),
            ringing: RwLock::new(HashSet::new()),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel
    }

    /// Voice region hosting the call, once known.
    pub fn region(&self) -> Option<String> {
        self.region.read().unwrap().clone()
    }

    pub fn set_region(&self, region: Option<String>) -> &Self {
        *self.region.write().unwrap() = region;
        self
    }

    /// Members currently being rung, as a point-in-time copy.
    pub fn ringing_users(&self) -> Vec<UserId> {
        self.ringing.read().unwrap().iter().copied().collect()
    }

    /// Replace the ringing set wholesale.
    pub fn set_ringing<I>(&self, users: I) -> &Self
    where
        I: IntoIterator<Item = UserId>,
    {
        *self.ringing.write().unwrap() = users.into_iter().collect();
        self
    }

    /// Stop ringing one member. Returns whether they were being rung.
    pub fn stop_ringing(&self, user: UserId) -> bool {
        self.ringing.write().unwrap().remove(&user)
    }

    pub fn is_ringing(&self, user: UserId) -> bool {
        self.ringing.read().unwrap().contains(&user)
    }
}

impl Disposable for Call {
    fn dispose(&self) -> bool {
        self.disposed.store(true, Ordering::Relaxed);
        true
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Call(channel={}, ringing={})",
            self.channel,
            self.ringing.read().unwrap().len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_call_is_quiet() {
        let call = Call::new(ChannelId::new(10));
        assert_eq!(call.channel_id(), ChannelId::new(10));
        assert_eq!(call.region(), None);
        assert!(call.ringing_users().is_empty());
        assert!(!call.is_disposed());
    }

    #[test]
    fn test_region_overwrite() {
        let call = Call::new(ChannelId::new(10));
        call.set_region(Some("us-west".to_string()));
        assert_eq!(call.region(), Some("us-west".to_string()));
        call.set_region(None);
        assert_eq!(call.region(), None);
    }

    #[test]
    fn test_ringing_set_and_stop() {
        let call = Call::new(ChannelId::new(10));
        call.set_ringing([UserId::new(1), UserId::new(2)]);
        assert!(call.is_ringing(UserId::new(1)));
        assert!(!call.is_ringing(UserId::new(3)));

        assert!(call.stop_ringing(UserId::new(1)));
        assert!(!call.stop_ringing(UserId::new(1)));
        assert_eq!(call.ringing_users(), vec![UserId::new(2)]);
    }

    #[test]
    fn test_ringing_snapshot_is_decoupled() {
        let call = Call::new(ChannelId::new(10));
        call.set_ringing([UserId::new(1)]);
        let snapshot = call.ringing_users();
        call.set_ringing([UserId::new(1), UserId::new(2)]);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_dispose_is_idempotent_and_true() {
        let call = Call::new(ChannelId::new(10));
        assert!(call.dispose());
        assert!(call.is_disposed());
        assert!(call.dispose());
        assert!(call.is_disposed());
    }

    #[test]
    fn test_setters_chain() {
        let call = Call::new(ChannelId::new(10));
        call.set_region(Some("sydney".to_string()))
            .set_ringing([UserId::new(5)]);
        assert_eq!(call.region(), Some("sydney".to_string()));
        assert!(call.is_ringing(UserId::new(5)));
    }
}
