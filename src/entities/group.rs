//! Group DM entities.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::actions::{ActionError, IssueResult};
use crate::cdn;
use crate::client::{ClientContext, ContextHandle, NoRelationships, RelationshipLookup};
use crate::entities::{Call, Disposable, Friend, MembershipIndex, User};
use crate::ids::{ChannelId, MessageId};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GroupError {
    /// No message id has been recorded for this group yet.
    #[error("no last message id recorded for this group")]
    NoLatestMessage,
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// Scalar state the sync layer overwrites in place.
struct GroupState {
    name: Option<String>,
    icon_id: Option<String>,
    owner: Option<Arc<User>>,
    last_message_id: i64,
}

/// A group DM channel.
///
/// The entity mirrors service state pushed in by the sync layer and derives
/// read-only views from it, cross-referencing the client's relationship
/// cache through a non-owning [`ContextHandle`]. Identity is the channel
/// id alone: name, icon, owner, membership, and call all change over the
/// entity's life, the id never does, and equality and hashing follow it.
///
/// Writers are the sync layer's sequential event path; readers may be
/// anyone on any thread. Each concern sits behind its own lock and every
/// returned collection is a point-in-time copy.
pub struct Group {
    id: ChannelId,
    context: ContextHandle,
    state: RwLock<GroupState>,
    members: MembershipIndex,
    call: RwLock<Option<Arc<Call>>>,
    disposed: AtomicBool,
}

impl Group {
    /// A fresh entity for `id`. Starts empty: no name, icon, owner, call,
    /// members, or recorded last message.
    pub fn new(id: ChannelId, context: ContextHandle) -> Self {
        Group {
            id,
            context,
            state: RwLock::new(GroupState {
                name: None,
                icon_id: None,
                owner: None,
                // Negative means "nothing recorded"; zero is a real id.
                last_message_id: -1,
            }),
            members: MembershipIndex::new(),
            call: RwLock::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// The owning client context, while it is alive.
    pub fn context(&self) -> Option<Arc<ClientContext>> {
        self.context.get()
    }

    // -- scalar state -------------------------------------------------------

    pub fn name(&self) -> Option<String> {
        self.state.read().unwrap().name.clone()
    }

    pub fn icon_id(&self) -> Option<String> {
        self.state.read().unwrap().icon_id.clone()
    }

    pub fn owner(&self) -> Option<Arc<User>> {
        self.state.read().unwrap().owner.clone()
    }

    /// CDN URL of the group icon, absent exactly when no icon is set.
    pub fn icon_url(&self) -> Option<String> {
        let state = self.state.read().unwrap();
        state
            .icon_id
            .as_deref()
            .map(|icon| cdn::group_icon_url(self.id, icon))
    }

    /// True when a strictly positive last message id has been recorded.
    ///
    /// Zero is a real id for [`latest_message_id`](Group::latest_message_id)
    /// but does not count as "has a latest message".
    pub fn has_latest_message(&self) -> bool {
        self.state.read().unwrap().last_message_id > 0
    }

    /// The most recent message id the sync layer recorded.
    ///
    /// Fails while nothing has been recorded (the stored value is
    /// negative); callers check [`has_latest_message`](Group::has_latest_message)
    /// to avoid the error path.
    pub fn latest_message_id(&self) -> Result<MessageId, GroupError> {
        let raw = self.state.read().unwrap().last_message_id;
        if raw < 0 {
            return Err(GroupError::NoLatestMessage);
        }
        Ok(MessageId::new(raw as u64))
    }

    // -- sync-layer setters: unconditional overwrite, chainable ------------

    pub fn set_name(&self, name: Option<String>) -> &Self {
        self.state.write().unwrap().name = name;
        self
    }

    pub fn set_icon_id(&self, icon_id: Option<String>) -> &Self {
        self.state.write().unwrap().icon_id = icon_id;
        self
    }

    pub fn set_owner(&self, owner: Option<Arc<User>>) -> &Self {
        self.state.write().unwrap().owner = owner;
        self
    }

    /// Record the newest message id. Stored as-is; a negative value puts
    /// the group back in the nothing-recorded state.
    pub fn set_last_message_id(&self, id: i64) -> &Self {
        self.state.write().unwrap().last_message_id = id;
        self
    }

    // -- membership and derived views --------------------------------------

    pub fn members(&self) -> &MembershipIndex {
        &self.members
    }

    /// Every current member, as a point-in-time copy.
    pub fn users(&self) -> Vec<Arc<User>> {
        self.members.snapshot()
    }

    /// Members classified as friends, as the relationship views themselves.
    ///
    /// Runs against the owning context's cache; once the context is gone
    /// this degrades to no classifications, so the result is empty.
    pub fn friends(&self) -> Vec<Friend> {
        match self.context() {
            Some(context) => self.friends_with(context.relationships()),
            None => self.friends_with(&NoRelationships),
        }
    }

    /// Members classified as friends under `lookup`.
    pub fn friends_with(&self, lookup: &dyn RelationshipLookup) -> Vec<Friend> {
        // Ids are snapshotted first; no membership lock is held across
        // lookup calls.
        self.members
            .ids()
            .into_iter()
            .filter_map(|id| {
                lookup
                    .relationship(id)
                    .and_then(|rel| rel.as_friend().cloned())
            })
            .collect()
    }

    /// Members not classified as friends. Unknown users count as
    /// non-friends, so with the context gone this is every member.
    pub fn non_friend_users(&self) -> Vec<Arc<User>> {
        match self.context() {
            Some(context) => self.non_friend_users_with(context.relationships()),
            None => self.non_friend_users_with(&NoRelationships),
        }
    }

    /// Members not classified as friends under `lookup`.
    pub fn non_friend_users_with(&self, lookup: &dyn RelationshipLookup) -> Vec<Arc<User>> {
        self.members
            .snapshot()
            .into_iter()
            .filter(|user| !lookup.is_friend(user.id()))
            .collect()
    }

    // -- call ---------------------------------------------------------------

    pub fn current_call(&self) -> Option<Arc<Call>> {
        self.call.read().unwrap().clone()
    }

    pub fn set_current_call(&self, call: Option<Arc<Call>>) -> &Self {
        *self.call.write().unwrap() = call;
        self
    }

    // -- remote operations --------------------------------------------------

    /// Ask the request layer to start (or join) the call in this channel.
    ///
    /// The entity only describes the request. A dead context is
    /// [`ActionError::ContextDropped`]; a client without a request layer
    /// reports [`ActionError::Unavailable`].
    pub fn start_call(&self) -> IssueResult<Arc<Call>> {
        let context = self.context().ok_or(ActionError::ContextDropped)?;
        context.action_issuer().start_call(self.id)
    }

    /// Ask the request layer to remove the logged-in account from this
    /// group. Same availability rules as [`start_call`](Group::start_call).
    pub fn leave_group(&self) -> IssueResult<()> {
        let context = self.context().ok_or(ActionError::ContextDropped)?;
        context.action_issuer().leave_group(self.id)
    }
}

impl Disposable for Group {
    /// Cascades into the current call before flagging this entity, so the
    /// whole tree reads disposed once this returns.
    fn dispose(&self) -> bool {
        let call = self.call.read().unwrap().clone();
        if let Some(call) = call {
            call.dispose();
        }
        self.disposed.store(true, Ordering::Relaxed);
        true
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Relaxed)
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Group(id={}, members={}, disposed={})",
            self.id,
            self.members.len(),
            self.is_disposed(),
        )
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read().unwrap();
        write!(f, "G:{}({})", state.name.as_deref().unwrap_or(""), self.id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
