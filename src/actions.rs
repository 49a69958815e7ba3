//! Deferred platform actions.
//!
//! The core never talks to the remote service itself. Operations that need
//! it hand back a [`PendingAction`]: a named, lazy description of a request
//! that runs only when the caller submits it. The embedding client wires a
//! real request layer by implementing [`ActionIssuer`]; until then every
//! issue attempt reports `Unavailable` instead of pretending to succeed.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

use crate::entities::Call;
use crate::ids::ChannelId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ActionError {
    /// The operation exists in the API surface but no request layer is
    /// wired to carry it out on this client.
    #[error("`{0}` is not wired to a request executor on this client")]
    Unavailable(&'static str),
    /// The owning client context was torn down before the action could be
    /// issued.
    #[error("client context has been dropped")]
    ContextDropped,
    /// The request layer ran the request and it failed.
    #[error("request failed: {0}")]
    Failed(#[from] anyhow::Error),
}

/// Outcome of asking an issuer for an action: either a [`PendingAction`]
/// ready to submit, or a typed refusal.
pub type IssueResult<T> = std::result::Result<PendingAction<T>, ActionError>;

/// Boxed future produced when a pending action is submitted.
pub type ActionFuture<T> = Pin<Box<dyn Future<Output = Result<T, ActionError>> + Send>>;

// ---------------------------------------------------------------------------
// PendingAction
// ---------------------------------------------------------------------------

/// A request that has been described but not yet performed.
///
/// Dropping a `PendingAction` discards the request without side effects;
/// only [`submit`](PendingAction::submit) triggers it.
pub struct PendingAction<T> {
    op: &'static str,
    run: Box<dyn FnOnce() -> ActionFuture<T> + Send>,
}

impl<T> PendingAction<T> {
    /// Wrap a closure that starts the request when the action is submitted.
    pub fn new<F>(op: &'static str, run: F) -> Self
    where
        F: FnOnce() -> ActionFuture<T> + Send + 'static,
    {
        PendingAction { op, run: Box::new(run) }
    }

    /// An action that completes immediately with `value`.
    pub fn ready(op: &'static str, value: T) -> Self
    where
        T: Send + 'static,
    {
        PendingAction::new(op, move || Box::pin(async move { Ok(value) }))
    }

    /// The operation this action performs, for logs and error text.
    pub fn op(&self) -> &'static str {
        self.op
    }

    /// Perform the request. Nothing happens until this is awaited.
    pub async fn submit(self) -> Result<T, ActionError> {
        (self.run)().await
    }
}

impl<T> fmt::Debug for PendingAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PendingAction({})", self.op)
    }
}

// ---------------------------------------------------------------------------
// Issuer contract (request layer implements)
// ---------------------------------------------------------------------------

/// Contract between entities and the request layer.
///
/// Entities resolve their context, fetch the issuer, and ask it to describe
/// the operation; execution strategy (transport, retries, timeouts) stays
/// entirely on the implementing side.
pub trait ActionIssuer: Send + Sync {
    /// Describe starting (or joining) a voice call in a group DM channel.
    fn start_call(&self, channel: ChannelId) -> IssueResult<Arc<Call>>;

    /// Describe leaving a group DM channel.
    fn leave_group(&self, channel: ChannelId) -> IssueResult<()>;
}

/// Issuer for clients without a request layer. Every operation reports
/// [`ActionError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnwiredIssuer;

impl ActionIssuer for UnwiredIssuer {
    fn start_call(&self, _channel: ChannelId) -> IssueResult<Arc<Call>> {
        Err(ActionError::Unavailable("start_call"))
    }

    fn leave_group(&self, _channel: ChannelId) -> IssueResult<()> {
        Err(ActionError::Unavailable("leave_group"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
