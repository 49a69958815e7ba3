//! Snowflake identifier types for platform entities.
//!
//! - `UserId`: identifies a user account
//! - `ChannelId`: identifies a channel (group DMs included)
//! - `MessageId`: identifies a message within a channel
//!
//! Snowflakes embed their creation instant in the upper 42 bits as
//! milliseconds past the platform epoch; the low 22 bits are worker,
//! process, and sequence noise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform epoch, 2015-01-01T00:00:00Z, in Unix milliseconds.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Extract the embedded creation instant of a raw snowflake.
fn timestamp_of(raw: u64) -> DateTime<Utc> {
    let millis = ((raw >> 22) as i64) + DISCORD_EPOCH_MS;
    // Any u64 snowflake lands within the chrono range (the 42 timestamp
    // bits top out around year 2154).
    DateTime::from_timestamp_millis(millis).expect("snowflake timestamp in range")
}

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Identifies a user account.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Wrap a raw snowflake.
    pub fn new(raw: u64) -> Self {
        UserId(raw)
    }

    /// Return the raw snowflake.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The instant the platform minted this id.
    pub fn creation_time(&self) -> DateTime<Utc> {
        timestamp_of(self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ChannelId
// ---------------------------------------------------------------------------

/// Identifies a channel. Group DMs are channels, so group entities carry one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl ChannelId {
    /// Wrap a raw snowflake.
    pub fn new(raw: u64) -> Self {
        ChannelId(raw)
    }

    /// Return the raw snowflake.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The instant the platform minted this id.
    pub fn creation_time(&self) -> DateTime<Utc> {
        timestamp_of(self.0)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// MessageId
// ---------------------------------------------------------------------------

/// Identifies a message within a channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Wrap a raw snowflake.
    pub fn new(raw: u64) -> Self {
        MessageId(raw)
    }

    /// Return the raw snowflake.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The instant the platform minted this id.
    pub fn creation_time(&self) -> DateTime<Utc> {
        timestamp_of(self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
