#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis;

use async_trait::async_trait;

use crate::EventResult;

/// List-oriented key-value store primitives used for delivery
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Append `entries` to the tail of the list stored at `key`.
    ///
    /// Returns the length of the list after the push.
    async fn push_tail(&self, key: &str, entries: Vec<Vec<u8>>) -> EventResult<usize>;
}
