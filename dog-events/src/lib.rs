//! # dog-events: Priority Event Notification Publisher
//!
//! Producers hand a [`Notification`] to an [`EventPublisher`] together with a
//! priority level (`0..=7`) and a resource path. The publisher validates it,
//! stamps it, encodes it into a binary frame and appends the frame to the
//! tail of one of eight shared priority lists in a list store (Redis).
//! Consumers pop the lists on their own schedule.
//!
//! ## Wire format
//!
//! - key: `service:*/event#incoming-notifications<priority>`
//! - frame: `i64 LE (time_ms * 1000)` + `"<resource_path>#<event_name>"` +
//!   `0x00` + compact JSON notification
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use dog_events::prelude::*;
//!
//! # async fn run() -> EventResult<()> {
//! let config = PublisherConfig::new().with_redis_url("redis://127.0.0.1:6379");
//! let publisher = EventPublisher::new(RedisConnector::new(config));
//!
//! let notification = Notification::new("user.created").with_entry("id", "42");
//! let receipt = publisher.publish(notification, 3, "tenants/7").await?;
//! assert_eq!(receipt.queue_key, "service:*/event#incoming-notifications3");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod clock;
pub mod codec;
pub mod config;
pub mod connection;
pub mod error;
pub mod publisher;
pub mod routing;
pub mod types;

#[cfg(feature = "redis")]
pub mod global;

#[cfg(feature = "tracing-basic")]
pub mod observability;

// Core API exports
pub use publisher::{EventPublisher, PublishReceipt};
pub use types::{Notification, PriorityLevel};
pub use error::{EventError, EventResult};
pub use config::PublisherConfig;
pub use codec::{DecodedFrame, Frame, JsonCodec};
pub use connection::{Connector, LazyConnection};
pub use backend::ListStore;
pub use clock::{Clock, FixedClock, SystemClock};

// Backend implementations
#[cfg(feature = "memory")]
pub use backend::memory::{MemoryBackend, MemoryStore};

#[cfg(feature = "redis")]
pub use backend::redis::{RedisConnector, RedisStore};

#[cfg(feature = "redis")]
pub use global::raise_event;

/// Prelude for producers
pub mod prelude {
    pub use crate::{
        EventPublisher, PublishReceipt, Notification, PriorityLevel,
        EventError, EventResult, PublisherConfig,
    };

    #[cfg(feature = "redis")]
    pub use crate::{RedisConnector, raise_event};

    #[cfg(feature = "memory")]
    pub use crate::MemoryBackend;
}
