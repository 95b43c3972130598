//! Process-wide publisher backed by Redis.
//!
//! The first call builds the publisher from `DOG_EVENTS__*` environment
//! variables; the Redis connection itself is opened on the first publish.

use std::sync::OnceLock;

use crate::{
    EventError, EventPublisher, EventResult, Notification, PriorityLevel, PublishReceipt,
    PublisherConfig,
    backend::redis::RedisConnector,
    config::DEFAULT_ENV_PREFIX,
};

static PUBLISHER: OnceLock<EventPublisher<RedisConnector>> = OnceLock::new();

/// Install the process-wide publisher with an explicit config.
///
/// Fails if the publisher was already installed or used.
pub fn init(config: PublisherConfig) -> EventResult<()> {
    PUBLISHER
        .set(EventPublisher::new(RedisConnector::new(config)))
        .map_err(|_| EventError::invalid_argument("config", "global publisher already initialized"))
}

/// Get the process-wide publisher, configuring it from the environment on first use
pub fn publisher() -> EventResult<&'static EventPublisher<RedisConnector>> {
    if let Some(publisher) = PUBLISHER.get() {
        return Ok(publisher);
    }
    let config = PublisherConfig::from_env(DEFAULT_ENV_PREFIX)?;
    Ok(PUBLISHER.get_or_init(|| EventPublisher::new(RedisConnector::new(config))))
}

/// Publish a notification through the process-wide publisher
pub async fn raise_event<P>(
    notification: Notification,
    priority: P,
    resource_path: &str,
) -> EventResult<PublishReceipt>
where
    P: TryInto<PriorityLevel>,
    EventError: From<P::Error>,
{
    publisher()?
        .publish(notification, priority, resource_path)
        .await
}
