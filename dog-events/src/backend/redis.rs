use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use crate::{
    EventError, EventResult, PublisherConfig,
    backend::ListStore,
    connection::Connector,
};

/// Opens multiplexed Redis connections from a [`PublisherConfig`]
#[derive(Debug, Clone)]
pub struct RedisConnector {
    config: PublisherConfig,
}

impl RedisConnector {
    pub fn new(config: PublisherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }
}

/// Shared Redis connection; clones reuse the same multiplexed socket
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

#[async_trait]
impl Connector for RedisConnector {
    type Connection = RedisStore;

    async fn connect(&self) -> EventResult<RedisStore> {
        let client = redis::Client::open(self.config.redis_url.as_str())
            .map_err(EventError::connection)?;

        let manager = tokio::time::timeout(
            self.config.connect_timeout,
            client.get_connection_manager(),
        )
        .await
        .map_err(|_| {
            EventError::connection(format!(
                "timed out after {:?} connecting to redis",
                self.config.connect_timeout
            ))
        })?
        .map_err(EventError::connection)?;

        debug!(url = %self.config.redacted_url(), "Connected to redis");
        Ok(RedisStore { manager })
    }
}

#[async_trait]
impl ListStore for RedisStore {
    async fn push_tail(&self, key: &str, entries: Vec<Vec<u8>>) -> EventResult<usize> {
        let mut conn = self.manager.clone();
        conn.rpush::<_, _, usize>(key, entries)
            .await
            .map_err(EventError::backend_write)
    }
}
