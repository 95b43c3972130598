use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::EventResult;

/// Builds backend connections
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Send + Sync;

    /// Open a new connection to the backend
    async fn connect(&self) -> EventResult<Self::Connection>;
}

/// Initialize-once holder for a shared backend connection.
///
/// Concurrent callers share a single in-flight `connect`; once it succeeds
/// every caller sees the same connection. A failed attempt is reported to
/// the caller that drove it and leaves the holder empty, so the next call
/// tries again.
pub struct LazyConnection<C: Connector> {
    connector: C,
    cell: OnceCell<C::Connection>,
    attempts: AtomicUsize,
}

impl<C: Connector> LazyConnection<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            cell: OnceCell::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    /// Get the shared connection, connecting on first use
    pub async fn get(&self) -> EventResult<&C::Connection> {
        self.cell
            .get_or_try_init(|| async {
                let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(attempt, "Opening backend connection");
                match self.connector.connect().await {
                    Ok(connection) => {
                        debug!(attempt, "Backend connection established");
                        Ok(connection)
                    }
                    Err(e) => {
                        warn!(attempt, error = %e, "Backend connection failed");
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Whether a connection has been established
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    /// Number of connection attempts made so far
    pub fn connect_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Get the connector
    pub fn connector(&self) -> &C {
        &self.connector
    }
}

impl<C: Connector + std::fmt::Debug> std::fmt::Debug for LazyConnection<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyConnection")
            .field("connector", &self.connector)
            .field("connected", &self.is_connected())
            .field("attempts", &self.connect_attempts())
            .finish()
    }
}
