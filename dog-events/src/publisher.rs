use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    EventError, EventResult, Notification, PriorityLevel,
    backend::ListStore,
    clock::{Clock, SystemClock},
    codec::Frame,
    connection::{Connector, LazyConnection},
    routing,
};

/// Outcome of a successful publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    /// List the frame was appended to
    pub queue_key: String,

    pub priority: PriorityLevel,

    /// The notification as framed (stamped, `data` filled in)
    pub notification: Notification,

    /// Size of the appended frame in bytes
    pub frame_len: usize,

    /// Length of the destination list after the append, as reported by the backend
    pub queue_len: usize,
}

/// Publishes notifications onto the priority queues of a list store.
///
/// Cloning is cheap; clones share the lazily opened connection.
pub struct EventPublisher<C: Connector> {
    connection: Arc<LazyConnection<C>>,
    clock: Arc<dyn Clock>,
}

impl<C: Connector> Clone for EventPublisher<C> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<C> EventPublisher<C>
where
    C: Connector,
    C::Connection: ListStore,
{
    /// Create a publisher; no connection is opened until the first publish
    pub fn new(connector: C) -> Self {
        Self {
            connection: Arc::new(LazyConnection::new(connector)),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a custom clock for notification timestamps
    pub fn with_clock<K: Clock + 'static>(mut self, clock: K) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Validate, stamp, frame and append a notification to its priority queue.
    ///
    /// The notification is consumed; the finalized copy is returned in the
    /// receipt. Input errors are reported before any I/O takes place.
    #[instrument(
        skip_all,
        fields(event_name = %notification.event_name, resource_path = %resource_path)
    )]
    pub async fn publish<P>(
        &self,
        mut notification: Notification,
        priority: P,
        resource_path: &str,
    ) -> EventResult<PublishReceipt>
    where
        P: TryInto<PriorityLevel>,
        EventError: From<P::Error>,
    {
        let priority: PriorityLevel = priority.try_into()?;
        if !notification.has_event_name() {
            return Err(EventError::invalid_argument(
                "notification",
                "Every event must have an event name",
            ));
        }

        let connection = self.connection.get().await?;

        notification.finalize(self.clock.now_millis());

        let frame = Frame::encode(&notification, resource_path)?;
        let queue_key = routing::queue_key(priority);
        let frame_len = frame.len();
        debug!(%queue_key, frame_len, "Encoded notification frame");

        let queue_len = connection.push_tail(&queue_key, vec![frame]).await?;

        info!(
            %queue_key,
            notification_time = notification.notification_time,
            "Published notification"
        );
        Ok(PublishReceipt {
            queue_key,
            priority,
            notification,
            frame_len,
            queue_len,
        })
    }

    /// Open the backend connection ahead of the first publish
    pub async fn connect(&self) -> EventResult<()> {
        self.connection.get().await.map(|_| ())
    }

    /// Whether the backend connection has been opened
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Get the connection holder
    pub fn connection(&self) -> &LazyConnection<C> {
        &self.connection
    }
}
