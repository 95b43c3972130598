use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    EventError, EventResult,
    backend::ListStore,
    connection::Connector,
};

type Lists = HashMap<String, VecDeque<Vec<u8>>>;

#[derive(Default)]
struct Shared {
    /// List storage: key -> entries (head at front)
    lists: RwLock<Lists>,

    /// Connections handed out so far
    connections_built: AtomicUsize,

    /// Successful `push_tail` calls
    push_calls: AtomicUsize,

    /// Injected failures for tests
    connect_failures: AtomicUsize,
    write_failures: AtomicUsize,
}

/// In-memory backend for testing and development.
///
/// Clones share the same lists, so a test can keep a handle while the
/// publisher owns the connector.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    shared: Arc<Shared>,
    connect_delay: Duration,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate connection latency
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = delay;
        self
    }

    /// Make the next `count` connection attempts fail
    pub fn fail_next_connects(&self, count: usize) {
        self.shared.connect_failures.store(count, Ordering::SeqCst);
    }

    /// Make the next `count` pushes fail
    pub fn fail_next_writes(&self, count: usize) {
        self.shared.write_failures.store(count, Ordering::SeqCst);
    }

    /// Number of connections built
    pub fn connections_built(&self) -> usize {
        self.shared.connections_built.load(Ordering::SeqCst)
    }

    /// Number of successful pushes
    pub fn push_calls(&self) -> usize {
        self.shared.push_calls.load(Ordering::SeqCst)
    }

    /// Pop the entry at the head of a list
    pub fn pop_head(&self, key: &str) -> Option<Vec<u8>> {
        self.shared.lists.write().get_mut(key)?.pop_front()
    }

    /// Length of a list (0 when missing)
    pub fn len(&self, key: &str) -> usize {
        self.shared.lists.read().get(key).map_or(0, VecDeque::len)
    }

    /// Snapshot of a list's entries, head first
    pub fn entries(&self, key: &str) -> Vec<Vec<u8>> {
        self.shared
            .lists
            .read()
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Keys of all non-empty lists
    pub fn keys(&self) -> Vec<String> {
        self.shared
            .lists
            .read()
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Connection handed out by [`MemoryBackend`]
#[derive(Clone)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

#[async_trait]
impl Connector for MemoryBackend {
    type Connection = MemoryStore;

    async fn connect(&self) -> EventResult<MemoryStore> {
        if !self.connect_delay.is_zero() {
            tokio::time::sleep(self.connect_delay).await;
        }
        if Self::take_failure(&self.shared.connect_failures) {
            return Err(EventError::connection("memory backend refused connection"));
        }

        self.shared.connections_built.fetch_add(1, Ordering::SeqCst);
        Ok(MemoryStore {
            shared: self.shared.clone(),
        })
    }
}

#[async_trait]
impl ListStore for MemoryStore {
    async fn push_tail(&self, key: &str, entries: Vec<Vec<u8>>) -> EventResult<usize> {
        if MemoryBackend::take_failure(&self.shared.write_failures) {
            return Err(EventError::backend_write("memory backend rejected push"));
        }

        let mut lists = self.shared.lists.write();
        let list = lists.entry(key.to_string()).or_default();
        list.extend(entries);
        self.shared.push_calls.fetch_add(1, Ordering::SeqCst);
        Ok(list.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_push_tail_appends_in_order() {
        let backend = MemoryBackend::new();
        let store = backend.connect().await.unwrap();

        assert_eq!(store.push_tail("q", vec![b"a".to_vec()]).await.unwrap(), 1);
        assert_eq!(
            store
                .push_tail("q", vec![b"b".to_vec(), b"c".to_vec()])
                .await
                .unwrap(),
            3
        );

        assert_eq!(backend.entries("q"), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        assert_eq!(backend.pop_head("q"), Some(b"a".to_vec()));
        assert_eq!(backend.len("q"), 2);
        assert_eq!(backend.len("missing"), 0);
        assert_eq!(backend.keys(), vec!["q".to_string()]);
    }

    #[test]
    fn test_injected_failures_are_consumed() {
        tokio_test::block_on(async {
            let backend = MemoryBackend::new();
            backend.fail_next_connects(1);
            assert!(matches!(backend.connect().await, Err(EventError::ConnectionFailure(_))));

            let store = backend.connect().await.unwrap();
            backend.fail_next_writes(1);
            assert!(matches!(
                store.push_tail("q", vec![vec![1]]).await,
                Err(EventError::BackendWriteFailure(_))
            ));
            assert_eq!(backend.len("q"), 0);
            assert_eq!(store.push_tail("q", vec![vec![1]]).await.unwrap(), 1);
            assert_eq!(backend.connections_built(), 1);
            assert_eq!(backend.push_calls(), 1);
        });
    }
}
