use crate::{EventResult, Notification};

/// Compact JSON codec for notification payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a notification as compact UTF-8 JSON
    pub fn encode(&self, notification: &Notification) -> EventResult<Vec<u8>> {
        Ok(serde_json::to_vec(notification)?)
    }

    /// Decode a notification from JSON bytes
    pub fn decode(&self, bytes: &[u8]) -> EventResult<Notification> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
