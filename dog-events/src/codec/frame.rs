//! Binary frame layout for queued notifications.
//!
//! ```text
//! [0 .. 8)    i64 little-endian: notification_time (ms) * 1000
//! [8 .. N)    UTF-8 "<resource_path>#<event_name>"
//! [N]         0x00
//! [N+1 .. M)  compact JSON notification (runs to end of buffer)
//! ```
//!
//! Resource paths and event names never contain a NUL byte, so the first
//! 0x00 after the timestamp always marks the start of the JSON payload.

use crate::codec::JsonCodec;
use crate::{EventError, EventResult, Notification};

/// Size of the timestamp header in bytes
pub const TIMESTAMP_LEN: usize = 8;

/// Millisecond timestamps are written scaled to microseconds
pub const TIMESTAMP_SCALE: i64 = 1000;

/// Separator between resource path and event name
pub const HEADER_SEPARATOR: char = '#';

/// Boundary byte between header and JSON payload
pub const FRAME_SEPARATOR: u8 = 0x00;

/// Frame builder, assembling one contiguous byte buffer
#[derive(Debug, Default)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    /// Start a frame with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Encode a finalized notification into a complete frame.
    ///
    /// The timestamp header is taken from `notification.notification_time`,
    /// so header and JSON always agree.
    pub fn encode(notification: &Notification, resource_path: &str) -> EventResult<Vec<u8>> {
        let json = JsonCodec.encode(notification)?;
        let capacity = TIMESTAMP_LEN
            + resource_path.len()
            + HEADER_SEPARATOR.len_utf8()
            + notification.event_name.len()
            + 1
            + json.len();

        Ok(Self::with_capacity(capacity)
            .append_timestamp(notification.notification_time)
            .append_header(resource_path, &notification.event_name)
            .append_separator()
            .append_json(&json)
            .into_bytes())
    }

    /// Append the scaled timestamp header
    pub fn append_timestamp(mut self, millis: i64) -> Self {
        // out-of-range clocks wrap rather than fail
        let scaled = millis.wrapping_mul(TIMESTAMP_SCALE);
        self.buf.extend_from_slice(&scaled.to_le_bytes());
        self
    }

    /// Append `<resource_path>#<event_name>`
    pub fn append_header(mut self, resource_path: &str, event_name: &str) -> Self {
        self.buf.extend_from_slice(resource_path.as_bytes());
        let mut sep = [0u8; 4];
        self.buf
            .extend_from_slice(HEADER_SEPARATOR.encode_utf8(&mut sep).as_bytes());
        self.buf.extend_from_slice(event_name.as_bytes());
        self
    }

    /// Append the 0x00 boundary byte
    pub fn append_separator(mut self) -> Self {
        self.buf.push(FRAME_SEPARATOR);
        self
    }

    /// Append the JSON payload
    pub fn append_json(mut self, json: &[u8]) -> Self {
        self.buf.extend_from_slice(json);
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Decode a frame produced by [`Frame::encode`].
    ///
    /// The header is split at its last `#`, so resource paths may contain
    /// `#` but event names may not.
    pub fn decode(bytes: &[u8]) -> EventResult<DecodedFrame> {
        if bytes.len() < TIMESTAMP_LEN + 1 {
            return Err(EventError::malformed(format!(
                "frame too short: {} bytes",
                bytes.len()
            )));
        }

        let (timestamp, rest) = bytes.split_at(TIMESTAMP_LEN);
        let mut raw = [0u8; TIMESTAMP_LEN];
        raw.copy_from_slice(timestamp);
        let timestamp_micros = i64::from_le_bytes(raw);

        let boundary = rest
            .iter()
            .position(|b| *b == FRAME_SEPARATOR)
            .ok_or_else(|| EventError::malformed("missing 0x00 separator"))?;
        let header = std::str::from_utf8(&rest[..boundary])
            .map_err(|e| EventError::malformed(format!("header is not UTF-8: {}", e)))?;
        let (resource_path, event_name) = header
            .rsplit_once(HEADER_SEPARATOR)
            .ok_or_else(|| EventError::malformed("header has no '#' separator"))?;

        let notification = JsonCodec
            .decode(&rest[boundary + 1..])
            .map_err(|e| EventError::malformed(format!("invalid JSON payload: {}", e)))?;

        Ok(DecodedFrame {
            timestamp_micros,
            resource_path: resource_path.to_string(),
            event_name: event_name.to_string(),
            notification,
        })
    }
}

/// Parts of a decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Header timestamp (notification time in ms, scaled by 1000)
    pub timestamp_micros: i64,
    pub resource_path: String,
    pub event_name: String,
    pub notification: Notification,
}

impl DecodedFrame {
    /// Header timestamp converted back to milliseconds
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_micros / TIMESTAMP_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized(event_name: &str, millis: i64) -> Notification {
        let mut notification = Notification::new(event_name).with_entry("id", "42");
        notification.finalize(millis);
        notification
    }

    #[test]
    fn test_layout_matches_wire_format() {
        let notification = finalized("user.created", 1_700_000_000_000);
        let frame = Frame::encode(&notification, "tenants/7").unwrap();

        assert_eq!(&frame[..8], &1_700_000_000_000_000i64.to_le_bytes());
        let header_end = 8 + "tenants/7#user.created".len();
        assert_eq!(&frame[8..header_end], b"tenants/7#user.created");
        assert_eq!(frame[header_end], 0x00);
        assert_eq!(
            &frame[header_end + 1..],
            br#"{"event_name":"user.created","notification_time":1700000000000,"data":{"id":"42"}}"#
        );
    }

    #[test]
    fn test_exactly_one_separator_byte() {
        let notification = finalized("order.paid", 1_650_000_000_123);
        let frame = Frame::encode(&notification, "shops/1/orders/9").unwrap();
        let body = &frame[TIMESTAMP_LEN..];
        assert_eq!(body.iter().filter(|b| **b == FRAME_SEPARATOR).count(), 1);
    }

    #[test]
    fn test_decode_recovers_parts() {
        let notification = finalized("user.created", 1_700_000_000_000);
        let frame = Frame::encode(&notification, "a#b/c").unwrap();
        let decoded = Frame::decode(&frame).unwrap();

        assert_eq!(decoded.timestamp_micros, 1_700_000_000_000_000);
        assert_eq!(decoded.timestamp_millis(), notification.notification_time);
        assert_eq!(decoded.resource_path, "a#b/c");
        assert_eq!(decoded.event_name, "user.created");
        assert_eq!(decoded.notification, notification);
    }

    #[test]
    fn test_unfinalized_notification_still_frames_data_object() {
        let frame = Frame::encode(&Notification::new("x"), "p").unwrap();
        let body = &frame[TIMESTAMP_LEN..];
        let boundary = body.iter().position(|b| *b == FRAME_SEPARATOR).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body[boundary + 1..]).unwrap();
        assert_eq!(json["data"], serde_json::json!({}));
    }

    #[test]
    fn test_empty_resource_path() {
        let notification = finalized("ping", 5);
        let frame = Frame::encode(&notification, "").unwrap();
        assert_eq!(&frame[8..13], b"#ping");
        assert_eq!(Frame::decode(&frame).unwrap().resource_path, "");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(Frame::decode(&[1, 2, 3]), Err(EventError::MalformedFrame(_))));

        let mut no_separator = 1000i64.to_le_bytes().to_vec();
        no_separator.extend_from_slice(b"path#name{}");
        assert!(matches!(Frame::decode(&no_separator), Err(EventError::MalformedFrame(_))));

        let mut no_hash = 1000i64.to_le_bytes().to_vec();
        no_hash.extend_from_slice(b"pathname\0{}");
        assert!(matches!(Frame::decode(&no_hash), Err(EventError::MalformedFrame(_))));

        let mut bad_json = 1000i64.to_le_bytes().to_vec();
        bad_json.extend_from_slice(b"path#name\0{not json");
        assert!(matches!(Frame::decode(&bad_json), Err(EventError::MalformedFrame(_))));
    }

    #[test]
    fn test_builder_len() {
        let frame = Frame::default()
            .append_timestamp(1)
            .append_header("p", "e")
            .append_separator()
            .append_json(b"{}");
        assert_eq!(frame.len(), 8 + 3 + 1 + 2);
        assert!(!frame.is_empty());
    }
}
