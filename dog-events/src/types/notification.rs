use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use uuid::Uuid;

/// A single event occurrence, as delivered to the notification queues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id of this occurrence (caller-assigned, may be empty)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,

    /// Event name, required
    pub event_name: String,

    /// Milliseconds since the Unix epoch; stamped by the publisher
    #[serde(default)]
    pub notification_time: i64,

    /// Event payload; `None` is written as `{}`
    #[serde(default, serialize_with = "serialize_data")]
    pub data: Option<HashMap<String, String>>,
}

fn serialize_data<S>(data: &Option<HashMap<String, String>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match data {
        Some(map) => map.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

impl Notification {
    /// Create a notification for the given event with no uid and no data
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            ..Self::default()
        }
    }

    /// Set the occurrence uid
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    /// Assign a random v4 uid
    pub fn with_random_uid(self) -> Self {
        self.with_uid(Uuid::new_v4().to_string())
    }

    /// Replace the payload
    pub fn with_data(mut self, data: HashMap<String, String>) -> Self {
        self.data = Some(data);
        self
    }

    /// Add a single payload entry
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Whether the notification carries an event name
    pub fn has_event_name(&self) -> bool {
        !self.event_name.is_empty()
    }

    /// Stamp the notification time and make sure `data` is present
    pub(crate) fn finalize(&mut self, now_millis: i64) {
        self.notification_time = now_millis;
        self.data.get_or_insert_with(HashMap::new);
    }
}
