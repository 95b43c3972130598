//! Destination key derivation.
//!
//! Every producer of notifications shares one namespace with a list per
//! priority level: `service:*/event#incoming-notifications0` through
//! `service:*/event#incoming-notifications7`.

use crate::PriorityLevel;

const SERVICE_PREFIX: &str = "service";
const PREFIX_SEPARATOR: &str = ":";
const ANY_INSTANCE: &str = "*";
const PATH_SEPARATOR: &str = "/";
const EVENT_SERVICE_NAME: &str = "event";
const SUFFIX_SEPARATOR: &str = "#";
const INCOMING_NOTIFICATIONS: &str = "incoming-notifications";

/// Queue key for a priority level. Depends on nothing but the priority.
pub fn queue_key(priority: PriorityLevel) -> String {
    format!(
        "{SERVICE_PREFIX}{PREFIX_SEPARATOR}{ANY_INSTANCE}{PATH_SEPARATOR}{EVENT_SERVICE_NAME}\
         {SUFFIX_SEPARATOR}{INCOMING_NOTIFICATIONS}{priority}"
    )
}

/// All queue keys, ordered by priority level
pub fn all_queue_keys() -> Vec<String> {
    PriorityLevel::all().map(queue_key).collect()
}
