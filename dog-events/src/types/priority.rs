use serde::{Deserialize, Serialize};

use crate::EventError;

/// Delivery priority level in the closed range `0..=7`.
///
/// Each level selects its own destination list; consumption order across
/// levels is decided by the consumer, not by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PriorityLevel(u8);

impl PriorityLevel {
    pub const MIN: PriorityLevel = PriorityLevel(0);
    pub const MAX: PriorityLevel = PriorityLevel(7);

    /// Number of distinct levels (and therefore destination keys)
    pub const COUNT: usize = 8;

    /// Create a priority level, rejecting values outside `0..=7`
    pub fn new(value: i64) -> Result<Self, EventError> {
        if (Self::MIN.0 as i64..=Self::MAX.0 as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(EventError::out_of_range(value))
        }
    }

    /// Get all priority levels in order (0 to 7)
    pub fn all() -> impl Iterator<Item = PriorityLevel> {
        (Self::MIN.0..=Self::MAX.0).map(PriorityLevel)
    }

    /// Get the numeric value
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl Default for PriorityLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PriorityLevel> for u8 {
    fn from(priority: PriorityLevel) -> Self {
        priority.0
    }
}

impl TryFrom<i64> for PriorityLevel {
    type Error = EventError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for PriorityLevel {
    type Error = EventError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl TryFrom<u8> for PriorityLevel {
    type Error = EventError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

/// Values above `i64::MAX` are reported as `OutOfRange { value: i64::MAX }`.
impl TryFrom<usize> for PriorityLevel {
    type Error = EventError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl std::str::FromStr for PriorityLevel {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| EventError::invalid_argument("priority", format!("Invalid priority: {}", s)))?;
        Self::new(value)
    }
}
