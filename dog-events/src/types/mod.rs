pub mod notification;
pub mod priority;

pub use notification::Notification;
pub use priority::PriorityLevel;
