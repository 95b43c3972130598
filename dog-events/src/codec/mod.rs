pub mod frame;
pub mod json;

pub use frame::{DecodedFrame, Frame, FRAME_SEPARATOR, HEADER_SEPARATOR, TIMESTAMP_LEN, TIMESTAMP_SCALE};
pub use json::JsonCodec;
