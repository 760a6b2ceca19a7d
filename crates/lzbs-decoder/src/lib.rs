#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;
pub mod frame;
pub mod streaming;

mod decompression;

pub use decoder::BlockDecoder;
pub use error::DecodeError;
pub use frame::Frame;
pub use streaming::StreamingDecoder;
