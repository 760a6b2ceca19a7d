#![warn(clippy::pedantic)]

pub mod accumulator;
pub mod encoder;
pub mod error;
pub mod frame_builder;
pub mod sizing;

mod compression;

pub use encoder::{DEFAULT_MAX_ENCODED_SIZE, EncoderConfig, StreamEncoder};
pub use error::EncodeError;
