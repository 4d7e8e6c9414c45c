//! Data layer: immutable configuration types.

mod options;

pub use options::{BufferSize, DEFAULT_BUFFER_SIZE, ReadOptions};
