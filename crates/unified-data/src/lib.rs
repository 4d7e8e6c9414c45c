//! Unified, buffer-controlled access to byte data for hash implementations.
//!
//! A hash function consumes its input the same way whether it lives in memory,
//! in a file or on a socket. This crate puts every such origin behind one set
//! of read patterns so the hash only has to be written once.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration ([`ReadOptions`], [`BufferSize`])
//! - `core` - Pure regrouping of chunks ([`GroupSplitter`])
//! - `effects` - Origins and the pull loops over `std::io` and `tokio::io`
//!
//! # Read Patterns
//!
//! - **Chunks**: [`BlockingSource::for_each_read`] delivers consecutive chunks of at most
//!   [`DataSource::buffer_size`] bytes
//! - **Groups**: [`BlockingSource::for_each_group`] delivers fixed-size blocks, with the
//!   trailing partial block handed to an optional remainder callback
//! - **Whole**: [`BlockingSource::to_vec`] collects everything into one buffer
//!
//! With the `async` feature (on by default) each pattern has a suspending twin
//! on [`AsyncSource`].
//!
//! # Example
//!
//! ```
//! use sha2::{Digest, Sha256};
//! use unified_data::{ArrayData, BlockingSource, DataSource, StreamData};
//!
//! fn digest(source: &mut impl BlockingSource) -> unified_data::Result<Vec<u8>> {
//!     let mut hasher = Sha256::new();
//!     source.for_each_read(|chunk| hasher.update(chunk))?;
//!     Ok(hasher.finalize().to_vec())
//! }
//!
//! let mut memory = ArrayData::from("hello world");
//! let mut stream = StreamData::new(&b"hello world"[..]);
//! stream.set_buffer_size(3)?;
//!
//! assert_eq!(digest(&mut memory)?, digest(&mut stream)?);
//! assert_eq!(digest(&mut memory)?, Sha256::digest(b"hello world").to_vec());
//! # Ok::<_, unified_data::Error>(())
//! ```

mod core;
mod data;
mod effects;
mod error;

pub use self::core::GroupSplitter;
pub use data::{BufferSize, DEFAULT_BUFFER_SIZE, ReadOptions};
#[cfg(feature = "async")]
pub use effects::AsyncSource;
pub use effects::{ArrayData, BlockingSource, DataSource, StreamData, UnifiedData};
pub use error::{Error, Result};
