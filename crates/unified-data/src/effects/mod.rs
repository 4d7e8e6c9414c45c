//! Origins and the pull loops that drive them.
//!
//! Every read performs I/O on the origin and hands borrowed chunks to caller
//! callbacks. Regrouping is delegated to `core`.

mod array;
mod blocking;
#[cfg(feature = "async")]
mod nonblocking;
mod source;
mod stream;
mod unified;

pub use array::ArrayData;
#[cfg(feature = "async")]
pub use source::AsyncSource;
pub use source::{BlockingSource, DataSource};
pub use stream::StreamData;
pub use unified::UnifiedData;
