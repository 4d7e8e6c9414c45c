//! Pure transformations over byte chunks.
//!
//! Nothing in here performs I/O; the pull loops in `effects` feed chunks in and
//! forward whatever comes out to the caller's callbacks.

mod group;

pub use group::GroupSplitter;
