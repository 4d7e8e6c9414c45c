use crate::data::ReadOptions;
use crate::error::{Error, Result};

/// A byte origin that hash implementations can be driven from.
///
/// The read patterns themselves live in [`BlockingSource`] and
/// [`AsyncSource`]; an origin implements whichever of the two its underlying
/// I/O supports.
pub trait DataSource {
    /// Total size of the data in bytes.
    ///
    /// Returns [`Error::Unsupported`] when the origin cannot tell without
    /// consuming itself. A successful answer is exact and does not change for
    /// the lifetime of the source.
    fn len(&self) -> Result<u64>;

    fn is_empty(&self) -> Result<bool> { Ok(self.len()? == 0) }

    /// Length of the chunks pulled from the origin.
    fn buffer_size(&self) -> usize;

    /// Change the pull granularity. Zero is rejected and leaves the previous
    /// value in place.
    fn set_buffer_size(&mut self, size: usize) -> Result<()>;

    fn apply(&mut self, options: &ReadOptions) -> Result<()> {
        self.set_buffer_size(options.buffer_size.get())
    }
}

/// Read patterns that block the calling thread on every pull.
///
/// Every operation consumes the origin from its current position to the end.
/// Callbacks receive a view into a buffer owned by the source, which is
/// overwritten by the next pull.
pub trait BlockingSource: DataSource {
    /// Deliver the data as consecutive chunks of at most
    /// [`buffer_size`](DataSource::buffer_size) bytes.
    ///
    /// The first error returned by `action` aborts the read and is passed
    /// through unchanged.
    fn try_for_each_read<F, E>(&mut self, action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>;

    /// Deliver the data as groups of exactly `group_size` bytes.
    ///
    /// A trailing partial group goes to `remainder` once, if supplied. When
    /// the length is a multiple of `group_size`, `remainder` is never called.
    fn try_for_each_group<F, G, E>(
        &mut self,
        group_size: usize,
        action: F,
        remainder: Option<G>,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        G: FnOnce(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>;

    /// Read everything into one contiguous buffer.
    fn to_vec(&mut self) -> Result<Vec<u8>>;

    fn for_each_read<F>(&mut self, mut action: F) -> Result<()>
    where
        F: FnMut(&[u8]),
    {
        self.try_for_each_read(|chunk| {
            action(chunk);
            Ok::<_, Error>(())
        })
    }

    fn for_each_group<F, G>(
        &mut self,
        group_size: usize,
        mut action: F,
        remainder: Option<G>,
    ) -> Result<()>
    where
        F: FnMut(&[u8]),
        G: FnOnce(&[u8]),
    {
        self.try_for_each_group(
            group_size,
            |group| {
                action(group);
                Ok::<_, Error>(())
            },
            remainder.map(|remainder| {
                move |rest: &[u8]| {
                    remainder(rest);
                    Ok::<_, Error>(())
                }
            }),
        )
    }
}

/// Suspension-capable twins of the [`BlockingSource`] read patterns.
///
/// Each operation is a single future that yields only while waiting on the
/// origin; callbacks run inline and never concurrently. Dropping the
/// future cancels the read: no further pulls are issued and no further
/// chunks are delivered.
#[cfg(feature = "async")]
pub trait AsyncSource: DataSource + Send {
    fn try_for_each_read_async<F, E>(
        &mut self,
        action: F,
    ) -> impl Future<Output = std::result::Result<(), E>> + Send
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E> + Send,
        E: From<Error> + Send;

    fn try_for_each_group_async<F, G, E>(
        &mut self,
        group_size: usize,
        action: F,
        remainder: Option<G>,
    ) -> impl Future<Output = std::result::Result<(), E>> + Send
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E> + Send,
        G: FnOnce(&[u8]) -> std::result::Result<(), E> + Send,
        E: From<Error> + Send;

    fn to_vec_async(&mut self) -> impl Future<Output = Result<Vec<u8>>> + Send;

    fn for_each_read_async<F>(&mut self, mut action: F) -> impl Future<Output = Result<()>> + Send
    where
        F: FnMut(&[u8]) + Send,
    {
        self.try_for_each_read_async(move |chunk| {
            action(chunk);
            Ok::<_, Error>(())
        })
    }

    fn for_each_group_async<F, G>(
        &mut self,
        group_size: usize,
        mut action: F,
        remainder: Option<G>,
    ) -> impl Future<Output = Result<()>> + Send
    where
        F: FnMut(&[u8]) + Send,
        G: FnOnce(&[u8]) + Send,
    {
        self.try_for_each_group_async(
            group_size,
            move |group| {
                action(group);
                Ok::<_, Error>(())
            },
            remainder.map(|remainder| {
                move |rest: &[u8]| {
                    remainder(rest);
                    Ok::<_, Error>(())
                }
            }),
        )
    }
}
