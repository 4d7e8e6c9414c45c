use std::io::{Read, Seek, SeekFrom};

use super::blocking;
use super::source::{BlockingSource, DataSource};
use crate::data::BufferSize;
use crate::error::{Error, Result};

/// Data pulled from a reader owned by the caller.
///
/// The reader is only ever read from, never closed; pass `&mut reader` to
/// keep it, or take it back with [`into_inner`](Self::into_inner). Each read
/// operation consumes the reader from its current position to the end.
///
/// Blocking operations require `R: std::io::Read`, async ones
/// `R: tokio::io::AsyncRead`.
#[derive(Debug)]
pub struct StreamData<R> {
    reader:      R,
    len:         Option<u64>,
    buffer_size: BufferSize,
}

impl<R> StreamData<R> {
    /// Wrap a reader of unknown length; [`len`](DataSource::len) will report
    /// [`Error::Unsupported`].
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            len: None,
            buffer_size: BufferSize::default(),
        }
    }

    /// Wrap a reader that is known to yield exactly `len` bytes.
    pub fn with_len(reader: R, len: u64) -> Self {
        Self {
            len: Some(len),
            ..Self::new(reader)
        }
    }

    pub fn get_ref(&self) -> &R { &self.reader }

    pub fn get_mut(&mut self) -> &mut R { &mut self.reader }

    pub fn into_inner(self) -> R { self.reader }

    fn finished(&self, read: u64) {
        if let Some(len) = self.len
            && len != read
        {
            tracing::warn!(declared = len, read, "stream length differs from declared length");
        }
        tracing::debug!(bytes = read, buffer_size = self.buffer_size.get(), "stream read completed");
    }
}

impl<R: Seek> StreamData<R> {
    /// Wrap a seekable reader, taking the length from the bytes remaining
    /// after its current position. The position is restored.
    pub fn from_seekable(mut reader: R) -> Result<Self> {
        let start = reader.stream_position()?;
        let end = reader.seek(SeekFrom::End(0))?;
        if end != start {
            reader.seek(SeekFrom::Start(start))?;
        }
        Ok(Self::with_len(reader, end.saturating_sub(start)))
    }
}

impl<R> DataSource for StreamData<R> {
    fn len(&self) -> Result<u64> {
        self.len.ok_or(Error::Unsupported("length of a stream that is neither seekable nor declared"))
    }

    fn buffer_size(&self) -> usize { self.buffer_size.get() }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        self.buffer_size = BufferSize::new(size)?;
        Ok(())
    }
}

impl<R: Read> BlockingSource for StreamData<R> {
    fn try_for_each_read<F, E>(&mut self, action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let read = blocking::read_chunks(&mut self.reader, self.buffer_size.get(), action)?;
        self.finished(read);
        Ok(())
    }

    fn try_for_each_group<F, G, E>(
        &mut self,
        group_size: usize,
        action: F,
        remainder: Option<G>,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        G: FnOnce(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let read = blocking::read_groups(
            &mut self.reader,
            self.buffer_size.get(),
            group_size,
            action,
            remainder,
        )?;
        self.finished(read);
        Ok(())
    }

    fn to_vec(&mut self) -> Result<Vec<u8>> {
        let out = blocking::read_all(&mut self.reader, self.buffer_size.get(), self.len)?;
        self.finished(out.len() as u64);
        Ok(out)
    }
}

#[cfg(feature = "async")]
mod async_impl {
    use bytes::{Bytes, BytesMut};
    use futures_util::Stream;
    use tokio::io::{AsyncRead, AsyncSeek, AsyncSeekExt};

    use super::*;
    use crate::effects::nonblocking;
    use crate::effects::source::AsyncSource;

    impl<R: AsyncSeek + Unpin> StreamData<R> {
        /// Async twin of [`from_seekable`](StreamData::from_seekable).
        pub async fn from_async_seekable(mut reader: R) -> Result<Self> {
            let start = reader.stream_position().await?;
            let end = reader.seek(SeekFrom::End(0)).await?;
            if end != start {
                reader.seek(SeekFrom::Start(start)).await?;
            }
            Ok(Self::with_len(reader, end.saturating_sub(start)))
        }
    }

    impl<R: AsyncRead + Unpin> StreamData<R> {
        /// Turn the source into a stream of owned chunks of
        /// [`buffer_size`](DataSource::buffer_size) bytes, the last one
        /// possibly shorter.
        ///
        /// The stream ends after the first error.
        pub fn into_chunk_stream(self) -> impl Stream<Item = Result<Bytes>> {
            let buffer_size = self.buffer_size.get();
            futures_util::stream::unfold(Some(self.reader), move |reader| async move {
                let mut reader = reader?;
                let mut buf = BytesMut::zeroed(buffer_size);
                match nonblocking::fill(&mut reader, &mut buf).await {
                    Ok(0) => None,
                    Ok(n) => {
                        buf.truncate(n);
                        let next = (n == buffer_size).then_some(reader);
                        Some((Ok(buf.freeze()), next))
                    }
                    Err(e) => Some((Err(Error::from(e)), None)),
                }
            })
        }
    }

    impl<R> AsyncSource for StreamData<R>
    where
        R: AsyncRead + Unpin + Send,
    {
        async fn try_for_each_read_async<F, E>(&mut self, action: F) -> std::result::Result<(), E>
        where
            F: FnMut(&[u8]) -> std::result::Result<(), E> + Send,
            E: From<Error> + Send,
        {
            let read =
                nonblocking::read_chunks(&mut self.reader, self.buffer_size.get(), action).await?;
            self.finished(read);
            Ok(())
        }

        async fn try_for_each_group_async<F, G, E>(
            &mut self,
            group_size: usize,
            action: F,
            remainder: Option<G>,
        ) -> std::result::Result<(), E>
        where
            F: FnMut(&[u8]) -> std::result::Result<(), E> + Send,
            G: FnOnce(&[u8]) -> std::result::Result<(), E> + Send,
            E: From<Error> + Send,
        {
            let read = nonblocking::read_groups(
                &mut self.reader,
                self.buffer_size.get(),
                group_size,
                action,
                remainder,
            )
            .await?;
            self.finished(read);
            Ok(())
        }

        async fn to_vec_async(&mut self) -> Result<Vec<u8>> {
            let out =
                nonblocking::read_all(&mut self.reader, self.buffer_size.get(), self.len).await?;
            self.finished(out.len() as u64);
            Ok(out)
        }
    }
}
