use bytes::Bytes;

use super::source::{BlockingSource, DataSource};
use crate::core::GroupSplitter;
use crate::data::BufferSize;
use crate::error::{Error, Result};

/// Data already held in memory.
///
/// Reads slice the backing [`Bytes`] instead of copying through a pull
/// buffer, but chunks still follow the configured buffer size so an
/// in-memory origin is indistinguishable from a streamed one. Reads do not
/// consume anything; every operation starts from the first byte.
#[derive(Debug, Clone)]
pub struct ArrayData {
    data:        Bytes,
    buffer_size: BufferSize,
}

impl ArrayData {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data:        data.into(),
            buffer_size: BufferSize::default(),
        }
    }

    pub fn as_bytes(&self) -> &Bytes { &self.data }

    pub fn into_bytes(self) -> Bytes { self.data }

    fn read_chunks<F, E>(&self, mut action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
    {
        for chunk in self.data.chunks(self.buffer_size.get()) {
            action(chunk)?;
        }
        tracing::debug!(bytes = self.data.len(), buffer_size = self.buffer_size.get(), "read in-memory data");
        Ok(())
    }

    fn read_groups<F, G, E>(
        &self,
        group_size: usize,
        mut action: F,
        remainder: Option<G>,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        G: FnOnce(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        let mut splitter = GroupSplitter::new(group_size)?;
        self.read_chunks(|chunk| splitter.push(chunk, &mut action))?;
        tracing::debug!(group_size, remainder = splitter.pending(), "grouped in-memory data");
        splitter.finish(remainder)
    }
}

impl From<Bytes> for ArrayData {
    fn from(data: Bytes) -> Self { Self::new(data) }
}

impl From<Vec<u8>> for ArrayData {
    fn from(data: Vec<u8>) -> Self { Self::new(data) }
}

impl From<&'static [u8]> for ArrayData {
    fn from(data: &'static [u8]) -> Self { Self::new(data) }
}

impl From<&'static str> for ArrayData {
    fn from(data: &'static str) -> Self { Self::new(data) }
}

impl DataSource for ArrayData {
    fn len(&self) -> Result<u64> { Ok(self.data.len() as u64) }

    fn buffer_size(&self) -> usize { self.buffer_size.get() }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        self.buffer_size = BufferSize::new(size)?;
        Ok(())
    }
}

impl BlockingSource for ArrayData {
    fn try_for_each_read<F, E>(&mut self, action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        self.read_chunks(action)
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
        self.read_groups(group_size, action, remainder)
    }

    fn to_vec(&mut self) -> Result<Vec<u8>> { Ok(self.data.to_vec()) }
}

#[cfg(feature = "async")]
impl super::source::AsyncSource for ArrayData {
    async fn try_for_each_read_async<F, E>(&mut self, action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E> + Send,
        E: From<Error> + Send,
    {
        self.read_chunks(action)
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
        self.read_groups(group_size, action, remainder)
    }

    async fn to_vec_async(&mut self) -> Result<Vec<u8>> { Ok(self.data.to_vec()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArrayData { ArrayData::from((0u8..10).collect::<Vec<_>>()) }

    #[test]
    fn test_len_and_default_buffer_size() {
        let data = sample();
        assert_eq!(data.len().unwrap(), 10);
        assert!(!data.is_empty().unwrap());
        assert_eq!(data.buffer_size(), 4096);
        assert!(ArrayData::from(&b""[..]).is_empty().unwrap());
    }

    #[test]
    fn test_chunks_follow_buffer_size() {
        let mut data = sample();
        data.set_buffer_size(4).unwrap();

        let mut chunks = Vec::new();
        data.for_each_read(|chunk| chunks.push(chunk.to_vec())).unwrap();
        assert_eq!(chunks, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
    }

    #[test]
    fn test_reads_are_repeatable() {
        let mut data = sample();
        let first = data.to_vec().unwrap();
        let second = data.to_vec().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len() as u64, data.len().unwrap());
    }

    #[test]
    fn test_chunks_borrow_backing_bytes() {
        let mut data = sample();
        data.set_buffer_size(3).unwrap();
        let range = data.as_bytes().as_ptr_range();
        data.for_each_read(|chunk| assert!(range.contains(&chunk.as_ptr()))).unwrap();
    }

    #[test]
    fn test_rejected_buffer_size_keeps_previous() {
        let mut data = sample();
        data.set_buffer_size(7).unwrap();
        assert!(data.set_buffer_size(0).is_err());
        assert_eq!(data.buffer_size(), 7);
    }
}
