use std::io::Read;

use bytes::Bytes;

use super::array::ArrayData;
use super::source::{BlockingSource, DataSource};
use super::stream::StreamData;
use crate::error::{Error, Result};

/// Either kind of built-in origin, chosen at runtime.
///
/// ```
/// use unified_data::{BlockingSource, DataSource, UnifiedData};
///
/// fn open(input: Option<&'static [u8]>) -> UnifiedData<std::io::Stdin> {
///     match input {
///         Some(bytes) => UnifiedData::from_bytes(bytes),
///         None => UnifiedData::from_reader(std::io::stdin()),
///     }
/// }
///
/// let mut data = open(Some(b"abcdefg"));
/// data.set_buffer_size(3).unwrap();
///
/// let mut sizes = Vec::new();
/// data.for_each_read(|chunk| sizes.push(chunk.len())).unwrap();
/// assert_eq!(sizes, [3, 3, 1]);
/// ```
#[derive(Debug)]
pub enum UnifiedData<R> {
    Array(ArrayData),
    Stream(StreamData<R>),
}

impl<R> UnifiedData<R> {
    pub fn from_bytes(data: impl Into<Bytes>) -> Self { Self::Array(ArrayData::new(data)) }

    pub fn from_reader(reader: R) -> Self { Self::Stream(StreamData::new(reader)) }
}

impl<R> From<ArrayData> for UnifiedData<R> {
    fn from(data: ArrayData) -> Self { Self::Array(data) }
}

impl<R> From<StreamData<R>> for UnifiedData<R> {
    fn from(data: StreamData<R>) -> Self { Self::Stream(data) }
}

impl<R> DataSource for UnifiedData<R> {
    fn len(&self) -> Result<u64> {
        match self {
            Self::Array(data) => data.len(),
            Self::Stream(data) => data.len(),
        }
    }

    fn buffer_size(&self) -> usize {
        match self {
            Self::Array(data) => data.buffer_size(),
            Self::Stream(data) => data.buffer_size(),
        }
    }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        match self {
            Self::Array(data) => data.set_buffer_size(size),
            Self::Stream(data) => data.set_buffer_size(size),
        }
    }
}

impl<R: Read> BlockingSource for UnifiedData<R> {
    fn try_for_each_read<F, E>(&mut self, action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
        E: From<Error>,
    {
        match self {
            Self::Array(data) => data.try_for_each_read(action),
            Self::Stream(data) => data.try_for_each_read(action),
        }
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
        match self {
            Self::Array(data) => data.try_for_each_group(group_size, action, remainder),
            Self::Stream(data) => data.try_for_each_group(group_size, action, remainder),
        }
    }

    fn to_vec(&mut self) -> Result<Vec<u8>> {
        match self {
            Self::Array(data) => data.to_vec(),
            Self::Stream(data) => data.to_vec(),
        }
    }
}

#[cfg(feature = "async")]
impl<R> super::source::AsyncSource for UnifiedData<R>
where
    R: tokio::io::AsyncRead + Unpin + Send,
{
    async fn try_for_each_read_async<F, E>(&mut self, action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E> + Send,
        E: From<Error> + Send,
    {
        match self {
            Self::Array(data) => data.try_for_each_read_async(action).await,
            Self::Stream(data) => data.try_for_each_read_async(action).await,
        }
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
        match self {
            Self::Array(data) => data.try_for_each_group_async(group_size, action, remainder).await,
            Self::Stream(data) => data.try_for_each_group_async(group_size, action, remainder).await,
        }
    }

    async fn to_vec_async(&mut self) -> Result<Vec<u8>> {
        match self {
            Self::Array(data) => data.to_vec_async().await,
            Self::Stream(data) => data.to_vec_async().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_variants_agree() {
        let bytes: Vec<u8> = (0..=255).collect();
        let mut array: UnifiedData<Cursor<Vec<u8>>> = UnifiedData::from_bytes(bytes.clone());
        let mut stream = UnifiedData::from(StreamData::with_len(Cursor::new(bytes.clone()), 256));

        for data in [&mut array, &mut stream] {
            data.set_buffer_size(100).unwrap();
            assert_eq!(data.len().unwrap(), 256);

            let mut groups = 0;
            let mut tail = 0;
            data.for_each_group(16, |_| groups += 1, Some(|rest: &[u8]| tail = rest.len()))
                .unwrap();
            assert_eq!((groups, tail), (16, 0));
        }
    }

    #[test]
    fn test_stream_variant_length_unsupported() {
        let data = UnifiedData::from_reader(std::io::empty());
        assert!(matches!(data.len(), Err(Error::Unsupported(_))));
    }
}
