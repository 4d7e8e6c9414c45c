//! Pull loops over `tokio::io::AsyncRead`.
//!
//! Mirrors `blocking` pull for pull; the only suspension points are the reads
//! on the origin.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::blocking::MAX_PREALLOCATE;
use crate::core::GroupSplitter;
use crate::error::{Error, Result};

pub(crate) async fn fill<R>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

pub(crate) async fn read_chunks<R, F, E>(
    reader: &mut R,
    buffer_size: usize,
    mut action: F,
) -> std::result::Result<u64, E>
where
    R: AsyncRead + Unpin + ?Sized,
    F: FnMut(&[u8]) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = fill(reader, &mut buffer).await.map_err(Error::from)?;
        if n == 0 {
            break;
        }

        tracing::trace!(bytes = n, offset = total, "pulled chunk");
        action(&buffer[..n])?;
        total += n as u64;

        if n < buffer_size {
            break;
        }
    }

    Ok(total)
}

pub(crate) async fn read_groups<R, F, G, E>(
    reader: &mut R,
    buffer_size: usize,
    group_size: usize,
    mut action: F,
    remainder: Option<G>,
) -> std::result::Result<u64, E>
where
    R: AsyncRead + Unpin + ?Sized,
    F: FnMut(&[u8]) -> std::result::Result<(), E>,
    G: FnOnce(&[u8]) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let mut splitter = GroupSplitter::new(group_size)?;
    let total = read_chunks(reader, buffer_size, |chunk| splitter.push(chunk, &mut action)).await?;
    splitter.finish(remainder)?;
    Ok(total)
}

pub(crate) async fn read_all<R>(reader: &mut R, buffer_size: usize, len_hint: Option<u64>) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let capacity = len_hint.map_or(0, |len| len.min(MAX_PREALLOCATE) as usize);
    let mut out = Vec::with_capacity(capacity);
    read_chunks(reader, buffer_size, |chunk| {
        out.extend_from_slice(chunk);
        Ok::<_, Error>(())
    })
    .await?;
    Ok(out)
}
