//! Pull loops over `std::io::Read`.

use std::io::{self, Read};

use crate::core::GroupSplitter;
use crate::error::{Error, Result};

/// Upper bound on the capacity reserved up front from a declared length.
pub(crate) const MAX_PREALLOCATE: u64 = 64 * 1024 * 1024;

/// Read until `buf` is full or the origin is exhausted.
///
/// Only the final pull of a stream comes back short, so chunk boundaries do
/// not depend on how the origin fragments its reads.
pub(crate) fn fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

pub(crate) fn read_chunks<R, F, E>(
    reader: &mut R,
    buffer_size: usize,
    mut action: F,
) -> std::result::Result<u64, E>
where
    R: Read + ?Sized,
    F: FnMut(&[u8]) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total = 0u64;

    loop {
        let n = fill(reader, &mut buffer).map_err(Error::from)?;
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

pub(crate) fn read_groups<R, F, G, E>(
    reader: &mut R,
    buffer_size: usize,
    group_size: usize,
    mut action: F,
    remainder: Option<G>,
) -> std::result::Result<u64, E>
where
    R: Read + ?Sized,
    F: FnMut(&[u8]) -> std::result::Result<(), E>,
    G: FnOnce(&[u8]) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let mut splitter = GroupSplitter::new(group_size)?;
    let total = read_chunks(reader, buffer_size, |chunk| splitter.push(chunk, &mut action))?;
    splitter.finish(remainder)?;
    Ok(total)
}

pub(crate) fn read_all<R>(reader: &mut R, buffer_size: usize, len_hint: Option<u64>) -> Result<Vec<u8>>
where
    R: Read + ?Sized,
{
    let capacity = len_hint.map_or(0, |len| len.min(MAX_PREALLOCATE) as usize);
    let mut out = Vec::with_capacity(capacity);
    read_chunks(reader, buffer_size, |chunk| {
        out.extend_from_slice(chunk);
        Ok::<_, Error>(())
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Hands out at most `step` bytes per `read` call and is interrupted once.
    struct Trickle {
        data:        Vec<u8>,
        pos:         usize,
        step:        usize,
        interrupted: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn chunk_sizes<R: Read>(mut reader: R, buffer_size: usize) -> Vec<usize> {
        let mut sizes = Vec::new();
        read_chunks(&mut reader, buffer_size, |chunk| {
            sizes.push(chunk.len());
            Ok::<_, Error>(())
        })
        .unwrap();
        sizes
    }

    #[test]
    fn test_fill_retries_interrupted_and_short_reads() {
        let mut reader = Trickle {
            data:        (0..10).collect(),
            pos:         0,
            step:        3,
            interrupted: false,
        };
        let mut buf = [0u8; 8];
        assert_eq!(fill(&mut reader, &mut buf).unwrap(), 8);
        assert_eq!(buf, [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(fill(&mut reader, &mut buf).unwrap(), 2);
    }

    #[test]
    fn test_chunk_boundaries_independent_of_read_fragmentation() {
        let trickle = Trickle {
            data:        vec![1; 10],
            pos:         0,
            step:        1,
            interrupted: false,
        };
        assert_eq!(chunk_sizes(trickle, 4), vec![4, 4, 2]);
        assert_eq!(chunk_sizes(Cursor::new(vec![1; 10]), 4), vec![4, 4, 2]);
    }

    #[test]
    fn test_empty_reader_pulls_nothing() {
        assert!(chunk_sizes(io::empty(), 4).is_empty());
    }

    #[test]
    fn test_io_error_propagates_unchanged() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"))
            }
        }

        let err = read_chunks(&mut Broken, 4, |_| Ok::<_, Error>(())).unwrap_err();
        match err {
            Error::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::ConnectionReset);
                assert_eq!(e.to_string(), "reset by peer");
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_group_size_fails_before_pulling() {
        let mut reader = Cursor::new(vec![0u8; 4]);
        let err = read_groups(
            &mut reader,
            4,
            0,
            |_| Ok::<_, Error>(()),
            None::<fn(&[u8]) -> Result<()>>,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_all_ignores_oversized_hint() {
        let mut reader = Cursor::new(vec![9u8; 5]);
        let out = read_all(&mut reader, 2, Some(u64::MAX)).unwrap();
        assert_eq!(out, vec![9; 5]);
    }
}
