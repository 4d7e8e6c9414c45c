use crate::error::{Error, Result};

/// Re-segments a sequence of arbitrarily sized chunks into groups of a fixed
/// size.
///
/// Groups that lie entirely inside a pushed chunk are handed out as
/// sub-slices of that chunk. Only a group straddling two chunks is assembled
/// in the internal carry buffer, so a splitter fed with chunk sizes that are a
/// multiple of the group size never copies.
///
/// ```
/// use unified_data::GroupSplitter;
///
/// let mut groups = Vec::new();
/// let mut splitter = GroupSplitter::new(4).unwrap();
/// for chunk in [&b"abcde"[..], &b"fgh"[..], &b"ij"[..]] {
///     splitter
///         .push(chunk, |group| {
///             groups.push(group.to_vec());
///             Ok::<_, unified_data::Error>(())
///         })
///         .unwrap();
/// }
///
/// let mut tail = Vec::new();
/// splitter
///     .finish(Some(|rest: &[u8]| {
///         tail.extend_from_slice(rest);
///         Ok::<_, unified_data::Error>(())
///     }))
///     .unwrap();
///
/// assert_eq!(groups, [b"abcd".to_vec(), b"efgh".to_vec()]);
/// assert_eq!(tail, b"ij");
/// ```
#[derive(Debug)]
pub struct GroupSplitter {
    size:  usize,
    carry: Vec<u8>,
}

impl GroupSplitter {
    pub fn new(group_size: usize) -> Result<Self> {
        if group_size == 0 {
            return Err(Error::zero("group_size"));
        }

        Ok(Self {
            size:  group_size,
            carry: Vec::new(),
        })
    }

    pub fn group_size(&self) -> usize { self.size }

    /// Bytes held back because they do not complete a group yet.
    ///
    /// Always strictly less than [`group_size`](Self::group_size).
    pub fn pending(&self) -> usize { self.carry.len() }

    /// Feed the next chunk, invoking `action` once for every group it
    /// completes.
    ///
    /// Stops at the first error returned by `action`; the splitter should be
    /// discarded afterwards.
    pub fn push<F, E>(&mut self, chunk: &[u8], mut action: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[u8]) -> std::result::Result<(), E>,
    {
        let mut chunk = chunk;

        if !self.carry.is_empty() {
            let take = (self.size - self.carry.len()).min(chunk.len());
            self.carry.extend_from_slice(&chunk[..take]);
            chunk = &chunk[take..];

            if self.carry.len() < self.size {
                return Ok(());
            }

            action(&self.carry)?;
            self.carry.clear();
        }

        let mut groups = chunk.chunks_exact(self.size);
        for group in &mut groups {
            action(group)?;
        }

        let rest = groups.remainder();
        self.carry.extend_from_slice(rest);

        Ok(())
    }

    /// Hand the trailing partial group to `remainder`.
    ///
    /// `remainder` runs at most once and only when bytes are pending; passing
    /// `None` drops them.
    pub fn finish<G, E>(self, remainder: Option<G>) -> std::result::Result<(), E>
    where
        G: FnOnce(&[u8]) -> std::result::Result<(), E>,
    {
        match remainder {
            Some(remainder) if !self.carry.is_empty() => remainder(&self.carry),
            _ => Ok(()),
        }
    }
}
