use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Pull granularity used when no buffer size is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Length of the temporary buffer a source pulls its origin through.
///
/// Always greater than zero; a zero size is rejected on construction, which is
/// also how configuration files are validated when the `serde` feature is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub struct BufferSize(NonZeroUsize);

impl BufferSize {
    pub const DEFAULT: Self = match NonZeroUsize::new(DEFAULT_BUFFER_SIZE) {
        Some(size) => Self(size),
        None => unreachable!(),
    };

    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size).map(Self).ok_or_else(|| Error::zero("buffer_size"))
    }

    pub const fn get(self) -> usize { self.0.get() }
}

impl Default for BufferSize {
    fn default() -> Self { Self::DEFAULT }
}

impl TryFrom<usize> for BufferSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self> { Self::new(size) }
}

impl From<BufferSize> for usize {
    fn from(size: BufferSize) -> Self { size.get() }
}

impl fmt::Display for BufferSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Caller-facing configuration of a data source.
///
/// # Examples
///
/// ```
/// use unified_data::ReadOptions;
///
/// let options = ReadOptions::new().buffer_size(64 * 1024).unwrap();
/// assert_eq!(options.buffer_size.get(), 65536);
///
/// assert!(ReadOptions::new().buffer_size(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReadOptions {
    /// Chunk length used when pulling from the origin.
    ///
    /// Default: 4096
    pub buffer_size: BufferSize,
}

impl ReadOptions {
    pub fn new() -> Self { Self::default() }

    pub fn buffer_size(mut self, size: usize) -> Result<Self> {
        self.buffer_size = BufferSize::new(size)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_buffer_size() {
        assert_eq!(BufferSize::default().get(), 4096);
        assert_eq!(ReadOptions::new().buffer_size.get(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_zero_buffer_size_rejected() {
        let err = BufferSize::new(0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { name: "buffer_size" }));
        assert!(BufferSize::try_from(0usize).is_err());
    }

    #[test]
    fn test_builder_keeps_value_on_error() {
        let options = ReadOptions::new().buffer_size(16).unwrap();
        assert!(options.buffer_size(0).is_err());
        assert_eq!(options.buffer_size.get(), 16);
    }

    #[test]
    fn test_conversions() {
        let size = BufferSize::try_from(512usize).unwrap();
        assert_eq!(usize::from(size), 512);
        assert_eq!(size.to_string(), "512");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_config() {
        let options: ReadOptions = serde_json::from_str(r#"{ "buffer_size": 8192 }"#).unwrap();
        assert_eq!(options.buffer_size.get(), 8192);

        let options: ReadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.buffer_size, BufferSize::DEFAULT);

        let result = serde_json::from_str::<ReadOptions>(r#"{ "buffer_size": 0 }"#);
        assert!(result.is_err());
    }
}
