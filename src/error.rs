use alloc::string::String;
use enough::StopReason;

/// Errors from TGA decoding.
///
/// Structural problems abort the decode. A pixel stream that ends early is
/// only an error under [`crate::Permissiveness::Strict`]; otherwise it is
/// reported as a [`crate::DecodeWarning`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TgaError {
    #[error("truncated header: need 18 bytes, got {len}")]
    TruncatedHeader { len: usize },

    #[error("unsupported color map type {0} (expected 0 or 1)")]
    UnsupportedColorMapType(u8),

    #[error("unsupported image type {0}")]
    UnsupportedImageType(u8),

    #[error("invalid pixel depth: {0} bits")]
    InvalidPixelSize(u8),

    #[error("invalid color map entry size: {0} bits")]
    InvalidColorMapEntrySize(u8),

    #[error("color-mapped image has no color map")]
    MissingColorMap,

    #[error("palette index {index} out of range (color map has {len} entries)")]
    PaletteIndexOutOfRange { index: u16, len: u16 },

    #[error("read of {len} bytes at offset {offset} overruns {available}-byte buffer")]
    BufferOverrun {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("pixel stream ended after {decoded} of {expected} pixels")]
    TruncatedPixelStream { decoded: usize, expected: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TgaError {
    fn from(r: StopReason) -> Self {
        TgaError::Cancelled(r)
    }
}
