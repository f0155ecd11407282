use crate::error::TgaError;
use crate::tga::header::Header;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). TGA dimensions are 16-bit, so the
/// largest image a file can declare is 65535x65535 (about 17 GB of RGBA8);
/// set `max_memory_bytes` when decoding untrusted input.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the RGBA8 output buffer in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check the declared image dimensions.
    pub(crate) fn check_header(&self, header: &Header) -> Result<(), TgaError> {
        let width = u64::from(header.width);
        let height = u64::from(header.height);
        within("width", width, self.max_width)?;
        within("height", height, self.max_height)?;
        within("pixel count", width * height, self.max_pixels)
    }

    /// Check the size of the output allocation.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), TgaError> {
        within("output buffer size", bytes as u64, self.max_memory_bytes)
    }
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), TgaError> {
    match limit {
        Some(max) if value > max => Err(TgaError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
