/// Recoverable anomalies found while decoding.
///
/// The image is still returned when one of these is reported; pixels that
/// could not be decoded are left opaque black.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeWarning {
    /// The pixel stream ended before every pixel was produced.
    ///
    /// Pixels are filled in storage order, so the first `decoded` stored
    /// pixels are present and the rest are opaque black.
    TruncatedPixelStream { decoded: usize, expected: usize },

    /// Palette indices at or beyond the color map length were replaced with
    /// opaque black. Only reported under [`crate::Permissiveness::Permissive`].
    PaletteIndicesOutOfRange { count: usize, palette_len: u16 },
}

impl core::fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TruncatedPixelStream { decoded, expected } => {
                write!(f, "pixel stream ended after {decoded} of {expected} pixels")
            }
            Self::PaletteIndicesOutOfRange { count, palette_len } => write!(
                f,
                "{count} palette indices out of range (color map has {palette_len} entries)"
            ),
        }
    }
}
