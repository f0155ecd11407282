use alloc::vec::Vec;
use core::time::Duration;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::TgaError;
use crate::limits::Limits;
use crate::tga;
use crate::tga::header::Header;
use crate::warning::DecodeWarning;

/// Controls how the decoder treats damaged pixel data.
///
/// Header problems are always fatal; this only governs the pixel stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// A pixel stream that ends before width * height pixels is an error
    /// ([`TgaError::TruncatedPixelStream`]).
    Strict,

    /// Default behavior. A short pixel stream yields a partial image plus
    /// [`DecodeWarning::TruncatedPixelStream`]. Reject out-of-range palette
    /// indices.
    #[default]
    Standard,

    /// As `Standard`, and out-of-range palette indices decode as opaque
    /// black ([`DecodeWarning::PaletteIndicesOutOfRange`]).
    Permissive,
}

/// Builder for a single decode.
///
/// ```no_run
/// use zentga::{DecodeRequest, Limits, Permissiveness, Unstoppable};
///
/// let data: &[u8] = &[]; // TGA file bytes
/// let limits = Limits {
///     max_pixels: Some(16 * 1024 * 1024),
///     ..Default::default()
/// };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(Permissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), zentga::TgaError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> DecodeRequest<'a> {
    /// Decode the complete file in `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: Permissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Run the decode. `stop` is polled every 16 scanlines.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, TgaError> {
        #[cfg(feature = "std")]
        let started = std::time::Instant::now();

        let decoded = tga::decode(self.data, self.limits, self.permissiveness, &stop)?;

        #[cfg(feature = "std")]
        let elapsed = Some(started.elapsed());
        #[cfg(not(feature = "std"))]
        let elapsed = None;

        Ok(DecodeOutput {
            pixels: decoded.pixels,
            width: u32::from(decoded.header.width),
            height: u32::from(decoded.header.height),
            header: decoded.header,
            warnings: decoded.warnings,
            elapsed,
        })
    }
}

/// Decoded image: an RGBA8 framebuffer in display order (top row first).
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// The parsed header, for metadata display.
    pub header: Header,
    warnings: Vec<DecodeWarning>,
    elapsed: Option<Duration>,
}

impl DecodeOutput {
    /// RGBA8 pixels, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The RGBA value displayed at column `x`, row `y` (row 0 at the top).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(at..at + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Recoverable problems found while decoding.
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// Whether every pixel came from the file.
    pub fn is_complete(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, DecodeWarning::TruncatedPixelStream { .. }))
    }

    /// Wall-clock decode time. Only measured with the `std` feature.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Reinterpret pixel data as typed RGBA8 pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(
            self.as_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// Copy into an [`imgref::ImgVec`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}
