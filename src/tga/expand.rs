//! Pixel expansion: stored pixels to an RGBA8 framebuffer.
//!
//! Every encoding walks its source in storage order and hands each pixel to
//! [`Canvas::put`], which owns the vertical orientation. Encodings differ
//! only in where source pixels come from (contiguous or run-length packets)
//! and how one pixel becomes RGBA (direct channels or a palette lookup).

use enough::Stop;

use super::colormap::ColorMap;
use super::header::{Header, ImageType};
use super::rle::RunLengthDecoder;
use crate::decode::Permissiveness;
use crate::error::TgaError;
use crate::pixel::{OPAQUE_BLACK, SourceLayout};

/// RGBA8 destination with the file's orientation applied at write time.
pub(crate) struct Canvas<'b> {
    buf: &'b mut [u8],
    width: usize,
    height: usize,
    top_to_bottom: bool,
}

impl<'b> Canvas<'b> {
    /// Wrap `buf` (width * height * 4 bytes) and fill it with opaque black,
    /// so pixels the source never supplies are still fully written.
    pub(crate) fn new(buf: &'b mut [u8], header: &Header) -> Self {
        for px in buf.chunks_exact_mut(4) {
            px.copy_from_slice(&OPAQUE_BLACK);
        }
        Self {
            buf,
            width: usize::from(header.width),
            height: usize::from(header.height),
            top_to_bottom: header.is_top_to_bottom(),
        }
    }

    /// Write the pixel stored at column `x` of stored row `y`.
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let row = if self.top_to_bottom {
            y
        } else {
            self.height - 1 - y
        };
        let at = (row * self.width + x) * 4;
        if let Some(dst) = self.buf.get_mut(at..at + 4) {
            dst.copy_from_slice(&rgba);
        }
    }

    pub(crate) fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// What one expansion pass produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Expanded {
    /// Pixels written from source data, in storage order.
    pub decoded: usize,
    /// Palette indices replaced with opaque black (permissive only).
    pub invalid_indices: usize,
    /// Source bytes consumed.
    pub consumed: usize,
}

/// The five stored-pixel encodings.
#[derive(Clone, Copy, Debug)]
pub(crate) enum PixelExpander<'a> {
    /// Uncompressed grayscale; first byte of each `stride`-byte pixel.
    GrayScale { stride: usize },
    /// Uncompressed direct color.
    TrueColor { layout: SourceLayout },
    /// Uncompressed palette indices, one per `stride`-byte pixel.
    ColorMapped {
        stride: usize,
        index_width: usize,
        map: ColorMap<'a>,
    },
    /// Run-length direct color or grayscale.
    RleTrueColor { layout: SourceLayout, stride: usize },
    /// Run-length palette indices.
    RleColorMapped { index_width: usize, map: ColorMap<'a> },
}

impl<'a> PixelExpander<'a> {
    /// Choose the expander for `header`. `None` for images without pixel data.
    pub(crate) fn select(header: &Header, data: &'a [u8]) -> Result<Option<Self>, TgaError> {
        let stride = usize::from(header.pixel_size);
        let index_width = if header.pixel_size == 1 { 1 } else { 2 };
        let direct = || {
            SourceLayout::for_color(header.pixel_size)
                .ok_or(TgaError::InvalidPixelSize(header.pixel_size.saturating_mul(8)))
        };
        let map = || ColorMap::new(data, header).ok_or(TgaError::MissingColorMap);

        let expander = match header.image_type {
            ImageType::NoImageData => return Ok(None),
            ImageType::GrayScale => Self::GrayScale { stride },
            ImageType::TrueColor => Self::TrueColor { layout: direct()? },
            ImageType::ColorMapped => Self::ColorMapped {
                stride,
                index_width,
                map: map()?,
            },
            ImageType::RleGrayScale => Self::RleTrueColor {
                layout: SourceLayout::Gray8,
                stride,
            },
            ImageType::RleTrueColor => Self::RleTrueColor {
                layout: direct()?,
                stride,
            },
            ImageType::RleColorMapped => Self::RleColorMapped {
                index_width,
                map: map()?,
            },
        };
        Ok(Some(expander))
    }

    /// Expand `pixels` (the pixel data field) into `canvas`.
    ///
    /// Stops early, without error, when the source runs out.
    pub(crate) fn expand(
        &self,
        pixels: &'a [u8],
        canvas: &mut Canvas<'_>,
        permissiveness: Permissiveness,
        stop: &dyn Stop,
    ) -> Result<Expanded, TgaError> {
        match *self {
            Self::GrayScale { stride } => {
                let chunks = pixels.chunks_exact(stride);
                let mut out = fill(chunks, canvas, stop, |px| Ok(SourceLayout::Gray8.to_rgba(px)))?;
                out.consumed = out.decoded * stride;
                Ok(out)
            }
            Self::TrueColor { layout } => {
                let stride = layout.bytes_per_pixel();
                let mut out = fill(pixels.chunks_exact(stride), canvas, stop, |px| {
                    Ok(layout.to_rgba(px))
                })?;
                out.consumed = out.decoded * stride;
                Ok(out)
            }
            Self::ColorMapped {
                stride,
                index_width,
                ref map,
            } => {
                let mut lookup = Lookup::new(map, index_width, permissiveness);
                let mut out = fill(pixels.chunks_exact(stride), canvas, stop, |px| {
                    lookup.rgba(px)
                })?;
                out.consumed = out.decoded * stride;
                out.invalid_indices = lookup.invalid;
                Ok(out)
            }
            Self::RleTrueColor { layout, stride } => {
                let mut packets = RunLengthDecoder::new(pixels, stride);
                let mut out = fill(packets.by_ref(), canvas, stop, |px| Ok(layout.to_rgba(px)))?;
                out.consumed = packets.position();
                Ok(out)
            }
            Self::RleColorMapped {
                index_width,
                ref map,
            } => {
                let mut lookup = Lookup::new(map, index_width, permissiveness);
                let mut packets = RunLengthDecoder::new(pixels, index_width);
                let mut out = fill(packets.by_ref(), canvas, stop, |px| lookup.rgba(px))?;
                out.consumed = packets.position();
                out.invalid_indices = lookup.invalid;
                Ok(out)
            }
        }
    }
}

/// Walk `source` in raster order, writing at most width * height pixels.
fn fill<'s, I, F>(
    source: I,
    canvas: &mut Canvas<'_>,
    stop: &dyn Stop,
    mut convert: F,
) -> Result<Expanded, TgaError>
where
    I: Iterator<Item = &'s [u8]>,
    F: FnMut(&[u8]) -> Result<[u8; 4], TgaError>,
{
    let width = canvas.width;
    let total = canvas.pixel_count();
    let (mut x, mut y) = (0usize, 0usize);
    let mut decoded = 0usize;

    for px in source.take(total) {
        if x == 0 && y % 16 == 0 {
            stop.check()?;
        }
        canvas.put(x, y, convert(px)?);
        decoded += 1;
        x += 1;
        if x == width {
            x = 0;
            y += 1;
        }
    }

    Ok(Expanded {
        decoded,
        ..Expanded::default()
    })
}

/// Palette lookup for one pass, counting tolerated bad indices.
struct Lookup<'m, 'a> {
    map: &'m ColorMap<'a>,
    index_width: usize,
    permissive: bool,
    invalid: usize,
}

impl<'m, 'a> Lookup<'m, 'a> {
    fn new(map: &'m ColorMap<'a>, index_width: usize, permissiveness: Permissiveness) -> Self {
        Self {
            map,
            index_width,
            permissive: permissiveness == Permissiveness::Permissive,
            invalid: 0,
        }
    }

    fn rgba(&mut self, px: &[u8]) -> Result<[u8; 4], TgaError> {
        let index = match (self.index_width, px) {
            (1, [i, ..]) => u16::from(*i),
            (_, [lo, hi, ..]) => u16::from_le_bytes([*lo, *hi]),
            _ => return Ok(OPAQUE_BLACK),
        };
        match self.map.rgba(index) {
            Err(TgaError::PaletteIndexOutOfRange { .. }) if self.permissive => {
                self.invalid += 1;
                Ok(OPAQUE_BLACK)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn header(descriptor: u8, width: u16, height: u16) -> Header {
        let mut data = vec![0u8; 18];
        data[2] = 2;
        data[12..14].copy_from_slice(&width.to_le_bytes());
        data[14..16].copy_from_slice(&height.to_le_bytes());
        data[16] = 24;
        data[17] = descriptor;
        Header::parse(&data).unwrap()
    }

    #[test]
    fn canvas_flips_bottom_to_top() {
        let h = header(0, 2, 2);
        let mut buf = vec![0u8; 16];
        let mut canvas = Canvas::new(&mut buf, &h);
        canvas.put(1, 0, [1, 2, 3, 4]);
        // stored row 0 is the bottom row
        assert_eq!(&buf[12..16], &[1, 2, 3, 4]);
        assert_eq!(&buf[0..4], &OPAQUE_BLACK);
    }

    #[test]
    fn canvas_keeps_top_to_bottom() {
        let h = header(0x10, 2, 2);
        let mut buf = vec![0u8; 16];
        let mut canvas = Canvas::new(&mut buf, &h);
        canvas.put(1, 0, [1, 2, 3, 4]);
        assert_eq!(&buf[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn fill_stops_at_pixel_count() {
        let h = header(0x10, 2, 1);
        let mut buf = vec![0u8; 8];
        let mut canvas = Canvas::new(&mut buf, &h);
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        let expander = PixelExpander::TrueColor {
            layout: SourceLayout::Bgr8,
        };
        let out = expander
            .expand(&src, &mut canvas, Permissiveness::Standard, &Unstoppable)
            .unwrap();
        assert_eq!(out.decoded, 2);
        assert_eq!(out.consumed, 6);
        assert_eq!(buf, [3, 2, 1, 255, 6, 5, 4, 255]);
    }
}
