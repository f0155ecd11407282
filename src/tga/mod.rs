//! Truevision TGA decoder (internal).
//!
//! Use top-level [`crate::decode`], [`crate::probe`] or [`crate::DecodeRequest`].

pub(crate) mod colormap;
pub(crate) mod expand;
pub(crate) mod header;
pub(crate) mod rle;

use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use crate::decode::Permissiveness;
use crate::error::TgaError;
use crate::limits::Limits;
use crate::warning::DecodeWarning;
use expand::{Canvas, PixelExpander};
use header::Header;

/// Decoded framebuffer plus what went wrong along the way.
pub(crate) struct Decoded {
    pub header: Header,
    pub pixels: Vec<u8>,
    pub warnings: Vec<DecodeWarning>,
}

/// Decode a complete TGA file to RGBA8.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: Permissiveness,
    stop: &dyn Stop,
) -> Result<Decoded, TgaError> {
    let header = Header::parse(data)?;
    log::debug!(
        "tga: {} {}x{}, {} bytes/pixel, v{}, pixel data {:?}",
        header.image_type.name(),
        header.width,
        header.height,
        header.pixel_size,
        header.version.number(),
        header.image_data_range(),
    );

    let out_bytes = output_size(&header)?;
    if let Some(limits) = limits {
        limits.check_header(&header)?;
        limits.check_memory(out_bytes)?;
    }
    stop.check()?;

    let mut pixels = vec![0u8; out_bytes];
    let mut canvas = Canvas::new(&mut pixels, &header);
    let mut warnings = Vec::new();

    if let Some(expander) = PixelExpander::select(&header, data)? {
        let range = header.image_data_range();
        let available = data.len();
        let source = data.get(range.clone()).ok_or(TgaError::BufferOverrun {
            offset: range.start,
            len: range.len(),
            available,
        })?;

        let expected = canvas.pixel_count();
        let expanded = expander.expand(source, &mut canvas, permissiveness, stop)?;

        if expanded.decoded < expected {
            if permissiveness == Permissiveness::Strict {
                return Err(TgaError::TruncatedPixelStream {
                    decoded: expanded.decoded,
                    expected,
                });
            }
            log::warn!(
                "tga: pixel stream ended after {} of {expected} pixels",
                expanded.decoded
            );
            warnings.push(DecodeWarning::TruncatedPixelStream {
                decoded: expanded.decoded,
                expected,
            });
        } else if expanded.consumed < source.len() {
            log::debug!(
                "tga: {} bytes after the last pixel ignored",
                source.len() - expanded.consumed
            );
        }

        if expanded.invalid_indices > 0 {
            let palette_len = header.color_map_length;
            log::warn!(
                "tga: {} palette indices out of range (color map has {palette_len} entries)",
                expanded.invalid_indices
            );
            warnings.push(DecodeWarning::PaletteIndicesOutOfRange {
                count: expanded.invalid_indices,
                palette_len,
            });
        }
    }

    Ok(Decoded {
        header,
        pixels,
        warnings,
    })
}

fn output_size(header: &Header) -> Result<usize, TgaError> {
    usize::from(header.width)
        .checked_mul(usize::from(header.height))
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(TgaError::DimensionsTooLarge {
            width: u32::from(header.width),
            height: u32::from(header.height),
        })
}
