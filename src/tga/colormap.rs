//! Palette index resolution.
//!
//! Entries are never copied out of the file: an index resolves to a byte
//! offset into the source buffer and the entry is read in place.

use crate::error::TgaError;
use crate::pixel::SourceLayout;
use crate::tga::header::Header;

/// Byte offset of palette entry `index`.
///
/// `18 + id_length + color_map_origin + entry_size * index`. The origin is
/// applied as a byte offset. No bounds checking: callers must check
/// `index < color_map_length` and that the entry lies inside the buffer.
pub fn color_map_entry_offset(header: &Header, index: u16) -> usize {
    header.color_map_offset()
        + usize::from(header.color_map_origin)
        + usize::from(header.color_map_entry_size) * usize::from(index)
}

/// Bounds-checked view of the color map inside the file buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ColorMap<'a> {
    data: &'a [u8],
    base: usize,
    entry_size: usize,
    len: u16,
    layout: SourceLayout,
}

impl<'a> ColorMap<'a> {
    /// Returns `None` when the header declares no usable color map.
    pub(crate) fn new(data: &'a [u8], header: &Header) -> Option<Self> {
        let layout = SourceLayout::for_color(header.color_map_entry_size)?;
        Some(Self {
            data,
            base: color_map_entry_offset(header, 0),
            entry_size: usize::from(header.color_map_entry_size),
            len: header.color_map_length,
            layout,
        })
    }

    /// Validate `index` and return the offset of its entry.
    pub(crate) fn resolve(&self, index: u16) -> Result<usize, TgaError> {
        if index >= self.len {
            return Err(TgaError::PaletteIndexOutOfRange {
                index,
                len: self.len,
            });
        }
        let offset = self.base + self.entry_size * usize::from(index);
        if offset + self.entry_size > self.data.len() {
            return Err(TgaError::BufferOverrun {
                offset,
                len: self.entry_size,
                available: self.data.len(),
            });
        }
        Ok(offset)
    }

    /// The raw bytes of entry `index`.
    pub(crate) fn entry(&self, index: u16) -> Result<&'a [u8], TgaError> {
        let offset = self.resolve(index)?;
        Ok(&self.data[offset..offset + self.entry_size])
    }

    /// Entry `index` converted to RGBA8.
    pub(crate) fn rgba(&self, index: u16) -> Result<[u8; 4], TgaError> {
        Ok(self.layout.to_rgba(self.entry(index)?))
    }
}
