//! TGA header and version-2 footer parsing.
//!
//! Layout of the fixed header (all multi-byte fields little-endian):
//!
//! | Offset | Size | Field                         |
//! |--------|------|-------------------------------|
//! | 0      | 1    | ID length                     |
//! | 1      | 1    | color map type                |
//! | 2      | 1    | image type                    |
//! | 3      | 2    | color map origin              |
//! | 5      | 2    | color map length              |
//! | 7      | 1    | color map entry size (bits)   |
//! | 8      | 2    | x origin                      |
//! | 10     | 2    | y origin                      |
//! | 12     | 2    | width                         |
//! | 14     | 2    | height                        |
//! | 16     | 1    | pixel depth (bits)            |
//! | 17     | 1    | image descriptor              |
//!
//! The ID field, color map and pixel data follow. Version-2 files end with a
//! 26-byte footer: extension area offset (u32), developer directory offset
//! (u32) and the signature `TRUEVISION-XFILE.\0`.

use core::ops::Range;

use crate::error::TgaError;
use crate::pixel::depth_to_bytes;

/// Size of the fixed header.
pub const HEADER_SIZE: usize = 18;
/// Size of the version-2 footer.
pub const FOOTER_SIZE: usize = 26;

const SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";
const DESCRIPTOR_TOP_TO_BOTTOM: u8 = 0x10;

/// Image type field (header byte 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageType {
    NoImageData,
    ColorMapped,
    TrueColor,
    GrayScale,
    RleColorMapped,
    RleTrueColor,
    RleGrayScale,
}

impl ImageType {
    pub fn from_u8(value: u8) -> Result<Self, TgaError> {
        Ok(match value {
            0 => Self::NoImageData,
            1 => Self::ColorMapped,
            2 => Self::TrueColor,
            3 => Self::GrayScale,
            9 => Self::RleColorMapped,
            10 => Self::RleTrueColor,
            11 => Self::RleGrayScale,
            other => return Err(TgaError::UnsupportedImageType(other)),
        })
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::NoImageData => 0,
            Self::ColorMapped => 1,
            Self::TrueColor => 2,
            Self::GrayScale => 3,
            Self::RleColorMapped => 9,
            Self::RleTrueColor => 10,
            Self::RleGrayScale => 11,
        }
    }

    /// Whether pixel data is run-length encoded (types 9, 10, 11).
    pub fn is_run_length(self) -> bool {
        matches!(
            self,
            Self::RleColorMapped | Self::RleTrueColor | Self::RleGrayScale
        )
    }

    /// Whether pixels are palette indices.
    pub fn is_color_mapped(self) -> bool {
        matches!(self, Self::ColorMapped | Self::RleColorMapped)
    }

    /// Human-readable name, e.g. "Run Length Encoded True Color".
    pub fn name(self) -> &'static str {
        match self {
            Self::NoImageData => "No Image Data",
            Self::ColorMapped => "Color Mapped",
            Self::TrueColor => "True Color",
            Self::GrayScale => "Gray Scale",
            Self::RleColorMapped => "Run Length Encoded Color Mapped",
            Self::RleTrueColor => "Run Length Encoded True Color",
            Self::RleGrayScale => "Run Length Encoded Gray Scale",
        }
    }
}

/// Color map type field (header byte 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMapType {
    Absent,
    Present,
}

impl ColorMapType {
    pub fn from_u8(value: u8) -> Result<Self, TgaError> {
        match value {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Present),
            other => Err(TgaError::UnsupportedColorMapType(other)),
        }
    }
}

/// File format version, detected from the trailing signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// TGA 1.0: no footer.
    V1,
    /// TGA 2.0: 26-byte footer with extension/developer offsets.
    V2,
}

impl Version {
    pub fn number(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }
}

/// Parsed TGA header with derived offsets.
///
/// Sizes are in bytes. Offsets are absolute positions in the file buffer the
/// header was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct Header {
    pub id_length: u8,
    pub color_map_type: ColorMapType,
    pub image_type: ImageType,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    /// Bytes per color map entry; 0 when there is no color map.
    pub color_map_entry_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    /// Bytes per stored pixel; 0 only for [`ImageType::NoImageData`] files
    /// that declare no depth.
    pub pixel_size: u8,
    pub descriptor: u8,
    pub version: Version,
    /// Extension area offset (version 2, non-zero only).
    pub extension_offset: Option<u32>,
    /// Developer directory offset (version 2, non-zero only).
    pub developer_directory_offset: Option<u32>,
    /// Start of the pixel data field.
    pub image_data_offset: usize,
    /// End of the pixel data field.
    pub footer_offset: usize,
}

impl Header {
    /// Parse and validate the header of a complete TGA file.
    pub fn parse(data: &[u8]) -> Result<Self, TgaError> {
        if data.len() < HEADER_SIZE {
            return Err(TgaError::TruncatedHeader { len: data.len() });
        }

        let id_length = data[0];
        let color_map_type = ColorMapType::from_u8(data[1])?;
        let image_type = ImageType::from_u8(data[2])?;
        let color_map_origin = u16::from_le_bytes([data[3], data[4]]);
        let color_map_length = u16::from_le_bytes([data[5], data[6]]);
        let x_origin = u16::from_le_bytes([data[8], data[9]]);
        let y_origin = u16::from_le_bytes([data[10], data[11]]);
        let width = u16::from_le_bytes([data[12], data[13]]);
        let height = u16::from_le_bytes([data[14], data[15]]);
        let descriptor = data[17];

        let color_map_entry_size = match color_map_type {
            ColorMapType::Absent => 0,
            ColorMapType::Present => {
                depth_to_bytes(data[7]).ok_or(TgaError::InvalidColorMapEntrySize(data[7]))?
            }
        };

        let pixel_size = match depth_to_bytes(data[16]) {
            Some(bytes) => bytes,
            None if image_type == ImageType::NoImageData => 0,
            None => return Err(TgaError::InvalidPixelSize(data[16])),
        };

        if image_type.is_color_mapped() && color_map_type == ColorMapType::Absent {
            return Err(TgaError::MissingColorMap);
        }

        let color_map_start = HEADER_SIZE + usize::from(id_length);
        let color_map_bytes = usize::from(color_map_length) * usize::from(color_map_entry_size);
        let image_data_offset = color_map_start + color_map_bytes;
        if image_data_offset > data.len() {
            return Err(TgaError::BufferOverrun {
                offset: HEADER_SIZE,
                len: image_data_offset - HEADER_SIZE,
                available: data.len(),
            });
        }

        let version = detect_version(data);
        let (extension_offset, developer_directory_offset) = match version {
            Version::V1 => (None, None),
            Version::V2 => {
                let footer = &data[data.len() - FOOTER_SIZE..];
                let ext = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
                let dev = u32::from_le_bytes([footer[4], footer[5], footer[6], footer[7]]);
                (non_zero(ext), non_zero(dev))
            }
        };

        let footer_offset = match (version, extension_offset) {
            (Version::V1, _) => data.len(),
            (Version::V2, Some(ext)) => ext as usize,
            (Version::V2, None) => data.len() - FOOTER_SIZE,
        };
        if footer_offset < image_data_offset || footer_offset > data.len() {
            return Err(TgaError::BufferOverrun {
                offset: image_data_offset,
                len: footer_offset.saturating_sub(image_data_offset),
                available: data.len(),
            });
        }

        Ok(Header {
            id_length,
            color_map_type,
            image_type,
            color_map_origin,
            color_map_length,
            color_map_entry_size,
            x_origin,
            y_origin,
            width,
            height,
            pixel_size,
            descriptor,
            version,
            extension_offset,
            developer_directory_offset,
            image_data_offset,
            footer_offset,
        })
    }

    /// Whether the first stored scanline is the top row (descriptor bit 4).
    pub fn is_top_to_bottom(&self) -> bool {
        self.descriptor & DESCRIPTOR_TOP_TO_BOTTOM != 0
    }

    pub fn is_run_length(&self) -> bool {
        self.image_type.is_run_length()
    }

    /// Byte range of the pixel data field.
    pub fn image_data_range(&self) -> Range<usize> {
        self.image_data_offset..self.footer_offset
    }

    /// Offset of the first color map entry.
    pub fn color_map_offset(&self) -> usize {
        HEADER_SIZE + usize::from(self.id_length)
    }

    /// The image identification field, borrowed from the file bytes.
    pub fn image_id<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(HEADER_SIZE..self.color_map_offset())
    }
}

/// Version 2 iff the buffer ends with the TGA 2.0 signature and is long
/// enough to hold the whole footer.
fn detect_version(data: &[u8]) -> Version {
    if data.len() >= FOOTER_SIZE && data.ends_with(SIGNATURE) {
        Version::V2
    } else {
        Version::V1
    }
}

fn non_zero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}
