//! # zentga
//!
//! Truevision TGA (Targa) decoder producing RGBA8 framebuffers.
//!
//! ## Supported Images
//!
//! - **Uncompressed**: true-color (16/24/32-bit), grayscale (8-bit) and
//!   color-mapped (8/16-bit indices into 8/16/24/32-bit palettes)
//! - **Run-length encoded**: the same three color models (image types 9–11)
//! - Both vertical orientations (descriptor bit 4), TGA 1.0 and 2.0 files
//!
//! Output is always RGBA8 in display order, top row first. Alpha is 255
//! unless the pixel (or palette entry) stores a fourth byte, which is copied
//! through unchanged.
//!
//! ## Damaged Input
//!
//! Header errors are fatal. Pixel data that ends early produces a partial
//! image with a [`DecodeWarning`] by default; pixels not present in the file
//! are opaque black. [`Permissiveness::Strict`] turns that into an error.
//! No read is ever trusted to the declared dimensions.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Extension area contents (only its offset is read)
//! - Alpha processing beyond passing the fourth byte through
//!
//! ## Usage
//!
//! ```no_run
//! use zentga::Unstoppable;
//!
//! let data: &[u8] = &[]; // your TGA bytes
//!
//! // Probe without decoding
//! let header = zentga::probe(data)?;
//! println!("{}x{} {}", header.width, header.height, header.image_type.name());
//!
//! let decoded = zentga::decode(data, Unstoppable)?;
//! assert_eq!(decoded.pixels().len(), decoded.width as usize * decoded.height as usize * 4);
//! for warning in decoded.warnings() {
//!     eprintln!("{warning}");
//! }
//! # Ok::<(), zentga::TgaError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;
mod tga;
mod warning;

mod decode;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest, Permissiveness};
pub use enough::{Stop, Unstoppable};
pub use error::TgaError;
pub use limits::Limits;
pub use tga::colormap::color_map_entry_offset;
pub use tga::header::{ColorMapType, FOOTER_SIZE, HEADER_SIZE, Header, ImageType, Version};
pub use warning::DecodeWarning;

/// Decode a complete TGA file with default settings.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, TgaError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse and validate the header without decoding pixels.
pub fn probe(data: &[u8]) -> Result<Header, TgaError> {
    Header::parse(data)
}
