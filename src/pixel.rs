/// On-disk channel layout of one stored pixel or color map entry.
///
/// TGA stores color little-endian, so multi-channel entries arrive as
/// B,G,R(,A). Every layout converts to R,G,B,A; alpha is 255 unless the
/// layout carries a fourth byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SourceLayout {
    /// One gray byte, replicated to R, G and B.
    Gray8,
    /// 16-bit little-endian X1R5G5B5. The top bit is not treated as alpha.
    Xrgb1555,
    /// B, G, R.
    Bgr8,
    /// B, G, R, A. Alpha is passed through.
    Bgra8,
}

impl SourceLayout {
    /// Layout for a color pixel or color map entry of `bytes` width.
    pub(crate) fn for_color(bytes: u8) -> Option<Self> {
        match bytes {
            1 => Some(Self::Gray8),
            2 => Some(Self::Xrgb1555),
            3 => Some(Self::Bgr8),
            4 => Some(Self::Bgra8),
            _ => None,
        }
    }

    /// Bytes per stored pixel for this layout.
    pub(crate) fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Xrgb1555 => 2,
            Self::Bgr8 => 3,
            Self::Bgra8 => 4,
        }
    }

    /// Convert one stored pixel to RGBA8.
    ///
    /// `src` may be longer than the layout (grayscale pixels wider than one
    /// byte use only the first). A short `src` yields opaque black.
    #[inline]
    pub(crate) fn to_rgba(self, src: &[u8]) -> [u8; 4] {
        match (self, src) {
            (Self::Gray8, [v, ..]) => [*v, *v, *v, 255],
            (Self::Xrgb1555, [lo, hi, ..]) => {
                let v = u16::from_le_bytes([*lo, *hi]);
                [
                    widen5((v >> 10) as u8),
                    widen5((v >> 5) as u8),
                    widen5(v as u8),
                    255,
                ]
            }
            (Self::Bgr8, [b, g, r, ..]) => [*r, *g, *b, 255],
            (Self::Bgra8, [b, g, r, a, ..]) => [*r, *g, *b, *a],
            _ => OPAQUE_BLACK,
        }
    }
}

pub(crate) const OPAQUE_BLACK: [u8; 4] = [0, 0, 0, 255];

/// Scale a 5-bit channel to 8 bits by bit replication.
#[inline]
fn widen5(v: u8) -> u8 {
    let v = v & 0x1F;
    (v << 3) | (v >> 2)
}

/// Convert a pixel depth in bits to whole bytes.
///
/// 15-bit depths are stored in two bytes.
pub(crate) fn depth_to_bytes(bits: u8) -> Option<u8> {
    match bits {
        8 => Some(1),
        15 | 16 => Some(2),
        24 => Some(3),
        32 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_is_reversed() {
        assert_eq!(SourceLayout::Bgr8.to_rgba(&[1, 2, 3]), [3, 2, 1, 255]);
    }

    #[test]
    fn bgra_keeps_fourth_byte() {
        assert_eq!(SourceLayout::Bgra8.to_rgba(&[1, 2, 3, 77]), [3, 2, 1, 77]);
    }

    #[test]
    fn gray_replicates_first_byte() {
        assert_eq!(SourceLayout::Gray8.to_rgba(&[9, 200]), [9, 9, 9, 255]);
    }

    #[test]
    fn xrgb1555_widens_channels() {
        // r=31, g=0, b=16
        let v: u16 = (31 << 10) | 16;
        let [lo, hi] = v.to_le_bytes();
        assert_eq!(SourceLayout::Xrgb1555.to_rgba(&[lo, hi]), [255, 0, 132, 255]);
        // attribute bit set, still opaque
        let [lo, hi] = (v | 0x8000).to_le_bytes();
        assert_eq!(SourceLayout::Xrgb1555.to_rgba(&[lo, hi]), [255, 0, 132, 255]);
    }

    #[test]
    fn short_source_is_opaque_black() {
        assert_eq!(SourceLayout::Bgra8.to_rgba(&[1, 2]), OPAQUE_BLACK);
    }

    #[test]
    fn depths() {
        assert_eq!(depth_to_bytes(8), Some(1));
        assert_eq!(depth_to_bytes(15), Some(2));
        assert_eq!(depth_to_bytes(24), Some(3));
        assert_eq!(depth_to_bytes(32), Some(4));
        assert_eq!(depth_to_bytes(0), None);
        assert_eq!(depth_to_bytes(12), None);
        assert_eq!(depth_to_bytes(40), None);
    }
}
