//! In-test TGA writer: headers, color maps, raw/RLE pixel streams, v2 footers.

#![allow(dead_code)]

pub const SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

pub const COLOR_MAPPED: u8 = 1;
pub const TRUE_COLOR: u8 = 2;
pub const GRAY_SCALE: u8 = 3;
pub const RLE_COLOR_MAPPED: u8 = 9;
pub const RLE_TRUE_COLOR: u8 = 10;
pub const RLE_GRAY_SCALE: u8 = 11;

pub const TOP_TO_BOTTOM: u8 = 0x10;

#[derive(Clone, Debug)]
pub struct Tga {
    pub id: Vec<u8>,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub width: u16,
    pub height: u16,
    pub depth: u8,
    pub descriptor: u8,
    pub color_map: Vec<u8>,
    pub pixels: Vec<u8>,
    /// `Some(extension_offset)` appends a version-2 footer.
    pub footer: Option<u32>,
    /// Developer directory offset written into the version-2 footer.
    pub footer_dev: u32,
}

impl Tga {
    pub fn new(image_type: u8, width: u16, height: u16, depth: u8) -> Self {
        Self {
            id: Vec::new(),
            color_map_type: 0,
            image_type,
            color_map_origin: 0,
            color_map_length: 0,
            color_map_depth: 0,
            width,
            height,
            depth,
            descriptor: 0,
            color_map: Vec::new(),
            pixels: Vec::new(),
            footer: None,
            footer_dev: 0,
        }
    }

    pub fn top_to_bottom(mut self) -> Self {
        self.descriptor |= TOP_TO_BOTTOM;
        self
    }

    pub fn id(mut self, id: &[u8]) -> Self {
        self.id = id.to_vec();
        self
    }

    /// Attach a color map of `depth`-bit entries.
    pub fn color_map(mut self, depth: u8, entries: &[u8]) -> Self {
        let entry_size = usize::from(depth).div_ceil(8);
        self.color_map_type = 1;
        self.color_map_depth = depth;
        self.color_map_length = (entries.len() / entry_size) as u16;
        self.color_map = entries.to_vec();
        self
    }

    pub fn pixels(mut self, bytes: &[u8]) -> Self {
        self.pixels = bytes.to_vec();
        self
    }

    pub fn v2(mut self) -> Self {
        self.footer = Some(0);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(self.id.len() as u8);
        out.push(self.color_map_type);
        out.push(self.image_type);
        out.extend_from_slice(&self.color_map_origin.to_le_bytes());
        out.extend_from_slice(&self.color_map_length.to_le_bytes());
        out.push(self.color_map_depth);
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.push(self.depth);
        out.push(self.descriptor);
        out.extend_from_slice(&self.id);
        out.extend_from_slice(&self.color_map);
        out.extend_from_slice(&self.pixels);
        if let Some(extension_offset) = self.footer {
            out.extend_from_slice(&extension_offset.to_le_bytes());
            out.extend_from_slice(&self.footer_dev.to_le_bytes());
            out.extend_from_slice(SIGNATURE);
        }
        out
    }
}

/// Run-length encode `pixels` (`bpp` bytes each) with minimal packets:
/// repeats of two or more become run packets, everything else raw packets.
pub fn rle_encode(pixels: &[u8], bpp: usize) -> Vec<u8> {
    let px: Vec<&[u8]> = pixels.chunks_exact(bpp).collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < px.len() {
        let mut run = 1;
        while i + run < px.len() && run < 128 && px[i + run] == px[i] {
            run += 1;
        }
        if run >= 2 {
            out.push(0x80 | (run - 1) as u8);
            out.extend_from_slice(px[i]);
            i += run;
            continue;
        }
        let start = i;
        while i < px.len() && i - start < 128 {
            if i + 1 < px.len() && px[i + 1] == px[i] {
                break;
            }
            i += 1;
        }
        if i == start {
            // next pixel starts a run
            continue;
        }
        out.push((i - start - 1) as u8);
        for p in &px[start..i] {
            out.extend_from_slice(p);
        }
    }
    out
}

/// Encode with raw packets only, `chunk` pixels per packet.
pub fn raw_packets(pixels: &[u8], bpp: usize, chunk: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for group in pixels.chunks(bpp * chunk) {
        out.push((group.len() / bpp - 1) as u8);
        out.extend_from_slice(group);
    }
    out
}

/// Reverse the order of `width * bpp`-byte rows.
pub fn flip_rows(pixels: &[u8], width: usize, bpp: usize) -> Vec<u8> {
    pixels
        .chunks_exact(width * bpp)
        .rev()
        .flatten()
        .copied()
        .collect()
}

pub fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            for c in 0..bpp {
                pixels[off + c] = if (x + y) % 2 == 0 {
                    180 + (c as u8 * 20)
                } else {
                    10 + (c as u8 * 30)
                };
            }
        }
    }
    pixels
}

pub fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

/// Expected RGBA for stored B,G,R(,A) pixels.
pub fn bgr_to_rgba(pixels: &[u8], bpp: usize) -> Vec<u8> {
    pixels
        .chunks_exact(bpp)
        .flat_map(|p| {
            let a = if bpp == 4 { p[3] } else { 255 };
            [p[2], p[1], p[0], a]
        })
        .collect()
}
