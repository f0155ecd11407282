//! TGA run-length packet stream.
//!
//! Each packet starts with a header byte. With the high bit set it is a run
//! packet: one pixel value follows and is repeated `(header & 0x7F) + 1`
//! times. With the high bit clear it is a raw packet: `(header & 0x7F) + 1`
//! literal pixels follow. Packets are independent of scanlines; a single
//! packet may continue onto the next row.

/// Packet in progress.
#[derive(Clone, Copy, Debug)]
enum Packet<'a> {
    /// Between packets; the next byte is a packet header.
    Header,
    /// Repeat `value` for `remaining` more pixels.
    Run { value: &'a [u8], remaining: u8 },
    /// Read `remaining` more literal pixels from the stream.
    Raw { remaining: u8 },
    /// The stream ended; no more pixels.
    Exhausted,
}

/// Iterator over decoded pixels of a run-length stream.
///
/// Yields one `pixel_width`-byte slice per pixel in storage order, borrowed
/// from the stream. A run packet's value is read once and yielded for every
/// repetition. Iteration ends at the first packet header or pixel the stream
/// cannot supply in full, so every yielded slice is complete.
#[derive(Clone, Debug)]
pub(crate) struct RunLengthDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    pixel_width: usize,
    packet: Packet<'a>,
}

impl<'a> RunLengthDecoder<'a> {
    pub(crate) fn new(data: &'a [u8], pixel_width: usize) -> Self {
        Self {
            data,
            pos: 0,
            pixel_width,
            packet: Packet::Header,
        }
    }

    /// Bytes consumed so far.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    fn take_pixel(&mut self) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(self.pixel_width)?;
        let pixel = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(pixel)
    }
}

impl<'a> Iterator for RunLengthDecoder<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.pixel_width == 0 {
            return None;
        }
        loop {
            match self.packet {
                Packet::Exhausted => return None,
                Packet::Run { value, remaining } if remaining > 0 => {
                    self.packet = Packet::Run {
                        value,
                        remaining: remaining - 1,
                    };
                    return Some(value);
                }
                Packet::Raw { remaining } if remaining > 0 => {
                    let Some(pixel) = self.take_pixel() else {
                        self.packet = Packet::Exhausted;
                        return None;
                    };
                    self.packet = Packet::Raw {
                        remaining: remaining - 1,
                    };
                    return Some(pixel);
                }
                _ => {
                    let Some(&header) = self.data.get(self.pos) else {
                        self.packet = Packet::Exhausted;
                        return None;
                    };
                    self.pos += 1;
                    let count = (header & 0x7F) + 1;
                    self.packet = if header & 0x80 != 0 {
                        match self.take_pixel() {
                            Some(value) => Packet::Run {
                                value,
                                remaining: count,
                            },
                            None => Packet::Exhausted,
                        }
                    } else {
                        Packet::Raw { remaining: count }
                    };
                }
            }
        }
    }
}
