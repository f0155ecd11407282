#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(image_type: u8, cmap: (u16, u8), width: u16, height: u16, depth: u8, descriptor: u8) -> Vec<u8> {
    let (cmap_len, cmap_depth) = cmap;
    let mut h = vec![0u8; 18];
    h[1] = u8::from(cmap_len > 0);
    h[2] = image_type;
    h[5..7].copy_from_slice(&cmap_len.to_le_bytes());
    h[7] = cmap_depth;
    h[12..14].copy_from_slice(&width.to_le_bytes());
    h[14..16].copy_from_slice(&height.to_le_bytes());
    h[16] = depth;
    h[17] = descriptor;
    h
}

fn footer(extension_offset: u32) -> Vec<u8> {
    let mut f = extension_offset.to_le_bytes().to_vec();
    f.extend_from_slice(&0u32.to_le_bytes());
    f.extend_from_slice(b"TRUEVISION-XFILE.\0");
    f
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // True color 2x2, 24-bit, bottom-to-top
    let mut tga = header(2, (0, 0), 2, 2, 24, 0);
    tga.extend_from_slice(&[0, 0, 255, 0, 255, 0, 255, 0, 0, 128, 128, 128]);
    fs::write(format!("{dir}/true_color_2x2.tga"), tga).unwrap();

    // True color 1x1, 32-bit, top-to-bottom, v2 footer
    let mut tga = header(2, (0, 0), 1, 1, 32, 0x10);
    tga.extend_from_slice(&[10, 20, 30, 40]);
    tga.extend_from_slice(&footer(0));
    fs::write(format!("{dir}/true_color_v2.tga"), tga).unwrap();

    // Gray 3x2
    let mut tga = header(3, (0, 0), 3, 2, 8, 0);
    tga.extend_from_slice(&[0x00, 0x40, 0x80, 0xc0, 0xff, 0x64]);
    fs::write(format!("{dir}/gray_3x2.tga"), tga).unwrap();

    // Color mapped 2x2, 4-entry 24-bit palette
    let mut tga = header(1, (4, 24), 2, 2, 8, 0);
    tga.extend_from_slice(&[0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0, 255]);
    tga.extend_from_slice(&[0, 1, 2, 3]);
    fs::write(format!("{dir}/color_mapped_2x2.tga"), tga).unwrap();

    // RLE true color 4x4: run of 10, raw of 6
    let mut tga = header(10, (0, 0), 4, 4, 24, 0x10);
    tga.extend_from_slice(&[0x89, 1, 2, 3, 0x05]);
    tga.extend((0..18).map(|i| i as u8));
    fs::write(format!("{dir}/rle_true_color_4x4.tga"), tga).unwrap();

    // RLE color mapped 4x1, 16-bit indices
    let mut tga = header(9, (2, 16), 4, 1, 16, 0);
    tga.extend_from_slice(&[0x00, 0x7c, 0xe0, 0x03]);
    tga.extend_from_slice(&[0x83, 0x01, 0x00]);
    fs::write(format!("{dir}/rle_color_mapped_4x1.tga"), tga).unwrap();

    // RLE gray 8x1 with a v2 footer pointing at an extension area
    let mut tga = header(11, (0, 0), 8, 1, 8, 0);
    tga.extend_from_slice(&[0x87, 0x55]);
    let ext = tga.len() as u32;
    tga.extend_from_slice(&[0u8; 16]);
    tga.extend_from_slice(&footer(ext));
    fs::write(format!("{dir}/rle_gray_ext.tga"), tga).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), [0u8, 0, 2, 0, 0]).unwrap();
    let mut truncated = header(10, (0, 0), 16, 16, 32, 0);
    truncated.extend_from_slice(&[0xff, 1, 2]);
    fs::write(format!("{dir}/rle_truncated.bin"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}
