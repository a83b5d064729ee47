#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn container(width: u32, height: u32, format: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(16 + payload.len());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&format.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // One valid 4x4 image per format: (tag, name, bytes per 4x4)
    let formats = [
        (1, "alpha8", 16),
        (3, "rgb24", 48),
        (4, "rgba32", 64),
        (5, "argb32", 64),
        (7, "rgb565", 32),
        (13, "rgba4444", 32),
        (32, "pvrtc_rgb4", 8),
        (33, "pvrtc_rgba4", 8),
        (34, "etc1", 8),
    ];
    for (tag, name, len) in formats {
        let payload: Vec<u8> = (0..len).map(|i| (i * 37 + tag) as u8).collect();
        fs::write(format!("{dir}/{name}_4x4.ahff"), container(4, 4, tag, &payload)).unwrap();
    }

    // Oversize payload (warning path)
    fs::write(format!("{dir}/rgba32_oversize.ahff"), container(1, 1, 4, &[0xAB; 9])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/short_header.bin"), [4u8, 0, 0, 0, 4, 0]).unwrap();
    fs::write(format!("{dir}/unknown_tag.ahff"), container(2, 2, 999, &[0; 16])).unwrap();
    fs::write(format!("{dir}/etc1_width5.ahff"), container(5, 4, 34, &[0; 16])).unwrap();
    let mut truncated = container(4, 4, 4, &[0; 64]);
    truncated.truncate(30);
    fs::write(format!("{dir}/truncated.ahff"), truncated).unwrap();

    println!("Generated seed corpus in {dir}/");
}
