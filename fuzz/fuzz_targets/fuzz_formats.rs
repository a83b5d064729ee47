#![no_main]
use libfuzzer_sys::fuzz_target;

// First byte picks the format, next two the dimensions, rest is payload.
fuzz_target!(|data: &[u8]| {
    let [sel, w, h, payload @ ..] = data else {
        return;
    };
    let format = ahff::PixelFormat::ALL[*sel as usize % ahff::PixelFormat::ALL.len()];
    let (width, height) = (u32::from(*w % 64) + 1, u32::from(*h % 64) + 1);

    let Ok(pixels) = ahff::decode_pixels(format, payload, width, height, enough::Unstoppable) else {
        return;
    };
    assert_eq!(pixels.len(), width as usize * height as usize * 4);

    // Decoding is deterministic
    let again = ahff::decode_pixels(format, payload, width, height, enough::Unstoppable).unwrap();
    assert_eq!(pixels, again);
});
