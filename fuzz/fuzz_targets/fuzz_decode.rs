#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and full decode must never panic
    let _ = ahff::ImageInfo::from_bytes(data);
    let Ok(decoded) = ahff::DecodeRequest::new(data).decode(enough::Unstoppable) else {
        return;
    };
    assert_eq!(
        decoded.pixels().len(),
        decoded.width as usize * decoded.height as usize * 4
    );
});
