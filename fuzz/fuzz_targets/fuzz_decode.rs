#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and full decode must never panic
    let _ = zenraster::ImageInfo::from_bytes(data);

    let limits = zenraster::Limits::memory(64 << 20);
    let _ = zenraster::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
