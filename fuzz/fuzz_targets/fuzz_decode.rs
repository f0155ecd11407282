#![no_main]
use libfuzzer_sys::fuzz_target;
use zentga::{DecodeRequest, Limits, Permissiveness};

fuzz_target!(|data: &[u8]| {
    // Header parsing alone must never panic
    let _ = zentga::probe(data);

    // Cap the framebuffer so 65535x65535 headers don't exhaust memory
    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };
    for permissiveness in [Permissiveness::Strict, Permissiveness::Permissive] {
        if let Ok(out) = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(permissiveness)
            .decode(enough::Unstoppable)
        {
            assert_eq!(
                out.pixels().len(),
                out.width as usize * out.height as usize * 4
            );
        }
    }
});
