#![no_main]
use blocklz::{Level, decode, encode, max_encoded_len};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the level.
    let level = if data[0] & 1 == 0 { Level::Fast } else { Level::High };
    let input = &data[1..];

    let packed = encode(input, level).unwrap();
    assert!(packed.len() <= max_encoded_len(input.len()));
    let decoded = decode(&packed, Some(input.len())).unwrap();
    assert_eq!(decoded, input);
});
