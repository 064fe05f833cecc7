#![no_main]
use blocklz::{CodecError, Level, decode_to_buf, encode, encode_to_buf};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    // Control bytes: level, then a buffer size as a fraction of the input.
    let level = if data[0] & 1 == 0 { Level::Fast } else { Level::High };
    let input = &data[2..];
    let cap = input.len() * data[1] as usize / 128;

    let expected = encode(input, level).unwrap();
    let mut out = vec![0u8; cap];
    match encode_to_buf(input, &mut out, level) {
        Ok(n) => assert_eq!(&out[..n], &expected[..]),
        Err(CodecError::OutputTooSmall { .. }) => assert!(cap < expected.len()),
        Err(e) => panic!("unexpected error: {e}"),
    }

    let mut plain = vec![0u8; cap];
    match decode_to_buf(&expected, &mut plain) {
        Ok(n) => assert_eq!(&plain[..n], input),
        Err(CodecError::OutputTooSmall { .. }) => assert!(cap < input.len()),
        Err(e) => panic!("unexpected error: {e}"),
    }
});
