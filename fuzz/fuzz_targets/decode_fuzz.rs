#![no_main]
use blocklz::format::TokenReader;
use blocklz::{decode_to_buf, decoded_len};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The decoder must never panic, only return errors.
    let measured = decoded_len(data);

    // Arbitrary headers can describe gigabytes of output; stay bounded.
    let mut out = vec![0u8; 1 << 20];
    let written = decode_to_buf(data, &mut out);
    match measured {
        Ok(n) if n <= out.len() => assert_eq!(written.unwrap(), n),
        _ => assert!(written.is_err()),
    }

    // The parser alone must agree on where the stream stops being readable.
    let parsed_ok = TokenReader::new(data).all(|t| t.is_ok());
    if measured.is_ok() {
        assert!(parsed_ok);
    }
});
