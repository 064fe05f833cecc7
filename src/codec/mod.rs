// Block codec: encode and decode whole buffers.
//
// - `encoder`: encode, encode_to_buf, reusable Encoder
// - `decoder`: decode, decode_to_buf, stream validation
// - `sink`:    growable and fixed-size output destinations

pub mod decoder;
pub mod encoder;
pub mod sink;

pub use decoder::{DecodeStats, decode, decode_to_buf, decoded_len};
pub use encoder::{Encoder, encode, encode_to_buf, max_encoded_len};
