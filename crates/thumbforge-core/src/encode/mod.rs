//! Image encoding for thumbnail output.

mod jpeg;

pub use jpeg::{encode_jpeg, write_output, EncodeError};
