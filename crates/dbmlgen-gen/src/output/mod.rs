mod writer;

pub use writer::{OutputWriter, write_bytes_atomic};
