/// Zero-copy byte reader for decoding command-class payloads.
pub mod reader;
/// Byte writer for encoding payloads into a caller-owned buffer.
pub mod writer;

pub use reader::Reader;
pub use writer::Writer;
