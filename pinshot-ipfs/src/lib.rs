//! Pinata upload client for pinshot.
//!
//! One file in, one content identifier out, via a single multipart POST to
//! the pinning endpoint. Byte-source adapters cover local files,
//! fetch-and-blob URIs, and in-memory buffers.

mod pinata;
mod source;

pub use pinata::{PinataClient, PinataConfig};
pub use source::{FileSource, HttpSource, MemorySource};
