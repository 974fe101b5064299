//! Static Huffman compression for text.
//!
//! ```
//! let c = huffpack::compress("aaabb")?;
//! assert_eq!(c.stream(), &[0b0000_0011, 0b1110_0000]);
//! assert_eq!(huffpack::decompress(&c)?, "aaabb");
//!
//! // persist the table with the stream so another process can decode it
//! let bytes = huffpack::TextArchive::new(&c).to_bytes()?;
//! let restored = huffpack::TextArchive::from_bytes(&bytes)?.into_compressed()?;
//! assert_eq!(huffpack::decompress(&restored)?, "aaabb");
//! # Ok::<(), huffpack::Error>(())
//! ```

use bitvec::prelude::*;

pub mod archive;
pub mod code;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod packing;
pub mod tree;

/// Bit sequence, most significant bit of each byte first.
pub type Bits = BitVec<u8, Msb0>;
pub type BitsSlice = BitSlice<u8, Msb0>;

pub use archive::{Archive, TextArchive};
pub use code::{CodeTable, Decoder, Encoder, SerializableCodeTable};
pub use codec::{compress, decompress, Codec, CodecOptions, Compressed};
pub use error::{Error, Result};
pub use frequency::FrequencyMap;
pub use tree::{huffman, Node};
