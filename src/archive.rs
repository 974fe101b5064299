//! Self-contained compressed files.
//!
//! A bare packed stream cannot be read without the table it was coded with,
//! so files carry the table alongside the stream, encoded as MessagePack.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};

use crate::code::{CodeTable, SerializableCodeTable};
use crate::codec::Compressed;
use crate::error::{Error, Result};
use crate::packing;

pub const FORMAT_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive<Symbol> {
    version: u8,
    symbol_count: usize,
    input_len: usize,
    table: SerializableCodeTable<Symbol>,
    #[serde(with = "serde_bytes")]
    stream: Vec<u8>,
}

/// Archive of compressed text.
pub type TextArchive = Archive<char>;

impl<Symbol> Archive<Symbol>
where
    Symbol: Ord + Hash + Clone + Debug + Serialize + DeserializeOwned,
{
    pub fn new(compressed: &Compressed<Symbol>) -> Self {
        Self {
            version: FORMAT_VERSION,
            symbol_count: compressed.symbol_count(),
            input_len: compressed.input_len(),
            table: compressed.table().into(),
            stream: compressed.stream().to_vec(),
        }
    }

    /// Validates the stored table and stream and rebuilds the in-memory form.
    pub fn into_compressed(self) -> Result<Compressed<Symbol>> {
        let table = CodeTable::try_from(self.table)?;
        let bit_len = packing::unpack(&self.stream)?.len();

        Ok(Compressed::from_parts(
            table,
            self.stream,
            bit_len,
            self.symbol_count,
            self.input_len,
        ))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive: Self = rmp_serde::from_slice(bytes)?;
        archive.check_version()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        rmp_serde::encode::write(writer, self)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let archive: Self = rmp_serde::from_read(reader)?;
        archive.check_version()
    }

    fn check_version(self) -> Result<Self> {
        if self.version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: FORMAT_VERSION,
            });
        }

        tracing::debug!(
            symbols = self.symbol_count,
            stream_bytes = self.stream.len(),
            "loaded archive"
        );
        Ok(self)
    }
}

impl<Symbol> From<&Compressed<Symbol>> for Archive<Symbol>
where
    Symbol: Ord + Hash + Clone + Debug + Serialize + DeserializeOwned,
{
    fn from(compressed: &Compressed<Symbol>) -> Self {
        Self::new(compressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{compress, decompress, encode_symbols};

    #[test]
    fn text_roundtrip() {
        let text = "It was the best of times, it was the worst of times.";
        let c = compress(text).unwrap();

        let bytes = TextArchive::new(&c).to_bytes().unwrap();
        let back = TextArchive::from_bytes(&bytes)
            .unwrap()
            .into_compressed()
            .unwrap();

        assert_eq!(back.stream(), c.stream());
        assert_eq!(back.bit_len(), c.bit_len());
        assert_eq!(back.input_len(), c.input_len());
        assert_eq!(decompress(&back).unwrap(), text);
    }

    #[test]
    fn deterministic_bytes() {
        let text = "determinism matters for reproducible archives";
        let a = TextArchive::new(&compress(text).unwrap()).to_bytes().unwrap();
        let b = TextArchive::new(&compress(text).unwrap()).to_bytes().unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn writer_reader_roundtrip() {
        let data = b"binary \x00\x01\x02 payload \xff\xfe".to_vec();
        let c = encode_symbols(&data).unwrap();

        let mut buf = Vec::new();
        Archive::new(&c).write_to(&mut buf).unwrap();
        let back: Archive<u8> = Archive::read_from(buf.as_slice()).unwrap();

        assert_eq!(back.into_compressed().unwrap().decode_symbols().unwrap(), data);
    }

    #[test]
    fn rejects_unknown_version() {
        let mut archive = TextArchive::new(&compress("abc").unwrap());
        archive.version = 99;
        let bytes = archive.to_bytes().unwrap();

        assert!(matches!(
            TextArchive::from_bytes(&bytes),
            Err(Error::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            TextArchive::from_bytes(b"definitely not msgpack"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn rejects_corrupt_stream() {
        let mut archive = TextArchive::new(&compress("abc").unwrap());
        archive.stream.clear();

        assert!(matches!(
            archive.into_compressed(),
            Err(Error::MalformedStream(_))
        ));
    }
}
