//! Text compression pipeline.
//!
//! `compress` counts symbols, builds the tree, derives the code table,
//! encodes the text and packs the bits. `decompress` unpacks and walks the
//! bits back through the table.

use crate::code::CodeTable;
use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use crate::packing;
use crate::tree::huffman;

/// Options controlling how text is prepared before coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Drop trailing whitespace from the input. Decompressed output will not
    /// contain it.
    pub strip_trailing_whitespace: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            strip_trailing_whitespace: true,
        }
    }
}

impl CodecOptions {
    pub fn strip_trailing_whitespace(mut self, strip: bool) -> Self {
        self.strip_trailing_whitespace = strip;
        self
    }
}

/// A packed stream together with the table needed to read it back.
#[derive(Debug, Clone)]
pub struct Compressed<Symbol> {
    table: CodeTable<Symbol>,
    stream: Vec<u8>,
    bit_len: usize,
    symbol_count: usize,
    input_len: usize,
}

impl<Symbol> Compressed<Symbol> {
    pub(crate) fn from_parts(
        table: CodeTable<Symbol>,
        stream: Vec<u8>,
        bit_len: usize,
        symbol_count: usize,
        input_len: usize,
    ) -> Self {
        Self {
            table,
            stream,
            bit_len,
            symbol_count,
            input_len,
        }
    }

    pub fn table(&self) -> &CodeTable<Symbol> {
        &self.table
    }

    /// Packed bytes, padding header first.
    pub fn stream(&self) -> &[u8] {
        &self.stream
    }

    pub fn into_parts(self) -> (CodeTable<Symbol>, Vec<u8>) {
        (self.table, self.stream)
    }

    /// Length of the coded payload in bits, excluding header and padding.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of symbols that were coded.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// Size of the coded input in bytes (UTF-8 length for text).
    pub fn input_len(&self) -> usize {
        self.input_len
    }

    /// Packed stream size over input size. `0.0` for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            return 0.0;
        }
        self.stream.len() as f64 / self.input_len as f64
    }
}

impl<Symbol> Compressed<Symbol>
where
    Symbol: std::hash::Hash + Eq + Clone,
{
    /// Decodes the packed stream with the table it was produced with.
    pub fn decode_symbols(&self) -> Result<Vec<Symbol>> {
        let symbols = decode_symbols(&self.stream, &self.table)?;
        if symbols.len() != self.symbol_count {
            return Err(Error::malformed(format!(
                "expected {} symbols, decoded {}",
                self.symbol_count,
                symbols.len()
            )));
        }

        Ok(symbols)
    }
}

/// Runs the whole coding pipeline over `symbols`, counting one input byte
/// per symbol.
pub fn encode_symbols<Symbol>(symbols: &[Symbol]) -> Result<Compressed<Symbol>>
where
    Symbol: Ord + std::hash::Hash + Clone + std::fmt::Debug,
{
    let freq: FrequencyMap<Symbol> = symbols.iter().cloned().collect();
    let table = match huffman(&freq) {
        Some(root) => CodeTable::from_tree(root),
        None => CodeTable::empty(),
    };

    let bits = table.encoder().encode(symbols.iter().cloned())?;
    let stream = packing::pack(&bits);

    tracing::debug!(
        symbols = symbols.len(),
        distinct = freq.len(),
        bits = bits.len(),
        bytes = stream.len(),
        "encoded symbols"
    );

    Ok(Compressed::from_parts(
        table,
        stream,
        bits.len(),
        symbols.len(),
        symbols.len(),
    ))
}

/// Unpacks `stream` and decodes it with `table`.
pub fn decode_symbols<Symbol>(stream: &[u8], table: &CodeTable<Symbol>) -> Result<Vec<Symbol>>
where
    Symbol: std::hash::Hash + Eq + Clone,
{
    let bits = packing::unpack(stream)?;
    let symbols = table.decoder().decode(&bits)?;

    tracing::debug!(
        bytes = stream.len(),
        bits = bits.len(),
        symbols = symbols.len(),
        "decoded symbols"
    );

    Ok(symbols)
}

#[derive(Debug, Clone, Default)]
pub struct Codec {
    options: CodecOptions,
}

impl Codec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn compress(&self, text: &str) -> Result<Compressed<char>> {
        let text = if self.options.strip_trailing_whitespace {
            trim_trailing_whitespace(text)
        } else {
            text
        };

        let symbols: Vec<char> = text.chars().collect();
        let mut compressed = encode_symbols(&symbols)?;
        compressed.input_len = text.len();
        Ok(compressed)
    }

    pub fn decompress(&self, compressed: &Compressed<char>) -> Result<String> {
        Ok(compressed.decode_symbols()?.into_iter().collect())
    }

    /// Decodes a bare packed stream with a table obtained elsewhere.
    pub fn decompress_stream(&self, stream: &[u8], table: &CodeTable<char>) -> Result<String> {
        Ok(decode_symbols(stream, table)?.into_iter().collect())
    }
}

/// Strips Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`.
fn trim_trailing_whitespace(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Compresses `text` with default options.
pub fn compress(text: &str) -> Result<Compressed<char>> {
    Codec::default().compress(text)
}

pub fn decompress(compressed: &Compressed<char>) -> Result<String> {
    Codec::default().decompress(compressed)
}
