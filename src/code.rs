use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::tree::Node;
use crate::{Bits, BitsSlice};

impl<Symbol> Node<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    /// Walks the tree and assigns every leaf the path to it: `0` for a left
    /// edge, `1` for a right edge. A lone leaf at the root gets the code `0`.
    pub fn into_encoder_decoder_pair(self) -> (Encoder<Symbol>, Decoder<Symbol>) {
        let mut dec = HashMap::new();

        let mut stack = vec![(self, Bits::new())];
        while let Some((node, mut path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    if path.is_empty() {
                        path.push(false);
                    }
                    dec.insert(path, symbol);
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((*right, right_path));

                    path.push(false);
                    stack.push((*left, path));
                }
            }
        }

        let enc = dec
            .iter()
            .map(|(k, v)| (v.clone(), k.clone().into_boxed_bitslice()))
            .collect();

        (Encoder { encode_table: enc }, Decoder::new(dec))
    }
}

#[derive(Debug, Clone)]
pub struct Encoder<Symbol> {
    encode_table: HashMap<Symbol, BitBox<u8, Msb0>>,
}

impl<Symbol> Encoder<Symbol>
where
    Symbol: Eq + Hash + Debug,
{
    /// Concatenates the code of every symbol in `stream`, in order.
    pub fn encode(&self, stream: impl IntoIterator<Item = Symbol>) -> Result<Bits> {
        let mut out = Bits::new();
        for s in stream {
            let code = self
                .encode_table
                .get(&s)
                .ok_or_else(|| Error::UnknownSymbol(format!("{s:?}")))?;
            out.extend_from_bitslice(code);
        }

        Ok(out)
    }

    pub fn code(&self, symbol: &Symbol) -> Option<&BitsSlice> {
        self.encode_table.get(symbol).map(|b| b.as_bitslice())
    }
}

#[derive(Debug, Clone)]
pub struct Decoder<Symbol> {
    decode_table: HashMap<Bits, Symbol>,
    max_len: usize,
}

impl<Symbol> Decoder<Symbol> {
    fn new(decode_table: HashMap<Bits, Symbol>) -> Self {
        let max_len = decode_table.keys().map(|k| k.len()).max().unwrap_or(0);
        Self {
            decode_table,
            max_len,
        }
    }
}

impl<Symbol> Decoder<Symbol>
where
    Symbol: Clone,
{
    /// Reads `input` bit by bit, emitting a symbol each time the bits read
    /// since the last emission form a complete code.
    pub fn decode(&self, input: &BitsSlice) -> Result<Vec<Symbol>> {
        let mut out = Vec::new();

        let mut cursor = Bits::new();
        for (pos, b) in input.iter().by_vals().enumerate() {
            cursor.push(b);
            if let Some(sym) = self.decode_table.get(&cursor) {
                cursor.clear();
                out.push(sym.clone());
            } else if cursor.len() >= self.max_len {
                return Err(Error::malformed(format!(
                    "no code matches the {} bits ending at bit {}",
                    cursor.len(),
                    pos
                )));
            }
        }

        if !cursor.is_empty() {
            return Err(Error::malformed(format!(
                "stream ends inside a code ({} dangling bits)",
                cursor.len()
            )));
        }

        Ok(out)
    }
}

/// Symbol to code and code to symbol mappings derived from one tree.
#[derive(Debug, Clone)]
pub struct CodeTable<Symbol> {
    encoder: Encoder<Symbol>,
    decoder: Decoder<Symbol>,
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Hash + Eq + Clone,
{
    pub fn from_tree(root: Node<Symbol>) -> Self {
        let (encoder, decoder) = root.into_encoder_decoder_pair();
        Self { encoder, decoder }
    }

    /// Table for an input with no symbols.
    pub fn empty() -> Self {
        Self {
            encoder: Encoder {
                encode_table: HashMap::new(),
            },
            decoder: Decoder::new(HashMap::new()),
        }
    }

    /// Builds a table from explicit `(symbol, code)` pairs, rejecting anything
    /// that is not a usable prefix code.
    pub fn from_codes(codes: impl IntoIterator<Item = (Symbol, Bits)>) -> Result<Self>
    where
        Symbol: Debug,
    {
        let mut enc = HashMap::new();
        let mut dec = HashMap::new();
        for (symbol, code) in codes {
            if code.is_empty() {
                return Err(Error::invalid_table(format!("{symbol:?} has an empty code")));
            }
            if dec.insert(code.clone(), symbol.clone()).is_some() {
                return Err(Error::invalid_table(format!(
                    "{symbol:?} reuses a code of {} bits",
                    code.len()
                )));
            }
            if enc
                .insert(symbol.clone(), code.into_boxed_bitslice())
                .is_some()
            {
                return Err(Error::invalid_table(format!("{symbol:?} appears twice")));
            }
        }

        let table = Self {
            encoder: Encoder { encode_table: enc },
            decoder: Decoder::new(dec),
        };
        if !table.is_prefix_free() {
            return Err(Error::invalid_table("codes are not prefix-free"));
        }

        Ok(table)
    }

    pub fn encoder(&self) -> &Encoder<Symbol> {
        &self.encoder
    }

    pub fn decoder(&self) -> &Decoder<Symbol> {
        &self.decoder
    }

    pub fn len(&self) -> usize {
        self.decoder.decode_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoder.decode_table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &BitsSlice)> {
        self.encoder
            .encode_table
            .iter()
            .map(|(s, c)| (s, c.as_bitslice()))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Bits> = self.decoder.decode_table.keys().collect();
        codes.sort();

        // in sorted order a prefix is always immediately followed by an extension of it
        codes.windows(2).all(|w| !w[1].starts_with(w[0].as_bitslice()))
    }
}

/// Persistable form of a [`CodeTable`]: `(symbol, bit length, packed bits)`
/// triples in symbol order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableCodeTable<Symbol> {
    codes: Vec<(Symbol, usize, ByteBuf)>,
}

impl<'a, Symbol> From<&'a CodeTable<Symbol>> for SerializableCodeTable<Symbol>
where
    Symbol: Ord + Hash + Clone,
{
    fn from(other: &'a CodeTable<Symbol>) -> Self {
        let mut codes: Vec<_> = other
            .iter()
            .map(|(s, code)| {
                // serialize a bit slice as a pair of length, packed bytes
                let mut bv = code.to_bitvec();
                bv.set_uninitialized(false);

                (s.clone(), code.len(), ByteBuf::from(bv.into_vec()))
            })
            .collect();
        codes.sort_by(|a, b| a.0.cmp(&b.0));

        Self { codes }
    }
}

impl<Symbol> TryFrom<SerializableCodeTable<Symbol>> for CodeTable<Symbol>
where
    Symbol: Hash + Eq + Clone + Debug,
{
    type Error = Error;

    fn try_from(other: SerializableCodeTable<Symbol>) -> Result<Self> {
        let codes = other
            .codes
            .into_iter()
            .map(|(s, len, bs)| {
                let mut bv = Bits::from_vec(bs.into_vec());
                if len > bv.len() {
                    return Err(Error::invalid_table(format!(
                        "code for {s:?} claims {len} bits but stores {}",
                        bv.len()
                    )));
                }
                bv.truncate(len);
                Ok((s, bv))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_codes(codes)
    }
}
