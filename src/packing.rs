//! Byte packing for coded bit sequences.
//!
//! A packed stream is one header byte holding the number of zero bits
//! appended to the payload, followed by the payload itself, most significant
//! bit first. The header is always 1..=8 on output; a payload that is already
//! byte aligned gets a whole byte of padding.

use crate::error::{Error, Result};
use crate::{Bits, BitsSlice};

const BYTE_BITS: usize = 8;

/// Number of padding bits [`pack`] appends to a payload of `len` bits.
pub fn padding_for(len: usize) -> usize {
    BYTE_BITS - len % BYTE_BITS
}

pub fn pack(bits: &BitsSlice) -> Vec<u8> {
    let padding = padding_for(bits.len());

    let mut payload = Bits::with_capacity(bits.len() + padding);
    payload.extend_from_bitslice(bits);
    payload.resize(bits.len() + padding, false);

    let mut out = Vec::with_capacity(1 + payload.len() / BYTE_BITS);
    out.push(padding as u8);
    out.extend(payload.into_vec());
    out
}

pub fn unpack(bytes: &[u8]) -> Result<Bits> {
    let (&header, body) = bytes
        .split_first()
        .ok_or_else(|| Error::malformed("empty input has no padding header"))?;

    let padding = header as usize;
    if padding > BYTE_BITS {
        return Err(Error::malformed(format!(
            "padding header {padding} is larger than one byte"
        )));
    }

    let mut bits = Bits::from_slice(body);
    if padding > bits.len() {
        return Err(Error::malformed(format!(
            "padding of {padding} bits but only {} payload bits",
            bits.len()
        )));
    }

    let len = bits.len() - padding;
    if bits[len..].any() {
        return Err(Error::malformed("padding bits are not zero"));
    }
    bits.truncate(len);

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn padding_range() {
        assert_eq!(padding_for(0), 8);
        assert_eq!(padding_for(1), 7);
        assert_eq!(padding_for(5), 3);
        assert_eq!(padding_for(8), 8);
        assert_eq!(padding_for(15), 1);
    }

    #[test]
    fn pack_five_bits() {
        let bits = bitvec![u8, Msb0; 0, 0, 0, 1, 1];
        assert_eq!(pack(&bits), vec![0b0000_0011, 0b0001_1000]);
    }

    #[test]
    fn pack_aligned_adds_full_byte() {
        let bits = bitvec![u8, Msb0; 1, 0, 1, 0, 1, 0, 1, 0];
        assert_eq!(pack(&bits), vec![8, 0b1010_1010, 0]);
    }

    #[test]
    fn pack_empty() {
        assert_eq!(pack(BitsSlice::empty()), vec![8, 0]);
        assert!(unpack(&[8, 0]).unwrap().is_empty());
    }

    #[test]
    fn unpack_strips_padding() {
        let bits = unpack(&[3, 0b0001_1000]).unwrap();
        assert_eq!(bits, bitvec![u8, Msb0; 0, 0, 0, 1, 1]);
    }

    #[test]
    fn unpack_zero_header_keeps_everything() {
        let bits = unpack(&[0, 0xff]).unwrap();
        assert_eq!(bits.len(), 8);
        assert!(bits.all());
    }

    #[test]
    fn unpack_rejects_malformed() {
        let cases: &[&[u8]] = &[
            &[],
            &[1],
            &[9, 0, 0],
            &[0xff, 0],
            &[3, 0b0001_1001],
        ];

        for case in cases {
            assert!(
                matches!(unpack(case), Err(Error::MalformedStream(_))),
                "{case:?} should be rejected"
            );
        }
    }
}
