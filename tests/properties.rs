//! Property tests for the coding pipeline.

use bitvec::prelude::*;
use proptest::prelude::*;

use huffpack::packing::{pack, unpack};
use huffpack::{compress, decompress, huffman, Bits, CodeTable, Codec, CodecOptions, FrequencyMap};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_roundtrip_strips_trailing_whitespace(text in "\\PC{0,400}") {
        let c = compress(&text).unwrap();
        prop_assert_eq!(decompress(&c).unwrap(), text.trim_end());
    }

    #[test]
    fn prop_roundtrip_exact_when_keeping_whitespace(text in "[ab \n\t]{0,200}") {
        let codec = Codec::new(CodecOptions::default().strip_trailing_whitespace(false));
        let c = codec.compress(&text).unwrap();
        prop_assert_eq!(codec.decompress(&c).unwrap(), text);
    }

    #[test]
    fn prop_codes_are_prefix_free(data in proptest::collection::vec(any::<u8>(), 2..2000)) {
        let freq: FrequencyMap<u8> = data.iter().copied().collect();
        prop_assume!(freq.len() >= 2);

        let table = CodeTable::from_tree(huffman(&freq).unwrap());
        prop_assert!(table.is_prefix_free());
        prop_assert_eq!(table.len(), freq.len());
        prop_assert!(table.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn prop_padding_bounds(bits in proptest::collection::vec(any::<bool>(), 0..300)) {
        let bits: Bits = bits.into_iter().collect();
        let packed = pack(&bits);

        prop_assert!((1..=8).contains(&packed[0]));
        prop_assert_eq!((packed.len() - 1) * 8, bits.len() + packed[0] as usize);
        prop_assert_eq!(unpack(&packed).unwrap(), bits);
    }

    #[test]
    fn prop_tree_is_deterministic(data in proptest::collection::vec(0u8..16, 1..500)) {
        let freq: FrequencyMap<u8> = data.iter().copied().collect();
        let reversed: FrequencyMap<u8> = data.iter().rev().copied().collect();

        prop_assert_eq!(huffman(&freq), huffman(&reversed));
    }

    #[test]
    fn prop_single_symbol(symbol in any::<char>().prop_filter("not whitespace", |c| !c.is_whitespace()), n in 1usize..500) {
        let text: String = std::iter::repeat(symbol).take(n).collect();
        let c = compress(&text).unwrap();

        prop_assert_eq!(c.table().len(), 1);
        prop_assert_eq!(c.table().encoder().code(&symbol), Some(bits![u8, Msb0; 0]));
        prop_assert_eq!(decompress(&c).unwrap(), text);
    }
}
