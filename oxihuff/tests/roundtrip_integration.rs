//! Integration tests for the Huffman codec.
//!
//! These tests exercise the public API end to end: round-trips over varied
//! inputs, the exact container layout, and rejection of malformed containers.

use oxihuff::{
    CodeTable, Container, ContainerHeader, Histogram, HuffmanConfig, HuffmanEncoder, HuffmanTree,
    MAX_CODE_LENGTH, OxiHuffError, decode, encode,
};

fn lcg_bytes(size: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

/// Symbol `i` repeated `fib(i)` times: the tree degenerates into a chain.
fn fibonacci_bytes(symbols: u8) -> Vec<u8> {
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for sym in 0..symbols {
        data.extend(std::iter::repeat_n(sym, a));
        (a, b) = (b, a + b);
    }
    data
}

fn assert_roundtrip(data: &[u8]) {
    let encoded = encode(data).expect("encode failed");
    let decoded = decode(&encoded).expect("decode failed");
    assert_eq!(decoded, data);
}

// ============================================================================
// Round-trips
// ============================================================================

#[test]
fn test_roundtrip_text() {
    assert_roundtrip(b"The quick brown fox jumps over the lazy dog.");
    assert_roundtrip(&b"It was the best of times, it was the worst of times. ".repeat(50));
}

#[test]
fn test_roundtrip_two_symbols() {
    assert_roundtrip(b"ab");
    assert_roundtrip(b"aaab");
    assert_roundtrip(b"abababababababababbbbbbbbbbbbbbbbbbbbbbbbbb");
}

#[test]
fn test_roundtrip_single_symbol() {
    assert_roundtrip(b"a");
    assert_roundtrip(&[0x00; 7]);
    assert_roundtrip(&[0xFF; 4096]);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let data: Vec<u8> = (0..=255).collect();
    assert_roundtrip(&data);

    let encoded = encode(&data).unwrap();
    let header = ContainerHeader::parse(&mut encoded.as_slice()).unwrap();
    assert_eq!(header.table.len(), 256);
    // 256 equal weights give a perfectly balanced tree
    assert_eq!(header.table.min_code_len(), 8);
    assert_eq!(header.table.max_code_len(), 8);
    assert_eq!(header.payload_len, 256);
}

#[test]
fn test_roundtrip_random() {
    for (size, seed) in [(1, 7), (17, 11), (1000, 13), (65_536, 0x123456789ABCDEF0)] {
        assert_roundtrip(&lcg_bytes(size, seed));
    }
}

#[test]
fn test_roundtrip_deepest_allowed_tree() {
    // 24 symbols: depth 23, the container limit
    let data = fibonacci_bytes(24);
    let encoded = encode(&data).unwrap();
    let header = ContainerHeader::parse(&mut encoded.as_slice()).unwrap();
    assert_eq!(header.table.max_code_len(), MAX_CODE_LENGTH);
    assert_eq!(decode(&encoded).unwrap(), data);
}

// ============================================================================
// Code table properties
// ============================================================================

#[test]
fn test_codes_are_prefix_free() {
    let inputs: Vec<Vec<u8>> = vec![
        b"abracadabra".to_vec(),
        lcg_bytes(5000, 99),
        fibonacci_bytes(12),
        (0..=255).collect(),
    ];

    for data in inputs {
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(&data)).unwrap();
        let table = CodeTable::from_tree(tree, MAX_CODE_LENGTH).unwrap();
        let codes: Vec<_> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }
}

#[test]
fn test_table_size_matches_distinct_bytes() {
    for data in [
        b"hello".to_vec(),
        b"zzzz".to_vec(),
        lcg_bytes(300, 5),
        b"the rain in spain".to_vec(),
    ] {
        let encoded = encode(&data).unwrap();
        let table_size = u32::from_be_bytes([encoded[2], encoded[3], encoded[4], encoded[5]]);
        assert_eq!(
            table_size as usize,
            Histogram::from_bytes(&data).distinct()
        );
        assert!(table_size <= 256);
    }
}

#[test]
fn test_huffman_is_optimal_for_known_input() {
    // a:5 b:2 r:2 c:1 d:1 -> 23 bits for an optimal code
    let data = b"abracadabra";
    let encoded = encode(data).unwrap();
    let container = Container::from_bytes(&encoded).unwrap();
    assert_eq!(
        container.table.encoded_bit_len(&Histogram::from_bytes(data)),
        23
    );
    assert_eq!(container.payload.len(), 3);
}

// ============================================================================
// Bit-exact layout
// ============================================================================

#[test]
fn test_layout_aaab() {
    let expected: Vec<u8> = vec![
        0x1F, 0xA0, // signature
        0x00, 0x00, 0x00, 0x02, // table size
        0x61, 0x01, 0x00, 0x00, 0x02, // 'a' -> "1"
        0x62, 0x01, 0x00, 0x00, 0x00, // 'b' -> "0"
        0x00, 0x00, 0x00, 0x04, // symbol count
        0x00, 0x00, 0x00, 0x01, // payload bytes
        0xE0, // 1110_0000
    ];
    assert_eq!(encode(b"aaab").unwrap(), expected);
}

#[test]
fn test_layout_four_equal_symbols() {
    // a=00 b=01 c=10 d=11, payload 00011011
    let encoded = encode(b"abcd").unwrap();
    assert_eq!(
        &encoded[6..26],
        &[
            0x61, 0x02, 0x00, 0x00, 0x00, //
            0x62, 0x02, 0x00, 0x00, 0x02, //
            0x63, 0x02, 0x00, 0x00, 0x04, //
            0x64, 0x02, 0x00, 0x00, 0x06, //
        ]
    );
    assert_eq!(&encoded[26..], &[0, 0, 0, 4, 0, 0, 0, 1, 0b0001_1011]);
}

#[test]
fn test_encoding_is_deterministic() {
    let data = lcg_bytes(10_000, 42);
    let first = encode(&data).unwrap();
    for _ in 0..5 {
        assert_eq!(encode(&data).unwrap(), first);
    }
}

// ============================================================================
// Decoder robustness
// ============================================================================

#[test]
fn test_padding_tolerance() {
    let data = b"padding must never become symbols";
    let mut container = Container::from_bytes(&encode(data).unwrap()).unwrap();
    container.payload.extend_from_slice(&[0x00; 8]);

    let padded = container.to_bytes().unwrap();
    assert_eq!(decode(&padded).unwrap(), data);
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let data = b"trailing garbage";
    let mut encoded = encode(data).unwrap();
    encoded.extend_from_slice(b"\xFF\xFF junk");
    assert_eq!(decode(&encoded).unwrap(), data);
}

#[test]
fn test_empty_input_produces_nothing() {
    assert!(encode(b"").unwrap().is_empty());
    let encoder = HuffmanEncoder::new();
    assert!(encoder.build_container(b"").unwrap().is_none());
}

#[test]
fn test_rejects_bad_signature() {
    let mut encoded = encode(b"signature").unwrap();
    encoded[1] = 0xA1;
    assert!(matches!(
        decode(&encoded),
        Err(OxiHuffError::InvalidMagic { .. })
    ));
}

#[test]
fn test_rejects_truncated_container() {
    let encoded = encode(b"truncate me somewhere in the middle").unwrap();
    for len in [0, 1, 2, 5, 10, encoded.len() - 1] {
        let err = decode(&encoded[..len]).unwrap_err();
        assert!(err.is_format_error(), "length {len}: {err}");
    }
}

#[test]
fn test_rejects_inflated_symbol_count() {
    let data = b"count";
    let mut container = Container::from_bytes(&encode(data).unwrap()).unwrap();
    container.symbol_count += 100;
    let err = decode(&container.to_bytes().unwrap()).unwrap_err();
    assert!(matches!(err, OxiHuffError::CorruptedData { .. }));
}

#[test]
fn test_rejects_code_length_out_of_range() {
    let mut encoded = encode(b"aaab").unwrap();
    // Length byte of the first table entry
    encoded[7] = 24;
    assert!(matches!(
        decode(&encoded),
        Err(OxiHuffError::CorruptedData { offset: 7, .. })
    ));
}

// ============================================================================
// Code length limit
// ============================================================================

#[test]
fn test_tree_too_deep_for_container() {
    // 25 symbols: depth 24, one more than the table entry can hold
    let data = fibonacci_bytes(25);
    let err = encode(&data).unwrap_err();
    assert!(matches!(
        err,
        OxiHuffError::CodeTooLong {
            length: 24,
            max: 23,
            ..
        }
    ));
}

#[test]
fn test_configured_code_length_limit() {
    let data = fibonacci_bytes(10);
    let strict = HuffmanEncoder::with_config(HuffmanConfig::new(8)).unwrap();
    assert!(matches!(
        strict.compress_to_vec(&data),
        Err(OxiHuffError::CodeTooLong { length: 9, .. })
    ));

    let relaxed = HuffmanEncoder::with_config(HuffmanConfig::new(9)).unwrap();
    let encoded = relaxed.compress_to_vec(&data).unwrap();
    assert_eq!(decode(&encoded).unwrap(), data);
}
