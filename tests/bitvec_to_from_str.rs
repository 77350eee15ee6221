// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Test string parsing and serialization
use logicvec::*;
use proptest::prelude::*;

fn do_test_from_to_bit_str(s: &str) {
    let value = BitVector::from_bit_str(s).unwrap();
    let bit_str = if s.starts_with('-') {
        value.to_bit_str_signed()
    } else {
        value.to_bit_str()
    };
    compare_digit_str(&bit_str, &s.to_ascii_lowercase());
}

#[test]
fn test_from_to_bit_str_regression() {
    do_test_from_to_bit_str("+0");
    do_test_from_to_bit_str("-0");
    do_test_from_to_bit_str("-1");
    do_test_from_to_bit_str("-11");
}

fn do_test_from_to_hex_str(s: &str) {
    let value = BitVector::from_hex_str(s).unwrap();
    let hex_str = if s.starts_with('-') {
        value.to_hex_str_signed()
    } else {
        value.to_hex_str()
    };
    compare_digit_str(&hex_str, &s.to_ascii_lowercase());
}

fn compare_digit_str(ours: &str, original: &str) {
    let expected = if let Some(e) = original.strip_prefix('+') {
        e.to_ascii_lowercase()
    } else {
        original.to_ascii_lowercase()
    };
    if let Some(wm) = expected.strip_prefix('-') {
        // if the original string was zero with any number of zeros, the result will always
        // be positive (we do not distinguish between -0 and +0, this is not floating point!!!
        if wm.chars().all(|c| c == '0') {
            assert_eq!(ours, wm);
        } else {
            assert_eq!(ours, expected);
        }
    } else {
        assert_eq!(ours, expected);
    }
}

#[test]
fn test_from_to_hex_str_regression() {
    do_test_from_to_hex_str("a");
    do_test_from_to_hex_str("A");
    do_test_from_to_hex_str("0aaaA0a0aAA0aaaA");
    do_test_from_to_hex_str("+A");
    do_test_from_to_hex_str("0");
    do_test_from_to_hex_str("+aaaa0aa0aaaa0aaa00a0aaaaaa00aa00");
    do_test_from_to_hex_str("-aaaa00aaaaaaaaa0");
}

fn do_test_to_from_decimal_str(s: &str) {
    let expected = BitVector::from_bit_str(s).unwrap();
    let dec_str = expected.to_dec_str();
    let actual = BitVector::from_str_radix(&dec_str, 10, expected.width()).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn test_to_from_dec_str_regression() {
    do_test_to_from_decimal_str("0");
    do_test_to_from_decimal_str("1000000");
    do_test_to_from_decimal_str(&"1".repeat(200));
}

#[test]
fn test_empty_string_is_one_zero_bit() {
    let value = BitVector::from_bit_str("").unwrap();
    assert_eq!(value.width(), 1);
    assert!(value.is_zero());
}

fn do_test_four_state_bit_str(s: &str) {
    let value = BitVector::from_bit_str(s).unwrap();
    assert_eq!(value.width() as usize, s.len());
    let expected_states = if s.contains(['x', 'z']) {
        States::FourState
    } else {
        States::TwoState
    };
    assert_eq!(value.states(), expected_states);
    assert_eq!(value.to_bit_str(), s);
}

#[test]
fn test_four_state_hex_rendering() {
    let value = BitVector::from_bit_str("xxxx_zzzz_1x00_0z01").unwrap();
    assert_eq!(value.to_hex_str(), "xzXZ");
    assert_eq!(value.to_dec_str(), "X");
    assert_eq!(BitVector::xs(70).to_dec_str(), "x");
    assert_eq!(BitVector::zs(3).to_dec_str(), "z");
    assert_eq!(BitVector::from_bit_str("0z1").unwrap().to_dec_str(), "Z");
}

#[test]
fn test_verilog_literals() {
    let value: BitVector = "16'hxx_A5".parse().unwrap();
    assert_eq!(value.to_bit_str(), "xxxxxxxx10100101");
    let value: BitVector = "8'hz".parse().unwrap();
    assert_eq!(value.to_bit_str(), "zzzzzzzz");
    let value: BitVector = "6'o17".parse().unwrap();
    assert_eq!(value.to_u64(), Some(0o17));
    let value: BitVector = "40'd1099511627775".parse().unwrap();
    assert!(value.is_all_ones());
    assert_eq!(
        "8'h1FF".parse::<BitVector>().unwrap_err().kind,
        IntErrorKind::ExceedsWidth
    );
    assert_eq!(
        "8'k00".parse::<BitVector>().unwrap_err().kind,
        IntErrorKind::InvalidLiteral
    );
}

#[test]
fn test_format_config() {
    let value = BitVector::from_u64(0x1_2345_6789, 40);
    assert_eq!(value.format(&FormatConfig::default()), "0123456789");
    let cfg = FormatConfig::hex().with_prefix(true).with_word_divider(true);
    assert_eq!(value.format(&cfg), "0x01_23456789");
    let cfg = FormatConfig::decimal().with_group_thousands(true);
    assert_eq!(value.format(&cfg), "4,886,718,345");
    assert_eq!(format!("{value}"), "0123456789");
    assert_eq!(format!("{:#x}", BitVector::from_u64(5, 4)), "0x5");
    assert_eq!(format!("{:#b}", BitVector::from_u64(5, 4)), "0b0101");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    #[test]
    fn test_from_to_bit_str(s in "([-+])?[01]+") {
        do_test_from_to_bit_str(&s);
    }
    #[test]
    fn test_from_to_hex_str(s in "([-+])?[01a-fA-F]+") {
        do_test_from_to_hex_str(&s);
    }
    #[test]
    fn test_to_from_decimal_str(s in "([-+])?[01]+") {
        do_test_to_from_decimal_str(&s);
    }
    #[test]
    fn test_four_state_bit_str(s in "[01xz]+") {
        do_test_four_state_bit_str(&s);
    }
}
