// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Contains tests for bit vector operations that are easy to verify on the
// bit-level: is_negative, concat, slice, shift (<<, >>, >>>), zext, sext, reductions.
// Most generators produce four-state strings, since these operations move `x` and `z`
// bits around like any other bit.
use logicvec::*;
use proptest::prelude::*;

fn do_test_is_negative(a: &str) {
    let expected = a.starts_with('1');
    let value = BitVector::from_bit_str(a).unwrap();
    let actual = value.is_negative();
    assert_eq!(actual, expected, "{a}")
}

fn do_test_concat(a: &str, b: &str) {
    let a_value = BitVector::from_bit_str(a).unwrap();
    let b_value = BitVector::from_bit_str(b).unwrap();
    let c_value = a_value.concat(&b_value);
    let expected = format!("{a}{b}");
    assert_eq!(c_value.to_bit_str(), expected);
}

fn do_test_slice(src: &str, hi: WidthInt, lo: WidthInt) {
    assert!(
        !src.is_empty(),
        "slice only works with vectors that are at least 1-bit!"
    );
    let src_value = BitVector::from_bit_str(src).unwrap();
    assert!(hi >= lo);
    assert!(hi < src_value.width());
    let res = src_value.slice(hi, lo);
    assert_eq!(res.width(), hi - lo + 1);
    let expected: String = src
        .chars()
        .skip((src_value.width() - 1 - hi) as usize)
        .take(res.width() as usize)
        .collect();
    assert_eq!(res.to_bit_str(), expected);
}

fn do_test_shift(src: &str, by: u64, right: bool, signed: bool) {
    assert!(!(!right && signed), "left shift is always unsigned!");
    let a = BitVector::from_bit_str(src).unwrap();
    // the shift amount does not need to match the width of the value, only its least
    // significant word counts
    let b = BitVector::from_u64(by, 64);
    let by = by & Word::MAX as u64;
    let res = if right {
        if signed {
            a.arithmetic_shift_right(&b)
        } else {
            a.shift_right(&b)
        }
    } else {
        a.shift_left(&b)
    };

    let padding_len = std::cmp::min(by, a.width() as u64) as usize;
    let pad_char = if signed {
        src.chars().next().unwrap()
    } else {
        '0'
    };

    let mut expected: String = pad_char.to_string().repeat(padding_len);
    if right {
        let msb: String = src.chars().take(a.width() as usize - padding_len).collect();
        expected.push_str(&msb);
    } else {
        let mut msb: String = src.chars().skip(padding_len).collect();
        msb.push_str(&expected);
        expected = msb;
    }
    let expected = BitVector::from_bit_str(&expected).unwrap();
    assert_eq!(res.width(), a.width());
    assert_eq!(res, expected, "{src:?} {by} {res:?} {expected:?}");
}

fn do_test_shift_right(src: &str, by: u64) {
    do_test_shift(src, by, true, false);
}
fn do_test_shift_left(src: &str, by: u64) {
    do_test_shift(src, by, false, false);
}

fn do_test_arithmetic_shift_right(src: &str, by: u64) {
    do_test_shift(src, by, true, true);
}

fn do_test_zero_ext(src: &str, by: WidthInt) {
    let value = BitVector::from_bit_str(src).unwrap();
    let expected_res_width = value.width() + by;
    let actual = value.zero_extend(by);
    assert_eq!(expected_res_width, actual.width());
    let expected =
        BitVector::from_bit_str(&format!("{}{}", "0".repeat(by as usize), src)).unwrap();
    assert_eq!(
        actual,
        expected,
        "{} vs. {}",
        actual.to_bit_str(),
        expected.to_bit_str()
    );
}

fn do_test_sign_ext(src: &str, by: WidthInt) {
    assert!(!src.is_empty(), "sign extend only works for non zero bits");
    let value = BitVector::from_bit_str(src).unwrap();
    let expected_res_width = value.width() + by;
    let actual = value.sign_extend(by);
    assert_eq!(expected_res_width, actual.width());
    let sign_bit = src.chars().next().unwrap().to_string();
    let expected =
        BitVector::from_bit_str(&format!("{}{}", sign_bit.repeat(by as usize), src)).unwrap();
    assert_eq!(
        actual,
        expected,
        "{} vs. {}",
        actual.to_bit_str(),
        expected.to_bit_str()
    );
}

//////////////////////////
// generators for proptest
//////////////////////////
fn bit_str_arg() -> impl Strategy<Value = String> {
    "[01xz]+"
}

fn two_state_bit_str_arg() -> impl Strategy<Value = String> {
    "[01]+"
}

fn slice_args() -> impl Strategy<Value = (String, WidthInt, WidthInt)> {
    bit_str_arg()
        .prop_flat_map(|bits: String| {
            let len = std::cmp::max(bits.len(), 1);
            (Just(bits), 0..(len as WidthInt))
        })
        .prop_flat_map(|(bits, msb)| (Just(bits), Just(msb), 0..(msb + 1)))
}

/// biases `by` value to be more interesting
fn shift_args() -> impl Strategy<Value = (String, u64)> {
    bit_str_arg().prop_flat_map(|bits: String| {
        let len = std::cmp::max(bits.len(), 1) as u64;
        let by = prop_oneof![0..len, 0..(4 * len), any::<u64>()];
        (Just(bits), by)
    })
}

fn do_test_reductions(src: &str) {
    let value = BitVector::from_bit_str(src).unwrap();
    let ones = src.chars().filter(|c| *c == '1').count();
    assert_eq!(value.reduce_and(), Logic::from(ones == src.len()));
    assert_eq!(value.reduce_or(), Logic::from(ones > 0));
    assert_eq!(value.reduce_xor(), Logic::from(ones % 2 == 1));
}

//////////////////////////
// Unit Tests
//////////////////////////

#[test]
fn do_test_is_negative_regressions() {
    let a = "0101101001111010000111000001011010000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000";
    do_test_is_negative(a);
}

#[test]
fn test_arithmetic_shift_right_regression() {
    do_test_arithmetic_shift_right("1", 0);
    do_test_arithmetic_shift_right("10", 1);
    do_test_arithmetic_shift_right(&format!("1{}", "0".repeat(Word::BITS as usize)), 1);
    do_test_arithmetic_shift_right(&format!("1{}", "0".repeat((Word::BITS * 2) as usize)), 1);
    do_test_arithmetic_shift_right(
        &format!("1{}", "0".repeat((Word::BITS * 2) as usize)),
        Word::BITS as u64,
    );
    do_test_arithmetic_shift_right(
        &format!("1{}", "0".repeat((Word::BITS * 2) as usize)),
        Word::BITS as u64 * 2,
    );
    do_test_arithmetic_shift_right(&format!("1{}", "0".repeat(40)), u64::MAX);
}

#[test]
fn test_unknown_sign_bit_is_replicated() {
    do_test_sign_ext("x01", 5);
    do_test_sign_ext("z1", 33);
    do_test_arithmetic_shift_right("z0000001", 3);
    do_test_is_negative("x111");
}

#[test]
fn test_shift_amount_upper_word_is_ignored() {
    let src = format!("{}1", "0".repeat(99));
    do_test_shift_left(&src, 0x1_0000_0001);
    do_test_shift_right(&format!("1{}", "0".repeat(99)), 0x7_0000_0003);
    do_test_arithmetic_shift_right(&format!("1{}", "0".repeat(99)), 0x1_0000_0040);
}

#[test]
fn test_shift_left_regression() {
    // whole word moves must not leave bits above the msb
    do_test_shift_left(&"1".repeat(40), Word::BITS as u64);
    do_test_shift_left(&"1".repeat(70), 2 * Word::BITS as u64 + 1);
}

#[test]
fn test_self_swap_of_halves() {
    let mut value = BitVector::from_u64(0xABCD_1234, 32);
    let low = value.slice(15, 0);
    let high = value.slice(31, 16);
    value.select(31, 16).assign(low);
    value.select(15, 0).assign(high);
    assert_eq!(value.to_u64(), Some(0x1234_ABCD));
}

//////////////////////////
// Random Tests
//////////////////////////

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5000))]

    #[test]
    fn test_is_negative(a in bit_str_arg()) {
        do_test_is_negative(&a);
    }

    #[test]
    fn test_concat(a in bit_str_arg(), b in bit_str_arg()) {
        do_test_concat(&a, &b);
    }

    #[test]
    fn test_slice((s, msb, lsb) in slice_args()) {
        do_test_slice(&s, msb, lsb);
    }

    #[test]
    fn test_shift_right((s, by) in shift_args()) {
        do_test_shift_right(&s, by);
    }

    #[test]
    fn test_shift_left((s, by) in shift_args()) {
        do_test_shift_left(&s, by);
    }

    #[test]
    fn test_arithmetic_shift_right((s, by) in shift_args()) {
        do_test_arithmetic_shift_right(&s, by);
    }

    #[test]
    fn test_zero_extend(s in bit_str_arg(), by in 0..(1000 as WidthInt)) {
        do_test_zero_ext(&s, by);
    }

    #[test]
    fn test_sign_extend(s in bit_str_arg(), by in 0..(1000 as WidthInt)) {
        do_test_sign_ext(&s, by);
    }

    #[test]
    fn test_reductions(s in two_state_bit_str_arg()) {
        do_test_reductions(&s);
    }
}
