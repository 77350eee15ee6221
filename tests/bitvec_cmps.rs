// Copyright 2024 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Contains tests for bit vector comparison operations. We use num-bigint as a
// reference implementation.
use logicvec::*;
use num_bigint::*;
use proptest::prelude::*;
use std::cmp::Ordering;

use bitvec_arithmetic::{from_big_int, from_big_uint, gen_big_int_pair};

fn do_test_cmp_signed(
    a: BigInt,
    b: BigInt,
    width: WidthInt,
    our: fn(&BitVector, &BitVector) -> bool,
    big: fn(BigInt, BigInt) -> bool,
) {
    let a_vec = from_big_int(&a, width);
    let b_vec = from_big_int(&b, width);
    let res_bool = our(&a_vec, &b_vec);
    let expected_bool = big(a.clone(), b.clone());
    assert_eq!(expected_bool, res_bool, "{a} {b} {expected_bool}");
}

fn do_test_cmp_unsigned(
    a_signed: BigInt,
    b_signed: BigInt,
    width: WidthInt,
    our: fn(&BitVector, &BitVector) -> bool,
    big: fn(BigUint, BigUint) -> bool,
) {
    let a = a_signed.magnitude();
    let b = b_signed.magnitude();
    let a_vec = from_big_uint(a, width);
    let b_vec = from_big_uint(b, width);
    let res_bool = our(&a_vec, &b_vec);
    let expected_bool = big(a.clone(), b.clone());
    assert_eq!(expected_bool, res_bool, "{a} {b} {expected_bool}");
}

fn do_test_cmp_greater(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_unsigned(a, b, width, |a, b| a.is_greater(b), |a, b| a > b)
}

fn do_test_cmp_greater_signed(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_signed(a, b, width, |a, b| a.is_greater_signed(b), |a, b| a > b)
}

fn do_test_cmp_greater_equal(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_unsigned(a, b, width, |a, b| a.is_greater_or_equal(b), |a, b| a >= b)
}

fn do_test_cmp_greater_equal_signed(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_signed(
        a,
        b,
        width,
        |a, b| a.is_greater_or_equal_signed(b),
        |a, b| a >= b,
    )
}

fn do_test_cmp_less(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_unsigned(a, b, width, |a, b| a < b, |a, b| a < b)
}

fn do_test_cmp_equal(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_unsigned(a, b, width, |a, b| a == b, |a, b| a == b)
}

fn do_test_cmp_equal_signed(a: BigInt, b: BigInt, width: WidthInt) {
    do_test_cmp_signed(a, b, width, |a, b| a.is_equal(b), |a, b| a == b)
}

/// Exactly one of `<`, `==`, `>` holds for known values.
fn do_test_trichotomy(a: BigInt, b: BigInt, width: WidthInt) {
    let a_vec = from_big_uint(a.magnitude(), width);
    let b_vec = from_big_uint(b.magnitude(), width);
    let holds = [a_vec < b_vec, a_vec == b_vec, a_vec > b_vec];
    assert_eq!(holds.iter().filter(|h| **h).count(), 1, "{a} {b}");
}

//////////////////////////
// Unit Tests
//////////////////////////

#[test]
fn do_test_cmp_greater_signed_regressions() {
    do_test_cmp_greater_signed(
        BigInt::parse_bytes(b"2812269376756553621043437133860079836754636903388049287067766551164406258259928767528960", 10).unwrap(),
        BigInt::parse_bytes(b"16927137481", 10).unwrap(),
        292
    );
}

#[test]
fn test_compare_across_widths() {
    let narrow = BitVector::from_u64(0xFF, 8);
    let wide = BitVector::from_u64(0x100, 70);
    assert!(narrow < wide);
    assert!(wide > narrow);
    assert_eq!(narrow.compare(&wide), Some(Ordering::Less));
    assert_eq!(BitVector::from_u64(0xFF, 70), narrow);
}

#[test]
fn test_unknown_is_unordered() {
    let a = BitVector::from_u64(3, 8);
    let x: BitVector = "8'b0000_001x".parse().unwrap();
    assert_eq!(a.partial_cmp(&x), None);
    assert!(!(a < x) && !(a > x) && !(a <= x) && !(a >= x));
    assert_ne!(a, x);
    assert_eq!(a.logic_eq(&x), Logic::X);
    assert_eq!(x.logic_eq(&x), Logic::X);
    // case equality still matches identical patterns
    assert_eq!(x, x.clone());
}

#[test]
fn test_compare_with_u64() {
    let a = BitVector::from_u64(1234, 100);
    assert_eq!(a, 1234u64);
    assert_ne!(BitVector::xs(8), 0u64);
}

//////////////////////////
// Random Tests
//////////////////////////

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5000))]

    #[test]
    fn test_cmp_greater((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_greater(a, b, width);
    }

    #[test]
    fn test_cmp_greater_signed((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_greater_signed(a, b, width);
    }

    #[test]
    fn test_cmp_greater_equal((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_greater_equal(a, b, width);
    }

    #[test]
    fn test_cmp_greater_equal_signed((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_greater_equal_signed(a, b, width);
    }

    #[test]
    fn test_cmp_less((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_less(a, b, width);
    }

    #[test]
    fn test_cmp_equal((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_equal(a, b, width);
    }

    #[test]
    fn test_cmp_equal_signed((a, b, width) in gen_big_int_pair()) {
        do_test_cmp_equal_signed(a, b, width);
    }

    #[test]
    fn test_trichotomy((a, b, width) in gen_big_int_pair()) {
        do_test_trichotomy(a, b, width);
    }
}
