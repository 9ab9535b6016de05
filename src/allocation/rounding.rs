// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact quotient quantization
//!
//! Fair shares are `total * balance / group_balance`. Dividing two
//! `BigDecimal`s directly rounds the quotient to the crate's default precision
//! first, which could move a value onto or off a `.5` tie. Instead both operands
//! are lifted to integers and the quotient is rounded once, from its exact
//! remainder.

use std::cmp::Ordering;

use bigdecimal::{num_bigint::BigInt, BigDecimal};
use num_traits::{One, Zero};

/// `numerator / denominator` rounded to an integer, ties to even
///
/// Both operands must be non-negative and `denominator` non-zero; the allocator
/// checks this before calling.
pub(crate) fn div_round_half_even(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    let (num_digits, num_scale) = numerator.as_bigint_and_exponent();
    let (den_digits, den_scale) = denominator.as_bigint_and_exponent();

    // n = a·10^-sa, d = b·10^-sb  =>  n/d = a·10^sb / (b·10^sa)
    let shift = den_scale - num_scale;
    let (num, den) = if shift >= 0 {
        (num_digits * pow10(shift), den_digits)
    } else {
        (num_digits, den_digits * pow10(-shift))
    };

    let quotient = &num / &den;
    let remainder = &num % &den;
    let twice_remainder = remainder * BigInt::from(2);

    let rounded = match twice_remainder.cmp(&den) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + BigInt::one(),
        Ordering::Equal => {
            if (&quotient % BigInt::from(2)).is_zero() {
                quotient
            } else {
                quotient + BigInt::one()
            }
        }
    };

    BigDecimal::new(rounded, 0)
}

fn pow10(exponent: i64) -> BigInt {
    BigInt::from(10).pow(exponent as u32)
}
