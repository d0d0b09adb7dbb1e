//! Decimal arithmetic that fails instead of rounding.
//!
//! `rust_decimal` keeps at most 28 fractional digits and 96 bits of
//! mantissa. When a product or sum needs more, its `checked_*` operations
//! quietly drop digits. These helpers detect that and report it.

use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inexact {
    /// The result does not fit the decimal range at all.
    Overflow,
    /// The result fits only after dropping nonzero digits.
    Rounded,
}

pub fn exact_mul(a: Decimal, b: Decimal) -> Result<Decimal, Inexact> {
    let product = a.checked_mul(b).ok_or(Inexact::Overflow)?;
    let full_scale = a.scale() + b.scale();
    if product.scale() >= full_scale || a.is_zero() || b.is_zero() {
        return Ok(product);
    }

    // Dropping `k` digits is lossless only when 10^k divides the mantissa
    // product, so both factors together must carry k twos and k fives.
    let dropped = full_scale - product.scale();
    let (ma, mb) = (a.mantissa().unsigned_abs(), b.mantissa().unsigned_abs());
    let twos = multiplicity(ma, 2) + multiplicity(mb, 2);
    let fives = multiplicity(ma, 5) + multiplicity(mb, 5);
    if twos >= dropped && fives >= dropped {
        Ok(product)
    } else {
        Err(Inexact::Rounded)
    }
}

pub fn exact_add(a: Decimal, b: Decimal) -> Result<Decimal, Inexact> {
    let sum = a.checked_add(b).ok_or(Inexact::Overflow)?;
    let scale = sum.scale();
    if scale >= a.scale().max(b.scale()) {
        return Ok(sum);
    }

    // The digits below `scale` of both operands must add up to a whole
    // number of units at that scale.
    let below = |x: Decimal| x - x.round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let tail = below(a) + below(b);
    if tail.round_dp_with_strategy(scale, RoundingStrategy::ToZero) == tail {
        Ok(sum)
    } else {
        Err(Inexact::Rounded)
    }
}

fn multiplicity(mut n: u128, p: u128) -> u32 {
    let mut count = 0;
    while n != 0 && n % p == 0 {
        n /= p;
        count += 1;
    }
    count
}
