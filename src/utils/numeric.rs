//! Type-generic numeric helpers.
//!
//! Every argument is evaluated exactly once, so side-effecting expressions
//! are safe to pass. Comparisons use `PartialOrd`, which lets the same
//! function serve integers and floats.

use std::ops::Neg;

/// Types with an additive identity.
pub trait Zero {
    const ZERO: Self;
}

macro_rules! impl_zero {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(impl Zero for $ty {
            const ZERO: Self = $zero;
        })*
    };
}

impl_zero! {
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
}

/// The smaller of two values; `a` on ties or when unordered.
#[inline]
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        b
    } else {
        a
    }
}

/// The larger of two values; `a` on ties or when unordered.
#[inline]
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        b
    } else {
        a
    }
}

/// Absolute value. `abs(i32::MIN)` overflows exactly like `-i32::MIN`.
#[inline]
pub fn abs<T>(a: T) -> T
where
    T: PartialOrd + Neg<Output = T> + Zero,
{
    if a < T::ZERO {
        -a
    } else {
        a
    }
}

/// `-1`, `0` or `1`. NaN is neither negative nor zero and yields `1`.
#[inline]
pub fn sign<T: PartialOrd + Zero>(a: T) -> i32 {
    if a < T::ZERO {
        -1
    } else if a != T::ZERO {
        1
    } else {
        0
    }
}

/// Whether `b` lies between `a` and `c` inclusive, in either direction.
#[inline]
pub fn ordered<T: PartialOrd>(a: T, b: T, c: T) -> bool {
    (a <= b && b <= c) || (c <= b && b <= a)
}
