//! Numeric precision abstraction for the DWT kernels.
//!
//! A [`Sample`] is one element of the input signal, the output coefficients
//! and the filter taps. Each precision carries a widened accumulator type
//! ([`Sample::Acc`]) which is also the type virtual (extended) samples live in,
//! so that antireflect extrapolation can leave the sample range without
//! wrapping.
//!
//! | Sample | Format | Acc   | Per-product shift | Final shift |
//! |--------|--------|-------|-------------------|-------------|
//! | `i8`   | Q1.7   | `i16` | 4                 | 3           |
//! | `i16`  | Q1.15  | `i32` | 0                 | 15          |
//! | `i32`  | Q1.31  | `i64` | 0                 | 31          |
//! | `f32`  | float  | `f32` | -                 | -           |
//!
//! Every shift is arithmetic (rounds toward negative infinity). Nothing
//! rounds and nothing saturates: keeping the result in range is the caller's
//! job.

use core::fmt::Debug;
use core::ops::{Add, Sub};

/// Right shift applied to the 8-bit accumulator before narrowing.
pub const MAC_SHIFT_Q7: u32 = 3;
/// Right shift applied to each 8-bit product before accumulation.
pub const PRODUCT_SHIFT_Q7: u32 = 4;
/// Right shift applied to the 16-bit accumulator before narrowing.
pub const MAC_SHIFT_Q15: u32 = 15;
/// Right shift applied to the 32-bit accumulator before narrowing.
pub const MAC_SHIFT_Q31: u32 = 31;

/// Shift applied after the Q1.7 Haar fast-path multiply.
pub const HAAR_SHIFT_Q7: u32 = 7;
/// Shift applied after the Q1.15 Haar fast-path multiply.
pub const HAAR_SHIFT_Q15: u32 = 15;
/// Shift applied after the Q1.31 Haar fast-path multiply.
pub const HAAR_SHIFT_Q31: u32 = 31;

/// `1/sqrt(2)` in Q1.7.
pub const HAAR_COEF_Q7: i8 = 0x5b;
/// `1/sqrt(2)` in Q1.15.
pub const HAAR_COEF_Q15: i16 = 23170;
/// `1/sqrt(2)` in Q1.31.
pub const HAAR_COEF_Q31: i32 = 1_518_500_250;

/// Widened accumulator arithmetic.
///
/// Synthesized boundary samples are built with two's complement wrap in the
/// accumulator width, so extrapolation far past a short signal stays defined.
pub trait Accumulator: Copy + PartialEq + Debug + Add<Output = Self> + Sub<Output = Self> {
    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;
}

macro_rules! impl_accumulator_int {
    ($($t:ty),*) => {$(
        impl Accumulator for $t {
            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }
            #[inline(always)]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$t>::wrapping_sub(self, rhs)
            }
            #[inline(always)]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$t>::wrapping_mul(self, rhs)
            }
            #[inline(always)]
            fn wrapping_neg(self) -> Self {
                <$t>::wrapping_neg(self)
            }
        }
    )*};
}

impl_accumulator_int!(i16, i32, i64);

impl Accumulator for f32 {
    #[inline(always)]
    fn wrapping_add(self, rhs: Self) -> Self {
        self + rhs
    }
    #[inline(always)]
    fn wrapping_sub(self, rhs: Self) -> Self {
        self - rhs
    }
    #[inline(always)]
    fn wrapping_mul(self, rhs: Self) -> Self {
        self * rhs
    }
    #[inline(always)]
    fn wrapping_neg(self) -> Self {
        -self
    }
}

/// Element type the DWT kernels operate on.
pub trait Sample: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Widened accumulator, also used for synthesized boundary samples.
    type Acc: Accumulator;

    /// The scaled `1/sqrt(2)` coefficient of the Haar filter bank.
    const HAAR_COEF: Self;

    /// Additive identity in the sample type.
    fn zero() -> Self;
    /// Additive identity in the accumulator type.
    fn acc_zero() -> Self::Acc;
    /// Lossless conversion into the accumulator type.
    fn widen(self) -> Self::Acc;
    /// Small block counts used by the antireflect extrapolation.
    fn count(n: usize) -> Self::Acc;
    /// One multiply-accumulate step: `acc + coeff * sample`, scaled per format.
    fn mac(acc: Self::Acc, coeff: Self, sample: Self::Acc) -> Self::Acc;
    /// One multiply-subtract step: `acc - coeff * sample`, scaled per format.
    ///
    /// Q1.7 shifts the product before subtracting, so this is not the same
    /// as `mac` with a negated sample.
    fn msu(acc: Self::Acc, coeff: Self, sample: Self::Acc) -> Self::Acc;
    /// Final scaling and narrowing of an accumulated dot product.
    fn narrow(acc: Self::Acc) -> Self;
    /// `HAAR_COEF * sum`, scaled and narrowed in one step.
    fn haar(sum: Self::Acc) -> Self;
}

impl Sample for i8 {
    type Acc = i16;
    const HAAR_COEF: Self = HAAR_COEF_Q7;

    #[inline(always)]
    fn zero() -> Self {
        0
    }
    #[inline(always)]
    fn acc_zero() -> i16 {
        0
    }
    #[inline(always)]
    fn widen(self) -> i16 {
        self as i16
    }
    #[inline(always)]
    fn count(n: usize) -> i16 {
        n as i16
    }
    #[inline(always)]
    fn mac(acc: i16, coeff: i8, sample: i16) -> i16 {
        // The product is formed at int width, shifted, then folded back into
        // the 16-bit accumulator with two's complement wrap.
        let product = (coeff as i32 * sample as i32) >> PRODUCT_SHIFT_Q7;
        (acc as i32 + product) as i16
    }
    #[inline(always)]
    fn msu(acc: i16, coeff: i8, sample: i16) -> i16 {
        let product = (coeff as i32 * sample as i32) >> PRODUCT_SHIFT_Q7;
        (acc as i32 - product) as i16
    }
    #[inline(always)]
    fn narrow(acc: i16) -> i8 {
        (acc >> MAC_SHIFT_Q7) as i8
    }
    #[inline(always)]
    fn haar(sum: i16) -> i8 {
        ((Self::HAAR_COEF as i32 * sum as i32) >> HAAR_SHIFT_Q7) as i8
    }
}

impl Sample for i16 {
    type Acc = i32;
    const HAAR_COEF: Self = HAAR_COEF_Q15;

    #[inline(always)]
    fn zero() -> Self {
        0
    }
    #[inline(always)]
    fn acc_zero() -> i32 {
        0
    }
    #[inline(always)]
    fn widen(self) -> i32 {
        self as i32
    }
    #[inline(always)]
    fn count(n: usize) -> i32 {
        n as i32
    }
    #[inline(always)]
    fn mac(acc: i32, coeff: i16, sample: i32) -> i32 {
        acc.wrapping_add((coeff as i32).wrapping_mul(sample))
    }
    #[inline(always)]
    fn msu(acc: i32, coeff: i16, sample: i32) -> i32 {
        acc.wrapping_sub((coeff as i32).wrapping_mul(sample))
    }
    #[inline(always)]
    fn narrow(acc: i32) -> i16 {
        (acc >> MAC_SHIFT_Q15) as i16
    }
    #[inline(always)]
    fn haar(sum: i32) -> i16 {
        ((Self::HAAR_COEF as i64 * sum as i64) >> HAAR_SHIFT_Q15) as i16
    }
}

impl Sample for i32 {
    type Acc = i64;
    const HAAR_COEF: Self = HAAR_COEF_Q31;

    #[inline(always)]
    fn zero() -> Self {
        0
    }
    #[inline(always)]
    fn acc_zero() -> i64 {
        0
    }
    #[inline(always)]
    fn widen(self) -> i64 {
        self as i64
    }
    #[inline(always)]
    fn count(n: usize) -> i64 {
        n as i64
    }
    #[inline(always)]
    fn mac(acc: i64, coeff: i32, sample: i64) -> i64 {
        acc.wrapping_add((coeff as i64).wrapping_mul(sample))
    }
    #[inline(always)]
    fn msu(acc: i64, coeff: i32, sample: i64) -> i64 {
        acc.wrapping_sub((coeff as i64).wrapping_mul(sample))
    }
    #[inline(always)]
    fn narrow(acc: i64) -> i32 {
        (acc >> MAC_SHIFT_Q31) as i32
    }
    #[inline(always)]
    fn haar(sum: i64) -> i32 {
        ((Self::HAAR_COEF as i128 * sum as i128) >> HAAR_SHIFT_Q31) as i32
    }
}

impl Sample for f32 {
    type Acc = f32;
    const HAAR_COEF: Self = core::f32::consts::FRAC_1_SQRT_2;

    #[inline(always)]
    fn zero() -> Self {
        0.0
    }
    #[inline(always)]
    fn acc_zero() -> f32 {
        0.0
    }
    #[inline(always)]
    fn widen(self) -> f32 {
        self
    }
    #[inline(always)]
    fn count(n: usize) -> f32 {
        n as f32
    }
    #[inline(always)]
    fn mac(acc: f32, coeff: f32, sample: f32) -> f32 {
        acc + coeff * sample
    }
    #[inline(always)]
    fn msu(acc: f32, coeff: f32, sample: f32) -> f32 {
        acc - coeff * sample
    }
    #[inline(always)]
    fn narrow(acc: f32) -> f32 {
        acc
    }
    #[inline(always)]
    fn haar(sum: f32) -> f32 {
        Self::HAAR_COEF * sum
    }
}
