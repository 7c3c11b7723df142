//! Wavelet filter banks.
//!
//! A filter bank is a pair of decomposition filters of equal, even length:
//! `dec_lo` (scaling / low-pass) and `dec_hi` (wavelet / high-pass). Taps are
//! stored in convolution order, so output sample `offset` is
//! `sum(dec[j] * x[offset - j])`.
//!
//! The tables here are a convenience. Any correctly sized pair of slices can
//! be wrapped in a [`Wavelet`].

extern crate alloc;
use alloc::vec::Vec;
use core::fmt;

use crate::num::{HAAR_COEF_Q15, HAAR_COEF_Q31, HAAR_COEF_Q7};

/// Errors reported by the DWT entry points.
///
/// These are checked once per call, before the kernel runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveletError {
    /// The input signal was empty.
    EmptyInput,
    /// The filter bank has an odd number of taps.
    FilterLengthOdd { len: usize },
    /// The filter bank has fewer than two taps.
    FilterTooShort { len: usize },
    /// `dec_lo` and `dec_hi` differ in length.
    FilterMismatch { lo: usize, hi: usize },
    /// An output buffer cannot hold every coefficient.
    BufferTooSmall {
        needed: usize,
        approx: usize,
        detail: usize,
    },
    /// A floating-point coefficient does not fit the target Q format.
    CoefficientOutOfRange { index: usize },
    /// A mode name did not match any [`ExtensionMode`](crate::extension::ExtensionMode).
    UnknownMode,
}

impl fmt::Display for WaveletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveletError::EmptyInput => write!(f, "input signal is empty"),
            WaveletError::FilterLengthOdd { len } => {
                write!(f, "filter length {} is odd", len)
            }
            WaveletError::FilterTooShort { len } => {
                write!(f, "filter length {} is below the minimum of 2", len)
            }
            WaveletError::FilterMismatch { lo, hi } => {
                write!(f, "dec_lo has {} taps but dec_hi has {}", lo, hi)
            }
            WaveletError::BufferTooSmall {
                needed,
                approx,
                detail,
            } => write!(
                f,
                "output buffers need {} elements (approx: {}, detail: {})",
                needed, approx, detail
            ),
            WaveletError::CoefficientOutOfRange { index } => {
                write!(f, "coefficient {} is outside [-1, 1)", index)
            }
            WaveletError::UnknownMode => write!(f, "unknown extension mode"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WaveletError {}

/// A borrowed decomposition filter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wavelet<'a, T> {
    /// Low-pass (scaling) taps.
    pub dec_lo: &'a [T],
    /// High-pass (wavelet) taps.
    pub dec_hi: &'a [T],
}

impl<'a, T> Wavelet<'a, T> {
    /// Wrap a filter pair. Shape is checked by [`Wavelet::validate`].
    pub const fn new(dec_lo: &'a [T], dec_hi: &'a [T]) -> Self {
        Self { dec_lo, dec_hi }
    }

    /// Number of taps.
    pub const fn len(&self) -> usize {
        self.dec_lo.len()
    }

    /// True for a filter pair without taps.
    pub const fn is_empty(&self) -> bool {
        self.dec_lo.is_empty()
    }

    /// Check the filter pair has matching, even lengths of at least two.
    pub fn validate(&self) -> Result<(), WaveletError> {
        let (lo, hi) = (self.dec_lo.len(), self.dec_hi.len());
        if lo != hi {
            return Err(WaveletError::FilterMismatch { lo, hi });
        }
        if lo < 2 {
            return Err(WaveletError::FilterTooShort { len: lo });
        }
        if lo % 2 != 0 {
            return Err(WaveletError::FilterLengthOdd { len: lo });
        }
        Ok(())
    }
}

/// A heap-backed filter pair, e.g. the result of quantizing float taps.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedWavelet<T> {
    pub dec_lo: Vec<T>,
    pub dec_hi: Vec<T>,
}

impl<T> OwnedWavelet<T> {
    /// Borrow as a [`Wavelet`].
    pub fn as_wavelet(&self) -> Wavelet<'_, T> {
        Wavelet::new(&self.dec_lo, &self.dec_hi)
    }
}

fn quantize<T>(
    dec_lo: &[f32],
    dec_hi: &[f32],
    frac_bits: i32,
    convert: impl Fn(f32) -> T,
) -> Result<OwnedWavelet<T>, WaveletError> {
    Wavelet::new(dec_lo, dec_hi).validate()?;
    let scale = libm::ldexpf(1.0, frac_bits);
    let quantize_one = |taps: &[f32], base: usize| -> Result<Vec<T>, WaveletError> {
        taps.iter()
            .enumerate()
            .map(|(i, &c)| {
                // Q1.x covers [-1, 1); one full-scale step short of +1 is the top code.
                let q = libm::roundf(c * scale);
                if !q.is_finite() || q < -scale || q >= scale {
                    Err(WaveletError::CoefficientOutOfRange { index: base + i })
                } else {
                    Ok(convert(q))
                }
            })
            .collect()
    };
    let lo = quantize_one(dec_lo, 0)?;
    let hi = quantize_one(dec_hi, dec_lo.len())?;
    Ok(OwnedWavelet { dec_lo: lo, dec_hi: hi })
}

/// Round float taps to Q1.7. Coefficient indices in errors count `dec_lo` first.
pub fn quantize_q7(dec_lo: &[f32], dec_hi: &[f32]) -> Result<OwnedWavelet<i8>, WaveletError> {
    quantize(dec_lo, dec_hi, 7, |q| q as i8)
}

/// Round float taps to Q1.15.
pub fn quantize_q15(dec_lo: &[f32], dec_hi: &[f32]) -> Result<OwnedWavelet<i16>, WaveletError> {
    quantize(dec_lo, dec_hi, 15, |q| q as i16)
}

/// Round float taps to Q1.31.
///
/// `f32` carries 24 bits of mantissa, so the low bits of the result are zero.
pub fn quantize_q31(dec_lo: &[f32], dec_hi: &[f32]) -> Result<OwnedWavelet<i32>, WaveletError> {
    quantize(dec_lo, dec_hi, 31, |q| q as i32)
}

const FRAC_1_SQRT_2: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Haar filter bank, `f32`.
pub const HAAR_F32: Wavelet<'static, f32> = Wavelet::new(
    &[FRAC_1_SQRT_2, FRAC_1_SQRT_2],
    &[-FRAC_1_SQRT_2, FRAC_1_SQRT_2],
);
/// Haar filter bank, Q1.7.
pub const HAAR_Q7: Wavelet<'static, i8> =
    Wavelet::new(&[HAAR_COEF_Q7, HAAR_COEF_Q7], &[-HAAR_COEF_Q7, HAAR_COEF_Q7]);
/// Haar filter bank, Q1.15.
pub const HAAR_Q15: Wavelet<'static, i16> = Wavelet::new(
    &[HAAR_COEF_Q15, HAAR_COEF_Q15],
    &[-HAAR_COEF_Q15, HAAR_COEF_Q15],
);
/// Haar filter bank, Q1.31.
pub const HAAR_Q31: Wavelet<'static, i32> = Wavelet::new(
    &[HAAR_COEF_Q31, HAAR_COEF_Q31],
    &[-HAAR_COEF_Q31, HAAR_COEF_Q31],
);

/// Daubechies-2 (4 taps), `f32`.
pub const DB2_F32: Wavelet<'static, f32> = Wavelet::new(
    &[
        -0.129_409_52,
        0.224_143_87,
        0.836_516_3,
        0.482_962_9,
    ],
    &[
        -0.482_962_9,
        0.836_516_3,
        -0.224_143_87,
        -0.129_409_52,
    ],
);
/// Daubechies-2 (4 taps), Q1.7.
pub const DB2_Q7: Wavelet<'static, i8> = Wavelet::new(&[-17, 29, 107, 62], &[-62, 107, -29, -17]);
/// Daubechies-2 (4 taps), Q1.15.
pub const DB2_Q15: Wavelet<'static, i16> = Wavelet::new(
    &[-4240, 7345, 27411, 15826],
    &[-15826, 27411, -7345, -4240],
);
/// Daubechies-2 (4 taps), Q1.31.
pub const DB2_Q31: Wavelet<'static, i32> = Wavelet::new(
    &[-277_904_834, 481_345_291, 1_796_405_084, 1_037_154_959],
    &[-1_037_154_959, 1_796_405_084, -481_345_291, -277_904_834],
);
