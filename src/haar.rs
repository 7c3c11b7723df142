//! Haar fast path.
//!
//! With only two taps every interior output is a scaled sum or difference
//! of one sample pair, so the general convolution collapses to
//!
//! ```text
//! approx[i] = c * (x[2i] + x[2i+1])
//! detail[i] = c * (x[2i] - x[2i+1])
//! ```
//!
//! and only an odd-length signal needs boundary handling, for a single
//! trailing half pair. Results agree with [`crate::dwt::forward`] on the
//! Haar filter bank to within one unit of fixed-point rounding: the fast
//! path scales the pair sum once, the general engine scales each product.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::dwt::STEP;
use crate::extension::ExtensionMode;
use crate::num::Sample;
use crate::wavelet::WaveletError;

/// Number of coefficients per output for a Haar transform of `len` samples.
pub const fn haar_output_len(len: usize) -> usize {
    len.div_ceil(STEP)
}

/// The last output of an odd-length signal, where `x[len]` is virtual.
fn trailing_pair<T: Sample>(signal: &[T], mode: ExtensionMode) -> (T, T) {
    let len = signal.len();
    let x = signal[len - 1].widen();
    // A single sample has nothing to reflect through; fall back to the edge.
    let y = if len >= 2 { signal[len - 2].widen() } else { x };
    let zero = T::acc_zero();
    let (lo, hi) = match mode {
        ExtensionMode::Constant | ExtensionMode::Symmetric => (x + x, zero),
        ExtensionMode::Reflect => (x + y, x - y),
        ExtensionMode::Antisymmetric => (zero, x + x),
        ExtensionMode::Antireflect => (x + x + x - y, y - x),
        ExtensionMode::Periodic | ExtensionMode::Zero => (x, x),
    };
    (T::haar(lo), T::haar(hi))
}

/// Haar forward transform into caller-provided buffers.
///
/// Returns the number of coefficients written, `ceil(len / 2)`.
///
/// # Examples
/// ```
/// use fxdsp::extension::ExtensionMode;
/// use fxdsp::haar::haar_forward_into;
/// let mut a = [0i8; 2];
/// let mut d = [0i8; 2];
/// haar_forward_into(&[10i8, 20, 30, 40], ExtensionMode::Constant, &mut a, &mut d).unwrap();
/// assert_eq!((a, d), ([21, 49], [-8, -8]));
/// ```
pub fn haar_forward_into<T: Sample>(
    signal: &[T],
    mode: ExtensionMode,
    approx: &mut [T],
    detail: &mut [T],
) -> Result<usize, WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::EmptyInput);
    }
    let needed = haar_output_len(signal.len());
    if approx.len() < needed || detail.len() < needed {
        return Err(WaveletError::BufferTooSmall {
            needed,
            approx: approx.len(),
            detail: detail.len(),
        });
    }

    let pairs = signal.chunks_exact(STEP);
    let half = pairs.len();
    let odd = !pairs.remainder().is_empty();
    for ((pair, a), d) in pairs.zip(approx.iter_mut()).zip(detail.iter_mut()) {
        let (x0, x1) = (pair[0].widen(), pair[1].widen());
        *a = T::haar(x0 + x1);
        *d = T::haar(x0 - x1);
    }
    if odd {
        let (a, d) = trailing_pair(signal, mode);
        approx[half] = a;
        detail[half] = d;
    }
    Ok(needed)
}

/// Haar forward transform returning `(approx, detail)`.
pub fn haar_forward<T: Sample>(
    signal: &[T],
    mode: ExtensionMode,
) -> Result<(Vec<T>, Vec<T>), WaveletError> {
    let needed = haar_output_len(signal.len());
    let mut approx = vec![T::zero(); needed];
    let mut detail = vec![T::zero(); needed];
    haar_forward_into(signal, mode, &mut approx, &mut detail)?;
    Ok((approx, detail))
}
