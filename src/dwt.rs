//! Single-level forward discrete wavelet transform.
//!
//! The signal is convolved with `dec_lo` and `dec_hi` and every second
//! result is kept, starting where the last tap lines up with `x[0]`. The
//! offset axis is walked in four phases so that bounds are only considered
//! where a filter window can actually overhang an edge:
//!
//! ```text
//! 1. left overhang        y y[A B C D E F]          taps past x[0] are extended
//!                        [d c b a]
//! 2. interior            [A B C D E F]              plain dot product
//!                             [d c b a]
//! 3. signal < filter    y y[A B C]x x x             right extension, overlap,
//!                      [h g f e d c b a]            then left extension
//! 4. right overhang      [A B C D E F]x x           taps past x[len-1] are extended
//!                                [d c b a]
//! ```
//!
//! Only one of phase 2 and phase 3 is ever non-empty. Decimation is fused
//! into the offset loop, which advances by [`STEP`].

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::extension::{extend_left, extend_right, ExtensionMode, VirtualSample};
use crate::num::Sample;
use crate::wavelet::{Wavelet, WaveletError};

#[cfg(feature = "parallel")]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

/// Decimation factor.
pub const STEP: usize = 2;

/// Number of coefficients produced per output sequence.
///
/// This is `ceil(signal_len / 2)` for two-tap filters; longer filters add
/// `(filter_len - 2) / 2` boundary coefficients.
pub const fn output_len(signal_len: usize, filter_len: usize) -> usize {
    (signal_len + filter_len).saturating_sub(1) / STEP
}

/// Running low-pass and high-pass sums for one output offset.
struct Sums<A> {
    lo: A,
    hi: A,
}

impl<A: Copy> Sums<A> {
    #[inline(always)]
    fn mac<T: Sample<Acc = A>>(&mut self, wavelet: &Wavelet<'_, T>, tap: usize, sample: A) {
        self.lo = T::mac(self.lo, wavelet.dec_lo[tap], sample);
        self.hi = T::mac(self.hi, wavelet.dec_hi[tap], sample);
    }

    #[inline(always)]
    fn apply<T: Sample<Acc = A>>(
        &mut self,
        wavelet: &Wavelet<'_, T>,
        tap: usize,
        sample: VirtualSample<A>,
    ) {
        match sample {
            VirtualSample::Plus(v) => self.mac(wavelet, tap, v),
            VirtualSample::Minus(v) => {
                self.lo = T::msu(self.lo, wavelet.dec_lo[tap], v);
                self.hi = T::msu(self.hi, wavelet.dec_hi[tap], v);
            }
        }
    }
}

/// Taps whose source sample `x[offset - tap]` lies inside the signal.
#[inline(always)]
fn accumulate_overlap<T: Sample>(
    sums: &mut Sums<T::Acc>,
    signal: &[T],
    wavelet: &Wavelet<'_, T>,
    offset: usize,
    taps: Range<usize>,
) {
    debug_assert!(taps.end <= wavelet.len());
    debug_assert!(taps.is_empty() || offset - taps.start < signal.len());
    for tap in taps {
        sums.mac(wavelet, tap, signal[offset - tap].widen());
    }
}

/// Taps `first..len` reach before `x[0]`.
#[inline(always)]
fn accumulate_left<T: Sample>(
    sums: &mut Sums<T::Acc>,
    signal: &[T],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
    offset: usize,
    first: usize,
) {
    if mode.substitutes_index() {
        return;
    }
    for tap in first..wavelet.len() {
        if let Some(v) = extend_left(mode, signal, tap - offset) {
            sums.apply(wavelet, tap, v);
        }
    }
}

/// Taps that reach past `x[len - 1]`; returns the first tap that does not.
///
/// For periodic and zero extension the overhanging taps are skipped by
/// moving the tap index straight to the opposite boundary.
#[inline(always)]
fn accumulate_right<T: Sample>(
    sums: &mut Sums<T::Acc>,
    signal: &[T],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
    offset: usize,
) -> usize {
    let last = signal.len() - 1;
    debug_assert!(offset > last);
    let overhang = (offset - last).min(wavelet.len());
    if !mode.substitutes_index() {
        for tap in 0..overhang {
            if let Some(v) = extend_right(mode, signal, offset - tap - last) {
                sums.apply(wavelet, tap, v);
            }
        }
    }
    overhang
}

/// The allocation-free kernel. Inputs must already be validated.
fn forward_kernel<T: Sample>(
    signal: &[T],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
    approx: &mut [T],
    detail: &mut [T],
) -> usize {
    let len = signal.len();
    let taps = wavelet.len();
    debug_assert!(len >= 1 && taps >= 2);
    debug_assert!(approx.len() >= output_len(len, taps));
    debug_assert!(detail.len() >= output_len(len, taps));

    let mut written = 0;
    let mut emit = |sums: Sums<T::Acc>| {
        approx[written] = T::narrow(sums.lo);
        detail[written] = T::narrow(sums.hi);
        written += 1;
    };
    let fresh = || Sums {
        lo: T::acc_zero(),
        hi: T::acc_zero(),
    };

    let mut offset = STEP - 1;

    // 1. Left overhang.
    while offset < taps - 1 && offset < len {
        let mut sums = fresh();
        accumulate_overlap(&mut sums, signal, wavelet, offset, 0..offset + 1);
        accumulate_left(&mut sums, signal, wavelet, mode, offset, offset + 1);
        emit(sums);
        offset += STEP;
    }

    // 2. Filter fully inside the signal.
    while offset < len {
        let mut sums = fresh();
        accumulate_overlap(&mut sums, signal, wavelet, offset, 0..taps);
        emit(sums);
        offset += STEP;
    }

    // 3. Filter longer than the signal, overhanging both edges.
    while offset < taps - 1 {
        let mut sums = fresh();
        let first = accumulate_right(&mut sums, signal, wavelet, mode, offset);
        accumulate_overlap(&mut sums, signal, wavelet, offset, first..offset + 1);
        accumulate_left(&mut sums, signal, wavelet, mode, offset, offset + 1);
        emit(sums);
        offset += STEP;
    }

    // 4. Right overhang.
    while offset < len + taps - 1 {
        let mut sums = fresh();
        let first = accumulate_right(&mut sums, signal, wavelet, mode, offset);
        accumulate_overlap(&mut sums, signal, wavelet, offset, first..taps);
        emit(sums);
        offset += STEP;
    }

    written
}

fn check_buffers(needed: usize, approx: usize, detail: usize) -> Result<(), WaveletError> {
    if approx < needed || detail < needed {
        return Err(WaveletError::BufferTooSmall {
            needed,
            approx,
            detail,
        });
    }
    Ok(())
}

/// Forward DWT into caller-provided buffers.
///
/// Writes [`output_len`] coefficients to the front of `approx` and `detail`
/// and returns that count. Nothing is allocated.
///
/// # Errors
/// - [`WaveletError::EmptyInput`] if `signal` is empty.
/// - Filter shape errors from [`Wavelet::validate`].
/// - [`WaveletError::BufferTooSmall`] if either output is too short.
///
/// # Examples
/// ```
/// use fxdsp::dwt::forward_into;
/// use fxdsp::extension::ExtensionMode;
/// use fxdsp::wavelet::HAAR_Q7;
/// let mut a = [0i8; 2];
/// let mut d = [0i8; 2];
/// let n = forward_into(&[10, 20, 30, 40], &HAAR_Q7, ExtensionMode::Constant, &mut a, &mut d).unwrap();
/// assert_eq!(n, 2);
/// assert_eq!(a, [21, 49]);
/// assert_eq!(d, [-8, -8]);
/// ```
pub fn forward_into<T: Sample>(
    signal: &[T],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
    approx: &mut [T],
    detail: &mut [T],
) -> Result<usize, WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::EmptyInput);
    }
    wavelet.validate()?;
    let needed = output_len(signal.len(), wavelet.len());
    check_buffers(needed, approx.len(), detail.len())?;

    #[cfg(feature = "verbose-logging")]
    log::debug!(
        "dwt: len={} taps={} mode={} coefficients={} long_filter={}",
        signal.len(),
        wavelet.len(),
        mode,
        needed,
        signal.len() < wavelet.len()
    );

    Ok(forward_kernel(signal, wavelet, mode, approx, detail))
}

/// Forward DWT returning freshly allocated `(approx, detail)` vectors.
pub fn forward<T: Sample>(
    signal: &[T],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
) -> Result<(Vec<T>, Vec<T>), WaveletError> {
    if signal.is_empty() {
        return Err(WaveletError::EmptyInput);
    }
    wavelet.validate()?;
    let needed = output_len(signal.len(), wavelet.len());
    let mut approx = vec![T::zero(); needed];
    let mut detail = vec![T::zero(); needed];
    forward_into(signal, wavelet, mode, &mut approx, &mut detail)?;
    Ok((approx, detail))
}

/// Transform every signal in `signals` with the same filter bank and mode.
pub fn batch_forward<T: Sample>(
    signals: &[Vec<T>],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
) -> Result<(Vec<Vec<T>>, Vec<Vec<T>>), WaveletError> {
    if signals.is_empty() {
        return Err(WaveletError::EmptyInput);
    }
    #[cfg(feature = "verbose-logging")]
    log::trace!("dwt batch: {} signals", signals.len());
    let mut approxs = Vec::with_capacity(signals.len());
    let mut details = Vec::with_capacity(signals.len());
    for signal in signals {
        let (a, d) = forward(signal, wavelet, mode)?;
        approxs.push(a);
        details.push(d);
    }
    Ok((approxs, details))
}

/// Batches smaller than this stay on the calling thread.
///
/// `0` means no override.
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_ENV: OnceLock<usize> = OnceLock::new();
#[cfg(feature = "parallel")]
const DEFAULT_PARALLEL_BATCH_THRESHOLD: usize = 8;

/// Set the minimum batch size handed to the rayon pool. `0` restores the
/// environment or default value.
#[cfg(feature = "parallel")]
pub fn set_parallel_batch_threshold(signals: usize) {
    PARALLEL_BATCH_THRESHOLD_OVERRIDE.store(signals, Ordering::Relaxed);
}

/// Current parallel batch threshold.
///
/// Resolution order: [`set_parallel_batch_threshold`], then the
/// `FXDSP_PAR_BATCH_THRESHOLD` environment variable (read once), then a
/// default of 8 signals.
#[cfg(feature = "parallel")]
pub fn parallel_batch_threshold() -> usize {
    let over = PARALLEL_BATCH_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
    if over != 0 {
        return over;
    }
    *PARALLEL_BATCH_THRESHOLD_ENV.get_or_init(|| {
        std::env::var("FXDSP_PAR_BATCH_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v != 0)
            .unwrap_or(DEFAULT_PARALLEL_BATCH_THRESHOLD)
    })
}

/// [`batch_forward`] with one rayon task per signal.
///
/// Requires the `parallel` feature. The kernel keeps no shared state, so
/// signals are transformed independently and results keep input order.
#[cfg(feature = "parallel")]
pub fn parallel_batch_forward<T: Sample>(
    signals: &[Vec<T>],
    wavelet: &Wavelet<'_, T>,
    mode: ExtensionMode,
) -> Result<(Vec<Vec<T>>, Vec<Vec<T>>), WaveletError> {
    use rayon::prelude::*;
    if signals.len() < parallel_batch_threshold() {
        return batch_forward(signals, wavelet, mode);
    }
    #[cfg(feature = "verbose-logging")]
    log::trace!("dwt parallel batch: {} signals", signals.len());
    let pairs = signals
        .par_iter()
        .map(|signal| forward(signal, wavelet, mode))
        .collect::<Result<Vec<_>, WaveletError>>()?;
    Ok(pairs.into_iter().unzip())
}


#[cfg(all(feature = "internal-tests", test))]
mod property_tests {
    use super::*;
    use crate::wavelet::{DB2_Q15, DB2_Q7};
    use alloc::vec::Vec;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Direct convolution over an explicitly padded signal.
    fn padded_reference(signal: &[i16], lo: &[i16], hi: &[i16], mode: ExtensionMode) -> (Vec<i16>, Vec<i16>) {
        let taps = lo.len();
        let len = signal.len();
        let sample = |v: isize| -> Option<i32> {
            if v < 0 {
                extend_left(mode, signal, (-v) as usize).map(VirtualSample::value)
            } else if v as usize >= len {
                extend_right(mode, signal, v as usize - len + 1).map(VirtualSample::value)
            } else {
                Some(signal[v as usize] as i32)
            }
        };
        let mut a = Vec::new();
        let mut d = Vec::new();
        let mut offset = 1;
        while offset < len + taps - 1 {
            let (mut sl, mut sh) = (0i32, 0i32);
            for j in 0..taps {
                if let Some(x) = sample(offset as isize - j as isize) {
                    sl += lo[j] as i32 * x;
                    sh += hi[j] as i32 * x;
                }
            }
            a.push((sl >> 15) as i16);
            d.push((sh >> 15) as i16);
            offset += 2;
        }
        (a, d)
    }

    #[test]
    fn q15_matches_tap_by_tap_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in 1..24 {
            let signal: Vec<i16> = (0..len).map(|_| rng.gen_range(-2000..2000)).collect();
            for mode in ExtensionMode::ALL {
                let got = forward(&signal, &DB2_Q15, mode).unwrap();
                let want = padded_reference(&signal, DB2_Q15.dec_lo, DB2_Q15.dec_hi, mode);
                assert_eq!(got, want, "len {} mode {}", len, mode);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_output_len(len in 1usize..64, mode in 0u8..7) {
            let signal: Vec<i8> = (0..len).map(|i| (i % 32) as i8 - 16).collect();
            let mode = ExtensionMode::from_raw(mode);
            let (a, d) = forward(&signal, &DB2_Q7, mode).unwrap();
            prop_assert_eq!(a.len(), output_len(len, 4));
            prop_assert_eq!(d.len(), output_len(len, 4));
        }
    }
}
