//! Signal boundary extension.
//!
//! A finite signal is conceptually extended past both ends so that a filter
//! window overhanging an edge still sees a full set of samples. Extension is
//! a folded bounce: the mirror is applied block by block, and long filters
//! (longer than the signal) simply walk through several blocks.
//!
//! Virtual samples are addressed by their *distance* from the edge:
//! distance `1` is the sample just before index `0` (left) or just after
//! index `len - 1` (right).

use core::fmt;
use core::str::FromStr;

use crate::num::{Accumulator, Sample};
use crate::wavelet::WaveletError;

/// How the signal is extended beyond its first and last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ExtensionMode {
    /// Repeat the edge sample: `... a a | a b c | c c ...`
    Constant = 0,
    /// Mirror, edge sample repeated: `... b a | a b c | c b ...`
    #[default]
    Symmetric = 1,
    /// Mirror through the edge sample: `... c b | a b c | b a ...`
    Reflect = 2,
    /// Negated symmetric mirror: `... -b -a | a b c | -c -b ...`
    ///
    /// Negated blocks are multiply-subtracted, see [`VirtualSample`].
    Antisymmetric = 3,
    /// Point reflection about the edge sample (affine extrapolation).
    Antireflect = 4,
    /// Taps beyond the signal are dropped; shares its path with `Zero`.
    Periodic = 5,
    /// Signal is padded with zeros.
    Zero = 6,
}

impl ExtensionMode {
    /// Every mode, in tag order.
    pub const ALL: [ExtensionMode; 7] = [
        ExtensionMode::Constant,
        ExtensionMode::Symmetric,
        ExtensionMode::Reflect,
        ExtensionMode::Antisymmetric,
        ExtensionMode::Antireflect,
        ExtensionMode::Periodic,
        ExtensionMode::Zero,
    ];

    /// Decode a raw mode tag.
    ///
    /// Unknown tags decode to [`ExtensionMode::Periodic`], which takes the
    /// index substitution path (taps outside the signal contribute nothing).
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => ExtensionMode::Constant,
            1 => ExtensionMode::Symmetric,
            2 => ExtensionMode::Reflect,
            3 => ExtensionMode::Antisymmetric,
            4 => ExtensionMode::Antireflect,
            6 => ExtensionMode::Zero,
            _ => ExtensionMode::Periodic,
        }
    }

    /// The stable numeric tag, `0..=6`.
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            ExtensionMode::Constant => "constant",
            ExtensionMode::Symmetric => "symmetric",
            ExtensionMode::Reflect => "reflect",
            ExtensionMode::Antisymmetric => "antisymmetric",
            ExtensionMode::Antireflect => "antireflect",
            ExtensionMode::Periodic => "periodic",
            ExtensionMode::Zero => "zero",
        }
    }

    /// True when out-of-range taps are skipped instead of synthesized.
    pub const fn substitutes_index(self) -> bool {
        matches!(self, ExtensionMode::Periodic | ExtensionMode::Zero)
    }
}

impl fmt::Display for ExtensionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ExtensionMode {
    type Err = WaveletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtensionMode::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or(WaveletError::UnknownMode)
    }
}

/// A synthesized sample and the sign it enters the filter sum with.
///
/// Antisymmetric extension negates whole mirror blocks. The kernel applies
/// that negation as a multiply-subtract, which differs from adding a negated
/// sample once products are shifted individually (Q1.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtualSample<A> {
    /// Multiply-accumulated into the sum.
    Plus(A),
    /// Multiply-subtracted from the sum.
    Minus(A),
}

impl<A: Accumulator> VirtualSample<A> {
    /// The signed value of the sample.
    pub fn value(self) -> A {
        match self {
            VirtualSample::Plus(v) => v,
            VirtualSample::Minus(v) => v.wrapping_neg(),
        }
    }
}

/// Virtual sample `distance` places before `signal[0]`.
///
/// Returns `None` for the index substitution modes (periodic, zero).
/// `signal` must be non-empty and `distance >= 1`.
pub fn extend_left<T: Sample>(
    mode: ExtensionMode,
    signal: &[T],
    distance: usize,
) -> Option<VirtualSample<T::Acc>> {
    debug_assert!(!signal.is_empty());
    debug_assert!(distance >= 1);
    let n = signal.len();
    let at = |i: usize| signal[i].widen();
    let k = distance - 1;
    let plus = VirtualSample::Plus;
    match mode {
        ExtensionMode::Constant => Some(plus(at(0))),
        ExtensionMode::Symmetric => {
            let (block, r) = (k / n, k % n);
            Some(plus(if block % 2 == 0 { at(r) } else { at(n - 1 - r) }))
        }
        ExtensionMode::Antisymmetric => {
            let (block, r) = (k / n, k % n);
            Some(if block % 2 == 0 {
                VirtualSample::Minus(at(r))
            } else {
                plus(at(n - 1 - r))
            })
        }
        ExtensionMode::Reflect | ExtensionMode::Antireflect if n == 1 => Some(plus(at(0))),
        ExtensionMode::Reflect => {
            let period = n - 1;
            let (block, r) = (k / period, k % period + 1);
            Some(plus(if block % 2 == 0 { at(r) } else { at(n - 1 - r) }))
        }
        ExtensionMode::Antireflect => {
            let period = n - 1;
            let (block, r) = (k / period, k % period + 1);
            // Each completed block shifts the running edge by one full span.
            let span = at(n - 1).wrapping_sub(at(0));
            let edge = at(0).wrapping_sub(T::count(block).wrapping_mul(span));
            Some(plus(if block % 2 == 0 {
                edge.wrapping_sub(at(r).wrapping_sub(at(0)))
            } else {
                edge.wrapping_add(at(n - 1 - r).wrapping_sub(at(n - 1)))
            }))
        }
        ExtensionMode::Periodic | ExtensionMode::Zero => None,
    }
}

/// Virtual sample `distance` places after `signal[len - 1]`.
///
/// Returns `None` for the index substitution modes (periodic, zero).
/// `signal` must be non-empty and `distance >= 1`.
pub fn extend_right<T: Sample>(
    mode: ExtensionMode,
    signal: &[T],
    distance: usize,
) -> Option<VirtualSample<T::Acc>> {
    debug_assert!(!signal.is_empty());
    debug_assert!(distance >= 1);
    let n = signal.len();
    let at = |i: usize| signal[i].widen();
    let k = distance - 1;
    let plus = VirtualSample::Plus;
    match mode {
        ExtensionMode::Constant => Some(plus(at(n - 1))),
        ExtensionMode::Symmetric => {
            let (block, r) = (k / n, k % n);
            Some(plus(if block % 2 == 0 { at(n - 1 - r) } else { at(r) }))
        }
        ExtensionMode::Antisymmetric => {
            let (block, r) = (k / n, k % n);
            Some(if block % 2 == 0 {
                VirtualSample::Minus(at(n - 1 - r))
            } else {
                plus(at(r))
            })
        }
        ExtensionMode::Reflect | ExtensionMode::Antireflect if n == 1 => Some(plus(at(0))),
        ExtensionMode::Reflect => {
            let period = n - 1;
            let (block, r) = (k / period, k % period + 1);
            Some(plus(if block % 2 == 0 { at(n - 1 - r) } else { at(r) }))
        }
        ExtensionMode::Antireflect => {
            let period = n - 1;
            let (block, r) = (k / period, k % period + 1);
            let span = at(n - 1).wrapping_sub(at(0));
            let edge = at(n - 1).wrapping_add(T::count(block).wrapping_mul(span));
            Some(plus(if block % 2 == 0 {
                edge.wrapping_sub(at(n - 1 - r).wrapping_sub(at(n - 1)))
            } else {
                edge.wrapping_add(at(r).wrapping_sub(at(0)))
            }))
        }
        ExtensionMode::Periodic | ExtensionMode::Zero => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn left(mode: ExtensionMode, signal: &[i8], count: usize) -> Vec<i16> {
        (1..=count)
            .map(|d| extend_left(mode, signal, d).unwrap().value())
            .collect()
    }

    fn right(mode: ExtensionMode, signal: &[i8], count: usize) -> Vec<i16> {
        (1..=count)
            .map(|d| extend_right(mode, signal, d).unwrap().value())
            .collect()
    }

    const ABC: [i8; 3] = [1, 2, 4];

    #[test]
    fn constant_repeats_edges() {
        assert_eq!(left(ExtensionMode::Constant, &ABC, 4), [1, 1, 1, 1]);
        assert_eq!(right(ExtensionMode::Constant, &ABC, 4), [4, 4, 4, 4]);
    }

    #[test]
    fn symmetric_bounces_with_repeated_edge() {
        assert_eq!(left(ExtensionMode::Symmetric, &ABC, 7), [1, 2, 4, 4, 2, 1, 1]);
        assert_eq!(right(ExtensionMode::Symmetric, &ABC, 7), [4, 2, 1, 1, 2, 4, 4]);
    }

    #[test]
    fn reflect_bounces_through_edge() {
        assert_eq!(left(ExtensionMode::Reflect, &ABC, 6), [2, 4, 2, 1, 2, 4]);
        assert_eq!(right(ExtensionMode::Reflect, &ABC, 6), [2, 1, 2, 4, 2, 1]);
    }

    #[test]
    fn antisymmetric_negates_first_block_only() {
        assert_eq!(
            left(ExtensionMode::Antisymmetric, &ABC, 7),
            [-1, -2, -4, 4, 2, 1, -1]
        );
        assert_eq!(
            right(ExtensionMode::Antisymmetric, &ABC, 7),
            [-4, -2, -1, 1, 2, 4, -4]
        );
    }

    #[test]
    fn antisymmetric_marks_negated_blocks() {
        assert_eq!(
            extend_left(ExtensionMode::Antisymmetric, &ABC, 1),
            Some(VirtualSample::Minus(1i16))
        );
        assert_eq!(
            extend_left(ExtensionMode::Antisymmetric, &ABC, 4),
            Some(VirtualSample::Plus(4i16))
        );
        assert_eq!(
            extend_right(ExtensionMode::Antisymmetric, &ABC, 2),
            Some(VirtualSample::Minus(2i16))
        );
    }

    #[test]
    fn antireflect_wraps_in_accumulator_width() {
        // Span 255 per block; block 200 is far outside i16.
        let wide = [-128i8, 127];
        let left = extend_left(ExtensionMode::Antireflect, &wide, 200).unwrap().value();
        let right = extend_right(ExtensionMode::Antireflect, &wide, 200).unwrap().value();
        // Iterating edge -= span (left) and edge += span (right) in i16.
        let (mut l, mut r) = (-128i16, 127i16);
        for _ in 0..200 {
            l = l.wrapping_sub(255);
            r = r.wrapping_add(255);
        }
        assert_eq!((left, right), (l, r));
    }

    #[test]
    fn antireflect_extrapolates_affinely() {
        // Linear ramp keeps going in both directions.
        let ramp = [10i8, 12, 14, 16];
        assert_eq!(left(ExtensionMode::Antireflect, &ramp, 6), [8, 6, 4, 2, 0, -2]);
        assert_eq!(
            right(ExtensionMode::Antireflect, &ramp, 6),
            [18, 20, 22, 24, 26, 28]
        );
        // 2*1 - 2 = 0, 2*1 - 4 = -2, then -2 + (2 - 4) = -4, -2 + (1 - 4) = -5
        assert_eq!(left(ExtensionMode::Antireflect, &ABC, 4), [0, -2, -4, -5]);
        // 2*4 - 2 = 6, 2*4 - 1 = 7, then 7 + (2 - 1) = 8, 7 + (4 - 1) = 10
        assert_eq!(right(ExtensionMode::Antireflect, &ABC, 4), [6, 7, 8, 10]);
    }

    #[test]
    fn single_sample_signal_never_divides_by_zero() {
        let one = [5i8];
        for mode in ExtensionMode::ALL {
            for d in 1..=9 {
                let l = extend_left(mode, &one, d);
                let r = extend_right(mode, &one, d);
                if mode.substitutes_index() {
                    assert!(l.is_none() && r.is_none());
                } else {
                    let (l, r) = (l.unwrap().value(), r.unwrap().value());
                    assert!(l.abs() == 5 && r.abs() == 5);
                }
            }
        }
    }

    #[test]
    fn raw_tags_round_trip_and_unknown_falls_back() {
        for mode in ExtensionMode::ALL {
            assert_eq!(ExtensionMode::from_raw(mode.as_raw()), mode);
        }
        assert_eq!(ExtensionMode::from_raw(200), ExtensionMode::Periodic);
    }

    #[test]
    fn parses_names() {
        assert_eq!(
            "antireflect".parse::<ExtensionMode>(),
            Ok(ExtensionMode::Antireflect)
        );
        assert_eq!("Zero".parse::<ExtensionMode>(), Ok(ExtensionMode::Zero));
        assert_eq!(
            "smooth".parse::<ExtensionMode>(),
            Err(WaveletError::UnknownMode)
        );
    }
}
