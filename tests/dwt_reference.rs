use fxdsp::dwt::{forward, output_len};
use fxdsp::extension::ExtensionMode;
use fxdsp::wavelet::{Wavelet, DB2_Q7, HAAR_Q7};

/// One padded sample: its 16-bit value and whether it is subtracted.
type Padded = (i16, bool);

/// Pads `x` by `pad` samples on both sides, growing the padding one mirror
/// block at a time from the samples already placed. Values wrap at 16 bits.
fn pad(x: &[i8], pad: usize, mode: ExtensionMode) -> Vec<Padded> {
    let n = x.len();
    let mirror = |v: &Padded| *v;
    let negate = |&(v, neg): &Padded| (v, !neg);
    let through = |edge: i16| move |&(v, _): &Padded| (edge.wrapping_mul(2).wrapping_sub(v), false);
    let mut ext: Vec<Padded> = x.iter().map(|&v| (v as i16, false)).collect();
    let mut left = 0;
    while left < pad {
        let block: Vec<Padded> = match mode {
            ExtensionMode::Constant => vec![ext[0]],
            ExtensionMode::Symmetric => ext[..n].iter().rev().map(mirror).collect(),
            ExtensionMode::Antisymmetric => ext[..n].iter().rev().map(negate).collect(),
            ExtensionMode::Reflect if n > 1 => ext[1..n].iter().rev().map(mirror).collect(),
            ExtensionMode::Antireflect if n > 1 => {
                ext[1..n].iter().rev().map(through(ext[0].0)).collect()
            }
            ExtensionMode::Reflect | ExtensionMode::Antireflect => vec![ext[0]],
            ExtensionMode::Periodic | ExtensionMode::Zero => vec![(0, false)],
        };
        left += block.len();
        ext.splice(0..0, block);
    }
    let mut right = 0;
    while right < pad {
        let len = ext.len();
        let tail = &ext[len - n..];
        let block: Vec<Padded> = match mode {
            ExtensionMode::Constant => vec![tail[n - 1]],
            ExtensionMode::Symmetric => tail.iter().rev().map(mirror).collect(),
            ExtensionMode::Antisymmetric => tail.iter().rev().map(negate).collect(),
            ExtensionMode::Reflect if n > 1 => tail[..n - 1].iter().rev().map(mirror).collect(),
            ExtensionMode::Antireflect if n > 1 => {
                tail[..n - 1].iter().rev().map(through(tail[n - 1].0)).collect()
            }
            ExtensionMode::Reflect | ExtensionMode::Antireflect => vec![tail[n - 1]],
            ExtensionMode::Periodic | ExtensionMode::Zero => vec![(0, false)],
        };
        right += block.len();
        ext.extend(block);
    }
    let start = left - pad;
    ext[start..start + n + 2 * pad].to_vec()
}

/// Straight convolution of the padded signal with Q1.7 arithmetic: each
/// product is shifted by 4, then added or subtracted in a 16-bit sum.
fn reference(x: &[i8], w: &Wavelet<'_, i8>, mode: ExtensionMode) -> (Vec<i8>, Vec<i8>) {
    let taps = w.len();
    let padded = pad(x, taps, mode);
    let mut approx = Vec::new();
    let mut detail = Vec::new();
    let mut offset = 1;
    while offset < x.len() + taps - 1 {
        let (mut lo, mut hi) = (0i16, 0i16);
        for j in 0..taps {
            // padded[taps + v] holds virtual index v
            let (v, neg) = padded[taps + offset - j];
            let pl = ((w.dec_lo[j] as i32 * v as i32) >> 4) as i16;
            let ph = ((w.dec_hi[j] as i32 * v as i32) >> 4) as i16;
            if neg {
                lo = lo.wrapping_sub(pl);
                hi = hi.wrapping_sub(ph);
            } else {
                lo = lo.wrapping_add(pl);
                hi = hi.wrapping_add(ph);
            }
        }
        approx.push((lo >> 3) as i8);
        detail.push((hi >> 3) as i8);
        offset += 2;
    }
    (approx, detail)
}

fn signal(len: usize, seed: usize) -> Vec<i8> {
    (0..len)
        .map(|i| (((i * 37 + seed * 11) % 25) as i8) - 12)
        .collect()
}

fn long_filter(taps: usize) -> (Vec<i8>, Vec<i8>) {
    let lo = (0..taps).map(|j| ((j * 7 % 17) as i8) - 8).collect();
    let hi = (0..taps).map(|j| ((j * 5 % 13) as i8) - 6).collect();
    (lo, hi)
}

#[test]
/// Every mode and length agrees with the padded model for Haar and db2.
fn matches_padded_model_short_filters() {
    for w in [HAAR_Q7, DB2_Q7] {
        for len in 1..20 {
            let x = signal(len, len);
            for mode in ExtensionMode::ALL {
                let got = forward(&x, &w, mode).unwrap();
                let want = reference(&x, &w, mode);
                assert_eq!(got, want, "taps {} len {} mode {}", w.len(), len, mode);
            }
        }
    }
}

#[test]
/// Filters several times longer than the signal walk through multiple bounces.
fn matches_padded_model_long_filters() {
    for taps in [6usize, 8, 16, 32] {
        let (lo, hi) = long_filter(taps);
        let w = Wavelet::new(&lo, &hi);
        for len in 1..=taps {
            let x = signal(len, taps);
            for mode in ExtensionMode::ALL {
                let got = forward(&x, &w, mode).unwrap();
                let want = reference(&x, &w, mode);
                assert_eq!(got.0.len(), output_len(len, taps));
                assert_eq!(got, want, "taps {} len {} mode {}", taps, len, mode);
            }
        }
    }
}

#[test]
/// Antisymmetric blocks subtract the shifted product rather than adding a
/// negated sample, so the Haar low-pass of a trailing half pair cancels.
fn antisymmetric_subtracts_after_shift() {
    let x = [0i8, 0, 20];
    // 91 * 20 = 1820 is not a multiple of 16.
    let (a, d) = forward(&x, &HAAR_Q7, ExtensionMode::Antisymmetric).unwrap();
    assert_eq!(a[1], 0);
    assert_eq!(d[1], 28);
    assert_eq!((a.clone(), d.clone()), reference(&x, &HAAR_Q7, ExtensionMode::Antisymmetric));

    // Left edge: offset 1 with db2 reaches x[-1] and x[-2], both negated.
    let x = [20i8, 13, -7, 5];
    let got = forward(&x, &DB2_Q7, ExtensionMode::Antisymmetric).unwrap();
    let sub = |c: i8, v: i8| ((c as i32 * v as i32) >> 4) as i16;
    let lo = DB2_Q7.dec_lo;
    let acc = sub(lo[0], x[1]) + sub(lo[1], x[0]) - sub(lo[2], x[0]) - sub(lo[3], x[1]);
    assert_eq!(got.0[0], (acc >> 3) as i8);
    assert_eq!(got, reference(&x, &DB2_Q7, ExtensionMode::Antisymmetric));
}

#[test]
/// Antireflect extrapolation past a short full-range signal wraps at 16
/// bits instead of overflowing.
fn antireflect_long_filter_wraps() {
    let ones = [1i8; 160];
    let w = Wavelet::new(&ones, &ones);
    for x in [vec![-128i8, 127], vec![127, -128, 127], vec![-128, 0, 127, 90]] {
        for mode in ExtensionMode::ALL {
            let got = forward(&x, &w, mode).unwrap();
            assert_eq!(got.0.len(), output_len(x.len(), 160));
            assert_eq!(got, reference(&x, &w, mode), "len {} mode {}", x.len(), mode);
        }
    }
}
