//! Forward DWT of a short 8-bit signal in every boundary mode.
use fxdsp::dwt::{forward, forward_into, output_len};
use fxdsp::extension::ExtensionMode;
use fxdsp::haar::haar_forward;
use fxdsp::wavelet::{DB2_Q7, HAAR_Q7};

fn main() {
    let signal = [12i8, 20, 31, 40, 38, 22, 9];

    for mode in ExtensionMode::ALL {
        let (approx, detail) = forward(&signal, &DB2_Q7, mode).unwrap();
        println!("db2  {:>13}: approx {:?} detail {:?}", mode, approx, detail);
    }

    for mode in ExtensionMode::ALL {
        let general = forward(&signal, &HAAR_Q7, mode).unwrap();
        let fast = haar_forward(&signal, mode).unwrap();
        println!("haar {:>13}: general {:?} fast {:?}", mode, general, fast);
    }

    // Stack-only variant for targets without an allocator.
    const N: usize = output_len(7, 4);
    let mut approx = [0i8; N];
    let mut detail = [0i8; N];
    let written = forward_into(&signal, &DB2_Q7, ExtensionMode::Reflect, &mut approx, &mut detail).unwrap();
    println!("stack reflect: {} coefficients {:?} {:?}", written, approx, detail);
}
