//! Demonstrates enabling verbose logging for fxdsp.
use fxdsp::dwt::{batch_forward, forward};
use fxdsp::extension::ExtensionMode;
use fxdsp::wavelet::{DB2_F32, HAAR_Q7};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let signal = [1.0f32, 2.0, 3.0];
    forward(&signal, &DB2_F32, ExtensionMode::Antireflect).unwrap();

    let batch = vec![vec![1i8, 2, 3, 4], vec![5, 6]];
    batch_forward(&batch, &HAAR_Q7, ExtensionMode::Symmetric).unwrap();
}
