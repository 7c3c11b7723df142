//! # fxdsp - fixed-point DSP primitives for embedded cores
//!
//! Signal-processing kernels written for small, parallel, low-power
//! processors: every kernel is single-core, allocation-free on its hot path
//! and reentrant, so a runtime can hand one partition of a larger workload to
//! each core.
//!
//! ## Features
//!
//! - **Forward DWT** with seven boundary extension modes and arbitrary even
//!   filter lengths, including filters longer than the signal
//! - **Haar fast path** for the two-tap case
//! - **8, 16 and 32-bit fixed point** (Q1.7, Q1.15, Q1.31) and `f32`, sharing one
//!   generic algorithm through the [`num::Sample`] trait
//! - **Stack-only APIs** (`*_into`) next to allocating convenience wrappers
//! - **Batch processing**, optionally on a rayon pool
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls
//! - `parallel`: rayon-backed batch transforms
//! - `verbose-logging`: `log` records describing each transform
//! - `internal-tests`: property tests (proptest, rand)
//!
//! ## Fixed-point semantics
//!
//! Products are accumulated in a widened type and the final sum is narrowed
//! with an arithmetic right shift: results are truncated toward negative
//! infinity, never rounded or saturated. See [`num`] for the exact shifts.
//!
//! ## Example
//!
//! ```
//! use fxdsp::dwt::forward;
//! use fxdsp::extension::ExtensionMode;
//! use fxdsp::wavelet::DB2_Q7;
//!
//! let signal = [12i8, 20, 31, 40, 38, 22, 9, -4];
//! let (approx, detail) = forward(&signal, &DB2_Q7, ExtensionMode::Symmetric).unwrap();
//! assert_eq!(approx.len(), 5);
//! assert_eq!(detail.len(), 5);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Numeric precisions and their multiply-accumulate rules.
pub mod num;

/// Boundary extension modes
///
/// Virtual samples beyond either end of a finite signal.
pub mod extension;

/// Wavelet filter banks
///
/// Filter pair type, built-in Haar and Daubechies-2 tables, quantization.
pub mod wavelet;

/// Discrete Wavelet Transform (DWT)
///
/// Single-level forward transform with boundary handling.
pub mod dwt;

/// Haar-specialized forward DWT.
pub mod haar;

pub use dwt::{forward, forward_into, output_len};
pub use extension::ExtensionMode;
pub use haar::{haar_forward, haar_forward_into};
pub use num::Sample;
pub use wavelet::{Wavelet, WaveletError};
