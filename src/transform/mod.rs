//! Transform
//!
//! Time domain to frequency domain strategies. Every strategy zero-pads its
//! input to the next power of two and returns one bin per padded sample.

use std::{fmt::Display, sync::Arc};

use crate::complex::{Complex64, ZERO};

mod direct;
mod iterative;
mod planned;
mod recursive;

pub use direct::DirectDft;
pub use iterative::{bit_reverse_permute, IterativeFft};
pub use planned::PlannedFft;
pub use recursive::RecursiveFft;

/// A frequency transform over real-valued samples.
///
/// Implementations hold no per-call state, so a single instance can be
/// shared between threads.
pub trait Transform: Send + Sync {
    /// Transform `samples` into `padded_len(samples.len())` complex bins.
    fn transform(&self, samples: &[f64]) -> Vec<Complex64>;

    /// Short human readable name, used in logs.
    fn name(&self) -> &'static str;
}

/// Built-in transform strategies, chosen at configuration time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// O(n^2) reference DFT. Only useful as a correctness oracle.
    Direct,
    /// In-place radix-2 FFT with a bit-reversal permutation.
    #[default]
    Iterative,
    /// Radix-2 FFT expressed as recursion over index ranges.
    Recursive,
    /// Planned FFT from `rustfft`.
    Planned,
}

impl Algorithm {
    /// Every built-in strategy.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Direct,
        Algorithm::Iterative,
        Algorithm::Recursive,
        Algorithm::Planned,
    ];

    /// Instantiate the strategy.
    pub fn build(self) -> Arc<dyn Transform> {
        match self {
            Algorithm::Direct => Arc::new(DirectDft),
            Algorithm::Iterative => Arc::new(IterativeFft),
            Algorithm::Recursive => Arc::new(RecursiveFft),
            Algorithm::Planned => Arc::new(PlannedFft),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Smallest power of two that holds `len` samples.
#[inline]
pub fn padded_len(len: usize) -> usize {
    len.next_power_of_two()
}

/// Copy real samples into a zero-padded complex buffer of `padded_len` bins.
pub fn to_complex(samples: &[f64]) -> Vec<Complex64> {
    let mut buffer = vec![ZERO; padded_len(samples.len())];
    for (slot, &s) in buffer.iter_mut().zip(samples) {
        slot.re = s;
    }
    buffer
}
