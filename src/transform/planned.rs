use rustfft::FftPlanner;

use super::{to_complex, Transform};
use crate::complex::Complex64;

/// Forward FFT planned by `rustfft`.
///
/// The fastest of the built-in strategies. A fresh plan is made per call,
/// which keeps the strategy stateless.
#[derive(Debug, Copy, Clone, Default)]
pub struct PlannedFft;

impl Transform for PlannedFft {
    fn transform(&self, samples: &[f64]) -> Vec<Complex64> {
        let mut buffer = to_complex(samples);
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);
        buffer
    }

    fn name(&self) -> &'static str {
        "planned"
    }
}
