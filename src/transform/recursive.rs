use super::{to_complex, Transform};
use crate::complex::{twiddle, Complex64};

/// Recursive radix-2 decimation-in-time FFT.
///
/// Works on one buffer allocated per call; the recursion only passes index
/// ranges into it.
#[derive(Debug, Copy, Clone, Default)]
pub struct RecursiveFft;

impl Transform for RecursiveFft {
    fn transform(&self, samples: &[f64]) -> Vec<Complex64> {
        let mut buffer = to_complex(samples);
        let mut scratch = Vec::with_capacity(buffer.len() / 2);
        fft(&mut buffer, &mut scratch);
        buffer
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}

fn fft(range: &mut [Complex64], scratch: &mut Vec<Complex64>) {
    let len = range.len();
    if len < 2 {
        return;
    }
    let half = len / 2;

    group_even_odd(range, scratch);
    let (evens, odds) = range.split_at_mut(half);
    fft(evens, scratch);
    fft(odds, scratch);

    for k in 0..half {
        let even = range[k];
        let odd = twiddle(k, len) * range[k + half];
        range[k] = even + odd;
        range[k + half] = even - odd;
    }
}

/// Move even indices to the first half and odd indices to the second half.
fn group_even_odd(range: &mut [Complex64], scratch: &mut Vec<Complex64>) {
    let half = range.len() / 2;
    scratch.clear();
    scratch.extend(range.iter().skip(1).step_by(2));
    for i in 1..half {
        range[i] = range[2 * i];
    }
    range[half..].copy_from_slice(scratch.as_slice());
}
