use super::{to_complex, Transform};
use crate::complex::{twiddle, Complex64};

/// Iterative radix-2 decimation-in-time FFT.
#[derive(Debug, Copy, Clone, Default)]
pub struct IterativeFft;

impl Transform for IterativeFft {
    fn transform(&self, samples: &[f64]) -> Vec<Complex64> {
        let mut buffer = to_complex(samples);
        bit_reverse_permute(&mut buffer);

        let n = buffer.len();
        let mut size = 2;
        while size <= n {
            let half = size / 2;
            for k in 0..half {
                let w = twiddle(k, size);
                for block in (0..n).step_by(size) {
                    let even = buffer[block + k];
                    let odd = w * buffer[block + k + half];
                    buffer[block + k] = even + odd;
                    buffer[block + k + half] = even - odd;
                }
            }
            size *= 2;
        }

        buffer
    }

    fn name(&self) -> &'static str {
        "iterative"
    }
}

/// Swap every index with its bit-reversed counterpart over `log2(len)` bits.
///
/// Each pair is swapped once, so applying the permutation twice restores
/// the original order. `buffer.len()` must be a power of two.
pub fn bit_reverse_permute<T>(buffer: &mut [T]) {
    let n = buffer.len();
    if n < 2 {
        return;
    }
    debug_assert!(n.is_power_of_two(), "length {n} is not a power of two");

    let shift = usize::BITS - n.trailing_zeros();
    for k in 0..n {
        let j = k.reverse_bits() >> shift;
        if j > k {
            buffer.swap(j, k);
        }
    }
}
