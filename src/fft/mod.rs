#[cfg(feature = "use_fftw")]
pub mod fftw;
pub mod codelets;
pub mod grid;
pub mod mixed;
pub mod prime_cache;

pub use grid::{fft2, fftshift, ifft};

use lazy_static::lazy_static;
use num_complex::Complex64;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Base interface for all DFT implementations.
///
/// Every implementation computes the unnormalised forward transform
/// `X_k = sum_n x_n * exp(-2*pi*i*k*n / N)`.
pub trait DFTBase: Send + Sync {
    /// Single transform using contiguous input/output.
    fn xform(&self, input: &[Complex64], output: &mut [Complex64]) {
        self.xform_many(input, output, 1, 0, 1, 0, 1);
    }

    /// Transform `count` sequences.
    /// `istep`  = stride between elements in one transform.
    /// `istep2` = stride between distinct transforms.
    /// `ostep`  = output element stride.
    /// `ostep2` = output transform stride.
    #[allow(clippy::too_many_arguments)]
    fn xform_many(
        &self,
        input: &[Complex64],
        output: &mut [Complex64],
        istep: usize,
        istep2: usize,
        ostep: usize,
        ostep2: usize,
        count: usize,
    );

    /// Default in-place transform: temporary buffer copy.
    fn xform_inplace(&self, buffer: &mut [Complex64]) {
        let temp = buffer.to_vec();
        self.xform_many(&temp, buffer, 1, 0, 1, 0, 1);
    }

    fn name(&self) -> String;
    fn size(&self) -> usize;
    fn is_inplace(&self) -> bool;
}

lazy_static! {
    static ref PLAN_CACHE: Mutex<HashMap<usize, Arc<dyn DFTBase>>> = Mutex::new(HashMap::new());
}

/// Largest prime factor of `n - 1` for which Rader's algorithm is preferred
/// over Bluestein's.
const RADER_SMOOTHNESS: usize = 7;

/// Returns a DFT plan for size `n`, using caching and heuristic selection.
///
/// `n` must be non-zero.
pub fn find_dft(n: usize) -> Arc<dyn DFTBase> {
    debug_assert!(n > 0, "DFT size must be non-zero");

    // Cached plan lookup.
    {
        let cache = PLAN_CACHE.lock();
        if let Some(plan) = cache.get(&n) {
            return plan.clone();
        }
    }

    // Strategy selection.
    let plan = select_plan(n);
    log::debug!("DFT plan for N={}: {}", n, plan.name());

    // Cache the plan.
    let mut cache = PLAN_CACHE.lock();
    cache.entry(n).or_insert(plan).clone()
}

#[cfg(feature = "use_fftw")]
fn select_plan(n: usize) -> Arc<dyn DFTBase> {
    match fftw::DftFftw::new(n) {
        Ok(plan) => Arc::new(plan),
        Err(err) => {
            log::warn!("FFTW planning failed for N={}: {}; using native engine", n, err);
            native_plan(n)
        }
    }
}

#[cfg(not(feature = "use_fftw"))]
fn select_plan(n: usize) -> Arc<dyn DFTBase> {
    native_plan(n)
}

/// Picks the native algorithm for size `n`.
pub fn native_plan(n: usize) -> Arc<dyn DFTBase> {
    match n {
        0 | 1 => Arc::new(codelets::DftCodelet::<codelets::Kernel1, 1>::new()),
        2 => Arc::new(codelets::DftCodelet::<codelets::Kernel2, 2>::new()),
        3 => Arc::new(codelets::DftCodelet::<codelets::Kernel3, 3>::new()),
        4 => Arc::new(codelets::DftCodelet::<codelets::Kernel4, 4>::new()),
        5 => Arc::new(codelets::DftCodelet::<codelets::Kernel5, 5>::new()),
        6 => Arc::new(codelets::DftCodelet::<codelets::Kernel6, 6>::new()),
        8 => Arc::new(codelets::DftCodelet::<codelets::Kernel8, 8>::new()),
        _ => {
            let (_factors, count) = prime_cache::get_factors_all(n);

            if count >= 2 {
                Arc::new(mixed::DFTRadix::new(n))
            } else {
                //
                // Prime size: Rader when n - 1 is smooth, Bluestein otherwise.
                //
                let (factors, _) = prime_cache::get_factors_all(n - 1);
                let smooth = factors.iter().all(|&f| f <= RADER_SMOOTHNESS);
                if smooth {
                    Arc::new(mixed::DFTRader::new(n))
                } else {
                    let nb = (2 * n - 1).next_power_of_two();
                    Arc::new(mixed::DFTBluestein::new(n, nb))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn naive_dft(input: &[Complex64]) -> Vec<Complex64> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(j, &x)| {
                        let angle = -2.0 * PI * ((k * j) % n) as f64 / n as f64;
                        x * Complex64::from_polar(1.0, angle)
                    })
                    .sum()
            })
            .collect()
    }

    fn test_signal(n: usize) -> Vec<Complex64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Complex64::new((0.37 * t).sin() + 0.1 * t, (1.3 * t).cos() - 0.05 * t)
            })
            .collect()
    }

    fn assert_matches_naive(n: usize) {
        let input = test_signal(n);
        let expected = naive_dft(&input);
        let mut output = vec![Complex64::default(); n];
        find_dft(n).xform(&input, &mut output);

        let scale = expected.iter().map(|c| c.norm()).fold(1.0, f64::max);
        for (k, (got, want)) in output.iter().zip(&expected).enumerate() {
            assert!(
                (got - want).norm() <= 1e-9 * scale,
                "N={} bin {}: got {} want {}",
                n,
                k,
                got,
                want
            );
        }
    }

    #[test]
    fn every_small_size_matches_naive_dft() {
        for n in 1..=64 {
            assert_matches_naive(n);
        }
    }

    #[test]
    fn larger_sizes_match_naive_dft() {
        for n in [96, 97, 100, 101, 127, 128, 210, 257] {
            assert_matches_naive(n);
        }
    }

    #[test]
    fn strided_batches_match_single_transforms() {
        // Three interleaved sequences of length 12.
        let n = 12;
        let count = 3;
        let input = test_signal(n * count);
        let mut output = vec![Complex64::default(); n * count];
        find_dft(n).xform_many(&input, &mut output, count, 1, count, 1, count);

        for c in 0..count {
            let seq: Vec<Complex64> = (0..n).map(|i| input[i * count + c]).collect();
            let expected = naive_dft(&seq);
            for k in 0..n {
                assert!((output[k * count + c] - expected[k]).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn plans_are_cached() {
        let a = find_dft(30);
        let b = find_dft(30);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.size(), 30);
    }

    #[test]
    fn plan_selection_names() {
        assert!(native_plan(8).name().starts_with("Codelet"));
        assert!(native_plan(12).name().starts_with("RadixP"));
        assert!(native_plan(11).name().starts_with("Rader"));
        assert!(native_plan(23).name().starts_with("Bluestein"));
    }
}
