//! Exploratory discrete Laplace-style panel.
//!
//! `L(s) = |sum_n f(t_n) * exp(-s * t_n)| * dt` evaluated by brute force on a
//! grid of `s = sigma + i*omega`. It is a visualisation aid, not a rigorous
//! transform: there is no convergence or stability handling.

use crate::config::LaplaceConfig;
use crate::fft::ifft;
use crate::plane::Plane;
use glam::Vec2;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Samples of the Laplace surface; rows follow `sigmas`, columns `omegas`.
#[derive(Debug, Clone)]
pub struct LaplaceGrid {
    pub sigmas: Vec<f64>,
    pub omegas: Vec<f64>,
    pub magnitude: Plane<f64>,
}

impl LaplaceGrid {
    /// `log10(|L| + 1)`, the form shown in the dashboard.
    pub fn log_magnitude(&self) -> Plane<f64> {
        self.magnitude.map(|m| (m + 1.0).log10())
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Evaluates the panel for a 1D signal laid out over `t = linspace(0, 10, len)`.
pub fn laplace_grid(signal: &[f64], config: &LaplaceConfig) -> LaplaceGrid {
    let t = linspace(0.0, config.time_span, signal.len());
    let dt = if t.len() > 1 { t[1] - t[0] } else { 1.0 };

    let sigmas = linspace(config.sigma_range.0, config.sigma_range.1, config.sigma_steps);
    let omegas = linspace(config.omega_range.0, config.omega_range.1, config.omega_steps);

    let magnitude = Plane::from_fn(omegas.len(), sigmas.len(), |row, col| {
        let s = Complex64::new(sigmas[row], omegas[col]);
        let sum: Complex64 = signal
            .iter()
            .zip(&t)
            .map(|(&f, &tn)| f * (-s * tn).exp())
            .sum();
        sum.norm() * dt
    });

    LaplaceGrid {
        sigmas,
        omegas,
        magnitude,
    }
}

/// Number of samples kept from the impulse response.
pub const IMPULSE_SAMPLES: usize = 200;

/// Real part of the inverse DFT of a magnitude slice, first 200 samples.
pub fn impulse_response(magnitude_row: &[f64]) -> Vec<f64> {
    let spectrum: Vec<Complex64> = magnitude_row
        .iter()
        .map(|&m| Complex64::new(m, 0.0))
        .collect();
    ifft(&spectrum)
        .into_iter()
        .take(IMPULSE_SAMPLES)
        .map(|c| c.re)
        .collect()
}

/// Radius of the circle the pole markers sit on.
pub const POLE_RADIUS: f32 = 0.8;

/// Local maxima of `|signal|` at least `mean(signal)` high.
///
/// Both ends are never peaks; a flat-topped peak reports its middle index
/// (rounded down).
pub fn find_peaks(signal: &[f64]) -> Vec<usize> {
    if signal.len() < 3 {
        return Vec::new();
    }
    let height = signal.iter().sum::<f64>() / signal.len() as f64;
    let x: Vec<f64> = signal.iter().map(|v| v.abs()).collect();

    let mut peaks = Vec::new();
    let mut i = 1;
    while i < x.len() - 1 {
        if x[i - 1] < x[i] {
            //
            // Walk across a plateau.
            //
            let mut ahead = i + 1;
            while ahead < x.len() - 1 && x[ahead] == x[i] {
                ahead += 1;
            }
            if x[ahead] < x[i] {
                let peak = (i + ahead - 1) / 2;
                if x[peak] >= height {
                    peaks.push(peak);
                }
                i = ahead;
                continue;
            }
        }
        i += 1;
    }
    peaks
}

/// Peak positions mapped onto a circle of radius 0.8, at angle `2*pi*index/len`.
pub fn pole_markers(signal: &[f64]) -> Vec<Vec2> {
    let len = signal.len() as f64;
    find_peaks(signal)
        .into_iter()
        .map(|idx| {
            let angle = 2.0 * PI * idx as f64 / len;
            Vec2::new(angle.cos() as f32, angle.sin() as f32) * POLE_RADIUS
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn linspace_matches_endpoints() {
        assert_eq!(linspace(0.0, 10.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        let l = linspace(-1.0, 1.0, 5);
        assert_eq!(l, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn constant_signal_at_zero_omega_is_a_decaying_sum() {
        let signal = vec![3.0; 11];
        let config = LaplaceConfig {
            sigma_range: (0.5, 0.5),
            omega_range: (0.0, 0.0),
            sigma_steps: 1,
            omega_steps: 1,
            ..LaplaceConfig::default()
        };
        let grid = laplace_grid(&signal, &config);

        // t = 0, 1, ..., 10 and dt = 1.
        let expected: f64 = (0..11).map(|n| 3.0 * (-0.5 * n as f64).exp()).sum();
        assert_relative_eq!(grid.magnitude.at(0, 0), expected, max_relative = 1e-12);
    }

    #[test]
    fn magnitude_falls_with_sigma_for_positive_signals() {
        let signal: Vec<f64> = (0..64).map(|i| 100.0 + (i % 9) as f64).collect();
        let grid = laplace_grid(&signal, &LaplaceConfig::default());
        assert_eq!(grid.magnitude.height(), 100);
        assert_eq!(grid.magnitude.width(), 100);

        let centre = grid.omegas.len() / 2;
        for row in 1..grid.sigmas.len() {
            assert!(grid.magnitude.at(row, centre) < grid.magnitude.at(row - 1, centre));
        }
    }

    #[test]
    fn single_sample_uses_unit_step() {
        let grid = laplace_grid(&[4.0], &LaplaceConfig::default());
        // t = [0], so every cell is |4 * e^0| * 1.
        assert!(grid.magnitude.as_slice().iter().all(|&v| v == 4.0));
    }

    #[test]
    fn impulse_of_flat_spectrum_is_a_delta() {
        let response = impulse_response(&[1.0; 8]);
        assert_eq!(response.len(), 8);
        assert_abs_diff_eq!(response[0], 1.0, epsilon = 1e-12);
        for v in &response[1..] {
            assert_abs_diff_eq!(*v, 0.0, epsilon = 1e-12);
        }
        assert_eq!(impulse_response(&[1.0; 300]).len(), IMPULSE_SAMPLES);
    }

    #[test]
    fn peaks_skip_edges_and_centre_plateaus() {
        let signal = [5.0, 1.0, 4.0, 1.0, 2.0, 6.0, 6.0, 6.0, 1.0, 9.0];
        // mean = 4.1: the peak at 2 (value 4) is too low, the plateau 5..=7
        // reports 6, the edges never count.
        assert_eq!(find_peaks(&signal), vec![6]);
    }

    #[test]
    fn pole_markers_sit_on_the_circle() {
        let mut signal = vec![0.0; 8];
        signal[2] = 10.0;
        let poles = pole_markers(&signal);
        assert_eq!(poles.len(), 1);
        assert_abs_diff_eq!(poles[0].x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(poles[0].y, POLE_RADIUS, epsilon = 1e-6);
    }
}
