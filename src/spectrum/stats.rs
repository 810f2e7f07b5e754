//! Scalar descriptors of a centred magnitude/power spectrum.

use super::centred_frequency;
use crate::error::{Error, Result};
use crate::plane::Plane;
use std::cmp::Ordering;
use std::fmt;

/// Additive guard against `log(0)` and division by zero.
pub const EPSILON: f64 = 1e-12;

/// A value per frequency axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrequencyPair {
    pub x: f64,
    pub y: f64,
}

/// Descriptive statistics of one spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSummary {
    pub width: usize,
    pub height: usize,
    pub mean: f64,
    pub max: f64,
    pub std_dev: f64,
    pub total_energy: f64,
    /// Shannon entropy of the epsilon-smoothed power distribution, in bits.
    pub entropy: f64,
    pub snr_db: f64,
    /// Power-weighted mean frequency, cycles per pixel.
    pub centroid: FrequencyPair,
    /// Power-weighted RMS spread around the centroid, cycles per pixel.
    pub bandwidth: FrequencyPair,
    pub flatness: f64,
}

/// Computes the summary of a centred spectrum.
pub fn summary_statistics(magnitude: &Plane<f64>, power: &Plane<f64>) -> Result<SpectralSummary> {
    magnitude.ensure_not_empty("magnitude spectrum")?;
    if !magnitude.same_shape(power) {
        return Err(Error::InvalidInput(format!(
            "magnitude is {}x{} but power is {}x{}",
            magnitude.width(),
            magnitude.height(),
            power.width(),
            power.height()
        )));
    }

    let mags = magnitude.as_slice();
    let pows = power.as_slice();
    let n = mags.len() as f64;

    let mean = mags.iter().sum::<f64>() / n;
    let max = mags.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = mags.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / n;
    let total_energy: f64 = pows.iter().sum();

    //
    // Entropy: with every bin nudged by epsilon, an all-zero spectrum
    // becomes uniform and scores log2(N).
    //
    let denom = total_energy + n * EPSILON;
    let entropy = -pows
        .iter()
        .map(|p| {
            let q = (p + EPSILON) / denom;
            q * q.log2()
        })
        .sum::<f64>();

    let max_power = pows.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median_power = median(pows);
    let snr_db = if median_power > 0.0 {
        10.0 * (max_power / median_power).log10()
    } else {
        0.0
    };

    let (centroid, bandwidth) = centroid_and_bandwidth(power, total_energy);

    let log_mean = mags.iter().map(|m| (m + EPSILON).ln()).sum::<f64>() / n;
    let flatness = log_mean.exp() / (mean + EPSILON);

    Ok(SpectralSummary {
        width: magnitude.width(),
        height: magnitude.height(),
        mean,
        max,
        std_dev: variance.sqrt(),
        total_energy,
        entropy,
        snr_db,
        centroid,
        bandwidth,
        flatness,
    })
}

fn centroid_and_bandwidth(power: &Plane<f64>, total: f64) -> (FrequencyPair, FrequencyPair) {
    if total <= 0.0 {
        return (FrequencyPair::default(), FrequencyPair::default());
    }

    let (w, h) = (power.width(), power.height());
    let mut centroid = FrequencyPair::default();
    for row in 0..h {
        let fy = centred_frequency(row, h);
        for (col, &p) in power.row(row).iter().enumerate() {
            centroid.x += p * centred_frequency(col, w);
            centroid.y += p * fy;
        }
    }
    centroid.x /= total;
    centroid.y /= total;

    let mut spread = FrequencyPair::default();
    for row in 0..h {
        let dy = centred_frequency(row, h) - centroid.y;
        for (col, &p) in power.row(row).iter().enumerate() {
            let dx = centred_frequency(col, w) - centroid.x;
            spread.x += p * dx * dx;
            spread.y += p * dy * dy;
        }
    }

    let bandwidth = FrequencyPair {
        x: (spread.x / total).sqrt(),
        y: (spread.y / total).sqrt(),
    };
    (centroid, bandwidth)
}

/// Median; even-length input averages the two middle values.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    let mid = sorted.len() / 2;
    let (lower, upper, _) = sorted.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if values.len() % 2 == 1 {
        upper
    } else {
        let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (below + upper) / 2.0
    }
}

/// One of the strongest bins of a centred magnitude spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPeak {
    pub row: usize,
    pub col: usize,
    pub frequency: FrequencyPair,
    pub magnitude: f64,
}

/// The `k` strongest bins, strongest first.
pub fn dominant_peaks(magnitude: &Plane<f64>, k: usize) -> Vec<FrequencyPeak> {
    let values = magnitude.as_slice();
    let k = k.min(values.len());
    if k == 0 {
        return Vec::new();
    }

    let descending = |a: &usize, b: &usize| -> Ordering { values[*b].total_cmp(&values[*a]) };

    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.select_nth_unstable_by(k - 1, descending);
    indices.truncate(k);
    indices.sort_by(descending);

    let (w, h) = (magnitude.width(), magnitude.height());
    indices
        .into_iter()
        .map(|i| {
            let (row, col) = (i / w, i % w);
            FrequencyPeak {
                row,
                col,
                frequency: FrequencyPair {
                    x: centred_frequency(col, w),
                    y: centred_frequency(row, h),
                },
                magnitude: values[i],
            }
        })
        .collect()
}

/// The `k` largest magnitude values, descending.
pub fn dominant_frequencies(magnitude: &Plane<f64>, k: usize) -> Vec<f64> {
    dominant_peaks(magnitude, k)
        .into_iter()
        .map(|p| p.magnitude)
        .collect()
}

impl fmt::Display for SpectralSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FFT dimensions     {}x{}", self.height, self.width)?;
        writeln!(f, "Mean magnitude     {:.3e}", self.mean)?;
        writeln!(f, "Max magnitude      {:.3e}", self.max)?;
        writeln!(f, "Std deviation      {:.3e}", self.std_dev)?;
        writeln!(f, "Total energy       {:.3e}", self.total_energy)?;
        writeln!(f, "Spectral entropy   {:.2} bits", self.entropy)?;
        writeln!(f, "SNR                {:.1} dB", self.snr_db)?;
        writeln!(
            f,
            "Centroid           ({:.4}, {:.4}) cyc/px",
            self.centroid.x, self.centroid.y
        )?;
        writeln!(
            f,
            "Bandwidth          ({:.4}, {:.4}) cyc/px",
            self.bandwidth.x, self.bandwidth.y
        )?;
        write!(f, "Flatness           {:.4}", self.flatness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::compute_spectrum;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    #[test]
    fn zero_input_has_maximum_entropy() {
        let gray = Plane::from_fn(16, 8, |_, _| 0.0);
        let spec = compute_spectrum(&gray).unwrap();
        let s = summary_statistics(&spec.magnitude, &spec.power).unwrap();

        assert_relative_eq!(s.entropy, (128.0f64).log2(), max_relative = 1e-12);
        assert_eq!(s.snr_db, 0.0);
        assert_eq!(s.total_energy, 0.0);
        assert_eq!(s.centroid, FrequencyPair::default());
        assert_eq!(s.bandwidth, FrequencyPair::default());
    }

    #[test]
    fn constant_power_gives_zero_snr() {
        let magnitude = Plane::from_fn(5, 4, |_, _| 2.0);
        let power = magnitude.map(|m| m * m);
        let s = summary_statistics(&magnitude, &power).unwrap();

        assert_eq!(s.snr_db, 0.0);
        assert_relative_eq!(s.mean, 2.0);
        assert_abs_diff_eq!(s.std_dev, 0.0);
        assert_relative_eq!(s.flatness, 1.0, max_relative = 1e-9);
        assert_relative_eq!(s.entropy, (20.0f64).log2(), max_relative = 1e-9);
    }

    #[test]
    fn zero_median_gives_zero_snr() {
        // One bright bin, everything else dark.
        let magnitude = Plane::from_fn(4, 4, |r, c| if r == 2 && c == 2 { 9.0 } else { 0.0 });
        let power = magnitude.map(|m| m * m);
        let s = summary_statistics(&magnitude, &power).unwrap();
        assert_eq!(s.snr_db, 0.0);
        assert_relative_eq!(s.max, 9.0);
    }

    #[test]
    fn snr_uses_median_power() {
        let magnitude = Plane::from_vec(4, 1, vec![1.0, 1.0, 2.0, 10.0]).unwrap();
        let power = magnitude.map(|m| m * m);
        let s = summary_statistics(&magnitude, &power).unwrap();
        // median of [1, 1, 4, 100] is 2.5
        assert_relative_eq!(s.snr_db, 10.0 * (100.0f64 / 2.5).log10(), max_relative = 1e-12);
    }

    #[test]
    fn grating_bandwidth_matches_its_frequency() {
        let (w, h, f) = (64, 16, 8);
        let gray = Plane::from_fn(w, h, |_, c| {
            100.0 * (2.0 * PI * f as f64 * c as f64 / w as f64).sin()
        });
        let spec = compute_spectrum(&gray).unwrap();
        let s = summary_statistics(&spec.magnitude, &spec.power).unwrap();

        assert_abs_diff_eq!(s.centroid.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.centroid.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(s.bandwidth.x, f as f64 / w as f64, max_relative = 1e-6);
        assert_abs_diff_eq!(s.bandwidth.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let a = Plane::from_fn(4, 4, |_, _| 1.0);
        let b = Plane::from_fn(4, 3, |_, _| 1.0);
        assert!(matches!(summary_statistics(&a, &b), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn dominant_frequencies_are_sorted_descending() {
        let magnitude = Plane::from_vec(3, 2, vec![5.0, 1.0, 9.0, 3.0, 7.0, 2.0]).unwrap();
        assert_eq!(dominant_frequencies(&magnitude, 3), vec![9.0, 7.0, 5.0]);
        assert_eq!(dominant_frequencies(&magnitude, 10).len(), 6);
        assert!(dominant_frequencies(&magnitude, 0).is_empty());

        let top = dominant_peaks(&magnitude, 1)[0];
        assert_eq!((top.row, top.col), (0, 2));
        assert_relative_eq!(top.frequency.x, 1.0 / 3.0);
        assert_relative_eq!(top.frequency.y, -0.5);
    }

    #[test]
    fn median_of_even_and_odd_sets() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }
}
