//! Display-oriented arrays derived from a spectrum: centre-row slices,
//! phase histogram, axis projections and log-scaled maps.

use super::stats::EPSILON;
use super::Spectrum;
use crate::plane::Plane;

/// Guard added to projection ranges before normalising.
const PROJECTION_GUARD: f64 = 1e-10;

/// Number of bins in the phase histogram.
pub const PHASE_BINS: usize = 50;

/// Cuts through the centre row of the spectrum.
#[derive(Debug, Clone, Default)]
pub struct CentralSlices {
    pub magnitude: Vec<f64>,
    pub real: Vec<f64>,
    pub imaginary: Vec<f64>,
    /// `log10(power + 1)`.
    pub log_power: Vec<f64>,
}

pub fn central_slices(spectrum: &Spectrum) -> CentralSlices {
    if spectrum.fft.is_empty() {
        return CentralSlices::default();
    }
    let row = spectrum.height() / 2;
    let fft_row = spectrum.fft.row(row);

    CentralSlices {
        magnitude: spectrum.magnitude.row(row).to_vec(),
        real: fft_row.iter().map(|c| c.re).collect(),
        imaginary: fft_row.iter().map(|c| c.im).collect(),
        log_power: spectrum
            .power
            .row(row)
            .iter()
            .map(|p| (p + 1.0).log10())
            .collect(),
    }
}

/// Equal-width histogram over `[min, max]` of the input; the last bin is
/// closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<usize>,
    /// `counts.len() + 1` bin edges.
    pub edges: Vec<f64>,
}

pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram {
            counts: vec![0; bins],
            edges: Vec::new(),
        };
    }

    let (mut lo, mut hi) = min_max(values);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0; bins];
    for &v in values {
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Histogram { counts, edges }
}

/// Distribution of phase angles over `PHASE_BINS` bins.
pub fn phase_histogram(phase: &Plane<f64>) -> Histogram {
    histogram(phase.as_slice(), PHASE_BINS)
}

/// `ln(|F| + 1)`, min-max normalised to `[0, 1]`; all zeros on a flat input.
pub fn log_magnitude_normalized(magnitude: &Plane<f64>) -> Plane<f64> {
    let log = magnitude.map(|m| (m + 1.0).ln());
    let (lo, hi) = min_max(log.as_slice());
    let range = hi - lo;
    if range > 0.0 {
        log.map(|v| (v - lo) / range)
    } else {
        log.map(|_| 0.0)
    }
}

/// Column sums (`along_x`, length w) and row sums (`along_y`, length h) of
/// the log magnitude, each min-max normalised.
#[derive(Debug, Clone, Default)]
pub struct Projections {
    pub along_x: Vec<f64>,
    pub along_y: Vec<f64>,
}

pub fn projections(magnitude: &Plane<f64>) -> Projections {
    let log = magnitude.map(|m| (m + 1.0).ln());
    let (w, h) = (log.width(), log.height());

    let mut along_x = vec![0.0; w];
    let mut along_y = vec![0.0; h];
    for row in 0..h {
        for (col, &v) in log.row(row).iter().enumerate() {
            along_x[col] += v;
            along_y[row] += v;
        }
    }

    Projections {
        along_x: normalize_guarded(along_x),
        along_y: normalize_guarded(along_y),
    }
}

fn normalize_guarded(values: Vec<f64>) -> Vec<f64> {
    if values.is_empty() {
        return values;
    }
    let (lo, hi) = min_max(&values);
    let range = hi - lo + PROJECTION_GUARD;
    values.into_iter().map(|v| (v - lo) / range).collect()
}

/// `log10(P / sum(P) + 1e-12)`.
pub fn power_spectral_density_log(power: &Plane<f64>) -> Plane<f64> {
    let total: f64 = power.as_slice().iter().sum();
    if total > 0.0 {
        power.map(|p| (p / total + EPSILON).log10())
    } else {
        power.map(|_| EPSILON.log10())
    }
}

/// Mean phase angle in radians.
pub fn mean_phase(phase: &Plane<f64>) -> f64 {
    if phase.is_empty() {
        return 0.0;
    }
    phase.as_slice().iter().sum::<f64>() / phase.len() as f64
}

pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::compute_spectrum;
    use approx::assert_abs_diff_eq;

    #[test]
    fn histogram_counts_every_value_once() {
        let h = histogram(&[0.0, 0.1, 0.5, 0.9, 1.0], 2);
        assert_eq!(h.counts, vec![2, 3]);
        assert_eq!(h.edges, vec![0.0, 0.5, 1.0]);

        let flat = histogram(&[3.0; 4], 4);
        assert_eq!(flat.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn flat_magnitude_normalises_to_zero() {
        let magnitude = Plane::from_fn(4, 4, |_, _| 7.0);
        let norm = log_magnitude_normalized(&magnitude);
        assert!(norm.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn normalised_log_magnitude_spans_unit_range() {
        let magnitude = Plane::from_vec(3, 1, vec![0.0, 10.0, 100.0]).unwrap();
        let norm = log_magnitude_normalized(&magnitude);
        assert_eq!(norm.at(0, 0), 0.0);
        assert_abs_diff_eq!(norm.at(0, 2), 1.0, epsilon = 1e-12);
        assert!(norm.at(0, 1) > 0.0 && norm.at(0, 1) < 1.0);
    }

    #[test]
    fn projections_have_axis_lengths() {
        let magnitude = Plane::from_fn(6, 3, |r, c| (r + c) as f64);
        let p = projections(&magnitude);
        assert_eq!(p.along_x.len(), 6);
        assert_eq!(p.along_y.len(), 3);
        assert_eq!(p.along_x[0], 0.0);
        assert!(p.along_x.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn slices_follow_the_centre_row() {
        let gray = Plane::from_fn(8, 5, |r, c| (r * 8 + c) as f64);
        let spec = compute_spectrum(&gray).unwrap();
        let slices = central_slices(&spec);
        assert_eq!(slices.magnitude, spec.magnitude.row(2).to_vec());
        assert_eq!(slices.real.len(), 8);
        assert_abs_diff_eq!(
            slices.log_power[4],
            (spec.power.at(2, 4) + 1.0).log10(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn psd_of_silence_is_the_guard() {
        let power = Plane::from_fn(2, 2, |_, _| 0.0);
        let psd = power_spectral_density_log(&power);
        for &v in psd.as_slice() {
            assert_abs_diff_eq!(v, -12.0, epsilon = 1e-9);
        }
    }
}
