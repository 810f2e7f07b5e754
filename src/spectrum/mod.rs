//! Centred 2D spectrum of a grayscale field and everything derived from it.

pub mod derived;
pub mod profile;
pub mod stats;

pub use profile::{angular_profile, radial_profile};
pub use stats::{
    dominant_frequencies, dominant_peaks, summary_statistics, FrequencyPeak, SpectralSummary,
};

use crate::error::Result;
use crate::fft::{fft2, fftshift};
use crate::plane::Plane;
use num_complex::Complex64;

/// Centred DFT of a field with its element-wise derivatives.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub fft: Plane<Complex64>,
    pub magnitude: Plane<f64>,
    pub phase: Plane<f64>,
    pub power: Plane<f64>,
}

impl Spectrum {
    pub fn width(&self) -> usize {
        self.fft.width()
    }

    pub fn height(&self) -> usize {
        self.fft.height()
    }
}

/// 2D DFT of `gray` with the zero frequency shifted to the centre.
pub fn compute_spectrum(gray: &Plane<f64>) -> Result<Spectrum> {
    let fft = fftshift(&fft2(gray)?);
    let magnitude = fft.map(|c| c.norm());
    let phase = fft.map(|c| c.arg());
    let power = magnitude.map(|m| m * m);

    Ok(Spectrum {
        fft,
        magnitude,
        phase,
        power,
    })
}

/// Signed spatial frequency (cycles per pixel) of a centred bin index.
pub(crate) fn centred_frequency(index: usize, size: usize) -> f64 {
    (index as f64 - (size / 2) as f64) / size as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    #[test]
    fn zero_field_has_zero_spectrum() {
        let gray = Plane::from_fn(8, 6, |_, _| 0.0);
        let spec = compute_spectrum(&gray).unwrap();
        assert!(spec.magnitude.as_slice().iter().all(|&m| m == 0.0));
        assert!(spec.power.as_slice().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn parseval_holds_for_unnormalised_transform() {
        let (w, h) = (24, 18);
        let gray = Plane::from_fn(w, h, |r, c| {
            128.0 + 60.0 * (0.3 * c as f64).sin() * (0.7 * r as f64).cos() + ((r * c) % 7) as f64
        });
        let spec = compute_spectrum(&gray).unwrap();

        let spatial: f64 = gray.as_slice().iter().map(|v| v * v).sum();
        let spectral: f64 = spec.power.as_slice().iter().sum();
        assert_relative_eq!(spectral, (w * h) as f64 * spatial, max_relative = 1e-9);
    }

    #[test]
    fn dc_lands_in_the_centre() {
        let gray = Plane::from_fn(7, 5, |_, _| 3.0);
        let spec = compute_spectrum(&gray).unwrap();
        assert_relative_eq!(spec.magnitude.at(2, 3), 105.0, max_relative = 1e-12);
        assert_abs_diff_eq!(spec.phase.at(2, 3), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn horizontal_grating_peaks_at_its_frequency() {
        let (w, h, f) = (64, 32, 8);
        let gray = Plane::from_fn(w, h, |_, c| {
            128.0 + 100.0 * (2.0 * PI * f as f64 * c as f64 / w as f64).sin()
        });
        let spec = compute_spectrum(&gray).unwrap();

        let peaks = dominant_peaks(&spec.magnitude, 3);
        // DC first, then the symmetric pair at +/- f.
        assert_eq!((peaks[0].row, peaks[0].col), (h / 2, w / 2));
        for peak in &peaks[1..] {
            assert_eq!(peak.row, h / 2);
            let offset = (peak.col as i64 - (w / 2) as i64).unsigned_abs() as usize;
            assert!(offset.abs_diff(f) <= 1, "peak at column offset {}", offset);
        }
    }

    #[test]
    fn empty_field_is_invalid_input() {
        let gray = Plane::from_vec(0, 0, Vec::new()).unwrap();
        assert!(matches!(compute_spectrum(&gray), Err(Error::InvalidInput(_))));
    }
}
