//! Everything the analysis window shows, computed in one pass.

use crate::config::LaplaceConfig;
use crate::error::Result;
use crate::laplace::{impulse_response, laplace_grid, pole_markers, LaplaceGrid};
use crate::plane::Plane;
use crate::raster::Raster;
use crate::spectrum::derived::{
    central_slices, log_magnitude_normalized, mean_phase, phase_histogram,
    power_spectral_density_log, projections, CentralSlices, Histogram, Projections,
};
use crate::spectrum::{
    angular_profile, compute_spectrum, dominant_peaks, radial_profile, summary_statistics,
    FrequencyPeak, SpectralSummary, Spectrum,
};
use glam::Vec2;
use std::fmt;
use std::time::Instant;

/// Number of dominant bins listed.
pub const DOMINANT_COUNT: usize = 10;

pub struct Dashboard {
    pub image_width: usize,
    pub image_height: usize,
    pub image_bytes: usize,

    pub spectrum: Spectrum,
    pub summary: SpectralSummary,
    pub dominant: Vec<FrequencyPeak>,

    pub radial: Vec<f64>,
    pub angular: Vec<f64>,
    pub slices: CentralSlices,
    pub phase_histogram: Histogram,
    pub mean_phase: f64,
    pub projections: Projections,
    /// Normalised `ln(|F| + 1)`.
    pub log_magnitude: Plane<f64>,
    pub psd_log: Plane<f64>,

    pub laplace: LaplaceGrid,
    pub impulse: Vec<f64>,
    pub poles: Vec<Vec2>,
}

impl Dashboard {
    pub fn compute(raster: &Raster, laplace_config: &LaplaceConfig) -> Result<Self> {
        let started = Instant::now();

        let spectrum = compute_spectrum(&raster.grayscale())?;
        let summary = summary_statistics(&spectrum.magnitude, &spectrum.power)?;
        log::debug!(
            "Spectrum of {}x{} in {:?}",
            raster.width(),
            raster.height(),
            started.elapsed()
        );

        let center_row = raster.center_row();
        let slices = central_slices(&spectrum);

        //
        // Exploratory Laplace panel on the centre row.
        //
        let laplace_started = Instant::now();
        let laplace = laplace_grid(&center_row, laplace_config);
        let impulse = impulse_response(&slices.magnitude);
        let poles = pole_markers(&center_row);
        log::debug!("Laplace grid in {:?}", laplace_started.elapsed());

        let dashboard = Self {
            image_width: raster.width(),
            image_height: raster.height(),
            image_bytes: raster.byte_len(),
            dominant: dominant_peaks(&spectrum.magnitude, DOMINANT_COUNT),
            radial: radial_profile(&spectrum.magnitude),
            angular: angular_profile(&spectrum.magnitude),
            phase_histogram: phase_histogram(&spectrum.phase),
            mean_phase: mean_phase(&spectrum.phase),
            projections: projections(&spectrum.magnitude),
            log_magnitude: log_magnitude_normalized(&spectrum.magnitude),
            psd_log: power_spectral_density_log(&spectrum.power),
            slices,
            summary,
            spectrum,
            laplace,
            impulse,
            poles,
        };

        log::info!("Analysis finished in {:?}", started.elapsed());
        Ok(dashboard)
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Image              {}x{} RGB, {:.1} KB",
            self.image_width,
            self.image_height,
            self.image_bytes as f64 / 1024.0
        )?;
        writeln!(f, "{}", self.summary)?;
        writeln!(f, "Mean phase         {:.4} rad", self.mean_phase)?;
        writeln!(f, "Poles              {}", self.poles.len())?;
        writeln!(f)?;
        writeln!(f, "Dominant frequencies")?;
        for (rank, peak) in self.dominant.iter().enumerate() {
            writeln!(
                f,
                "  {:>2}. ({:+.4}, {:+.4}) cyc/px  |F| = {:.3e}",
                rank + 1,
                peak.frequency.x,
                peak.frequency.y,
                peak.magnitude
            )?;
        }
        Ok(())
    }
}
