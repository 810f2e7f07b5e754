//! Immutable snapshots of the user-facing controls.

use crate::cloud::{CloudMode, CloudParams, LineMode, WaveParams};
use std::f64::consts::PI;
use std::ops::RangeInclusive;

pub const AMPLITUDE_RANGE: RangeInclusive<u32> = 1..=100;
pub const RESOLUTION_RANGE: RangeInclusive<u32> = 10..=200;
pub const ROTATION_SPEED_RANGE: RangeInclusive<u32> = 0..=20;
pub const WAVE_SPEED_RANGE: RangeInclusive<u32> = 1..=20;

/// Every control of the viewer, as one value.
///
/// Setters clamp to the slider ranges and return a new config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub amplitude: u32,
    pub resolution: u32,
    pub rotation_active: bool,
    pub rotation_speed: u32,
    pub wave_active: bool,
    pub wave_speed: u32,
    pub line_mode: LineMode,
    pub mode: CloudMode,
    pub tooltip: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            amplitude: 20,
            resolution: 50,
            rotation_active: true,
            rotation_speed: 2,
            wave_active: false,
            wave_speed: 5,
            line_mode: LineMode::None,
            mode: CloudMode::Image,
            tooltip: false,
        }
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

impl ViewConfig {
    pub fn with_amplitude(self, amplitude: u32) -> Self {
        Self {
            amplitude: clamp(amplitude, &AMPLITUDE_RANGE),
            ..self
        }
    }

    pub fn with_resolution(self, resolution: u32) -> Self {
        Self {
            resolution: clamp(resolution, &RESOLUTION_RANGE),
            ..self
        }
    }

    pub fn with_rotation_speed(self, speed: u32) -> Self {
        Self {
            rotation_speed: clamp(speed, &ROTATION_SPEED_RANGE),
            ..self
        }
    }

    pub fn with_wave_speed(self, speed: u32) -> Self {
        Self {
            wave_speed: clamp(speed, &WAVE_SPEED_RANGE),
            ..self
        }
    }

    pub fn with_line_mode(self, line_mode: LineMode) -> Self {
        Self { line_mode, ..self }
    }

    pub fn with_mode(self, mode: CloudMode) -> Self {
        Self { mode, ..self }
    }

    /// Parameters for the point-cloud generator at the given wave phase.
    pub fn cloud_params(&self, wave_phase: f32) -> CloudParams {
        CloudParams {
            resolution: self.resolution as usize,
            amplitude: self.amplitude as f32,
            mode: self.mode,
            line_mode: self.line_mode,
            wave: self.wave_active.then(|| WaveParams {
                phase: wave_phase,
                ..WaveParams::default()
            }),
        }
    }
}

/// Sampling of the exploratory Laplace panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LaplaceConfig {
    /// The signal is laid out over `t = linspace(0, time_span, len)`.
    pub time_span: f64,
    pub sigma_range: (f64, f64),
    pub omega_range: (f64, f64),
    pub sigma_steps: usize,
    pub omega_steps: usize,
}

impl Default for LaplaceConfig {
    fn default() -> Self {
        Self {
            time_span: 10.0,
            sigma_range: (0.01, 2.0),
            omega_range: (-PI, PI),
            sigma_steps: 100,
            omega_steps: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_to_slider_ranges() {
        let cfg = ViewConfig::default()
            .with_amplitude(0)
            .with_resolution(1000)
            .with_rotation_speed(50)
            .with_wave_speed(0);
        assert_eq!(cfg.amplitude, 1);
        assert_eq!(cfg.resolution, 200);
        assert_eq!(cfg.rotation_speed, 20);
        assert_eq!(cfg.wave_speed, 1);
    }

    #[test]
    fn wave_params_only_when_active() {
        let cfg = ViewConfig::default();
        assert!(cfg.cloud_params(1.0).wave.is_none());

        let cfg = ViewConfig {
            wave_active: true,
            ..cfg
        };
        let wave = cfg.cloud_params(1.5).wave.unwrap();
        assert_eq!(wave.phase, 1.5);
        assert_eq!(wave.depth, 0.5);
    }
}
