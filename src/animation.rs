//! Fixed-step clock driving the orbit and the wave phase.

use crate::cloud::CloudMode;
use crate::config::ViewConfig;
use std::f32::consts::TAU;
use std::time::Duration;

/// Interval between animation steps.
pub const TICK: Duration = Duration::from_millis(50);

/// Degrees of azimuth per tick per unit of rotation speed.
const ROTATION_STEP: f32 = 0.5;
/// Radians of wave phase per tick per unit of wave speed.
const WAVE_STEP: f32 = 0.05;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
    /// Camera azimuth in degrees, kept in `[0, 360)`.
    pub rotation_angle: f32,
    /// Kept in `[0, 2*pi)`.
    pub wave_phase: f32,
    pending: Duration,
}

impl Animation {
    /// Runs one tick. Nothing moves until an image is loaded.
    ///
    /// Returns `true` when the point cloud must be rebuilt.
    pub fn step(&mut self, config: &ViewConfig, image_loaded: bool) -> bool {
        if !image_loaded {
            return false;
        }
        if config.rotation_active {
            let delta = config.rotation_speed as f32 * ROTATION_STEP;
            self.rotation_angle = (self.rotation_angle + delta).rem_euclid(360.0);
        }
        if config.wave_active {
            let delta = config.wave_speed as f32 * WAVE_STEP;
            self.wave_phase = (self.wave_phase + delta).rem_euclid(TAU);
            return config.mode == CloudMode::Image;
        }
        false
    }

    /// Adds `elapsed` wall time and runs every whole tick it covers.
    ///
    /// Returns `true` if any of those ticks asked for a rebuild.
    pub fn advance(&mut self, elapsed: Duration, config: &ViewConfig, image_loaded: bool) -> bool {
        self.pending += elapsed;
        let mut rebuild = false;
        while self.pending >= TICK {
            self.pending -= TICK;
            rebuild |= self.step(config, image_loaded);
        }
        rebuild
    }

    /// Time until the next tick is due.
    pub fn until_next_tick(&self) -> Duration {
        TICK.saturating_sub(self.pending)
    }
}
