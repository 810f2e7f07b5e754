//! Image height fields and 2D spectral analysis.

pub mod animation;
pub mod camera;
pub mod cloud;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fft;
pub mod laplace;
pub mod plane;
pub mod raster;
pub mod spectrum;

pub use error::{Error, Result};
