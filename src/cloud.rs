//! Height-field point clouds built from a raster or from its spectrum.

use crate::error::Result;
use crate::plane::Plane;
use crate::raster::Raster;
use crate::spectrum::{compute_spectrum, derived::log_magnitude_normalized};
use glam::Vec3;

/// World units per pixel in the x/y plane.
pub const PIXEL_SCALE: f32 = 0.2;
/// Height of a full-scale bin in the spectrum view.
pub const SPECTRUM_HEIGHT: f32 = 50.0;
/// Opacity given to every point.
pub const POINT_ALPHA: f32 = 0.9;

/// What the elevation is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CloudMode {
    /// Brightness of each source pixel.
    #[default]
    Image,
    /// Normalised log magnitude of the centred spectrum.
    Spectrum,
}

/// Which neighbouring samples get joined by line segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineMode {
    #[default]
    None,
    Rows,
    Columns,
    Both,
}

impl LineMode {
    pub const ALL: [LineMode; 4] = [
        LineMode::None,
        LineMode::Rows,
        LineMode::Columns,
        LineMode::Both,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LineMode::None => "No lines",
            LineMode::Rows => "X lines",
            LineMode::Columns => "Y lines",
            LineMode::Both => "X + Y lines",
        }
    }

    fn rows(self) -> bool {
        matches!(self, LineMode::Rows | LineMode::Both)
    }

    fn columns(self) -> bool {
        matches!(self, LineMode::Columns | LineMode::Both)
    }
}

/// Cosmetic oscillation added on top of the brightness elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    /// Global phase, advanced by the animation clock.
    pub phase: f32,
    /// Oscillation size relative to the brightness elevation.
    pub depth: f32,
    /// Phase offset between consecutive brightness ranks.
    pub offset_step: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            phase: 0.0,
            depth: 0.5,
            offset_step: 0.1,
        }
    }
}

/// Generator inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudParams {
    /// Target number of samples along each axis.
    pub resolution: usize,
    pub amplitude: f32,
    pub mode: CloudMode,
    pub line_mode: LineMode,
    /// Only honoured in image mode.
    pub wave: Option<WaveParams>,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            resolution: 50,
            amplitude: 20.0,
            mode: CloudMode::Image,
            line_mode: LineMode::None,
            wave: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec3,
    /// RGBA in `0.0..=1.0`.
    pub color: [f32; 4],
    /// Source `(x, y)` in pixels.
    pub pixel: (usize, usize),
    /// Mean channel value in image mode, normalised magnitude in spectrum mode.
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec3,
    pub to: Vec3,
}

/// Sampled points in row-major order plus optional line segments.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
    /// Samples per row.
    pub columns: usize,
    /// Sampled rows.
    pub rows: usize,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `(step_x, step_y)` for a `width × height` source: `max(1, dim / resolution)`.
pub fn sample_steps(width: usize, height: usize, resolution: usize) -> (usize, usize) {
    let resolution = resolution.max(1);
    ((width / resolution).max(1), (height / resolution).max(1))
}

/// Number of points `generate` produces: `ceil(h / step_y) * ceil(w / step_x)`.
pub fn expected_len(width: usize, height: usize, resolution: usize) -> usize {
    let (step_x, step_y) = sample_steps(width, height, resolution);
    height.div_ceil(step_y) * width.div_ceil(step_x)
}

/// Builds the cloud for `raster` under `params`.
pub fn generate(raster: &Raster, params: &CloudParams) -> Result<PointCloud> {
    let mut cloud = match params.mode {
        CloudMode::Image => image_points(raster, params),
        CloudMode::Spectrum => {
            let spectrum = compute_spectrum(&raster.grayscale())?;
            spectrum_points(&log_magnitude_normalized(&spectrum.magnitude), params)
        }
    };
    cloud.segments = segments(&cloud, params.line_mode);
    Ok(cloud)
}

fn centred(x: usize, y: usize, width: usize, height: usize) -> (f32, f32) {
    (
        (x as f32 - width as f32 / 2.0) * PIXEL_SCALE,
        (y as f32 - height as f32 / 2.0) * PIXEL_SCALE,
    )
}

/// Walks the sample grid, calling `f(x, y)` in row-major order.
fn sample_grid(
    width: usize,
    height: usize,
    resolution: usize,
    mut f: impl FnMut(usize, usize) -> Point,
) -> PointCloud {
    let (step_x, step_y) = sample_steps(width, height, resolution);
    let mut points = Vec::with_capacity(expected_len(width, height, resolution));
    for y in (0..height).step_by(step_y) {
        for x in (0..width).step_by(step_x) {
            points.push(f(x, y));
        }
    }
    PointCloud {
        points,
        segments: Vec::new(),
        columns: width.div_ceil(step_x),
        rows: height.div_ceil(step_y),
    }
}

fn image_points(raster: &Raster, params: &CloudParams) -> PointCloud {
    let (w, h) = (raster.width(), raster.height());
    let mut cloud = sample_grid(w, h, params.resolution, |x, y| {
        let [r, g, b] = raster.pixel(y, x).map(|c| c as f32 / 255.0);
        let brightness = (r + g + b) / 3.0;
        let (px, py) = centred(x, y, w, h);
        Point {
            position: Vec3::new(px, py, brightness * params.amplitude),
            color: [r, g, b, POINT_ALPHA],
            pixel: (x, y),
            brightness,
        }
    });

    if let Some(wave) = params.wave {
        apply_wave(&mut cloud.points, params.amplitude, &wave);
    }
    cloud
}

/// Brighter points lead: rank by descending brightness (ties keep grid
/// order) and offset each rank's phase.
fn apply_wave(points: &mut [Point], amplitude: f32, wave: &WaveParams) {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| points[b].brightness.total_cmp(&points[a].brightness));

    for (rank, idx) in order.into_iter().enumerate() {
        let point = &mut points[idx];
        let base = point.brightness * amplitude;
        let offset = rank as f32 * wave.offset_step;
        point.position.z = base + (wave.phase + offset).sin() * base * wave.depth;
    }
}

fn spectrum_points(normalized: &Plane<f64>, params: &CloudParams) -> PointCloud {
    let (w, h) = (normalized.width(), normalized.height());
    sample_grid(w, h, params.resolution, |x, y| {
        let m = normalized.at(y, x) as f32;
        let (px, py) = centred(x, y, w, h);
        Point {
            position: Vec3::new(px, py, m * SPECTRUM_HEIGHT),
            color: [m, 0.3, 1.0 - m, POINT_ALPHA],
            pixel: (x, y),
            brightness: m,
        }
    })
}

fn segments(cloud: &PointCloud, mode: LineMode) -> Vec<Segment> {
    let (rows, cols) = (cloud.rows, cloud.columns);
    let at = |r: usize, c: usize| cloud.points[r * cols + c].position;
    let mut out = Vec::new();

    if mode.rows() {
        for r in 0..rows {
            for c in 1..cols {
                out.push(Segment {
                    from: at(r, c - 1),
                    to: at(r, c),
                });
            }
        }
    }
    if mode.columns() {
        for c in 0..cols {
            for r in 1..rows {
                out.push(Segment {
                    from: at(r - 1, c),
                    to: at(r, c),
                });
            }
        }
    }
    out
}
