//! Decoded RGB images and their grayscale fields.

use crate::error::{Error, Result};
use crate::plane::Plane;
use std::path::Path;

/// An 8-bit RGB image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Plane<[u8; 3]>,
}

impl Raster {
    pub fn new(pixels: Plane<[u8; 3]>) -> Self {
        Self { pixels }
    }

    /// Builds a raster from packed `RGBRGB...` bytes.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != width * height * 3 {
            return Err(Error::InvalidInput(format!(
                "{}x{} RGB raster needs {} bytes, got {}",
                width,
                height,
                width * height * 3,
                bytes.len()
            )));
        }
        let data = bytes
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self::new(Plane::from_vec(width, height, data)?))
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        self.pixels.at(row, col)
    }

    pub fn pixels(&self) -> &Plane<[u8; 3]> {
        &self.pixels
    }

    /// Size of the decoded pixel data in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * 3
    }

    /// Per-pixel mean of the three channels, in `0.0..=255.0`.
    pub fn grayscale(&self) -> Plane<f64> {
        self.pixels
            .map(|&[r, g, b]| (r as f64 + g as f64 + b as f64) / 3.0)
    }

    /// Centre row of the grayscale field.
    pub fn center_row(&self) -> Vec<f64> {
        let gray = self.grayscale();
        if gray.is_empty() {
            return Vec::new();
        }
        gray.row(gray.height() / 2).to_vec()
    }
}

/// File extensions offered by the open dialog.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Whether `path` carries one of [`IMAGE_EXTENSIONS`], ignoring case.
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Decodes the image at `path` into RGB.
pub fn load(path: impl AsRef<Path>) -> Result<Raster> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let raster = Raster::from_rgb_bytes(width as usize, height as usize, rgb.as_raw())?;

    log::info!(
        "Loaded {} ({}x{}, {:.1} KB)",
        path.display(),
        raster.width(),
        raster.height(),
        raster.byte_len() as f64 / 1024.0
    );
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Write;

    #[test]
    fn grayscale_is_channel_mean() {
        let raster = Raster::from_rgb_bytes(2, 1, &[30, 60, 90, 255, 0, 0]).unwrap();
        let gray = raster.grayscale();
        assert_abs_diff_eq!(gray.at(0, 0), 60.0);
        assert_abs_diff_eq!(gray.at(0, 1), 85.0);
    }

    #[test]
    fn rejects_short_byte_buffers() {
        assert!(Raster::from_rgb_bytes(2, 2, &[0; 11]).is_err());
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let img =
            image::RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8 * 10, y as u8 * 20, 7]));
        img.save(&path).unwrap();

        let raster = load(&path).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.pixel(1, 2), [20, 20, 7]);
        assert_eq!(raster.byte_len(), 18);
    }

    #[test]
    fn recognises_dialog_extensions() {
        for name in ["a.png", "b.JPG", "c.jpeg", "d.Bmp", "e.gif"] {
            assert!(has_image_extension(Path::new(name)), "{}", name);
        }
        for name in ["f.tiff", "g.exr", "noext", "png"] {
            assert!(!has_image_extension(Path::new(name)), "{}", name);
        }
    }

    #[test]
    fn every_dialog_extension_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([90, 90, 90]));
        for ext in IMAGE_EXTENSIONS {
            let path = dir.path().join(format!("flat.{}", ext));
            img.save(&path).unwrap();
            let raster = load(&path).unwrap();
            assert_eq!((raster.width(), raster.height()), (4, 4), "{}", ext);
        }
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"definitely not a png").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
