//! Row-major 2D grid shared by every field in the pipeline.

use crate::error::{Error, Result};

/// A `width × height` grid stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Plane<T> {
    /// Wraps `data`; fails when its length is not `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::InvalidInput(format!(
                "plane of {}x{} needs {} values, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a plane by evaluating `f(row, col)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn same_shape<U>(&self, other: &Plane<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Element-wise transform into a new plane of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Fails with `InvalidInput` on a zero-sized plane.
    pub fn ensure_not_empty(&self, what: &str) -> Result<()> {
        if self.data.is_empty() {
            return Err(Error::InvalidInput(format!(
                "{} is empty ({}x{})",
                what, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl<T: Copy> Plane<T> {
    pub fn at(&self, row: usize, col: usize) -> T {
        self.data[row * self.width + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        assert!(Plane::from_vec(2, 3, vec![0u8; 6]).is_ok());
        assert!(matches!(
            Plane::from_vec(2, 3, vec![0u8; 5]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn row_major_layout() {
        let p = Plane::from_fn(3, 2, |r, c| r * 10 + c);
        assert_eq!(p.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(p.row(1), &[10, 11, 12]);
        assert_eq!(p.at(1, 2), 12);
    }
}
