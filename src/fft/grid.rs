//! Two-dimensional transforms and spectrum reordering on top of the 1D plans.

use super::find_dft;
use crate::error::Result;
use crate::plane::Plane;
use num_complex::Complex64;
use num_traits::Zero;

/// Unnormalised 2D DFT of a real field: row transforms, then column transforms.
pub fn fft2(field: &Plane<f64>) -> Result<Plane<Complex64>> {
    field.ensure_not_empty("2D transform input")?;

    let (w, h) = (field.width(), field.height());
    let input: Vec<Complex64> = field
        .as_slice()
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();

    //
    // h transforms of length w along the rows.
    //
    let mut rows = vec![Complex64::zero(); w * h];
    find_dft(w).xform_many(&input, &mut rows, 1, w, 1, w, h);

    //
    // w transforms of length h down the columns.
    //
    let mut cols = vec![Complex64::zero(); w * h];
    find_dft(h).xform_many(&rows, &mut cols, w, 1, w, 1, w);

    Plane::from_vec(w, h, cols)
}

/// Moves the zero-frequency bin to `(height / 2, width / 2)`.
pub fn fftshift<T: Copy>(plane: &Plane<T>) -> Plane<T> {
    let (w, h) = (plane.width(), plane.height());
    Plane::from_fn(w, h, |row, col| {
        let src_row = (row + h - h / 2) % h;
        let src_col = (col + w - w / 2) % w;
        plane.at(src_row, src_col)
    })
}

/// Inverse 1D DFT scaled by `1 / n`, computed as `conj(DFT(conj(x))) / n`.
pub fn ifft(signal: &[Complex64]) -> Vec<Complex64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let conj: Vec<Complex64> = signal.iter().map(|c| c.conj()).collect();
    let mut out = vec![Complex64::zero(); n];
    find_dft(n).xform(&conj, &mut out);

    let scale = 1.0 / n as f64;
    out.iter().map(|c| c.conj() * scale).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn fftshift_centres_zero_frequency() {
        // Even and odd sizes follow the same convention.
        for (w, h) in [(4, 4), (5, 3), (6, 7)] {
            let p = Plane::from_fn(w, h, |r, c| (r, c));
            let s = fftshift(&p);
            assert_eq!(s.at(h / 2, w / 2), (0, 0));
        }
        let p = Plane::from_vec(5, 1, vec![0, 1, 2, 3, 4]).unwrap();
        assert_eq!(fftshift(&p).as_slice(), &[3, 4, 0, 1, 2]);
        let p = Plane::from_vec(4, 1, vec![0, 1, 2, 3]).unwrap();
        assert_eq!(fftshift(&p).as_slice(), &[2, 3, 0, 1]);
    }

    #[test]
    fn fft2_of_constant_is_a_dc_spike() {
        let field = Plane::from_fn(6, 4, |_, _| 2.0);
        let spec = fft2(&field).unwrap();
        assert_abs_diff_eq!(spec.at(0, 0).re, 48.0, epsilon = 1e-9);
        for (i, c) in spec.as_slice().iter().enumerate().skip(1) {
            assert!(c.norm() < 1e-9, "bin {} = {}", i, c);
        }
    }

    #[test]
    fn fft2_matches_separable_naive_transform() {
        let (w, h) = (5, 3);
        let field = Plane::from_fn(w, h, |r, c| ((r * 7 + c * 3) % 5) as f64 - 1.5);
        let spec = fft2(&field).unwrap();

        for ky in 0..h {
            for kx in 0..w {
                let mut want = Complex64::zero();
                for y in 0..h {
                    for x in 0..w {
                        let angle = -2.0
                            * PI
                            * ((ky * y) as f64 / h as f64 + (kx * x) as f64 / w as f64);
                        want += field.at(y, x) * Complex64::from_polar(1.0, angle);
                    }
                }
                assert!((spec.at(ky, kx) - want).norm() < 1e-9);
            }
        }
    }

    #[test]
    fn fft2_rejects_empty_input() {
        let empty = Plane::from_vec(0, 3, Vec::<f64>::new()).unwrap();
        assert!(fft2(&empty).is_err());
    }

    #[test]
    fn ifft_inverts_forward_transform() {
        let signal: Vec<Complex64> = (0..10)
            .map(|i| Complex64::new(i as f64, (i * i) as f64 * 0.1))
            .collect();
        let mut spectrum = vec![Complex64::zero(); 10];
        find_dft(10).xform(&signal, &mut spectrum);
        let back = ifft(&spectrum);
        for (a, b) in back.iter().zip(&signal) {
            assert!((a - b).norm() < 1e-9);
        }
    }
}
