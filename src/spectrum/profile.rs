//! Radial and angular averages around the centre of a shifted spectrum.

use crate::plane::Plane;

/// Number of one-degree bins in the angular profile.
pub const ANGLE_BINS: usize = 360;

/// Largest radius covered by both profiles: the smaller half-dimension.
pub fn max_radius(field: &Plane<f64>) -> usize {
    (field.width() / 2).min(field.height() / 2)
}

/// Mean of `field` over each annulus `[i, i + 1)` around `(h/2, w/2)`,
/// for `i` in `0..max_radius`. Empty annuli read 0.
pub fn radial_profile(field: &Plane<f64>) -> Vec<f64> {
    let max_r = max_radius(field);
    let mut sums = vec![0.0; max_r];
    let mut counts = vec![0usize; max_r];

    for_each_offset(field, |dx, dy, value| {
        let bin = (dx * dx + dy * dy).sqrt().floor() as usize;
        if bin < max_r {
            sums[bin] += value;
            counts[bin] += 1;
        }
    });

    averages(sums, counts)
}

/// Mean of `field` over 360 one-degree sectors of `atan2(dy, dx)` in
/// `[0, 360)`, using the pixels with `0 < r < max_radius`. Empty sectors
/// read 0.
pub fn angular_profile(field: &Plane<f64>) -> Vec<f64> {
    let max_r = max_radius(field) as f64;
    let mut sums = vec![0.0; ANGLE_BINS];
    let mut counts = vec![0usize; ANGLE_BINS];

    for_each_offset(field, |dx, dy, value| {
        let r = (dx * dx + dy * dy).sqrt();
        if r == 0.0 || r >= max_r {
            return;
        }
        let degrees = dy.atan2(dx).to_degrees().rem_euclid(360.0);
        let bin = (degrees.floor() as usize).min(ANGLE_BINS - 1);
        sums[bin] += value;
        counts[bin] += 1;
    });

    averages(sums, counts)
}

fn for_each_offset(field: &Plane<f64>, mut f: impl FnMut(f64, f64, f64)) {
    let cx = (field.width() / 2) as f64;
    let cy = (field.height() / 2) as f64;
    for row in 0..field.height() {
        let dy = row as f64 - cy;
        for (col, &value) in field.row(row).iter().enumerate() {
            f(col as f64 - cx, dy, value);
        }
    }
}

fn averages(sums: Vec<f64>, counts: Vec<usize>) -> Vec<f64> {
    sums.into_iter()
        .zip(counts)
        .map(|(s, c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian(size: usize, sigma: f64) -> Plane<f64> {
        let c = (size / 2) as f64;
        Plane::from_fn(size, size, |r, col| {
            let (dx, dy) = (col as f64 - c, r as f64 - c);
            (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp()
        })
    }

    #[test]
    fn radial_profile_of_gaussian_never_increases() {
        let profile = radial_profile(&gaussian(64, 9.0));
        assert_eq!(profile.len(), 32);
        assert_eq!(profile[0], 1.0);
        for pair in profile.windows(2) {
            assert!(pair[1] <= pair[0], "{:?}", pair);
        }
    }

    #[test]
    fn radial_profile_uses_smaller_half_dimension() {
        let field = Plane::from_fn(40, 10, |_, _| 1.0);
        let profile = radial_profile(&field);
        assert_eq!(profile.len(), 5);
        assert!(profile.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn angular_profile_of_radially_constant_field_is_flat() {
        let field = Plane::from_fn(256, 256, |_, _| 2.5);
        let profile = angular_profile(&field);
        assert_eq!(profile.len(), ANGLE_BINS);
        assert!(profile.iter().all(|&v| v == 2.5), "{:?}", profile);
    }

    #[test]
    fn angular_profile_of_wide_gaussian_is_nearly_flat() {
        // Each 1-degree sector samples a different mix of radii, so only a
        // Gaussian that is wide against max_radius reads flat.
        let profile = angular_profile(&gaussian(256, 400.0));
        let lo = profile.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = profile.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(lo > 0.95, "{}", lo);
        assert!(hi - lo < 0.02, "{} .. {}", lo, hi);
    }

    #[test]
    fn angular_profile_follows_the_bright_half_plane() {
        // Right half (dx > 0) is bright: angles in (-90, 90) degrees.
        let field = Plane::from_fn(128, 128, |_, c| if c > 64 { 1.0 } else { 0.0 });
        let profile = angular_profile(&field);
        for bin in 1..89 {
            assert_eq!(profile[bin], 1.0, "bin {}", bin);
        }
        for bin in 92..268 {
            assert_eq!(profile[bin], 0.0, "bin {}", bin);
        }
        for bin in 272..359 {
            assert_eq!(profile[bin], 1.0, "bin {}", bin);
        }
    }

    #[test]
    fn tiny_fields_give_empty_profiles() {
        let field = Plane::from_fn(1, 1, |_, _| 4.0);
        assert!(radial_profile(&field).is_empty());
        assert!(angular_profile(&field).iter().all(|&v| v == 0.0));
    }
}
