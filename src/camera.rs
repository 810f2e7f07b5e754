//! Orbit camera looking at the origin with +Z up, and screen-space picking.

use glam::{Mat4, Vec2, Vec3};

/// Cursor radius, in pixels, inside which a point can be hovered.
pub const HOVER_RADIUS: f32 = 100.0;

const NEAR: f32 = 0.1;
const FAR: f32 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    /// Degrees above the XY plane.
    pub elevation: f32,
    /// Degrees around +Z, measured from +X.
    pub azimuth: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 100.0,
            elevation: 30.0,
            azimuth: 0.0,
            fov: 60.0,
        }
    }
}

/// A world point mapped into the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Pixels from the viewport's top-left corner.
    pub screen: Vec2,
    /// Distance in front of the camera; larger is farther away.
    pub depth: f32,
}

impl OrbitCamera {
    pub fn with_azimuth(self, azimuth: f32) -> Self {
        Self { azimuth, ..self }
    }

    pub fn eye(&self) -> Vec3 {
        let (el, az) = (self.elevation.to_radians(), self.azimuth.to_radians());
        Vec3::new(el.cos() * az.cos(), el.cos() * az.sin(), el.sin()) * self.distance
    }

    pub fn view_projection(&self, viewport: Vec2) -> Mat4 {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        let proj = Mat4::perspective_rh(self.fov.to_radians(), aspect, NEAR, FAR);
        let view = Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Z);
        proj * view
    }

    /// Projects `point` into a viewport of the given size, or `None` when it
    /// lies behind the camera.
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Projected> {
        project_with(&self.view_projection(viewport), point, viewport)
    }

    /// Projects many points with one matrix.
    pub fn project_all(
        &self,
        points: impl IntoIterator<Item = Vec3>,
        viewport: Vec2,
    ) -> Vec<Option<Projected>> {
        let vp = self.view_projection(viewport);
        points
            .into_iter()
            .map(|p| project_with(&vp, p, viewport))
            .collect()
    }
}

fn project_with(view_projection: &Mat4, point: Vec3, viewport: Vec2) -> Option<Projected> {
    let clip = *view_projection * point.extend(1.0);
    if clip.w <= NEAR {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Projected {
        screen: Vec2::new((ndc.x + 1.0) * 0.5 * viewport.x, (1.0 - ndc.y) * 0.5 * viewport.y),
        depth: clip.w,
    })
}

/// Index of the projected point closest to `cursor`, if any lies within
/// `max_distance` pixels.
pub fn nearest_point(
    projected: &[Option<Projected>],
    cursor: Vec2,
    max_distance: f32,
) -> Option<usize> {
    projected
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.map(|p| (i, p.screen.distance(cursor))))
        .filter(|&(_, d)| d <= max_distance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn origin_lands_in_the_centre() {
        let cam = OrbitCamera::default();
        let p = cam.project(Vec3::ZERO, VIEWPORT).unwrap();
        assert_abs_diff_eq!(p.screen.x, 400.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.screen.y, 300.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.depth, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn z_is_up_and_y_is_right_at_zero_azimuth() {
        let cam = OrbitCamera::default();
        let up = cam.project(Vec3::new(0.0, 0.0, 10.0), VIEWPORT).unwrap();
        assert!(up.screen.y < 300.0);
        let right = cam.project(Vec3::new(0.0, 10.0, 0.0), VIEWPORT).unwrap();
        assert!(right.screen.x > 400.0);
    }

    #[test]
    fn eye_orbits_at_fixed_distance() {
        for azimuth in [0.0, 45.0, 190.0, 725.0] {
            let eye = OrbitCamera::default().with_azimuth(azimuth).eye();
            assert_abs_diff_eq!(eye.length(), 100.0, epsilon = 1e-3);
            assert_abs_diff_eq!(eye.z, 50.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn points_behind_the_camera_are_dropped() {
        let cam = OrbitCamera::default().with_azimuth(30.0);
        assert!(cam.project(cam.eye() * 2.0, VIEWPORT).is_none());
    }

    #[test]
    fn nearest_point_respects_the_radius() {
        let at = |x: f32, y: f32| {
            Some(Projected {
                screen: Vec2::new(x, y),
                depth: 1.0,
            })
        };
        let projected = [at(0.0, 0.0), None, at(50.0, 0.0), at(300.0, 0.0)];

        assert_eq!(nearest_point(&projected, Vec2::new(40.0, 0.0), HOVER_RADIUS), Some(2));
        assert_eq!(nearest_point(&projected, Vec2::new(10.0, 5.0), HOVER_RADIUS), Some(0));
        assert_eq!(nearest_point(&projected, Vec2::new(180.0, 0.0), HOVER_RADIUS), None);
        assert_eq!(nearest_point(&[], Vec2::ZERO, HOVER_RADIUS), None);
    }
}
