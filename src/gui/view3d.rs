//! Painter-based rendering of the point cloud.

use super::theme;
use eframe::egui;
use glam::{Vec2, Vec3};
use wavefield::camera::{OrbitCamera, Projected};
use wavefield::cloud::PointCloud;

const GRID_EXTENT: f32 = 50.0;
const GRID_STEP: f32 = 10.0;
const POINT_RADIUS: f32 = 2.0;

/// Result of drawing one frame: the viewport and every point's projection,
/// in viewport-local pixels.
pub struct ViewFrame {
    pub response: egui::Response,
    pub projected: Vec<Option<Projected>>,
}

impl ViewFrame {
    /// Cursor position in viewport-local pixels, if it is over the view.
    pub fn local_cursor(&self) -> Option<Vec2> {
        let pos = self.response.hover_pos()?;
        let local = pos - self.response.rect.min;
        Some(Vec2::new(local.x, local.y))
    }
}

fn to_pos(rect: &egui::Rect, p: Vec2) -> egui::Pos2 {
    rect.min + egui::vec2(p.x, p.y)
}

fn to_color(rgba: [f32; 4]) -> egui::Color32 {
    let [r, g, b, a] = rgba.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub fn draw(ui: &mut egui::Ui, cloud: &PointCloud, camera: &OrbitCamera) -> ViewFrame {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
    let viewport = Vec2::new(rect.width(), rect.height());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::Rounding::ZERO, theme::NIGHT_BG);

    //
    // Ground grid in the z = 0 plane.
    //
    let grid_stroke = egui::Stroke::new(1.0, theme::FRAME_STROKE.gamma_multiply(0.6));
    let steps = (2.0 * GRID_EXTENT / GRID_STEP) as i32;
    for i in 0..=steps {
        let t = -GRID_EXTENT + i as f32 * GRID_STEP;
        for (a, b) in [
            (Vec3::new(t, -GRID_EXTENT, 0.0), Vec3::new(t, GRID_EXTENT, 0.0)),
            (Vec3::new(-GRID_EXTENT, t, 0.0), Vec3::new(GRID_EXTENT, t, 0.0)),
        ] {
            if let (Some(pa), Some(pb)) = (camera.project(a, viewport), camera.project(b, viewport))
            {
                let ends = [to_pos(&rect, pa.screen), to_pos(&rect, pb.screen)];
                painter.line_segment(ends, grid_stroke);
            }
        }
    }

    //
    // Line segments, then points far to near.
    //
    let segment_stroke = egui::Stroke::new(1.0, theme::ACCENT.gamma_multiply(0.5));
    for segment in &cloud.segments {
        if let (Some(a), Some(b)) = (
            camera.project(segment.from, viewport),
            camera.project(segment.to, viewport),
        ) {
            let ends = [to_pos(&rect, a.screen), to_pos(&rect, b.screen)];
            painter.line_segment(ends, segment_stroke);
        }
    }

    let projected = camera.project_all(cloud.points.iter().map(|p| p.position), viewport);
    let mut order: Vec<usize> = (0..projected.len())
        .filter(|&i| projected[i].is_some())
        .collect();
    order.sort_by(|&a, &b| {
        let depth = |i: usize| projected[i].map_or(0.0, |p| p.depth);
        depth(b).total_cmp(&depth(a))
    });

    for i in order {
        if let Some(p) = projected[i] {
            let color = to_color(cloud.points[i].color);
            painter.circle_filled(to_pos(&rect, p.screen), POINT_RADIUS, color);
        }
    }

    ViewFrame {
        response,
        projected,
    }
}
