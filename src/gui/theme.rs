use eframe::egui;
use wavefield::plane::Plane;
use wavefield::spectrum::derived::Histogram;

pub const NIGHT_BG: egui::Color32 = egui::Color32::from_rgb(26, 26, 42);
pub const PANEL_BG: egui::Color32 = egui::Color32::from_rgb(34, 34, 54);
pub const FRAME_STROKE: egui::Color32 = egui::Color32::from_rgb(74, 74, 106);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 206, 209);
pub const GOLD: egui::Color32 = egui::Color32::from_rgb(255, 215, 0);
pub const CORAL: egui::Color32 = egui::Color32::from_rgb(255, 107, 107);

pub fn setup_global_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();

    //
    // Set global background fill colors.
    //
    style.visuals.panel_fill = NIGHT_BG;
    style.visuals.window_fill = PANEL_BG;
    style.visuals.extreme_bg_color = NIGHT_BG;
    style.visuals.selection.bg_fill = ACCENT.gamma_multiply(0.6);

    //
    // Slightly rounded widgets.
    //
    let rounding = egui::Rounding::same(4.0);
    style.visuals.widgets.noninteractive.rounding = rounding;
    style.visuals.widgets.active.rounding = rounding;
    style.visuals.widgets.inactive.rounding = rounding;
    style.visuals.widgets.hovered.rounding = rounding;

    style.spacing.slider_width = 180.0;

    ctx.set_style(style);
}

/// Draws the top bar with the title, the status line and the DFT engine name.
pub fn draw_menu_bar(ui: &mut egui::Ui, engine_name: &str, status: &str) {
    egui::TopBottomPanel::top("menubar").show_inside(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("wavefield").strong().color(ACCENT));
            ui.separator();
            ui.label(egui::RichText::new(status).size(11.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(engine_name).italics().size(10.0));
            });
        });
    });
}

/// Draws a titled, framed group.
pub fn draw_panel<F: FnOnce(&mut egui::Ui)>(ui: &mut egui::Ui, title: &str, content: F) {
    let frame = egui::Frame::none()
        .fill(PANEL_BG)
        .stroke(egui::Stroke::new(1.0, FRAME_STROKE))
        .rounding(6.0)
        .inner_margin(8.0);

    frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(title).strong().color(ACCENT));
        ui.add_space(4.0);
        content(ui);
    });
    ui.add_space(6.0);
}

/// Returns heatmap color (Black → Blue → Cyan → Green → Yellow → Red).
pub fn get_heatmap_color(val: f32) -> (u8, u8, u8) {
    let val = val.clamp(0.0, 1.0);
    if val < 0.2 {
        return (0, 0, (val * 5.0 * 255.0) as u8);
    }
    if val < 0.4 {
        return (0, ((val - 0.2) * 5.0 * 255.0) as u8, 255);
    }
    if val < 0.6 {
        return (0, 255, (255.0 - (val - 0.4) * 5.0 * 255.0) as u8);
    }
    if val < 0.8 {
        return (((val - 0.6) * 5.0 * 255.0) as u8, 255, 0);
    }
    (255, (255.0 - (val - 0.8) * 5.0 * 255.0) as u8, 0)
}

/// Min-max normalises `plane` and maps it through the heatmap.
pub fn plane_to_image(plane: &Plane<f64>) -> egui::ColorImage {
    let (lo, hi) = plane
        .as_slice()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = hi - lo;

    let pixels = plane
        .as_slice()
        .iter()
        .map(|&v| {
            let norm = if range > 0.0 { (v - lo) / range } else { 0.0 };
            let (r, g, b) = get_heatmap_color(norm as f32);
            egui::Color32::from_rgb(r, g, b)
        })
        .collect();

    egui::ColorImage {
        size: [plane.width(), plane.height()],
        pixels,
    }
}

/// Nearest-neighbour downscale so neither side exceeds `max_side`.
pub fn fit_within(image: egui::ColorImage, max_side: usize) -> egui::ColorImage {
    let [w, h] = image.size;
    let longest = w.max(h);
    if max_side == 0 || longest <= max_side {
        return image;
    }

    let scale = max_side as f64 / longest as f64;
    let nw = ((w as f64 * scale).round() as usize).clamp(1, max_side);
    let nh = ((h as f64 * scale).round() as usize).clamp(1, max_side);

    let mut pixels = Vec::with_capacity(nw * nh);
    for y in 0..nh {
        let sy = y * h / nh;
        for x in 0..nw {
            pixels.push(image.pixels[sy * w + x * w / nw]);
        }
    }

    egui::ColorImage {
        size: [nw, nh],
        pixels,
    }
}

fn plot_frame(ui: &mut egui::Ui, title: &str, height: f32) -> egui::Rect {
    ui.label(egui::RichText::new(title).size(11.0));
    let (rect, _response) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    ui.painter().rect_filled(rect, egui::Rounding::ZERO, NIGHT_BG);
    ui.painter().rect_stroke(
        rect,
        egui::Rounding::ZERO,
        egui::Stroke::new(1.0, FRAME_STROKE),
    );
    rect.shrink(2.0)
}

/// Draws `values` as a polyline scaled to its own range.
pub fn draw_line_plot(
    ui: &mut egui::Ui,
    title: &str,
    values: &[f64],
    color: egui::Color32,
    height: f32,
) {
    let rect = plot_frame(ui, title, height);
    if values.len() < 2 {
        return;
    }

    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = if hi > lo { hi - lo } else { 1.0 };
    let last = (values.len() - 1) as f32;

    let points: Vec<egui::Pos2> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = rect.min.x + (i as f32 / last) * rect.width();
            let y = rect.max.y - ((v - lo) / range) as f32 * rect.height();
            egui::Pos2::new(x, y)
        })
        .collect();

    ui.painter()
        .add(egui::Shape::line(points, egui::Stroke::new(1.5, color)));
}

/// Draws histogram counts as bars.
pub fn draw_histogram(
    ui: &mut egui::Ui,
    title: &str,
    histogram: &Histogram,
    color: egui::Color32,
    height: f32,
) {
    let rect = plot_frame(ui, title, height);
    let peak = histogram.counts.iter().copied().max().unwrap_or(0);
    if peak == 0 {
        return;
    }

    let bar_width = rect.width() / histogram.counts.len() as f32;
    for (i, &count) in histogram.counts.iter().enumerate() {
        let x = rect.min.x + i as f32 * bar_width;
        let top = rect.max.y - count as f32 / peak as f32 * rect.height();
        let bar = egui::Rect::from_min_max(
            egui::pos2(x + 0.5, top),
            egui::pos2(x + bar_width - 0.5, rect.max.y),
        );
        ui.painter().rect_filled(bar, egui::Rounding::ZERO, color);
    }
}

/// Draws markers in the unit square `[-1, 1]²` with a reference circle.
pub fn draw_pole_plot(
    ui: &mut egui::Ui,
    title: &str,
    poles: &[glam::Vec2],
    radius: f32,
    height: f32,
) {
    let rect = plot_frame(ui, title, height);
    let side = rect.width().min(rect.height());
    let centre = rect.center();
    let scale = side / 2.0;
    let painter = ui.painter();

    painter.circle_stroke(centre, radius * scale, egui::Stroke::new(1.0, FRAME_STROKE));
    painter.line_segment(
        [
            egui::pos2(centre.x - scale, centre.y),
            egui::pos2(centre.x + scale, centre.y),
        ],
        egui::Stroke::new(0.5, FRAME_STROKE),
    );
    painter.line_segment(
        [
            egui::pos2(centre.x, centre.y - scale),
            egui::pos2(centre.x, centre.y + scale),
        ],
        egui::Stroke::new(0.5, FRAME_STROKE),
    );

    for pole in poles {
        let p = egui::pos2(centre.x + pole.x * scale, centre.y - pole.y * scale);
        let d = 4.0;
        let stroke = egui::Stroke::new(2.0, CORAL);
        painter.line_segment([p + egui::vec2(-d, -d), p + egui::vec2(d, d)], stroke);
        painter.line_segment([p + egui::vec2(-d, d), p + egui::vec2(d, -d)], stroke);
    }
}
