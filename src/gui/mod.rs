pub mod theme;
pub mod view3d;

use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Instant;
use wavefield::animation::Animation;
use wavefield::camera::{nearest_point, OrbitCamera, HOVER_RADIUS};
use wavefield::cloud::{self, CloudMode, LineMode, PointCloud};
use wavefield::config::{
    LaplaceConfig, ViewConfig, AMPLITUDE_RANGE, RESOLUTION_RANGE, ROTATION_SPEED_RANGE,
    WAVE_SPEED_RANGE,
};
use wavefield::dashboard::Dashboard;
use wavefield::fft::find_dft;
use wavefield::laplace::POLE_RADIUS;
use wavefield::plane::Plane;
use wavefield::raster::{self, Raster, IMAGE_EXTENSIONS};

/// Longest side of the side-panel preview texture.
const PREVIEW_SIDE: usize = 512;
/// Longest side of a dashboard heatmap texture.
const HEATMAP_SIDE: usize = 1024;

/// Heatmap textures of the dashboard, uploaded once per analysis.
struct DashboardTextures {
    log_magnitude: egui::TextureHandle,
    phase: egui::TextureHandle,
    psd: egui::TextureHandle,
    laplace: egui::TextureHandle,
}

impl DashboardTextures {
    fn new(ctx: &egui::Context, dashboard: &Dashboard) -> Self {
        let max_side = HEATMAP_SIDE.min(ctx.input(|i| i.max_texture_side));
        let load = |name: &str, plane: &Plane<f64>| {
            let image = theme::fit_within(theme::plane_to_image(plane), max_side);
            ctx.load_texture(name, image, egui::TextureOptions::LINEAR)
        };
        Self {
            log_magnitude: load("log_magnitude", &dashboard.log_magnitude),
            phase: load("phase", &dashboard.spectrum.phase),
            psd: load("psd", &dashboard.psd_log),
            laplace: load("laplace", &dashboard.laplace.log_magnitude()),
        }
    }
}

pub struct WaveApp {
    //
    // Controls and the Laplace sampling used by the dashboard.
    //
    config: ViewConfig,
    laplace_config: LaplaceConfig,

    //
    // Loaded image and its side-panel preview.
    //
    path_input: String,
    raster: Option<Raster>,
    preview: Option<egui::TextureHandle>,
    status: String,

    //
    // 3D view state.
    //
    cloud: PointCloud,
    cloud_dirty: bool,
    animation: Animation,
    camera: OrbitCamera,
    last_frame: Instant,

    //
    // Spectral analysis window.
    //
    dashboard: Option<Dashboard>,
    dashboard_textures: Option<DashboardTextures>,
    dashboard_open: bool,

    engine_name: String,
}

impl WaveApp {
    pub fn new(cc: &eframe::CreationContext, config: ViewConfig, image: Option<PathBuf>) -> Self {
        let mut app = Self {
            config,
            laplace_config: LaplaceConfig::default(),
            path_input: String::new(),
            raster: None,
            preview: None,
            status: "No image loaded".to_owned(),
            cloud: PointCloud::default(),
            cloud_dirty: false,
            animation: Animation::default(),
            camera: OrbitCamera::default(),
            last_frame: Instant::now(),
            dashboard: None,
            dashboard_textures: None,
            dashboard_open: false,
            engine_name: find_dft(64).name(),
        };

        if let Some(path) = image {
            app.load(&cc.egui_ctx, &path);
        }
        app
    }

    /// Replaces the current image. On failure the previous image stays.
    fn load(&mut self, ctx: &egui::Context, path: &Path) {
        self.path_input = path.display().to_string();
        match raster::load(path) {
            Ok(raster) => {
                let bytes: Vec<u8> = raster.pixels().as_slice().iter().flatten().copied().collect();
                let image = egui::ColorImage::from_rgb([raster.width(), raster.height()], &bytes);
                let max_side = PREVIEW_SIDE.min(ctx.input(|i| i.max_texture_side));
                let image = theme::fit_within(image, max_side);
                let texture = ctx.load_texture("preview", image, egui::TextureOptions::LINEAR);
                self.preview = Some(texture);

                self.status = format!("Loaded {}", path.display());
                self.raster = Some(raster);
                self.dashboard = None;
                self.dashboard_textures = None;
                self.cloud_dirty = true;
            }
            Err(e) => {
                log::warn!("{}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Opens the native file picker and loads the selected image.
    fn open_file_dialog(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.load(ctx, &path);
        }
    }

    fn rebuild_cloud(&mut self) {
        let Some(raster) = &self.raster else {
            return;
        };
        let params = self.config.cloud_params(self.animation.wave_phase);
        match cloud::generate(raster, &params) {
            Ok(cloud) => self.cloud = cloud,
            Err(e) => {
                log::warn!("Point cloud: {}", e);
                self.status = e.to_string();
            }
        }
        self.cloud_dirty = false;
    }

    fn analyze(&mut self) {
        let Some(raster) = &self.raster else {
            return;
        };
        match Dashboard::compute(raster, &self.laplace_config) {
            Ok(dashboard) => {
                self.dashboard = Some(dashboard);
                self.dashboard_textures = None;
                self.dashboard_open = true;
            }
            Err(e) => {
                log::warn!("Analysis: {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn info_text(&self) -> String {
        match &self.raster {
            Some(r) => format!(
                "Dimensions: {}x{} px\nChannels: RGB\nSize: {:.1} KB",
                r.width(),
                r.height(),
                r.byte_len() as f64 / 1024.0
            ),
            None => "No image loaded".to_owned(),
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();

        theme::draw_panel(ui, "Image", |ui| {
            if ui.button("Open…").clicked() {
                self.open_file_dialog(&ctx);
            }
            ui.horizontal(|ui| {
                let path_edit =
                    egui::TextEdit::singleline(&mut self.path_input).hint_text("path/to/image.png");
                ui.add(path_edit);
                if ui.button("Load").clicked() && !self.path_input.trim().is_empty() {
                    let path = PathBuf::from(self.path_input.trim());
                    self.load(&ctx, &path);
                }
            });
            ui.label(egui::RichText::new("or drop a file on the window").size(10.0));
            ui.label(self.info_text());
            if let Some(tex) = &self.preview {
                let size = tex.size_vec2();
                let scale = (ui.available_width() / size.x).min(160.0 / size.y).min(1.0);
                ui.image((tex.id(), size * scale));
            }
        });

        let mut config = self.config;

        theme::draw_panel(ui, "Field", |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut config.mode, CloudMode::Image, "Brightness");
                ui.selectable_value(&mut config.mode, CloudMode::Spectrum, "FFT");
            });

            let mut amplitude = config.amplitude;
            ui.add(egui::Slider::new(&mut amplitude, AMPLITUDE_RANGE).text("Amplitude"));
            let mut resolution = config.resolution;
            ui.add(egui::Slider::new(&mut resolution, RESOLUTION_RANGE).text("Resolution"));
            config = config.with_amplitude(amplitude).with_resolution(resolution);

            let mut line_mode = config.line_mode;
            egui::ComboBox::from_label("Lines")
                .selected_text(line_mode.label())
                .show_ui(ui, |ui| {
                    for mode in LineMode::ALL {
                        ui.selectable_value(&mut line_mode, mode, mode.label());
                    }
                });
            config = config.with_line_mode(line_mode);
        });

        theme::draw_panel(ui, "Animation", |ui| {
            ui.checkbox(&mut config.rotation_active, "Rotate");
            let mut rotation_speed = config.rotation_speed;
            ui.add(
                egui::Slider::new(&mut rotation_speed, ROTATION_SPEED_RANGE).text("Rotation speed"),
            );

            ui.checkbox(&mut config.wave_active, "Wave");
            let mut wave_speed = config.wave_speed;
            ui.add(egui::Slider::new(&mut wave_speed, WAVE_SPEED_RANGE).text("Wave speed"));
            config = config
                .with_rotation_speed(rotation_speed)
                .with_wave_speed(wave_speed);

            ui.checkbox(&mut config.tooltip, "Point tooltips");
        });

        let phase = self.animation.wave_phase;
        if config.cloud_params(phase) != self.config.cloud_params(phase) {
            self.cloud_dirty = true;
        }
        self.config = config;

        theme::draw_panel(ui, "Analysis", |ui| {
            let enabled = self.raster.is_some();
            if ui
                .add_enabled(enabled, egui::Button::new("Spectral analysis"))
                .clicked()
            {
                self.analyze();
            }
        });
    }

    fn draw_hover(&self, frame: view3d::ViewFrame) {
        if !self.config.tooltip {
            return;
        }
        let Some(cursor) = frame.local_cursor() else {
            return;
        };
        let Some(index) = nearest_point(&frame.projected, cursor, HOVER_RADIUS) else {
            return;
        };

        let point = self.cloud.points[index];
        let [r, g, b, _] = point.color.map(|c| (c * 255.0) as u8);
        frame.response.on_hover_ui_at_pointer(|ui| {
            ui.label(format!("Pos: ({}, {})", point.pixel.0, point.pixel.1));
            ui.label(format!("RGB: ({}, {}, {})", r, g, b));
            ui.label(format!("Brightness: {:.3}", point.brightness));
            ui.label(format!("Amplitude: {:.2}", point.position.z));
        });
    }

    fn draw_dashboard(&mut self, ctx: &egui::Context) {
        let Some(dashboard) = &self.dashboard else {
            return;
        };
        let textures = self
            .dashboard_textures
            .get_or_insert_with(|| DashboardTextures::new(ctx, dashboard));

        let mut open = self.dashboard_open;
        egui::Window::new("Spectral analysis")
            .open(&mut open)
            .default_size([1100.0, 760.0])
            .vscroll(true)
            .show(ctx, |ui| {
                ui.columns(3, |cols| {
                    theme::draw_panel(&mut cols[0], "Summary", |ui| {
                        let report = egui::RichText::new(dashboard.to_string()).monospace();
                        ui.label(report.size(11.0));
                    });
                    theme::draw_panel(&mut cols[1], "Spectra", |ui| {
                        draw_heatmaps(ui, textures);
                        let histogram = &dashboard.phase_histogram;
                        let title = "Phase distribution";
                        theme::draw_histogram(ui, title, histogram, theme::ACCENT, 80.0);
                    });
                    theme::draw_panel(&mut cols[2], "Profiles", |ui| {
                        draw_profiles(ui, dashboard);
                    });
                });

                ui.separator();
                ui.columns(3, |cols| {
                    theme::draw_panel(&mut cols[0], "Centre row", |ui| {
                        draw_slices(ui, dashboard);
                    });
                    theme::draw_panel(&mut cols[1], "Impulse response", |ui| {
                        let title = "Re ifft(|F| centre row)";
                        theme::draw_line_plot(ui, title, &dashboard.impulse, theme::ACCENT, 120.0);
                    });
                    theme::draw_panel(&mut cols[2], "Pole markers (exploratory)", |ui| {
                        let title = "Peaks of the centre row";
                        theme::draw_pole_plot(ui, title, &dashboard.poles, POLE_RADIUS, 160.0);
                    });
                });
            });
        self.dashboard_open = open;
    }
}

fn draw_heatmaps(ui: &mut egui::Ui, textures: &DashboardTextures) {
    let edge = ui.available_width() / 2.0 - 4.0;
    let side = egui::vec2(edge, edge);
    let cell = |ui: &mut egui::Ui, title: &str, texture: &egui::TextureHandle| {
        ui.vertical(|ui| {
            ui.label(title);
            ui.image((texture.id(), side));
        });
    };

    egui::Grid::new("heatmaps").show(ui, |ui| {
        cell(ui, "log |F|", &textures.log_magnitude);
        cell(ui, "Phase", &textures.phase);
        ui.end_row();
        cell(ui, "log PSD", &textures.psd);
        cell(ui, "Laplace |L(s)| (exploratory)", &textures.laplace);
        ui.end_row();
    });
}

fn draw_profiles(ui: &mut egui::Ui, dashboard: &Dashboard) {
    let projections = &dashboard.projections;
    theme::draw_line_plot(ui, "Radial profile", &dashboard.radial, theme::GOLD, 70.0);
    theme::draw_line_plot(ui, "Angular profile", &dashboard.angular, theme::ACCENT, 70.0);
    theme::draw_line_plot(ui, "Projection X", &projections.along_x, theme::CORAL, 50.0);
    theme::draw_line_plot(ui, "Projection Y", &projections.along_y, theme::CORAL, 50.0);
}

fn draw_slices(ui: &mut egui::Ui, dashboard: &Dashboard) {
    let slices = &dashboard.slices;
    theme::draw_line_plot(ui, "Magnitude", &slices.magnitude, theme::GOLD, 50.0);
    theme::draw_line_plot(ui, "Real", &slices.real, theme::ACCENT, 50.0);
    theme::draw_line_plot(ui, "Imaginary", &slices.imaginary, theme::CORAL, 50.0);
    theme::draw_line_plot(ui, "log10(P + 1)", &slices.log_power, theme::GOLD, 50.0);
}

impl eframe::App for WaveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        //
        // Files dropped onto the window.
        //
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        match dropped {
            Some(path) if raster::has_image_extension(&path) => self.load(ctx, &path),
            Some(path) => self.status = format!("Not an image: {}", path.display()),
            None => {}
        }

        //
        // Advance the fixed-step clock by the wall time since the last frame.
        //
        let now = Instant::now();
        let loaded = self.raster.is_some();
        if self
            .animation
            .advance(now - self.last_frame, &self.config, loaded)
        {
            self.cloud_dirty = true;
        }
        self.last_frame = now;
        self.camera = self.camera.with_azimuth(self.animation.rotation_angle);

        if loaded && (self.config.rotation_active || self.config.wave_active) {
            ctx.request_repaint_after(self.animation.until_next_tick());
        }

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.draw_controls(ui));
            });

        if self.cloud_dirty {
            self.rebuild_cloud();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            theme::draw_menu_bar(ui, &self.engine_name, &self.status);
            let frame = view3d::draw(ui, &self.cloud, &self.camera);
            self.draw_hover(frame);
        });

        self.draw_dashboard(ctx);
    }
}
