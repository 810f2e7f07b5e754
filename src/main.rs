mod gui;

use clap::Parser;
use gui::WaveApp;
use std::path::PathBuf;
use std::process::ExitCode;
use wavefield::config::{LaplaceConfig, ViewConfig};
use wavefield::dashboard::Dashboard;
use wavefield::{raster, Error};

#[derive(Parser, Debug)]
#[command(
    name = "wavefield",
    version,
    about = "3D brightness fields and 2D spectral analysis of images"
)]
struct Args {
    /// Image to open (PNG, JPEG, BMP or GIF).
    image: Option<PathBuf>,

    /// Samples per axis of the point cloud.
    #[arg(long, default_value_t = 50)]
    resolution: u32,

    /// Height of a fully white pixel.
    #[arg(long, default_value_t = 20)]
    amplitude: u32,

    /// Print the spectral report and exit without opening a window.
    #[arg(long, requires = "image")]
    report: bool,
}

fn main() -> ExitCode {
    //
    // Initialize logging with default filter set to "info".
    //
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = ViewConfig::default()
        .with_resolution(args.resolution)
        .with_amplitude(args.amplitude);

    if args.report {
        return match run_report(args.image) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    log::info!("Starting wavefield viewer...");
    log::info!(
        "Resolution {} | Amplitude {}",
        config.resolution,
        config.amplitude
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("wavefield")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        "wavefield",
        options,
        Box::new(move |cc| {
            gui::theme::setup_global_style(&cc.egui_ctx);
            Ok(Box::new(WaveApp::new(cc, config, args.image)))
        }),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Viewer: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Headless analysis: prints the dashboard summary to stdout.
fn run_report(image: Option<PathBuf>) -> Result<(), Error> {
    let path = image.ok_or(Error::MissingImage)?;
    let raster = raster::load(&path)?;
    let dashboard = Dashboard::compute(&raster, &LaplaceConfig::default())?;

    println!("{}", path.display());
    println!("{}", dashboard);
    Ok(())
}
