use memlane::animation::export_snapshots;
use memlane::app::MemlaneApp;
use memlane::cli::Args;
use memlane::config;
use memlane::core::frame_loop::wall_clock_seconds;
use memlane::dialogs::prefs::AppSettings;
use memlane::entities::{MemoryLoader, MemorySource};

use clap::Parser;
use eframe::egui;
use log::{debug, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first (needed for log setup)
    let args = Args::parse();

    // Create path configuration from CLI args and environment
    let path_config = config::PathConfig::from_env_and_cli(args.config_dir.clone());

    // Ensure directories exist
    if let Err(e) = config::ensure_dirs(&path_config) {
        eprintln!("Warning: Failed to create application directories: {}", e);
    }

    init_logging(&args, &path_config)?;

    info!("Memlane starting...");
    debug!("Command-line args: {:?}", args);

    let settings_path = config::config_file(config::SETTINGS_FILE, &path_config);
    info!("Config path: {}", settings_path.display());

    let source = MemorySource::from_arg(args.memories.clone());

    // Headless mode: render one frame per memory and exit
    if let Some(dir) = &args.snapshot {
        let memories = MemoryLoader::spawn(source)?.wait()?;
        let (width, height) = args.size;
        let time = args.time.unwrap_or_else(wall_clock_seconds);
        let written = export_snapshots(&memories, dir, width, height, time)?;
        println!("Wrote {} snapshots to {}", written.len(), dir.display());
        return Ok(());
    }

    let settings = AppSettings::load_or_default(&settings_path);
    let app = MemlaneApp::new(source, settings, args.expand)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("Memlane v{} • Esc to collapse • F2 for settings", env!("CARGO_PKG_VERSION")))
            .with_inner_size([960.0, 900.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native("Memlane", native_options, Box::new(move |_cc| Ok(Box::new(app))))?;

    info!("Memlane exited");
    Ok(())
}

/// Console or file logging, per `-v` and `--log`.
fn init_logging(args: &Args, path_config: &config::PathConfig) -> Result<(), Box<dyn std::error::Error>> {
    // 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
    let log_level = match args.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Some(log_path_opt) = &args.log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(config::LOG_FILE, path_config));

        let file = std::fs::File::create(&log_path)
            .map_err(|e| format!("Failed to create log file {}: {}", log_path.display(), e))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", log::LevelFilter::Info) // Suppress egui DEBUG spam
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        // Respects RUST_LOG if set
        let default_level = match args.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", log::LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}
