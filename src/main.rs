use std::path::PathBuf;

use clap::Parser;
use egui::Vec2;
use lapdelta::season::cache::DEFAULT_CACHE_SESSIONS;
use lapdelta::ui::config::AppConfig;
use lapdelta::ui::dashboard::LapCompareApp;
use lapdelta::{LapdeltaError, SeasonArchive, SessionCache};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Season archive file to load on startup
    #[arg(short, long)]
    archive: PathBuf,

    /// Number of sessions kept in the in-memory cache
    #[arg(long, default_value_t = DEFAULT_CACHE_SESSIONS)]
    cache_size: usize,
}

fn run(args: &Args) -> Result<(), LapdeltaError> {
    if !args.archive.exists() {
        return Err(LapdeltaError::InvalidArchiveFile {
            path: format!("{:?}", args.archive),
        });
    }
    let archive = SeasonArchive::load(&args.archive)?;

    let app_config = AppConfig::from_local_file().unwrap_or(AppConfig {
        cache_sessions: args.cache_size,
        ..Default::default()
    });
    let provider = SessionCache::new(archive, app_config.cache_sessions);
    let window_position = app_config.window_position.clone();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_inner_size(Vec2::new(1100., 700.))
        .with_position(window_position);

    eframe::run_native(
        "Lapdelta",
        native_options,
        Box::new(|cc| Ok(Box::new(LapCompareApp::new(provider, app_config, cc)))),
    )
    .expect("could not start app");
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    run(&cli).expect("Error while running the lap comparison dashboard");
}
