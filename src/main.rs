// planets: TUI for browsing SWAPI planets.
// Wires configuration, logging, the data pipeline, and the terminal lifecycle.

mod app;
mod cache;
mod config;
mod error;
mod model;
mod repository;
mod state;
mod swapi;
mod ui;

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Mutex;

use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cache::{PlanetStore, paths};
use crate::config::Config;
use crate::error::Result;
use crate::repository::CachingRepository;
use crate::state::{DefaultLoadMoreStrategy, PlanetsViewModel};
use crate::swapi::SwapiClient;

/// Log to a file in the cache directory; the terminal belongs to the UI.
fn init_tracing(cache_dir: &Path) -> Result<()> {
    fs::create_dir_all(cache_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_path(cache_dir))?;

    let env = std::env::var("PLANETS_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::from_str(&env).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();
    Ok(())
}

fn run() -> Result<()> {
    let config = Config::load()?;
    let cache_dir = config.resolved_cache_dir()?;
    init_tracing(&cache_dir)?;

    // The event loop blocks its thread; fetches run on the runtime's workers.
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    let _guard = runtime.enter();

    let client = SwapiClient::new(&config.base_url, config.request_timeout())?;
    let store = PlanetStore::new(&cache_dir);
    info!(
        base_url = client.base_url(),
        cache = %store.path().display(),
        "starting planets"
    );

    let planets = PlanetsViewModel::new(CachingRepository::new(client, store));
    let mut app = App::new(
        planets,
        DefaultLoadMoreStrategy::new(config.load_more_threshold),
    );

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result?;

    info!("exiting");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("planets: {}", e);
            ExitCode::FAILURE
        }
    }
}
