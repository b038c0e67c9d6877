//! Map Breaker headless runner
//!
//! Loads a GeoJSON map, plays it with a paddle autopilot and prints the
//! final frame as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use map_breaker::Settings;
use map_breaker::ingest;
use map_breaker::render::{Surface, SvgSurface};
use map_breaker::sim::{CancelToken, Game, TickInput, run};

/// Default tick limit, five minutes of play at 60 Hz
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

/// Play a GeoJSON map headless and print the final frame as JSON
#[derive(Debug, Parser)]
#[command(name = "map-breaker", version, about)]
struct Args {
    /// GeoJSON FeatureCollection to play
    features: PathBuf,

    /// Projection: equirectangular, mercator, miller or sinusoidal
    projection: Option<String>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long = "ticks", default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Write the last frame as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
}

/// Stand-in for the keyboard: hold the key that moves the paddle under the ball
fn autopilot(game: &Game) -> TickInput {
    let deadband = game.player.size().x / 4.0;
    let offset = game.ball.pos.x - game.player.pos.x;
    let mut input = TickInput::default();
    if offset < -deadband {
        input.press(game.settings.left_key);
    } else if offset > deadband {
        input.press(game.settings.right_key);
    }
    input
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let features = ingest::load_path(&args.features, args.projection.as_deref(), &settings)
        .with_context(|| format!("loading map from {}", args.features.display()))?;

    let mut game = Game::new(settings);
    game.load_shapes(features);
    log::info!("Map Breaker starting with seed {:#x}", game.settings.seed);

    let token = CancelToken::new();
    let ticks = run(&mut game, &token, Some(args.max_ticks), autopilot);
    let (broken, total) = game.score();
    log::info!("Stopped after {ticks} ticks, {broken} of {total} broken");

    let view = game.view();
    if let Some(path) = &args.svg {
        let mut surface = SvgSurface::new(&game.settings, &game.shapes);
        surface.present(&view);
        std::fs::write(path, surface.document())
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Wrote last frame to {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
