//=========================================================================
// Adventure Demo
//=========================================================================
//
// Runs the overworld demo in a window.
//
// Usage:
//   adventure [--bindings <path>] [--tps <rate>] [--seed <n>]
//
// Logging defaults to `info`; override with RUST_LOG.
//
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};

use adventure_engine::core::gfx::{DeferredLoader, ScaleQuality, TextureCache};
use adventure_engine::core::input::BindingMap;
use adventure_engine::core::EngineError;
use adventure_engine::game::{self, Assets, ScreenMessage, CANVAS_HEIGHT, CANVAS_WIDTH, PIXEL_SCALE};
use adventure_engine::EngineBuilder;

//=== CLI =================================================================

#[derive(Parser, Debug)]
#[command(name = "adventure", about = "Overworld demo for the adventure engine")]
struct Args {
    /// JSON action → input binding table (built-in table if absent)
    #[arg(long)]
    bindings: Option<PathBuf>,

    /// Logic ticks per second
    #[arg(long, default_value_t = 60.0)]
    tps: f64,

    /// Seed for NPC wandering (random if absent)
    #[arg(long)]
    seed: Option<u64>,
}

//=== Entry Point =========================================================

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), EngineError> {
    let bindings = load_bindings(args.bindings.as_deref());
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("NPC seed: {}", seed);

    // The presenter decodes and uploads; handles are all the core needs.
    let mut textures = TextureCache::new(DeferredLoader::new(420, 150));
    let assets = Assets {
        walker: textures.load("assets/link.png", ScaleQuality::Nearest)?,
        ground: textures.load("assets/grass.png", ScaleQuality::Nearest)?,
    };

    EngineBuilder::<ScreenMessage>::new()
        .with_tps(args.tps)
        .with_title("Adventure")
        .with_window_size(CANVAS_WIDTH as u32 * PIXEL_SCALE, CANVAS_HEIGHT as u32 * PIXEL_SCALE)
        .with_bindings(bindings)
        .build()
        .init(move |fsm| game::setup(fsm, assets, seed))
        .run()
}

fn load_bindings(path: Option<&std::path::Path>) -> BindingMap {
    let Some(path) = path else {
        return BindingMap::builtin();
    };

    match BindingMap::load(path) {
        Ok(bindings) => {
            info!("Loaded {} bindings from {}", bindings.len(), path.display());
            bindings
        }
        Err(e) => {
            warn!("{}; using built-in bindings", e);
            BindingMap::builtin()
        }
    }
}
