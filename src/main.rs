//! Bubble Shooter entry point
//!
//! Runs the game in demo mode on the terminal: the autopilot aims and fires,
//! the board is printed after every shot.
//!
//! Usage: `bubble-shooter [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use bubble_shooter::{
    GameConfig, GameError,
    platform::{LogScoreSink, Session},
    renderer::TextRenderer,
};

/// Give up after this many shots so a stubborn board can't loop forever
#[cfg(not(target_arch = "wasm32"))]
const MAX_SHOTS: u32 = 500;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bubble Shooter (native) starting...");

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web, nothing to do here
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), GameError> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(std::path::PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref());

    let seed = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| GameError::config(format!("invalid seed {:?}: {}", raw, e)))?,
        None => clock_seed(),
    };
    log::info!("Seed: {}", seed);

    let tick_ms = config.tick_interval_ms as f32;
    let mut session = Session::new(config, seed)?;
    session.set_idle_mode(true);

    let mut renderer = TextRenderer::stdout();
    let mut sink = LogScoreSink;

    // Simulated clock: one update per frame at ~60fps, no real sleeping
    let frame_ms = tick_ms.max(1000.0 / 60.0);
    while !session.state().is_over() && session.state().shots < MAX_SHOTS {
        session.update(frame_ms, &mut renderer, &mut sink);
    }

    if !session.state().is_over() {
        log::warn!("Stopped after {} shots without a result", MAX_SHOTS);
    }
    log::debug!("Final state: {}", session.state().snapshot_json()?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
