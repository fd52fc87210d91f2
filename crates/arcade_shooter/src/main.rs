//! Headless arcade shooter run
//!
//! Plays a scripted round with randomised input against a recording
//! renderer and logs how it went. Usage: `arcade_shooter [config.toml|config.ron]`

use arcade_engine::assets::SequentialMeshLoader;
use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use arcade_engine::render::RecordingRenderer;
use arcade_shooter::{DirectionKey, GameConfig, GameResult, GameSession, InputState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Longest simulated round, in seconds
const MAX_ROUND_TIME: f32 = 120.0;

/// Seconds between input changes
const INPUT_INTERVAL: f32 = 0.5;

/// Seed for the scripted input
const INPUT_SEED: u64 = 0x5EED;

const KEYS: [DirectionKey; 4] = [DirectionKey::Up, DirectionKey::Down, DirectionKey::Left, DirectionKey::Right];

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("Arcade shooter failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> GameResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {path}");
            GameConfig::load_from_file(path)?
        }
        None => GameConfig::default(),
    };
    let frame_time = config.fixed_timestep;

    let mut game = GameSession::new(config, &mut SequentialMeshLoader::default())?;
    let mut renderer = RecordingRenderer::new();
    let mut rng = StdRng::seed_from_u64(INPUT_SEED);
    let mut input = InputState::new();
    let mut until_next_input = 0.0;
    let mut peak_draws = 0;

    while !game.state().is_over() && game.simulated_time() < MAX_ROUND_TIME {
        until_next_input -= frame_time;
        if until_next_input <= 0.0 {
            until_next_input = INPUT_INTERVAL;
            scramble(&mut input, &mut rng);
            game.apply_input(&input);
        }

        game.step(frame_time);

        renderer.clear();
        game.render(&mut renderer);
        peak_draws = peak_draws.max(renderer.len());
    }

    let player = game.player();
    let remaining: u32 = game.enemies().iter().map(|enemy| enemy.hearts()).sum();
    log::info!(
        "Round finished: {:?} after {:.1}s, player hearts {}, enemy hearts {}, peak draws per frame {}",
        game.state(),
        game.simulated_time(),
        player.hearts(),
        remaining,
        peak_draws
    );

    Ok(())
}

fn scramble(input: &mut InputState, rng: &mut StdRng) {
    let key = KEYS[rng.gen_range(0..KEYS.len())];
    if rng.gen_bool(0.3) {
        input.release(key);
    } else {
        input.press(key);
    }
    input.set_shooting(rng.gen_bool(0.8));
}
