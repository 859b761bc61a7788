//! Brickfall entry point
//!
//! Headless demo host: wires settings, levels, high scores and the audio
//! stub around the sim core, then drives `tick` at ~60 Hz with measured
//! deltas while a simple autopilot plays. Swap the autopilot for real input
//! sampling and add a renderer to turn this into the full game shell.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use brickfall::audio::AudioManager;
use brickfall::highscores::HighScores;
use brickfall::level::LevelManager;
use brickfall::settings::Settings;
use brickfall::sim::{GameConfig, GamePhase, GameState, TickInput, tick};

const SETTINGS_PATH: &str = "brickfall_settings.json";
const HIGHSCORES_PATH: &str = "brickfall_highscores.json";
const PROGRESS_PATH: &str = "brickfall_progress.json";

/// Longest a demo run is allowed to last
const DEMO_TIME_LIMIT: Duration = Duration::from_secs(180);

fn main() {
    env_logger::init();
    log::info!("Brickfall starting...");

    let settings = Settings::load_from(Path::new(SETTINGS_PATH));
    let mut audio = AudioManager::new();
    audio.apply_settings(&settings);
    audio.play_background_music();

    let mut levels = LevelManager::new();
    levels.load_from_dir(Path::new("levels"));
    levels.load_progress(Path::new(PROGRESS_PATH));

    let mut high_scores = HighScores::load_from(Path::new(HIGHSCORES_PATH));

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut state = match GameState::new(
        GameConfig::default(),
        levels.current_level().clone(),
        seed,
    ) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    state.restart();
    log::info!(
        "Demo run on level {} \"{}\" (seed {seed})",
        state.level_number,
        state.level().name
    );

    let frame = Duration::from_micros(16_667);
    let started = Instant::now();
    let mut last = Instant::now();
    let mut status_timer = 0.0f32;

    loop {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(0.1);
        last = now;

        let input = autopilot(&state);
        tick(&mut state, &input, dt);

        for event in state.take_events() {
            audio.play(event);
        }

        status_timer += dt;
        if status_timer >= 5.0 {
            status_timer = 0.0;
            log::info!(
                "score {} | lives {} | bricks {} | {:.0} fps",
                state.score,
                state.lives,
                state.active_brick_count(),
                state.fps.fps()
            );
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
            break;
        }
        if started.elapsed() > DEMO_TIME_LIMIT {
            log::info!("Demo time limit reached");
            break;
        }

        std::thread::sleep(frame);
    }

    match state.phase {
        GamePhase::Victory => {
            log::info!("Victory! Final score {}", state.score);
            if levels.next_level() {
                levels.save_progress(Path::new(PROGRESS_PATH));
                log::info!("Level {} unlocked", levels.current_level_number());
            }
        }
        GamePhase::GameOver => {
            log::info!("Game over. Final score {}", state.score);
        }
        _ => log::info!("Demo stopped mid-run at score {}", state.score),
    }

    if high_scores.qualifies(state.score) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if let Some(rank) =
            high_scores.add_score("Player", state.score, state.level_number, timestamp)
        {
            log::info!("New high score, rank {rank}");
        }
        high_scores.save_to(Path::new(HIGHSCORES_PATH));
    }

    audio.stop_background_music();
}

/// Demo autopilot: keep the paddle under the ball, with a small deadzone so
/// it does not jitter.
fn autopilot(state: &GameState) -> TickInput {
    let paddle_center = state.paddle.rect().center().x;
    let deadzone = 10.0;
    TickInput {
        left: state.ball.pos.x < paddle_center - deadzone,
        right: state.ball.pos.x > paddle_center + deadzone,
    }
}
