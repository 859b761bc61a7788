//! Brickfall - a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state, tick)
//! - `level`: Level definitions and the level manager
//! - `settings`: Player preferences
//! - `highscores`: Leaderboard
//! - `audio`: Sound-event collaborator (stub playback)

pub mod audio;
pub mod highscores;
pub mod level;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use level::{Level, LevelManager};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 400.0;
    /// Distance from the bottom edge to the paddle's top
    pub const PADDLE_FLOOR_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_VX: f32 = 200.0;
    pub const BALL_START_VY: f32 = -200.0;
    /// Speed the ball is rescaled to when a speed effect expires
    pub const BALL_NOMINAL_SPEED: f32 = 300.0;

    /// Brick grid layout
    pub const BRICK_ROWS: u32 = 5;
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_Y: f32 = 50.0;
    /// Points awarded per destroyed brick
    pub const BRICK_SCORE: u32 = 10;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    /// Ball-paddle collision is suppressed for this long after a respawn
    pub const INVULNERABILITY_TIME: f32 = 2.0;
    /// Maximum ball trail samples kept for rendering
    pub const TRAIL_LENGTH: usize = 10;

    /// Power-up tuning
    pub const POWER_UP_DROP_RATE: f32 = 0.20;
    pub const POWER_UP_DURATION: f32 = 10.0;
    pub const POWER_UP_BANNER_TIME: f32 = 2.0;
    pub const POWER_UP_WIDTH: f32 = 40.0;
    pub const POWER_UP_HEIGHT: f32 = 20.0;
    pub const POWER_UP_FALL_SPEED: f32 = 100.0;
}
