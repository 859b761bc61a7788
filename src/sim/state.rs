//! Game state and core simulation types
//!
//! Everything the tick function mutates lives here. All types serialize so a
//! whole session can be snapshotted.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::level::Level;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a new game to start
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation suspended, rendering continues
    Paused,
    /// Run ended with no lives left
    GameOver,
    /// Every brick cleared
    Victory,
}

/// Discrete output events for collaborators (audio, HUD flashes).
///
/// Fire-and-forget: the host drains these once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallHit,
    BrickBreak,
    PowerUp,
    LoseLife,
    GameOver,
    Victory,
}

/// An sRGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The ball entity
///
/// One live instance per session; replaced (not mutated in place) on respawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Fresh ball at the field center with the nominal serve velocity
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.field_width / 2.0, config.field_height / 2.0),
            vel: Vec2::new(BALL_START_VX, BALL_START_VY),
            radius: config.ball_radius,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn reverse_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn reverse_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Bounding square used for all intersection tests
    pub fn bounds(&self) -> Rect {
        Rect::around(self.pos, self.radius)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed in px/s
    pub speed: f32,
}

impl Paddle {
    pub fn new(config: &GameConfig) -> Self {
        let mut paddle = Self {
            pos: Vec2::ZERO,
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        };
        paddle.reset_position(config);
        paddle
    }

    /// Center horizontally, park just above the bottom edge
    pub fn reset_position(&mut self, config: &GameConfig) {
        self.pos = Vec2::new(
            (config.field_width - config.paddle_width) / 2.0,
            config.field_height - PADDLE_FLOOR_OFFSET,
        );
    }

    pub fn move_left(&mut self, dt: f32) {
        self.pos.x -= self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        self.pos.x += self.speed * dt;
    }

    /// Keep the paddle fully inside [min_x, max_x]
    pub fn constrain_to_bounds(&mut self, min_x: f32, max_x: f32) {
        if self.pos.x < min_x {
            self.pos.x = min_x;
        }
        if self.pos.x + self.width > max_x {
            self.pos.x = max_x - self.width;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Rgb,
    pub active: bool,
    pub hit_points: u32,
    pub max_hit_points: u32,
}

impl Brick {
    pub fn new(rect: Rect, color: Rgb, hit_points: u32) -> Self {
        let hit_points = hit_points.max(1);
        Self {
            rect,
            color,
            active: true,
            hit_points,
            max_hit_points: hit_points,
        }
    }

    /// Apply one hit. Returns true when this hit destroyed the brick.
    /// An inactive brick never reactivates and takes no further damage.
    pub fn damage(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    BiggerPaddle,
    SmallerPaddle,
    SlowBall,
    FastBall,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::BiggerPaddle,
        PowerUpKind::SmallerPaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::FastBall,
        PowerUpKind::ExtraLife,
    ];

    /// Banner text shown when collected
    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::BiggerPaddle => "Bigger Paddle!",
            PowerUpKind::SmallerPaddle => "Smaller Paddle!",
            PowerUpKind::SlowBall => "Slow Ball!",
            PowerUpKind::FastBall => "Fast Ball!",
            PowerUpKind::ExtraLife => "Extra Life!",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::BiggerPaddle => Rgb::new(100, 255, 100),
            PowerUpKind::SmallerPaddle => Rgb::new(255, 100, 100),
            PowerUpKind::SlowBall => Rgb::new(100, 200, 255),
            PowerUpKind::FastBall => Rgb::new(255, 200, 100),
            PowerUpKind::ExtraLife => Rgb::new(255, 100, 255),
        }
    }
}

/// A falling pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub fall_speed: f32,
    pub kind: PowerUpKind,
    pub active: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            width: POWER_UP_WIDTH,
            height: POWER_UP_HEIGHT,
            fall_speed: POWER_UP_FALL_SPEED,
            kind,
            active: true,
        }
    }

    pub fn fall(&mut self, dt: f32) {
        self.pos.y += self.fall_speed * dt;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub lifetime: f32,
    pub max_lifetime: f32,
    /// Constant downward acceleration (px/s²)
    pub gravity: f32,
}

/// Maximum particles kept alive (oldest evicted first)
pub const MAX_PARTICLES: usize = 256;

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: Rgb, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            lifetime,
            max_lifetime: lifetime,
            gravity: 500.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
        if self.lifetime > 0.0 {
            self.pos += self.vel * dt;
            self.vel.y += self.gravity * dt;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Remaining-lifetime ratio, 1.0 fresh -> 0.0 dead
    fn life_ratio(&self) -> f32 {
        (self.lifetime / self.max_lifetime).max(0.0)
    }

    pub fn alpha(&self) -> f32 {
        self.life_ratio()
    }

    pub fn size(&self) -> f32 {
        4.0 * self.life_ratio() + 1.0
    }
}

/// Countdown timers for temporally-limited modifiers.
///
/// Each timer is decremented by the tick and zero-clamped; the associated
/// state is reverted exactly once when a timer crosses zero. Retriggering a
/// live effect only extends its timer, never stacks the magnitude.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub invulnerability: f32,
    pub paddle_size: f32,
    pub ball_speed: f32,
    pub banner: f32,
    pub banner_kind: Option<PowerUpKind>,
}

impl ActiveEffects {
    pub fn invulnerable(&self) -> bool {
        self.invulnerability > 0.0
    }
}

/// Screen shake: while duration is positive, each tick samples a random
/// direction and offsets the render origin by `amount` along it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub amount: f32,
    pub duration: f32,
    pub offset: Vec2,
}

impl ScreenShake {
    pub fn trigger(&mut self, amount: f32, duration: f32) {
        self.amount = amount;
        self.duration = duration;
    }

    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        if self.duration <= 0.0 {
            return;
        }
        self.duration -= dt;
        if self.duration > 0.0 {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            self.offset = Vec2::new(angle.cos(), angle.sin()) * self.amount;
        } else {
            self.duration = 0.0;
            self.offset = Vec2::ZERO;
        }
    }
}

/// Frames-per-second statistics over a one second window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn update(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Static session configuration, validated at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub starting_lives: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ConfigError::ZeroSizedField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.paddle_width <= 0.0
            || self.paddle_height <= 0.0
            || self.paddle_width > self.field_width
        {
            return Err(ConfigError::InvalidPaddle {
                width: self.paddle_width,
                height: self.paddle_height,
            });
        }
        if self.paddle_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                speed: self.paddle_speed,
            });
        }
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::InvalidBallRadius {
                radius: self.ball_radius,
            });
        }
        Ok(())
    }
}

/// Rejected configuration; the only error surface the core itself raises
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroSizedField { width: f32, height: f32 },
    InvalidPaddle { width: f32, height: f32 },
    InvalidSpeed { speed: f32 },
    InvalidBallRadius { radius: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroSizedField { width, height } => {
                write!(f, "playfield must have positive area, got {width}x{height}")
            }
            ConfigError::InvalidPaddle { width, height } => {
                write!(f, "invalid paddle dimensions {width}x{height}")
            }
            ConfigError::InvalidSpeed { speed } => {
                write!(f, "paddle speed must be positive, got {speed}")
            }
            ConfigError::InvalidBallRadius { radius } => {
                write!(f, "ball radius must be positive, got {radius}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; every stochastic draw comes from here
    pub rng: Pcg32,
    pub score: u32,
    pub lives: u32,
    /// 1-based level display number
    pub level_number: u32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Grid order fixed at level build; collision scans in this order
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Recent ball positions, oldest first, bounded by `TRAIL_LENGTH`
    pub trail: Vec<Vec2>,
    pub effects: ActiveEffects,
    pub shake: ScreenShake,
    pub fps: FpsCounter,
    /// Pending output events, drained by the host each frame
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    level: Level,
}

impl GameState {
    /// Create a new session. Starts in `Menu`; call [`GameState::restart`]
    /// to begin play.
    pub fn new(config: GameConfig, level: Level, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let paddle = Paddle::new(&config);
        let ball = Ball::spawn(&config);
        let bricks = level.build_bricks(&config);
        let level_number = level.level_number;

        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            score: 0,
            lives: config.starting_lives,
            level_number,
            phase: GamePhase::Menu,
            paddle,
            ball,
            bricks,
            power_ups: Vec::new(),
            particles: Vec::new(),
            trail: Vec::with_capacity(TRAIL_LENGTH),
            effects: ActiveEffects::default(),
            shake: ScreenShake::default(),
            fps: FpsCounter::default(),
            events: Vec::new(),
            level,
            config,
        })
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Swap in a different level definition and restart on it
    pub fn load_level(&mut self, level: Level) {
        self.level = level;
        self.restart();
    }

    /// Begin a fresh run: resets score, lives, entities, timers and the
    /// brick grid. The only way out of `GameOver`/`Victory`, and the "new
    /// game" action from `Menu`.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level_number = self.level.level_number;
        self.phase = GamePhase::Playing;
        self.paddle = Paddle::new(&self.config);
        self.ball = Ball::spawn(&self.config);
        self.bricks = self.level.build_bricks(&self.config);
        self.power_ups.clear();
        self.particles.clear();
        self.trail.clear();
        self.effects = ActiveEffects::default();
        self.shake = ScreenShake::default();
        self.events.clear();
        log::info!(
            "New game on level {} ({} bricks)",
            self.level_number,
            self.bricks.len()
        );
    }

    /// Suspend the simulation. Only valid while playing.
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    /// Resume a paused game.
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Playing,
            _ => {}
        }
    }

    pub fn active_brick_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Drain the pending output events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Life-loss sub-flow: if lives remain the paddle recenters and a fresh
    /// ball spawns under a short invulnerability window; at zero lives the
    /// run ends.
    pub(crate) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LoseLife);
        self.shake.trigger(8.0, 0.3);

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over, final score {}", self.score);
        } else {
            self.paddle.reset_position(&self.config);
            self.ball = Ball::spawn(&self.config);
            self.effects.invulnerability = INVULNERABILITY_TIME;
        }
    }
}
