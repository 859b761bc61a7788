//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Measured-delta tick driven by an external scheduler
//! - Seeded RNG only
//! - Stable iteration order (bricks keep their level-grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{BounceAxis, ball_brick_impact, ball_paddle_deflection, reflect_off_walls};
pub use rect::Rect;
pub use state::{
    ActiveEffects, Ball, Brick, ConfigError, FpsCounter, GameConfig, GameEvent, GamePhase,
    GameState, Paddle, Particle, PowerUp, PowerUpKind, Rgb, ScreenShake,
};
pub use tick::{TickInput, tick};
