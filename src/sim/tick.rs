//! Per-frame simulation tick
//!
//! One tick advances the whole session by a measured time delta. The host
//! schedules it at a fixed cadence (~60 Hz) but the math always uses the
//! real elapsed delta, so effect timers and motion stay frame-rate honest.

use super::collision::{BounceAxis, ball_brick_impact, ball_paddle_deflection, reflect_off_walls};
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// Held-direction input sampled for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one measured timestep.
///
/// Step order is fixed: frame stats, effect timers, particles, trail,
/// input, ball motion, power-up motion, then the three collision passes,
/// then terminal conditions. Pausing suspends everything past the stats.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // (1) frame statistics accumulate in every phase
    state.fps.update(dt);

    // (2) outside active play only the repaint happens
    if state.phase != GamePhase::Playing {
        return;
    }

    // (3) timed effects, reverted exactly once on expiry
    update_effects(state, dt);
    state.shake.update(dt, &mut state.rng);

    // (4) particles
    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    state.particles.retain(|p| p.is_alive());

    // (5) ball trail, oldest sample evicted
    state.trail.push(state.ball.pos);
    if state.trail.len() > TRAIL_LENGTH {
        state.trail.remove(0);
    }

    // (6) held-key input, then clamp to the playfield
    if input.left {
        state.paddle.move_left(dt);
    }
    if input.right {
        state.paddle.move_right(dt);
    }
    state
        .paddle
        .constrain_to_bounds(0.0, state.config.field_width);

    // (7) ball motion and wall reflection
    state.ball.advance(dt);
    reflect_off_walls(
        &mut state.ball,
        state.config.field_width,
        state.config.field_height,
    );

    // (8) falling power-ups; gone once they leave the field
    let field_height = state.config.field_height;
    for power_up in state.power_ups.iter_mut() {
        power_up.fall(dt);
        if power_up.rect().top() > field_height {
            power_up.active = false;
        }
    }
    state.power_ups.retain(|p| p.active);

    // (9) ball-paddle, suppressed during the respawn grace window
    if !state.effects.invulnerable() {
        if let Some(vel) = ball_paddle_deflection(&state.ball, &state.paddle) {
            state.ball.vel = vel;
            state.events.push(GameEvent::BallHit);
        }
    }

    // (10) ball-brick: first active overlap wins, one brick per tick
    for brick in state.bricks.iter_mut() {
        if !brick.active {
            continue;
        }
        let Some(axis) = ball_brick_impact(&state.ball, &brick.rect) else {
            continue;
        };

        match axis {
            BounceAxis::X => state.ball.reverse_x(),
            BounceAxis::Y => state.ball.reverse_y(),
        }

        if brick.damage() {
            state.score += BRICK_SCORE;
            state.events.push(GameEvent::BrickBreak);
            state.shake.trigger(3.0, 0.1);

            let center = brick.rect.center();
            spawn::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                center,
                brick.color,
                spawn::BRICK_BURST_COUNT,
            );
            if let Some(power_up) = spawn::roll_power_up(&mut state.rng, center) {
                state.power_ups.push(power_up);
            }
        } else {
            state.events.push(GameEvent::BallHit);
        }
        break;
    }

    // (11) pickup collection
    let paddle_rect = state.paddle.rect();
    let mut collected: Vec<PowerUpKind> = Vec::new();
    for power_up in state.power_ups.iter_mut() {
        if power_up.active && paddle_rect.intersects(&power_up.rect()) {
            power_up.active = false;
            collected.push(power_up.kind);
            spawn::spawn_burst(
                &mut state.particles,
                &mut state.rng,
                power_up.rect().center(),
                power_up.kind.color(),
                spawn::PICKUP_BURST_COUNT,
            );
        }
    }
    state.power_ups.retain(|p| p.active);
    for kind in collected {
        apply_power_up(state, kind);
    }

    // (12) terminal conditions
    if state.ball.pos.y > state.config.field_height {
        state.lose_life();
    }
    if state.active_brick_count() == 0 {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::Victory);
        log::info!(
            "Level {} cleared, score {}",
            state.level_number,
            state.score
        );
    }
}

/// Decrement the countdown timers; each reverts its state once on expiry
/// and then pins at zero until retriggered.
fn update_effects(state: &mut GameState, dt: f32) {
    let effects = &mut state.effects;

    if effects.invulnerability > 0.0 {
        effects.invulnerability = (effects.invulnerability - dt).max(0.0);
    }

    if effects.paddle_size > 0.0 {
        effects.paddle_size -= dt;
        if effects.paddle_size <= 0.0 {
            effects.paddle_size = 0.0;
            state.paddle.width = state.config.paddle_width;
        }
    }

    if effects.ball_speed > 0.0 {
        effects.ball_speed -= dt;
        if effects.ball_speed <= 0.0 {
            effects.ball_speed = 0.0;
            let speed = state.ball.speed();
            if speed > 0.0 {
                // Back to nominal speed, direction untouched
                state.ball.vel *= BALL_NOMINAL_SPEED / speed;
            }
        }
    }

    if effects.banner > 0.0 {
        effects.banner -= dt;
        if effects.banner <= 0.0 {
            effects.banner = 0.0;
            effects.banner_kind = None;
        }
    }
}

/// Apply a collected power-up. A retrigger while the matching timer is live
/// only extends the duration - the magnitude is applied once.
fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    state.events.push(GameEvent::PowerUp);
    log::debug!("Power-up collected: {}", kind.label());

    match kind {
        PowerUpKind::BiggerPaddle => {
            if state.effects.paddle_size <= 0.0 {
                state.paddle.width *= 1.5;
            }
            state.effects.paddle_size = POWER_UP_DURATION;
        }
        PowerUpKind::SmallerPaddle => {
            if state.effects.paddle_size <= 0.0 {
                state.paddle.width *= 0.6;
            }
            state.effects.paddle_size = POWER_UP_DURATION;
        }
        PowerUpKind::SlowBall => {
            if state.effects.ball_speed <= 0.0 {
                state.ball.vel *= 0.7;
            }
            state.effects.ball_speed = POWER_UP_DURATION;
        }
        PowerUpKind::FastBall => {
            if state.effects.ball_speed <= 0.0 {
                state.ball.vel *= 1.5;
            }
            state.effects.ball_speed = POWER_UP_DURATION;
        }
        PowerUpKind::ExtraLife => {
            state.lives += 1;
        }
    }

    state.effects.banner = POWER_UP_BANNER_TIME;
    state.effects.banner_kind = Some(kind);
}
