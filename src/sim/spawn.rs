//! Stochastic spawning: power-up drops and particle bursts
//!
//! Every draw goes through the session RNG so runs stay reproducible.

use glam::Vec2;
use rand::Rng;

use super::state::{MAX_PARTICLES, Particle, PowerUp, PowerUpKind, Rgb};
use crate::consts::POWER_UP_DROP_RATE;

/// Particles emitted when a brick is destroyed
pub const BRICK_BURST_COUNT: usize = 15;
/// Particles emitted when a power-up is collected
pub const PICKUP_BURST_COUNT: usize = 10;

/// Roll the drop chance for a destroyed brick. Below the fixed threshold a
/// power-up of a uniformly random kind spawns at the given position.
pub fn roll_power_up<R: Rng>(rng: &mut R, pos: Vec2) -> Option<PowerUp> {
    if rng.random_range(0.0..1.0) >= POWER_UP_DROP_RATE {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    Some(PowerUp::new(pos, kind))
}

/// Emit a burst of particles from `pos`: random emission angle, speed in
/// [100, 300), a slight upward bias, lifetime in [0.5, 1.5) seconds.
/// The pool is capped; the oldest particles are evicted to make room.
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: Rgb,
    count: usize,
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(100.0f32..300.0);
        let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 100.0);
        let lifetime = rng.random_range(0.5f32..1.5);

        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        particles.push(Particle::new(pos, vel, color, lifetime));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_drop_rate_converges_to_threshold() {
        let mut rng = Pcg32::seed_from_u64(0xB10C);
        let trials = 100_000;
        let mut drops = 0u32;
        for _ in 0..trials {
            if roll_power_up(&mut rng, Vec2::ZERO).is_some() {
                drops += 1;
            }
        }
        let rate = drops as f32 / trials as f32;
        assert!(
            (rate - POWER_UP_DROP_RATE).abs() < 0.01,
            "empirical drop rate {rate} strayed from {POWER_UP_DROP_RATE}"
        );
    }

    #[test]
    fn test_all_kinds_are_drawn() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; 5];
        for _ in 0..10_000 {
            if let Some(p) = roll_power_up(&mut rng, Vec2::ZERO) {
                let idx = PowerUpKind::ALL.iter().position(|k| *k == p.kind).unwrap();
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|s| *s), "kind distribution missed a variant");
    }

    #[test]
    fn test_burst_count_and_bands() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        spawn_burst(
            &mut particles,
            &mut rng,
            Vec2::new(100.0, 100.0),
            Rgb::new(255, 0, 0),
            BRICK_BURST_COUNT,
        );
        assert_eq!(particles.len(), BRICK_BURST_COUNT);
        for p in &particles {
            assert!(p.lifetime >= 0.5 && p.lifetime < 1.5);
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
            // Emission speed band, before the upward bias
            let unbiased = Vec2::new(p.vel.x, p.vel.y + 100.0).length();
            assert!(unbiased >= 100.0 - 1e-3 && unbiased < 300.0 + 1e-3);
        }
    }

    #[test]
    fn test_pool_cap_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        for _ in 0..40 {
            spawn_burst(
                &mut particles,
                &mut rng,
                Vec2::ZERO,
                Rgb::new(0, 255, 0),
                PICKUP_BURST_COUNT,
            );
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }
}
