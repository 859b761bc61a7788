//! Collision detection and response
//!
//! All tests are swept-free overlap checks against the ball's bounding
//! square; at very high speed the ball can tunnel through thin geometry.
//! That is an accepted arcade approximation, not corrected here.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Ball, Paddle};

/// Which velocity component a brick impact negates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    X,
    Y,
}

/// Ball-paddle test.
///
/// On overlap the outgoing velocity is fully determined by where the ball
/// struck the paddle: the contact point steers the launch angle and the ball
/// always leaves upward, preserving its incoming speed (scaled by 0.8).
/// Deliberately not a physical reflection - the paddle aims the ball.
pub fn ball_paddle_deflection(ball: &Ball, paddle: &Paddle) -> Option<Vec2> {
    let paddle_rect = paddle.rect();
    if !ball.bounds().intersects(&paddle_rect) {
        return None;
    }

    let hit_pos = ((ball.pos.x - paddle_rect.left()) / paddle_rect.width).clamp(0.0, 1.0);
    // Signed steering value in [-1, 1]: 0 at the center, +/-1 at the edges
    let steer = (hit_pos - 0.5) * 2.0;
    let speed = ball.speed();

    Some(Vec2::new(
        steer * speed * 0.8,
        -(speed * 0.8).abs(),
    ))
}

/// Ball-brick test.
///
/// Returns the bounce axis when the ball's bounding square overlaps the
/// brick: whichever normalized penetration component (measured from the
/// brick center) is larger decides whether X or Y velocity gets negated.
pub fn ball_brick_impact(ball: &Ball, brick_rect: &Rect) -> Option<BounceAxis> {
    if !ball.bounds().intersects(brick_rect) {
        return None;
    }

    let center = brick_rect.center();
    let dx = ball.pos.x - center.x;
    let dy = ball.pos.y - center.y;

    if (dx / brick_rect.width).abs() > (dy / brick_rect.height).abs() {
        Some(BounceAxis::X)
    } else {
        Some(BounceAxis::Y)
    }
}

/// Reflect the ball off the left/right/top playfield walls, clamping it back
/// inside. The bottom edge is intentionally open: crossing it is a life-loss
/// signal, not a bounce. Returns true if any wall was hit.
pub fn reflect_off_walls(ball: &mut Ball, field_width: f32, _field_height: f32) -> bool {
    let mut hit = false;

    if ball.pos.x - ball.radius <= 0.0 {
        ball.pos.x = ball.radius;
        ball.reverse_x();
        hit = true;
    }
    if ball.pos.x + ball.radius >= field_width {
        ball.pos.x = field_width - ball.radius;
        ball.reverse_x();
        hit = true;
    }
    if ball.pos.y - ball.radius <= 0.0 {
        ball.pos.y = ball.radius;
        ball.reverse_y();
        hit = true;
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameConfig;
    use proptest::prelude::*;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            radius: 8.0,
        }
    }

    fn paddle() -> Paddle {
        Paddle::new(&GameConfig::default())
    }

    #[test]
    fn test_center_hit_launches_straight_up() {
        let paddle = paddle();
        let center = paddle.rect().center();
        let ball = ball_at(Vec2::new(center.x, paddle.rect().top()), Vec2::new(0.0, 250.0));

        let vel = ball_paddle_deflection(&ball, &paddle).expect("overlap");
        assert_eq!(vel.x, 0.0);
        assert!(vel.y < 0.0);
        // Speed magnitude preserved modulo the 0.8 damping
        assert!((vel.length() - 250.0 * 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_edge_hits_steer_outward() {
        let paddle = paddle();
        let rect = paddle.rect();

        let left = ball_at(Vec2::new(rect.left() + 1.0, rect.top()), Vec2::new(50.0, 200.0));
        let vel = ball_paddle_deflection(&left, &paddle).unwrap();
        assert!(vel.x < 0.0);
        assert!(vel.y < 0.0);

        let right = ball_at(Vec2::new(rect.right() - 1.0, rect.top()), Vec2::new(-50.0, 200.0));
        let vel = ball_paddle_deflection(&right, &paddle).unwrap();
        assert!(vel.x > 0.0);
        assert!(vel.y < 0.0);
    }

    #[test]
    fn test_no_overlap_no_deflection() {
        let paddle = paddle();
        let ball = ball_at(Vec2::new(400.0, 100.0), Vec2::new(0.0, 200.0));
        assert!(ball_paddle_deflection(&ball, &paddle).is_none());
    }

    #[test]
    fn test_brick_impact_axis_selection() {
        let brick = Rect::new(100.0, 100.0, 70.0, 25.0);

        // Approaching from below the brick center: |dy| dominates -> Y bounce
        let ball = ball_at(Vec2::new(135.0, 130.0), Vec2::new(0.0, -200.0));
        assert_eq!(ball_brick_impact(&ball, &brick), Some(BounceAxis::Y));

        // Coming in from the side: |dx| dominates -> X bounce
        let ball = ball_at(Vec2::new(95.0, 112.0), Vec2::new(200.0, 0.0));
        assert_eq!(ball_brick_impact(&ball, &brick), Some(BounceAxis::X));

        // Far away: no impact
        let ball = ball_at(Vec2::new(400.0, 400.0), Vec2::new(0.0, 0.0));
        assert_eq!(ball_brick_impact(&ball, &brick), None);
    }

    #[test]
    fn test_wall_reflection_negates_only_normal_component() {
        let mut ball = ball_at(Vec2::new(3.0, 300.0), Vec2::new(-200.0, 150.0));
        assert!(reflect_off_walls(&mut ball, 800.0, 600.0));
        assert_eq!(ball.vel, Vec2::new(200.0, 150.0));
        assert_eq!(ball.pos.x, ball.radius);

        let mut ball = ball_at(Vec2::new(400.0, 2.0), Vec2::new(120.0, -180.0));
        assert!(reflect_off_walls(&mut ball, 800.0, 600.0));
        assert_eq!(ball.vel, Vec2::new(120.0, 180.0));
        assert_eq!(ball.pos.y, ball.radius);
    }

    #[test]
    fn test_bottom_edge_does_not_reflect() {
        let mut ball = ball_at(Vec2::new(400.0, 650.0), Vec2::new(50.0, 200.0));
        assert!(!reflect_off_walls(&mut ball, 800.0, 600.0));
        assert_eq!(ball.vel, Vec2::new(50.0, 200.0));
    }

    proptest! {
        /// Bouncing off a side wall never changes the vertical component
        #[test]
        fn prop_side_wall_preserves_tangential_velocity(
            x in -20.0f32..20.0,
            vy in -400.0f32..400.0,
        ) {
            let mut ball = ball_at(Vec2::new(x, 300.0), Vec2::new(-250.0, vy));
            reflect_off_walls(&mut ball, 800.0, 600.0);
            prop_assert_eq!(ball.vel.y, vy);
            prop_assert!(ball.pos.x >= ball.radius);
        }

        /// A paddle hit always redirects the ball upward
        #[test]
        fn prop_paddle_hit_always_upward(
            x in 340.0f32..460.0,
            vx in -300.0f32..300.0,
            vy in 1.0f32..400.0,
        ) {
            let paddle = paddle();
            let ball = ball_at(Vec2::new(x, paddle.rect().top() + 2.0), Vec2::new(vx, vy));
            if let Some(vel) = ball_paddle_deflection(&ball, &paddle) {
                prop_assert!(vel.y < 0.0);
            }
        }
    }
}
