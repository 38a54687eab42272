//! Asteroids - a wrapped-plane arcade shooter
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (entities, collisions, levels)
//! - `game`: Controller owning the state machine, input latch and persistence calls
//! - `renderer`: Backend-neutral draw lists built from a snapshot
//! - `persistence`: High score / leaderboard stores
//! - `settings`: Viewport and effect preferences
//! - `wasm`: Browser bindings (wasm32 only)

pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use error::{LeaderboardError, PersistenceError, SettingsError};
pub use game::{Control, GameController, Snapshot};
pub use highscores::{Leaderboard, LeaderboardEntry};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are in pixels per tick, durations in ticks.
pub mod consts {
    /// Logical simulation rate
    pub const FPS: u32 = 60;

    /// Playfield is clamped to this size
    pub const MAX_PLAYFIELD_WIDTH: f32 = 800.0;
    pub const MAX_PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Gap kept between the viewport edge and the playfield
    pub const VIEWPORT_PADDING: f32 = 20.0;

    /// Ship
    pub const SHIP_SIZE: f32 = 20.0;
    pub const SHIP_THRUST: f32 = 0.20;
    pub const FRICTION: f32 = 0.98;
    pub const TURN_SPEED: f32 = 0.07;
    /// Pointing up the screen (y grows downward)
    pub const SHIP_START_ANGLE: f32 = std::f32::consts::PI * 1.5;
    /// Nominal protection after a spawn, 3 seconds
    pub const INVULNERABLE_TIME_TICKS: u32 = 3 * FPS;
    /// One blink step per 100ms
    pub const BLINK_STEP_TICKS: u32 = FPS / 10;
    /// Blink counter armed on spawn; protection ends when it reaches zero (30 ticks)
    pub const INVULNERABLE_TICKS: u32 = INVULNERABLE_TIME_TICKS.div_ceil(BLINK_STEP_TICKS);
    /// Ship is hidden while `(blink / BLINK_WINDOW)` is even
    pub const BLINK_WINDOW: u32 = 10;
    /// 100ms between shots
    pub const SHOOT_COOLDOWN_TICKS: u32 = FPS / 10;

    /// Bullets
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_RADIUS: f32 = 2.0;
    /// 0.7 seconds
    pub const BULLET_LIFE_TICKS: u32 = FPS * 7 / 10;
    pub const MAX_BULLETS: usize = 10;

    /// Asteroids
    pub const ASTEROID_SPEED_MULT: f32 = 1.0;
    pub const ASTEROID_SPLIT_SPEEDUP: f32 = 1.2;
    /// Average vertex count (actual is 10..=14)
    pub const ASTEROID_VERT: u32 = 10;
    pub const ASTEROID_VERT_SPREAD: u32 = 5;
    /// Jaggedness (0 = round, 1 = spiky)
    pub const ASTEROID_JAG: f32 = 0.4;
    pub const ASTEROID_MAX_SPIN: f32 = 0.01;
    /// Extra clearance around the ship for fresh spawns
    pub const SPAWN_SAFE_DISTANCE: f32 = 100.0;
    pub const MAX_ASTEROIDS_PER_LEVEL: u32 = 10;

    /// Particles
    pub const PARTICLE_DRAG: f32 = 0.98;

    /// Run defaults
    pub const STARTING_LIVES: u32 = 3;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for a facing angle (screen space, y down)
#[inline]
pub fn facing(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Toroidal wrap with a margin: leaving `[-margin, bound + margin]` re-enters
/// at the opposite margin.
#[inline]
pub fn wrap_with_margin(pos: Vec2, bounds: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis_margin(pos.x, bounds.x, margin),
        wrap_axis_margin(pos.y, bounds.y, margin),
    )
}

#[inline]
fn wrap_axis_margin(p: f32, bound: f32, margin: f32) -> f32 {
    if p < -margin {
        bound + margin
    } else if p > bound + margin {
        -margin
    } else {
        p
    }
}

/// Hard wrap at `[0, bound]`, no margin
#[inline]
pub fn wrap_hard(pos: Vec2, bounds: Vec2) -> Vec2 {
    let wrap = |p: f32, bound: f32| {
        if p < 0.0 {
            bound
        } else if p > bound {
            0.0
        } else {
            p
        }
    };
    Vec2::new(wrap(pos.x, bounds.x), wrap(pos.y, bounds.y))
}

/// Shift a point by at most one bound per axis back into `[0, bound]`
#[inline]
pub fn wrap_into(pos: Vec2, bounds: Vec2) -> Vec2 {
    let wrap = |p: f32, bound: f32| {
        if p < 0.0 {
            p + bound
        } else if p > bound {
            p - bound
        } else {
            p
        }
    };
    Vec2::new(wrap(pos.x, bounds.x), wrap(pos.y, bounds.y))
}

/// Shortest displacement from `from` to `to` on a torus of the given size
pub fn wrapped_delta(from: Vec2, to: Vec2, bounds: Vec2) -> Vec2 {
    let mut d = to - from;
    if d.x > bounds.x / 2.0 {
        d.x -= bounds.x;
    } else if d.x < -bounds.x / 2.0 {
        d.x += bounds.x;
    }
    if d.y > bounds.y / 2.0 {
        d.y -= bounds.y;
    } else if d.y < -bounds.y / 2.0 {
        d.y += bounds.y;
    }
    d
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_margin_wrap_reenters_opposite_edge() {
        let p = wrap_with_margin(Vec2::new(-11.0, 300.0), BOUNDS, 10.0);
        assert_eq!(p, Vec2::new(810.0, 300.0));

        let p = wrap_with_margin(Vec2::new(400.0, 611.0), BOUNDS, 10.0);
        assert_eq!(p, Vec2::new(400.0, -10.0));

        // Inside the margin band nothing moves
        let p = wrap_with_margin(Vec2::new(-9.0, 609.0), BOUNDS, 10.0);
        assert_eq!(p, Vec2::new(-9.0, 609.0));
    }

    #[test]
    fn test_hard_wrap() {
        assert_eq!(wrap_hard(Vec2::new(-0.5, 10.0), BOUNDS), Vec2::new(800.0, 10.0));
        assert_eq!(wrap_hard(Vec2::new(10.0, 600.5), BOUNDS), Vec2::new(10.0, 0.0));
        assert_eq!(wrap_hard(Vec2::new(800.0, 0.0), BOUNDS), Vec2::new(800.0, 0.0));
    }

    #[test]
    fn test_wrapped_delta_takes_short_way() {
        let d = wrapped_delta(Vec2::new(10.0, 300.0), Vec2::new(790.0, 300.0), BOUNDS);
        assert!((d.x - -20.0).abs() < 1e-4);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn test_facing_up() {
        let f = facing(consts::SHIP_START_ANGLE);
        assert!(f.x.abs() < 1e-5);
        assert!((f.y + 1.0).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn margin_wrap_stays_in_band(x in -900.0f32..1700.0, y in -700.0f32..1300.0, m in 0.0f32..80.0) {
            // One step past the band lands back inside it
            let p = wrap_with_margin(Vec2::new(x, y), BOUNDS, m);
            if x < -m || x > BOUNDS.x + m {
                prop_assert!(p.x == -m || p.x == BOUNDS.x + m);
            } else {
                prop_assert_eq!(p.x, x);
            }
            if y < -m || y > BOUNDS.y + m {
                prop_assert!(p.y == -m || p.y == BOUNDS.y + m);
            } else {
                prop_assert_eq!(p.y, y);
            }
        }

        #[test]
        fn hard_wrap_lands_in_bounds(x in -50.0f32..850.0, y in -50.0f32..650.0) {
            let p = wrap_hard(Vec2::new(x, y), BOUNDS);
            prop_assert!((0.0..=BOUNDS.x).contains(&p.x));
            prop_assert!((0.0..=BOUNDS.y).contains(&p.y));
        }
    }
}
