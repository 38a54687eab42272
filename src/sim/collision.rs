//! Collision detection and scoring
//!
//! Runs once per tick after every entity has moved. Two passes, in order:
//! bullets against asteroids, then the ship against asteroids. Both use plain
//! circle-circle overlap; there is no swept test, so a very fast bullet can
//! skip over a thin gap between ticks.

use super::state::{Body, GamePhase, GameState, Tint};

/// What a collision pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Asteroids destroyed by bullets this tick
    pub asteroids_destroyed: u32,
    /// Points awarded this tick
    pub points: u64,
    /// Ship lost a life this tick
    pub ship_hit: bool,
    /// That was the last life
    pub game_over: bool,
}

/// Resolve all collisions for this tick
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    bullets_vs_asteroids(state, &mut report);
    ship_vs_asteroids(state, &mut report);
    report
}

/// Each bullet destroys at most one asteroid. Bullets and asteroids are both
/// scanned last-to-first and the first overlap wins (no closest-hit search).
/// Fragments are appended, so bullets scanned later this tick can hit them.
fn bullets_vs_asteroids(state: &mut GameState, report: &mut CollisionReport) {
    let mut b = state.bullets.len();
    while b > 0 {
        b -= 1;
        let bullet = &state.bullets[b];
        let Some(a) = state.asteroids.iter().rposition(|rock| bullet.overlaps(rock)) else {
            continue;
        };

        let rock = state.asteroids.remove(a);
        state.bullets.remove(b);

        let points = rock.points();
        state.score += points;
        report.points += points;
        report.asteroids_destroyed += 1;
        log::debug!("Bullet destroyed {:?} asteroid (+{})", rock.size, points);

        state.spawn_explosion(rock.pos, rock.radius, Tint::White);
        let fragments = rock.break_apart(state.rng());
        state.asteroids.extend(fragments);
    }
}

/// Only the first overlapping asteroid in list order counts; at most one life
/// is lost per tick.
fn ship_vs_asteroids(state: &mut GameState, report: &mut CollisionReport) {
    if state.ship.invulnerable {
        return;
    }
    let ship = &state.ship;
    let Some(hit) = state.asteroids.iter().position(|rock| ship.overlaps(rock)) else {
        return;
    };

    state.ship.explode();
    let (pos, size) = (state.ship.pos, state.ship.radius * 2.0);
    state.spawn_explosion(pos, size, Tint::Red);

    state.lives = state.lives.saturating_sub(1);
    report.ship_hit = true;
    log::info!("Ship hit asteroid #{} ({} lives left)", hit, state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::Over;
        report.game_over = true;
    } else {
        let playfield = state.playfield;
        state.ship.reset(&playfield);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, AsteroidSize, Bullet, Playfield};
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Playfield::default());
        state.phase = GamePhase::Playing;
        state
    }

    fn rock(state: &mut GameState, x: f32, y: f32, size: AsteroidSize) -> Asteroid {
        Asteroid::at(state.rng(), Vec2::new(x, y), size, 1.0)
    }

    #[test]
    fn test_bullet_hit_scores_splits_and_explodes() {
        let mut state = playing_state();
        let a = rock(&mut state, 100.0, 100.0, AsteroidSize::Large);
        state.asteroids.push(a);
        state.bullets.push(Bullet::new(Vec2::new(150.0, 100.0), 0.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.asteroids_destroyed, 1);
        assert_eq!(state.score, 20);
        assert!(state.bullets.is_empty());
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].origin, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_points_by_size() {
        for (size, pts) in [
            (AsteroidSize::Small, 100),
            (AsteroidSize::Medium, 50),
            (AsteroidSize::Large, 20),
        ] {
            let mut state = playing_state();
            let a = rock(&mut state, 300.0, 300.0, size);
            state.asteroids.push(a);
            state.bullets.push(Bullet::new(Vec2::new(300.0, 300.0), 0.0));
            resolve_collisions(&mut state);
            assert_eq!(state.score, pts);
        }
    }

    #[test]
    fn test_small_asteroid_leaves_nothing() {
        let mut state = playing_state();
        let a = rock(&mut state, 300.0, 300.0, AsteroidSize::Small);
        state.asteroids.push(a);
        state.bullets.push(Bullet::new(Vec2::new(305.0, 300.0), 0.0));
        resolve_collisions(&mut state);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let mut state = playing_state();
        let a = rock(&mut state, 100.0, 100.0, AsteroidSize::Small);
        state.asteroids.push(a);
        // Exactly radius sum apart
        state.bullets.push(Bullet::new(Vec2::new(122.0, 100.0), 0.0));
        let report = resolve_collisions(&mut state);
        assert_eq!(report.asteroids_destroyed, 0);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_bullet_destroys_only_one_asteroid() {
        let mut state = playing_state();
        // Two overlapping smalls under one bullet: the later one in the list goes
        let first = rock(&mut state, 200.0, 200.0, AsteroidSize::Small);
        let second = rock(&mut state, 205.0, 200.0, AsteroidSize::Small);
        state.asteroids.push(first);
        state.asteroids.push(second);
        state.bullets.push(Bullet::new(Vec2::new(202.0, 200.0), 0.0));

        let report = resolve_collisions(&mut state);
        assert_eq!(report.asteroids_destroyed, 1);
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_invulnerable_ship_ignores_asteroids() {
        let mut state = playing_state();
        let center = state.ship.pos;
        let a = rock(&mut state, center.x, center.y, AsteroidSize::Large);
        state.asteroids.push(a);
        assert!(state.ship.invulnerable);

        let report = resolve_collisions(&mut state);
        assert!(!report.ship_hit);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_ship_hit_costs_one_life_and_resets() {
        let mut state = playing_state();
        state.ship.invulnerable = false;
        state.ship.pos = Vec2::new(100.0, 100.0);
        // Two rocks on top of the ship: still only one life lost
        let a = rock(&mut state, 100.0, 100.0, AsteroidSize::Large);
        let b = rock(&mut state, 110.0, 100.0, AsteroidSize::Large);
        state.asteroids.push(a);
        state.asteroids.push(b);

        let report = resolve_collisions(&mut state);
        assert!(report.ship_hit);
        assert!(!report.game_over);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ship.invulnerable);
        assert_eq!(state.ship.pos, state.playfield.center());
        assert_eq!(state.explosions.len(), 1);
        // Ship collisions never remove asteroids
        assert_eq!(state.asteroids.len(), 2);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = playing_state();
        state.lives = 1;
        state.ship.invulnerable = false;
        let center = state.ship.pos;
        let a = rock(&mut state, center.x, center.y, AsteroidSize::Medium);
        state.asteroids.push(a);

        let report = resolve_collisions(&mut state);
        assert!(report.game_over);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Over);
        assert!(state.ship.exploding);
    }

    #[test]
    fn test_particles_disabled_still_queues_explosion() {
        let mut state = playing_state();
        state.particles_enabled = false;
        let a = rock(&mut state, 300.0, 300.0, AsteroidSize::Large);
        state.asteroids.push(a);
        state.bullets.push(Bullet::new(Vec2::new(300.0, 300.0), 0.0));
        resolve_collisions(&mut state);
        assert_eq!(state.explosions.len(), 1);
        assert!(state.explosions[0].particles.is_empty());
    }

    proptest! {
        #[test]
        fn score_never_decreases(seed in any::<u64>(), shots in prop::collection::vec((0.0f32..800.0, 0.0f32..600.0), 1..10)) {
            let mut state = GameState::new(seed, Playfield::default());
            state.phase = GamePhase::Playing;
            state.spawn_asteroid_field(6);
            let mut last = state.score;
            for (x, y) in shots {
                state.bullets.push(Bullet::new(Vec2::new(x, y), 0.0));
                let report = resolve_collisions(&mut state);
                prop_assert_eq!(state.score, last + report.points);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
