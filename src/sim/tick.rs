//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one step. The order inside a
//! tick is fixed: ship, bullets, asteroids, explosions, collisions, level check.
//! Collisions must see every entity at its post-move position.

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{GamePhase, GameState, Steering};
use crate::consts::*;
use crate::{normalize_angle, wrapped_delta};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// One shot attempt this tick (fire rising edge)
    pub fire: bool,
    /// Attract mode - the ship flies itself
    pub autopilot: bool,
}

impl TickInput {
    pub fn steering(&self) -> Steering {
        Steering {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            thrust: self.thrust,
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// False when the phase wasn't Playing and nothing moved
    pub advanced: bool,
    pub collisions: CollisionReport,
    /// Field was cleared and the next level populated
    pub level_cleared: bool,
}

/// Number of large asteroids at the start of a level
pub fn asteroid_count_for_level(level: u32) -> u32 {
    (level + 3).min(MAX_ASTEROIDS_PER_LEVEL)
}

/// Reset the run to level 1 and switch to Playing
pub fn start_run(state: &mut GameState) {
    state.score = 0;
    state.lives = STARTING_LIVES;
    state.level = 1;
    state.time_ticks = 0;
    state.bullets.clear();
    state.explosions.clear();
    let playfield = state.playfield;
    state.ship = super::state::Ship::new(&playfield);
    state.spawn_asteroid_field(asteroid_count_for_level(state.level));
    state.phase = GamePhase::Playing;
    log::info!(
        "Run started (seed {}, {} asteroids)",
        state.seed,
        state.asteroids.len()
    );
}

/// Move to the next level: fresh ship position, bigger asteroid field
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    let playfield = state.playfield;
    // Reset before spawning: new rocks keep clear of the respawn point
    state.ship.reset(&playfield);
    state.spawn_asteroid_field(asteroid_count_for_level(state.level));
    log::info!(
        "Level {} ({} asteroids, score {})",
        state.level,
        state.asteroids.len(),
        state.score
    );
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::default();
    }

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    let bounds = state.playfield.bounds();

    if input.fire {
        state.ship.shoot(&mut state.bullets);
    }

    state.ship.update(input.steering(), bounds);
    state.bullets.retain_mut(|b| b.update(bounds));
    for rock in &mut state.asteroids {
        rock.update(bounds);
    }
    state.explosions.retain_mut(|e| e.update());

    let collisions = resolve_collisions(state);

    // Checked after collisions so the final hit still scores and explodes
    let mut level_cleared = false;
    if state.asteroids.is_empty() && state.phase != GamePhase::Over {
        advance_level(state);
        level_cleared = true;
    }

    TickOutcome {
        advanced: true,
        collisions,
        level_cleared,
    }
}

/// Aim at the nearest asteroid (through the wrap), thrust toward distant
/// targets, fire whenever roughly lined up.
fn autopilot_input(state: &GameState) -> TickInput {
    let ship = &state.ship;
    let bounds = state.playfield.bounds();

    let nearest = state
        .asteroids
        .iter()
        .map(|rock| wrapped_delta(ship.pos, rock.pos, bounds))
        .min_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(delta) = nearest else {
        return TickInput {
            autopilot: true,
            ..Default::default()
        };
    };

    let target_angle = delta.y.atan2(delta.x);
    let error = normalize_angle(target_angle - ship.angle);
    let dist = delta.length();
    let bullet_range = BULLET_SPEED * BULLET_LIFE_TICKS as f32;

    TickInput {
        turn_left: error < -0.05,
        turn_right: error > 0.05,
        thrust: dist > bullet_range && error.abs() < 0.4 && ship.vel.length() < 3.0,
        fire: error.abs() < 0.15 && dist < bullet_range + 60.0,
        autopilot: true,
    }
}
