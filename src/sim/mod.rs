//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions};
pub use state::{
    Asteroid, AsteroidSize, Body, Bullet, Explosion, GamePhase, GameState, Particle, Playfield,
    Ship, Steering, Tint,
};
pub use tick::{TickInput, TickOutcome, advance_level, asteroid_count_for_level, start_run, tick};
