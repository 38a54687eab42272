//! Game controller
//!
//! Owns the simulation state and drives it one tick per host frame. Input
//! arrives as discrete control changes; presentation reads a borrowed
//! [`Snapshot`]. Score persistence goes through a [`ScoreStore`] and never
//! interrupts play: failures are logged and the in-memory values carry on.

use serde::Serialize;

use crate::error::LeaderboardError;
use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::persistence::{MemoryStore, ScoreStore};
use crate::renderer::{self, DrawList};
use crate::settings::Settings;
use crate::sim::{
    Asteroid, Bullet, Explosion, GamePhase, GameState, Playfield, Ship, TickInput, TickOutcome,
    start_run, tick,
};

/// Player controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value (arrows or WASD, space to fire)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" => Some(Self::TurnLeft),
            "ArrowRight" | "d" => Some(Self::TurnRight),
            "ArrowUp" | "w" => Some(Self::Thrust),
            " " => Some(Self::Fire),
            _ => None,
        }
    }
}

/// Currently held controls
#[derive(Debug, Clone, Copy, Default)]
struct Held {
    turn_left: bool,
    turn_right: bool,
    thrust: bool,
    fire: bool,
}

/// Read-only view of the game for drawing
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub phase: GamePhase,
    pub high_score: u64,
    pub tick: u64,
    pub ship: &'a Ship,
    pub bullets: &'a [Bullet],
    pub asteroids: &'a [Asteroid],
    pub explosions: &'a [Explosion],
}

/// Owns one game session
pub struct GameController<S: ScoreStore = MemoryStore> {
    state: GameState,
    settings: Settings,
    store: S,
    high_score: u64,
    leaderboard: Leaderboard,
    held: Held,
    /// Set by a Fire rising edge, consumed by the next tick
    fire_queued: bool,
    autopilot: bool,
    /// Current run already has a leaderboard entry
    submitted: bool,
}

impl<S: ScoreStore> GameController<S> {
    /// New controller in NotStarted. Stored scores that fail to load fall
    /// back to 0 and an empty board.
    pub fn new(settings: Settings, store: S) -> Self {
        let high_score = store.high_score().unwrap_or_else(|e| {
            log::warn!("{}; high score defaults to 0", e);
            0
        });
        let leaderboard = store.leaderboard().unwrap_or_else(|e| {
            log::warn!("{}; starting with an empty leaderboard", e);
            Leaderboard::new()
        });
        log::info!(
            "Loaded high score {} and {} leaderboard entries",
            high_score,
            leaderboard.len()
        );

        let state = Self::fresh_state(&settings);
        Self {
            state,
            settings,
            store,
            high_score,
            leaderboard,
            held: Held::default(),
            fire_queued: false,
            autopilot: false,
            submitted: false,
        }
    }

    fn fresh_state(settings: &Settings) -> GameState {
        let mut state = GameState::new(settings.run_seed(), settings.playfield());
        state.particles_enabled = settings.particles;
        state
    }

    fn clear_input(&mut self) {
        self.held = Held::default();
        self.fire_queued = false;
    }

    // === State machine ===

    /// NotStarted -> Playing. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::NotStarted {
            log::debug!("start ignored in {:?}", self.state.phase);
            return false;
        }
        self.state = Self::fresh_state(&self.settings);
        self.clear_input();
        self.submitted = false;
        start_run(&mut self.state);
        true
    }

    /// Run one tick. Nothing moves unless Playing.
    pub fn frame(&mut self) -> TickOutcome {
        if self.state.phase != GamePhase::Playing {
            return TickOutcome::default();
        }

        let input = TickInput {
            turn_left: self.held.turn_left,
            turn_right: self.held.turn_right,
            thrust: self.held.thrust,
            fire: std::mem::take(&mut self.fire_queued),
            autopilot: self.autopilot,
        };
        let outcome = tick(&mut self.state, &input);

        if outcome.collisions.game_over {
            self.end();
        }
        outcome
    }

    /// Record the final score; persist it when it beats the high score
    fn end(&mut self) {
        let score = self.state.score;
        log::info!(
            "Game over: score {} at level {} ({} ticks)",
            score,
            self.state.level,
            self.state.time_ticks
        );
        self.clear_input();

        if score > self.high_score {
            self.high_score = score;
            log::info!("New high score {}", score);
            if let Err(e) = self.store.set_high_score(score) {
                log::warn!("{}; high score kept in memory only", e);
            }
        }
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        log::info!("Paused");
        true
    }

    /// Paused -> Playing, entity state untouched
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.clear_input();
        self.state.phase = GamePhase::Playing;
        log::info!("Resumed");
        true
    }

    /// Flip between Playing and Paused; other phases are left alone
    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Paused or Over -> NotStarted, discarding the run
    pub fn quit(&mut self) -> bool {
        if !matches!(self.state.phase, GamePhase::Paused | GamePhase::Over) {
            return false;
        }
        self.state = Self::fresh_state(&self.settings);
        self.clear_input();
        log::info!("Back to title");
        true
    }

    /// Paused or Over -> Playing with a fresh run
    pub fn restart(&mut self) -> bool {
        self.quit() && self.start()
    }

    // === Input ===

    /// Ignored unless Playing. A Fire press queues one shot.
    pub fn press(&mut self, control: Control) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        match control {
            Control::TurnLeft => self.held.turn_left = true,
            Control::TurnRight => self.held.turn_right = true,
            Control::Thrust => self.held.thrust = true,
            Control::Fire => {
                if !self.held.fire {
                    self.fire_queued = true;
                }
                self.held.fire = true;
            }
        }
    }

    /// Always accepted, so nothing sticks across phase changes
    pub fn release(&mut self, control: Control) {
        match control {
            Control::TurnLeft => self.held.turn_left = false,
            Control::TurnRight => self.held.turn_right = false,
            Control::Thrust => self.held.thrust = false,
            Control::Fire => self.held.fire = false,
        }
    }

    /// Let the ship fly itself (attract mode / headless runs)
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    // === Scores ===

    /// Add the finished run to the leaderboard. Only once per run, only in Over.
    pub fn submit_score(&mut self, name: &str) -> Result<(), LeaderboardError> {
        if self.state.phase != GamePhase::Over {
            return Err(LeaderboardError::RunNotOver);
        }
        if self.submitted {
            return Err(LeaderboardError::AlreadySubmitted);
        }
        let entry = LeaderboardEntry::new(name, self.state.score)?;

        if let Err(e) = self.store.append_leaderboard_entry(&entry) {
            log::warn!("{}; leaderboard entry kept in memory only", e);
        }
        log::info!(
            "{} submitted {} (rank {})",
            entry.name,
            entry.score,
            self.leaderboard.potential_rank(entry.score)
        );
        self.leaderboard.push(entry);
        self.submitted = true;
        Ok(())
    }

    /// Leaderboard in display order
    pub fn leaderboard_ranked(&self) -> Vec<&LeaderboardEntry> {
        self.leaderboard.ranked()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn can_submit(&self) -> bool {
        self.state.phase == GamePhase::Over && !self.submitted
    }

    // === Presentation ===

    /// Viewport changed; the playfield is clamped from it
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.viewport_width = width;
        self.settings.viewport_height = height;
        self.state.playfield = Playfield::from_viewport(width, height);
        log::debug!(
            "Playfield {}x{}",
            self.state.playfield.width,
            self.state.playfield.height
        );
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            score: self.state.score,
            lives: self.state.lives,
            level: self.state.level,
            phase: self.state.phase,
            high_score: self.high_score,
            tick: self.state.time_ticks,
            ship: &self.state.ship,
            bullets: &self.state.bullets,
            asteroids: &self.state.asteroids,
            explosions: &self.state.explosions,
        }
    }

    /// Shapes for the current frame
    pub fn draw_list(&self) -> DrawList {
        renderer::draw_snapshot(&self.snapshot(), self.settings.show_center_dot)
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for tools and scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
