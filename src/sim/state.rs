//! Game state and core simulation types
//!
//! Every entity owns its own state and per-tick update rule. Entities never
//! reference each other; `GameState` owns all of them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{facing, wrap_hard, wrap_into, wrap_with_margin};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no run in progress
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run frozen, nothing advances
    Paused,
    /// Lives exhausted
    Over,
}

/// Anything with a collision circle
pub trait Body {
    fn pos(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Circle-circle overlap (strictly closer than the radii sum)
    fn overlaps(&self, other: &impl Body) -> bool
    where
        Self: Sized,
    {
        crate::distance(self.pos(), other.pos()) < self.radius() + other.radius()
    }
}

/// Playable area, clamped from the host viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: MAX_PLAYFIELD_WIDTH,
            height: MAX_PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Fit inside the viewport (minus padding), never larger than the max playfield
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            width: (width - VIEWPORT_PADDING).min(MAX_PLAYFIELD_WIDTH).max(1.0),
            height: (height - VIEWPORT_PADDING).min(MAX_PLAYFIELD_HEIGHT).max(1.0),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds() / 2.0
    }
}

/// Held steering controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    /// Radians per tick
    pub angular_vel: f32,
    pub radius: f32,
    pub thrusting: bool,
    /// Set on a fatal hit, cleared by `reset`
    pub exploding: bool,
    pub invulnerable: bool,
    /// Ticks of protection left
    /// Counts down from `INVULNERABLE_TICKS`; drives both protection and blinking
    pub blink_ticks: u32,
    /// Ticks until the next shot is allowed (0 = ready)
    pub shoot_cooldown: u32,
}

impl Ship {
    /// Fresh ship at the playfield center, protected
    pub fn new(playfield: &Playfield) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: SHIP_START_ANGLE,
            angular_vel: 0.0,
            radius: SHIP_SIZE / 2.0,
            thrusting: false,
            exploding: false,
            invulnerable: true,
            blink_ticks: 0,
            shoot_cooldown: 0,
        };
        ship.reset(playfield);
        ship
    }

    /// Back to center, stopped, pointing up, invulnerability re-armed
    pub fn reset(&mut self, playfield: &Playfield) {
        self.pos = playfield.center();
        self.vel = Vec2::ZERO;
        self.angle = SHIP_START_ANGLE;
        self.angular_vel = 0.0;
        self.thrusting = false;
        self.exploding = false;
        self.invulnerable = true;
        self.blink_ticks = INVULNERABLE_TICKS;
    }

    pub fn explode(&mut self) {
        self.exploding = true;
    }

    #[inline]
    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Bullet spawn point, 4/3 radius ahead of center
    #[inline]
    pub fn nose(&self) -> Vec2 {
        self.pos + facing(self.angle) * (4.0 / 3.0) * self.radius
    }

    /// Whether the blink cycle currently hides the ship
    pub fn blinked_out(&self) -> bool {
        self.invulnerable && (self.blink_ticks / BLINK_WINDOW).is_multiple_of(2)
    }

    /// Advance one tick
    pub fn update(&mut self, steering: Steering, bounds: Vec2) {
        if self.invulnerable {
            self.blink_ticks = self.blink_ticks.saturating_sub(1);
            if self.blink_ticks == 0 {
                self.invulnerable = false;
            }
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        self.angular_vel = if steering.turn_left {
            -TURN_SPEED
        } else if steering.turn_right {
            TURN_SPEED
        } else {
            0.0
        };
        self.angle += self.angular_vel;

        self.thrusting = steering.thrust;
        if self.thrusting {
            self.vel += facing(self.angle) * SHIP_THRUST;
        } else {
            self.vel *= FRICTION;
        }

        self.pos += self.vel;
        self.pos = wrap_with_margin(self.pos, bounds, self.radius);
    }

    /// Fire one bullet if off cooldown and under the cap. Returns whether it fired.
    pub fn shoot(&mut self, bullets: &mut Vec<Bullet>) -> bool {
        if !self.can_shoot() || bullets.len() >= MAX_BULLETS {
            return false;
        }
        bullets.push(Bullet::new(self.nose(), self.angle));
        self.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
        true
    }
}

impl Body for Ship {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A ship bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks alive
    pub age: u32,
    pub max_age: u32,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self {
            pos,
            vel: facing(angle) * BULLET_SPEED,
            radius: BULLET_RADIUS,
            age: 0,
            max_age: BULLET_LIFE_TICKS,
        }
    }

    /// Move, wrap hard at the edges, age. Returns false once expired.
    pub fn update(&mut self, bounds: Vec2) -> bool {
        self.pos = wrap_hard(self.pos + self.vel, bounds);
        self.age += 1;
        self.age < self.max_age
    }
}

impl Body for Bullet {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Small => 20.0,
            AsteroidSize::Medium => 40.0,
            AsteroidSize::Large => 80.0,
        }
    }

    /// Smaller rocks are worth more
    pub fn points(self) -> u64 {
        match self {
            AsteroidSize::Small => 100,
            AsteroidSize::Medium => 50,
            AsteroidSize::Large => 20,
        }
    }

    /// Size of the fragments this breaks into, if any
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// A drifting, spinning rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: AsteroidSize,
    pub radius: f32,
    pub angle: f32,
    /// Radians per tick
    pub spin: f32,
    /// Per-vertex radius multipliers, fixed at creation
    pub offsets: Vec<f32>,
}

impl Asteroid {
    /// Level spawn: random position, relocated away from the ship if too close
    pub fn spawn_random(rng: &mut Pcg32, size: AsteroidSize, playfield: &Playfield, ship: &Ship) -> Self {
        let bounds = playfield.bounds();
        let mut pos = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * bounds.y,
        );

        if crate::distance(pos, ship.pos) < size.radius() + ship.radius + SPAWN_SAFE_DISTANCE {
            let sign = |rng: &mut Pcg32| if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let dx = bounds.x / 2.0 * sign(rng);
            let dy = bounds.y / 2.0 * sign(rng);
            pos = wrap_into(ship.pos + Vec2::new(dx, dy), bounds);
        }

        Self::at(rng, pos, size, 1.0)
    }

    /// Rock at a known position (fragments)
    pub fn at(rng: &mut Pcg32, pos: Vec2, size: AsteroidSize, speed_factor: f32) -> Self {
        let base_speed = ASTEROID_SPEED_MULT * (4 - size.as_u8()) as f32 / 2.0 * speed_factor;
        let vel = Vec2::new(
            base_speed * rng.random_range(-1.0..1.0),
            base_speed * rng.random_range(-1.0..1.0),
        );

        let vertex_count = ASTEROID_VERT + rng.random_range(0..ASTEROID_VERT_SPREAD);
        let offsets = (0..vertex_count)
            .map(|_| rng.random::<f32>() * ASTEROID_JAG * 2.0 + 1.0 - ASTEROID_JAG)
            .collect();

        Self {
            pos,
            vel,
            size,
            radius: size.radius(),
            angle: rng.random::<f32>() * std::f32::consts::TAU,
            spin: rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN),
            offsets,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn points(&self) -> u64 {
        self.size.points()
    }

    pub fn update(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.angle += self.spin;
        self.pos = wrap_with_margin(self.pos, bounds, self.radius);
    }

    /// Two faster fragments one size down, or nothing for the smallest rocks
    pub fn break_apart(&self, rng: &mut Pcg32) -> Vec<Asteroid> {
        match self.size.smaller() {
            Some(size) => (0..2)
                .map(|_| Asteroid::at(rng, self.pos, size, ASTEROID_SPLIT_SPEEDUP))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl Body for Asteroid {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Particle tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    White,
    Red,
}

/// A particle for visual effects (never collides)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tint: Tint,
    pub age: u32,
    pub max_age: u32,
    /// 1 - age / max_age
    pub alpha: f32,
}

impl Particle {
    pub fn new(rng: &mut Pcg32, origin: Vec2, tint: Tint, speed: f32) -> Self {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let velocity = rng.random::<f32>() * speed * 2.0 + 1.0;
        Self {
            pos: origin,
            vel: facing(angle) * velocity,
            radius: rng.random::<f32>() * 3.0 + 1.0,
            tint,
            age: 0,
            max_age: rng.random_range(30..50),
            alpha: 1.0,
        }
    }

    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel *= PARTICLE_DRAG;
        self.age += 1;
        self.alpha = 1.0 - self.age as f32 / self.max_age as f32;
        self.age < self.max_age
    }
}

/// Burst of particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// `size` scales both particle count and speed
    pub fn new(rng: &mut Pcg32, origin: Vec2, size: f32, tint: Tint) -> Self {
        let count = (size / 5.0).floor() as usize + 10;
        let speed = size / 30.0 + 1.0;
        let particles = (0..count)
            .map(|_| Particle::new(rng, origin, tint, speed))
            .collect();
        Self { origin, particles }
    }

    /// No particles (effects disabled); pruned on the next tick
    pub fn empty(origin: Vec2) -> Self {
        Self {
            origin,
            particles: Vec::new(),
        }
    }

    pub fn update(&mut self) -> bool {
        self.particles.retain_mut(|p| p.update());
        !self.particles.is_empty()
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    pub lives: u32,
    /// 1-based
    pub level: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub playfield: Playfield,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    /// Visual only
    pub explosions: Vec<Explosion>,
    /// Spawn particles for explosions
    pub particles_enabled: bool,
    rng: Pcg32,
}

impl GameState {
    /// Empty, not-yet-started state
    pub fn new(seed: u64, playfield: Playfield) -> Self {
        Self {
            seed,
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            playfield,
            ship: Ship::new(&playfield),
            bullets: Vec::with_capacity(MAX_BULLETS),
            asteroids: Vec::new(),
            explosions: Vec::new(),
            particles_enabled: true,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The run's RNG (spawns, fragments, particles)
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Queue an explosion, honoring the particle toggle
    pub fn spawn_explosion(&mut self, origin: Vec2, size: f32, tint: Tint) {
        let explosion = if self.particles_enabled {
            Explosion::new(&mut self.rng, origin, size, tint)
        } else {
            Explosion::empty(origin)
        };
        self.explosions.push(explosion);
    }

    /// Replace the asteroid field with `count` large rocks kept clear of the ship
    pub fn spawn_asteroid_field(&mut self, count: u32) {
        self.asteroids.clear();
        for _ in 0..count {
            let rock = Asteroid::spawn_random(&mut self.rng, AsteroidSize::Large, &self.playfield, &self.ship);
            self.asteroids.push(rock);
        }
    }
}
