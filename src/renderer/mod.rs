//! Presentation-side drawing
//!
//! Turns a [`Snapshot`](crate::game::Snapshot) into a flat list of outlines
//! and dots. A canvas, GPU or terminal frontend only has to stroke and fill
//! these; no frontend ever touches simulation state.

pub mod shapes;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub use shapes::Shape;

use crate::game::Snapshot;
use crate::sim::{Asteroid, Bullet, Explosion, Particle, Ship, Tint};

/// RGBA, 0-1
pub type Color = [f32; 4];

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
pub const ORANGE: Color = [1.0, 0.65, 0.0, 1.0];

const SHIP_LINE_WIDTH: f32 = 2.0;
const ASTEROID_LINE_WIDTH: f32 = 1.5;
const CENTER_DOT_RADIUS: f32 = 3.0;

fn tint_color(tint: Tint, alpha: f32) -> Color {
    let [r, g, b, _] = match tint {
        Tint::White => WHITE,
        Tint::Red => RED,
    };
    [r, g, b, alpha.clamp(0.0, 1.0)]
}

/// Shapes for one frame, in draw order
#[derive(Debug, Clone)]
pub struct DrawList {
    pub shapes: Vec<Shape>,
    pub show_center_dot: bool,
    /// Flame flicker only; never feeds back into the simulation
    flicker: Pcg32,
}

impl DrawList {
    pub fn new(frame_seed: u64, show_center_dot: bool) -> Self {
        Self {
            shapes: Vec::new(),
            show_center_dot,
            flicker: Pcg32::seed_from_u64(frame_seed),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Something that can add itself to a frame
pub trait Draw {
    fn draw(&self, list: &mut DrawList);
}

impl Draw for Ship {
    fn draw(&self, list: &mut DrawList) {
        if self.blinked_out() {
            return;
        }

        list.push(shapes::outline(shapes::ship_hull(self).to_vec(), WHITE, SHIP_LINE_WIDTH));

        if self.thrusting {
            let flicker = list.flicker.random::<f32>() * 0.5 + 1.0;
            list.push(shapes::Shape::Outline {
                points: shapes::ship_flame(self, flicker).to_vec(),
                closed: false,
                color: ORANGE,
                line_width: SHIP_LINE_WIDTH,
            });
        }

        if list.show_center_dot {
            list.push(shapes::dot(self.pos, CENTER_DOT_RADIUS, RED));
        }
    }
}

impl Draw for Bullet {
    fn draw(&self, list: &mut DrawList) {
        list.push(shapes::dot(self.pos, self.radius, WHITE));
    }
}

impl Draw for Asteroid {
    fn draw(&self, list: &mut DrawList) {
        list.push(shapes::outline(shapes::asteroid_outline(self), WHITE, ASTEROID_LINE_WIDTH));
        if list.show_center_dot {
            list.push(shapes::dot(self.pos, CENTER_DOT_RADIUS, RED));
        }
    }
}

impl Draw for Particle {
    fn draw(&self, list: &mut DrawList) {
        list.push(shapes::dot(self.pos, self.radius, tint_color(self.tint, self.alpha)));
    }
}

impl Draw for Explosion {
    fn draw(&self, list: &mut DrawList) {
        for particle in &self.particles {
            particle.draw(list);
        }
    }
}

/// Build the frame: ship, bullets, asteroids, explosions
pub fn draw_snapshot(snapshot: &Snapshot<'_>, show_center_dot: bool) -> DrawList {
    let mut list = DrawList::new(snapshot.tick, show_center_dot);
    snapshot.ship.draw(&mut list);
    for bullet in snapshot.bullets {
        bullet.draw(&mut list);
    }
    for asteroid in snapshot.asteroids {
        asteroid.draw(&mut list);
    }
    for explosion in snapshot.explosions {
        explosion.draw(&mut list);
    }
    list
}
