//! Shape generation for 2D primitives

use glam::Vec2;
use serde::Serialize;

use super::Color;
use crate::facing;
use crate::sim::{Asteroid, Ship};

/// One backend-neutral draw primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    /// Stroked outline
    Outline {
        points: Vec<Vec2>,
        closed: bool,
        color: Color,
        line_width: f32,
    },
    /// Filled circle
    Dot {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Ship triangle: nose, left rear, right rear
pub fn ship_hull(ship: &Ship) -> [Vec2; 3] {
    let dir = facing(ship.angle);
    let across = Vec2::new(-dir.y, dir.x);
    let r = ship.radius;
    [
        ship.nose(),
        ship.pos - dir * r + across * 0.7 * r,
        ship.pos - dir * r - across * 0.7 * r,
    ]
}

/// Thruster flame from the rear corners; `flicker` stretches it (1.0..1.5)
pub fn ship_flame(ship: &Ship, flicker: f32) -> [Vec2; 3] {
    let [_, left, right] = ship_hull(ship);
    let tail = ship.pos - facing(ship.angle) * ship.radius * 1.5 * flicker;
    [left, tail, right]
}

/// Jagged outline from the asteroid's fixed offsets, rotated by its angle
pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    let n = asteroid.vertex_count();
    let step = std::f32::consts::TAU / n as f32;
    asteroid
        .offsets
        .iter()
        .enumerate()
        .map(|(i, offset)| {
            asteroid.pos + facing(asteroid.angle + i as f32 * step) * asteroid.radius * offset
        })
        .collect()
}

/// Outline helper
pub fn outline(points: Vec<Vec2>, color: Color, line_width: f32) -> Shape {
    Shape::Outline {
        points,
        closed: true,
        color,
        line_width,
    }
}

/// Filled dot helper
pub fn dot(center: Vec2, radius: f32, color: Color) -> Shape {
    Shape::Dot {
        center,
        radius,
        color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AsteroidSize, Playfield};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ship_hull_points_up() {
        let ship = Ship::new(&Playfield::default());
        let [nose, left, right] = ship_hull(&ship);
        assert!(nose.y < ship.pos.y);
        assert!(left.y > ship.pos.y && right.y > ship.pos.y);
        // Rear corners mirror each other across the ship's axis
        assert!((left.x - ship.pos.x + (right.x - ship.pos.x)).abs() < 1e-4);
    }

    #[test]
    fn test_flame_behind_ship() {
        let ship = Ship::new(&Playfield::default());
        let [_, tail, _] = ship_flame(&ship, 1.0);
        assert!((tail.y - (ship.pos.y + 15.0)).abs() < 1e-4);
    }

    #[test]
    fn test_asteroid_outline_uses_offsets() {
        let mut rng = Pcg32::seed_from_u64(3);
        let a = Asteroid::at(&mut rng, Vec2::new(100.0, 100.0), AsteroidSize::Medium, 1.0);
        let pts = asteroid_outline(&a);
        assert_eq!(pts.len(), a.vertex_count());
        for (p, off) in pts.iter().zip(&a.offsets) {
            assert!((p.distance(a.pos) - a.radius * off).abs() < 1e-3);
        }
    }
}
