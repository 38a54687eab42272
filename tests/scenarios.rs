//! End-to-end runs through the public API

use asteroids::consts::BULLET_SPEED;
use asteroids::persistence::{JsonFileStore, ScoreStore};
use asteroids::sim::{
    Asteroid, AsteroidSize, Bullet, GamePhase, GameState, Playfield, TickInput, start_run, tick,
};
use asteroids::{Control, GameController, LeaderboardError, Settings};
use glam::Vec2;

fn settings(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn clearing_level_one_scores_2080_and_spawns_five() {
    let mut state = GameState::new(4242, Playfield::default());
    start_run(&mut state);
    assert_eq!(state.asteroids.len(), 4);

    let mut cleared = false;
    for _ in 0..60 {
        // Park every rock and send one bullet to land exactly on each
        state.bullets.clear();
        for rock in &mut state.asteroids {
            rock.vel = Vec2::ZERO;
        }
        let targets: Vec<Vec2> = state.asteroids.iter().map(|a| a.pos).collect();
        for pos in targets {
            state.bullets.push(Bullet::new(pos - Vec2::new(BULLET_SPEED, 0.0), 0.0));
        }
        let outcome = tick(&mut state, &TickInput::default());
        if outcome.level_cleared {
            cleared = true;
            break;
        }
    }

    assert!(cleared);
    // 4 large x 20 + 8 medium x 50 + 16 small x 100
    assert_eq!(state.score, 2080);
    assert_eq!(state.level, 2);
    assert_eq!(state.lives, 3);
    assert_eq!(state.asteroids.len(), 5);
    assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Large));
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn losing_the_last_life_ends_the_run_and_persists_the_high_score() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let mut game = GameController::new(settings(11), JsonFileStore::new(&path));
    assert!(game.start());

    let state = game.state_mut();
    state.score = 1234;
    state.lives = 1;
    state.ship.invulnerable = false;
    state.asteroids.clear();
    let pos = state.ship.pos;
    let rock = Asteroid::at(state.rng(), pos, AsteroidSize::Medium, 0.0);
    state.asteroids.push(rock);

    let outcome = game.frame();
    assert!(outcome.collisions.ship_hit);
    assert!(outcome.collisions.game_over);
    assert_eq!(game.phase(), GamePhase::Over);
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.high_score(), 1234);

    // Presses are dead once the run is over
    game.press(Control::Fire);
    assert!(!game.frame().advanced);

    assert_eq!(game.submit_score(""), Err(LeaderboardError::EmptyName));
    game.submit_score("ada").unwrap();

    // A fresh store on the same file sees everything
    let reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.high_score().unwrap(), 1234);
    let board = reopened.leaderboard().unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board.entries[0].name, "ada");

    let game = GameController::new(settings(12), reopened);
    assert_eq!(game.high_score(), 1234);
    assert_eq!(game.leaderboard_ranked()[0].score, 1234);
}

#[test]
fn same_seed_same_autopilot_run() {
    let play = || {
        let mut game = GameController::new(settings(77), asteroids::persistence::MemoryStore::new());
        game.set_autopilot(true);
        game.start();
        for _ in 0..1200 {
            game.frame();
        }
        let s = game.state();
        (s.score, s.level, s.lives, s.ship.pos, s.asteroids.len())
    };
    assert_eq!(play(), play());
}
