//! Enemy and orb spawning plus particle bursts
//!
//! Everything here draws from the state's seeded RNG so runs replay exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Bounds, Enemy, EnemyBehavior, GameState, Particle, PowerUp};
use crate::consts::*;

/// Spawn one enemy just outside a uniformly chosen screen edge, moving inward
/// with a small perpendicular jitter. Speed scales with the current score.
pub fn spawn_enemy(state: &mut GameState, bounds: &Bounds) {
    let size = Vec2::new(ENEMY_SIZE.0, ENEMY_SIZE.1);
    let speed = ENEMY_BASE_SPEED
        + state.rng.random_range(0.0..ENEMY_SPEED_JITTER)
        + state.score * ENEMY_SPEED_PER_SCORE;
    let jitter = (state.rng.random::<f32>() - 0.5) * 2.0;

    // 0: top, 1: right, 2: bottom, 3: left
    let (pos, vel) = match state.rng.random_range(0..4u8) {
        0 => (
            Vec2::new(state.rng.random_range(0.0..bounds.width), -size.y),
            Vec2::new(jitter, speed),
        ),
        1 => (
            Vec2::new(
                bounds.width + size.x,
                state.rng.random_range(0.0..bounds.height),
            ),
            Vec2::new(-speed, jitter),
        ),
        2 => (
            Vec2::new(state.rng.random_range(0.0..bounds.width), bounds.height + size.y),
            Vec2::new(jitter, -speed),
        ),
        _ => (
            Vec2::new(-size.x, state.rng.random_range(0.0..bounds.height)),
            Vec2::new(speed, jitter),
        ),
    };

    let behavior = if state.rng.random_bool(CHASER_PROBABILITY) {
        EnemyBehavior::Chaser
    } else {
        EnemyBehavior::Dropper
    };

    state.enemies.push(Enemy {
        pos,
        vel,
        size,
        speed,
        behavior,
    });
}

/// Spawn an orb at a uniform point in the inset interior rectangle.
pub fn spawn_power_up(state: &mut GameState, bounds: &Bounds) {
    let pos = Vec2::new(
        state.rng.random_range(ORB_INSET..bounds.width - ORB_INSET),
        state.rng.random_range(ORB_INSET..bounds.height - ORB_INSET),
    );
    state.power_ups.push(PowerUp {
        pos,
        size: Vec2::new(ORB_SIZE.0, ORB_SIZE.1),
        value: ORB_VALUE,
    });
}

fn burst(
    state: &mut GameState,
    pos: Vec2,
    color: &'static str,
    count: usize,
    life: f32,
    spread: f32,
    size: f32,
) {
    let GameState { rng, particles, .. } = state;
    for _ in 0..count {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        particles.push(Particle {
            pos,
            vel,
            size,
            color,
            life,
            max_life: life,
            alpha: 1.0,
        });
    }
}

/// Small burst used for fatal hits and orb pickups.
pub fn impact_burst(state: &mut GameState, pos: Vec2, color: &'static str) {
    burst(state, pos, color, 15, 1.0, 10.0, 3.0);
}

/// Bigger, longer-lived burst for the model upgrade.
pub fn level_up_burst(state: &mut GameState, pos: Vec2) {
    burst(state, pos, COLOR_PLAYER, 30, 1.5, 15.0, 4.0);
}
