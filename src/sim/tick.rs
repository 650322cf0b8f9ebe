//! Per-frame simulation step
//!
//! One `tick` call advances the world by exactly one frame. The step order is
//! fixed; reordering it changes observable behavior (the fatal-collision
//! early return, for example, decides whether that frame's drift counts).

use glam::Vec2;
use rand::Rng;

use super::collision::{aabb_overlap, clamp_to_bounds};
use super::spawn;
use super::state::{Bounds, EnemyBehavior, FixtureModel, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single frame
///
/// Listeners write into this between frames; the tick only reads it. An
/// active pointer target overrides the key flags entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Absolute pointer/touch target; cleared by any key press
    pub pointer: Option<Vec2>,
}

/// Advance the game by one frame. No-op unless the phase is `Playing`.
///
/// Returned events are the simulation's only channel to the presentation
/// layer; each is emitted at most once per run.
pub fn tick(state: &mut GameState, input: &FrameInput, bounds: &Bounds) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_frames += 1;

    // Level-up: one-time model swap once the score threshold is reached
    if state.score >= LEVEL_UP_SCORE && state.player.model == FixtureModel::Compact {
        state.player.upgrade();
        let pos = state.player.pos;
        spawn::level_up_burst(state, pos);
        events.push(GameEvent::LevelUp);
    }

    // Player movement: pointer easing wins over keys
    if let Some(target) = input.pointer {
        let delta = target - state.player.pos;
        state.player.pos += delta * POINTER_EASE;
    } else {
        let speed = state.player.speed;
        if input.up {
            state.player.pos.y -= speed;
        }
        if input.down {
            state.player.pos.y += speed;
        }
        if input.left {
            state.player.pos.x -= speed;
        }
        if input.right {
            state.player.pos.x += speed;
        }
    }
    state.player.pos = clamp_to_bounds(state.player.pos, state.player.size, bounds);

    // Enemy spawn cadence: interval shrinks on each firing, down to its floor
    state.frames_since_spawn += 1;
    if state.frames_since_spawn as f32 >= state.spawn_interval {
        spawn::spawn_enemy(state, bounds);
        state.frames_since_spawn = 0;
        state.spawn_interval = (state.spawn_interval * DIFFICULTY_RAMP).max(SPAWN_INTERVAL_MIN);
    }

    // Orb spawn: independent per-frame trial
    if state.rng.random_bool(ORB_CHANCE) {
        spawn::spawn_power_up(state, bounds);
    }

    // Enemy kinematics; chasers re-aim at the player's current position
    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        match enemy.behavior {
            EnemyBehavior::Chaser => {
                let dir = (player_pos - enemy.pos).normalize_or_zero();
                enemy.vel = dir * (enemy.speed * CHASER_HOMING_FACTOR);
            }
            // Droppers keep their spawn velocity; Zigzag is reserved and
            // currently behaves the same
            EnemyBehavior::Dropper | EnemyBehavior::Zigzag => {}
        }
        enemy.pos += enemy.vel;
    }
    state.enemies.retain(|e| {
        e.pos.x > -OFFSCREEN_MARGIN
            && e.pos.x < bounds.width + OFFSCREEN_MARGIN
            && e.pos.y > -OFFSCREEN_MARGIN
            && e.pos.y < bounds.height + OFFSCREEN_MARGIN
    });

    // Particles
    for p in &mut state.particles {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
        p.alpha = p.life;
    }
    state.particles.retain(|p| p.life > 0.0);

    // Fatal collision: the first hit ends the frame and freezes the run
    let (p_pos, p_size) = (state.player.pos, state.player.size);
    let hit = state
        .enemies
        .iter()
        .any(|e| aabb_overlap(p_pos, p_size, e.pos, e.size));
    if hit {
        state.final_score = state.display_score();
        spawn::impact_burst(state, p_pos, COLOR_PLAYER);
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver {
            final_score: state.final_score,
        });
        return events;
    }

    // Orb pickups: collect on overlap, keep the rest
    let mut i = 0;
    while i < state.power_ups.len() {
        let orb = state.power_ups[i];
        if aabb_overlap(p_pos, p_size, orb.pos, orb.size) {
            state.power_ups.remove(i);
            state.score += orb.value as f32;
            spawn::impact_burst(state, orb.pos, COLOR_ORB);
        } else {
            i += 1;
        }
    }

    // Passive drift: light decays, orbs offset it
    state.score += SCORE_DRIFT;

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Enemy;

    /// Roomy arena: spawned enemies cannot reach a centered player within the
    /// frame counts these tests run, so scripted collisions stay scripted.
    fn big_bounds() -> Bounds {
        Bounds::new(5000.0, 5000.0)
    }

    fn playing_state(seed: u64, bounds: &Bounds) -> GameState {
        let mut state = GameState::new(seed);
        state.begin_run(bounds);
        state
    }

    fn enemy_at(pos: Vec2, vel: Vec2, behavior: EnemyBehavior) -> Enemy {
        Enemy {
            pos,
            vel,
            size: Vec2::new(ENEMY_SIZE.0, ENEMY_SIZE.1),
            speed: vel.length().max(1.0),
            behavior,
        }
    }

    #[test]
    fn tick_is_a_no_op_outside_playing() {
        let bounds = big_bounds();
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);

        let events = tick(&mut state, &FrameInput::default(), &bounds);
        assert!(events.is_empty());
        assert_eq!(state.time_frames, 0);
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn score_drifts_a_tenth_per_frame() {
        let bounds = big_bounds();
        let mut state = playing_state(42, &bounds);

        let frames = 100;
        for _ in 0..frames {
            let events = tick(&mut state, &FrameInput::default(), &bounds);
            assert!(events.is_empty());
        }
        assert!((state.score - 0.1 * frames as f32).abs() < 1e-3);
        assert_eq!(state.display_score(), 10);
    }

    #[test]
    fn keyboard_moves_per_axis_and_diagonals_stack() {
        let bounds = big_bounds();
        let mut state = playing_state(2, &bounds);
        let start = state.player.pos;

        let input = FrameInput {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, &bounds);
        // Each held axis contributes its full speed; no diagonal normalization
        assert_eq!(state.player.pos, start + Vec2::splat(PLAYER_SPEED));
    }

    #[test]
    fn pointer_eases_ten_percent_and_overrides_keys() {
        let bounds = big_bounds();
        let mut state = playing_state(2, &bounds);
        let start = state.player.pos;
        let target = start + Vec2::new(100.0, -50.0);

        let input = FrameInput {
            left: true, // must be ignored while the pointer is active
            pointer: Some(target),
            ..Default::default()
        };
        tick(&mut state, &input, &bounds);
        let expected = start + (target - start) * POINTER_EASE;
        assert!((state.player.pos - expected).length() < 1e-4);
    }

    #[test]
    fn player_box_never_leaves_the_viewport() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut state = playing_state(5, &bounds);

        let input = FrameInput {
            left: true,
            up: true,
            ..Default::default()
        };
        // The first spawn lands at frame 60, so the player is alone here
        for _ in 0..59 {
            tick(&mut state, &input, &bounds);
            let half = state.player.size * 0.5;
            assert!(state.player.pos.x - half.x >= 0.0);
            assert!(state.player.pos.y - half.y >= 0.0);
            assert!(state.player.pos.x + half.x <= bounds.width);
            assert!(state.player.pos.y + half.y <= bounds.height);
        }

        // Even a teleport outside the viewport is pulled back by the clamp
        state.player.pos = Vec2::new(-300.0, 900.0);
        tick(&mut state, &FrameInput::default(), &bounds);
        let half = state.player.size * 0.5;
        assert_eq!(
            state.player.pos,
            Vec2::new(half.x, bounds.height - half.y)
        );
    }

    #[test]
    fn level_up_fires_once_at_the_threshold_and_sticks() {
        let bounds = big_bounds();
        let mut state = playing_state(3, &bounds);

        // Just below the threshold: no upgrade this frame even though drift
        // pushes the score past it by the frame's end
        state.score = LEVEL_UP_SCORE - 0.05;
        let events = tick(&mut state, &FrameInput::default(), &bounds);
        assert!(events.is_empty());
        assert_eq!(state.player.model, FixtureModel::Compact);
        assert!(state.score >= LEVEL_UP_SCORE);

        // The next frame sees the crossed threshold
        let events = tick(&mut state, &FrameInput::default(), &bounds);
        assert_eq!(events, vec![GameEvent::LevelUp]);
        assert_eq!(state.player.model, FixtureModel::Linear);
        assert_eq!(state.player.size, FixtureModel::Linear.size());
        assert_eq!(state.particles.len(), 30);

        // Never again this run
        for _ in 0..20 {
            let events = tick(&mut state, &FrameInput::default(), &bounds);
            assert!(events.is_empty());
        }
        assert_eq!(state.player.model, FixtureModel::Linear);
    }

    #[test]
    fn spawn_interval_is_monotone_with_a_floor() {
        let bounds = big_bounds();
        let mut state = playing_state(11, &bounds);

        let mut last = state.spawn_interval;
        for _ in 0..5000 {
            tick(&mut state, &FrameInput::default(), &bounds);
            assert!(state.spawn_interval <= last);
            assert!(state.spawn_interval >= SPAWN_INTERVAL_MIN);
            last = state.spawn_interval;
        }
        assert!(state.spawn_interval < SPAWN_INTERVAL_INITIAL);

        // The clamp itself: a firing at the floor must not go below it
        state.begin_run(&bounds);
        state.spawn_interval = SPAWN_INTERVAL_MIN;
        state.frames_since_spawn = SPAWN_INTERVAL_MIN as u32;
        tick(&mut state, &FrameInput::default(), &bounds);
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_MIN);
    }

    #[test]
    fn first_enemy_appears_exactly_at_the_interval() {
        let bounds = big_bounds();
        let mut state = playing_state(8, &bounds);

        for _ in 0..59 {
            tick(&mut state, &FrameInput::default(), &bounds);
        }
        assert!(state.enemies.is_empty());

        tick(&mut state, &FrameInput::default(), &bounds);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.frames_since_spawn, 0);

        // Cadence holds: one more enemy after the next full interval
        for _ in 0..60 {
            tick(&mut state, &FrameInput::default(), &bounds);
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn fatal_collision_ends_the_run_with_the_floored_score() {
        let bounds = big_bounds();
        let mut state = playing_state(4, &bounds);
        state.score = 123.9;
        state
            .enemies
            .push(enemy_at(state.player.pos, Vec2::ZERO, EnemyBehavior::Dropper));

        let events = tick(&mut state, &FrameInput::default(), &bounds);
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 123 }]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.final_score, 123);
        // The fatal frame skips its drift
        assert!((state.score - 123.9).abs() < 1e-4);
        // Burst at the player marks the hit
        assert_eq!(state.particles.len(), 15);

        // Frozen until reset
        let frames = state.time_frames;
        let events = tick(&mut state, &FrameInput::default(), &bounds);
        assert!(events.is_empty());
        assert_eq!(state.time_frames, frames);
    }

    #[test]
    fn orb_pickup_adds_value_and_removes_only_that_orb() {
        let bounds = big_bounds();
        let mut state = playing_state(4, &bounds);
        let near = state.player.pos;
        let far = near + Vec2::new(400.0, 0.0);

        state.power_ups.push(crate::sim::PowerUp {
            pos: near,
            size: Vec2::new(ORB_SIZE.0, ORB_SIZE.1),
            value: ORB_VALUE,
        });
        state.power_ups.push(crate::sim::PowerUp {
            pos: far,
            size: Vec2::new(ORB_SIZE.0, ORB_SIZE.1),
            value: ORB_VALUE,
        });

        tick(&mut state, &FrameInput::default(), &bounds);
        assert!((state.score - (ORB_VALUE as f32 + SCORE_DRIFT)).abs() < 1e-4);
        // The collected orb is gone, the distant one survives
        assert!(state.power_ups.iter().all(|o| o.pos != near));
        assert!(state.power_ups.iter().any(|o| o.pos == far));
        assert_eq!(state.particles.len(), 15);
    }

    #[test]
    fn enemies_past_the_margin_are_removed() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut state = playing_state(6, &bounds);
        // Crosses the -100 line this frame
        state.enemies.push(enemy_at(
            Vec2::new(-99.0, 300.0),
            Vec2::new(-5.0, 0.0),
            EnemyBehavior::Dropper,
        ));
        // Stays inside the margin
        state.enemies.push(enemy_at(
            Vec2::new(-90.0, 300.0),
            Vec2::new(-5.0, 0.0),
            EnemyBehavior::Dropper,
        ));

        tick(&mut state, &FrameInput::default(), &bounds);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(-95.0, 300.0));
    }

    #[test]
    fn dropper_velocity_never_changes() {
        let bounds = big_bounds();
        let mut state = playing_state(9, &bounds);
        let vel = Vec2::new(1.3, -0.4);
        state.enemies.push(enemy_at(
            state.player.pos + Vec2::new(800.0, 800.0),
            vel,
            EnemyBehavior::Dropper,
        ));

        for _ in 0..40 {
            tick(&mut state, &FrameInput::default(), &bounds);
            assert_eq!(state.enemies[0].vel, vel);
        }
    }

    #[test]
    fn chaser_velocity_tracks_the_player() {
        let bounds = big_bounds();
        let mut state = playing_state(9, &bounds);
        let start = state.player.pos + Vec2::new(600.0, 0.0);
        let speed = 4.0;
        let mut chaser = enemy_at(start, Vec2::ZERO, EnemyBehavior::Chaser);
        chaser.speed = speed;
        state.enemies.push(chaser);

        tick(&mut state, &FrameInput::default(), &bounds);
        let e = state.enemies[0];
        // Aimed from its pre-integration position at the player, scaled to
        // 60% of its stored speed
        let expected = (state.player.pos - start).normalize() * (speed * CHASER_HOMING_FACTOR);
        assert!((e.vel - expected).length() < 1e-4);

        // Drag the player elsewhere; the chaser re-aims next frame
        let target = state.player.pos + Vec2::new(0.0, 900.0);
        let input = FrameInput {
            pointer: Some(target),
            ..Default::default()
        };
        tick(&mut state, &input, &bounds);
        let e = state.enemies[0];
        let dir = e.vel.normalize();
        let to_player = (state.player.pos - (e.pos - e.vel)).normalize();
        assert!((dir - to_player).length() < 1e-4);
        assert!((e.vel.length() - speed * CHASER_HOMING_FACTOR).abs() < 1e-4);
    }

    #[test]
    fn reset_clears_the_world_and_restores_the_base_model() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut state = playing_state(10, &bounds);

        state.score = 900.0;
        for _ in 0..200 {
            tick(&mut state, &FrameInput::default(), &bounds);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.player.model, FixtureModel::Linear);

        state.begin_run(&bounds);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0.0);
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.spawn_interval, SPAWN_INTERVAL_INITIAL);
        assert_eq!(state.player.model, FixtureModel::Compact);
        assert_eq!(state.player.size, FixtureModel::Compact.size());
        assert_eq!(state.player.pos, bounds.center());
    }

    #[test]
    fn menu_transition_defers_the_reset() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut state = playing_state(10, &bounds);
        for _ in 0..120 {
            tick(&mut state, &FrameInput::default(), &bounds);
        }
        let enemies = state.enemies.len();
        assert!(enemies > 0);

        state.to_menu();
        assert_eq!(state.phase, GamePhase::Menu);
        // Nothing cleared until the next run starts
        assert_eq!(state.enemies.len(), enemies);

        state.begin_run(&bounds);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn particles_decay_and_expire() {
        let bounds = big_bounds();
        let mut state = playing_state(12, &bounds);
        let burst_pos = state.player.pos;
        spawn::impact_burst(&mut state, burst_pos, COLOR_PLAYER);

        tick(&mut state, &FrameInput::default(), &bounds);
        for p in &state.particles {
            assert!((p.life - (1.0 - PARTICLE_DECAY)).abs() < 1e-5);
            assert_eq!(p.alpha, p.life);
        }

        // Life 1.0 at 0.02/frame lasts ~50 frames; leave slack for float
        // accumulation on the last one
        for _ in 0..51 {
            tick(&mut state, &FrameInput::default(), &bounds);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn same_seed_and_inputs_replay_identically() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut a = playing_state(99999, &bounds);
        let mut b = playing_state(99999, &bounds);

        let pointer = FrameInput {
            pointer: Some(Vec2::new(200.0, 150.0)),
            ..Default::default()
        };
        let keys = FrameInput {
            right: true,
            ..Default::default()
        };
        for frame in 0..300 {
            let input = if frame % 2 == 0 { pointer } else { keys };
            let ea = tick(&mut a, &input, &bounds);
            let eb = tick(&mut b, &input, &bounds);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.spawn_interval, b.spawn_interval);
        assert_eq!(a.phase, b.phase);
    }
}
