//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Whole-frame steps only (every rate in the game is defined per frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, clamp_to_bounds};
pub use spawn::{impact_burst, level_up_burst, spawn_enemy, spawn_power_up};
pub use state::{
    Bounds, Enemy, EnemyBehavior, FixtureModel, GameEvent, GamePhase, GameState, Particle, Player,
    PowerUp,
};
pub use tick::{FrameInput, tick};
