//! Lumen Rush - a dodge-and-collect arcade game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `renderer`: Canvas 2D drawing, a pure function of sim state
//! - `highscores`: Single persisted best score
//! - `settings`: Visual preferences
//! - `taunt`: Rival flavor text for the game-over screen

pub mod highscores;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod taunt;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical viewport used when no canvas is attached (tests, native runs)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Fixture sizes (width, height) - the player grows on upgrade
    pub const COMPACT_SIZE: (f32, f32) = (45.0, 45.0);
    pub const LINEAR_SIZE: (f32, f32) = (120.0, 30.0);

    pub const ENEMY_SIZE: (f32, f32) = (45.0, 45.0);
    pub const ORB_SIZE: (f32, f32) = (15.0, 15.0);

    /// Keyboard movement, pixels per frame per held axis
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Fraction of the remaining pointer delta applied each frame
    pub const POINTER_EASE: f32 = 0.1;

    /// Score at which the fixture upgrades to the Linear model
    pub const LEVEL_UP_SCORE: f32 = 500.0;
    /// Passive score gain per frame
    pub const SCORE_DRIFT: f32 = 0.1;

    /// Frames between enemy spawns at the start of a run
    pub const SPAWN_INTERVAL_INITIAL: f32 = 60.0;
    /// Spawn interval never drops below this
    pub const SPAWN_INTERVAL_MIN: f32 = 10.0;
    /// Spawn interval multiplier applied on each firing
    pub const DIFFICULTY_RAMP: f32 = 0.999;

    pub const ENEMY_BASE_SPEED: f32 = 3.0;
    /// Uniform random speed bonus in [0, this)
    pub const ENEMY_SPEED_JITTER: f32 = 2.0;
    /// Extra speed per point of score
    pub const ENEMY_SPEED_PER_SCORE: f32 = 1.0 / 500.0;
    /// Probability a spawned enemy homes in on the player
    pub const CHASER_PROBABILITY: f64 = 0.3;
    /// Chasers move at this fraction of their stored speed
    pub const CHASER_HOMING_FACTOR: f32 = 0.6;
    /// Enemies this far outside the bounds are removed
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Per-frame Bernoulli trial for orb spawning
    pub const ORB_CHANCE: f64 = 0.01;
    /// Score granted by one orb
    pub const ORB_VALUE: u32 = 50;
    /// Orbs spawn at least this far from every edge
    pub const ORB_INSET: f32 = 20.0;

    /// Particle life lost per frame (life 1.0 lasts ~50 frames)
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Palette
    pub const COLOR_PLAYER: &str = "#00bfff";
    pub const COLOR_CORE: &str = "#ffffff";
    pub const COLOR_ENEMY: &str = "#ef4444";
    pub const COLOR_ORB: &str = "#fbbf24";
    pub const COLOR_BACKGROUND: &str = "#0f172a";
    pub const COLOR_GRID: &str = "#1e293b";
}
