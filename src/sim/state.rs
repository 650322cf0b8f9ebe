//! Game state and entity types
//!
//! Plain records plus the run-level state machine. Nothing here touches the
//! platform, so the whole state can be driven headless in tests.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, no simulation running
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, entities frozen until reset
    GameOver,
}

/// Player fixture models - the cosmetic upgrade swaps one for the other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureModel {
    /// Compact square panel, the starting form
    Compact,
    /// Long linear batten, unlocked at the level-up score
    Linear,
}

impl FixtureModel {
    /// Bounding box for this model
    pub fn size(self) -> Vec2 {
        let (w, h) = match self {
            FixtureModel::Compact => COMPACT_SIZE,
            FixtureModel::Linear => LINEAR_SIZE,
        };
        Vec2::new(w, h)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FixtureModel::Compact => "Compact 45",
            FixtureModel::Linear => "Linear 120",
        }
    }
}

/// The player's fixture
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Keyboard movement speed, pixels per frame
    pub speed: f32,
    pub model: FixtureModel,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: FixtureModel::Compact.size(),
            speed: PLAYER_SPEED,
            model: FixtureModel::Compact,
        }
    }

    /// Swap to the Linear model. Irreversible until the next reset.
    pub fn upgrade(&mut self) {
        self.model = FixtureModel::Linear;
        self.size = FixtureModel::Linear.size();
    }
}

/// Enemy movement behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyBehavior {
    /// Re-aims at the player every frame
    Chaser,
    /// Keeps its spawn velocity
    Dropper,
    /// Reserved - the spawner never emits this and it moves like a Dropper
    Zigzag,
}

/// A hostile fixture
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Speed rolled at spawn time; chasers home at a fraction of it
    pub speed: f32,
    pub behavior: EnemyBehavior,
}

/// A cosmetic burst fragment. No gameplay interaction.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Square side length
    pub size: f32,
    /// CSS color the renderer paints with
    pub color: &'static str,
    /// Remaining life; decays by a fixed rate per frame
    pub life: f32,
    pub max_life: f32,
    /// Render opacity, kept equal to `life`
    pub alpha: f32,
}

/// A lumen orb pickup
#[derive(Debug, Clone, Copy)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    /// Score granted on pickup
    pub value: u32,
}

/// One-shot notifications from the simulation to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The fixture upgraded to the Linear model
    LevelUp,
    /// An enemy hit the player; the run is over
    GameOver { final_score: u32 },
}

/// Viewport dimensions the simulation runs in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Deterministic RNG; the only randomness the simulation sees
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Continuous score; floor it for display
    pub score: f32,
    /// Floored score captured at the moment of the fatal collision
    pub final_score: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    /// Frames since the last enemy spawn
    pub frames_since_spawn: u32,
    /// Current spawn cadence in frames; shrinks toward its floor
    pub spawn_interval: f32,
    /// Total frames simulated this run
    pub time_frames: u64,
}

impl GameState {
    /// Create a new state sitting in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0.0,
            final_score: 0,
            player: Player::new(Bounds::default().center()),
            enemies: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            frames_since_spawn: 0,
            spawn_interval: SPAWN_INTERVAL_INITIAL,
            time_frames: 0,
        }
    }

    /// Start a fresh run: clear every collection, zero the score, re-center
    /// the player on its base model, and restore the initial spawn cadence.
    /// Used for both Menu -> Playing and GameOver -> Playing.
    pub fn begin_run(&mut self, bounds: &Bounds) {
        self.score = 0.0;
        self.final_score = 0;
        self.player = Player::new(bounds.center());
        self.enemies.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.frames_since_spawn = 0;
        self.spawn_interval = SPAWN_INTERVAL_INITIAL;
        self.time_frames = 0;
        self.phase = GamePhase::Playing;
    }

    /// Return to the menu without touching the simulation; the next
    /// `begin_run` does the reset.
    pub fn to_menu(&mut self) {
        self.phase = GamePhase::Menu;
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u32 {
        self.score.floor() as u32
    }
}
