//! Space Invaders - A wave-based arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, wave generation, per-frame step)
//! - `controller`: Game lifecycle state machine driving the simulation
//! - `snapshot`: Read-only view handed to rendering layers
//! - `storage`: Durable key-value port with native/browser/in-memory backends
//! - `platform`: Browser/native host bindings

pub mod controller;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod storage;

pub use controller::{Cue, Game, GamePhase, GameSummary, Notifier, NullNotifier};
pub use highscores::HighScore;
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, UnavailableStorage};

/// Game configuration constants
///
/// These must match exactly for behavioural parity between hosts.
pub mod consts {
    /// Logical arena dimensions (origin top-left, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Horizontal pixels per tick while a direction is held
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Gap between the player's bottom edge and the arena floor
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;
    pub const PLAYER_SHOT_COOLDOWN_MS: f32 = 500.0;

    /// Aliens
    pub const ALIEN_WIDTH: f32 = 40.0;
    pub const ALIEN_HEIGHT: f32 = 30.0;
    pub const ALIEN_BASE_ROWS: u32 = 5;
    pub const ALIEN_BASE_COLUMNS: u32 = 10;
    pub const ALIEN_MAX_ROWS: u32 = 7;
    pub const ALIEN_MAX_COLUMNS: u32 = 12;
    pub const ALIEN_HORIZONTAL_SPACING: f32 = 60.0;
    pub const ALIEN_VERTICAL_SPACING: f32 = 50.0;
    pub const ALIEN_HORIZONTAL_START: f32 = 100.0;
    pub const ALIEN_VERTICAL_START: f32 = 50.0;
    /// Formation speed at wave 1 (pixels per tick)
    pub const ALIEN_BASE_SPEED: f32 = 1.0;
    /// Added to the base speed for every wave past the first
    pub const WAVE_SPEED_INCREMENT: f32 = 0.2;
    /// Added every 5th kill within a wave
    pub const KILL_SPEED_INCREMENT: f32 = 0.2;
    pub const KILLS_PER_SPEED_UP: usize = 5;
    pub const ALIEN_MAX_SPEED: f32 = 5.0;
    /// Vertical drop applied to the whole formation on a wall bounce
    pub const ALIEN_DROP: f32 = 20.0;
    pub const ALIEN_SHOT_COOLDOWN_MIN_MS: f32 = 1000.0;
    pub const ALIEN_SHOT_COOLDOWN_MAX_MS: f32 = 2000.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 15.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 8.0;
    pub const ALIEN_PROJECTILE_SPEED: f32 = 5.0;

    /// Shields
    pub const SHIELD_WIDTH: f32 = 100.0;
    pub const SHIELD_HEIGHT: f32 = 50.0;
    pub const SHIELD_COUNT: u32 = 4;
    pub const SHIELD_MAX_HEALTH: u32 = 100;
    pub const SHIELD_MIN_START_HEALTH: u32 = 20;
    /// Starting health lost per wave past the first
    pub const SHIELD_WAVE_DECAY: u32 = 20;
    pub const SHIELD_DAMAGE_PER_HIT: u32 = 10;
    /// Shield row top is at `ARENA_HEIGHT - PLAYER_HEIGHT - SHIELD_FLOOR_OFFSET`
    pub const SHIELD_FLOOR_OFFSET: f32 = 100.0;

    /// Waves
    pub const MAX_WAVE: u32 = 5;
    pub const WAVE_TRANSITION_MS: f32 = 3000.0;
}
