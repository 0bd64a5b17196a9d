//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Injected RNG only
//! - Stable iteration order (collections keep insertion order)
//! - No rendering, audio, storage or platform dependencies

pub mod geometry;
pub mod input;
pub mod state;
pub mod tick;
pub mod wave;

pub use geometry::{Rect, overlaps};
pub use input::{InputEvent, InputState};
pub use state::{Alien, AlienTier, GameState, Player, Projectile, Shield};
pub use tick::{GameEvent, LossCause, StepOutcome, StepReport, step};
pub use wave::{alien_tier_for_row, generate_wave, grid_dimensions, shield_health_for_wave};
