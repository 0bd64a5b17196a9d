//! Read-only frame snapshot for rendering layers
//!
//! Only what a renderer draws: living aliens, live projectiles, standing
//! shields, HUD counters and one-frame pulses for sound/haptic triggers.

use serde::Serialize;

use crate::controller::{Game, GamePhase, GameSummary, Notifier};
use crate::sim::{GameEvent, Rect};
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct AlienView {
    pub id: u32,
    pub rect: Rect,
    /// 1 = bottom, 2 = middle, 3 = top
    pub kind: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u64,
    pub rect: Rect,
    pub is_player: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShieldView {
    pub id: u32,
    pub rect: Rect,
    pub health: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: Rect,
    pub aliens: Vec<AlienView>,
    pub projectiles: Vec<ProjectileView>,
    pub shields: Vec<ShieldView>,
    pub score: u64,
    pub high_score: u64,
    pub wave: u32,
    pub sound_enabled: bool,
    /// Milliseconds until the next wave, while a transition is pending
    pub transition_remaining_ms: Option<f32>,
    pub summary: Option<GameSummary>,
    // Pulses from the most recent frame
    pub just_fired: bool,
    pub just_destroyed: bool,
    pub just_game_over: bool,
}

impl Snapshot {
    pub fn capture<S: Storage, N: Notifier>(game: &Game<S, N>) -> Self {
        let state = game.state();
        let events = game.events();

        Self {
            phase: game.phase(),
            player: state.player.rect(),
            aliens: state
                .living_aliens()
                .map(|a| AlienView {
                    id: a.id,
                    rect: a.rect(),
                    kind: a.tier.as_u8(),
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    rect: p.rect(),
                    is_player: p.is_player,
                })
                .collect(),
            shields: state
                .standing_shields()
                .map(|s| ShieldView {
                    id: s.id,
                    rect: s.rect(),
                    health: s.health,
                })
                .collect(),
            score: state.score,
            high_score: game.high_score(),
            wave: state.wave,
            sound_enabled: game.settings().sound_enabled,
            transition_remaining_ms: game.transition_remaining_ms(),
            summary: game.summary().copied(),
            just_fired: events
                .iter()
                .any(|e| matches!(e, GameEvent::ShotFired { .. })),
            just_destroyed: events
                .iter()
                .any(|e| matches!(e, GameEvent::AlienDestroyed { .. })),
            just_game_over: events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. })),
        }
    }

    /// Serialize for a JavaScript host
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
