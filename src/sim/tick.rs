//! Per-frame simulation step
//!
//! Core game loop that advances the arena by one frame. The order of the
//! passes below is load-bearing: every collision pass reads the positions
//! produced earlier in the same tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::overlaps;
use super::input::InputState;
use super::state::GameState;
use crate::consts::*;

/// Discrete events for sound, haptics and HUD layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a projectile
    ShotFired { projectile_id: u64 },
    /// An alien fired a projectile
    AlienFired { projectile_id: u64, alien_id: u32 },
    /// A player projectile destroyed an alien
    AlienDestroyed { alien_id: u32, points: u64 },
    /// A projectile hit a shield
    ShieldHit { shield_id: u32, health: u32 },
    /// Formation touched a wall, reversed and dropped
    FormationBounced,
    /// An alien projectile hit the player
    PlayerHit,
    /// The formation reached the player's row
    AliensLanded,
    /// Every alien of the wave is dead
    WaveCleared { wave: u32 },
    /// A new wave was generated and play resumed
    WaveStarted { wave: u32 },
    /// The game ended
    GameOver {
        victory: bool,
        score: u64,
        new_high_score: bool,
    },
    /// Sound preference flipped
    SoundToggled { enabled: bool },
}

/// Why the player lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    PlayerHit,
    AliensLanded,
}

/// Termination condition evaluated at the end of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Keep ticking
    Continue,
    /// Game over, player lost
    Defeat(LossCause),
    /// Wave cleared, more waves remain
    WaveCleared,
    /// Final wave cleared
    Victory,
}

/// Everything a step produced besides the state mutation
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub events: Vec<GameEvent>,
    pub outcome: StepOutcome,
}

impl StepReport {
    fn finish(events: Vec<GameEvent>, outcome: StepOutcome) -> Self {
        Self { events, outcome }
    }
}

/// Advance the arena by one frame.
///
/// `dt_ms` is the measured time since the previous frame. Only cooldowns are
/// time-based; movement is per tick. All randomness comes through `rng` so
/// callers control determinism.
pub fn step<R: Rng>(
    state: &mut GameState,
    input: &InputState,
    dt_ms: f32,
    rng: &mut R,
) -> StepReport {
    let mut events = Vec::new();

    // 1. Player movement
    if input.left {
        state.player.move_left();
    }
    if input.right {
        state.player.move_right();
    }

    // 2. Player firing
    if input.fire && state.player_cooldown_ms <= 0.0 {
        let projectile_id = state.spawn_projectile(state.player.muzzle(), true);
        state.player_cooldown_ms = PLAYER_SHOT_COOLDOWN_MS;
        events.push(GameEvent::ShotFired { projectile_id });
    }

    // 3. Alien firing
    if state.alien_cooldown_ms <= 0.0 {
        let living: Vec<usize> = state
            .aliens
            .iter()
            .enumerate()
            .filter(|(_, a)| a.alive)
            .map(|(i, _)| i)
            .collect();
        if !living.is_empty() {
            let shooter = &state.aliens[living[rng.random_range(0..living.len())]];
            let (alien_id, muzzle) = (shooter.id, shooter.muzzle());
            let projectile_id = state.spawn_projectile(muzzle, false);
            state.alien_cooldown_ms =
                rng.random_range(ALIEN_SHOT_COOLDOWN_MIN_MS..ALIEN_SHOT_COOLDOWN_MAX_MS);
            events.push(GameEvent::AlienFired {
                projectile_id,
                alien_id,
            });
        }
    }

    // 4. Cooldown decay (no floor, only the <= 0 check matters)
    state.player_cooldown_ms -= dt_ms;
    state.alien_cooldown_ms -= dt_ms;

    // 5. Formation advance
    if advance_formation(state) {
        events.push(GameEvent::FormationBounced);
    }

    // 6. Bottom reached
    let player_top = state.player.pos.y;
    if state
        .living_aliens()
        .any(|a| a.pos.y + ALIEN_HEIGHT >= player_top)
    {
        events.push(GameEvent::AliensLanded);
        return StepReport::finish(events, StepOutcome::Defeat(LossCause::AliensLanded));
    }

    // 7. Projectile advance
    for projectile in &mut state.projectiles {
        projectile.pos.y += projectile.velocity_y();
    }
    state.projectiles.retain(|p| !p.out_of_bounds());

    // 8. Player projectiles vs aliens
    resolve_alien_hits(state, &mut events);

    // 9. All projectiles vs shields
    resolve_shield_hits(state, &mut events);

    // 10. Alien projectiles vs player
    let player_rect = state.player.rect();
    if let Some(i) = state
        .projectiles
        .iter()
        .position(|p| !p.is_player && overlaps(&p.rect(), &player_rect))
    {
        state.projectiles.remove(i);
        events.push(GameEvent::PlayerHit);
        return StepReport::finish(events, StepOutcome::Defeat(LossCause::PlayerHit));
    }

    // 11. Wave clear
    if state.all_aliens_dead() {
        events.push(GameEvent::WaveCleared { wave: state.wave });
        let outcome = if state.wave >= MAX_WAVE {
            StepOutcome::Victory
        } else {
            StepOutcome::WaveCleared
        };
        return StepReport::finish(events, outcome);
    }

    StepReport::finish(events, StepOutcome::Continue)
}

/// Move the formation one tick. Returns true if it bounced.
///
/// The horizontal step and the drop happen in the same tick as the wall
/// contact; the reversed direction applies from the next tick.
fn advance_formation(state: &mut GameState) -> bool {
    let dx = state.alien_speed * state.alien_direction;
    let max_x = ARENA_WIDTH - ALIEN_WIDTH;
    let mut bounce = false;

    for alien in state.aliens.iter_mut().filter(|a| a.alive) {
        alien.pos.x += dx;
        if alien.pos.x <= 0.0 || alien.pos.x >= max_x {
            bounce = true;
        }
    }

    if bounce {
        state.alien_direction = -state.alien_direction;
        for alien in &mut state.aliens {
            alien.pos.y += ALIEN_DROP;
        }
    }
    bounce
}

/// Each player projectile may destroy at most one alien per tick
fn resolve_alien_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.projectiles.len() {
        if !state.projectiles[i].is_player {
            i += 1;
            continue;
        }
        let rect = state.projectiles[i].rect();
        let Some(alien) = state
            .aliens
            .iter_mut()
            .find(|a| a.alive && overlaps(&rect, &a.rect()))
        else {
            i += 1;
            continue;
        };

        alien.alive = false;
        let (alien_id, points) = (alien.id, alien.points);
        state.score += points;
        state.projectiles.remove(i);
        events.push(GameEvent::AlienDestroyed { alien_id, points });

        if state.alive_count() % KILLS_PER_SPEED_UP == 0 {
            state.alien_speed = (state.alien_speed + KILL_SPEED_INCREMENT).min(ALIEN_MAX_SPEED);
        }
    }
}

/// Each projectile may be absorbed by at most one standing shield per tick.
/// Hits apply sequentially, so one shield can absorb several projectiles.
fn resolve_shield_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.projectiles.len() {
        let rect = state.projectiles[i].rect();
        let Some(shield) = state
            .shields
            .iter_mut()
            .find(|s| s.is_standing() && overlaps(&rect, &s.rect()))
        else {
            i += 1;
            continue;
        };

        shield.absorb_hit();
        events.push(GameEvent::ShieldHit {
            shield_id: shield.id,
            health: shield.health,
        });
        state.projectiles.remove(i);
    }
}
