//! Game state and core simulation types
//!
//! `GameState` is the entity registry: it owns the player, the alien
//! formation, projectiles and shields, plus the counters the step mutates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::wave::generate_wave;
use crate::consts::*;

/// Row-based alien classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlienTier {
    /// Type 1: bottom rows, most common
    Bottom,
    /// Type 2: rows 1-2
    Middle,
    /// Type 3: top row, rarest
    Top,
}

impl AlienTier {
    /// Numeric type as shown to renderers (1, 2 or 3)
    pub fn as_u8(&self) -> u8 {
        match self {
            AlienTier::Bottom => 1,
            AlienTier::Middle => 2,
            AlienTier::Top => 3,
        }
    }

    /// Points at wave 1; scaled linearly by the wave number
    pub fn base_points(&self) -> u64 {
        match self {
            AlienTier::Bottom => 10,
            AlienTier::Middle => 20,
            AlienTier::Top => 30,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Self::start_pos(),
        }
    }
}

impl Player {
    /// Horizontally centred, resting just above the floor
    pub fn start_pos() -> Vec2 {
        Vec2::new(
            ARENA_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
            ARENA_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Step left, clamped to the arena edge
    pub fn move_left(&mut self) {
        if self.pos.x > 0.0 {
            self.pos.x = (self.pos.x - PLAYER_SPEED).max(0.0);
        }
    }

    /// Step right, clamped to the arena edge
    pub fn move_right(&mut self) {
        let max_x = ARENA_WIDTH - PLAYER_WIDTH;
        if self.pos.x < max_x {
            self.pos.x = (self.pos.x + PLAYER_SPEED).min(max_x);
        }
    }

    /// Where a freshly fired player projectile appears
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + PLAYER_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0,
            self.pos.y,
        )
    }
}

/// An alien in the formation
///
/// Dead aliens stay in the collection with `alive == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    pub pos: Vec2,
    pub alive: bool,
    pub tier: AlienTier,
    pub points: u64,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT))
    }

    /// Where this alien's downward shot appears
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + ALIEN_WIDTH / 2.0 - PROJECTILE_WIDTH / 2.0,
            self.pos.y + ALIEN_HEIGHT,
        )
    }
}

/// A projectile from either side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u64,
    pub pos: Vec2,
    /// `true` = fired by the player, travels up
    pub is_player: bool,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }

    /// Signed vertical displacement per tick
    pub fn velocity_y(&self) -> f32 {
        if self.is_player {
            -PLAYER_PROJECTILE_SPEED
        } else {
            ALIEN_PROJECTILE_SPEED
        }
    }

    /// Whether the projectile has left the arena vertically
    pub fn out_of_bounds(&self) -> bool {
        if self.is_player {
            self.pos.y <= 0.0
        } else {
            self.pos.y >= ARENA_HEIGHT
        }
    }
}

/// A destructible cover block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub id: u32,
    pub pos: Vec2,
    pub health: u32,
}

impl Shield {
    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(SHIELD_WIDTH, SHIELD_HEIGHT))
    }

    /// Depleted shields are ignored by collision and rendering
    pub fn is_standing(&self) -> bool {
        self.health > 0
    }

    /// Take one projectile impact
    pub fn absorb_hit(&mut self) {
        self.health = self.health.saturating_sub(SHIELD_DAMAGE_PER_HIT);
    }
}

/// Complete simulation state for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current wave (1-based)
    pub wave: u32,
    pub score: u64,
    pub player: Player,
    /// Formation in row-major order
    pub aliens: Vec<Alien>,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    pub shields: Vec<Shield>,
    /// +1.0 moving right, -1.0 moving left
    pub alien_direction: f32,
    /// Formation speed (pixels per tick)
    pub alien_speed: f32,
    /// Milliseconds until the player may fire again (may go negative)
    pub player_cooldown_ms: f32,
    /// Milliseconds until an alien fires (may go negative)
    pub alien_cooldown_ms: f32,
    /// Next projectile ID, never reset while the process lives
    next_projectile_id: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game at wave 1
    pub fn new() -> Self {
        let mut state = Self {
            wave: 1,
            score: 0,
            player: Player::default(),
            aliens: Vec::new(),
            projectiles: Vec::new(),
            shields: Vec::new(),
            alien_direction: 1.0,
            alien_speed: ALIEN_BASE_SPEED,
            player_cooldown_ms: 0.0,
            alien_cooldown_ms: 0.0,
            next_projectile_id: 0,
        };
        generate_wave(&mut state, 1);
        state
    }

    /// Reset for a new game, keeping the projectile ID sequence
    pub fn reset(&mut self) {
        let next_projectile_id = self.next_projectile_id;
        *self = Self::new();
        self.next_projectile_id = next_projectile_id;
    }

    /// Allocate a projectile ID
    pub fn next_projectile_id(&mut self) -> u64 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        id
    }

    /// Spawn a projectile and return its ID
    pub fn spawn_projectile(&mut self, pos: Vec2, is_player: bool) -> u64 {
        let id = self.next_projectile_id();
        self.projectiles.push(Projectile { id, pos, is_player });
        id
    }

    pub fn living_aliens(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.living_aliens().count()
    }

    pub fn all_aliens_dead(&self) -> bool {
        self.aliens.iter().all(|a| !a.alive)
    }

    pub fn standing_shields(&self) -> impl Iterator<Item = &Shield> {
        self.shields.iter().filter(|s| s.is_standing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_wave_one() {
        let state = GameState::new();
        assert_eq!(state.wave, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.aliens.len(), 50);
        assert_eq!(state.shields.len(), 4);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.alien_direction, 1.0);
        assert_eq!(state.player.pos, Vec2::new(370.0, 540.0));
    }

    #[test]
    fn test_player_clamps_at_edges() {
        let mut player = Player {
            pos: Vec2::new(3.0, 540.0),
        };
        player.move_left();
        assert_eq!(player.pos.x, 0.0);
        player.move_left();
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = 736.0;
        player.move_right();
        assert_eq!(player.pos.x, 740.0);
        player.move_right();
        assert_eq!(player.pos.x, 740.0);
    }

    #[test]
    fn test_projectile_ids_survive_reset() {
        let mut state = GameState::new();
        let a = state.spawn_projectile(Vec2::ZERO, true);
        let b = state.spawn_projectile(Vec2::ZERO, false);
        assert!(b > a);

        state.reset();
        assert!(state.projectiles.is_empty());
        let c = state.spawn_projectile(Vec2::ZERO, true);
        assert!(c > b);
    }

    #[test]
    fn test_shield_health_saturates() {
        let mut shield = Shield {
            id: 0,
            pos: Vec2::ZERO,
            health: 15,
        };
        shield.absorb_hit();
        assert_eq!(shield.health, 5);
        shield.absorb_hit();
        assert_eq!(shield.health, 0);
        assert!(!shield.is_standing());
        shield.absorb_hit();
        assert_eq!(shield.health, 0);
    }

    #[test]
    fn test_projectile_bounds() {
        let up = Projectile {
            id: 0,
            pos: Vec2::new(10.0, 0.0),
            is_player: true,
        };
        assert!(up.out_of_bounds());
        let down = Projectile {
            id: 1,
            pos: Vec2::new(10.0, 599.0),
            is_player: false,
        };
        assert!(!down.out_of_bounds());
    }
}
