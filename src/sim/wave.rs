//! Wave generation
//!
//! Builds the alien grid and shield row for a wave. The difficulty curve
//! lives here: more rows and columns, faster formation, weaker cover.

use glam::Vec2;

use super::state::{Alien, AlienTier, GameState, Shield};
use crate::consts::*;

/// Formation size for a wave as `(rows, columns)`
pub fn grid_dimensions(wave: u32) -> (u32, u32) {
    let rows = (ALIEN_BASE_ROWS + wave / 3).min(ALIEN_MAX_ROWS);
    let columns = (ALIEN_BASE_COLUMNS + wave / 2).min(ALIEN_MAX_COLUMNS);
    (rows, columns)
}

/// Row 0 is the top tier, rows 1-2 the middle tier, the rest the bottom tier
pub fn alien_tier_for_row(row: u32) -> AlienTier {
    match row {
        0 => AlienTier::Top,
        1 | 2 => AlienTier::Middle,
        _ => AlienTier::Bottom,
    }
}

/// Shields start weaker every wave but never below the floor
pub fn shield_health_for_wave(wave: u32) -> u32 {
    SHIELD_MAX_HEALTH
        .saturating_sub((wave - 1) * SHIELD_WAVE_DECAY)
        .max(SHIELD_MIN_START_HEALTH)
}

/// Formation speed at the start of a wave
pub fn base_speed_for_wave(wave: u32) -> f32 {
    ALIEN_BASE_SPEED + (wave - 1) as f32 * WAVE_SPEED_INCREMENT
}

/// Replace the formation and shields with a fresh layout for `wave`
pub fn generate_wave(state: &mut GameState, wave: u32) {
    assert!(wave >= 1, "wave numbers start at 1");

    let (rows, columns) = grid_dimensions(wave);
    log::info!("Wave {}: {}x{} formation", wave, rows, columns);

    state.wave = wave;

    state.aliens.clear();
    state.aliens.reserve((rows * columns) as usize);
    let mut id = 0;
    for row in 0..rows {
        let tier = alien_tier_for_row(row);
        let points = tier.base_points() * wave as u64;
        for col in 0..columns {
            state.aliens.push(Alien {
                id,
                pos: Vec2::new(
                    ALIEN_HORIZONTAL_START + col as f32 * ALIEN_HORIZONTAL_SPACING,
                    ALIEN_VERTICAL_START + row as f32 * ALIEN_VERTICAL_SPACING,
                ),
                alive: true,
                tier,
                points,
            });
            id += 1;
        }
    }

    let health = shield_health_for_wave(wave);
    let spacing = ARENA_WIDTH / (SHIELD_COUNT + 1) as f32;
    let shield_y = ARENA_HEIGHT - PLAYER_HEIGHT - SHIELD_FLOOR_OFFSET;
    state.shields = (0..SHIELD_COUNT)
        .map(|i| Shield {
            id: i,
            pos: Vec2::new((i + 1) as f32 * spacing - SHIELD_WIDTH / 2.0, shield_y),
            health,
        })
        .collect();

    state.alien_speed = base_speed_for_wave(wave);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_growth() {
        assert_eq!(grid_dimensions(1), (5, 10));
        assert_eq!(grid_dimensions(2), (5, 11));
        assert_eq!(grid_dimensions(3), (6, 11));
        assert_eq!(grid_dimensions(4), (6, 12));
        assert_eq!(grid_dimensions(5), (6, 12));
        // Caps
        assert_eq!(grid_dimensions(6), (7, 12));
        assert_eq!(grid_dimensions(30), (7, 12));
    }

    #[test]
    fn test_shield_health_curve() {
        assert_eq!(shield_health_for_wave(1), 100);
        assert_eq!(shield_health_for_wave(2), 80);
        assert_eq!(shield_health_for_wave(3), 60);
        assert_eq!(shield_health_for_wave(4), 40);
        assert_eq!(shield_health_for_wave(5), 20);
        assert_eq!(shield_health_for_wave(9), 20);
    }

    #[test]
    fn test_waves_one_through_five() {
        let mut state = GameState::new();
        for wave in 1..=5 {
            generate_wave(&mut state, wave);
            let (rows, columns) = grid_dimensions(wave);
            assert_eq!(state.aliens.len(), (rows * columns) as usize);
            assert!(state.aliens.iter().all(|a| a.alive));

            for (i, alien) in state.aliens.iter().enumerate() {
                let row = i as u32 / columns;
                let col = i as u32 % columns;
                assert_eq!(alien.id, i as u32);
                assert_eq!(alien.tier, alien_tier_for_row(row));
                assert_eq!(alien.points, alien.tier.base_points() * wave as u64);
                assert_eq!(alien.pos.x, 100.0 + col as f32 * 60.0);
                assert_eq!(alien.pos.y, 50.0 + row as f32 * 50.0);
            }

            assert_eq!(state.shields.len(), 4);
            let expected = (100i32 - (wave as i32 - 1) * 20).max(20) as u32;
            assert!(state.shields.iter().all(|s| s.health == expected));
            assert!((state.alien_speed - (1.0 + (wave - 1) as f32 * 0.2)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tiers_by_row() {
        let mut state = GameState::new();
        generate_wave(&mut state, 1);
        assert_eq!(state.aliens[0].tier, AlienTier::Top);
        assert_eq!(state.aliens[0].points, 30);
        assert_eq!(state.aliens[10].tier, AlienTier::Middle);
        assert_eq!(state.aliens[29].tier, AlienTier::Middle);
        assert_eq!(state.aliens[30].tier, AlienTier::Bottom);
        assert_eq!(state.aliens[49].points, 10);
    }

    #[test]
    fn test_shield_layout() {
        let state = GameState::new();
        let xs: Vec<f32> = state.shields.iter().map(|s| s.pos.x).collect();
        assert_eq!(xs, vec![110.0, 270.0, 430.0, 590.0]);
        assert!(state.shields.iter().all(|s| s.pos.y == 460.0));
        let ids: Vec<u32> = state.shields.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_regeneration_replaces_previous_wave() {
        let mut state = GameState::new();
        state.aliens[0].alive = false;
        state.shields[0].health = 0;
        generate_wave(&mut state, 2);
        assert_eq!(state.wave, 2);
        assert_eq!(state.aliens.len(), 55);
        assert_eq!(state.aliens[0].id, 0);
        assert!(state.aliens[0].alive);
        assert_eq!(state.shields[0].health, 80);
    }
}
