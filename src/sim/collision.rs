//! Collision checks
//!
//! Everything is a point with a contact radius; no shapes, no response.

use glam::Vec2;

use super::state::{Enemy, Projectile};
use crate::consts::{CATCH_RADIUS, HIT_RADIUS};
use crate::distance;

/// True when the enemy is close enough to the player to end the round
#[inline]
pub fn enemy_catches_player(enemy_pos: Vec2, player_pos: Vec2) -> bool {
    distance(enemy_pos, player_pos) < CATCH_RADIUS
}

/// True when a live enemy is within hit range of the arrow
#[inline]
pub fn projectile_hits_enemy(projectile: &Projectile, enemy: &Enemy) -> bool {
    enemy.alive && distance(projectile.pos, enemy.pos) < HIT_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            id: 1,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            alive: true,
        }
    }

    fn arrow_at(x: f32, y: f32) -> Projectile {
        Projectile {
            id: 2,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_catch_radius_is_strict() {
        assert!(enemy_catches_player(Vec2::new(29.9, 0.0), Vec2::ZERO));
        assert!(!enemy_catches_player(Vec2::new(30.0, 0.0), Vec2::ZERO));
    }

    #[test]
    fn test_hit_radius_is_strict() {
        let enemy = enemy_at(100.0, 100.0);
        assert!(projectile_hits_enemy(&arrow_at(112.0, 115.0), &enemy));
        assert!(!projectile_hits_enemy(&arrow_at(112.0, 116.0), &enemy));
    }

    #[test]
    fn test_dead_enemy_is_not_hit() {
        let mut enemy = enemy_at(0.0, 0.0);
        enemy.alive = false;
        assert!(!projectile_hits_enemy(&arrow_at(0.0, 0.0), &enemy));
    }
}
