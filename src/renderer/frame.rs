//! Frame composition
//!
//! Turns the current round into an ordered list of draw commands. Reads the
//! state only; a sprite whose image is not decoded yet is left out.

use glam::Vec2;

use crate::assets::{ImageGateway, Sprite};
use crate::consts::*;
use crate::heading;
use crate::sim::GameState;

/// One sprite placement: translate to `anchor`, rotate, mirror, then draw
/// the image into the rectangle at `offset` with `size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub sprite: Sprite,
    pub anchor: Vec2,
    /// Radians, applied before mirroring
    pub rotation: f32,
    /// Flip horizontally around the anchor
    pub mirror: bool,
    /// Top-left of the image relative to the anchor
    pub offset: Vec2,
    pub size: Vec2,
}

impl SpriteDraw {
    /// Upright sprite centered on `anchor`
    fn centered(sprite: Sprite, anchor: Vec2, size: Vec2) -> Self {
        Self {
            sprite,
            anchor,
            rotation: 0.0,
            mirror: false,
            offset: -size / 2.0,
            size,
        }
    }

    fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    fn rotated(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Sprite(SpriteDraw),
}

/// Build this frame's draw list.
///
/// Empty when the round is not running, which leaves the last picture on the
/// surface.
pub fn compose(state: &GameState, images: &impl ImageGateway) -> Vec<DrawCommand> {
    if !state.running {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(3 + state.projectiles.len() + state.enemies.len());
    commands.push(DrawCommand::Clear {
        width: state.viewport.x,
        height: state.viewport.y,
    });

    let mut push = |draw: SpriteDraw| {
        if images.ready(draw.sprite) {
            commands.push(DrawCommand::Sprite(draw));
        }
    };

    push(SpriteDraw::centered(
        Sprite::Platform,
        Vec2::new(state.player.pos.x + PLATFORM_X_OFFSET, state.platform_y),
        Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
    ));

    // Sprite art faces left
    push(
        SpriteDraw::centered(Sprite::Player, state.player.pos, Vec2::splat(PLAYER_SIZE))
            .mirrored(!state.player.facing_right),
    );

    for projectile in &state.projectiles {
        push(
            SpriteDraw::centered(
                Sprite::Projectile,
                projectile.pos,
                Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            )
            .rotated(heading(projectile.vel)),
        );
    }

    for enemy in &state.enemies {
        push(
            SpriteDraw::centered(Sprite::Enemy, enemy.pos, Vec2::splat(ENEMY_SIZE))
                .mirrored(enemy.vel.x < 0.0),
        );
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn all_ready(_: Sprite) -> bool {
        true
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(Vec2::new(800.0, 600.0));
        state.running = true;
        state
    }

    fn sprites(commands: &[DrawCommand]) -> Vec<SpriteDraw> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Sprite(s) => Some(*s),
                DrawCommand::Clear { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_not_running_draws_nothing() {
        let state = GameState::new(Vec2::new(800.0, 600.0));
        assert!(compose(&state, &all_ready).is_empty());
    }

    #[test]
    fn test_draw_order_and_clear() {
        let mut state = running_state();
        state.fire_at(Vec2::new(0.0, 0.0));
        state.push_enemy(Vec2::new(-50.0, 10.0), Vec2::new(2.0, 0.0));
        let commands = compose(&state, &all_ready);
        assert_eq!(
            commands[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }
        );
        let order: Vec<Sprite> = sprites(&commands).iter().map(|s| s.sprite).collect();
        assert_eq!(
            order,
            vec![Sprite::Platform, Sprite::Player, Sprite::Projectile, Sprite::Enemy]
        );
    }

    #[test]
    fn test_platform_placement() {
        let state = running_state();
        let platform = sprites(&compose(&state, &all_ready))[0];
        // Top-left is (player.x - 65 + 15, platform_y - 45)
        let top_left = platform.anchor + platform.offset;
        assert_eq!(top_left, Vec2::new(400.0 - 65.0 + 15.0, 420.0 - 45.0));
        assert_eq!(platform.size, Vec2::new(130.0, 90.0));
    }

    #[test]
    fn test_player_mirrors_by_facing() {
        let mut state = running_state();
        let player = sprites(&compose(&state, &all_ready))[1];
        assert!(player.mirror);

        state.player.facing_right = true;
        let player = sprites(&compose(&state, &all_ready))[1];
        assert!(!player.mirror);
        assert_eq!(player.offset, Vec2::new(-32.0, -32.0));
    }

    #[test]
    fn test_projectile_follows_velocity() {
        let mut state = running_state();
        let p = state.player.pos;
        state.fire_at(p + Vec2::new(0.0, 100.0));
        let arrow = sprites(&compose(&state, &all_ready))[2];
        assert!((arrow.rotation - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(arrow.offset, Vec2::new(-16.0, -4.0));
    }

    #[test]
    fn test_enemy_mirrors_when_moving_left() {
        let mut state = running_state();
        state.push_enemy(Vec2::new(900.0, 0.0), Vec2::new(-1.0, 1.0));
        state.push_enemy(Vec2::new(-50.0, 0.0), Vec2::new(1.0, 1.0));
        let drawn = sprites(&compose(&state, &all_ready));
        assert!(drawn[2].mirror);
        assert!(!drawn[3].mirror);
    }

    #[test]
    fn test_unready_images_are_skipped() {
        let mut state = running_state();
        state.push_enemy(Vec2::ZERO, Vec2::ONE);
        let no_enemies = |s: Sprite| s != Sprite::Enemy;
        let drawn = sprites(&compose(&state, &no_enemies));
        assert!(drawn.iter().all(|s| s.sprite != Sprite::Enemy));
        assert_eq!(drawn.len(), 2);

        let nothing_ready = |_: Sprite| false;
        assert_eq!(compose(&state, &nothing_ready).len(), 1);
    }
}
