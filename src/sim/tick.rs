//! Per-frame simulation tick
//!
//! Advances everything one step, resolves contacts and decides whether the
//! round is over. Pure: side effects leave as `GameEvent`s.

use super::collision::{enemy_catches_player, projectile_hits_enemy};
use super::state::{GameEvent, GameState, RoundOutcome};
use crate::consts::*;

/// Advance the round by one tick
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.running {
        return events;
    }

    state.time_ticks += 1;

    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }

    // Velocity stays what it was at spawn; enemies do not home in
    for enemy in &mut state.enemies {
        enemy.advance(dt);
    }

    let player_pos = state.player.pos;
    if let Some(enemy) = state
        .enemies
        .iter()
        .find(|e| enemy_catches_player(e.pos, player_pos))
    {
        let enemy_id = enemy.id;
        state.finish(RoundOutcome::Lost);
        events.push(GameEvent::PlayerCaught { enemy_id });
        return events;
    }

    // Arrows pass through; only the enemy dies
    for projectile in &state.projectiles {
        for enemy in &mut state.enemies {
            if !projectile_hits_enemy(projectile, enemy) {
                continue;
            }
            enemy.alive = false;
            state.kills += 1;
            state.platform_y -= PLATFORM_STEP;
            state.player.pos.y -= PLATFORM_STEP;
            events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                pos: enemy.pos,
            });

            if state.platform_y < PLATFORM_WIN_Y && state.outcome.is_none() {
                state.outcome = Some(RoundOutcome::Won);
                state.running = false;
                events.push(GameEvent::PlatformCleared);
            }
        }
    }

    state.enemies.retain(|e| e.alive);

    events
}
