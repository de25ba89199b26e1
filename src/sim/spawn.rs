//! Enemy spawning
//!
//! Enemies enter from a random screen edge, just outside the visible area,
//! and fly in a straight line at where the player stood when they appeared.
//! The cadence is a single cancellable deadline owned by the session.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::aim;
use crate::consts::{ENEMY_SPEED, SPAWN_INTERVAL_MS, SPAWN_MARGIN};

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }
}

/// Spawn position on `edge`, `t` in [0, 1) along it
pub fn spawn_point(edge: Edge, t: f32, viewport: Vec2) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(t * viewport.x, -SPAWN_MARGIN),
        Edge::Bottom => Vec2::new(t * viewport.x, viewport.y + SPAWN_MARGIN),
        Edge::Left => Vec2::new(-SPAWN_MARGIN, t * viewport.y),
        Edge::Right => Vec2::new(viewport.x + SPAWN_MARGIN, t * viewport.y),
    }
}

/// Spawn one enemy on a random edge, aimed at the player's current position
pub fn spawn_enemy<R: Rng>(state: &mut GameState, rng: &mut R) -> u32 {
    let edge = Edge::from_index(rng.random_range(0..4));
    let t: f32 = rng.random();
    let pos = spawn_point(edge, t, state.viewport);
    let vel = aim(pos, state.player.pos, ENEMY_SPEED);
    let id = state.push_enemy(pos, vel);
    log::debug!("Enemy {} spawned on {:?} at ({:.0}, {:.0})", id, edge, pos.x, pos.y);
    id
}

/// Re-arming spawn deadline.
///
/// Holds at most one pending deadline, so starting twice never doubles the
/// spawn rate and cancelling is idempotent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnTimer {
    next_at_ms: Option<f64>,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the next deadline one interval after `now_ms`.
    ///
    /// The caller spawns the round's first enemy itself.
    pub fn start(&mut self, now_ms: f64) {
        self.next_at_ms = Some(now_ms + SPAWN_INTERVAL_MS);
    }

    /// Drop any pending deadline
    pub fn cancel(&mut self) {
        self.next_at_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_at_ms.is_some()
    }

    /// Returns true when a spawn is due, re-arming relative to `now_ms`.
    ///
    /// Fires at most once per call. A due deadline found while `running` is
    /// false is dropped instead of fired.
    pub fn poll(&mut self, now_ms: f64, running: bool) -> bool {
        let Some(due) = self.next_at_ms else {
            return false;
        };
        if !running {
            self.next_at_ms = None;
            return false;
        }
        if now_ms < due {
            return false;
        }
        self.next_at_ms = Some(now_ms + SPAWN_INTERVAL_MS);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: Vec2 = Vec2::new(1024.0, 768.0);

    #[test]
    fn test_top_edge_spawn() {
        let pos = spawn_point(Edge::from_index(0), 0.25, VIEWPORT);
        assert_eq!(pos, Vec2::new(256.0, -50.0));
    }

    #[test]
    fn test_other_edges() {
        assert_eq!(spawn_point(Edge::Bottom, 0.5, VIEWPORT), Vec2::new(512.0, 818.0));
        assert_eq!(spawn_point(Edge::Left, 0.5, VIEWPORT), Vec2::new(-50.0, 384.0));
        assert_eq!(spawn_point(Edge::Right, 0.0, VIEWPORT), Vec2::new(1074.0, 0.0));
    }

    #[test]
    fn test_spawned_enemy_aims_at_player() {
        let mut state = GameState::new(VIEWPORT);
        let mut rng = Pcg32::seed_from_u64(7);
        spawn_enemy(&mut state, &mut rng);

        let enemy = &state.enemies[0];
        assert!(enemy.alive);
        assert!((enemy.vel.length() - ENEMY_SPEED).abs() < 1e-4);
        let to_player = (state.player.pos - enemy.pos).normalize();
        assert!(enemy.vel.normalize().dot(to_player) > 0.9999);
    }

    #[test]
    fn test_timer_fires_once_per_interval() {
        let mut timer = SpawnTimer::new();
        timer.start(1000.0);
        assert!(!timer.poll(1500.0, true));
        assert!(timer.poll(2200.0, true));
        assert!(!timer.poll(2300.0, true));
        assert!(timer.poll(3400.0, true));
    }

    #[test]
    fn test_timer_late_poll_fires_once() {
        let mut timer = SpawnTimer::new();
        timer.start(0.0);
        assert!(timer.poll(10_000.0, true));
        assert!(!timer.poll(10_000.0, true));
    }

    #[test]
    fn test_timer_cancel_is_idempotent() {
        let mut timer = SpawnTimer::new();
        timer.start(0.0);
        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.poll(5000.0, true));
    }

    #[test]
    fn test_timer_restart_does_not_double() {
        let mut timer = SpawnTimer::new();
        timer.start(0.0);
        timer.cancel();
        timer.start(100.0);
        timer.start(100.0);
        let fired = (0..10)
            .filter(|i| timer.poll(1300.0 + *i as f64, true))
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_timer_stopped_session_never_fires() {
        let mut timer = SpawnTimer::new();
        timer.start(0.0);
        assert!(!timer.poll(2000.0, false));
        assert!(!timer.is_armed());
        assert!(!timer.poll(4000.0, true));
    }

    proptest! {
        #[test]
        fn prop_spawn_is_outside_viewport(seed in any::<u64>()) {
            let mut state = GameState::new(VIEWPORT);
            let mut rng = Pcg32::seed_from_u64(seed);
            spawn_enemy(&mut state, &mut rng);
            let pos = state.enemies[0].pos;
            let on_horizontal = (pos.y == -SPAWN_MARGIN || pos.y == VIEWPORT.y + SPAWN_MARGIN)
                && pos.x >= 0.0 && pos.x < VIEWPORT.x;
            let on_vertical = (pos.x == -SPAWN_MARGIN || pos.x == VIEWPORT.x + SPAWN_MARGIN)
                && pos.y >= 0.0 && pos.y < VIEWPORT.y;
            prop_assert!(on_horizontal || on_vertical);
        }

        #[test]
        fn prop_top_edge_x_in_range(t in 0.0f32..1.0) {
            let pos = spawn_point(Edge::Top, t, VIEWPORT);
            prop_assert_eq!(pos.y, -50.0);
            prop_assert!(pos.x >= 0.0 && pos.x < VIEWPORT.x);
        }
    }
}
