//! Game state and core simulation types
//!
//! One round's worth of entities. Owned by the session and handed to the
//! tick and render steps by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Platform dropped below the win line
    Won,
    /// An enemy reached the player
    Lost,
}

impl RoundOutcome {
    /// Message shown on the end-of-round panel
    pub fn message(&self) -> &'static str {
        match self {
            RoundOutcome::Won => "You Win! 🏆",
            RoundOutcome::Lost => "You Lose! 💀",
        }
    }
}

/// Events emitted by a tick for the session to act on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { id: u32, pos: Vec2 },
    PlayerCaught { enemy_id: u32 },
    PlatformCleared,
}

/// The archer standing on the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Set from the last click: true when it landed at or right of the player
    pub facing_right: bool,
}

/// An arrow in flight. Never removed once fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// A bug flying in a straight line toward where the player was at spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Enemy {
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Render surface size in pixels
    pub viewport: Vec2,
    pub player: Player,
    /// Vertical center of the platform; only ever decreases during a round
    pub platform_y: f32,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks do nothing while false
    pub running: bool,
    pub outcome: Option<RoundOutcome>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh round: player centered above the platform, nothing in flight.
    ///
    /// Not running until the session starts the round.
    pub fn new(viewport: Vec2) -> Self {
        let platform_y = viewport.y * PLATFORM_START_FRACTION;
        Self {
            viewport,
            player: Player {
                pos: Vec2::new(viewport.x / 2.0, platform_y - PLAYER_LIFT),
                facing_right: false,
            },
            platform_y,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            kills: 0,
            time_ticks: 0,
            running: false,
            outcome: None,
            next_id: 1,
        }
    }

    /// Return to the fresh-round state, keeping the viewport
    pub fn reset(&mut self) {
        *self = Self::new(self.viewport);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire an arrow from the player toward `target`
    pub fn fire_at(&mut self, target: Vec2) -> u32 {
        let id = self.next_entity_id();
        let from = self.player.pos;
        self.player.facing_right = target.x >= from.x;
        self.projectiles.push(Projectile {
            id,
            pos: from,
            vel: (target - from) / PROJECTILE_DIVISOR,
        });
        id
    }

    /// Add a live enemy at `pos` moving with `vel`
    pub fn push_enemy(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            vel,
            alive: true,
        });
        id
    }

    /// Record the end of the round; the first outcome wins
    pub fn finish(&mut self, outcome: RoundOutcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        self.running = false;
        true
    }
}
