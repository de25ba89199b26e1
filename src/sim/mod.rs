//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{enemy_catches_player, projectile_hits_enemy};
pub use spawn::{Edge, SpawnTimer, spawn_enemy, spawn_point};
pub use state::{Enemy, GameEvent, GameState, Player, Projectile, RoundOutcome};
pub use tick::tick;
