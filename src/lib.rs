//! Archant - shoot the bugs off a shrinking cloud
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, tick)
//! - `renderer`: Draw-command composition and the 2D canvas backend
//! - `session`: Menu / cutscene / playing / win / game-over state machine
//! - `assets`, `audio`: Image and sound gateways consumed by the core
//! - `settings`: Player preferences

pub mod assets;
pub mod audio;
pub mod error;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use session::{GamePhase, Overlay, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// One simulation tick per rendered frame; velocities are in units per tick
    pub const TICK_DT: f32 = 1.0;

    /// Platform starts at this fraction of the viewport height
    pub const PLATFORM_START_FRACTION: f32 = 0.7;
    /// Platform drop per kill (player rides it up by the same amount)
    pub const PLATFORM_STEP: f32 = 10.0;
    /// Round is won once the platform goes below this
    pub const PLATFORM_WIN_Y: f32 = 80.0;
    pub const PLATFORM_WIDTH: f32 = 130.0;
    pub const PLATFORM_HEIGHT: f32 = 90.0;
    /// Platform sprite sits slightly right of the player
    pub const PLATFORM_X_OFFSET: f32 = 15.0;

    /// Player stands this far above the platform center
    pub const PLAYER_LIFT: f32 = 30.0;
    pub const PLAYER_SIZE: f32 = 64.0;

    /// Click offset is divided by this to get projectile velocity
    pub const PROJECTILE_DIVISOR: f32 = 20.0;
    pub const PROJECTILE_WIDTH: f32 = 32.0;
    pub const PROJECTILE_HEIGHT: f32 = 8.0;

    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_SIZE: f32 = 60.0;
    /// Enemies appear this far outside the visible edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    pub const SPAWN_INTERVAL_MS: f64 = 1200.0;

    /// Enemy closer than this to the player ends the round
    pub const CATCH_RADIUS: f32 = 30.0;
    /// Projectile closer than this to an enemy kills it
    pub const HIT_RADIUS: f32 = 20.0;

    /// Number of cutscene panels before play starts
    pub const SCENE_COUNT: usize = 4;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Angle of a vector, atan2(y, x)
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Velocity of length `speed` pointing from `from` toward `to`.
///
/// Goes through the angle rather than `normalize`, so coincident points aim
/// along +x instead of producing NaN.
#[inline]
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    Vec2::from_angle(heading(to - from)) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading() {
        assert!(heading(Vec2::new(1.0, 0.0)).abs() < 1e-6);
        assert!((heading(Vec2::new(0.0, 2.0)) - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_aim_has_requested_speed() {
        let v = aim(Vec2::new(10.0, 10.0), Vec2::new(-50.0, 90.0), 2.0);
        assert!((v.length() - 2.0).abs() < 1e-5);
        assert!(v.x < 0.0 && v.y > 0.0);
    }

    #[test]
    fn test_aim_coincident_points() {
        let v = aim(Vec2::ONE, Vec2::ONE, 2.0);
        assert!((v - Vec2::new(2.0, 0.0)).length() < 1e-6);
    }
}
