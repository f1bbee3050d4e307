//! ElimiNinja - A dodge-and-deflect dojo arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (avatar, projectiles, hazards, combo path)
//! - `renderer`: Presentation pass feeding an external draw service
//! - `ui`: HUD reporting (score, clock, power slots, game over)
//! - `settings`: Driver settings loaded from JSON
//! - `autopilot`: Scripted pointer input for headless runs
//! - `snapshot`: Serializable frame view

pub mod autopilot;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod ui;

pub use settings::{Settings, SettingsError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Dojo (arena) dimensions
    pub const DOJO_WIDTH: f32 = 560.0;
    pub const DOJO_HEIGHT: f32 = 375.0;
    /// Visible band outside the dojo where projectiles spawn
    pub const DOJO_MARGIN: f32 = 60.0;

    /// Full play surface including the spawn margin
    pub const CANVAS_WIDTH: f32 = DOJO_WIDTH + DOJO_MARGIN * 2.0;
    pub const CANVAS_HEIGHT: f32 = DOJO_HEIGHT + DOJO_MARGIN * 2.0;

    /// Longest frame delta the session accepts (tab stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Avatar defaults
    pub const AVATAR_RADIUS: f32 = 15.0;
    pub const AVATAR_SPEED: f32 = 375.0; // pixels per second
    pub const AVATAR_COMBO_SPEED: f32 = 280.0; // ~75% of regular speed
    pub const MOVE_RANGE: f32 = 120.0;
    pub const SWING_RADIUS: f32 = 50.0;
    pub const ARRIVAL_EPSILON: f32 = 5.0;
    /// Extra tap slack around the avatar body when arming the combo
    pub const COMBO_TAP_SLACK: f32 = 20.0;
    pub const GLOW_PULSE_RATE: f32 = 5.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 14.0;
    pub const PROJECTILE_SPEED: f32 = 120.0;
    pub const PROJECTILE_SPIN: f32 = 10.0; // radians per second
    pub const HOMING_PULL: f32 = 100.0; // pixels/s²
    /// Max deviation from the dojo-center heading at spawn (radians, full width)
    pub const SPAWN_SPREAD: f32 = std::f32::consts::PI * 0.33;
    /// Inset of spawn points from the canvas edge (beyond the projectile radius)
    pub const SPAWN_EDGE_INSET: f32 = 5.0;

    /// Projectile type unlock times (seconds of play)
    pub const HOMING_UNLOCK_TIME: f32 = 0.0;
    pub const EXPLOSIVE_UNLOCK_TIME: f32 = 20.0;
    pub const VISION_UNLOCK_TIME: f32 = 45.0;

    /// Spawn interval curve: starts at 1.5s, loses 1/30s per second, floors at 0.2s
    pub const SPAWN_INTERVAL_START: f32 = 1.5;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.2;
    pub const SPAWN_INTERVAL_DECAY: f32 = 1.0 / 30.0;
    pub const FIRST_PROJECTILE_DELAY: f32 = 1.0;

    /// Collectible defaults
    pub const COLLECTIBLE_RADIUS: f32 = 7.0;
    pub const COLLECTIBLE_PADDING: f32 = 30.0;
    pub const COLLECTIBLE_BOB_RATE: f32 = 3.0;
    pub const MAX_COLLECTIBLES: usize = 3;
    pub const FIRST_COLLECTIBLE_DELAY: f32 = 3.0;
    pub const COLLECTIBLE_DELAY_MIN: f32 = 5.0;
    pub const COLLECTIBLE_DELAY_SPREAD: f32 = 10.0;

    /// Power slots needed before the combo can be armed
    pub const POWER_SLOTS: u8 = 3;

    /// Fading remnant lifetime (seconds)
    pub const REMNANT_LIFETIME: f32 = 2.0;

    /// Area hazard (explosive) defaults
    pub const HAZARD_FUSE: f32 = 2.0;
    pub const BLAST_RADIUS: f32 = 50.0;
    pub const BLAST_GROWTH: f32 = 300.0;
    pub const BLAST_FADE: f32 = 2.0;

    /// Visibility (fog) diameters
    pub const FULL_VISIBILITY: f32 = CANVAS_WIDTH * 1.5;
    pub const FOG_START: f32 = CANVAS_WIDTH * 1.2;
    pub const FOG_FLOOR: f32 = 80.0;
    pub const FOG_SHRINK_PER_SEC: f32 = 40.0;
    pub const FOG_TRANSITION: f32 = 200.0;
    pub const FOG_RECOVERY: f32 = FOG_TRANSITION * 3.0;

    /// Combo path
    pub const COMBO_MAX_POINTS: usize = 3;
    pub const COMBO_SELECT_TIME: f32 = 4.0;
    pub const COMBO_TIME_SCALE: f32 = 0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Bearing from `from` toward `to` (radians). Zero offset yields 0.
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d == Vec2::ZERO { 0.0 } else { d.y.atan2(d.x) }
}

/// Unsigned angular distance between two headings, in [0, π]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Axis-aligned rectangle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The dojo floor (where bounds checks and rebounds apply)
    pub const fn dojo() -> Self {
        use consts::*;
        Self::new(
            Vec2::new(DOJO_MARGIN, DOJO_MARGIN),
            Vec2::new(DOJO_MARGIN + DOJO_WIDTH, DOJO_MARGIN + DOJO_HEIGHT),
        )
    }

    /// Shrink by `amount` on every side. Never inverts: an over-inset collapses to the center.
    pub fn inset(&self, amount: f32) -> Self {
        let center = self.center();
        let min = (self.min + Vec2::splat(amount)).min(center);
        let max = (self.max - Vec2::splat(amount)).max(center);
        Self::new(min, max)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Clamp `target` to at most `max_dist` away from `origin`
#[inline]
pub fn clamp_distance(origin: Vec2, target: Vec2, max_dist: f32) -> Vec2 {
    let offset = target - origin;
    let dist = offset.length();
    if dist > max_dist && dist > 0.0 {
        origin + offset / dist * max_dist
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(2.5 * PI) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_bearing_zero_offset() {
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(bearing(p, p), 0.0);
        assert!((bearing(p, p + Vec2::Y) - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_inset_and_clamp() {
        let dojo = Rect::dojo();
        let inner = dojo.inset(consts::AVATAR_RADIUS);
        assert_eq!(inner.min, Vec2::new(75.0, 75.0));
        assert_eq!(inner.max, Vec2::new(605.0, 420.0));
        assert_eq!(inner.clamp(Vec2::new(0.0, 1000.0)), Vec2::new(75.0, 420.0));
    }

    #[test]
    fn test_rect_over_inset_collapses() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0)).inset(20.0);
        assert_eq!(r.min, Vec2::new(5.0, 5.0));
        assert_eq!(r.max, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_clamp_distance() {
        let o = Vec2::new(100.0, 100.0);
        let t = clamp_distance(o, Vec2::new(400.0, 100.0), 120.0);
        assert!((t - Vec2::new(220.0, 100.0)).length() < 1e-4);
        let near = Vec2::new(110.0, 100.0);
        assert_eq!(clamp_distance(o, near, 120.0), near);
        assert_eq!(clamp_distance(o, o, 120.0), o);
    }
}
