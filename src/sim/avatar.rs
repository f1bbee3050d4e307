//! The player's avatar: movement, facing and the sword-swing hit arc
//!
//! The avatar faces the direction of its last move. Everything within
//! ±90° of that facing is the *front* sector (deflectable); everything else is
//! *behind* (lethal while moving). The two sectors partition the full circle:
//! the exact ±90° boundary belongs to the front.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::consts::*;
use crate::{Rect, angle_between, bearing, clamp_distance};

/// Which half of the facing circle a point falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Front,
    Behind,
}

/// The player-controlled avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    /// Current movement destination
    pub target: Vec2,
    /// Where the current move began (drives swing progress)
    pub move_start: Vec2,
    /// Facing angle (radians)
    pub angle: f32,
    pub moving: bool,
    /// Combo-ready highlight
    pub glowing: bool,
    /// Phase of the glow pulse (cosmetic)
    pub glow_timer: f32,
    /// 0..=1 during a normal swing, 0..=2 during combo execution
    pub swing_progress: f32,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            target: pos,
            move_start: pos,
            angle: 0.0,
            moving: false,
            glowing: false,
            glow_timer: 0.0,
            swing_progress: 0.0,
        }
    }

    /// Region the avatar center may occupy
    pub fn bounds() -> Rect {
        Rect::dojo().inset(AVATAR_RADIUS)
    }

    /// Start a move toward `point`.
    ///
    /// Unless `unrestricted`, the destination is first pulled in to at most
    /// `MOVE_RANGE` from the current position. It is always clamped to the
    /// dojo inset by the avatar radius.
    pub fn set_target(&mut self, point: Vec2, unrestricted: bool) {
        let dest = if unrestricted {
            point
        } else {
            clamp_distance(self.pos, point, MOVE_RANGE)
        };
        let dest = Self::bounds().clamp(dest);

        self.move_start = self.pos;
        self.target = dest;
        self.angle = bearing(self.pos, dest);
        self.moving = true;
        self.swing_progress = 0.0;
    }

    /// Advance movement by `dt` (already time-scaled)
    pub fn update(&mut self, dt: f32, combo_executing: bool) {
        if self.glowing {
            self.glow_timer += dt * GLOW_PULSE_RATE;
        }

        if !self.moving {
            return;
        }

        let to_target = self.target - self.pos;
        let dist = to_target.length();

        if dist < ARRIVAL_EPSILON {
            self.pos = self.target;
            self.moving = false;
            self.swing_progress = 0.0;
            return;
        }

        let speed = if combo_executing {
            AVATAR_COMBO_SPEED
        } else {
            AVATAR_SPEED
        };
        // Land exactly on the target rather than stepping past it; it may sit
        // on the bounds edge
        let step = speed * dt;
        if step >= dist {
            self.pos = self.target;
        } else {
            self.pos += to_target / dist * step;
        }

        let total = (self.target - self.move_start).length();
        let traveled = (self.pos - self.move_start).length();
        let fraction = if total > 0.0 { traveled / total } else { 0.0 };
        // Two full rotations over a combo leg; a single fast swing otherwise
        self.swing_progress = if combo_executing {
            fraction * 2.0
        } else {
            (fraction * 2.0).min(1.0)
        };
    }

    /// Sector of `point` relative to the facing angle. A point at the avatar
    /// center counts as front.
    pub fn sector_of(&self, point: Vec2) -> Sector {
        if point == self.pos {
            return Sector::Front;
        }
        if angle_between(bearing(self.pos, point), self.angle) <= FRAC_PI_2 {
            Sector::Front
        } else {
            Sector::Behind
        }
    }

    /// True if a body of `radius` at `point` is within the sword's reach and
    /// in the front sector.
    pub fn is_in_front_arc(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) <= SWING_RADIUS + radius && self.sector_of(point) == Sector::Front
    }

    /// True if `point` lies more than 90° off the facing angle
    pub fn is_behind(&self, point: Vec2) -> bool {
        self.sector_of(point) == Sector::Behind
    }
}
