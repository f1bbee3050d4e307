//! Shape and pose helpers for the draw service
//!
//! Pure functions of simulation state; nothing here feeds back into the sim.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::consts::*;
use crate::sim::{AreaHazard, Avatar, Collectible, ProjectileKind};

/// Soft edge width of the fog vignette
pub const FOG_EDGE: f32 = 40.0;

/// RGBA color per projectile kind
pub fn kind_color(kind: ProjectileKind) -> [f32; 4] {
    match kind {
        ProjectileKind::Common => [0.94, 0.94, 0.94, 1.0],
        ProjectileKind::Homing => [0.27, 1.0, 0.27, 1.0],
        ProjectileKind::Explosive => [1.0, 0.27, 0.27, 1.0],
        ProjectileKind::VisionReducing => [0.13, 0.13, 0.13, 1.0],
    }
}

/// Four-pointed star outline, alternating tip and notch points
pub fn star_outline(center: Vec2, rotation: f32, radius: f32) -> [Vec2; 8] {
    let mut points = [Vec2::ZERO; 8];
    for i in 0..4 {
        let tip = rotation + i as f32 * FRAC_PI_2;
        let notch = tip + FRAC_PI_4;
        points[i * 2] = center + Vec2::from_angle(tip) * radius;
        points[i * 2 + 1] = center + Vec2::from_angle(notch) * radius * 0.4;
    }
    points
}

/// Sword orientation for the current swing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwordPose {
    /// Absolute blade angle (radians)
    pub angle: f32,
    /// Blade length as a fraction of full length
    pub extension: f32,
}

impl SwordPose {
    /// Pose while the sword is out (moving or running a combo), else None.
    ///
    /// A normal swing sweeps from -135° to +135° around the facing with the
    /// blade extending mid-swing; a combo leg spins the blade fully.
    pub fn of(avatar: &Avatar, combo_executing: bool) -> Option<Self> {
        if combo_executing {
            return Some(Self {
                angle: avatar.angle + avatar.swing_progress * TAU,
                extension: 1.0,
            });
        }
        if !avatar.moving {
            return None;
        }
        let progress = avatar.swing_progress.clamp(0.0, 1.0);
        let start = -PI * 0.75;
        let end = PI * 0.75;
        Some(Self {
            angle: avatar.angle + start + progress * (end - start),
            extension: 0.6 + (progress * PI).sin() * 0.4,
        })
    }
}

/// Fog vignette radii around the avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vignette {
    pub inner: f32,
    pub outer: f32,
}

impl Vignette {
    /// None at full visibility (nothing to darken)
    pub fn from_diameter(diameter: f32) -> Option<Self> {
        if diameter >= FULL_VISIBILITY {
            return None;
        }
        let radius = diameter / 2.0;
        Some(Self {
            inner: (radius - FOG_EDGE).max(0.0),
            outer: radius + FOG_EDGE,
        })
    }
}

/// Glow pulse of a combo-ready avatar, 0..=1
pub fn glow_pulse(avatar: &Avatar) -> f32 {
    if avatar.glowing {
        (avatar.glow_timer.sin() + 1.0) / 2.0
    } else {
        0.0
    }
}

/// Collectible drawn position including its bob
pub fn bob_position(collectible: &Collectible) -> Vec2 {
    collectible.pos + Vec2::new(0.0, collectible.bob_phase.sin() * 2.0)
}

/// Warning pulse radius of an armed hazard
pub fn hazard_pulse_radius(hazard: &AreaHazard) -> f32 {
    let pulse = 0.5 + (hazard.fuse * 10.0).sin() * 0.5;
    15.0 + pulse * 10.0
}

/// Whole seconds shown on an armed hazard
pub fn hazard_countdown_label(hazard: &AreaHazard) -> u32 {
    hazard.fuse.max(0.0).ceil() as u32
}

/// Pulse and countdown drawn over an armed hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardWarning {
    pub pulse_radius: f32,
    pub label: u32,
}

impl HazardWarning {
    /// None once the hazard has detonated
    pub fn of(hazard: &AreaHazard) -> Option<Self> {
        (!hazard.exploded).then(|| Self {
            pulse_radius: hazard_pulse_radius(hazard),
            label: hazard_countdown_label(hazard),
        })
    }
}

/// Movement range ring radius, shown while idle outside a combo
pub fn range_ring(avatar: &Avatar, combo_executing: bool) -> Option<f32> {
    (!avatar.moving && !combo_executing).then_some(MOVE_RANGE)
}
