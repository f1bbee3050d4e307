//! Autopilot - scripted pointer input for demo and headless runs
//!
//! Plays like a cautious human: swing at the closest incoming threat, grab
//! power items when the coast is clear, and spend a full power bar on a path
//! through the densest threats.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Avatar, GamePhase, GameState, Projectile};

/// Threats closer than this get swung at
const THREAT_RANGE: f32 = 110.0;
/// Minimum real seconds between taps
const TAP_COOLDOWN: f32 = 0.15;

#[derive(Debug, Default)]
pub struct Autopilot {
    cooldown: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's tap, if any
    pub fn next_tap(&mut self, state: &GameState, dt: f32) -> Option<Vec2> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.cooldown > 0.0 {
            return None;
        }

        let tap = match state.phase {
            GamePhase::Selecting => self.pick_combo_point(state),
            GamePhase::Playing if !state.combo.is_executing() => self.play(state),
            _ => None,
        };
        if tap.is_some() {
            self.cooldown = TAP_COOLDOWN;
        }
        tap
    }

    fn play(&self, state: &GameState) -> Option<Vec2> {
        let avatar = &state.avatar;
        let threat = closest_threat(avatar, &state.projectiles);

        if state.combo_ready() && state.projectiles.len() >= 3 && threat.is_some() {
            return Some(avatar.pos);
        }

        if let Some(projectile) = threat {
            // Moving at it puts it in the front arc
            if !avatar.moving {
                return Some(projectile.pos);
            }
            return None;
        }

        if avatar.moving || state.combo_ready() {
            return None;
        }
        state
            .collectibles
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(avatar.pos)
                    .total_cmp(&b.pos.distance_squared(avatar.pos))
            })
            .map(|c| c.pos)
    }

    fn pick_combo_point(&self, state: &GameState) -> Option<Vec2> {
        let chosen = state.combo.selected_points();
        if chosen.len() >= COMBO_MAX_POINTS {
            return None;
        }
        let bounds = Avatar::bounds();
        let mut inside: Vec<&Projectile> = state
            .projectiles
            .iter()
            .filter(|p| p.entered_dojo)
            .collect();
        inside.sort_by(|a, b| {
            a.pos
                .distance_squared(state.avatar.pos)
                .total_cmp(&b.pos.distance_squared(state.avatar.pos))
        });
        inside
            .iter()
            .map(|p| bounds.clamp(p.pos))
            .find(|p| !chosen.contains(p))
            .or_else(|| (chosen.is_empty()).then(|| bounds.center()))
    }
}

/// Nearest projectile inside `THREAT_RANGE` that is closing on the avatar
fn closest_threat<'a>(avatar: &Avatar, projectiles: &'a [Projectile]) -> Option<&'a Projectile> {
    projectiles
        .iter()
        .filter(|p| {
            let to_avatar = avatar.pos - p.pos;
            to_avatar.length() < THREAT_RANGE && p.vel.dot(to_avatar) > 0.0
        })
        .min_by(|a, b| {
            a.pos
                .distance_squared(avatar.pos)
                .total_cmp(&b.pos.distance_squared(avatar.pos))
        })
}
