//! Serializable frame view
//!
//! A borrowed, read-only picture of one frame for tooling and headless runs.
//! The RNG and event queue are not part of it.

use serde::Serialize;

use crate::sim::{
    AreaHazard, Avatar, Collectible, ComboState, FadingProjectile, GamePhase, GameState,
    Projectile,
};

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub frame: u64,
    pub seed: u64,
    pub phase: GamePhase,
    pub elapsed: f32,
    pub score: u64,
    pub power: u8,
    pub time_scale: f32,
    pub visibility: f32,
    pub avatar: &'a Avatar,
    pub combo: &'a ComboState,
    pub projectiles: &'a [Projectile],
    pub remnants: &'a [FadingProjectile],
    pub hazards: &'a [AreaHazard],
    pub collectibles: &'a [Collectible],
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState, frame: u64) -> Self {
        Self {
            frame,
            seed: state.seed,
            phase: state.phase,
            elapsed: state.elapsed,
            score: state.score,
            power: state.power,
            time_scale: state.time_scale,
            visibility: state.visibility,
            avatar: &state.avatar,
            combo: &state.combo.state,
            projectiles: &state.projectiles,
            remnants: &state.remnants,
            hazards: &state.hazards,
            collectibles: &state.collectibles,
        }
    }

    /// Single-line JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
