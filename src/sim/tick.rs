//! Per-frame session advance
//!
//! Pipeline for a playing frame: spawn → entity updates → combo advance →
//! hazards → visibility → collisions. Selection frames only run the combo
//! countdown. Idle and game-over sessions do not tick.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use super::{collision, combo, spawn, visibility};
use crate::consts::*;

/// Pointer events collected since the previous frame, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Taps/clicks already mapped into arena coordinates
    pub taps: Vec<Vec2>,
}

impl TickInput {
    pub fn tap(point: Vec2) -> Self {
        Self { taps: vec![point] }
    }
}

/// Apply one pointer event. Ignored outside `Playing`/`Selecting`.
pub fn pointer_input(state: &mut GameState, point: Vec2) {
    match state.phase {
        GamePhase::Selecting => combo::record_point(state, point),
        GamePhase::Playing => {
            // The path owns the avatar until it finishes
            if state.combo.is_executing() {
                return;
            }
            let on_avatar = point.distance(state.avatar.pos) < AVATAR_RADIUS + COMBO_TAP_SLACK;
            if on_avatar && combo::begin_selection(state) {
                return;
            }
            state.avatar.set_target(point, false);
        }
        GamePhase::Idle | GamePhase::GameOver => {}
    }
}

/// Clamp a raw frame delta: stalls are capped, garbage becomes zero
pub fn clamp_frame_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, max_dt)
    } else {
        0.0
    }
}

/// Advance the session by one frame of `dt` real seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for &tap in &input.taps {
        pointer_input(state, tap);
    }

    let dt = clamp_frame_dt(dt, MAX_FRAME_DT);
    match state.phase {
        GamePhase::Playing => advance_play(state, dt),
        GamePhase::Selecting => combo::tick_selection(state, dt),
        GamePhase::Idle | GamePhase::GameOver => {}
    }
}

fn advance_play(state: &mut GameState, dt: f32) {
    let scaled = dt * state.time_scale;
    state.elapsed += scaled;

    spawn::run(state, dt);

    state.avatar.update(scaled, state.combo.is_executing());
    if state.combo.is_executing() && !state.avatar.moving {
        combo::advance(state);
    }

    let homing_target = state.avatar.pos;
    for projectile in &mut state.projectiles {
        projectile.update(scaled, homing_target);
    }
    for collectible in &mut state.collectibles {
        collectible.update(dt);
    }
    state.remnants.retain_mut(|r| r.update(dt));
    update_hazards(state, dt);

    // A blast may have ended the run mid-frame
    if state.is_over() {
        return;
    }

    visibility::run(state, dt);
    collision::resolve(state);
}

fn update_hazards(state: &mut GameState, dt: f32) {
    let time_scale = state.time_scale;
    let mut blasts = Vec::new();
    for hazard in &mut state.hazards {
        if hazard.update(dt, time_scale) {
            blasts.push(hazard.clone());
        }
    }
    for hazard in &blasts {
        collision::detonate(state, hazard);
    }
    state.hazards.retain(|h| !h.is_spent());
}
