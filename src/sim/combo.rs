//! Combo path: pick up to three points in slow motion, then the avatar runs
//! them back to back with its sword spinning.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Combo state machine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ComboState {
    #[default]
    Inactive,
    /// Recording taps while the countdown runs (real seconds)
    Selecting { points: Vec<Vec2>, countdown: f32 },
    /// Running the recorded legs; `next` is the leg to issue next
    Executing { path: Vec<Vec2>, next: usize },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboPath {
    pub state: ComboState,
}

impl ComboPath {
    pub fn is_selecting(&self) -> bool {
        matches!(self.state, ComboState::Selecting { .. })
    }

    pub fn is_executing(&self) -> bool {
        matches!(self.state, ComboState::Executing { .. })
    }

    /// Points recorded so far while selecting
    pub fn selected_points(&self) -> &[Vec2] {
        match &self.state {
            ComboState::Selecting { points, .. } => points,
            _ => &[],
        }
    }

    /// Remaining selection time, if selecting
    pub fn countdown(&self) -> Option<f32> {
        match self.state {
            ComboState::Selecting { countdown, .. } => Some(countdown),
            _ => None,
        }
    }
}

/// Enter point selection. Ignored unless playing, combo-ready and not already
/// running a combo.
pub fn begin_selection(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || !state.combo_ready() || state.combo.is_executing() {
        return false;
    }
    state.combo.state = ComboState::Selecting {
        points: Vec::with_capacity(COMBO_MAX_POINTS),
        countdown: COMBO_SELECT_TIME,
    };
    state.phase = GamePhase::Selecting;
    state.time_scale = COMBO_TIME_SCALE;
    state.events.push(GameEvent::ComboSelecting);
    true
}

/// Record a tapped point. Taps past the limit are dropped.
pub fn record_point(state: &mut GameState, point: Vec2) {
    if let ComboState::Selecting { points, .. } = &mut state.combo.state {
        if points.len() < COMBO_MAX_POINTS {
            points.push(point);
        }
    }
}

/// Run the selection countdown by `dt` real seconds. On expiry or a full
/// path, hand off to execution (or cancel with no points).
pub fn tick_selection(state: &mut GameState, dt: f32) {
    let ComboState::Selecting { points, countdown } = &mut state.combo.state else {
        return;
    };
    *countdown = (*countdown - dt).max(0.0);
    if *countdown > 0.0 && points.len() < COMBO_MAX_POINTS {
        return;
    }

    let path = std::mem::take(points);
    state.phase = GamePhase::Playing;
    state.time_scale = 1.0;

    if path.is_empty() {
        state.combo.state = ComboState::Inactive;
        state.events.push(GameEvent::ComboCancelled);
        return;
    }

    state.events.push(GameEvent::ComboExecuting { legs: path.len() });
    state.combo.state = ComboState::Executing { path, next: 0 };
    advance(state);
}

/// Issue the next leg, or wrap up the combo when every leg is done.
/// Called when the avatar has arrived at its current destination.
pub fn advance(state: &mut GameState) {
    let ComboState::Executing { path, next } = &mut state.combo.state else {
        return;
    };

    if let Some(&point) = path.get(*next) {
        *next += 1;
        state.avatar.set_target(point, true);
        return;
    }

    state.combo.state = ComboState::Inactive;
    state.time_scale = 1.0;
    state.power = 0;
    state.avatar.glowing = false;
    state.events.push(GameEvent::ComboFinished);
}
