//! HUD reporting
//!
//! The page owns the widgets; the game only pushes values through `UiSink`.
//! `HudTracker` forwards a value only when it changed since the last frame.

use crate::sim::{GamePhase, GameState};

/// HUD widgets (score, clock, power bar, game-over panel)
pub trait UiSink {
    fn report_score(&mut self, score: u64);
    /// Clock text as `m:ss`
    fn report_time(&mut self, clock: &str);
    /// Filled power slots, 0..=3
    fn report_power_slots(&mut self, slots: u8);
    fn report_game_over(&mut self, final_score: u64, final_time: &str);
}

/// Format seconds of play as `m:ss`
pub fn format_clock(seconds: f32) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Change tracker so the HUD is touched only when something moved
#[derive(Debug, Default)]
pub struct HudTracker {
    score: Option<u64>,
    clock: Option<String>,
    slots: Option<u8>,
    game_over_reported: bool,
}

impl HudTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything reported (call on session start)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Push whatever changed since the last call
    pub fn update<S: UiSink + ?Sized>(&mut self, state: &GameState, sink: &mut S) {
        if self.score != Some(state.score) {
            self.score = Some(state.score);
            sink.report_score(state.score);
        }

        let clock = format_clock(state.elapsed);
        if self.clock.as_deref() != Some(clock.as_str()) {
            sink.report_time(&clock);
            self.clock = Some(clock);
        }

        let slots = state.power.min(crate::consts::POWER_SLOTS);
        if self.slots != Some(slots) {
            self.slots = Some(slots);
            sink.report_power_slots(slots);
        }

        if state.phase == GamePhase::GameOver && !self.game_over_reported {
            self.game_over_reported = true;
            sink.report_game_over(state.score, &format_clock(state.elapsed));
        }
    }
}
