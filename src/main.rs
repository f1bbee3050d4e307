//! ElimiNinja headless driver
//!
//! Runs a session at a fixed frame rate with the autopilot (or no input),
//! logging events and HUD changes. Optional JSON snapshots go to stdout.

use glam::Vec2;

use elimininja::autopilot::Autopilot;
use elimininja::renderer::{HazardWarning, RenderSink, SwordPose, Vignette, draw_frame};
use elimininja::settings::SETTINGS_ENV;
use elimininja::sim::{
    AreaHazard, Avatar, Collectible, FadingProjectile, GameEvent, GameState, Projectile,
    TickInput, clamp_frame_dt, tick,
};
use elimininja::snapshot::Snapshot;
use elimininja::ui::{HudTracker, UiSink};
use elimininja::{Rect, Settings};

/// HUD sink that writes to the log
struct LogHud;

impl UiSink for LogHud {
    fn report_score(&mut self, score: u64) {
        log::debug!("score {}", score);
    }

    fn report_time(&mut self, clock: &str) {
        log::trace!("clock {}", clock);
    }

    fn report_power_slots(&mut self, slots: u8) {
        log::debug!("power {}/3", slots);
    }

    fn report_game_over(&mut self, final_score: u64, final_time: &str) {
        log::info!("Final score {} at {}", final_score, final_time);
    }
}

/// Draw sink that only counts what a frame would paint
#[derive(Default)]
struct FrameCounter {
    projectiles: usize,
    armed_hazards: usize,
    fogged: bool,
}

impl RenderSink for FrameCounter {
    fn arena(&mut self, _dojo: Rect, _canvas: Vec2) {
        *self = Self::default();
    }
    fn remnant(&mut self, _remnant: &FadingProjectile, _color: [f32; 4]) {}
    fn collectible(&mut self, _collectible: &Collectible, _drawn_at: Vec2) {}
    fn projectile(&mut self, _projectile: &Projectile, _color: [f32; 4], _outline: &[Vec2; 8]) {
        self.projectiles += 1;
    }
    fn hazard(&mut self, _hazard: &AreaHazard, warning: Option<HazardWarning>) {
        if warning.is_some() {
            self.armed_hazards += 1;
        }
    }
    fn avatar(
        &mut self,
        _avatar: &Avatar,
        _sword: Option<SwordPose>,
        _range_ring: Option<f32>,
        _glow: f32,
    ) {
    }
    fn fog(&mut self, _center: Vec2, _vignette: Vignette) {
        self.fogged = true;
    }
    fn combo_selection(&mut self, _origin: Vec2, _points: &[Vec2], _countdown: f32) {}
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

fn load_settings() -> Settings {
    let path = std::env::var(SETTINGS_ENV)
        .ok()
        .or_else(|| std::env::args().nth(1));
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path);
            settings
        }
        Err(e) => {
            log::warn!("Ignoring settings file {}: {}", path, e);
            Settings::default()
        }
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::GameOver { score, elapsed } => {
            log::info!("Game over: score {} after {:.1}s", score, elapsed)
        }
        GameEvent::ComboExecuting { legs } => log::info!("Combo path with {} legs", legs),
        other => log::debug!("{:?}", other),
    }
}

fn main() {
    init_logging();
    log::info!("ElimiNinja starting...");

    let settings = load_settings();
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Session seed: {}", seed);

    let mut state = GameState::new(seed);
    state.start_session();

    let mut autopilot = settings.autopilot.then(Autopilot::new);
    let mut hud = HudTracker::new();
    let mut frame = FrameCounter::default();
    let dt = clamp_frame_dt(settings.frame_dt(), settings.max_frame_dt);

    for n in 0..settings.frame_budget() {
        let mut input = TickInput::default();
        if let Some(pilot) = autopilot.as_mut() {
            input.taps.extend(pilot.next_tap(&state, dt));
        }

        tick(&mut state, &input, dt);

        for event in state.drain_events() {
            log_event(&event);
        }
        hud.update(&state, &mut LogHud);
        draw_frame(&state, &mut frame);

        if settings.snapshot_every > 0 && n % u64::from(settings.snapshot_every) == 0 {
            match Snapshot::capture(&state, n).to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Snapshot failed: {}", e),
            }
        }

        if state.is_over() {
            break;
        }
    }

    if !state.is_over() {
        log::info!(
            "Run ended after {:.1}s with score {} ({} projectiles, {} armed hazards{})",
            state.elapsed,
            state.score,
            frame.projectiles,
            frame.armed_hazards,
            if frame.fogged { ", fogged" } else { "" }
        );
    }
}
