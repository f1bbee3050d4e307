//! Presentation pass
//!
//! The simulation never draws. `draw_frame` walks a `GameState` in paint
//! order and hands each piece to a `RenderSink`, the external draw service.

pub mod shapes;

use glam::Vec2;

use crate::Rect;
use crate::consts::*;
use crate::sim::{AreaHazard, Avatar, Collectible, FadingProjectile, GamePhase, GameState, Projectile};
pub use shapes::{HazardWarning, SwordPose, Vignette};

/// Draw service. Calls are fire-and-forget; the sink may batch or drop them.
///
/// Each call carries the entity plus the presentation values derived from it,
/// so a sink never re-implements the animation math.
pub trait RenderSink {
    /// Outer spawn band plus the dojo floor
    fn arena(&mut self, dojo: Rect, canvas: Vec2);
    /// `color` alpha already carries the fade
    fn remnant(&mut self, remnant: &FadingProjectile, color: [f32; 4]);
    /// `drawn_at` includes the bob offset
    fn collectible(&mut self, collectible: &Collectible, drawn_at: Vec2);
    fn projectile(&mut self, projectile: &Projectile, color: [f32; 4], outline: &[Vec2; 8]);
    /// Armed hazards get a pulse radius and whole-second label; detonated
    /// ones get neither and are drawn as their shock ring
    fn hazard(&mut self, hazard: &AreaHazard, warning: Option<HazardWarning>);
    /// `range_ring` is the move-range indicator radius when shown; `glow` is
    /// the combo-ready pulse, 0 when not ready
    fn avatar(
        &mut self,
        avatar: &Avatar,
        sword: Option<SwordPose>,
        range_ring: Option<f32>,
        glow: f32,
    );
    fn fog(&mut self, center: Vec2, vignette: Vignette);
    /// Combo point picker overlay: path preview from `origin` through `points`
    fn combo_selection(&mut self, origin: Vec2, points: &[Vec2], countdown: f32);
}

/// Paint one frame: floor, remnants, collectibles, projectiles, hazards,
/// avatar, fog, then the combo picker while selecting.
pub fn draw_frame<S: RenderSink + ?Sized>(state: &GameState, sink: &mut S) {
    sink.arena(Rect::dojo(), Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));

    for remnant in &state.remnants {
        let mut color = shapes::kind_color(remnant.kind);
        color[3] *= remnant.opacity();
        sink.remnant(remnant, color);
    }
    for collectible in &state.collectibles {
        sink.collectible(collectible, shapes::bob_position(collectible));
    }
    for projectile in &state.projectiles {
        let outline = shapes::star_outline(projectile.pos, projectile.rotation, PROJECTILE_RADIUS);
        sink.projectile(projectile, shapes::kind_color(projectile.kind), &outline);
    }
    for hazard in &state.hazards {
        sink.hazard(hazard, HazardWarning::of(hazard));
    }

    let executing = state.combo.is_executing();
    sink.avatar(
        &state.avatar,
        SwordPose::of(&state.avatar, executing),
        shapes::range_ring(&state.avatar, executing),
        shapes::glow_pulse(&state.avatar),
    );

    if let Some(vignette) = Vignette::from_diameter(state.visibility) {
        sink.fog(state.avatar.pos, vignette);
    }

    if state.phase == GamePhase::Selecting {
        if let Some(countdown) = state.combo.countdown() {
            sink.combo_selection(state.avatar.pos, state.combo.selected_points(), countdown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ProjectileKind, combo};

    /// Records call names in order, plus a few derived values
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        remnant_alpha: Vec<f32>,
        collectible_at: Vec<Vec2>,
        warnings: Vec<Option<HazardWarning>>,
        glow: Vec<f32>,
    }

    impl RenderSink for Recorder {
        fn arena(&mut self, _: Rect, _: Vec2) {
            self.calls.push("arena");
        }
        fn remnant(&mut self, _: &FadingProjectile, color: [f32; 4]) {
            self.calls.push("remnant");
            self.remnant_alpha.push(color[3]);
        }
        fn collectible(&mut self, _: &Collectible, drawn_at: Vec2) {
            self.calls.push("collectible");
            self.collectible_at.push(drawn_at);
        }
        fn projectile(&mut self, _: &Projectile, _: [f32; 4], _: &[Vec2; 8]) {
            self.calls.push("projectile");
        }
        fn hazard(&mut self, _: &AreaHazard, warning: Option<HazardWarning>) {
            self.calls.push("hazard");
            self.warnings.push(warning);
        }
        fn avatar(&mut self, _: &Avatar, _: Option<SwordPose>, _: Option<f32>, glow: f32) {
            self.calls.push("avatar");
            self.glow.push(glow);
        }
        fn fog(&mut self, _: Vec2, _: Vignette) {
            self.calls.push("fog");
        }
        fn combo_selection(&mut self, _: Vec2, _: &[Vec2], _: f32) {
            self.calls.push("combo_selection");
        }
    }

    #[test]
    fn test_paint_order() {
        let mut state = GameState::new(1);
        state.start_session();
        state.remnants.push(FadingProjectile::new(Vec2::ZERO, ProjectileKind::Common));
        state.collectibles.push(Collectible {
            pos: Vec2::new(200.0, 200.0),
            bob_phase: 0.0,
        });
        state.projectiles.push(Projectile::new(
            1,
            ProjectileKind::Homing,
            Vec2::ZERO,
            Vec2::X,
        ));
        state.hazards.push(AreaHazard::new(Vec2::ZERO));
        state.visibility = 300.0;
        state.power = POWER_SLOTS;
        combo::begin_selection(&mut state);

        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert_eq!(
            rec.calls,
            vec![
                "arena",
                "remnant",
                "collectible",
                "projectile",
                "hazard",
                "avatar",
                "fog",
                "combo_selection",
            ]
        );
    }

    #[test]
    fn test_derived_values_reach_sink() {
        let mut state = GameState::new(1);
        state.start_session();
        let mut remnant = FadingProjectile::new(Vec2::ZERO, ProjectileKind::Common);
        remnant.lifetime = REMNANT_LIFETIME / 2.0;
        state.remnants.push(remnant);
        state.collectibles.push(Collectible {
            pos: Vec2::new(200.0, 200.0),
            bob_phase: std::f32::consts::FRAC_PI_2,
        });
        let mut spent = AreaHazard::new(Vec2::ZERO);
        spent.exploded = true;
        state.hazards.push(AreaHazard::new(Vec2::ZERO));
        state.hazards.push(spent);
        state.avatar.glowing = true;
        state.avatar.glow_timer = std::f32::consts::FRAC_PI_2;

        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert!((rec.remnant_alpha[0] - 0.5).abs() < 1e-6);
        assert!((rec.collectible_at[0] - Vec2::new(200.0, 202.0)).length() < 1e-5);
        assert_eq!(rec.warnings[0].map(|w| w.label), Some(2));
        assert!(rec.warnings[1].is_none());
        assert!((rec.glow[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clear_frame_skips_overlays() {
        let mut state = GameState::new(1);
        state.start_session();
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert_eq!(rec.calls, vec!["arena", "avatar"]);
    }
}
