//! Visibility ("fog") around the avatar
//!
//! Each vision-reducing projectile inside the dojo pulls the visible diameter
//! down the longer it stays. The applied diameter chases that target: slowly
//! when tightening, three times faster when recovering.

use super::state::{GameState, Projectile, ProjectileKind};
use crate::consts::*;

/// Diameter the fog is heading toward for the current projectile set
pub fn target_diameter(projectiles: &[Projectile]) -> f32 {
    projectiles
        .iter()
        .filter(|p| p.kind == ProjectileKind::VisionReducing && p.entered_dojo)
        .map(|p| (FOG_START - p.time_in_dojo * FOG_SHRINK_PER_SEC).max(FOG_FLOOR))
        .fold(FULL_VISIBILITY, f32::min)
}

/// Move `current` toward `target` by at most the shrink/recovery budget for `dt`
pub fn approach(current: f32, target: f32, dt: f32) -> f32 {
    let dt = dt.max(0.0);
    let next = if target < current {
        (current - FOG_TRANSITION * dt).max(target)
    } else {
        (current + FOG_RECOVERY * dt).min(target)
    };
    next.clamp(FOG_FLOOR, FULL_VISIBILITY)
}

pub fn run(state: &mut GameState, dt: f32) {
    let target = target_diameter(&state.projectiles);
    state.visibility = approach(state.visibility, target, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn vision(time_in_dojo: f32) -> Projectile {
        let mut p = Projectile::new(1, ProjectileKind::VisionReducing, Vec2::ZERO, Vec2::X);
        p.entered_dojo = true;
        p.time_in_dojo = time_in_dojo;
        p
    }

    #[test]
    fn test_no_hazards_full_visibility() {
        let mut common = Projectile::new(1, ProjectileKind::Common, Vec2::ZERO, Vec2::X);
        common.entered_dojo = true;
        assert_eq!(target_diameter(&[common]), FULL_VISIBILITY);
    }

    #[test]
    fn test_outside_dojo_ignored() {
        let mut p = vision(10.0);
        p.entered_dojo = false;
        assert_eq!(target_diameter(&[p]), FULL_VISIBILITY);
    }

    #[test]
    fn test_minimum_over_projectiles() {
        let target = target_diameter(&[vision(1.0), vision(5.0)]);
        assert!((target - (FOG_START - 200.0)).abs() < 1e-3);
        assert_eq!(target_diameter(&[vision(1000.0)]), FOG_FLOOR);
    }

    #[test]
    fn test_recovery_is_three_times_faster() {
        let shrunk = approach(FULL_VISIBILITY, FOG_FLOOR, 0.5);
        assert!((FULL_VISIBILITY - shrunk - 100.0).abs() < 1e-3);
        let grown = approach(shrunk, FULL_VISIBILITY, 0.1);
        assert!((grown - shrunk - 60.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_rates_bounded(
            current in FOG_FLOOR..FULL_VISIBILITY,
            target in FOG_FLOOR..FULL_VISIBILITY,
            dt in 0.0f32..0.1,
        ) {
            let next = approach(current, target, dt);
            prop_assert!(next >= FOG_FLOOR && next <= FULL_VISIBILITY);
            prop_assert!(next - current <= FOG_RECOVERY * dt + 1e-3);
            prop_assert!(current - next <= FOG_TRANSITION * dt + 1e-3);
        }
    }
}
