//! Spawn director: projectile type/rate curve and collectible placement

use glam::Vec2;
use rand::Rng;

use super::state::{Collectible, GameEvent, GameState, Projectile, ProjectileKind};
use crate::Rect;
use crate::consts::*;

/// Seconds until the next projectile, given elapsed play time
pub fn spawn_interval(elapsed: f32) -> f32 {
    (SPAWN_INTERVAL_START - elapsed.max(0.0) * SPAWN_INTERVAL_DECAY).max(SPAWN_INTERVAL_FLOOR)
}

/// Weighted pick over the kinds unlocked at `elapsed`
pub fn next_projectile_kind<R: Rng>(rng: &mut R, elapsed: f32) -> ProjectileKind {
    let unlocked = ProjectileKind::ALL
        .into_iter()
        .filter(|k| k.is_unlocked(elapsed));
    let total: u32 = unlocked.clone().map(|k| k.weight()).sum();

    let mut roll = rng.random::<f32>() * total as f32;
    for kind in unlocked {
        roll -= kind.weight() as f32;
        if roll <= 0.0 {
            return kind;
        }
    }
    ProjectileKind::Common
}

/// Edge spawn point in the visible margin band.
/// `edge`: 0 top, 1 right, 2 bottom, 3 left.
fn edge_point<R: Rng>(rng: &mut R, edge: u32) -> Vec2 {
    let inset = PROJECTILE_RADIUS + SPAWN_EDGE_INSET;
    match edge {
        0 => Vec2::new(DOJO_MARGIN + rng.random::<f32>() * DOJO_WIDTH, inset),
        1 => Vec2::new(
            CANVAS_WIDTH - inset,
            DOJO_MARGIN + rng.random::<f32>() * DOJO_HEIGHT,
        ),
        2 => Vec2::new(
            DOJO_MARGIN + rng.random::<f32>() * DOJO_WIDTH,
            CANVAS_HEIGHT - inset,
        ),
        _ => Vec2::new(inset, DOJO_MARGIN + rng.random::<f32>() * DOJO_HEIGHT),
    }
}

/// Spawn one projectile of `kind` on a random edge, aimed at the dojo center
/// with up to ±~30° of scatter.
pub fn spawn_projectile(state: &mut GameState, kind: ProjectileKind) {
    let edge = state.rng.random_range(0..4u32);
    let pos = edge_point(&mut state.rng, edge);

    let heading = (Rect::dojo().center() - pos).normalize_or(Vec2::X);
    let deviation = (state.rng.random::<f32>() - 0.5) * SPAWN_SPREAD;
    let vel = Vec2::from_angle(deviation).rotate(heading) * PROJECTILE_SPEED;

    let id = state.next_entity_id();
    state.projectiles.push(Projectile::new(id, kind, pos, vel));
    state.events.push(GameEvent::ProjectileSpawned { kind });
}

/// Drop a collectible somewhere inside the padded dojo interior
pub fn spawn_collectible(state: &mut GameState) {
    let area = Rect::dojo().inset(COLLECTIBLE_PADDING);
    let size = area.size();
    let pos = area.min
        + Vec2::new(
            state.rng.random::<f32>() * size.x,
            state.rng.random::<f32>() * size.y,
        );
    let bob_phase = state.rng.random::<f32>() * std::f32::consts::TAU;
    state.collectibles.push(Collectible { pos, bob_phase });
}

/// Run both spawn timers. `dt` is the raw frame delta; the projectile timer
/// runs on scaled time, the collectible timer on real time.
pub fn run(state: &mut GameState, dt: f32) {
    state.projectile_timer -= dt * state.time_scale;
    if state.projectile_timer <= 0.0 {
        let kind = next_projectile_kind(&mut state.rng, state.elapsed);
        spawn_projectile(state, kind);
        state.projectile_timer = spawn_interval(state.elapsed);
    }

    // Held at zero while the cap blocks a spawn
    state.collectible_timer = (state.collectible_timer - dt).max(0.0);
    if state.collectible_timer <= 0.0 && state.collectibles.len() < MAX_COLLECTIBLES {
        spawn_collectible(state);
        state.collectible_timer =
            COLLECTIBLE_DELAY_MIN + state.rng.random::<f32>() * COLLECTIBLE_DELAY_SPREAD;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_spawn_interval_curve() {
        assert_eq!(spawn_interval(0.0), 1.5);
        assert!((spawn_interval(15.0) - 1.0).abs() < 1e-6);
        assert_eq!(spawn_interval(45.0), SPAWN_INTERVAL_FLOOR);
        assert_eq!(spawn_interval(1000.0), SPAWN_INTERVAL_FLOOR);
    }

    #[test]
    fn test_kind_respects_unlocks() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..2000 {
            let k = next_projectile_kind(&mut rng, 10.0);
            assert!(matches!(k, ProjectileKind::Common | ProjectileKind::Homing));
        }
    }

    #[test]
    fn test_kind_weights_roughly_match() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut counts: HashMap<ProjectileKind, u32> = HashMap::new();
        let n = 20_000;
        for _ in 0..n {
            *counts.entry(next_projectile_kind(&mut rng, 60.0)).or_default() += 1;
        }
        let share = |k: ProjectileKind| counts.get(&k).copied().unwrap_or(0) as f32 / n as f32;
        assert!((share(ProjectileKind::Common) - 0.50).abs() < 0.03);
        assert!((share(ProjectileKind::Homing) - 0.30).abs() < 0.03);
        assert!((share(ProjectileKind::Explosive) - 0.15).abs() < 0.03);
        assert!((share(ProjectileKind::VisionReducing) - 0.05).abs() < 0.02);
    }

    #[test]
    fn test_spawned_projectiles_start_outside_and_head_inward() {
        let mut state = GameState::new(5);
        state.start_session();
        let center = Rect::dojo().center();
        for _ in 0..200 {
            spawn_projectile(&mut state, ProjectileKind::Common);
        }
        for p in &state.projectiles {
            assert!(!Rect::dojo().contains(p.pos));
            assert!((p.vel.length() - PROJECTILE_SPEED).abs() < 1e-3);
            let to_center = (center - p.pos).normalize();
            // Within ~30° of the center heading
            assert!(p.vel.normalize().dot(to_center) > 0.85);
        }
    }

    #[test]
    fn test_collectibles_capped() {
        let mut state = GameState::new(5);
        state.start_session();
        for _ in 0..100 {
            run(&mut state, 1.0);
        }
        assert_eq!(state.collectibles.len(), MAX_COLLECTIBLES);
        assert_eq!(state.collectible_timer, 0.0);
        let area = Rect::dojo().inset(COLLECTIBLE_PADDING);
        assert!(state.collectibles.iter().all(|c| area.contains(c.pos)));
    }

    #[test]
    fn test_first_projectile_after_one_second() {
        let mut state = GameState::new(5);
        state.start_session();
        run(&mut state, 0.5);
        assert!(state.projectiles.is_empty());
        run(&mut state, 0.5);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectile_timer, 1.5);
    }
}
