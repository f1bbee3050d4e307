//! Game state and core simulation types
//!
//! One `GameState` is the whole session context: every subsystem takes it
//! (or the pieces it needs) explicitly. `start_session` replaces all
//! transient collections wholesale.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::combo::ComboPath;
use crate::Rect;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start
    Idle,
    /// Active gameplay (including combo execution)
    Playing,
    /// Combo point selection (world frozen, countdown running)
    Selecting,
    /// Run ended; terminal until the next start
    GameOver,
}

/// Projectile types, in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Common,
    /// Steers toward the avatar
    Homing,
    /// Becomes an area hazard when deflected
    Explosive,
    /// Shrinks the visible radius while inside the dojo
    VisionReducing,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 4] = [
        ProjectileKind::Common,
        ProjectileKind::Homing,
        ProjectileKind::Explosive,
        ProjectileKind::VisionReducing,
    ];

    /// Seconds of play before this kind can spawn
    pub fn unlock_time(self) -> Option<f32> {
        match self {
            ProjectileKind::Common => None,
            ProjectileKind::Homing => Some(HOMING_UNLOCK_TIME),
            ProjectileKind::Explosive => Some(EXPLOSIVE_UNLOCK_TIME),
            ProjectileKind::VisionReducing => Some(VISION_UNLOCK_TIME),
        }
    }

    /// Relative spawn weight once unlocked
    pub fn weight(self) -> u32 {
        match self {
            ProjectileKind::Common => 50,
            ProjectileKind::Homing => 30,
            ProjectileKind::Explosive => 15,
            ProjectileKind::VisionReducing => 5,
        }
    }

    pub fn is_unlocked(self, elapsed: f32) -> bool {
        self.unlock_time().is_none_or(|t| elapsed >= t)
    }
}

/// An incoming projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Spin phase (cosmetic)
    pub rotation: f32,
    /// Seconds spent inside the dojo since first entering
    pub time_in_dojo: f32,
    pub entered_dojo: bool,
}

impl Projectile {
    pub fn new(id: u32, kind: ProjectileKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            rotation: 0.0,
            time_in_dojo: 0.0,
            entered_dojo: false,
        }
    }

    /// Advance by `dt` (already time-scaled). `avatar` is the homing target.
    pub fn update(&mut self, dt: f32, avatar: Vec2) {
        self.pos += self.vel * dt;
        self.rotation += PROJECTILE_SPIN * dt;

        let dojo = Rect::dojo();
        if !self.entered_dojo && dojo.contains(self.pos) {
            self.entered_dojo = true;
        }
        if self.entered_dojo {
            self.time_in_dojo += dt;
        }

        if self.kind == ProjectileKind::Homing {
            self.steer_toward(avatar, dt);
        }

        if self.entered_dojo {
            self.rebound(&dojo);
        }
    }

    /// Pull toward `target`, then restore the constant cruise speed.
    /// Zero distance means no adjustment.
    fn steer_toward(&mut self, target: Vec2, dt: f32) {
        let to_target = target - self.pos;
        let dist = to_target.length();
        if dist <= 0.0 {
            return;
        }
        let steered = self.vel + to_target / dist * HOMING_PULL * dt;
        let dir = steered.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.vel = dir * PROJECTILE_SPEED;
        }
    }

    /// Bounce off dojo walls, only when moving into the wall being touched
    fn rebound(&mut self, dojo: &Rect) {
        let r = PROJECTILE_RADIUS;
        if self.pos.x - r < dojo.min.x && self.vel.x < 0.0 {
            self.pos.x = dojo.min.x + r;
            self.vel.x = self.vel.x.abs();
        }
        if self.pos.x + r > dojo.max.x && self.vel.x > 0.0 {
            self.pos.x = dojo.max.x - r;
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y - r < dojo.min.y && self.vel.y < 0.0 {
            self.pos.y = dojo.min.y + r;
            self.vel.y = self.vel.y.abs();
        }
        if self.pos.y + r > dojo.max.y && self.vel.y > 0.0 {
            self.pos.y = dojo.max.y - r;
            self.vel.y = -self.vel.y.abs();
        }
    }
}

/// Visual remnant of a destroyed projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadingProjectile {
    pub pos: Vec2,
    pub kind: ProjectileKind,
    pub lifetime: f32,
}

impl FadingProjectile {
    pub fn new(pos: Vec2, kind: ProjectileKind) -> Self {
        Self {
            pos,
            kind,
            lifetime: REMNANT_LIFETIME,
        }
    }

    pub fn opacity(&self) -> f32 {
        (self.lifetime / REMNANT_LIFETIME).clamp(0.0, 1.0)
    }

    /// Returns false once expired
    pub fn update(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

/// Timed explosive left behind by a deflected explosive projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaHazard {
    pub pos: Vec2,
    /// Seconds until detonation
    pub fuse: f32,
    pub exploded: bool,
    /// Visual shock ring radius after detonation
    pub ring_radius: f32,
    pub opacity: f32,
}

impl AreaHazard {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            fuse: HAZARD_FUSE,
            exploded: false,
            ring_radius: 0.0,
            opacity: 1.0,
        }
    }

    /// Advance the hazard. Returns true on the tick it detonates; the caller
    /// applies the blast.
    pub fn update(&mut self, dt: f32, time_scale: f32) -> bool {
        if !self.exploded {
            self.fuse -= dt * time_scale;
            if self.fuse <= 0.0 {
                self.fuse = 0.0;
                self.exploded = true;
                return true;
            }
        } else {
            self.ring_radius += BLAST_GROWTH * dt;
            self.opacity = (self.opacity - BLAST_FADE * dt).max(0.0);
        }
        false
    }

    pub fn is_spent(&self) -> bool {
        self.exploded && self.opacity <= 0.0
    }

    /// True if a body of `radius` at `point` is caught by the blast
    pub fn catches(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) < BLAST_RADIUS + radius
    }
}

/// Power item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    /// Bob animation phase (cosmetic)
    pub bob_phase: f32,
}

impl Collectible {
    pub fn update(&mut self, dt: f32) {
        self.bob_phase += dt * COLLECTIBLE_BOB_RATE;
    }
}

/// Notable simulation events, drained by the driver each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileSpawned { kind: ProjectileKind },
    Deflected { kind: ProjectileKind, pos: Vec2 },
    HazardArmed { pos: Vec2 },
    HazardDetonated { pos: Vec2, destroyed: u32 },
    Collected { slots: u8 },
    ComboReady,
    ComboSelecting,
    ComboExecuting { legs: usize },
    ComboCancelled,
    ComboFinished,
    GameOver { score: u64, elapsed: f32 },
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Scaled seconds of play
    pub elapsed: f32,
    pub score: u64,
    pub time_scale: f32,
    /// Visible diameter around the avatar
    pub visibility: f32,
    /// Countdown to the next projectile (scaled seconds)
    pub projectile_timer: f32,
    /// Countdown to the next collectible (real seconds)
    pub collectible_timer: f32,
    /// Filled power slots (0..=POWER_SLOTS)
    pub power: u8,
    pub avatar: Avatar,
    pub projectiles: Vec<Projectile>,
    pub remnants: Vec<FadingProjectile>,
    pub hazards: Vec<AreaHazard>,
    pub collectibles: Vec<Collectible>,
    pub combo: ComboPath,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            elapsed: 0.0,
            score: 0,
            time_scale: 1.0,
            visibility: FULL_VISIBILITY,
            projectile_timer: FIRST_PROJECTILE_DELAY,
            collectible_timer: FIRST_COLLECTIBLE_DELAY,
            power: 0,
            avatar: Avatar::new(Self::spawn_point()),
            projectiles: Vec::new(),
            remnants: Vec::new(),
            hazards: Vec::new(),
            collectibles: Vec::new(),
            combo: ComboPath::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Avatar start position (center of the play surface)
    pub fn spawn_point() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0)
    }

    /// (Re)initialize every session field and begin play. The RNG stream
    /// carries on so consecutive runs differ.
    pub fn start_session(&mut self) {
        self.phase = GamePhase::Playing;
        self.elapsed = 0.0;
        self.score = 0;
        self.time_scale = 1.0;
        self.visibility = FULL_VISIBILITY;
        self.projectile_timer = FIRST_PROJECTILE_DELAY;
        self.collectible_timer = FIRST_COLLECTIBLE_DELAY;
        self.power = 0;
        self.avatar = Avatar::new(Self::spawn_point());
        self.projectiles = Vec::new();
        self.remnants = Vec::new();
        self.hazards = Vec::new();
        self.collectibles = Vec::new();
        self.combo = ComboPath::default();
        self.events.clear();
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Combo-ready: all power slots filled
    pub fn combo_ready(&self) -> bool {
        self.power >= POWER_SLOTS
    }

    /// Terminal transition. Returns true only on the first call of a run.
    pub fn game_over(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            elapsed: self.elapsed,
        });
        true
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.avatar.pos, Vec2::new(340.0, 247.5));
        assert_eq!(state.visibility, FULL_VISIBILITY);
    }

    #[test]
    fn test_start_session_resets() {
        let mut state = GameState::new(7);
        state.start_session();
        state.score = 12;
        state.power = 2;
        state.projectiles.push(Projectile::new(
            1,
            ProjectileKind::Common,
            Vec2::ZERO,
            Vec2::X,
        ));
        state.game_over();
        state.start_session();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.power, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut state = GameState::new(1);
        state.start_session();
        assert!(state.game_over());
        assert!(!state.game_over());
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_unlock_schedule() {
        assert!(ProjectileKind::Common.is_unlocked(0.0));
        assert!(ProjectileKind::Homing.is_unlocked(0.0));
        assert!(!ProjectileKind::Explosive.is_unlocked(19.9));
        assert!(ProjectileKind::Explosive.is_unlocked(20.0));
        assert!(!ProjectileKind::VisionReducing.is_unlocked(44.9));
        assert!(ProjectileKind::VisionReducing.is_unlocked(45.0));
    }

    #[test]
    fn test_projectile_enters_and_rebounds() {
        let mut p = Projectile::new(
            1,
            ProjectileKind::Common,
            Vec2::new(DOJO_MARGIN + 20.0, 200.0),
            Vec2::new(-PROJECTILE_SPEED, 0.0),
        );
        p.update(0.1, Vec2::ZERO);
        assert!(p.entered_dojo);
        // 80 - 12 = 68 < 60 + 14 -> pushed back inside, heading right
        assert_eq!(p.pos.x, DOJO_MARGIN + PROJECTILE_RADIUS);
        assert!(p.vel.x > 0.0);
        assert!((p.time_in_dojo - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_projectile_outside_does_not_rebound() {
        let mut p = Projectile::new(
            1,
            ProjectileKind::Common,
            Vec2::new(19.0, 200.0),
            Vec2::new(PROJECTILE_SPEED, 0.0),
        );
        p.update(0.1, Vec2::ZERO);
        assert!(!p.entered_dojo);
        assert_eq!(p.time_in_dojo, 0.0);
        assert!((p.pos.x - 31.0).abs() < 1e-4);
    }

    #[test]
    fn test_homing_zero_distance_keeps_velocity() {
        let pos = Vec2::new(200.0, 200.0);
        let vel = Vec2::new(0.0, PROJECTILE_SPEED);
        let mut p = Projectile::new(1, ProjectileKind::Homing, pos, vel);
        p.steer_toward(pos, 0.016);
        assert_eq!(p.vel, vel);
    }

    #[test]
    fn test_homing_turns_toward_avatar() {
        let avatar = Vec2::new(200.0, 300.0);
        let mut p = Projectile::new(
            1,
            ProjectileKind::Homing,
            Vec2::new(200.0, 200.0),
            Vec2::new(PROJECTILE_SPEED, 0.0),
        );
        let old_vel = p.vel;
        p.update(1.0 / 60.0, avatar);
        let to_avatar = avatar - p.pos;
        assert!(p.vel.y > 0.0);
        assert!(p.vel.angle_to(to_avatar).abs() < old_vel.angle_to(to_avatar).abs());
    }

    #[test]
    fn test_common_does_not_steer() {
        let vel = Vec2::new(PROJECTILE_SPEED, 0.0);
        let mut p = Projectile::new(1, ProjectileKind::Common, Vec2::new(200.0, 200.0), vel);
        p.update(1.0 / 60.0, Vec2::new(200.0, 300.0));
        assert_eq!(p.vel, vel);
    }

    #[test]
    fn test_remnant_fades_out() {
        let mut r = FadingProjectile::new(Vec2::ZERO, ProjectileKind::Homing);
        assert!(r.update(1.0));
        assert!((r.opacity() - 0.5).abs() < 1e-6);
        assert!(!r.update(1.0));
        assert_eq!(r.opacity(), 0.0);
    }

    #[test]
    fn test_hazard_lifecycle() {
        let mut h = AreaHazard::new(Vec2::ZERO);
        assert!(!h.update(1.0, 1.0));
        assert!(h.update(1.0, 1.0));
        assert!(h.exploded);
        assert!(!h.is_spent());
        assert!(!h.update(0.25, 1.0));
        assert!((h.ring_radius - 75.0).abs() < 1e-4);
        assert!(!h.update(0.3, 1.0));
        assert!(h.is_spent());
    }

    proptest! {
        #[test]
        fn prop_homing_speed_is_invariant(
            px in 0.0f32..680.0,
            py in 0.0f32..495.0,
            heading in -3.14f32..3.14,
            ax in 75.0f32..605.0,
            ay in 75.0f32..420.0,
        ) {
            let vel = Vec2::new(heading.cos(), heading.sin()) * PROJECTILE_SPEED;
            let mut p = Projectile::new(1, ProjectileKind::Homing, Vec2::new(px, py), vel);
            for _ in 0..120 {
                p.update(1.0 / 60.0, Vec2::new(ax, ay));
                prop_assert!((p.vel.length() - PROJECTILE_SPEED).abs() < 1e-2);
            }
        }
    }
}
