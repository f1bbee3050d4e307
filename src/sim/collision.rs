//! Collision resolution between the avatar and everything else
//!
//! Runs once per tick after all entity updates. Each live projectile is
//! classified once against the avatar; removals are applied after the scan.

use glam::Vec2;

use super::avatar::Avatar;
use super::state::{
    AreaHazard, FadingProjectile, GameEvent, GameState, Projectile, ProjectileKind,
};
use crate::consts::*;

/// Outcome of one projectile against the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// Blocked by the sword: projectile destroyed, one point
    Deflect,
    /// Lethal hit
    Fatal,
}

/// Classify a projectile at `point`. `swinging` is true while the avatar moves
/// or runs a combo.
///
/// Body contact while swinging is deflected from the front and fatal from
/// behind; body contact while standing still is always fatal. Without body
/// contact, anything in the front arc within sword reach is deflected.
pub fn classify(avatar: &Avatar, swinging: bool, point: Vec2) -> Contact {
    let dist = avatar.pos.distance(point);

    if dist < AVATAR_RADIUS + PROJECTILE_RADIUS {
        if !swinging {
            return Contact::Fatal;
        }
        if avatar.is_in_front_arc(point, PROJECTILE_RADIUS) {
            return Contact::Deflect;
        }
        if avatar.is_behind(point) {
            return Contact::Fatal;
        }
    }

    if swinging
        && avatar.is_in_front_arc(point, PROJECTILE_RADIUS)
        && dist < SWING_RADIUS + PROJECTILE_RADIUS
    {
        return Contact::Deflect;
    }

    Contact::None
}

/// Resolve collectibles, then projectiles, for this tick
pub fn resolve(state: &mut GameState) {
    collect_items(state);
    resolve_projectiles(state);
}

fn collect_items(state: &mut GameState) {
    let avatar_pos = state.avatar.pos;
    let before = state.collectibles.len();
    state
        .collectibles
        .retain(|c| c.pos.distance(avatar_pos) >= AVATAR_RADIUS + COLLECTIBLE_RADIUS);
    let picked = before - state.collectibles.len();

    for _ in 0..picked {
        if state.power >= POWER_SLOTS {
            continue;
        }
        state.power += 1;
        state.events.push(GameEvent::Collected { slots: state.power });
        if state.power >= POWER_SLOTS {
            state.avatar.glowing = true;
            state.events.push(GameEvent::ComboReady);
        }
    }
}

fn resolve_projectiles(state: &mut GameState) {
    let swinging = state.avatar.moving || state.combo.is_executing();
    let contacts: Vec<Contact> = state
        .projectiles
        .iter()
        .map(|p| classify(&state.avatar, swinging, p.pos))
        .collect();

    if contacts.iter().all(|c| *c == Contact::None) {
        return;
    }

    // Once a contact ends the run the rest of the pass leaves the world as is
    let projectiles = std::mem::take(&mut state.projectiles);
    for (projectile, contact) in projectiles.into_iter().zip(contacts) {
        match contact {
            Contact::Deflect if !state.is_over() => deflect(state, &projectile),
            Contact::Fatal => {
                state.game_over();
                state.projectiles.push(projectile);
            }
            _ => state.projectiles.push(projectile),
        }
    }
}

/// Block outcome: score, then explosive kinds arm a hazard and the rest leave
/// a fading remnant.
fn deflect(state: &mut GameState, projectile: &Projectile) {
    state.score += 1;
    if projectile.kind == ProjectileKind::Explosive {
        state.hazards.push(AreaHazard::new(projectile.pos));
        state.events.push(GameEvent::HazardArmed {
            pos: projectile.pos,
        });
    } else {
        state
            .remnants
            .push(FadingProjectile::new(projectile.pos, projectile.kind));
    }
    state.events.push(GameEvent::Deflected {
        kind: projectile.kind,
        pos: projectile.pos,
    });
}

/// Apply a detonation at `pos`: the avatar dies if caught, and every live
/// projectile inside the blast is destroyed for a point each. Returns the
/// number destroyed.
///
/// A blast that ends the run, or goes off after it ended, destroys nothing:
/// the score stays at its value when the avatar died.
pub fn detonate(state: &mut GameState, hazard: &AreaHazard) -> u32 {
    if hazard.catches(state.avatar.pos, AVATAR_RADIUS) {
        state.game_over();
    }
    if state.is_over() {
        state.events.push(GameEvent::HazardDetonated {
            pos: hazard.pos,
            destroyed: 0,
        });
        return 0;
    }

    let before = state.projectiles.len();
    let mut remnants = Vec::new();
    state.projectiles.retain(|p| {
        if p.pos.distance(hazard.pos) >= BLAST_RADIUS {
            return true;
        }
        if p.kind != ProjectileKind::Explosive {
            remnants.push(FadingProjectile::new(p.pos, p.kind));
        }
        false
    });
    let destroyed = (before - state.projectiles.len()) as u32;

    state.score += destroyed as u64;
    state.remnants.extend(remnants);
    state.events.push(GameEvent::HazardDetonated {
        pos: hazard.pos,
        destroyed,
    });
    destroyed
}
