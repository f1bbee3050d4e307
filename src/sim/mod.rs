//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity list)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod collision;
pub mod combo;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod visibility;

pub use avatar::{Avatar, Sector};
pub use collision::{Contact, classify};
pub use combo::{ComboPath, ComboState};
pub use state::{
    AreaHazard, Collectible, FadingProjectile, GameEvent, GamePhase, GameState, Projectile,
    ProjectileKind,
};
pub use tick::{TickInput, clamp_frame_dt, pointer_input, tick};
