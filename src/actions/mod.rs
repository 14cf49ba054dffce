//! Stock per-tick effects
//!
//! Every action recomputes its command each tick and explicitly zeroes
//! anything it commanded in its own exit hook - the engine never clears
//! commands on its behalf.

pub mod aim;
pub mod idle;
pub mod movement;
pub mod patrol;
pub mod reload;
pub mod shoot;

pub use aim::AimAtTarget;
pub use idle::{HoldPosition, Wander};
pub use movement::{ChaseTarget, FleeFromTarget};
pub use patrol::Patrol;
pub use reload::ReloadIfEmpty;
pub use shoot::FireAtTarget;
