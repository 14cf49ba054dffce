//! The AI-controlled character: body plus abilities
//!
//! The brain engine treats the character as an external collaborator: it
//! reads the body and issues commands into abilities, while the host
//! simulation owns integration (movement, shots, reload timers).

pub mod abilities;
pub mod body;

pub use abilities::{Abilities, AimControl, Locomotion, WeaponMount};
pub use body::{Body, Vitality};
