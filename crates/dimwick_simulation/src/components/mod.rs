//! ECS Components для encounter с боссом
//!
//! Организация по доменам:
//! - actor: кто участвует (Boss, Protagonist, Enemy) и Vitality
//! - movement: Velocity (velocity command для host physics)
//! - boss: BossConfig (tunables босса, грузится из JSON)

pub mod actor;
pub mod boss;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use boss::*;
pub use movement::*;
