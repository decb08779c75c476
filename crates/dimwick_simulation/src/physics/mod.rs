//! Headless physics stand-in
//!
//! В игре позицию босса двигает host physics по Velocity.
//! Для headless прогонов и тестов - простая интеграция velocity → Transform.

pub mod movement;

pub use movement::{integrate_velocity, KinematicPlugin};
