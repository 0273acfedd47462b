//! Player locomotion: controller, its injected services, and the scheduler
//! that drives it.
//!
//! The controller is engine-agnostic. It talks to the world only through the
//! `PhysicsBody`, `AnimationDriver` and `InputSource` traits and receives
//! `ContactEvent`s from whoever runs the physics.
//!
//! # Example:
//!
//! ```
//! use skyhop::player::*;
//! use bevy::math::Vec3;
//!
//! let body = KinematicBody::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.4, 0.9, 0.4));
//! let mut controller = LocomotionController::new(
//!     LocomotionConfig::default(),
//!     body,
//!     AnimatorParams::new(),
//!     InputSnapshot::new(),
//! );
//! let mut scheduler = Scheduler::default();
//! scheduler.advance(&mut controller, 1.0 / 60.0);
//! ```
pub mod animation;
pub mod body;
pub mod config;
pub mod contact;
pub mod controller;
pub mod input;
pub mod kinematic;
pub mod schedule;

pub use animation::*;
pub use body::*;
pub use config::*;
pub use contact::*;
pub use controller::*;
pub use input::*;
pub use kinematic::*;
pub use schedule::*;
