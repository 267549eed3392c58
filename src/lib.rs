//! Space Blaster, a terminal arcade shooter.
//!
//! The player ship defends against descending waves of enemy ships while
//! both sides trade laser fire.  Collisions are pixel-perfect against the
//! sprites' opacity masks.
//!
//! Core modules:
//! - `entities`: ships, lasers and the fire gate
//! - `collision`: opacity masks and the overlap test
//! - `compute`: the per-frame game loop and session state machine
//! - `display`: framebuffer compositing and terminal presentation
//! - `assets`: PNG sprite loading
//! - `input`, `clock`, `config`, `error`: the plumbing around them

pub mod assets;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;

pub use error::{GameError, Result};
