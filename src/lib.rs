//! Movement physics for a 2D speed platformer, with the Bevy plugins that run it.

pub mod animation;
pub mod content;
pub mod core;
pub mod level;
pub mod movement;
pub mod physics;
pub mod weapons;
