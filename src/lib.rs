//! Particle Network Background Library
//!
//! A drifting field of points joined by distance-faded edges, drawn behind
//! a page's content. Exposes the simulation for testing and reuse outside
//! the bundled bevy host.

pub mod error;
pub mod render;
pub mod resources;
pub mod simulation;
