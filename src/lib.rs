//! d20roll - Renders a tabletop d20 dice roll as a looping animated GIF
//!
//! This library provides functionality to:
//! - Slice sprite sheet images into individually addressable frames
//! - Drive sprites along waypoint paths with per-segment frame timing
//! - Composite layered, windowed renderers over a background scene
//! - Encode the finished frames as an infinitely looping GIF

pub mod animation;
pub mod blend;
pub mod cli;
pub mod gif;
pub mod motion;
pub mod renderer;
pub mod spritesheet;
pub mod transform;
