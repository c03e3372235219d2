//! First-person maze runner: perfect-maze generation, a fixed-step
//! raycasting renderer and grid collision, glued together by a small
//! Playing/Completed session.

pub mod audio_manager;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
