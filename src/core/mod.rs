//! Core game types and logic (grid, world queries, movement, session).
//!
//! Re-exports:
//! - `maze`: Cell grid and perfect-maze generation
//! - `world`: Coins, collision queries and ray marching
//! - `player`: Player state and collision-checked movement
//! - `input`: Per-tick input intents
//! - `process_events`: Raylib polling into input intents
//! - `session`: Playing/Completed state machine

pub mod maze;
pub mod world;
pub mod player;
pub mod input;
pub mod process_events;
pub mod session;
