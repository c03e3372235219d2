//! Rendering: pure frame/minimap renderers and the CPU rasterizer.
//!
//! Re-exports:
//! - `draw`: Draw commands and the distance-shading law
//! - `render3d`: Strip renderer for walls, sky and floor
//! - `minimap`: Top-down overlay renderer
//! - `framebuffer`: CPU framebuffer that rasterizes draw commands
//! - `textures`: Wall pixmap with a procedural fallback

pub mod draw;
pub mod render3d;
pub mod minimap;
pub mod framebuffer;
pub mod textures;
