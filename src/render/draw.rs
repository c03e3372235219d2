//! Draw commands: what the renderers emit and the framebuffer rasterizes.
use raylib::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle; colours with alpha < 255 are blended.
    Rect { x: i32, y: i32, width: i32, height: i32, color: Color },
    /// One-pixel rectangle outline.
    Outline { x: i32, y: i32, width: i32, height: i32, color: Color },
    /// Wall strip sampled from the wall texture at horizontal coordinate
    /// `tex_u` in [0, 1], darkened by `shade` (255 = full brightness).
    WallColumn { x: i32, y: i32, width: i32, height: i32, tex_u: f32, shade: u8 },
    Circle { cx: i32, cy: i32, radius: i32, color: Color },
    Line { x0: i32, y0: i32, x1: i32, y1: i32, color: Color },
}

/// Linear distance fog: 255 at the eye, black from 17 units on.
#[inline]
pub fn shade_for(distance: f32) -> u8 {
    (255.0 - distance * 15.0).clamp(0.0, 255.0) as u8
}

/// Multiplies a colour by `shade / 255`, keeping alpha.
#[inline]
pub fn darken(c: Color, shade: u8) -> Color {
    let mul = |v: u8| -> u8 { ((v as u16 * shade as u16) / 255) as u8 };
    Color::new(mul(c.r), mul(c.g), mul(c.b), c.a)
}
