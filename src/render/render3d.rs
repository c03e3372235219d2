//! 3D renderer (strips of shaded/textured walls over flat sky and floor).
//!
//! Pure: reads the world and player and returns draw commands, so a frame can
//! be inspected without a window.
use raylib::prelude::*;

use crate::core::player::Player;
use crate::core::world::{HitKind, World};
use crate::render::draw::{DrawCommand, shade_for};

pub const SKY: Color = Color::new(135, 206, 235, 255);
pub const FLOOR: Color = Color::new(128, 128, 128, 255);

/// Keeps the projection finite when standing against a wall.
const PROJ_EPSILON: f32 = 1e-4;

#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub strip_width: u32,
    /// Average each strip's distance with the previous strip's.
    pub smoothing: bool,
    /// Emit textured wall columns instead of flat grey strips.
    pub textured: bool,
}

impl Viewport {
    pub fn strips(&self) -> u32 {
        (self.width / self.strip_width.max(1)).max(1)
    }
}

/// Horizontal texture coordinate of a ray hit, in [0, 1].
///
/// Uses the offset inside the hit cell along the axis perpendicular to the
/// dominant ray direction, mirrored so the texture reads the same way on
/// opposite faces.
pub fn texture_u(x: f32, y: f32, angle: f32, distance: f32) -> f32 {
    let (dx, dy) = (angle.cos(), angle.sin());
    let hit_x = x + dx * distance;
    let hit_y = y + dy * distance;
    if dx.abs() >= dy.abs() {
        let f = hit_y - hit_y.floor();
        if dx > 0.0 { 1.0 - f } else { f }
    } else {
        let f = hit_x - hit_x.floor();
        if dy < 0.0 { 1.0 - f } else { f }
    }
}

/// Projected wall height and top edge for a strip at `distance`.
#[inline]
pub fn project(view_height: f32, distance: f32) -> (f32, f32) {
    let wall_h = (view_height / (distance + PROJ_EPSILON)).min(view_height);
    (wall_h, (view_height - wall_h) / 2.0)
}

pub fn render_frame(world: &World, player: &Player, view: &Viewport) -> Vec<DrawCommand> {
    let w = view.width as i32;
    let h = view.height as f32;
    let half = view.height as i32 / 2;
    let strips = view.strips();

    let mut commands = Vec::with_capacity(strips as usize + 2);
    commands.push(DrawCommand::Rect { x: 0, y: 0, width: w, height: half, color: SKY });
    commands.push(DrawCommand::Rect {
        x: 0,
        y: half,
        width: w,
        height: view.height as i32 - half,
        color: FLOOR,
    });

    let mut prev: Option<f32> = None;
    for i in 0..strips {
        let t = i as f32 / strips as f32;
        let ray_a = player.angle - (player.fov * 0.5) + (player.fov * t);
        let hit = world.cast_ray(player.pos.x, player.pos.y, ray_a);

        let d = match prev {
            Some(p) if view.smoothing => (hit.distance + p) * 0.5,
            _ => hit.distance,
        };
        prev = Some(hit.distance);
        if hit.kind == HitKind::None {
            continue;
        }

        let (wall_h, top) = project(h, d);
        let shade = shade_for(d);
        let x = (i * view.strip_width) as i32;
        let width = view.strip_width as i32;
        let (y, height) = (top as i32, wall_h as i32);

        let command = match hit.kind {
            HitKind::Finish => DrawCommand::Rect { x, y, width, height, color: Color::new(shade, 0, 0, 255) },
            _ if view.textured => DrawCommand::WallColumn {
                x,
                y,
                width,
                height,
                tex_u: texture_u(player.pos.x, player.pos.y, ray_a, hit.distance),
                shade,
            },
            _ => DrawCommand::Rect { x, y, width, height, color: Color::new(shade, shade, shade, 255) },
        };
        commands.push(command);
    }
    commands
}
