//! Top-down overlay: maze, remaining coins and the player's heading.
use raylib::prelude::*;

use crate::core::maze::Cell;
use crate::core::player::Player;
use crate::core::world::World;
use crate::render::draw::DrawCommand;

pub const MINIMAP_PADDING: i32 = 20;
const ALPHA: u8 = 128;

#[inline]
fn translucent(c: Color) -> Color {
    Color::new(c.r, c.g, c.b, ALPHA)
}

/// Minimap of side `size` pixels anchored to the top-right of a
/// `screen_width`-wide frame.
pub fn render_minimap(world: &World, player: &Player, size: u32, screen_width: u32) -> Vec<DrawCommand> {
    let cell = (size as usize / world.size()).max(1) as i32;
    let ox = screen_width as i32 - size as i32 - MINIMAP_PADDING;
    let oy = MINIMAP_PADDING;
    let size = size as i32;

    let mut out = vec![DrawCommand::Rect {
        x: ox,
        y: oy,
        width: size,
        height: size,
        color: translucent(Color::BLACK),
    }];

    for ((x, y), c) in world.maze().iter() {
        let (x, y, width, height) = (ox + x as i32 * cell, oy + y as i32 * cell, cell, cell);
        out.push(match c {
            Cell::Wall => DrawCommand::Rect { x, y, width, height, color: translucent(Color::WHITE) },
            Cell::Start => DrawCommand::Rect { x, y, width, height, color: translucent(Color::GREEN) },
            Cell::Finish => DrawCommand::Rect { x, y, width, height, color: translucent(Color::RED) },
            Cell::Path => DrawCommand::Outline { x, y, width, height, color: translucent(Color::GRAY) },
        });
    }

    for &(x, y) in world.coins() {
        out.push(DrawCommand::Circle {
            cx: ox + x as i32 * cell + cell / 2,
            cy: oy + y as i32 * cell + cell / 2,
            radius: cell / 4,
            color: translucent(Color::YELLOW),
        });
    }

    let px = ox + (player.pos.x * cell as f32) as i32;
    let py = oy + (player.pos.y * cell as f32) as i32;
    let blue = translucent(Color::BLUE);
    out.push(DrawCommand::Circle { cx: px, cy: py, radius: cell / 3, color: blue });
    out.push(DrawCommand::Line {
        x0: px,
        y0: py,
        x1: px + (player.angle.cos() * cell as f32) as i32,
        y1: py + (player.angle.sin() * cell as f32) as i32,
        color: blue,
    });
    out
}
