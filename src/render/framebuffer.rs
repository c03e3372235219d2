//! CPU framebuffer that rasterizes draw commands.
use raylib::prelude::*;
use raylib::core::texture::RaylibTexture2D; // update_texture()

use crate::render::draw::{DrawCommand, darken};
use crate::render::textures::Pixmap;

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub current_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: Color::WHITE,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        let c = self.current_color;
        self.set_pixel_color(x, y, c);
    }

    /// Writes `color`, alpha-blending over what is there when it is translucent.
    #[inline]
    pub fn set_pixel_color(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.color_buffer[idx] = if color.a == 255 {
            color
        } else {
            blend(self.color_buffer[idx], color)
        };
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Color) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: Color) { self.background_color = c; }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width as i32);
        let y1 = (y + height).min(self.height as i32);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_pixel(xx, yy);
            }
        }
    }

    pub fn outline_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let (right, bottom) = (x + width - 1, y + height - 1);
        for xx in x..=right {
            self.set_pixel(xx, y);
            if bottom != y { self.set_pixel(xx, bottom); }
        }
        for yy in (y + 1)..bottom {
            self.set_pixel(x, yy);
            if right != x { self.set_pixel(right, yy); }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, cy + dy);
                }
            }
        }
    }

    /// Bresenham line, endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.set_pixel(x, y);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Stretches one texture column over the strip and darkens it.
    fn wall_column(&mut self, x: i32, y: i32, width: i32, height: i32, tex_u: f32, shade: u8, tex: &Pixmap) {
        if height <= 0 {
            return;
        }
        let tx = ((tex_u * tex.w as f32) as u32).min(tex.w - 1);
        for row in 0..height {
            let ty = (row as u32 * tex.h) / height as u32;
            let color = darken(tex.sample(tx, ty), shade);
            for col in 0..width {
                self.set_pixel_color(x + col, y + row, color);
            }
        }
    }

    /// Rasterizes commands in order. Without a texture, wall columns fall
    /// back to flat grey at the same shade.
    pub fn draw(&mut self, commands: &[DrawCommand], wall: Option<&Pixmap>) {
        for cmd in commands {
            match *cmd {
                DrawCommand::Rect { x, y, width, height, color } => {
                    self.set_current_color(color);
                    self.fill_rect(x, y, width, height);
                }
                DrawCommand::Outline { x, y, width, height, color } => {
                    self.set_current_color(color);
                    self.outline_rect(x, y, width, height);
                }
                DrawCommand::WallColumn { x, y, width, height, tex_u, shade } => match wall {
                    Some(tex) => self.wall_column(x, y, width, height, tex_u, shade, tex),
                    None => {
                        self.set_current_color(Color::new(shade, shade, shade, 255));
                        self.fill_rect(x, y, width, height);
                    }
                },
                DrawCommand::Circle { cx, cy, radius, color } => {
                    self.set_current_color(color);
                    self.fill_circle(cx, cy, radius);
                }
                DrawCommand::Line { x0, y0, x1, y1, color } => {
                    self.set_current_color(color);
                    self.line(x0, y0, x1, y1);
                }
            }
        }
    }

    /// Copies the pixels into a persistent GPU texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        // Color is #[repr(C)] RGBA8, so the buffer can be viewed as bytes
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        let _ = tex.update_texture(bytes);
    }
}

#[inline]
fn blend(dst: Color, src: Color) -> Color {
    let a = src.a as u16;
    let na = 255 - a;
    let mix = |d: u8, s: u8| -> u8 { ((d as u16 * na + s as u16 * a) / 255) as u8 };
    Color::new(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b), 255)
}
