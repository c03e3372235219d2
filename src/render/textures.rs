use raylib::prelude::*;

pub const TEX_SIZE: u32 = 64;

const BRICK_BASE: Color = Color::new(139, 69, 19, 255);
const BRICK_FILL: Color = Color::new(120, 60, 15, 255);
const BRICK_EDGE: Color = Color::new(160, 80, 20, 255);

/// An immutable CPU pixmap, sampled per pixel without touching raylib.
#[derive(Clone, Debug)]
pub struct Pixmap {
    pub w: u32,
    pub h: u32,
    px: Vec<Color>,
}

impl Pixmap {
    pub fn new(w: u32, h: u32, px: Vec<Color>) -> Self {
        assert_eq!(px.len(), (w * h) as usize, "pixmap size mismatch");
        Self { w, h, px }
    }

    /// Coordinates wrap, so any u32 is a valid sample.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Color {
        let xi = (x % self.w) as usize;
        let yi = (y % self.h) as usize;
        self.px[(yi * self.w as usize) + xi]
    }

    fn put(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.w && (y as u32) < self.h {
            self.px[y as usize * self.w as usize + x as usize] = c;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Color) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put(xx, yy, c);
            }
        }
    }

    fn outline_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Color) {
        for xx in x..x + w {
            self.put(xx, y, c);
            self.put(xx, y + h - 1, c);
        }
        for yy in y..y + h {
            self.put(x, yy, c);
            self.put(x + w - 1, yy, c);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureSource {
    Loaded,
    Procedural,
}

/// Wall texture with a procedural fallback; loading never fails.
pub struct TextureManager {
    wall: Pixmap,
    source: TextureSource,
}

impl TextureManager {
    /// Loads `path` and scales it to 64x64. Falls back to bricks (and logs
    /// why) when the file is missing or unreadable.
    pub fn load(path: &str) -> Self {
        match Image::load_image(path) {
            Ok(mut img) => {
                img.resize(TEX_SIZE as i32, TEX_SIZE as i32);
                let data = img.get_image_data().to_vec(); // Vec<Color>
                if data.len() == (TEX_SIZE * TEX_SIZE) as usize {
                    log::info!("loaded wall texture {path}");
                    return Self {
                        wall: Pixmap::new(TEX_SIZE, TEX_SIZE, data),
                        source: TextureSource::Loaded,
                    };
                }
                log::warn!("wall texture {path} has unexpected pixel data, using bricks");
            }
            Err(e) => log::warn!("could not load wall texture {path} ({e:?}), using bricks"),
        }
        Self::procedural()
    }

    pub fn procedural() -> Self {
        Self {
            wall: Self::make_brick_pixmap(TEX_SIZE, TEX_SIZE),
            source: TextureSource::Procedural,
        }
    }

    pub fn wall(&self) -> &Pixmap {
        &self.wall
    }

    pub fn source(&self) -> TextureSource {
        self.source
    }

    /// Running-bond bricks: 16 px courses, every other course shifted half
    /// a brick.
    fn make_brick_pixmap(w: u32, h: u32) -> Pixmap {
        let mut pm = Pixmap::new(w, h, vec![BRICK_BASE; (w * h) as usize]);
        for y in (0..h as i32).step_by(16) {
            let offset = if (y / 16) % 2 == 0 { 32 } else { 0 };
            for x in ((-32 + offset)..(w as i32 + offset)).step_by(32) {
                pm.fill_rect(x, y, 30, 14, BRICK_FILL);
                pm.outline_rect(x, y, 30, 14, BRICK_EDGE);
            }
        }
        pm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_wraps() {
        let pm = Pixmap::new(2, 1, vec![Color::RED, Color::BLUE]);
        assert_eq!(pm.sample(0, 0), Color::RED);
        assert_eq!(pm.sample(3, 7), Color::BLUE);
    }

    #[test]
    fn bricks_have_mortar_fill_and_edges() {
        let tm = TextureManager::procedural();
        let wall = tm.wall();
        assert_eq!((wall.w, wall.h), (64, 64));
        // first course is shifted: a brick starts at x = 0
        assert_eq!(wall.sample(0, 0), BRICK_EDGE);
        assert_eq!(wall.sample(5, 5), BRICK_FILL);
        // mortar gap between courses and between bricks
        assert_eq!(wall.sample(5, 15), BRICK_BASE);
        assert_eq!(wall.sample(30, 5), BRICK_BASE);
        // second course starts at x = -32 / 0 / 32
        assert_eq!(wall.sample(33, 20), BRICK_FILL);
    }

    #[test]
    fn missing_file_falls_back_to_bricks() {
        let tm = TextureManager::load("no/such/texture.png");
        assert_eq!(tm.source(), TextureSource::Procedural);
        assert_eq!(tm.wall().sample(5, 5), BRICK_FILL);
    }
}
