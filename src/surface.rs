/// Software RGBA surface: the single render target every frame is drawn into,
/// and the storage for every loaded image.

use image::RgbaImage;

use crate::entities::Rect;
use crate::mask::{Mask, ALPHA_THRESHOLD};

pub type Rgba = [u8; 4];

// ── Colour palette ────────────────────────────────────────────────────────────

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];
pub const RED: Rgba = [255, 0, 0, 255];
pub const GREEN: Rgba = [0, 255, 0, 255];
/// Fill colour of a missing background.
pub const PLACEHOLDER_GREY: Rgba = [200, 200, 200, 255];

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Surface {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn from_image(img: &RgbaImage) -> Self {
        Surface {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| p.0).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Transparent outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return TRANSPARENT;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize] = color;
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Outline drawn inside `rect`, `thickness` pixels wide.
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba, thickness: i32) {
        let t = thickness.min(rect.w).min(rect.h).max(0);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y, t, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y, t, rect.h), color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        for y in (cy - radius)..=(cy + radius) {
            for x in (cx - radius)..=(cx + radius) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= radius * radius {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Source-over composite of `src` with its top-left at `(x, y)`.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as i32 {
                let dx = x + sx;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let s = src.pixel(sx, sy);
                match s[3] {
                    0 => {}
                    255 => self.put(dx, dy, s),
                    a => {
                        let d = self.pixel(dx, dy);
                        self.put(dx, dy, blend(s, d, a));
                    }
                }
            }
        }
    }

    pub fn flipped_horizontally(&self) -> Surface {
        let mut out = Surface::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                out.put(self.width as i32 - 1 - x, y, self.pixel(x, y));
            }
        }
        out
    }

    /// Opacity mask: pixels with alpha above the threshold are solid.
    pub fn mask(&self) -> Mask {
        let mut mask = Mask::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x as i32, y as i32)[3] > ALPHA_THRESHOLD {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }
}

fn blend(src: Rgba, dst: Rgba, alpha: u8) -> Rgba {
    let a = alpha as u16;
    let channel = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a)) / 255) as u8;
    let out_alpha = a + (dst[3] as u16 * (255 - a)) / 255;
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        out_alpha.min(255) as u8,
    ]
}

/// A drawable image paired with its collision mask.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub image: Surface,
    pub mask: Mask,
}

impl Sprite {
    pub fn new(image: Surface) -> Self {
        let mask = image.mask();
        Sprite { image, mask }
    }

    /// Opaque single-colour sprite; stands in for art in headless runs.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Sprite::new(Surface::filled(width, height, color))
    }
}

/// Two-layer health bar: red background, green proportion, 2px black border.
pub fn draw_health_bar(surface: &mut Surface, bar: Rect, health: f32, max_health: f32) {
    surface.fill_rect(bar, RED);
    let ratio = if max_health > 0.0 { health / max_health } else { 0.0 };
    let filled = (bar.w as f32 * ratio) as i32;
    surface.fill_rect(Rect::new(bar.x, bar.y, filled.max(0), bar.h), GREEN);
    surface.stroke_rect(bar, BLACK, 2);
}
