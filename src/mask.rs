/// Per-pixel opacity masks and mask-vs-mask collision.

use crate::entities::Rect;

/// Pixels whose alpha is above this value count as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// An all-clear mask.
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// An all-solid mask, the shape of a fully opaque sprite.
    pub fn filled(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, solid: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = solid;
        }
    }

    /// Number of solid pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// True if `other`, placed at `offset` relative to this mask's origin,
    /// shares at least one solid pixel with this mask.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return true;
                }
            }
        }
        false
    }
}

/// Mask collision between two positioned masks.
pub fn collide_mask(a_rect: &Rect, a: &Mask, b_rect: &Rect, b: &Mask) -> bool {
    a.overlaps(b, (b_rect.x - a_rect.x, b_rect.y - a_rect.y))
}
