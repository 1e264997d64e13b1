/// Game entity types: plain data plus rect geometry.

use crate::config::{PLAYER_HEIGHT, PLAYER_MAX_HEALTH, PLAYER_WIDTH};
use crate::mask::Mask;
use crate::surface::Surface;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Integer axis-aligned rectangle with top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Move so the bottom edge sits at `y`.
    pub fn set_bottom(&mut self, y: i32) {
        self.y = y - self.h;
    }

    pub fn set_top(&mut self, y: i32) {
        self.y = y;
    }

    /// Strict overlap; touching edges and empty rects never collide.
    pub fn colliderect(&self, other: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && other.w > 0
            && other.h > 0
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow by `dw`/`dh` in total, keeping the centre in place.
    pub fn inflate(&self, dw: i32, dh: i32) -> Rect {
        Rect {
            x: self.x - dw / 2,
            y: self.y - dh / 2,
            w: self.w + dw,
            h: self.h + dh,
        }
    }
}

// ── Actor ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub x_vel: i32,
    pub y_vel: f32,
    pub facing: Facing,
    /// Jumps used since last landing (0..=2).
    pub jump_count: u8,
    /// Frames since last grounded; drives the gravity ramp.
    pub fall_count: u32,
    pub health: f32,
    pub max_health: f32,
    pub is_attacking: bool,
    pub attack_frame_index: usize,
    pub attack_timer: u32,
    pub attack_cooldown: u32,
    /// Sprite shown this frame: `None` = idle, `Some(i)` = attack frame `i`.
    pub sprite_frame: Option<usize>,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Player {
            rect: Rect::new(x, y, PLAYER_WIDTH as i32, PLAYER_HEIGHT as i32),
            x_vel: 0,
            y_vel: 0.0,
            facing: Facing::Right,
            jump_count: 0,
            fall_count: 0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            is_attacking: false,
            attack_frame_index: 0,
            attack_timer: 0,
            attack_cooldown: 0,
            sprite_frame: None,
        }
    }
}

// ── Static level pieces ───────────────────────────────────────────────────────

/// One solid tile.
#[derive(Clone, Debug)]
pub struct Block {
    pub rect: Rect,
    pub image: Surface,
    pub mask: Mask,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    pub rect: Rect,
    pub collected: bool,
}

impl Key {
    /// Key occupying grid cell `tile` of a `tile_size` grid.
    pub fn at_tile(tile: (i32, i32), tile_size: i32) -> Self {
        Key {
            rect: Rect::new(tile.0 * tile_size, tile.1 * tile_size, tile_size, tile_size),
            collected: false,
        }
    }
}

/// Level exit; opens only once the key is collected.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    pub rect: Rect,
    pub open: bool,
}

impl Gate {
    pub fn new(rect: Rect) -> Self {
        Gate { rect, open: false }
    }
}

// ── Frame input & level status ────────────────────────────────────────────────

/// Input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Edge: true only on the frame the jump key went down.
    pub jump: bool,
    /// Level: true every frame the attack key is held.
    pub attack: bool,
    pub quit: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelStatus {
    Running,
    Won,
    Lost,
    Aborted,
}
