/// Level layouts and the per-frame level driver.
///
/// A `LevelState` owns everything one level needs: actor, blocks, hostiles,
/// key, optional gate and art. `step` advances one logic frame; `draw` paints
/// the whole scene. Nothing survives from one level to the next.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::assets::{
    load_background, load_image, placeholder_tile_table, ActorSkin, SHARED_FOLDER,
};
use crate::compute::{
    apply_input, attack_rect, check_gate, check_key_collision, level_complete, player_loop,
    resolve_block_collisions,
};
use crate::config::{FPS, HEIGHT, PLAYER_HEIGHT, WIDTH};
use crate::entities::{Block, FrameInput, Gate, Key, LevelStatus, Player, Rect};
use crate::hostiles::{
    Hostile, PatrolBoss, PatrolMelee, ProximityBoss, Turret, PATROL_HEIGHT, PATROL_WIDTH,
};
use crate::surface::{draw_health_bar, Rgba, Sprite, Surface, BLACK, PLACEHOLDER_GREY};
use crate::tilemap::{build_blocks, level1_grid, level2_grid, TileGrid, TILE_HEIGHT, TILE_WIDTH};

const KEY_SIZE: i32 = 32;
const GATE_IMAGE_SIZE: u32 = 200;

const PLACEHOLDER_TILE: Rgba = [150, 150, 150, 255];
const PLACEHOLDER_ACTOR: Rgba = [255, 255, 255, 255];
const PLACEHOLDER_HOSTILE: Rgba = [160, 40, 40, 255];
const PLACEHOLDER_KEY: Rgba = [240, 200, 40, 255];
const PLACEHOLDER_GATE_CLOSED: Rgba = [90, 60, 40, 255];
const PLACEHOLDER_GATE_OPEN: Rgba = [60, 160, 60, 255];

// ── Layouts ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostileSpawn {
    PatrolMelee { x: i32, y: i32 },
    ProximityBoss { x: f32, y: f32 },
    PatrolBoss { x: f32, y: f32 },
    Turret { x: i32, y: i32 },
}

impl HostileSpawn {
    pub fn load(&self, root: &Path, now: Duration) -> Result<Hostile> {
        Ok(match *self {
            HostileSpawn::PatrolMelee { x, y } => Hostile::PatrolMelee(PatrolMelee::load(root, x, y)?),
            HostileSpawn::ProximityBoss { x, y } => {
                Hostile::ProximityBoss(ProximityBoss::load(root, x, y)?)
            }
            HostileSpawn::PatrolBoss { x, y } => Hostile::PatrolBoss(PatrolBoss::load(root, x, y)?),
            HostileSpawn::Turret { x, y } => Hostile::Turret(Turret::load(root, x, y, now)?),
        })
    }

    /// Same behaviour, flat-coloured art.
    pub fn placeholder(&self, now: Duration) -> Hostile {
        let frames = |w: u32, h: u32, n: usize| vec![Surface::filled(w, h, PLACEHOLDER_HOSTILE); n];
        match *self {
            HostileSpawn::PatrolMelee { x, y } => Hostile::PatrolMelee(PatrolMelee::new(
                x,
                y,
                frames(PATROL_WIDTH as u32, PATROL_HEIGHT as u32, 6),
            )),
            HostileSpawn::ProximityBoss { x, y } => {
                Hostile::ProximityBoss(ProximityBoss::new(x, y, frames(85, 155, 6)))
            }
            HostileSpawn::PatrolBoss { x, y } => {
                Hostile::PatrolBoss(PatrolBoss::new(x, y, frames(60, 50, 2)))
            }
            HostileSpawn::Turret { x, y } => Hostile::Turret(Turret::new(
                x,
                y,
                Surface::filled(50, 50, PLACEHOLDER_HOSTILE),
                now,
            )),
        }
    }
}

/// Static description of a level; cheap to build, holds no art.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub name: &'static str,
    pub background: &'static str,
    pub grid: TileGrid,
    pub tile_width: u32,
    pub tile_height: u32,
    pub player_spawn: (i32, i32),
    pub hostiles: Vec<HostileSpawn>,
    pub key_tile: (i32, i32),
    pub gate: Option<Rect>,
}

/// Winter prison: proximity boss on the floor, patrol boss on the shelf, and a
/// gate on the high ledge.
pub fn level1() -> LevelLayout {
    let h = HEIGHT as i32;
    let ph = PLAYER_HEIGHT as i32;
    LevelLayout {
        name: "Winter Prison",
        background: "winter_bg.png",
        grid: level1_grid(),
        tile_width: TILE_WIDTH,
        tile_height: TILE_HEIGHT,
        player_spawn: (10, h - ph - 64),
        hostiles: vec![
            HostileSpawn::ProximityBoss {
                x: 150.0,
                y: (h - ph - 120) as f32,
            },
            HostileSpawn::PatrolBoss {
                x: 400.0,
                y: (h - ph - 285) as f32,
            },
        ],
        key_tile: (10, 8),
        gate: Some(Rect::new(630, h - 670, 80, 120)),
    }
}

/// Red sky: a melee roamer and a turret. There is no gate; the level ends
/// only when the actor dies or the player quits.
pub fn level2() -> LevelLayout {
    let h = HEIGHT as i32;
    let ph = PLAYER_HEIGHT as i32;
    LevelLayout {
        name: "Red Sky",
        background: "red_sky.jpg",
        grid: level2_grid(),
        tile_width: TILE_WIDTH,
        tile_height: TILE_HEIGHT,
        player_spawn: (50, h - ph - 64),
        hostiles: vec![
            HostileSpawn::PatrolMelee { x: 300, y: h - ph - 180 },
            HostileSpawn::Turret { x: 650, y: h - 200 },
        ],
        key_tile: (5, 7),
        gate: None,
    }
}

// ── Art ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LevelArt {
    pub background: Surface,
    pub skin: ActorSkin,
    pub key: Surface,
    pub gate_closed: Surface,
    pub gate_open: Surface,
}

impl LevelArt {
    pub fn load(root: &Path, layout: &LevelLayout) -> Result<Self> {
        let gate_size = Some((GATE_IMAGE_SIZE, GATE_IMAGE_SIZE));
        Ok(LevelArt {
            background: load_background(root, SHARED_FOLDER, layout.background),
            skin: ActorSkin::load(root)?,
            key: load_image(
                root,
                SHARED_FOLDER,
                "KEY.png",
                Some((KEY_SIZE as u32, KEY_SIZE as u32)),
            )?,
            gate_closed: load_image(root, SHARED_FOLDER, "prison_house.png", gate_size)?,
            gate_open: load_image(root, SHARED_FOLDER, "prison_door-opened.png", gate_size)?,
        })
    }

    pub fn placeholder() -> Self {
        LevelArt {
            background: Surface::filled(WIDTH, HEIGHT, PLACEHOLDER_GREY),
            skin: ActorSkin::placeholder(PLACEHOLDER_ACTOR),
            key: Surface::filled(KEY_SIZE as u32, KEY_SIZE as u32, PLACEHOLDER_KEY),
            gate_closed: Surface::filled(GATE_IMAGE_SIZE, GATE_IMAGE_SIZE, PLACEHOLDER_GATE_CLOSED),
            gate_open: Surface::filled(GATE_IMAGE_SIZE, GATE_IMAGE_SIZE, PLACEHOLDER_GATE_OPEN),
        }
    }
}

// ── Level state ───────────────────────────────────────────────────────────────

pub struct LevelState {
    pub name: &'static str,
    pub player: Player,
    pub blocks: Vec<Block>,
    pub hostiles: Vec<Hostile>,
    pub key: Key,
    pub gate: Option<Gate>,
    pub status: LevelStatus,
    /// Logic frames simulated so far.
    pub frame: u64,
    art: LevelArt,
}

impl LevelState {
    pub fn new(layout: &LevelLayout, art: LevelArt, blocks: Vec<Block>, hostiles: Vec<Hostile>) -> Self {
        LevelState {
            name: layout.name,
            player: Player::new(layout.player_spawn.0, layout.player_spawn.1),
            blocks,
            hostiles,
            key: Key::at_tile(layout.key_tile, KEY_SIZE),
            gate: layout.gate.map(Gate::new),
            status: LevelStatus::Running,
            frame: 0,
            art,
        }
    }

    /// Load all art for `layout`. Missing backgrounds degrade to a placeholder;
    /// any other missing asset is an error.
    pub fn load(
        layout: &LevelLayout,
        root: &Path,
        tiles: &HashMap<u32, Surface>,
        now: Duration,
    ) -> Result<Self> {
        let art = LevelArt::load(root, layout)
            .with_context(|| format!("loading art for level '{}'", layout.name))?;
        let blocks = build_blocks(&layout.grid, layout.tile_width, layout.tile_height, tiles);
        let hostiles = layout
            .hostiles
            .iter()
            .map(|spawn| spawn.load(root, now))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("loading hostiles for level '{}'", layout.name))?;
        log::info!(
            "Level '{}' loaded: {} blocks, {} hostiles",
            layout.name,
            blocks.len(),
            hostiles.len()
        );
        Ok(Self::new(layout, art, blocks, hostiles))
    }

    /// Flat-coloured stand-ins for every image; the simulation is identical.
    pub fn with_placeholder_art(layout: &LevelLayout, now: Duration) -> Self {
        let tiles = placeholder_tile_table(layout.tile_width, layout.tile_height, PLACEHOLDER_TILE);
        let blocks = build_blocks(&layout.grid, layout.tile_width, layout.tile_height, &tiles);
        let hostiles = layout.hostiles.iter().map(|s| s.placeholder(now)).collect();
        Self::new(layout, LevelArt::placeholder(), blocks, hostiles)
    }

    /// Mask of the sprite the actor is showing this frame.
    pub fn player_sprite(&self) -> &Sprite {
        self.art.skin.sprite(self.player.sprite_frame)
    }

    /// Advance one logic frame. `now` is wall-clock time since the level
    /// started. Once the level has ended the final status is returned and
    /// nothing moves.
    pub fn step(&mut self, input: &FrameInput, now: Duration) -> LevelStatus {
        if self.status != LevelStatus::Running {
            return self.status;
        }
        if input.quit {
            log::info!("Level '{}' aborted", self.name);
            self.status = LevelStatus::Aborted;
            return self.status;
        }
        self.frame += 1;

        apply_input(&mut self.player, input);
        player_loop(&mut self.player, FPS);
        let mask = &self.art.skin.sprite(self.player.sprite_frame).mask;
        resolve_block_collisions(&mut self.player, mask, &self.blocks);

        let strike = attack_rect(&self.player);
        for hostile in &mut self.hostiles {
            hostile.update(&mut self.player, strike, now);
        }

        if !self.key.collected && check_key_collision(&mut self.key, &self.player.rect) {
            log::info!("Key collected on frame {}", self.frame);
        }
        if let Some(gate) = &mut self.gate {
            let was_open = gate.open;
            if check_gate(gate, &self.key, &self.player.rect) && !was_open {
                log::info!("Gate opened on frame {}", self.frame);
            }
        }

        self.status = if self
            .gate
            .as_ref()
            .is_some_and(|gate| level_complete(gate, &self.player.rect))
        {
            LevelStatus::Won
        } else if self.player.health <= 0.0 {
            LevelStatus::Lost
        } else {
            LevelStatus::Running
        };
        if self.status != LevelStatus::Running {
            log::info!(
                "Level '{}' ended {:?} after {} frames",
                self.name,
                self.status,
                self.frame
            );
        }
        self.status
    }

    /// Paint the full scene; every pixel of `surface` is overwritten.
    pub fn draw(&self, surface: &mut Surface) {
        surface.fill(BLACK);
        surface.blit(&self.art.background, 0, 0);
        for block in &self.blocks {
            surface.blit(&block.image, block.rect.x, block.rect.y);
        }

        let rect = self.player.rect;
        surface.blit(&self.player_sprite().image, rect.x, rect.y);
        let bar = Rect::new(rect.x, rect.y - 15, 100, 10);
        draw_health_bar(surface, bar, self.player.health, self.player.max_health);

        for hostile in &self.hostiles {
            hostile.draw(surface);
        }
        if !self.key.collected {
            surface.blit(&self.art.key, self.key.rect.x, self.key.rect.y);
        }
        if let Some(gate) = &self.gate {
            let image = if gate.open {
                &self.art.gate_open
            } else {
                &self.art.gate_closed
            };
            surface.blit(image, gate.rect.x, gate.rect.y);
        }
    }
}
