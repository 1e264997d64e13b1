/// Image loading: single images, sprite sheets, the tile table, and
/// backgrounds that degrade to a placeholder when missing.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::config::{HEIGHT, PLAYER_HEIGHT, PLAYER_WIDTH, WIDTH};
use crate::surface::{Rgba, Sprite, Surface, PLACEHOLDER_GREY};

/// Folder holding every character sheet, background and UI image.
pub const SHARED_FOLDER: &str = "using assets";

fn open_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Load `<root>/<folder>/<name>`, optionally smooth-scaled to `scale_to`.
pub fn load_image(
    root: &Path,
    folder: &str,
    name: &str,
    scale_to: Option<(u32, u32)>,
) -> Result<Surface> {
    let img = open_rgba(&root.join(folder).join(name))?;
    let img = match scale_to {
        Some((w, h)) => imageops::resize(&img, w, h, FilterType::Triangle),
        None => img,
    };
    Ok(Surface::from_image(&img))
}

/// Slice a horizontal strip of `frame_count` equal frames and scale each.
pub fn load_frames(
    root: &Path,
    folder: &str,
    filename: &str,
    frame_count: u32,
    scale: (u32, u32),
) -> Result<Vec<Surface>> {
    let sheet = open_rgba(&root.join(folder).join(filename))?;
    let frame_width = sheet.width() / frame_count;
    if frame_width == 0 {
        anyhow::bail!(
            "sprite sheet {} is narrower than {} frames",
            filename,
            frame_count
        );
    }
    Ok((0..frame_count)
        .map(|i| {
            let frame = imageops::crop_imm(&sheet, i * frame_width, 0, frame_width, sheet.height())
                .to_image();
            Surface::from_image(&imageops::resize(&frame, scale.0, scale.1, FilterType::Nearest))
        })
        .collect())
}

/// Load a full-window background. A missing or unreadable file is not fatal:
/// it is logged and replaced by a solid grey surface of window size.
pub fn load_background(root: &Path, folder: &str, name: &str) -> Surface {
    let path = root.join(folder).join(name);
    if !path.exists() {
        log::warn!("Missing image: {}", path.display());
        return Surface::filled(WIDTH, HEIGHT, PLACEHOLDER_GREY);
    }
    match load_image(root, folder, name, Some((WIDTH, HEIGHT))) {
        Ok(surface) => surface,
        Err(err) => {
            log::warn!("Unreadable background {}: {err:#}", path.display());
            Surface::filled(WIDTH, HEIGHT, PLACEHOLDER_GREY)
        }
    }
}

/// Tile ID → file under `tiles/`.
pub const TILE_FILES: &[(u32, &str)] = &[
    (1, "1.png"),
    (2, "2.png"),
    (3, "3.png"),
    (5, "5.png"),
    (8, "red_tiles.png"),
    (7, "black_tiles.JPG"),
    (14, "14.png"),
    (15, "15.png"),
    (16, "16.png"),
];

/// Tile ID → unscaled tile image.
pub fn load_tile_table(root: &Path) -> Result<HashMap<u32, Surface>> {
    let mut table = HashMap::new();
    for &(id, name) in TILE_FILES {
        table.insert(id, load_image(root, "tiles", name, None)?);
    }
    log::debug!("Loaded {} tile images", table.len());
    Ok(table)
}

/// Same IDs as [`load_tile_table`], each an opaque block of the given size.
pub fn placeholder_tile_table(width: u32, height: u32, color: Rgba) -> HashMap<u32, Surface> {
    TILE_FILES
        .iter()
        .map(|&(id, _)| (id, Surface::filled(width, height, color)))
        .collect()
}

// ── Actor art ─────────────────────────────────────────────────────────────────

/// Idle pose plus the attack cycle; every sprite carries its own mask so
/// collision follows the frame currently shown.
#[derive(Clone, Debug)]
pub struct ActorSkin {
    pub idle: Sprite,
    pub attack: Vec<Sprite>,
}

impl ActorSkin {
    pub fn load(root: &Path) -> Result<Self> {
        let size = Some((PLAYER_WIDTH, PLAYER_HEIGHT));
        let idle = Sprite::new(load_image(root, "Po", "idle.png", size)?);
        let attack = (1..=4)
            .map(|i| load_image(root, "Po", &format!("attack{i}.png"), size).map(Sprite::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(ActorSkin { idle, attack })
    }

    /// Opaque rectangles in place of the real art.
    pub fn placeholder(color: Rgba) -> Self {
        let sprite = Sprite::solid(PLAYER_WIDTH, PLAYER_HEIGHT, color);
        ActorSkin {
            idle: sprite.clone(),
            attack: vec![sprite; 4],
        }
    }

    /// Sprite for `frame` (`None` = idle); out-of-range frames fall back to idle.
    pub fn sprite(&self, frame: Option<usize>) -> &Sprite {
        frame
            .and_then(|i| self.attack.get(i))
            .unwrap_or(&self.idle)
    }
}
