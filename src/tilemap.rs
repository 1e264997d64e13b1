/// Tile grids and the builder that turns them into solid blocks.

use std::collections::HashMap;

use crate::entities::{Block, Rect};
use crate::surface::Surface;

pub const TILE_WIDTH: u32 = 33;
pub const TILE_HEIGHT: u32 = 56;

pub type TileGrid = Vec<Vec<u32>>;

/// Expand run-length `(tile_id, count)` spans into one grid row.
fn row(spans: &[(u32, usize)]) -> Vec<u32> {
    spans
        .iter()
        .flat_map(|&(id, count)| std::iter::repeat(id).take(count))
        .collect()
}

fn empty_row() -> Vec<u32> {
    vec![0; 25]
}

/// Winter prison: a high ledge on the right, a middle shelf, and the floor.
pub fn level1_grid() -> TileGrid {
    vec![
        empty_row(),
        empty_row(),
        row(&[(2, 1), (3, 1), (0, 17), (15, 6)]),
        empty_row(),
        empty_row(),
        row(&[(0, 6), (15, 11), (0, 8)]),
        empty_row(),
        empty_row(),
        empty_row(),
        row(&[(0, 3), (14, 1), (2, 21)]),
        row(&[(2, 3), (0, 22)]),
    ]
}

/// Red sky: a single long floor.
pub fn level2_grid() -> TileGrid {
    let mut grid: TileGrid = (0..9).map(|_| empty_row()).collect();
    grid.push(row(&[(0, 3), (8, 30)]));
    grid.push(row(&[(8, 3), (0, 22)]));
    grid
}

/// Emit one block per nonzero cell at `(col * tile_w, row * tile_h)`.
///
/// Each block's image is its tile composited at the origin of a transparent
/// `tile_w × tile_h` surface, so the mask only covers the opaque part of the
/// tile that fits the cell. Unknown IDs are skipped.
pub fn build_blocks(
    grid: &[Vec<u32>],
    tile_w: u32,
    tile_h: u32,
    tiles: &HashMap<u32, Surface>,
) -> Vec<Block> {
    let mut blocks = Vec::new();
    for (row_index, cells) in grid.iter().enumerate() {
        for (col_index, &tile_id) in cells.iter().enumerate() {
            if tile_id == 0 {
                continue;
            }
            let Some(tile) = tiles.get(&tile_id) else {
                log::warn!(
                    "Skipping unknown tile id {} at row {}, col {}",
                    tile_id,
                    row_index,
                    col_index
                );
                continue;
            };
            let mut image = Surface::new(tile_w, tile_h);
            image.blit(tile, 0, 0);
            let mask = image.mask();
            blocks.push(Block {
                rect: Rect::new(
                    col_index as i32 * tile_w as i32,
                    row_index as i32 * tile_h as i32,
                    tile_w as i32,
                    tile_h as i32,
                ),
                image,
                mask,
            });
        }
    }
    blocks
}
