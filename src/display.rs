/// Presentation layer: all terminal I/O lives here.
///
/// The game draws into an 800×600 software surface; this module squeezes that
/// surface into the terminal with half-block cells (`▀`: foreground = upper
/// pixel, background = lower pixel) and overlays menu text and banners.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use panda_platformer::config::{HEIGHT, WIDTH};
use panda_platformer::surface::{Rgba, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TEXT: Color = Color::Black;
const C_TEXT_BG: Color = Color::White;
const C_BANNER_WON: Color = Color::Green;
const C_BANNER_LOST: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn to_color(p: Rgba) -> Color {
    Color::Rgb {
        r: p[0],
        g: p[1],
        b: p[2],
    }
}

/// Terminal cell under surface coordinate `(x, y)`.
fn cell_for(x: i32, y: i32, cols: u16, rows: u16) -> (u16, u16) {
    let cx = (x.max(0) as u32 * cols as u32 / WIDTH).min(cols.saturating_sub(1) as u32);
    let cy = (y.max(0) as u32 * rows as u32 / HEIGHT).min(rows.saturating_sub(1) as u32);
    (cx as u16, cy as u16)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Present one complete frame.
pub fn present<W: Write>(out: &mut W, surface: &Surface) -> std::io::Result<()> {
    queue_surface(out, surface)?;
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Menu: background plus option lines placed in surface coordinates.
pub fn draw_menu<W: Write>(
    out: &mut W,
    background: &Surface,
    lines: &[(&str, i32, i32)],
) -> std::io::Result<()> {
    queue_surface(out, background)?;
    let (cols, rows) = terminal::size()?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(style::SetBackgroundColor(C_TEXT_BG))?;
    for &(text, x, y) in lines {
        let (cx, cy) = cell_for(x, y, cols, rows);
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(Print(text))?;
    }
    out.queue(style::ResetColor)?;

    let hint = "← → : Move   SPACE : Jump   A : Attack   ESC : Quit";
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Centered banner over the last presented frame.
pub fn draw_banner<W: Write>(out: &mut W, text: &str, won: bool) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let width = text.chars().count() as u16 + 4;
    let col = (cols / 2).saturating_sub(width / 2);
    let row = (rows / 2).saturating_sub(1);
    let color = if won { C_BANNER_WON } else { C_BANNER_LOST };

    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(style::SetBackgroundColor(color))?;
    let pad = " ".repeat(width as usize);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(&pad))?;
    out.queue(cursor::MoveTo(col, row + 1))?;
    out.queue(Print(format!("  {}  ", text)))?;
    out.queue(cursor::MoveTo(col, row + 2))?;
    out.queue(Print(&pad))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

// ── Surface → cells ───────────────────────────────────────────────────────────

fn queue_surface<W: Write>(out: &mut W, surface: &Surface) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    if cols == 0 || rows == 0 {
        return Ok(());
    }
    let sw = surface.width();
    let sh = surface.height();
    let pixel_rows = rows as u32 * 2;

    let mut last: Option<(Rgba, Rgba)> = None;
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        let top_y = (row as u32 * 2 * sh / pixel_rows) as i32;
        let bottom_y = ((row as u32 * 2 + 1) * sh / pixel_rows) as i32;
        for col in 0..cols {
            let x = (col as u32 * sw / cols as u32) as i32;
            let pair = (surface.pixel(x, top_y), surface.pixel(x, bottom_y));
            if last != Some(pair) {
                out.queue(style::SetForegroundColor(to_color(pair.0)))?;
                out.queue(style::SetBackgroundColor(to_color(pair.1)))?;
                last = Some(pair);
            }
            out.queue(Print('▀'))?;
        }
    }
    Ok(())
}
