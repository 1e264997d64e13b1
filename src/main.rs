mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use panda_platformer::assets::{load_background, load_tile_table, SHARED_FOLDER};
use panda_platformer::config::{
    frame_duration, Settings, FPS, HEIGHT, LEVEL_TRANSITION_DELAY, MENU_FPS, OUTCOME_DELAY, WIDTH,
};
use panda_platformer::entities::LevelStatus;
use panda_platformer::input::{is_quit, InputTracker};
use panda_platformer::level::{level1, level2, LevelLayout, LevelState};
use panda_platformer::surface::Surface;

// ── Rendering context ─────────────────────────────────────────────────────────

/// Everything shared by the menu and the levels: created once at start-up,
/// torn down (terminal restored) on every exit path.
struct RenderContext<W: Write> {
    out: W,
    frame: Surface,
    menu_bg: Surface,
    tiles: HashMap<u32, Surface>,
    settings: Settings,
    /// Key releases are reported; held keys need no hold window.
    release_events: bool,
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuChoice {
    Start,
    Settings,
    Exit,
}

const MENU_LINES: &[(&str, i32, i32)] = &[
    ("Kung Fu Game", 250, 150),
    ("1. Start Game", 230, 230),
    ("2. Settings", 230, 330),
    ("3. Exit", 230, 430),
];

/// Redraw the menu at `MENU_FPS` until a choice is made.
fn show_menu<W: Write>(ctx: &mut RenderContext<W>) -> std::io::Result<MenuChoice> {
    let frame = frame_duration(MENU_FPS);
    loop {
        let frame_start = Instant::now();
        display::draw_menu(&mut ctx.out, &ctx.menu_bg, MENU_LINES)?;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                modifiers,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Char('1') => return Ok(MenuChoice::Start),
                    KeyCode::Char('2') => return Ok(MenuChoice::Settings),
                    KeyCode::Char('3') => return Ok(MenuChoice::Exit),
                    _ if is_quit(code, modifiers) => return Ok(MenuChoice::Exit),
                    _ => {}
                }
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Level loop ────────────────────────────────────────────────────────────────

/// Play one level to completion at `FPS` logic frames per second.
fn run_level<W: Write>(ctx: &mut RenderContext<W>, layout: &LevelLayout) -> Result<LevelStatus> {
    let started = Instant::now();
    let mut level = LevelState::load(layout, &ctx.settings.asset_root, &ctx.tiles, started.elapsed())?;
    let mut input = InputTracker::new(ctx.release_events);
    let frame = frame_duration(FPS);

    loop {
        let frame_start = Instant::now();

        // Drain all pending input events (non-blocking)
        input.begin_frame();
        while event::poll(Duration::ZERO)? {
            input.record(&event::read()?);
        }

        let status = level.step(&input.snapshot(), started.elapsed());
        if status == LevelStatus::Aborted {
            return Ok(status);
        }

        level.draw(&mut ctx.frame);
        display::present(&mut ctx.out, &ctx.frame)?;

        match status {
            LevelStatus::Won | LevelStatus::Lost => {
                let won = status == LevelStatus::Won;
                let text = if won { "LEVEL COMPLETE" } else { "YOU DIED" };
                display::draw_banner(&mut ctx.out, text, won)?;
                thread::sleep(OUTCOME_DELAY);
                return Ok(status);
            }
            _ => {}
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

/// Level 1, then level 2 after a pause if level 1 was won. Returns `true`
/// when the player asked to quit.
fn play<W: Write>(ctx: &mut RenderContext<W>) -> Result<bool> {
    match run_level(ctx, &level1())? {
        LevelStatus::Aborted => return Ok(true),
        LevelStatus::Won => {}
        _ => return Ok(false),
    }
    thread::sleep(LEVEL_TRANSITION_DELAY);
    Ok(run_level(ctx, &level2())? == LevelStatus::Aborted)
}

fn run<W: Write>(ctx: &mut RenderContext<W>) -> Result<()> {
    loop {
        match show_menu(ctx)? {
            MenuChoice::Exit => return Ok(()),
            MenuChoice::Settings => log::info!("Settings selected (not implemented)."),
            MenuChoice::Start => {
                if play(ctx)? {
                    return Ok(());
                }
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings.log_path)?;
    log::info!(
        "Panda platformer starting ({}x{}, assets at {})",
        WIDTH,
        HEIGHT,
        settings.asset_root.display()
    );

    // Fatal asset problems surface before the terminal is taken over.
    let tiles = load_tile_table(&settings.asset_root)?;
    let menu_bg = load_background(&settings.asset_root, SHARED_FOLDER, "Menu_BG.png");

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events make held-key tracking exact on terminals that
    // support them; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let mut ctx = RenderContext {
        out,
        frame: Surface::new(WIDTH, HEIGHT),
        menu_bg,
        tiles,
        settings,
        release_events: keyboard_enhanced,
    };
    let result = run(&mut ctx);

    // Always restore the terminal
    let out = &mut ctx.out;
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("Exiting with error: {err:#}");
    } else {
        log::info!("Exiting");
    }
    result
}
