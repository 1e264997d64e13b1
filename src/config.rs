/// Tuning constants and environment-derived runtime settings.

use std::path::PathBuf;
use std::time::Duration;

// ── Screen ────────────────────────────────────────────────────────────────────

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;

/// Logic rate of a level (updates per second).
pub const FPS: u32 = 60;
/// The menu redraws at half the level rate.
pub const MENU_FPS: u32 = 30;

// ── Actor ─────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: u32 = 70;
pub const PLAYER_HEIGHT: u32 = 70;
pub const PLAYER_VEL: i32 = 5;
pub const PLAYER_MAX_HEALTH: f32 = 10.0;

// ── Delays ────────────────────────────────────────────────────────────────────

/// Pause after a level is won or lost, before control returns to the caller.
pub const OUTCOME_DELAY: Duration = Duration::from_millis(1000);
/// Extra pause between winning level 1 and starting level 2.
pub const LEVEL_TRANSITION_DELAY: Duration = Duration::from_millis(2000);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames (≈133 ms at 60 fps). Covers terminals that never report
/// key releases; OS key-repeat refreshes the key well inside the window.
pub const HOLD_WINDOW: u64 = 8;

pub fn frame_duration(fps: u32) -> Duration {
    Duration::from_secs(1) / fps
}

// ── Runtime settings ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory holding `tiles/`, `Po/` and `using assets/`.
    pub asset_root: PathBuf,
    /// Log file; stderr is unusable while the game owns the terminal.
    pub log_path: PathBuf,
}

impl Settings {
    /// `PANDA_ASSETS` overrides the asset root, `PANDA_LOG` the log file.
    pub fn from_env() -> Self {
        let asset_root = std::env::var_os("PANDA_ASSETS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets"));
        let log_path = std::env::var_os("PANDA_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("panda_platformer.log"));
        Settings {
            asset_root,
            log_path,
        }
    }
}
