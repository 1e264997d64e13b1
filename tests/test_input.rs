use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use panda_platformer::config::HOLD_WINDOW;
use panda_platformer::input::*;

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

#[test]
fn jump_is_an_edge() {
    let mut input = InputTracker::new(false);
    input.begin_frame();
    input.record(&key(JUMP_KEY, KeyEventKind::Press));
    assert!(input.snapshot().jump);

    // Auto-repeat must not trigger another jump
    input.begin_frame();
    input.record(&key(JUMP_KEY, KeyEventKind::Repeat));
    assert!(!input.snapshot().jump);
}

#[test]
fn held_keys_expire_after_hold_window() {
    let mut input = InputTracker::new(false);
    input.begin_frame();
    input.record(&key(KeyCode::Left, KeyEventKind::Press));
    input.record(&key(ATTACK_KEY, KeyEventKind::Press));
    for _ in 0..HOLD_WINDOW {
        input.begin_frame();
        assert!(input.snapshot().left);
        assert!(input.snapshot().attack);
    }
    input.begin_frame();
    assert!(!input.snapshot().left);
    assert!(!input.snapshot().attack);
}

#[test]
fn release_drops_key_immediately() {
    let mut input = InputTracker::new(false);
    input.begin_frame();
    input.record(&key(KeyCode::Right, KeyEventKind::Press));
    assert!(input.snapshot().right);
    input.record(&key(KeyCode::Right, KeyEventKind::Release));
    assert!(!input.snapshot().right);
}

#[test]
fn repeat_keeps_key_alive() {
    let mut input = InputTracker::new(false);
    input.begin_frame();
    input.record(&key(KeyCode::Left, KeyEventKind::Press));
    for _ in 0..(HOLD_WINDOW * 3) {
        input.begin_frame();
        input.record(&key(KeyCode::Left, KeyEventKind::Repeat));
        assert!(input.snapshot().left);
    }
}

#[test]
fn release_reporting_keeps_key_held_until_release() {
    let mut input = InputTracker::new(true);
    input.begin_frame();
    input.record(&key(KeyCode::Left, KeyEventKind::Press));
    input.record(&key(ATTACK_KEY, KeyEventKind::Press));

    // Silence while the OS waits before auto-repeat
    for frame in 0..30 {
        input.begin_frame();
        assert!(input.snapshot().left, "left dropped after {} frames", frame + 1);
        assert!(input.snapshot().attack);
    }

    input.begin_frame();
    input.record(&key(KeyCode::Left, KeyEventKind::Release));
    assert!(!input.snapshot().left);
    assert!(input.snapshot().attack);
}

#[test]
fn shifted_attack_key_attacks() {
    let mut input = InputTracker::new(false);
    input.begin_frame();
    input.record(&key(ATTACK_KEY_SHIFTED, KeyEventKind::Press));
    assert!(input.snapshot().attack);

    input.record(&key(ATTACK_KEY_SHIFTED, KeyEventKind::Release));
    assert!(!input.snapshot().attack);
}

#[test]
fn quit_keys() {
    assert!(is_quit(KeyCode::Esc, KeyModifiers::NONE));
    assert!(is_quit(KeyCode::Char('q'), KeyModifiers::NONE));
    assert!(is_quit(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!is_quit(KeyCode::Char('c'), KeyModifiers::NONE));
    assert!(!is_quit(ATTACK_KEY, KeyModifiers::NONE));

    let mut input = InputTracker::new(false);
    input.begin_frame();
    input.record(&key(KeyCode::Esc, KeyEventKind::Press));
    assert!(input.snapshot().quit);
}
