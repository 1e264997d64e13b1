/// Actor physics, block collision and key/gate rules.
///
/// Everything here mutates the actor (or key/gate) in place and is fully
/// deterministic: no clocks, no I/O. The level driver calls these once per
/// logic frame in a fixed order.

use crate::config::PLAYER_VEL;
use crate::entities::{Block, Facing, FrameInput, Gate, Key, Player, Rect};
use crate::mask::{collide_mask, Mask};

pub const GRAVITY: f32 = 1.0;
pub const MAX_JUMPS: u8 = 2;

/// Frames before an attack can be started again.
pub const ATTACK_COOLDOWN: u32 = 30;
/// Engine ticks each attack animation frame is held for.
pub const ATTACK_SPEED: u32 = 5;
pub const ATTACK_FRAMES: usize = 4;

// ── Input-driven transitions ──────────────────────────────────────────────────

pub fn move_left(player: &mut Player, vel: i32) {
    player.x_vel = -vel;
    player.facing = Facing::Left;
}

pub fn move_right(player: &mut Player, vel: i32) {
    player.x_vel = vel;
    player.facing = Facing::Right;
}

/// One ground jump plus one air jump; further presses are ignored.
pub fn jump(player: &mut Player) {
    if player.jump_count < MAX_JUMPS {
        player.y_vel = -GRAVITY * 8.0;
        player.jump_count += 1;
    }
}

pub fn landed(player: &mut Player) {
    player.y_vel = 0.0;
    player.jump_count = 0;
    player.fall_count = 0;
}

pub fn hit_head(player: &mut Player) {
    player.y_vel = 0.0;
}

/// Start the attack animation unless the cooldown is still running.
pub fn attack(player: &mut Player) {
    if player.attack_cooldown == 0 {
        player.is_attacking = true;
        player.attack_frame_index = 0;
        player.attack_timer = 0;
        player.attack_cooldown = ATTACK_COOLDOWN;
    }
}

pub fn stop_attack(player: &mut Player) {
    player.is_attacking = false;
    player.attack_frame_index = 0;
    player.attack_timer = 0;
}

/// Map one frame of input onto the actor. Right wins over left when both are
/// held because it is applied second.
pub fn apply_input(player: &mut Player, input: &FrameInput) {
    player.x_vel = 0;
    if input.left {
        move_left(player, PLAYER_VEL);
    }
    if input.right {
        move_right(player, PLAYER_VEL);
    }
    if input.jump {
        jump(player);
    }
    if input.attack {
        attack(player);
    } else {
        stop_attack(player);
    }
}

// ── Per-frame physics ─────────────────────────────────────────────────────────

/// Ramped gravity increment for the current fall counter, capped at 1/frame.
pub fn gravity_step(fall_count: u32, fps: u32) -> f32 {
    ((fall_count as f32 / fps as f32) * GRAVITY).min(1.0)
}

/// Advance the actor by one frame. Movement is applied before any collision
/// test, so fast falls can tunnel through thin blocks.
pub fn player_loop(player: &mut Player, fps: u32) {
    player.y_vel += gravity_step(player.fall_count, fps);
    player.rect.x += player.x_vel;
    player.rect.y = (player.rect.y as f32 + player.y_vel) as i32;
    player.fall_count += 1;
    if player.attack_cooldown > 0 {
        player.attack_cooldown -= 1;
    }
    update_sprite(player);
}

fn update_sprite(player: &mut Player) {
    if !player.is_attacking {
        player.sprite_frame = None;
        return;
    }
    player.sprite_frame = Some(player.attack_frame_index);
    player.attack_timer += 1;
    if player.attack_timer >= ATTACK_SPEED {
        player.attack_timer = 0;
        player.attack_frame_index = (player.attack_frame_index + 1) % ATTACK_FRAMES;
    }
}

/// Strike zone in front of the actor while the attack animation runs.
pub fn attack_rect(player: &Player) -> Option<Rect> {
    if player.is_attacking {
        Some(Rect::new(player.rect.x + 40, player.rect.y, 50, 80))
    } else {
        None
    }
}

/// Vertical-only post-correction against every block whose mask overlaps the
/// actor's mask. Horizontal overlap is left unresolved.
pub fn resolve_block_collisions(player: &mut Player, player_mask: &Mask, blocks: &[Block]) {
    for block in blocks {
        if !collide_mask(&player.rect, player_mask, &block.rect, &block.mask) {
            continue;
        }
        if player.y_vel > 0.0 {
            player.rect.set_bottom(block.rect.y);
            landed(player);
        } else if player.y_vel < 0.0 {
            player.rect.set_top(block.rect.bottom());
            hit_head(player);
        }
    }
}

/// Subtract `amount`, clamping at zero.
pub fn damage_player(player: &mut Player, amount: f32) {
    player.health = (player.health - amount).clamp(0.0, player.max_health);
}

pub fn restore_health(player: &mut Player) {
    player.health = player.max_health;
}

// ── Key & gate ────────────────────────────────────────────────────────────────

/// Collect the key on first overlap. Returns the (monotonic) collected flag.
pub fn check_key_collision(key: &mut Key, player_rect: &Rect) -> bool {
    if !key.collected && player_rect.colliderect(&key.rect) {
        key.collected = true;
    }
    key.collected
}

/// Open the gate on overlap once the key is held. Returns the open flag.
pub fn check_gate(gate: &mut Gate, key: &Key, player_rect: &Rect) -> bool {
    if !gate.open && key.collected && player_rect.colliderect(&gate.rect) {
        gate.open = true;
    }
    gate.open
}

/// Exit condition: gate open and the actor standing in it this frame.
pub fn level_complete(gate: &Gate, player_rect: &Rect) -> bool {
    gate.open && player_rect.colliderect(&gate.rect)
}
