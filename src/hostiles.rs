/// Hostile entities: a patrolling melee roamer, a proximity boss that switches
/// between walking and attacking, a patrolling boss, and a stationary turret
/// that fires projectiles.
///
/// All variants share one per-frame contract, dispatched by [`Hostile`]:
/// `advance` (movement, animation, firing), `take_damage` (from the actor's
/// attack rect), `attack` (damage dealt to the actor) and `draw`.
///
/// Two clocks coexist here. Animation and movement count logic frames; the
/// turret's fire rate is measured in wall-clock time passed in as `now`.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use crate::assets::{load_frames, load_image, SHARED_FOLDER};
use crate::compute::{damage_player, restore_health};
use crate::config::WIDTH;
use crate::entities::{Player, Rect};
use crate::surface::{draw_health_bar, Surface, BLACK};

fn blit_frame(surface: &mut Surface, frames: &[Surface], index: usize, flip: bool, x: i32, y: i32) {
    let Some(frame) = frames.get(index) else {
        return;
    };
    if flip {
        surface.blit(&frame.flipped_horizontally(), x, y);
    } else {
        surface.blit(frame, x, y);
    }
}

/// Reverse at the patrol bounds.
fn bounce(x: f32, min_x: f32, max_x: f32, direction: i32) -> i32 {
    if x >= max_x {
        -1
    } else if x <= min_x {
        1
    } else {
        direction
    }
}

// ── Patrol melee ──────────────────────────────────────────────────────────────

pub const PATROL_WIDTH: i32 = 68;
pub const PATROL_HEIGHT: i32 = 150;
const PATROL_FRAMES: u32 = 6;
const PATROL_FRAME_DELAY: u32 = 12;
const PATROL_SPEED: i32 = 2;
pub const PATROL_RANGE: i32 = 120;
const PATROL_CONTACT_INFLATE: i32 = 40;
pub const PATROL_CONTACT_DAMAGE: f32 = 0.03;
pub const PATROL_HIT_DAMAGE: f32 = 0.3;
const PATROL_HEALTH: f32 = 8.0;

/// Walks back and forth around its spawn point and hurts the actor on every
/// frame it stands within reach.
#[derive(Clone, Debug)]
pub struct PatrolMelee {
    pub rect: Rect,
    frames: Vec<Surface>,
    pub frame_index: usize,
    frame_timer: u32,
    pub direction: i32,
    pub min_x: i32,
    pub max_x: i32,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
}

impl PatrolMelee {
    pub fn new(x: i32, y: i32, frames: Vec<Surface>) -> Self {
        PatrolMelee {
            rect: Rect::new(x, y, PATROL_WIDTH, PATROL_HEIGHT),
            frames,
            frame_index: 0,
            frame_timer: 0,
            direction: 1,
            min_x: x - PATROL_RANGE,
            max_x: x + PATROL_RANGE,
            health: PATROL_HEALTH,
            max_health: PATROL_HEALTH,
            alive: true,
        }
    }

    pub fn load(root: &Path, x: i32, y: i32) -> Result<Self> {
        let frames = load_frames(
            root,
            SHARED_FOLDER,
            "lordshen.png",
            PATROL_FRAMES,
            (PATROL_WIDTH as u32, PATROL_HEIGHT as u32),
        )?;
        Ok(Self::new(x, y, frames))
    }

    fn animate(&mut self) {
        self.frame_timer += 1;
        if self.frame_timer >= PATROL_FRAME_DELAY {
            self.frame_index = (self.frame_index + 1) % self.frames.len().max(1);
            self.frame_timer = 0;
        }
    }

    fn advance(&mut self) {
        self.animate();
        self.rect.x += PATROL_SPEED * self.direction;
        self.direction = bounce(
            self.rect.x as f32,
            self.min_x as f32,
            self.max_x as f32,
            self.direction,
        );
    }

    fn take_damage(&mut self, attack_rect: &Rect) -> bool {
        if !attack_rect.colliderect(&self.rect) {
            return false;
        }
        self.health -= PATROL_HIT_DAMAGE;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            log::info!("Patrol melee defeated");
        }
        true
    }

    fn attack(&self, player: &mut Player) -> bool {
        let reach = player
            .rect
            .inflate(PATROL_CONTACT_INFLATE, PATROL_CONTACT_INFLATE);
        if self.rect.colliderect(&reach) {
            damage_player(player, PATROL_CONTACT_DAMAGE);
            return true;
        }
        false
    }

    fn draw(&self, surface: &mut Surface) {
        blit_frame(
            surface,
            &self.frames,
            self.frame_index,
            self.direction < 0,
            self.rect.x,
            self.rect.y,
        );
        let bar = Rect::new(self.rect.x, self.rect.y - 10, PATROL_WIDTH, 8);
        draw_health_bar(surface, bar, self.health, self.max_health);
    }
}

// ── Proximity boss ────────────────────────────────────────────────────────────

const BOSS_FRAMES: u32 = 6;
const BOSS_SPRITE: (u32, u32) = (85, 155);
const BOSS_FRAME_DELAY: u32 = 10;
const BOSS_SPEED: f32 = 2.0;
const BOSS_CREEP: f32 = 0.1;
const BOSS_MIN_X: f32 = 150.0;
const BOSS_MAX_X: f32 = 600.0;
pub const BOSS_ATTACK_DISTANCE: i32 = 120;
/// Horizontal offset from `pos.x` used as the boss centre.
const BOSS_CENTER_OFFSET: f32 = 75.0;
pub const BOSS_CONTACT_SIZE: i32 = 90;
pub const BOSS_HITBOX_SIZE: i32 = 100;
pub const BOSS_CONTACT_DAMAGE: f32 = 0.005;
pub const BOSS_HIT_DAMAGE: f32 = 0.2;
const BOSS_HEALTH: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossMode {
    Walk,
    Attack,
}

/// Patrols until the actor comes within `BOSS_ATTACK_DISTANCE`, then stops
/// and creeps toward them. Beating it fully heals the actor.
#[derive(Clone, Debug)]
pub struct ProximityBoss {
    pub pos: (f32, f32),
    frames: Vec<Surface>,
    pub frame_index: usize,
    frame_timer: u32,
    pub direction: i32,
    pub min_x: f32,
    pub max_x: f32,
    pub mode: BossMode,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
}

impl ProximityBoss {
    pub fn new(x: f32, y: f32, frames: Vec<Surface>) -> Self {
        ProximityBoss {
            pos: (x, y),
            frames,
            frame_index: 0,
            frame_timer: 0,
            direction: 1,
            min_x: BOSS_MIN_X,
            max_x: BOSS_MAX_X,
            mode: BossMode::Walk,
            health: BOSS_HEALTH,
            max_health: BOSS_HEALTH,
            alive: true,
        }
    }

    pub fn load(root: &Path, x: f32, y: f32) -> Result<Self> {
        let frames = load_frames(root, SHARED_FOLDER, "TaiLung.png", BOSS_FRAMES, BOSS_SPRITE)?;
        Ok(Self::new(x, y, frames))
    }

    pub fn center_x(&self) -> f32 {
        self.pos.0 + BOSS_CENTER_OFFSET
    }

    /// Hitbox used when the boss hurts the actor.
    pub fn contact_rect(&self) -> Rect {
        Rect::new(
            self.pos.0 as i32,
            self.pos.1 as i32,
            BOSS_CONTACT_SIZE,
            BOSS_CONTACT_SIZE,
        )
    }

    /// Hitbox the actor's attack must reach.
    pub fn damage_rect(&self) -> Rect {
        Rect::new(
            self.pos.0 as i32,
            self.pos.1 as i32,
            BOSS_HITBOX_SIZE,
            BOSS_HITBOX_SIZE,
        )
    }

    fn advance(&mut self, player_rect: &Rect) {
        let player_center = player_rect.center_x() as f32;
        let boss_center = self.center_x();
        let distance = (player_center - boss_center).abs();
        let mode = if distance > BOSS_ATTACK_DISTANCE as f32 {
            BossMode::Walk
        } else {
            BossMode::Attack
        };
        if mode != self.mode {
            log::debug!("Proximity boss switched to {:?}", mode);
            self.mode = mode;
        }

        self.frame_timer += 1;
        if self.frame_timer >= BOSS_FRAME_DELAY {
            self.frame_timer = 0;
            self.frame_index = match self.mode {
                BossMode::Walk => 0,
                BossMode::Attack => (self.frame_index + 1) % self.frames.len().max(1),
            };
        }

        match self.mode {
            BossMode::Walk => {
                self.pos.0 += BOSS_SPEED * self.direction as f32;
                self.direction = bounce(self.pos.0, self.min_x, self.max_x, self.direction);
            }
            BossMode::Attack => {
                if player_center < boss_center {
                    self.pos.0 -= BOSS_CREEP;
                    self.direction = -1;
                } else {
                    self.pos.0 += BOSS_CREEP;
                    self.direction = 1;
                }
            }
        }
    }

    fn take_damage(&mut self, attack_rect: &Rect, player: &mut Player) -> bool {
        if !attack_rect.colliderect(&self.damage_rect()) {
            return false;
        }
        self.health -= BOSS_HIT_DAMAGE;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            restore_health(player);
            log::info!("Proximity boss defeated, actor health restored");
        }
        true
    }

    fn attack(&self, player: &mut Player) -> bool {
        if player.rect.colliderect(&self.contact_rect()) {
            damage_player(player, BOSS_CONTACT_DAMAGE);
            return true;
        }
        false
    }

    fn draw(&self, surface: &mut Surface) {
        let (x, y) = (self.pos.0 as i32, self.pos.1 as i32);
        let flip = self.mode == BossMode::Walk && self.direction < 0;
        blit_frame(surface, &self.frames, self.frame_index, flip, x, y);
        let bar = Rect::new(x + 20, y - 10, 60, 6);
        draw_health_bar(surface, bar, self.health, self.max_health);
    }
}

// ── Patrol boss ───────────────────────────────────────────────────────────────

const WOLF_SIZE: (u32, u32) = (60, 50);
const WOLF_SPEED: f32 = 1.5;
pub const WOLF_CONTACT_DAMAGE: f32 = 0.005;
pub const WOLF_HIT_DAMAGE: f32 = 0.2;
const WOLF_HEALTH: f32 = 8.0;

/// Paces a strip to the left of its spawn point. Its sprite rect doubles as
/// both hitboxes.
#[derive(Clone, Debug)]
pub struct PatrolBoss {
    pub pos: (f32, f32),
    frames: Vec<Surface>,
    pub direction: i32,
    pub min_x: f32,
    pub max_x: f32,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
}

impl PatrolBoss {
    pub fn new(x: f32, y: f32, frames: Vec<Surface>) -> Self {
        PatrolBoss {
            pos: (x, y),
            frames,
            direction: -1,
            min_x: x - 200.0,
            max_x: x - 10.0,
            health: WOLF_HEALTH,
            max_health: WOLF_HEALTH,
            alive: true,
        }
    }

    pub fn load(root: &Path, x: f32, y: f32) -> Result<Self> {
        let frames = load_frames(root, SHARED_FOLDER, "WolfBOSS.png", 2, WOLF_SIZE)?;
        Ok(Self::new(x, y, frames))
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.0 as i32,
            self.pos.1 as i32,
            WOLF_SIZE.0 as i32,
            WOLF_SIZE.1 as i32,
        )
    }

    fn advance(&mut self) {
        self.pos.0 += WOLF_SPEED * self.direction as f32;
        if self.pos.0 <= self.min_x {
            self.direction = 1;
        } else if self.pos.0 >= self.max_x {
            self.direction = -1;
        }
    }

    fn take_damage(&mut self, attack_rect: &Rect) -> bool {
        if !attack_rect.colliderect(&self.rect()) {
            return false;
        }
        self.health -= WOLF_HIT_DAMAGE;
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
            log::info!("Patrol boss defeated");
        }
        true
    }

    fn attack(&self, player: &mut Player) -> bool {
        if player.rect.colliderect(&self.rect()) {
            damage_player(player, WOLF_CONTACT_DAMAGE);
            return true;
        }
        false
    }

    fn draw(&self, surface: &mut Surface) {
        let (x, y) = (self.pos.0 as i32, self.pos.1 as i32);
        // The sheet holds one frame per facing.
        let index = if self.direction > 0 { 1 } else { 0 };
        blit_frame(surface, &self.frames, index, false, x, y);
        let bar = Rect::new(x + 10, y - 10, 60, 6);
        draw_health_bar(surface, bar, self.health, self.max_health);
    }
}

// ── Stationary turret ─────────────────────────────────────────────────────────

const TURRET_SIZE: i32 = 50;
pub const TURRET_RANGE: i32 = 300;
pub const TURRET_FIRE_RATE: Duration = Duration::from_millis(1500);
pub const PROJECTILE_SPEED: i32 = 6;
pub const PROJECTILE_DAMAGE: f32 = 0.5;
const PROJECTILE_SIZE: (i32, i32) = (16, 12);
const TURRET_HEALTH: f32 = 8.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    pub vel_x: i32,
    /// Set once the projectile has hit; it never deals damage again.
    pub consumed: bool,
}

impl Projectile {
    pub fn new(x: i32, y: i32, vel_x: i32) -> Self {
        Projectile {
            rect: Rect::new(x, y, PROJECTILE_SIZE.0, PROJECTILE_SIZE.1),
            vel_x,
            consumed: false,
        }
    }

    fn draw(&self, surface: &mut Surface) {
        surface.fill_circle(self.rect.x + 8, self.rect.y + 6, 6, BLACK);
    }
}

/// Fixed cannon. Only acts while the actor is within `attack_range`
/// vertically; fires toward the actor's side on a wall-clock timer.
#[derive(Clone, Debug)]
pub struct Turret {
    pub rect: Rect,
    image: Surface,
    pub projectiles: Vec<Projectile>,
    pub last_fired: Duration,
    pub fire_rate: Duration,
    pub attack_range: i32,
    pub health: f32,
    pub max_health: f32,
    in_range: bool,
}

impl Turret {
    /// `now` is the wall-clock time of construction; the first shot comes one
    /// full fire period later.
    pub fn new(x: i32, y: i32, image: Surface, now: Duration) -> Self {
        Turret {
            rect: Rect::new(x, y, TURRET_SIZE, TURRET_SIZE),
            image,
            projectiles: Vec::new(),
            last_fired: now,
            fire_rate: TURRET_FIRE_RATE,
            attack_range: TURRET_RANGE,
            health: TURRET_HEALTH,
            max_health: TURRET_HEALTH,
            in_range: false,
        }
    }

    pub fn load(root: &Path, x: i32, y: i32, now: Duration) -> Result<Self> {
        let size = Some((TURRET_SIZE as u32, TURRET_SIZE as u32));
        let image = load_image(root, SHARED_FOLDER, "cannon.png", size)?;
        Ok(Self::new(x, y, image, now))
    }

    fn advance(&mut self, player_rect: &Rect, now: Duration) {
        self.in_range =
            (player_rect.center_y() - self.rect.center_y()).abs() <= self.attack_range;
        if !self.in_range {
            return;
        }

        if now.saturating_sub(self.last_fired) >= self.fire_rate {
            self.last_fired = now;
            let direction = if self.rect.x > player_rect.x { -1 } else { 1 };
            self.projectiles.push(Projectile::new(
                self.rect.center_x(),
                self.rect.center_y(),
                PROJECTILE_SPEED * direction,
            ));
            log::debug!("Turret fired, {} projectiles live", self.projectiles.len());
        }

        for projectile in &mut self.projectiles {
            projectile.rect.x += projectile.vel_x;
        }
    }

    /// Apply hits from live projectiles, then drop consumed and off-screen ones.
    fn attack(&mut self, player: &mut Player) -> bool {
        if !self.in_range {
            return false;
        }
        let mut hit = false;
        for projectile in &mut self.projectiles {
            if !projectile.consumed && player.rect.colliderect(&projectile.rect) {
                damage_player(player, PROJECTILE_DAMAGE);
                projectile.consumed = true;
                hit = true;
            }
        }
        let screen_width = WIDTH as i32;
        self.projectiles
            .retain(|p| !p.consumed && 0 < p.rect.x && p.rect.x < screen_width);
        hit
    }

    fn draw(&self, surface: &mut Surface) {
        surface.blit(&self.image, self.rect.x, self.rect.y);
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
        let bar = Rect::new(self.rect.x, self.rect.y - 10, TURRET_SIZE, 6);
        draw_health_bar(surface, bar, self.health, self.max_health);
    }
}

// ── Uniform contract ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Hostile {
    PatrolMelee(PatrolMelee),
    ProximityBoss(ProximityBoss),
    PatrolBoss(PatrolBoss),
    Turret(Turret),
}

impl Hostile {
    pub fn is_alive(&self) -> bool {
        match self {
            Hostile::PatrolMelee(h) => h.alive,
            Hostile::ProximityBoss(h) => h.alive,
            Hostile::PatrolBoss(h) => h.alive,
            Hostile::Turret(_) => true,
        }
    }

    pub fn health(&self) -> f32 {
        match self {
            Hostile::PatrolMelee(h) => h.health,
            Hostile::ProximityBoss(h) => h.health,
            Hostile::PatrolBoss(h) => h.health,
            Hostile::Turret(h) => h.health,
        }
    }

    /// Sprite-space rect.
    pub fn rect(&self) -> Rect {
        match self {
            Hostile::PatrolMelee(h) => h.rect,
            Hostile::ProximityBoss(h) => Rect::new(
                h.pos.0 as i32,
                h.pos.1 as i32,
                BOSS_SPRITE.0 as i32,
                BOSS_SPRITE.1 as i32,
            ),
            Hostile::PatrolBoss(h) => h.rect(),
            Hostile::Turret(h) => h.rect,
        }
    }

    /// Movement, animation and firing for one frame.
    pub fn advance(&mut self, player_rect: &Rect, now: Duration) {
        if !self.is_alive() {
            return;
        }
        match self {
            Hostile::PatrolMelee(h) => h.advance(),
            Hostile::ProximityBoss(h) => h.advance(player_rect),
            Hostile::PatrolBoss(h) => h.advance(),
            Hostile::Turret(h) => h.advance(player_rect, now),
        }
    }

    /// Apply the actor's attack rect, if any. Every overlapping frame counts.
    pub fn take_damage(&mut self, attack_rect: Option<Rect>, player: &mut Player) -> bool {
        let Some(attack_rect) = attack_rect else {
            return false;
        };
        if !self.is_alive() {
            return false;
        }
        match self {
            Hostile::PatrolMelee(h) => h.take_damage(&attack_rect),
            Hostile::ProximityBoss(h) => h.take_damage(&attack_rect, player),
            Hostile::PatrolBoss(h) => h.take_damage(&attack_rect),
            Hostile::Turret(_) => false,
        }
    }

    /// Damage dealt to the actor this frame. Returns whether any was dealt.
    pub fn attack(&mut self, player: &mut Player) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self {
            Hostile::PatrolMelee(h) => h.attack(player),
            Hostile::ProximityBoss(h) => h.attack(player),
            Hostile::PatrolBoss(h) => h.attack(player),
            Hostile::Turret(h) => h.attack(player),
        }
    }

    /// One full frame: advance, receive the actor's attack, then attack.
    /// The melee roamer lands its contact hit before it takes the actor's
    /// strike, so it still deals damage on the frame it dies.
    /// Returns whether the actor took damage.
    pub fn update(&mut self, player: &mut Player, attack_rect: Option<Rect>, now: Duration) -> bool {
        let player_rect = player.rect;
        self.advance(&player_rect, now);
        if let Hostile::PatrolMelee(_) = self {
            let hit = self.attack(player);
            self.take_damage(attack_rect, player);
            return hit;
        }
        self.take_damage(attack_rect, player);
        self.attack(player)
    }

    pub fn draw(&self, surface: &mut Surface) {
        if !self.is_alive() {
            return;
        }
        match self {
            Hostile::PatrolMelee(h) => h.draw(surface),
            Hostile::ProximityBoss(h) => h.draw(surface),
            Hostile::PatrolBoss(h) => h.draw(surface),
            Hostile::Turret(h) => h.draw(surface),
        }
    }
}
