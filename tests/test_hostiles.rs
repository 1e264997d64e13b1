use std::time::Duration;

use panda_platformer::entities::{Player, Rect};
use panda_platformer::hostiles::*;
use panda_platformer::surface::{Surface, GREEN, RED};

fn frames(w: u32, h: u32, n: usize) -> Vec<Surface> {
    vec![Surface::filled(w, h, [200, 0, 0, 255]); n]
}

fn patrol(x: i32, y: i32) -> Hostile {
    Hostile::PatrolMelee(PatrolMelee::new(x, y, frames(68, 150, 6)))
}

fn boss(x: f32, y: f32) -> Hostile {
    Hostile::ProximityBoss(ProximityBoss::new(x, y, frames(85, 155, 6)))
}

fn turret(x: i32, y: i32) -> Hostile {
    Hostile::Turret(Turret::new(x, y, Surface::filled(50, 50, [0, 0, 0, 255]), Duration::ZERO))
}

fn projectiles(h: &Hostile) -> &[Projectile] {
    match h {
        Hostile::Turret(t) => &t.projectiles,
        _ => panic!("not a turret"),
    }
}

const FAR_AWAY: Rect = Rect::new(2000, 2000, 70, 70);
const CANVAS: [u8; 4] = [1, 1, 1, 255];

/// Transparent frames with a red stripe down the left edge, so mirroring
/// shows up as the stripe moving to the right edge.
fn striped(w: u32, h: u32, n: usize) -> Vec<Surface> {
    let mut frame = Surface::new(w, h);
    frame.fill_rect(Rect::new(0, 0, 10, h as i32), RED);
    vec![frame; n]
}

fn canvas() -> Surface {
    Surface::filled(800, 600, CANVAS)
}

// ── Patrol melee ──────────────────────────────────────────────────────────────

#[test]
fn patrol_reverses_at_its_bounds() {
    let mut h = patrol(300, 350);
    let (mut min_seen, mut max_seen) = (i32::MAX, i32::MIN);
    for _ in 0..600 {
        h.advance(&FAR_AWAY, Duration::ZERO);
        let x = h.rect().x;
        min_seen = min_seen.min(x);
        max_seen = max_seen.max(x);
    }
    assert_eq!(max_seen, 300 + PATROL_RANGE);
    assert_eq!(min_seen, 300 - PATROL_RANGE);
}

#[test]
fn patrol_drains_every_overlapping_frame() {
    let mut h = patrol(300, 350);
    let mut p = Player::new(300, 380);
    for frame in 1..=10 {
        assert!(h.attack(&mut p));
        let expected = 10.0 - PATROL_CONTACT_DAMAGE * frame as f32;
        assert!((p.health - expected).abs() < 1e-4);
    }
}

#[test]
fn patrol_reach_is_inflated() {
    let mut h = patrol(300, 350);
    // 15px right of the sprite: outside the rect, inside the 20px reach
    let mut p = Player::new(300 + 68 + 15, 380);
    assert!(h.attack(&mut p));
    let mut far = Player::new(300 + 68 + 25, 380);
    assert!(!h.attack(&mut far));
}

#[test]
fn patrol_dies_and_goes_quiet() {
    let mut h = patrol(300, 350);
    let mut p = Player::new(300, 380);
    let strike = Some(Rect::new(300, 380, 50, 80));
    let mut hits = 0;
    while h.is_alive() {
        assert!(h.take_damage(strike, &mut p));
        hits += 1;
        assert!(hits < 100);
    }
    assert_eq!(hits, 27);
    assert_eq!(h.health(), 0.0);

    let before = p.health;
    assert!(!h.update(&mut p, strike, Duration::ZERO));
    assert_eq!(p.health, before);

    let mut s = Surface::filled(800, 600, [1, 1, 1, 255]);
    h.draw(&mut s);
    assert_eq!(s.pixel(310, 400), [1, 1, 1, 255]);
}

#[test]
fn no_attack_rect_means_no_damage() {
    let mut h = patrol(300, 350);
    let mut p = Player::new(300, 380);
    assert!(!h.take_damage(None, &mut p));
    assert_eq!(h.health(), 8.0);
}

#[test]
fn patrol_faces_its_walking_direction() {
    let mut h = Hostile::PatrolMelee(PatrolMelee::new(300, 350, striped(68, 150, 6)));
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(305, 400), RED);
    assert_eq!(s.pixel(363, 400), CANVAS);

    if let Hostile::PatrolMelee(p) = &mut h {
        p.direction = -1;
    }
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(305, 400), CANVAS);
    assert_eq!(s.pixel(363, 400), RED);
}

#[test]
fn patrol_lands_its_hit_on_the_frame_it_dies() {
    let mut h = patrol(300, 350);
    if let Hostile::PatrolMelee(p) = &mut h {
        p.health = 0.1;
    }
    let mut p = Player::new(300, 380);
    let strike = Some(Rect::new(300, 380, 50, 80));
    assert!(h.update(&mut p, strike, Duration::ZERO));
    assert!(!h.is_alive());
    assert!((p.health - (10.0 - PATROL_CONTACT_DAMAGE)).abs() < 1e-6);
}

// ── Proximity boss ────────────────────────────────────────────────────────────

#[test]
fn boss_walks_when_actor_is_far() {
    let mut h = boss(150.0, 410.0);
    for _ in 0..30 {
        h.advance(&FAR_AWAY, Duration::ZERO);
    }
    let Hostile::ProximityBoss(b) = &h else { unreachable!() };
    assert_eq!(b.mode, BossMode::Walk);
    assert_eq!(b.frame_index, 0);
    assert!((b.pos.0 - 210.0).abs() < 1e-3);
}

#[test]
fn boss_creeps_toward_nearby_actor() {
    let mut h = boss(150.0, 410.0);
    // Actor centre at 200, boss centre at 225
    let near = Rect::new(165, 430, 70, 70);
    for _ in 0..10 {
        h.advance(&near, Duration::ZERO);
    }
    let Hostile::ProximityBoss(b) = &h else { unreachable!() };
    assert_eq!(b.mode, BossMode::Attack);
    assert_eq!(b.direction, -1);
    assert_eq!(b.frame_index, 1);
    assert!((b.pos.0 - 149.0).abs() < 1e-3);
}

#[test]
fn boss_mode_switches_on_distance() {
    let mut h = boss(150.0, 410.0);
    // centre 225; actor centre 225 + 121 is just out of reach
    h.advance(&Rect::new(225 + 121 - 35, 430, 70, 70), Duration::ZERO);
    let Hostile::ProximityBoss(b) = &h else { unreachable!() };
    assert_eq!(b.mode, BossMode::Walk);
}

#[test]
fn boss_takes_damage_each_overlapping_frame() {
    let mut h = boss(150.0, 410.0);
    let mut p = Player::new(0, 0);
    let strike = Some(Rect::new(240, 420, 50, 80));
    for _ in 0..5 {
        assert!(h.take_damage(strike, &mut p));
    }
    assert!((h.health() - (8.0 - 5.0 * BOSS_HIT_DAMAGE)).abs() < 1e-4);
}

#[test]
fn defeating_boss_restores_actor_health() {
    let mut h = boss(150.0, 410.0);
    if let Hostile::ProximityBoss(b) = &mut h {
        b.health = 0.1;
    }
    let mut p = Player::new(0, 0);
    p.health = 3.0;
    assert!(h.take_damage(Some(Rect::new(160, 420, 50, 80)), &mut p));
    assert!(!h.is_alive());
    assert_eq!(h.health(), 0.0);
    assert_eq!(p.health, p.max_health);
}

#[test]
fn boss_contact_drains_actor() {
    let mut h = boss(150.0, 410.0);
    let mut p = Player::new(170, 430);
    assert!(h.attack(&mut p));
    assert!((p.health - (10.0 - BOSS_CONTACT_DAMAGE)).abs() < 1e-6);
    // The sprite is taller than the contact box
    let mut below = Player::new(170, 410 + 95);
    assert!(!h.attack(&mut below));
}

#[test]
fn boss_mirrors_only_while_walking_left() {
    let mut h = Hostile::ProximityBoss(ProximityBoss::new(150.0, 410.0, striped(85, 155, 6)));
    let set = |h: &mut Hostile, mode: BossMode, direction: i32| {
        if let Hostile::ProximityBoss(b) = h {
            b.mode = mode;
            b.direction = direction;
        }
    };

    set(&mut h, BossMode::Walk, -1);
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(155, 450), CANVAS);
    assert_eq!(s.pixel(230, 450), RED);

    set(&mut h, BossMode::Attack, -1);
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(155, 450), RED);
    assert_eq!(s.pixel(230, 450), CANVAS);

    set(&mut h, BossMode::Walk, 1);
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(155, 450), RED);
}

#[test]
fn beaten_boss_heals_and_stops_hurting_in_the_same_frame() {
    let mut h = boss(150.0, 410.0);
    if let Hostile::ProximityBoss(b) = &mut h {
        b.health = 0.1;
    }
    let mut p = Player::new(170, 430);
    p.health = 5.0;
    let strike = Some(Rect::new(160, 420, 50, 80));
    assert!(!h.update(&mut p, strike, Duration::ZERO));
    assert!(!h.is_alive());
    assert_eq!(p.health, p.max_health);
}

// ── Patrol boss ───────────────────────────────────────────────────────────────

#[test]
fn patrol_boss_paces_left_of_spawn() {
    let mut h = Hostile::PatrolBoss(PatrolBoss::new(400.0, 245.0, frames(60, 50, 2)));
    let mut xs = Vec::new();
    for _ in 0..400 {
        h.advance(&FAR_AWAY, Duration::ZERO);
        xs.push(h.rect().x);
    }
    assert!(xs.iter().all(|&x| (199..=400).contains(&x)));
    assert!(xs.iter().any(|&x| x <= 200));
}

#[test]
fn patrol_boss_hurts_and_can_be_beaten() {
    let mut h = Hostile::PatrolBoss(PatrolBoss::new(400.0, 245.0, frames(60, 50, 2)));
    let mut p = Player::new(410, 250);
    assert!(h.attack(&mut p));
    assert!((p.health - (10.0 - WOLF_CONTACT_DAMAGE)).abs() < 1e-6);

    let strike = Some(Rect::new(410, 250, 50, 80));
    for _ in 0..100 {
        h.take_damage(strike, &mut p);
    }
    assert!(!h.is_alive());
    // Only the proximity boss heals the actor
    assert!(p.health < p.max_health);
}

#[test]
fn patrol_boss_picks_frame_by_direction() {
    let frames = vec![Surface::filled(60, 50, GREEN), Surface::filled(60, 50, RED)];
    let mut h = Hostile::PatrolBoss(PatrolBoss::new(400.0, 245.0, frames));
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(430, 270), GREEN);

    if let Hostile::PatrolBoss(b) = &mut h {
        b.direction = 1;
    }
    let mut s = canvas();
    h.draw(&mut s);
    assert_eq!(s.pixel(430, 270), RED);
}

// ── Turret ────────────────────────────────────────────────────────────────────

#[test]
fn turret_fires_at_most_once_per_period() {
    let mut h = turret(650, 400);
    let target = Rect::new(100, 400, 70, 70);
    let mut fired_at = Vec::new();
    let mut seen = 0;
    for ms in (0..=4600u64).step_by(100) {
        h.advance(&target, Duration::from_millis(ms));
        let count = projectiles(&h).len();
        if count > seen {
            fired_at.push(ms);
            seen = count;
        }
    }
    assert_eq!(fired_at, vec![1500, 3000, 4500]);
}

#[test]
fn turret_is_idle_out_of_vertical_range() {
    let mut h = turret(650, 400);
    let high = Rect::new(100, 0, 70, 70);
    for ms in (0..=10_000u64).step_by(250) {
        h.advance(&high, Duration::from_millis(ms));
    }
    assert!(projectiles(&h).is_empty());
}

#[test]
fn turret_aims_toward_actor_side() {
    let mut left = turret(650, 400);
    left.advance(&Rect::new(100, 400, 70, 70), Duration::from_millis(1500));
    assert_eq!(projectiles(&left)[0].vel_x, -PROJECTILE_SPEED);

    let mut right = turret(100, 400);
    right.advance(&Rect::new(600, 400, 70, 70), Duration::from_millis(1500));
    assert_eq!(projectiles(&right)[0].vel_x, PROJECTILE_SPEED);
    assert_eq!(projectiles(&right)[0].rect.x, 125 + PROJECTILE_SPEED);
}

#[test]
fn projectile_hits_once_and_is_pruned() {
    let mut h = turret(650, 400);
    if let Hostile::Turret(t) = &mut h {
        t.projectiles.push(Projectile::new(95, 410, PROJECTILE_SPEED));
    }
    let mut p = Player::new(100, 400);
    assert!(h.update(&mut p, None, Duration::ZERO));
    assert_eq!(p.health, 9.5);
    assert!(projectiles(&h).is_empty());

    assert!(!h.update(&mut p, None, Duration::ZERO));
    assert_eq!(p.health, 9.5);
}

#[test]
fn offscreen_projectiles_are_pruned() {
    let mut h = turret(650, 400);
    if let Hostile::Turret(t) = &mut h {
        t.projectiles.push(Projectile::new(795, 410, PROJECTILE_SPEED));
        t.projectiles.push(Projectile::new(400, 410, PROJECTILE_SPEED));
    }
    let mut p = Player::new(100, 400);
    assert!(!h.update(&mut p, None, Duration::ZERO));
    let left = projectiles(&h);
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].rect.x, 406);
}

#[test]
fn turret_shrugs_off_attacks() {
    let mut h = turret(650, 400);
    let mut p = Player::new(600, 400);
    assert!(!h.take_damage(Some(Rect::new(650, 400, 50, 80)), &mut p));
    assert_eq!(h.health(), 8.0);
    assert!(h.is_alive());
}

#[test]
fn projectiles_hold_still_while_actor_is_out_of_range() {
    let mut h = turret(650, 400);
    if let Hostile::Turret(t) = &mut h {
        t.projectiles.push(Projectile::new(400, 410, -PROJECTILE_SPEED));
    }
    let mut high = Player::new(100, 0);
    for _ in 0..10 {
        assert!(!h.update(&mut high, None, Duration::ZERO));
    }
    assert_eq!(projectiles(&h)[0].rect.x, 400);

    let mut level = Player::new(100, 400);
    h.update(&mut level, None, Duration::ZERO);
    assert_eq!(projectiles(&h)[0].rect.x, 400 - PROJECTILE_SPEED);
}
