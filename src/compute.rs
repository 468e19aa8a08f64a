//! Game-logic functions.
//!
//! Every function mutates the part of the state it is handed and nothing
//! else.  Time arrives as a millisecond reading and randomness through an
//! injected RNG, so callers control determinism (tests use a seeded RNG and a
//! manual clock).

use log::{debug, info, trace};
use rand::Rng;

use crate::config::Playfield;
use crate::entities::{
    Bullet, Missile, Outcome, Player, Status, World, FINAL_LEVEL, FIRE_INTERVAL_MS,
    LEVEL_DURATION_MS, MISSILE_HEIGHT, SPAWN_BASE_MS, SPAWN_STEP_MS,
};
use crate::input::{Action, InputState};

// ── Difficulty table ─────────────────────────────────────────────────────────

/// Minimum time between missile spawns: 920 ms at level 1 down to 200 ms at
/// level 10.  Levels past the final one use the final cadence.
pub fn spawn_interval(level: u32) -> u64 {
    SPAWN_BASE_MS.saturating_sub(u64::from(level.min(FINAL_LEVEL)) * SPAWN_STEP_MS)
}

// ── Player & bullets ─────────────────────────────────────────────────────────

/// Apply held direction keys, keeping the ship inside the playfield.
pub fn move_player(player: &mut Player, input: &InputState, playfield: &Playfield) {
    if input.is_pressed(Action::Up) && player.y > 0.0 {
        player.y -= player.speed;
    }
    if input.is_pressed(Action::Down) && player.y + player.height < playfield.height {
        player.y += player.speed;
    }
    // A playfield shorter than the ship pins it to the top.
    player.y = player.y.min(playfield.height - player.height).max(0.0);
}

/// Fire a bullet unless the most recent one is still younger than the fire
/// interval.  Returns whether a bullet was fired.
pub fn shoot(player: &mut Player, now: u64) -> bool {
    let ready = match player.bullets.last() {
        None => true,
        Some(last) => now.saturating_sub(last.fired_at) > FIRE_INTERVAL_MS,
    };
    if ready {
        let (x, y) = player.muzzle();
        player.bullets.push(Bullet::new(x, y, now));
        trace!("bullet fired at ({x}, {y})");
    }
    ready
}

pub fn advance_bullet(bullet: &mut Bullet, playfield: &Playfield) {
    bullet.x += bullet.speed;
    if bullet.x > playfield.width {
        bullet.expired = true;
    }
}

/// One tick of player control: move, maybe fire, then advance every bullet
/// and drop the ones that left the playfield.
pub fn update_player(player: &mut Player, input: &InputState, now: u64, playfield: &Playfield) {
    move_player(player, input, playfield);
    if input.is_pressed(Action::Fire) {
        shoot(player, now);
    }
    for bullet in &mut player.bullets {
        advance_bullet(bullet, playfield);
    }
    player.bullets.retain(|b| !b.expired);
}

// ── Missiles ─────────────────────────────────────────────────────────────────

pub fn advance_missile(missile: &mut Missile) {
    missile.x -= missile.speed;
}

/// Spawn a missile at the right edge once the level's cadence has elapsed.
/// Returns whether a missile was spawned.
pub fn spawn_missile(world: &mut World, now: u64, rng: &mut impl Rng) -> bool {
    if now.saturating_sub(world.last_missile_spawn) <= spawn_interval(world.level) {
        return false;
    }
    let span = world.playfield.height - MISSILE_HEIGHT;
    let y = if span > 0.0 { rng.gen_range(0.0..span) } else { 0.0 };
    world
        .missiles
        .push(Missile::new(world.playfield.width, y, world.level));
    world.last_missile_spawn = now;
    debug!(
        "missile spawned at y={y:.1} (level {}, {} in flight)",
        world.level,
        world.missiles.len()
    );
    true
}

// ── Collisions ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collisions {
    pub player_hit: bool,
    pub missiles_destroyed: usize,
}

/// Resolve missile↔player and missile↔bullet overlaps.
///
/// Every missile is checked against the player, even after a hit has been
/// found.  Each missile is destroyed by at most one bullet (the oldest
/// overlapping one) and each bullet destroys at most one missile.  Removals
/// happen after the scan so no entry is skipped or removed twice.
pub fn detect_collisions(world: &mut World) -> Collisions {
    let player_box = world.player.bounds();
    let bullets = &world.player.bullets;
    let mut spent = vec![false; bullets.len()];
    let mut collisions = Collisions::default();

    for missile in world.missiles.iter_mut() {
        let missile_box = missile.bounds();
        if missile_box.overlaps(&player_box) {
            collisions.player_hit = true;
        }
        let hit_by = (0..bullets.len())
            .find(|&i| !spent[i] && bullets[i].bounds().overlaps(&missile_box));
        if let Some(i) = hit_by {
            spent[i] = true;
            missile.hit = true;
            collisions.missiles_destroyed += 1;
            debug!("bullet {i} destroyed missile at ({:.1}, {:.1})", missile.x, missile.y);
        }
    }

    if collisions.missiles_destroyed > 0 {
        let mut index = 0;
        world.player.bullets.retain(|_| {
            let keep = !spent[index];
            index += 1;
            keep
        });
        world.missiles.retain(|m| !m.hit);
    }

    if collisions.player_hit && world.status == Status::Running {
        world.status = Status::GameOver;
        info!("game over on level {}", world.level);
    }
    collisions
}

// ── Level progression ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelChange {
    /// A new level began; carries its number.
    Advanced(u32),
    /// The final level was survived.
    Victory,
}

/// Move to the next level once the current one has lasted long enough.
/// In-flight missiles are discarded on a level change.  No-op once the
/// session has ended.
pub fn advance_level(world: &mut World, now: u64) -> Option<LevelChange> {
    if world.status.is_terminal() || now.saturating_sub(world.level_start) <= LEVEL_DURATION_MS {
        return None;
    }
    world.level += 1;
    if world.level > FINAL_LEVEL {
        world.status = Status::Victory;
        info!("victory: level {FINAL_LEVEL} completed");
        return Some(LevelChange::Victory);
    }
    world.level_start = now;
    world.missiles.clear();
    info!("level {} started", world.level);
    Some(LevelChange::Advanced(world.level))
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Points inside a tick where a renderer may draw the state reached so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The player moved and the bullets advanced.
    PlayerUpdated,
    /// Spawning ran and every missile advanced.
    MissilesAdvanced,
}

/// What changed during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub missile_spawned: bool,
    pub collisions: Collisions,
    /// The level that just began, if any.
    pub new_level: Option<u32>,
    /// Set only on the tick that ended the session.
    pub outcome: Option<Outcome>,
}

/// Advance the world by one tick without rendering.
pub fn tick(world: &mut World, input: &InputState, now: u64, rng: &mut impl Rng) -> TickReport {
    tick_with(world, input, now, rng, |_, _| {})
}

/// Advance the world by one tick, calling `on_phase` at each drawing point.
///
/// The order is fixed: player and bullets, missile spawn, missile movement,
/// collisions, level progression.  Does nothing once the session has ended.
pub fn tick_with(
    world: &mut World,
    input: &InputState,
    now: u64,
    rng: &mut impl Rng,
    mut on_phase: impl FnMut(Phase, &World),
) -> TickReport {
    let mut report = TickReport::default();
    if world.is_over() {
        return report;
    }

    let playfield = world.playfield;
    update_player(&mut world.player, input, now, &playfield);
    on_phase(Phase::PlayerUpdated, &*world);

    report.missile_spawned = spawn_missile(world, now, rng);
    for missile in &mut world.missiles {
        advance_missile(missile);
    }
    on_phase(Phase::MissilesAdvanced, &*world);

    report.collisions = detect_collisions(world);
    match advance_level(world, now) {
        Some(LevelChange::Advanced(level)) => report.new_level = Some(level),
        Some(LevelChange::Victory) | None => {}
    }

    report.outcome = world.status.outcome();
    report
}
