//! All game entity types: pure data, no per-tick logic.

use crate::config::Playfield;

// ── Tunables ──────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
/// Vertical distance covered per tick while a direction is held.
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_START_X: f32 = 100.0;

pub const BULLET_RADIUS: f32 = 5.0;
pub const BULLET_SPEED: f32 = 8.0;

pub const MISSILE_WIDTH: f32 = 20.0;
pub const MISSILE_HEIGHT: f32 = 10.0;
pub const MISSILE_BASE_SPEED: f32 = 3.0;

/// Minimum age of the newest bullet before another may be fired.
pub const FIRE_INTERVAL_MS: u64 = 300;
pub const SPAWN_BASE_MS: u64 = 1000;
/// Spawn interval shrinks by this much per level.
pub const SPAWN_STEP_MS: u64 = 80;
pub const LEVEL_DURATION_MS: u64 = 15_000;

pub const FIRST_LEVEL: u32 = 1;
/// Surviving past this level wins the game.
pub const FINAL_LEVEL: u32 = 10;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Centre of the bullet.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    /// Clock reading when the bullet was fired.
    pub fired_at: u64,
    /// Set once the bullet has left the right edge of the playfield.
    pub expired: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32, fired_at: u64) -> Self {
        Self {
            x,
            y,
            radius: BULLET_RADIUS,
            speed: BULLET_SPEED,
            fired_at,
            expired: false,
        }
    }

    /// The bounding square of the bullet's circle.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.radius,
            self.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Missile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Fixed at spawn from the level at that moment.
    pub speed: f32,
    /// Marked during collision scanning; hit missiles are removed afterwards.
    pub hit: bool,
}

impl Missile {
    pub fn new(x: f32, y: f32, level: u32) -> Self {
        Self {
            x,
            y,
            width: MISSILE_WIDTH,
            height: MISSILE_HEIGHT,
            speed: MISSILE_BASE_SPEED + level as f32,
            hit: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Oldest first; the last entry is the most recent shot.
    pub bullets: Vec<Bullet>,
}

impl Player {
    /// A player at the left of the playfield, vertically centred.
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            x: PLAYER_START_X,
            y: playfield.height / 2.0 - PLAYER_HEIGHT / 2.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            bullets: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Where a newly fired bullet appears: the middle of the ship's nose.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + self.width, self.y + self.height / 2.0)
    }
}

// ── Session state ─────────────────────────────────────────────────────────────

/// How a finished session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    GameOver,
    Victory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// A missile reached the player.
    GameOver,
    /// The final level was survived.
    Victory,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Status::Running => None,
            Status::GameOver => Some(Outcome::GameOver),
            Status::Victory => Some(Outcome::Victory),
        }
    }
}

/// The entire session state.  Owns the player (and through it the bullets),
/// the missiles and the level timers.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub playfield: Playfield,
    pub player: Player,
    pub missiles: Vec<Missile>,
    pub level: u32,
    pub status: Status,
    pub last_missile_spawn: u64,
    pub level_start: u64,
}

impl World {
    /// A fresh session at level 1 with both timers started at `now`.
    pub fn new(playfield: Playfield, now: u64) -> Self {
        Self {
            player: Player::new(&playfield),
            playfield,
            missiles: Vec::new(),
            level: FIRST_LEVEL,
            status: Status::Running,
            last_missile_spawn: now,
            level_start: now,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}
