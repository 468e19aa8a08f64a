//! Session configuration.

use std::time::Duration;

use crate::entities::Rect;

/// Default frame length, roughly one 60 Hz display refresh.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Size of the play area in playfield units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Playfield {
    /// The whole play area as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub playfield: Playfield,
    /// Target time between frames for the host scheduler.
    pub frame: Duration,
    /// Seed for missile placement; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            frame: DEFAULT_FRAME,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Frame length for a target refresh rate.  Zero is treated as one frame per second.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.frame = Duration::from_millis(1000 / u64::from(fps.max(1)));
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
