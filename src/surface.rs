//! Output capabilities the simulation draws and reports through.
//!
//! None of these return anything: drawing and notifications are fire-and-forget
//! from the core's point of view.  Backends that can fail keep the error
//! themselves.

use crate::entities::Rect;

/// The fixed palette the game draws with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Cyan,
    Yellow,
    Red,
    White,
}

/// Text style.  Only the pixel size is meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub size: u16,
}

pub trait DrawingSurface {
    fn clear(&mut self, region: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Font, color: Color);
    /// End of frame.  Buffered backends flush here.
    fn present(&mut self) {}
}

/// Receives the current level number for on-screen display.
pub trait LevelDisplay {
    fn set_level(&mut self, level: u32);
}

/// Told exactly once when a session ends.
pub trait OutcomePresenter {
    fn announce_victory(&mut self);
    fn announce_game_over(&mut self);
}

/// Everything a running session talks to.
pub trait Frontend: DrawingSurface + LevelDisplay + OutcomePresenter {}

impl<T: DrawingSurface + LevelDisplay + OutcomePresenter> Frontend for T {}
