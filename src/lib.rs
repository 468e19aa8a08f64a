//! Missile Run - a side-scrolling arcade shooter.
//!
//! Core modules:
//! - `entities`: pure game data (player, bullets, missiles, world)
//! - `compute`: state transitions for one simulation tick
//! - `draw`: stateless rendering of the world onto a drawing surface
//! - `driver`: the frame loop and its terminal states
//! - `clock`, `input`, `surface`, `config`: injected capabilities

pub mod clock;
pub mod compute;
pub mod config;
pub mod draw;
pub mod driver;
pub mod entities;
pub mod input;
pub mod surface;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GameConfig, Playfield};
pub use driver::{Frame, FrameScheduler, Session};
pub use entities::{Outcome, Status, World};
pub use input::{Action, InputState};
pub use surface::{Color, DrawingSurface, Font, Frontend, LevelDisplay, OutcomePresenter};
