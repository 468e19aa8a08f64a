//! Stateless rendering of game state onto a [`DrawingSurface`].

use crate::config::Playfield;
use crate::entities::{Bullet, Missile, Outcome, Player};
use crate::surface::{Color, DrawingSurface, Font};

pub const C_PLAYER: Color = Color::Cyan;
pub const C_BULLET: Color = Color::Yellow;
pub const C_MISSILE: Color = Color::Red;
pub const C_MESSAGE: Color = Color::White;

pub const MESSAGE_FONT: Font = Font { size: 40 };

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const VICTORY_TEXT: &str = "YOU WON! Level 10 completed!";

pub fn draw_player<S: DrawingSurface + ?Sized>(player: &Player, surface: &mut S) {
    surface.fill_rect(player.bounds(), C_PLAYER);
}

pub fn draw_bullets<S: DrawingSurface + ?Sized>(bullets: &[Bullet], surface: &mut S) {
    for bullet in bullets {
        surface.fill_circle(bullet.x, bullet.y, bullet.radius, C_BULLET);
    }
}

pub fn draw_missiles<S: DrawingSurface + ?Sized>(missiles: &[Missile], surface: &mut S) {
    for missile in missiles {
        surface.fill_rect(missile.bounds(), C_MISSILE);
    }
}

/// The end-of-session message, drawn once over the last frame.
pub fn draw_terminal_message<S: DrawingSurface + ?Sized>(
    outcome: Outcome,
    playfield: &Playfield,
    surface: &mut S,
) {
    let text = match outcome {
        Outcome::GameOver => GAME_OVER_TEXT,
        Outcome::Victory => VICTORY_TEXT,
    };
    surface.draw_text(
        text,
        playfield.width / 2.0 - 120.0,
        playfield.height / 2.0,
        MESSAGE_FONT,
        C_MESSAGE,
    );
}
