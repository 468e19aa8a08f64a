//! Terminal front end. All terminal I/O lives here.
//!
//! [`TerminalFrontend`] implements the drawing, level and outcome
//! capabilities on top of crossterm.  The 800×600 playfield is scaled onto
//! the cells inside a border; row 0 is the HUD and the last row holds hints.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color as TermColor, Print},
    terminal, QueueableCommand,
};
use log::{error, info};

use missile_run::clock::Clock;
use missile_run::config::Playfield;
use missile_run::entities::Rect;
use missile_run::surface::{Color, DrawingSurface, Font, LevelDisplay, OutcomePresenter};
use missile_run::{Frame, FrameScheduler, InputState, Outcome, Session};
use rand::Rng;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: TermColor = TermColor::DarkBlue;
const C_HUD_LEVEL: TermColor = TermColor::Yellow;
const C_HINT: TermColor = TermColor::DarkGrey;
const C_VICTORY: TermColor = TermColor::Green;
const C_GAME_OVER: TermColor = TermColor::Red;

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Cyan => TermColor::Cyan,
        Color::Yellow => TermColor::Yellow,
        Color::Red => TermColor::Red,
        Color::White => TermColor::White,
    }
}

pub const CONTROLS_HINT: &str = "↑ ↓ / W S : Move   SPACE : Shoot   Q : Quit";
pub const AFTER_GAME_HINT: &str = "R - Play Again   M - Menu   Q - Quit";

// ── Coordinate mapping ───────────────────────────────────────────────────────

/// Map the interval `[start, start + len)` of a playfield axis of size
/// `extent` onto `cells` terminal cells.  Returns the first and last covered
/// cell (relative to the play area) or `None` when nothing is visible.
fn cell_span(start: f32, len: f32, extent: f32, cells: u16) -> Option<(u16, u16)> {
    if cells == 0 || extent <= 0.0 {
        return None;
    }
    let lo = start.max(0.0);
    let hi = (start + len).min(extent);
    if hi <= lo {
        return None;
    }
    let scale = f32::from(cells) / extent;
    let last = cells - 1;
    let first_cell = ((lo * scale).floor() as u16).min(last);
    let last_cell = (((hi * scale).ceil() as u16).saturating_sub(1)).clamp(first_cell, last);
    Some((first_cell, last_cell))
}

/// Map a single playfield point onto a cell of the play area.
fn cell_at(pos: f32, extent: f32, cells: u16) -> Option<u16> {
    if cells == 0 || pos < 0.0 || pos >= extent {
        return None;
    }
    Some(((pos / extent * f32::from(cells)) as u16).min(cells - 1))
}

// ── Front end ─────────────────────────────────────────────────────────────────

pub struct TerminalFrontend<W: Write> {
    out: W,
    playfield: Playfield,
    width: u16,
    height: u16,
    level: u32,
    outcome: Option<Outcome>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(out: W, playfield: Playfield, width: u16, height: u16) -> Self {
        Self {
            out,
            playfield,
            width,
            height,
            level: 1,
            outcome: None,
            error: None,
        }
    }

    /// The first I/O error hit since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                error!("terminal write failed: {e}");
                self.error = Some(e);
            }
        }
    }

    // Play area: columns 1..width-1, rows 2..height-2.
    fn area_cols(&self) -> u16 {
        self.width.saturating_sub(2)
    }

    fn area_rows(&self) -> u16 {
        self.height.saturating_sub(4)
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let w = self.width as usize;
        let h = self.height;

        self.out.queue(style::SetForegroundColor(C_BORDER))?;

        // Row 1: top bar
        self.out.queue(cursor::MoveTo(0, 1))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        // Row h-2: bottom bar
        self.out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..h.saturating_sub(2) {
            self.out.queue(cursor::MoveTo(0, row))?;
            self.out.queue(Print("│"))?;
            self.out.queue(cursor::MoveTo(self.width.saturating_sub(1), row))?;
            self.out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud(&mut self) -> io::Result<()> {
        let level_str = format!("Level: {:>2}", self.level);
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
        self.out.queue(Print(&level_str))?;

        let status = match self.outcome {
            Some(Outcome::Victory) => Some(("★ VICTORY", C_VICTORY)),
            Some(Outcome::GameOver) => Some(("✖ SHOT DOWN", C_GAME_OVER)),
            None => None,
        };
        if let Some((text, color)) = status {
            let x = self
                .width
                .saturating_sub(text.chars().count() as u16 + 1);
            self.out.queue(cursor::MoveTo(x, 0))?;
            self.out.queue(style::SetForegroundColor(color))?;
            self.out.queue(Print(text))?;
        }
        Ok(())
    }

    fn draw_hint(&mut self, hint: &str) -> io::Result<()> {
        self.out
            .queue(cursor::MoveTo(1, self.height.saturating_sub(1)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(hint))?;
        Ok(())
    }

    fn try_clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_border()?;
        self.draw_hud()?;
        self.draw_hint(CONTROLS_HINT)
    }

    fn try_fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        let cols = cell_span(rect.x, rect.width, self.playfield.width, self.area_cols());
        let rows = cell_span(rect.y, rect.height, self.playfield.height, self.area_rows());
        let (Some((c0, c1)), Some((r0, r1))) = (cols, rows) else {
            return Ok(());
        };
        let run = "█".repeat(usize::from(c1 - c0 + 1));
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        for row in r0..=r1 {
            self.out.queue(cursor::MoveTo(c0 + 1, row + 2))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    fn try_fill_circle(&mut self, x: f32, y: f32, color: Color) -> io::Result<()> {
        let col = cell_at(x, self.playfield.width, self.area_cols());
        let row = cell_at(y, self.playfield.height, self.area_rows());
        let (Some(col), Some(row)) = (col, row) else {
            return Ok(());
        };
        self.out.queue(cursor::MoveTo(col + 1, row + 2))?;
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        self.out.queue(Print("●"))?;
        Ok(())
    }

    /// Terminal glyphs are far narrower than the requested font, so the text
    /// is boxed and centred horizontally on the row it was aimed at.
    fn try_draw_text(&mut self, text: &str, y: f32, color: Color) -> io::Result<()> {
        let Some(row) = cell_at(y, self.playfield.height, self.area_rows()) else {
            return Ok(());
        };
        let centre_col = self.area_cols() / 2 + 1;

        let inner = text.chars().count() + 4;
        let lines = [
            format!("╔{}╗", "═".repeat(inner)),
            format!("║  {text}  ║"),
            format!("╚{}╝", "═".repeat(inner)),
        ];
        let col = centre_col.saturating_sub((inner as u16 + 2) / 2);
        let top = (row + 2).saturating_sub(1);

        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        for (i, line) in lines.iter().enumerate() {
            self.out.queue(cursor::MoveTo(col, top + i as u16))?;
            self.out.queue(Print(line))?;
        }
        Ok(())
    }

    fn try_present(&mut self) -> io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.height.saturating_sub(1)))?;
        self.out.flush()
    }

    /// Replace the controls hint with the after-game choices.
    pub fn show_after_game_hint(&mut self) -> io::Result<()> {
        self.draw_hint(AFTER_GAME_HINT)?;
        self.try_present()
    }
}

/// Drive `session` on the terminal until it ends, the host quits, or a
/// frame fails to reach the terminal.  The first write error ends the loop
/// right after the frame that hit it.
pub fn play<C, R, S, W>(
    session: &mut Session<C, R>,
    scheduler: &mut S,
    frontend: &mut TerminalFrontend<W>,
) -> io::Result<Option<Outcome>>
where
    C: Clock,
    R: Rng,
    S: FrameScheduler,
    W: Write,
{
    let mut input = InputState::new();
    loop {
        if !scheduler.next_frame(&mut input) {
            info!("quit on level {}", session.world().level);
            return Ok(None);
        }
        let frame = session.frame(&input, frontend);
        if let Some(e) = frontend.take_error() {
            return Err(e);
        }
        if frame == Frame::Stop {
            return Ok(session.world().status.outcome());
        }
    }
}

impl<W: Write> DrawingSurface for TerminalFrontend<W> {
    fn clear(&mut self, _region: Rect) {
        // The playfield always covers the whole screen.
        let result = self.try_clear();
        self.record(result);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let result = self.try_fill_rect(rect, color);
        self.record(result);
    }

    fn fill_circle(&mut self, x: f32, y: f32, _radius: f32, color: Color) {
        let result = self.try_fill_circle(x, y, color);
        self.record(result);
    }

    fn draw_text(&mut self, text: &str, _x: f32, y: f32, _font: Font, color: Color) {
        let result = self.try_draw_text(text, y, color);
        self.record(result);
    }

    fn present(&mut self) {
        let result = self.try_present();
        self.record(result);
    }
}

impl<W: Write> LevelDisplay for TerminalFrontend<W> {
    fn set_level(&mut self, level: u32) {
        self.level = level;
        let result = self.draw_hud();
        self.record(result);
    }
}

impl<W: Write> OutcomePresenter for TerminalFrontend<W> {
    fn announce_victory(&mut self) {
        info!("announcing victory");
        self.outcome = Some(Outcome::Victory);
        let result = self.draw_hud();
        self.record(result);
    }

    fn announce_game_over(&mut self) {
        info!("announcing game over");
        self.outcome = Some(Outcome::GameOver);
        let result = self.draw_hud();
        self.record(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use missile_run::{GameConfig, ManualClock};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A terminal that has gone away: every write and flush fails.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }
    }

    struct Frames {
        clock: ManualClock,
        left: usize,
        run: usize,
    }

    impl FrameScheduler for Frames {
        fn next_frame(&mut self, _input: &mut InputState) -> bool {
            if self.left == 0 {
                return false;
            }
            self.left -= 1;
            self.run += 1;
            self.clock.advance(16);
            true
        }
    }

    fn session(clock: &ManualClock) -> Session<ManualClock, StdRng> {
        Session::new(GameConfig::default(), clock.clone(), StdRng::seed_from_u64(1))
    }

    #[test]
    fn span_covers_whole_axis() {
        assert_eq!(cell_span(0.0, 800.0, 800.0, 80), Some((0, 79)));
    }

    #[test]
    fn span_of_small_box_is_at_least_one_cell() {
        // 20 units on an 800-unit axis over 80 cells = 2 cells
        assert_eq!(cell_span(100.0, 20.0, 800.0, 80), Some((10, 11)));
        // 5 units still shows up as one cell
        assert_eq!(cell_span(100.0, 5.0, 800.0, 80), Some((10, 10)));
    }

    #[test]
    fn span_clips_to_the_playfield() {
        assert_eq!(cell_span(790.0, 20.0, 800.0, 80), Some((79, 79)));
        assert_eq!(cell_span(-10.0, 20.0, 800.0, 80), Some((0, 0)));
    }

    #[test]
    fn span_outside_the_playfield_is_hidden() {
        assert_eq!(cell_span(800.0, 20.0, 800.0, 80), None);
        assert_eq!(cell_span(-30.0, 20.0, 800.0, 80), None);
        assert_eq!(cell_span(0.0, 20.0, 800.0, 0), None);
    }

    #[test]
    fn point_mapping() {
        assert_eq!(cell_at(0.0, 600.0, 20), Some(0));
        assert_eq!(cell_at(599.0, 600.0, 20), Some(19));
        assert_eq!(cell_at(600.0, 600.0, 20), None);
        assert_eq!(cell_at(-1.0, 600.0, 20), None);
    }

    #[test]
    fn draw_calls_write_to_the_buffer() {
        let mut frontend = TerminalFrontend::new(Vec::new(), Playfield::default(), 82, 24);
        frontend.clear(Playfield::default().bounds());
        frontend.fill_rect(Rect::new(100.0, 280.0, 40.0, 40.0), Color::Cyan);
        frontend.set_level(3);
        frontend.present();
        assert!(frontend.take_error().is_none());
        let written = String::from_utf8_lossy(&frontend.out).into_owned();
        assert!(written.contains("█"));
        assert!(written.contains("Level:  3"));
    }

    #[test]
    fn play_stops_on_the_first_failed_frame() {
        let clock = ManualClock::new(0);
        let mut session = session(&clock);
        let mut scheduler = Frames { clock, left: 500, run: 0 };
        let mut frontend = TerminalFrontend::new(Broken, Playfield::default(), 82, 24);

        let err = play(&mut session, &mut scheduler, &mut frontend).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(scheduler.run, 1);
    }

    #[test]
    fn play_runs_until_the_host_quits() {
        let clock = ManualClock::new(0);
        let mut session = session(&clock);
        let mut scheduler = Frames { clock, left: 5, run: 0 };
        let mut frontend = TerminalFrontend::new(Vec::new(), Playfield::default(), 82, 24);

        assert_eq!(play(&mut session, &mut scheduler, &mut frontend).unwrap(), None);
        assert_eq!(scheduler.run, 5);
    }

    #[test]
    fn play_returns_the_outcome() {
        let clock = ManualClock::new(0);
        let mut session = session(&clock);
        session.world_mut().status = missile_run::Status::GameOver;
        let mut scheduler = Frames { clock, left: 5, run: 0 };
        let mut frontend = TerminalFrontend::new(Vec::new(), Playfield::default(), 82, 24);

        let outcome = play(&mut session, &mut scheduler, &mut frontend).unwrap();
        assert_eq!(outcome, Some(Outcome::GameOver));
        assert_eq!(scheduler.run, 1);
    }
}
