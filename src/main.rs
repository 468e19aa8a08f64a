mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use missile_run::{Action, FrameScheduler, GameConfig, InputState, LevelDisplay, Session, SystemClock};

use display::TerminalFrontend;

/// Dodge and shoot down incoming missiles for ten levels.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Target frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for missile placement (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file.  The terminal is in raw mode, so logs are
    /// off unless a file is given (or RUST_LOG is set).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so ~130 ms is always refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => {
            Some(Action::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') => {
            Some(Action::Down)
        }
        KeyCode::Char(' ') => Some(Action::Fire),
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Frame scheduler ───────────────────────────────────────────────────────────

/// Paces frames and turns key events into held actions.
///
/// Keys are tracked by the instant of their last press/repeat event and count
/// as held while that is within `HOLD_WINDOW`.  On keyboard-enhancement
/// terminals (kitty protocol) a release event drops the key immediately.
struct TerminalScheduler<'a> {
    rx: &'a mpsc::Receiver<Event>,
    frame: Duration,
    frame_start: Option<Instant>,
    key_seen: HashMap<KeyCode, Instant>,
}

impl<'a> TerminalScheduler<'a> {
    fn new(rx: &'a mpsc::Receiver<Event>, frame: Duration) -> Self {
        Self {
            rx,
            frame,
            frame_start: None,
            key_seen: HashMap::new(),
        }
    }
}

impl FrameScheduler for TerminalScheduler<'_> {
    fn next_frame(&mut self, input: &mut InputState) -> bool {
        if let Some(start) = self.frame_start {
            let elapsed = start.elapsed();
            if elapsed < self.frame {
                thread::sleep(self.frame - elapsed);
            }
        }
        let now = Instant::now();
        self.frame_start = Some(now);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = self.rx.try_recv() {
            let Event::Key(KeyEvent {
                code, kind, modifiers, ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    if is_quit(&code, modifiers) {
                        return false;
                    }
                    self.key_seen.insert(code, now);
                }
                KeyEventKind::Repeat => {
                    self.key_seen.insert(code, now);
                }
                KeyEventKind::Release => {
                    self.key_seen.remove(&code);
                }
            }
        }

        self.key_seen
            .retain(|_, seen| now.duration_since(*seen) <= HOLD_WINDOW);
        input.clear();
        for code in self.key_seen.keys() {
            if let Some(action) = action_for(code) {
                input.press(action);
            }
        }
        true
    }
}

// ── Menus ─────────────────────────────────────────────────────────────────────

enum TitleChoice {
    Start,
    Quit,
}

enum AfterGame {
    Again,
    Menu,
    Quit,
}

fn show_title<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<TitleChoice> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(&str, Color)] = &[
        ("★  MISSILE  RUN  ★", Color::Cyan),
        ("", Color::White),
        ("Survive 10 levels of incoming missiles.", Color::White),
        ("Each level lasts 15 seconds and gets faster.", Color::DarkGrey),
        ("", Color::White),
        ("[SPACE] Start     [Q] Quit", Color::Yellow),
        ("", Color::White),
        ("↑ ↓ / W S : Move   SPACE : Shoot", Color::DarkGrey),
    ];
    let top = cy.saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            top + i as u16,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let Ok(ev) = rx.recv() else {
            return Ok(TitleChoice::Quit);
        };
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = ev
        {
            match code {
                KeyCode::Char(' ') | KeyCode::Enter => return Ok(TitleChoice::Start),
                _ if is_quit(&code, modifiers) => return Ok(TitleChoice::Quit),
                _ => {}
            }
        }
    }
}

fn wait_after_game(rx: &mpsc::Receiver<Event>) -> AfterGame {
    loop {
        let Ok(ev) = rx.recv() else {
            return AfterGame::Quit;
        };
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) = ev
        {
            match code {
                KeyCode::Char('r') | KeyCode::Char('R') => return AfterGame::Again,
                KeyCode::Char('m') | KeyCode::Char('M') => return AfterGame::Menu,
                _ if is_quit(&code, modifiers) => return AfterGame::Quit,
                _ => {}
            }
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&PathBuf>) -> std::io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off"))
                .init();
        }
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = GameConfig::default().with_fps(cli.fps).with_seed(cli.seed);
    info!("starting with {:?}", config);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config.clone(), SystemClock::new(), rng);

    loop {
        if let TitleChoice::Quit = show_title(out, rx)? {
            return Ok(());
        }
        session.restart();

        loop {
            let (width, height) = terminal::size()?;
            let mut frontend = TerminalFrontend::new(&mut *out, config.playfield, width, height);
            frontend.set_level(session.world().level);

            let mut scheduler = TerminalScheduler::new(rx, config.frame);
            // Quit pressed mid-game
            if display::play(&mut session, &mut scheduler, &mut frontend)?.is_none() {
                return Ok(());
            }

            frontend.show_after_game_hint()?;
            match wait_after_game(rx) {
                AfterGame::Again => session.restart(),
                AfterGame::Menu => break,
                AfterGame::Quit => return Ok(()),
            }
        }
    }
}
