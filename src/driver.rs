//! The frame loop.
//!
//! A [`Session`] runs one tick per display refresh until the world reaches a
//! terminal state.  The host supplies the refresh cadence and keyboard state
//! through [`FrameScheduler`] and receives all output through a [`Frontend`].

use log::info;
use rand::Rng;

use crate::clock::Clock;
use crate::compute::{self, Phase};
use crate::config::GameConfig;
use crate::draw;
use crate::entities::{Outcome, World};
use crate::input::InputState;
use crate::surface::Frontend;

/// Whether the host should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Stop,
}

/// Host-side frame pacing.
pub trait FrameScheduler {
    /// Wait for the next refresh and bring `input` up to date.  Returns
    /// `false` when the host wants the session to stop (e.g. the user quit).
    fn next_frame(&mut self, input: &mut InputState) -> bool;
}

pub struct Session<C: Clock, R: Rng> {
    config: GameConfig,
    world: World,
    clock: C,
    rng: R,
    message_drawn: bool,
}

impl<C: Clock, R: Rng> Session<C, R> {
    pub fn new(config: GameConfig, clock: C, rng: R) -> Self {
        let world = World::new(config.playfield, clock.now());
        Self {
            config,
            world,
            clock,
            rng,
            message_drawn: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for hosts and tests that stage a particular situation.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Throw the current world away and start again from level 1.
    pub fn restart(&mut self) {
        self.world = World::new(self.config.playfield, self.clock.now());
        self.message_drawn = false;
        info!("session restarted");
    }

    /// Run one frame.
    ///
    /// While running: clear, tick the world with draw calls at each phase,
    /// then report a level change or the terminal transition.  Once the world
    /// has ended, the first call draws the end message and every call returns
    /// [`Frame::Stop`] without touching the world.
    pub fn frame<F: Frontend>(&mut self, input: &InputState, frontend: &mut F) -> Frame {
        if let Some(outcome) = self.world.status.outcome() {
            if !self.message_drawn {
                draw::draw_terminal_message(outcome, &self.world.playfield, frontend);
                frontend.present();
                self.message_drawn = true;
            }
            return Frame::Stop;
        }

        let now = self.clock.now();
        frontend.clear(self.world.playfield.bounds());
        let report = compute::tick_with(
            &mut self.world,
            input,
            now,
            &mut self.rng,
            |phase, world| match phase {
                Phase::PlayerUpdated => {
                    draw::draw_bullets(&world.player.bullets, frontend);
                    draw::draw_player(&world.player, frontend);
                }
                Phase::MissilesAdvanced => draw::draw_missiles(&world.missiles, frontend),
            },
        );

        if let Some(level) = report.new_level {
            frontend.set_level(level);
        }
        match report.outcome {
            Some(Outcome::Victory) => frontend.announce_victory(),
            Some(Outcome::GameOver) => frontend.announce_game_over(),
            None => {}
        }
        frontend.present();
        Frame::Continue
    }

    /// Drive frames until the session ends or the host stops scheduling.
    /// Returns the outcome, or `None` if the host quit first.
    pub fn run<S: FrameScheduler, F: Frontend>(
        &mut self,
        scheduler: &mut S,
        frontend: &mut F,
    ) -> Option<Outcome> {
        let mut input = InputState::new();
        loop {
            if !scheduler.next_frame(&mut input) {
                info!("host stopped the session on level {}", self.world.level);
                return None;
            }
            if self.frame(&input, frontend) == Frame::Stop {
                return self.world.status.outcome();
            }
        }
    }
}
