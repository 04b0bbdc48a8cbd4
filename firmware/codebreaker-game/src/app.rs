//! CodeBreaker main loop
//!
//! Ties the state machine to a display and the touch channel. Each call to
//! [`CodeBreaker::step`] draws the screen for the current state, blocks on
//! the touch channel for whatever that state needs, and feeds the result
//! back into the machine.

use alloc::string::String;

use codebreaker_input::{Delay, KeyboardLayout, TouchInputChannel, TouchSource, POLL_INTERVAL_MS};

use crate::backend::DisplayBackend;
use crate::game::{GameState, GameStateMachine};
use crate::levels::LevelChallenge;
use crate::screens;
use crate::text_input::TextInputSession;

/// Runtime tuning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Sleep between polls of the touch channel
    pub poll_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

/// The game, wired to its collaborators
pub struct CodeBreaker<'a, D, S, W> {
    display: D,
    source: S,
    delay: W,
    channel: &'a TouchInputChannel,
    layout: KeyboardLayout,
    machine: GameStateMachine<'a>,
    config: GameConfig,
}

impl<'a, D, S, W> CodeBreaker<'a, D, S, W>
where
    D: DisplayBackend,
    S: TouchSource,
    W: Delay,
{
    pub fn new(
        display: D,
        source: S,
        delay: W,
        channel: &'a TouchInputChannel,
        levels: &'a [LevelChallenge],
        config: GameConfig,
    ) -> Self {
        Self {
            display,
            source,
            delay,
            channel,
            layout: KeyboardLayout::standard(),
            machine: GameStateMachine::new(levels),
            config,
        }
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn machine(&self) -> &GameStateMachine<'a> {
        &self.machine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    /// Run the current state to completion and return the next one
    pub fn step(&mut self) -> GameState {
        match self.machine.state() {
            GameState::AwaitingStart => {
                screens::title(&mut self.display);
                self.wait_for_touch();
                self.machine.on_touch()
            }
            GameState::LevelActive(i) => {
                let level = self.machine.levels()[i];
                screens::briefing(&mut self.display, &level);
                self.wait_for_touch();

                let answer = self.collect_answer(level.input_prompt);
                log::info!("level {} answer: {:?}", i + 1, answer);
                self.machine.on_answer(&answer)
            }
            GameState::LevelComplete(_) => {
                screens::level_complete(&mut self.display, self.machine.session().last_code_char());
                self.wait_for_touch();
                self.machine.on_touch()
            }
            GameState::LevelFailed(_) => {
                screens::level_failed(&mut self.display);
                self.wait_for_touch();
                self.machine.on_touch()
            }
            GameState::GameComplete => {
                screens::game_complete(&mut self.display, self.machine.session().secret_code());
                self.wait_for_touch();
                self.machine.on_touch()
            }
        }
    }

    /// Play one full game, through the restart touch, and return its code
    pub fn play_round(&mut self) -> String {
        while self.step() != GameState::GameComplete {}

        let code = String::from(self.machine.session().secret_code());
        self.step();
        code
    }

    /// Play forever; the game restarts after every completion
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn wait_for_touch(&mut self) {
        self.channel.clear();
        self.channel
            .wait_for_touch(&mut self.source, &mut self.delay, self.config.poll_interval_ms);
    }

    fn collect_answer(&mut self, prompt: &str) -> String {
        screens::input(&mut self.display, prompt, &self.layout);

        let display = &mut self.display;
        TextInputSession::new(&self.layout).collect(
            self.channel,
            &mut self.source,
            &mut self.delay,
            self.config.poll_interval_ms,
            |text| screens::input_line(display, text),
        )
    }
}
