//! Game state machine
//!
//! ```text
//!  AwaitingStart --touch--> LevelActive(0)
//!  LevelActive(i) --answer--> LevelComplete(i) | LevelFailed(i)
//!  LevelComplete(i) / LevelFailed(i) --touch--> LevelActive(i+1) | GameComplete
//!  GameComplete --touch--> (reset) AwaitingStart
//! ```
//!
//! Transitions only happen here; screens read the state but never write it.

use alloc::string::String;

use crate::levels::LevelChallenge;

/// Where the game is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Title screen, waiting for the first touch
    AwaitingStart,
    /// Level `i` is being played
    LevelActive(usize),
    /// Level `i` answered correctly
    LevelComplete(usize),
    /// Level `i` answered wrongly; no retry
    LevelFailed(usize),
    /// All levels played
    GameComplete,
}

/// Progress through one game
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameSession {
    current_level: usize,
    secret_code: String,
    /// Level whose character was appended last
    last_passed: Option<usize>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Characters collected so far, in level order
    pub fn secret_code(&self) -> &str {
        &self.secret_code
    }

    /// Most recently collected character
    pub fn last_code_char(&self) -> Option<char> {
        self.secret_code.chars().last()
    }

    /// Append the code character for the level being played
    ///
    /// Refused if `level` is not the current level or that level already
    /// contributed. Levels only move forward, so each level appends at most
    /// once per game.
    fn record_pass(&mut self, level: usize, code_char: char) -> bool {
        if level != self.current_level || self.last_passed == Some(level) {
            return false;
        }
        self.secret_code.push(code_char);
        self.last_passed = Some(level);
        true
    }

    fn advance_to(&mut self, level: usize) {
        self.current_level = level;
    }

    /// Back to level 0 with an empty code
    pub fn reset(&mut self) {
        self.current_level = 0;
        self.secret_code.clear();
        self.last_passed = None;
    }
}

/// Sequences the levels and owns the session
pub struct GameStateMachine<'a> {
    levels: &'a [LevelChallenge],
    state: GameState,
    session: GameSession,
}

impl<'a> GameStateMachine<'a> {
    /// `levels` must not be empty
    pub fn new(levels: &'a [LevelChallenge]) -> Self {
        debug_assert!(!levels.is_empty());
        Self {
            levels,
            state: GameState::AwaitingStart,
            session: GameSession::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn levels(&self) -> &'a [LevelChallenge] {
        self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level being played or just finished
    pub fn current_level(&self) -> Option<&'a LevelChallenge> {
        match self.state {
            GameState::LevelActive(i) | GameState::LevelComplete(i) | GameState::LevelFailed(i) => {
                self.levels.get(i)
            }
            GameState::AwaitingStart | GameState::GameComplete => None,
        }
    }

    /// A touch on a "touch to continue" screen
    pub fn on_touch(&mut self) -> GameState {
        let next = match self.state {
            GameState::AwaitingStart => {
                self.session.reset();
                GameState::LevelActive(0)
            }
            GameState::LevelComplete(i) | GameState::LevelFailed(i) => {
                if i + 1 >= self.levels.len() {
                    GameState::GameComplete
                } else {
                    self.session.advance_to(i + 1);
                    GameState::LevelActive(i + 1)
                }
            }
            GameState::GameComplete => {
                self.session.reset();
                GameState::AwaitingStart
            }
            GameState::LevelActive(_) => {
                log::debug!("touch ignored while a level is active");
                return self.state;
            }
        };

        self.transition(next)
    }

    /// The committed answer for the active level
    pub fn on_answer(&mut self, answer: &str) -> GameState {
        let GameState::LevelActive(i) = self.state else {
            log::debug!("answer ignored in state {:?}", self.state);
            return self.state;
        };

        let level = &self.levels[i];
        let next = if level.evaluate(answer) {
            self.session.record_pass(i, level.code_char);
            GameState::LevelComplete(i)
        } else {
            GameState::LevelFailed(i)
        };

        self.transition(next)
    }

    fn transition(&mut self, next: GameState) -> GameState {
        log::info!(
            "{:?} -> {:?} (code: {:?})",
            self.state,
            next,
            self.session.secret_code()
        );
        self.state = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LEVELS;

    fn assert_invariant(machine: &GameStateMachine) {
        let session = machine.session();
        assert!(session.current_level() < machine.level_count());
        let passed_through = match machine.state() {
            GameState::LevelComplete(i) | GameState::LevelFailed(i) => i + 1,
            GameState::GameComplete => machine.level_count(),
            _ => session.current_level(),
        };
        assert!(session.secret_code().chars().count() <= passed_through);
    }

    fn play(machine: &mut GameStateMachine, answers: &[&str]) {
        assert_eq!(machine.on_touch(), GameState::LevelActive(0));
        for (i, answer) in answers.iter().enumerate() {
            assert_eq!(machine.state(), GameState::LevelActive(i));
            machine.on_answer(answer);
            assert_invariant(machine);
            machine.on_touch();
            assert_invariant(machine);
        }
    }

    #[test]
    fn test_starts_waiting() {
        let machine = GameStateMachine::new(&LEVELS);
        assert_eq!(machine.state(), GameState::AwaitingStart);
        assert_eq!(machine.session().secret_code(), "");
        assert!(machine.current_level().is_none());
    }

    #[test]
    fn test_first_level_pass() {
        let mut machine = GameStateMachine::new(&LEVELS);
        machine.on_touch();
        assert_eq!(machine.on_answer("hello"), GameState::LevelComplete(0));
        assert_eq!(machine.session().secret_code(), "A");
        assert_eq!(machine.session().last_code_char(), Some('A'));
    }

    #[test]
    fn test_fail_does_not_retry() {
        let mut machine = GameStateMachine::new(&LEVELS);
        machine.on_touch();
        machine.on_answer("HELLO");
        machine.on_touch();
        assert_eq!(machine.on_answer("USER_123"), GameState::LevelFailed(1));
        assert_eq!(machine.session().secret_code(), "A");
        assert_eq!(machine.on_touch(), GameState::LevelActive(2));
    }

    #[test]
    fn test_mixed_results_reach_game_complete() {
        let mut machine = GameStateMachine::new(&LEVELS);
        play(
            &mut machine,
            &["HELLO", "USER_123", "101", "MEMOIZATION", "THE SECRET IS IN THE LAST LEVEL"],
        );

        assert_eq!(machine.state(), GameState::GameComplete);
        assert_eq!(machine.session().secret_code(), "ACE");
        assert_eq!(machine.session().secret_code().len(), 3);
    }

    #[test]
    fn test_all_fail_still_completes() {
        let mut machine = GameStateMachine::new(&LEVELS);
        play(&mut machine, &["", "", "", "", ""]);
        assert_eq!(machine.state(), GameState::GameComplete);
        assert_eq!(machine.session().secret_code(), "");
    }

    #[test]
    fn test_restart_resets_session() {
        let mut machine = GameStateMachine::new(&LEVELS);
        play(
            &mut machine,
            &["HELLO", "user_123", "101", "DYNAMIC PROGRAMMING", "the secret is in the last level"],
        );
        assert_eq!(machine.session().secret_code(), "ABCDE");

        assert_eq!(machine.on_touch(), GameState::AwaitingStart);
        assert_eq!(machine.session().secret_code(), "");
        assert_eq!(machine.session().current_level(), 0);

        play(&mut machine, &["HELLO", "", "", "", ""]);
        assert_eq!(machine.session().secret_code(), "A");
    }

    #[test]
    fn test_out_of_place_events_are_ignored() {
        let mut machine = GameStateMachine::new(&LEVELS);
        assert_eq!(machine.on_answer("HELLO"), GameState::AwaitingStart);
        assert_eq!(machine.session().secret_code(), "");

        machine.on_touch();
        assert_eq!(machine.on_touch(), GameState::LevelActive(0));

        machine.on_answer("HELLO");
        assert_eq!(machine.on_answer("HELLO"), GameState::LevelComplete(0));
        assert_eq!(machine.session().secret_code(), "A");
    }

    #[test]
    fn test_session_refuses_duplicate_pass() {
        let mut session = GameSession::new();
        assert!(session.record_pass(0, 'A'));
        assert!(!session.record_pass(0, 'A'));
        assert!(!session.record_pass(3, 'D'));
        assert_eq!(session.secret_code(), "A");
    }

    #[test]
    fn test_session_refuses_duplicate_pass_after_failure() {
        let mut session = GameSession::new();
        // levels 0 and 1 failed
        session.advance_to(2);
        assert!(session.record_pass(2, 'C'));
        assert!(!session.record_pass(2, 'C'));
        assert_eq!(session.secret_code(), "C");

        session.advance_to(3);
        assert!(session.record_pass(3, 'D'));
        assert!(!session.record_pass(3, 'D'));
        assert_eq!(session.secret_code(), "CD");

        session.reset();
        assert!(session.record_pass(0, 'A'));
        assert_eq!(session.secret_code(), "A");
    }

    #[test]
    fn test_repeated_answer_after_failure_adds_one_char() {
        let mut machine = GameStateMachine::new(&LEVELS);
        machine.on_touch();
        machine.on_answer("");
        machine.on_touch();
        machine.on_answer("");
        machine.on_touch();

        assert_eq!(machine.on_answer("101"), GameState::LevelComplete(2));
        assert_eq!(machine.on_answer("101"), GameState::LevelComplete(2));
        assert_eq!(machine.session().secret_code(), "C");
    }
}
