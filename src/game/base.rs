//! Game Lifecycle
//!
//! Every game variant embeds a [`GameCore`] (name, roster, listeners,
//! lifecycle state) and implements [`Game`] for its own setup, loop and
//! teardown. [`Game::run`] drives the lifecycle:
//!
//! ```text
//! Uninitialized --setup--> Configured --run--> Running --> Finished
//! ```
//!
//! ## Interruption
//!
//! If the loop is cancelled, `run` logs the interruption, raises no
//! `on_game_ended`, still tears the game down so outputs are reset, and
//! reports [`GameOutcome::Interrupted`] to whoever joins the worker.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::core::interrupt::CancelToken;
use crate::error::GameError;
use crate::game::listener::GameListener;
use crate::game::score::Score;
use crate::player::Player;

/// Most players a game can seat.
pub const MAX_PLAYERS: usize = 4;

/// Lifecycle state of a game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Created, no roster yet.
    Uninitialized,
    /// Roster bound, ready to run.
    Configured,
    /// Loop in progress.
    Running,
    /// Run over (completed or interrupted).
    Finished,
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// The loop finished and listeners were given the score.
    Completed(Score),
    /// The loop was cancelled; no score was produced.
    Interrupted,
}

impl GameOutcome {
    /// Final score, if the run completed.
    pub fn score(&self) -> Option<&Score> {
        match self {
            GameOutcome::Completed(score) => Some(score),
            GameOutcome::Interrupted => None,
        }
    }
}

/// State shared by all game variants.
pub struct GameCore {
    name: String,
    players: Vec<Player>,
    listeners: Vec<Arc<dyn GameListener>>,
    state: GameState,
    simulation: bool,
    cancel: CancelToken,
}

impl GameCore {
    /// Create an empty core for a game called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
            listeners: Vec::new(),
            state: GameState::Uninitialized,
            simulation: false,
            cancel: CancelToken::new(),
        }
    }

    /// Suppress physical pulses, only logging them.
    pub fn with_simulation(mut self, simulation: bool) -> Self {
        self.simulation = simulation;
        self
    }

    /// Name of the game.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roster in seat order; empty before setup.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether pulses are suppressed.
    pub fn is_simulation(&self) -> bool {
        self.simulation
    }

    /// Token that interrupts this game's blocking waits.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Register a listener. Listeners are notified in registration order.
    pub fn add_listener(&mut self, listener: Arc<dyn GameListener>) {
        self.listeners.push(listener);
    }

    /// Bind the roster. Only allowed once, with 1 to [`MAX_PLAYERS`] players.
    pub fn bind_players(&mut self, players: Vec<Player>) -> Result<(), GameError> {
        if self.state != GameState::Uninitialized {
            return Err(GameError::InvalidState {
                expected: GameState::Uninitialized,
                actual: self.state,
            });
        }
        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(GameError::invalid(format!(
                "{} needs 1 to {} players, got {}",
                self.name,
                MAX_PLAYERS,
                players.len()
            )));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].iter().any(|p| p.id() == player.id()) {
                return Err(GameError::invalid(format!("{} is seated twice", player.id())));
            }
        }

        self.players = players;
        self.state = GameState::Configured;
        Ok(())
    }

    fn set_state(&mut self, state: GameState) {
        debug!("{}: {:?} -> {:?}", self.name, self.state, state);
        self.state = state;
    }

    /// Notify listeners that a round is starting.
    pub fn raise_round_started(&self, current: u32, total: u32) {
        for listener in &self.listeners {
            listener.on_round_started(self, current, total);
        }
    }

    /// Notify listeners that a round has ended.
    pub fn raise_round_ended(&self, current: u32, total: u32) {
        for listener in &self.listeners {
            listener.on_round_ended(self, current, total);
        }
    }

    /// Notify listeners of the final score.
    pub fn raise_game_ended(&self, score: &Score) {
        for listener in &self.listeners {
            listener.on_game_ended(self, score);
        }
    }

    /// Pulse a player's shock and indicator outputs together.
    ///
    /// With `blocking` the call returns once the shock pulse is over. Nobody
    /// is shocked once the game has been cancelled.
    pub fn shock_player(
        &self,
        player: &Player,
        duration: Duration,
        blocking: bool,
    ) -> Result<(), GameError> {
        if self.cancel.is_cancelled() {
            return Err(GameError::Interrupted);
        }
        info!("Shocking '{}' for {} ms", player.name(), duration.as_millis());
        if self.simulation {
            warn!("Simulation mode, no actual pin triggering");
            return Ok(());
        }
        player.indicator_pin().pulse(duration, false);
        player.shock_pin().pulse(duration, blocking);
        Ok(())
    }

    /// Interruptible sleep on the game's cancel token.
    pub fn sleep(&self, duration: Duration) -> Result<(), GameError> {
        self.cancel.sleep(duration)
    }

    /// Drive every player's outputs low.
    pub fn reset_outputs(&self) {
        for player in &self.players {
            player.reset_output();
        }
    }
}

/// A playable game variant.
///
/// Implementors provide the variant-specific steps; [`run`](Game::run) is
/// the worker entry point and should not be overridden.
pub trait Game: Send {
    /// Shared state.
    fn core(&self) -> &GameCore;

    /// Shared state, mutably.
    fn core_mut(&mut self) -> &mut GameCore;

    /// Bind the roster and prepare. The game must not run unless this
    /// returns `Ok`.
    fn setup(&mut self, players: Vec<Player>) -> Result<(), GameError>;

    /// Play the game and produce the final score.
    ///
    /// Fails with [`GameError::Interrupted`] if a wait is cancelled.
    fn run_loop(&mut self) -> Result<Score, GameError>;

    /// Release everything and reset all outputs. Safe to call repeatedly.
    fn teardown(&mut self) -> Result<(), GameError>;

    /// Name of the game.
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Register a listener.
    fn add_listener(&mut self, listener: Arc<dyn GameListener>) {
        self.core_mut().add_listener(listener);
    }

    /// Run the game once: loop, notify, tear down.
    fn run(&mut self) -> Result<GameOutcome, GameError> {
        let state = self.core().state();
        if state != GameState::Configured {
            error!("Refusing to run {} while {:?}", self.name(), state);
            return Err(GameError::InvalidState {
                expected: GameState::Configured,
                actual: state,
            });
        }

        self.core_mut().set_state(GameState::Running);
        info!("{} started with {} players", self.name(), self.core().players().len());

        let result = match self.run_loop() {
            Ok(score) => {
                self.core().raise_game_ended(&score);
                Ok(GameOutcome::Completed(score))
            }
            Err(GameError::Interrupted) => {
                error!("{} was interrupted, no winner will be announced", self.name());
                Ok(GameOutcome::Interrupted)
            }
            Err(e) => {
                error!("Error while in game loop of {}: {}", self.name(), e);
                Err(e)
            }
        };

        if let Err(e) = self.teardown() {
            warn!("Teardown of {} failed: {}", self.name(), e);
        }
        self.core_mut().set_state(GameState::Finished);

        result
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{PinEvent, PinLog};
    use crate::testing::{seat_players, Notice, RecordingListener};

    /// Minimal variant: plays a fixed number of rounds, each awarding seat 1.
    struct CountingGame {
        core: GameCore,
        rounds: u32,
        pause: Duration,
        teardowns: u32,
    }

    impl CountingGame {
        fn new(rounds: u32) -> Self {
            Self {
                core: GameCore::new("Counting"),
                rounds,
                pause: Duration::ZERO,
                teardowns: 0,
            }
        }
    }

    impl Game for CountingGame {
        fn core(&self) -> &GameCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut GameCore {
            &mut self.core
        }

        fn setup(&mut self, players: Vec<Player>) -> Result<(), GameError> {
            self.core.bind_players(players)
        }

        fn run_loop(&mut self) -> Result<Score, GameError> {
            let mut score = Score::for_players(self.core.players());
            for round in 1..=self.rounds {
                self.core.raise_round_started(round, self.rounds);
                score.add_point(self.core.players()[0].id());
                self.core.raise_round_ended(round, self.rounds);
                self.core.sleep(self.pause)?;
            }
            Ok(score)
        }

        fn teardown(&mut self) -> Result<(), GameError> {
            self.teardowns += 1;
            self.core.reset_outputs();
            Ok(())
        }
    }

    #[test]
    fn test_lifecycle_states() {
        let log = PinLog::new();
        let mut game = CountingGame::new(2);
        assert_eq!(game.core().state(), GameState::Uninitialized);

        game.setup(seat_players(2, &log)).unwrap();
        assert_eq!(game.core().state(), GameState::Configured);

        let outcome = game.run().unwrap();
        assert_eq!(game.core().state(), GameState::Finished);
        assert_eq!(outcome.score().and_then(|s| s.get(crate::player::PlayerId::new(1))), Some(2));
        assert_eq!(game.teardowns, 1);
    }

    #[test]
    fn test_run_before_setup_rejected() {
        let listener = Arc::new(RecordingListener::default());
        let mut game = CountingGame::new(1);
        game.add_listener(listener.clone());

        let result = game.run();
        assert!(matches!(
            result,
            Err(GameError::InvalidState { expected: GameState::Configured, actual: GameState::Uninitialized })
        ));
        assert!(listener.notices().is_empty());
    }

    #[test]
    fn test_second_run_rejected() {
        let log = PinLog::new();
        let mut game = CountingGame::new(1);
        game.setup(seat_players(1, &log)).unwrap();
        game.run().unwrap();

        assert!(matches!(game.run(), Err(GameError::InvalidState { actual: GameState::Finished, .. })));
    }

    #[test]
    fn test_roster_fixed_after_setup() {
        let log = PinLog::new();
        let mut game = CountingGame::new(1);
        game.setup(seat_players(2, &log)).unwrap();

        let again = game.setup(seat_players(3, &log));
        assert!(matches!(again, Err(GameError::InvalidState { .. })));
        assert_eq!(game.core().players().len(), 2);
    }

    #[test]
    fn test_roster_size_bounds() {
        let log = PinLog::new();
        assert!(matches!(
            CountingGame::new(1).setup(Vec::new()),
            Err(GameError::InvalidArgument(_))
        ));

        let mut five = seat_players(4, &log);
        five.push(seat_players(1, &log).remove(0));
        assert!(CountingGame::new(1).setup(five).is_err());
    }

    #[test]
    fn test_listeners_notified_in_order() {
        let log = PinLog::new();
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let journal = Arc::new(parking_lot::Mutex::new(Vec::new()));
        first.share_journal("first", &journal);
        second.share_journal("second", &journal);

        let mut game = CountingGame::new(1);
        game.add_listener(first.clone());
        game.add_listener(second.clone());
        game.setup(seat_players(1, &log)).unwrap();
        game.run().unwrap();

        let entries = journal.lock().clone();
        assert_eq!(
            entries,
            vec![
                "first:round_started:1",
                "second:round_started:1",
                "first:round_ended:1",
                "second:round_ended:1",
                "first:game_ended",
                "second:game_ended",
            ]
        );
    }

    #[test]
    fn test_interruption_skips_game_ended_but_tears_down() {
        let log = PinLog::new();
        let listener = Arc::new(RecordingListener::default());
        let mut game = CountingGame::new(3);
        game.pause = Duration::from_secs(30);
        game.add_listener(listener.clone());
        game.setup(seat_players(2, &log)).unwrap();

        game.core().cancel_token().cancel();
        let outcome = game.run().unwrap();

        assert_eq!(outcome, GameOutcome::Interrupted);
        assert_eq!(game.teardowns, 1);
        assert_eq!(game.core().state(), GameState::Finished);
        assert!(!listener.notices().iter().any(|n| matches!(n, Notice::GameEnded(_))));
        assert_eq!(log.events_for("p1-shock").last(), Some(&PinEvent::Low));
    }

    #[test]
    fn test_shock_player_pulses_both_outputs() {
        let log = PinLog::new();
        let mut core = GameCore::new("Test");
        core.bind_players(seat_players(1, &log)).unwrap();
        let player = core.players()[0].clone();

        core.shock_player(&player, Duration::from_millis(300), true).unwrap();

        let ms300 = Duration::from_millis(300);
        assert_eq!(
            log.events_for("p1-led"),
            vec![PinEvent::Pulse { duration: ms300, blocking: false }]
        );
        assert_eq!(
            log.events_for("p1-shock"),
            vec![PinEvent::Pulse { duration: ms300, blocking: true }]
        );
    }

    #[test]
    fn test_simulation_suppresses_pulses() {
        let log = PinLog::new();
        let mut core = GameCore::new("Test").with_simulation(true);
        core.bind_players(seat_players(1, &log)).unwrap();
        let player = core.players()[0].clone();

        core.shock_player(&player, Duration::from_millis(300), false).unwrap();

        assert!(core.is_simulation());
        assert!(log.pulsed_pins().is_empty());
    }

    #[test]
    fn test_no_shock_after_cancel() {
        let log = PinLog::new();
        let mut core = GameCore::new("Test");
        core.bind_players(seat_players(1, &log)).unwrap();
        let player = core.players()[0].clone();

        core.cancel_token().cancel();

        let result = core.shock_player(&player, Duration::from_millis(300), true);
        assert!(matches!(result, Err(GameError::Interrupted)));
        assert!(log.pulsed_pins().is_empty());
    }
}
