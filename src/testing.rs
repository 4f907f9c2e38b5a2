//! Shared test fixtures.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::game::base::GameCore;
use crate::game::listener::GameListener;
use crate::game::score::Score;
use crate::hardware::{PinLayout, PinLog};
use crate::player::Player;

/// `n` players on virtual pins recording into `log`.
pub fn seat_players(n: usize, log: &PinLog) -> Vec<Player> {
    let names: Vec<String> = (1..=n).map(|i| format!("Player {}", i)).collect();
    PinLayout::default()
        .virtual_players(&names, log)
        .expect("valid test roster")
}

/// A notification received by [`RecordingListener`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    RoundStarted(u32, u32),
    RoundEnded(u32, u32),
    GameEnded(Score),
}

type Journal = Arc<Mutex<Vec<String>>>;

/// Listener that remembers everything it is told.
#[derive(Default)]
pub struct RecordingListener {
    notices: Mutex<Vec<Notice>>,
    journal: Mutex<Option<(String, Journal)>>,
}

impl RecordingListener {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Also append `label:event` lines to a journal shared across listeners.
    pub fn share_journal(&self, label: &str, journal: &Journal) {
        *self.journal.lock() = Some((label.to_string(), Arc::clone(journal)));
    }

    fn record(&self, notice: Notice) {
        if let Some((label, journal)) = self.journal.lock().as_ref() {
            let line = match &notice {
                Notice::RoundStarted(current, _) => format!("{}:round_started:{}", label, current),
                Notice::RoundEnded(current, _) => format!("{}:round_ended:{}", label, current),
                Notice::GameEnded(_) => format!("{}:game_ended", label),
            };
            journal.lock().push(line);
        }
        self.notices.lock().push(notice);
    }
}

impl GameListener for RecordingListener {
    fn on_game_ended(&self, _game: &GameCore, score: &Score) {
        self.record(Notice::GameEnded(score.clone()));
    }

    fn on_round_started(&self, _game: &GameCore, current: u32, total: u32) {
        self.record(Notice::RoundStarted(current, total));
    }

    fn on_round_ended(&self, _game: &GameCore, current: u32, total: u32) {
        self.record(Notice::RoundEnded(current, total));
    }
}
