use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::core::config::{GameConfig, Player};
use crate::core::standings::{self, Standings};

pub const CORRECT_POINTS: i32 = 5;
pub const WRONG_PENALTY: i32 = 3;

/// Where secret numbers come from. Injected so tests can pin the draw.
pub trait SecretSource {
    /// Draw uniformly from `1..=max_number`. Every call is an independent draw.
    fn draw(&mut self, max_number: u32) -> u32;
}

/// Production source backed by any `rand` generator.
pub struct RngSecret<R: Rng>(pub R);

impl<R: Rng> SecretSource for RngSecret<R> {
    fn draw(&mut self, max_number: u32) -> u32 {
        self.0.random_range(1..=max_number)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("guess is not a whole number")]
    InvalidGuessFormat,
    #[error("no turn is in progress")]
    TurnNotStarted,
    #[error("the game is over")]
    GameOver,
    #[error("the game is still in progress")]
    GameInProgress,
}

/// Display data for the turn about to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub round: u32,
    pub total_rounds: u32,
    pub player: String,
    pub max_number: u32,
}

/// What happened when a guess was scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessOutcome {
    pub player: String,
    pub correct: bool,
    pub secret: u32,
    pub score: i32,
}

/// The turn/round state machine. One instance per game; owns the roster,
/// the current secret, and the scores. Consumes the config on construction.
pub struct TurnEngine<S: SecretSource = RngSecret<ThreadRng>> {
    players: Vec<Player>,
    total_rounds: u32,
    max_number: u32,
    current_round: u32,
    current_player: usize,
    secret: Option<u32>,
    finished: bool,
    source: S,
}

impl TurnEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_source(config, RngSecret(rand::rng()))
    }
}

impl<S: SecretSource> TurnEngine<S> {
    pub fn with_source(config: GameConfig, source: S) -> Self {
        Self {
            players: config.players,
            total_rounds: config.total_rounds,
            max_number: config.max_number,
            current_round: 1,
            current_player: 0,
            secret: None,
            finished: false,
            source,
        }
    }

    /// Draw a fresh secret and hand back the display state for the turn.
    pub fn start_turn(&mut self) -> Result<TurnView, EngineError> {
        if self.finished {
            return Err(EngineError::GameOver);
        }
        self.draw_secret();
        Ok(self.view())
    }

    /// Score the current player's guess and advance the game. A guess that
    /// does not parse leaves all state untouched and does not consume the
    /// turn; a parsed guess always does, right or wrong.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, EngineError> {
        if self.finished {
            return Err(EngineError::GameOver);
        }
        let secret = self.secret.ok_or(EngineError::TurnNotStarted)?;
        let guess: i64 = raw
            .trim()
            .parse()
            .map_err(|_| EngineError::InvalidGuessFormat)?;

        let correct = guess == i64::from(secret);
        let player = &mut self.players[self.current_player];
        if correct {
            player.score += CORRECT_POINTS;
        } else {
            player.score -= WRONG_PENALTY;
        }
        let outcome = GuessOutcome {
            player: player.name.clone(),
            correct,
            secret,
            score: player.score,
        };
        info!(
            player = %outcome.player,
            guess,
            secret,
            correct,
            score = outcome.score,
            "guess scored"
        );

        self.advance();
        Ok(outcome)
    }

    /// The sole transition of the state machine: next player, next round on
    /// wrap, game over once the rounds run out.
    fn advance(&mut self) {
        self.current_player += 1;
        if self.current_player >= self.players.len() {
            self.current_player = 0;
            self.current_round += 1;
        }

        if self.current_round > self.total_rounds {
            self.finished = true;
            self.secret = None;
            info!("game over");
        } else {
            self.draw_secret();
        }
    }

    fn draw_secret(&mut self) {
        self.secret = Some(self.source.draw(self.max_number));
        info!(
            round = self.current_round,
            player = %self.players[self.current_player].name,
            "turn started"
        );
    }

    fn view(&self) -> TurnView {
        TurnView {
            round: self.current_round,
            total_rounds: self.total_rounds,
            player: self.players[self.current_player].name.clone(),
            max_number: self.max_number,
        }
    }

    /// Display state for the turn in progress, if there is one.
    pub fn turn_view(&self) -> Option<TurnView> {
        self.secret.map(|_| self.view())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Final scores and the winner set. Only valid once the game is over.
    pub fn standings(&self) -> Result<Standings, EngineError> {
        if !self.finished {
            return Err(EngineError::GameInProgress);
        }
        Ok(standings::compute_standings(&self.players))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::core::config::Difficulty;

    /// Plays back a scripted list of secrets.
    struct FixedSecrets(VecDeque<u32>);

    impl SecretSource for FixedSecrets {
        fn draw(&mut self, _max_number: u32) -> u32 {
            self.0.pop_front().expect("ran out of scripted secrets")
        }
    }

    fn engine_for(names: &[&str], rounds: u32, secrets: &[u32]) -> TurnEngine<FixedSecrets> {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        let config = GameConfig::new(&names, rounds, Difficulty::SuperEasy);
        TurnEngine::with_source(config, FixedSecrets(secrets.iter().copied().collect()))
    }

    #[test]
    fn secrets_stay_in_range_and_vary() {
        let mut source = RngSecret(rand::rng());
        for _ in 0..200 {
            let n = source.draw(50);
            assert!((1..=50).contains(&n));
        }

        // a repeat across every draw over this range would mean reuse
        let draws: Vec<u32> = (0..50).map(|_| source.draw(100_000)).collect();
        let first = draws[0];
        assert!(draws.iter().any(|&n| n != first));
    }

    #[test]
    fn correct_guess_earns_five_points() {
        let mut engine = engine_for(&["Alice"], 1, &[3]);
        engine.start_turn().unwrap();

        let outcome = engine.submit_guess("3").unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.secret, 3);
        assert_eq!(outcome.score, 5);
        assert_eq!(engine.players()[0].score, 5);
    }

    #[test]
    fn wrong_guess_costs_three_points() {
        let mut engine = engine_for(&["Alice"], 1, &[3]);
        engine.start_turn().unwrap();

        let outcome = engine.submit_guess("4").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.secret, 3);
        assert_eq!(outcome.score, -3);
    }

    #[test]
    fn unparseable_guess_does_not_consume_the_turn() {
        let mut engine = engine_for(&["Alice", "Bob"], 1, &[3, 2]);
        engine.start_turn().unwrap();

        let err = engine.submit_guess("not a number").unwrap_err();
        assert_eq!(err, EngineError::InvalidGuessFormat);
        assert_eq!(
            engine.submit_guess("").unwrap_err(),
            EngineError::InvalidGuessFormat
        );

        // still Alice's turn, nothing scored
        assert_eq!(engine.current_player(), 0);
        assert_eq!(engine.players()[0].score, 0);
        assert_eq!(engine.turn_view().unwrap().player, "Alice");
    }

    #[test]
    fn negative_guess_is_wrong_not_a_format_error() {
        let mut engine = engine_for(&["Alice"], 1, &[3]);
        engine.start_turn().unwrap();

        let outcome = engine.submit_guess("-3").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.score, -3);
    }

    #[test]
    fn round_advances_after_every_player_has_guessed() {
        let mut engine = engine_for(&["Alice", "Bob", "Carol"], 2, &[1, 1, 1, 1, 1, 1]);
        engine.start_turn().unwrap();
        assert_eq!(engine.current_round(), 1);

        engine.submit_guess("2").unwrap();
        assert_eq!(engine.current_player(), 1);
        assert_eq!(engine.current_round(), 1);

        engine.submit_guess("2").unwrap();
        engine.submit_guess("2").unwrap();
        assert_eq!(engine.current_player(), 0);
        assert_eq!(engine.current_round(), 2);
        assert!(!engine.is_finished());
    }

    #[test]
    fn game_finishes_after_all_rounds_and_rejects_further_play() {
        let mut engine = engine_for(&["Alice", "Bob"], 2, &[1, 1, 1, 1]);
        engine.start_turn().unwrap();

        for _ in 0..4 {
            engine.submit_guess("1").unwrap();
        }
        assert!(engine.is_finished());
        assert!(engine.turn_view().is_none());

        assert_eq!(engine.start_turn().unwrap_err(), EngineError::GameOver);
        assert_eq!(engine.submit_guess("1").unwrap_err(), EngineError::GameOver);
    }

    #[test]
    fn guess_before_first_turn_is_rejected() {
        let mut engine = engine_for(&["Alice"], 1, &[3]);
        assert_eq!(
            engine.submit_guess("3").unwrap_err(),
            EngineError::TurnNotStarted
        );
    }

    #[test]
    fn standings_are_only_available_after_the_game() {
        let mut engine = engine_for(&["Alice"], 1, &[3]);
        engine.start_turn().unwrap();
        assert_eq!(engine.standings().unwrap_err(), EngineError::GameInProgress);

        engine.submit_guess("3").unwrap();
        assert!(engine.standings().is_ok());
    }

    #[test]
    fn two_player_single_round_example() {
        let mut engine = engine_for(&["Alice", "Bob"], 1, &[3, 4]);
        let view = engine.start_turn().unwrap();
        assert_eq!(view.round, 1);
        assert_eq!(view.total_rounds, 1);
        assert_eq!(view.player, "Alice");
        assert_eq!(view.max_number, 5);

        let alice = engine.submit_guess("3").unwrap();
        assert!(alice.correct);
        assert_eq!(alice.score, 5);

        let bob = engine.submit_guess("1").unwrap();
        assert!(!bob.correct);
        assert_eq!(bob.score, -3);

        assert!(engine.is_finished());
        let standings = engine.standings().unwrap();
        assert_eq!(standings.winners, vec![0]);
        assert!(!standings.is_tie());
        assert_eq!(standings.players[0].score, 5);
        assert_eq!(standings.players[1].score, -3);
    }
}
