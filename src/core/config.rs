use thiserror::Error;
use tracing::info;

/// Difficulty tiers, easiest to hardest. Each pairs a display label with the
/// ceiling of the guessable range. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    SuperEasy,
    SomewhatEasy,
    Easy,
    SomewhatMedium,
    Medium,
    SomewhatHard,
    ExtremelyHard,
    NextToImpossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 8] = [
        Difficulty::SuperEasy,
        Difficulty::SomewhatEasy,
        Difficulty::Easy,
        Difficulty::SomewhatMedium,
        Difficulty::Medium,
        Difficulty::SomewhatHard,
        Difficulty::ExtremelyHard,
        Difficulty::NextToImpossible,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::SuperEasy => "Super-Easy (1-5)",
            Difficulty::SomewhatEasy => "Somewhat-Easy (1-10)",
            Difficulty::Easy => "Easy (1-30)",
            Difficulty::SomewhatMedium => "Somewhat-Medium (1-35)",
            Difficulty::Medium => "Medium (1-50)",
            Difficulty::SomewhatHard => "Somewhat-Hard (1-75)",
            Difficulty::ExtremelyHard => "Extremely-Hard (1-100)",
            Difficulty::NextToImpossible => "Next-to-Impossible (1-100,000)",
        }
    }

    /// Upper end of the guessable range for this tier (lower end is always 1).
    pub fn max_number(self) -> u32 {
        match self {
            Difficulty::SuperEasy => 5,
            Difficulty::SomewhatEasy => 10,
            Difficulty::Easy => 30,
            Difficulty::SomewhatMedium => 35,
            Difficulty::Medium => 50,
            Difficulty::SomewhatHard => 75,
            Difficulty::ExtremelyHard => 100,
            Difficulty::NextToImpossible => 100_000,
        }
    }
}

/// One seat at the table: display name plus running score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: i32,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self { name, score: 0 }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("please enter a positive number")]
    InvalidCount,
    #[error("setup was cancelled")]
    Cancelled,
}

/// Parse a setup count (players, rounds). Anything that is not a positive
/// whole number is rejected; the caller owns the re-prompt loop.
pub fn parse_count(raw: &str) -> Result<u32, SetupError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SetupError::InvalidCount),
    }
}

/// Trim a supplied name, falling back to "Player N" (1-based) when blank.
pub fn resolve_name(raw: &str, index: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("Player {}", index + 1)
    } else {
        trimmed.to_string()
    }
}

/// Everything the moderator decided at setup. Fixed for the whole game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub players: Vec<Player>,
    pub total_rounds: u32,
    pub max_number: u32,
}

impl GameConfig {
    pub fn new(names: &[String], total_rounds: u32, difficulty: Difficulty) -> Self {
        let players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(i, raw)| Player::new(resolve_name(raw, i)))
            .collect();
        let config = Self {
            players,
            total_rounds,
            max_number: difficulty.max_number(),
        };
        info!(
            players = config.players.len(),
            rounds = config.total_rounds,
            max = config.max_number,
            "game configured"
        );
        config
    }

    /// Single-shot boundary contract: raw moderator inputs in, config out.
    /// A missing difficulty choice means the picker was cancelled. Name
    /// inputs beyond the player count are ignored; missing ones default.
    pub fn resolve(
        player_count_raw: &str,
        round_count_raw: &str,
        difficulty: Option<Difficulty>,
        name_inputs: &[String],
    ) -> Result<Self, SetupError> {
        let player_count = parse_count(player_count_raw)? as usize;
        let total_rounds = parse_count(round_count_raw)?;
        let difficulty = difficulty.ok_or(SetupError::Cancelled)?;

        let names: Vec<String> = (0..player_count)
            .map(|i| name_inputs.get(i).cloned().unwrap_or_default())
            .collect();
        Ok(Self::new(&names, total_rounds, difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_accepts_positive_numbers() {
        assert_eq!(parse_count("3"), Ok(3));
        assert_eq!(parse_count(" 12 "), Ok(12));
    }

    #[test]
    fn parse_count_rejects_bad_input() {
        assert_eq!(parse_count(""), Err(SetupError::InvalidCount));
        assert_eq!(parse_count("abc"), Err(SetupError::InvalidCount));
        assert_eq!(parse_count("0"), Err(SetupError::InvalidCount));
        assert_eq!(parse_count("-2"), Err(SetupError::InvalidCount));
        assert_eq!(parse_count("2.5"), Err(SetupError::InvalidCount));
    }

    #[test]
    fn blank_names_get_generated_defaults() {
        assert_eq!(resolve_name("  Alice  ", 0), "Alice");
        assert_eq!(resolve_name("", 0), "Player 1");
        assert_eq!(resolve_name("   ", 1), "Player 2");
    }

    #[test]
    fn resolve_builds_a_valid_config() {
        let names = vec!["Alice".to_string(), "".to_string()];
        let config =
            GameConfig::resolve("2", "3", Some(Difficulty::Medium), &names).unwrap();

        assert_eq!(config.players.len(), 2);
        assert_eq!(config.players[0].name, "Alice");
        assert_eq!(config.players[1].name, "Player 2");
        assert!(config.players.iter().all(|p| p.score == 0));
        assert_eq!(config.total_rounds, 3);
        assert_eq!(config.max_number, 50);
    }

    #[test]
    fn resolve_rejects_invalid_counts() {
        let err = GameConfig::resolve("zero", "3", Some(Difficulty::Easy), &[]);
        assert_eq!(err.unwrap_err(), SetupError::InvalidCount);

        let err = GameConfig::resolve("2", "0", Some(Difficulty::Easy), &[]);
        assert_eq!(err.unwrap_err(), SetupError::InvalidCount);
    }

    #[test]
    fn cancelled_difficulty_aborts_setup() {
        let err = GameConfig::resolve("2", "3", None, &[]);
        assert_eq!(err.unwrap_err(), SetupError::Cancelled);
    }

    #[test]
    fn missing_names_default_by_seat() {
        let config = GameConfig::resolve("3", "1", Some(Difficulty::SuperEasy), &[]).unwrap();
        let names: Vec<&str> = config.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Player 1", "Player 2", "Player 3"]);
    }

    #[test]
    fn tiers_are_the_fixed_eight() {
        let ceilings: Vec<u32> = Difficulty::ALL.iter().map(|d| d.max_number()).collect();
        assert_eq!(ceilings, [5, 10, 30, 35, 50, 75, 100, 100_000]);

        // ordered easiest to hardest
        assert!(ceilings.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(Difficulty::SuperEasy.label(), "Super-Easy (1-5)");
        assert_eq!(
            Difficulty::NextToImpossible.label(),
            "Next-to-Impossible (1-100,000)"
        );
    }
}
