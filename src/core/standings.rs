use crate::core::config::Player;

/// Final result of a game: the scoreboard plus everyone holding the top score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub players: Vec<Player>,
    /// Indices into `players` of everyone with the maximum score.
    pub winners: Vec<usize>,
}

impl Standings {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn winner_names(&self) -> Vec<&str> {
        self.winners
            .iter()
            .map(|&i| self.players[i].name.as_str())
            .collect()
    }
}

/// Every player whose score equals the maximum is a winner; more than one
/// means the game is a tie among exactly that set, wherever they sit in
/// turn order.
pub fn compute_standings(players: &[Player]) -> Standings {
    let max = players.iter().map(|p| p.score).max().unwrap_or(0);
    let winners = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.score == max)
        .map(|(i, _)| i)
        .collect();
    Standings {
        players: players.to_vec(),
        winners,
    }
}
