//! Pairwise iterated game

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::payoff::PayoffTable;

/// Points each agent earned in one game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub rounds: u32,
    pub score_a: u64,
    pub score_b: u64,
}

/// Play `rounds` rounds between two agents
///
/// Moves are simultaneous: both agents decide from their own history before
/// either history is extended. Scores and histories of `a` and `b` are the
/// only state touched, and no randomness is involved.
pub fn play_game(a: &mut Agent, b: &mut Agent, table: &PayoffTable, rounds: u32) -> GameOutcome {
    let mut total_a = 0u64;
    let mut total_b = 0u64;

    for _ in 0..rounds {
        let move_a = a.choose_move();
        let move_b = b.choose_move();

        let (score_a, score_b) = table.payoff(move_a, move_b);
        total_a += u64::from(score_a);
        total_b += u64::from(score_b);

        a.record(move_a, move_b, score_a);
        b.record(move_b, move_a, score_b);
    }

    GameOutcome {
        rounds,
        score_a: total_a,
        score_b: total_b,
    }
}
