//! Strategy definitions
//!
//! A strategy is a pure function of the deciding agent's own round history.
//! Variants carry no state of their own, so one instance is shared by every
//! agent that follows it.

use serde::{Deserialize, Serialize};

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

/// One played round, seen from the agent that owns the history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub own: Move,
    pub opponent: Move,
}

impl Round {
    pub fn new(own: Move, opponent: Move) -> Self {
        Self { own, opponent }
    }
}

/// Decision behavior shared by all agents of one strategy.
///
/// `name` is the population accounting key and must be unique within a
/// [`StrategyRegistry`](crate::StrategyRegistry).
pub trait Strategy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Choose the next move given every round this agent has played so far.
    fn decide(&self, history: &[Round]) -> Move;
}

/// Always cooperate, never defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllCooperate;

impl Strategy for AllCooperate {
    fn name(&self) -> &str {
        "AllCooperate"
    }

    fn description(&self) -> &str {
        "Never defects. Always cooperates."
    }

    fn decide(&self, _history: &[Round]) -> Move {
        Move::Cooperate
    }
}

/// Always defect, never cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllDefect;

impl Strategy for AllDefect {
    fn name(&self) -> &str {
        "AllDefect"
    }

    fn description(&self) -> &str {
        "Never cooperates. Always defects."
    }

    fn decide(&self, _history: &[Round]) -> Move {
        Move::Defect
    }
}

/// Copy opponent's last move. Start with cooperate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitForTat;

impl Strategy for TitForTat {
    fn name(&self) -> &str {
        "TitForTat"
    }

    fn description(&self) -> &str {
        "Copies opponent's last move. Starts by cooperating."
    }

    fn decide(&self, history: &[Round]) -> Move {
        history
            .last()
            .map_or(Move::Cooperate, |round| round.opponent)
    }
}

/// Defect only if opponent defected twice in a row.
#[derive(Clone, Copy, Debug, Default)]
pub struct TitForTwoTats;

impl Strategy for TitForTwoTats {
    fn name(&self) -> &str {
        "TitForTwoTats"
    }

    fn description(&self) -> &str {
        "Only retaliates after two consecutive defections."
    }

    fn decide(&self, history: &[Round]) -> Move {
        match history {
            [.., earlier, last]
                if earlier.opponent == Move::Defect && last.opponent == Move::Defect =>
            {
                Move::Defect
            }
            _ => Move::Cooperate,
        }
    }
}

/// Win-stay, lose-shift: cooperate after mutual moves, defect after mixed ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pavlov;

impl Strategy for Pavlov {
    fn name(&self) -> &str {
        "Pavlov"
    }

    fn description(&self) -> &str {
        "Cooperates after matching moves, defects after mismatched ones."
    }

    fn decide(&self, history: &[Round]) -> Move {
        let Some(last) = history.last() else {
            return Move::Cooperate;
        };

        match (last.own, last.opponent) {
            (Move::Cooperate, Move::Cooperate) => Move::Cooperate,
            (Move::Cooperate, Move::Defect) => Move::Defect,
            (Move::Defect, Move::Cooperate) => Move::Defect,
            (Move::Defect, Move::Defect) => Move::Cooperate,
        }
    }
}

/// Cooperate until opponent defects once, then always defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrimTrigger;

impl Strategy for GrimTrigger {
    fn name(&self) -> &str {
        "GrimTrigger"
    }

    fn description(&self) -> &str {
        "Cooperates until betrayed, then always defects."
    }

    fn decide(&self, history: &[Round]) -> Move {
        if history.iter().any(|round| round.opponent == Move::Defect) {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }
}

/// Tit-for-Tat but start with defect.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuspiciousTitForTat;

impl Strategy for SuspiciousTitForTat {
    fn name(&self) -> &str {
        "SuspiciousTitForTat"
    }

    fn description(&self) -> &str {
        "Like Tit-for-Tat, but starts with defect."
    }

    fn decide(&self, history: &[Round]) -> Move {
        history.last().map_or(Move::Defect, |round| round.opponent)
    }
}

/// Escalating retaliation.
///
/// After the opponent's N-th defection the agent should have defected
/// N(N+1)/2 times in total; it defects until it catches up.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gradual;

impl Strategy for Gradual {
    fn name(&self) -> &str {
        "Gradual"
    }

    fn description(&self) -> &str {
        "Retaliates with increasing severity, then forgives."
    }

    fn decide(&self, history: &[Round]) -> Move {
        let their_defections = history
            .iter()
            .filter(|round| round.opponent == Move::Defect)
            .count();
        let my_defections = history
            .iter()
            .filter(|round| round.own == Move::Defect)
            .count();

        let expected = their_defections * (their_defections + 1) / 2;

        if my_defections < expected {
            Move::Defect
        } else {
            Move::Cooperate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Move::{Cooperate as C, Defect as D};

    fn rounds(pairs: &[(Move, Move)]) -> Vec<Round> {
        pairs.iter().map(|&(own, opponent)| Round::new(own, opponent)).collect()
    }

    #[test]
    fn test_always_cooperate() {
        assert_eq!(AllCooperate.decide(&[]), C);
        assert_eq!(AllCooperate.decide(&rounds(&[(C, D), (C, D)])), C);
    }

    #[test]
    fn test_always_defect() {
        assert_eq!(AllDefect.decide(&[]), D);
        assert_eq!(AllDefect.decide(&rounds(&[(D, C), (D, C)])), D);
    }

    #[test]
    fn test_tit_for_tat_first_move() {
        assert_eq!(TitForTat.decide(&[]), C);
    }

    #[test]
    fn test_tit_for_tat_copies() {
        assert_eq!(TitForTat.decide(&rounds(&[(C, C)])), C);
        assert_eq!(TitForTat.decide(&rounds(&[(C, D)])), D);
        // Only the latest round matters
        assert_eq!(TitForTat.decide(&rounds(&[(C, D), (D, C)])), C);
    }

    #[test]
    fn test_tit_for_two_tats_needs_two_rounds() {
        assert_eq!(TitForTwoTats.decide(&[]), C);
        assert_eq!(TitForTwoTats.decide(&rounds(&[(C, D)])), C);
    }

    #[test]
    fn test_tit_for_two_tats() {
        // Single defection - forgive
        assert_eq!(TitForTwoTats.decide(&rounds(&[(C, C), (C, D)])), C);
        assert_eq!(TitForTwoTats.decide(&rounds(&[(C, D), (C, C)])), C);

        // Two consecutive defections - retaliate
        assert_eq!(TitForTwoTats.decide(&rounds(&[(C, D), (C, D)])), D);

        // Forgives as soon as the opponent cooperates again
        assert_eq!(TitForTwoTats.decide(&rounds(&[(C, D), (C, D), (D, C)])), C);
    }

    #[test]
    fn test_pavlov_first_move() {
        assert_eq!(Pavlov.decide(&[]), C);
    }

    #[test]
    fn test_pavlov_table() {
        assert_eq!(Pavlov.decide(&rounds(&[(C, C)])), C);
        assert_eq!(Pavlov.decide(&rounds(&[(C, D)])), D);
        assert_eq!(Pavlov.decide(&rounds(&[(D, C)])), D);
        assert_eq!(Pavlov.decide(&rounds(&[(D, D)])), C);
    }

    #[test]
    fn test_grim_trigger() {
        assert_eq!(GrimTrigger.decide(&rounds(&[(C, C), (C, C)])), C);
        assert_eq!(GrimTrigger.decide(&rounds(&[(C, D), (D, C), (D, C)])), D);
    }

    #[test]
    fn test_suspicious_tft_starts_defect() {
        assert_eq!(SuspiciousTitForTat.decide(&[]), D);
        assert_eq!(SuspiciousTitForTat.decide(&rounds(&[(D, C)])), C);
    }

    #[test]
    fn test_gradual_escalates() {
        // One opponent defection: one retaliation, then forgive
        assert_eq!(Gradual.decide(&rounds(&[(C, D)])), D);
        assert_eq!(Gradual.decide(&rounds(&[(C, D), (D, C)])), C);

        // Second defection: owes 3 total, has 1
        let history = rounds(&[(C, D), (D, C), (C, D)]);
        assert_eq!(Gradual.decide(&history), D);
    }

    #[test]
    fn test_names_are_distinct() {
        let strategies: [&dyn Strategy; 8] = [
            &AllCooperate,
            &AllDefect,
            &TitForTat,
            &TitForTwoTats,
            &Pavlov,
            &GrimTrigger,
            &SuspiciousTitForTat,
            &Gradual,
        ];
        let names: std::collections::HashSet<_> = strategies.iter().map(|s| s.name()).collect();
        assert_eq!(names.len(), strategies.len());
    }
}
