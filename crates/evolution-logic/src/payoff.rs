//! Payoff matrix for the Prisoner's Dilemma

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::strategy::Move;

/// Points awarded for one round, as (first mover's, second mover's)
pub type Payoff = (u32, u32);

/// A complete `(Move, Move) -> Payoff` table.
///
/// All four combinations are always present. The table need not be
/// symmetric: `(C, D)` and `(D, C)` are specified independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PayoffEntry>", into = "Vec<PayoffEntry>")]
pub struct PayoffTable {
    cc: Payoff,
    cd: Payoff,
    dc: Payoff,
    dd: Payoff,
}

/// Serialized form of one table cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffEntry {
    pub moves: (Move, Move),
    pub payoff: Payoff,
}

impl PayoffTable {
    pub fn new(cc: Payoff, cd: Payoff, dc: Payoff, dd: Payoff) -> Self {
        Self { cc, cd, dc, dd }
    }

    /// Classic symmetric game from reward, sucker, temptation and punishment
    pub fn symmetric(reward: u32, sucker: u32, temptation: u32, punishment: u32) -> Self {
        Self {
            cc: (reward, reward),
            cd: (sucker, temptation),
            dc: (temptation, sucker),
            dd: (punishment, punishment),
        }
    }

    /// Build from individual cells; every combination must appear exactly once.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = PayoffEntry>,
    {
        let mut cells: [Option<Payoff>; 4] = [None; 4];
        for entry in entries {
            let (a, b) = entry.moves;
            let slot = &mut cells[Self::index(a, b)];
            if slot.is_some() {
                return Err(ConfigError::DuplicatePayoffEntry(a, b));
            }
            *slot = Some(entry.payoff);
        }

        let cell = |a: Move, b: Move| {
            cells[Self::index(a, b)].ok_or(ConfigError::IncompletePayoffTable(a, b))
        };

        Ok(Self {
            cc: cell(Move::Cooperate, Move::Cooperate)?,
            cd: cell(Move::Cooperate, Move::Defect)?,
            dc: cell(Move::Defect, Move::Cooperate)?,
            dd: cell(Move::Defect, Move::Defect)?,
        })
    }

    /// Payoff for a round where the first player plays `a` and the second `b`
    pub fn payoff(&self, a: Move, b: Move) -> Payoff {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => self.cc,
            (Move::Cooperate, Move::Defect) => self.cd,
            (Move::Defect, Move::Cooperate) => self.dc,
            (Move::Defect, Move::Defect) => self.dd,
        }
    }

    pub fn entries(&self) -> [PayoffEntry; 4] {
        let entry = |a, b| PayoffEntry {
            moves: (a, b),
            payoff: self.payoff(a, b),
        };
        [
            entry(Move::Cooperate, Move::Cooperate),
            entry(Move::Cooperate, Move::Defect),
            entry(Move::Defect, Move::Cooperate),
            entry(Move::Defect, Move::Defect),
        ]
    }

    /// True if some round pays out a positive amount to someone.
    pub fn has_positive_outcome(&self) -> bool {
        self.entries()
            .iter()
            .any(|e| e.payoff.0 > 0 || e.payoff.1 > 0)
    }

    fn index(a: Move, b: Move) -> usize {
        match (a, b) {
            (Move::Cooperate, Move::Cooperate) => 0,
            (Move::Cooperate, Move::Defect) => 1,
            (Move::Defect, Move::Cooperate) => 2,
            (Move::Defect, Move::Defect) => 3,
        }
    }
}

impl Default for PayoffTable {
    fn default() -> Self {
        Self::symmetric(3, 0, 5, 1)
    }
}

impl TryFrom<Vec<PayoffEntry>> for PayoffTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<PayoffEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<PayoffTable> for Vec<PayoffEntry> {
    fn from(table: PayoffTable) -> Self {
        table.entries().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Move::{Cooperate as C, Defect as D};

    #[test]
    fn test_default_payoff_matrix() {
        let table = PayoffTable::default();
        assert_eq!(table.payoff(C, C), (3, 3));
        assert_eq!(table.payoff(C, D), (0, 5));
        assert_eq!(table.payoff(D, C), (5, 0));
        assert_eq!(table.payoff(D, D), (1, 1));
    }

    #[test]
    fn test_asymmetric_table() {
        let table = PayoffTable::new((2, 2), (0, 7), (4, 1), (1, 1));
        assert_eq!(table.payoff(C, D), (0, 7));
        assert_eq!(table.payoff(D, C), (4, 1));
    }

    #[test]
    fn test_from_entries_complete() {
        let entries = PayoffTable::default().entries();
        let table = PayoffTable::from_entries(entries.into_iter().rev()).unwrap();
        assert_eq!(table, PayoffTable::default());
    }

    #[test]
    fn test_from_entries_missing_cell() {
        let entries = PayoffTable::default().entries();
        let err = PayoffTable::from_entries(entries.into_iter().take(3)).unwrap_err();
        assert!(matches!(err, ConfigError::IncompletePayoffTable(D, D)));
    }

    #[test]
    fn test_from_entries_duplicate_cell() {
        let mut entries = PayoffTable::default().entries().to_vec();
        entries.push(PayoffEntry { moves: (C, C), payoff: (9, 9) });
        let err = PayoffTable::from_entries(entries).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePayoffEntry(C, C)));
    }

    #[test]
    fn test_json_rejects_incomplete_table() {
        let json = r#"[
            {"moves": ["Cooperate", "Cooperate"], "payoff": [3, 3]},
            {"moves": ["Defect", "Defect"], "payoff": [1, 1]}
        ]"#;
        let err = serde_json::from_str::<PayoffTable>(json).unwrap_err();
        assert!(err.to_string().contains("missing"), "{err}");
    }

    #[test]
    fn test_json_round_trip() {
        let table = PayoffTable::new((3, 3), (0, 6), (5, 0), (1, 2));
        let json = serde_json::to_string(&table).unwrap();
        let back: PayoffTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_positive_outcome() {
        assert!(PayoffTable::default().has_positive_outcome());
        assert!(!PayoffTable::symmetric(0, 0, 0, 0).has_positive_outcome());
    }
}
