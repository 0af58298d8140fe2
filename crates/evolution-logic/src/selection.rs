//! Next-generation distribution from aggregate strategy scores
//!
//! Each strategy's share of the next generation is proportional to the
//! summed score of all its agents (aggregate fitness, not the per-agent
//! average). Shares are floored and the agents lost to rounding are
//! handed back one at a time, highest total score first.

use crate::error::{Result, SimulationError};
use crate::population::PopulationSnapshot;

/// Compute the next generation's head counts
///
/// `names` and `scores` are parallel, in active-strategy order. That order
/// also breaks ties between equal scores when handing out the surplus.
///
/// Fails with [`SimulationError::DegenerateState`] when every score is
/// zero, since proportions are undefined.
pub fn next_distribution(
    names: &[&str],
    scores: &[u128],
    player_count: u32,
    generation: u32,
) -> Result<PopulationSnapshot> {
    debug_assert_eq!(names.len(), scores.len());

    let grand_total: u128 = scores.iter().sum();
    if grand_total == 0 {
        return Err(SimulationError::DegenerateState { generation });
    }

    // A strategy total is at most player_count * u32::MAX^2, so the product fits
    let mut counts: Vec<u32> = scores
        .iter()
        .map(|&s| (s * u128::from(player_count) / grand_total) as u32)
        .collect();

    let assigned: u32 = counts.iter().sum();
    let surplus = (player_count - assigned) as usize;

    // Flooring loses less than one agent per strategy with a nonzero score
    debug_assert!(surplus < scores.len().max(1));

    // Stable sort keeps configured order among equal scores
    let mut ranking: Vec<usize> = (0..scores.len()).collect();
    ranking.sort_by(|&a, &b| scores[b].cmp(&scores[a]));

    for &idx in ranking.iter().take(surplus) {
        counts[idx] += 1;
    }

    Ok(names
        .iter()
        .zip(counts)
        .map(|(name, count)| (name.to_string(), count))
        .collect())
}
