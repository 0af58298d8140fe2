//! Random perfect matching of a generation's agents
//!
//! The live set is shuffled in place and adjacent agents are paired, so
//! `agents.chunks_exact_mut(2)` walks exactly the pairs returned here.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::Agent;
use crate::error::ConfigError;

/// Shuffle `agents` and return the ids of each adjacent pair
///
/// Every agent appears in exactly one pair. An odd-sized set is rejected
/// rather than leaving someone out.
pub fn random_matching<R: Rng + ?Sized>(
    agents: &mut [Agent],
    rng: &mut R,
) -> Result<Vec<(u32, u32)>, ConfigError> {
    if agents.len() % 2 != 0 {
        return Err(ConfigError::OddPlayerCount(agents.len() as u32));
    }

    agents.shuffle(rng);

    Ok(agents
        .chunks_exact(2)
        .map(|pair| (pair[0].id(), pair[1].id()))
        .collect())
}
