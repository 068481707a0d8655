//! Usage-frequency table for opponent move back-filling.
//!
//! When the planner has seen fewer than four of an opponent's moves, it
//! pads its enumeration with the most frequently used moves for that
//! species, in descending frequency order, until four are known or the
//! table is exhausted.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::moves::MoveId;
use super::species::SpeciesId;

/// Per-species move usage ranking, most frequent first.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UsageTable {
    ranked: FxHashMap<SpeciesId, Vec<MoveId>>,
}

impl UsageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the ranked move list for a species, most frequent first.
    pub fn set_ranked(&mut self, species: SpeciesId, moves: Vec<MoveId>) {
        self.ranked.insert(species, moves);
    }

    /// Ranked moves for a species; empty when the species is unlisted.
    #[must_use]
    pub fn ranked(&self, species: SpeciesId) -> &[MoveId] {
        self.ranked.get(&species).map_or(&[], Vec::as_slice)
    }

    /// Extend `known` with ranked moves until it holds `target` entries
    /// or the table is exhausted. Already-known moves are skipped.
    pub fn backfill(&self, species: SpeciesId, known: &mut Vec<MoveId>, target: usize) {
        for &mv in self.ranked(species) {
            if known.len() >= target {
                break;
            }
            if !known.contains(&mv) {
                known.push(mv);
            }
        }
    }
}
