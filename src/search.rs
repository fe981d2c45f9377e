//! Nearest-rival search strategies.
//!
//! Every strategy answers the same question: given the population and the
//! index of an agent, which other agent of a different kind should it
//! react to? Both strategies walk the population in the same circular
//! order, starting right after the querying agent.

use crate::geometry::sqr_dist;
use crate::model::Agent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an agent has no differently-typed agent to react to.
///
/// This usually means a single kind has taken over the board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
#[error("no rival found for agent {index}")]
pub struct NoRivalFound {
    pub index: usize,
}

/// How many candidates the circular scan visits.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanRange {
    /// Offsets `1..len-1`: the agent just before the querying one
    /// (`(index + len - 1) % len`) is never considered.
    #[default]
    Truncated,
    /// Offsets `1..=len-1`: every other agent is considered.
    Full,
}

impl ScanRange {
    /// Indices visited for agent `index` in a population of `len`, in order.
    pub fn order(self, index: usize, len: usize) -> impl Iterator<Item = usize> {
        let n_offsets = match self {
            ScanRange::Truncated => len.saturating_sub(2),
            ScanRange::Full => len.saturating_sub(1),
        };
        (1..=n_offsets).map(move |offset| (index + offset) % len)
    }
}

pub trait NeighborSearch {
    /// Index of the rival agent `index` reacts to.
    ///
    /// Never returns `index` itself nor an agent of the same kind.
    fn nearest_rival(&self, agt_vec: &[Agent], index: usize) -> Result<usize, NoRivalFound>;
}

/// Returns the first rival in scan order, ignoring distance.
///
/// Only meant as a predictable double for exercising the step engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circular {
    scan: ScanRange,
}

impl Circular {
    pub fn new(scan: ScanRange) -> Self {
        Self { scan }
    }
}

impl NeighborSearch for Circular {
    fn nearest_rival(&self, agt_vec: &[Agent], index: usize) -> Result<usize, NoRivalFound> {
        let kind = agt_vec[index].kind;
        self.scan
            .order(index, agt_vec.len())
            .find(|&n| agt_vec[n].kind != kind)
            .ok_or(NoRivalFound { index })
    }
}

/// Full linear scan for the closest rival.
///
/// Ties go to the candidate met first in scan order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear {
    scan: ScanRange,
}

impl Linear {
    pub fn new(scan: ScanRange) -> Self {
        Self { scan }
    }
}

impl NeighborSearch for Linear {
    fn nearest_rival(&self, agt_vec: &[Agent], index: usize) -> Result<usize, NoRivalFound> {
        let me = &agt_vec[index];
        let mut best: Option<(usize, i64)> = None;
        for n in self.scan.order(index, agt_vec.len()) {
            let other = &agt_vec[n];
            if other.kind == me.kind {
                continue;
            }
            let dist = sqr_dist(me.pos(), other.pos());
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((n, dist));
            }
        }
        best.map(|(n, _)| n).ok_or(NoRivalFound { index })
    }
}

/// Search strategy selectable from the configuration.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Circular,
    #[default]
    Linear,
}

impl SearchKind {
    pub fn build(self, scan: ScanRange) -> Box<dyn NeighborSearch> {
        match self {
            SearchKind::Circular => Box::new(Circular::new(scan)),
            SearchKind::Linear => Box::new(Linear::new(scan)),
        }
    }
}
