//! Simulation data types.

use crate::geometry::Bounds;
use anyhow::{Result, bail};
use rand::prelude::*;
use rand_distr::Uniform;
use std::fmt;

/// Number of agent kinds in the dominance cycle.
pub const N_KINDS: usize = 3;

/// Agent kind.
///
/// The declaration order is the dominance order, not the alphabetical one:
/// paper beats rock, rock beats scissors, scissors beats paper.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Kind {
    Paper,
    Rock,
    Scissors,
}

/// What an agent does about its nearest rival.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Directive {
    Pursue,
    Evade,
    Hold,
}

impl Kind {
    pub const ALL: [Kind; N_KINDS] = [Kind::Paper, Kind::Rock, Kind::Scissors];

    /// Kind for a cyclic creation index.
    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % N_KINDS]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether `self` dominates `other`.
    pub fn beats(self, other: Kind) -> bool {
        (self.index() + 1) % N_KINDS == other.index()
    }

    pub fn directive(self, other: Kind) -> Directive {
        if self.beats(other) {
            Directive::Pursue
        } else if other.beats(self) {
            Directive::Evade
        } else {
            Directive::Hold
        }
    }

    pub fn label(self) -> char {
        match self {
            Kind::Paper => 'P',
            Kind::Rock => 'R',
            Kind::Scissors => 'S',
        }
    }
}

/// Agent of the simulation.
///
/// Agents have no identity of their own: they are addressed by their index
/// in the [`Population`], and their kind changes in place when caught.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Agent {
    pub kind: Kind,
    pub x: i32,
    pub y: i32,
}

impl Agent {
    pub fn new(kind: Kind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }

    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.kind.label(), self.x, self.y)
    }
}

/// Fixed-size ordered collection of agents.
///
/// The length never changes after construction and agents are never
/// reordered, so indices stay valid for the whole simulation.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Population {
    agt_vec: Vec<Agent>,
}

impl Population {
    pub fn new(agt_vec: Vec<Agent>) -> Self {
        Self { agt_vec }
    }

    /// Create `n_types * per_type` agents with cyclic kinds and uniformly
    /// random coordinates inside `bounds`.
    pub fn generate<R: Rng + ?Sized>(
        bounds: Bounds,
        n_types: usize,
        per_type: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if n_types != N_KINDS {
            bail!("number of types must be {N_KINDS}, but is {n_types}");
        }

        let x_dist = Uniform::new_inclusive(0, bounds.width)?;
        let y_dist = Uniform::new_inclusive(0, bounds.height)?;

        let n_agt = n_types * per_type;
        let mut agt_vec = Vec::with_capacity(n_agt);
        for i_agt in 0..n_agt {
            let kind = Kind::from_index(i_agt);
            agt_vec.push(Agent::new(kind, x_dist.sample(rng), y_dist.sample(rng)));
        }

        Ok(Self::new(agt_vec))
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agt_vec
    }

    pub fn len(&self) -> usize {
        self.agt_vec.len()
    }

    /// Replace every agent with the next tick's snapshot.
    pub(crate) fn commit(&mut self, next: Vec<Agent>) {
        debug_assert_eq!(next.len(), self.agt_vec.len());
        self.agt_vec = next;
    }

    pub fn census(&self) -> Census {
        let mut counts = [0; N_KINDS];
        for agt in &self.agt_vec {
            counts[agt.kind.index()] += 1;
        }
        Census { counts }
    }
}

/// Number of agents of each kind.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Census {
    counts: [usize; N_KINDS],
}

impl Census {
    pub fn count(&self, kind: Kind) -> usize {
        self.counts[kind.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Single surviving kind, if the others are extinct.
    pub fn winner(&self) -> Option<Kind> {
        let mut alive = Kind::ALL.into_iter().filter(|&kind| self.count(kind) > 0);
        match (alive.next(), alive.next()) {
            (Some(kind), None) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rock    : {:3}", self.count(Kind::Rock))?;
        writeln!(f, "Paper   : {:3}", self.count(Kind::Paper))?;
        write!(f, "Scissors: {:3}", self.count(Kind::Scissors))
    }
}
