use crate::config::Config;
use crate::geometry::{Bounds, sqr_dist};
use crate::model::{Agent, Census, Directive, Population};
use crate::rules::{evade, jitter, pursue};
use crate::search::{NeighborSearch, NoRivalFound};
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;

/// Parameters of a single tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rules {
    pub bounds: Bounds,
    pub catch_radius_sq: i64,
}

/// Advance the population by one tick.
///
/// Decisions are always taken from the population as it was at the start
/// of the tick; results go to a separate snapshot which is committed at
/// the end. An agent converted earlier in the tick is not moved again.
///
/// # Errors
/// Returns [`NoRivalFound`] as soon as an agent has no rival. Agents
/// handled before it keep their new state, no overlap separation is done,
/// and the partial snapshot is committed.
pub fn step<R: Rng + ?Sized>(
    population: &mut Population,
    search: &dyn NeighborSearch,
    rules: &Rules,
    rng: &mut R,
) -> Result<(), NoRivalFound> {
    let curr = population.agents();
    let mut next = curr.to_vec();
    let mut outcome: Result<(), NoRivalFound> = Ok(());

    for i_agt in 0..curr.len() {
        if next[i_agt].kind != curr[i_agt].kind {
            continue;
        }

        let i_riv = match search.nearest_rival(curr, i_agt) {
            Ok(i_riv) => i_riv,
            Err(err) => {
                outcome = Err(err);
                break;
            }
        };

        let me = &curr[i_agt];
        let rival = &curr[i_riv];
        let (x, y) = match me.kind.directive(rival.kind) {
            Directive::Pursue => pursue(me, rival, &rules.bounds),
            Directive::Evade => evade(me, rival, &rules.bounds, rng),
            Directive::Hold => next[i_agt].pos(),
        };
        next[i_agt].x = x;
        next[i_agt].y = y;

        if sqr_dist(next[i_agt].pos(), rival.pos()) <= rules.catch_radius_sq {
            log::trace!("{} caught {}", next[i_agt], rival);
            next[i_riv].kind = me.kind;
        }
    }

    if outcome.is_ok() {
        separate_overlaps(&mut next, &rules.bounds, rng);
    }

    debug_assert!(next.iter().all(|agt| rules.bounds.contains(agt.x, agt.y)));
    population.commit(next);
    outcome
}

/// Nudge apart agents of the same kind stacked on the same cell.
///
/// Single pass over all pairs; overlaps created by the nudges themselves
/// are left for later ticks.
fn separate_overlaps<R: Rng + ?Sized>(
    agt_vec: &mut [Agent],
    bounds: &Bounds,
    rng: &mut R,
) {
    for i in 0..agt_vec.len() {
        for j in i + 1..agt_vec.len() {
            if agt_vec[i] == agt_vec[j] {
                agt_vec[i].x = bounds.clamp_x(agt_vec[i].x + jitter(rng));
                agt_vec[i].y = bounds.clamp_y(agt_vec[i].y + jitter(rng));
            }
        }
    }
}

/// Whether ticks are currently being applied.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Running,
    Paused,
}

/// Result of a call to [`Engine::update`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TickOutcome {
    Advanced,
    Skipped,
    Halted(NoRivalFound),
}

/// Simulation engine.
///
/// Holds the configuration, current population, search strategy and random
/// number generator, and applies ticks while running.
pub struct Engine {
    cfg: Config,
    population: Population,
    search: Box<dyn NeighborSearch>,
    rng: ChaCha12Rng,
    phase: Phase,
    n_ticks: usize,
}

impl Engine {
    /// Create a new `Engine` with a random initial population.
    pub fn generate_initial_condition(cfg: Config, seed: u64) -> Result<Self> {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);

        let population = Population::generate(
            cfg.bounds(),
            cfg.population.n_types,
            cfg.population.per_type,
            &mut rng,
        )
        .context("failed to generate population")?;

        Ok(Self::with_rng(cfg, population, rng))
    }

    #[cfg(test)]
    pub fn from_population(cfg: Config, population: Population, seed: u64) -> Self {
        Self::with_rng(cfg, population, ChaCha12Rng::seed_from_u64(seed))
    }

    fn with_rng(cfg: Config, population: Population, rng: ChaCha12Rng) -> Self {
        let search = cfg.rules.search.build(cfg.rules.scan);
        Self {
            cfg,
            population,
            search,
            rng,
            phase: Phase::Running,
            n_ticks: 0,
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn census(&self) -> Census {
        self.population.census()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of ticks applied so far, halted ones included.
    pub fn n_ticks(&self) -> usize {
        self.n_ticks
    }

    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
        };
        log::debug!("phase: {:?}", self.phase);
        self.phase
    }

    /// Apply one tick unless paused.
    ///
    /// A missing rival pauses the engine instead of failing.
    pub fn update(&mut self) -> TickOutcome {
        if self.phase == Phase::Paused {
            return TickOutcome::Skipped;
        }

        let rules = self.cfg.rules();
        let outcome = step(
            &mut self.population,
            self.search.as_ref(),
            &rules,
            &mut self.rng,
        );
        self.n_ticks += 1;

        match outcome {
            Ok(()) => TickOutcome::Advanced,
            Err(err) => {
                log::warn!("tick {}: {err}, pausing", self.n_ticks);
                self.phase = Phase::Paused;
                TickOutcome::Halted(err)
            }
        }
    }
}
