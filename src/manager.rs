use crate::config::Config;
use crate::engine::{Engine, TickOutcome};
use crate::model::{Census, Kind};
use anyhow::{Context, Result};
use std::{collections::BTreeSet, path::Path};

/// Options of a headless run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Number of frames to drive.
    pub n_frames: usize,
    /// Random seed; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Log the census every this many frames (0 disables it).
    pub report_every: usize,
    /// Frames at which the pause key is pressed.
    pub toggle_pause_at: Vec<usize>,
}

/// Drives an [`Engine`] the way an interactive front end would: one
/// update per frame, with pause key presses injected at given frames.
pub struct Manager {
    cfg: Config,
}

impl Manager {
    /// Load the configuration from `config_file`, or use the defaults.
    pub fn new<P: AsRef<Path>>(config_file: Option<P>) -> Result<Self> {
        let cfg = match config_file {
            Some(file) => Config::from_file(file).context("failed to construct cfg")?,
            None => Config::default(),
        };
        log::info!("{cfg:#?}");

        Ok(Self { cfg })
    }

    /// Build the initial condition once without running it.
    ///
    /// Returns the number of agents the configuration produces.
    pub fn check_config(&self) -> Result<usize> {
        let engine = Engine::generate_initial_condition(self.cfg.clone(), 0)
            .context("failed to generate initial condition")?;
        let n_agt = engine.population().len();
        log::info!(
            "config is valid: {n_agt} agents on a {}x{} board",
            self.cfg.board.width,
            self.cfg.board.height
        );
        Ok(n_agt)
    }

    pub fn run_simulation(&self, opts: &RunOptions) -> Result<Census> {
        let seed = opts.seed.unwrap_or_else(rand::random);
        log::info!("seed: {seed}");

        let mut engine = Engine::generate_initial_condition(self.cfg.clone(), seed)
            .context("failed to generate initial condition")?;
        log::info!(
            "frame 0: {} agents, {}",
            engine.population().len(),
            summary(&engine.census())
        );
        for agt in engine.population().agents() {
            log::trace!("{agt}");
        }

        let toggles: BTreeSet<usize> = opts.toggle_pause_at.iter().copied().collect();

        for i_frame in 0..opts.n_frames {
            if toggles.contains(&i_frame) {
                let phase = engine.toggle_pause();
                log::info!("frame {i_frame}: pause key pressed, now {phase:?}");
            }

            let outcome = engine.update();

            let frame = i_frame + 1;
            if opts.report_every > 0 && frame % opts.report_every == 0 {
                log::info!("frame {frame}: {}", summary(&engine.census()));
            }

            if let TickOutcome::Halted(err) = outcome {
                if toggles.range(frame..).next().is_none() {
                    log::info!("frame {frame}: halted ({err}) with no resume pending");
                    break;
                }
            }
        }

        let census = engine.census();
        log::info!(
            "finished after {} ticks ({:?}): {} agents, {}",
            engine.n_ticks(),
            engine.phase(),
            census.total(),
            summary(&census)
        );
        if let Some(kind) = census.winner() {
            log::info!("{kind:?} took over the board");
        }

        Ok(census)
    }
}

fn summary(census: &Census) -> String {
    Kind::ALL
        .iter()
        .map(|&kind| format!("{kind:?}={}", census.count(kind)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    fn opts(n_frames: usize, toggle_pause_at: Vec<usize>) -> RunOptions {
        RunOptions {
            n_frames,
            seed: Some(3),
            report_every: 10,
            toggle_pause_at,
        }
    }

    #[test]
    fn run_keeps_population_size() {
        let mgr = Manager::new(None::<&Path>).unwrap();
        assert_eq!(mgr.check_config().unwrap(), 150);
        let census = mgr.run_simulation(&opts(25, vec![])).unwrap();
        assert_eq!(census.total(), 150);
    }

    #[test]
    fn paused_run_keeps_initial_census() {
        let mgr = Manager::new(None::<&Path>).unwrap();
        // Paused from the first frame: no catch can happen.
        let census = mgr.run_simulation(&opts(25, vec![0])).unwrap();
        for kind in Kind::ALL {
            assert_eq!(census.count(kind), 50);
        }
    }

    #[test]
    fn loads_config_file() {
        let file = env::temp_dir().join(format!(
            "rochambeau-{}-loads_config_file.toml",
            std::process::id()
        ));
        fs::write(&file, "[population]\nper_type = 4\n").unwrap();

        let mgr = Manager::new(Some(&file)).unwrap();
        assert_eq!(mgr.check_config().unwrap(), 12);
        let census = mgr.run_simulation(&opts(5, vec![])).unwrap();
        assert_eq!(census.total(), 12);

        fs::remove_file(&file).ok();
    }

    #[test]
    fn summary_lists_every_kind() {
        let census = crate::model::Population::new(vec![]).census();
        assert_eq!(summary(&census), "Paper=0 Rock=0 Scissors=0");
    }
}
