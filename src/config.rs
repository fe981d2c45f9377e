use crate::engine::Rules;
use crate::geometry::Bounds;
use crate::model::N_KINDS;
use crate::search::{ScanRange, SearchKind};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Board dimensions.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Largest valid x coordinate.
    pub width: i32,
    /// Largest valid y coordinate.
    pub height: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 600,
        }
    }
}

/// Initial population parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationConfig {
    /// Number of agent kinds (only the three-kind cycle is supported).
    pub n_types: usize,
    /// Number of agents of each kind.
    pub per_type: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            n_types: N_KINDS,
            per_type: 50,
        }
    }
}

/// Interaction parameters.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Squared distance at which a rival is caught.
    pub catch_radius_sq: i64,
    /// Nearest rival search strategy.
    pub search: SearchKind,
    /// Candidates visited by the search.
    pub scan: ScanRange,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            catch_radius_sq: 2,
            search: SearchKind::default(),
            scan: ScanRange::default(),
        }
    }
}

/// Simulation configuration parameters.
///
/// Loaded from a TOML file and validated before use. Every missing key
/// falls back to its default. See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub board: BoardConfig,
    pub population: PopulationConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.board.width, 1..=100_000).context("invalid board width")?;
        check_num(self.board.height, 1..=100_000).context("invalid board height")?;

        check_num(self.population.n_types, N_KINDS..=N_KINDS)
            .context("invalid number of types")?;
        check_num(self.population.per_type, 1..=100_000)
            .context("invalid number of agents per type")?;

        check_num(self.rules.catch_radius_sq, 0..=1_000_000)
            .context("invalid squared catch radius")?;

        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.board.width, self.board.height)
    }

    pub fn rules(&self) -> Rules {
        Rules {
            bounds: self.bounds(),
            catch_radius_sq: self.rules.catch_radius_sq,
        }
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.bounds(), Bounds::new(300, 600));
        assert_eq!(cfg.population.per_type, 50);
        assert_eq!(cfg.rules().catch_radius_sq, 2);
        assert_eq!(cfg.rules.search, SearchKind::Linear);
        assert_eq!(cfg.rules.scan, ScanRange::Truncated);
    }

    #[test]
    fn parses_every_section() {
        let cfg = Config::from_toml(
            r#"
[board]
width = 40
height = 20

[population]
n_types = 3
per_type = 7

[rules]
catch_radius_sq = 5
search = "circular"
scan = "full"
"#,
        )
        .unwrap();

        assert_eq!(cfg.bounds(), Bounds::new(40, 20));
        assert_eq!(cfg.population.per_type, 7);
        assert_eq!(cfg.rules.catch_radius_sq, 5);
        assert_eq!(cfg.rules.search, SearchKind::Circular);
        assert_eq!(cfg.rules.scan, ScanRange::Full);
    }

    #[test]
    fn rejects_invalid_values() {
        for contents in [
            "[board]\nwidth = 0\n",
            "[population]\nn_types = 4\n",
            "[population]\nper_type = 0\n",
            "[rules]\ncatch_radius_sq = -1\n",
            "[rules]\nsearch = \"kdtree\"\n",
            "[board]\ndepth = 3\n",
        ] {
            assert!(Config::from_toml(contents).is_err(), "accepted {contents:?}");
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Config::from_file("/nonexistent/rochambeau.toml").is_err());
    }
}
