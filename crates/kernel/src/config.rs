//! Mission configuration, loadable from YAML.
//!
//! Defaults reproduce the stock mission: 1.5 s drop feedback, a 2 s pause
//! before the next puzzle, 3 s wrong-answer messages, and a 980 N load 2 m
//! along a 10 m bridge checked to within 1 N.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use equilibria_phases::{
    BridgeModel, FreeBodyModel, Puzzle, QuizModel, QuizTiming, default_puzzles,
};
use equilibria_physics::BridgeScenario;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("at least one quiz puzzle is required")]
    NoPuzzles,
    #[error("duplicate puzzle id {0}")]
    DuplicatePuzzleId(u32),
    #[error("puzzle {0} has a non-finite answer")]
    NonFiniteAnswer(u32),
    #[error("tolerance must be positive, got {0}")]
    NonPositiveTolerance(f64),
    #[error("invalid bridge: {reason}")]
    InvalidBridge { reason: String },
}

/// Feedback delays in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub drop_feedback_ms: u64,
    pub quiz_advance_ms: u64,
    pub quiz_retry_feedback_ms: u64,
    pub structural_pulse_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            drop_feedback_ms: 1500,
            quiz_advance_ms: 2000,
            quiz_retry_feedback_ms: 3000,
            structural_pulse_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub scenario: BridgeScenario,
    pub tolerance_n: f64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            scenario: BridgeScenario::default(),
            tolerance_n: 1.0,
        }
    }
}

/// Everything tunable about a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub timing: TimingConfig,
    pub bridge: BridgeConfig,
    pub puzzles: Vec<Puzzle>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            bridge: BridgeConfig::default(),
            puzzles: default_puzzles(),
        }
    }
}

impl MissionConfig {
    /// Parse and validate YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), puzzles = config.puzzles.len(), "loaded mission config");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject settings that leave a phase unwinnable or ill-defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.puzzles.is_empty() {
            return Err(ConfigError::NoPuzzles);
        }
        let mut seen = HashSet::new();
        for puzzle in &self.puzzles {
            if !seen.insert(puzzle.id) {
                return Err(ConfigError::DuplicatePuzzleId(puzzle.id));
            }
            if !puzzle.answer.is_finite() {
                return Err(ConfigError::NonFiniteAnswer(puzzle.id));
            }
        }

        let tol = self.bridge.tolerance_n;
        if !(tol > 0.0 && tol.is_finite()) {
            return Err(ConfigError::NonPositiveTolerance(tol));
        }
        let s = &self.bridge.scenario;
        if !(s.length_m > 0.0 && s.length_m.is_finite()) {
            return Err(ConfigError::InvalidBridge {
                reason: format!("length must be positive, got {}", s.length_m),
            });
        }
        if !(0.0..=s.length_m).contains(&s.load_distance_m) {
            return Err(ConfigError::InvalidBridge {
                reason: format!(
                    "load at {} m is off a {} m span",
                    s.load_distance_m, s.length_m
                ),
            });
        }
        if !(s.load_mass_kg >= 0.0 && s.gravity >= 0.0 && s.weight_n().is_finite()) {
            return Err(ConfigError::InvalidBridge {
                reason: "mass and gravity must be finite and non-negative".into(),
            });
        }
        Ok(())
    }

    pub fn free_body_model(&self) -> FreeBodyModel {
        FreeBodyModel::new(Duration::from_millis(self.timing.drop_feedback_ms))
    }

    pub fn quiz_model(&self) -> QuizModel {
        QuizModel::new(
            self.puzzles.clone(),
            QuizTiming {
                advance_after: Duration::from_millis(self.timing.quiz_advance_ms),
                retry_feedback_for: Duration::from_millis(self.timing.quiz_retry_feedback_ms),
            },
        )
    }

    pub fn bridge_model(&self) -> BridgeModel {
        BridgeModel::new(self.bridge.scenario, self.bridge.tolerance_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = MissionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.puzzles.len(), 3);
        assert_eq!(config.bridge.tolerance_n, 1.0);
    }

    #[test]
    fn yaml_roundtrip_preserves_config() {
        let config = MissionConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(MissionConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = MissionConfig::from_yaml_str("timing:\n  drop_feedback_ms: 500\n").unwrap();
        assert_eq!(config.timing.drop_feedback_ms, 500);
        assert_eq!(config.timing.quiz_advance_ms, 2000);
        assert_eq!(config.puzzles, default_puzzles());
    }

    #[test]
    fn empty_puzzle_list_rejected() {
        let err = MissionConfig::from_yaml_str("puzzles: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::NoPuzzles));
    }

    #[test]
    fn duplicate_puzzle_ids_rejected() {
        let mut config = MissionConfig::default();
        config.puzzles[1].id = config.puzzles[0].id;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicatePuzzleId(1))
        ));
    }

    #[test]
    fn bad_tolerance_rejected() {
        let mut config = MissionConfig::default();
        config.bridge.tolerance_n = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveTolerance(_))
        ));
    }

    #[test]
    fn load_off_span_rejected() {
        let mut config = MissionConfig::default();
        config.bridge.scenario.load_distance_m = 12.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBridge { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bridge:\n  tolerance_n: 0.5").unwrap();
        let config = MissionConfig::load(file.path()).unwrap();
        assert_eq!(config.bridge.tolerance_n, 0.5);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(matches!(
            MissionConfig::from_yaml_str("timing: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn models_follow_config() {
        let mut config = MissionConfig::default();
        config.puzzles.truncate(1);
        let quiz = config.quiz_model();
        assert_eq!(quiz.progress(), (0, 1));
        assert_eq!(config.bridge_model().tolerance_n(), 1.0);
    }
}
