use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::archetype::Archetype;
use crate::catalog::TextZone;
use crate::error::{RecommenderError, Result};
use crate::lexicon::Locale;
use crate::signals::Signal;

/// Upper bound accepted for the number of recommendations per call
pub const MAX_ITEMS_LIMIT: usize = 50;
/// Upper bound accepted for any per-archetype quota
pub const QUOTA_LIMIT: usize = 10;

/// Main configuration structure loaded from composition_recommender.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub lexicon: LexiconConfig,
    pub scoring: ScoringConfig,
    pub diversity: DiversityConfig,
    pub filter: FilterConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Keyword locale plus optional list replacements
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub locale: Locale,
    pub question: Option<Vec<String>>,
    pub comparison: Option<Vec<String>>,
    pub process: Option<Vec<String>>,
    pub metrics: Option<Vec<String>>,
    pub event: Option<Vec<String>>,
    pub urgency: Option<Vec<String>>,
    pub human_tone: Option<Vec<String>>,
    pub list_openers: Option<Vec<String>>,
    /// Archetype name -> replacement keyword group
    pub archetypes: BTreeMap<String, Vec<String>>,
}

/// One row of the signal x archetype bonus table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignalBonus {
    pub signal: Signal,
    pub archetype: Archetype,
    pub weight: i32,
}

impl SignalBonus {
    const fn new(signal: Signal, archetype: Archetype, weight: i32) -> Self {
        Self {
            signal,
            archetype,
            weight,
        }
    }
}

/// Hand-tuned additive scoring weights
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub intent_affinity: i32,
    pub signal_bonuses: Vec<SignalBonus>,
    /// Bonus applies when word_count > long_copy_words
    pub long_copy_words: usize,
    pub long_copy_archetypes: Vec<Archetype>,
    pub long_copy_bonus: i32,
    /// Bonus applies when word_count <= short_copy_words
    pub short_copy_words: usize,
    pub short_copy_archetypes: Vec<Archetype>,
    pub short_copy_bonus: i32,
    /// Bonus applies when line_count >= many_lines and the zone is not overlay
    pub many_lines: usize,
    pub many_lines_bonus: i32,
    /// Bonus applies when line_count <= few_lines and the zone is in few_lines_zones
    pub few_lines: usize,
    pub few_lines_zones: Vec<TextZone>,
    pub few_lines_bonus: i32,
    /// Penalty applies when word_count > overlay_overflow_words on an overlay zone
    pub overlay_overflow_words: usize,
    pub overlay_overflow_penalty: i32,
    pub list_on_hero_penalty: i32,
    pub general_bonus: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            intent_affinity: 35,
            signal_bonuses: vec![
                SignalBonus::new(Signal::Comparison, Archetype::Comparison, 24),
                SignalBonus::new(Signal::ListLike, Archetype::List, 20),
                SignalBonus::new(Signal::Process, Archetype::Process, 22),
                SignalBonus::new(Signal::Metrics, Archetype::Metric, 22),
                SignalBonus::new(Signal::Event, Archetype::Event, 20),
                SignalBonus::new(Signal::Urgency, Archetype::Promo, 18),
                SignalBonus::new(Signal::Question, Archetype::Question, 20),
                SignalBonus::new(Signal::HumanTone, Archetype::Human, 16),
            ],
            long_copy_words: 40,
            long_copy_archetypes: vec![Archetype::List, Archetype::Editorial],
            long_copy_bonus: 12,
            short_copy_words: 24,
            short_copy_archetypes: vec![Archetype::Hero, Archetype::Promo],
            short_copy_bonus: 10,
            many_lines: 5,
            many_lines_bonus: 6,
            few_lines: 2,
            few_lines_zones: vec![TextZone::Center, TextZone::Overlay],
            few_lines_bonus: 4,
            overlay_overflow_words: 55,
            overlay_overflow_penalty: -12,
            list_on_hero_penalty: -6,
            general_bonus: 2,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.intent_affinity < 0 {
            return Err(RecommenderError::Validation {
                message: "scoring.intent_affinity must not be negative".to_string(),
            });
        }
        for (i, row) in self.signal_bonuses.iter().enumerate() {
            let duplicate = self.signal_bonuses[..i]
                .iter()
                .any(|r| r.signal == row.signal && r.archetype == row.archetype);
            if duplicate {
                return Err(RecommenderError::Validation {
                    message: format!(
                        "scoring.signal_bonuses has two rows for {:?} -> {}",
                        row.signal, row.archetype
                    ),
                });
            }
        }
        if self.overlay_overflow_penalty > 0 || self.list_on_hero_penalty > 0 {
            return Err(RecommenderError::Validation {
                message: "scoring penalties must be zero or negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Top-N selection with per-archetype caps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiversityConfig {
    pub max_items: usize,
    pub archetype_quota: usize,
    /// Archetype name -> quota replacing archetype_quota for that archetype
    pub quota_overrides: BTreeMap<String, usize>,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            max_items: 6,
            archetype_quota: 2,
            quota_overrides: BTreeMap::new(),
        }
    }
}

impl DiversityConfig {
    pub fn quota_for(&self, archetype: Archetype) -> usize {
        self.quota_overrides
            .get(archetype.as_str())
            .copied()
            .unwrap_or(self.archetype_quota)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_items == 0 || self.max_items > MAX_ITEMS_LIMIT {
            return Err(RecommenderError::Validation {
                message: format!("diversity.max_items must be between 1 and {}", MAX_ITEMS_LIMIT),
            });
        }
        if self.archetype_quota == 0 || self.archetype_quota > QUOTA_LIMIT {
            return Err(RecommenderError::Validation {
                message: format!(
                    "diversity.archetype_quota must be between 1 and {}",
                    QUOTA_LIMIT
                ),
            });
        }
        for (name, quota) in &self.quota_overrides {
            name.parse::<Archetype>()?;
            if *quota > QUOTA_LIMIT {
                return Err(RecommenderError::Validation {
                    message: format!("diversity.quota_overrides.{} exceeds {}", name, QUOTA_LIMIT),
                });
            }
        }
        Ok(())
    }
}

/// Which templates never enter the scoring pool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Always-available baseline layouts
    pub excluded_ids: Vec<String>,
    pub free_form_id_suffixes: Vec<String>,
    pub free_form_id_markers: Vec<String>,
    pub free_form_name_markers: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            excluded_ids: owned(&[
                "default-free",
                "basic-editorial-columns",
                "basic-mosaic-flow",
                "basic-spotlight-radial",
                "basic-stacked-cards",
                "basic-diagonal-energy",
                "comunicado-modern",
                "servicio-benefit",
            ]),
            free_form_id_suffixes: owned(&["-free"]),
            free_form_id_markers: owned(&["default-free"]),
            free_form_name_markers: owned(&["libre", "free-form", "freeform"]),
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "composition_recommender=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn load_from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("RECO_LOG_LEVEL")
            && !level.trim().is_empty()
        {
            config.log_level = level;
        }
        config
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses COMPOSITION_RECOMMENDER_CONFIG environment variable or defaults to "composition_recommender.toml"
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("COMPOSITION_RECOMMENDER_CONFIG")
            .unwrap_or_else(|_| "composition_recommender.toml".to_string());

        let mut config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.clamp();
        config.validate()?;
        Ok(config)
    }

    /// Load a specific TOML file, still honoring environment overrides.
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RecommenderError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.clamp();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(max_items) = std::env::var("RECO_MAX_ITEMS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            self.diversity.max_items = max_items;
            tracing::debug!("RECO_MAX_ITEMS env override applied");
        }
        if let Some(quota) = std::env::var("RECO_ARCHETYPE_QUOTA")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            self.diversity.archetype_quota = quota;
            tracing::debug!("RECO_ARCHETYPE_QUOTA env override applied");
        }
        if let Ok(locale) = std::env::var("RECO_LOCALE") {
            match locale.parse::<Locale>() {
                Ok(locale) => {
                    self.lexicon.locale = locale;
                    tracing::debug!("RECO_LOCALE env override applied");
                }
                Err(e) => tracing::warn!("Ignoring RECO_LOCALE: {}", e),
            }
        }
    }

    /// Pull numeric limits back into range instead of failing the load.
    fn clamp(&mut self) {
        let d = &mut self.diversity;
        if d.max_items == 0 {
            tracing::warn!("max_items 0 is below min 1, clamping");
            d.max_items = 1;
        } else if d.max_items > MAX_ITEMS_LIMIT {
            tracing::warn!(
                "max_items {} exceeds max {}, clamping",
                d.max_items,
                MAX_ITEMS_LIMIT
            );
            d.max_items = MAX_ITEMS_LIMIT;
        }
        if d.archetype_quota == 0 {
            tracing::warn!("archetype_quota 0 is below min 1, clamping");
            d.archetype_quota = 1;
        } else if d.archetype_quota > QUOTA_LIMIT {
            tracing::warn!(
                "archetype_quota {} exceeds max {}, clamping",
                d.archetype_quota,
                QUOTA_LIMIT
            );
            d.archetype_quota = QUOTA_LIMIT;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.diversity.validate()?;
        // Unknown [lexicon.archetypes] keys are reported once, by Lexicon::from_config
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.intent_affinity, 35);
        assert_eq!(config.scoring.signal_bonuses.len(), 8);
        assert_eq!(config.diversity.max_items, 6);
        assert_eq!(config.diversity.archetype_quota, 2);
        assert_eq!(config.lexicon.locale, Locale::Es);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml = r#"
            [lexicon]
            locale = "es"
            urgency = ["hoy", "ultimas plazas"]

            [lexicon.archetypes]
            hero = ["portada"]

            [scoring]
            intent_affinity = 40

            [[scoring.signal_bonuses]]
            signal = "comparison"
            archetype = "comparison"
            weight = 30

            [diversity]
            archetype_quota = 1

            [diversity.quota_overrides]
            general = 3
        "#;

        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.lexicon.locale, Locale::Es);
        assert_eq!(config.lexicon.urgency.as_ref().unwrap().len(), 2);
        assert_eq!(config.lexicon.archetypes["hero"], vec!["portada".to_string()]);
        assert_eq!(config.scoring.intent_affinity, 40);
        assert_eq!(config.scoring.signal_bonuses.len(), 1);
        assert_eq!(config.scoring.general_bonus, 2);
        assert_eq!(config.diversity.max_items, 6);
        assert_eq!(config.diversity.quota_for(Archetype::General), 3);
        assert_eq!(config.diversity.quota_for(Archetype::Hero), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml_str("[scoring\nintent_affinity = ").unwrap_err();
        assert!(matches!(err, RecommenderError::Config { .. }));
    }

    #[test]
    fn test_duplicate_bonus_rows_rejected() {
        let mut scoring = ScoringConfig::default();
        scoring.signal_bonuses.push(SignalBonus::new(
            Signal::Comparison,
            Archetype::Comparison,
            5,
        ));
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_positive_penalty_rejected() {
        let scoring = ScoringConfig {
            list_on_hero_penalty: 3,
            ..Default::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_unknown_quota_override_rejected() {
        let mut diversity = DiversityConfig::default();
        diversity.quota_overrides.insert("carousel".to_string(), 1);
        assert!(diversity.validate().is_err());
    }

    #[test]
    fn test_clamp_pulls_limits_into_range() {
        let mut config = Config::default();
        config.diversity.max_items = 500;
        config.diversity.archetype_quota = 0;
        config.clamp();
        assert_eq!(config.diversity.max_items, MAX_ITEMS_LIMIT);
        assert_eq!(config.diversity.archetype_quota, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_raises_zero_limits() {
        let mut config = Config::default();
        config.diversity.max_items = 0;
        config.diversity.archetype_quota = 0;
        config.clamp();
        assert_eq!(config.diversity.max_items, 1);
        assert_eq!(config.diversity.archetype_quota, 1);
    }

    #[test]
    fn test_unknown_lexicon_archetype_is_left_to_the_lexicon() {
        let config = Config::from_toml_str("[lexicon.archetypes]\ncarousel = [\"slides\"]\n").unwrap();
        assert!(config.validate().is_ok());
        let lexicon = crate::lexicon::Lexicon::from_config(&config.lexicon);
        assert_eq!(lexicon, crate::lexicon::Lexicon::default());
    }

    #[test]
    fn test_missing_explicit_path_is_config_error() {
        let err = Config::load_from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RecommenderError::Config { .. }));
    }
}
