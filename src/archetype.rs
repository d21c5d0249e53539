//! Archetype classification for composition templates
//!
//! Every template falls into exactly one content archetype, decided by the
//! keyword groups of the active [`Lexicon`]. Groups are checked in priority
//! order and the first hit wins: template metadata often mentions several
//! groups at once ("split timeline", "ranking banner").

use serde::{Deserialize, Serialize};

use crate::catalog::CompositionTemplate;
use crate::error::RecommenderError;
use crate::lexicon::Lexicon;
use crate::normalize::{contains_any, normalize};

/// Deterministic content archetype of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Comparison,
    List,
    Process,
    Metric,
    Event,
    Promo,
    Human,
    Question,
    Hero,
    Editorial,
    General,
}

impl Archetype {
    /// Classifier priority order; `General` is the fallback and comes last.
    pub const ALL: [Archetype; 11] = [
        Archetype::Comparison,
        Archetype::List,
        Archetype::Process,
        Archetype::Metric,
        Archetype::Event,
        Archetype::Promo,
        Archetype::Human,
        Archetype::Question,
        Archetype::Hero,
        Archetype::Editorial,
        Archetype::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Comparison => "comparison",
            Archetype::List => "list",
            Archetype::Process => "process",
            Archetype::Metric => "metric",
            Archetype::Event => "event",
            Archetype::Promo => "promo",
            Archetype::Human => "human",
            Archetype::Question => "question",
            Archetype::Hero => "hero",
            Archetype::Editorial => "editorial",
            Archetype::General => "general",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Archetype {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| RecommenderError::Validation {
                message: format!("unknown archetype '{}'", s),
            })
    }
}

/// Single lookup string built from all descriptive metadata of a template.
fn lookup_text(template: &CompositionTemplate) -> String {
    normalize(&format!(
        "{} {} {} {}",
        template.id, template.name, template.description, template.instruction
    ))
}

/// Classify a template using the lexicon's ordered keyword chain.
pub fn classify(template: &CompositionTemplate, lexicon: &Lexicon) -> Archetype {
    let text = lookup_text(template);

    lexicon
        .archetype_rules()
        .iter()
        .find(|rule| contains_any(&text, &rule.keywords))
        .map(|rule| rule.archetype)
        .unwrap_or(Archetype::General)
}
