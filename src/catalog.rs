//! Composition template catalog
//!
//! Templates are authored and stored elsewhere; this module only describes
//! their shape and reads catalog snapshots exported as JSON. Field names follow
//! the authoring tool's camelCase export (`promptInstruction`, `textZone`).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deserializers::{de_string_forgiving, de_text_zone_forgiving};
use crate::error::{RecommenderError, Result};

/// Where a template expects its headline text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextZone {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    Overlay,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Missing or unrecognized zone
    #[default]
    #[serde(other)]
    Unspecified,
}

/// A pre-authored visual layout blueprint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompositionTemplate {
    #[serde(deserialize_with = "de_string_forgiving")]
    pub id: String,
    #[serde(deserialize_with = "de_string_forgiving")]
    pub name: String,
    #[serde(deserialize_with = "de_string_forgiving")]
    pub description: String,
    #[serde(
        rename = "promptInstruction",
        alias = "instruction",
        deserialize_with = "de_string_forgiving"
    )]
    pub instruction: String,
    #[serde(deserialize_with = "de_text_zone_forgiving")]
    pub text_zone: TextZone,
}

/// Content intent tag chosen by the user before writing the brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentCategory {
    #[serde(rename = "oferta")]
    Offer,
    #[serde(rename = "escaparate")]
    Showcase,
    #[serde(rename = "catalogo")]
    Catalog,
    #[serde(rename = "lanzamiento")]
    Launch,
    #[serde(rename = "servicio")]
    Service,
    #[serde(rename = "comunicado")]
    Announcement,
    #[serde(rename = "evento")]
    Event,
    #[serde(rename = "lista")]
    List,
    #[serde(rename = "comparativa")]
    Comparison,
    #[serde(rename = "efemeride")]
    Seasonal,
    #[serde(rename = "equipo")]
    Team,
    #[serde(rename = "cita")]
    Quote,
    #[serde(rename = "talento")]
    Hiring,
    #[serde(rename = "logro")]
    Milestone,
    #[serde(rename = "bts")]
    BehindTheScenes,
    #[serde(rename = "dato")]
    Stat,
    #[serde(rename = "pasos")]
    HowTo,
    #[serde(rename = "definicion")]
    Definition,
    #[serde(rename = "pregunta")]
    Question,
    #[serde(rename = "reto")]
    Challenge,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 20] = [
        ContentCategory::Offer,
        ContentCategory::Showcase,
        ContentCategory::Catalog,
        ContentCategory::Launch,
        ContentCategory::Service,
        ContentCategory::Announcement,
        ContentCategory::Event,
        ContentCategory::List,
        ContentCategory::Comparison,
        ContentCategory::Seasonal,
        ContentCategory::Team,
        ContentCategory::Quote,
        ContentCategory::Hiring,
        ContentCategory::Milestone,
        ContentCategory::BehindTheScenes,
        ContentCategory::Stat,
        ContentCategory::HowTo,
        ContentCategory::Definition,
        ContentCategory::Question,
        ContentCategory::Challenge,
    ];

    /// Wire tag used by the catalog export
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Offer => "oferta",
            ContentCategory::Showcase => "escaparate",
            ContentCategory::Catalog => "catalogo",
            ContentCategory::Launch => "lanzamiento",
            ContentCategory::Service => "servicio",
            ContentCategory::Announcement => "comunicado",
            ContentCategory::Event => "evento",
            ContentCategory::List => "lista",
            ContentCategory::Comparison => "comparativa",
            ContentCategory::Seasonal => "efemeride",
            ContentCategory::Team => "equipo",
            ContentCategory::Quote => "cita",
            ContentCategory::Hiring => "talento",
            ContentCategory::Milestone => "logro",
            ContentCategory::BehindTheScenes => "bts",
            ContentCategory::Stat => "dato",
            ContentCategory::HowTo => "pasos",
            ContentCategory::Definition => "definicion",
            ContentCategory::Question => "pregunta",
            ContentCategory::Challenge => "reto",
        }
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentCategory {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = crate::normalize::normalize(s.trim());
        ContentCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| RecommenderError::Validation {
                message: format!("unknown content category '{}'", s),
            })
    }
}

/// Immutable snapshot of templates plus the curated subset per category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub templates: Vec<CompositionTemplate>,
    pub curated: BTreeMap<ContentCategory, Vec<String>>,
}

impl Catalog {
    pub fn new(templates: Vec<CompositionTemplate>) -> Self {
        Self {
            templates,
            curated: BTreeMap::new(),
        }
    }

    /// Attach the curated template ids for a category.
    pub fn with_curated<I, S>(mut self, category: ContentCategory, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.curated
            .insert(category, ids.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `template_id` belongs to the curated subset of `category`.
    pub fn is_curated(&self, category: ContentCategory, template_id: &str) -> bool {
        self.curated
            .get(&category)
            .is_some_and(|ids| ids.iter().any(|id| id == template_id))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(content).map_err(|e| {
            RecommenderError::Catalog {
                message: format!("invalid catalog JSON: {}", e),
            }
        })?;
        debug!(
            templates = catalog.templates.len(),
            categories = catalog.curated.len(),
            "Catalog parsed"
        );
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RecommenderError::Catalog {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
