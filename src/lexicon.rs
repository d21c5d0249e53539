//! Keyword lists for brief signals and template archetypes
//!
//! The built-in lists come in two locales. `es` (the default) is the marketing
//! vocabulary the catalog was tuned on; `en` carries the English equivalents.
//! `multi` is their union and must be opted into: short English terms such as
//! `last` or `date` also occur inside Spanish words ("plastico", "quedate").
//! All terms are already normalized (lowercase, no diacritics) and matched as
//! plain substrings of the brief padded with one space on each side, so a
//! term like `" we "` also matches at the start or end of the brief.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::archetype::Archetype;
use crate::config::LexiconConfig;
use crate::error::RecommenderError;

/// Keyword locale selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
    Multi,
}

impl std::str::FromStr for Locale {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            "multi" => Ok(Locale::Multi),
            other => Err(RecommenderError::Validation {
                message: format!("unknown locale '{}', expected es, en or multi", other),
            }),
        }
    }
}

// Brief signal terms ---------------------------------------------------------

pub const QUESTION_ES: &[&str] = &["que opinas", "te parece", "pregunta", "encuesta", "quiz"];
pub const QUESTION_EN: &[&str] = &["what do you think", "survey", "poll", "quiz", "question"];

pub const COMPARISON_ES: &[&str] = &[
    " vs ", "versus", "antes", "despues", "compar", "mejor que", "frente a",
];
pub const COMPARISON_EN: &[&str] = &[
    " vs ",
    "versus",
    "before and after",
    "before/after",
    "compared to",
    "better than",
];

pub const PROCESS_ES: &[&str] = &[
    "paso", "proceso", "metodo", "como", "guia", "tutorial", "timeline", "fases",
];
pub const PROCESS_EN: &[&str] = &[
    "step", "process", "method", "how to", "guide", "tutorial", "timeline", "phases",
];

pub const METRICS_ES: &[&str] = &[
    "precio",
    "descuento",
    "plazas",
    "datos",
    "estadistica",
    "ranking",
];
pub const METRICS_EN: &[&str] = &["price", "discount", "slots", "data", "statistic", "ranking"];

pub const EVENT_ES: &[&str] = &[
    "evento",
    "fecha",
    "hora",
    "lugar",
    "reserva",
    "inscripcion",
    "apertura",
    "webinar",
    "taller",
];
pub const EVENT_EN: &[&str] = &[
    "event",
    "date",
    "time",
    "place",
    "reservation",
    "registration",
    "opening",
    "webinar",
    "workshop",
];

pub const URGENCY_ES: &[&str] = &[
    "hoy", "ahora", "ultimo", "ultimas", "limi", "urgente", "solo", "ya",
];
pub const URGENCY_EN: &[&str] = &[
    "today", "now", "last", "limited", "urgent", "only", "already",
];

pub const HUMAN_ES: &[&str] = &[
    "equipo",
    "testimonio",
    "historia",
    "personas",
    "comunidad",
    "nosotros",
    "senior",
    "familia",
];
pub const HUMAN_EN: &[&str] = &[
    "team",
    "testimonial",
    "story",
    "people",
    "community",
    " we ",
    " us ",
    "senior",
    "family",
];

/// Line prefixes that mark a list item even without a bullet
pub const LIST_OPENERS_ES: &[&str] = &[
    "clases", "beneficio", "paso", "punto", "incluye", "incluimos", "ventaja",
];
pub const LIST_OPENERS_EN: &[&str] = &["step", "benefit", "include", "advantage", "feature"];

// Archetype keyword groups, in chain order -----------------------------------

const ARCHETYPES_ES: &[(Archetype, &[&str])] = &[
    (
        Archetype::Comparison,
        &["compar", "versus", "vs", "split", "beforeafter", "transformation"],
    ),
    (
        Archetype::List,
        &["checklist", "lista", "ranking", "bullets", "agenda", "numerado", "iconos"],
    ),
    (
        Archetype::Process,
        &["proceso", "process", "timeline", "pasos", "zigzag", "recipe"],
    ),
    (
        Archetype::Metric,
        &[
            "dato", "metric", "dashboard", "stat", "pricing", "price", "number", "circular",
            "barras",
        ],
    ),
    (
        Archetype::Event,
        &["evento", "conference", "festival", "concert", "workshop", "networking", "calendar"],
    ),
    (
        Archetype::Promo,
        &["oferta", "flash", "sale", "retail", "promo", "banner", "exclusive", "urgency"],
    ),
    (
        Archetype::Human,
        &["equipo", "retrato", "portrait", "testimonial", "cita", "talento", "logro", "winner"],
    ),
    (
        Archetype::Question,
        &["pregunta", "quiz", "poll", "debate", "reto", "giveaway"],
    ),
    (
        Archetype::Hero,
        &["hero", "spotlight", "radial", "focus", "full bleed", "full-bleed"],
    ),
    (
        Archetype::Editorial,
        &["editorial", "manuscrito", "column", "minimal", "clean", "memo"],
    ),
];

const ARCHETYPES_EN: &[(Archetype, &[&str])] = &[
    (
        Archetype::Comparison,
        &["compare", "versus", "vs", "split", "before/after", "before-after", "transformation"],
    ),
    (
        Archetype::List,
        &["checklist", "list", "ranking", "bullets", "agenda", "numbered", "icons"],
    ),
    (
        Archetype::Process,
        &["process", "timeline", "steps", "zigzag", "recipe"],
    ),
    (
        Archetype::Metric,
        &[
            "data", "metric", "dashboard", "stat", "pricing", "price", "number", "circular",
            "chart", "bars",
        ],
    ),
    (
        Archetype::Event,
        &["event", "conference", "festival", "concert", "workshop", "networking", "calendar"],
    ),
    (
        Archetype::Promo,
        &["offer", "flash", "sale", "retail", "promo", "banner", "exclusive", "urgency"],
    ),
    (
        Archetype::Human,
        &["team", "portrait", "testimonial", "quote", "talent", "achievement", "winner"],
    ),
    (
        Archetype::Question,
        &["question", "quiz", "poll", "debate", "challenge", "giveaway"],
    ),
    (
        Archetype::Hero,
        &["hero", "spotlight", "radial", "focus", "full bleed", "full-bleed"],
    ),
    (
        Archetype::Editorial,
        &["editorial", "manuscript", "column", "minimal", "clean", "memo"],
    ),
];

/// One link of the classifier chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchetypeRule {
    pub archetype: Archetype,
    pub keywords: Vec<String>,
}

/// Resolved keyword lists used by the signal extractor and classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    pub question: Vec<String>,
    pub comparison: Vec<String>,
    pub process: Vec<String>,
    pub metrics: Vec<String>,
    pub event: Vec<String>,
    pub urgency: Vec<String>,
    pub human_tone: Vec<String>,
    pub list_openers: Vec<String>,
    rules: Vec<ArchetypeRule>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl Lexicon {
    pub fn for_locale(locale: Locale) -> Self {
        let pick = |es: &[&str], en: &[&str]| -> Vec<String> {
            match locale {
                Locale::Es => merge(&[es]),
                Locale::En => merge(&[en]),
                Locale::Multi => merge(&[es, en]),
            }
        };

        let rules = ARCHETYPES_ES
            .iter()
            .zip(ARCHETYPES_EN.iter())
            .map(|((archetype, es), (_, en))| ArchetypeRule {
                archetype: *archetype,
                keywords: pick(*es, *en),
            })
            .collect();

        Self {
            question: pick(QUESTION_ES, QUESTION_EN),
            comparison: pick(COMPARISON_ES, COMPARISON_EN),
            process: pick(PROCESS_ES, PROCESS_EN),
            metrics: pick(METRICS_ES, METRICS_EN),
            event: pick(EVENT_ES, EVENT_EN),
            urgency: pick(URGENCY_ES, URGENCY_EN),
            human_tone: pick(HUMAN_ES, HUMAN_EN),
            list_openers: pick(LIST_OPENERS_ES, LIST_OPENERS_EN),
            rules,
        }
    }

    /// Build the lexicon for the configured locale, then apply list overrides.
    /// Overrides replace a list wholesale; the classifier chain order never changes.
    pub fn from_config(config: &LexiconConfig) -> Self {
        let mut lexicon = Self::for_locale(config.locale);

        let replace = |target: &mut Vec<String>, terms: &Option<Vec<String>>| {
            if let Some(terms) = terms {
                *target = normalize_terms(terms);
            }
        };
        replace(&mut lexicon.question, &config.question);
        replace(&mut lexicon.comparison, &config.comparison);
        replace(&mut lexicon.process, &config.process);
        replace(&mut lexicon.metrics, &config.metrics);
        replace(&mut lexicon.event, &config.event);
        replace(&mut lexicon.urgency, &config.urgency);
        replace(&mut lexicon.human_tone, &config.human_tone);
        replace(&mut lexicon.list_openers, &config.list_openers);

        for (name, terms) in &config.archetypes {
            let archetype = match name.parse::<Archetype>() {
                Ok(a) => a,
                Err(e) => {
                    warn!("Ignoring lexicon override: {}", e);
                    continue;
                }
            };
            match lexicon.rules.iter_mut().find(|r| r.archetype == archetype) {
                Some(rule) => rule.keywords = normalize_terms(terms),
                None => warn!(
                    "Ignoring keyword override for '{}': it is the fallback archetype",
                    archetype
                ),
            }
        }

        lexicon
    }

    /// Classifier chain in priority order
    pub fn archetype_rules(&self) -> &[ArchetypeRule] {
        &self.rules
    }
}

/// Concatenate term lists, dropping repeats while keeping first-seen order.
fn merge(lists: &[&[&str]]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in lists.iter().flat_map(|l| l.iter()) {
        if !out.iter().any(|t| t == term) {
            out.push((*term).to_string());
        }
    }
    out
}

/// Configured terms go through the same normalization as the text they match.
/// Surrounding spaces are significant (" vs ") and are preserved.
fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| crate::normalize::normalize(t))
        .filter(|t| !t.trim().is_empty())
        .collect()
}
