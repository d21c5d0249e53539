//! Recommendation engine: filter, classify, score, sort, diversify.
//!
//! A [`Recommender`] holds only immutable configuration and the lexicon built
//! from it, so one instance can serve any number of threads.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archetype::{Archetype, classify};
use crate::catalog::{Catalog, ContentCategory};
use crate::config::Config;
use crate::diversify::diversify;
use crate::filter::filter_candidates;
use crate::lexicon::Lexicon;
use crate::scoring::{ScoreBreakdown, ScoredCandidate, score_template};
use crate::signals::{PromptSignals, parse_signals};

/// One recommendation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRequest {
    pub brief: String,
    pub category: Option<ContentCategory>,
    /// Falls back to `diversity.max_items` when absent
    pub max_items: Option<usize>,
}

impl RecommendationRequest {
    pub fn new(brief: impl Into<String>) -> Self {
        Self {
            brief: brief.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: ContentCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }
}

/// Owned ranking row for diagnostics and `--explain` output
#[derive(Debug, Clone, Serialize)]
pub struct RankedTemplate {
    pub id: String,
    pub name: String,
    pub archetype: Archetype,
    pub score: i32,
    pub selected: bool,
    pub breakdown: ScoreBreakdown,
}

/// Full explanation of one call
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub signals: PromptSignals,
    pub ranking: Vec<RankedTemplate>,
}

pub struct Recommender {
    config: Config,
    lexicon: Lexicon,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Recommender {
    pub fn new(config: Config) -> Self {
        let lexicon = Lexicon::from_config(&config.lexicon);
        Self { config, lexicon }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn signals(&self, brief: &str) -> PromptSignals {
        parse_signals(brief, &self.lexicon)
    }

    /// Every eligible template, scored and sorted best first. Ties keep catalog order.
    pub fn rank<'a>(
        &self,
        catalog: &'a Catalog,
        request: &RecommendationRequest,
    ) -> Vec<ScoredCandidate<'a>> {
        let signals = self.signals(&request.brief);
        self.rank_with_signals(catalog, request.category, &signals)
    }

    fn rank_with_signals<'a>(
        &self,
        catalog: &'a Catalog,
        category: Option<ContentCategory>,
        signals: &PromptSignals,
    ) -> Vec<ScoredCandidate<'a>> {
        let candidates = filter_candidates(&catalog.templates, &self.config.filter);

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|template| {
                let archetype = classify(template, &self.lexicon);
                let breakdown = score_template(
                    template,
                    archetype,
                    signals,
                    category,
                    catalog,
                    &self.config.scoring,
                );
                ScoredCandidate {
                    template,
                    archetype,
                    score: breakdown.total,
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    fn max_items(&self, request: &RecommendationRequest) -> usize {
        request.max_items.unwrap_or(self.config.diversity.max_items)
    }

    /// Ordered template ids for the selection UI.
    pub fn recommend(&self, catalog: &Catalog, request: &RecommendationRequest) -> Vec<String> {
        let signals = self.signals(&request.brief);
        let ranked = self.rank_with_signals(catalog, request.category, &signals);
        let max_items = self.max_items(request);
        let picked = diversify(&ranked, max_items, &self.config.diversity);

        debug!(
            catalog = catalog.len(),
            candidates = ranked.len(),
            returned = picked.len(),
            max_items,
            category = request.category.map(|c| c.as_str()),
            words = signals.word_count,
            lines = signals.line_count,
            "Recommended layouts"
        );

        picked.into_iter().map(|c| c.template.id.clone()).collect()
    }

    /// Signals plus the complete ranking, marking which rows were selected.
    pub fn explain(&self, catalog: &Catalog, request: &RecommendationRequest) -> Explanation {
        let signals = self.signals(&request.brief);
        let ranked = self.rank_with_signals(catalog, request.category, &signals);
        let picked = diversify(&ranked, self.max_items(request), &self.config.diversity);

        let ranking = ranked
            .iter()
            .map(|c| RankedTemplate {
                id: c.template.id.clone(),
                name: c.template.name.clone(),
                archetype: c.archetype,
                score: c.score,
                // Row identity, not id: duplicate ids are picked once
                selected: picked.iter().any(|p| std::ptr::eq(*p, c)),
                breakdown: c.breakdown.clone(),
            })
            .collect();

        Explanation { signals, ranking }
    }
}
