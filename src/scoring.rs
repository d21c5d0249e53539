//! Relevance scoring of one template against one brief
//!
//! `score = intent_affinity + signal_match`. Every rule that fires is recorded
//! in a [`ScoreBreakdown`] so rankings can be explained after the fact.

use serde::Serialize;

use crate::archetype::Archetype;
use crate::catalog::{Catalog, CompositionTemplate, ContentCategory, TextZone};
use crate::config::ScoringConfig;
use crate::signals::PromptSignals;

/// Scoring rule identifiers, stable for logs and `--explain` output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    IntentAffinity,
    SignalMatch,
    LongCopy,
    ShortCopy,
    ManyLines,
    FewLines,
    OverlayOverflow,
    ListOnHero,
    GeneralBonus,
}

/// Points contributed by a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub rule: Rule,
    pub points: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub total: i32,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    fn add(&mut self, rule: Rule, points: i32) {
        if points == 0 {
            return;
        }
        self.total += points;
        self.contributions.push(Contribution { rule, points });
    }

    /// Sum of the contributions from one rule
    pub fn points_for(&self, rule: Rule) -> i32 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

/// A template with its archetype and score, alive only during ranking
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub template: &'a CompositionTemplate,
    pub archetype: Archetype,
    pub score: i32,
    pub breakdown: ScoreBreakdown,
}

/// +intent_affinity when the template is curated for the selected category.
pub fn score_intent_affinity(
    template: &CompositionTemplate,
    category: Option<ContentCategory>,
    catalog: &Catalog,
    config: &ScoringConfig,
) -> i32 {
    match category {
        Some(category) if catalog.is_curated(category, &template.id) => config.intent_affinity,
        _ => 0,
    }
}

/// Signal-to-archetype bonuses plus copy-length and text-zone adjustments.
pub fn score_by_signals(
    template: &CompositionTemplate,
    signals: &PromptSignals,
    archetype: Archetype,
    config: &ScoringConfig,
    breakdown: &mut ScoreBreakdown,
) {
    let zone = template.text_zone;

    for row in &config.signal_bonuses {
        if row.archetype == archetype && signals.has(row.signal) {
            breakdown.add(Rule::SignalMatch, row.weight);
        }
    }

    if signals.word_count > config.long_copy_words
        && config.long_copy_archetypes.contains(&archetype)
    {
        breakdown.add(Rule::LongCopy, config.long_copy_bonus);
    }
    if signals.word_count <= config.short_copy_words
        && config.short_copy_archetypes.contains(&archetype)
    {
        breakdown.add(Rule::ShortCopy, config.short_copy_bonus);
    }

    if signals.line_count >= config.many_lines && zone != TextZone::Overlay {
        breakdown.add(Rule::ManyLines, config.many_lines_bonus);
    }
    if signals.line_count <= config.few_lines && config.few_lines_zones.contains(&zone) {
        breakdown.add(Rule::FewLines, config.few_lines_bonus);
    }

    // Long copy does not fit an overlay zone
    if signals.word_count > config.overlay_overflow_words && zone == TextZone::Overlay {
        breakdown.add(Rule::OverlayOverflow, config.overlay_overflow_penalty);
    }
    if signals.list_like && archetype == Archetype::Hero {
        breakdown.add(Rule::ListOnHero, config.list_on_hero_penalty);
    }

    if archetype == Archetype::General {
        breakdown.add(Rule::GeneralBonus, config.general_bonus);
    }
}

/// Full score of a template with every contributing rule.
pub fn score_template(
    template: &CompositionTemplate,
    archetype: Archetype,
    signals: &PromptSignals,
    category: Option<ContentCategory>,
    catalog: &Catalog,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();
    breakdown.add(
        Rule::IntentAffinity,
        score_intent_affinity(template, category, catalog, config),
    );
    score_by_signals(template, signals, archetype, config, &mut breakdown);
    breakdown
}
