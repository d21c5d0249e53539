//! Brief signal extraction
//!
//! Derives a fixed set of content features from the raw brief using the
//! lexicon's term lists. Pure pattern matching: no term order, no state.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::normalize::{contains_any, normalize};

/// "- item", "* item", "• item", "1. item", "2) item", "3- item"
static LIST_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•\d]+[).\-\s]").expect("list marker regex is valid"));

/// Any number, optionally followed by a percent or currency sign
static METRIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+[%€$£]?").expect("metric regex is valid"));

/// Boolean brief features referenced by the scoring table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Question,
    Comparison,
    Process,
    Metrics,
    Event,
    Urgency,
    HumanTone,
    ListLike,
}

/// Features derived from one brief; recomputed per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PromptSignals {
    pub word_count: usize,
    pub line_count: usize,
    pub has_question: bool,
    pub has_comparison: bool,
    pub has_process: bool,
    pub has_metrics: bool,
    pub has_event_signals: bool,
    pub has_urgency: bool,
    pub has_human_tone: bool,
    pub list_like: bool,
}

impl PromptSignals {
    pub fn has(&self, signal: Signal) -> bool {
        match signal {
            Signal::Question => self.has_question,
            Signal::Comparison => self.has_comparison,
            Signal::Process => self.has_process,
            Signal::Metrics => self.has_metrics,
            Signal::Event => self.has_event_signals,
            Signal::Urgency => self.has_urgency,
            Signal::HumanTone => self.has_human_tone,
            Signal::ListLike => self.list_like,
        }
    }
}

fn is_list_item(line: &str, lexicon: &Lexicon) -> bool {
    if LIST_MARKER_RE.is_match(line) {
        return true;
    }
    let lower = normalize(line);
    lexicon
        .list_openers
        .iter()
        .any(|opener| lower.starts_with(opener.as_str()))
}

/// Extract signals from a raw brief.
pub fn parse_signals(raw: &str, lexicon: &Lexicon) -> PromptSignals {
    let text = normalize(raw);
    // Space-delimited terms (" vs ", " we ") must also hit at either end
    let padded = format!(" {} ", text);
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let list_items = lines.iter().filter(|l| is_list_item(l, lexicon)).count();

    PromptSignals {
        word_count: text.split_whitespace().count(),
        line_count: lines.len(),
        has_question: text.contains('?') || contains_any(&padded, &lexicon.question),
        has_comparison: contains_any(&padded, &lexicon.comparison),
        has_process: contains_any(&padded, &lexicon.process),
        has_metrics: METRIC_RE.is_match(&text) || contains_any(&padded, &lexicon.metrics),
        has_event_signals: contains_any(&padded, &lexicon.event),
        has_urgency: contains_any(&padded, &lexicon.urgency),
        has_human_tone: contains_any(&padded, &lexicon.human_tone),
        list_like: list_items >= 2 || lines.len() >= 4,
    }
}
