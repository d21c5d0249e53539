//! Quota-constrained top-N selection
//!
//! Greedy two-pass pick over candidates already sorted by score. The first pass
//! caps how many templates of one archetype make the cut; the second back-fills
//! in score order when the caps leave slots empty, appending after the first
//! pass picks. It is not an optimal top-k-under-quota solver, and does not
//! need to be for catalogs of this size.

use std::collections::{HashMap, HashSet};

use crate::archetype::Archetype;
use crate::config::DiversityConfig;
use crate::scoring::ScoredCandidate;

/// Pick up to `max_items` candidates from `sorted`, keeping score order.
pub fn diversify<'c, 't>(
    sorted: &'c [ScoredCandidate<'t>],
    max_items: usize,
    config: &DiversityConfig,
) -> Vec<&'c ScoredCandidate<'t>> {
    let mut result: Vec<&ScoredCandidate> = Vec::with_capacity(max_items.min(sorted.len()));
    let mut taken: HashSet<usize> = HashSet::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut usage: HashMap<Archetype, usize> = HashMap::new();

    for (idx, item) in sorted.iter().enumerate() {
        if result.len() >= max_items {
            break;
        }
        let used = usage.entry(item.archetype).or_insert(0);
        if *used >= config.quota_for(item.archetype) {
            continue;
        }
        // A catalog listing the same id twice still yields it once
        if !seen_ids.insert(item.template.id.as_str()) {
            continue;
        }
        *used += 1;
        taken.insert(idx);
        result.push(item);
    }

    if result.len() < max_items {
        for (idx, item) in sorted.iter().enumerate() {
            if result.len() >= max_items {
                break;
            }
            if taken.contains(&idx) || !seen_ids.insert(item.template.id.as_str()) {
                continue;
            }
            taken.insert(idx);
            result.push(item);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CompositionTemplate;
    use crate::scoring::ScoreBreakdown;

    fn templates(ids: &[&str]) -> Vec<CompositionTemplate> {
        ids.iter()
            .map(|id| CompositionTemplate {
                id: id.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn scored<'a>(
        templates: &'a [CompositionTemplate],
        rows: &[(Archetype, i32)],
    ) -> Vec<ScoredCandidate<'a>> {
        templates
            .iter()
            .zip(rows.iter())
            .map(|(t, (archetype, score))| ScoredCandidate {
                template: t,
                archetype: *archetype,
                score: *score,
                breakdown: ScoreBreakdown::default(),
            })
            .collect()
    }

    fn ids(picked: &[&ScoredCandidate]) -> Vec<String> {
        picked.iter().map(|c| c.template.id.clone()).collect()
    }

    #[test]
    fn test_quota_skips_third_of_same_archetype() {
        let ts = templates(&["c1", "c2", "c3", "h1", "e1"]);
        let cands = scored(
            &ts,
            &[
                (Archetype::Comparison, 30),
                (Archetype::Comparison, 28),
                (Archetype::Comparison, 26),
                (Archetype::Hero, 10),
                (Archetype::Event, 5),
            ],
        );
        let picked = diversify(&cands, 4, &DiversityConfig::default());
        assert_eq!(ids(&picked), vec!["c1", "c2", "h1", "e1"]);
    }

    #[test]
    fn test_backfill_when_quota_leaves_gaps() {
        let ts = templates(&["c1", "c2", "c3", "c4", "h1"]);
        let cands = scored(
            &ts,
            &[
                (Archetype::Comparison, 30),
                (Archetype::Comparison, 28),
                (Archetype::Comparison, 26),
                (Archetype::Comparison, 24),
                (Archetype::Hero, 10),
            ],
        );
        let picked = diversify(&cands, 4, &DiversityConfig::default());
        // First pass takes c1, c2, h1; back-fill appends c3
        assert_eq!(ids(&picked), vec!["c1", "c2", "h1", "c3"]);
    }

    #[test]
    fn test_small_pool_returns_everything() {
        let ts = templates(&["a", "b", "c", "d"]);
        let cands = scored(
            &ts,
            &[
                (Archetype::List, 9),
                (Archetype::Hero, 8),
                (Archetype::Promo, 7),
                (Archetype::General, 2),
            ],
        );
        let picked = diversify(&cands, 6, &DiversityConfig::default());
        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn test_zero_max_items() {
        let ts = templates(&["a"]);
        let cands = scored(&ts, &[(Archetype::List, 9)]);
        assert!(diversify(&cands, 0, &DiversityConfig::default()).is_empty());
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let ts = templates(&["a", "a", "b"]);
        let cands = scored(
            &ts,
            &[(Archetype::List, 9), (Archetype::List, 9), (Archetype::Hero, 1)],
        );
        let picked = diversify(&cands, 3, &DiversityConfig::default());
        assert_eq!(ids(&picked), vec!["a", "b"]);
    }

    #[test]
    fn test_quota_override() {
        let ts = templates(&["g1", "g2", "g3", "l1"]);
        let cands = scored(
            &ts,
            &[
                (Archetype::General, 5),
                (Archetype::General, 5),
                (Archetype::General, 5),
                (Archetype::List, 1),
            ],
        );
        let mut config = DiversityConfig::default();
        config.quota_overrides.insert("general".to_string(), 1);
        let picked = diversify(&cands, 2, &config);
        assert_eq!(ids(&picked), vec!["g1", "l1"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ts = templates(&["x", "y", "z"]);
        let cands = scored(
            &ts,
            &[(Archetype::Hero, 4), (Archetype::Hero, 4), (Archetype::Hero, 4)],
        );
        let picked = diversify(&cands, 3, &DiversityConfig::default());
        assert_eq!(ids(&picked), vec!["x", "y", "z"]);
    }
}
