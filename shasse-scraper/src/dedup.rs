//! Collapse duplicate method records.
//!
//! Body rows and continuation rows can describe the same (game, method,
//! location) fact with different amounts of detail. The richer record wins
//! and keeps the position of the first occurrence.

use std::collections::HashMap;

use shasse_catalog::SpecificMethodRecord;
use shasse_core::has_place_keyword;
use shasse_core::methods::has_refinement_marker;

/// How much information a record carries.
pub fn completeness_score(record: &SpecificMethodRecord) -> u32 {
    let mut score = 0;
    if !record.game.trim().is_empty() {
        score += 1;
    }
    if !record.method.trim().is_empty() {
        score += 2;
    }
    if !record.location.trim().is_empty() {
        score += 1;
    }
    if !record.probability.trim().is_empty() {
        score += 1;
    }
    if has_refinement_marker(&record.method) {
        score += 2;
    }
    if has_place_keyword(&record.location) {
        score += 1;
    }
    score
}

/// Output of [`dedupe`].
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    pub records: Vec<SpecificMethodRecord>,
    /// Number of input records folded into an earlier one.
    pub collapsed: usize,
}

/// Keep one record per dedup key.
///
/// On a collision the record with the strictly higher score replaces the
/// earlier one in place; on a tie the earlier record stays.
pub fn dedupe(records: impl IntoIterator<Item = SpecificMethodRecord>) -> DedupOutcome {
    let mut out: Vec<SpecificMethodRecord> = Vec::new();
    let mut best: HashMap<(String, String, String), (usize, u32)> = HashMap::new();
    let mut collapsed = 0;

    for record in records {
        let key = record.dedup_key();
        let score = completeness_score(&record);
        match best.get_mut(&key) {
            Some((index, best_score)) => {
                collapsed += 1;
                if score > *best_score {
                    log::debug!(
                        "Replacing {:?} (score {}) with richer duplicate (score {})",
                        key,
                        best_score,
                        score
                    );
                    out[*index] = record;
                    *best_score = score;
                }
            }
            None => {
                best.insert(key, (out.len(), score));
                out.push(record);
            }
        }
    }

    DedupOutcome {
        records: out,
        collapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shasse_core::MethodCategory;
    use std::collections::HashSet;

    fn record(game: &str, method: &str, location: &str, probability: &str) -> SpecificMethodRecord {
        SpecificMethodRecord {
            method: method.to_string(),
            game: game.to_string(),
            location: location.to_string(),
            probability: probability.to_string(),
            category: MethodCategory::Encounter,
            description: String::new(),
            level: None,
            conditions: None,
            sprites: vec![],
        }
    }

    #[test]
    fn score_counts_each_signal() {
        assert_eq!(completeness_score(&record("Rouge", "Reset", "", "")), 3);
        assert_eq!(completeness_score(&record("Rouge", "Reset", "Route 1", "")), 5);
        assert_eq!(completeness_score(&record("Rouge", "Reset", "Route 1", "5%")), 6);
        assert_eq!(
            completeness_score(&record("Rouge", "Reset niv. 5", "Route 1", "5%")),
            8
        );
        assert_eq!(completeness_score(&record("Rouge", "Reset", "Pikachu", "")), 4);
    }

    #[test]
    fn richer_duplicate_replaces_in_place() {
        let mut poor = record("Rouge", "Reset", "Route 1", "");
        poor.sprites = vec!["poor".to_string()];
        let mut rich = record("Rouge", "Reset", "Route 1", "5%");
        rich.sprites = vec!["rich".to_string()];

        let outcome = dedupe(vec![
            poor,
            record("Bleu", "Rencontre", "Route 2", "10%"),
            rich,
        ]);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.collapsed, 1);
        assert_eq!(outcome.records[0].game, "Rouge");
        assert_eq!(outcome.records[0].sprites, vec!["rich"]);
        assert_eq!(outcome.records[1].game, "Bleu");
    }

    #[test]
    fn tie_keeps_first_seen() {
        let mut first = record("Rouge", "Reset", "Route 1", "5%");
        first.description = "first".to_string();
        let mut second = record("rouge", "RESET", "route  1", "7%");
        second.description = "second".to_string();

        let outcome = dedupe(vec![first, second]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].description, "first");
    }

    #[test]
    fn poorer_duplicate_never_wins() {
        let outcome = dedupe(vec![
            record("Rouge", "Reset", "Route 1", "5%"),
            record("Rouge", "Reset", "Route 1", ""),
        ]);
        assert_eq!(outcome.records[0].probability, "5%");
    }

    #[test]
    fn output_keys_are_unique_and_scores_monotone() {
        let input = vec![
            record("Or", "Surf", "Route 40", ""),
            record("Or", "Surf", "Route 40", "10%"),
            record("Or", "Pêche", "Route 40", "5%"),
            record("OR", "surf", "Route 40", ""),
            record("Argent", "Surf", "Route 40", "10%"),
            record("Or", "Pêche", "Route 40", ""),
        ];
        let max_scores: HashMap<_, u32> =
            input.iter().fold(HashMap::new(), |mut acc, r| {
                let entry = acc.entry(r.dedup_key()).or_insert(0);
                *entry = (*entry).max(completeness_score(r));
                acc
            });

        let outcome = dedupe(input.clone());
        let keys: HashSet<_> = outcome.records.iter().map(|r| r.dedup_key()).collect();
        assert_eq!(keys.len(), outcome.records.len());
        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.collapsed, input.len() - 3);
        for survivor in &outcome.records {
            assert_eq!(completeness_score(survivor), max_scores[&survivor.dedup_key()]);
        }
    }
}
