use core_types::enums::ScorerKind;

use crate::TextScorer;
use crate::heuristic::HeuristicScorer;

/// Resolves a ranked preference list to a concrete scoring backend.
///
/// The list is walked once at startup; the first available backend wins.
/// Model-backed variants (`Transformer`, `Lexicon`) are not compiled into
/// this build, so they resolve to the next entry. The heuristic wordlist is
/// always available, which makes this function total: callers get a working
/// scorer no matter what the preference list says.
pub fn create_scorer(preference: &[ScorerKind]) -> Box<dyn TextScorer> {
    for kind in preference {
        match kind {
            ScorerKind::Heuristic => {
                tracing::info!("Selected text scorer backend: heuristic");
                return Box::new(HeuristicScorer::new());
            }
            other => {
                tracing::debug!("Scorer backend {:?} is not available, trying next", other);
            }
        }
    }

    tracing::warn!("No preferred scorer backend available, using the heuristic floor");
    Box::new(HeuristicScorer::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_walk_lands_on_first_available() {
        let scorer = create_scorer(&[
            ScorerKind::Transformer,
            ScorerKind::Lexicon,
            ScorerKind::Heuristic,
        ]);
        assert_eq!(scorer.name(), "heuristic");
    }

    #[test]
    fn empty_preference_still_yields_a_scorer() {
        let scorer = create_scorer(&[]);
        assert_eq!(scorer.name(), "heuristic");
        assert!(scorer.score("calm").is_finite());
    }
}
