use crate::TextScorer;

const POSITIVE: &[&str] = &[
    "calm", "safe", "stable", "improved", "improving", "recovery", "recovered", "growth",
    "strong", "positive", "optimistic", "progress", "resolved", "success", "successful",
    "agreement", "peaceful", "reopened", "eased", "easing",
];

const NEGATIVE: &[&str] = &[
    "crisis", "war", "conflict", "attack", "threat", "risk", "riot", "unrest", "emergency",
    "disaster", "outbreak", "collapse", "negative", "fear", "panic", "violence", "warning",
    "evacuation", "closed", "strike", "shortage", "disruption",
];

/// The wordlist scorer at the floor of the fallback chain.
///
/// Counts positive and negative term hits over whitespace tokens and returns
/// their normalized difference. The wordlists are deliberately small: this
/// backend only has to keep the pipeline alive when no model is available.
#[derive(Debug, Default, Clone)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn new() -> Self {
        Self
    }
}

impl TextScorer for HeuristicScorer {
    fn score(&self, text: &str) -> f64 {
        let mut positive = 0usize;
        let mut negative = 0usize;
        for token in text.split_whitespace() {
            let token = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if token.is_empty() {
                continue;
            }
            if POSITIVE.contains(&token.as_str()) {
                positive += 1;
            } else if NEGATIVE.contains(&token.as_str()) {
                negative += 1;
            }
        }

        let hits = positive + negative;
        if hits == 0 {
            return 0.0;
        }
        (positive as f64 - negative as f64) / hits as f64
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
