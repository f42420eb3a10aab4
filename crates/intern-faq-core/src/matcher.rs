//! Fuzzy FAQ matcher.
//!
//! An [`FaqIndex`] is built once over the knowledge base and then queried
//! read-only, so a single index can be shared (e.g. behind an `Arc`) by any
//! number of concurrent callers.
//!
//! # Scoring
//!
//! 1. The query and both indexed fields (`question`, `category`) are split
//!    into lowercase alphanumeric tokens; common filler words are dropped
//!    unless nothing else is left.
//! 2. Every token is paired with its closest token on the other side by
//!    normalized Levenshtein distance (`edits / max(len_a, len_b)`).
//! 3. The field distance averages query-to-field and field-to-query
//!    coverage (each the mean of those per-token distances), then is
//!    divided by the field weight and clamped to `1.0`.
//! 4. An entry scores the minimum of its two field distances.
//! 5. Candidates are sorted ascending by score. On equal scores an entry
//!    whose question is the query verbatim (case and spacing aside) comes
//!    first; remaining ties keep insertion order.
//!
//! The best candidate is accepted when its score is `<= threshold`
//! (`0.0` = exact, `1.0` = no similarity). Otherwise the query falls back.

use std::cmp::Ordering;

use crate::models::FaqEntry;

/// Maximum accepted distance for a match.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Reply used when no candidate clears the threshold.
pub const DEFAULT_FALLBACK: &str = "Sorry, I couldn't find an answer to that. \
Please reach out to our support team at support@mrsac-isms.in and we'll be happy to help.";

/// Words ignored on both sides of the comparison.
const STOP_WORDS: &[&str] = &[
    "a", "am", "an", "and", "are", "as", "at", "be", "been", "by", "can", "could", "did", "do",
    "does", "for", "from", "had", "has", "have", "how", "i", "in", "into", "is", "it", "its",
    "may", "me", "might", "must", "my", "of", "on", "or", "our", "shall", "should", "that", "the",
    "there", "these", "this", "those", "to", "was", "we", "were", "what", "when", "where",
    "which", "who", "whom", "why", "will", "with", "would", "you", "your",
];

/// Matcher tuning, decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    /// Maximum accepted distance, on a `0.0..=1.0` scale.
    pub threshold: f64,
    /// Weight applied to the `question` field. Must be positive.
    pub question_weight: f64,
    /// Weight applied to the `category` field. Must be positive.
    pub category_weight: f64,
    /// Reply returned for unmatched queries.
    pub fallback: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            question_weight: 1.0,
            category_weight: 1.0,
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

impl MatchOptions {
    /// Whether a candidate with this score counts as a match.
    pub fn accepts(&self, score: f64) -> bool {
        score <= self.threshold
    }
}

/// Which indexed field produced a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedField {
    Question,
    Category,
}

impl MatchedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedField::Question => "question",
            MatchedField::Category => "category",
        }
    }
}

/// One scored knowledge base entry.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Insertion position of the entry in the knowledge base.
    pub position: usize,
    pub entry: &'a FaqEntry,
    /// Normalized distance, lower is better.
    pub score: f64,
    pub field: MatchedField,
    /// The entry's question equals the query, ignoring case and spacing.
    pub exact: bool,
}

/// Outcome of a single query.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
    /// The accepted entry, if the best candidate cleared the threshold.
    pub entry: Option<&'a FaqEntry>,
    /// Score of the best candidate (`1.0` when there were none).
    pub score: f64,
    /// Best candidate regardless of the threshold.
    pub best: Option<Candidate<'a>>,
}

impl MatchResult<'_> {
    pub fn is_match(&self) -> bool {
        self.entry.is_some()
    }

    /// The chatbot reply: the accepted entry's formatted answer, or `fallback`.
    pub fn reply(&self, fallback: &str) -> String {
        match self.entry {
            Some(entry) => entry.formatted_answer(),
            None => fallback.to_string(),
        }
    }
}

struct IndexedEntry {
    entry: FaqEntry,
    question_text: String,
    question_tokens: Vec<String>,
    category_tokens: Vec<String>,
}

/// Immutable search index over a fixed knowledge base.
pub struct FaqIndex {
    entries: Vec<IndexedEntry>,
    options: MatchOptions,
}

impl FaqIndex {
    /// Index `entries` in insertion order. An empty list yields an index
    /// that matches nothing.
    pub fn build(entries: Vec<FaqEntry>, options: MatchOptions) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| IndexedEntry {
                question_text: normalize_text(&entry.question),
                question_tokens: tokenize(&entry.question),
                category_tokens: tokenize(&entry.category),
                entry,
            })
            .collect();

        Self { entries, options }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &FaqEntry> {
        self.entries.iter().map(|e| &e.entry)
    }

    /// Score every entry against `query`, best first.
    ///
    /// Returns an empty list when the query has no meaningful tokens.
    pub fn search(&self, query: &str) -> Vec<Candidate<'_>> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }
        let query_text = normalize_text(query);

        let mut candidates: Vec<Candidate<'_>> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, indexed)| {
                let q = weighted(
                    field_distance(&query_tokens, &indexed.question_tokens),
                    self.options.question_weight,
                );
                let c = weighted(
                    field_distance(&query_tokens, &indexed.category_tokens),
                    self.options.category_weight,
                );
                let (score, field) = if q <= c {
                    (q, MatchedField::Question)
                } else {
                    (c, MatchedField::Category)
                };
                Candidate {
                    position,
                    entry: &indexed.entry,
                    score,
                    field,
                    exact: indexed.question_text == query_text,
                }
            })
            .collect();

        // `sort_by` is stable, so remaining ties stay in insertion order.
        candidates.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then(b.exact.cmp(&a.exact))
        });
        candidates
    }

    /// Pick the best candidate and apply the threshold policy.
    pub fn best_match(&self, query: &str) -> MatchResult<'_> {
        let best = self.search(query).into_iter().next();
        let score = best.map(|c| c.score).unwrap_or(1.0);
        let entry = best
            .filter(|c| self.options.accepts(c.score))
            .map(|c| c.entry);

        MatchResult { entry, score, best }
    }

    /// The chatbot reply for `query`: the formatted answer, or the fallback.
    pub fn answer(&self, query: &str) -> String {
        self.best_match(query).reply(&self.options.fallback)
    }
}

/// Split text into lowercase alphanumeric tokens, dropping filler words.
///
/// Text made up only of filler words ("Who are you?") keeps all its tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect();

    let content: Vec<String> = words
        .iter()
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .cloned()
        .collect();

    if content.is_empty() {
        words
    } else {
        content
    }
}

/// Lowercase and collapse whitespace, for verbatim question comparison.
fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalized Levenshtein distance between two tokens, in `[0.0, 1.0]`.
pub fn token_distance(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    strsim::levenshtein(a, b) as f64 / max_len as f64
}

/// Symmetric token-set distance between a query and one indexed field.
///
/// A field whose extra tokens the query never mentions scores worse than a
/// field the query covers exactly, so an exact question always scores `0.0`.
pub fn field_distance(query_tokens: &[String], field_tokens: &[String]) -> f64 {
    if query_tokens.is_empty() || field_tokens.is_empty() {
        return 1.0;
    }

    (coverage(query_tokens, field_tokens) + coverage(field_tokens, query_tokens)) / 2.0
}

/// Mean over `from` of the distance to the closest token in `to`.
fn coverage(from: &[String], to: &[String]) -> f64 {
    let total: f64 = from
        .iter()
        .map(|a| to.iter().map(|b| token_distance(a, b)).fold(1.0, f64::min))
        .sum();

    total / from.len() as f64
}

fn weighted(distance: f64, weight: f64) -> f64 {
    (distance / weight).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internship_kb() -> Vec<FaqEntry> {
        vec![
            FaqEntry::new(
                "What is the duration of the internship?",
                "Internship",
                "The internship lasts 6 weeks.",
            ),
            FaqEntry::new(
                "How do I download my offer letter?",
                "Offer Letter",
                "Open the Offer Letter tab on your dashboard.",
            ),
        ]
    }

    fn index(entries: Vec<FaqEntry>) -> FaqIndex {
        FaqIndex::build(entries, MatchOptions::default())
    }

    #[test]
    fn test_tokenize_drops_punctuation_and_filler() {
        assert_eq!(
            tokenize("What is the duration of the internship?"),
            vec!["duration", "internship"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("?!, ...").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_filler_only_text() {
        assert_eq!(tokenize("Who are you?"), vec!["who", "are", "you"]);
    }

    #[test]
    fn test_filler_only_question_matches_itself() {
        let entries = vec![
            FaqEntry::new(
                "What is the duration of the internship?",
                "Internship",
                "The internship lasts 6 weeks.",
            ),
            FaqEntry::new("Who are you?", "About", "I am the internship portal assistant."),
        ];
        let idx = index(entries);
        let result = idx.best_match("Who are you?");
        assert_eq!(result.score, 0.0);
        assert!(result.is_match());
        assert_eq!(
            idx.answer("who are you"),
            "[About] I am the internship portal assistant."
        );
    }

    #[test]
    fn test_verbatim_question_beats_earlier_equal_score() {
        let entries = vec![
            FaqEntry::new("Duration of internship", "General", "first"),
            FaqEntry::new(
                "What is the duration of the internship?",
                "Internship",
                "exact",
            ),
        ];
        let idx = index(entries);

        let candidates = idx.search("What is the duration of the internship?");
        assert_eq!(candidates[0].score, candidates[1].score);
        assert_eq!(candidates[0].position, 1);
        assert!(candidates[0].exact);
        assert_eq!(
            idx.answer("what is the   duration of the internship?"),
            "[Internship] exact"
        );

        // Without a verbatim match, insertion order still decides.
        assert_eq!(idx.answer("internship duration"), "[General] first");
    }

    #[test]
    fn test_reply_uses_fallback_when_unmatched() {
        let idx = index(internship_kb());
        assert_eq!(
            idx.best_match("internship duration").reply("unused"),
            "[Internship] The internship lasts 6 weeks."
        );
        assert_eq!(idx.best_match("how to bake a cake").reply("ask support"), "ask support");
    }

    #[test]
    fn test_token_distance_bounds() {
        assert_eq!(token_distance("intern", "intern"), 0.0);
        assert_eq!(token_distance("abc", "xyz"), 1.0);
        assert_eq!(token_distance("abcde", "abcxy"), 0.4);
    }

    #[test]
    fn test_exact_question_scores_zero() {
        let idx = index(internship_kb());
        let result = idx.best_match("What is the duration of the internship?");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.entry, Some(&internship_kb()[0]));
        let best = result.best.unwrap();
        assert_eq!(best.position, 0);
        assert_eq!(best.field, MatchedField::Question);
    }

    #[test]
    fn test_reworded_query_matches() {
        let idx = index(internship_kb());
        assert_eq!(
            idx.answer("internship duration"),
            "[Internship] The internship lasts 6 weeks."
        );
    }

    #[test]
    fn test_unrelated_query_falls_back() {
        let idx = index(internship_kb());
        let answer = idx.answer("how to bake a cake");
        assert_eq!(answer, DEFAULT_FALLBACK);
        assert!(answer.contains("support@mrsac-isms.in"));
    }

    #[test]
    fn test_empty_query_is_unmatched() {
        let idx = index(internship_kb());
        assert!(idx.search("").is_empty());
        let result = idx.best_match("");
        assert!(!result.is_match());
        assert_eq!(result.score, 1.0);
        assert_eq!(idx.answer("   "), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_empty_index_always_falls_back() {
        let idx = index(Vec::new());
        assert!(idx.is_empty());
        assert!(idx.search("internship duration").is_empty());
        assert_eq!(idx.answer("internship duration"), DEFAULT_FALLBACK);
        assert_eq!(idx.answer("What is the duration of the internship?"), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_field_distance_penalizes_uncovered_tokens() {
        let query = tokenize("apply internship");
        let exact = tokenize("How do I apply for the internship?");
        let wider = tokenize("Who is eligible to apply for the internship?");
        assert_eq!(field_distance(&query, &exact), 0.0);
        assert!(field_distance(&query, &wider) > 0.0);
        assert_eq!(field_distance(&query, &[]), 1.0);
    }

    #[test]
    fn test_exact_question_beats_earlier_superset() {
        let entries = vec![
            FaqEntry::new(
                "Who is eligible to apply for the internship?",
                "Eligibility",
                "Enrolled students.",
            ),
            FaqEntry::new(
                "How do I apply for the internship?",
                "Application",
                "Register on the portal.",
            ),
        ];
        let idx = index(entries);
        assert_eq!(
            idx.answer("How do I apply for the internship?"),
            "[Application] Register on the portal."
        );
    }

    #[test]
    fn test_search_orders_best_first() {
        let idx = index(internship_kb());
        let candidates = idx.search("offer letter download");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].position, 1);
        assert!(candidates[0].score <= candidates[1].score);
    }

    #[test]
    fn test_equal_scores_resolve_by_insertion_order() {
        let entries = vec![
            FaqEntry::new("Is there a stipend?", "Stipend", "first"),
            FaqEntry::new("Is there a stipend?", "Stipend", "second"),
            FaqEntry::new("Is there a stipend?", "Stipend", "third"),
        ];
        let idx = index(entries);

        for _ in 0..5 {
            let candidates = idx.search("stipend");
            let positions: Vec<usize> = candidates.iter().map(|c| c.position).collect();
            assert_eq!(positions, vec![0, 1, 2]);
            assert_eq!(idx.answer("stipend"), "[Stipend] first");
        }
    }

    #[test]
    fn test_same_query_is_idempotent() {
        let idx = index(internship_kb());
        let a = idx.best_match("internship duration");
        let b = idx.best_match("internship duration");
        assert_eq!(a.score, b.score);
        assert_eq!(a.entry, b.entry);
        assert_eq!(idx.answer("offer"), idx.answer("offer"));
    }

    #[test]
    fn test_threshold_boundary_policy() {
        let opts = MatchOptions::default();
        assert!(opts.accepts(0.0));
        assert!(opts.accepts(0.4));
        assert!(!opts.accepts(0.41));
        assert!(!opts.accepts(1.0));
    }

    #[test]
    fn test_score_exactly_at_threshold_is_accepted() {
        let idx = index(vec![FaqEntry::new("abcde", "zzzzzzzzzz", "boundary")]);
        let result = idx.best_match("abcxy");
        assert_eq!(result.score, 0.4);
        assert_eq!(idx.answer("abcxy"), "[zzzzzzzzzz] boundary");
    }

    #[test]
    fn test_score_above_threshold_is_rejected() {
        let idx = index(vec![FaqEntry::new("abcdefg", "zzzzzzzzzz", "too far")]);
        let result = idx.best_match("abcdxyz");
        assert!(result.score > 0.4);
        assert!(!result.is_match());
        assert_eq!(result.best.unwrap().position, 0);
        assert_eq!(idx.answer("abcdxyz"), DEFAULT_FALLBACK);
    }

    #[test]
    fn test_category_field_can_win() {
        let idx = index(vec![FaqEntry::new(
            "Who signs the completion paperwork?",
            "Certificate",
            "The project guide signs it.",
        )]);
        let best = idx.best_match("certificate").best.unwrap();
        assert_eq!(best.field, MatchedField::Category);
        assert_eq!(best.score, 0.0);
    }

    #[test]
    fn test_weight_scales_field_distance() {
        let entries = vec![FaqEntry::new("abcde", "zzzzzzzzzz", "weighted")];
        let strict = FaqIndex::build(
            entries.clone(),
            MatchOptions {
                question_weight: 0.5,
                ..MatchOptions::default()
            },
        );
        assert_eq!(strict.best_match("abcxy").score, 0.8);
        assert_eq!(strict.answer("abcxy"), DEFAULT_FALLBACK);

        let lenient = FaqIndex::build(
            entries,
            MatchOptions {
                question_weight: 2.0,
                ..MatchOptions::default()
            },
        );
        assert_eq!(lenient.best_match("abcxy").score, 0.2);
    }

    #[test]
    fn test_custom_fallback() {
        let idx = FaqIndex::build(
            Vec::new(),
            MatchOptions {
                fallback: "Ask the coordinator.".to_string(),
                ..MatchOptions::default()
            },
        );
        assert_eq!(idx.answer("anything"), "Ask the coordinator.");
    }
}
