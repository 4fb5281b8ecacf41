//! Relevance gate
//!
//! Keyword-membership check applied to free-text questions before the
//! engine or the LLM is invoked. Deliberately plain substring containment,
//! not tokenized matching: "collegewide" triggers on "college". A question
//! containing none of the keywords is always rejected, even if genuinely
//! on-topic; that precision/recall tradeoff is accepted.

/// Domain keywords admitting a question as education/scholarship related.
pub const DOMAIN_KEYWORDS: [&str; 36] = [
    "scholarship",
    "education",
    "study",
    "college",
    "university",
    "school",
    "degree",
    "course",
    "academic",
    "student",
    "financial aid",
    "grant",
    "admission",
    "exam",
    "qualification",
    "eligibility",
    "application",
    "deadline",
    "requirement",
    "criteria",
    "fee",
    "stipend",
    "funding",
    "merit",
    "income",
    "category",
    "reservation",
    "document",
    "certificate",
    "grade",
    "percentage",
    "marks",
    "score",
    "rank",
    "test",
    "entrance",
];

/// Decides whether an incoming question is in-domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelevanceGate;

impl RelevanceGate {
    pub fn new() -> Self {
        Self
    }

    /// True iff the lower-cased question contains at least one keyword.
    pub fn is_relevant(&self, question: &str) -> bool {
        let question = question.to_lowercase();
        DOMAIN_KEYWORDS
            .iter()
            .any(|keyword| question.contains(keyword))
    }
}
