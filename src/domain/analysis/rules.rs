//! Heuristic rules - Case-insensitive substring classifiers over free text.
//!
//! Court exports carry no structured flag for res judicata or for the
//! execution phase, so both are inferred from document names and movement
//! descriptions. Matching is plain substring containment: false positives
//! and false negatives are accepted, the result is a screening signal and
//! not a legal determination.

/// Judgment amounts strictly below this value fall under POL-3.
pub const MINIMUM_JUDGMENT_AMOUNT: f64 = 1000.00;

/// Jurisdiction sphere excluded by POL-4.
pub const LABOR_SPHERE: &str = "trabalhista";

/// Document-name fragments that evidence res judicata, checked in order.
pub const RES_JUDICATA_TERMS: &[&str] = &["trânsito em julgado", "certidão de trânsito"];

/// Movement-description fragments that evidence the execution phase, checked in order.
pub const EXECUTION_PHASE_TERMS: &[&str] = &[
    "cumprimento definitivo",
    "execução definitiva",
    "cumprimento de sentença",
];

/// An ordered list of case-insensitive substring terms.
///
/// Terms are lowercased once on construction; haystacks are lowercased per match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringRule {
    terms: Vec<String>,
}

impl SubstringRule {
    /// Creates a rule from the given terms, preserving their order.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// The normalized terms, in evaluation order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns the first term contained in `text`, if any.
    fn first_match(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .find(|term| haystack.contains(term.as_str()))
            .map(String::as_str)
    }

    /// True if any term is contained in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// True if any term is contained in any of `texts`.
    pub fn matches_any<'a, I>(&self, texts: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().any(|text| self.matches(text))
    }
}

/// The full heuristic configuration used by the fact extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicRules {
    /// Matched against document names.
    pub res_judicata: SubstringRule,
    /// Matched against movement descriptions.
    pub execution_phase: SubstringRule,
    /// Sphere label compared case-insensitively for equality.
    pub labor_sphere: String,
    /// Threshold for the low-value policy.
    pub minimum_amount: f64,
}

impl HeuristicRules {
    /// Case-insensitive exact comparison against the labor sphere label.
    pub fn is_labor_sphere(&self, sphere: &str) -> bool {
        sphere.to_lowercase() == self.labor_sphere.to_lowercase()
    }

    /// True only when an amount is present and strictly below the minimum.
    pub fn is_below_minimum(&self, amount: Option<f64>) -> bool {
        amount.is_some_and(|value| value < self.minimum_amount)
    }
}

impl Default for HeuristicRules {
    fn default() -> Self {
        Self {
            res_judicata: SubstringRule::new(RES_JUDICATA_TERMS),
            execution_phase: SubstringRule::new(EXECUTION_PHASE_TERMS),
            labor_sphere: LABOR_SPHERE.to_string(),
            minimum_amount: MINIMUM_JUDGMENT_AMOUNT,
        }
    }
}
