//! Decision result returned by the model.

use serde::{Deserialize, Serialize};

/// The model's acquisition decision.
///
/// The `decision` label is kept verbatim; use [`verdict`](Self::verdict)
/// to classify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    #[serde(rename = "decisao")]
    pub decision: String,

    #[serde(rename = "justificativa")]
    pub justification: String,

    /// Policy codes the model cites. Not checked against the catalog.
    #[serde(rename = "citacoes")]
    pub citations: Vec<String>,
}

/// Classification of the raw decision label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
    Incomplete,
    Other(String),
}

impl DecisionResult {
    /// Classifies the label case-insensitively, accepting English and Portuguese forms.
    pub fn verdict(&self) -> Verdict {
        match self.decision.trim().to_lowercase().as_str() {
            "approved" | "aprovado" => Verdict::Approved,
            "rejected" | "reprovado" | "rejeitado" => Verdict::Rejected,
            "incomplete" | "incompleto" => Verdict::Incomplete,
            _ => Verdict::Other(self.decision.clone()),
        }
    }
}
