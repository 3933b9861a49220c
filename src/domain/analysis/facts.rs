//! Fact Extractor - Derives boolean and numeric signals from a case record.

use serde::{Deserialize, Serialize};

use crate::domain::process::Process;

use super::rules::HeuristicRules;

/// Label appended when no res judicata certificate is found.
pub const MISSING_RES_JUDICATA_DOCUMENT: &str = "Certidão de trânsito em julgado";

/// Label appended when no execution-phase movement is found.
pub const MISSING_EXECUTION_EVIDENCE: &str = "Comprovação de fase de execução";

/// Note attached whenever an essential document is missing.
pub const MISSING_DOCUMENTS_NOTE: &str = "Foram identificadas ausências de documentos considerados essenciais para a análise completa da elegibilidade.";

/// Immutable snapshot of the signals derived from one case record.
///
/// Serialized field names are the ones the decision prompt refers to.
///
/// # Invariants
/// - `amount_below_minimum` implies `judgment_amount.is_some()`.
/// - `missing_essential_document == !missing_essential_documents.is_empty()`.
/// - `notes.is_some() == missing_essential_document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactSet {
    #[serde(rename = "transitado_em_julgado")]
    pub res_judicata_reached: bool,

    #[serde(rename = "em_fase_execucao")]
    pub execution_phase_active: bool,

    #[serde(rename = "valor_condenacao")]
    pub judgment_amount: Option<f64>,

    #[serde(rename = "valor_muito_baixo")]
    pub amount_below_minimum: bool,

    #[serde(rename = "esfera_trabalhista")]
    pub is_labor_jurisdiction: bool,

    /// No source signal yet; always false.
    #[serde(rename = "obito_autor_sem_habilitacao")]
    pub heir_unqualified_without_probate: bool,

    /// No source signal yet; always false.
    #[serde(rename = "substabelecimento_sem_reserva")]
    pub assignment_without_reserved_powers: bool,

    /// No source signal yet; always false.
    #[serde(rename = "possui_informacao_honorarios")]
    pub fee_disclosure_present: bool,

    #[serde(rename = "falta_documento_essencial")]
    pub missing_essential_document: bool,

    /// Human-readable labels; res judicata first, execution second.
    #[serde(rename = "documentos_essenciais_faltantes")]
    pub missing_essential_documents: Vec<String>,

    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

/// Extracts a [`FactSet`] from a [`Process`] using a set of heuristic rules.
///
/// Extraction is total: absence of evidence yields `false` or an empty list,
/// never an error.
#[derive(Debug, Clone, Default)]
pub struct FactExtractor {
    rules: HeuristicRules,
}

impl FactExtractor {
    /// Creates an extractor with custom rules.
    pub fn new(rules: HeuristicRules) -> Self {
        Self { rules }
    }

    /// The rules this extractor applies.
    pub fn rules(&self) -> &HeuristicRules {
        &self.rules
    }

    /// Derives the fact set for one case record.
    pub fn extract(&self, process: &Process) -> FactSet {
        let res_judicata_reached = self.rules.res_judicata.matches_any(process.document_names());
        let execution_phase_active = self
            .rules
            .execution_phase
            .matches_any(process.movement_descriptions());

        let judgment_amount = process.judgment_amount;
        let amount_below_minimum = self.rules.is_below_minimum(judgment_amount);
        let is_labor_jurisdiction = self.rules.is_labor_sphere(&process.sphere);

        let mut missing_essential_documents = Vec::new();
        if !res_judicata_reached {
            missing_essential_documents.push(MISSING_RES_JUDICATA_DOCUMENT.to_string());
        }
        if !execution_phase_active {
            missing_essential_documents.push(MISSING_EXECUTION_EVIDENCE.to_string());
        }

        let missing_essential_document = !missing_essential_documents.is_empty();
        let notes = missing_essential_document.then(|| MISSING_DOCUMENTS_NOTE.to_string());

        FactSet {
            res_judicata_reached,
            execution_phase_active,
            judgment_amount,
            amount_below_minimum,
            is_labor_jurisdiction,
            heir_unqualified_without_probate: false,
            assignment_without_reserved_powers: false,
            fee_disclosure_present: false,
            missing_essential_document,
            missing_essential_documents,
            notes,
        }
    }
}
