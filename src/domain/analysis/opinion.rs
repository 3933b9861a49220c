//! Opinion Composer - Assembles the technical opinion handed to the model.

use serde::{Deserialize, Serialize};

use crate::domain::process::Process;

use super::facts::{FactExtractor, FactSet};
use super::policy::{PolicyCode, PolicyEvaluator, PolicyOutcome};

/// Deterministic analysis of one case: facts, policy lists and a summary.
///
/// Serialized as-is into the decision prompt, so field names and order matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalOpinion {
    #[serde(rename = "numero_processo")]
    pub process_number: String,

    #[serde(rename = "analise")]
    pub facts: FactSet,

    #[serde(flatten)]
    pub outcome: PolicyOutcome,

    #[serde(rename = "resumo_tecnico")]
    pub summary: String,
}

impl TechnicalOpinion {
    /// Runs extraction, evaluation and composition with the default rules.
    pub fn generate(process: &Process) -> Self {
        Self::generate_with(&FactExtractor::default(), process)
    }

    /// Same as [`generate`](Self::generate) with a caller-provided extractor.
    pub fn generate_with(extractor: &FactExtractor, process: &Process) -> Self {
        let facts = extractor.extract(process);
        let outcome = PolicyEvaluator::evaluate(&facts);
        OpinionComposer::compose(&process.number, facts, outcome)
    }

    pub fn potentially_violated(&self) -> &[PolicyCode] {
        &self.outcome.potentially_violated
    }

    pub fn satisfied(&self) -> &[PolicyCode] {
        &self.outcome.satisfied
    }
}

/// Stateless composer for the Portuguese technical summary.
pub struct OpinionComposer;

impl OpinionComposer {
    /// Builds the opinion. Total.
    pub fn compose(process_number: &str, facts: FactSet, outcome: PolicyOutcome) -> TechnicalOpinion {
        let summary = Self::summarize(process_number, &facts, &outcome);
        TechnicalOpinion {
            process_number: process_number.to_string(),
            facts,
            outcome,
            summary,
        }
    }

    /// Renders the summary sentences in their fixed order, joined by single spaces.
    pub fn summarize(process_number: &str, facts: &FactSet, outcome: &PolicyOutcome) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(9);

        parts.push(format!("Processo {process_number}."));
        parts.push(format!(
            "Trânsito em julgado identificado: {}.",
            yes_no(facts.res_judicata_reached)
        ));
        parts.push(format!(
            "Fase de execução confirmada: {}.",
            yes_no(facts.execution_phase_active)
        ));

        match facts.judgment_amount {
            Some(amount) => {
                parts.push(format!("Valor da condenação informado: R$ {amount:.2}."));
                if facts.amount_below_minimum {
                    parts.push("O valor da condenação é inferior a R$ 1.000,00 (POL-3).".to_string());
                }
            }
            None => parts.push("Valor da condenação não foi informado.".to_string()),
        }

        if facts.is_labor_jurisdiction {
            parts.push(
                "O processo está na esfera trabalhista (possível incidência da POL-4).".to_string(),
            );
        }

        if facts.missing_essential_document {
            let missing = if facts.missing_essential_documents.is_empty() {
                "não especificados".to_string()
            } else {
                facts.missing_essential_documents.join(", ")
            };
            parts.push(format!(
                "Foram identificadas ausências de documentos essenciais: {missing} (POL-8)."
            ));
        }

        if !outcome.potentially_violated.is_empty() {
            parts.push(format!(
                "Com base na análise automática, há possíveis violações às seguintes políticas: {}.",
                join_codes(&outcome.potentially_violated)
            ));
        }

        if !outcome.satisfied.is_empty() {
            parts.push(format!(
                "As seguintes políticas parecem estar atendidas: {}.",
                join_codes(&outcome.satisfied)
            ));
        }

        if let Some(notes) = facts.notes.as_deref().filter(|n| !n.is_empty()) {
            parts.push(format!("Observações adicionais: {notes}"));
        }

        parts.join(" ")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "sim"
    } else {
        "não"
    }
}

fn join_codes(codes: &[PolicyCode]) -> String {
    codes
        .iter()
        .map(PolicyCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::test_support::{process_with, ProcessFixture};
    use crate::domain::analysis::MISSING_DOCUMENTS_NOTE;
    use proptest::prelude::*;

    const NUMBER: &str = "0000000-00.0000.0.00.0000";

    #[test]
    fn golden_summary_for_complete_case() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture::default()));

        assert_eq!(
            opinion.summary,
            "Processo 0000000-00.0000.0.00.0000. \
             Trânsito em julgado identificado: sim. \
             Fase de execução confirmada: sim. \
             Valor da condenação informado: R$ 25000.00. \
             As seguintes políticas parecem estar atendidas: POL-1, POL-2, POL-8."
        );
    }

    #[test]
    fn golden_summary_for_low_value_labor_case() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
            amount: Some(500.0),
            sphere: "trabalhista".to_string(),
            ..ProcessFixture::default()
        }));

        assert_eq!(
            opinion.summary,
            "Processo 0000000-00.0000.0.00.0000. \
             Trânsito em julgado identificado: sim. \
             Fase de execução confirmada: sim. \
             Valor da condenação informado: R$ 500.00. \
             O valor da condenação é inferior a R$ 1.000,00 (POL-3). \
             O processo está na esfera trabalhista (possível incidência da POL-4). \
             Com base na análise automática, há possíveis violações às seguintes políticas: POL-3, POL-4. \
             As seguintes políticas parecem estar atendidas: POL-1, POL-2, POL-8."
        );
    }

    #[test]
    fn golden_summary_for_empty_case() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
            document_name: None,
            movement_description: None,
            amount: None,
            ..ProcessFixture::default()
        }));

        let expected = format!(
            "Processo {NUMBER}. \
             Trânsito em julgado identificado: não. \
             Fase de execução confirmada: não. \
             Valor da condenação não foi informado. \
             Foram identificadas ausências de documentos essenciais: \
             Certidão de trânsito em julgado, Comprovação de fase de execução (POL-8). \
             Com base na análise automática, há possíveis violações às seguintes políticas: POL-1, POL-2, POL-8. \
             Observações adicionais: {MISSING_DOCUMENTS_NOTE}"
        );
        assert_eq!(opinion.summary, expected);
    }

    #[test]
    fn flagged_but_empty_list_falls_back_to_unspecified() {
        let mut facts = FactExtractor::default().extract(&process_with(ProcessFixture::default()));
        facts.missing_essential_document = true;

        let summary = OpinionComposer::summarize(NUMBER, &facts, &PolicyOutcome::default());
        assert!(summary.contains("documentos essenciais: não especificados (POL-8)."));
    }

    #[test]
    fn amount_is_rendered_with_two_decimals() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
            amount: Some(1234.5),
            ..ProcessFixture::default()
        }));
        assert!(opinion.summary.contains("R$ 1234.50."));
    }

    #[test]
    fn opinion_serializes_with_wire_names_in_order() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture::default()));
        let json = serde_json::to_string(&opinion).unwrap();

        let positions: Vec<usize> = [
            "\"numero_processo\"",
            "\"analise\"",
            "\"politicas_potencialmente_violadas\"",
            "\"politicas_atendidas\"",
            "\"resumo_tecnico\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("Trânsito"));
    }

    #[test]
    fn opinion_deserializes_from_its_own_output() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture::default()));
        let json = serde_json::to_value(&opinion).unwrap();
        let back: TechnicalOpinion = serde_json::from_value(json).unwrap();
        assert_eq!(back, opinion);
    }

    proptest! {
        #[test]
        fn generation_is_idempotent(
            amount in proptest::option::of(0.0f64..50_000.0),
            labor in any::<bool>(),
            with_doc in any::<bool>(),
            with_movement in any::<bool>(),
        ) {
            let process = process_with(ProcessFixture {
                amount,
                sphere: if labor { "trabalhista".to_string() } else { "cível".to_string() },
                document_name: with_doc.then(|| "Certidão de Trânsito em Julgado".to_string()),
                movement_description: with_movement
                    .then(|| "Início do cumprimento definitivo de sentença".to_string()),
            });

            let first = TechnicalOpinion::generate(&process);
            let second = TechnicalOpinion::generate(&process);

            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }

        #[test]
        fn missing_evidence_always_lists_both_and_violates_pol8(
            amount in proptest::option::of(0.0f64..50_000.0),
        ) {
            let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
                amount,
                document_name: None,
                movement_description: None,
                ..ProcessFixture::default()
            }));

            prop_assert_eq!(opinion.facts.missing_essential_documents.len(), 2);
            prop_assert!(opinion.outcome.is_violated(PolicyCode::Pol8));
        }

        #[test]
        fn low_amount_violates_pol3(amount in 0.0f64..999.99) {
            let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
                amount: Some(amount),
                ..ProcessFixture::default()
            }));
            prop_assert!(opinion.outcome.is_violated(PolicyCode::Pol3));
        }

        #[test]
        fn labor_sphere_violates_pol4_in_any_case(
            amount in proptest::option::of(0.0f64..50_000.0),
            upper in any::<bool>(),
        ) {
            let sphere = if upper { "TRABALHISTA" } else { "trabalhista" };
            let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
                amount,
                sphere: sphere.to_string(),
                ..ProcessFixture::default()
            }));
            prop_assert!(opinion.outcome.is_violated(PolicyCode::Pol4));
        }
    }

    #[test]
    fn absent_amount_never_triggers_pol3() {
        let opinion = TechnicalOpinion::generate(&process_with(ProcessFixture {
            amount: None,
            ..ProcessFixture::default()
        }));

        assert!(!opinion.outcome.is_violated(PolicyCode::Pol3));
        assert!(opinion.outcome.is_violated(PolicyCode::Pol2));
    }
}
