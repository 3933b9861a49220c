//! Policy Evaluator - Maps a fact set onto the acquisition policy catalog.
//!
//! Each of the eight policies is judged exactly once against the facts.
//! A policy can land in the satisfied list, the potentially-violated list,
//! or neither (POL-3..POL-6 have no positive signal, POL-7 no negative one).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::facts::FactSet;

/// Closed catalog of acquisition policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyCode {
    #[serde(rename = "POL-1")]
    Pol1,
    #[serde(rename = "POL-2")]
    Pol2,
    #[serde(rename = "POL-3")]
    Pol3,
    #[serde(rename = "POL-4")]
    Pol4,
    #[serde(rename = "POL-5")]
    Pol5,
    #[serde(rename = "POL-6")]
    Pol6,
    #[serde(rename = "POL-7")]
    Pol7,
    #[serde(rename = "POL-8")]
    Pol8,
}

impl PolicyCode {
    /// Every policy, in catalog order.
    pub const ALL: [PolicyCode; 8] = [
        PolicyCode::Pol1,
        PolicyCode::Pol2,
        PolicyCode::Pol3,
        PolicyCode::Pol4,
        PolicyCode::Pol5,
        PolicyCode::Pol6,
        PolicyCode::Pol7,
        PolicyCode::Pol8,
    ];

    /// The wire identifier, e.g. `"POL-1"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyCode::Pol1 => "POL-1",
            PolicyCode::Pol2 => "POL-2",
            PolicyCode::Pol3 => "POL-3",
            PolicyCode::Pol4 => "POL-4",
            PolicyCode::Pol5 => "POL-5",
            PolicyCode::Pol6 => "POL-6",
            PolicyCode::Pol7 => "POL-7",
            PolicyCode::Pol8 => "POL-8",
        }
    }

    /// Catalog text for the policy.
    pub fn description(&self) -> &'static str {
        match self {
            PolicyCode::Pol1 => {
                "Só compramos crédito de processos transitados em julgado e em fase de execução."
            }
            PolicyCode::Pol2 => "Exigir valor de condenação informado.",
            PolicyCode::Pol3 => "Valor de condenação < R$ 1.000,00 → não compra.",
            PolicyCode::Pol4 => "Condenações na esfera trabalhista → não compra.",
            PolicyCode::Pol5 => "Óbito do autor sem habilitação no inventário → não compra.",
            PolicyCode::Pol6 => "Substabelecimento sem reserva de poderes → não compra.",
            PolicyCode::Pol7 => {
                "Informar honorários contratuais, periciais e sucumbenciais quando existirem."
            }
            PolicyCode::Pol8 => "Se faltar documento essencial → incomplete.",
        }
    }
}

impl fmt::Display for PolicyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing a string that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy code '{0}'")]
pub struct UnknownPolicyCode(pub String);

impl FromStr for PolicyCode {
    type Err = UnknownPolicyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s.trim())
            .ok_or_else(|| UnknownPolicyCode(s.to_string()))
    }
}

/// How a single policy fares against a fact set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyJudgement {
    Satisfied,
    Violated,
    /// Neither condition applies.
    Silent,
}

/// Satisfied and potentially violated policies, each in first-occurrence order.
///
/// # Invariants
/// - No code appears twice in the same list.
/// - No code appears in both lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyOutcome {
    #[serde(rename = "politicas_potencialmente_violadas")]
    pub potentially_violated: Vec<PolicyCode>,

    #[serde(rename = "politicas_atendidas")]
    pub satisfied: Vec<PolicyCode>,
}

impl PolicyOutcome {
    pub fn is_violated(&self, code: PolicyCode) -> bool {
        self.potentially_violated.contains(&code)
    }

    pub fn is_satisfied(&self, code: PolicyCode) -> bool {
        self.satisfied.contains(&code)
    }

    /// True when no policy is potentially violated.
    pub fn is_clean(&self) -> bool {
        self.potentially_violated.is_empty()
    }

    fn record(&mut self, code: PolicyCode, judgement: PolicyJudgement) {
        let target = match judgement {
            PolicyJudgement::Satisfied => &mut self.satisfied,
            PolicyJudgement::Violated => &mut self.potentially_violated,
            PolicyJudgement::Silent => return,
        };
        if !target.contains(&code) {
            target.push(code);
        }
    }
}

/// Stateless evaluator for the policy rule table.
pub struct PolicyEvaluator;

impl PolicyEvaluator {
    /// Judges every policy in catalog order. Total.
    pub fn evaluate(facts: &FactSet) -> PolicyOutcome {
        let mut outcome = PolicyOutcome::default();
        for code in PolicyCode::ALL {
            outcome.record(code, Self::judge(code, facts));
        }
        outcome
    }

    /// Judges one policy.
    pub fn judge(code: PolicyCode, facts: &FactSet) -> PolicyJudgement {
        use PolicyJudgement::*;

        let violated_if = |flag: bool| if flag { Violated } else { Silent };

        match code {
            PolicyCode::Pol1 => {
                if facts.res_judicata_reached && facts.execution_phase_active {
                    Satisfied
                } else {
                    Violated
                }
            }
            PolicyCode::Pol2 => {
                if facts.judgment_amount.is_some() {
                    Satisfied
                } else {
                    Violated
                }
            }
            PolicyCode::Pol3 => violated_if(facts.amount_below_minimum),
            PolicyCode::Pol4 => violated_if(facts.is_labor_jurisdiction),
            PolicyCode::Pol5 => violated_if(facts.heir_unqualified_without_probate),
            PolicyCode::Pol6 => violated_if(facts.assignment_without_reserved_powers),
            PolicyCode::Pol7 => {
                if facts.fee_disclosure_present {
                    Satisfied
                } else {
                    Silent
                }
            }
            PolicyCode::Pol8 => {
                if facts.missing_essential_documents.is_empty() {
                    Satisfied
                } else {
                    Violated
                }
            }
        }
    }
}
