//! AnalyzeProcessHandler - Full screening pipeline for one case record.
//!
//! Extract facts, evaluate policies, compose the opinion, then ask the model
//! for a decision. Each call is independent; the handler holds no mutable state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::analysis::{DecisionResult, FactExtractor, TechnicalOpinion};
use crate::domain::process::Process;

use super::request_decision::{DecisionError, RequestDecisionHandler};

/// Wall-clock time spent in each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageTimings {
    pub opinion: Duration,
    pub llm: Duration,
    pub total: Duration,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeProcessResult {
    pub request_id: Uuid,
    pub opinion: TechnicalOpinion,
    pub decision: DecisionResult,
    pub timings: StageTimings,
}

/// Handler for the analysis pipeline.
pub struct AnalyzeProcessHandler {
    extractor: FactExtractor,
    decision_handler: Arc<RequestDecisionHandler>,
}

impl AnalyzeProcessHandler {
    pub fn new(decision_handler: Arc<RequestDecisionHandler>) -> Self {
        Self::with_extractor(FactExtractor::default(), decision_handler)
    }

    pub fn with_extractor(
        extractor: FactExtractor,
        decision_handler: Arc<RequestDecisionHandler>,
    ) -> Self {
        Self {
            extractor,
            decision_handler,
        }
    }

    /// Runs the deterministic stages only.
    pub fn opinion(&self, process: &Process) -> TechnicalOpinion {
        TechnicalOpinion::generate_with(&self.extractor, process)
    }

    /// Runs the whole pipeline under a fresh request id.
    pub async fn handle(&self, process: &Process) -> Result<AnalyzeProcessResult, DecisionError> {
        self.handle_with_id(process, Uuid::new_v4()).await
    }

    pub async fn handle_with_id(
        &self,
        process: &Process,
        request_id: Uuid,
    ) -> Result<AnalyzeProcessResult, DecisionError> {
        let started = Instant::now();
        let process_number = process.number.as_str();

        tracing::info!(%request_id, process_number, "Analysis request received");

        let opinion_started = Instant::now();
        let opinion = self.opinion(process);
        let opinion_time = opinion_started.elapsed();

        tracing::info!(
            %request_id,
            process_number,
            violated = ?opinion.potentially_violated(),
            clean = opinion.outcome.is_clean(),
            "Technical opinion generated"
        );
        for code in opinion.potentially_violated() {
            tracing::debug!(
                %request_id,
                policy = %code,
                description = code.description(),
                "Policy potentially violated"
            );
        }

        let llm_started = Instant::now();
        let decision = match self
            .decision_handler
            .handle_traced(&opinion, &request_id.to_string())
            .await
        {
            Ok(decision) => decision,
            Err(err) => {
                tracing::error!(
                    %request_id,
                    process_number,
                    kind = err.kind().as_str(),
                    error = %err,
                    total_secs = started.elapsed().as_secs_f64(),
                    "Analysis failed"
                );
                return Err(err);
            }
        };
        let llm_time = llm_started.elapsed();

        tracing::info!(
            %request_id,
            process_number,
            decision = %decision.decision,
            citations = ?decision.citations,
            "Model decision received"
        );

        let timings = StageTimings {
            opinion: opinion_time,
            llm: llm_time,
            total: started.elapsed(),
        };

        tracing::info!(
            %request_id,
            parecer_secs = timings.opinion.as_secs_f64(),
            llm_secs = timings.llm.as_secs_f64(),
            total_secs = timings.total.as_secs_f64(),
            "Analysis timings"
        );

        Ok(AnalyzeProcessResult {
            request_id,
            opinion,
            decision,
            timings,
        })
    }
}
