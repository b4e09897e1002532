//! Pipeline orchestrator - fixed-stage state machine
//!
//! INIT → SUMMARY → ACTION → RISK → AGGREGATE → DONE
//!
//! Strictly sequential, no branching and no retries. Any stage failure aborts
//! the run; there is no partial result.

use crate::agents::{ActionAgent, AgentRunner, RiskAgent, SummaryAgent};
use crate::audit::short_fingerprint;
use crate::memory::{Initialized, Memory};
use crate::models::FinalOutput;
use crate::retrieval::RetrievalProvider;
use crate::Result;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    Summary,
    Action,
    Risk,
    Aggregate,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStage::Init => "INIT",
            PipelineStage::Summary => "SUMMARY",
            PipelineStage::Action => "ACTION",
            PipelineStage::Risk => "RISK",
            PipelineStage::Aggregate => "AGGREGATE",
            PipelineStage::Done => "DONE",
        };
        write!(f, "{}", s)
    }
}

/// Drives one analysis run per call. Holds no per-run state, so one
/// orchestrator can serve concurrent runs.
pub struct Orchestrator {
    runner: AgentRunner,
}

impl Orchestrator {
    pub fn new(runner: AgentRunner) -> Self {
        Self { runner }
    }

    /// Run the full pipeline over one document
    pub async fn run(
        &self,
        document_text: &str,
        retrieval: &dyn RetrievalProvider,
    ) -> Result<FinalOutput> {
        // === INIT ===
        let memory = Memory::new(document_text);
        let span = info_span!(
            "analysis_run",
            run_id = %memory.run_id(),
            document = %short_fingerprint(document_text),
        );

        let result = self.run_stages(memory, retrieval).instrument(span.clone()).await;

        if let Err(e) = &result {
            span.in_scope(|| warn!(error = %e, "Run aborted"));
        }

        result
    }

    async fn run_stages(
        &self,
        memory: Memory<Initialized>,
        retrieval: &dyn RetrievalProvider,
    ) -> Result<FinalOutput> {
        let start_time = Instant::now();

        info!(
            document_chars = memory.document_text().chars().count(),
            "Orchestrator: starting run"
        );
        enter(PipelineStage::Init);

        // === SUMMARY ===
        enter(PipelineStage::Summary);
        let summary = self.runner.run(&SummaryAgent, memory.notes(), retrieval).await?;
        let memory = memory.record_summary(summary.artifact, summary.note)?;

        // === ACTION ===
        enter(PipelineStage::Action);
        let actions = self.runner.run(&ActionAgent, memory.notes(), retrieval).await?;
        let memory = memory.record_actions(actions.artifact, actions.note)?;

        // === RISK ===
        enter(PipelineStage::Risk);
        let risks = self.runner.run(&RiskAgent, memory.notes(), retrieval).await?;
        let memory = memory.record_risks(risks.artifact, risks.note)?;

        // === AGGREGATE ===
        enter(PipelineStage::Aggregate);
        let output = memory.aggregate()?;

        enter(PipelineStage::Done);
        info!(
            action_items = output.action_items.len(),
            open_questions = output.risks_and_open_issues.open_questions.len(),
            risks = output.risks_and_open_issues.risks.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Orchestrator: run complete"
        );

        Ok(output)
    }
}

fn enter(stage: PipelineStage) {
    debug!(%stage, "Entering stage");
}
