//! Per-run pipeline memory
//!
//! `Memory<S>` is owned by the orchestrator and moved from stage to stage.
//! Each stage marker only exposes the setter for the next artifact, so every
//! field has exactly one writer and nothing can be written out of order.
//!
//! ```text
//! Memory<Initialized> --record_summary--> Memory<Summarized>
//!                     --record_actions--> Memory<Actioned>
//!                     --record_risks----> Memory<Assessed> --aggregate--> FinalOutput
//! ```

pub mod notes;

pub use notes::NoteLog;

use crate::error::PipelineError;
use crate::models::{ActionItem, AgentName, FinalOutput, Note, RiskReport};
use crate::Result;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Fresh run, empty note log
#[derive(Debug)]
pub struct Initialized;
/// Summary and SummaryAgent note recorded
#[derive(Debug)]
pub struct Summarized;
/// Action items and ActionAgent note recorded
#[derive(Debug)]
pub struct Actioned;
/// Risk report and RiskAgent note recorded
#[derive(Debug)]
pub struct Assessed;

#[derive(Debug)]
pub struct Memory<S> {
    run_id: Uuid,
    document_text: Arc<str>,
    notes: NoteLog,
    summary: Option<String>,
    actions: Option<Vec<ActionItem>>,
    risks: Option<RiskReport>,
    _stage: PhantomData<S>,
}

impl<S> Memory<S> {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn notes(&self) -> &NoteLog {
        &self.notes
    }

    pub fn note_from(&self, agent: AgentName) -> Option<&Note> {
        self.notes.get(agent)
    }

    fn advance<T>(self) -> Memory<T> {
        Memory {
            run_id: self.run_id,
            document_text: self.document_text,
            notes: self.notes,
            summary: self.summary,
            actions: self.actions,
            risks: self.risks,
            _stage: PhantomData,
        }
    }

    fn append_note(&mut self, expected: AgentName, note: Note) -> Result<()> {
        if note.from != expected {
            return Err(PipelineError::AggregationFailure(format!(
                "expected a note from {}, got one from {}",
                expected, note.from
            )));
        }
        self.notes.append(note)
    }
}

impl Memory<Initialized> {
    pub fn new(document_text: impl Into<Arc<str>>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            document_text: document_text.into(),
            notes: NoteLog::new(),
            summary: None,
            actions: None,
            risks: None,
            _stage: PhantomData,
        }
    }

    pub fn record_summary(mut self, summary: String, note: Note) -> Result<Memory<Summarized>> {
        self.append_note(AgentName::SummaryAgent, note)?;
        self.summary = Some(summary);
        Ok(self.advance())
    }
}

impl Memory<Summarized> {
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn record_actions(
        mut self,
        actions: Vec<ActionItem>,
        note: Note,
    ) -> Result<Memory<Actioned>> {
        self.append_note(AgentName::ActionAgent, note)?;
        self.actions = Some(actions);
        Ok(self.advance())
    }
}

impl Memory<Actioned> {
    pub fn actions(&self) -> Option<&[ActionItem]> {
        self.actions.as_deref()
    }

    pub fn record_risks(mut self, risks: RiskReport, note: Note) -> Result<Memory<Assessed>> {
        self.append_note(AgentName::RiskAgent, note)?;
        self.risks = Some(risks);
        Ok(self.advance())
    }
}

impl Memory<Assessed> {
    /// Assemble the final report. The only place all artifacts are read together.
    pub fn aggregate(self) -> Result<FinalOutput> {
        let summary = self
            .summary
            .ok_or_else(|| missing("summary"))?;
        let action_items = self
            .actions
            .ok_or_else(|| missing("actions"))?;
        let risks_and_open_issues = self.risks.ok_or_else(|| missing("risks"))?;

        for agent in AgentName::ALL {
            if self.notes.get(agent).is_none() {
                return Err(missing(agent.as_str()));
            }
        }

        Ok(FinalOutput {
            summary,
            action_items,
            risks_and_open_issues,
            agent_messages: self.notes.into_vec(),
        })
    }
}

fn missing(field: &str) -> PipelineError {
    PipelineError::AggregationFailure(format!("memory field '{}' was never written", field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(task: &str, deps: &[&str]) -> ActionItem {
        ActionItem {
            task: task.to_string(),
            owner: None,
            deadline: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_full_lifecycle_produces_final_output() {
        let memory = Memory::new("Phase 1 approval precedes Phase 2.");
        assert!(memory.notes().is_empty());
        assert_eq!(memory.document_text(), "Phase 1 approval precedes Phase 2.");

        let memory = memory
            .record_summary(
                "Two phases.".to_string(),
                Note::new(AgentName::SummaryAgent, "- approval first"),
            )
            .unwrap();
        assert_eq!(memory.summary(), Some("Two phases."));

        let memory = memory
            .record_actions(
                vec![
                    action("Approve Phase 1", &[]),
                    action("Execute Phase 2", &["Approve Phase 1"]),
                ],
                Note::new(AgentName::ActionAgent, "- approval blocks execution"),
            )
            .unwrap();
        assert_eq!(memory.actions().map(|a| a.len()), Some(2));

        let output = memory
            .record_risks(
                RiskReport::default(),
                Note::new(AgentName::RiskAgent, "- no risks found"),
            )
            .unwrap()
            .aggregate()
            .unwrap();

        assert_eq!(output.summary, "Two phases.");
        assert_eq!(output.action_items[1].dependencies, vec!["Approve Phase 1".to_string()]);
        let authors: Vec<AgentName> = output.agent_messages.iter().map(|n| n.from).collect();
        assert_eq!(authors, AgentName::ALL.to_vec());
    }

    #[test]
    fn test_note_from_wrong_agent_is_rejected() {
        let result = Memory::new("doc").record_summary(
            "summary".to_string(),
            Note::new(AgentName::RiskAgent, "misattributed"),
        );

        assert!(matches!(result, Err(PipelineError::AggregationFailure(_))));
    }

    #[test]
    fn test_each_run_gets_its_own_id() {
        assert_ne!(Memory::new("a").run_id(), Memory::new("a").run_id());
    }
}
