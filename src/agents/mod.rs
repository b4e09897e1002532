//! Pipeline agents
//!
//! An agent is a role-bound pair of model calls: an extraction call grounded
//! in retrieved excerpts (and the upstream agent's note), then a short
//! communicator call that condenses the artifact into a hand-off note.

use crate::error::PipelineError;
use crate::llm::ModelInvoker;
use crate::memory::NoteLog;
use crate::models::{AgentName, Message, Note};
use crate::retrieval::{retrieve_context, RetrievalProvider};
use crate::Result;
use tracing::{debug, info};

pub mod action;
pub mod risk;
pub mod summary;

pub use action::ActionAgent;
pub use risk::RiskAgent;
pub use summary::SummaryAgent;

/// A pipeline role. Prompt construction and artifact decoding are pure;
/// `AgentRunner` owns the I/O.
pub trait Agent: Send + Sync {
    type Artifact: Send;

    fn name(&self) -> AgentName;

    /// Fixed query used to ground the extraction call
    fn retrieval_query(&self) -> &'static str;

    /// Agent whose note must be present in the extraction prompt
    fn upstream(&self) -> Option<AgentName>;

    fn extraction_prompt(&self, upstream_note: Option<&Note>, context: &str) -> String;

    /// Never fails: unusable output decodes to the artifact's default
    fn parse_artifact(&self, raw: &str) -> Self::Artifact;

    fn communicator_prompt(&self, artifact: &Self::Artifact) -> Result<String>;
}

/// What one agent contributes to a run
#[derive(Debug)]
pub struct AgentOutput<T> {
    pub artifact: T,
    pub note: Note,
}

/// Executes agents against a model backend and a retrieval provider
#[derive(Clone)]
pub struct AgentRunner {
    invoker: ModelInvoker,
    top_k: usize,
}

impl AgentRunner {
    pub fn new(invoker: ModelInvoker, top_k: usize) -> Self {
        Self { invoker, top_k }
    }

    pub async fn run<A: Agent>(
        &self,
        agent: &A,
        notes: &NoteLog,
        retrieval: &dyn RetrievalProvider,
    ) -> Result<AgentOutput<A::Artifact>> {
        let name = agent.name();

        let upstream_note = match agent.upstream() {
            Some(upstream) => Some(notes.get(upstream).ok_or_else(|| {
                PipelineError::AggregationFailure(format!(
                    "{} requires a note from {}",
                    name, upstream
                ))
            })?),
            None => None,
        };

        let context = retrieve_context(retrieval, agent.retrieval_query(), self.top_k).await?;

        // === EXTRACT ===
        let prompt = agent.extraction_prompt(upstream_note, &context);
        let raw = self.invoker.call(name, &[Message::user(prompt)]).await?;
        let artifact = agent.parse_artifact(&raw);

        debug!(agent = %name, raw_chars = raw.len(), "Extraction complete");

        // === COMMUNICATE ===
        let meta_prompt = agent.communicator_prompt(&artifact)?;
        let note_text = self.invoker.call(name, &[Message::user(meta_prompt)]).await?;
        let note = Note::new(name, &note_text);

        info!(agent = %name, note_chars = note.message.len(), "Agent finished");

        Ok(AgentOutput { artifact, note })
    }
}
