//! Action & dependency extraction agent
//!
//! Dependency chains are inferred by the model from the instructions below.
//! Nothing here checks that the inferred ordering is correct; the output is
//! best-effort. The decoder only guarantees every item carries a
//! `dependencies` list.

use crate::agents::Agent;
use crate::models::{ActionItem, AgentName, Note};
use crate::parser::decode_action_items;
use crate::Result;

pub struct ActionAgent;

impl Agent for ActionAgent {
    type Artifact = Vec<ActionItem>;

    fn name(&self) -> AgentName {
        AgentName::ActionAgent
    }

    fn retrieval_query(&self) -> &'static str {
        "tasks responsibilities deadlines action items"
    }

    fn upstream(&self) -> Option<AgentName> {
        Some(AgentName::SummaryAgent)
    }

    fn extraction_prompt(&self, upstream_note: Option<&Note>, context: &str) -> String {
        let summary_notes = upstream_note.map(|note| note.message.as_str()).unwrap_or_default();

        format!(
            r#"You are the Action & Dependency Extraction Agent.

Important context from SummaryAgent:
{}

Document Evidence:
{}

Task:
Extract actionable tasks WITH dependencies.

Rules:
- Dependencies MUST NOT be empty if another task must happen first.
- If a task has no dependencies, its "dependencies" field must be an empty list: [].
- Infer dependencies logically (approval → execution, logs → assessment, etc.)
- Output must be valid JSON ONLY.

Return JSON list:

[
  {{
    "task": "...",
    "owner": "... or null",
    "deadline": "... or null",
    "dependencies": ["Task X", "Task Y"]
  }}
]
"#,
            summary_notes, context
        )
    }

    fn parse_artifact(&self, raw: &str) -> Vec<ActionItem> {
        decode_action_items(raw)
    }

    fn communicator_prompt(&self, actions: &Self::Artifact) -> Result<String> {
        Ok(format!(
            r#"You are the ActionAgent communicator.

These are extracted tasks:

{}

Generate 2-3 bullet points explaining:
- most important dependency chain
- most urgent blocker task

Return bullet points only.
"#,
            serde_json::to_string_pretty(actions)?
        ))
    }
}
