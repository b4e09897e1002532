//! Context-aware summary agent

use crate::agents::Agent;
use crate::models::{AgentName, Note};
use crate::Result;

pub struct SummaryAgent;

impl Agent for SummaryAgent {
    type Artifact = String;

    fn name(&self) -> AgentName {
        AgentName::SummaryAgent
    }

    fn retrieval_query(&self) -> &'static str {
        "key decisions constraints deadlines"
    }

    fn upstream(&self) -> Option<AgentName> {
        None
    }

    fn extraction_prompt(&self, _upstream_note: Option<&Note>, context: &str) -> String {
        format!(
            r#"You are the Context-Aware Summary Agent.

Document Evidence:
{}

Task:
Write a concise summary preserving:
- intent
- constraints
- critical decisions

Return ONLY summary text.
"#,
            context
        )
    }

    fn parse_artifact(&self, raw: &str) -> String {
        raw.trim().to_string()
    }

    fn communicator_prompt(&self, summary: &Self::Artifact) -> Result<String> {
        Ok(format!(
            r#"You are an internal communicator agent.

Based on this summary:

{}

Extract 3 key constraints or decisions
that downstream agents must know.

Return bullet points only.
"#,
            summary
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_evidence() {
        let prompt = SummaryAgent.extraction_prompt(None, "Deadline is June 1.");
        assert!(prompt.contains("Document Evidence:\nDeadline is June 1."));
        assert!(prompt.contains("Return ONLY summary text."));
    }

    #[test]
    fn test_summary_is_trimmed() {
        assert_eq!(SummaryAgent.parse_artifact("\n  Summary.  \n"), "Summary.");
    }
}
