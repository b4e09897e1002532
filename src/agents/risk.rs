//! Risk & open-issues agent

use crate::agents::Agent;
use crate::models::{AgentName, Note, RiskReport};
use crate::parser::decode_risk_report;
use crate::Result;

pub struct RiskAgent;

impl Agent for RiskAgent {
    type Artifact = RiskReport;

    fn name(&self) -> AgentName {
        AgentName::RiskAgent
    }

    fn retrieval_query(&self) -> &'static str {
        "risks unresolved issues missing information"
    }

    fn upstream(&self) -> Option<AgentName> {
        Some(AgentName::ActionAgent)
    }

    fn extraction_prompt(&self, upstream_note: Option<&Note>, context: &str) -> String {
        let action_notes = upstream_note.map(|note| note.message.as_str()).unwrap_or_default();

        format!(
            r#"You are the Risk & Open-Issues Agent.

Important dependency warnings from ActionAgent:
{}

Document Evidence:
{}

Task:
Identify:
- unresolved questions
- risks
- assumptions

Return ONLY valid JSON object:

{{
  "open_questions": ["..."],
  "risks": ["..."],
  "assumptions": ["..."]
}}
"#,
            action_notes, context
        )
    }

    fn parse_artifact(&self, raw: &str) -> RiskReport {
        decode_risk_report(raw)
    }

    fn communicator_prompt(&self, risks: &Self::Artifact) -> Result<String> {
        Ok(format!(
            r#"You are the RiskAgent communicator.

Given these risks:

{}

Send:
- top 2 urgent risks
- 1 critical unresolved question

Return bullet points only.
"#,
            serde_json::to_string_pretty(risks)?
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_all_report_keys() {
        let note = Note::new(AgentName::ActionAgent, "- contract before onboarding");
        let prompt = RiskAgent.extraction_prompt(Some(&note), "evidence");

        assert!(prompt.contains("Important dependency warnings from ActionAgent:\n- contract before onboarding"));
        for key in ["\"open_questions\"", "\"risks\"", "\"assumptions\""] {
            assert!(prompt.contains(key));
        }
    }

    #[test]
    fn test_unusable_output_yields_empty_report() {
        assert_eq!(RiskAgent.parse_artifact("I found nothing."), RiskReport::default());
    }
}
