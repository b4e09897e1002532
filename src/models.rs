//! Core data models for the document intelligence pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Conversation =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Message body as the chat API accepts it: plain text or a list of
/// structured parts (images, tool payloads, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<serde_json::Value>),
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Parts(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }
}

/// Capability level of the backend targeted by a single model call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Baseline,
    Advanced,
}

//
// ================= Agents & Notes =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgentName {
    SummaryAgent,
    ActionAgent,
    RiskAgent,
}

impl AgentName {
    /// Pipeline order
    pub const ALL: [AgentName; 3] = [
        AgentName::SummaryAgent,
        AgentName::ActionAgent,
        AgentName::RiskAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::SummaryAgent => "SummaryAgent",
            AgentName::ActionAgent => "ActionAgent",
            AgentName::RiskAgent => "RiskAgent",
        }
    }
}

/// Role-attributed hand-off message produced by a communicator call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub from: AgentName,
    pub message: String,
}

impl Note {
    pub fn new(from: AgentName, message: &str) -> Self {
        Self {
            from,
            message: message.trim().to_string(),
        }
    }
}

//
// ================= Artifacts =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionItem {
    pub task: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    /// Always serialized, `[]` when the task is independent
    #[serde(default)]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskReport {
    #[serde(default)]
    pub open_questions: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

//
// ================= Final Result =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalOutput {
    pub summary: String,
    pub action_items: Vec<ActionItem>,
    pub risks_and_open_issues: RiskReport,
    pub agent_messages: Vec<Note>,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::Baseline => "baseline",
            Tier::Advanced => "advanced",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
