//! Scripted backend for tests: replays canned replies and records every call

use crate::error::PipelineError;
use crate::llm::ModelBackend;
use crate::models::{Message, Tier};
use crate::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(Vec<Message>, Tier)>>,
    fail_at: Option<usize>,
}

impl ScriptedBackend {
    pub(crate) fn new(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(str::to_string).collect()),
            calls: Mutex::new(Vec::new()),
            fail_at: None,
        }
    }

    /// Fail the call with this zero-based index
    pub(crate) fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Text of the single user message sent with each call, in call order
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(messages, _)| {
                messages
                    .iter()
                    .filter_map(|m| m.content.as_text())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect()
    }

    pub(crate) fn tiers(&self) -> Vec<Tier> {
        self.calls.lock().unwrap().iter().map(|(_, tier)| *tier).collect()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, messages: &[Message], tier: Tier) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((messages.to_vec(), tier));
            calls.len() - 1
        };

        if self.fail_at == Some(index) {
            return Err(PipelineError::ModelCallFailure(format!(
                "scripted failure at call {}",
                index
            )));
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PipelineError::ModelCallFailure("script exhausted".to_string()))
    }
}
