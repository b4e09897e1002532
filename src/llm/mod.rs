//! Model backend abstraction and tier-routed invocation
//!
//! Every model call goes through `ModelInvoker::call`, which picks the tier
//! from the outgoing conversation and bounds the call with a timeout.

use crate::error::PipelineError;
use crate::models::{AgentName, Message, Tier};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub mod openai;
pub mod router;

#[cfg(test)]
pub(crate) mod scripted;

pub use openai::OpenAiChatClient;
pub use router::{choose_tier, conversation_chars, RoutingPolicy};

/// Remote chat model. Implementations return plain text, never cached.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn complete(&self, messages: &[Message], tier: Tier) -> Result<String>;
}

/// Routes and time-bounds calls to a shared backend
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn ModelBackend>,
    policy: RoutingPolicy,
    timeout: Duration,
}

impl ModelInvoker {
    pub fn new(backend: Arc<dyn ModelBackend>, policy: RoutingPolicy, timeout: Duration) -> Self {
        Self {
            backend,
            policy,
            timeout,
        }
    }

    /// One model call on behalf of `agent`
    pub async fn call(&self, agent: AgentName, messages: &[Message]) -> Result<String> {
        let tier = choose_tier(messages, &self.policy);

        debug!(
            agent = %agent,
            %tier,
            total_chars = conversation_chars(messages),
            "Routing model call"
        );

        match tokio::time::timeout(self.timeout, self.backend.complete(messages, tier)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(agent = %agent, timeout_secs = self.timeout.as_secs(), "Model call timed out");
                Err(PipelineError::ModelCallFailure(format!(
                    "{} model call timed out after {:?}",
                    agent, self.timeout
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::scripted::ScriptedBackend;

    #[tokio::test]
    async fn test_invoker_routes_each_call_independently() {
        let backend = Arc::new(ScriptedBackend::new(vec!["one", "two"]));
        let invoker = ModelInvoker::new(
            backend.clone(),
            RoutingPolicy { threshold_chars: 10 },
            Duration::from_secs(5),
        );

        let long = invoker
            .call(AgentName::SummaryAgent, &[Message::user("x".repeat(11))])
            .await;
        let short = invoker
            .call(AgentName::SummaryAgent, &[Message::user("short")])
            .await;

        tokio_test::assert_ok!(long);
        tokio_test::assert_ok!(short);
        assert_eq!(backend.tiers(), vec![Tier::Advanced, Tier::Baseline]);
    }

    struct StalledBackend;

    #[async_trait]
    impl ModelBackend for StalledBackend {
        async fn complete(&self, _messages: &[Message], _tier: Tier) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_timeout_is_model_call_failure() {
        let invoker = ModelInvoker::new(
            Arc::new(StalledBackend),
            RoutingPolicy::default(),
            Duration::from_millis(20),
        );

        let result = invoker
            .call(AgentName::RiskAgent, &[Message::user("hello")])
            .await;

        assert!(matches!(result, Err(PipelineError::ModelCallFailure(ref m)) if m.contains("timed out")));
    }
}
