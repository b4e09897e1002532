//! Runtime settings loaded from the environment (and `.env` when present)

use crate::error::PipelineError;
use crate::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIER_THRESHOLD_CHARS: usize = 5000;
pub const DEFAULT_RETRIEVAL_TOP_K: usize = 7;

/// Which embedding backend builds the retrieval index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    OpenAi,
    /// Deterministic offline vectors, no network
    Hashing,
}

impl FromStr for EmbeddingProvider {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAi),
            "hashing" | "offline" => Ok(EmbeddingProvider::Hashing),
            other => Err(PipelineError::Config(format!(
                "Invalid EMBEDDING_PROVIDER: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub baseline_model: String,
    pub advanced_model: String,
    pub temperature: f32,
    pub tier_threshold_chars: usize,
    pub retrieval_top_k: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embedding_provider: EmbeddingProvider,
    pub embedding_model: String,
    pub request_timeout: Duration,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            baseline_model: "gpt-4o-mini".to_string(),
            advanced_model: "gpt-4o".to_string(),
            temperature: 0.2,
            tier_threshold_chars: DEFAULT_TIER_THRESHOLD_CHARS,
            retrieval_top_k: DEFAULT_RETRIEVAL_TOP_K,
            chunk_size: 800,
            chunk_overlap: 250,
            embedding_provider: EmbeddingProvider::OpenAi,
            embedding_model: "text-embedding-3-small".to_string(),
            request_timeout: Duration::from_secs(120),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults for anything unset
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let defaults = Settings::default();

        let settings = Settings {
            api_key: load_optional("OPENAI_API_KEY"),
            base_url: load_optional("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            baseline_model: load_optional("BASELINE_MODEL").unwrap_or(defaults.baseline_model),
            advanced_model: load_optional("ADVANCED_MODEL").unwrap_or(defaults.advanced_model),
            temperature: load_parsed("MODEL_TEMPERATURE")?.unwrap_or(defaults.temperature),
            tier_threshold_chars: load_parsed("TIER_THRESHOLD_CHARS")?
                .unwrap_or(defaults.tier_threshold_chars),
            retrieval_top_k: load_parsed("RETRIEVAL_TOP_K")?.unwrap_or(defaults.retrieval_top_k),
            chunk_size: load_parsed("CHUNK_SIZE")?.unwrap_or(defaults.chunk_size),
            chunk_overlap: load_parsed("CHUNK_OVERLAP")?.unwrap_or(defaults.chunk_overlap),
            embedding_provider: load_optional("EMBEDDING_PROVIDER")
                .map(|value| value.parse::<EmbeddingProvider>())
                .transpose()?
                .unwrap_or(defaults.embedding_provider),
            embedding_model: load_optional("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            request_timeout: load_parsed::<u64>("MODEL_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            port: match load_parsed("PORT")? {
                Some(port) => port,
                None => load_parsed("API_PORT")?.unwrap_or(defaults.port),
            },
        };

        settings.validate()?;

        debug!(
            base_url = %settings.base_url,
            baseline_model = %settings.baseline_model,
            advanced_model = %settings.advanced_model,
            tier_threshold_chars = settings.tier_threshold_chars,
            retrieval_top_k = settings.retrieval_top_k,
            embedding_provider = ?settings.embedding_provider,
            "Loaded settings"
        );

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.retrieval_top_k == 0 {
            return Err(PipelineError::Config(
                "RETRIEVAL_TOP_K must be greater than zero".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(PipelineError::Config(
                "CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(PipelineError::Config(
                "MODEL_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(PipelineError::Config(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }

    /// API key required by the live OpenAI clients
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            PipelineError::Config("OPENAI_API_KEY not found in environment variables".to_string())
        })
    }
}

fn load_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_parsed<T: FromStr>(key: &str) -> Result<Option<T>> {
    load_optional(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| PipelineError::Config(format!("Invalid value for {}: {}", key, value)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_policy() {
        let settings = Settings::default();
        assert_eq!(settings.tier_threshold_chars, 5000);
        assert_eq!(settings.retrieval_top_k, 7);
        assert_eq!(settings.chunk_size, 800);
        assert_eq!(settings.chunk_overlap, 250);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_embedding_provider_parsing() {
        assert_eq!(
            "OpenAI".parse::<EmbeddingProvider>().unwrap(),
            EmbeddingProvider::OpenAi
        );
        assert_eq!(
            "hashing".parse::<EmbeddingProvider>().unwrap(),
            EmbeddingProvider::Hashing
        );
        assert!("faiss".parse::<EmbeddingProvider>().is_err());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let settings = Settings {
            chunk_size: 100,
            chunk_overlap: 100,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let settings = Settings {
            request_timeout: Duration::ZERO,
            ..Settings::default()
        };
        assert!(
            matches!(settings.validate(), Err(PipelineError::Config(ref m)) if m.contains("MODEL_TIMEOUT_SECS"))
        );
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let settings = Settings::default();
        let error = settings.require_api_key().unwrap_err();
        assert!(error.to_string().contains("OPENAI_API_KEY"));
    }
}
