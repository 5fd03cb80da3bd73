//! Ordered model fallback: try each candidate once, keep the first output
//! that contains a decodable JSON object.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::llm_client::json_extract::extract_json_object;
use crate::llm_client::{LlmError, TextGenerator};

/// Error marker reported when no candidate produced usable JSON.
pub const ALL_MODELS_FAILED: &str = "all_models_failed_or_no_valid_json";

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Parsed {
        fields: Map<String, Value>,
        /// Full model output the fields were decoded from.
        raw: String,
    },
    Failed {
        error: &'static str,
        /// Last raw text any candidate returned, if one returned at all.
        last_raw: Option<String>,
    },
}

#[derive(Clone)]
pub struct CandidateChain {
    generator: Arc<dyn TextGenerator>,
    models: Vec<String>,
    timeout: Duration,
}

impl CandidateChain {
    pub fn new(generator: Arc<dyn TextGenerator>, models: Vec<String>, timeout: Duration) -> Self {
        Self {
            generator,
            models,
            timeout,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Runs the prompt through each candidate model in order. A failing or
    /// unparseable candidate is logged and skipped, never retried.
    pub async fn extract(&self, prompt: &str) -> ExtractionOutcome {
        let mut last_raw: Option<String> = None;

        for model in &self.models {
            let raw = match self.call_with_timeout(model, prompt).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("model {model} failed: {e}");
                    continue;
                }
            };

            last_raw = Some(raw.clone());

            match extract_json_object(&raw) {
                Some(fields) => {
                    info!("model {model} produced structured output");
                    return ExtractionOutcome::Parsed { fields, raw };
                }
                None => warn!("model {model} returned no decodable JSON object"),
            }
        }

        ExtractionOutcome::Failed {
            error: ALL_MODELS_FAILED,
            last_raw,
        }
    }

    async fn call_with_timeout(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        tokio::time::timeout(self.timeout, self.generator.generate(model, prompt))
            .await
            .map_err(|_| LlmError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }
}
