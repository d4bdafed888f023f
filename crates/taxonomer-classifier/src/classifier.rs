//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::prompt::{PromptComposer, SYSTEM_PROMPT};
use crate::response::decode_content;
use crate::schema::generate_schema;
use serde_json::Value;
use std::fmt::Display;
use std::time::Instant;
use taxonomer_domain::{ChatMessage, Classification, CompletionBackend, CompletionRequest, ResponseFormat};
use taxonomer_llm::{ChatModel, LocalBackend, RemoteBackend};
use tracing::{debug, info, warn};

/// Structured-generation request for `content` under `config`
///
/// Both the prompt and the schema are derived fresh from the arguments.
pub fn build_request(config: &ClassifierConfig, composer: &PromptComposer, content: &str) -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(composer.build_prompt(content, config)),
        ],
        response_format: ResponseFormat::json_object(generate_schema(config)),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}

/// The Classifier turns content into taxonomy labels through a completion backend
///
/// Holds no state besides its configuration; schema and prompt are rebuilt on
/// every call.
pub struct Classifier<B> {
    backend: B,
    config: ClassifierConfig,
    composer: PromptComposer,
}

impl<B> Classifier<B>
where
    B: CompletionBackend,
    B::Error: Display,
{
    /// Create a new Classifier
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Config` if the configuration does not validate.
    /// Keys read only by a particular backend are left to that backend.
    pub fn new(backend: B, config: ClassifierConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        let composer = PromptComposer::new(config.taxonomy_table()?);

        Ok(Self {
            backend,
            config,
            composer,
        })
    }

    /// Configuration this classifier was built with
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Borrow the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Output schema for the current configuration
    pub fn schema(&self) -> Value {
        generate_schema(&self.config)
    }

    /// User prompt for `content`
    pub fn prompt(&self, content: &str) -> String {
        self.composer.build_prompt(content, &self.config)
    }

    /// Structured-generation request for `content`
    pub fn build_request(&self, content: &str) -> CompletionRequest {
        build_request(&self.config, &self.composer, content)
    }

    /// Classify content
    ///
    /// # Returns
    ///
    /// `Classification::Labeled` with the decoded model output, or
    /// `Classification::Unavailable` when the backend failed to answer.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::MalformedOutput` if the model content is not
    /// a JSON object.
    pub fn classify(&self, content: &str) -> Result<Classification, ClassifierError> {
        let start = Instant::now();
        let request = self.build_request(content);

        debug!(
            content_chars = content.chars().count(),
            prompt_chars = request.messages[1].content.len(),
            "Built classification request"
        );

        let completion = match self.backend.complete(&request) {
            Ok(completion) => completion,
            Err(e) => {
                warn!("Classification unavailable: {}", e);
                return Ok(Classification::Unavailable { reason: e.to_string() });
            }
        };

        let Some(content) = completion.first_content() else {
            warn!("Classification unavailable: completion has no message content");
            return Ok(Classification::Unavailable {
                reason: "Completion has no message content".to_string(),
            });
        };

        let labels = decode_content(content)?;

        info!(
            taxonomies = labels.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classification complete"
        );

        Ok(Classification::Labeled(labels))
    }
}

impl Classifier<RemoteBackend> {
    /// Classifier talking to the inference server at `config.host`
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Backend` if `host` or `timeout_secs` is
    /// unusable, and `ClassifierError::Config` if the configuration does not
    /// validate.
    pub fn remote(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let backend = config.remote_backend()?;
        Self::new(backend, config)
    }
}

impl<M> Classifier<LocalBackend<M>>
where
    M: ChatModel,
{
    /// Classifier running an in-process model loaded from `config.model_path`
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Backend` if `model_path` is missing or the
    /// loader fails.
    pub fn local<F, E>(config: ClassifierConfig, loader: F) -> Result<Self, ClassifierError>
    where
        F: FnOnce(&taxonomer_llm::LocalModelOptions) -> Result<M, E>,
        E: Display,
    {
        let backend = LocalBackend::load(config.local_model_options(), loader)?;
        Self::new(backend, config)
    }
}

impl<B> std::fmt::Debug for Classifier<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
