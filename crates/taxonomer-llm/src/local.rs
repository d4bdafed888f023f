//! In-process model backend
//!
//! Wraps a locally loaded model that exposes a chat-completion call. Loading
//! weights and running inference belong to the model runtime; this module only
//! fixes the construction-time options and adapts the runtime to
//! `CompletionBackend`.

use crate::BackendError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use taxonomer_domain::{ChatCompletion, CompletionBackend, CompletionRequest};
use tracing::{debug, info};

/// Chat template applied by the runtime
pub const DEFAULT_CHAT_FORMAT: &str = "chatml";

/// Sampling seed, fixed for reproducible classifications
pub const DEFAULT_SEED: u32 = 0;

/// A locally loaded model runtime
///
/// Any closure `Fn(&CompletionRequest) -> Result<ChatCompletion, E>` is a
/// `ChatModel`, which is convenient for wiring bindings without a newtype.
pub trait ChatModel {
    /// Error type of the runtime
    type Error: Display;

    /// Run one chat completion honouring the request's response format
    fn create_chat_completion(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error>;
}

impl<F, E> ChatModel for F
where
    F: Fn(&CompletionRequest) -> Result<ChatCompletion, E>,
    E: Display,
{
    type Error = E;

    fn create_chat_completion(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error> {
        self(request)
    }
}

/// Options handed to the runtime when the model is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalModelOptions {
    /// Path to the model weights
    pub model_path: PathBuf,

    /// Chat template name
    pub chat_format: String,

    /// Runtime logging toggle
    pub verbose: bool,

    /// Sampling seed
    pub seed: u32,
}

impl LocalModelOptions {
    /// Options for the given weights with default template and seed
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            chat_format: DEFAULT_CHAT_FORMAT.to_string(),
            verbose: false,
            seed: DEFAULT_SEED,
        }
    }

    /// Toggle runtime logging
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check the model path before anything is loaded
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(BackendError::Configuration(
                "model_path is required for the in-process backend".to_string(),
            ));
        }
        if !self.model_path.is_file() {
            return Err(BackendError::Configuration(format!(
                "Model file not found: {}",
                self.model_path.display()
            )));
        }
        Ok(())
    }
}

/// In-process completion backend
pub struct LocalBackend<M> {
    model: M,
    options: LocalModelOptions,
}

impl<M: ChatModel> LocalBackend<M> {
    /// Wrap an already loaded model
    pub fn new(model: M, options: LocalModelOptions) -> Self {
        Self { model, options }
    }

    /// Validate `options`, then load the model with `loader`
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Configuration` for a missing model path, and
    /// `BackendError::Model` if the loader fails.
    pub fn load<F, E>(options: LocalModelOptions, loader: F) -> Result<Self, BackendError>
    where
        F: FnOnce(&LocalModelOptions) -> Result<M, E>,
        E: Display,
    {
        options.validate()?;

        info!(
            model_path = %options.model_path.display(),
            chat_format = %options.chat_format,
            "Loading local model"
        );
        let model = loader(&options).map_err(|e| BackendError::Model(format!("Failed to load model: {}", e)))?;

        Ok(Self::new(model, options))
    }

    /// Options the model was loaded with
    pub fn options(&self) -> &LocalModelOptions {
        &self.options
    }

    /// Path of the loaded weights
    pub fn model_path(&self) -> &Path {
        &self.options.model_path
    }

    /// Borrow the underlying runtime
    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: ChatModel> CompletionBackend for LocalBackend<M> {
    type Error = BackendError;

    fn complete(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error> {
        if self.options.verbose {
            info!(max_tokens = request.max_tokens, "Running local chat completion");
        }
        let completion = self
            .model
            .create_chat_completion(request)
            .map_err(|e| BackendError::Model(e.to_string()))?;
        debug!(choices = completion.choices.len(), "Local chat completion finished");
        Ok(completion)
    }
}

impl<M> std::fmt::Debug for LocalBackend<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalBackend")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
