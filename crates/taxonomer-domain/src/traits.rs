//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ChatCompletion, CompletionRequest};

/// Trait for chat-completion backends
///
/// Implemented by the infrastructure layer (taxonomer-llm): an in-process
/// model wrapper and a remote HTTP client. Calls are blocking.
pub trait CompletionBackend {
    /// Error type for backend operations
    type Error;

    /// Run one structured chat completion
    fn complete(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error>;
}

impl<B: CompletionBackend + ?Sized> CompletionBackend for &B {
    type Error = B::Error;

    fn complete(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error> {
        (**self).complete(request)
    }
}

impl<B: CompletionBackend + ?Sized> CompletionBackend for Box<B> {
    type Error = B::Error;

    fn complete(&self, request: &CompletionRequest) -> Result<ChatCompletion, Self::Error> {
        (**self).complete(request)
    }
}
