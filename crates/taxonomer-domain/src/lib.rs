//! Taxonomer Domain Layer
//!
//! Core vocabulary shared by every other Taxonomer crate. It defines the
//! taxonomies content can be classified into, the chat-completion wire types
//! exchanged with a model, and the trait boundary behind which model inference
//! lives.
//!
//! ## Key Concepts
//!
//! - **Taxonomy**: A named classification dimension (IAB categories, gender, ...)
//! - **Completion Backend**: Where inference happens (in-process or remote)
//! - **Classification**: The decoded labels, or the "unavailable" outcome
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Only `serde` / `serde_json` as dependencies
//! - No I/O
//! - Backend implementations live in `taxonomer-llm`
//! - Prompt and schema generation live in `taxonomer-classifier`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod message;
pub mod taxonomy;
pub mod traits;

// Re-exports for convenience
pub use classification::{Classification, ClassificationResult, UNAVAILABLE_MESSAGE};
pub use message::{ChatCompletion, ChatMessage, Choice, CompletionRequest, ResponseFormat, ResponseMessage, Role};
pub use taxonomy::{Taxonomy, TaxonomySpec, TaxonomyTable};
pub use traits::CompletionBackend;
