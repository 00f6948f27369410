//! Natural-language HR assistant for Rota.
//!
//! Lets a staff user ask free-text questions ("who is on leave today?")
//! and get a grounded, data-backed answer. The pipeline classifies the
//! query intent from text, retrieves a bounded point-in-time snapshot of
//! the relevant records, and renders an answer limited to that snapshot,
//! falling back to deterministic templates when the remote
//! text-generation service is unavailable.

pub mod context;
pub mod error;
pub mod generate;
pub mod intent;
pub mod pipeline;
pub mod retriever;

pub use context::QueryContext;
pub use error::AssistantError;
pub use generate::{GenerateStrategy, GenerationError, RemoteGenerator, ResponseGenerator, TemplateRenderer};
pub use intent::{classify, Intent};
pub use pipeline::{HrAssistant, QueryOutcome};
pub use retriever::ContextRetriever;
