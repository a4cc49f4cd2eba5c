//! Failover Core Library
//!
//! Combines interchangeable model backends (text generation, embedding,
//! transcription, image generation, speech synthesis) into a single backend
//! that fails over between them and learns which members are reliable.

pub mod combine;
pub mod config;
pub mod protocol;
pub mod providers;
pub mod scheduler;

pub use combine::{
    combine_embeddings, combine_images, combine_language_models, combine_speech,
    combine_transcriptions, BackendRegistry, CombinedEmbeddingModel, CombinedImageModel,
    CombinedLanguageModel, CombinedSpeechModel, CombinedTranscriptionModel,
};
pub use providers::{ProviderError, ProviderResult};
pub use scheduler::{BackendScore, Scheduler, SchedulerError, ScoringPolicy};

/// Returns the version of the Failover Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
