//! Combined models
//!
//! Each combined model wraps a [`Scheduler`](crate::scheduler::Scheduler)
//! over members of one capability and implements that capability's trait.
//! A call is tried against members in score order until one succeeds.
//!
//! ```ignore
//! let chat = combine_language_models(vec![openai_gpt_4o, google_gemini_flash])?;
//! let response = chat.generate(request).await?;
//! ```

mod embedding;
mod image;
mod language;
mod registry;
mod speech;
mod transcription;

pub use embedding::{combine_embeddings, CombinedEmbeddingModel};
pub use image::{combine_images, CombinedImageModel};
pub use language::{combine_language_models, is_failure_result, peek_stream, CombinedLanguageModel};
pub use registry::BackendRegistry;
pub use speech::{combine_speech, CombinedSpeechModel};
pub use transcription::{combine_transcriptions, CombinedTranscriptionModel};

/// Provider name and model id reported by every combined model
pub const COMBINED: &str = "combined";
