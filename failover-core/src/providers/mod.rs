//! Backend abstraction
//!
//! Backends are clients for one capability. This crate does not ship any; it
//! defines the traits they implement and the errors they report.

pub mod adapter;
pub mod error;

pub use adapter::{
    EmbeddingModel, ImageModel, LanguageModel, ObjectGenerationMode, PartStream, SpeechModel,
    StreamResponse, TranscriptionModel,
};
pub use error::{ProviderError, ProviderResult};
