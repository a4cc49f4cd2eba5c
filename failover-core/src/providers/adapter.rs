//! Capability traits implemented by backends
//!
//! One trait per capability. Combined models implement the same traits, so a
//! combined set can be used anywhere a single backend is expected, including
//! as a member of another combined set.

use super::error::ProviderResult;
use crate::protocol::{
    EmbedRequest, EmbedResponse, GenerateRequest, GenerateResponse, ImageRequest, ImageResponse,
    SpeechRequest, SpeechResponse, StreamPart, TranscriptionRequest, TranscriptionResponse,
};
use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

/// Stream of generation events
pub type PartStream = Pin<Box<dyn Stream<Item = ProviderResult<StreamPart>> + Send>>;

/// A streamed generation and the metadata returned with it
pub struct StreamResponse {
    pub stream: PartStream,
    pub metadata: HashMap<String, Value>,
}

impl StreamResponse {
    pub fn new(stream: PartStream) -> Self {
        Self {
            stream,
            metadata: HashMap::new(),
        }
    }
}

impl fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResponse")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// How a language model prefers to produce structured objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectGenerationMode {
    Json,
    Tool,
}

/// Text generation backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider name, e.g. `openai`
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    fn default_object_generation_mode(&self) -> Option<ObjectGenerationMode> {
        None
    }

    fn supports_image_urls(&self) -> bool {
        false
    }

    fn supports_structured_outputs(&self) -> bool {
        false
    }

    /// Generate a complete response
    async fn generate(&self, request: GenerateRequest) -> ProviderResult<GenerateResponse>;

    /// Generate a response as a stream of events
    async fn stream(&self, request: GenerateRequest) -> ProviderResult<StreamResponse>;
}

/// Embedding backend
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// Whether several `embed` calls may run in parallel
    fn supports_parallel_calls(&self) -> bool {
        false
    }

    /// Limit on `EmbedRequest::values` per call, if known
    fn max_embeddings_per_call(&self) -> Option<usize> {
        None
    }

    async fn embed(&self, request: EmbedRequest) -> ProviderResult<EmbedResponse>;
}

/// Speech-to-text backend
#[async_trait]
pub trait TranscriptionModel: Send + Sync {
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    async fn transcribe(&self, request: TranscriptionRequest)
        -> ProviderResult<TranscriptionResponse>;
}

/// Image generation backend
#[async_trait]
pub trait ImageModel: Send + Sync {
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    /// Limit on `ImageRequest::n` per call, if known
    fn max_images_per_call(&self) -> Option<u32> {
        None
    }

    async fn generate(&self, request: ImageRequest) -> ProviderResult<ImageResponse>;
}

/// Text-to-speech backend
#[async_trait]
pub trait SpeechModel: Send + Sync {
    fn provider(&self) -> &str;

    fn model_id(&self) -> &str;

    async fn synthesize(&self, request: SpeechRequest) -> ProviderResult<SpeechResponse>;
}
