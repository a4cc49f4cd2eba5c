//! Scripted backends shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use failover_core::protocol::{
    EmbedRequest, EmbedResponse, FinishReason, GenerateRequest, GenerateResponse, ImageRequest,
    ImageResponse, SpeechRequest, SpeechResponse, StreamPart, TranscriptionRequest,
    TranscriptionResponse,
};
use failover_core::providers::{
    EmbeddingModel, ImageModel, LanguageModel, ProviderError, ProviderResult, SpeechModel,
    StreamResponse, TranscriptionModel,
};
use futures::stream;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What a scripted backend does when called
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Return a normal result
    Succeed,
    /// Return `ProviderError::ServiceUnavailable`
    Fail,
    /// Return a result that reports an error in-band
    ErrorResult,
}

/// Records which backend names were called, in order
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, name: &str) {
        self.0.lock().unwrap().push(name.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub struct ScriptedModel {
    pub name: String,
    behavior: Mutex<Behavior>,
    calls: AtomicUsize,
    log: CallLog,
    last_request: Mutex<Option<String>>,
    pub supports_image_urls: bool,
    pub supports_structured_outputs: bool,
    pub supports_parallel_calls: bool,
    pub max_embeddings_per_call: Option<usize>,
    pub max_images_per_call: Option<u32>,
}

impl ScriptedModel {
    pub fn new(name: &str, behavior: Behavior, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
            log: log.clone(),
            last_request: Mutex::new(None),
            supports_image_urls: false,
            supports_structured_outputs: false,
            supports_parallel_calls: false,
            max_embeddings_per_call: None,
            max_images_per_call: None,
        }
    }

    pub fn set_behavior(&self, behavior: Behavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Debug rendering of the last request this backend received
    pub fn last_request(&self) -> Option<String> {
        self.last_request.lock().unwrap().clone()
    }

    fn enter(&self, request: &impl std::fmt::Debug) -> Behavior {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.record(&self.name);
        *self.last_request.lock().unwrap() = Some(format!("{:?}", request));
        *self.behavior.lock().unwrap()
    }

    fn failure(&self) -> ProviderError {
        ProviderError::ServiceUnavailable(format!("{} is down", self.name))
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.name
    }

    fn supports_image_urls(&self) -> bool {
        self.supports_image_urls
    }

    fn supports_structured_outputs(&self) -> bool {
        self.supports_structured_outputs
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<GenerateResponse> {
        match self.enter(&request) {
            Behavior::Succeed => Ok(GenerateResponse::text(format!("from {}", self.name))),
            Behavior::Fail => Err(self.failure()),
            Behavior::ErrorResult => {
                let mut response = GenerateResponse::text("");
                response.finish_reason = FinishReason::Error;
                Ok(response)
            }
        }
    }

    async fn stream(&self, request: GenerateRequest) -> ProviderResult<StreamResponse> {
        let events = match self.enter(&request) {
            Behavior::Succeed => vec![
                Ok(StreamPart::TextDelta {
                    text: format!("from {}", self.name),
                }),
                Ok(StreamPart::TextDelta {
                    text: "!".to_string(),
                }),
                Ok(StreamPart::Finish {
                    finish_reason: FinishReason::Stop,
                    usage: Default::default(),
                }),
            ],
            Behavior::Fail => return Err(self.failure()),
            Behavior::ErrorResult => vec![Ok(StreamPart::Error {
                message: format!("{} overloaded", self.name),
            })],
        };
        Ok(StreamResponse::new(Box::pin(stream::iter(events))))
    }
}

#[async_trait]
impl EmbeddingModel for ScriptedModel {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.name
    }

    fn supports_parallel_calls(&self) -> bool {
        self.supports_parallel_calls
    }

    fn max_embeddings_per_call(&self) -> Option<usize> {
        self.max_embeddings_per_call
    }

    async fn embed(&self, request: EmbedRequest) -> ProviderResult<EmbedResponse> {
        match self.enter(&request) {
            Behavior::Succeed => Ok(EmbedResponse {
                embeddings: request.values.iter().map(|v| vec![v.len() as f32]).collect(),
                usage: None,
            }),
            _ => Err(self.failure()),
        }
    }
}

#[async_trait]
impl TranscriptionModel for ScriptedModel {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.name
    }

    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> ProviderResult<TranscriptionResponse> {
        match self.enter(&request) {
            Behavior::Succeed => Ok(TranscriptionResponse {
                text: format!("heard by {}", self.name),
                segments: Vec::new(),
                language: request.language,
                duration_secs: None,
            }),
            _ => Err(self.failure()),
        }
    }
}

#[async_trait]
impl ImageModel for ScriptedModel {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.name
    }

    fn max_images_per_call(&self) -> Option<u32> {
        self.max_images_per_call
    }

    async fn generate(&self, request: ImageRequest) -> ProviderResult<ImageResponse> {
        match self.enter(&request) {
            Behavior::Succeed => Ok(ImageResponse {
                images: vec![self.name.clone(); request.n as usize],
                warnings: Vec::new(),
            }),
            _ => Err(self.failure()),
        }
    }
}

#[async_trait]
impl SpeechModel for ScriptedModel {
    fn provider(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.name
    }

    async fn synthesize(&self, request: SpeechRequest) -> ProviderResult<SpeechResponse> {
        match self.enter(&request) {
            Behavior::Succeed => Ok(SpeechResponse {
                audio: request.text.into_bytes(),
                media_type: format!("audio/{}", self.name),
            }),
            _ => Err(self.failure()),
        }
    }
}

/// Build scripted models sharing one call log
pub fn scripted(entries: &[(&str, Behavior)]) -> (Vec<Arc<ScriptedModel>>, CallLog) {
    let log = CallLog::default();
    let models = entries
        .iter()
        .map(|(name, behavior)| Arc::new(ScriptedModel::new(name, *behavior, &log)))
        .collect();
    (models, log)
}

/// Install a test subscriber once; honours RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
