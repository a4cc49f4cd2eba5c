//! Combined text generation model

use super::COMBINED;
use crate::protocol::{Capability, GenerateRequest, GenerateResponse};
use crate::providers::{
    LanguageModel, ObjectGenerationMode, PartStream, ProviderError, ProviderResult, StreamResponse,
};
use crate::scheduler::{BackendScore, Scheduler, SchedulerResult, ScoringPolicy};
use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use std::sync::Arc;
use tracing::debug;

/// A set of language models presented as one
#[derive(Debug)]
pub struct CombinedLanguageModel {
    scheduler: Scheduler<dyn LanguageModel>,
    supports_image_urls: bool,
    supports_structured_outputs: bool,
}

impl CombinedLanguageModel {
    pub fn new(models: Vec<Arc<dyn LanguageModel>>) -> SchedulerResult<Self> {
        Self::with_policy(models, ScoringPolicy::default())
    }

    pub fn with_policy(
        models: Vec<Arc<dyn LanguageModel>>,
        policy: ScoringPolicy,
    ) -> SchedulerResult<Self> {
        let supports_image_urls = models.iter().any(|m| m.supports_image_urls());
        let supports_structured_outputs = models.iter().any(|m| m.supports_structured_outputs());

        Ok(Self {
            scheduler: Scheduler::with_policy(models, policy)?,
            supports_image_urls,
            supports_structured_outputs,
        })
    }

    /// Member scores in current try order
    pub fn scores(&self) -> Vec<BackendScore> {
        self.scheduler.snapshot()
    }
}

/// Combine language models with the default scoring policy
pub fn combine_language_models(
    models: Vec<Arc<dyn LanguageModel>>,
) -> SchedulerResult<CombinedLanguageModel> {
    CombinedLanguageModel::new(models)
}

/// In-band failure check for a complete generation
pub fn is_failure_result(response: &GenerateResponse) -> bool {
    response.is_error()
}

/// Pull the first event of a stream to see whether the backend failed.
///
/// An error event or a transport error as the first item fails the attempt.
/// Otherwise the full stream, first event included, is handed back.
pub async fn peek_stream(response: StreamResponse) -> ProviderResult<StreamResponse> {
    let StreamResponse {
        stream: mut events,
        metadata,
    } = response;

    let stream: PartStream = match events.next().await {
        None => Box::pin(stream::empty()),
        Some(Err(error)) => return Err(error),
        Some(Ok(first)) => {
            if let Some(message) = first.error_message() {
                return Err(ProviderError::ErrorResult(message.to_string()));
            }
            Box::pin(stream::once(future::ready(Ok(first))).chain(events))
        }
    };

    Ok(StreamResponse { stream, metadata })
}

#[async_trait]
impl LanguageModel for CombinedLanguageModel {
    fn provider(&self) -> &str {
        COMBINED
    }

    fn model_id(&self) -> &str {
        COMBINED
    }

    fn default_object_generation_mode(&self) -> Option<ObjectGenerationMode> {
        Some(ObjectGenerationMode::Json)
    }

    fn supports_image_urls(&self) -> bool {
        self.supports_image_urls
    }

    fn supports_structured_outputs(&self) -> bool {
        self.supports_structured_outputs
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<GenerateResponse> {
        self.scheduler
            .run(|model| {
                let request = request.clone();
                async move {
                    let response = model.generate(request).await?;
                    if is_failure_result(&response) {
                        debug!(
                            capability = %Capability::Language,
                            provider = model.provider(),
                            model = model.model_id(),
                            "Generation finished with an error"
                        );
                        return Err(ProviderError::ErrorResult(format!(
                            "{} finished with reason 'error'",
                            model.model_id()
                        )));
                    }
                    Ok(response)
                }
            })
            .await
    }

    async fn stream(&self, request: GenerateRequest) -> ProviderResult<StreamResponse> {
        self.scheduler
            .run(|model| {
                let request = request.clone();
                async move {
                    let response = model.stream(request).await?;
                    peek_stream(response).await.inspect_err(|error| {
                        debug!(
                            capability = %Capability::Language,
                            provider = model.provider(),
                            model = model.model_id(),
                            error = %error,
                            "Stream failed before its first event"
                        );
                    })
                }
            })
            .await
    }
}
