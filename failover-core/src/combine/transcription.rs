//! Combined transcription model

use super::COMBINED;
use crate::protocol::{TranscriptionRequest, TranscriptionResponse};
use crate::providers::{ProviderResult, TranscriptionModel};
use crate::scheduler::{BackendScore, Scheduler, SchedulerResult, ScoringPolicy};
use async_trait::async_trait;
use std::sync::Arc;

/// A set of transcription models presented as one
#[derive(Debug)]
pub struct CombinedTranscriptionModel {
    scheduler: Scheduler<dyn TranscriptionModel>,
}

impl CombinedTranscriptionModel {
    pub fn new(models: Vec<Arc<dyn TranscriptionModel>>) -> SchedulerResult<Self> {
        Self::with_policy(models, ScoringPolicy::default())
    }

    pub fn with_policy(
        models: Vec<Arc<dyn TranscriptionModel>>,
        policy: ScoringPolicy,
    ) -> SchedulerResult<Self> {
        Ok(Self {
            scheduler: Scheduler::with_policy(models, policy)?,
        })
    }

    pub fn scores(&self) -> Vec<BackendScore> {
        self.scheduler.snapshot()
    }
}

/// Combine transcription models with the default scoring policy
pub fn combine_transcriptions(
    models: Vec<Arc<dyn TranscriptionModel>>,
) -> SchedulerResult<CombinedTranscriptionModel> {
    CombinedTranscriptionModel::new(models)
}

#[async_trait]
impl TranscriptionModel for CombinedTranscriptionModel {
    fn provider(&self) -> &str {
        COMBINED
    }

    fn model_id(&self) -> &str {
        COMBINED
    }

    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> ProviderResult<TranscriptionResponse> {
        self.scheduler
            .run(|model| {
                let request = request.clone();
                async move { model.transcribe(request).await }
            })
            .await
    }
}
