//! Combined speech synthesis model

use super::COMBINED;
use crate::protocol::{SpeechRequest, SpeechResponse};
use crate::providers::{ProviderResult, SpeechModel};
use crate::scheduler::{BackendScore, Scheduler, SchedulerResult, ScoringPolicy};
use async_trait::async_trait;
use std::sync::Arc;

/// A set of speech models presented as one
#[derive(Debug)]
pub struct CombinedSpeechModel {
    scheduler: Scheduler<dyn SpeechModel>,
}

impl CombinedSpeechModel {
    pub fn new(models: Vec<Arc<dyn SpeechModel>>) -> SchedulerResult<Self> {
        Self::with_policy(models, ScoringPolicy::default())
    }

    pub fn with_policy(
        models: Vec<Arc<dyn SpeechModel>>,
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

/// Combine speech models with the default scoring policy
pub fn combine_speech(models: Vec<Arc<dyn SpeechModel>>) -> SchedulerResult<CombinedSpeechModel> {
    CombinedSpeechModel::new(models)
}

#[async_trait]
impl SpeechModel for CombinedSpeechModel {
    fn provider(&self) -> &str {
        COMBINED
    }

    fn model_id(&self) -> &str {
        COMBINED
    }

    async fn synthesize(&self, request: SpeechRequest) -> ProviderResult<SpeechResponse> {
        self.scheduler
            .run(|model| {
                let request = request.clone();
                async move { model.synthesize(request).await }
            })
            .await
    }
}
