//! Combined embedding model

use super::COMBINED;
use crate::protocol::{EmbedRequest, EmbedResponse};
use crate::providers::{EmbeddingModel, ProviderResult};
use crate::scheduler::{BackendScore, Scheduler, SchedulerResult, ScoringPolicy};
use async_trait::async_trait;
use std::sync::Arc;

/// A set of embedding models presented as one
#[derive(Debug)]
pub struct CombinedEmbeddingModel {
    scheduler: Scheduler<dyn EmbeddingModel>,
    supports_parallel_calls: bool,
    max_embeddings_per_call: Option<usize>,
}

impl CombinedEmbeddingModel {
    pub fn new(models: Vec<Arc<dyn EmbeddingModel>>) -> SchedulerResult<Self> {
        Self::with_policy(models, ScoringPolicy::default())
    }

    pub fn with_policy(
        models: Vec<Arc<dyn EmbeddingModel>>,
        policy: ScoringPolicy,
    ) -> SchedulerResult<Self> {
        let supports_parallel_calls = models.iter().any(|m| m.supports_parallel_calls());
        // Largest known limit; unknown when no member declares one.
        let max_embeddings_per_call = models
            .iter()
            .filter_map(|m| m.max_embeddings_per_call())
            .max();

        Ok(Self {
            scheduler: Scheduler::with_policy(models, policy)?,
            supports_parallel_calls,
            max_embeddings_per_call,
        })
    }

    /// Member scores in current try order
    pub fn scores(&self) -> Vec<BackendScore> {
        self.scheduler.snapshot()
    }
}

/// Combine embedding models with the default scoring policy
pub fn combine_embeddings(
    models: Vec<Arc<dyn EmbeddingModel>>,
) -> SchedulerResult<CombinedEmbeddingModel> {
    CombinedEmbeddingModel::new(models)
}

#[async_trait]
impl EmbeddingModel for CombinedEmbeddingModel {
    fn provider(&self) -> &str {
        COMBINED
    }

    fn model_id(&self) -> &str {
        COMBINED
    }

    fn supports_parallel_calls(&self) -> bool {
        self.supports_parallel_calls
    }

    fn max_embeddings_per_call(&self) -> Option<usize> {
        self.max_embeddings_per_call
    }

    async fn embed(&self, request: EmbedRequest) -> ProviderResult<EmbedResponse> {
        self.scheduler
            .run(|model| {
                let request = request.clone();
                async move { model.embed(request).await }
            })
            .await
    }
}
