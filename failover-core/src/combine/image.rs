//! Combined image generation model

use super::COMBINED;
use crate::protocol::{ImageRequest, ImageResponse};
use crate::providers::{ImageModel, ProviderResult};
use crate::scheduler::{BackendScore, Scheduler, SchedulerResult, ScoringPolicy};
use async_trait::async_trait;
use std::sync::Arc;

/// A set of image models presented as one
#[derive(Debug)]
pub struct CombinedImageModel {
    scheduler: Scheduler<dyn ImageModel>,
    max_images_per_call: u32,
}

impl CombinedImageModel {
    pub fn new(models: Vec<Arc<dyn ImageModel>>) -> SchedulerResult<Self> {
        Self::with_policy(models, ScoringPolicy::default())
    }

    pub fn with_policy(
        models: Vec<Arc<dyn ImageModel>>,
        policy: ScoringPolicy,
    ) -> SchedulerResult<Self> {
        // A member without a declared limit can produce one image per call.
        let max_images_per_call = models
            .iter()
            .map(|m| m.max_images_per_call().unwrap_or(1))
            .max()
            .unwrap_or(1);

        Ok(Self {
            scheduler: Scheduler::with_policy(models, policy)?,
            max_images_per_call,
        })
    }

    pub fn scores(&self) -> Vec<BackendScore> {
        self.scheduler.snapshot()
    }
}

/// Combine image models with the default scoring policy
pub fn combine_images(models: Vec<Arc<dyn ImageModel>>) -> SchedulerResult<CombinedImageModel> {
    CombinedImageModel::new(models)
}

#[async_trait]
impl ImageModel for CombinedImageModel {
    fn provider(&self) -> &str {
        COMBINED
    }

    fn model_id(&self) -> &str {
        COMBINED
    }

    fn max_images_per_call(&self) -> Option<u32> {
        Some(self.max_images_per_call)
    }

    async fn generate(&self, request: ImageRequest) -> ProviderResult<ImageResponse> {
        self.scheduler
            .run(|model| {
                let request = request.clone();
                async move { model.generate(request).await }
            })
            .await
    }
}
