//! Named backends and config-driven construction of combined models

use super::{
    CombinedEmbeddingModel, CombinedImageModel, CombinedLanguageModel, CombinedSpeechModel,
    CombinedTranscriptionModel,
};
use crate::config::FailoverConfig;
use crate::protocol::Capability;
use crate::providers::{
    EmbeddingModel, ImageModel, LanguageModel, ProviderError, ProviderResult, SpeechModel,
    TranscriptionModel,
};
use crate::scheduler::ScoringPolicy;
use std::collections::HashMap;
use std::sync::Arc;

/// Backends registered by name, one namespace per capability
#[derive(Default)]
pub struct BackendRegistry {
    language: HashMap<String, Arc<dyn LanguageModel>>,
    embedding: HashMap<String, Arc<dyn EmbeddingModel>>,
    transcription: HashMap<String, Arc<dyn TranscriptionModel>>,
    image: HashMap<String, Arc<dyn ImageModel>>,
    speech: HashMap<String, Arc<dyn SpeechModel>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_language(
        &mut self,
        name: impl Into<String>,
        model: Arc<dyn LanguageModel>,
    ) -> &mut Self {
        self.language.insert(name.into(), model);
        self
    }

    pub fn register_embedding(
        &mut self,
        name: impl Into<String>,
        model: Arc<dyn EmbeddingModel>,
    ) -> &mut Self {
        self.embedding.insert(name.into(), model);
        self
    }

    pub fn register_transcription(
        &mut self,
        name: impl Into<String>,
        model: Arc<dyn TranscriptionModel>,
    ) -> &mut Self {
        self.transcription.insert(name.into(), model);
        self
    }

    pub fn register_image(&mut self, name: impl Into<String>, model: Arc<dyn ImageModel>) -> &mut Self {
        self.image.insert(name.into(), model);
        self
    }

    pub fn register_speech(&mut self, name: impl Into<String>, model: Arc<dyn SpeechModel>) -> &mut Self {
        self.speech.insert(name.into(), model);
        self
    }

    /// Build the language group `group` described in `config`
    pub fn language_group(
        &self,
        config: &FailoverConfig,
        group: &str,
    ) -> ProviderResult<CombinedLanguageModel> {
        let (members, policy) = resolve(&self.language, config, group, Capability::Language)?;
        Ok(CombinedLanguageModel::with_policy(members, policy)?)
    }

    pub fn embedding_group(
        &self,
        config: &FailoverConfig,
        group: &str,
    ) -> ProviderResult<CombinedEmbeddingModel> {
        let (members, policy) = resolve(&self.embedding, config, group, Capability::Embedding)?;
        Ok(CombinedEmbeddingModel::with_policy(members, policy)?)
    }

    pub fn transcription_group(
        &self,
        config: &FailoverConfig,
        group: &str,
    ) -> ProviderResult<CombinedTranscriptionModel> {
        let (members, policy) =
            resolve(&self.transcription, config, group, Capability::Transcription)?;
        Ok(CombinedTranscriptionModel::with_policy(members, policy)?)
    }

    pub fn image_group(&self, config: &FailoverConfig, group: &str) -> ProviderResult<CombinedImageModel> {
        let (members, policy) = resolve(&self.image, config, group, Capability::Image)?;
        Ok(CombinedImageModel::with_policy(members, policy)?)
    }

    pub fn speech_group(&self, config: &FailoverConfig, group: &str) -> ProviderResult<CombinedSpeechModel> {
        let (members, policy) = resolve(&self.speech, config, group, Capability::Speech)?;
        Ok(CombinedSpeechModel::with_policy(members, policy)?)
    }
}

fn resolve<M: ?Sized>(
    pool: &HashMap<String, Arc<M>>,
    config: &FailoverConfig,
    group: &str,
    expected: Capability,
) -> ProviderResult<(Vec<Arc<M>>, ScoringPolicy)> {
    let group_config = config
        .group(group)
        .ok_or_else(|| ProviderError::Configuration(format!("Unknown group '{}'", group)))?;

    if group_config.capability != expected {
        return Err(ProviderError::Configuration(format!(
            "Group '{}' is a {} group, not {}",
            group, group_config.capability, expected
        )));
    }

    let members = group_config
        .members
        .iter()
        .map(|name| {
            pool.get(name).cloned().ok_or_else(|| {
                ProviderError::Configuration(format!(
                    "Group '{}' references unregistered {} backend '{}'",
                    group, expected, name
                ))
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;

    Ok((members, config.policy_for(group)))
}
