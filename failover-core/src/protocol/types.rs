//! Request and response types for each capability
//!
//! These are provider-agnostic shapes. Backends translate them to and from
//! their own wire formats; the failover layer passes them through unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of service a backend provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Text generation
    Language,
    Embedding,
    Transcription,
    /// Image generation
    Image,
    /// Speech synthesis
    Speech,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Language => "language",
            Self::Embedding => "embedding",
            Self::Transcription => "transcription",
            Self::Image => "image",
            Self::Speech => "speech",
        };
        f.write_str(name)
    }
}

/// Token accounting reported by a backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,
}

/// Role of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A prompt message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Text generation request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Ask the backend for a JSON object instead of free text
    #[serde(default)]
    pub json_mode: bool,

    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(prompt: Vec<Message>) -> Self {
        Self {
            prompt,
            ..Default::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Why a generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    /// The backend reported an error in-band
    Error,
    Other,
    Unknown,
}

/// Text generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub finish_reason: FinishReason,

    #[serde(default)]
    pub usage: Usage,

    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: FinishReason::Stop,
            usage: Usage::default(),
            metadata: HashMap::new(),
        }
    }

    /// A response that completed but reports an error
    pub fn is_error(&self) -> bool {
        self.finish_reason == FinishReason::Error
    }
}

/// One event of a streamed generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamPart {
    TextDelta { text: String },
    Finish {
        finish_reason: FinishReason,
        #[serde(default)]
        usage: Usage,
    },
    /// Error reported inside an otherwise healthy stream
    Error { message: String },
}

impl StreamPart {
    /// The message of an in-band error event
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Embedding request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbedRequest {
    pub values: Vec<String>,
}

/// Embedding result, one vector per input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<Vec<f32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Transcription request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    pub audio: Vec<u8>,

    /// IANA media type of `audio`, e.g. `audio/wav`
    pub media_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    pub text: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// Transcription result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,

    #[serde(default)]
    pub segments: Vec<TranscriptionSegment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

/// Image generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,

    /// Number of images to generate
    pub n: u32,

    /// Size as `WIDTHxHEIGHT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n: 1,
            size: None,
            seed: None,
        }
    }
}

/// Image generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Base64 encoded images
    pub images: Vec<String>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Speech synthesis request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Requested output format, e.g. `mp3`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

/// Speech synthesis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub audio: Vec<u8>,
    pub media_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stream_part_tagging() {
        let part: StreamPart =
            serde_json::from_value(json!({"type": "error", "message": "overloaded"})).unwrap();
        assert_eq!(part.error_message(), Some("overloaded"));

        let delta = StreamPart::TextDelta {
            text: "hi".to_string(),
        };
        assert_eq!(delta.error_message(), None);
        assert_eq!(
            serde_json::to_value(delta).unwrap(),
            json!({"type": "text_delta", "text": "hi"})
        );
    }

    #[test]
    fn test_finish_reason_error_detection() {
        let mut response = GenerateResponse::text("partial");
        assert!(!response.is_error());
        response.finish_reason = FinishReason::Error;
        assert!(response.is_error());
    }

    #[test]
    fn test_capability_serde_matches_display() {
        for capability in [
            Capability::Language,
            Capability::Embedding,
            Capability::Transcription,
            Capability::Image,
            Capability::Speech,
        ] {
            let value = serde_json::to_value(capability).unwrap();
            assert_eq!(value, json!(capability.to_string()));
        }
    }

    #[test]
    fn test_generate_request_builder() {
        let request = GenerateRequest::new(vec![
            Message::system("Answer briefly."),
            Message::user("Hello"),
            Message::assistant("Hi."),
        ])
        .with_max_tokens(64)
        .with_temperature(0.2);
        let roles: Vec<_> = request.prompt.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(request.max_tokens, Some(64));
        assert_eq!(request.temperature, Some(0.2));
    }
}
