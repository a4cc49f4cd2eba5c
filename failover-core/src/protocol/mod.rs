//! Protocol module for capability request/response structures
//!
//! These types are shared by every backend of a capability, which is what
//! makes backends interchangeable behind a combined model.

pub mod types;

pub use types::{
    Capability, EmbedRequest, EmbedResponse, FinishReason, GenerateRequest, GenerateResponse,
    ImageRequest, ImageResponse, Message, MessageRole, SpeechRequest, SpeechResponse, StreamPart,
    TranscriptionRequest, TranscriptionResponse, TranscriptionSegment, Usage,
};
