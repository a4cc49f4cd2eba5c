//! Scoring policy for adaptive backend ordering
//!
//! A backend's score is multiplied by `reward` when it succeeds, by `penalty`
//! when it fails, and every score is multiplied by `decay` after each call.
//! Lower scores are tried first.

use crate::config::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

/// Configuration for score updates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringPolicy {
    /// Factor applied to a backend that succeeded (0.0, 1.0]
    #[serde(default = "default_reward")]
    pub reward: f64,

    /// Factor applied to a backend that failed (>= 1.0)
    #[serde(default = "default_penalty")]
    pub penalty: f64,

    /// Factor applied to every backend after each call (0.0, 1.0]
    #[serde(default = "default_decay")]
    pub decay: f64,

    /// Score assigned to every backend at construction
    #[serde(default = "default_initial_score")]
    pub initial_score: f64,

    /// Lower clamp applied after decay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,

    /// Upper clamp applied after decay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            reward: default_reward(),
            penalty: default_penalty(),
            decay: default_decay(),
            initial_score: default_initial_score(),
            min_score: None,
            max_score: None,
        }
    }
}

fn default_reward() -> f64 { 0.7 }
fn default_penalty() -> f64 { 1.5 }
fn default_decay() -> f64 { 0.9 }
fn default_initial_score() -> f64 { 1.0 }

impl ScoringPolicy {
    /// Keeps proven backends in front for longer
    pub fn sticky() -> Self {
        Self {
            reward: 0.5,
            penalty: 1.5,
            decay: 0.97,
            ..Default::default()
        }
    }

    /// Lets failed backends recover their position quickly
    pub fn forgiving() -> Self {
        Self {
            reward: 0.8,
            penalty: 1.25,
            decay: 0.8,
            ..Default::default()
        }
    }

    /// Bound scores to `[min, max]` after each decay step
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_score = Some(min);
        self.max_score = Some(max);
        self
    }

    /// Apply the post-call decay and the optional clamps to a score
    pub fn settle(&self, score: f64) -> f64 {
        let mut decayed = score * self.decay;
        if let Some(min) = self.min_score {
            decayed = decayed.max(min);
        }
        if let Some(max) = self.max_score {
            decayed = decayed.min(max);
        }
        decayed
    }

    /// Check factor ranges; `path` prefixes the reported field names
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        let field = |name: &str| {
            if path.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", path, name)
            }
        };

        if !(self.reward > 0.0 && self.reward <= 1.0) {
            return Err(ValidationError::out_of_range(
                field("reward"),
                format!("reward must be in (0, 1], got {}", self.reward),
            ));
        }
        if !(self.penalty >= 1.0 && self.penalty.is_finite()) {
            return Err(ValidationError::out_of_range(
                field("penalty"),
                format!("penalty must be a finite value >= 1, got {}", self.penalty),
            ));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(ValidationError::out_of_range(
                field("decay"),
                format!("decay must be in (0, 1], got {}", self.decay),
            ));
        }
        if !(self.initial_score > 0.0 && self.initial_score.is_finite()) {
            return Err(ValidationError::out_of_range(
                field("initial_score"),
                format!("initial score must be positive, got {}", self.initial_score),
            ));
        }
        for (name, bound) in [("min_score", self.min_score), ("max_score", self.max_score)] {
            if let Some(value) = bound {
                if !(value > 0.0 && value.is_finite()) {
                    return Err(ValidationError::out_of_range(
                        field(name),
                        format!("bound must be positive, got {}", value),
                    ));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_score, self.max_score) {
            if min > max {
                return Err(ValidationError::new(
                    field("min_score"),
                    ValidationErrorKind::Incompatible {
                        message: format!("min_score {} exceeds max_score {}", min, max),
                    },
                ));
            }
        }

        Ok(())
    }
}
