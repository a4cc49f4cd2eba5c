//! Configuration schema structures with serde support

use super::error::{ValidationError, ValidationErrorKind};
use crate::protocol::Capability;
use crate::scheduler::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Supported schema version
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FailoverConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Scoring policy used by groups without their own
    #[serde(default)]
    pub scoring: ScoringPolicy,

    /// Named combined backend sets
    #[serde(default)]
    pub groups: BTreeMap<String, GroupConfig>,

    /// Custom metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// One combined backend set
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Capability every member provides
    pub capability: Capability,

    /// Names of registered backends, in initial try order
    pub members: Vec<String>,

    /// Overrides the global scoring policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringPolicy>,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            scoring: ScoringPolicy::default(),
            groups: BTreeMap::new(),
            metadata: HashMap::new(),
        }
    }
}

impl FailoverConfig {
    /// Look up a group by name
    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.get(name)
    }

    /// Effective scoring policy for a group; unknown groups get the global policy
    pub fn policy_for(&self, group: &str) -> ScoringPolicy {
        self.groups
            .get(group)
            .and_then(|g| g.scoring)
            .unwrap_or(self.scoring)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::required("version"));
        }

        if self.version != CONFIG_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::InvalidVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: self.version.clone(),
                },
            ));
        }

        self.scoring.validate("scoring")?;

        for (name, group) in &self.groups {
            group.validate(&format!("groups.{}", name))?;
        }

        Ok(())
    }
}

impl GroupConfig {
    /// Validate group configuration
    pub fn validate(&self, path: &str) -> Result<(), ValidationError> {
        if self.members.is_empty() {
            return Err(ValidationError::required(format!("{}.members", path))
                .with_context("A group needs at least one member"));
        }

        let mut seen = HashSet::new();
        for (i, member) in self.members.iter().enumerate() {
            if member.is_empty() {
                return Err(ValidationError::required(format!("{}.members[{}]", path, i)));
            }
            if !seen.insert(member) {
                return Err(ValidationError::duplicate(
                    format!("{}.members[{}]", path, i),
                    member.clone(),
                ));
            }
        }

        if let Some(scoring) = &self.scoring {
            scoring.validate(&format!("{}.scoring", path))?;
        }

        Ok(())
    }
}
