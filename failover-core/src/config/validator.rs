//! Cross-field configuration validation

use super::env::has_placeholder;
use super::error::{ValidationError, ValidationErrorKind};
use super::schema::FailoverConfig;
use crate::protocol::Capability;
use std::collections::HashMap;

/// Configuration validator with rules that span several groups
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Reject member names that still contain `${VAR}` placeholders
    pub reject_placeholders: bool,
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self {
            reject_placeholders: true,
        }
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &FailoverConfig) -> Result<(), ValidationError> {
        config.validate()?;

        if self.reject_placeholders {
            self.validate_placeholders(config)?;
        }
        self.validate_member_capabilities(config)?;

        Ok(())
    }

    fn validate_placeholders(&self, config: &FailoverConfig) -> Result<(), ValidationError> {
        for (name, group) in &config.groups {
            for (i, member) in group.members.iter().enumerate() {
                if has_placeholder(member) {
                    return Err(ValidationError::new(
                        format!("groups.{}.members[{}]", name, i),
                        ValidationErrorKind::Incompatible {
                            message: format!("unresolved placeholder in '{}'", member),
                        },
                    ));
                }
            }
        }
        Ok(())
    }

    /// A backend name must mean the same capability in every group that uses it
    fn validate_member_capabilities(&self, config: &FailoverConfig) -> Result<(), ValidationError> {
        let mut seen: HashMap<&str, (Capability, &str)> = HashMap::new();

        for (name, group) in &config.groups {
            for (i, member) in group.members.iter().enumerate() {
                match seen.get(member.as_str()) {
                    Some((capability, first_group)) if *capability != group.capability => {
                        return Err(ValidationError::new(
                            format!("groups.{}.members[{}]", name, i),
                            ValidationErrorKind::Incompatible {
                                message: format!(
                                    "'{}' is a {} backend in group '{}' but {} here",
                                    member, capability, first_group, group.capability
                                ),
                            },
                        ));
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(member.as_str(), (group.capability, name.as_str()));
                    }
                }
            }
        }

        Ok(())
    }
}
