//! Named rules, as referenced from schema files.

use serde::{Deserialize, Serialize};

use super::{PlanModifier, UseStateForUnknown, UseStateForUnknownIncludingNull, UseUnknownOnUpdate};
use crate::error::ConfigError;
use crate::value::AttributeShape;

/// A rule that can be listed under an attribute's `plan_modifiers`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RuleKind {
    /// [`UseUnknownOnUpdate`].
    UseUnknownOnUpdate,
    /// [`UseStateForUnknownIncludingNull`].
    UseStateForUnknownIncludingNull,
    /// [`UseStateForUnknown`].
    UseStateForUnknown,
}

impl RuleKind {
    /// Every available rule.
    pub const ALL: [Self; 3] = [
        Self::UseUnknownOnUpdate,
        Self::UseStateForUnknownIncludingNull,
        Self::UseStateForUnknown,
    ];

    /// Builds the rule for attributes of shape `T`.
    #[must_use]
    pub fn build<T: AttributeShape>(self) -> Box<dyn PlanModifier<T>> {
        match self {
            Self::UseUnknownOnUpdate => Box::new(UseUnknownOnUpdate),
            Self::UseStateForUnknownIncludingNull => Box::new(UseStateForUnknownIncludingNull),
            Self::UseStateForUnknown => Box::new(UseStateForUnknown),
        }
    }

    /// Registry name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UseUnknownOnUpdate => UseUnknownOnUpdate::NAME,
            Self::UseStateForUnknownIncludingNull => UseStateForUnknownIncludingNull::NAME,
            Self::UseStateForUnknown => UseStateForUnknown::NAME,
        }
    }

    /// Plain-text description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UseUnknownOnUpdate => UseUnknownOnUpdate::DESCRIPTION,
            Self::UseStateForUnknownIncludingNull => UseStateForUnknownIncludingNull::DESCRIPTION,
            Self::UseStateForUnknown => UseStateForUnknown::DESCRIPTION,
        }
    }

    /// Returns true for the rules that copy recorded state forward.
    #[must_use]
    pub const fn preserves_state(self) -> bool {
        matches!(
            self,
            Self::UseStateForUnknownIncludingNull | Self::UseStateForUnknown
        )
    }
}

impl std::str::FromStr for RuleKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownRule {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for RuleKind {
    type Error = ConfigError;

    fn try_from(name: String) -> std::result::Result<Self, Self::Error> {
        name.parse()
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
