use serde::{Deserialize, Serialize};

/// What the declaration registry does with a second declaration of an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first declaration and drop the later one with a warning.
    #[default]
    KeepFirst,
    /// Fail with `DuplicateDeclaration`.
    Reject,
}

/// Settings for one lifecycle run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleSettings {
    pub duplicate_policy: DuplicatePolicy,
}

impl LifecycleSettings {
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
