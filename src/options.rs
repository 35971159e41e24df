//! Options controlling how a [`Localizer`](crate::Localizer) reports failures
//! and touches the file system.

use serde::{Deserialize, Serialize};

/// What to do with recoverable failures such as a missing file, a malformed
/// file, a duplicate key on add, or an unknown key on remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure and report the operation as [`Outcome::Skipped`](crate::Outcome::Skipped).
    #[default]
    Lenient,
    /// Return the failure as an error.
    Strict,
}

/// Behavior options for [`crate::Localizer`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizerOptions {
    /// How recoverable failures are reported.
    pub policy: ErrorPolicy,
    /// Whether `create_localization_file` creates a missing target directory.
    pub create_missing_dirs: bool,
}

impl Default for LocalizerOptions {
    fn default() -> Self {
        LocalizerOptions {
            policy: ErrorPolicy::Lenient,
            create_missing_dirs: true,
        }
    }
}

impl LocalizerOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Switches between [`ErrorPolicy::Strict`] and [`ErrorPolicy::Lenient`].
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.policy = if strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Lenient
        };
        self
    }

    /// Enables/disables creation of missing directories.
    pub fn with_create_missing_dirs(mut self, create_missing_dirs: bool) -> Self {
        self.create_missing_dirs = create_missing_dirs;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.policy == ErrorPolicy::Strict
    }
}
