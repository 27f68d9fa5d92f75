//! Rename configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::RenameError;
use crate::ext::ExtensionSpec;

/// Configuration for a rename walk.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct RenameConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Extension to replace, as typed by the user.
    pub old_extension: String,

    /// Replacement extension, as typed by the user.
    pub new_extension: String,

    /// Include hidden files and directories (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Maximum depth to traverse (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Report what would be renamed without touching the filesystem.
    #[builder(default = "false")]
    #[serde(default)]
    pub dry_run: bool,
}

fn default_true() -> bool {
    true
}

impl RenameConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }

        for (label, ext) in [("Old", &self.old_extension), ("New", &self.new_extension)] {
            match ext {
                Some(ext) if ext.trim().is_empty() => {
                    return Err(format!("{label} extension cannot be empty"));
                }
                None => return Err(format!("{label} extension is required")),
                _ => {}
            }
        }
        Ok(())
    }
}

impl From<RenameConfigBuilderError> for RenameError {
    fn from(err: RenameConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl RenameConfig {
    /// Create a new rename config builder.
    pub fn builder() -> RenameConfigBuilder {
        RenameConfigBuilder::default()
    }

    /// Create a config without validating the extensions.
    ///
    /// Empty extensions are accepted here and normalize to `"."`.
    pub fn new(
        root: impl Into<PathBuf>,
        old_extension: impl Into<String>,
        new_extension: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            old_extension: old_extension.into(),
            new_extension: new_extension.into(),
            include_hidden: true,
            max_depth: None,
            dry_run: false,
        }
    }

    /// The normalized extension to match.
    pub fn old_spec(&self) -> ExtensionSpec {
        ExtensionSpec::normalize(&self.old_extension)
    }

    /// The normalized replacement extension.
    pub fn new_spec(&self) -> ExtensionSpec {
        ExtensionSpec::normalize(&self.new_extension)
    }
}
