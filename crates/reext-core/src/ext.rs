//! Extension normalization and matching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized file extension: trimmed, lowercase, with a leading dot.
///
/// Built only through [`ExtensionSpec::normalize`], so two specs compare
/// equal whenever their raw inputs differ only in case or surrounding
/// whitespace. Empty input normalizes to the bare `"."`, which matches file
/// names ending in a dot; callers that do not want that should reject empty
/// input before normalizing (see [`ExtensionSpec::is_empty_extension`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ExtensionSpec(String);

impl ExtensionSpec {
    /// Normalize a user-supplied extension.
    pub fn normalize(raw: &str) -> Self {
        let ext = raw.trim().to_lowercase();
        if ext.starts_with('.') {
            Self(ext)
        } else {
            Self(format!(".{ext}"))
        }
    }

    /// The normalized extension, including the leading dot.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the degenerate `"."` produced by empty input.
    pub fn is_empty_extension(&self) -> bool {
        self.0 == "."
    }

    /// Check whether a file name ends with this extension, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.strip_from(name).is_some()
    }

    /// Compute the new file name for `name`, or `None` if it does not match.
    ///
    /// Exactly as many characters as this extension holds are removed from
    /// the end of `name` before `new` is appended, so a file named just
    /// `".old"` becomes `".new"`.
    pub fn replace_in(&self, name: &str, new: &ExtensionSpec) -> Option<String> {
        self.strip_from(name).map(|base| format!("{base}{}", new.0))
    }

    fn strip_from<'a>(&self, name: &'a str) -> Option<&'a str> {
        let len = self.0.chars().count();
        let (start, _) = name.char_indices().rev().nth(len.checked_sub(1)?)?;
        let (base, suffix) = name.split_at(start);
        (suffix.to_lowercase() == self.0).then_some(base)
    }
}

impl fmt::Display for ExtensionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExtensionSpec {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for ExtensionSpec {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<ExtensionSpec> for String {
    fn from(spec: ExtensionSpec) -> Self {
        spec.0
    }
}

impl AsRef<str> for ExtensionSpec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
