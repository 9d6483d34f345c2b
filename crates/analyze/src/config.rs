//! Lint configuration, optionally loaded from a TOML file.
//!
//! ```toml
//! disabled_rules = ["C8"]
//! ignored_packages = ["java", "com.example.internal"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Package prefixes that are never examined: third-party surfaces that
/// ship inside the platform but do not follow its guidelines.
pub const DEFAULT_IGNORED_PACKAGES: &[&str] = &[
    "java",
    "javax",
    "junit",
    "org.apache",
    "org.json",
    "org.w3c",
    "org.xml",
    "android.icu.",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rule ids (`FW3`, `C2`, ...) whose violations are dropped.
    pub disabled_rules: BTreeSet<String>,
    /// Classes whose package name starts with one of these are not examined.
    pub ignored_packages: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            disabled_rules: BTreeSet::new(),
            ignored_packages: DEFAULT_IGNORED_PACKAGES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl LintConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        !self.disabled_rules.contains(rule)
    }

    pub fn is_package_ignored(&self, package: &str) -> bool {
        self.ignored_packages
            .iter()
            .any(|prefix| package.starts_with(prefix.as_str()))
    }
}
