//! Console configuration.
//!
//! Built once at startup and passed by reference to whatever needs it;
//! nothing here reads global state after construction.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use campus_crypto::{CodecScheme, KeyEncoding};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ConsoleError, Result};
use crate::taxonomy::{LeafRule, TaxonomyOptions, DEFAULT_MAX_DEPTH, DEFAULT_SENTINEL_FIELD};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CAMPUS";

// ============================================================================
// Codec configuration
// ============================================================================

/// Key settings for one content domain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomainKeyConfig {
    /// Key text. `None` leaves the domain without a working codec.
    pub key: Option<String>,
    pub encoding: KeyEncoding,
    pub scheme: CodecScheme,
    /// Sealed domains only: also read legacy ECB values.
    pub accept_legacy: bool,
}

/// Per-domain key settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub domains: BTreeMap<String, DomainKeyConfig>,
}

impl CodecConfig {
    pub fn with_domain(mut self, name: impl Into<String>, domain: DomainKeyConfig) -> Self {
        self.domains.insert(name.into(), domain);
        self
    }

    /// Read domain keys from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read domain keys through `lookup`.
    ///
    /// `CAMPUS_DOMAINS` lists the domains (comma separated). For each domain
    /// `d` (upper-cased): `CAMPUS_KEY_D`, `CAMPUS_KEY_ENCODING_D`,
    /// `CAMPUS_SCHEME_D`, `CAMPUS_ACCEPT_LEGACY_D`. The flag accepts
    /// `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`, in any case.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let names = lookup(&format!("{ENV_PREFIX}_DOMAINS")).unwrap_or_else(|| {
            info!("{ENV_PREFIX}_DOMAINS not set, using defaults");
            crate::domain::DEFAULT_DOMAINS.join(",")
        });

        let mut config = Self::default();
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let suffix = name.to_ascii_uppercase().replace('-', "_");
            let key_var = format!("{ENV_PREFIX}_KEY_{suffix}");
            let key = lookup(&key_var);
            if key.is_none() {
                warn!("{key_var} not set, domain {name} will pass values through unencrypted");
            }
            let domain = DomainKeyConfig {
                key,
                encoding: parse_or_default(&lookup, &format!("{ENV_PREFIX}_KEY_ENCODING_{suffix}")),
                scheme: parse_or_default(&lookup, &format!("{ENV_PREFIX}_SCHEME_{suffix}")),
                accept_legacy: parse_flag(&lookup, &format!("{ENV_PREFIX}_ACCEPT_LEGACY_{suffix}")),
            };
            config.domains.insert(name.to_string(), domain);
        }
        config
    }
}

fn parse_or_default<T, F>(lookup: &F, var: &str) -> T
where
    T: FromStr + Default,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => T::default(),
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {var} value: {e}, using default");
            T::default()
        }),
    }
}

fn parse_flag<F>(lookup: &F, var: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return false;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" | "" => false,
        _ => {
            warn!("Invalid {var} value: {raw:?}, using false");
            false
        }
    }
}

// ============================================================================
// Taxonomy configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxonomyConfig {
    pub max_depth: usize,
    pub sentinel_fields: Vec<String>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            sentinel_fields: vec![DEFAULT_SENTINEL_FIELD.to_string()],
        }
    }
}

impl TaxonomyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > crate::taxonomy::MAX_SUPPORTED_DEPTH {
            return Err(ConsoleError::InvalidConfig(format!(
                "taxonomy maxDepth must be between 1 and {}, got {}",
                crate::taxonomy::MAX_SUPPORTED_DEPTH,
                self.max_depth
            )));
        }
        if self.sentinel_fields.iter().all(|f| f.trim().is_empty()) {
            return Err(ConsoleError::InvalidConfig(
                "taxonomy needs at least one sentinel field".into(),
            ));
        }
        Ok(())
    }

    pub fn options(&self) -> TaxonomyOptions {
        TaxonomyOptions {
            max_depth: self.max_depth,
            leaf_rule: LeafRule::new(
                self.sentinel_fields
                    .iter()
                    .map(|f| f.trim())
                    .filter(|f| !f.is_empty()),
            ),
        }
    }
}

// ============================================================================
// ConsoleConfig
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub codec: CodecConfig,
    pub taxonomy: TaxonomyConfig,
}

impl ConsoleConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.taxonomy.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            domains = config.codec.domains.len(),
            "loaded console config"
        );
        Ok(config)
    }
}
