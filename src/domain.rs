//! One field codec per content domain.
//!
//! The console keeps separate keys for placement content, study materials,
//! and user records. `DomainCodecs` turns the configured keys into codecs
//! once at startup; a domain whose key is missing or unusable still gets a
//! codec, one that passes values through and reports why.

use std::collections::BTreeMap;

use campus_crypto::{CryptoError, EncryptionKey, FieldCodec};
use tracing::{info, warn};

use crate::config::{CodecConfig, DomainKeyConfig};
use crate::error::{ConsoleError, Result};
use crate::record::RecordTranscoder;

pub const PLACEMENT: &str = "placement";
pub const MATERIALS: &str = "materials";
pub const USERS: &str = "users";

/// Domains configured when nothing else is specified.
pub const DEFAULT_DOMAINS: &[&str] = &[PLACEMENT, MATERIALS, USERS];

/// Immutable registry of per-domain codecs. `Send + Sync`; share it behind
/// an `Arc`.
#[derive(Debug, Default)]
pub struct DomainCodecs {
    codecs: BTreeMap<String, FieldCodec>,
}

impl DomainCodecs {
    /// Build every configured domain. Never fails: problems are logged and
    /// the domain falls back to an unkeyed codec.
    pub fn from_config(config: &CodecConfig) -> Self {
        let codecs = config
            .domains
            .iter()
            .map(|(name, domain)| (name.clone(), build_codec(name, domain)))
            .collect::<BTreeMap<_, _>>();
        let keyed = codecs.values().filter(|c| c.is_keyed()).count();
        info!(domains = codecs.len(), keyed, "initialized field codecs");
        Self { codecs }
    }

    /// Add or replace one domain's codec.
    pub fn insert(&mut self, codec: FieldCodec) {
        self.codecs.insert(codec.label().to_string(), codec);
    }

    pub fn codec(&self, domain: &str) -> Result<&FieldCodec> {
        self.codecs
            .get(domain)
            .ok_or_else(|| ConsoleError::UnknownDomain(domain.to_string()))
    }

    pub fn transcoder(&self, domain: &str) -> Result<RecordTranscoder<'_>> {
        self.codec(domain).map(RecordTranscoder::new)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    /// Domains whose codec has no usable key.
    pub fn unkeyed_domains(&self) -> impl Iterator<Item = &str> {
        self.codecs
            .values()
            .filter(|c| !c.is_keyed())
            .map(FieldCodec::label)
    }
}

fn build_codec(name: &str, domain: &DomainKeyConfig) -> FieldCodec {
    let built = domain
        .key
        .as_deref()
        .ok_or_else(|| CryptoError::MissingKey(name.to_string()))
        .and_then(|text| EncryptionKey::parse(text, domain.encoding))
        .and_then(|key| FieldCodec::new(name, domain.scheme, &key, domain.accept_legacy));

    match built {
        Ok(codec) => codec,
        Err(error) => {
            warn!(domain = name, %error, "field codec unavailable, values will pass through");
            FieldCodec::unkeyed(name, domain.scheme, error)
        }
    }
}
