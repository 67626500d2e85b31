//! Data layer for the content console: per-domain field encryption,
//! record transcoding, and the category taxonomy behind the pickers.

pub mod config;
pub mod domain;
pub mod error;
pub mod record;
pub mod taxonomy;

pub use campus_crypto::{
    CodecOutcome, CodecScheme, CryptoError, EncryptionKey, FieldCodec, KeyEncoding,
};
pub use config::{CodecConfig, ConsoleConfig, DomainKeyConfig, TaxonomyConfig};
pub use domain::DomainCodecs;
pub use error::{ConsoleError, Result};
pub use record::{DegradedField, EncryptedFields, Record, RecordTranscoder, TranscodedRecord};
pub use taxonomy::{SelectOption, TaxonomyNode, TaxonomyOptions, TaxonomyPath, TaxonomyTree};
