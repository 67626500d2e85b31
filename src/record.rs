//! Encrypt-on-write / decrypt-on-read over flat content records.
//!
//! Only the fields a call site declares are touched. String values are run
//! through the domain codec; arrays are handled element by element; every
//! other JSON type and every undeclared field passes through as-is.

use std::collections::BTreeSet;

use campus_crypto::{CodecOutcome, CryptoError, FieldCodec};
use serde_json::{Map, Value};

/// A flat record as read from or written to the document store.
pub type Record = Map<String, Value>;

/// Field names a call site stores encrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptedFields(BTreeSet<String>);

impl EncryptedFields {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EncryptedFields {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A value the codec could not convert. The record holds the original
/// string at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedField {
    pub field: String,
    /// Element index for list fields.
    pub index: Option<usize>,
    pub error: CryptoError,
}

/// Output of a transcoding pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodedRecord {
    pub record: Record,
    pub degraded: Vec<DegradedField>,
}

impl TranscodedRecord {
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    /// Whether `field` (any element of it, for lists) failed to convert.
    pub fn is_degraded(&self, field: &str) -> bool {
        self.degraded.iter().any(|d| d.field == field)
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encode,
    Decode,
}

/// Applies one domain's codec across records.
#[derive(Debug, Clone, Copy)]
pub struct RecordTranscoder<'a> {
    codec: &'a FieldCodec,
}

impl<'a> RecordTranscoder<'a> {
    pub fn new(codec: &'a FieldCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &FieldCodec {
        self.codec
    }

    /// Encrypt the declared fields before persisting.
    pub fn encode_for_write(&self, record: &Record, fields: &EncryptedFields) -> TranscodedRecord {
        self.transcode(record, fields, Direction::Encode)
    }

    /// Decrypt the declared fields after fetching.
    pub fn decode_for_read(&self, record: &Record, fields: &EncryptedFields) -> TranscodedRecord {
        self.transcode(record, fields, Direction::Decode)
    }

    /// Decrypt every record of a listing keyed by record id. Entries that are
    /// not objects are skipped.
    pub fn decode_entries(
        &self,
        entries: &Map<String, Value>,
        fields: &EncryptedFields,
    ) -> Vec<(String, TranscodedRecord)> {
        entries
            .iter()
            .filter_map(|(id, value)| {
                value
                    .as_object()
                    .map(|record| (id.clone(), self.decode_for_read(record, fields)))
            })
            .collect()
    }

    fn transcode(
        &self,
        record: &Record,
        fields: &EncryptedFields,
        direction: Direction,
    ) -> TranscodedRecord {
        let mut degraded = Vec::new();
        let out = record
            .iter()
            .map(|(name, value)| {
                let value = if fields.contains(name) {
                    self.transcode_value(name, value, direction, &mut degraded)
                } else {
                    value.clone()
                };
                (name.clone(), value)
            })
            .collect();
        TranscodedRecord {
            record: out,
            degraded,
        }
    }

    fn transcode_value(
        &self,
        name: &str,
        value: &Value,
        direction: Direction,
        degraded: &mut Vec<DegradedField>,
    ) -> Value {
        match value {
            Value::String(s) => Value::String(self.apply(name, None, s, direction, degraded)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::String(s) => {
                            Value::String(self.apply(name, Some(i), s, direction, degraded))
                        }
                        other => other.clone(),
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn apply(
        &self,
        name: &str,
        index: Option<usize>,
        input: &str,
        direction: Direction,
        degraded: &mut Vec<DegradedField>,
    ) -> String {
        let outcome = match direction {
            Direction::Encode => self.codec.encrypt(input),
            Direction::Decode => self.codec.decrypt(input),
        };
        match outcome {
            CodecOutcome::Converted(v) => v,
            CodecOutcome::Unchanged { input, error } => {
                degraded.push(DegradedField {
                    field: name.to_string(),
                    index,
                    error,
                });
                input
            }
        }
    }
}
