//! Record and attribute-value data model for exported table rows.
//!
//! A [`Record`] is one exported row: a mapping from attribute name to a
//! tagged [`AttributeValue`] matching the DynamoDB wire shape. The serde
//! representation is the externally-tagged form, so a serialized record is
//! self-describing JSON (`{"id":{"S":"abc"},"count":{"N":"3"}}`) and
//! round-trips without loss.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single typed attribute value.
///
/// Numeric values (`N`/`NS`) are carried as strings, as on the wire, so no
/// precision is lost for numbers wider than f64. Binary values (`B`/`BS`)
/// are base64-encoded in the line format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// UTF-8 string
    S(String),
    /// Numeric string
    N(String),
    /// Binary, base64 on the wire
    #[serde(with = "b64")]
    B(Vec<u8>),
    /// Boolean
    #[serde(rename = "BOOL")]
    Bool(bool),
    /// Null marker (the payload is always `true` on the wire)
    #[serde(rename = "NULL")]
    Null(bool),
    /// String set
    #[serde(rename = "SS")]
    StringSet(Vec<String>),
    /// Numeric-string set
    #[serde(rename = "NS")]
    NumberSet(Vec<String>),
    /// Binary set, each element base64 on the wire
    #[serde(rename = "BS", with = "b64_seq")]
    BinarySet(Vec<Vec<u8>>),
    /// List of nested values
    L(Vec<AttributeValue>),
    /// Map of nested values
    M(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// String payload if this value carries the `S` tag.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric-string payload if this value carries the `N` tag.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }
}

/// One exported row: attribute name -> tagged value.
///
/// Attribute names are unique; insertion with an existing name overwrites
/// (last-write-wins). Iteration and serialization order is sorted by name,
/// which keeps the line format deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    attributes: BTreeMap<String, AttributeValue>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Insert or overwrite an attribute, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) -> Option<AttributeValue> {
        self.attributes.insert(name.into(), value)
    }

    /// Number of attributes in the record.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate attributes in deterministic (name-sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize this record to its single-line UTF-8 representation.
    ///
    /// The returned bytes do not include the trailing newline; the writer
    /// appends it so line termination stays in one place.
    pub fn to_line(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a record back from one line of the export format.
    pub fn from_line(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

impl FromIterator<(String, AttributeValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(&encoded).map_err(serde::de::Error::custom)
    }
}

mod b64_seq {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        items
            .iter()
            .map(|bytes| STANDARD.encode(bytes))
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded = Vec::<String>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|s| STANDARD.decode(&s).map_err(serde::de::Error::custom))
            .collect()
    }
}
