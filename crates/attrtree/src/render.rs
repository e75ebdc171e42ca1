//! Emission and human-readable rendering
//!
//! Trees serialize as their plain structure, so any serde format can emit
//! them. [`Display`] renders one attribute per line with one tab of
//! indentation per nesting level. Nothing here mutates the tree.

use std::fmt::{self, Display, Formatter};

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{AttrError, EmitError};
use crate::node::AttrNode;
use crate::value::{AttrValue, Scalar, ValueKind};

/// First line of a rendered tree
pub const RENDER_HEADER: &str = "Object Contains Following Attributes";

impl AttrNode {
    /// Serialize to a pretty-printed JSON string
    ///
    /// # Errors
    /// Returns error if serialization fails (rare for JSON)
    pub fn to_json_string(&self) -> Result<String, EmitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to a YAML string
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_yaml_string(&self) -> Result<String, EmitError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn render_entries(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "\t".repeat(depth);
        for (key, value) in self.iter() {
            match value {
                AttrValue::Node(child) => {
                    write!(f, "\n{indent} {key}:")?;
                    child.render_entries(f, depth + 1)?;
                }
                other => write!(f, "\n{indent} {key}: {other}")?,
            }
        }
        Ok(())
    }
}

impl Display for AttrNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(RENDER_HEADER)?;
        self.render_entries(f, 0)
    }
}

impl Display for AttrValue {
    /// Strings print bare; sequences and nodes print as compact JSON
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(Scalar::String(s)) => f.write_str(s),
            other => write!(f, "{}", other.to_plain()),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for AttrValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for AttrNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttrNode {
    /// Builds a mutable tree; the root must be a mapping
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::Object(map) => Ok(Self::from(map)),
            other => Err(de::Error::custom(AttrError::NotAMapping {
                found: ValueKind::of_plain(&other),
            })),
        }
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from)
    }
}
