//! Attribute values
//!
//! [`AttrValue`] is what a node stores under each attribute name: a scalar,
//! a sequence, or a child [`AttrNode`]. Plain `serde_json::Value` input is
//! wrapped on the way in so that every mapping, including mappings inside
//! sequences, becomes a node.

use std::fmt::{self, Display, Formatter};

use serde_json::{Number, Value as JsonValue};

use crate::node::AttrNode;

/// Leaf value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    /// Explicit null
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer or float, kept in serde_json's representation
    Number(Number),
    /// UTF-8 string
    String(String),
}

impl Scalar {
    /// Convert back to a plain JSON value
    #[must_use]
    pub fn to_plain(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Number(n) => JsonValue::Number(n.clone()),
            Self::String(s) => JsonValue::String(s.clone()),
        }
    }
}

/// Shape of a value, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Integer or float
    Number,
    /// String
    String,
    /// Ordered sequence
    Sequence,
    /// Mapping (a node, once wrapped)
    Mapping,
}

impl ValueKind {
    /// Shape of a plain JSON value
    #[must_use]
    pub fn of_plain(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(_) => Self::Bool,
            JsonValue::Number(_) => Self::Number,
            JsonValue::String(_) => Self::String,
            JsonValue::Array(_) => Self::Sequence,
            JsonValue::Object(_) => Self::Mapping,
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

/// Value stored under an attribute name
///
/// # Invariants
/// - Every mapping is a [`AttrValue::Node`]; mappings are never stored raw
/// - Sequences may nest, and mappings inside them are nodes as well
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Leaf value
    Scalar(Scalar),
    /// Ordered sequence of values
    Sequence(Vec<AttrValue>),
    /// Child node, exclusively owned by its parent
    Node(AttrNode),
}

impl AttrValue {
    /// Wrap a borrowed plain value without touching the caller's structure
    #[must_use]
    pub fn from_plain(value: &JsonValue) -> Self {
        Self::from(value.clone())
    }

    /// Convert back to a plain JSON value
    ///
    /// The result owns fresh containers at every level.
    #[must_use]
    pub fn to_plain(&self) -> JsonValue {
        match self {
            Self::Scalar(scalar) => scalar.to_plain(),
            Self::Sequence(items) => JsonValue::Array(items.iter().map(Self::to_plain).collect()),
            Self::Node(node) => node.to_plain(),
        }
    }

    /// Shape of this value
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(Scalar::Null) => ValueKind::Null,
            Self::Scalar(Scalar::Bool(_)) => ValueKind::Bool,
            Self::Scalar(Scalar::Number(_)) => ValueKind::Number,
            Self::Scalar(Scalar::String(_)) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Node(_) => ValueKind::Mapping,
        }
    }

    /// Apply a read-only state to every node inside this value
    pub(crate) fn apply_state(&mut self, read_only: bool) {
        match self {
            Self::Scalar(_) => {}
            Self::Sequence(items) => {
                for item in items {
                    item.apply_state(read_only);
                }
            }
            Self::Node(node) => node.apply_state(read_only),
        }
    }

    /// Check if this is a child node
    #[inline]
    #[must_use]
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// Check if this is a null scalar
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Borrow as a child node
    #[inline]
    #[must_use]
    pub fn as_node(&self) -> Option<&AttrNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Borrow as a sequence
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[AttrValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a scalar
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// String contents, if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Number as `i64`, if it fits
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(Scalar::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    /// Number as `u64`, if it fits
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Scalar(Scalar::Number(n)) => n.as_u64(),
            _ => None,
        }
    }

    /// Number as `f64`
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(Scalar::Number(n)) => n.as_f64(),
            _ => None,
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        Self::Scalar(Scalar::Null)
    }
}

impl From<JsonValue> for AttrValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Scalar(Scalar::Null),
            JsonValue::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            JsonValue::Number(n) => Self::Scalar(Scalar::Number(n)),
            JsonValue::String(s) => Self::Scalar(Scalar::String(s)),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => Self::Node(AttrNode::from(map)),
        }
    }
}

impl From<Scalar> for AttrValue {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<AttrNode> for AttrValue {
    fn from(node: AttrNode) -> Self {
        Self::Node(node)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<f64> for AttrValue {
    /// Non-finite floats become null, as in `serde_json`
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(Self::Scalar(Scalar::Null), |n| {
            Self::Scalar(Scalar::Number(n))
        })
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(n: $ty) -> Self {
                    Self::Scalar(Scalar::Number(Number::from(n)))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Scalar(Scalar::Null), Into::into)
    }
}

impl PartialEq<str> for AttrValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for AttrValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

macro_rules! eq_integer {
    ($($ty:ty => $as:ident : $wide:ty),*) => {
        $(
            impl PartialEq<$ty> for AttrValue {
                fn eq(&self, other: &$ty) -> bool {
                    self.$as().is_some_and(|n: $wide| n == <$wide>::from(*other))
                }
            }
        )*
    };
}

eq_integer!(i8 => as_i64: i64, i16 => as_i64: i64, i32 => as_i64: i64, i64 => as_i64: i64);
eq_integer!(u8 => as_u64: u64, u16 => as_u64: u64, u32 => as_u64: u64, u64 => as_u64: u64);

impl PartialEq<isize> for AttrValue {
    fn eq(&self, other: &isize) -> bool {
        i64::try_from(*other).is_ok_and(|wide| self == &wide)
    }
}

impl PartialEq<usize> for AttrValue {
    fn eq(&self, other: &usize) -> bool {
        u64::try_from(*other).is_ok_and(|wide| self == &wide)
    }
}

impl PartialEq<bool> for AttrValue {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
