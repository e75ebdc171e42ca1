//! Attribute nodes
//!
//! [`AttrNode`] is one level of a wrapped configuration tree. It stores
//! attributes in insertion order, creates empty children on first access
//! while mutable, and refuses every write once converted to read-only.
//!
//! # State
//!
//! Each node carries its own `read_only` flag. [`AttrNode::convert_state`]
//! walks the whole subtree, including nodes inside sequences, so a tree is
//! always protected all-or-nothing.

use std::ops::Index;

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::error::{AttrError, AttrResult, Mutation};
use crate::handle::NodeMut;
use crate::path::AttrPath;
use crate::value::{AttrValue, ValueKind};

/// Node of a wrapped configuration tree
///
/// # Examples
/// ```
/// # use attrtree::AttrNode;
/// # use serde_json::json;
/// let mut tree = AttrNode::new();
/// tree.child("x")?.child("y")?.set("z", "deep")?;
/// assert_eq!(tree.to_plain(), json!({"x": {"y": {"z": "deep"}}}));
///
/// tree.convert_to_read_only();
/// assert!(tree.set("w", 1).unwrap_err().is_mutation_rejected());
/// # Ok::<(), attrtree::AttrError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttrNode {
    entries: IndexMap<String, AttrValue>,
    read_only: bool,
}

impl AttrNode {
    /// Create an empty, mutable node
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mutable tree from a borrowed plain mapping
    ///
    /// The caller's mapping is left untouched and shares no container
    /// with the result.
    #[must_use]
    pub fn from_map(source: &Map<String, JsonValue>) -> Self {
        source
            .iter()
            .map(|(key, value)| (key.clone(), AttrValue::from_plain(value)))
            .collect()
    }

    /// Build a mutable tree from a plain value whose root is a mapping
    ///
    /// # Errors
    /// Returns [`AttrError::NotAMapping`] for any other root
    pub fn from_plain(source: &JsonValue) -> AttrResult<Self> {
        match source {
            JsonValue::Object(map) => Ok(Self::from_map(map)),
            other => Err(AttrError::NotAMapping {
                found: ValueKind::of_plain(other),
            }),
        }
    }

    /// Check if the node refuses writes
    #[inline]
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Check if the node accepts writes
    #[inline]
    #[must_use]
    pub fn is_modifiable(&self) -> bool {
        !self.read_only
    }

    /// Number of attributes at this level
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the node has no attributes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an attribute is stored under `name`
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Attribute names at this level, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Attribute values at this level, in insertion order
    pub fn values(&self) -> impl Iterator<Item = &AttrValue> {
        self.entries.values()
    }

    /// Name/value pairs at this level, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Look up a stored attribute without creating anything
    ///
    /// This is the key-based path: it never auto-vivifies and works the same
    /// on mutable and read-only nodes.
    ///
    /// # Errors
    /// Returns [`AttrError::AttributeLookup`] if `name` is absent
    pub fn get(&self, name: &str) -> AttrResult<&AttrValue> {
        self.entries.get(name).ok_or_else(|| AttrError::lookup(name))
    }

    /// Read an attribute, creating an empty child node if it is absent
    ///
    /// # Errors
    /// Returns [`AttrError::AttributeLookup`] if `name` is absent and the
    /// node is read-only; nothing is stored in that case
    pub fn attr(&mut self, name: &str) -> AttrResult<&AttrValue> {
        if !self.entries.contains_key(name) {
            self.vivify(name)?;
        }
        self.get(name)
    }

    /// Navigate to a child node, creating it if it is absent
    ///
    /// Chaining `child` calls is how deep paths are built:
    /// `tree.child("a")?.child("b")?.set("c", 1)?`. The returned handle
    /// writes only through checked operations, so a read-only child stays
    /// read-only.
    ///
    /// # Errors
    /// - [`AttrError::AttributeLookup`] if absent and the node is read-only
    /// - [`AttrError::NotANode`] if the stored value is not a node
    pub fn child(&mut self, name: &str) -> AttrResult<NodeMut<'_>> {
        self.child_node(name).map(NodeMut::new)
    }

    /// Navigate to a node stored inside a sequence attribute
    ///
    /// Never creates anything.
    ///
    /// # Errors
    /// - [`AttrError::AttributeLookup`] if `name` is absent
    /// - [`AttrError::NotASequence`] if `name` does not hold a sequence
    /// - [`AttrError::IndexOutOfRange`] if `index` is past the end
    /// - [`AttrError::NotANode`] if the element is not a node
    pub fn child_at(&mut self, name: &str, index: usize) -> AttrResult<NodeMut<'_>> {
        self.child_node_at(name, index).map(NodeMut::new)
    }

    /// Checked write handle to this node
    ///
    /// Useful for code that walks a tree through [`NodeMut`] alone.
    #[inline]
    pub fn handle(&mut self) -> NodeMut<'_> {
        NodeMut::new(self)
    }

    pub(crate) fn child_node(&mut self, name: &str) -> AttrResult<&mut AttrNode> {
        if !self.entries.contains_key(name) {
            self.vivify(name)?;
        }
        match self.entries.get_mut(name) {
            Some(AttrValue::Node(node)) => Ok(node),
            Some(other) => Err(AttrError::NotANode {
                name: name.to_string(),
                found: other.kind(),
            }),
            None => Err(AttrError::lookup(name)),
        }
    }

    pub(crate) fn child_node_at(&mut self, name: &str, index: usize) -> AttrResult<&mut AttrNode> {
        let value = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AttrError::lookup(name))?;
        let found = value.kind();
        let AttrValue::Sequence(items) = value else {
            return Err(AttrError::NotASequence {
                name: name.to_string(),
                found,
            });
        };
        let len = items.len();
        match items.get_mut(index) {
            Some(AttrValue::Node(node)) => Ok(node),
            Some(other) => Err(AttrError::NotANode {
                name: format!("{name}[{index}]"),
                found: other.kind(),
            }),
            None => Err(AttrError::IndexOutOfRange {
                name: name.to_string(),
                index,
                len,
            }),
        }
    }

    /// Store a value, replacing any previous one
    ///
    /// Plain mappings are wrapped into nodes and every node inside `value`
    /// adopts this node's state. Returns the replaced value, if any.
    ///
    /// # Errors
    /// Returns [`AttrError::MutationRejected`] if the node is read-only;
    /// the node is left unchanged
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> AttrResult<Option<AttrValue>> {
        let name = name.into();
        if self.read_only {
            let op = if self.entries.contains_key(&name) {
                Mutation::Overwrite
            } else {
                Mutation::Create
            };
            tracing::debug!(%name, %op, "rejected write to read-only node");
            return Err(AttrError::rejected(name, op));
        }
        let mut value = value.into();
        value.apply_state(self.read_only);
        Ok(self.entries.insert(name, value))
    }

    /// Remove an attribute and return its value
    ///
    /// Remaining attributes keep their order.
    ///
    /// # Errors
    /// - [`AttrError::MutationRejected`] if the node is read-only
    /// - [`AttrError::AttributeLookup`] if `name` is absent
    pub fn delete(&mut self, name: &str) -> AttrResult<AttrValue> {
        if self.read_only {
            tracing::debug!(name, "rejected delete on read-only node");
            return Err(AttrError::rejected(name, Mutation::Delete));
        }
        self.entries
            .shift_remove(name)
            .ok_or_else(|| AttrError::lookup(name))
    }

    /// Look up a nested attribute by dotted path, without creating anything
    ///
    /// # Errors
    /// - [`AttrError::InvalidPath`] if the path does not parse
    /// - [`AttrError::AttributeLookup`] if a segment is absent
    /// - [`AttrError::NotANode`] if an intermediate value is not a node
    pub fn get_path<P>(&self, path: P) -> AttrResult<&AttrValue>
    where
        P: TryInto<AttrPath>,
        AttrError: From<P::Error>,
    {
        let path = path.try_into()?;
        let (parents, last) = path.split_last();
        let mut current = self;
        for segment in parents {
            current = match current.get(segment)? {
                AttrValue::Node(node) => node,
                other => {
                    return Err(AttrError::NotANode {
                        name: segment.clone(),
                        found: other.kind(),
                    })
                }
            };
        }
        current.get(last)
    }

    /// Store a value at a dotted path, creating intermediate nodes
    ///
    /// Equivalent to chaining [`AttrNode::child`] over the parent segments
    /// and calling [`AttrNode::set`] on the last one.
    ///
    /// # Errors
    /// Same as [`AttrNode::child`] and [`AttrNode::set`], plus
    /// [`AttrError::InvalidPath`]
    pub fn set_path<P>(
        &mut self,
        path: P,
        value: impl Into<AttrValue>,
    ) -> AttrResult<Option<AttrValue>>
    where
        P: TryInto<AttrPath>,
        AttrError: From<P::Error>,
    {
        let path = path.try_into()?;
        let (parents, last) = path.split_last();
        let mut current = self;
        for segment in parents {
            current = current.child_node(segment)?;
        }
        current.set(last, value)
    }

    /// Set the read-only state of this node and every descendant
    ///
    /// Idempotent. Returns `self` so the call can be chained.
    pub fn convert_state(&mut self, read_only: bool) -> &mut Self {
        tracing::debug!(read_only, attributes = self.len(), "converting node state");
        self.apply_state(read_only);
        self
    }

    /// Owned variant of [`AttrNode::convert_state`]
    #[must_use]
    pub fn into_state(mut self, read_only: bool) -> Self {
        self.convert_state(read_only);
        self
    }

    /// Make the whole subtree read-only
    pub fn convert_to_read_only(&mut self) -> &mut Self {
        self.convert_state(true)
    }

    /// Make the whole subtree mutable again
    pub fn convert_to_modifiable(&mut self) -> &mut Self {
        self.convert_state(false)
    }

    /// Convert the tree back into a plain mapping
    ///
    /// Every container in the result is freshly allocated. The node's state
    /// has no influence on the output.
    #[must_use]
    pub fn to_plain_mapping(&self) -> Map<String, JsonValue> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_plain()))
            .collect()
    }

    /// Convert the tree back into a plain JSON object value
    #[inline]
    #[must_use]
    pub fn to_plain(&self) -> JsonValue {
        JsonValue::Object(self.to_plain_mapping())
    }

    pub(crate) fn apply_state(&mut self, read_only: bool) {
        self.read_only = read_only;
        for value in self.entries.values_mut() {
            value.apply_state(read_only);
        }
    }

    fn vivify(&mut self, name: &str) -> AttrResult<()> {
        if self.read_only {
            return Err(AttrError::lookup(name));
        }
        tracing::trace!(name, "auto-vivifying empty child node");
        self.entries
            .insert(name.to_string(), AttrValue::Node(AttrNode::new()));
        Ok(())
    }
}

/// Attributes are compared by value; the read-only flag is not data
impl PartialEq for AttrNode {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<Map<String, JsonValue>> for AttrNode {
    fn from(map: Map<String, JsonValue>) -> Self {
        map.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for AttrNode
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| {
                let mut value = value.into();
                value.apply_state(false);
                (key.into(), value)
            })
            .collect();
        Self {
            entries,
            read_only: false,
        }
    }
}

impl<'a> IntoIterator for &'a AttrNode {
    type Item = (&'a String, &'a AttrValue);
    type IntoIter = indexmap::map::Iter<'a, String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Key-based access
///
/// # Panics
/// Panics if `name` is absent, like indexing a map. Use [`AttrNode::get`]
/// for a fallible lookup.
impl Index<&str> for AttrNode {
    type Output = AttrValue;

    fn index(&self, name: &str) -> &AttrValue {
        match self.entries.get(name) {
            Some(value) => value,
            None => panic!("no such attribute: '{name}'"),
        }
    }
}
