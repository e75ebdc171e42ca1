//! Write handles into a tree
//!
//! Navigating with [`AttrNode::child`] or [`AttrNode::child_at`] yields a
//! [`NodeMut`] instead of `&mut AttrNode`. The handle reads through
//! [`Deref`] and writes only through [`NodeMut::set`] and
//! [`NodeMut::delete`], which honor the node's read-only flag. A borrowed
//! descendant can neither be replaced wholesale nor have its state changed,
//! so protection stays a property of the whole tree.
//!
//! ```compile_fail
//! # use attrtree::AttrNode;
//! # use serde_json::json;
//! let mut tree = AttrNode::from_plain(&json!({"b": {"c": 2}}))?.into_state(true);
//! *tree.child("b")? = AttrNode::new();
//! # Ok::<(), attrtree::AttrError>(())
//! ```
//!
//! ```compile_fail
//! # use attrtree::AttrNode;
//! # use serde_json::json;
//! let mut tree = AttrNode::from_plain(&json!({"b": {"c": 2}}))?.into_state(true);
//! tree.child("b")?.convert_to_modifiable();
//! # Ok::<(), attrtree::AttrError>(())
//! ```

use std::ops::Deref;

use crate::error::{AttrError, AttrResult};
use crate::node::AttrNode;
use crate::path::AttrPath;
use crate::value::AttrValue;

/// Mutable access to one node of a tree, limited to checked writes
///
/// # Examples
/// ```
/// # use attrtree::AttrNode;
/// # use serde_json::json;
/// let mut tree = AttrNode::new();
/// let mut server = tree.child("server")?;
/// server.set("host", "localhost")?;
/// server.child("http")?.set("port", 8080)?;
///
/// assert_eq!(tree.to_plain(), json!({"server": {"host": "localhost", "http": {"port": 8080}}}));
/// # Ok::<(), attrtree::AttrError>(())
/// ```
#[derive(Debug)]
pub struct NodeMut<'a> {
    node: &'a mut AttrNode,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(node: &'a mut AttrNode) -> Self {
        Self { node }
    }

    /// Shorter-lived handle to the same node
    ///
    /// Lets one handle navigate into several children in turn.
    #[inline]
    pub fn reborrow(&mut self) -> NodeMut<'_> {
        NodeMut::new(self.node)
    }

    /// See [`AttrNode::attr`]
    ///
    /// # Errors
    /// Returns [`AttrError::AttributeLookup`] if `name` is absent and the
    /// node is read-only
    pub fn attr(&mut self, name: &str) -> AttrResult<&AttrValue> {
        self.node.attr(name)
    }

    /// Move the handle down to a child node, creating it if absent
    ///
    /// # Errors
    /// See [`AttrNode::child`]
    pub fn child(self, name: &str) -> AttrResult<NodeMut<'a>> {
        self.node.child_node(name).map(NodeMut::new)
    }

    /// Move the handle down to a node stored inside a sequence
    ///
    /// # Errors
    /// See [`AttrNode::child_at`]
    pub fn child_at(self, name: &str, index: usize) -> AttrResult<NodeMut<'a>> {
        self.node.child_node_at(name, index).map(NodeMut::new)
    }

    /// See [`AttrNode::set`]
    ///
    /// # Errors
    /// Returns [`AttrError::MutationRejected`] if the node is read-only
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> AttrResult<Option<AttrValue>> {
        self.node.set(name, value)
    }

    /// See [`AttrNode::delete`]
    ///
    /// # Errors
    /// - [`AttrError::MutationRejected`] if the node is read-only
    /// - [`AttrError::AttributeLookup`] if `name` is absent
    pub fn delete(&mut self, name: &str) -> AttrResult<AttrValue> {
        self.node.delete(name)
    }

    /// See [`AttrNode::set_path`]
    ///
    /// # Errors
    /// Same as [`AttrNode::set_path`]
    pub fn set_path<P>(&mut self, path: P, value: impl Into<AttrValue>) -> AttrResult<Option<AttrValue>>
    where
        P: TryInto<AttrPath>,
        AttrError: From<P::Error>,
    {
        self.node.set_path(path, value)
    }
}

impl Deref for NodeMut<'_> {
    type Target = AttrNode;

    fn deref(&self) -> &AttrNode {
        self.node
    }
}
