//! attrtree
//!
//! Attribute-style navigation over nested configuration mappings, with
//! auto-vivification on write paths and tree-wide read-only protection.
//!
//! # Core Concepts
//!
//! - [`AttrNode`]: one level of a wrapped tree, owning its children
//! - [`NodeMut`]: checked write access to a node reached by navigation
//! - [`AttrValue`]: scalar, sequence, or child node stored under a name
//! - [`AttrPath`]: dotted path (`"server.http.port"`) into a tree
//! - [`LoadOptions`]: JSON/YAML loading into trees
//!
//! # Example
//!
//! ```rust
//! use attrtree::AttrNode;
//! use serde_json::json;
//!
//! let mut tree = AttrNode::from_plain(&json!({"a": 1, "b": {"c": 2}}))?;
//! assert_eq!(tree.get_path("b.c")?, &2);
//!
//! tree.child("b")?.set("c", 3)?;
//! tree.convert_to_read_only();
//! assert!(tree.child("b")?.set("c", 4).unwrap_err().is_mutation_rejected());
//!
//! assert_eq!(tree.to_plain(), json!({"a": 1, "b": {"c": 3}}));
//! # Ok::<(), attrtree::AttrError>(())
//! ```
//!
//! # Concurrency
//!
//! Trees are plain owned data. Mutation needs `&mut`, so sharing a tree
//! across threads for reads only is safe; writers must be serialized by the
//! caller.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod handle;
pub mod loader;
pub mod node;
pub mod path;
pub mod render;
pub mod value;

// Re-exports
pub use error::{AttrError, AttrResult, EmitError, LoadError, Mutation};
pub use handle::NodeMut;
pub use loader::{Format, LoadOptions};
pub use node::AttrNode;
pub use path::{AttrPath, PathError};
pub use render::RENDER_HEADER;
pub use value::{AttrValue, Scalar, ValueKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with attribute trees
    pub use crate::error::{AttrError, AttrResult, LoadError};
    pub use crate::handle::NodeMut;
    pub use crate::loader::{Format, LoadOptions};
    pub use crate::node::AttrNode;
    pub use crate::value::{AttrValue, Scalar};
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chained_write_then_freeze() {
        let mut tree = AttrNode::new();
        tree.set_path("x.y.z", "deep").unwrap();
        tree.convert_to_read_only();

        assert_eq!(tree.get_path("x.y.z").unwrap(), "deep");
        assert!(tree.set_path("x.y.z", "other").is_err());
        assert_eq!(tree.to_plain(), json!({"x": {"y": {"z": "deep"}}}));
    }

    #[test]
    fn load_render_and_emit() {
        let tree = AttrNode::from_yaml_str("a: 1\nb:\n  c: two\n").unwrap();
        assert!(tree.to_string().starts_with(RENDER_HEADER));
        let json = tree.to_json_string().unwrap();
        assert_eq!(AttrNode::from_json_str(&json).unwrap(), tree);
    }
}
