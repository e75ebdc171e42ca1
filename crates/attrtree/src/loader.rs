//! Document loading
//!
//! Decodes JSON or YAML documents into plain values and wraps them into
//! trees. The document root must be a mapping.

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;

use crate::error::LoadError;
use crate::node::AttrNode;
use crate::value::ValueKind;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON documents (`.json`)
    Json,
    /// YAML documents (`.yaml`, `.yml`)
    Yaml,
}

impl Format {
    /// Supported file extensions (without dot)
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Detect format from file extension, ignoring case
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Json, Self::Yaml]
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// Decode a document into a plain value
    ///
    /// Blank YAML input decodes to an empty mapping.
    ///
    /// # Errors
    /// Returns error if the content is not valid in this format
    pub fn parse(self, content: &str) -> Result<JsonValue, LoadError> {
        match self {
            Self::Json => Ok(serde_json::from_str(content)?),
            Self::Yaml if content.trim().is_empty() => Ok(JsonValue::Object(serde_json::Map::new())),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Loader configuration
///
/// # Examples
/// ```no_run
/// # use attrtree::{Format, LoadOptions};
/// let configs = LoadOptions::new()
///     .with_format(Format::Yaml)
///     .read_only(true)
///     .load("settings.conf")?;
/// assert!(configs.is_read_only());
/// # Ok::<(), attrtree::LoadError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    format: Option<Format>,
    read_only: bool,
}

impl LoadOptions {
    /// Detect format from the extension, produce a mutable tree
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a format regardless of the file extension
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Convert the loaded tree to read-only before returning it
    #[inline]
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Configured format override
    #[inline]
    #[must_use]
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    /// Load a document from disk
    ///
    /// # Errors
    /// - [`LoadError::UnsupportedFormat`] if no format is set and the
    ///   extension is unknown
    /// - [`LoadError::Io`] if the file cannot be read
    /// - parse errors and [`LoadError::NotAMapping`] as in
    ///   [`LoadOptions::load_str`]
    pub fn load(&self, path: impl AsRef<Path>) -> Result<AttrNode, LoadError> {
        let path = path.as_ref();
        let format = self
            .format
            .or_else(|| Format::from_path(path))
            .ok_or_else(|| LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        tracing::debug!(path = %path.display(), ?format, "loading document");
        let content = fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
        self.load_str(&content, format)
    }

    /// Load a document from a string
    ///
    /// A null root (`null` in JSON, `~` in YAML) loads as an empty tree.
    ///
    /// # Errors
    /// - [`LoadError::InvalidJson`] / [`LoadError::InvalidYaml`] on syntax errors
    /// - [`LoadError::NotAMapping`] if the root is a scalar or sequence
    pub fn load_str(&self, content: &str, format: Format) -> Result<AttrNode, LoadError> {
        let node = match format.parse(content)? {
            JsonValue::Object(map) => AttrNode::from(map),
            JsonValue::Null => AttrNode::new(),
            other => {
                return Err(LoadError::NotAMapping {
                    found: ValueKind::of_plain(&other),
                })
            }
        };
        Ok(node.into_state(self.read_only))
    }
}

impl AttrNode {
    /// Parse a JSON document into a mutable tree
    ///
    /// # Errors
    /// Returns error if JSON is invalid or the root is not a mapping
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        LoadOptions::new().load_str(json, Format::Json)
    }

    /// Parse a YAML document into a mutable tree
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the root is not a mapping
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LoadError> {
        LoadOptions::new().load_str(yaml, Format::Yaml)
    }

    /// Load a `.json`, `.yaml` or `.yml` file into a mutable tree
    ///
    /// # Errors
    /// See [`LoadOptions::load`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        LoadOptions::new().load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.YAML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("b.toml")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn json_str_loads_mutable_tree() {
        let tree = AttrNode::from_json_str(r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
        assert!(tree.is_modifiable());
        assert_eq!(tree.to_plain(), json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn yaml_str_loads_nested_sequences() {
        let yaml = "
language: [python, cpp, java]
value: [[one, two]]
structure:
  tree: [left tree, right tree]
";
        let tree = AttrNode::from_yaml_str(yaml).unwrap();
        assert_eq!(
            tree.to_plain(),
            json!({
                "language": ["python", "cpp", "java"],
                "value": [["one", "two"]],
                "structure": {"tree": ["left tree", "right tree"]}
            })
        );
    }

    #[test]
    fn blank_yaml_is_empty_tree() {
        assert!(AttrNode::from_yaml_str("").unwrap().is_empty());
        assert!(AttrNode::from_yaml_str("  \n").unwrap().is_empty());
        assert!(AttrNode::from_yaml_str("~").unwrap().is_empty());
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = AttrNode::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(
            err,
            LoadError::NotAMapping {
                found: ValueKind::Sequence
            }
        ));
    }

    #[test]
    fn invalid_documents() {
        assert!(matches!(
            AttrNode::from_json_str("not valid json"),
            Err(LoadError::InvalidJson(_))
        ));
        assert!(matches!(
            AttrNode::from_yaml_str("a: [unclosed"),
            Err(LoadError::InvalidYaml(_))
        ));
    }

    #[test]
    fn read_only_option_protects_tree() {
        let mut tree = LoadOptions::new()
            .read_only(true)
            .load_str(r#"{"a": {"b": 1}}"#, Format::Json)
            .unwrap();
        assert!(tree.is_read_only());
        assert!(tree.child("a").unwrap().is_read_only());
        assert!(tree.set("a", 2).unwrap_err().is_mutation_rejected());
    }

    #[test]
    fn unknown_extension_without_override() {
        let err = LoadOptions::new().load("settings.conf").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn options_builder() {
        let options = LoadOptions::new().with_format(Format::Json);
        assert_eq!(options.format(), Some(Format::Json));
        assert_eq!(LoadOptions::new().format(), None);
    }
}
