//! Node contract shared by every element of the scene tree
//!
//! `Node` is the closed sum of tree elements; `SceneNode` is the capability
//! each variant implements. The legacy flat `Shape` value is not
//! a `SceneNode` and only converts into a `ShapeNode`.

use serde_json::{Map, Value};
use tracing::instrument;

use crate::domain::diagnostics::Diagnostics;
use crate::domain::error::DomainResult;
use crate::domain::fields::{read_bool, read_string};
use crate::domain::geometry::{BoundingBox, DrawHandle, Transform};
use crate::domain::group::GroupNode;
use crate::domain::registry::TypeRegistry;
use crate::domain::shape_node::ShapeNode;

/// Fields every node carries: `Name` (default "") and `Visible` (default true).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMeta {
    pub name: String,
    pub visible: bool,
}

impl Default for NodeMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            visible: true,
        }
    }
}

impl NodeMeta {
    pub const FIELDS: [&'static str; 2] = ["Name", "Visible"];

    /// Writes the non-default fields into `map`.
    pub fn encode_into(&self, map: &mut Map<String, Value>) {
        if !self.name.is_empty() {
            map.insert("Name".to_string(), Value::from(self.name.as_str()));
        }
        if !self.visible {
            map.insert("Visible".to_string(), Value::from(false));
        }
    }

    /// Reads canonical `Name`/`Visible`; absent fields keep their default.
    pub fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        let mut meta = Self::default();
        if let Some(name) = read_string(map, "Name")? {
            meta.name = name;
        }
        if let Some(visible) = read_bool(map, "Visible")? {
            meta.visible = visible;
        }
        Ok(meta)
    }

    /// Appends ` "name"` to a tree label when the name is set.
    pub(crate) fn decorate(&self, label: String) -> String {
        if self.name.is_empty() {
            label
        } else {
            format!("{} \"{}\"", label, self.name)
        }
    }
}

/// Capability implemented by every tree element.
pub trait SceneNode {
    fn meta(&self) -> &NodeMeta;

    fn meta_mut(&mut self) -> &mut NodeMeta;

    /// Discriminator written as `Type`.
    fn kind_name(&self) -> &'static str;

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn set_name(&mut self, name: &str) {
        self.meta_mut().name = name.to_string();
    }

    fn is_visible(&self) -> bool {
        self.meta().visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.meta_mut().visible = visible;
    }

    fn is_leaf(&self) -> bool;

    /// Six extents; z is (0, 0) for planar content.
    fn bounding_box(&self) -> DomainResult<BoundingBox>;

    /// Returns a transformed copy. `self` and its geometry are left unmodified.
    fn transform(&self, transform: &Transform) -> Node;

    /// Draw handles in draw order. Hidden nodes draw nothing.
    fn draw(&self) -> Vec<DrawHandle>;

    /// One-line description used by `print_tree` and tree rendering.
    fn label(&self) -> String;

    fn write_tree(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.label());
        out.push('\n');
    }

    /// Indented text dump, one line per node.
    fn print_tree(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write_tree(depth, &mut out);
        out
    }

    fn encode(&self) -> Map<String, Value> {
        self.encode_with(&mut Diagnostics::new())
    }

    /// Structured encoding with `Type` plus non-default fields.
    fn encode_with(&self, diag: &mut Diagnostics) -> Map<String, Value>;
}

/// Any element of the scene tree.
#[derive(Debug, Clone)]
pub enum Node {
    Group(GroupNode),
    Shape(ShapeNode),
}

impl Node {
    /// Decodes a node with the given registry.
    pub fn decode(map: &Map<String, Value>, registry: &TypeRegistry) -> DomainResult<Self> {
        Self::decode_with(map, registry, &mut Diagnostics::new())
    }

    /// Resolves `Type` through the registry and delegates to the variant.
    #[instrument(level = "debug", skip_all)]
    pub fn decode_with(
        map: &Map<String, Value>,
        registry: &TypeRegistry,
        diag: &mut Diagnostics,
    ) -> DomainResult<Self> {
        registry.decode_node(map, diag)
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Node::Group(group) => Some(group),
            Node::Shape(_) => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeNode> {
        match self {
            Node::Shape(shape) => Some(shape),
            Node::Group(_) => None,
        }
    }

    fn inner(&self) -> &dyn SceneNode {
        match self {
            Node::Group(group) => group,
            Node::Shape(shape) => shape,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SceneNode {
        match self {
            Node::Group(group) => group,
            Node::Shape(shape) => shape,
        }
    }
}

impl SceneNode for Node {
    fn meta(&self) -> &NodeMeta {
        self.inner().meta()
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        self.inner_mut().meta_mut()
    }

    fn kind_name(&self) -> &'static str {
        self.inner().kind_name()
    }

    fn is_leaf(&self) -> bool {
        self.inner().is_leaf()
    }

    fn bounding_box(&self) -> DomainResult<BoundingBox> {
        self.inner().bounding_box()
    }

    fn transform(&self, transform: &Transform) -> Node {
        self.inner().transform(transform)
    }

    fn draw(&self) -> Vec<DrawHandle> {
        self.inner().draw()
    }

    fn label(&self) -> String {
        self.inner().label()
    }

    fn write_tree(&self, depth: usize, out: &mut String) {
        self.inner().write_tree(depth, out);
    }

    fn encode_with(&self, diag: &mut Diagnostics) -> Map<String, Value> {
        self.inner().encode_with(diag)
    }
}

impl From<GroupNode> for Node {
    fn from(group: GroupNode) -> Self {
        Node::Group(group)
    }
}

impl From<ShapeNode> for Node {
    fn from(shape: ShapeNode) -> Self {
        Node::Shape(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_defaults_are_omitted() {
        let mut map = Map::new();
        NodeMeta::default().encode_into(&mut map);
        assert!(map.is_empty());
    }

    #[test]
    fn test_meta_non_defaults_are_written() {
        let meta = NodeMeta {
            name: "roof".into(),
            visible: false,
        };
        let mut map = Map::new();
        meta.encode_into(&mut map);
        assert_eq!(Value::Object(map.clone()), json!({"Name": "roof", "Visible": false}));
        assert_eq!(NodeMeta::decode(&map).unwrap(), meta);
    }
}
