//! Composite node owning an ordered list of children.

use std::any::Any;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::diagnostics::Diagnostics;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::check_fields;
use crate::domain::geometry::{BoundingBox, DrawHandle, Transform};
use crate::domain::node::{Node, NodeMeta, SceneNode};
use crate::domain::registry::TypeRegistry;
use crate::domain::shape_node::ShapeNode;

const CHILDREN: &str = "Children";
const FIELDS: [&str; 3] = ["Name", "Visible", CHILDREN];

/// Children are append-only; their order is the draw order and dump order.
#[derive(Debug, Clone, Default)]
pub struct GroupNode {
    meta: NodeMeta,
    children: Vec<Node>,
}

impl GroupNode {
    pub const TYPE_TAG: &'static str = "Group";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: &str) -> Self {
        let mut group = Self::new();
        group.meta.name = name.to_string();
        group
    }

    /// Appends a child, keeping insertion order.
    #[instrument(level = "trace", skip_all)]
    pub fn add(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Appends a dynamically typed child.
    ///
    /// Accepts `Node`, `GroupNode` or `ShapeNode`; anything else is an argument
    /// error and leaves the children untouched.
    pub fn try_add(&mut self, value: Box<dyn Any>) -> DomainResult<()> {
        let node = match value.downcast::<Node>() {
            Ok(node) => *node,
            Err(value) => match value.downcast::<GroupNode>() {
                Ok(group) => Node::Group(*group),
                Err(value) => match value.downcast::<ShapeNode>() {
                    Ok(shape) => Node::Shape(*shape),
                    Err(_) => {
                        return Err(DomainError::argument(
                            "GroupNode::add expects a scene node",
                        ))
                    }
                },
            },
        };
        self.add(node);
        Ok(())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn decode(map: &Map<String, Value>, registry: &TypeRegistry) -> DomainResult<Self> {
        Self::decode_with(map, registry, &mut Diagnostics::new())
    }

    /// Rebuilds the group, decoding each child through the registry in order.
    #[instrument(level = "debug", skip_all)]
    pub fn decode_with(
        map: &Map<String, Value>,
        registry: &TypeRegistry,
        diag: &mut Diagnostics,
    ) -> DomainResult<Self> {
        check_fields(map, &FIELDS, "Group", diag);
        let mut group = Self {
            meta: NodeMeta::decode(map)?,
            children: Vec::new(),
        };
        match map.get(CHILDREN) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    let child = item.as_object().ok_or_else(|| {
                        DomainError::invalid_field(CHILDREN, format!("entry {} is not an object", i))
                    })?;
                    group.add(registry.decode_node(child, diag)?);
                }
            }
            Some(other) => {
                return Err(DomainError::invalid_field(
                    CHILDREN,
                    format!("expected an array, got {}", other),
                ))
            }
        }
        debug!("decoded group with {} children", group.len());
        Ok(group)
    }
}

impl SceneNode for GroupNode {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind_name(&self) -> &'static str {
        Self::TYPE_TAG
    }

    /// A group without children is a leaf.
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Union of the children's boxes; an empty group yields `BoundingBox::empty()`.
    fn bounding_box(&self) -> DomainResult<BoundingBox> {
        self.children
            .iter()
            .try_fold(BoundingBox::empty(), |acc, child| {
                Ok(acc.union(&child.bounding_box()?))
            })
    }

    fn transform(&self, transform: &Transform) -> Node {
        Node::Group(Self {
            meta: self.meta.clone(),
            children: self
                .children
                .iter()
                .map(|child| child.transform(transform))
                .collect(),
        })
    }

    fn draw(&self) -> Vec<DrawHandle> {
        if !self.meta.visible {
            return Vec::new();
        }
        self.children.iter().flat_map(|child| child.draw()).collect()
    }

    fn label(&self) -> String {
        self.meta.decorate(format!("[{}]", Self::TYPE_TAG))
    }

    fn write_tree(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&self.label());
        out.push('\n');
        for child in &self.children {
            child.write_tree(depth + 1, out);
        }
    }

    fn encode_with(&self, diag: &mut Diagnostics) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("Type".to_string(), Value::from(Self::TYPE_TAG));
        self.meta.encode_into(&mut map);
        if !self.children.is_empty() {
            let children = self
                .children
                .iter()
                .map(|child| Value::Object(child.encode_with(diag)))
                .collect();
            map.insert(CHILDREN.to_string(), Value::Array(children));
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_group_is_leaf_with_empty_box() {
        let group = GroupNode::new();
        assert!(group.is_leaf());
        assert!(group.bounding_box().unwrap().is_empty());
    }

    #[test]
    fn test_try_add_rejects_plain_number() {
        let mut group = GroupNode::new();
        group.add(GroupNode::with_name("inner"));

        let err = group.try_add(Box::new(42_i32)).unwrap_err();

        assert!(matches!(err, DomainError::Argument { .. }));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_try_add_accepts_nodes() {
        let mut group = GroupNode::new();
        group.try_add(Box::new(GroupNode::new())).unwrap();
        group.try_add(Box::new(Node::Group(GroupNode::new()))).unwrap();
        assert_eq!(group.len(), 2);
        assert!(!group.is_leaf());
    }

    #[test]
    fn test_print_tree_indents_children() {
        let mut inner = GroupNode::with_name("inner");
        inner.add(GroupNode::new());
        let mut root = GroupNode::new();
        root.add(inner);

        assert_eq!(
            root.print_tree(0),
            "[Group]\n  [Group] \"inner\"\n    [Group]\n"
        );
    }
}
