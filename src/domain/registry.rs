//! Type registry for discriminator-based reconstruction
//!
//! Every decode path resolves a `Type` string through this registry. Tags that
//! were never registered fail with `DomainError::UnresolvedType`; there is no
//! fallback.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::diagnostics::Diagnostics;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::discriminator;
use crate::domain::geometry::{
    DecodeGeometry, Geometry, LineString2D, MultiPoint2D, Point2D, Polygon2D, TriangleMesh3D,
};
use crate::domain::group::GroupNode;
use crate::domain::node::Node;
use crate::domain::shape_node::ShapeNode;

/// Factory reconstructing a geometry from its map.
pub type GeometryFactory = Box<dyn Fn(&Map<String, Value>) -> DomainResult<Rc<dyn Geometry>>>;

/// Factory reconstructing a node; receives the registry for nested lookups.
pub type NodeFactory =
    Box<dyn Fn(&Map<String, Value>, &TypeRegistry, &mut Diagnostics) -> DomainResult<Node>>;

/// Registry mapping discriminators to reconstruction factories.
///
/// Node tags and geometry tags live in separate namespaces.
pub struct TypeRegistry {
    geometries: HashMap<String, GeometryFactory>,
    nodes: HashMap<String, NodeFactory>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            geometries: HashMap::new(),
            nodes: HashMap::new(),
        }
    }

    /// Registry holding `Group`, `Shape` and the built-in geometry kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_node_factory(GroupNode::TYPE_TAG, |map, registry, diag| {
            GroupNode::decode_with(map, registry, diag).map(Node::Group)
        });
        registry.register_node_factory(ShapeNode::TYPE_TAG, |map, registry, diag| {
            ShapeNode::decode_with(map, registry, diag).map(Node::Shape)
        });
        registry.register_geometry::<Point2D>();
        registry.register_geometry::<MultiPoint2D>();
        registry.register_geometry::<LineString2D>();
        registry.register_geometry::<Polygon2D>();
        registry.register_geometry::<TriangleMesh3D>();
        registry
    }

    /// Registers a geometry kind under its `TYPE_TAG`.
    pub fn register_geometry<G: DecodeGeometry>(&mut self) {
        self.register_geometry_factory(G::TYPE_TAG, |map| {
            G::decode(map).map(|g| Rc::new(g) as Rc<dyn Geometry>)
        });
    }

    /// Registers a geometry kind with a custom factory.
    pub fn register_geometry_factory<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn(&Map<String, Value>) -> DomainResult<Rc<dyn Geometry>> + 'static,
    {
        self.geometries.insert(tag.to_string(), Box::new(factory));
    }

    pub fn register_node_factory<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn(&Map<String, Value>, &TypeRegistry, &mut Diagnostics) -> DomainResult<Node> + 'static,
    {
        self.nodes.insert(tag.to_string(), Box::new(factory));
    }

    /// Reconstructs a geometry from a map carrying its `Type`.
    #[instrument(level = "trace", skip(self, map))]
    pub fn decode_geometry(&self, map: &Map<String, Value>) -> DomainResult<Rc<dyn Geometry>> {
        let tag = discriminator(map, "geometry")?;
        let factory = self
            .geometries
            .get(tag)
            .ok_or_else(|| DomainError::UnresolvedType(tag.to_string()))?;
        debug!("decode_geometry: {}", tag);
        factory(map)
    }

    /// Reconstructs a node from a map carrying its `Type`.
    #[instrument(level = "trace", skip(self, map, diag))]
    pub fn decode_node(
        &self,
        map: &Map<String, Value>,
        diag: &mut Diagnostics,
    ) -> DomainResult<Node> {
        let tag = discriminator(map, "node")?;
        let factory = self
            .nodes
            .get(tag)
            .ok_or_else(|| DomainError::UnresolvedType(tag.to_string()))?;
        debug!("decode_node: {}", tag);
        factory(map, self, diag)
    }

    pub fn contains_geometry(&self, tag: &str) -> bool {
        self.geometries.contains_key(tag)
    }

    pub fn contains_node(&self, tag: &str) -> bool {
        self.nodes.contains_key(tag)
    }

    /// Returns an iterator over all registered tags, nodes and geometries alike.
    pub fn registered_types(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .keys()
            .chain(self.geometries.keys())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.geometries.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes: Vec<_> = self.nodes.keys().collect();
        let mut geometries: Vec<_> = self.geometries.keys().collect();
        nodes.sort();
        geometries.sort();
        f.debug_struct("TypeRegistry")
            .field("nodes", &nodes)
            .field("geometries", &geometries)
            .finish()
    }
}
