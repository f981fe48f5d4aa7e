//! Flat shape value from before the node tree
//!
//! Older files store shapes as a flat `{Geometry, Style, Name, Visible}`
//! record. Reading accepts both PascalCase and lowercase field names; writing
//! always uses PascalCase. The value is not a tree node and only converts into
//! a `ShapeNode`.

use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::domain::diagnostics::Diagnostics;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::{normalize_fields, read_bool, read_object, read_string};
use crate::domain::geometry::Geometry;
use crate::domain::node::SceneNode;
use crate::domain::registry::TypeRegistry;
use crate::domain::shape_node::{encode_geometry, ShapeNode};
use crate::domain::style::Style;

const COMPONENT: &str = "Shape";
const FIELDS: [&str; 4] = ["Geometry", "Style", "Name", "Visible"];

#[derive(Debug, Clone)]
pub struct Shape {
    pub geometry: Rc<dyn Geometry>,
    pub style: Style,
    pub name: String,
    pub visible: bool,
}

impl Shape {
    /// Same default-style policy as `ShapeNode::new`.
    pub fn new(geometry: Rc<dyn Geometry>) -> Self {
        let style = Style::for_geometry(geometry.as_ref());
        Self {
            geometry,
            style,
            name: String::new(),
            visible: true,
        }
    }

    pub fn with_style(geometry: Rc<dyn Geometry>, style: Style) -> Self {
        Self {
            style,
            ..Self::new(geometry)
        }
    }

    /// PascalCase fields; defaults omitted. No node discriminator is written.
    pub fn encode(&self) -> Map<String, Value> {
        self.encode_with(&mut Diagnostics::new())
    }

    pub fn encode_with(&self, diag: &mut Diagnostics) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "Geometry".to_string(),
            Value::Object(encode_geometry(self.geometry.as_ref(), diag)),
        );
        if self.style != Style::for_geometry(self.geometry.as_ref()) {
            map.insert("Style".to_string(), Value::Object(self.style.encode()));
        }
        if !self.name.is_empty() {
            map.insert("Name".to_string(), Value::from(self.name.as_str()));
        }
        if !self.visible {
            map.insert("Visible".to_string(), Value::from(false));
        }
        map
    }

    pub fn decode(map: &Map<String, Value>, registry: &TypeRegistry) -> DomainResult<Self> {
        Self::decode_with(map, registry, &mut Diagnostics::new())
    }

    /// Accepts `Geometry`/`geometry`, `Style`/`style`, `Name`/`name` and
    /// `Visible`/`visible`; a top-level `Type` is ignored.
    #[instrument(level = "debug", skip_all)]
    pub fn decode_with(
        map: &Map<String, Value>,
        registry: &TypeRegistry,
        diag: &mut Diagnostics,
    ) -> DomainResult<Self> {
        let map = normalize_fields(map, &FIELDS, COMPONENT, diag);
        let geometry_map = read_object(&map, "Geometry")?
            .ok_or_else(|| DomainError::invalid_field("Geometry", "required field is missing"))?;
        let mut shape = Self::new(registry.decode_geometry(geometry_map)?);
        if let Some(style) = read_object(&map, "Style")? {
            shape.style = Style::decode_with(style, diag)?;
        }
        if let Some(name) = read_string(&map, "Name")? {
            shape.name = name;
        }
        if let Some(visible) = read_bool(&map, "Visible")? {
            shape.visible = visible;
        }
        Ok(shape)
    }
}

/// Copy-construction from a legacy value: geometry aliased, style cloned.
impl From<&Shape> for ShapeNode {
    fn from(shape: &Shape) -> Self {
        let mut node = ShapeNode::with_style(Rc::clone(&shape.geometry), shape.style.clone());
        node.set_name(&shape.name);
        node.set_visible(shape.visible);
        node
    }
}

impl From<Shape> for ShapeNode {
    fn from(shape: Shape) -> Self {
        ShapeNode::from(&shape)
    }
}
