//! Leaf node pairing a shared geometry with an owned style.

use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::domain::diagnostics::{Diagnostics, Warning};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::{check_fields, read_object, TYPE_FIELD};
use crate::domain::geometry::{BoundingBox, DrawHandle, Geometry, Transform};
use crate::domain::node::{Node, NodeMeta, SceneNode};
use crate::domain::params::Param;
use crate::domain::registry::TypeRegistry;
use crate::domain::style::Style;

const FIELDS: [&str; 4] = ["Name", "Visible", "Style", "Geometry"];

/// Leaf of the scene tree.
///
/// `Clone` is the copy constructor: the geometry `Rc` is shared with the
/// source, the style is deep-copied, name and visibility are copied.
#[derive(Debug, Clone)]
pub struct ShapeNode {
    meta: NodeMeta,
    geometry: Rc<dyn Geometry>,
    style: Style,
}

impl ShapeNode {
    pub const TYPE_TAG: &'static str = "Shape";

    /// Wraps a geometry with the default style for its class.
    pub fn new(geometry: Rc<dyn Geometry>) -> Self {
        let style = Style::for_geometry(geometry.as_ref());
        Self {
            meta: NodeMeta::default(),
            geometry,
            style,
        }
    }

    pub fn from_geometry<G: Geometry + 'static>(geometry: G) -> Self {
        Self::new(Rc::new(geometry))
    }

    /// An explicit style overrides the class default.
    pub fn with_style(geometry: Rc<dyn Geometry>, style: Style) -> Self {
        Self {
            meta: NodeMeta::default(),
            geometry,
            style,
        }
    }

    /// Builds a node from name/value options `name`, `style` and `visible`.
    ///
    /// Any other option name is an argument error; no node is produced.
    pub fn with_options(geometry: Rc<dyn Geometry>, options: &[(&str, Param)]) -> DomainResult<Self> {
        let mut node = Self::new(geometry);
        for (key, value) in options {
            match key.to_ascii_lowercase().as_str() {
                "name" => node.meta.name = value.as_text(key)?.to_string(),
                "style" => node.style = value.as_style(key)?.clone(),
                "visible" => node.meta.visible = value.as_flag(key)?,
                _ => {
                    return Err(DomainError::argument(format!(
                        "unknown ShapeNode option '{}'",
                        key
                    )))
                }
            }
        }
        Ok(node)
    }

    /// The shared geometry. Cloning the `Rc` aliases it.
    pub fn geometry(&self) -> &Rc<dyn Geometry> {
        &self.geometry
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    pub fn decode(map: &Map<String, Value>, registry: &TypeRegistry) -> DomainResult<Self> {
        Self::decode_with(map, registry, &mut Diagnostics::new())
    }

    /// Field names are canonical only; anything else is reported and ignored.
    #[instrument(level = "debug", skip_all)]
    pub fn decode_with(
        map: &Map<String, Value>,
        registry: &TypeRegistry,
        diag: &mut Diagnostics,
    ) -> DomainResult<Self> {
        check_fields(map, &FIELDS, "Shape", diag);
        let geometry_map = read_object(map, "Geometry")?
            .ok_or_else(|| DomainError::invalid_field("Geometry", "required field is missing"))?;
        let geometry = registry.decode_geometry(geometry_map)?;
        debug!("decoded shape geometry: {}", geometry.kind());

        let mut node = Self::new(geometry);
        node.meta = NodeMeta::decode(map)?;
        if let Some(style) = read_object(map, "Style")? {
            node.style = Style::decode_with(style, diag)?;
        }
        Ok(node)
    }
}

/// Encodes a geometry, guaranteeing a `Type` field.
///
/// Encoders that omit it get one derived from `kind()` and a warning. This
/// only helps when `kind()` matches a registered tag.
pub(crate) fn encode_geometry(geometry: &dyn Geometry, diag: &mut Diagnostics) -> Map<String, Value> {
    let mut map = geometry.encode();
    if !map.contains_key(TYPE_FIELD) {
        diag.push(Warning::InjectedDiscriminator {
            kind: geometry.kind().to_string(),
        });
        map.insert(TYPE_FIELD.to_string(), Value::from(geometry.kind()));
    }
    map
}

impl SceneNode for ShapeNode {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind_name(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn is_leaf(&self) -> bool {
        true
    }

    fn bounding_box(&self) -> DomainResult<BoundingBox> {
        let geometry = self.geometry.as_ref();
        if let Some(planar) = geometry.as_planar() {
            Ok(BoundingBox::from_planar(planar.planar_bounds()))
        } else if let Some(spatial) = geometry.as_spatial() {
            Ok(spatial.spatial_bounds())
        } else {
            Err(DomainError::TypeMismatch {
                expected: "planar or spatial geometry".to_string(),
                actual: geometry.kind().to_string(),
            })
        }
    }

    fn transform(&self, transform: &Transform) -> Node {
        Node::Shape(Self {
            meta: self.meta.clone(),
            geometry: self.geometry.transform(transform),
            style: self.style.clone(),
        })
    }

    fn draw(&self) -> Vec<DrawHandle> {
        if !self.meta.visible {
            return Vec::new();
        }
        vec![self.geometry.draw(&self.style)]
    }

    fn label(&self) -> String {
        self.meta
            .decorate(format!("[{}] {}", Self::TYPE_TAG, self.geometry.kind()))
    }

    /// `Style` is written only when it differs from the default for the geometry.
    fn encode_with(&self, diag: &mut Diagnostics) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(TYPE_FIELD.to_string(), Value::from(Self::TYPE_TAG));
        self.meta.encode_into(&mut map);
        if self.style != Style::for_geometry(self.geometry.as_ref()) {
            map.insert("Style".to_string(), Value::Object(self.style.encode()));
        }
        map.insert(
            "Geometry".to_string(),
            Value::Object(encode_geometry(self.geometry.as_ref(), diag)),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::{Point2D, Polygon2D};

    #[test]
    fn test_with_options_unknown_key_is_fatal() {
        let geometry: Rc<dyn Geometry> = Rc::new(Point2D::new(0.0, 0.0));
        let err = ShapeNode::with_options(geometry, &[("color", "red".into())]).unwrap_err();
        assert!(matches!(err, DomainError::Argument { .. }));
    }

    #[test]
    fn test_with_options_sets_fields() {
        let geometry: Rc<dyn Geometry> = Rc::new(Polygon2D::default());
        let style = Style::mesh_default();
        let node = ShapeNode::with_options(
            geometry,
            &[
                ("Name", "outline".into()),
                ("visible", false.into()),
                ("style", style.clone().into()),
            ],
        )
        .unwrap();

        assert_eq!(node.name(), "outline");
        assert!(!node.is_visible());
        assert_eq!(node.style(), &style);
    }

    #[test]
    fn test_clone_aliases_geometry_and_copies_style() {
        let original = ShapeNode::from_geometry(Point2D::new(1.0, 1.0));
        let mut copy = original.clone();
        copy.style_mut().marker_size = 12.0;

        assert!(Rc::ptr_eq(original.geometry(), copy.geometry()));
        assert_eq!(original.style().marker_size, 6.0);
    }

    #[test]
    fn test_hidden_shape_draws_nothing() {
        let mut node = ShapeNode::from_geometry(Point2D::new(1.0, 1.0));
        assert_eq!(node.draw().len(), 1);
        node.set_visible(false);
        assert!(node.draw().is_empty());
    }

    #[test]
    fn test_label_names_geometry_kind() {
        let mut node = ShapeNode::from_geometry(Polygon2D::default());
        assert_eq!(node.print_tree(1), "  [Shape] Polygon2D\n");
        node.set_name("floor");
        assert_eq!(node.label(), "[Shape] Polygon2D \"floor\"");
    }
}
