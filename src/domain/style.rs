//! Rendering attributes attached to a shape
//!
//! A `Style` is a plain value: copying a node clones its style, so two nodes
//! never share rendering state.

use serde_json::{json, Map, Value};

use crate::domain::diagnostics::Diagnostics;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::{normalize_fields, read_array, read_bool, read_f64};
use crate::domain::geometry::{Geometry, GeometryClass};
use crate::domain::params::Param;

const COMPONENT: &str = "Style";

const FIELDS: [&str; 9] = [
    "MarkerVisible",
    "MarkerColor",
    "MarkerSize",
    "LineVisible",
    "LineColor",
    "LineWidth",
    "FaceVisible",
    "FaceColor",
    "FaceAlpha",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub marker_visible: bool,
    pub marker_color: [f64; 3],
    pub marker_size: f64,
    pub line_visible: bool,
    pub line_color: [f64; 3],
    pub line_width: f64,
    pub face_visible: bool,
    pub face_color: [f64; 3],
    pub face_alpha: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            marker_visible: false,
            marker_color: [0.0, 0.0, 1.0],
            marker_size: 6.0,
            line_visible: true,
            line_color: [0.0, 0.0, 1.0],
            line_width: 1.0,
            face_visible: false,
            face_color: [0.7, 0.7, 0.7],
            face_alpha: 1.0,
        }
    }
}

impl Style {
    /// Builds a style from name/value pairs.
    ///
    /// Names match case-insensitively against the canonical field names.
    /// An unknown name or a value of the wrong kind is an argument error.
    pub fn new(params: &[(&str, Param)]) -> DomainResult<Self> {
        let mut style = Self::default();
        for (name, value) in params {
            match name.to_ascii_lowercase().as_str() {
                "markervisible" => style.marker_visible = value.as_flag(name)?,
                "markercolor" => style.marker_color = value.as_color(name)?,
                "markersize" => style.marker_size = value.as_number(name)?,
                "linevisible" => style.line_visible = value.as_flag(name)?,
                "linecolor" => style.line_color = value.as_color(name)?,
                "linewidth" => style.line_width = value.as_number(name)?,
                "facevisible" => style.face_visible = value.as_flag(name)?,
                "facecolor" => style.face_color = value.as_color(name)?,
                "facealpha" => style.face_alpha = value.as_number(name)?,
                _ => {
                    return Err(DomainError::argument(format!(
                        "unknown style option '{}'",
                        name
                    )))
                }
            }
        }
        Ok(style)
    }

    /// Markers on, connecting lines off.
    pub fn point_default() -> Self {
        Self {
            marker_visible: true,
            line_visible: false,
            ..Self::default()
        }
    }

    pub fn mesh_default() -> Self {
        Self {
            face_visible: true,
            ..Self::default()
        }
    }

    pub fn for_class(class: GeometryClass) -> Self {
        match class {
            GeometryClass::Point | GeometryClass::MultiPoint => Self::point_default(),
            GeometryClass::Mesh => Self::mesh_default(),
            GeometryClass::Other => Self::default(),
        }
    }

    /// Default style for a geometry, chosen from its class.
    pub fn for_geometry(geometry: &dyn Geometry) -> Self {
        Self::for_class(geometry.class())
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Encodes the fields that differ from the neutral default.
    pub fn encode(&self) -> Map<String, Value> {
        let d = Self::default();
        let mut map = Map::new();
        let mut put = |name: &str, differs: bool, value: Value| {
            if differs {
                map.insert(name.to_string(), value);
            }
        };
        put("MarkerVisible", self.marker_visible != d.marker_visible, json!(self.marker_visible));
        put("MarkerColor", self.marker_color != d.marker_color, json!(self.marker_color));
        put("MarkerSize", self.marker_size != d.marker_size, json!(self.marker_size));
        put("LineVisible", self.line_visible != d.line_visible, json!(self.line_visible));
        put("LineColor", self.line_color != d.line_color, json!(self.line_color));
        put("LineWidth", self.line_width != d.line_width, json!(self.line_width));
        put("FaceVisible", self.face_visible != d.face_visible, json!(self.face_visible));
        put("FaceColor", self.face_color != d.face_color, json!(self.face_color));
        put("FaceAlpha", self.face_alpha != d.face_alpha, json!(self.face_alpha));
        map
    }

    pub fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        Self::decode_with(map, &mut Diagnostics::new())
    }

    /// Decodes a style, starting from the neutral default.
    ///
    /// Accepts canonical and lowercase field names; unknown fields are reported.
    pub fn decode_with(map: &Map<String, Value>, diag: &mut Diagnostics) -> DomainResult<Self> {
        let map = normalize_fields(map, &FIELDS, COMPONENT, diag);
        let mut style = Self::default();
        if let Some(v) = read_bool(&map, "MarkerVisible")? {
            style.marker_visible = v;
        }
        if let Some(v) = read_array::<3>(&map, "MarkerColor")? {
            style.marker_color = v;
        }
        if let Some(v) = read_f64(&map, "MarkerSize")? {
            style.marker_size = v;
        }
        if let Some(v) = read_bool(&map, "LineVisible")? {
            style.line_visible = v;
        }
        if let Some(v) = read_array::<3>(&map, "LineColor")? {
            style.line_color = v;
        }
        if let Some(v) = read_f64(&map, "LineWidth")? {
            style.line_width = v;
        }
        if let Some(v) = read_bool(&map, "FaceVisible")? {
            style.face_visible = v;
        }
        if let Some(v) = read_array::<3>(&map, "FaceColor")? {
            style.face_color = v;
        }
        if let Some(v) = read_f64(&map, "FaceAlpha")? {
            style.face_alpha = v;
        }
        Ok(style)
    }
}
