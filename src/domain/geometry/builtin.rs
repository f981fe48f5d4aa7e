//! Built-in geometry kinds registered by `TypeRegistry::with_builtins`.

use std::rc::Rc;

use glam::{DVec2, DVec3};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{
    BoundingBox, DecodeGeometry, DrawHandle, Geometry, GeometryClass, Planar, Primitive, Spatial,
    Transform,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::fields::TYPE_FIELD;
use crate::domain::style::Style;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PointPayload {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CoordinatesPayload {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MeshPayload {
    #[serde(default)]
    vertices: Vec<[f64; 3]>,
    #[serde(default)]
    faces: Vec<[u32; 3]>,
}

fn payload<T: for<'de> Deserialize<'de>>(tag: &str, map: &Map<String, Value>) -> DomainResult<T> {
    serde_json::from_value(Value::Object(map.clone()))
        .map_err(|e| DomainError::invalid_field(tag, e.to_string()))
}

fn tagged(tag: &'static str, fields: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(TYPE_FIELD.to_string(), Value::from(tag));
    if let Value::Object(fields) = fields {
        map.extend(fields);
    }
    map
}

fn planar_bounds_of(points: &[DVec2]) -> [f64; 4] {
    points.iter().fold(
        [
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ],
        |[xmin, xmax, ymin, ymax], p| [xmin.min(p.x), xmax.max(p.x), ymin.min(p.y), ymax.max(p.y)],
    )
}

fn transform_planar(points: &[DVec2], transform: &Transform) -> Vec<DVec2> {
    points
        .iter()
        .map(|p| transform.transform_point3(p.extend(0.0)).truncate())
        .collect()
}

fn lift(points: &[DVec2]) -> Vec<DVec3> {
    points.iter().map(|p| p.extend(0.0)).collect()
}

fn coordinates(points: &[DVec2]) -> Vec<[f64; 2]> {
    points.iter().map(|p| p.to_array()).collect()
}

fn from_coordinates(coords: Vec<[f64; 2]>) -> Vec<DVec2> {
    coords.into_iter().map(DVec2::from).collect()
}

// ============================================================
// Point2D
// ============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Point2D {
    pub position: DVec2,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
        }
    }
}

impl Planar for Point2D {
    fn planar_bounds(&self) -> [f64; 4] {
        planar_bounds_of(&[self.position])
    }
}

impl Geometry for Point2D {
    fn kind(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn class(&self) -> GeometryClass {
        GeometryClass::Point
    }

    fn as_planar(&self) -> Option<&dyn Planar> {
        Some(self)
    }

    fn transform(&self, transform: &Transform) -> Rc<dyn Geometry> {
        let p = transform.transform_point3(self.position.extend(0.0));
        Rc::new(Self::new(p.x, p.y))
    }

    fn draw(&self, style: &Style) -> DrawHandle {
        DrawHandle::new(Primitive {
            kind: Self::TYPE_TAG,
            points: vec![self.position.extend(0.0)],
            style: style.clone(),
        })
    }

    fn encode(&self) -> Map<String, Value> {
        tagged(Self::TYPE_TAG, json!({"X": self.position.x, "Y": self.position.y}))
    }
}

impl DecodeGeometry for Point2D {
    const TYPE_TAG: &'static str = "Point2D";

    fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        let p: PointPayload = payload(Self::TYPE_TAG, map)?;
        Ok(Self::new(p.x, p.y))
    }
}

// ============================================================
// MultiPoint2D
// ============================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint2D {
    pub points: Vec<DVec2>,
}

impl MultiPoint2D {
    pub fn new(points: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self {
            points: points.into_iter().map(DVec2::from).collect(),
        }
    }
}

impl Planar for MultiPoint2D {
    fn planar_bounds(&self) -> [f64; 4] {
        planar_bounds_of(&self.points)
    }
}

impl Geometry for MultiPoint2D {
    fn kind(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn class(&self) -> GeometryClass {
        GeometryClass::MultiPoint
    }

    fn as_planar(&self) -> Option<&dyn Planar> {
        Some(self)
    }

    fn transform(&self, transform: &Transform) -> Rc<dyn Geometry> {
        Rc::new(Self {
            points: transform_planar(&self.points, transform),
        })
    }

    fn draw(&self, style: &Style) -> DrawHandle {
        DrawHandle::new(Primitive {
            kind: Self::TYPE_TAG,
            points: lift(&self.points),
            style: style.clone(),
        })
    }

    fn encode(&self) -> Map<String, Value> {
        tagged(Self::TYPE_TAG, json!({"Coordinates": coordinates(&self.points)}))
    }
}

impl DecodeGeometry for MultiPoint2D {
    const TYPE_TAG: &'static str = "MultiPoint2D";

    fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        let p: CoordinatesPayload = payload(Self::TYPE_TAG, map)?;
        Ok(Self {
            points: from_coordinates(p.coordinates),
        })
    }
}

// ============================================================
// LineString2D
// ============================================================

/// Open polyline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString2D {
    pub vertices: Vec<DVec2>,
}

impl LineString2D {
    pub fn new(vertices: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self {
            vertices: vertices.into_iter().map(DVec2::from).collect(),
        }
    }
}

impl Planar for LineString2D {
    fn planar_bounds(&self) -> [f64; 4] {
        planar_bounds_of(&self.vertices)
    }
}

impl Geometry for LineString2D {
    fn kind(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn as_planar(&self) -> Option<&dyn Planar> {
        Some(self)
    }

    fn transform(&self, transform: &Transform) -> Rc<dyn Geometry> {
        Rc::new(Self {
            vertices: transform_planar(&self.vertices, transform),
        })
    }

    fn draw(&self, style: &Style) -> DrawHandle {
        DrawHandle::new(Primitive {
            kind: Self::TYPE_TAG,
            points: lift(&self.vertices),
            style: style.clone(),
        })
    }

    fn encode(&self) -> Map<String, Value> {
        tagged(Self::TYPE_TAG, json!({"Coordinates": coordinates(&self.vertices)}))
    }
}

impl DecodeGeometry for LineString2D {
    const TYPE_TAG: &'static str = "LineString2D";

    fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        let p: CoordinatesPayload = payload(Self::TYPE_TAG, map)?;
        Ok(Self {
            vertices: from_coordinates(p.coordinates),
        })
    }
}

// ============================================================
// Polygon2D
// ============================================================

/// Closed polygon; the closing edge is implicit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon2D {
    pub vertices: Vec<DVec2>,
}

impl Polygon2D {
    pub fn new(vertices: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self {
            vertices: vertices.into_iter().map(DVec2::from).collect(),
        }
    }
}

impl Planar for Polygon2D {
    fn planar_bounds(&self) -> [f64; 4] {
        planar_bounds_of(&self.vertices)
    }
}

impl Geometry for Polygon2D {
    fn kind(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn as_planar(&self) -> Option<&dyn Planar> {
        Some(self)
    }

    fn transform(&self, transform: &Transform) -> Rc<dyn Geometry> {
        Rc::new(Self {
            vertices: transform_planar(&self.vertices, transform),
        })
    }

    fn draw(&self, style: &Style) -> DrawHandle {
        let mut points = lift(&self.vertices);
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        DrawHandle::new(Primitive {
            kind: Self::TYPE_TAG,
            points,
            style: style.clone(),
        })
    }

    fn encode(&self) -> Map<String, Value> {
        tagged(Self::TYPE_TAG, json!({"Coordinates": coordinates(&self.vertices)}))
    }
}

impl DecodeGeometry for Polygon2D {
    const TYPE_TAG: &'static str = "Polygon2D";

    fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        let p: CoordinatesPayload = payload(Self::TYPE_TAG, map)?;
        Ok(Self {
            vertices: from_coordinates(p.coordinates),
        })
    }
}

// ============================================================
// TriangleMesh3D
// ============================================================

/// Indexed triangle mesh.
///
/// Every face indexes three existing vertices; `new` enforces it and the
/// fields are private so it cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh3D {
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
}

impl TriangleMesh3D {
    pub fn new(
        vertices: impl IntoIterator<Item = [f64; 3]>,
        faces: Vec<[u32; 3]>,
    ) -> DomainResult<Self> {
        let vertices: Vec<DVec3> = vertices.into_iter().map(DVec3::from).collect();
        let count = vertices.len();
        if let Some(face) = faces.iter().find(|f| f.iter().any(|&i| i as usize >= count)) {
            return Err(DomainError::invalid_field(
                "Faces",
                format!("face {:?} indexes past {} vertices", face, count),
            ));
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

impl Spatial for TriangleMesh3D {
    fn spatial_bounds(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }
}

impl Geometry for TriangleMesh3D {
    fn kind(&self) -> &'static str {
        Self::TYPE_TAG
    }

    fn class(&self) -> GeometryClass {
        GeometryClass::Mesh
    }

    fn as_spatial(&self) -> Option<&dyn Spatial> {
        Some(self)
    }

    fn transform(&self, transform: &Transform) -> Rc<dyn Geometry> {
        Rc::new(Self {
            vertices: self
                .vertices
                .iter()
                .map(|v| transform.transform_point3(*v))
                .collect(),
            faces: self.faces.clone(),
        })
    }

    fn draw(&self, style: &Style) -> DrawHandle {
        let points = self
            .faces
            .iter()
            .flat_map(|face| face.iter().filter_map(|&i| self.vertices.get(i as usize).copied()))
            .collect();
        DrawHandle::new(Primitive {
            kind: Self::TYPE_TAG,
            points,
            style: style.clone(),
        })
    }

    fn encode(&self) -> Map<String, Value> {
        let vertices: Vec<[f64; 3]> = self.vertices.iter().map(|v| v.to_array()).collect();
        tagged(
            Self::TYPE_TAG,
            json!({"Vertices": vertices, "Faces": self.faces}),
        )
    }
}

impl DecodeGeometry for TriangleMesh3D {
    const TYPE_TAG: &'static str = "TriangleMesh3D";

    fn decode(map: &Map<String, Value>) -> DomainResult<Self> {
        let p: MeshPayload = payload(Self::TYPE_TAG, map)?;
        Self::new(p.vertices, p.faces)
    }
}
