//! Geometry capability consumed by shape nodes
//!
//! Concrete geometry kinds are collaborators of the node tree: the tree only
//! relies on the `Geometry` trait below. A geometry is immutable once built and
//! may be shared by many shape nodes through an `Rc`.

mod builtin;

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use glam::DVec3;
use serde_json::{Map, Value};

use crate::domain::error::DomainResult;
use crate::domain::style::Style;

pub use builtin::{LineString2D, MultiPoint2D, Point2D, Polygon2D, TriangleMesh3D};

/// Affine transform applied to geometries. Planar kinds use the z = 0 plane.
pub type Transform = glam::DMat4;

/// Coarse classification used to pick a default style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryClass {
    Point,
    MultiPoint,
    Mesh,
    Other,
}

/// Axis-aligned extents, always six values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl BoundingBox {
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64, zmin: f64, zmax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        }
    }

    /// Lifts planar extents `[xmin, xmax, ymin, ymax]`, forcing z to (0, 0).
    pub fn from_planar([xmin, xmax, ymin, ymax]: [f64; 4]) -> Self {
        Self::new(xmin, xmax, ymin, ymax, 0.0, 0.0)
    }

    /// The identity of `union`: min = +inf, max = -inf.
    pub fn empty() -> Self {
        Self::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.xmin > self.xmax || self.ymin > self.ymax || self.zmin > self.zmax
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec3>) -> Self {
        points.into_iter().fold(Self::empty(), |acc, p| {
            Self::new(
                acc.xmin.min(p.x),
                acc.xmax.max(p.x),
                acc.ymin.min(p.y),
                acc.ymax.max(p.y),
                acc.zmin.min(p.z),
                acc.zmax.max(p.z),
            )
        })
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.xmin.min(other.xmin),
            self.xmax.max(other.xmax),
            self.ymin.min(other.ymin),
            self.ymax.max(other.ymax),
            self.zmin.min(other.zmin),
            self.zmax.max(other.zmax),
        )
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.xmin, self.xmax, self.ymin, self.ymax, self.zmin, self.zmax]
    }
}

/// Opaque result of a draw call. Backends downcast to what they produced.
pub struct DrawHandle(Box<dyn Any>);

impl DrawHandle {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for DrawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawHandle").finish_non_exhaustive()
    }
}

/// Backend-neutral draw record produced by the built-in geometry kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub kind: &'static str,
    pub points: Vec<DVec3>,
    pub style: Style,
}

/// Two-dimensional capability.
pub trait Planar {
    /// `[xmin, xmax, ymin, ymax]`
    fn planar_bounds(&self) -> [f64; 4];
}

/// Three-dimensional capability.
pub trait Spatial {
    fn spatial_bounds(&self) -> BoundingBox;
}

/// Contract every geometry kind fulfils.
pub trait Geometry: fmt::Debug {
    /// Runtime kind name; doubles as the registry discriminator.
    fn kind(&self) -> &'static str;

    fn class(&self) -> GeometryClass {
        GeometryClass::Other
    }

    fn as_planar(&self) -> Option<&dyn Planar> {
        None
    }

    fn as_spatial(&self) -> Option<&dyn Spatial> {
        None
    }

    /// Returns a new geometry; `self` is never modified.
    fn transform(&self, transform: &Transform) -> Rc<dyn Geometry>;

    fn draw(&self, style: &Style) -> DrawHandle;

    /// Structured encoding. Should carry a `Type` field naming `kind()`.
    fn encode(&self) -> Map<String, Value>;
}

/// Reconstruction half of the contract, used to populate the registry.
pub trait DecodeGeometry: Geometry + Sized + 'static {
    const TYPE_TAG: &'static str;

    fn decode(map: &Map<String, Value>) -> DomainResult<Self>;
}
