//! Tests for the node tree: leaf status, add, bounding boxes, transform, dumps

use std::rc::Rc;

use glam::DVec3;
use serde_json::{Map, Value};

use scenetree::domain::geometry::{Point2D, Polygon2D, TriangleMesh3D};
use scenetree::domain::{
    BoundingBox, DomainError, DrawHandle, Geometry, GroupNode, Node, Primitive, SceneNode,
    ShapeNode, Style, Transform, TreeDisplay,
};
use scenetree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Geometry with neither planar nor spatial capability.
#[derive(Debug)]
struct Annotation;

impl Geometry for Annotation {
    fn kind(&self) -> &'static str {
        "Annotation"
    }

    fn transform(&self, _transform: &Transform) -> Rc<dyn Geometry> {
        Rc::new(Annotation)
    }

    fn draw(&self, _style: &Style) -> DrawHandle {
        DrawHandle::new(())
    }

    fn encode(&self) -> Map<String, Value> {
        Map::new()
    }
}

fn rectangle() -> Polygon2D {
    Polygon2D::new([[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]])
}

fn unit_tetrahedron() -> TriangleMesh3D {
    TriangleMesh3D::new(
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
        vec![[0, 1, 2], [0, 1, 3], [1, 2, 3], [0, 2, 3]],
    )
    .unwrap()
}

// ============================================================
// is_leaf
// ============================================================

#[test]
fn given_tree_built_by_add_when_checking_leaf_then_only_nonempty_groups_are_inner() {
    // Arrange
    let mut inner = GroupNode::with_name("inner");
    inner.add(ShapeNode::from_geometry(Point2D::new(1.0, 1.0)));
    let empty = GroupNode::with_name("empty");
    let mut root = GroupNode::new();

    // Act
    root.add(inner);
    root.add(empty);
    root.add(ShapeNode::from_geometry(rectangle()));

    // Assert
    assert!(!root.is_leaf());
    let children = root.children();
    assert!(!children[0].is_leaf());
    assert!(children[1].is_leaf());
    assert!(children[2].is_leaf());
    assert!(children[0].as_group().unwrap().children()[0].is_leaf());
}

#[test]
fn given_shape_with_empty_geometry_when_checking_leaf_then_is_leaf() {
    let node = ShapeNode::from_geometry(Polygon2D::default());
    assert!(node.is_leaf());
}

// ============================================================
// add
// ============================================================

#[test]
fn given_plain_number_when_adding_then_argument_error_and_children_unchanged() {
    // Arrange
    let mut group = GroupNode::new();
    group.add(ShapeNode::from_geometry(Point2D::new(0.0, 0.0)));

    // Act
    let result = group.try_add(Box::new(3.5_f64));

    // Assert
    assert!(matches!(result, Err(DomainError::Argument { .. })));
    assert_eq!(group.len(), 1);
}

#[test]
fn given_shape_node_when_adding_dynamically_then_appended_in_order() {
    let mut group = GroupNode::new();
    group.add(GroupNode::with_name("first"));

    group
        .try_add(Box::new(ShapeNode::from_geometry(Point2D::new(0.0, 0.0))))
        .unwrap();

    assert_eq!(group.len(), 2);
    assert_eq!(group.children()[0].name(), "first");
    assert_eq!(group.children()[1].kind_name(), "Shape");
}

// ============================================================
// bounding_box
// ============================================================

#[test]
fn given_planar_geometry_when_bounding_box_then_z_range_is_zero() {
    let node = ShapeNode::from_geometry(rectangle());

    let bbox = node.bounding_box().unwrap();

    assert_eq!(bbox.to_array(), [0.0, 10.0, 0.0, 5.0, 0.0, 0.0]);
}

#[test]
fn given_spatial_geometry_when_bounding_box_then_six_extents() {
    let node = ShapeNode::from_geometry(unit_tetrahedron());

    let bbox = node.bounding_box().unwrap();

    assert_eq!(bbox, BoundingBox::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0));
}

#[test]
fn given_geometry_without_capability_when_bounding_box_then_type_mismatch() {
    let node = ShapeNode::new(Rc::new(Annotation));

    let err = node.bounding_box().unwrap_err();

    match err {
        DomainError::TypeMismatch { actual, .. } => assert_eq!(actual, "Annotation"),
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
}

#[test]
fn given_group_when_bounding_box_then_union_of_children() {
    let mut group = GroupNode::new();
    group.add(ShapeNode::from_geometry(rectangle()));
    group.add(ShapeNode::from_geometry(unit_tetrahedron()));

    let bbox = group.bounding_box().unwrap();

    assert_eq!(bbox.to_array(), [0.0, 10.0, 0.0, 5.0, 0.0, 1.0]);
}

#[test]
fn given_group_with_bad_child_when_bounding_box_then_error_propagates() {
    let mut group = GroupNode::new();
    group.add(ShapeNode::from_geometry(rectangle()));
    group.add(ShapeNode::new(Rc::new(Annotation)));

    assert!(matches!(
        group.bounding_box(),
        Err(DomainError::TypeMismatch { .. })
    ));
}

// ============================================================
// transform
// ============================================================

#[test]
fn given_shape_when_transforming_then_original_is_untouched() {
    // Arrange
    let original = ShapeNode::from_geometry(rectangle());
    let geometry_before = Rc::clone(original.geometry());
    let shift = Transform::from_translation(DVec3::new(1.0, 2.0, 0.0));

    // Act
    let moved = original.transform(&shift);

    // Assert
    let moved = moved.as_shape().unwrap();
    assert!(Rc::ptr_eq(original.geometry(), &geometry_before));
    assert!(!Rc::ptr_eq(original.geometry(), moved.geometry()));
    assert_eq!(original.bounding_box().unwrap().to_array(), [0.0, 10.0, 0.0, 5.0, 0.0, 0.0]);
    assert_eq!(moved.bounding_box().unwrap().to_array(), [1.0, 11.0, 2.0, 7.0, 0.0, 0.0]);
    assert_eq!(moved.style(), original.style());
}

#[test]
fn given_group_when_transforming_then_children_keep_order_and_names() {
    let mut group = GroupNode::with_name("root");
    let mut a = ShapeNode::from_geometry(Point2D::new(0.0, 0.0));
    a.set_name("a");
    let mut b = ShapeNode::from_geometry(Point2D::new(1.0, 1.0));
    b.set_name("b");
    group.add(a);
    group.add(b);

    let scaled = group.transform(&Transform::from_scale(DVec3::splat(2.0)));

    let scaled = scaled.as_group().unwrap();
    assert_eq!(scaled.name(), "root");
    let names: Vec<_> = scaled.children().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(
        scaled.bounding_box().unwrap().to_array(),
        [0.0, 2.0, 0.0, 2.0, 0.0, 0.0]
    );
    assert_eq!(group.bounding_box().unwrap().to_array(), [0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
}

// ============================================================
// draw / print_tree
// ============================================================

#[test]
fn given_group_with_hidden_child_when_drawing_then_hidden_child_is_skipped() {
    let mut group = GroupNode::new();
    group.add(ShapeNode::from_geometry(Point2D::new(0.0, 0.0)));
    let mut hidden = ShapeNode::from_geometry(rectangle());
    hidden.set_visible(false);
    group.add(hidden);
    group.add(ShapeNode::from_geometry(unit_tetrahedron()));

    let handles = group.draw();

    let kinds: Vec<_> = handles
        .iter()
        .map(|h| h.downcast_ref::<Primitive>().unwrap().kind)
        .collect();
    assert_eq!(kinds, ["Point2D", "TriangleMesh3D"]);
}

#[test]
fn given_nested_tree_when_printing_then_one_indented_line_per_node() {
    let mut walls = GroupNode::with_name("walls");
    walls.add(ShapeNode::from_geometry(rectangle()));
    let mut root = GroupNode::new();
    root.add(walls);
    root.add(ShapeNode::from_geometry(Point2D::new(0.0, 0.0)));

    let dump = Node::from(root.clone()).print_tree(0);

    assert_eq!(
        dump,
        "[Group]\n  [Group] \"walls\"\n    [Shape] Polygon2D\n  [Shape] Point2D\n"
    );
    assert_eq!(root.to_tree_string().to_string().lines().count(), 4);
}
