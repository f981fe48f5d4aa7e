//! Tests for SceneFileService against the real filesystem

use std::fs;
use std::rc::Rc;
use std::sync::Arc;

use tempfile::TempDir;

use scenetree::application::{ApplicationError, SceneFileService};
use scenetree::config::Settings;
use scenetree::domain::geometry::{LineString2D, Point2D, Polygon2D, TriangleMesh3D};
use scenetree::domain::{
    DomainError, GroupNode, Node, SceneAxis, SceneNode, Shape, ShapeNode, Style, TypeRegistry,
};
use scenetree::infrastructure::{JsonCodec, RealFileSystem};
use scenetree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn sample_tree() -> Node {
    let mut floor = ShapeNode::from_geometry(Polygon2D::new([[0.0, 0.0], [8.0, 0.0], [8.0, 6.0], [0.0, 6.0]]));
    floor.set_name("floor");
    let mut path = ShapeNode::with_style(
        Rc::new(LineString2D::new([[1.0, 1.0], [7.0, 5.0]])),
        Style {
            line_width: 2.0,
            line_color: [1.0, 0.0, 0.0],
            ..Style::default()
        },
    );
    path.set_visible(false);

    let mut plan = GroupNode::with_name("plan");
    plan.add(floor);
    plan.add(path);

    let mut root = GroupNode::with_name("site");
    root.add(plan);
    root.add(ShapeNode::from_geometry(Point2D::new(4.0, 3.0)));
    root.add(ShapeNode::from_geometry(TriangleMesh3D::new(
        [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 2.0]],
        vec![[0, 1, 2]],
    )
    .unwrap()));
    Node::from(root)
}

#[test]
fn given_tree_when_written_and_read_then_structure_and_encoding_preserved() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/dir/site.json");
    let service = SceneFileService::default();
    let tree = sample_tree();

    // Act
    service.write_node(&tree, &path).unwrap();
    let read = service.read_node(&path).unwrap();

    // Assert
    assert!(path.exists());
    assert_eq!(read.print_tree(0), tree.print_tree(0));
    assert_eq!(read.encode(), tree.encode());
    assert_eq!(
        read.bounding_box().unwrap().to_array(),
        [0.0, 8.0, 0.0, 6.0, 0.0, 2.0]
    );
}

#[test]
fn given_node_when_using_static_wrappers_then_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.json");
    let tree = sample_tree();

    tree.write(&path).unwrap();
    let read = Node::read(&path).unwrap();

    assert_eq!(read.encode(), tree.encode());
}

#[test]
fn given_compact_settings_when_writing_then_single_line_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("compact.json");
    let settings = Settings::load_from_str("pretty = false").unwrap();
    let service = SceneFileService::from_settings(&settings);

    service
        .write_node(&Node::from(GroupNode::with_name("g")), &path)
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn given_handwritten_lowercase_legacy_file_when_read_as_node_then_converted() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("legacy.json");
    fs::write(
        &path,
        r#"{
  "geometry": {"Type": "Point2D", "X": 2, "Y": 3},
  "name": "beacon",
  "visible": false
}"#,
    )
    .unwrap();
    let service = SceneFileService::default();

    // Act
    let node = service.read_shape_as_node(&path).unwrap();

    // Assert
    assert_eq!(node.name(), "beacon");
    assert!(!node.is_visible());
    assert_eq!(node.style(), &Style::point_default());
    assert_eq!(
        node.bounding_box().unwrap().to_array(),
        [2.0, 2.0, 3.0, 3.0, 0.0, 0.0]
    );
}

#[test]
fn given_legacy_shape_when_written_then_canonical_fields_on_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("shape.json");
    let service = SceneFileService::default();
    let mut shape = Shape::new(Rc::new(Point2D::new(0.0, 1.0)));
    shape.name = "p".into();

    service.write_shape(&shape, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let read = service.read_shape(&path).unwrap();

    assert!(text.contains("\"Geometry\""));
    assert!(text.contains("\"Name\""));
    assert!(!text.contains("\"name\""));
    assert_eq!(read.name, "p");
}

#[test]
fn given_axis_when_written_and_read_then_equal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("axis.json");
    let service = SceneFileService::default();
    let axis = SceneAxis {
        limits: (-1.0, 1.0),
        reverse: true,
        label: "elevation".into(),
    };

    service.write_axis(&axis, &path).unwrap();

    assert_eq!(service.read_axis(&path).unwrap(), axis);
}

#[test]
fn given_unregistered_type_on_disk_when_reading_then_domain_error_propagates() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("unknown.json");
    fs::write(&path, r#"{"Type": "Layer"}"#).unwrap();

    let err = SceneFileService::default().read_node(&path).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnresolvedType(tag)) if tag == "Layer"
    ));
}

#[test]
fn given_missing_file_when_reading_then_operation_failed_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.json");

    let err = SceneFileService::default().read_node(&path).unwrap_err();

    match err {
        ApplicationError::OperationFailed { context, .. } => {
            assert!(context.contains("absent.json"), "context: {context}")
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}

#[test]
fn given_malformed_document_when_reading_then_codec_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{\"Type\": \"Group\",").unwrap();

    let err = SceneFileService::default().read_node(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Infra(_)));
}

#[test]
fn given_injected_service_parts_when_constructing_then_registry_is_used() {
    let service = SceneFileService::new(
        Arc::new(RealFileSystem),
        Box::new(JsonCodec::pretty(4)),
        TypeRegistry::new(),
    );
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("group.json");
    service
        .write_node(&Node::from(GroupNode::new()), &path)
        .unwrap();

    let err = service.read_node(&path).unwrap_err();

    assert!(service.registry().is_empty());
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnresolvedType(_))
    ));
}

#[test]
fn given_infinite_axis_limit_when_writing_then_refused_and_nothing_written() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("axis.json");
    let service = SceneFileService::default();
    let axis = SceneAxis::with_limits(0.0, f64::INFINITY);

    // Act
    let err = service.write_axis(&axis, &path).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidField { field, .. }) if field == "Limits"
    ));
    assert!(!path.exists());
}

#[test]
fn given_nan_coordinate_when_writing_node_then_refused_and_read_finds_no_file() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nan.json");
    let service = SceneFileService::default();
    let mut root = GroupNode::new();
    root.add(ShapeNode::from_geometry(Point2D::new(f64::NAN, 1.0)));

    // Act
    let write_err = service.write_node(&Node::from(root), &path).unwrap_err();
    let read_err = service.read_node(&path).unwrap_err();

    // Assert
    assert!(matches!(
        write_err,
        ApplicationError::Domain(DomainError::InvalidField { field, .. }) if field == "X"
    ));
    assert!(matches!(read_err, ApplicationError::OperationFailed { .. }));
}

#[test]
fn given_finite_values_after_refusal_when_writing_then_round_trips() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("axis.json");
    let service = SceneFileService::default();
    assert!(service
        .write_axis(&SceneAxis::with_limits(f64::NEG_INFINITY, 0.0), &path)
        .is_err());

    let axis = SceneAxis::with_limits(-1e300, 1e300);
    service.write_axis(&axis, &path).unwrap();

    assert_eq!(service.read_axis(&path).unwrap(), axis);
}
