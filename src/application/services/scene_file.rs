//! Scene file service
//!
//! Reads and writes node trees, legacy shapes and axes as structured-text
//! documents.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::fields::check_encodable;
use crate::domain::{Diagnostics, Node, SceneAxis, SceneNode, Shape, ShapeNode, TypeRegistry};
use crate::infrastructure::traits::{FileSystem, TextCodec};
use crate::infrastructure::{JsonCodec, RealFileSystem};

/// Service for persisting scene values.
pub struct SceneFileService {
    fs: Arc<dyn FileSystem>,
    codec: Box<dyn TextCodec>,
    registry: TypeRegistry,
}

impl Default for SceneFileService {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl SceneFileService {
    /// Create a new scene file service.
    pub fn new(fs: Arc<dyn FileSystem>, codec: Box<dyn TextCodec>, registry: TypeRegistry) -> Self {
        Self { fs, codec, registry }
    }

    /// Real filesystem, JSON codec formatted per `settings`, built-in types.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(RealFileSystem),
            Box::new(JsonCodec::from_settings(settings)),
            TypeRegistry::with_builtins(),
        )
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    #[instrument(level = "debug", skip(self, node))]
    pub fn write_node(&self, node: &Node, path: &Path) -> ApplicationResult<()> {
        let mut diag = Diagnostics::new();
        self.write_node_with(node, path, &mut diag)
    }

    pub fn write_node_with(
        &self,
        node: &Node,
        path: &Path,
        diag: &mut Diagnostics,
    ) -> ApplicationResult<()> {
        self.write_map(node.encode_with(diag), path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn read_node(&self, path: &Path) -> ApplicationResult<Node> {
        self.read_node_with(path, &mut Diagnostics::new())
    }

    pub fn read_node_with(&self, path: &Path, diag: &mut Diagnostics) -> ApplicationResult<Node> {
        let map = self.read_map(path)?;
        let node = Node::decode_with(&map, &self.registry, diag)?;
        debug!("read_node: {} from {}", node.kind_name(), path.display());
        Ok(node)
    }

    #[instrument(level = "debug", skip(self, shape))]
    pub fn write_shape(&self, shape: &Shape, path: &Path) -> ApplicationResult<()> {
        self.write_map(shape.encode(), path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn read_shape(&self, path: &Path) -> ApplicationResult<Shape> {
        self.read_shape_with(path, &mut Diagnostics::new())
    }

    pub fn read_shape_with(&self, path: &Path, diag: &mut Diagnostics) -> ApplicationResult<Shape> {
        let map = self.read_map(path)?;
        Ok(Shape::decode_with(&map, &self.registry, diag)?)
    }

    /// Reads a legacy shape file and converts it into a tree node.
    pub fn read_shape_as_node(&self, path: &Path) -> ApplicationResult<ShapeNode> {
        Ok(ShapeNode::from(self.read_shape(path)?))
    }

    #[instrument(level = "debug", skip(self, axis))]
    pub fn write_axis(&self, axis: &SceneAxis, path: &Path) -> ApplicationResult<()> {
        self.write_map(axis.encode(), path)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn read_axis(&self, path: &Path) -> ApplicationResult<SceneAxis> {
        self.read_axis_with(path, &mut Diagnostics::new())
    }

    pub fn read_axis_with(
        &self,
        path: &Path,
        diag: &mut Diagnostics,
    ) -> ApplicationResult<SceneAxis> {
        let map = self.read_map(path)?;
        Ok(SceneAxis::decode_with(&map, diag)?)
    }

    /// Nothing is written when the encoding holds a non-finite number.
    fn write_map(&self, map: Map<String, Value>, path: &Path) -> ApplicationResult<()> {
        check_encodable(&map)?;
        let text = self.codec.serialize(&Value::Object(map))?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &text)
            .with_path_context("write scene file", path)?;
        debug!("wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    fn read_map(&self, path: &Path) -> ApplicationResult<Map<String, Value>> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("scene file not found: {}", path.display()),
                source: Box::new(io::Error::new(io::ErrorKind::NotFound, "file does not exist")),
            });
        }
        let text = self
            .fs
            .read_to_string(path)
            .with_path_context("read scene file", path)?;
        match self.codec.deserialize(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(ApplicationError::NotAnObject(path.to_path_buf())),
        }
    }
}

impl Node {
    /// Writes this tree to `path` with default settings.
    pub fn write(&self, path: &Path) -> ApplicationResult<()> {
        SceneFileService::default().write_node(self, path)
    }

    /// Reads a tree from `path`, resolving built-in types only.
    pub fn read(path: &Path) -> ApplicationResult<Node> {
        SceneFileService::default().read_node(path)
    }
}
