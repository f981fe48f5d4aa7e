/*
Tree rendering for scene nodes.

`print_tree` gives the plain indented dump; `to_tree_string` builds a termtree
`Tree<String>` with the same labels, for box-drawing output in logs and tools.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::group::GroupNode;
use crate::domain::node::{Node, SceneNode};
use crate::domain::shape_node::ShapeNode;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for GroupNode {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        // Recursively construct the children, in draw order
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|child| child.to_tree_string())
            .collect();

        Tree::new(self.label()).with_leaves(leaves)
    }
}

impl TreeDisplay for ShapeNode {
    fn to_tree_string(&self) -> Tree<String> {
        Tree::new(self.label())
    }
}

impl TreeDisplay for Node {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            Node::Group(group) => group.to_tree_string(),
            Node::Shape(shape) => shape.to_tree_string(),
        }
    }
}
