//! Test utilities for loading sample trees from JSON fixtures
//!
//! The fixtures spell out every node and its color, so they can describe
//! trees that normal insertion would never build, including invalid ones.
use crate::{Color, Identity, Node, NodeId, RbTree};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum SampleColor {
	Red,
	Black,
}

#[derive(Deserialize, Debug)]
struct SampleNode {
	value: i32,
	color: SampleColor,
	#[serde(default)]
	left: Option<Box<SampleNode>>,
	#[serde(default)]
	right: Option<Box<SampleNode>>,
}

#[derive(Deserialize, Debug)]
struct SampleTree {
	root: Option<SampleNode>,
}

fn translate_node(
	tree: &mut RbTree<i32, Identity>,
	sample: SampleNode,
	parent: Option<NodeId>,
) -> NodeId {
	tree.stamps += 1;
	let id = tree.nodes.insert(Node::new(parent, tree.stamps, sample.value));
	tree.nodes[id].color = match sample.color {
		SampleColor::Red => Color::Red,
		SampleColor::Black => Color::Black,
	};

	if let Some(left) = sample.left {
		let child = translate_node(tree, *left, Some(id));
		tree.nodes[id].left = Some(child);
	}
	if let Some(right) = sample.right {
		let child = translate_node(tree, *right, Some(id));
		tree.nodes[id].right = Some(child);
	}

	id
}

pub fn sample_tree<P: AsRef<std::path::Path>>(path: P) -> RbTree<i32, Identity> {
	let file = std::fs::File::open(path).expect("failed to find file");
	let json_tree: SampleTree = serde_json::from_reader(file).unwrap();

	let mut tree = RbTree::new();
	if let Some(root) = json_tree.root {
		let root = translate_node(&mut tree, root, None);
		tree.root = Some(root);
	}
	tree
}
