use serde_json::{Map, Value};

/// A node as handed to the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	/// Unique within a dataset.
	pub id: String,
	/// Text drawn next to the node; the id is used when absent.
	pub label: Option<String>,
	/// Node type ("Character", "Ship", ...), used for legend and details.
	pub group: Option<String>,
	/// Fill color, any CSS color string.
	pub color: Option<String>,
	/// Tooltip shown while hovering.
	pub title: Option<String>,
	/// Radius multiplier, 1.0 when absent.
	pub size: Option<f64>,
	/// Raw properties listed in the details panel.
	pub props: Map<String, Value>,
}

/// A directed edge between two node ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLink {
	/// Unique within a dataset.
	pub id: String,
	/// Id of the tail node.
	pub source: String,
	/// Id of the head node.
	pub target: String,
	/// Text drawn at the midpoint.
	pub label: Option<String>,
	/// Tooltip text.
	pub title: Option<String>,
	/// Stroke color; the theme default when absent.
	pub color: Option<String>,
}

/// One dataset for the canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Nodes in insertion order.
	pub nodes: Vec<GraphNode>,
	/// Links in insertion order.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// True when there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}
