use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;
use crate::graph::palette;

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 12.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub title: Option<String>,
	pub color: String,
	pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct EdgeInfo {
	pub label: Option<String>,
	pub title: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	/// Last pointer position in screen space, anchors the tooltip.
	pub pointer: (f64, f64),
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, EdgeInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 250.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let spread = 60.0 + 8.0 * (data.nodes.len() as f64).sqrt() * 4.0;
		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				continue;
			}
			let color = node.color.clone().unwrap_or_else(|| {
				node.group
					.as_deref()
					.map(palette::node_type_color)
					.unwrap_or(palette::DEFAULT_NODE)
					.into()
			});
			let size = node.size.unwrap_or(1.0).max(0.2);
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			// Graph space is centered on the origin; the view transform
			// puts the origin in the middle of the canvas.
			let (x, y) = ((spread * angle.cos()) as f32, (spread * angle.sin()) as f32);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: (10.0 * size) as f32,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					title: node.title.clone(),
					color,
					radius: NODE_RADIUS * size,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				if src == tgt {
					continue;
				}
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeInfo {
							label: link.label.clone(),
							title: link.title.clone(),
							color: link.color.clone().unwrap_or_else(|| palette::GOLD.into()),
						},
					},
				);
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	pub fn node_count(&self) -> usize {
		let mut n = 0;
		self.graph.visit_nodes(|_| n += 1);
		n
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// world-space, scales with zoom like nodes
			let hit = HIT_RADIUS.max(node.data.user_data.radius);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// API id of the node at `idx`.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Select by API id, `None` clears the selection.
	pub fn select_id(&mut self, id: Option<&str>) {
		let mut found = None;
		if let Some(id) = id {
			self.graph.visit_nodes(|node| {
				if node.data.user_data.id == id {
					found = Some(node.index());
				}
			});
		}
		self.selected = found;
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selected == Some(idx)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old highlight for the fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// Tooltip text of the node currently under the pointer.
	pub fn hover_title(&self) -> Option<String> {
		let idx = self.hover.node?;
		let mut title = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				let info = &node.data.user_data;
				title = info.title.clone().or_else(|| info.label.clone());
			}
		});
		title
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		// keep the graph centered
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::{GraphLink, GraphNode};

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: Some(id.to_uppercase()),
			group: Some("Ship".into()),
			..Default::default()
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			id: format!("{}-{}", source, target),
			source: source.into(),
			target: target.into(),
			..Default::default()
		}
	}

	#[test]
	fn dangling_and_self_links_are_dropped() {
		let data = GraphData {
			nodes: vec![node("pearl"), node("dutchman"), node("pearl")],
			links: vec![link("pearl", "dutchman"), link("pearl", "kraken"), link("pearl", "pearl")],
		};
		let s = ForceGraphState::new(&data, 800.0, 600.0);
		assert_eq!(s.node_count(), 2);
		assert_eq!(s.edge_count(), 1);
	}

	#[test]
	fn missing_color_uses_group() {
		let s = ForceGraphState::new(
			&GraphData {
				nodes: vec![node("pearl")],
				links: vec![],
			},
			800.0,
			600.0,
		);
		let mut color = String::new();
		s.graph.visit_nodes(|n| color = n.data.user_data.color.clone());
		assert_eq!(color, palette::node_type_color("Ship"));
	}

	#[test]
	fn hover_collects_neighbors_and_title() {
		let mut a = node("a");
		a.title = Some("Ship: A".into());
		let data = GraphData {
			nodes: vec![a, node("b"), node("c")],
			links: vec![link("a", "b")],
		};
		let mut s = ForceGraphState::new(&data, 800.0, 600.0);
		let mut idx = None;
		s.graph.visit_nodes(|n| {
			if n.data.user_data.id == "a" {
				idx = Some(n.index());
			}
		});
		s.set_hover(idx);
		assert_eq!(s.hover.neighbors.len(), 1);
		assert_eq!(s.hover_title().as_deref(), Some("Ship: A"));

		s.set_hover(None);
		assert!(s.has_active_highlight());
		assert_eq!(s.hover_title(), None);
	}

	#[test]
	fn select_by_id_roundtrips() {
		let data = GraphData {
			nodes: vec![node("a"), node("b")],
			links: vec![],
		};
		let mut s = ForceGraphState::new(&data, 800.0, 600.0);
		s.select_id(Some("b"));
		let idx = s.selected.unwrap();
		assert_eq!(s.node_id(idx).as_deref(), Some("b"));
		s.select_id(Some("nope"));
		assert_eq!(s.selected, None);
	}

	#[test]
	fn origin_maps_to_canvas_center() {
		let s = ForceGraphState::new(&GraphData::default(), 800.0, 600.0);
		assert_eq!(s.screen_to_graph(400.0, 300.0), (0.0, 0.0));
	}
}
