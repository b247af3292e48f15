//! API records → canvas graph data.
//!
//! The API mostly returns one row per edge, so endpoints repeat. Every view
//! funnels rows through [`GraphBuilder`], which keeps the first node seen
//! per id and numbers edges in row order.

pub mod palette;
pub mod table;

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::api::ApiClient;
use crate::api::types::*;
use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::error::Result;
use table::TableData;

/// Which query populated the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphView {
	/// Everything.
	Full,
	/// Characters and their relationships.
	Characters,
	/// Ships and the locations they sailed to.
	ShipRoutes,
	/// Hostile relationships.
	Rivalries,
	/// Faction hubs with their members.
	Factions,
	/// Relationships within one movie.
	Movie {
		/// Movie id sent to the API.
		id: String,
		/// Display title for the heading.
		title: String,
	},
	/// Free-text search results.
	Search(String),
	/// Six degrees between two characters.
	Path {
		/// Start character id.
		from: String,
		/// End character id.
		to: String,
	},
}

impl GraphView {
	/// Heading shown above the canvas.
	pub fn title(&self) -> String {
		match self {
			GraphView::Full => "Full Graph".into(),
			GraphView::Characters => "Character Relationships".into(),
			GraphView::ShipRoutes => "Ship Routes".into(),
			GraphView::Rivalries => "Rivalries".into(),
			GraphView::Factions => "Factions".into(),
			GraphView::Movie { title, .. } => format!("Relationships in {}", title),
			GraphView::Search(q) => format!("Search: \"{}\"", q),
			GraphView::Path { .. } => "Six Degrees of Jack Sparrow".into(),
		}
	}

	/// Views that honour the toolbar's movie selector.
	pub fn uses_movie_filter(&self) -> bool {
		matches!(
			self,
			GraphView::ShipRoutes | GraphView::Rivalries | GraphView::Factions
		)
	}
}

/// Everything a loaded view puts on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewResult {
	/// Canvas contents.
	pub graph: GraphData,
	/// Same rows, tabulated.
	pub table: TableData,
	/// One-line note for the status bar (path length, "no results", ...).
	pub summary: Option<String>,
}

/// Fetch and map a view. `movie` only applies where
/// [`GraphView::uses_movie_filter`] holds.
pub async fn load_view(api: &ApiClient, view: &GraphView, movie: Option<&str>) -> Result<ViewResult> {
	let movie = movie.filter(|_| view.uses_movie_filter());
	let result = match view {
		GraphView::Full => {
			let full = api.full_graph().await?;
			ViewResult {
				table: table::full_graph(&full),
				graph: from_full_graph(&full),
				summary: None,
			}
		}
		GraphView::Characters => {
			let characters = api.characters().await?;
			let relationships = api.character_relationships().await?;
			ViewResult {
				graph: from_character_relationships(&characters, &relationships),
				table: table::relationships(&relationships),
				summary: None,
			}
		}
		GraphView::ShipRoutes => {
			let routes = api.ship_routes(movie).await?;
			ViewResult {
				graph: from_ship_routes(&routes),
				table: table::ship_routes(&routes),
				summary: None,
			}
		}
		GraphView::Rivalries => {
			let rivalries = api.rivalries(movie).await?;
			ViewResult {
				graph: from_rivalries(&rivalries),
				table: table::rivalries(&rivalries),
				summary: None,
			}
		}
		GraphView::Factions => {
			let factions = api.factions(movie).await?;
			ViewResult {
				graph: from_factions(&factions),
				table: table::factions(&factions),
				summary: None,
			}
		}
		GraphView::Movie { id, .. } => {
			let rows = api.movie_relationships(id).await?;
			ViewResult {
				graph: from_movie_relationships(&rows),
				table: table::relationships(&rows),
				summary: rows
					.is_empty()
					.then(|| "No relationships recorded for this movie".to_string()),
			}
		}
		GraphView::Search(q) => {
			let hits = api.search(q).await?;
			ViewResult {
				summary: Some(format!("{} result(s)", hits.len())),
				graph: from_search(&hits),
				table: table::search(&hits),
			}
		}
		GraphView::Path { from, to } => {
			let path = api.path(from, to).await?;
			ViewResult {
				summary: Some(path_summary(&path)),
				graph: from_path(&path),
				table: table::path(&path),
			}
		}
	};
	Ok(result)
}

/// Accumulates nodes keyed by id and edges in insertion order.
#[derive(Default)]
pub struct GraphBuilder {
	nodes: Vec<GraphNode>,
	index: HashMap<String, usize>,
	links: Vec<GraphLink>,
}

impl GraphBuilder {
	/// Insert a node unless its id is empty or already present.
	pub fn node(&mut self, node: GraphNode) {
		if node.id.is_empty() || self.index.contains_key(&node.id) {
			return;
		}
		self.index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
	}

	/// Append an edge with a sequential id.
	pub fn link(
		&mut self,
		source: &str,
		target: &str,
		label: Option<String>,
		title: Option<String>,
		color: Option<&str>,
	) {
		let id = format!("e{}", self.links.len());
		self.links.push(GraphLink {
			id,
			source: source.to_string(),
			target: target.to_string(),
			label,
			title,
			color: color.map(str::to_string),
		});
	}

	/// Number of distinct nodes so far.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Grow an existing node, used for faction hubs.
	fn resize(&mut self, id: &str, size: f64) {
		if let Some(&i) = self.index.get(id) {
			self.nodes[i].size = Some(size);
		}
	}

	/// Hand the result to the canvas. Self links and links to ids that
	/// never became nodes are dropped, and the rest renumbered, so the edge
	/// count matches what gets drawn.
	pub fn finish(self) -> GraphData {
		let index = self.index;
		let links = self
			.links
			.into_iter()
			.filter(|l| {
				l.source != l.target
					&& index.contains_key(&l.source)
					&& index.contains_key(&l.target)
			})
			.enumerate()
			.map(|(i, l)| GraphLink {
				id: format!("e{}", i),
				..l
			})
			.collect();
		GraphData {
			nodes: self.nodes,
			links,
		}
	}
}

fn character_node(id: &str, name: Option<&str>, faction: Option<&str>) -> GraphNode {
	let label = name.unwrap_or(id).to_string();
	let mut props = Map::new();
	if let Some(f) = faction {
		props.insert("faction".into(), Value::String(f.into()));
	}
	GraphNode {
		id: id.to_string(),
		title: Some(match faction {
			Some(f) => format!("{}\nFaction: {}", label, f),
			None => label.clone(),
		}),
		label: Some(label),
		group: Some("Character".into()),
		color: Some(palette::faction_color(faction).into()),
		size: None,
		props,
	}
}

fn typed_node(id: &str, label: Option<&str>, kind: &str, props: Map<String, Value>) -> GraphNode {
	let label = label.unwrap_or(id).to_string();
	GraphNode {
		id: id.to_string(),
		title: Some(format!("{}: {}", kind, label)),
		label: Some(label),
		group: Some(kind.to_string()),
		color: Some(palette::node_type_color(kind).into()),
		size: None,
		props,
	}
}

/// `/graph/full`: field renaming plus type colors.
pub fn from_full_graph(full: &FullGraph) -> GraphData {
	let mut b = GraphBuilder::default();
	for n in &full.nodes {
		let kind = n.kind.as_deref().unwrap_or("Unknown");
		b.node(typed_node(&n.id, n.label.as_deref(), kind, n.props.clone()));
	}
	for e in &full.edges {
		let label = e.label.clone().or_else(|| e.kind.clone());
		b.link(&e.from, &e.to, label, e.kind.clone(), None);
	}
	b.finish()
}

fn add_relationship(b: &mut GraphBuilder, r: &Relationship) {
	b.node(character_node(
		&r.source_id,
		r.source.as_deref(),
		r.source_faction.as_deref(),
	));
	b.node(character_node(
		&r.target_id,
		r.target.as_deref(),
		r.target_faction.as_deref(),
	));
	let title = match (&r.relationship_type, &r.movie_id) {
		(Some(t), Some(m)) => Some(format!("{} ({})", t, m)),
		(Some(t), None) => Some(t.clone()),
		(None, m) => m.clone(),
	};
	b.link(
		&r.source_id,
		&r.target_id,
		r.relationship_type.clone(),
		title,
		None,
	);
}

/// `/characters` + `/characters/relationships`. Characters without any
/// relationship still get a node.
pub fn from_character_relationships(characters: &[Character], relationships: &[Relationship]) -> GraphData {
	let mut b = GraphBuilder::default();
	for c in characters {
		let mut node = character_node(&c.id, c.name.as_deref(), c.faction.as_deref());
		for (key, value) in [("role", &c.role), ("status", &c.status)] {
			if let Some(v) = value {
				node.props.insert(key.into(), Value::String(v.clone()));
			}
		}
		b.node(node);
	}
	for r in relationships {
		add_relationship(&mut b, r);
	}
	b.finish()
}

/// `/relationships/:movie`
pub fn from_movie_relationships(rows: &[Relationship]) -> GraphData {
	let mut b = GraphBuilder::default();
	for r in rows {
		add_relationship(&mut b, r);
	}
	b.finish()
}

/// `/ships/routes`: ships and locations deduplicated, one edge per route.
pub fn from_ship_routes(rows: &[ShipRoute]) -> GraphData {
	let mut b = GraphBuilder::default();
	for r in rows {
		let mut ship_props = Map::new();
		if let Some(t) = &r.ship_type {
			ship_props.insert("type".into(), Value::String(t.clone()));
		}
		b.node(typed_node(&r.ship_id, r.ship_name.as_deref(), "Ship", ship_props));

		let mut loc_props = Map::new();
		if let Some(d) = &r.location_desc {
			loc_props.insert("description".into(), Value::String(d.clone()));
		}
		let mut loc = typed_node(
			&r.location_id,
			r.location_name.as_deref(),
			"Location",
			loc_props,
		);
		if let Some(d) = &r.location_desc {
			loc.title = Some(format!("{}\n{}", loc.label.as_deref().unwrap_or_default(), d));
		}
		b.node(loc);

		let title = match &r.route_type {
			Some(t) => format!("{} ({})", t, r.movie_id.as_deref().unwrap_or("?")),
			None => r.movie_id.clone().unwrap_or_default(),
		};
		b.link(&r.ship_id, &r.location_id, r.movie_id.clone(), Some(title), None);
	}
	b.finish()
}

/// `/rivalries`: one edge per row, colored by conflict type.
pub fn from_rivalries(rows: &[Rivalry]) -> GraphData {
	let mut b = GraphBuilder::default();
	for r in rows {
		b.node(character_node(
			&r.char1_id,
			r.character1.as_deref(),
			r.faction1.as_deref(),
		));
		b.node(character_node(
			&r.char2_id,
			r.character2.as_deref(),
			r.faction2.as_deref(),
		));
		let title = match &r.movie {
			Some(m) => format!("{} in {}", r.conflict_type, m),
			None => r.conflict_type.clone(),
		};
		b.link(
			&r.char1_id,
			&r.char2_id,
			Some(r.conflict_type.clone()),
			Some(title),
			Some(palette::conflict_color(&r.conflict_type)),
		);
	}
	b.finish()
}

/// Hub id for a faction; prefixed so it can never clash with a character id.
pub fn faction_node_id(name: &str) -> String {
	format!("faction:{}", name)
}

/// `/factions`: a hub per faction, sized by membership, members around it.
pub fn from_factions(rows: &[Faction]) -> GraphData {
	let mut b = GraphBuilder::default();
	for f in rows {
		let hub = faction_node_id(f.name());
		let mut props = Map::new();
		props.insert("member_count".into(), Value::from(f.member_count));
		let mut node = typed_node(&hub, Some(f.name()), "Faction", props);
		node.title = Some(format!("{}\n{} member(s)", f.name(), f.member_count));
		b.node(node);
		b.resize(&hub, 1.5 + (f.member_count as f64).sqrt() * 0.5);

		for (i, member_id) in f.member_ids.iter().enumerate() {
			let name = f.members.get(i).and_then(|m| m.as_deref());
			b.node(character_node(member_id, name, f.faction.as_deref()));
			b.link(member_id, &hub, Some("MEMBER_OF".into()), None, None);
		}
	}
	b.finish()
}

/// `/search`: hits only, no edges.
pub fn from_search(hits: &[SearchHit]) -> GraphData {
	let mut b = GraphBuilder::default();
	for h in hits {
		let kind = h.kind.as_deref().unwrap_or("Unknown");
		b.node(typed_node(&h.id, h.name.as_deref(), kind, h.props.clone()));
	}
	b.finish()
}

/// `/path`: the chain of characters, empty when nothing was found.
pub fn from_path(path: &PathResult) -> GraphData {
	let mut b = GraphBuilder::default();
	if !path.found {
		return b.finish();
	}
	for c in &path.characters {
		b.node(character_node(&c.id, c.name.as_deref(), c.faction.as_deref()));
	}
	for (pair, hop) in path.characters.windows(2).zip(&path.connections) {
		let title = hop.movie.as_ref().map(|m| format!("in {}", m));
		b.link(&pair[0].id, &pair[1].id, hop.kind.clone(), title, Some(palette::GOLD));
	}
	b.finish()
}

/// "Jack → Gibbs → Will: 2 degree(s)" or the server's not-found message.
pub fn path_summary(path: &PathResult) -> String {
	if !path.found {
		return path
			.message
			.clone()
			.unwrap_or_else(|| "No path found between these characters!".into());
	}
	let names: Vec<&str> = path
		.characters
		.iter()
		.map(|c| c.name.as_deref().unwrap_or(&c.id))
		.collect();
	let degrees = path
		.degrees
		.unwrap_or(path.connections.len() as u32);
	format!("{}: {} degree(s) of separation", names.join(" → "), degrees)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::test_server::TestServer;
	use serde_json::json;

	fn rivalry(a: &str, b: &str, kind: &str) -> Rivalry {
		Rivalry {
			char1_id: a.into(),
			character1: Some(a.to_uppercase()),
			char2_id: b.into(),
			character2: Some(b.to_uppercase()),
			conflict_type: kind.into(),
			movie: Some("Dead Man's Chest".into()),
			..Default::default()
		}
	}

	#[test]
	fn rivalries_one_edge_per_row_with_conflict_colors() {
		let rows = vec![
			rivalry("jack", "davy", "ENEMY"),
			rivalry("jack", "barbossa", "RIVALRY"),
			rivalry("barbossa", "jack", "BETRAYED"),
			rivalry("will", "jack", "MISTRUST"),
		];
		let g = from_rivalries(&rows);
		assert_eq!(g.links.len(), rows.len());
		assert_eq!(g.nodes.len(), 4);
		let colors: Vec<_> = g.links.iter().map(|l| l.color.as_deref().unwrap()).collect();
		assert_eq!(colors, vec!["#e74c3c", "#e67e22", "#9b59b6", palette::GOLD]);
		assert_eq!(g.links[0].title.as_deref(), Some("ENEMY in Dead Man's Chest"));
		let ids: Vec<_> = g.links.iter().map(|l| l.id.as_str()).collect();
		assert_eq!(ids, vec!["e0", "e1", "e2", "e3"]);
	}

	#[test]
	fn ship_routes_deduplicate_ships_and_locations() {
		let rows: Vec<ShipRoute> = serde_json::from_value(json!([
			{"ship_id": "pearl", "ship_name": "Black Pearl", "location_id": "tortuga",
			 "location_name": "Tortuga", "movie_id": "potc1", "route_type": "SAILED_TO"},
			{"ship_id": "pearl", "ship_name": "Black Pearl", "location_id": "isla",
			 "location_name": "Isla de Muerta", "location_desc": "Cursed gold", "movie_id": "potc1"},
			{"ship_id": "dutchman", "ship_name": "Flying Dutchman", "location_id": "tortuga",
			 "location_name": "Tortuga", "movie_id": "potc2"}
		]))
		.unwrap();
		let g = from_ship_routes(&rows);
		assert_eq!(g.nodes.len(), 4);
		assert_eq!(g.links.len(), 3);
		let isla = g.node("isla").unwrap();
		assert_eq!(isla.group.as_deref(), Some("Location"));
		assert_eq!(isla.title.as_deref(), Some("Isla de Muerta\nCursed gold"));
		assert_eq!(g.links[0].title.as_deref(), Some("SAILED_TO (potc1)"));
		assert_eq!(g.links[2].label.as_deref(), Some("potc2"));
	}

	#[test]
	fn first_occurrence_wins() {
		let mut b = GraphBuilder::default();
		b.node(character_node("jack", Some("Jack Sparrow"), Some("Pirates")));
		b.node(character_node("jack", Some("Someone Else"), None));
		b.node(character_node("", Some("Nobody"), None));
		assert_eq!(b.node_count(), 1);
		let g = b.finish();
		assert_eq!(g.nodes[0].label.as_deref(), Some("Jack Sparrow"));
	}

	#[test]
	fn characters_without_relationships_are_kept() {
		let characters = vec![
			Character {
				id: "jack".into(),
				name: Some("Jack Sparrow".into()),
				role: Some("Captain".into()),
				faction: Some("Pirates".into()),
				status: None,
			},
			Character {
				id: "tia".into(),
				name: Some("Tia Dalma".into()),
				..Default::default()
			},
		];
		let rels = vec![Relationship {
			source_id: "jack".into(),
			target_id: "will".into(),
			target: Some("Will Turner".into()),
			relationship_type: Some("ALLY".into()),
			movie_id: Some("potc1".into()),
			..Default::default()
		}];
		let g = from_character_relationships(&characters, &rels);
		assert_eq!(g.nodes.len(), 3);
		assert_eq!(g.node("jack").unwrap().props["role"], json!("Captain"));
		assert_eq!(g.links[0].title.as_deref(), Some("ALLY (potc1)"));
		assert_eq!(g.node("will").unwrap().label.as_deref(), Some("Will Turner"));
	}

	#[test]
	fn factions_become_hubs() {
		let rows = vec![Faction {
			faction: Some("Royal Navy".into()),
			member_count: 4,
			members: vec![Some("Norrington".into()), Some("Gillette".into())],
			member_ids: vec!["norrington".into(), "gillette".into()],
		}];
		let g = from_factions(&rows);
		let hub = g.node("faction:Royal Navy").unwrap();
		assert_eq!(hub.size, Some(2.5));
		assert_eq!(hub.group.as_deref(), Some("Faction"));
		assert_eq!(g.links.len(), 2);
		assert!(g.links.iter().all(|l| l.target == "faction:Royal Navy"));
		assert_eq!(g.node("gillette").unwrap().label.as_deref(), Some("Gillette"));
	}

	#[test]
	fn full_graph_renames_fields() {
		let full: FullGraph = serde_json::from_value(json!({
			"nodes": [
				{"id": "jack", "label": "Jack Sparrow", "type": "Character", "props": {"role": "Captain"}},
				{"id": "pearl", "label": "Black Pearl", "type": "Ship", "props": {}}
			],
			"edges": [{"from": "jack", "to": "pearl", "type": "CAPTAIN_OF", "label": "CAPTAIN_OF"}]
		}))
		.unwrap();
		let g = from_full_graph(&full);
		let jack = g.node("jack").unwrap();
		assert_eq!(jack.title.as_deref(), Some("Character: Jack Sparrow"));
		assert_eq!(jack.color.as_deref(), Some(palette::node_type_color("Character")));
		assert_eq!(g.links[0].source, "jack");
		assert_eq!(g.links[0].label.as_deref(), Some("CAPTAIN_OF"));
	}

	#[test]
	fn path_is_a_chain() {
		let path: PathResult = serde_json::from_value(json!({
			"found": true,
			"characters": [
				{"id": "jack", "name": "Jack"},
				{"id": "gibbs", "name": "Gibbs"},
				{"id": "will", "name": "Will"}
			],
			"connections": [{"type": "CREW", "movie": "potc1"}, {"type": "ALLY", "movie": "potc2"}],
			"degrees": 2
		}))
		.unwrap();
		let g = from_path(&path);
		assert_eq!(g.nodes.len(), 3);
		assert_eq!(g.links.len(), 2);
		assert_eq!(g.links[1].source, "gibbs");
		assert_eq!(g.links[1].title.as_deref(), Some("in potc2"));
		assert_eq!(path_summary(&path), "Jack → Gibbs → Will: 2 degree(s) of separation");
	}

	#[test]
	fn missing_path_is_empty() {
		let path = PathResult {
			found: false,
			message: Some("No path found between these characters!".into()),
			..Default::default()
		};
		assert!(from_path(&path).is_empty());
		assert_eq!(path_summary(&path), "No path found between these characters!");
	}

	#[test]
	fn search_hits_have_no_edges() {
		let hits = vec![SearchHit {
			id: "tortuga".into(),
			kind: Some("Location".into()),
			name: Some("Tortuga".into()),
			props: Map::new(),
		}];
		let g = from_search(&hits);
		assert_eq!(g.nodes.len(), 1);
		assert!(g.links.is_empty());
	}

	#[test]
	fn movie_filter_applies_to_some_views() {
		assert!(GraphView::Rivalries.uses_movie_filter());
		assert!(GraphView::Factions.uses_movie_filter());
		assert!(!GraphView::Full.uses_movie_filter());
		let movie = GraphView::Movie {
			id: "potc1".into(),
			title: "The Curse of the Black Pearl".into(),
		};
		assert!(!movie.uses_movie_filter());
		assert_eq!(movie.title(), "Relationships in The Curse of the Black Pearl");
	}

	#[test]
	fn unnamed_faction_members_fall_back_to_their_id() {
		let rows: Vec<Faction> = serde_json::from_value(json!([{
			"faction": "Pirates",
			"member_count": 3,
			"members": ["Jack", null, "Gibbs"],
			"member_ids": ["jack", "tia", "gibbs"]
		}]))
		.unwrap();
		let g = from_factions(&rows);
		assert_eq!(g.node("jack").unwrap().label.as_deref(), Some("Jack"));
		assert_eq!(g.node("tia").unwrap().label.as_deref(), Some("tia"));
		assert_eq!(g.node("gibbs").unwrap().label.as_deref(), Some("Gibbs"));
	}

	#[test]
	fn dangling_and_self_links_are_dropped() {
		let full: FullGraph = serde_json::from_value(json!({
			"nodes": [
				{"id": "jack", "label": "Jack Sparrow", "type": "Character"},
				{"id": "pearl", "label": "Black Pearl", "type": "Ship"}
			],
			"edges": [
				{"from": "jack", "to": "kraken", "type": "FOUGHT"},
				{"from": "jack", "to": "jack", "type": "TALKS_TO"},
				{"from": "jack", "to": "pearl", "type": "CAPTAIN_OF"}
			]
		}))
		.unwrap();
		let g = from_full_graph(&full);
		assert_eq!(g.links.len(), 1);
		assert_eq!(g.links[0].id, "e0");
		assert_eq!(g.links[0].target, "pearl");
	}

	async fn load_with_movie(view: GraphView) -> Vec<String> {
		let server = TestServer::start(200, "[]").await;
		load_view(&server.client(), &view, Some("potc1")).await.unwrap();
		server.requests()
	}

	#[tokio::test]
	async fn movie_selector_only_filters_some_views() {
		assert_eq!(
			load_with_movie(GraphView::Rivalries).await,
			vec!["GET /api/rivalries?movie_id=potc1"]
		);
		assert_eq!(
			load_with_movie(GraphView::ShipRoutes).await,
			vec!["GET /api/ships/routes?movie_id=potc1"]
		);
		assert_eq!(
			load_with_movie(GraphView::Factions).await,
			vec!["GET /api/factions?movie_id=potc1"]
		);
		assert_eq!(
			load_with_movie(GraphView::Characters).await,
			vec!["GET /api/characters", "GET /api/characters/relationships"]
		);
		assert_eq!(
			load_with_movie(GraphView::Search("pearl".into())).await,
			vec!["GET /api/search?q=pearl"]
		);
	}

	#[tokio::test]
	async fn full_view_ignores_movie_selector() {
		let server = TestServer::start(200, r#"{"nodes":[],"edges":[]}"#).await;
		let result = load_view(&server.client(), &GraphView::Full, Some("potc1"))
			.await
			.unwrap();
		assert!(result.graph.is_empty());
		assert_eq!(server.requests(), vec!["GET /api/graph/full"]);
	}

}
