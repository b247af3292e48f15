//! Tabular rendition of the rows behind each view.

use serde_json::Value;

use crate::api::types::*;

/// Headers plus stringified rows, ready for `<table>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableData {
	/// Column names.
	pub headers: Vec<String>,
	/// One entry per row, same length as `headers`.
	pub rows: Vec<Vec<String>>,
}

impl TableData {
	fn new(headers: &[&str]) -> Self {
		Self {
			headers: headers.iter().map(|h| h.to_string()).collect(),
			rows: Vec::new(),
		}
	}

	fn push<const N: usize>(&mut self, cells: [Option<&str>; N]) {
		debug_assert_eq!(N, self.headers.len());
		self.rows
			.push(cells.iter().map(|c| c.unwrap_or("—").to_string()).collect());
	}

	/// No rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

/// Render a JSON property value without quotes around strings.
pub fn display_value(v: &Value) -> String {
	match v {
		Value::String(s) => s.clone(),
		Value::Null => "—".into(),
		Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
		other => other.to_string(),
	}
}

/// Every node of `/graph/full`.
pub fn full_graph(full: &FullGraph) -> TableData {
	let mut t = TableData::new(&["Type", "Name", "Id"]);
	for n in &full.nodes {
		t.push([n.kind.as_deref(), n.label.as_deref(), Some(n.id.as_str())]);
	}
	t
}

/// Character relationships, names falling back to ids.
pub fn relationships(rows: &[Relationship]) -> TableData {
	let mut t = TableData::new(&["Source", "Relationship", "Target", "Movie"]);
	for r in rows {
		t.push([
			r.source.as_deref().or(Some(r.source_id.as_str())),
			r.relationship_type.as_deref(),
			r.target.as_deref().or(Some(r.target_id.as_str())),
			r.movie_id.as_deref(),
		]);
	}
	t
}

/// One row per ship route.
pub fn ship_routes(rows: &[ShipRoute]) -> TableData {
	let mut t = TableData::new(&["Ship", "Type", "Location", "Movie", "Route"]);
	for r in rows {
		t.push([
			r.ship_name.as_deref(),
			r.ship_type.as_deref(),
			r.location_name.as_deref(),
			r.movie_id.as_deref(),
			r.route_type.as_deref(),
		]);
	}
	t
}

/// One row per conflict.
pub fn rivalries(rows: &[Rivalry]) -> TableData {
	let mut t = TableData::new(&["Character", "Conflict", "Character", "Movie"]);
	for r in rows {
		t.push([
			r.character1.as_deref(),
			Some(r.conflict_type.as_str()),
			r.character2.as_deref(),
			r.movie.as_deref(),
		]);
	}
	t
}

/// Factions with their member count and known member names.
pub fn factions(rows: &[Faction]) -> TableData {
	let mut t = TableData::new(&["Faction", "Members", "Names"]);
	for f in rows {
		let count = f.member_count.to_string();
		let names = f
			.members
			.iter()
			.flatten()
			.map(String::as_str)
			.collect::<Vec<_>>()
			.join(", ");
		t.push([Some(f.name()), Some(count.as_str()), Some(names.as_str())]);
	}
	t
}

/// Search hits.
pub fn search(hits: &[SearchHit]) -> TableData {
	let mut t = TableData::new(&["Type", "Name", "Id"]);
	for h in hits {
		t.push([h.kind.as_deref(), h.name.as_deref(), Some(h.id.as_str())]);
	}
	t
}

/// One row per step of a found path, naming the hop to the next step.
pub fn path(path: &PathResult) -> TableData {
	let mut t = TableData::new(&["Step", "Character", "Faction", "Next via"]);
	for (i, c) in path.characters.iter().enumerate() {
		let step = (i + 1).to_string();
		let via = path.connections.get(i).map(|hop| match (&hop.kind, &hop.movie) {
			(Some(k), Some(m)) => format!("{} ({})", k, m),
			(Some(k), None) => k.clone(),
			(None, m) => m.clone().unwrap_or_default(),
		});
		t.push([
			Some(step.as_str()),
			c.name.as_deref().or(Some(c.id.as_str())),
			c.faction.as_deref(),
			via.as_deref(),
		]);
	}
	t
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn missing_cells_are_dashes() {
		let t = rivalries(&[Rivalry {
			char1_id: "jack".into(),
			character1: Some("Jack".into()),
			char2_id: "davy".into(),
			conflict_type: "ENEMY".into(),
			..Default::default()
		}]);
		assert_eq!(t.headers.len(), 4);
		assert_eq!(t.rows, vec![vec!["Jack", "ENEMY", "—", "—"]]);
	}

	#[test]
	fn relationships_fall_back_to_ids() {
		let t = relationships(&[Relationship {
			source_id: "jack".into(),
			target_id: "will".into(),
			target: Some("Will".into()),
			..Default::default()
		}]);
		assert_eq!(t.rows[0][0], "jack");
		assert_eq!(t.rows[0][2], "Will");
	}

	#[test]
	fn path_rows_name_the_next_hop() {
		let p = PathResult {
			found: true,
			characters: vec![
				PathCharacter { id: "jack".into(), name: Some("Jack".into()), faction: None },
				PathCharacter { id: "will".into(), name: Some("Will".into()), faction: None },
			],
			connections: vec![PathConnection { kind: Some("ALLY".into()), movie: Some("potc1".into()) }],
			degrees: Some(1),
			message: None,
		};
		let t = path(&p);
		assert_eq!(t.rows[0], vec!["1", "Jack", "—", "ALLY (potc1)"]);
		assert_eq!(t.rows[1][3], "—");
	}

	#[test]
	fn faction_names_skip_unnamed_members() {
		let t = factions(&[Faction {
			faction: Some("Pirates".into()),
			member_count: 3,
			members: vec![Some("Jack".into()), None, Some("Gibbs".into())],
			member_ids: vec!["jack".into(), "tia".into(), "gibbs".into()],
		}]);
		assert_eq!(t.rows, vec![vec!["Pirates", "3", "Jack, Gibbs"]]);
	}

	#[test]
	fn values_display_plainly() {
		assert_eq!(display_value(&json!("Tortuga")), "Tortuga");
		assert_eq!(display_value(&json!(32)), "32");
		assert_eq!(display_value(&json!(["a", "b"])), "a, b");
		assert_eq!(display_value(&Value::Null), "—");
	}
}
