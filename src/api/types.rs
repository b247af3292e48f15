//! Response records, one per endpoint shape.
//!
//! The backend builds its JSON straight from graph-database rows, so any
//! property may come back `null` and ids may be strings or integers. Fields
//! are therefore mostly optional and ids are normalised to `String`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn value_to_id(v: Value) -> Option<String> {
	match v {
		Value::String(s) => Some(s),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
	match Value::deserialize(d)? {
		Value::Null => Ok(String::new()),
		v @ (Value::String(_) | Value::Number(_)) => Ok(value_to_id(v).unwrap_or_default()),
		other => Err(de::Error::custom(format!("unexpected id: {}", other))),
	}
}

fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
	Ok(value_to_id(Value::deserialize(d)?))
}

fn id_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
	let values = Option::<Vec<Value>>::deserialize(d)?.unwrap_or_default();
	Ok(values.into_iter().filter_map(value_to_id).collect())
}

fn nullable_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Option<String>>, D::Error> {
	Ok(Option::<Vec<Option<String>>>::deserialize(d)?.unwrap_or_default())
}

/// `/health`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Health {
	/// "connected" when the database answered, "error" otherwise.
	pub status: String,
	/// Database URI the backend talks to.
	#[serde(default)]
	pub uri: Option<String>,
	/// Failure reason when not connected.
	#[serde(default)]
	pub message: Option<String>,
}

impl Health {
	/// Whether the backend reached its database.
	pub fn is_connected(&self) -> bool {
		self.status == "connected"
	}
}

/// Node record of `/graph/full`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ApiNode {
	#[serde(default, deserialize_with = "id_string")]
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	/// Node label in the database: Character, Ship, Location or Movie.
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	/// Every stored property of the node.
	#[serde(default)]
	pub props: Map<String, Value>,
}

/// Edge record of `/graph/full`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ApiEdge {
	#[serde(default, deserialize_with = "id_string")]
	pub from: String,
	#[serde(default, deserialize_with = "id_string")]
	pub to: String,
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	#[serde(default)]
	pub label: Option<String>,
}

/// `/graph/full`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct FullGraph {
	#[serde(default)]
	pub nodes: Vec<ApiNode>,
	#[serde(default)]
	pub edges: Vec<ApiEdge>,
}

/// `/characters`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Character {
	#[serde(default, deserialize_with = "id_string")]
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub role: Option<String>,
	#[serde(default)]
	pub faction: Option<String>,
	#[serde(default)]
	pub status: Option<String>,
}

impl Character {
	/// Name, falling back to the id.
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.id)
	}
}

/// Row of `/characters/relationships` and `/relationships/:movie`.
///
/// The per-movie variant carries factions but no movie id.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Relationship {
	#[serde(default, deserialize_with = "id_string")]
	pub source_id: String,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub source_faction: Option<String>,
	#[serde(default, deserialize_with = "id_string")]
	pub target_id: String,
	#[serde(default)]
	pub target: Option<String>,
	#[serde(default)]
	pub target_faction: Option<String>,
	#[serde(default)]
	pub relationship_type: Option<String>,
	#[serde(default, deserialize_with = "opt_id")]
	pub movie_id: Option<String>,
}

/// Row of `/character/:id/connections`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Connection {
	#[serde(default)]
	pub relationship_type: String,
	#[serde(default)]
	pub connected_type: Option<String>,
	#[serde(default)]
	pub connected_name: Option<String>,
	#[serde(default, deserialize_with = "opt_id")]
	pub connected_id: Option<String>,
	#[serde(default)]
	pub rel_detail: Option<String>,
	#[serde(default, deserialize_with = "opt_id")]
	pub movie_id: Option<String>,
}

/// `/movies` and `/character/:id/movies`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Movie {
	#[serde(default, deserialize_with = "id_string")]
	pub id: String,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub year: Option<i64>,
	#[serde(default)]
	pub budget: Option<f64>,
}

impl Movie {
	/// "Title (year)", or whatever subset is known.
	pub fn display_name(&self) -> String {
		let title = self.title.as_deref().unwrap_or(&self.id);
		match self.year {
			Some(y) => format!("{} ({})", title, y),
			None => title.to_string(),
		}
	}
}

/// Row of `/ships/routes`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ShipRoute {
	#[serde(default, deserialize_with = "id_string")]
	pub ship_id: String,
	#[serde(default)]
	pub ship_name: Option<String>,
	#[serde(default)]
	pub ship_type: Option<String>,
	#[serde(default, deserialize_with = "id_string")]
	pub location_id: String,
	#[serde(default)]
	pub location_name: Option<String>,
	#[serde(default)]
	pub location_desc: Option<String>,
	#[serde(default, deserialize_with = "opt_id")]
	pub movie_id: Option<String>,
	#[serde(default)]
	pub route_type: Option<String>,
}

/// Row of `/rivalries`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Rivalry {
	#[serde(default, deserialize_with = "id_string")]
	pub char1_id: String,
	#[serde(default)]
	pub character1: Option<String>,
	#[serde(default, deserialize_with = "id_string")]
	pub char2_id: String,
	#[serde(default)]
	pub character2: Option<String>,
	#[serde(default)]
	pub conflict_type: String,
	#[serde(default)]
	pub movie: Option<String>,
	#[serde(default, deserialize_with = "opt_id")]
	pub movie_id: Option<String>,
	#[serde(default)]
	pub faction1: Option<String>,
	#[serde(default)]
	pub faction2: Option<String>,
}

/// Row of `/factions`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Faction {
	/// `None` for characters without a faction.
	#[serde(default)]
	pub faction: Option<String>,
	/// Size of the whole faction, which may exceed the listed members.
	#[serde(default)]
	pub member_count: u32,
	/// Member names, index-aligned with `member_ids`. Unnamed members stay
	/// as `None`.
	#[serde(default, deserialize_with = "nullable_list")]
	pub members: Vec<Option<String>>,
	/// Member ids; nulls are dropped.
	#[serde(default, deserialize_with = "id_list")]
	pub member_ids: Vec<String>,
}

impl Faction {
	/// Characters without a faction are grouped under "Unaffiliated".
	pub fn name(&self) -> &str {
		self.faction.as_deref().unwrap_or("Unaffiliated")
	}
}

/// Row of `/search`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SearchHit {
	#[serde(default, deserialize_with = "id_string")]
	pub id: String,
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub props: Map<String, Value>,
}

/// A character along a `/path` result.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PathCharacter {
	#[serde(default, deserialize_with = "id_string")]
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub faction: Option<String>,
}

/// A hop along a `/path` result.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PathConnection {
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	#[serde(default, deserialize_with = "opt_id")]
	pub movie: Option<String>,
}

/// `/path/:id1/:id2`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PathResult {
	#[serde(default)]
	pub found: bool,
	#[serde(default)]
	pub characters: Vec<PathCharacter>,
	#[serde(default)]
	pub connections: Vec<PathConnection>,
	#[serde(default)]
	pub degrees: Option<u32>,
	#[serde(default)]
	pub message: Option<String>,
}

/// One leaderboard line. The count column differs per board.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LeaderEntry {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub faction: Option<String>,
	#[serde(default)]
	pub captain: Option<String>,
	#[serde(default, alias = "enemy_count", alias = "movies", alias = "locations")]
	pub connections: u32,
}

/// `/leaderboard`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Leaderboard {
	#[serde(default)]
	pub most_connected: Vec<LeaderEntry>,
	#[serde(default)]
	pub most_enemies: Vec<LeaderEntry>,
	#[serde(default)]
	pub most_appearances: Vec<LeaderEntry>,
	#[serde(default)]
	pub most_traveled_ships: Vec<LeaderEntry>,
}

/// Character, ship, location or enemy drawn by `/fortune`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct FortuneItem {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub role: Option<String>,
	#[serde(default)]
	pub faction: Option<String>,
	#[serde(rename = "type", default)]
	pub kind: Option<String>,
	#[serde(default)]
	pub captain: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
}

/// `/fortune`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Fortune {
	pub fortune: String,
	#[serde(default)]
	pub character: FortuneItem,
	#[serde(default)]
	pub ship: FortuneItem,
	#[serde(default)]
	pub location: FortuneItem,
	#[serde(default)]
	pub enemy: FortuneItem,
	#[serde(default)]
	pub lucky_number: u32,
	#[serde(default)]
	pub lucky_item: String,
}

/// `/pirate-name`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PirateName {
	pub pirate_name: String,
	#[serde(default)]
	pub vessel: String,
	#[serde(default)]
	pub crew_size: u32,
	#[serde(default)]
	pub bounty: String,
	#[serde(default)]
	pub reputation: String,
}

/// `/wisdom`
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Wisdom {
	pub quote: String,
	#[serde(default)]
	pub speaker: String,
}

/// `/rum`, both GET and POST.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct RumCount {
	#[serde(default)]
	pub times_gone: u32,
	#[serde(default)]
	pub message: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn ids_accept_numbers_and_nulls() {
		let c: Character = serde_json::from_value(json!({
			"id": 7, "name": null, "role": "Captain", "faction": "Pirates"
		}))
		.unwrap();
		assert_eq!(c.id, "7");
		assert_eq!(c.display_name(), "7");
		assert_eq!(c.status, None);

		let r: Relationship = serde_json::from_value(json!({
			"source_id": "jack", "target_id": null, "relationship_type": "ALLY"
		}))
		.unwrap();
		assert_eq!(r.target_id, "");
		assert_eq!(r.movie_id, None);
	}

	#[test]
	fn faction_names_keep_their_positions() {
		let f: Faction = serde_json::from_value(json!({
			"faction": null,
			"member_count": 3,
			"members": ["Jack", null, "Gibbs"],
			"member_ids": ["jack", 2, null]
		}))
		.unwrap();
		assert_eq!(f.name(), "Unaffiliated");
		assert_eq!(
			f.members,
			vec![Some("Jack".to_string()), None, Some("Gibbs".to_string())]
		);
		assert_eq!(f.member_ids, vec!["jack", "2"]);
	}

	#[test]
	fn leaderboard_reads_each_count_column() {
		let lb: Leaderboard = serde_json::from_value(json!({
			"most_connected": [{"name": "Jack", "faction": "Pirates", "connections": 12}],
			"most_enemies": [{"name": "Barbossa", "faction": "Pirates", "enemy_count": 5}],
			"most_appearances": [{"name": "Gibbs", "faction": "Pirates", "movies": 5}],
			"most_traveled_ships": [{"name": "Black Pearl", "captain": "Jack", "locations": 9}]
		}))
		.unwrap();
		assert_eq!(lb.most_connected[0].connections, 12);
		assert_eq!(lb.most_enemies[0].connections, 5);
		assert_eq!(lb.most_appearances[0].connections, 5);
		assert_eq!(lb.most_traveled_ships[0].connections, 9);
		assert_eq!(lb.most_traveled_ships[0].captain.as_deref(), Some("Jack"));
	}

	#[test]
	fn path_not_found_keeps_message() {
		let p: PathResult = serde_json::from_value(json!({
			"found": false,
			"message": "No path found between these characters!"
		}))
		.unwrap();
		assert!(!p.found);
		assert!(p.characters.is_empty());
		assert_eq!(p.degrees, None);
	}

	#[test]
	fn full_graph_keeps_props() {
		let g: FullGraph = serde_json::from_value(json!({
			"nodes": [{"id": "pearl", "label": "Black Pearl", "type": "Ship",
				"props": {"captain": "Jack", "guns": 32}}],
			"edges": [{"from": "jack", "to": "pearl", "type": "CAPTAIN_OF", "label": "CAPTAIN_OF"}]
		}))
		.unwrap();
		assert_eq!(g.nodes[0].kind.as_deref(), Some("Ship"));
		assert_eq!(g.nodes[0].props["guns"], json!(32));
		assert_eq!(g.edges[0].from, "jack");
	}

	#[test]
	fn movie_display_name() {
		let m = Movie {
			id: "potc1".into(),
			title: Some("The Curse of the Black Pearl".into()),
			year: Some(2003),
			budget: None,
		};
		assert_eq!(m.display_name(), "The Curse of the Black Pearl (2003)");
	}
}
