//! Colors of the pirate theme.

/// Parchment gold, used for text, borders and plain edges.
pub const GOLD: &str = "#efd793";
/// Canvas background.
pub const SEA: &str = "#14181f";

/// Fallback for unknown node types, factions and conflicts.
pub const DEFAULT_NODE: &str = "#7c5700";

/// Fill color for a node type as returned by the API (`labels(n)[0]`).
pub fn node_type_color(kind: &str) -> &'static str {
	match kind {
		"Character" => "#7c5700",
		"Ship" => "#3c424d",
		"Location" => "#2e6b5e",
		"Movie" => "#6b2e5e",
		"Faction" => "#470606",
		_ => DEFAULT_NODE,
	}
}

/// Fill color for a character, keyed by faction.
pub fn faction_color(faction: Option<&str>) -> &'static str {
	match faction {
		Some("Pirates") | Some("Pirate") => "#7c5700",
		Some("Royal Navy") => "#1f4e8c",
		Some("East India Trading Company") => "#8c5a1f",
		Some("Cursed") | Some("Flying Dutchman") => "#470606",
		Some("Civilian") => "#4d6b3c",
		Some("Brethren Court") => "#8c1f4e",
		_ => DEFAULT_NODE,
	}
}

/// Edge color for a rivalry conflict type.
pub fn conflict_color(conflict: &str) -> &'static str {
	match conflict {
		"ENEMY" => "#e74c3c",
		"BETRAYED" => "#9b59b6",
		"RIVALRY" => "#e67e22",
		_ => GOLD,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn conflicts_map_to_distinct_colors() {
		assert_eq!(conflict_color("ENEMY"), "#e74c3c");
		assert_eq!(conflict_color("BETRAYED"), "#9b59b6");
		assert_eq!(conflict_color("RIVALRY"), "#e67e22");
		assert_eq!(conflict_color("MISTRUST"), GOLD);
		assert_eq!(conflict_color(""), GOLD);
	}

	#[test]
	fn unknown_types_fall_back() {
		assert_eq!(node_type_color("Kraken"), DEFAULT_NODE);
		assert_eq!(faction_color(None), DEFAULT_NODE);
		assert_ne!(faction_color(Some("Royal Navy")), DEFAULT_NODE);
	}
}
