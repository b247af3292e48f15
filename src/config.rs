//! Where the REST API lives.

/// Fallback when neither the build environment nor the page tells us.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// API location, resolved once at startup and shared via context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	/// Base URL without a trailing slash, e.g. `https://host/api`.
	pub base_url: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new(DEFAULT_API_BASE)
	}
}

impl ApiConfig {
	/// Build a config from an explicit base URL.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url: String = base_url.into();
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
		}
	}

	/// Resolve the base URL: `PIRATE_API_BASE` at build time, then the page
	/// origin, then [`DEFAULT_API_BASE`].
	pub fn from_env() -> Self {
		if let Some(base) = option_env!("PIRATE_API_BASE").filter(|b| !b.is_empty()) {
			return Self::new(base);
		}
		match page_origin() {
			Some(origin) => Self::new(format!("{}/api", origin)),
			None => Self::default(),
		}
	}

	/// Absolute URL for an endpoint path such as `/graph/full`.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

fn page_origin() -> Option<String> {
	// `window()` is absent outside the browser (unit tests, workers).
	if !cfg!(target_arch = "wasm32") {
		return None;
	}
	let origin = web_sys::window()?.location().origin().ok()?;
	// file:// pages report "null"
	(origin.starts_with("http")).then_some(origin)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_with_single_slash() {
		let cfg = ApiConfig::new("http://example.com/api/");
		assert_eq!(cfg.base_url, "http://example.com/api");
		assert_eq!(cfg.endpoint("/graph/full"), "http://example.com/api/graph/full");
		assert_eq!(cfg.endpoint("wisdom"), "http://example.com/api/wisdom");
	}

	#[test]
	fn default_points_at_local_server() {
		assert_eq!(
			ApiConfig::default().endpoint("/health"),
			"http://localhost:5000/api/health"
		);
	}
}
