//! REST API client.
//!
//! Every call returns a typed record or an [`AppError`]. Requests are plain
//! sequential futures; the caller decides how a failure is shown.

pub mod types;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use types::*;

/// Thin wrapper over a shared `reqwest::Client` and the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
	client: Client,
	config: ApiConfig,
}

/// Decode a response body, surfacing `{"error": "..."}` payloads first.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
	let value: serde_json::Value = serde_json::from_str(body)?;
	if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
		return Err(AppError::Api(msg.to_string()));
	}
	Ok(serde_json::from_value(value)?)
}

/// `movie_id` query pair when a movie filter is active.
fn movie_query(movie_id: Option<&str>) -> Vec<(&'static str, &str)> {
	match movie_id {
		Some(id) if !id.is_empty() => vec![("movie_id", id)],
		_ => Vec::new(),
	}
}

/// Map a non-success reply to an error. Flask reports failures as
/// `{"error": ...}` with a 500.
fn status_error(url: &str, status: StatusCode, body: String) -> AppError {
	warn!("{} returned {}", url, status);
	if let Err(AppError::Api(msg)) = decode_body::<serde_json::Value>(&body) {
		return AppError::Api(msg);
	}
	AppError::Status {
		status: status.as_u16(),
		body,
	}
}

impl ApiClient {
	/// New client against `config`.
	pub fn new(config: ApiConfig) -> Self {
		Self {
			client: Client::new(),
			config,
		}
	}

	/// The configuration this client talks to.
	pub fn config(&self) -> &ApiConfig {
		&self.config
	}

	async fn read<T: DeserializeOwned>(&self, url: &str, response: reqwest::Response) -> Result<T> {
		let status = response.status();
		let body = response.text().await?;
		if !status.is_success() {
			return Err(status_error(url, status, body));
		}
		decode_body(&body)
	}

	/// GET `path` and decode the JSON body.
	pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.get_json_query(path, &[]).await
	}

	/// GET `path` with query pairs and decode the JSON body.
	pub async fn get_json_query<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, &str)],
	) -> Result<T> {
		let url = self.config.endpoint(path);
		debug!("GET {} {:?}", url, query);
		let mut request = self.client.get(&url);
		if !query.is_empty() {
			request = request.query(query);
		}
		let response = request.send().await?;
		self.read(&url, response).await
	}

	/// POST to `path` without a body and decode the JSON reply.
	pub async fn post_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = self.config.endpoint(path);
		debug!("POST {}", url);
		let response = self
			.client
			.post(&url)
			.header("Content-Type", "application/json")
			.body("{}")
			.send()
			.await?;
		self.read(&url, response).await
	}

	/// Backend and database reachability.
	///
	/// The backend answers 500 with a `Health` body when the database is
	/// down, so that body is returned whatever the status.
	pub async fn health(&self) -> Result<Health> {
		let url = self.config.endpoint("/health");
		debug!("GET {}", url);
		let response = self.client.get(&url).send().await?;
		let status = response.status();
		let body = response.text().await?;
		match serde_json::from_str::<Health>(&body) {
			Ok(health) => {
				if !status.is_success() {
					warn!("{} returned {}: {:?}", url, status, health.message);
				}
				Ok(health)
			}
			Err(_) if !status.is_success() => Err(status_error(&url, status, body)),
			Err(e) => Err(e.into()),
		}
	}

	/// Every character, ship, location and movie with all edges between them.
	pub async fn full_graph(&self) -> Result<FullGraph> {
		self.get_json("/graph/full").await
	}

	/// All characters, ordered by name.
	pub async fn characters(&self) -> Result<Vec<Character>> {
		self.get_json("/characters").await
	}

	/// Character-to-character relationships across all movies.
	pub async fn character_relationships(&self) -> Result<Vec<Relationship>> {
		self.get_json("/characters/relationships").await
	}

	/// Relationships within one movie.
	pub async fn movie_relationships(&self, movie_id: &str) -> Result<Vec<Relationship>> {
		self.get_json(&format!("/relationships/{}", urlencoding::encode(movie_id)))
			.await
	}

	/// Everything directly connected to a character.
	pub async fn character_connections(&self, character_id: &str) -> Result<Vec<Connection>> {
		self.get_json(&format!(
			"/character/{}/connections",
			urlencoding::encode(character_id)
		))
		.await
	}

	/// Movies a character appears in.
	pub async fn character_movies(&self, character_id: &str) -> Result<Vec<Movie>> {
		self.get_json(&format!("/character/{}/movies", urlencoding::encode(character_id)))
			.await
	}

	/// All movies by release year.
	pub async fn movies(&self) -> Result<Vec<Movie>> {
		self.get_json("/movies").await
	}

	/// Ship → location routes, optionally for one movie.
	pub async fn ship_routes(&self, movie_id: Option<&str>) -> Result<Vec<ShipRoute>> {
		self.get_json_query("/ships/routes", &movie_query(movie_id))
			.await
	}

	/// Hostile relationships, optionally for one movie.
	pub async fn rivalries(&self, movie_id: Option<&str>) -> Result<Vec<Rivalry>> {
		self.get_json_query("/rivalries", &movie_query(movie_id))
			.await
	}

	/// Faction membership, optionally restricted to a movie's cast.
	pub async fn factions(&self, movie_id: Option<&str>) -> Result<Vec<Faction>> {
		self.get_json_query("/factions", &movie_query(movie_id))
			.await
	}

	/// Free-text search. An empty query never hits the network.
	pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
		let query = query.trim();
		if query.is_empty() {
			return Ok(Vec::new());
		}
		self.get_json_query("/search", &[("q", query)]).await
	}

	/// Shortest relationship chain between two characters.
	pub async fn path(&self, from_id: &str, to_id: &str) -> Result<PathResult> {
		self.get_json(&format!(
			"/path/{}/{}",
			urlencoding::encode(from_id),
			urlencoding::encode(to_id)
		))
		.await
	}

	/// Top-five boards.
	pub async fn leaderboard(&self) -> Result<Leaderboard> {
		self.get_json("/leaderboard").await
	}

	/// A random adventure.
	pub async fn fortune(&self) -> Result<Fortune> {
		self.get_json("/fortune").await
	}

	/// A random pirate identity.
	pub async fn pirate_name(&self) -> Result<PirateName> {
		self.get_json("/pirate-name").await
	}

	/// A random quote.
	pub async fn wisdom(&self) -> Result<Wisdom> {
		self.get_json("/wisdom").await
	}

	/// How many times the rum has been gone.
	pub async fn rum_count(&self) -> Result<RumCount> {
		self.get_json("/rum").await
	}

	/// The rum is gone. Again.
	pub async fn rum_gone(&self) -> Result<RumCount> {
		self.post_json("/rum").await
	}
}

#[cfg(test)]
mod tests {
	use super::test_server::TestServer;
	use super::*;

	#[test]
	fn error_body_becomes_api_error() {
		let err = decode_body::<Vec<Character>>(r#"{"error": "Neo4j unavailable"}"#).unwrap_err();
		assert_eq!(err, AppError::Api("Neo4j unavailable".into()));
	}

	#[test]
	fn wrong_shape_is_decode_error() {
		let err = decode_body::<Vec<Character>>(r#"{"nodes": []}"#).unwrap_err();
		assert!(matches!(err, AppError::Decode(_)));
		let err = decode_body::<Wisdom>("<html>").unwrap_err();
		assert!(matches!(err, AppError::Decode(_)));
	}

	#[test]
	fn decodes_list() {
		let rows: Vec<Rivalry> = decode_body(
			r#"[{"char1_id":"jack","character1":"Jack","char2_id":"davy","character2":"Davy Jones","conflict_type":"ENEMY"}]"#,
		)
		.unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].conflict_type, "ENEMY");
	}

	#[test]
	fn movie_filter_is_optional() {
		assert!(movie_query(None).is_empty());
		assert!(movie_query(Some("")).is_empty());
		assert_eq!(movie_query(Some("potc1")), vec![("movie_id", "potc1")]);
	}

	#[tokio::test]
	async fn path_segments_and_queries_are_encoded() {
		let server = TestServer::start(200, "[]").await;
		let api = server.client();
		let _: Vec<Movie> = api.character_movies("a/b&c").await.unwrap();
		let _: Vec<Rivalry> = api.rivalries(Some("potc 2")).await.unwrap();
		let _: Vec<SearchHit> = api.search("jack & co").await.unwrap();
		assert_eq!(
			server.requests(),
			vec![
				"GET /api/character/a%2Fb%26c/movies",
				"GET /api/rivalries?movie_id=potc+2",
				"GET /api/search?q=jack+%26+co",
			]
		);
	}

	#[tokio::test]
	async fn health_body_survives_server_error() {
		let server =
			TestServer::start(500, r#"{"status":"error","message":"Neo4j down"}"#).await;
		let health = server.client().health().await.unwrap();
		assert_eq!(health.status, "error");
		assert_eq!(health.message.as_deref(), Some("Neo4j down"));
		assert!(!health.is_connected());
	}

	#[tokio::test]
	async fn health_without_body_is_status_error() {
		let server = TestServer::start(502, "Bad Gateway").await;
		let err = server.client().health().await.unwrap_err();
		assert_eq!(
			err,
			AppError::Status {
				status: 502,
				body: "Bad Gateway".into()
			}
		);
	}

	#[tokio::test]
	async fn error_status_with_error_body_is_api_error() {
		let server = TestServer::start(500, r#"{"error":"Neo4j unavailable"}"#).await;
		let err = server.client().characters().await.unwrap_err();
		assert_eq!(err, AppError::Api("Neo4j unavailable".into()));
	}

	#[tokio::test]
	async fn error_status_with_text_body_is_status_error() {
		let server = TestServer::start(500, "Internal Server Error").await;
		let err = server.client().movies().await.unwrap_err();
		assert_eq!(
			err,
			AppError::Status {
				status: 500,
				body: "Internal Server Error".into()
			}
		);
	}

	#[tokio::test]
	async fn blank_search_sends_nothing() {
		let server = TestServer::start(200, "[]").await;
		let api = server.client();
		assert!(api.search("").await.unwrap().is_empty());
		assert!(api.search("   ").await.unwrap().is_empty());
		assert!(server.requests().is_empty());
	}
}

/// Canned HTTP/1.1 responder on a local port. Records each request line.
#[cfg(test)]
pub(crate) mod test_server {
	use std::sync::{Arc, Mutex};

	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::net::TcpListener;

	use super::ApiClient;
	use crate::config::ApiConfig;

	pub(crate) struct TestServer {
		base: String,
		requests: Arc<Mutex<Vec<String>>>,
	}

	impl TestServer {
		/// Answer every request with `status` and `body`.
		pub(crate) async fn start(status: u16, body: &'static str) -> Self {
			let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
			let addr = listener.local_addr().unwrap();
			let requests = Arc::new(Mutex::new(Vec::new()));
			let seen = requests.clone();
			tokio::spawn(async move {
				loop {
					let Ok((mut socket, _)) = listener.accept().await else {
						return;
					};
					let mut raw = Vec::new();
					let mut buf = [0u8; 1024];
					while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
						match socket.read(&mut buf).await {
							Ok(0) | Err(_) => break,
							Ok(n) => raw.extend_from_slice(&buf[..n]),
						}
					}
					let head = String::from_utf8_lossy(&raw);
					let line = head.lines().next().unwrap_or_default();
					// "GET /path HTTP/1.1" -> "GET /path"
					let line = line.rsplit_once(' ').map_or(line, |(l, _)| l);
					seen.lock().unwrap().push(line.to_string());
					let reply = format!(
						"HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
						status,
						body.len(),
						body
					);
					let _ = socket.write_all(reply.as_bytes()).await;
					let _ = socket.shutdown().await;
				}
			});
			Self {
				base: format!("http://{}/api", addr),
				requests,
			}
		}

		/// A client pointed at this server.
		pub(crate) fn client(&self) -> ApiClient {
			ApiClient::new(ApiConfig::new(&self.base))
		}

		/// Request lines seen so far, without the protocol version.
		pub(crate) fn requests(&self) -> Vec<String> {
			self.requests.lock().unwrap().clone()
		}
	}
}
