//! Error types for the explorer.

use thiserror::Error;

/// Anything that can go wrong between a click and a rendered panel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
	/// Transport failure (DNS, CORS, connection refused, ...).
	#[error("HTTP error: {0}")]
	Http(String),

	/// Non-success status code.
	#[error("API returned {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, possibly empty.
		body: String,
	},

	/// The body was not the JSON shape we expected.
	#[error("Decode error: {0}")]
	Decode(String),

	/// The API answered with an `{"error": ...}` body.
	#[error("API error: {0}")]
	Api(String),
}

impl From<reqwest::Error> for AppError {
	fn from(e: reqwest::Error) -> Self {
		AppError::Http(e.to_string())
	}
}

impl From<serde_json::Error> for AppError {
	fn from(e: serde_json::Error) -> Self {
		AppError::Decode(e.to_string())
	}
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, AppError>;
