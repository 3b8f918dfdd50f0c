//! Request-level error classes of the tile server.
//!
//! Each variant maps to one HTTP status; bodies are always a JSON object
//! `{"error": "<message>"}`. Internal errors are logged server-side and only
//! a generic message reaches the caller.

use axum::{
	http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, StatusCode},
	response::{IntoResponse, Response},
	Json,
};
use serde_json::json;

/// A per-request failure. Never crashes the server; each request is isolated.
#[derive(Debug, PartialEq, Eq)]
pub enum ServeError {
	/// A z/x/y segment contained something other than decimal digits.
	InvalidCoordinate(String),
	/// The requested extension is not in the allow-list.
	UnsupportedExtension(String),
	/// The resolved path would leave the tile root.
	PathEscape,
	/// No tile stored at the requested coordinate.
	NotFound,
	/// Unexpected filesystem failure; details stay server-side.
	Internal,
}

impl ServeError {
	/// The HTTP status code of this error class.
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			ServeError::InvalidCoordinate(_) => StatusCode::BAD_REQUEST,
			ServeError::UnsupportedExtension(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
			ServeError::PathEscape => StatusCode::FORBIDDEN,
			ServeError::NotFound => StatusCode::NOT_FOUND,
			ServeError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// The message reported to the caller.
	#[must_use]
	pub fn message(&self) -> String {
		match self {
			ServeError::InvalidCoordinate(segment) => {
				format!("invalid tile coordinate: '{segment}' is not a sequence of digits")
			}
			ServeError::UnsupportedExtension(ext) => format!("unsupported tile extension: '{ext}'"),
			ServeError::PathEscape => "resolved path escapes the tile directory".to_string(),
			ServeError::NotFound => "tile not found".to_string(),
			ServeError::Internal => "internal server error".to_string(),
		}
	}
}

impl IntoResponse for ServeError {
	fn into_response(self) -> Response {
		(
			self.status(),
			[(ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
			Json(json!({ "error": self.message() })),
		)
			.into_response()
	}
}
