//! Error types for the profile client
//!
//! Server failures are decoded into the closed [`ApiError`] taxonomy at the
//! API client boundary so callers can branch exhaustively on the kind
//! instead of inspecting raw response payloads. Pre-flight file rejections
//! are a separate [`UploadError`] since they never touch the network.

use thiserror::Error;

/// Result type for API client operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for pre-flight upload validation
pub type UploadResult<T> = Result<T, UploadError>;

/// Error returned by the remote API client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	/// Request never reached the server or the transport failed
	#[error("Network error: {0}")]
	Network(String),

	/// Server rejected the payload (400/422-class)
	#[error("Validation error: {message}")]
	Validation {
		/// Field the server attached the message to, if any
		field: Option<String>,
		/// Server-reported reason
		message: String,
	},

	/// Target does not exist server-side (404)
	#[error("Not found: {0}")]
	NotFound(String),

	/// Any other non-success status
	#[error("Request failed with status {status}: {message}")]
	Unexpected {
		/// HTTP status code
		status: u16,
		/// Response body text, or a parse failure description
		message: String,
	},
}

impl ApiError {
	/// Decode a non-success response into the closed taxonomy.
	///
	/// Recognizes the backend's DRF-style payloads: `{"detail": "..."}` on
	/// 404, `{"error": "..."}` on upload rejection, and field maps like
	/// `{"email": ["msg", ...]}` on validation failure. Bodies that decode
	/// as none of these fall back to the raw text.
	pub(crate) fn from_response(status: u16, body: &str) -> Self {
		match status {
			404 => {
				let message = decode_string_key(body, "detail")
					.unwrap_or_else(|| "Not found.".to_string());
				Self::NotFound(message)
			}
			400 | 422 => {
				if let Some(message) = decode_string_key(body, "error") {
					return Self::Validation {
						field: None,
						message,
					};
				}
				if let Some((field, message)) = decode_field_errors(body) {
					return Self::Validation {
						field: Some(field),
						message,
					};
				}
				if let Some(message) = decode_string_key(body, "detail") {
					return Self::Validation {
						field: None,
						message,
					};
				}
				Self::Validation {
					field: None,
					message: fallback_message(body),
				}
			}
			_ => Self::Unexpected {
				status,
				message: fallback_message(body),
			},
		}
	}
}

/// Decode `{"<key>": "message"}` from a JSON body
fn decode_string_key(body: &str, key: &str) -> Option<String> {
	let value: serde_json::Value = serde_json::from_str(body).ok()?;
	value.get(key)?.as_str().map(|s| s.to_string())
}

/// Decode the first entry of a DRF field-error map `{"field": ["msg", ...]}`
fn decode_field_errors(body: &str) -> Option<(String, String)> {
	let value: serde_json::Value = serde_json::from_str(body).ok()?;
	let map = value.as_object()?;
	for (field, messages) in map {
		if let Some(list) = messages.as_array()
			&& let Some(first) = list.first().and_then(|m| m.as_str())
		{
			return Some((field.clone(), first.to_string()));
		}
	}
	None
}

fn fallback_message(body: &str) -> String {
	let trimmed = body.trim();
	if trimmed.is_empty() {
		"Unknown error".to_string()
	} else {
		trimmed.to_string()
	}
}

/// Pre-flight rejection of a chosen avatar file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
	/// Declared MIME type is not an image type
	#[error("Please select an image file")]
	InvalidType {
		/// Declared MIME type of the rejected file
		content_type: String,
	},

	/// File exceeds the upload size ceiling
	#[error("File size must be less than 5MB")]
	TooLarge {
		/// Observed file size
		size_bytes: u64,
		/// Configured ceiling
		max_bytes: u64,
	},

	/// File could not be read from disk
	#[error("Failed to read file: {0}")]
	Read(String),
}
