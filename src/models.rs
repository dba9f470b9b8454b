//! Wire data model for the profile API
//!
//! Field names and nullability mirror the backend's JSON exactly. Profiles
//! are only ever constructed from server responses; the client never fills
//! in `id`, timestamps, or `avatar_url` itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A profile record as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
	/// Server-assigned identifier, immutable
	pub id: i64,
	/// Display name
	pub name: String,
	/// Contact email, uniqueness enforced server-side
	pub email: String,
	/// Free-form description, null when unset
	pub bio: Option<String>,
	/// Stored avatar file name, null until an avatar is uploaded
	pub avatar_filename: Option<String>,
	/// Fully-qualified avatar location, null until an avatar is uploaded
	pub avatar_url: Option<String>,
	/// Creation timestamp, server-assigned
	pub created_at: DateTime<Utc>,
	/// Last-modification timestamp, server-assigned
	pub updated_at: DateTime<Utc>,
}

impl Profile {
	/// Whether an avatar is currently stored for this profile
	pub fn has_avatar(&self) -> bool {
		self.avatar_url.is_some()
	}
}

/// Write-only projection submitted on create and update
///
/// The target `id` is never embedded in the payload; updates address it
/// through the request path.
///
/// # Examples
///
/// ```
/// use profile_manager::models::ProfileFormData;
///
/// let data = ProfileFormData::new("Ada", "ada@example.com").with_bio("Mathematician");
/// assert_eq!(data.bio.as_deref(), Some("Mathematician"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFormData {
	/// Display name
	pub name: String,
	/// Contact email
	pub email: String,
	/// Free-form description, omitted from the payload when unset
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
}

impl ProfileFormData {
	/// Create form data with the required fields
	pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			email: email.into(),
			bio: None,
		}
	}

	/// Set the bio field
	pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
		self.bio = Some(bio.into());
		self
	}
}

/// Server reply to an avatar upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadAvatarResponse {
	/// Whether the upload was accepted
	pub success: bool,
	/// Human-readable status message
	pub message: String,
	/// The profile with its avatar fields refreshed
	pub profile: Profile,
	/// Location of the uploaded avatar
	pub avatar_url: String,
}

/// Server reply to an avatar removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAvatarResponse {
	/// Whether the removal was accepted
	pub success: bool,
	/// Human-readable status message
	pub message: String,
}
