//! Avatar file selection and pre-flight validation
//!
//! Files are checked locally before any network call: the declared MIME
//! type must be an image type and the size must stay under the ceiling.
//! Validation works on file metadata only; contents are read later, for
//! the preview and for the upload body.

use std::path::PathBuf;

use base64::{Engine as _, engine::general_purpose};

use crate::error::{UploadError, UploadResult};

/// Upload size ceiling in bytes (5 MiB)
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// A file chosen for avatar upload, described by its on-disk location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
	/// Location of the file on disk
	pub path: PathBuf,
	/// File name sent to the server
	pub filename: String,
	/// MIME type declared for the file, derived from its extension
	pub content_type: String,
	/// Size in bytes
	pub size: u64,
}

impl AvatarFile {
	/// Describe a file without touching the filesystem
	pub fn new(
		path: impl Into<PathBuf>,
		filename: impl Into<String>,
		content_type: impl Into<String>,
		size: u64,
	) -> Self {
		Self {
			path: path.into(),
			filename: filename.into(),
			content_type: content_type.into(),
			size,
		}
	}

	/// Describe a file on disk, deriving name, MIME type, and size
	///
	/// The MIME type comes from the file extension; unknown extensions
	/// map to `application/octet-stream`, which the validator rejects.
	pub async fn from_path(path: impl Into<PathBuf>) -> UploadResult<Self> {
		let path = path.into();
		let metadata = tokio::fs::metadata(&path)
			.await
			.map_err(|e| UploadError::Read(e.to_string()))?;
		let filename = path
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or("avatar")
			.to_string();
		let content_type = mime_guess::from_path(&path)
			.first_or_octet_stream()
			.to_string();

		Ok(Self {
			filename,
			content_type,
			size: metadata.len(),
			path,
		})
	}

	/// Read the file contents
	pub async fn read(&self) -> UploadResult<Vec<u8>> {
		tokio::fs::read(&self.path)
			.await
			.map_err(|e| UploadError::Read(e.to_string()))
	}

	/// Read the file and render it as a `data:` URL for local preview
	pub async fn preview_data_url(&self) -> UploadResult<String> {
		let content = self.read().await?;
		Ok(format!(
			"data:{};base64,{}",
			self.content_type,
			general_purpose::STANDARD.encode(content)
		))
	}
}

/// A validated file selection awaiting upload
///
/// Held only while the upload dialog is open; discarded on dialog close or
/// successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
	/// The chosen file
	pub file: AvatarFile,
	/// Local preview, filled in when generation completes
	pub preview: Option<String>,
}

impl PendingUpload {
	/// Wrap a freshly validated file with no preview yet
	pub fn new(file: AvatarFile) -> Self {
		Self {
			file,
			preview: None,
		}
	}
}

/// Pre-flight validator for chosen avatar files
///
/// # Examples
///
/// ```
/// use profile_manager::upload::{AvatarFile, AvatarValidator};
///
/// let validator = AvatarValidator::new();
/// let photo = AvatarFile::new("photo.png", "photo.png", "image/png", 1024);
/// assert!(validator.validate(&photo).is_ok());
///
/// let notes = AvatarFile::new("notes.txt", "notes.txt", "text/plain", 1024);
/// assert!(validator.validate(&notes).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct AvatarValidator {
	max_bytes: u64,
}

impl AvatarValidator {
	/// Create a validator with the standard 5 MiB ceiling
	pub fn new() -> Self {
		Self {
			max_bytes: MAX_AVATAR_BYTES,
		}
	}

	/// Create a validator with a custom size ceiling
	pub fn with_max_bytes(max_bytes: u64) -> Self {
		Self { max_bytes }
	}

	/// Check a chosen file against the type and size rules
	///
	/// The declared MIME type must begin with `image/` and the size must
	/// not exceed the ceiling. No file contents are read here and no
	/// network call is made; the server applies its own authoritative
	/// checks on upload.
	pub fn validate(&self, file: &AvatarFile) -> UploadResult<()> {
		if !file.content_type.starts_with("image/") {
			return Err(UploadError::InvalidType {
				content_type: file.content_type.clone(),
			});
		}

		if file.size > self.max_bytes {
			return Err(UploadError::TooLarge {
				size_bytes: file.size,
				max_bytes: self.max_bytes,
			});
		}

		Ok(())
	}
}

impl Default for AvatarValidator {
	fn default() -> Self {
		Self::new()
	}
}
