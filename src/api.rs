//! Remote API client for the profile backend
//!
//! Wraps the REST endpoints under a configured base address. Every
//! operation is a single request/response exchange: no client-side
//! retries, no timeout overrides, no caching. Non-success responses are
//! decoded into [`ApiError`] here so callers never see raw payloads.

use reqwest::{Client, Method, multipart};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{DeleteAvatarResponse, Profile, ProfileFormData, UploadAvatarResponse};
use crate::upload::AvatarFile;

/// HTTP client for the profile REST API
///
/// # Examples
///
/// ```rust,no_run
/// use profile_manager::api::ApiClient;
/// use profile_manager::config::ApiConfig;
///
/// # tokio_test::block_on(async {
/// let client = ApiClient::new(ApiConfig::from_env()).unwrap();
/// let profiles = client.list_profiles().await.unwrap();
/// println!("{} profiles", profiles.len());
/// # });
/// ```
pub struct ApiClient {
	client: Client,
	base_url: String,
}

impl ApiClient {
	/// Create a client for the configured endpoint
	pub fn new(config: ApiConfig) -> ApiResult<Self> {
		let client = Client::builder()
			.build()
			.map_err(|e| ApiError::Network(format!("Failed to create client: {}", e)))?;

		Ok(Self {
			client,
			base_url: config.base_url,
		})
	}

	fn build_url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url.trim_end_matches('/'), path)
	}

	async fn request<T: DeserializeOwned>(
		&self,
		method: Method,
		path: &str,
		body: Option<&ProfileFormData>,
	) -> ApiResult<T> {
		let url = self.build_url(path);
		tracing::debug!(method = %method, url = %url, "issuing API request");

		let mut req = self.client.request(method, &url);
		if let Some(body) = body {
			req = req.json(body);
		}

		let response = req
			.send()
			.await
			.map_err(|e| ApiError::Network(format!("Request failed: {}", e)))?;
		let response = Self::check_status(response).await?;
		Self::decode(response).await
	}

	async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}

		let body = response
			.text()
			.await
			.unwrap_or_else(|_| "Unknown error".to_string());
		Err(ApiError::from_response(status.as_u16(), &body))
	}

	async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
		let status = response.status().as_u16();
		response.json().await.map_err(|e| ApiError::Unexpected {
			status,
			message: format!("Failed to parse response: {}", e),
		})
	}

	/// Fetch all profiles
	///
	/// An empty list is a valid, non-error result.
	pub async fn list_profiles(&self) -> ApiResult<Vec<Profile>> {
		self.request(Method::GET, "profiles/", None).await
	}

	/// Fetch a single profile by id
	pub async fn get_profile(&self, id: i64) -> ApiResult<Profile> {
		self.request(Method::GET, &format!("profiles/{}/", id), None)
			.await
	}

	/// Create a profile from form data
	pub async fn create_profile(&self, data: &ProfileFormData) -> ApiResult<Profile> {
		self.request(Method::POST, "profiles/", Some(data)).await
	}

	/// Update an existing profile
	pub async fn update_profile(&self, id: i64, data: &ProfileFormData) -> ApiResult<Profile> {
		self.request(Method::PUT, &format!("profiles/{}/", id), Some(data))
			.await
	}

	/// Delete a profile
	pub async fn delete_profile(&self, id: i64) -> ApiResult<()> {
		let url = self.build_url(&format!("profiles/{}/", id));
		tracing::debug!(url = %url, "deleting profile");

		let response = self
			.client
			.delete(&url)
			.send()
			.await
			.map_err(|e| ApiError::Network(format!("Request failed: {}", e)))?;
		Self::check_status(response).await?;
		Ok(())
	}

	/// Upload an avatar image as a multipart form
	///
	/// The file bytes are sent under the `avatar` field with the file's
	/// name and declared MIME type. The server runs its own type and size
	/// checks and may still reject the file with a validation error.
	pub async fn upload_avatar(&self, id: i64, file: &AvatarFile) -> ApiResult<UploadAvatarResponse> {
		let content = file
			.read()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;

		let part = multipart::Part::bytes(content)
			.file_name(file.filename.clone())
			.mime_str(&file.content_type)
			.map_err(|e| ApiError::Network(format!("Failed to set MIME type: {}", e)))?;
		let form = multipart::Form::new().part("avatar", part);

		let url = self.build_url(&format!("profiles/{}/upload_avatar/", id));
		tracing::debug!(url = %url, filename = %file.filename, size = file.size, "uploading avatar");

		let response = self
			.client
			.post(&url)
			.multipart(form)
			.send()
			.await
			.map_err(|e| ApiError::Network(format!("Request failed: {}", e)))?;
		let response = Self::check_status(response).await?;
		Self::decode(response).await
	}

	/// Remove the avatar from a profile
	pub async fn delete_avatar(&self, id: i64) -> ApiResult<DeleteAvatarResponse> {
		self.request(
			Method::DELETE,
			&format!("profiles/{}/delete_avatar/", id),
			None,
		)
		.await
	}
}
