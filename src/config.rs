//! API endpoint configuration
//!
//! The backend base URL is resolved once at startup, either from the
//! `PROFILES_API_URL` environment variable or from a loopback default,
//! and stays fixed for the process lifetime.

use std::env;

/// Environment variable naming the backend API base URL
pub const API_URL_ENV: &str = "PROFILES_API_URL";

/// Base URL used when [`API_URL_ENV`] is unset
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Backend API endpoint configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
	/// Base URL of the profile API (e.g., "http://127.0.0.1:8000/api")
	pub base_url: String,
}

impl ApiConfig {
	/// Create a configuration with an explicit base URL
	///
	/// # Examples
	///
	/// ```
	/// use profile_manager::config::ApiConfig;
	///
	/// let config = ApiConfig::new("http://127.0.0.1:8000/api");
	/// assert_eq!(config.base_url, "http://127.0.0.1:8000/api");
	/// ```
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
		}
	}

	/// Read the base URL from `PROFILES_API_URL`, falling back to the default
	pub fn from_env() -> Self {
		let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
		Self { base_url }
	}
}
