//! # Profile Manager
//!
//! Client-side profile management over a remote REST API: list, create,
//! edit, and delete profiles, and upload or remove avatar images.
//!
//! The crate is organized around a synchronization state machine that owns
//! the cached profile list and the open dialog. Mutations never patch the
//! cache in place; every successful create, update, delete, or avatar
//! change triggers a full list re-fetch so server-assigned fields (ids,
//! timestamps, avatar URLs) can never drift from the backend.
//!
//! ## Module Organization
//!
//! - [`config`]: API base address resolution
//! - [`models`]: Wire data model (profiles, form data, upload responses)
//! - [`error`]: Closed error taxonomy for API and pre-flight failures
//! - [`api`]: HTTP client for the profile endpoints
//! - [`upload`]: Avatar file metadata, pre-flight validation, previews
//! - [`state`]: Pure state machine (intents, outcomes, effects)
//! - [`session`]: Async driver that performs the emitted effects
//! - [`output`]: Terminal formatting for the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use profile_manager::api::ApiClient;
//! use profile_manager::config::ApiConfig;
//! use profile_manager::models::ProfileFormData;
//! use profile_manager::session::Session;
//! use profile_manager::state::Intent;
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::new(ApiConfig::from_env()).unwrap();
//! let mut session = Session::new(client);
//!
//! session.dispatch(Intent::Refresh).await;
//! session.dispatch(Intent::OpenCreateForm).await;
//! session
//!     .dispatch(Intent::SubmitForm(ProfileFormData::new(
//!         "Ada",
//!         "ada@example.com",
//!     )))
//!     .await;
//!
//! println!("{} profiles", session.state().profiles.len());
//! # });
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod session;
pub mod state;
pub mod upload;

pub use api::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, UploadError, UploadResult};
pub use models::{DeleteAvatarResponse, Profile, ProfileFormData, UploadAvatarResponse};
pub use session::Session;
pub use state::{Effect, Intent, Notice, Outcome, Phase, SessionState};
pub use upload::{AvatarFile, AvatarValidator, MAX_AVATAR_BYTES, PendingUpload};
