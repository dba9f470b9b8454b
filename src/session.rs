//! Async session driver
//!
//! [`Session`] owns the API client and performs the effects the reducer
//! emits, feeding each completion back into the state until it settles.
//! Effects run sequentially on the calling task, which preserves the
//! single-logical-thread model: a new intent is only accepted once the
//! previous one has fully resolved.

use std::collections::VecDeque;

use crate::api::ApiClient;
use crate::state::{Effect, Intent, Outcome, SessionState};

/// A profile-management session bound to one API endpoint
///
/// # Examples
///
/// ```rust,no_run
/// use profile_manager::api::ApiClient;
/// use profile_manager::config::ApiConfig;
/// use profile_manager::session::Session;
/// use profile_manager::state::Intent;
///
/// # tokio_test::block_on(async {
/// let client = ApiClient::new(ApiConfig::from_env()).unwrap();
/// let mut session = Session::new(client);
/// session.dispatch(Intent::Refresh).await;
/// println!("{} profiles", session.state().profiles.len());
/// # });
/// ```
pub struct Session {
	client: ApiClient,
	state: SessionState,
}

impl Session {
	/// Create a session over the given client with nothing loaded
	pub fn new(client: ApiClient) -> Self {
		Self {
			client,
			state: SessionState::new(),
		}
	}

	/// The current session state
	pub fn state(&self) -> &SessionState {
		&self.state
	}

	/// The underlying API client, for direct reads outside the state machine
	pub fn client(&self) -> &ApiClient {
		&self.client
	}

	/// Apply a user intent and run every effect it and its completions emit
	pub async fn dispatch(&mut self, intent: Intent) {
		let mut queue: VecDeque<Effect> = self.state.apply(intent).into();

		while let Some(effect) = queue.pop_front() {
			let outcome = self.perform(effect).await;
			queue.extend(self.state.resolve(outcome));
		}
	}

	async fn perform(&self, effect: Effect) -> Outcome {
		tracing::debug!(effect = ?effect, "performing effect");
		match effect {
			Effect::FetchList { seq } => Outcome::ListFetched {
				seq,
				result: self.client.list_profiles().await,
			},
			Effect::CreateProfile { data } => Outcome::ProfileSaved {
				result: self.client.create_profile(&data).await,
			},
			Effect::UpdateProfile { id, data } => Outcome::ProfileSaved {
				result: self.client.update_profile(id, &data).await,
			},
			Effect::DeleteProfile { id } => Outcome::ProfileDeleted {
				id,
				result: self.client.delete_profile(id).await,
			},
			Effect::UploadAvatar { id, file } => Outcome::AvatarUploaded {
				result: self.client.upload_avatar(id, &file).await,
			},
			Effect::DeleteAvatar { id } => Outcome::AvatarDeleted {
				result: self.client.delete_avatar(id).await,
			},
			Effect::GeneratePreview { epoch, file } => Outcome::PreviewReady {
				epoch,
				result: file.preview_data_url().await,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ApiConfig;
	use crate::state::Phase;

	#[tokio::test]
	async fn test_dispatch_refresh_loads_list() {
		let mut server = mockito::Server::new_async().await;

		let _m = server
			.mock("GET", "/profiles/")
			.with_status(200)
			.with_header("content-type", "application/json")
			.with_body(
				r#"[{"id":1,"name":"Ada","email":"ada@example.com","bio":null,"avatar_filename":null,"avatar_url":null,"created_at":"2025-01-15T10:30:00Z","updated_at":"2025-01-15T10:30:00Z"}]"#,
			)
			.expect(1)
			.create_async()
			.await;

		let client = ApiClient::new(ApiConfig::new(server.url())).unwrap();
		let mut session = Session::new(client);

		session.dispatch(Intent::Refresh).await;

		assert_eq!(session.state().phase, Phase::Idle);
		assert_eq!(session.state().profiles.len(), 1);
		assert_eq!(session.state().profiles[0].name, "Ada");
	}

	#[tokio::test]
	async fn test_dispatch_with_no_dialog_is_quiet() {
		// No mocks registered: an intent that emits no effects must not
		// touch the network
		let server = mockito::Server::new_async().await;
		let client = ApiClient::new(ApiConfig::new(server.url())).unwrap();
		let mut session = Session::new(client);

		session.dispatch(Intent::ConfirmDelete).await;
		session.dispatch(Intent::CloseForm).await;

		assert_eq!(session.state().phase, Phase::Idle);
		assert!(session.state().profiles.is_empty());
	}
}
