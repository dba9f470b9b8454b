//! Synchronization state machine
//!
//! [`SessionState`] is the single owner of the cached profile list, the
//! open dialog, and the delete confirmation. All transitions are pure:
//! [`SessionState::apply`] handles user intents, [`SessionState::resolve`]
//! handles async completions, and both return the I/O effects the session
//! driver must perform. No I/O happens in this module.
//!
//! After every successful mutation the list is re-fetched wholesale rather
//! than patched in place, so server-assigned fields never drift. Competing
//! reloads are ordered by a monotonic sequence number; a reload that
//! completes after a newer one was applied is discarded. Previews are
//! scoped to their upload dialog through an epoch counter the same way.

use crate::error::{ApiError, UploadError};
use crate::models::{DeleteAvatarResponse, Profile, ProfileFormData, UploadAvatarResponse};
use crate::upload::{AvatarFile, AvatarValidator, PendingUpload};

/// Which dialog, if any, is currently open
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
	/// No dialog open, list browsable
	Idle,
	/// A list fetch is in flight with no dialog open
	Loading,
	/// Create form (`target: None`) or edit form (`target: Some`)
	FormOpen {
		/// Profile being edited, or `None` when creating
		target: Option<Profile>,
		/// Last submitted data, retained so a failed submit can be corrected
		draft: Option<ProfileFormData>,
	},
	/// Avatar upload dialog
	UploadOpen {
		/// Profile the avatar is for
		target: Profile,
		/// Validated file selection, if one has been made
		pending: Option<PendingUpload>,
	},
	/// Avatar upload request in flight
	Uploading {
		/// Profile the avatar is for
		target: Profile,
		/// The selection being uploaded, restored to the dialog on failure
		pending: PendingUpload,
	},
}

/// User-originated events
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
	/// Fetch or re-fetch the profile list
	Refresh,
	/// Open the create form
	OpenCreateForm,
	/// Open the edit form for a cached profile
	OpenEditForm(i64),
	/// Submit the open form
	SubmitForm(ProfileFormData),
	/// Close the form, discarding uncommitted edits
	CloseForm,
	/// Ask to delete a profile; requires confirmation
	RequestDelete(i64),
	/// Confirm the pending deletion
	ConfirmDelete,
	/// Abandon the pending deletion
	CancelDelete,
	/// Open the avatar upload dialog for a cached profile
	OpenAvatarUpload(i64),
	/// Choose a file in the upload dialog
	SelectFile(AvatarFile),
	/// Send the chosen file
	ConfirmUpload,
	/// Close the upload dialog, discarding the selection
	CloseUpload,
	/// Remove a profile's stored avatar
	RequestRemoveAvatar(i64),
}

/// I/O instructions emitted by a transition for the driver to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
	/// Fetch the full profile list; `seq` orders competing reloads
	FetchList { seq: u64 },
	/// POST the form data as a new profile
	CreateProfile { data: ProfileFormData },
	/// PUT the form data over an existing profile
	UpdateProfile { id: i64, data: ProfileFormData },
	/// DELETE a profile
	DeleteProfile { id: i64 },
	/// POST the chosen file as the profile's avatar
	UploadAvatar { id: i64, file: AvatarFile },
	/// DELETE a profile's avatar
	DeleteAvatar { id: i64 },
	/// Read the chosen file and build its preview; `epoch` scopes it to
	/// the dialog that requested it
	GeneratePreview { epoch: u64, file: AvatarFile },
}

/// Async completions fed back into the reducer
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	/// A list fetch finished
	ListFetched {
		seq: u64,
		result: Result<Vec<Profile>, ApiError>,
	},
	/// A create or update finished
	ProfileSaved { result: Result<Profile, ApiError> },
	/// A delete finished
	ProfileDeleted {
		id: i64,
		result: Result<(), ApiError>,
	},
	/// An avatar upload finished
	AvatarUploaded {
		result: Result<UploadAvatarResponse, ApiError>,
	},
	/// An avatar removal finished
	AvatarDeleted {
		result: Result<DeleteAvatarResponse, ApiError>,
	},
	/// A preview build finished
	PreviewReady {
		epoch: u64,
		result: Result<String, UploadError>,
	},
}

/// User-facing message surfaced by the last transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
	/// Operation completed
	Success(String),
	/// Operation failed, state left consistent
	Error(String),
}

/// The authoritative client-side state for one session
#[derive(Debug)]
pub struct SessionState {
	/// Cached list, always the last applied server snapshot
	pub profiles: Vec<Profile>,
	/// Current dialog phase
	pub phase: Phase,
	/// Profile id awaiting delete confirmation
	pub pending_delete: Option<i64>,
	/// Message surfaced by the last transition
	pub notice: Option<Notice>,
	validator: AvatarValidator,
	reload_seq: u64,
	applied_seq: u64,
	dialog_epoch: u64,
}

impl SessionState {
	/// Create an empty session with nothing loaded
	pub fn new() -> Self {
		Self {
			profiles: Vec::new(),
			phase: Phase::Idle,
			pending_delete: None,
			notice: None,
			validator: AvatarValidator::new(),
			reload_seq: 0,
			applied_seq: 0,
			dialog_epoch: 0,
		}
	}

	/// Look up a profile in the cached list
	pub fn profile(&self, id: i64) -> Option<&Profile> {
		self.profiles.iter().find(|p| p.id == id)
	}

	fn issue_reload(&mut self) -> Effect {
		self.reload_seq += 1;
		Effect::FetchList {
			seq: self.reload_seq,
		}
	}

	fn surface_api_error(&mut self, context: &str, err: ApiError) -> Vec<Effect> {
		tracing::warn!(context = context, error = %err, "operation failed");

		let message = match &err {
			ApiError::Validation { message, .. } => message.clone(),
			other => other.to_string(),
		};
		self.notice = Some(Notice::Error(message));

		// A vanished target means the cache is stale; reconcile with the server
		if matches!(err, ApiError::NotFound(_)) {
			vec![self.issue_reload()]
		} else {
			Vec::new()
		}
	}

	/// Apply a user intent, returning the effects to perform
	pub fn apply(&mut self, intent: Intent) -> Vec<Effect> {
		tracing::debug!(intent = ?intent, "applying intent");
		self.notice = None;

		match intent {
			Intent::Refresh => {
				if matches!(self.phase, Phase::Idle | Phase::Loading) {
					self.phase = Phase::Loading;
					vec![self.issue_reload()]
				} else {
					tracing::debug!("refresh ignored while a dialog is open");
					Vec::new()
				}
			}
			Intent::OpenCreateForm => {
				self.pending_delete = None;
				self.phase = Phase::FormOpen {
					target: None,
					draft: None,
				};
				Vec::new()
			}
			Intent::OpenEditForm(id) => match self.profile(id).cloned() {
				Some(profile) => {
					self.pending_delete = None;
					self.phase = Phase::FormOpen {
						target: Some(profile),
						draft: None,
					};
					Vec::new()
				}
				None => {
					self.notice = Some(Notice::Error(format!("Profile {} is not in the list", id)));
					Vec::new()
				}
			},
			Intent::SubmitForm(data) => {
				let Phase::FormOpen { target, draft } = &mut self.phase else {
					tracing::debug!("submit ignored with no form open");
					return Vec::new();
				};
				*draft = Some(data.clone());
				match target {
					Some(profile) => vec![Effect::UpdateProfile {
						id: profile.id,
						data,
					}],
					None => vec![Effect::CreateProfile { data }],
				}
			}
			Intent::CloseForm => {
				if matches!(self.phase, Phase::FormOpen { .. }) {
					self.phase = Phase::Idle;
				}
				Vec::new()
			}
			Intent::RequestDelete(id) => {
				if !matches!(self.phase, Phase::Idle) {
					tracing::debug!("delete request ignored while a dialog is open");
					return Vec::new();
				}
				if self.profile(id).is_none() {
					self.notice = Some(Notice::Error(format!("Profile {} is not in the list", id)));
					return Vec::new();
				}
				self.pending_delete = Some(id);
				Vec::new()
			}
			Intent::ConfirmDelete => match self.pending_delete.take() {
				Some(id) => vec![Effect::DeleteProfile { id }],
				None => Vec::new(),
			},
			Intent::CancelDelete => {
				self.pending_delete = None;
				Vec::new()
			}
			Intent::OpenAvatarUpload(id) => match self.profile(id).cloned() {
				Some(profile) => {
					self.pending_delete = None;
					self.dialog_epoch += 1;
					self.phase = Phase::UploadOpen {
						target: profile,
						pending: None,
					};
					Vec::new()
				}
				None => {
					self.notice = Some(Notice::Error(format!("Profile {} is not in the list", id)));
					Vec::new()
				}
			},
			Intent::SelectFile(file) => {
				let Phase::UploadOpen { pending, .. } = &mut self.phase else {
					tracing::debug!("file selection ignored with no upload dialog open");
					return Vec::new();
				};
				match self.validator.validate(&file) {
					Ok(()) => {
						*pending = Some(PendingUpload::new(file.clone()));
						vec![Effect::GeneratePreview {
							epoch: self.dialog_epoch,
							file,
						}]
					}
					Err(err) => {
						*pending = None;
						self.notice = Some(Notice::Error(err.to_string()));
						Vec::new()
					}
				}
			}
			Intent::ConfirmUpload => {
				let Phase::UploadOpen { target, pending } = &mut self.phase else {
					tracing::debug!("upload confirm ignored outside the upload dialog");
					return Vec::new();
				};
				let Some(pending) = pending.take() else {
					self.notice = Some(Notice::Error("No file chosen".to_string()));
					return Vec::new();
				};
				let target = target.clone();
				let effect = Effect::UploadAvatar {
					id: target.id,
					file: pending.file.clone(),
				};
				self.phase = Phase::Uploading { target, pending };
				vec![effect]
			}
			Intent::CloseUpload => {
				if matches!(self.phase, Phase::UploadOpen { .. } | Phase::Uploading { .. }) {
					// Invalidate any preview still being generated
					self.dialog_epoch += 1;
					self.phase = Phase::Idle;
				}
				Vec::new()
			}
			Intent::RequestRemoveAvatar(id) => {
				if !matches!(self.phase, Phase::Idle) {
					tracing::debug!("avatar removal ignored while a dialog is open");
					return Vec::new();
				}
				match self.profile(id) {
					Some(_) => vec![Effect::DeleteAvatar { id }],
					None => {
						self.notice =
							Some(Notice::Error(format!("Profile {} is not in the list", id)));
						Vec::new()
					}
				}
			}
		}
	}

	/// Resolve an async completion, returning any follow-up effects
	pub fn resolve(&mut self, outcome: Outcome) -> Vec<Effect> {
		match outcome {
			Outcome::ListFetched { seq, result } => {
				if seq <= self.applied_seq {
					tracing::warn!(
						seq = seq,
						applied = self.applied_seq,
						"discarding stale list reload"
					);
					return Vec::new();
				}
				self.applied_seq = seq;

				match result {
					Ok(profiles) => {
						tracing::debug!(count = profiles.len(), "applied list snapshot");
						self.profiles = profiles;
					}
					Err(err) => {
						// The cached snapshot stays as it was; only the
						// initial load ever shows an empty list here
						tracing::warn!(error = %err, "list fetch failed");
						self.notice = Some(Notice::Error(err.to_string()));
					}
				}
				if matches!(self.phase, Phase::Loading) {
					self.phase = Phase::Idle;
				}
				Vec::new()
			}
			Outcome::ProfileSaved { result } => match result {
				Ok(profile) => {
					if matches!(self.phase, Phase::FormOpen { .. }) {
						self.phase = Phase::Loading;
					}
					self.notice = Some(Notice::Success(format!("Saved profile {}", profile.name)));
					vec![self.issue_reload()]
				}
				Err(err) => self.surface_api_error("save profile", err),
			},
			Outcome::ProfileDeleted { id, result } => match result {
				Ok(()) => {
					if matches!(self.phase, Phase::Idle) {
						self.phase = Phase::Loading;
					}
					self.notice = Some(Notice::Success(format!("Deleted profile {}", id)));
					vec![self.issue_reload()]
				}
				Err(err) => self.surface_api_error("delete profile", err),
			},
			Outcome::AvatarUploaded { result } => match result {
				Ok(response) => {
					if matches!(self.phase, Phase::Uploading { .. }) {
						self.phase = Phase::Loading;
					}
					self.notice = Some(Notice::Success(response.message));
					vec![self.issue_reload()]
				}
				Err(err) => {
					// Reopen the dialog with the chosen file retained so the
					// user can retry or pick another file
					if let Phase::Uploading { target, pending } = &self.phase {
						let reopened = Phase::UploadOpen {
							target: target.clone(),
							pending: Some(pending.clone()),
						};
						self.phase = reopened;
					}
					self.surface_api_error("upload avatar", err)
				}
			},
			Outcome::AvatarDeleted { result } => match result {
				Ok(response) => {
					if matches!(self.phase, Phase::Idle) {
						self.phase = Phase::Loading;
					}
					self.notice = Some(Notice::Success(response.message));
					vec![self.issue_reload()]
				}
				Err(err) => self.surface_api_error("remove avatar", err),
			},
			Outcome::PreviewReady { epoch, result } => {
				if epoch != self.dialog_epoch {
					tracing::warn!(
						epoch = epoch,
						current = self.dialog_epoch,
						"discarding preview for a closed dialog"
					);
					return Vec::new();
				}
				if let Phase::UploadOpen {
					pending: Some(pending),
					..
				} = &mut self.phase
				{
					match result {
						Ok(preview) => pending.preview = Some(preview),
						// Preview failure is non-fatal; the upload can
						// proceed without one
						Err(err) => tracing::debug!(error = %err, "preview generation failed"),
					}
				}
				Vec::new()
			}
		}
	}
}

impl Default for SessionState {
	fn default() -> Self {
		Self::new()
	}
}
