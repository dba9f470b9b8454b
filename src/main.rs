//! Profile Manager CLI
//!
//! Terminal frontend for a remote profile API. Each invocation opens a
//! session, loads the current profile list, performs one user action
//! through the synchronization state machine, and prints the resulting
//! list.
//!
//! ## Usage
//!
//! ```bash
//! profile-manager list
//! profile-manager create --name Ada --email ada@example.com
//! profile-manager edit 3 --bio "Mathematician"
//! profile-manager delete 3
//! profile-manager avatar upload 3 ./portrait.png
//! profile-manager avatar remove 3
//! ```
//!
//! The API base address comes from `PROFILES_API_URL` or the `--api-url`
//! flag, defaulting to a local loopback address.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use profile_manager::api::ApiClient;
use profile_manager::config::ApiConfig;
use profile_manager::models::ProfileFormData;
use profile_manager::output;
use profile_manager::session::Session;
use profile_manager::state::{Intent, Notice, Phase};
use profile_manager::upload::AvatarFile;

#[derive(Parser)]
#[command(name = "profile-manager")]
#[command(about = "Manage profiles on a remote profile API", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Base URL of the profile API (overrides PROFILES_API_URL)
	#[arg(long, value_name = "URL", global = true)]
	api_url: Option<String>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// List all profiles
	List,

	/// Show one profile in full
	Show {
		/// Profile id
		#[arg(value_name = "ID")]
		id: i64,
	},

	/// Create a new profile
	Create {
		/// Display name
		#[arg(long)]
		name: String,

		/// Contact email
		#[arg(long)]
		email: String,

		/// Free-form bio
		#[arg(long)]
		bio: Option<String>,
	},

	/// Edit an existing profile
	Edit {
		/// Profile id
		#[arg(value_name = "ID")]
		id: i64,

		/// New display name
		#[arg(long)]
		name: Option<String>,

		/// New contact email
		#[arg(long)]
		email: Option<String>,

		/// New bio
		#[arg(long)]
		bio: Option<String>,
	},

	/// Delete a profile
	Delete {
		/// Profile id
		#[arg(value_name = "ID")]
		id: i64,

		/// Skip the confirmation prompt
		#[arg(long)]
		yes: bool,
	},

	/// Manage profile avatars
	Avatar {
		#[command(subcommand)]
		subcommand: AvatarCommands,
	},
}

#[derive(Subcommand)]
enum AvatarCommands {
	/// Upload an avatar image
	Upload {
		/// Profile id
		#[arg(value_name = "ID")]
		id: i64,

		/// Path to the image file
		#[arg(value_name = "PATH")]
		path: PathBuf,
	},

	/// Remove the stored avatar
	Remove {
		/// Profile id
		#[arg(value_name = "ID")]
		id: i64,
	},
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	let config = match cli.api_url {
		Some(url) => ApiConfig::new(url),
		None => ApiConfig::from_env(),
	};

	let result = match cli.command {
		Commands::List => run_list(config).await,
		Commands::Show { id } => run_show(config, id).await,
		Commands::Create { name, email, bio } => run_create(config, name, email, bio).await,
		Commands::Edit {
			id,
			name,
			email,
			bio,
		} => run_edit(config, id, name, email, bio).await,
		Commands::Delete { id, yes } => run_delete(config, id, yes).await,
		Commands::Avatar { subcommand } => match subcommand {
			AvatarCommands::Upload { id, path } => run_avatar_upload(config, id, path).await,
			AvatarCommands::Remove { id } => run_avatar_remove(config, id).await,
		},
	};

	if let Err(e) = result {
		eprintln!("{}", output::format_notice(&Notice::Error(e)));
		process::exit(1);
	}
}

fn init_tracing(verbosity: u8) {
	let default_filter = match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
	tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn new_session(config: ApiConfig) -> Result<Session, String> {
	let client = ApiClient::new(config).map_err(|e| e.to_string())?;
	Ok(Session::new(client))
}

/// Fail if the last transition surfaced an error
fn take_error(session: &Session) -> Result<(), String> {
	if let Some(Notice::Error(message)) = &session.state().notice {
		return Err(message.clone());
	}
	Ok(())
}

/// Print a success notice if present, fail on an error notice
fn print_outcome(session: &Session) -> Result<(), String> {
	match &session.state().notice {
		Some(notice @ Notice::Success(_)) => {
			println!("{}", output::format_notice(notice));
			Ok(())
		}
		Some(Notice::Error(message)) => Err(message.clone()),
		None => Ok(()),
	}
}

fn print_list(session: &Session) {
	print!("{}", output::format_profile_table(&session.state().profiles));
}

fn confirm(prompt: &str) -> Result<bool, String> {
	print!("{} [y/N] ", prompt);
	io::stdout().flush().map_err(|e| e.to_string())?;

	let mut answer = String::new();
	io::stdin()
		.read_line(&mut answer)
		.map_err(|e| e.to_string())?;
	let answer = answer.trim().to_lowercase();
	Ok(answer == "y" || answer == "yes")
}

async fn run_list(config: ApiConfig) -> Result<(), String> {
	let mut session = new_session(config)?;

	session.dispatch(Intent::Refresh).await;
	take_error(&session)?;

	print_list(&session);
	Ok(())
}

async fn run_show(config: ApiConfig, id: i64) -> Result<(), String> {
	let session = new_session(config)?;

	let profile = session
		.client()
		.get_profile(id)
		.await
		.map_err(|e| e.to_string())?;

	print!("{}", output::format_profile_detail(&profile));
	Ok(())
}

async fn run_create(
	config: ApiConfig,
	name: String,
	email: String,
	bio: Option<String>,
) -> Result<(), String> {
	let mut session = new_session(config)?;

	// The form works even when the initial list fetch fails
	session.dispatch(Intent::Refresh).await;
	session.dispatch(Intent::OpenCreateForm).await;

	let mut data = ProfileFormData::new(name, email);
	if let Some(bio) = bio {
		data = data.with_bio(bio);
	}
	session.dispatch(Intent::SubmitForm(data)).await;

	print_outcome(&session)?;
	print_list(&session);
	Ok(())
}

async fn run_edit(
	config: ApiConfig,
	id: i64,
	name: Option<String>,
	email: Option<String>,
	bio: Option<String>,
) -> Result<(), String> {
	let mut session = new_session(config)?;

	session.dispatch(Intent::Refresh).await;
	take_error(&session)?;

	let current = session
		.state()
		.profile(id)
		.cloned()
		.ok_or_else(|| format!("Profile {} is not in the list", id))?;

	session.dispatch(Intent::OpenEditForm(id)).await;
	take_error(&session)?;

	// Unspecified fields keep their current values
	let mut data = ProfileFormData::new(
		name.unwrap_or(current.name),
		email.unwrap_or(current.email),
	);
	if let Some(bio) = bio.or(current.bio) {
		data = data.with_bio(bio);
	}
	session.dispatch(Intent::SubmitForm(data)).await;

	print_outcome(&session)?;
	print_list(&session);
	Ok(())
}

async fn run_delete(config: ApiConfig, id: i64, yes: bool) -> Result<(), String> {
	let mut session = new_session(config)?;

	session.dispatch(Intent::Refresh).await;
	take_error(&session)?;

	session.dispatch(Intent::RequestDelete(id)).await;
	take_error(&session)?;

	if !yes && !confirm(&format!("Delete profile {}?", id))? {
		session.dispatch(Intent::CancelDelete).await;
		println!("Cancelled.");
		return Ok(());
	}

	session.dispatch(Intent::ConfirmDelete).await;

	print_outcome(&session)?;
	print_list(&session);
	Ok(())
}

async fn run_avatar_upload(config: ApiConfig, id: i64, path: PathBuf) -> Result<(), String> {
	let mut session = new_session(config)?;

	session.dispatch(Intent::Refresh).await;
	take_error(&session)?;

	session.dispatch(Intent::OpenAvatarUpload(id)).await;
	take_error(&session)?;

	let file = AvatarFile::from_path(&path).await.map_err(|e| e.to_string())?;
	session.dispatch(Intent::SelectFile(file)).await;
	take_error(&session)?;

	if let Phase::UploadOpen {
		pending: Some(pending),
		..
	} = &session.state().phase
		&& let Some(preview) = &pending.preview
	{
		println!("{}", output::format_preview_summary(preview));
	}

	session.dispatch(Intent::ConfirmUpload).await;

	print_outcome(&session)?;
	print_list(&session);
	Ok(())
}

async fn run_avatar_remove(config: ApiConfig, id: i64) -> Result<(), String> {
	let mut session = new_session(config)?;

	session.dispatch(Intent::Refresh).await;
	take_error(&session)?;

	session.dispatch(Intent::RequestRemoveAvatar(id)).await;

	print_outcome(&session)?;
	print_list(&session);
	Ok(())
}
