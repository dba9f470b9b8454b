//! Terminal rendering of profiles and notices
//!
//! Formatting is kept separate from printing so the layouts are testable;
//! the binary decides where each string goes.

use colored::Colorize;

use crate::models::Profile;
use crate::state::Notice;

/// Format the profile list as an aligned table
pub fn format_profile_table(profiles: &[Profile]) -> String {
	if profiles.is_empty() {
		return "No profiles found.\n".to_string();
	}

	let name_width = profiles
		.iter()
		.map(|p| p.name.len())
		.chain(std::iter::once("Name".len()))
		.max()
		.unwrap_or(4);
	let email_width = profiles
		.iter()
		.map(|p| p.email.len())
		.chain(std::iter::once("Email".len()))
		.max()
		.unwrap_or(5);

	let mut output = String::new();
	output.push_str(&format!(
		"{:<6} {:<name_width$} {:<email_width$} {:<7} {}\n",
		"ID", "Name", "Email", "Avatar", "Updated"
	));
	for profile in profiles {
		let avatar = if profile.has_avatar() { "yes" } else { "-" };
		output.push_str(&format!(
			"{:<6} {:<name_width$} {:<email_width$} {:<7} {}\n",
			profile.id,
			profile.name,
			profile.email,
			avatar,
			profile.updated_at.format("%Y-%m-%d %H:%M")
		));
	}
	output
}

/// Format one profile with all its fields
pub fn format_profile_detail(profile: &Profile) -> String {
	let mut output = String::new();
	output.push_str(&format!("Profile {}\n", profile.id));
	output.push_str(&format!("  Name:    {}\n", profile.name));
	output.push_str(&format!("  Email:   {}\n", profile.email));
	output.push_str(&format!(
		"  Bio:     {}\n",
		profile.bio.as_deref().unwrap_or("-")
	));
	output.push_str(&format!(
		"  Avatar:  {}\n",
		profile.avatar_url.as_deref().unwrap_or("-")
	));
	output.push_str(&format!(
		"  Created: {}\n",
		profile.created_at.format("%Y-%m-%d %H:%M:%S UTC")
	));
	output.push_str(&format!(
		"  Updated: {}\n",
		profile.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
	));
	output
}

/// Render a notice with its severity label colored
pub fn format_notice(notice: &Notice) -> String {
	match notice {
		Notice::Success(message) => format!("{} {}", "Success:".green(), message),
		Notice::Error(message) => format!("{} {}", "Error:".red(), message),
	}
}

/// Summarize a `data:` URL preview without dumping the payload
pub fn format_preview_summary(data_url: &str) -> String {
	let header = data_url.split(',').next().unwrap_or(data_url);
	format!(
		"{} {} ({} chars)",
		"Preview ready:".yellow(),
		header,
		data_url.len()
	)
}
