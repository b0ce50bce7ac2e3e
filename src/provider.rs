//! Provider endpoint pairs and the well-known provider registry.

// self
use crate::_prelude::*;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DISCORD_AUTH_URL: &str = "https://discord.com/api/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const SLACK_AUTH_URL: &str = "https://slack.com/oauth/v2/authorize";
const SLACK_TOKEN_URL: &str = "https://slack.com/api/oauth.v2.access";

/// Read-only registry of well-known providers, keyed by lowercase name.
const WELL_KNOWN: &[(&str, &str, &str)] = &[
	("discord", DISCORD_AUTH_URL, DISCORD_TOKEN_URL),
	("google", GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL),
	("slack", SLACK_AUTH_URL, SLACK_TOKEN_URL),
];

/// Provider-specific endpoint pair consumed by the authorization-code flow.
///
/// Values are typically drawn from the well-known registry but may name arbitrary
/// endpoints; [`validate`](crate::config::validate) only requires them to be non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
	/// Authorization endpoint the end-user is redirected to.
	pub auth_url: String,
	/// Token endpoint used for the code exchange.
	pub token_url: String,
}
impl Provider {
	/// Creates a provider from an arbitrary endpoint pair.
	pub fn new(auth_url: impl Into<String>, token_url: impl Into<String>) -> Self {
		Self { auth_url: auth_url.into(), token_url: token_url.into() }
	}

	/// Looks up a well-known provider by name (case-insensitive).
	pub fn well_known(name: &str) -> Option<Self> {
		let name = name.to_ascii_lowercase();

		WELL_KNOWN
			.iter()
			.find(|(known, ..)| *known == name)
			.map(|(_, auth_url, token_url)| Self::new(*auth_url, *token_url))
	}

	/// Google's OAuth 2.0 endpoints.
	pub fn google() -> Self {
		Self::new(GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL)
	}

	/// Discord's OAuth 2.0 endpoints.
	pub fn discord() -> Self {
		Self::new(DISCORD_AUTH_URL, DISCORD_TOKEN_URL)
	}

	/// Slack's OAuth 2.0 (v2) endpoints.
	pub fn slack() -> Self {
		Self::new(SLACK_AUTH_URL, SLACK_TOKEN_URL)
	}
}
