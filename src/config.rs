//! Caller-supplied client configuration, state sources, and validation.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	error::{BoxError, ConfigError},
	provider::Provider,
};

const STATE_LEN: usize = 32;

/// Zero-argument capability producing the opaque `state` token for an authorization
/// redirect.
///
/// Implementations may perform I/O (e.g. read a CSRF-token store); failures are surfaced
/// to callers as [`Error::StateGeneration`](crate::error::Error::StateGeneration).
pub trait StateSource
where
	Self: 'static + Send + Sync,
{
	/// Produces the state token.
	fn state(&self) -> Result<String, BoxError>;
}
impl<F> StateSource for F
where
	F: 'static + Send + Sync + Fn() -> Result<String, BoxError>,
{
	fn state(&self) -> Result<String, BoxError> {
		self()
	}
}

/// Default state source producing unpredictable 32-character alphanumeric tokens.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomState;
impl StateSource for RandomState {
	fn state(&self) -> Result<String, BoxError> {
		Ok(rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect())
	}
}

/// Client configuration owned by the caller and read by every flow operation.
///
/// Flows never mutate the configuration; each call is a pure function of these inputs.
#[derive(Clone)]
pub struct Config {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: String,
	/// Redirect URL registered with the provider.
	pub redirect_url: String,
	/// Requested scopes, space-joined in the given order.
	pub scopes: Vec<String>,
	/// Additional authorization parameters merged into the redirect URL.
	///
	/// Entries with empty values and the core parameter names (`response_type`,
	/// `client_id`, `redirect_uri`, `scope`, `state`) are skipped during the merge.
	pub extra_params: BTreeMap<String, String>,
	/// Optional state source consulted when no explicit state argument is supplied.
	pub state_source: Option<Arc<dyn StateSource>>,
}
impl Config {
	/// Creates a configuration for the provided client credentials and scopes.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_url: impl Into<String>,
		scopes: impl IntoIterator<Item = impl Into<String>>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			redirect_url: redirect_url.into(),
			scopes: scopes.into_iter().map(Into::into).collect(),
			extra_params: BTreeMap::new(),
			state_source: None,
		}
	}

	/// Adds one extra authorization parameter.
	pub fn with_extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.insert(key.into(), value.into());

		self
	}

	/// Sets or replaces the state source.
	pub fn with_state_source(mut self, source: impl StateSource) -> Self {
		self.state_source = Some(Arc::new(source));

		self
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_url", &self.redirect_url)
			.field("scopes", &self.scopes)
			.field("extra_params", &self.extra_params)
			.field("state_source_set", &self.state_source.is_some())
			.finish()
	}
}

/// Checks that a provider/config pair is complete before any flow operation.
///
/// Pure and deterministic. Checks run in a fixed order and stop at the first violation:
/// authorization URL, token URL, client ID, client secret, redirect URL, scopes.
pub fn validate(provider: &Provider, config: &Config) -> Result<(), ConfigError> {
	if provider.auth_url.is_empty() {
		return Err(ConfigError::MissingAuthUrl);
	}
	if provider.token_url.is_empty() {
		return Err(ConfigError::MissingTokenUrl);
	}
	if config.client_id.is_empty() {
		return Err(ConfigError::MissingClientId);
	}
	if config.client_secret.is_empty() {
		return Err(ConfigError::MissingClientSecret);
	}
	if config.redirect_url.is_empty() {
		return Err(ConfigError::MissingRedirectUrl);
	}
	if config.scopes.is_empty() {
		return Err(ConfigError::MissingScopes);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> (Provider, Config) {
		let provider = Provider::new("https://example.com/auth", "https://example.com/token");
		let config = Config::new("client-id", "client-secret", "https://app.example.com/cb", [
			"email", "profile",
		]);

		(provider, config)
	}

	#[test]
	fn complete_config_passes() {
		let (provider, config) = base();

		validate(&provider, &config).expect("Complete configuration should validate.");
	}

	#[test]
	fn each_missing_field_maps_to_its_error() {
		let (provider, config) = base();
		let cases: Vec<(Provider, Config, ConfigError)> = vec![
			(
				Provider::new("", &provider.token_url),
				config.clone(),
				ConfigError::MissingAuthUrl,
			),
			(Provider::new(&provider.auth_url, ""), config.clone(), ConfigError::MissingTokenUrl),
			(
				provider.clone(),
				Config { client_id: String::new(), ..config.clone() },
				ConfigError::MissingClientId,
			),
			(
				provider.clone(),
				Config { client_secret: String::new(), ..config.clone() },
				ConfigError::MissingClientSecret,
			),
			(
				provider.clone(),
				Config { redirect_url: String::new(), ..config.clone() },
				ConfigError::MissingRedirectUrl,
			),
			(
				provider.clone(),
				Config { scopes: Vec::new(), ..config.clone() },
				ConfigError::MissingScopes,
			),
		];

		for (provider, config, expected) in cases {
			let err = validate(&provider, &config)
				.expect_err("Incomplete configuration should be rejected.");

			assert_eq!(err, expected);
		}
	}

	#[test]
	fn validation_fails_fast_in_declaration_order() {
		let provider = Provider::new("", "");
		let config = Config::new("", "", "", Vec::<String>::new());
		let err =
			validate(&provider, &config).expect_err("Empty configuration should be rejected.");

		assert_eq!(err, ConfigError::MissingAuthUrl);

		let provider = Provider::new("https://example.com/auth", "");
		let err =
			validate(&provider, &config).expect_err("Empty configuration should be rejected.");

		assert_eq!(err, ConfigError::MissingTokenUrl);
	}

	#[test]
	fn random_state_produces_distinct_alphanumeric_tokens() {
		let first = RandomState.state().expect("Random state generation should succeed.");
		let second = RandomState.state().expect("Random state generation should succeed.");

		assert_eq!(first.len(), STATE_LEN);
		assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(first, second);
	}

	#[test]
	fn closures_act_as_state_sources() {
		let source = || -> Result<String, BoxError> { Ok("fixed-state".to_owned()) };

		assert_eq!(source.state().expect("Closure source should succeed."), "fixed-state");
	}

	#[test]
	fn debug_redacts_the_client_secret() {
		let (_, config) = base();
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("client-secret"));
		assert!(rendered.contains("client_secret_set: true"));
	}
}
