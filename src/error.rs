//! Error types shared across configuration, transport, and flow layers.

// self
use crate::{
	_prelude::*,
	http::{JsonDecodeError, JsonObject},
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error type used for caller-supplied failure sources.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by the flow operations.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; raised before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The configured state source failed to produce a token.
	#[error("State token generation failed.")]
	StateGeneration {
		/// Underlying state source failure.
		#[source]
		source: BoxError,
	},
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint returned a body that is not a JSON object.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Raw response body, retained for diagnostics.
		raw_body: Vec<u8>,
		/// Structured decoding failure.
		#[source]
		source: JsonDecodeError,
	},
	/// Token endpoint response lacks a string `access_token` field.
	///
	/// Provider error payloads (e.g. `{"error":"invalid_grant"}`) surface here with the
	/// decoded body intact so callers can inspect what the provider actually returned.
	#[error("Token endpoint response is missing a string access_token.")]
	AccessTokenMissing {
		/// Raw response body, retained for diagnostics.
		raw_body: Vec<u8>,
		/// Decoded response body.
		parsed_body: JsonObject,
	},
}
impl Error {
	/// Wraps a state source failure inside [`Error::StateGeneration`].
	pub fn state_generation(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::StateGeneration { source: Box::new(src) }
	}

	/// Returns the raw provider response body carried by this error, if any.
	pub fn raw_body(&self) -> Option<&[u8]> {
		match self {
			Self::MalformedResponse { raw_body, .. } | Self::AccessTokenMissing { raw_body, .. } =>
				Some(raw_body),
			_ => None,
		}
	}

	/// Returns the decoded provider response body carried by this error, if any.
	pub fn parsed_body(&self) -> Option<&JsonObject> {
		match self {
			Self::AccessTokenMissing { parsed_body, .. } => Some(parsed_body),
			_ => None,
		}
	}
}

/// Configuration completeness failures raised by [`validate`](crate::config::validate).
///
/// Checks run in declaration order and stop at the first violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// Provider authorization URL is empty.
	#[error("Provider authorization URL is not set.")]
	MissingAuthUrl,
	/// Provider token URL is empty.
	#[error("Provider token URL is not set.")]
	MissingTokenUrl,
	/// Client identifier is empty.
	#[error("Client ID is not set.")]
	MissingClientId,
	/// Client secret is empty.
	#[error("Client secret is not set.")]
	MissingClientSecret,
	/// Redirect URL is empty.
	#[error("Redirect URL is not set.")]
	MissingRedirectUrl,
	/// No scopes were requested.
	#[error("Scopes are not set.")]
	MissingScopes,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
