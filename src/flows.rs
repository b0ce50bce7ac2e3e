//! Authorization-code flow orchestration.

pub mod auth_code;
pub use auth_code::*;

// self
use crate::{_prelude::*, config::Config, http::FormTransport, provider::Provider};
#[cfg(feature = "reqwest")] use crate::http::ReqwestFormTransport;

#[cfg(feature = "reqwest")]
/// Flow specialized for the crate's default reqwest transport.
pub type ReqwestAuthCodeFlow = AuthCodeFlow<ReqwestFormTransport>;

/// Coordinates the OAuth 2.0 authorization-code grant against a single provider.
///
/// The flow owns the provider endpoints, the client configuration, and the transport
/// reference so the two operations can focus on grant mechanics. It holds no mutable
/// state; [`auth_code_url`](AuthCodeFlow::auth_code_url) and
/// [`exchange`](AuthCodeFlow::exchange) are independently callable any number of times,
/// concurrently, from multiple tasks.
#[derive(Clone)]
pub struct AuthCodeFlow<T>
where
	T: ?Sized + FormTransport,
{
	/// Provider endpoints used for the redirect and the exchange.
	pub provider: Provider,
	/// Client configuration read by every operation, never mutated.
	pub config: Config,
	/// HTTP transport used for the code exchange POST.
	pub transport: Arc<T>,
}
impl<T> AuthCodeFlow<T>
where
	T: ?Sized + FormTransport,
{
	/// Creates a flow that reuses the caller-provided transport.
	pub fn with_transport(
		provider: Provider,
		config: Config,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self { provider, config, transport: transport.into() }
	}
}
#[cfg(feature = "reqwest")]
impl AuthCodeFlow<ReqwestFormTransport> {
	/// Creates a new flow for the provided provider and configuration.
	///
	/// The flow provisions its own reqwest-backed transport so callers do not need to
	/// pass HTTP handles explicitly. Use [`AuthCodeFlow::with_transport`] to inject a
	/// custom transport instead.
	pub fn new(provider: Provider, config: Config) -> Self {
		Self::with_transport(provider, config, ReqwestFormTransport::default())
	}
}
impl<T> Debug for AuthCodeFlow<T>
where
	T: ?Sized + FormTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthCodeFlow")
			.field("provider", &self.provider)
			.field("config", &self.config)
			.finish()
	}
}
