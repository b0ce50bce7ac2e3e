//! Transport primitives for the token endpoint POST.
//!
//! The module exposes [`FormTransport`] so downstream crates can integrate custom HTTP
//! clients. Implementations send a form-encoded POST, read the entire response body, and
//! hand back a [`FormResponse`] whose JSON decode is best-effort: a decode failure is
//! carried inside the response, distinct from a transport failure.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Decoded JSON object body returned by a token endpoint.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
/// JSON decoding failure, including the path at which decoding failed.
pub type JsonDecodeError = serde_path_to_error::Error<serde_json::Error>;

/// Future returned by [`FormTransport::post_form`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<FormResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the code exchange POST.
///
/// The trait is the crate's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a flow can be shared across tasks without wrappers, and
/// the returned future must be `Send` for the lifetime of the in-flight request.
/// Retry, backoff, timeout, and cancellation policy all belong to the implementation;
/// the flow issues exactly one call per exchange.
pub trait FormTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `form` to `url` as `application/x-www-form-urlencoded`, reads the full
	/// response body, and decodes it via [`FormResponse::decode`].
	///
	/// A non-2xx status is not a transport failure; OAuth providers return error
	/// payloads as JSON bodies on 4xx responses, and those must reach the caller.
	fn post_form<'a>(
		&'a self,
		url: &'a str,
		form: &'a BTreeMap<String, String>,
	) -> TransportFuture<'a>;
}

/// Full response body read from a token endpoint, with a best-effort JSON decode.
#[derive(Debug)]
pub struct FormResponse {
	/// Raw response body exactly as received.
	pub raw_body: Vec<u8>,
	/// Best-effort JSON decode of `raw_body`.
	pub parsed_body: Result<JsonObject, JsonDecodeError>,
}
impl FormResponse {
	/// Decodes a raw body, retaining it regardless of the outcome.
	pub fn decode(raw_body: Vec<u8>) -> Self {
		let mut deserializer = serde_json::Deserializer::from_slice(&raw_body);
		let parsed_body = serde_path_to_error::deserialize::<_, JsonObject>(&mut deserializer);

		Self { raw_body, parsed_body }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Token requests should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI. Configure
/// any custom [`ReqwestClient`] accordingly before wrapping it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestFormTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestFormTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestFormTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestFormTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl FormTransport for ReqwestFormTransport {
	fn post_form<'a>(
		&'a self,
		url: &'a str,
		form: &'a BTreeMap<String, String>,
	) -> TransportFuture<'a> {
		Box::pin(async move {
			let response =
				self.0.post(url).form(form).send().await.map_err(TransportError::from)?;
			let raw_body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(FormResponse::decode(raw_body))
		})
	}
}
