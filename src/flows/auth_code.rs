//! Authorization URL construction and the authorization code exchange.

// crates.io
use serde_json::Value;
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	config,
	flows::AuthCodeFlow,
	http::{FormTransport, JsonObject},
	obs::{FlowKind, FlowSpan},
};

/// Core authorization parameters that `extra_params` is never allowed to override.
const RESERVED_PARAMS: &[&str] = &["response_type", "client_id", "redirect_uri", "scope", "state"];

impl<T> AuthCodeFlow<T>
where
	T: ?Sized + FormTransport,
{
	/// Builds the provider authorization URL for the browser leg of the grant.
	///
	/// State precedence: a non-empty explicit `state` argument wins; otherwise a
	/// configured [`StateSource`](crate::config::StateSource) is invoked; otherwise no
	/// `state` parameter is emitted. The resolved value is applied after the
	/// `extra_params` merge, so it always overrides a `state` entry placed there.
	///
	/// Parameters are form-encoded in sorted key order, so identical inputs produce
	/// byte-identical URLs (given a deterministic or absent state source).
	pub fn auth_code_url(&self, state: Option<&str>) -> Result<String> {
		config::validate(&self.provider, &self.config)?;

		let _span = FlowSpan::new(FlowKind::Authorize, "auth_code_url").entered();
		let mut params = BTreeMap::new();

		params.insert("response_type".to_owned(), "code".to_owned());
		params.insert("client_id".to_owned(), self.config.client_id.clone());
		params.insert("redirect_uri".to_owned(), self.config.redirect_url.clone());
		params.insert("scope".to_owned(), self.config.scopes.join(" "));

		for (key, value) in &self.config.extra_params {
			if value.is_empty() || RESERVED_PARAMS.contains(&key.as_str()) {
				continue;
			}

			params.insert(key.clone(), value.clone());
		}

		if let Some(state) = self.resolve_state(state)? {
			params.insert("state".to_owned(), state);
		}

		let mut query = Serializer::new(String::new());

		for (key, value) in &params {
			query.append_pair(key, value);
		}

		Ok(format!("{}?{}", self.provider.auth_url, query.finish()))
	}

	/// Exchanges an authorization code for tokens via a form-encoded POST.
	///
	/// The code is passed through to the provider unvalidated; an empty or stale code is
	/// rejected by the provider, not locally. Exactly one outbound POST is performed per
	/// call; retry and timeout policy belong to the transport. Failed exchanges keep the
	/// provider's body available through [`Error::raw_body`] and [`Error::parsed_body`].
	pub async fn exchange(&self, code: &str) -> Result<ExchangeResponse> {
		config::validate(&self.provider, &self.config)?;

		let span = FlowSpan::new(FlowKind::Exchange, "exchange");

		span.instrument(async move {
			let mut form = BTreeMap::new();

			form.insert("client_id".to_owned(), self.config.client_id.clone());
			form.insert("client_secret".to_owned(), self.config.client_secret.clone());
			form.insert("code".to_owned(), code.to_owned());
			form.insert("redirect_uri".to_owned(), self.config.redirect_url.clone());
			form.insert("grant_type".to_owned(), "authorization_code".to_owned());

			let response = self.transport.post_form(&self.provider.token_url, &form).await?;
			let parsed_body = match response.parsed_body {
				Ok(parsed_body) => parsed_body,
				Err(source) =>
					return Err(Error::MalformedResponse { raw_body: response.raw_body, source }),
			};

			ExchangeResponse::from_parts(response.raw_body, parsed_body)
		})
		.await
	}

	fn resolve_state(&self, explicit: Option<&str>) -> Result<Option<String>> {
		match explicit {
			Some(value) if !value.is_empty() => Ok(Some(value.to_owned())),
			_ => match &self.config.state_source {
				Some(source) =>
					source.state().map(Some).map_err(|source| Error::StateGeneration { source }),
				None => Ok(None),
			},
		}
	}
}

/// Token endpoint response produced by a successful exchange.
///
/// The raw and decoded bodies are always retained alongside the typed fields so callers
/// can inspect provider-specific keys the schema does not cover.
#[derive(Clone)]
pub struct ExchangeResponse {
	/// Raw response body exactly as received.
	pub raw_body: Vec<u8>,
	/// Decoded response body.
	pub parsed_body: JsonObject,
	/// Bearer credential returned by the provider.
	pub access_token: String,
	/// Token type, when the provider supplies one (usually `bearer`).
	pub token_type: Option<String>,
	/// Renewal credential, when the provider supplies one.
	pub refresh_token: Option<String>,
	/// Lifetime of the access token in seconds, when supplied.
	pub expires_in: Option<u64>,
	/// OpenID Connect ID token, when supplied. Not verified by this crate.
	pub id_token: Option<String>,
}
impl ExchangeResponse {
	/// Extracts the typed token fields from a decoded body.
	///
	/// `access_token` must be present as a string; the remaining fields are filled
	/// leniently and left empty when absent or of an unexpected type, since provider
	/// responses are not schema-stable.
	pub(crate) fn from_parts(raw_body: Vec<u8>, parsed_body: JsonObject) -> Result<Self> {
		let access_token = match parsed_body.get("access_token").and_then(Value::as_str) {
			Some(token) => token.to_owned(),
			None => return Err(Error::AccessTokenMissing { raw_body, parsed_body }),
		};
		let token_type = string_field(&parsed_body, "token_type");
		let refresh_token = string_field(&parsed_body, "refresh_token");
		let expires_in = parsed_body.get("expires_in").and_then(Value::as_u64);
		let id_token = string_field(&parsed_body, "id_token");

		Ok(Self {
			raw_body,
			parsed_body,
			access_token,
			token_type,
			refresh_token,
			expires_in,
			id_token,
		})
	}
}
impl Debug for ExchangeResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExchangeResponse")
			.field("raw_body_len", &self.raw_body.len())
			.field("access_token_set", &!self.access_token.is_empty())
			.field("token_type", &self.token_type)
			.field("refresh_token_set", &self.refresh_token.is_some())
			.field("expires_in", &self.expires_in)
			.field("id_token_set", &self.id_token.is_some())
			.finish()
	}
}

fn string_field(parsed_body: &JsonObject, key: &str) -> Option<String> {
	parsed_body.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn object(value: serde_json::Value) -> JsonObject {
		match value {
			Value::Object(map) => map,
			_ => unreachable!("Test fixtures must be JSON objects."),
		}
	}

	#[test]
	fn from_parts_extracts_all_known_fields() {
		let body = object(json!({
			"access_token": "tok123",
			"token_type": "bearer",
			"refresh_token": "refresh456",
			"expires_in": 3600,
			"id_token": "id789",
		}));
		let response = ExchangeResponse::from_parts(b"raw".to_vec(), body)
			.expect("Response with a string access token should extract.");

		assert_eq!(response.access_token, "tok123");
		assert_eq!(response.token_type.as_deref(), Some("bearer"));
		assert_eq!(response.refresh_token.as_deref(), Some("refresh456"));
		assert_eq!(response.expires_in, Some(3600));
		assert_eq!(response.id_token.as_deref(), Some("id789"));
		assert_eq!(response.raw_body, b"raw");
	}

	#[test]
	fn from_parts_is_lenient_about_optional_field_types() {
		let body = object(json!({
			"access_token": "tok123",
			"token_type": 7,
			"expires_in": "soon",
		}));
		let response = ExchangeResponse::from_parts(Vec::new(), body)
			.expect("Mistyped optional fields should not fail the exchange.");

		assert_eq!(response.access_token, "tok123");
		assert_eq!(response.token_type, None);
		assert_eq!(response.expires_in, None);
	}

	#[test]
	fn from_parts_rejects_a_missing_access_token() {
		let body = object(json!({ "error": "invalid_grant" }));
		let err = ExchangeResponse::from_parts(b"{\"error\":\"invalid_grant\"}".to_vec(), body)
			.expect_err("Provider error payloads must not extract.");

		assert!(matches!(err, Error::AccessTokenMissing { .. }));
		assert_eq!(
			err.parsed_body().and_then(|body| body.get("error")).and_then(Value::as_str),
			Some("invalid_grant"),
		);
		assert_eq!(err.raw_body(), Some(b"{\"error\":\"invalid_grant\"}".as_slice()));
	}

	#[test]
	fn from_parts_rejects_a_non_string_access_token() {
		let body = object(json!({ "access_token": 42 }));
		let err = ExchangeResponse::from_parts(Vec::new(), body)
			.expect_err("Numeric access tokens must not extract.");

		assert!(matches!(err, Error::AccessTokenMissing { .. }));
	}
}
