//! Transport primitives for signed relay calls.
//!
//! [`RelayHttpClient`] is the dispatcher's only dependency on an HTTP stack. Implementations
//! receive a fully signed [`OutboundRequest`] and return the raw status and body; JSON parsing
//! and status policy stay in the dispatcher so custom transports behave identically.

// self
use crate::{_prelude::*, error::TransportError, oauth1::AuthorizationHeader};

/// `Content-Type` sent with every relayed payload.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Boxed future returned by [`RelayHttpClient::post_json`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RelayHttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing the signed POST.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared behind an
/// [`Arc`] by concurrent dispatches, and the returned future must be `Send`.
pub trait RelayHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` as `POST` with `Authorization` and `Content-Type: application/json`.
	///
	/// Implementations must not retry and must map timeouts to [`TransportError::Timeout`].
	fn post_json(&self, request: OutboundRequest) -> HttpFuture<'_>;
}

/// Fully signed request handed to a [`RelayHttpClient`].
#[derive(Clone, Debug)]
pub struct OutboundRequest {
	/// Target URL.
	pub url: Url,
	/// Rendered OAuth `Authorization` header.
	pub authorization: AuthorizationHeader,
	/// Serialized JSON payload, sent unmodified.
	pub body: Vec<u8>,
	/// Per-request timeout, if any.
	pub timeout: Option<Duration>,
}

/// Raw response captured by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayHttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl RelayHttpResponse {
	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Relay endpoints answer directly, so [`ReqwestHttpClient::new`] disables redirect following;
/// a redirected POST would otherwise be replayed without a matching signature.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client that does not follow redirects.
	pub fn new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl RelayHttpClient for ReqwestHttpClient {
	fn post_json(&self, request: OutboundRequest) -> HttpFuture<'_> {
		use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client
				.post(request.url)
				.header(AUTHORIZATION, request.authorization.into_value())
				.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
				.body(request.body);

			if let Some(timeout) = request.timeout {
				builder = builder.timeout(timeout);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(RelayHttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_range_is_2xx() {
		let response = |status| RelayHttpResponse { status, body: Vec::new() };

		assert!(response(200).is_success());
		assert!(response(204).is_success());
		assert!(!response(199).is_success());
		assert!(!response(302).is_success());
		assert!(!response(500).is_success());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_client_builds_without_redirects() {
		ReqwestHttpClient::new().expect("Default reqwest client should build.");
	}
}
