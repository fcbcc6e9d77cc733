//! Realm-aware authenticated relay: resolve → look up → sign → send → parse.
//!
//! [`Dispatcher::dispatch`] walks the [`DispatchStage`] pipeline for a single target URL and
//! caller payload. Each stage either advances or terminates with an [`Error`] whose
//! [`ErrorKind`](crate::error::ErrorKind) identifies the failing concern; nothing is retried.
//! Successful calls relay the remote JSON body verbatim in a [`RelayResponse`], including any
//! `error` member the remote system embedded; callers inspect it with
//! [`RelayResponse::application_error`].

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{self, Credential, Realm},
	config::RelayConfig,
	error::TransportError,
	http::{OutboundRequest, RelayHttpClient},
	oauth1::{AuthorizationHeader, SignableRequest, SignatureMethod, Signer, SignerConfig},
	obs::{self, DispatchOutcome, DispatchSpan, DispatchStage},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Dispatcher specialized for the crate's default reqwest transport.
pub type ReqwestDispatcher = Dispatcher<ReqwestHttpClient>;

/// Signature method used for every relayed call.
pub const DISPATCH_SIGNATURE_METHOD: SignatureMethod = SignatureMethod::HmacSha256;

/// JSON body relayed back from the remote endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayResponse {
	/// HTTP status returned by the remote endpoint.
	pub status: u16,
	/// Parsed response body, unmodified.
	pub body: Value,
}
impl RelayResponse {
	/// Returns the top-level `error` member the remote system reported, if any.
	pub fn application_error(&self) -> Option<&Value> {
		self.body.get("error")
	}

	/// Consumes the response and returns the relayed body.
	pub fn into_body(self) -> Value {
		self.body
	}
}

/// Builds the signer used for relayed calls: HMAC-SHA256, the credential's consumer pair,
/// and the resolved realm as the header `realm` attribute.
pub fn relay_signer(credential: &Credential, realm: &Realm) -> Signer {
	Signer::new(
		SignerConfig::new(credential.consumer.clone(), DISPATCH_SIGNATURE_METHOD)
			.with_realm(realm.as_str()),
	)
}

/// Coordinates signed relay calls against the configured remote environments.
///
/// The dispatcher owns shared handles to the immutable [`RelayConfig`] and the transport, so
/// clones are cheap and concurrent dispatches never contend on shared mutable state.
pub struct Dispatcher<C>
where
	C: ?Sized + RelayHttpClient,
{
	/// Immutable configuration (credentials, accounts, transport policy).
	pub config: Arc<RelayConfig>,
	/// HTTP transport used for every outbound call.
	pub http_client: Arc<C>,
}
impl<C> Dispatcher<C>
where
	C: ?Sized + RelayHttpClient,
{
	/// Creates a dispatcher that reuses the caller-provided transport.
	pub fn with_http_client(config: Arc<RelayConfig>, http_client: impl Into<Arc<C>>) -> Self {
		Self { config, http_client: http_client.into() }
	}

	/// Signs and relays `payload` to `url`, returning the remote JSON body.
	pub async fn dispatch<T>(&self, url: &str, payload: &T) -> Result<RelayResponse>
	where
		T: ?Sized + Serialize,
	{
		let mut stage = DispatchStage::Resolving;

		obs::record_dispatch_outcome(stage, DispatchOutcome::Attempt);

		let result = self.run(url, payload, &mut stage).await;

		match &result {
			Ok(_) => obs::record_dispatch_outcome(stage, DispatchOutcome::Success),
			Err(_) => obs::record_dispatch_outcome(stage, DispatchOutcome::Failure),
		}

		result
	}

	/// Looks `account` up in the account table and relays `payload` to its URL.
	pub async fn dispatch_account<T>(&self, account: &str, payload: &T) -> Result<RelayResponse>
	where
		T: ?Sized + Serialize,
	{
		let url = self.config.accounts.find(account)?.url.clone();

		self.dispatch(&url, payload).await
	}

	/// Runs the resolving, lookup, and signing stages without sending anything.
	///
	/// The header covers the parsed form of `url`, which is the form a transport sends.
	pub fn authorize(&self, url: &str) -> Result<(Realm, AuthorizationHeader)> {
		let (realm, target) = resolve_target(url)?;
		let credential = self.config.credentials.find(&realm)?;
		let header = sign(credential, &realm, &target)?;

		Ok((realm, header))
	}

	async fn run<T>(
		&self,
		url: &str,
		payload: &T,
		stage: &mut DispatchStage,
	) -> Result<RelayResponse>
	where
		T: ?Sized + Serialize,
	{
		let (realm, target) = {
			let _span = DispatchSpan::new(*stage, None).entered();

			resolve_target(url)?
		};

		*stage = DispatchStage::LookingUp;

		let credential = {
			let _span = DispatchSpan::new(*stage, Some(realm.as_str())).entered();

			self.config.credentials.find(&realm)?
		};

		*stage = DispatchStage::Signing;

		let authorization = {
			let _span = DispatchSpan::new(*stage, Some(realm.as_str())).entered();

			sign(credential, &realm, &target)?
		};

		*stage = DispatchStage::Sending;

		let body = serde_json::to_vec(payload).map_err(|source| TransportError::Encode { source })?;
		let request = OutboundRequest {
			url: target,
			authorization,
			body,
			timeout: self.config.options.timeout,
		};
		let response = DispatchSpan::new(*stage, Some(realm.as_str()))
			.instrument(self.http_client.post_json(request))
			.await?;

		if self.config.options.require_success_status && !response.is_success() {
			return Err(TransportError::Status { status: response.status }.into());
		}

		*stage = DispatchStage::Parsing;

		let _span = DispatchSpan::new(*stage, Some(realm.as_str())).entered();
		let body = serde_json::from_slice(&response.body)
			.map_err(|source| TransportError::Decode { source, status: response.status })?;

		Ok(RelayResponse { status: response.status, body })
	}
}
#[cfg(feature = "reqwest")]
impl Dispatcher<ReqwestHttpClient> {
	/// Creates a dispatcher backed by a reqwest transport that does not follow redirects.
	pub fn new(config: Arc<RelayConfig>) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for Dispatcher<C>
where
	C: ?Sized + RelayHttpClient,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), http_client: self.http_client.clone() }
	}
}
impl<C> Debug for Dispatcher<C>
where
	C: ?Sized + RelayHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher")
			.field("realms", &self.config.credentials.len())
			.field("accounts", &self.config.accounts.len())
			.field("options", &self.config.options)
			.finish()
	}
}

fn resolve_target(url: &str) -> Result<(Realm, Url)> {
	let realm = auth::resolve_realm(url)?;
	let target = Url::parse(url).map_err(|_| Error::invalid_url(url))?;

	Ok((realm, target))
}

// The signed base URL is the serialized `Url`, i.e. exactly what the transport sends.
fn sign(credential: &Credential, realm: &Realm, target: &Url) -> Result<AuthorizationHeader> {
	let signer = relay_signer(credential, realm);
	let request = SignableRequest::new("POST", target.as_str());
	let params = signer.authorize(&request, Some(&credential.token))?;

	Ok(signer.to_header(&params))
}
