//! OAuth 1.0a signature engine: base string, signing key, digest, and header rendering.
//!
//! [`Signer`] wraps an immutable [`SignerConfig`]; every method is a pure function of the
//! configuration and its arguments except [`Signer::authorize`], which draws a fresh nonce
//! from the thread-local RNG and reads the wall clock.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac, digest::KeyInit};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerPair, TokenPair},
	error::SigningError,
	oauth1::{
		AuthorizationHeader, OAUTH_VERSION, OAuthParameters, ParamValue, SignableRequest,
		SignatureMethod, codec, merge_param,
	},
};

/// Immutable signer configuration.
#[derive(Clone, Debug)]
pub struct SignerConfig {
	/// Consumer key/secret pair.
	pub consumer: ConsumerPair,
	/// Digest used for `oauth_signature`.
	pub signature_method: SignatureMethod,
	/// Optional `realm` attribute for the `Authorization` header; never signed.
	pub realm: Option<String>,
	/// Number of `[A-Za-z0-9]` characters in generated nonces.
	pub nonce_length: usize,
	/// Value emitted as `oauth_version`.
	pub version: String,
	/// Keep the trailing `&` in the signing key when no token secret is supplied.
	pub last_ampersand: bool,
}
impl SignerConfig {
	/// Default nonce length (32 characters from a 62-symbol alphabet).
	pub const DEFAULT_NONCE_LENGTH: usize = 32;

	/// Creates a configuration with default nonce length, version, and separator handling.
	pub fn new(consumer: ConsumerPair, signature_method: SignatureMethod) -> Self {
		Self {
			consumer,
			signature_method,
			realm: None,
			nonce_length: Self::DEFAULT_NONCE_LENGTH,
			version: OAUTH_VERSION.into(),
			last_ampersand: true,
		}
	}

	/// Sets the header `realm` attribute.
	pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
		self.realm = Some(realm.into());

		self
	}

	/// Overrides the generated nonce length.
	pub fn with_nonce_length(mut self, nonce_length: usize) -> Self {
		self.nonce_length = nonce_length;

		self
	}

	/// Controls whether `consumer_secret&` keeps its separator when no token secret exists.
	pub fn with_last_ampersand(mut self, last_ampersand: bool) -> Self {
		self.last_ampersand = last_ampersand;

		self
	}
}

/// Stateless OAuth 1.0a signer bound to one [`SignerConfig`].
#[derive(Clone, Debug)]
pub struct Signer {
	config: SignerConfig,
}
impl Signer {
	/// Wraps the provided configuration.
	pub fn new(config: SignerConfig) -> Self {
		Self { config }
	}

	/// Returns the configuration this signer was built with.
	pub fn config(&self) -> &SignerConfig {
		&self.config
	}

	/// Generates a fresh nonce and timestamp, then signs `request`.
	pub fn authorize(
		&self,
		request: &SignableRequest,
		token: Option<&TokenPair>,
	) -> Result<OAuthParameters> {
		let nonce = self.nonce()?;
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		self.authorize_at(request, token, nonce, timestamp)
	}

	/// Signs `request` with a caller-provided nonce and timestamp.
	pub fn authorize_at(
		&self,
		request: &SignableRequest,
		token: Option<&TokenPair>,
		nonce: impl Into<String>,
		timestamp: i64,
	) -> Result<OAuthParameters> {
		let mut params = OAuthParameters {
			consumer_key: self.config.consumer.key.clone(),
			nonce: nonce.into(),
			signature_method: self.config.signature_method,
			timestamp,
			version: self.config.version.clone(),
			token: token.map(|t| t.id.clone()),
			signature: None,
		};
		let signature = self.signature(request, token.map(|t| t.secret.expose()), &params)?;

		params.signature = Some(signature);

		Ok(params)
	}

	/// Computes `oauth_signature` for `request`; any existing signature in `params` is ignored.
	pub fn signature(
		&self,
		request: &SignableRequest,
		token_secret: Option<&str>,
		params: &OAuthParameters,
	) -> Result<String> {
		let key = self.signing_key(token_secret);
		let signature = match self.config.signature_method {
			SignatureMethod::Plaintext => key,
			SignatureMethod::HmacSha1 =>
				hmac_base64::<Hmac<Sha1>>(&key, &self.base_string(request, params))?,
			SignatureMethod::HmacSha256 =>
				hmac_base64::<Hmac<Sha256>>(&key, &self.base_string(request, params))?,
		};

		Ok(signature)
	}

	/// Builds `encode(consumer_secret) & encode(token_secret)`.
	pub fn signing_key(&self, token_secret: Option<&str>) -> String {
		let mut key = codec::percent_encode(self.config.consumer.secret.expose());

		key.push('&');

		match token_secret.filter(|secret| !secret.is_empty()) {
			Some(secret) => key.push_str(&codec::percent_encode(secret)),
			None if !self.config.last_ampersand => {
				key.pop();
			},
			None => (),
		}

		key
	}

	/// Builds `METHOD & encode(base_url) & encode(parameter_string)`.
	pub fn base_string(&self, request: &SignableRequest, params: &OAuthParameters) -> String {
		format!(
			"{}&{}&{}",
			request.method.to_uppercase(),
			codec::percent_encode(request.base_url()),
			codec::percent_encode(&self.parameter_string(request, params)),
		)
	}

	/// Normalizes the OAuth, form, and URL query parameters into one sorted string.
	pub fn parameter_string(
		&self,
		request: &SignableRequest,
		params: &OAuthParameters,
	) -> String {
		let mut merged = BTreeMap::new();

		for (key, value) in params.unsigned_pairs() {
			merge_param(&mut merged, key.to_owned(), &ParamValue::Single(value));
		}
		for (key, value) in &request.form_params {
			merge_param(&mut merged, key.clone(), value);
		}
		if let Some(query) = request.query() {
			for (key, value) in codec::parse_query(query) {
				merge_param(&mut merged, key, &value);
			}
		}

		codec::join_pairs(&codec::sorted_encode(&merged))
	}

	/// Renders the `Authorization` header for signed parameters.
	pub fn to_header(&self, params: &OAuthParameters) -> AuthorizationHeader {
		let mut pairs = params.pairs();

		pairs.sort_unstable_by_key(|(key, _)| *key);

		let mut segments = Vec::with_capacity(pairs.len() + 1);

		if let Some(realm) = self.config.realm.as_deref().filter(|realm| !realm.is_empty()) {
			segments.push(format!("realm=\"{}\"", codec::percent_encode(realm)));
		}

		segments.extend(
			pairs
				.into_iter()
				.filter(|(key, _)| key.starts_with("oauth_"))
				.map(|(key, value)| format!("{key}=\"{}\"", codec::percent_encode(&value))),
		);

		AuthorizationHeader::from_segments(&segments)
	}

	fn nonce(&self) -> Result<String, SigningError> {
		if self.config.nonce_length == 0 {
			return Err(SigningError::EmptyNonce);
		}

		Ok(random_string(self.config.nonce_length))
	}
}

fn hmac_base64<M>(key: &str, message: &str) -> Result<String, SigningError>
where
	M: Mac + KeyInit,
{
	let mut mac = <M as KeyInit>::new_from_slice(key.as_bytes())
		.map_err(|source| SigningError::InvalidKey { source })?;

	mac.update(message.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
