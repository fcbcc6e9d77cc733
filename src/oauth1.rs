//! OAuth 1.0a request model, parameter codec, and signature engine.
//!
//! [`SignableRequest`] captures exactly what participates in the signature base string;
//! raw JSON bodies never do. [`Signer`] turns a request plus credential material into
//! [`OAuthParameters`] and renders the `Authorization` header through [`AuthorizationHeader`].

pub mod codec;
pub mod signer;

pub use codec::*;
pub use signer::*;

// std
use std::collections::btree_map::Entry;
// self
use crate::{_prelude::*, error::ConfigError};

/// OAuth protocol version emitted as `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Signature algorithms supported by the signer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SignatureMethod {
	/// Signing key sent verbatim; only safe over TLS.
	Plaintext,
	/// HMAC over the base string with SHA-1.
	HmacSha1,
	#[default]
	/// HMAC over the base string with SHA-256.
	HmacSha256,
}
impl SignatureMethod {
	/// Returns the wire identifier emitted as `oauth_signature_method`.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::Plaintext => "PLAINTEXT",
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SignatureMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"PLAINTEXT" => Ok(Self::Plaintext),
			"HMAC-SHA1" => Ok(Self::HmacSha1),
			"HMAC-SHA256" => Ok(Self::HmacSha256),
			other => Err(ConfigError::UnknownSignatureMethod { method: other.to_owned() }),
		}
	}
}
impl TryFrom<String> for SignatureMethod {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
impl From<SignatureMethod> for String {
	fn from(value: SignatureMethod) -> Self {
		value.as_str().to_owned()
	}
}

/// Parameter value that is either a single string or a repeated key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
	/// One value for the key.
	Single(String),
	/// Several values serialized as repeated `key=value` pairs.
	Multi(Vec<String>),
}
impl ParamValue {
	/// Returns every value carried by the parameter.
	pub fn values(&self) -> &[String] {
		match self {
			Self::Single(value) => std::slice::from_ref(value),
			Self::Multi(values) => values,
		}
	}

	/// Appends another value, promoting a single value to a repeated one.
	pub fn push(&mut self, value: impl Into<String>) {
		let value = value.into();

		match self {
			Self::Single(first) => *self = Self::Multi(vec![std::mem::take(first), value]),
			Self::Multi(values) => values.push(value),
		}
	}
}
impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Single(value.to_owned())
	}
}
impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Single(value)
	}
}
impl From<Vec<String>> for ParamValue {
	fn from(values: Vec<String>) -> Self {
		Self::Multi(values)
	}
}

/// Inserts `value` under `key`, accumulating repeated keys.
pub(crate) fn merge_param(
	params: &mut BTreeMap<String, ParamValue>,
	key: String,
	value: &ParamValue,
) {
	match params.entry(key) {
		Entry::Occupied(mut slot) =>
			value.values().iter().for_each(|v| slot.get_mut().push(v.as_str())),
		Entry::Vacant(slot) => {
			slot.insert(value.clone());
		},
	}
}

/// The parts of an HTTP request that participate in the OAuth 1.0a signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignableRequest {
	/// HTTP method; upper-cased when building the base string.
	pub method: String,
	/// Full request URL, optionally with a query string.
	pub url: String,
	/// Form-encoded body or extra query parameters.
	pub form_params: BTreeMap<String, ParamValue>,
}
impl SignableRequest {
	/// Creates a request with no form parameters.
	pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
		Self { method: method.into(), url: url.into(), form_params: BTreeMap::new() }
	}

	/// Adds a form parameter, accumulating repeated keys.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		merge_param(&mut self.form_params, key.into(), &value.into());

		self
	}

	/// Returns the URL with any query string and fragment removed.
	pub fn base_url(&self) -> &str {
		let end = self.url.find(['?', '#']).unwrap_or(self.url.len());

		&self.url[..end]
	}

	/// Returns the raw query string embedded in the URL, if any.
	pub fn query(&self) -> Option<&str> {
		let (_, rest) = self.url.split_once('?')?;

		Some(rest.split_once('#').map_or(rest, |(query, _)| query))
	}
}

/// Protocol parameters generated for a single signed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParameters {
	/// `oauth_consumer_key`.
	pub consumer_key: String,
	/// `oauth_nonce`; never reused.
	pub nonce: String,
	/// `oauth_signature_method`.
	pub signature_method: SignatureMethod,
	/// `oauth_timestamp` in whole Unix seconds.
	pub timestamp: i64,
	/// `oauth_version`.
	pub version: String,
	/// `oauth_token`, present when a token was supplied.
	pub token: Option<String>,
	/// `oauth_signature`, present once computed.
	pub signature: Option<String>,
}
impl OAuthParameters {
	/// Returns every `oauth_*` pair except the signature, in name order.
	pub fn unsigned_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![
			("oauth_consumer_key", self.consumer_key.clone()),
			("oauth_nonce", self.nonce.clone()),
			("oauth_signature_method", self.signature_method.as_str().to_owned()),
			("oauth_timestamp", self.timestamp.to_string()),
		];

		if let Some(token) = &self.token {
			pairs.push(("oauth_token", token.clone()));
		}

		pairs.push(("oauth_version", self.version.clone()));

		pairs
	}

	/// Returns every `oauth_*` pair including the signature when present.
	pub fn pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = self.unsigned_pairs();

		if let Some(signature) = &self.signature {
			pairs.push(("oauth_signature", signature.clone()));
		}

		pairs
	}
}

/// Rendered `Authorization` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationHeader(String);
impl AuthorizationHeader {
	/// Header name.
	pub const NAME: &'static str = "Authorization";

	/// Returns the header name.
	pub fn name(&self) -> &'static str {
		Self::NAME
	}

	/// Returns the header value starting with `OAuth `.
	pub fn value(&self) -> &str {
		&self.0
	}

	/// Consumes the header and returns its value.
	pub fn into_value(self) -> String {
		self.0
	}

	pub(crate) fn from_segments(segments: &[String]) -> Self {
		Self(format!("OAuth {}", segments.join(", ")))
	}
}
impl Display for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
