//! Relay-level error types shared by the resolver, signer, stores, and dispatcher.
//!
//! Every failure surfaced by [`crate::dispatch::Dispatcher`] maps onto a stable [`ErrorKind`]
//! and can be rendered as the structured `{ "error": { "kind", "message" } }` payload via
//! [`Error::to_payload`]. Messages are built from non-secret context only; credential material
//! never reaches a `Display` implementation in this module.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Target URL has no extractable host label.
	#[error("Target URL `{url}` has no extractable realm label.")]
	InvalidUrl {
		/// URL supplied by the caller, with any userinfo removed.
		url: String,
	},
	/// No credential matches the resolved realm.
	#[error("No credential is configured for realm `{realm}`.")]
	CredentialNotFound {
		/// Realm that was looked up.
		realm: String,
	},
	/// No remote account descriptor matches the requested account.
	#[error("No remote account is configured for `{account}`.")]
	AccountNotFound {
		/// Account that was looked up.
		account: String,
	},
	/// Base string or digest computation failed.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Outbound call or response decoding failed.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the stable classification for this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidUrl { .. } => ErrorKind::InvalidUrl,
			Self::CredentialNotFound { .. } => ErrorKind::CredentialNotFound,
			Self::AccountNotFound { .. } => ErrorKind::AccountNotFound,
			Self::Signing(_) => ErrorKind::Signing,
			Self::Transport(_) => ErrorKind::Transport,
			Self::Config(_) => ErrorKind::Config,
		}
	}

	/// Renders the error as the structured payload relayed to callers.
	pub fn to_payload(&self) -> ErrorPayload {
		ErrorPayload { error: ErrorBody { kind: self.kind(), message: self.to_string() } }
	}

	pub(crate) fn invalid_url(url: &str) -> Self {
		Self::InvalidUrl { url: strip_userinfo(url) }
	}
}

// Drops `user[:password]@` from the authority so credentials never reach a message.
fn strip_userinfo(url: &str) -> String {
	let (scheme, rest) = url.split_once("://").unwrap_or(("", url));
	let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());

	match rest[..authority_end].rfind('@') {
		Some(at) if scheme.is_empty() => rest[at + 1..].to_owned(),
		Some(at) => format!("{scheme}://{}", &rest[at + 1..]),
		None => url.to_owned(),
	}
}

/// Stable error classification used in structured payloads, spans, and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
	/// See [`Error::InvalidUrl`].
	#[serde(rename = "InvalidUrlError")]
	InvalidUrl,
	/// See [`Error::CredentialNotFound`].
	#[serde(rename = "CredentialNotFoundError")]
	CredentialNotFound,
	/// See [`Error::AccountNotFound`].
	#[serde(rename = "AccountNotFoundError")]
	AccountNotFound,
	/// See [`Error::Signing`].
	#[serde(rename = "SigningError")]
	Signing,
	/// See [`Error::Transport`].
	#[serde(rename = "TransportError")]
	Transport,
	/// See [`Error::Config`].
	#[serde(rename = "ConfigError")]
	Config,
}
impl ErrorKind {
	/// Returns a stable label suitable for payloads or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::InvalidUrl => "InvalidUrlError",
			ErrorKind::CredentialNotFound => "CredentialNotFoundError",
			ErrorKind::AccountNotFound => "AccountNotFoundError",
			ErrorKind::Signing => "SigningError",
			ErrorKind::Transport => "TransportError",
			ErrorKind::Config => "ConfigError",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Structured `{ "error": { "kind", "message" } }` value returned to relay callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
	/// Error details.
	pub error: ErrorBody,
}

/// Inner body of an [`ErrorPayload`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Stable error classification.
	pub kind: ErrorKind,
	/// Human-readable message; never carries secret material.
	pub message: String,
}

/// Failures raised while computing a signature.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// HMAC key could not be initialized.
	#[error("HMAC signing key was rejected.")]
	InvalidKey {
		/// Underlying digest failure.
		#[source]
		source: hmac::digest::InvalidLength,
	},
	/// The configured nonce length cannot produce a usable nonce.
	#[error("Nonce length must be greater than zero.")]
	EmptyNonce,
}

/// Transport-level failures (network, timeout, status, body decoding).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request exceeded the configured timeout.
	#[error("Remote endpoint did not respond within the configured timeout.")]
	Timeout,
	/// Remote endpoint answered with a non-success status and the caller enforces 2xx.
	#[error("Remote endpoint returned HTTP status {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// Response body is not valid JSON.
	#[error("Remote endpoint returned a body that is not valid JSON.")]
	Decode {
		/// JSON parsing failure.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the undecodable response.
		status: u16,
	},
	/// Caller payload could not be serialized as JSON.
	#[error("Request payload could not be serialized as JSON.")]
	Encode {
		/// JSON serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}

/// Configuration and validation failures raised while loading relay settings.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Credential list is malformed or contains holes.
	///
	/// The underlying parser error is dropped because its message may quote secret values.
	#[error("Credential configuration is invalid at `{path}` (line {line}, column {column}).")]
	InvalidCredentials {
		/// JSON path of the offending entry.
		path: String,
		/// Line of the offending token.
		line: usize,
		/// Column of the offending token.
		column: usize,
	},
	/// Remote account list is malformed or contains holes.
	#[error("Remote account configuration is invalid at `{path}`.")]
	InvalidAccounts {
		/// JSON path of the offending entry.
		path: String,
		/// Parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Two credentials share one realm.
	#[error("Realm `{realm}` is configured more than once.")]
	DuplicateRealm {
		/// Duplicated realm.
		realm: String,
	},
	/// Two remote accounts share one account identifier.
	#[error("Account `{account}` is configured more than once.")]
	DuplicateAccount {
		/// Duplicated account identifier.
		account: String,
	},
	/// Identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Signature method string is not supported.
	#[error("Signature method `{method}` is not supported.")]
	UnknownSignatureMethod {
		/// Rejected method string.
		method: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_credentials(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();
		let inner = e.into_inner();

		Self::InvalidCredentials { path, line: inner.line(), column: inner.column() }
	}

	pub(crate) fn invalid_accounts(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::InvalidAccounts { path, source: e.into_inner() }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn payload_carries_stable_kind_labels() {
		let err = Error::CredentialNotFound { realm: "UNKNOWN".into() };
		let payload =
			serde_json::to_value(err.to_payload()).expect("Error payload should serialize.");

		assert_eq!(payload["error"]["kind"], "CredentialNotFoundError");
		assert_eq!(payload["error"]["message"], "No credential is configured for realm `UNKNOWN`.");
	}

	#[test]
	fn nested_errors_keep_their_kind() {
		let err: Error = TransportError::Timeout.into();

		assert_eq!(err.kind(), ErrorKind::Transport);
		assert_eq!(err.kind().as_str(), "TransportError");
		assert_eq!(Error::from(SigningError::EmptyNonce).kind(), ErrorKind::Signing);
		assert_eq!(Error::invalid_url("ftp://x").kind(), ErrorKind::InvalidUrl);
	}

	#[test]
	fn invalid_url_messages_drop_userinfo() {
		let err = Error::invalid_url("https://user:pw@acct.example.com/run?a=b@c");
		let payload = err.to_payload();

		assert_eq!(
			payload.error.message,
			"Target URL `https://acct.example.com/run?a=b@c` has no extractable realm label."
		);
		assert!(matches!(
			Error::invalid_url("user:pw@acct.example.com"),
			Error::InvalidUrl { url } if url == "acct.example.com"
		));
		assert!(matches!(
			Error::invalid_url("not a url"),
			Error::InvalidUrl { url } if url == "not a url"
		));
	}

	#[test]
	fn credential_parse_errors_do_not_echo_secrets() {
		let raw = r#"[{"realm":"A","consumer":{"key":"ck","secret":"hunter2"},"token":{"id":"t"}}]"#;
		let de = &mut serde_json::Deserializer::from_str(raw);
		let err = serde_path_to_error::deserialize::<_, Vec<crate::auth::Credential>>(de)
			.expect_err("Token without a secret must be rejected.");
		let err = ConfigError::invalid_credentials(err);

		assert!(!err.to_string().contains("hunter2"));
		assert!(err.to_string().contains("[0].token"));
	}
}
