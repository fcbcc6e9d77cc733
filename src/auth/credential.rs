//! Realm-keyed consumer/token credential sets.

// self
use crate::{
	_prelude::*,
	auth::{Realm, Secret},
};

/// Long-lived identity of the calling integration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerPair {
	/// Consumer key sent as `oauth_consumer_key`.
	pub key: String,
	/// Consumer secret; only ever used to derive the signing key.
	pub secret: Secret,
}
impl ConsumerPair {
	/// Builds a consumer pair from raw strings.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: Secret::new(secret) }
	}
}

/// Long-lived identity of the authorized principal within the remote system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Token identifier sent as `oauth_token`.
	pub id: String,
	/// Token secret; only ever used to derive the signing key.
	pub secret: Secret,
}
impl TokenPair {
	/// Builds a token pair from raw strings.
	pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { id: id.into(), secret: Secret::new(secret) }
	}
}

/// Immutable credential set selected by realm.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
	/// Unique lookup key, compared exactly against resolved realms.
	pub realm: Realm,
	/// Consumer key/secret pair.
	pub consumer: ConsumerPair,
	/// Token id/secret pair.
	pub token: TokenPair,
}
impl Credential {
	/// Assembles a credential set.
	pub fn new(realm: Realm, consumer: ConsumerPair, token: TokenPair) -> Self {
		Self { realm, consumer, token }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn debug_output_redacts_both_secrets() {
		let credential = Credential::new(
			Realm::new("ACCT_SB1").expect("Realm fixture should be valid."),
			ConsumerPair::new("ck", "consumer-secret"),
			TokenPair::new("tk", "token-secret"),
		);
		let rendered = format!("{credential:?}");

		assert!(rendered.contains("ACCT_SB1"));
		assert!(!rendered.contains("consumer-secret"));
		assert!(!rendered.contains("token-secret"));
	}

	#[test]
	fn deserializes_configuration_shape() {
		let raw = r#"{
			"realm": "ACCT_SB1",
			"consumer": { "key": "ck", "secret": "cs" },
			"token": { "id": "tk", "secret": "ts" }
		}"#;
		let credential: Credential =
			serde_json::from_str(raw).expect("Credential fixture should deserialize.");

		assert_eq!(credential.realm.as_str(), "ACCT_SB1");
		assert_eq!(credential.consumer.key, "ck");
		assert_eq!(credential.consumer.secret.expose(), "cs");
		assert_eq!(credential.token.id, "tk");
		assert_eq!(credential.token.secret.expose(), "ts");
	}
}
