//! Immutable realm-keyed credential table and the remote account descriptor table.
//!
//! Both tables are built once at process start, never mutated, and shared by reference (or
//! through [`Arc`]) across concurrent dispatches without locking.

pub mod accounts;

pub use accounts::*;

// self
use crate::{
	_prelude::*,
	auth::{Credential, Realm},
	error::ConfigError,
};

/// Read-only credential table keyed by realm.
#[derive(Clone, Debug, Default)]
pub struct CredentialStore(HashMap<Realm, Credential>);
impl CredentialStore {
	/// Builds the table, rejecting duplicate realms.
	pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Result<Self, ConfigError> {
		let mut entries = HashMap::new();

		for credential in credentials {
			if entries.contains_key(&credential.realm) {
				return Err(ConfigError::DuplicateRealm { realm: credential.realm.into() });
			}

			entries.insert(credential.realm.clone(), credential);
		}

		Ok(Self(entries))
	}

	/// Parses a dense JSON array of credential objects and builds the table.
	///
	/// `null` entries and malformed objects are rejected with the JSON path of the first
	/// offending element.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(raw);
		let credentials: Vec<Credential> =
			serde_path_to_error::deserialize(de).map_err(ConfigError::invalid_credentials)?;

		Self::new(credentials)
	}

	/// Returns the credential whose realm equals `realm` exactly.
	pub fn find(&self, realm: &str) -> Result<&Credential> {
		self.0.get(realm).ok_or_else(|| Error::CredentialNotFound { realm: realm.to_owned() })
	}

	/// Iterates over the configured realms in no particular order.
	pub fn realms(&self) -> impl Iterator<Item = &Realm> {
		self.0.keys()
	}

	/// Number of configured credentials.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether no credentials are configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
