//! Remote account descriptors used for presentation and account-based routing.

// self
use crate::{
	_prelude::*,
	auth::{self, AccountId, Realm},
	error::ConfigError,
};

/// Presentation/routing metadata for one remote environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAccountDescriptor {
	/// Human-readable label.
	pub description: String,
	/// Account identifier used by callers to pick an environment.
	pub account: AccountId,
	/// Endpoint URL requests for this account are sent to.
	pub url: String,
}
impl RemoteAccountDescriptor {
	/// Derives the signing realm from the descriptor URL.
	pub fn realm(&self) -> Result<Realm> {
		auth::resolve_realm(&self.url)
	}
}

/// Read-only table of remote account descriptors, kept in configuration order.
#[derive(Clone, Debug, Default)]
pub struct AccountTable {
	entries: Vec<RemoteAccountDescriptor>,
	index: HashMap<AccountId, usize>,
}
impl AccountTable {
	/// Builds the table, rejecting duplicate account identifiers.
	pub fn new(
		descriptors: impl IntoIterator<Item = RemoteAccountDescriptor>,
	) -> Result<Self, ConfigError> {
		let mut table = Self::default();

		for descriptor in descriptors {
			if table.index.contains_key(&descriptor.account) {
				return Err(ConfigError::DuplicateAccount { account: descriptor.account.into() });
			}

			table.index.insert(descriptor.account.clone(), table.entries.len());
			table.entries.push(descriptor);
		}

		Ok(table)
	}

	/// Parses the string-valued account setting (a JSON array of descriptors).
	pub fn from_setting(raw: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(raw);
		let descriptors: Vec<RemoteAccountDescriptor> =
			serde_path_to_error::deserialize(de).map_err(ConfigError::invalid_accounts)?;

		Self::new(descriptors)
	}

	/// Returns the descriptor registered under `account`.
	pub fn find(&self, account: &str) -> Result<&RemoteAccountDescriptor> {
		self.index
			.get(account)
			.map(|&idx| &self.entries[idx])
			.ok_or_else(|| Error::AccountNotFound { account: account.to_owned() })
	}

	/// Iterates over descriptors in configuration order.
	pub fn iter(&self) -> impl Iterator<Item = &RemoteAccountDescriptor> {
		self.entries.iter()
	}

	/// Number of configured accounts.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no accounts are configured.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const SETTING: &str = r#"[
		{ "description": "Production", "account": "1337", "url": "https://1337.restlets.example.com/app" },
		{ "description": "Sandbox", "account": "1337_SB1", "url": "https://1337-sb1.restlets.example.com/app" }
	]"#;

	#[test]
	fn setting_loads_in_order_and_derives_realms() {
		let table = AccountTable::from_setting(SETTING).expect("Account setting should load.");
		let labels = table.iter().map(|d| d.description.as_str()).collect::<Vec<_>>();

		assert_eq!(labels, ["Production", "Sandbox"]);

		let sandbox = table.find("1337_SB1").expect("Sandbox account should be found.");

		assert_eq!(sandbox.realm().expect("Sandbox URL should resolve.").as_str(), "1337_SB1");
		assert!(matches!(table.find("9999"), Err(Error::AccountNotFound { .. })));
	}

	#[test]
	fn holes_and_duplicates_are_rejected() {
		let err = AccountTable::from_setting(
			r#"[{ "description": "A", "account": "a", "url": "https://a.example.com" }, null]"#,
		)
		.expect_err("Null descriptors must be rejected.");

		assert!(matches!(err, ConfigError::InvalidAccounts { path, .. } if path == "[1]"));

		let err = AccountTable::from_setting(
			r#"[
				{ "description": "A", "account": "a", "url": "https://a.example.com" },
				{ "description": "B", "account": "a", "url": "https://b.example.com" }
			]"#,
		)
		.expect_err("Duplicate accounts must be rejected.");

		assert!(matches!(err, ConfigError::DuplicateAccount { account } if account == "a"));
	}

	#[test]
	fn malformed_setting_is_rejected() {
		assert!(matches!(
			AccountTable::from_setting("[{\"description\":\"A\",\"account\":\"a\"},]"),
			Err(ConfigError::InvalidAccounts { .. })
		));
		assert!(AccountTable::from_setting("[]").expect("Empty list is valid.").is_empty());
	}
}
