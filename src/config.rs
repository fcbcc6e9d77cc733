//! Process-wide relay configuration, constructed once and handed to the dispatcher.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	store::{AccountTable, CredentialStore},
};

/// Transport policy applied to every dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchOptions {
	/// Per-request timeout; `None` waits indefinitely.
	pub timeout: Option<Duration>,
	/// Treat non-2xx responses as transport failures instead of relaying them.
	pub require_success_status: bool,
}
impl DispatchOptions {
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

	/// Overrides the per-request timeout.
	pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;

		self
	}

	/// Enables or disables 2xx enforcement.
	pub fn with_require_success_status(mut self, require: bool) -> Self {
		self.require_success_status = require;

		self
	}
}
impl Default for DispatchOptions {
	fn default() -> Self {
		Self { timeout: Some(Self::DEFAULT_TIMEOUT), require_success_status: false }
	}
}

/// Immutable configuration shared by every dispatch.
#[derive(Clone, Debug, Default)]
pub struct RelayConfig {
	/// Realm-keyed credential table.
	pub credentials: CredentialStore,
	/// Remote account descriptors.
	pub accounts: AccountTable,
	/// Transport policy.
	pub options: DispatchOptions,
}
impl RelayConfig {
	/// Assembles a configuration from already-validated parts.
	pub fn new(
		credentials: CredentialStore,
		accounts: AccountTable,
		options: DispatchOptions,
	) -> Self {
		Self { credentials, accounts, options }
	}

	/// Loads both tables from their raw JSON settings with default dispatch options.
	pub fn from_json(credentials: &str, accounts_setting: &str) -> Result<Self, ConfigError> {
		Ok(Self::new(
			CredentialStore::from_json(credentials)?,
			AccountTable::from_setting(accounts_setting)?,
			DispatchOptions::default(),
		))
	}

	/// Replaces the dispatch options.
	pub fn with_options(mut self, options: DispatchOptions) -> Self {
		self.options = options;

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_bound_the_request_time() {
		let options = DispatchOptions::default();

		assert_eq!(options.timeout, Some(Duration::from_secs(30)));
		assert!(!options.require_success_status);
	}

	#[test]
	fn from_json_composes_both_loaders() {
		let config = RelayConfig::from_json(
			r#"[{ "realm": "ACCT_SB1", "consumer": { "key": "ck", "secret": "cs" }, "token": { "id": "tk", "secret": "ts" } }]"#,
			r#"[{ "description": "Sandbox", "account": "acct-sb1", "url": "https://acct-sb1.restlets.example.com/run" }]"#,
		)
		.expect("Valid settings should load.")
		.with_options(DispatchOptions::default().with_timeout(None));

		assert_eq!(config.credentials.len(), 1);
		assert_eq!(config.accounts.len(), 1);
		assert_eq!(config.options.timeout, None);
	}

	#[test]
	fn from_json_surfaces_the_failing_table() {
		let err = RelayConfig::from_json("[null]", "[]").expect_err("Null credential must fail.");

		assert!(matches!(err, ConfigError::InvalidCredentials { .. }));

		let err = RelayConfig::from_json("[]", "{}").expect_err("Non-array setting must fail.");

		assert!(matches!(err, ConfigError::InvalidAccounts { .. }));
	}
}
