//! Realm-aware OAuth 1.0a request signing: resolve the credential set that owns a target URL,
//! sign the call deterministically, and relay JSON payloads to remote environments.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod oauth1;
pub mod obs;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{ConsumerPair, Credential, Realm, TokenPair},
		config::{DispatchOptions, RelayConfig},
		dispatch::Dispatcher,
		http::ReqwestHttpClient,
		store::{AccountTable, CredentialStore},
	};

	/// Dispatcher type alias used by reqwest-backed tests.
	pub type ReqwestTestDispatcher = Dispatcher<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client suitable for talking to `httpmock` servers.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a credential fixture for the provided realm.
	pub fn test_credential(realm: &str, consumer: (&str, &str), token: (&str, &str)) -> Credential {
		Credential::new(
			Realm::new(realm).expect("Realm fixture should be valid."),
			ConsumerPair::new(consumer.0, consumer.1),
			TokenPair::new(token.0, token.1),
		)
	}

	/// Wraps credential fixtures in an immutable relay configuration with no account table.
	pub fn test_relay_config(credentials: Vec<Credential>) -> Arc<RelayConfig> {
		let store = CredentialStore::new(credentials)
			.expect("Credential fixtures should not contain duplicate realms.");

		Arc::new(RelayConfig::new(store, AccountTable::default(), DispatchOptions::default()))
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
