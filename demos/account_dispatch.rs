//! Demonstrates loading relay settings from JSON, routing a payload through an account
//! descriptor, and relaying the remote JSON response through a custom loopback transport.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use oauth1_relay::{
	config::RelayConfig,
	dispatch::Dispatcher,
	http::{HttpFuture, OutboundRequest, RelayHttpClient, ReqwestHttpClient},
};

const CREDENTIALS: &str = r#"[
	{
		"realm": "1337_SB1",
		"consumer": { "key": "demo-consumer", "secret": "demo-consumer-secret" },
		"token": { "id": "demo-token", "secret": "demo-token-secret" }
	}
]"#;
const ACCOUNTS: &str = r#"[
	{ "description": "Sandbox", "account": "1337_SB1", "url": "https://1337-sb1.restlets.example.com/app?script=7" }
]"#;

/// Keeps the signed path and query but sends the request to the local mock server.
struct LoopbackHttpClient {
	inner: ReqwestHttpClient,
	base: Url,
}
impl RelayHttpClient for LoopbackHttpClient {
	fn post_json(&self, mut request: OutboundRequest) -> HttpFuture<'_> {
		let mut url = self.base.clone();

		url.set_path(request.url.path());
		url.set_query(request.url.query());
		request.url = url;

		self.inner.post_json(request)
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let restlet = server
		.mock_async(|when, then| {
			when.method(POST).path("/app").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "rows": [{ "id": 1 }] }));
		})
		.await;
	let config = Arc::new(RelayConfig::from_json(CREDENTIALS, ACCOUNTS)?);

	for descriptor in config.accounts.iter() {
		println!(
			"{} ({}) signs as realm {}.",
			descriptor.description,
			descriptor.account,
			descriptor.realm()?
		);
	}

	let http_client = LoopbackHttpClient {
		inner: ReqwestHttpClient::new()?,
		base: Url::parse(&server.base_url())?,
	};
	let dispatcher = <Dispatcher<LoopbackHttpClient>>::with_http_client(config, http_client);
	let response =
		dispatcher.dispatch_account("1337_SB1", &json!({ "query": "SELECT 1" })).await?;

	match response.application_error() {
		Some(error) => println!("Remote application error: {error}."),
		None => println!("Relayed response ({}): {}.", response.status, response.body),
	}

	restlet.assert_async().await;

	Ok(())
}
