//! Derives the credential realm from a target URL's leading host label.

// self
use crate::{_prelude::*, auth::Realm};

const SCHEME: &str = "https://";

/// Resolves the realm that owns `url`.
///
/// The first host label (the text between `https://` and the first `.`) has every `-`
/// replaced with `_` and is upper-cased, so `https://1337-sb1.restlets.example.com/app`
/// resolves to `1337_SB1`. The label must sit inside the host: URLs whose first `.` appears
/// after a path, query, fragment, userinfo, or port delimiter are rejected, as are labels
/// that normalize to anything outside the [`Realm`] alphabet.
pub fn resolve_realm(url: &str) -> Result<Realm> {
	let rest = url
		.get(..SCHEME.len())
		.filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
		.map(|_| &url[SCHEME.len()..])
		.ok_or_else(|| Error::invalid_url(url))?;
	let (label, _) = rest.split_once('.').ok_or_else(|| Error::invalid_url(url))?;

	if label.is_empty() || label.chars().any(is_host_delimiter) {
		return Err(Error::invalid_url(url));
	}

	let normalized = label.replace('-', "_").to_uppercase();

	Realm::new(normalized).map_err(|_| Error::invalid_url(url))
}

fn is_host_delimiter(c: char) -> bool {
	matches!(c, '/' | '?' | '#' | '@' | ':') || c.is_whitespace()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn resolve(url: &str) -> String {
		resolve_realm(url).expect("Fixture URL should resolve to a realm.").into()
	}

	#[test]
	fn first_label_is_normalized() {
		assert_eq!(resolve("https://1337-sb1.restlets.example.com/app"), "1337_SB1");
		assert_eq!(resolve("https://1337.restlets.example.com/app"), "1337");
		assert_eq!(resolve("https://acct-sb1.restlets.example.com/run"), "ACCT_SB1");
		assert_eq!(resolve("HTTPS://tstdrv-2.example.com"), "TSTDRV_2");
	}

	#[test]
	fn urls_without_host_label_fail() {
		for url in [
			"https://localhost/app",
			"https://.example.com/app",
			"http://acct.example.com/app",
			"https://localhost/path.json",
			"https://localhost:8443/a.b",
			"https://user@host.example.com",
			"https://acct%2Dsb1.example.com/app",
			"https://bücher.example.com/app",
			"acct.example.com",
			"",
		] {
			let err = resolve_realm(url).expect_err("URL without a host label must be rejected.");

			assert!(matches!(err, Error::InvalidUrl { .. }), "Unexpected error: {err:?}.");
		}
	}
}
