//! RFC 3986 percent-encoding with the OAuth 1.0a reserved set, plus parameter normalization.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	oauth1::{ParamValue, merge_param},
};

// Everything outside `ALPHA / DIGIT / "-" / "." / "_" / "~"` is escaped, which covers the
// `! * ' ( )` characters generic URI component encoders leave alone.
const OAUTH_RESERVED: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `value` as required by OAuth 1.0a (upper-case hex, UTF-8 bytes).
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_RESERVED).to_string()
}

/// Encodes every key and value, then orders the pairs by encoded key and encoded value.
///
/// Repeated keys yield one pair per value so two serializations of the same logical
/// multimap are always identical.
pub fn sorted_encode(params: &BTreeMap<String, ParamValue>) -> Vec<(String, String)> {
	let mut pairs = params
		.iter()
		.flat_map(|(key, value)| {
			let key = percent_encode(key);

			value.values().iter().map(move |v| (key.clone(), percent_encode(v)))
		})
		.collect::<Vec<_>>();

	pairs.sort_unstable();

	pairs
}

/// Joins already-encoded pairs as `key=value&key=value`.
pub fn join_pairs(pairs: &[(String, String)]) -> String {
	let mut buf = String::new();

	for (idx, (key, value)) in pairs.iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(key);
		buf.push('=');
		buf.push_str(value);
	}

	buf
}

/// Decodes a URL query string into a parameter map, accumulating repeated keys.
pub fn parse_query(query: &str) -> BTreeMap<String, ParamValue> {
	let mut params = BTreeMap::new();

	for (key, value) in form_urlencoded::parse(query.as_bytes()) {
		merge_param(&mut params, key.into_owned(), &ParamValue::Single(value.into_owned()));
	}

	params
}
