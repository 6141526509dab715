//! Client configuration with validated defaults.
//!
//! [`ClientConfig`] carries the access key, affiliate id, currency, base URL, and the
//! timing knobs for the transport, rate limiter, and address cache. Build it with
//! [`ClientConfig::builder`] when any default needs overriding.

// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted API access key keeping the secret out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);
impl AccessKey {
	/// Wraps a new key after rejecting blank input.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		if value.trim().is_empty() {
			return Err(ConfigError::BlankAccessKey);
		}

		Ok(Self(value))
	}

	/// Returns the inner key. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for AccessKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessKey").field(&"<redacted>").finish()
	}
}
impl Display for AccessKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Currency used by the provider for balances and prices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
	#[default]
	/// US dollars.
	Usd,
	/// Russian rubles.
	Rub,
}
impl Currency {
	/// Returns the wire token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Usd => "USD",
			Self::Rub => "RUB",
		}
	}
}
impl Display for Currency {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// API access key sent as the `token` query parameter.
	pub access_key: AccessKey,
	/// Affiliate program id sent as the `soft` parameter when ordering.
	pub affiliate_id: String,
	/// Currency for balances and prices.
	pub currency: Currency,
	/// Base URL every endpoint path is joined onto; always ends with `/`.
	pub base_url: Url,
	/// Per-request timeout applied by the default transport.
	pub request_timeout: Duration,
	/// Minimum spacing between two outbound requests.
	pub rate_limit_interval: Duration,
	/// Lifetime of an address cache record.
	pub address_ttl: Duration,
}
impl ClientConfig {
	/// Default provider endpoint.
	pub const DEFAULT_BASE_URL: &'static str = "https://api.kopeechka.store";
	/// Default affiliate id.
	pub const DEFAULT_AFFILIATE_ID: &'static str = "7";
	/// Default per-request timeout.
	pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(50);
	/// Default spacing between outbound requests.
	pub const DEFAULT_RATE_LIMIT_INTERVAL: Duration = Duration::from_millis(100);
	/// Default address cache TTL.
	pub const DEFAULT_ADDRESS_TTL: Duration = Duration::from_secs(15 * 60);

	/// Builds a configuration with every default applied.
	pub fn new(access_key: impl Into<String>) -> Result<Self, ConfigError> {
		Self::builder(access_key).build()
	}

	/// Creates a new builder for the provided access key.
	pub fn builder(access_key: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(access_key)
	}

	/// Resolves an endpoint path against the base URL.
	pub fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url.join(path).map_err(|source| ConfigError::InvalidEndpoint { source })
	}

	/// Query parameters shared by every request.
	pub(crate) fn base_query(&self) -> Vec<(&'static str, String)> {
		vec![
			("token", self.access_key.expose().to_owned()),
			("type", "JSON".into()),
			("api", "2.0".into()),
		]
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Raw access key; validated on [`build`](ClientConfigBuilder::build).
	pub access_key: String,
	/// Optional affiliate id override.
	pub affiliate_id: Option<String>,
	/// Currency for balances and prices.
	pub currency: Currency,
	/// Optional base URL override.
	pub base_url: Option<Url>,
	/// Per-request timeout.
	pub request_timeout: Duration,
	/// Minimum spacing between outbound requests.
	pub rate_limit_interval: Duration,
	/// Address cache TTL.
	pub address_ttl: Duration,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided access key.
	pub fn new(access_key: impl Into<String>) -> Self {
		Self {
			access_key: access_key.into(),
			affiliate_id: None,
			currency: Currency::default(),
			base_url: None,
			request_timeout: ClientConfig::DEFAULT_REQUEST_TIMEOUT,
			rate_limit_interval: ClientConfig::DEFAULT_RATE_LIMIT_INTERVAL,
			address_ttl: ClientConfig::DEFAULT_ADDRESS_TTL,
		}
	}

	/// Sets the affiliate program id.
	pub fn affiliate_id(mut self, id: impl Display) -> Self {
		self.affiliate_id = Some(id.to_string());

		self
	}

	/// Sets the currency for balances and prices.
	pub fn currency(mut self, currency: Currency) -> Self {
		self.currency = currency;

		self
	}

	/// Overrides the provider base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the per-request timeout.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Overrides the minimum spacing between outbound requests.
	pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
		self.rate_limit_interval = interval;

		self
	}

	/// Overrides the address cache TTL.
	pub fn address_ttl(mut self, ttl: Duration) -> Self {
		self.address_ttl = ttl;

		self
	}

	/// Validates the inputs and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let access_key = AccessKey::new(self.access_key)?;
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(ClientConfig::DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidEndpoint { source })?,
		};
		let base_url = normalize_base_url(base_url)?;

		if self.address_ttl.is_zero() {
			return Err(ConfigError::ZeroAddressTtl);
		}

		Ok(ClientConfig {
			access_key,
			affiliate_id: self
				.affiliate_id
				.unwrap_or_else(|| ClientConfig::DEFAULT_AFFILIATE_ID.to_owned()),
			currency: self.currency,
			base_url,
			request_timeout: self.request_timeout,
			rate_limit_interval: self.rate_limit_interval,
			address_ttl: self.address_ttl,
		})
	}
}

fn normalize_base_url(mut url: Url) -> Result<Url, ConfigError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedScheme { url: url.to_string() });
	}
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}
	// `Url::join` drops the last segment unless the path ends with a slash.
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_match_provider_conventions() {
		let config = ClientConfig::new("key-123").expect("Default config should build.");

		assert_eq!(config.base_url.as_str(), "https://api.kopeechka.store/");
		assert_eq!(config.affiliate_id, "7");
		assert_eq!(config.currency, Currency::Usd);
		assert_eq!(config.request_timeout, Duration::from_secs(50));
		assert_eq!(config.rate_limit_interval, Duration::from_millis(100));
		assert_eq!(config.address_ttl, Duration::from_secs(900));
		assert_eq!(
			config.base_query(),
			vec![("token", "key-123".into()), ("type", "JSON".into()), ("api", "2.0".into())],
		);
	}

	#[test]
	fn builder_rejects_invalid_inputs() {
		assert!(matches!(ClientConfig::new("   "), Err(ConfigError::BlankAccessKey)));

		let ftp = Url::parse("ftp://example.com").expect("Fixture URL should parse.");

		assert!(matches!(
			ClientConfig::builder("key").base_url(ftp).build(),
			Err(ConfigError::UnsupportedScheme { .. })
		));
		assert!(matches!(
			ClientConfig::builder("key").address_ttl(Duration::ZERO).build(),
			Err(ConfigError::ZeroAddressTtl)
		));
	}

	#[test]
	fn base_url_is_normalized_for_joins() {
		let url = Url::parse("http://127.0.0.1:8080/proxy/api?x=1").expect("Fixture URL should parse.");
		let config = ClientConfig::builder("key")
			.base_url(url)
			.affiliate_id(42)
			.currency(Currency::Rub)
			.build()
			.expect("Custom config should build.");

		assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/proxy/api/");
		assert_eq!(
			config.endpoint_url("user-balance").expect("Endpoint should join.").as_str(),
			"http://127.0.0.1:8080/proxy/api/user-balance",
		);
		assert_eq!(config.affiliate_id, "42");
		assert_eq!(config.currency.as_str(), "RUB");
	}

	#[test]
	fn access_key_formatters_redact() {
		let key = AccessKey::new("super-secret").expect("Access key fixture should be valid.");

		assert_eq!(format!("{key:?}"), "AccessKey(\"<redacted>\")");
		assert_eq!(format!("{key}"), "<redacted>");
		assert_eq!(key.expose(), "super-secret");
	}
}
