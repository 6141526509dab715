//! Address lifecycle orchestration on top of the provider API.
//!
//! [`Client`] owns the transport, the [`AddressCache`], and the [`RateLimiter`]. Every
//! outbound request waits for a limiter permit first; every public network operation is
//! instrumented, counted, and wraps its failure in [`Error::Operation`].

pub mod options;

mod account;
mod common;
mod lifecycle;
mod message;

pub use options::*;

// self
use crate::{
	_prelude::*,
	cache::AddressCache,
	config::ClientConfig,
	http::{ProviderHttpClient, TransportErrorMapper},
	limiter::RateLimiter,
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

/// Client specialized for the crate's default reqwest transport stack.
#[cfg(feature = "reqwest")]
pub type ReqwestStoreClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Disposable-address client bound to one access key.
///
/// Clones share the transport, cache, and limiter.
pub struct Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	config: Arc<ClientConfig>,
	cache: Arc<AddressCache>,
	limiter: Arc<RateLimiter>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// The cache TTL and limiter interval come from `config`.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let cache = AddressCache::new(config.address_ttl);
		let limiter = RateLimiter::new(config.rate_limit_interval);

		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config: Arc::new(config),
			cache: Arc::new(cache),
			limiter: Arc::new(limiter),
		}
	}

	/// Replaces the client's limiter, e.g. to share one request budget across clients.
	pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
		self.limiter = limiter;

		self
	}

	/// Returns the active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns the address cache.
	pub fn cache(&self) -> &AddressCache {
		&self.cache
	}

	/// Returns the shared limiter.
	pub fn limiter(&self) -> &Arc<RateLimiter> {
		&self.limiter
	}

	/// Returns the cached task id of `address`.
	///
	/// Fails with [`CacheError::AddressNotFound`](crate::cache::CacheError::AddressNotFound)
	/// when the address was never issued by this client, was canceled, or expired.
	pub fn email_id(&self, address: &str) -> Result<String> {
		Ok(self.cache.task_id(address)?)
	}

	/// Returns the cached webmail password of `address`.
	///
	/// Only available when the address was ordered or reordered with a password.
	pub fn email_password(&self, address: &str) -> Result<String> {
		Ok(self.cache.password(address)?.expose().to_owned())
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by the default reqwest transport.
	///
	/// The transport applies [`ClientConfig::request_timeout`] to every request.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.request_timeout)?;

		Ok(Self::with_http_client(config, http_client, ReqwestTransportErrorMapper))
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			transport_mapper: self.transport_mapper.clone(),
			config: self.config.clone(),
			cache: self.cache.clone(),
			limiter: self.limiter.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("cached_addresses", &self.cache.len())
			.field("limiter", &self.limiter)
			.finish()
	}
}
