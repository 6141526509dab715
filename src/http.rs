//! Transport primitives for provider API calls.
//!
//! The module exposes [`ProviderHttpClient`], the client's only dependency on an HTTP
//! stack, together with [`TransportErrorMapper`] so downstream crates can plug in custom
//! transports without losing the client's error taxonomy. Every provider endpoint is a
//! `GET` with query-string parameters, so the contract is a single `get` call that returns
//! the raw body plus [`ResponseMetadata`] (HTTP status and any `Retry-After` hint).

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{ACCEPT, HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};
use crate::{_prelude::*, api::Endpoint};

/// Query parameters sent with a provider request.
pub type Query = [(&'static str, String)];

/// Boxed future returned by [`ProviderHttpClient::get`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ProviderResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of issuing provider `GET` requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared
/// (behind `Arc`) by every clone of a client, and the futures they return must be `Send`
/// so client operations can hop executors. Non-2xx answers are not errors at this layer;
/// the client inspects [`ResponseMetadata::status`] itself.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Issues `GET url?query` and returns the raw response.
	fn get<'a>(&'a self, url: &'a Url, query: &'a Query) -> HttpFuture<'a, Self::TransportError>;
}

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error emitted by the transport into a client error.
	fn map_transport_error(&self, endpoint: Endpoint, error: E) -> Error;
}

/// Metadata captured from a provider response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Raw provider response handed back by a [`ProviderHttpClient`].
#[derive(Clone, Debug, Default)]
pub struct ProviderResponse {
	/// Status and retry metadata.
	pub metadata: ResponseMetadata,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl ProviderResponse {
	/// Builds a `200 OK` response around the provided body.
	pub fn ok(body: impl Into<Vec<u8>>) -> Self {
		Self { metadata: ResponseMetadata { status: 200, retry_after: None }, body: body.into() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// User agent sent with every request.
	pub const USER_AGENT: &'static str = concat!("kopeechka-store-rs/", env!("CARGO_PKG_VERSION"));

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with the crate's user agent and the provided request timeout.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.user_agent(Self::USER_AGENT)
			.timeout(timeout)
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn get<'a>(&'a self, url: &'a Url, query: &'a Query) -> HttpFuture<'a, Self::TransportError> {
		Box::pin(async move {
			let response = self
				.0
				.get(url.clone())
				.header(ACCEPT, "application/json")
				.query(query)
				.send()
				.await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(ProviderResponse { metadata: ResponseMetadata { status, retry_after }, body })
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, endpoint: Endpoint, err: ReqwestError) -> Error {
		#[cfg(feature = "tracing")]
		tracing::debug!(endpoint = endpoint.path(), error = %err, "Provider transport failed.");
		#[cfg(not(feature = "tracing"))]
		let _ = endpoint;

		if err.is_builder() {
			return ConfigError::from(err).into();
		}
		if let Some(status) = err.status() {
			return TransportError::Status { status: status.as_u16(), retry_after: None }.into();
		}

		TransportError::from(err).into()
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Duration::try_from(delta).ok();
		}
	}

	None
}
