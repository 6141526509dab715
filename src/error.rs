//! Client-level error types shared across the cache, transport, and provider layers.

// self
use crate::{_prelude::*, cache::CacheError, obs::Operation, provider::ProviderCode};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Operation-level wrapper that keeps the underlying cause reachable via `source()`.
	#[error("Failed to {}.", .operation.describe())]
	Operation {
		/// Public operation that failed.
		operation: Operation,
		/// Underlying failure.
		#[source]
		source: Box<Error>,
	},
	/// Provider answered with an error token.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Local address cache miss; never sent to the network.
	#[error(transparent)]
	Cache(#[from] CacheError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, HTTP status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider payload could not be decoded.
	#[error(transparent)]
	Response(#[from] ResponseError),

	/// No message arrived before the wait deadline.
	#[error("No message arrived within {timeout:?}.")]
	Timeout {
		/// Deadline that elapsed.
		timeout: Duration,
	},
}
impl Error {
	/// Wraps the error with the public operation that surfaced it.
	pub fn during(self, operation: Operation) -> Self {
		Self::Operation { operation, source: Box::new(self) }
	}

	/// Classifies the error, looking through [`Error::Operation`] wrappers.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Operation { source, .. } => source.kind(),
			Self::Provider(e) => e.code.kind(),
			Self::Cache(_) => ErrorKind::NotFoundLocal,
			Self::Config(_) => ErrorKind::Config,
			Self::Transport(e) => e.kind(),
			Self::Response(_) => ErrorKind::Server,
			Self::Timeout { .. } => ErrorKind::Timeout,
		}
	}

	/// Returns the provider error code, if the provider rejected the request.
	pub fn provider_code(&self) -> Option<ProviderCode> {
		match self {
			Self::Operation { source, .. } => source.provider_code(),
			Self::Provider(e) => Some(e.code),
			_ => None,
		}
	}

	/// Returns the operation that surfaced the error, if any.
	pub fn operation(&self) -> Option<Operation> {
		match self {
			Self::Operation { operation, .. } => Some(*operation),
			_ => None,
		}
	}

	/// Returns the error wrapped by an [`Error::Operation`].
	pub fn cause(&self) -> Option<&Error> {
		match self {
			Self::Operation { source, .. } => Some(&**source),
			_ => None,
		}
	}
}

/// Coarse error classification callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Unknown or malformed website, domain, or address.
	Validation,
	/// Invalid access key.
	Auth,
	/// Insufficient balance or domain out of stock.
	Quota,
	/// Address, task id, or password is missing from the local cache.
	NotFoundLocal,
	/// Provider-side rate limit exceeded.
	RateLimited,
	/// Task canceled or missing on the provider side.
	TaskState,
	/// Generic or unmapped provider failure.
	Server,
	/// Local wait loop exceeded its deadline.
	Timeout,
	/// Network-level failure before a provider answer was received.
	Transport,
	/// Invalid local configuration.
	Config,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Validation => "validation",
			ErrorKind::Auth => "auth",
			ErrorKind::Quota => "quota",
			ErrorKind::NotFoundLocal => "not_found_local",
			ErrorKind::RateLimited => "rate_limited",
			ErrorKind::TaskState => "task_state",
			ErrorKind::Server => "server",
			ErrorKind::Timeout => "timeout",
			ErrorKind::Transport => "transport",
			ErrorKind::Config => "config",
		}
	}
}

/// Error token returned by the provider with a non-`OK` status.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{}.", .code.message())]
pub struct ProviderError {
	/// Canonical error code.
	pub code: ProviderCode,
	/// Raw token as sent by the provider, kept for unrecognized values.
	pub raw: Option<String>,
}
impl ProviderError {
	/// Builds an error from the provider's `value` field.
	pub fn from_token(token: Option<&str>) -> Self {
		match token {
			Some(raw) => Self { code: ProviderCode::from_token(raw), raw: Some(raw.to_owned()) },
			None => Self { code: ProviderCode::BadServerResponse, raw: None },
		}
	}
}
impl From<ProviderCode> for ProviderError {
	fn from(code: ProviderCode) -> Self {
		Self { code, raw: Some(code.as_str().to_owned()) }
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Access key is empty or whitespace.
	#[error("Access key must not be blank.")]
	BlankAccessKey,
	/// Base URL uses a scheme other than HTTP(S).
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Rejected URL.
		url: String,
	},
	/// Base URL cannot carry endpoint paths.
	#[error("Base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Rejected URL.
		url: String,
	},
	/// Endpoint path could not be joined to the base URL.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Address cache TTL must be positive.
	#[error("Address TTL must be positive.")]
	ZeroAddressTtl,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client gave up waiting for the provider.
	#[error("Request timed out while calling the provider.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Provider answered with a non-success HTTP status.
	#[error("Provider returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}

	fn kind(&self) -> ErrorKind {
		match self {
			Self::Status { status: 429, .. } => ErrorKind::RateLimited,
			Self::Status { .. } => ErrorKind::Server,
			Self::Network { .. } | Self::Timeout { .. } | Self::Io(_) => ErrorKind::Transport,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// Provider answered `OK` but the payload is unusable.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Payload is not valid JSON or does not match the expected shape.
	#[error("The {endpoint} response is malformed.")]
	Malformed {
		/// Endpoint path that produced the payload.
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Payload omitted a field required by the operation.
	#[error("The {endpoint} response is missing `{field}`.")]
	MissingField {
		/// Endpoint path that produced the payload.
		endpoint: &'static str,
		/// Missing field name.
		field: &'static str,
	},
}
