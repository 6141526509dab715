//! Error tokens reported by the provider in the `value` field of non-`OK` responses.

// self
use crate::{_prelude::*, error::ErrorKind};

/// Canonical provider error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProviderCode {
	/// Website not found.
	BadSite,
	/// Authentication error.
	BadToken,
	/// Email not found.
	BadEmail,
	/// Message not received yet.
	WaitLink,
	/// Domain not found.
	BadDomain,
	/// Low balance.
	BadBalance,
	/// Domain out of stock.
	OutOfStock,
	/// Server error.
	SystemError,
	/// Email task not found.
	NoActivation,
	/// Rate limit exceeded.
	TimeLimitExceed,
	/// Fallback for unrecognized or missing tokens.
	BadServerResponse,
	/// Email task canceled.
	ActivationCanceled,
}
impl ProviderCode {
	const ALL: [Self; 12] = [
		Self::BadSite,
		Self::BadToken,
		Self::BadEmail,
		Self::WaitLink,
		Self::BadDomain,
		Self::BadBalance,
		Self::OutOfStock,
		Self::SystemError,
		Self::NoActivation,
		Self::TimeLimitExceed,
		Self::BadServerResponse,
		Self::ActivationCanceled,
	];

	/// Returns the wire token.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::BadSite => "BAD_SITE",
			Self::BadToken => "BAD_TOKEN",
			Self::BadEmail => "BAD_EMAIL",
			Self::WaitLink => "WAIT_LINK",
			Self::BadDomain => "BAD_DOMAIN",
			Self::BadBalance => "BAD_BALANCE",
			Self::OutOfStock => "OUT_OF_STOCK",
			Self::SystemError => "SYSTEM_ERROR",
			Self::NoActivation => "NO_ACTIVATION",
			Self::TimeLimitExceed => "TIME_LIMIT_EXCEED",
			Self::BadServerResponse => "BAD_SERVER_RESPONSE",
			Self::ActivationCanceled => "ACTIVATION_CANCELED",
		}
	}

	/// Returns the human-readable message for the code.
	pub const fn message(self) -> &'static str {
		match self {
			Self::BadSite => "Website not found",
			Self::BadToken => "Authentication error",
			Self::BadEmail => "Email not found",
			Self::WaitLink => "Message not received",
			Self::BadDomain => "Domain not found",
			Self::BadBalance => "Low balance",
			Self::OutOfStock => "Domain out of stock",
			Self::SystemError => "Server error",
			Self::NoActivation => "Email task not found",
			Self::TimeLimitExceed => "Rate limit exceeded",
			Self::BadServerResponse => "Bad server response",
			Self::ActivationCanceled => "Email task canceled",
		}
	}

	/// Classifies the code.
	///
	/// `WAIT_LINK` is only meaningful while fetching a message, where it becomes an empty
	/// result; anywhere else it is an unexpected server answer.
	pub const fn kind(self) -> ErrorKind {
		match self {
			Self::BadSite | Self::BadEmail | Self::BadDomain => ErrorKind::Validation,
			Self::BadToken => ErrorKind::Auth,
			Self::BadBalance | Self::OutOfStock => ErrorKind::Quota,
			Self::TimeLimitExceed => ErrorKind::RateLimited,
			Self::NoActivation | Self::ActivationCanceled => ErrorKind::TaskState,
			Self::WaitLink | Self::SystemError | Self::BadServerResponse => ErrorKind::Server,
		}
	}

	/// Maps a raw token, falling back to [`ProviderCode::BadServerResponse`].
	pub fn from_token(token: &str) -> Self {
		token.parse().unwrap_or(Self::BadServerResponse)
	}
}
impl FromStr for ProviderCode {
	type Err = UnknownProviderCode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let token = s.trim();

		Self::ALL
			.into_iter()
			.find(|code| code.as_str() == token)
			.ok_or_else(|| UnknownProviderCode(token.to_owned()))
	}
}
impl Display for ProviderCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error returned when a token does not name a known [`ProviderCode`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown provider code `{0}`.")]
pub struct UnknownProviderCode(pub String);
