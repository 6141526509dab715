//! Wire-level shapes for the provider API.
//!
//! Every endpoint answers with a JSON envelope `{"status": "OK" | "ERROR", "value": ..., ...}`.
//! On `OK`, `value` optionally carries the short extracted value (message fetches) and the
//! remaining fields carry the endpoint-specific payload; on any other status, `value`
//! carries the provider error token.

// crates.io
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{
	_prelude::*,
	error::{ProviderError, ResponseError},
};

/// Provider endpoints, relative to the configured base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Order a new address.
	OrderEmail,
	/// Reorder an address already held by the caller.
	ReorderEmail,
	/// Release an address.
	CancelEmail,
	/// Fetch the message received by a task.
	GetMessage,
	/// Look up the current task id of an address.
	FreshId,
	/// Trusted/popular domains with price and stock.
	Zones,
	/// Provider-owned domains.
	Domains,
	/// Account balance.
	Balance,
}
impl Endpoint {
	/// Returns the endpoint path.
	pub const fn path(self) -> &'static str {
		match self {
			Self::OrderEmail => "mailbox-get-email",
			Self::ReorderEmail => "mailbox-reorder",
			Self::CancelEmail => "mailbox-cancel",
			Self::GetMessage => "mailbox-get-message",
			Self::FreshId => "mailbox-get-fresh-id",
			Self::Zones => "mailbox-zones",
			Self::Domains => "mailbox-get-domains",
			Self::Balance => "user-balance",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.path())
	}
}

/// Envelope status reported by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum StatusCode {
	/// Request succeeded.
	#[serde(rename = "OK")]
	Success,
	/// Provider reported an error token in `value`.
	#[serde(rename = "ERROR")]
	Error,
	/// Fallback for unknown status strings.
	#[serde(other)]
	Unknown,
}

/// Decoded response envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
	/// Envelope status.
	pub status: StatusCode,
	/// Short extracted value on success, error token otherwise.
	#[serde(default, deserialize_with = "lenient_string")]
	pub value: Option<String>,
	/// Endpoint-specific payload.
	#[serde(flatten)]
	pub payload: T,
}
impl<T> Envelope<T> {
	/// Returns `true` when the provider answered `OK`.
	pub fn is_success(&self) -> bool {
		matches!(self.status, StatusCode::Success)
	}

	/// Returns the payload, or the provider error for any non-`OK` status.
	pub fn into_success(self) -> Result<(Option<String>, T), ProviderError> {
		if self.is_success() {
			Ok((self.value, self.payload))
		} else {
			Err(ProviderError::from_token(self.value.as_deref()))
		}
	}
}

/// Decodes a raw body into an [`Envelope`], reporting the failing JSON path on error.
pub fn decode<T>(endpoint: Endpoint, body: &[u8]) -> Result<Envelope<T>, ResponseError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| ResponseError::Malformed { endpoint: endpoint.path(), source })
}

/// Endpoint payload without fields of interest.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmptyPayload {}

/// Payload of `mailbox-get-email` and `mailbox-reorder`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddressPayload {
	/// Task id.
	#[serde(default, deserialize_with = "lenient_string")]
	pub id: Option<String>,
	/// Issued address.
	#[serde(default)]
	pub mail: Option<String>,
	/// Webmail password, when requested.
	#[serde(default)]
	pub password: Option<String>,
}

/// Payload of `mailbox-get-fresh-id`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FreshIdPayload {
	/// Current task id.
	#[serde(default, deserialize_with = "lenient_string")]
	pub id: Option<String>,
}

/// Payload of `mailbox-get-message`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MessagePayload {
	/// Full message body.
	#[serde(default)]
	pub fullmessage: Option<String>,
}

/// Payload of `user-balance`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BalancePayload {
	/// Account balance in the configured currency.
	#[serde(default, deserialize_with = "lenient_number")]
	pub balance: Option<f64>,
}

/// Payload of `mailbox-zones`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ZonesPayload {
	/// Trusted/popular domains.
	#[serde(default)]
	pub popular: Option<Vec<Zone>>,
}

/// Trusted domain entry with price and stock.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Zone {
	/// Domain name.
	pub name: String,
	/// Price per address.
	#[serde(default, deserialize_with = "lenient_number")]
	pub cost: Option<f64>,
	/// Addresses in stock.
	#[serde(default, deserialize_with = "lenient_number")]
	pub count: Option<f64>,
}

/// Payload of `mailbox-get-domains`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DomainsPayload {
	/// Provider-owned domains.
	#[serde(default)]
	pub domains: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
	Text(String),
	Number(serde_json::Number),
}

// The provider is inconsistent about quoting ids and amounts.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
		Scalar::Text(text) => text,
		Scalar::Number(number) => number.to_string(),
	}))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Scalar>::deserialize(deserializer)? {
		None => Ok(None),
		Some(Scalar::Number(number)) => Ok(number.as_f64()),
		Some(Scalar::Text(text)) => text
			.trim()
			.parse::<f64>()
			.map(Some)
			.map_err(|_| serde::de::Error::custom(format!("expected a number, found `{text}`"))),
	}
}
