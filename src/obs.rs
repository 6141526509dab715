//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `kopeechka.operation`. Each span carries
//!   the `operation` label and, for domain-listing sub-requests, the `parent` operation. The
//!   `outcome` and `error_kind` fields are filled in when the operation settles. The cache
//!   and rate limiter add debug events.
//! - Enable `metrics` to increment the `kopeechka_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`, and the
//!   `kopeechka_operation_failures_total` counter labeled by `operation` + `kind`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client operations observed by spans, metrics, and error wrappers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Order a new address.
	OrderEmail,
	/// Reorder an address already held by the caller.
	ReorderEmail,
	/// Release an address.
	CancelEmail,
	/// Re-synchronize the task id of an address.
	RefreshEmailId,
	/// Single-shot message fetch.
	GetMessage,
	/// Polling message fetch.
	WaitMessage,
	/// Account balance lookup.
	GetBalance,
	/// Domain list lookup.
	GetDomains,
	/// Trusted/popular domain sub-request of [`Operation::GetDomains`].
	FetchTrustedDomains,
	/// Provider-owned domain sub-request of [`Operation::GetDomains`].
	FetchKopeechkaDomains,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::OrderEmail => "order_email",
			Operation::ReorderEmail => "reorder_email",
			Operation::CancelEmail => "cancel_email",
			Operation::RefreshEmailId => "refresh_email_id",
			Operation::GetMessage => "get_message",
			Operation::WaitMessage => "wait_message",
			Operation::GetBalance => "get_balance",
			Operation::GetDomains => "get_domains",
			Operation::FetchTrustedDomains => "fetch_trusted_domains",
			Operation::FetchKopeechkaDomains => "fetch_kopeechka_domains",
		}
	}

	/// Returns the operation this one runs inside of, if it is a sub-request.
	pub const fn parent(self) -> Option<Operation> {
		match self {
			Operation::FetchTrustedDomains | Operation::FetchKopeechkaDomains =>
				Some(Operation::GetDomains),
			_ => None,
		}
	}

	/// Returns the phrase used in "Failed to ..." error messages.
	pub const fn describe(self) -> &'static str {
		match self {
			Operation::OrderEmail => "order email address",
			Operation::ReorderEmail => "reorder email address",
			Operation::CancelEmail => "cancel email address",
			Operation::RefreshEmailId => "refresh email id",
			Operation::GetMessage => "get message",
			Operation::WaitMessage => "wait for message",
			Operation::GetBalance => "get balance",
			Operation::GetDomains => "get domains",
			Operation::FetchTrustedDomains => "fetch trusted domains",
			Operation::FetchKopeechkaDomains => "fetch kopeechka domains",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
