//! Per-call option sets and their query-string encoding.

// self
use crate::{
	_prelude::*,
	provider::{self, DomainSelector},
};

pub(crate) type Params = Vec<(&'static str, String)>;

/// Options for [`Client::order_email`](crate::client::Client::order_email).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderOptions {
	/// Domains or domain groups to draw from; empty lets the provider pick its own domains.
	pub domains: Vec<DomainSelector>,
	/// Provider-side regular expression used to extract the short message value.
	pub regex: Option<String>,
	/// Only accept messages from this sender.
	pub sender: Option<String>,
	/// Only accept messages with this subject.
	pub subject: Option<String>,
	/// Request a webmail password for the address.
	pub password: bool,
	/// Draw from the caller's private pool instead of the provider's.
	pub investor: bool,
}
impl OrderOptions {
	/// Adds a domain or domain group to the selection.
	pub fn domain(mut self, selector: impl Into<DomainSelector>) -> Self {
		self.domains.push(selector.into());

		self
	}

	/// Replaces the domain selection.
	pub fn domains<I>(mut self, selectors: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<DomainSelector>,
	{
		self.domains = selectors.into_iter().map(Into::into).collect();

		self
	}

	/// Sets the extraction regex.
	pub fn regex(mut self, regex: impl Into<String>) -> Self {
		self.regex = Some(regex.into());

		self
	}

	/// Sets the sender filter.
	pub fn sender(mut self, sender: impl Into<String>) -> Self {
		self.sender = Some(sender.into());

		self
	}

	/// Sets the subject filter.
	pub fn subject(mut self, subject: impl Into<String>) -> Self {
		self.subject = Some(subject.into());

		self
	}

	/// Toggles webmail password issuance.
	pub fn with_password(mut self, enabled: bool) -> Self {
		self.password = enabled;

		self
	}

	/// Toggles the private pool.
	pub fn with_investor(mut self, enabled: bool) -> Self {
		self.investor = enabled;

		self
	}

	pub(crate) fn append_to(&self, params: &mut Params) {
		push_opt(params, "regex", self.regex.as_deref());
		push_opt(params, "sender", self.sender.as_deref());
		push_opt(params, "subject", self.subject.as_deref());
		push_flag(params, "password", self.password);
		// The provider spells this parameter with an extra `n`.
		push_flag(params, "invenstor", self.investor);
		push_opt(params, "mail_type", provider::join_selectors(&self.domains).as_deref());
	}
}

/// Options for [`Client::reorder_email`](crate::client::Client::reorder_email).
///
/// Domain, sender, and pool selection are fixed when the address is first ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReorderOptions {
	/// Provider-side regular expression used to extract the short message value.
	pub regex: Option<String>,
	/// Only accept messages with this subject.
	pub subject: Option<String>,
	/// Request a webmail password for the address.
	pub password: bool,
}
impl ReorderOptions {
	/// Sets the extraction regex.
	pub fn regex(mut self, regex: impl Into<String>) -> Self {
		self.regex = Some(regex.into());

		self
	}

	/// Sets the subject filter.
	pub fn subject(mut self, subject: impl Into<String>) -> Self {
		self.subject = Some(subject.into());

		self
	}

	/// Toggles webmail password issuance.
	pub fn with_password(mut self, enabled: bool) -> Self {
		self.password = enabled;

		self
	}

	pub(crate) fn append_to(&self, params: &mut Params) {
		push_opt(params, "regex", self.regex.as_deref());
		push_opt(params, "subject", self.subject.as_deref());
		push_flag(params, "password", self.password);
	}
}

/// Options for [`Client::get_message`](crate::client::Client::get_message).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageOptions {
	/// Always return the full message body instead of the extracted value.
	pub full: bool,
}
impl MessageOptions {
	/// Requests the full message body.
	pub fn full() -> Self {
		Self { full: true }
	}
}

/// Options for [`Client::wait_message`](crate::client::Client::wait_message).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitOptions {
	/// Always return the full message body instead of the extracted value.
	pub full: bool,
	/// Overall deadline measured on the monotonic clock.
	pub timeout: Duration,
	/// Delay between two polls.
	pub poll_interval: Duration,
}
impl WaitOptions {
	/// Default overall deadline.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);
	/// Default delay between polls.
	pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

	/// Requests the full message body.
	pub fn with_full(mut self, full: bool) -> Self {
		self.full = full;

		self
	}

	/// Overrides the overall deadline.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the delay between polls.
	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;

		self
	}
}
impl Default for WaitOptions {
	fn default() -> Self {
		Self {
			full: false,
			timeout: Self::DEFAULT_TIMEOUT,
			poll_interval: Self::DEFAULT_POLL_INTERVAL,
		}
	}
}

/// Inclusive numeric range; either end may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Lower bound (inclusive).
	pub min: Option<f64>,
	/// Upper bound (inclusive).
	pub max: Option<f64>,
}
impl Bounds {
	/// Closed range `[min, max]`.
	pub fn new(min: f64, max: f64) -> Self {
		Self { min: Some(min), max: Some(max) }
	}

	/// Range `[min, ∞)`.
	pub fn at_least(min: f64) -> Self {
		Self { min: Some(min), max: None }
	}

	/// Range `(-∞, max]`.
	pub fn at_most(max: f64) -> Self {
		Self { min: None, max: Some(max) }
	}

	/// Returns `true` when `value` lies within the range.
	pub fn contains(&self, value: f64) -> bool {
		self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
	}

	/// Like [`contains`](Self::contains), but a missing value only passes an unbounded range.
	pub(crate) fn admits(&self, value: Option<f64>) -> bool {
		match value {
			Some(value) => self.contains(value),
			None => self.min.is_none() && self.max.is_none(),
		}
	}
}

/// Options for [`Client::get_domains`](crate::client::Client::get_domains).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainsOptions {
	/// Include trusted/popular domains.
	pub trusted: bool,
	/// Include provider-owned domains.
	pub kopeechka: bool,
	/// Stock filter applied to trusted domains.
	pub count: Option<Bounds>,
	/// Price filter applied to trusted domains.
	pub price: Option<Bounds>,
}
impl DomainsOptions {
	/// Toggles trusted/popular domains.
	pub fn with_trusted(mut self, enabled: bool) -> Self {
		self.trusted = enabled;

		self
	}

	/// Toggles provider-owned domains.
	pub fn with_kopeechka(mut self, enabled: bool) -> Self {
		self.kopeechka = enabled;

		self
	}

	/// Filters trusted domains by stock.
	pub fn with_count(mut self, bounds: Bounds) -> Self {
		self.count = Some(bounds);

		self
	}

	/// Filters trusted domains by price.
	pub fn with_price(mut self, bounds: Bounds) -> Self {
		self.price = Some(bounds);

		self
	}
}
impl Default for DomainsOptions {
	fn default() -> Self {
		Self { trusted: true, kopeechka: true, count: None, price: None }
	}
}

fn push_opt(params: &mut Params, key: &'static str, value: Option<&str>) {
	if let Some(value) = value {
		params.push((key, value.to_owned()));
	}
}

fn push_flag(params: &mut Params, key: &'static str, enabled: bool) {
	if enabled {
		params.push((key, "1".into()));
	}
}
