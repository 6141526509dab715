//! Address records stored by the cache.

// crates.io
use tokio::time::Instant;
// self
use crate::_prelude::*;

/// Redacted webmail password keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxPassword(String);
impl MailboxPassword {
	/// Wraps a new password string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner password. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for MailboxPassword {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for MailboxPassword {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("MailboxPassword").field(&"<redacted>").finish()
	}
}
impl Display for MailboxPassword {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Cached association between an issued address and its provider task.
#[derive(Clone, PartialEq, Eq)]
pub struct AddressRecord {
	/// Issued email address (cache key).
	pub address: String,
	/// Provider task id required by message, cancel, and refresh calls.
	pub task_id: String,
	/// Webmail password, present only when requested at order time.
	pub password: Option<MailboxPassword>,
	/// Monotonic instant the record was written.
	pub issued_at: Instant,
	/// Monotonic instant after which the record reads as absent.
	pub expires_at: Instant,
}
impl AddressRecord {
	/// Returns `true` once `instant` reaches the expiry.
	pub fn is_expired_at(&self, instant: Instant) -> bool {
		instant >= self.expires_at
	}
}
impl Debug for AddressRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AddressRecord")
			.field("address", &self.address)
			.field("task_id", &self.task_id)
			.field("password_set", &self.password.is_some())
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
