//! TTL-bounded address cache mapping issued addresses to provider task ids.
//!
//! Expiry is lazy: every read checks the stored deadline, and an expired record behaves
//! exactly like an absent one (it is dropped on the spot). [`AddressCache::purge_expired`]
//! is available for callers that want to bound memory between reads. Deadlines live on
//! tokio's monotonic clock, so wall-clock jumps never stretch or shorten a record's life.

pub mod record;

pub use record::*;

// crates.io
use tokio::time::Instant;
// self
use crate::_prelude::*;

/// Error type produced by [`AddressCache`] lookups.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CacheError {
	/// No unexpired record exists for the address.
	#[error("Email id not found for {address}.")]
	AddressNotFound {
		/// Address that missed.
		address: String,
	},
	/// No unexpired password exists for the address.
	#[error("Email password not found for {address}.")]
	PasswordNotFound {
		/// Address that missed.
		address: String,
	},
}

type RecordMap = RwLock<HashMap<String, AddressRecord>>;

/// Thread-safe, per-client store of [`AddressRecord`]s.
#[derive(Debug)]
pub struct AddressCache {
	ttl: Duration,
	records: RecordMap,
}
impl AddressCache {
	/// Creates an empty cache whose records live for `ttl`.
	pub fn new(ttl: Duration) -> Self {
		Self { ttl, records: Default::default() }
	}

	/// Returns the configured record lifetime.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Inserts or overwrites the record for `address` with a fresh expiry.
	pub fn put(&self, address: &str, task_id: &str, password: Option<&str>) {
		self.put_at(address, task_id, password, Instant::now());
	}

	/// [`put`](Self::put) evaluated at `now`.
	///
	/// A write without a password keeps the password of a live record for the same address,
	/// so refreshing the task id never drops webmail access.
	pub fn put_at(&self, address: &str, task_id: &str, password: Option<&str>, now: Instant) {
		let mut records = self.records.write();
		let password = match password {
			Some(value) => Some(MailboxPassword::new(value)),
			None => records
				.get(address)
				.filter(|record| !record.is_expired_at(now))
				.and_then(|record| record.password.clone()),
		};

		#[cfg(feature = "tracing")]
		tracing::debug!(address, task_id, password_set = password.is_some(), "Caching address record.");

		records.insert(
			address.to_owned(),
			AddressRecord {
				address: address.to_owned(),
				task_id: task_id.to_owned(),
				password,
				issued_at: now,
				expires_at: now + self.ttl,
			},
		);
	}

	/// Resolves the task id for `address`.
	pub fn task_id(&self, address: &str) -> Result<String, CacheError> {
		self.task_id_at(address, Instant::now())
	}

	/// [`task_id`](Self::task_id) evaluated at `now`.
	pub fn task_id_at(&self, address: &str, now: Instant) -> Result<String, CacheError> {
		self.live_record(address, now)
			.map(|record| record.task_id)
			.ok_or_else(|| CacheError::AddressNotFound { address: address.to_owned() })
	}

	/// Resolves the webmail password for `address`.
	pub fn password(&self, address: &str) -> Result<MailboxPassword, CacheError> {
		self.password_at(address, Instant::now())
	}

	/// [`password`](Self::password) evaluated at `now`.
	pub fn password_at(
		&self,
		address: &str,
		now: Instant,
	) -> Result<MailboxPassword, CacheError> {
		self.live_record(address, now)
			.and_then(|record| record.password)
			.ok_or_else(|| CacheError::PasswordNotFound { address: address.to_owned() })
	}

	/// Removes the record for `address` regardless of its remaining lifetime.
	///
	/// Returns `true` when a record (live or expired) was removed.
	pub fn evict(&self, address: &str) -> bool {
		let removed = self.records.write().remove(address).is_some();

		#[cfg(feature = "tracing")]
		tracing::debug!(address, removed, "Evicted address record.");

		removed
	}

	/// Drops every record expired at `now`, returning how many were removed.
	pub fn purge_expired(&self) -> usize {
		self.purge_expired_at(Instant::now())
	}

	/// [`purge_expired`](Self::purge_expired) evaluated at `now`.
	pub fn purge_expired_at(&self, now: Instant) -> usize {
		let mut records = self.records.write();
		let before = records.len();

		records.retain(|_, record| !record.is_expired_at(now));

		before - records.len()
	}

	/// Number of stored records, including expired ones not yet dropped.
	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	/// Returns `true` when no records are stored.
	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}

	fn live_record(&self, address: &str, now: Instant) -> Option<AddressRecord> {
		{
			let records = self.records.read();

			match records.get(address) {
				Some(record) if !record.is_expired_at(now) => return Some(record.clone()),
				Some(_) => {},
				None => return None,
			}
		}

		self.drop_expired(address, now);

		None
	}

	fn drop_expired(&self, address: &str, now: Instant) {
		let mut records = self.records.write();

		// Another writer may have refreshed the record between the two locks.
		if records.get(address).is_some_and(|record| record.is_expired_at(now)) {
			records.remove(address);

			#[cfg(feature = "tracing")]
			tracing::trace!(address, "Dropped expired address record.");
		}
	}
}
impl Default for AddressCache {
	fn default() -> Self {
		Self::new(crate::config::ClientConfig::DEFAULT_ADDRESS_TTL)
	}
}
