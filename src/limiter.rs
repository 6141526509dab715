//! FIFO request limiter that spaces outbound provider calls by a fixed interval.
//!
//! Each [`RateLimiter::acquire`] call reserves the next free slot synchronously (under a
//! short-lived lock) and then sleeps until that slot without holding any lock. Slots are
//! therefore handed out strictly in call order, consecutive slots are at least one
//! interval apart, and a caller that gives up while waiting only leaves an idle slot
//! behind instead of stalling the queue.

// crates.io
use tokio::time::{self, Instant};
// self
use crate::_prelude::*;

/// Shared limiter that admits at most one request per interval.
///
/// Every [`Client`](crate::client::Client) owns one by default; wrap a single limiter in
/// `Arc` and hand it to several clients to enforce one budget per process.
#[derive(Debug)]
pub struct RateLimiter {
	interval: Duration,
	next_slot: Mutex<Option<Instant>>,
}
impl RateLimiter {
	/// Creates a limiter with the provided spacing; a zero interval never waits.
	pub fn new(interval: Duration) -> Self {
		Self { interval, next_slot: Mutex::new(None) }
	}

	/// Returns the configured spacing.
	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Waits for the caller's turn and returns the granted permit.
	///
	/// The slot is reserved when the returned future is first polled; dropping the future
	/// before it resolves forfeits the slot.
	pub async fn acquire(&self) -> RatePermit {
		let slot = self.reserve(Instant::now());

		if slot > Instant::now() {
			#[cfg(feature = "tracing")]
			tracing::trace!(wait = ?(slot - Instant::now()), "Waiting for rate limiter slot.");

			time::sleep_until(slot).await;
		}

		RatePermit { slot }
	}

	fn reserve(&self, now: Instant) -> Instant {
		let mut next_slot = self.next_slot.lock();
		let slot = match *next_slot {
			Some(at) if at > now => at,
			_ => now,
		};

		*next_slot = Some(slot + self.interval);

		slot
	}
}
impl Default for RateLimiter {
	fn default() -> Self {
		Self::new(crate::config::ClientConfig::DEFAULT_RATE_LIMIT_INTERVAL)
	}
}

/// Proof that the limiter admitted a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatePermit {
	slot: Instant,
}
impl RatePermit {
	/// Instant the permit was scheduled for.
	pub fn slot(&self) -> Instant {
		self.slot
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test(start_paused = true)]
	async fn permits_are_fifo_and_spaced() {
		const INTERVAL: Duration = Duration::from_millis(100);

		let limiter = Arc::new(RateLimiter::new(INTERVAL));
		let admitted = Arc::new(Mutex::new(Vec::new()));
		let mut handles = Vec::new();

		for idx in 0..8 {
			let limiter = limiter.clone();
			let admitted = admitted.clone();

			handles.push(tokio::spawn(async move {
				let permit = limiter.acquire().await;

				admitted.lock().push((idx, permit.slot(), Instant::now()));
			}));
		}
		for handle in handles {
			handle.await.expect("Limiter task should not panic.");
		}

		let admitted = admitted.lock().clone();
		let order = admitted.iter().map(|(idx, ..)| *idx).collect::<Vec<_>>();

		assert_eq!(order, (0..8).collect::<Vec<_>>());

		for pair in admitted.windows(2) {
			assert!(pair[1].1 - pair[0].1 >= INTERVAL);
			assert!(pair[1].2 >= pair[1].1);
		}
	}

	#[tokio::test(start_paused = true)]
	async fn idle_limiter_admits_immediately() {
		let limiter = RateLimiter::new(Duration::from_secs(1));
		let start = Instant::now();

		limiter.acquire().await;

		assert_eq!(Instant::now(), start);

		time::advance(Duration::from_secs(5)).await;

		let before = Instant::now();

		limiter.acquire().await;

		assert_eq!(Instant::now(), before);
	}

	#[tokio::test(start_paused = true)]
	async fn dropped_waiters_do_not_block_the_queue() {
		let limiter = RateLimiter::new(Duration::from_millis(100));
		let start = Instant::now();

		limiter.acquire().await;

		// Reserve a slot, then abandon it.
		let abandoned = tokio::time::timeout(Duration::from_millis(10), limiter.acquire()).await;

		assert!(abandoned.is_err());

		let permit = limiter.acquire().await;

		assert_eq!(permit.slot() - start, Duration::from_millis(200));
	}

	#[test]
	fn reservations_advance_by_interval() {
		let limiter = RateLimiter::new(Duration::from_millis(50));
		let now = Instant::now();

		assert_eq!(limiter.reserve(now), now);
		assert_eq!(limiter.reserve(now), now + Duration::from_millis(50));
		assert_eq!(limiter.reserve(now), now + Duration::from_millis(100));
		assert_eq!(limiter.interval(), Duration::from_millis(50));
	}
}
