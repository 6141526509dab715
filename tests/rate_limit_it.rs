mod common;

// std
use std::{sync::Arc, time::Duration};
// crates.io
use tokio::time::Instant;
// self
use common::*;
use kopeechka_store::{api::Endpoint, limiter::RateLimiter};

const BALANCE: &str = r#"{"status":"OK","balance":1}"#;

#[tokio::test(start_paused = true)]
async fn concurrent_requests_are_spaced_by_the_interval() {
	let client = scripted_client_with(
		config_builder("http://provider.test").rate_limit_interval(Duration::from_millis(250)),
	);

	client.http_client.respond_always(Endpoint::Balance, BALANCE);

	let start = Instant::now();
	let (a, b, c, d) = tokio::join!(
		client.get_balance(),
		client.get_balance(),
		client.get_balance(),
		client.get_balance(),
	);

	for result in [a, b, c, d] {
		assert_eq!(result.expect("Balance should succeed."), 1.);
	}

	let calls = client.http_client.calls();

	assert_eq!(calls.len(), 4);
	assert_eq!(calls[0].at, start);

	for pair in calls.windows(2) {
		assert!(pair[1].at - pair[0].at >= Duration::from_millis(250));
	}

	assert!(start.elapsed() >= Duration::from_millis(750));
}

#[tokio::test(start_paused = true)]
async fn shared_limiter_spans_clients() {
	let limiter = Arc::new(RateLimiter::new(Duration::from_secs(1)));
	let first = scripted_client().with_rate_limiter(limiter.clone());
	let second = ScriptedClient::with_http_client(
		first.config().clone(),
		first.http_client.clone(),
		ScriptedMapper,
	)
	.with_rate_limiter(limiter.clone());

	first.http_client.respond_always(Endpoint::Balance, BALANCE);

	let start = Instant::now();
	let (a, b) = tokio::join!(first.get_balance(), second.get_balance());

	a.expect("First client should succeed.");
	b.expect("Second client should succeed.");

	let calls = first.http_client.calls();

	assert_eq!(calls.len(), 2);
	assert_eq!(calls[1].at - calls[0].at, Duration::from_secs(1));
	assert!(Arc::ptr_eq(first.limiter(), second.limiter()));
	assert!(start.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn dropping_a_waiting_operation_does_not_stall_later_calls() {
	let client = scripted_client_with(
		config_builder("http://provider.test").rate_limit_interval(Duration::from_secs(1)),
	);

	client.http_client.respond_always(Endpoint::Balance, BALANCE);
	client.get_balance().await.expect("First call should succeed.");

	let abandoned = tokio::time::timeout(Duration::from_millis(100), client.get_balance()).await;

	assert!(abandoned.is_err());

	let start = Instant::now();

	client.get_balance().await.expect("Later calls should still be admitted.");

	// The abandoned slot sits idle; the next one follows it by one interval.
	assert!(start.elapsed() <= Duration::from_secs(2));
	assert_eq!(client.http_client.calls().len(), 2);
}
