mod common;

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
use tokio::time::Instant;
// self
use common::*;
use kopeechka_store::{
	api::Endpoint,
	client::{MessageOptions, OrderOptions, WaitOptions},
	error::{Error, ErrorKind},
	obs::Operation,
};

const WAIT_LINK: &str = r#"{"status":"ERROR","value":"WAIT_LINK"}"#;

#[tokio::test(start_paused = true)]
async fn wait_message_times_out_within_one_poll_of_the_deadline() {
	let client = scripted_client();
	let start = Instant::now();

	order(&client, "user@gmx.com", "42").await;
	client.http_client.respond_always(Endpoint::GetMessage, WAIT_LINK);

	let options = WaitOptions::default()
		.with_timeout(Duration::from_secs(12))
		.with_poll_interval(Duration::from_secs(5));
	let err = client
		.wait_message("user@gmx.com", options)
		.await
		.expect_err("Nothing ever arrives, so the wait should time out.");
	let elapsed = start.elapsed();

	assert!(elapsed >= Duration::from_secs(12), "Timed out too early: {elapsed:?}.");
	assert!(elapsed <= Duration::from_secs(17), "Timed out too late: {elapsed:?}.");
	assert_eq!(err.kind(), ErrorKind::Timeout);
	assert_eq!(err.operation(), Some(Operation::WaitMessage));
	assert_eq!(err.to_string(), "Failed to wait for message.");
	assert_eq!(client.http_client.calls_to(Endpoint::GetMessage).len(), 4);
}

#[tokio::test(start_paused = true)]
async fn wait_message_deadline_covers_time_queued_in_the_limiter() {
	let client = scripted_client_with(
		config_builder("http://provider.test").rate_limit_interval(Duration::from_secs(30)),
	);
	let start = Instant::now();

	// The order takes the first slot, so the first poll would wait 30 s for its turn.
	order(&client, "user@gmx.com", "42").await;
	client.http_client.respond_always(Endpoint::GetMessage, WAIT_LINK);

	let options = WaitOptions::default()
		.with_timeout(Duration::from_secs(12))
		.with_poll_interval(Duration::from_secs(5));
	let err = client
		.wait_message("user@gmx.com", options)
		.await
		.expect_err("A poll stuck in the limiter should not outlive the deadline.");
	let elapsed = start.elapsed();

	assert!(elapsed >= Duration::from_secs(12), "Timed out too early: {elapsed:?}.");
	assert!(elapsed <= Duration::from_secs(17), "Timed out too late: {elapsed:?}.");
	assert_eq!(err.kind(), ErrorKind::Timeout);
	assert_eq!(err.operation(), Some(Operation::WaitMessage));
	assert!(client.http_client.calls_to(Endpoint::GetMessage).is_empty());
}

#[tokio::test(start_paused = true)]
async fn wait_message_deadline_covers_slow_responses() {
	let client = scripted_client();
	let start = Instant::now();

	order(&client, "user@gmx.com", "42").await;
	client.http_client.set_latency(Duration::from_secs(50));
	client.http_client.respond_always(Endpoint::GetMessage, WAIT_LINK);

	let options = WaitOptions::default()
		.with_timeout(Duration::from_secs(12))
		.with_poll_interval(Duration::from_secs(5));
	let err = client
		.wait_message("user@gmx.com", options)
		.await
		.expect_err("A hanging poll should not outlive the deadline.");
	let elapsed = start.elapsed();

	assert!(elapsed >= Duration::from_secs(12), "Timed out too early: {elapsed:?}.");
	assert!(elapsed <= Duration::from_secs(17), "Timed out too late: {elapsed:?}.");
	assert_eq!(err.kind(), ErrorKind::Timeout);
	assert_eq!(client.http_client.calls_to(Endpoint::GetMessage).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn wait_message_returns_the_first_message() {
	let client = scripted_client();

	order(&client, "user@gmx.com", "42").await;

	let transport = &client.http_client;

	transport.respond(Endpoint::GetMessage, WAIT_LINK);
	transport.respond(Endpoint::GetMessage, WAIT_LINK);
	transport.respond(Endpoint::GetMessage, r#"{"status":"OK","value":"123456"}"#);

	let start = Instant::now();
	let message = client
		.wait_message("user@gmx.com", WaitOptions::default())
		.await
		.expect("Third poll should deliver the message.");
	let polls = transport.calls_to(Endpoint::GetMessage);

	assert_eq!(message, "123456");
	assert_eq!(polls.len(), 3);
	assert!(start.elapsed() >= Duration::from_secs(10));
	assert!(start.elapsed() < Duration::from_secs(11));

	for pair in polls.windows(2) {
		assert!(pair[1].at - pair[0].at >= WaitOptions::DEFAULT_POLL_INTERVAL);
	}
	for poll in &polls {
		assert_eq!(poll.param("id"), Some("42"));
		assert_eq!(poll.param("full"), None);
	}
}

#[tokio::test(start_paused = true)]
async fn wait_message_aborts_on_the_first_error() {
	let client = scripted_client();

	order(&client, "user@gmx.com", "42").await;

	let transport = &client.http_client;

	transport.respond(Endpoint::GetMessage, WAIT_LINK);
	transport
		.respond(Endpoint::GetMessage, r#"{"status":"ERROR","value":"ACTIVATION_CANCELED"}"#);

	let start = Instant::now();
	let err = client
		.wait_message("user@gmx.com", WaitOptions::default())
		.await
		.expect_err("A canceled task should end the wait.");

	assert_eq!(err.kind(), ErrorKind::TaskState);
	assert_eq!(err.operation(), Some(Operation::WaitMessage));
	assert!(start.elapsed() < Duration::from_secs(6));
	assert_eq!(transport.calls_to(Endpoint::GetMessage).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn wait_message_requires_a_cached_address() {
	let client = scripted_client();
	let err = client
		.wait_message("ghost@gmx.com", WaitOptions::default())
		.await
		.expect_err("Unknown addresses should fail immediately.");

	assert_eq!(err.kind(), ErrorKind::NotFoundLocal);
	assert!(client.http_client.calls().is_empty());
}

#[tokio::test]
async fn get_message_prefers_the_short_value() {
	let server = MockServer::start_async().await;
	let client = reqwest_client(&server);
	let _order = server
		.mock_async(|when, then| {
			when.method(GET).path("/mailbox-get-email");
			then.status(200).body(r#"{"status":"OK","id":"42","mail":"user@gmx.com"}"#);
		})
		.await;
	let short = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/mailbox-get-message")
				.query_param("id", "42")
				.query_param_missing("full");
			then.status(200)
				.body(r#"{"status":"OK","value":"123456","fullmessage":"<p>Code: 123456</p>"}"#);
		})
		.await;
	let full = server
		.mock_async(|when, then| {
			when.method(GET).path("/mailbox-get-message").query_param("id", "42").query_param(
				"full", "1",
			);
			then.status(200)
				.body(r#"{"status":"OK","value":"123456","fullmessage":"<p>Code: 123456</p>"}"#);
		})
		.await;
	let email = client
		.order_email("example.com", OrderOptions::default())
		.await
		.expect("Order should succeed.");
	let message = client
		.get_message(&email, MessageOptions::default())
		.await
		.expect("Short fetch should succeed.");

	assert_eq!(message.as_deref(), Some("123456"));

	let message =
		client.get_message(&email, MessageOptions::full()).await.expect("Full fetch should succeed.");

	assert_eq!(message.as_deref(), Some("<p>Code: 123456</p>"));

	short.assert_calls_async(1).await;
	full.assert_calls_async(1).await;
}

#[tokio::test]
async fn get_message_falls_back_to_the_body_and_treats_wait_link_as_empty() {
	let client = scripted_client();

	order(&client, "user@gmx.com", "42").await;

	let transport = &client.http_client;

	transport.respond(Endpoint::GetMessage, WAIT_LINK);
	transport.respond(Endpoint::GetMessage, r#"{"status":"OK","fullmessage":"Welcome aboard"}"#);

	assert_eq!(
		client
			.get_message("user@gmx.com", MessageOptions::default())
			.await
			.expect("WAIT_LINK should not be an error."),
		None,
	);
	assert_eq!(
		client
			.get_message("user@gmx.com", MessageOptions::default())
			.await
			.expect("Body-only messages should succeed."),
		Some("Welcome aboard".into()),
	);
}

#[tokio::test]
async fn get_message_reports_provider_and_local_failures() {
	let client = scripted_client();
	let err = client
		.get_message("ghost@gmx.com", MessageOptions::default())
		.await
		.expect_err("Unknown addresses should fail.");

	assert_eq!(err.kind(), ErrorKind::NotFoundLocal);
	assert!(client.http_client.calls().is_empty());

	order(&client, "user@gmx.com", "42").await;
	client
		.http_client
		.respond(Endpoint::GetMessage, r#"{"status":"ERROR","value":"NO_ACTIVATION"}"#);

	let err = client
		.get_message("user@gmx.com", MessageOptions::default())
		.await
		.expect_err("Missing tasks should fail.");

	assert_eq!(err.kind(), ErrorKind::TaskState);
	assert_eq!(err.to_string(), "Failed to get message.");
	assert!(matches!(err.cause(), Some(Error::Provider(_))));
}
