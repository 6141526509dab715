//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::{HashMap, VecDeque},
	time::Duration,
};
// crates.io
use httpmock::MockServer;
use parking_lot::Mutex;
use tokio::time::Instant;
// self
use kopeechka_store::{
	api::Endpoint,
	client::{Client, ReqwestStoreClient},
	config::{ClientConfig, ClientConfigBuilder},
	error::{Error, TransportError},
	http::{HttpFuture, ProviderHttpClient, ProviderResponse, Query, TransportErrorMapper},
	url::Url,
};

pub const ACCESS_KEY: &str = "test-access-key";

/// Client backed by [`ScriptedTransport`].
pub type ScriptedClient = Client<ScriptedTransport, ScriptedMapper>;

pub fn config_builder(base_url: &str) -> ClientConfigBuilder {
	ClientConfig::builder(ACCESS_KEY)
		.base_url(Url::parse(base_url).expect("Test base URL should parse."))
}

pub fn reqwest_client(server: &MockServer) -> ReqwestStoreClient {
	let config = config_builder(&server.base_url())
		.request_timeout(Duration::from_secs(5))
		.build()
		.expect("Test config should build.");

	ReqwestStoreClient::new(config).expect("Reqwest client should build.")
}

pub fn scripted_client() -> ScriptedClient {
	scripted_client_with(config_builder("http://provider.test"))
}

pub fn scripted_client_with(builder: ClientConfigBuilder) -> ScriptedClient {
	let config = builder.build().expect("Test config should build.");

	Client::with_http_client(config, ScriptedTransport::default(), ScriptedMapper)
}

/// Request observed by [`ScriptedTransport`].
#[derive(Clone, Debug)]
pub struct Call {
	pub path: String,
	pub query: Vec<(String, String)>,
	pub at: Instant,
}
impl Call {
	pub fn param(&self, key: &str) -> Option<&str> {
		self.query.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
	}
}

#[derive(Debug, thiserror::Error)]
#[error("No scripted response for {path}.")]
pub struct Unscripted {
	pub path: String,
}

/// In-process transport answering from per-endpoint queues.
///
/// Queued bodies are served first, then the endpoint's sticky body if one is set. It never
/// touches the network, so it is safe under a paused tokio clock; optional latency is
/// simulated with tokio timers.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
	queued: Mutex<HashMap<&'static str, VecDeque<String>>>,
	sticky: Mutex<HashMap<&'static str, String>>,
	calls: Mutex<Vec<Call>>,
	latency: Mutex<Duration>,
}
impl ScriptedTransport {
	/// Serves `body` once for `endpoint`.
	pub fn respond(&self, endpoint: Endpoint, body: &str) {
		self.queued.lock().entry(endpoint.path()).or_default().push_back(body.to_owned());
	}

	/// Serves `body` for `endpoint` whenever the queue is empty.
	pub fn respond_always(&self, endpoint: Endpoint, body: &str) {
		self.sticky.lock().insert(endpoint.path(), body.to_owned());
	}

	/// Delays every later response by `latency`.
	pub fn set_latency(&self, latency: Duration) {
		*self.latency.lock() = latency;
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}

	pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Call> {
		self.calls().into_iter().filter(|call| call.path == endpoint.path()).collect()
	}
}
impl ProviderHttpClient for ScriptedTransport {
	type TransportError = Unscripted;

	fn get<'a>(&'a self, url: &'a Url, query: &'a Query) -> HttpFuture<'a, Self::TransportError> {
		Box::pin(async move {
			let path = url.path().trim_start_matches('/').to_owned();

			self.calls.lock().push(Call {
				path: path.clone(),
				query: query.iter().map(|(key, value)| ((*key).to_owned(), value.clone())).collect(),
				at: Instant::now(),
			});

			let latency = *self.latency.lock();

			if !latency.is_zero() {
				tokio::time::sleep(latency).await;
			}

			let queued =
				self.queued.lock().get_mut(path.as_str()).and_then(|bodies| bodies.pop_front());
			let body = queued.or_else(|| self.sticky.lock().get(path.as_str()).cloned());

			body.map(ProviderResponse::ok).ok_or(Unscripted { path })
		})
	}
}

#[derive(Debug)]
pub struct ScriptedMapper;
impl TransportErrorMapper<Unscripted> for ScriptedMapper {
	fn map_transport_error(&self, _: Endpoint, error: Unscripted) -> Error {
		TransportError::network(error).into()
	}
}

/// Orders `address` with task id `id` through the scripted transport.
pub async fn order(client: &ScriptedClient, address: &str, id: &str) {
	client.http_client.respond(
		Endpoint::OrderEmail,
		&format!(r#"{{"status":"OK","id":"{id}","mail":"{address}"}}"#),
	);

	let issued = client
		.order_email("example.com", Default::default())
		.await
		.expect("Scripted order should succeed.");

	assert_eq!(issued, address);
}
