//! Message retrieval: single-shot fetches and the polling wait loop.

// crates.io
use tokio::time::{self, Instant};
// self
use crate::{
	_prelude::*,
	api::{Endpoint, MessagePayload},
	client::{
		Client, common,
		options::{MessageOptions, WaitOptions},
	},
	error::ResponseError,
	http::{ProviderHttpClient, TransportErrorMapper},
	obs::Operation,
	provider::ProviderCode,
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches the message received by `address`, or `None` when nothing arrived yet.
	///
	/// Returns the provider-extracted short value when one exists, otherwise the full body.
	/// Set [`MessageOptions::full`] to always get the full body.
	pub async fn get_message(
		&self,
		address: &str,
		options: MessageOptions,
	) -> Result<Option<String>> {
		common::observe(Operation::GetMessage, self.fetch_message(address, options.full)).await
	}

	/// Polls [`get_message`](Self::get_message) until a message arrives.
	///
	/// The deadline is checked after every poll, so the call fails with
	/// [`Error::Timeout`] no earlier than `options.timeout` and at most one poll interval
	/// later. That bound also covers time a poll spends queued in the rate limiter or in
	/// flight: a poll still pending at `timeout + poll_interval` is dropped. Any other
	/// failure ends the wait immediately.
	pub async fn wait_message(&self, address: &str, options: WaitOptions) -> Result<String> {
		common::observe(Operation::WaitMessage, async move {
			let started = Instant::now();
			let cutoff = started + options.timeout + options.poll_interval;
			let expired = || Error::Timeout { timeout: options.timeout };

			loop {
				let polled = time::timeout_at(cutoff, self.fetch_message(address, options.full))
					.await
					.map_err(|_| expired())?;

				if let Some(message) = polled? {
					return Ok(message);
				}

				let elapsed = started.elapsed();

				if elapsed >= options.timeout {
					return Err(expired());
				}

				#[cfg(feature = "tracing")]
				tracing::trace!(address, ?elapsed, "Message not received yet.");

				time::sleep_until(cutoff.min(Instant::now() + options.poll_interval)).await;
			}
		})
		.await
	}

	async fn fetch_message(&self, address: &str, full: bool) -> Result<Option<String>> {
		const ENDPOINT: Endpoint = Endpoint::GetMessage;

		let task_id = self.cache.task_id(address)?;
		let mut params = vec![("id", task_id)];

		if full {
			params.push(("full", "1".into()));
		}

		let envelope = self.fetch::<MessagePayload>(ENDPOINT, params).await?;

		if !envelope.is_success() && envelope.value.as_deref() == Some(ProviderCode::WaitLink.as_str())
		{
			return Ok(None);
		}

		let (value, payload) = envelope.into_success()?;

		Ok(select_message(value, payload.fullmessage, full)?)
	}
}

fn select_message(
	value: Option<String>,
	full_message: Option<String>,
	full: bool,
) -> Result<Option<String>, ResponseError> {
	if let Some(value) = value.filter(|value| !full && !value.is_empty()) {
		return Ok(Some(value));
	}

	match full_message {
		Some(message) if message.is_empty() => Ok(None),
		Some(message) => Ok(Some(message)),
		None if full => Err(ResponseError::MissingField {
			endpoint: Endpoint::GetMessage.path(),
			field: "fullmessage",
		}),
		None => Ok(None),
	}
}
