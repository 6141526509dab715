//! Request plumbing shared by every client operation.

// self
use crate::{
	_prelude::*,
	api::{self, Endpoint, Envelope},
	client::{Client, options::Params},
	error::{ResponseError, TransportError},
	http::{ProviderHttpClient, TransportErrorMapper},
	obs::{self, Operation, OperationOutcome, OperationSpan},
};

impl<C, M> Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends one rate-limited request and decodes its envelope without judging its status.
	pub(crate) async fn fetch<T>(&self, endpoint: Endpoint, params: Params) -> Result<Envelope<T>>
	where
		T: serde::de::DeserializeOwned,
	{
		let url = self.config.endpoint_url(endpoint.path())?;
		let mut query = self.config.base_query();

		query.extend(params);

		let _permit = self.limiter.acquire().await;
		let response = self
			.http_client
			.get(&url, &query)
			.await
			.map_err(|e| self.transport_mapper.map_transport_error(endpoint, e))?;

		#[cfg(feature = "tracing")]
		tracing::debug!(
			endpoint = endpoint.path(),
			status = response.metadata.status,
			bytes = response.body.len(),
			"Provider responded."
		);

		if !response.metadata.is_success() {
			return Err(TransportError::Status {
				status: response.metadata.status,
				retry_after: response.metadata.retry_after,
			}
			.into());
		}

		Ok(api::decode(endpoint, &response.body)?)
	}

	/// [`fetch`](Self::fetch) that turns any non-`OK` envelope into a provider error.
	pub(crate) async fn call<T>(
		&self,
		endpoint: Endpoint,
		params: Params,
	) -> Result<(Option<String>, T)>
	where
		T: serde::de::DeserializeOwned,
	{
		Ok(self.fetch::<T>(endpoint, params).await?.into_success()?)
	}
}

/// Runs `fut` inside an operation span, records its outcome, and tags any failure.
pub(crate) async fn observe<T, F>(operation: Operation, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(operation);

	obs::record_operation_outcome(operation, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;

	match result {
		Ok(value) => {
			span.record_outcome(OperationOutcome::Success, None);
			obs::record_operation_outcome(operation, OperationOutcome::Success);

			Ok(value)
		},
		Err(e) => {
			let kind = e.kind();

			span.record_outcome(OperationOutcome::Failure, Some(kind));
			obs::record_operation_outcome(operation, OperationOutcome::Failure);
			obs::record_operation_failure(operation, kind);

			#[cfg(feature = "tracing")]
			tracing::debug!(
				operation = operation.as_str(),
				kind = kind.as_str(),
				error = %e,
				"Operation failed."
			);

			Err(e.during(operation))
		},
	}
}

/// Extracts a field the operation cannot proceed without.
pub(crate) fn require<T>(
	value: Option<T>,
	endpoint: Endpoint,
	field: &'static str,
) -> Result<T, ResponseError> {
	value.ok_or(ResponseError::MissingField { endpoint: endpoint.path(), field })
}
