// self
use crate::{
	error::ErrorKind,
	obs::{Operation, OperationOutcome},
};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(operation: Operation, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kopeechka_operation_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}

/// Counts a failed operation by its [`ErrorKind`], so quota and timeout spikes stay
/// distinguishable from provider outages.
pub fn record_operation_failure(operation: Operation, kind: ErrorKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"kopeechka_operation_failures_total",
			"operation" => operation.as_str(),
			"kind" => kind.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, kind);
	}
}
