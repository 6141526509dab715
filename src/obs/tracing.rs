// self
use crate::{
	_prelude::*,
	error::ErrorKind,
	obs::{Operation, OperationOutcome},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span covering one client operation, from its first request to its settled result.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span for `operation`; sub-requests also name their parent operation.
	pub fn new(operation: Operation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"kopeechka.operation",
				operation = operation.as_str(),
				parent = operation.parent().map(Operation::as_str),
				outcome = tracing::field::Empty,
				error_kind = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	/// Stamps the settled outcome, and the error kind of a failure, onto the span.
	pub fn record_outcome(&self, outcome: OperationOutcome, kind: Option<ErrorKind>) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome.as_str());

			if let Some(kind) = kind {
				self.span.record("error_kind", kind.as_str());
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (outcome, kind);
		}
	}
}
