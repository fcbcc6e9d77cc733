//! Optional observability helpers for relay dispatches.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth1_relay.dispatch` with the `stage`
//!   and `realm` fields. Credential material is never recorded.
//! - Enable `metrics` to increment the `oauth1_relay_dispatch_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Pipeline stages a dispatch moves through, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchStage {
	/// Deriving the realm from the target URL.
	Resolving,
	/// Looking up the credential for the realm.
	LookingUp,
	/// Building OAuth parameters and the `Authorization` header.
	Signing,
	/// Waiting on the outbound HTTP call.
	Sending,
	/// Decoding the response body.
	Parsing,
}
impl DispatchStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchStage::Resolving => "resolving",
			DispatchStage::LookingUp => "looking_up",
			DispatchStage::Signing => "signing",
			DispatchStage::Sending => "sending",
			DispatchStage::Parsing => "parsing",
		}
	}
}
impl Display for DispatchStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
	/// Entry to the dispatcher.
	Attempt,
	/// Response relayed to the caller.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl DispatchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchOutcome::Attempt => "attempt",
			DispatchOutcome::Success => "success",
			DispatchOutcome::Failure => "failure",
		}
	}
}
impl Display for DispatchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
