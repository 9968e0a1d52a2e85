//! Wing review records, vote tallies and tally reconciliation.
//!
//! - [`domain`]: the review model, its validation and the services driving
//!   it over persistence ports.
//! - [`outbound`]: store and preference adapters.
//! - [`audit`]: settings and orchestration for the `tally-audit` tool.

pub mod audit;
pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
