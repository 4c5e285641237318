//! Display dispatch
//!
//! Applies decoded actions to the six displays, isolating failures so one
//! bad display never blocks the others.

pub mod dispatcher;
pub mod report;

#[cfg(test)]
pub(crate) mod mock;

pub use dispatcher::Dispatcher;
pub use report::DispatchReport;
