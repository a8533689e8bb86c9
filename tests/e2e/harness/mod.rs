//! E2E test harness for apicheck.
//!
//! Scenarios run the real suites against an in-process fake backend. Some
//! builders and assertion variants exist for scenarios not written yet.

#![allow(dead_code)]

pub mod assertions;
pub mod clock;
pub mod steps;

// Re-export commonly used types
pub use assertions::Assertion;
pub use backend::Fault;
pub use scenario::Scenario;
