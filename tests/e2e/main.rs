//! End-to-end scenarios: the real suites against an in-process backend.

mod harness;
