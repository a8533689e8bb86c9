//! Ordered test-case driver and run summary.

use crate::error::{ApiCheckError, Result};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info, warn};

/// Width of the separator lines framing a run.
const RULE_WIDTH: usize = 60;

type CaseFn<'a> = Box<dyn Fn() -> Result<()> + 'a>;

/// A named test case.
pub struct TestCase<'a> {
    name: String,
    run: CaseFn<'a>,
}

impl<'a> TestCase<'a> {
    pub fn new<F>(name: &str, run: F) -> Self
    where
        F: Fn() -> Result<()> + 'a,
    {
        Self {
            name: name.to_string(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for TestCase<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TestCase({:?})", self.name)
    }
}

/// Ordered list of test cases plus the fraction that must pass.
#[derive(Debug)]
pub struct Suite<'a> {
    name: String,
    threshold: f64,
    cases: Vec<TestCase<'a>>,
}

impl<'a> Suite<'a> {
    /// Creates an empty suite. `threshold` is clamped to `0.0..=1.0`.
    pub fn new(name: &str, threshold: f64) -> Self {
        Self {
            name: name.to_string(),
            threshold: threshold.clamp(0.0, 1.0),
            cases: Vec::new(),
        }
    }

    /// Appends a case; cases run in the order they are added.
    pub fn case<F>(mut self, name: &str, run: F) -> Self
    where
        F: Fn() -> Result<()> + 'a,
    {
        self.cases.push(TestCase::new(name, run));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Runs every case in order. A case that errors or panics is recorded as
    /// failed and the run continues with the next one.
    pub fn run(&self) -> SuiteReport {
        info!("{} 시작", self.name);
        info!("{}", "=".repeat(RULE_WIDTH));

        let mut outcomes = Vec::with_capacity(self.cases.len());
        for case in &self.cases {
            let outcome = match catch_unwind(AssertUnwindSafe(|| (case.run)())) {
                Ok(Ok(())) => {
                    info!("✅ {} 통과", case.name);
                    CaseOutcome::passed(&case.name)
                }
                Ok(Err(err)) => {
                    error!("❌ {} 실패: {}", case.name, err);
                    CaseOutcome::failed(&case.name, err.to_string())
                }
                Err(payload) => {
                    let err = ApiCheckError::Panicked(panic_message(payload.as_ref()));
                    error!("❌ {} 예외 발생: {}", case.name, err);
                    CaseOutcome::failed(&case.name, err.to_string())
                }
            };
            outcomes.push(outcome);
        }

        let report = SuiteReport {
            name: self.name.clone(),
            threshold: self.threshold,
            outcomes,
        };
        report.log_summary();
        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    /// Why the case failed; `None` when it passed.
    pub reason: Option<String>,
}

impl CaseOutcome {
    fn passed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            reason: None,
        }
    }

    fn failed(name: &str, reason: String) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            reason: Some(reason),
        }
    }
}

/// Derived summary of a suite run.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteReport {
    pub name: String,
    pub threshold: f64,
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Cases that failed, in run order.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Looks up a case outcome by name.
    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// Whether enough cases passed. An empty run never succeeds.
    pub fn succeeded(&self) -> bool {
        let total = self.total();
        total > 0 && self.passed() as f64 >= total as f64 * self.threshold
    }

    /// `"<passed>/<total> passed."`
    pub fn summary_line(&self) -> String {
        format!("{}/{} passed.", self.passed(), self.total())
    }

    fn log_summary(&self) {
        info!("{}", "=".repeat(RULE_WIDTH));
        info!("{}", self.summary_line());
        for failure in self.failures() {
            warn!(
                "  {}: {}",
                failure.name,
                failure.reason.as_deref().unwrap_or("unknown")
            );
        }
        if self.passed() == self.total() {
            info!("🎉 모든 API가 정상적으로 작동합니다!");
        } else {
            warn!("⚠️ 일부 API에 문제가 있습니다.");
        }
    }
}
