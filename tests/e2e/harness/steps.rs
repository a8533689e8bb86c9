use std::time::Duration;

use super::assertions::Assertion;

/// All possible actions in a test scenario
#[derive(Debug)]
pub enum ScenarioStep {
    // Suite runs
    RunGuardSuite,
    RunCrudSuite,

    // Single calls
    Login,
    HealthCheck,

    // Time control
    Wait { duration: Duration },

    // Assertions (can be interspersed)
    Assert { assertion: Assertion },
}
