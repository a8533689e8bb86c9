use crate::harness::{Assertion, Fault, Scenario};
use apicheck_core::Resource;

#[test]
fn test_all_endpoints_reject_anonymous_callers() {
    Scenario::new("guard_all_rejected")
        .run_guard_suite()
        .assert_total(6)
        .assert_passed(6)
        .assert_summary("6/6 passed.")
        .assert_succeeded()
        .assert(Assertion::NoAuthorizedRequests)
        .run()
        .expect("every endpoint should demand a token");
}

#[test]
fn test_guard_covers_student_create() {
    Scenario::new("guard_student_create")
        .run_guard_suite()
        .assert_request_made("POST", "/api/students")
        .assert_request_made("GET", "/api/salary-policies?limit=5")
        .assert_record_count(Resource::Students, 0)
        .run()
        .expect("anonymous create should be refused without storing anything");
}

#[test]
fn test_guard_fails_when_auth_not_enforced() {
    Scenario::new("guard_open_backend")
        .with_fault(Fault::NoAuthEnforcement)
        .run_guard_suite()
        .assert_passed(0)
        .assert_not_succeeded()
        .assert_case_failed_with("학생 인증 확인", "expected 401, got 200")
        .run()
        .expect("open endpoints should fail every guard case");
}

#[test]
fn test_guard_requires_all_cases() {
    Scenario::new("guard_one_open_resource")
        .with_failing_resource(Resource::Enrollments)
        .run_guard_suite()
        .assert_passed(5)
        .assert_case_failed("수강등록 인증 확인")
        .assert_not_succeeded()
        .run()
        .expect("one failing guard case should fail the suite");
}

#[test]
fn test_guard_aborts_when_server_unreachable() {
    Scenario::new("guard_unreachable")
        .with_unreachable_server()
        .run_guard_suite()
        .assert_aborted("connection-failure")
        .run()
        .expect("an unreachable server should stop the run before any case");
}
