use crate::harness::{Assertion, Fault, Scenario};
use apicheck_core::Resource;

#[test]
fn test_wrong_password_aborts_crud_suite() {
    Scenario::new("wrong_password")
        .with_password("not-the-password")
        .run_crud_suite()
        .assert_aborted("이메일 또는 비밀번호가 올바르지 않습니다.")
        .assert(Assertion::NoAuthorizedRequests)
        .assert_record_count(Resource::Students, 0)
        .run()
        .expect("a failed login should stop the suite before any case");
}

#[test]
fn test_login_without_token_aborts() {
    Scenario::new("login_without_token")
        .with_fault(Fault::LoginWithoutToken)
        .run_crud_suite()
        .assert_aborted("access_token")
        .run()
        .expect("a login response without a token is a failed login");
}

#[test]
fn test_repeated_login_resolves_same_tenant() {
    Scenario::new("repeated_login")
        .login()
        .login()
        .assert(Assertion::SessionCount(2))
        .assert(Assertion::SessionsShareTenant)
        .run()
        .expect("the same credentials should always map to one tenant");
}

#[test]
fn test_health_check_accepts_html_root() {
    Scenario::new("health_html_root")
        .health_check()
        .assert_request_made("GET", "/")
        .run()
        .expect("any HTTP answer counts as reachable");
}
