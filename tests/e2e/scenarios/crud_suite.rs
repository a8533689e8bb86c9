use crate::harness::{Fault, Scenario};
use apicheck_core::Resource;
use std::time::Duration;

#[test]
fn test_crud_happy_path() {
    Scenario::new("crud_happy_path")
        .run_crud_suite()
        .assert_total(6)
        .assert_passed(6)
        .assert_summary("6/6 passed.")
        .assert_succeeded()
        .assert_record_count(Resource::Students, 1)
        .assert_record_count(Resource::Classes, 1)
        .assert_record_count(Resource::Instructors, 1)
        .assert_record_count(Resource::CoursePackages, 1)
        .assert_record_count(Resource::Enrollments, 0)
        .assert_record_count(Resource::SalaryPolicies, 1)
        .run()
        .expect("a well-behaved backend should pass every case");
}

#[test]
fn test_student_lifecycle_reaches_backend() {
    Scenario::new("student_lifecycle")
        .run_crud_suite()
        .assert_record_field(Resource::Students, "student_number", "TEST0123")
        .assert_record_field(Resource::Students, "grade_level", "중2")
        .assert_record_field(Resource::Students, "name", "수정된학생_1700000123")
        .assert_record_field(Resource::Students, "status", "withdrawn")
        .assert_request_made("DELETE", "/api/students/")
        .assert_request_made("PUT", "/api/students/")
        .run()
        .expect("student should be created, updated and soft deleted");
}

#[test]
fn test_repeated_runs_create_distinct_records() {
    Scenario::new("repeated_runs")
        .run_crud_suite()
        .wait(Duration::from_secs(1))
        .run_crud_suite()
        .assert_succeeded()
        .assert_record_count(Resource::Classes, 2)
        .assert_record_field(Resource::Classes, "name", "테스트클래스_1700000123")
        .assert_record_field(Resource::Classes, "name", "테스트클래스_1700000124")
        .run()
        .expect("each run should add its own records");
}

#[test]
fn test_envelope_responses_are_understood() {
    Scenario::new("crud_envelope")
        .with_fault(Fault::Envelope)
        .run_crud_suite()
        .assert_passed(6)
        .assert_succeeded()
        .run()
        .expect("data-wrapped entities should be found");
}

#[test]
fn test_one_failing_resource_still_meets_threshold() {
    Scenario::new("crud_one_failure")
        .with_failing_resource(Resource::SalaryPolicies)
        .run_crud_suite()
        .assert_passed(5)
        .assert_summary("5/6 passed.")
        .assert_case_failed_with("급여정책 CRUD", "데이터베이스 오류")
        .assert_succeeded()
        .run()
        .expect("5 of 6 is above the default 80% threshold");
}

#[test]
fn test_two_failing_resources_miss_threshold() {
    Scenario::new("crud_two_failures")
        .with_failing_resource(Resource::Classes)
        .with_failing_resource(Resource::Instructors)
        .run_crud_suite()
        .assert_passed(4)
        .assert_case_passed("학생 CRUD")
        .assert_case_failed("클래스 CRUD")
        .assert_case_failed("강사 CRUD")
        .assert_not_succeeded()
        .run()
        .expect("4 of 6 is below the default 80% threshold");
}

#[test]
fn test_strict_threshold() {
    Scenario::new("crud_strict")
        .with_threshold(1.0)
        .with_failing_resource(Resource::Enrollments)
        .run_crud_suite()
        .assert_passed(5)
        .assert_not_succeeded()
        .run()
        .expect("a full threshold should reject any failure");
}
