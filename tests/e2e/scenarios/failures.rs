use crate::harness::{Fault, Scenario};
use apicheck_core::Resource;

#[test]
fn test_ignored_soft_delete_is_caught() {
    Scenario::new("soft_delete_ignored")
        .with_fault(Fault::SoftDeleteIgnored)
        .run_crud_suite()
        .assert_case_failed_with("학생 CRUD", "student.status")
        .assert_passed(5)
        .assert_record_field(Resource::Students, "status", "active")
        .run()
        .expect("a student still active after delete should fail the case");
}

#[test]
fn test_soft_delete_check_can_be_disabled() {
    Scenario::new("soft_delete_unchecked")
        .with_fault(Fault::SoftDeleteIgnored)
        .without_soft_delete_check()
        .run_crud_suite()
        .assert_case_passed("학생 CRUD")
        .assert_passed(6)
        .run()
        .expect("without verification the delete response is trusted");
}

#[test]
fn test_non_json_resource_fails_its_case() {
    Scenario::new("html_resource")
        .with_fault(Fault::HtmlResource("instructors".to_string()))
        .run_crud_suite()
        .assert_case_failed_with("강사 CRUD", "invalid-json")
        .assert_case_passed("클래스 CRUD")
        .assert_passed(5)
        .run()
        .expect("an HTML page should fail only its own case");
}

#[test]
fn test_tenantless_user_skips_tenant_cases() {
    Scenario::new("tenantless_user")
        .with_fault(Fault::TenantlessUser)
        .run_crud_suite()
        .assert_total(6)
        .assert_passed(0)
        .assert_case_failed_with("클래스 CRUD", "skipped")
        .assert_case_failed_with("학생 CRUD", "skipped")
        .assert_not_succeeded()
        .assert_record_count(Resource::Students, 0)
        .run()
        .expect("no tenant means no resource can be created");
}

#[test]
fn test_failed_refetch_after_delete_fails_student_case() {
    Scenario::new("refetch_fails")
        .with_fault(Fault::RefetchFails)
        .run_crud_suite()
        .assert_case_failed_with("학생 CRUD", "database unavailable")
        .assert_passed(5)
        .run()
        .expect("a server error on the re-read must not count as a confirmed delete");
}

#[test]
fn test_deleted_student_answering_404_passes() {
    Scenario::new("hard_delete")
        .with_fault(Fault::HardDelete)
        .run_crud_suite()
        .assert_case_passed("학생 CRUD")
        .assert_record_count(Resource::Students, 0)
        .assert_passed(6)
        .run()
        .expect("a 404 on the re-read confirms the delete");
}

#[test]
fn test_stale_read_back_fails_student_case() {
    Scenario::new("stale_read")
        .with_fault(Fault::StaleRead)
        .run_crud_suite()
        .assert_case_failed_with("학생 CRUD", "student.name")
        .assert_case_passed("클래스 CRUD")
        .assert_record_count(Resource::Students, 1)
        .run()
        .expect("a read-back with a different name should fail the case");
}

#[test]
fn test_ignored_update_fails_student_case() {
    Scenario::new("update_ignored")
        .with_fault(Fault::UpdateIgnored)
        .run_crud_suite()
        .assert_case_failed_with("학생 CRUD", "student.grade_level")
        .assert_record_field(Resource::Students, "grade_level", "중1")
        .assert_passed(5)
        .run()
        .expect("an update that does not take effect should fail the case");
}
